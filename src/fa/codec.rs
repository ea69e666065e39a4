use std::io::{Read, Write};

use tracing::debug;

use crate::core::{Invoice, InvoiceError, Result, validate};

use super::reader::read_invoice;
use super::writer::write_invoice;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Codec settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaOptions {
    /// Run [`validate`] before serializing and refuse invalid documents.
    pub validate_before_serialize: bool,
    /// Spaces per nesting level in the output.
    pub indent: usize,
}

impl Default for FaOptions {
    fn default() -> Self {
        Self {
            validate_before_serialize: false,
            indent: 2,
        }
    }
}

impl FaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate_before_serialize(mut self, enabled: bool) -> Self {
        self.validate_before_serialize = enabled;
        self
    }

    pub fn indent(mut self, spaces: usize) -> Self {
        self.indent = spaces;
        self
    }
}

/// FA serializer/deserializer with fixed options.
///
/// The `to_*` methods fail on write errors (and on invalid documents when
/// validation is enabled). The `from_*` methods never fail: anything that
/// does not parse yields `None`.
#[derive(Debug, Clone, Default)]
pub struct FaCodec {
    options: FaOptions,
}

impl FaCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FaOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FaOptions {
        &self.options
    }

    pub fn to_xml(&self, invoice: &Invoice) -> Result<String> {
        let bytes = self.to_bytes(invoice)?;
        String::from_utf8(bytes).map_err(|e| InvoiceError::Xml(format!("XML UTF-8 error: {e}")))
    }

    pub fn to_bytes(&self, invoice: &Invoice) -> Result<Vec<u8>> {
        if self.options.validate_before_serialize {
            let result = validate(invoice);
            if !result.is_valid() {
                return Err(InvoiceError::InvalidDocument(result.summary()));
            }
        }
        write_invoice(invoice, self.options.indent)
    }

    pub fn from_xml(&self, xml: &str) -> Option<Invoice> {
        match read_invoice(xml) {
            Ok(invoice) => Some(invoice),
            Err(e) => {
                debug!(error = %e, "could not parse FA document");
                None
            }
        }
    }

    pub fn from_bytes(&self, bytes: &[u8]) -> Option<Invoice> {
        match decode(bytes) {
            Ok(xml) => self.from_xml(xml),
            Err(e) => {
                debug!(error = %e, "FA document is not valid UTF-8");
                None
            }
        }
    }
}

/// Serialize an invoice to FA XML text.
pub fn write_fa_xml(invoice: &Invoice) -> Result<String> {
    FaCodec::new().to_xml(invoice)
}

/// Parse FA XML text, surfacing every structural error.
pub fn parse_fa_xml(xml: &str) -> Result<Invoice> {
    read_invoice(xml)
}

/// Serialize an invoice into any writer.
pub fn write_to<W: Write>(invoice: &Invoice, mut writer: W) -> Result<()> {
    let bytes = FaCodec::new().to_bytes(invoice)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Read a whole FA document from any reader. A leading BOM is accepted.
pub fn read_from<R: Read>(mut reader: R) -> Result<Invoice> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    read_invoice(decode(&bytes)?)
}

/// Serialize with default options.
pub fn to_xml(invoice: &Invoice) -> Result<String> {
    FaCodec::new().to_xml(invoice)
}

/// Serialize to UTF-8 bytes (no BOM) with default options.
pub fn to_bytes(invoice: &Invoice) -> Result<Vec<u8>> {
    FaCodec::new().to_bytes(invoice)
}

/// Best-effort parse; `None` for empty or malformed input.
pub fn from_xml(xml: &str) -> Option<Invoice> {
    FaCodec::new().from_xml(xml)
}

/// Best-effort parse of UTF-8 bytes; `None` for empty or malformed input.
pub fn from_bytes(bytes: &[u8]) -> Option<Invoice> {
    FaCodec::new().from_bytes(bytes)
}

fn decode(bytes: &[u8]) -> Result<&str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|e| InvoiceError::Xml(format!("XML UTF-8 error: {e}")))
}
