use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use rust_decimal::Decimal;
use std::io::Cursor;
use std::str::FromStr;

use crate::core::format::{format_amount, format_date, parse_amount, parse_date};
use crate::core::{InvoiceError, Result};

fn xml_io(e: std::io::Error) -> InvoiceError {
    InvoiceError::Xml(format!("XML write error: {e}"))
}

/// Thin wrapper over the quick-xml writer with FA-specific helpers.
///
/// Every `opt_*` helper omits the element when the value is absent.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new(indent: usize) -> Result<Self> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', indent);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    pub fn text_element_with_attrs(
        &mut self,
        name: &str,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self> {
        self.start_element_with_attrs(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Optional text; `None` and empty strings are both omitted.
    pub fn opt_text(&mut self, name: &str, text: Option<&str>) -> Result<&mut Self> {
        match text {
            Some(t) if !t.is_empty() => self.text_element(name, t),
            _ => Ok(self),
        }
    }

    pub fn amount(&mut self, name: &str, value: Decimal) -> Result<&mut Self> {
        self.text_element(name, &format_amount(value))
    }

    pub fn opt_amount(&mut self, name: &str, value: Option<Decimal>) -> Result<&mut Self> {
        self.opt_with(name, value, format_amount)
    }

    /// Optional value written through a custom formatter.
    pub fn opt_with<T>(
        &mut self,
        name: &str,
        value: Option<T>,
        format: impl FnOnce(T) -> String,
    ) -> Result<&mut Self> {
        match value {
            Some(v) => self.text_element(name, &format(v)),
            None => Ok(self),
        }
    }

    pub fn opt_date(&mut self, name: &str, value: Option<NaiveDate>) -> Result<&mut Self> {
        self.opt_with(name, value, format_date)
    }

    /// Yes/no field: `1` for yes, `2` for no.
    pub fn flag(&mut self, name: &str, value: bool) -> Result<&mut Self> {
        self.text_element(name, if value { "1" } else { "2" })
    }

    /// Presence marker, always `1`.
    pub fn marker(&mut self, name: &str) -> Result<&mut Self> {
        self.text_element(name, "1")
    }
}

/// An element with its local name, concatenated text and child elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// First child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given local name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of a child element, if present.
    pub fn text_of(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    pub fn string(&self, name: &str) -> Option<String> {
        self.text_of(name).map(str::to_string)
    }

    pub fn amount(&self, name: &str) -> Result<Option<Decimal>> {
        self.text_of(name).map(parse_amount).transpose()
    }

    pub fn date(&self, name: &str) -> Result<Option<NaiveDate>> {
        self.text_of(name).map(parse_date).transpose()
    }

    /// Text of a child element with surrounding whitespace removed, for
    /// values whose lexical form never carries it (numbers, codes, flags).
    pub fn token_of(&self, name: &str) -> Option<&str> {
        self.text_of(name).map(str::trim)
    }

    pub fn number<T: FromStr>(&self, name: &str) -> Result<Option<T>> {
        self.token_of(name)
            .map(|t| {
                t.parse::<T>()
                    .map_err(|_| InvoiceError::Format(format!("invalid number '{t}' in {name}")))
            })
            .transpose()
    }

    /// Coded value looked up in its catalog; unknown tokens are errors.
    pub fn code<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr<Err = InvoiceError>,
    {
        self.token_of(name).map(str::parse::<T>).transpose()
    }

    /// True when the element is present with value `1`.
    pub fn flag(&self, name: &str) -> bool {
        self.token_of(name) == Some("1")
    }
}

/// Parse a document into an element tree. Namespace prefixes are dropped.
///
/// Text content is kept verbatim. Whitespace around child elements
/// (indentation) is dropped when the element closes.
pub fn parse_tree(xml: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                stack.push(XmlNode::new(local_name(e)?));
            }
            Ok(Event::Empty(ref e)) => {
                let node = XmlNode::new(local_name(e)?);
                attach(&mut stack, &mut root, node);
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| InvoiceError::Xml(format!("XML text error: {e}")))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                let bytes = e.into_inner();
                let text = std::str::from_utf8(&bytes)
                    .map_err(|e| InvoiceError::Xml(format!("XML UTF-8 error: {e}")))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(text);
                }
            }
            Ok(Event::End(_)) => {
                if let Some(mut node) = stack.pop() {
                    if !node.children.is_empty() && node.text.trim().is_empty() {
                        node.text.clear();
                    }
                    attach(&mut stack, &mut root, node);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(InvoiceError::Xml(format!("XML parse error: {e}")));
            }
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(InvoiceError::Xml(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| InvoiceError::Xml("document has no root element".into()))
}

fn local_name(e: &BytesStart<'_>) -> Result<String> {
    std::str::from_utf8(e.local_name().as_ref())
        .map(str::to_string)
        .map_err(|e| InvoiceError::Xml(format!("XML UTF-8 error: {e}")))
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}
