//! FA(3) XML serialization and parsing.
//!
//! The writer walks the document in the order the schema mandates and
//! omits every optional element whose value is absent. Output is UTF-8
//! without a byte-order mark, indented for readability.
//!
//! # Entry points
//!
//! - Strict: [`write_fa_xml`], [`parse_fa_xml`], [`write_to`], [`read_from`]
//! - Convenience: [`to_xml`], [`to_bytes`], [`from_xml`], [`from_bytes`]
//!   (the `from_*` wrappers return `None` instead of an error)
//! - Configurable: [`FaCodec`] with [`FaOptions`]
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ksef_fa::core::*;
//! use ksef_fa::fa::{self, FaCodec, FaOptions};
//! use rust_decimal_macros::dec;
//!
//! let invoice = build_invoice()
//!     .number("FV/2024/06/002")
//!     .issue_date(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap())
//!     .with_seller(
//!         PartyBuilder::new("ACME Sp. z o.o.")
//!             .nip("5260250274")
//!             .address(AddressBuilder::new(CountryCode::Pl, "ul. Prosta 1, 00-001 Warszawa").build())
//!             .build(),
//!     )
//!     .with_buyer(PartyBuilder::new("Klient S.A.").nip("1234563218").build())
//!     .add_line_item(|l| {
//!         l.name("Dostawa")
//!             .net_amount(dec!(200))
//!             .vat_amount(dec!(16))
//!             .vat_rate(VatRate::Rate8)
//!     })
//!     .build();
//!
//! let xml = fa::to_xml(&invoice).unwrap();
//! assert!(xml.contains("<P_13_2>200.00</P_13_2>"));
//! assert_eq!(fa::from_xml(&xml), Some(invoice.clone()));
//!
//! let strict = FaCodec::with_options(FaOptions::new().validate_before_serialize(true));
//! assert!(strict.to_bytes(&invoice).is_ok());
//! ```

mod codec;
mod reader;
mod writer;
pub(crate) mod xml_utils;

pub use codec::{
    FaCodec, FaOptions, from_bytes, from_xml, parse_fa_xml, read_from, to_bytes, to_xml,
    write_fa_xml, write_to,
};

/// Target namespace of the FA(3) schema.
pub const FA_NAMESPACE: &str = "http://crd.gov.pl/wzor/2025/06/25/13775/";

/// Namespace of the shared domain type definitions, bound to `etd`.
pub const ETD_NAMESPACE: &str =
    "http://crd.gov.pl/xml/schematy/dziedzinowe/mf/2022/01/05/eD/DefinicjeTypy/";

/// Text of `KodFormularza`.
pub const FORM_CODE: &str = "FA";

/// `kodSystemowy` attribute of `KodFormularza`.
pub const FORM_SYSTEM_CODE: &str = "FA (3)";

/// `wersjaSchemy` attribute of `KodFormularza`.
pub const SCHEMA_VERSION: &str = "1-0E";

/// Text of `WariantFormularza`.
pub const FORM_VARIANT: &str = "3";
