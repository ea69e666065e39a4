//! Core invoice types, builder, VAT aggregation and validation.
//!
//! This module provides the FA document model with its closed code lists,
//! the fluent [`InvoiceBuilder`] that derives the VAT summary from line
//! items, and the canonical text formats used on the wire.

mod builder;
mod codes;
mod countries;
mod currencies;
mod error;
pub mod format;
mod totals;
mod types;
mod validation;

pub use builder::*;
pub use codes::{
    AuthorizedRole, CorrectionType, InvoiceType, PaymentMethod, TaxpayerStatus, ThirdPartyRole,
    VatRate,
};
pub use countries::CountryCode;
pub use currencies::CurrencyCode;
pub use error::*;
pub use format::is_valid_nip;
pub use totals::aggregate_vat;
pub use types::*;
pub use validation::validate;
