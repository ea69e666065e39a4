//! # ksef-fa
//!
//! Structured VAT invoices for the Polish National e-Invoicing System
//! (KSeF), logical structure FA(3).
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Rounding of amounts is half away from zero to two decimal places.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ksef_fa::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = build_invoice()
//!     .number("FV/2024/06/001")
//!     .issue_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .with_seller(
//!         PartyBuilder::new("ACME Sp. z o.o.")
//!             .nip("5260250274")
//!             .address(AddressBuilder::new(CountryCode::Pl, "ul. Prosta 1, 00-001 Warszawa").build())
//!             .build(),
//!     )
//!     .with_buyer(PartyBuilder::new("Klient S.A.").nip("1234563218").build())
//!     .add_line_item(|l| {
//!         l.name("Konsultacje")
//!             .quantity(dec!(10))
//!             .unit_net_price(dec!(150))
//!             .net_amount(dec!(1500))
//!             .vat_amount(dec!(345))
//!             .vat_rate(VatRate::Rate23)
//!     })
//!     .build();
//!
//! assert!(validate(&invoice).is_valid());
//! assert_eq!(invoice.body.total_amount, dec!(1845.00));
//! # #[cfg(feature = "fa")]
//! # {
//! let xml = ksef_fa::fa::to_xml(&invoice).unwrap();
//! assert!(xml.contains("<P_15>1845.00</P_15>"));
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Document model, code lists, builder, VAT aggregation, validation |
//! | `fa` (default) | FA(3) XML serializer and parser |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "fa")]
pub mod fa;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

#[cfg(feature = "fa")]
pub use crate::fa::{from_bytes, from_xml, to_bytes, to_xml};
