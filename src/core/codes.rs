//! Closed code lists of the FA schema.
//!
//! Every catalog is a plain enum plus an immutable `(variant, token)` table.
//! The token is what goes on the wire; the variant name never does.

use rust_decimal::Decimal;

/// Declare a closed code list with its wire tokens.
///
/// Generates the enum, an `ALL` table of `(variant, token)` pairs,
/// `token()`, `from_token()`, `Display` and `FromStr`.
macro_rules! code_catalog {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($catalog:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant paired with its wire token, in schema order.
            pub const ALL: &'static [($name, &'static str)] = &[ $( ($name::$variant, $token) ),+ ];

            /// Wire token of this code.
            pub fn token(&self) -> &'static str {
                match self {
                    $( Self::$variant => $token ),+
                }
            }

            /// Look up a code by its wire token.
            pub fn from_token(token: &str) -> Result<Self, $crate::core::InvoiceError> {
                Self::ALL
                    .iter()
                    .find(|(_, t)| *t == token)
                    .map(|(v, _)| *v)
                    .ok_or_else(|| $crate::core::InvoiceError::UnknownCode {
                        catalog: $catalog,
                        token: token.to_string(),
                    })
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.token())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::core::InvoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_token(s)
            }
        }
    };
}

pub(crate) use code_catalog;

code_catalog! {
    /// `P_12` — VAT rate of a line item.
    ///
    /// The 22%, 7% and 3% rates are legacy rates, kept for historical documents.
    pub enum VatRate ("VatRate") {
        /// 23%.
        Rate23 => "23",
        /// 22% (legacy, merged with 23%).
        Rate22 => "22",
        /// 8%.
        Rate8 => "8",
        /// 7% (legacy, merged with 8%).
        Rate7 => "7",
        /// 5%.
        Rate5 => "5",
        /// 4%.
        Rate4 => "4",
        /// 3% (legacy, merged with 4%).
        Rate3 => "3",
        /// 0% domestic supply.
        ZeroDomestic => "0 KR",
        /// 0% intra-community supply of goods (WDT).
        ZeroIntraCommunity => "0 WDT",
        /// 0% export of goods.
        ZeroExport => "0 EX",
        /// Exempt from tax.
        Exempt => "zw",
        /// Reverse charge, the buyer settles the tax.
        ReverseCharge => "oo",
        /// Not subject to tax in Poland, excluding art. 100 ust. 1 pkt 4.
        NotSubjectI => "np I",
        /// Not subject to tax in Poland, art. 100 ust. 1 pkt 4.
        NotSubjectII => "np II",
    }
}

impl Default for VatRate {
    fn default() -> Self {
        Self::Rate23
    }
}

impl VatRate {
    /// Nominal percentage, for display only. `None` for non-numeric rates.
    pub fn percent(&self) -> Option<Decimal> {
        match self {
            Self::Rate23 => Some(Decimal::from(23)),
            Self::Rate22 => Some(Decimal::from(22)),
            Self::Rate8 => Some(Decimal::from(8)),
            Self::Rate7 => Some(Decimal::from(7)),
            Self::Rate5 => Some(Decimal::from(5)),
            Self::Rate4 => Some(Decimal::from(4)),
            Self::Rate3 => Some(Decimal::from(3)),
            Self::ZeroDomestic | Self::ZeroIntraCommunity | Self::ZeroExport => {
                Some(Decimal::ZERO)
            }
            Self::Exempt | Self::ReverseCharge | Self::NotSubjectI | Self::NotSubjectII => None,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Rate22 | Self::Rate7 | Self::Rate3)
    }

    /// The current rate a legacy rate is economically equivalent to.
    pub fn modern_equivalent(&self) -> Self {
        match self {
            Self::Rate22 => Self::Rate23,
            Self::Rate7 => Self::Rate8,
            Self::Rate3 => Self::Rate4,
            other => *other,
        }
    }

    /// True when the rate produces a VAT amount (summary bucket has a `P_14_x` pair).
    pub fn is_taxed(&self) -> bool {
        matches!(
            self,
            Self::Rate23
                | Self::Rate22
                | Self::Rate8
                | Self::Rate7
                | Self::Rate5
                | Self::Rate4
                | Self::Rate3
        )
    }
}

code_catalog! {
    /// `RodzajFaktury` — invoice type.
    pub enum InvoiceType ("InvoiceType") {
        /// Basic VAT invoice.
        Vat => "VAT",
        /// Correction invoice.
        Kor => "KOR",
        /// Advance payment invoice.
        Zal => "ZAL",
        /// Settlement invoice closing advance payments.
        Roz => "ROZ",
        /// Simplified invoice.
        Upr => "UPR",
        /// Correction of an advance payment invoice.
        KorZal => "KOR_ZAL",
        /// Correction of a settlement invoice.
        KorRoz => "KOR_ROZ",
    }
}

impl Default for InvoiceType {
    fn default() -> Self {
        Self::Vat
    }
}

impl InvoiceType {
    pub fn is_correction(&self) -> bool {
        matches!(self, Self::Kor | Self::KorZal | Self::KorRoz)
    }
}

code_catalog! {
    /// `FormaPlatnosci` — payment method.
    pub enum PaymentMethod ("PaymentMethod") {
        Cash => "1",
        Card => "2",
        Voucher => "3",
        Cheque => "4",
        Credit => "5",
        Transfer => "6",
        Mobile => "7",
    }
}

code_catalog! {
    /// `Rola` — role of a third party (`Podmiot3`).
    pub enum ThirdPartyRole ("ThirdPartyRole") {
        Factor => "1",
        Recipient => "2",
        OriginalEntity => "3",
        AdditionalBuyer => "4",
        Issuer => "5",
        Payer => "6",
        LocalGovernmentIssuer => "7",
        LocalGovernmentRecipient => "8",
        VatGroupMemberIssuer => "9",
        VatGroupMemberRecipient => "10",
    }
}

code_catalog! {
    /// `RolaPU` — role of the authorized entity.
    pub enum AuthorizedRole ("AuthorizedRole") {
        EnforcementAuthority => "1",
        Bailiff => "2",
        TaxRepresentative => "3",
    }
}

impl Default for AuthorizedRole {
    fn default() -> Self {
        Self::EnforcementAuthority
    }
}

code_catalog! {
    /// `TypKorekty` — when the correction takes effect.
    pub enum CorrectionType ("CorrectionType") {
        /// In the period of the original invoice.
        OriginalPeriod => "1",
        /// In the period the correction is issued.
        CorrectionPeriod => "2",
        /// In another period.
        OtherPeriod => "3",
    }
}

code_catalog! {
    /// `StatusInfoPodatnika` — seller status.
    pub enum TaxpayerStatus ("TaxpayerStatus") {
        Liquidation => "1",
        Restructuring => "2",
        Bankruptcy => "3",
        Inheritance => "4",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InvoiceError;

    #[test]
    fn vat_rate_tokens() {
        assert_eq!(VatRate::Rate23.token(), "23");
        assert_eq!(VatRate::ZeroIntraCommunity.token(), "0 WDT");
        assert_eq!(VatRate::NotSubjectI.token(), "np I");
        assert_eq!(VatRate::from_token("zw").unwrap(), VatRate::Exempt);
        assert_eq!("oo".parse::<VatRate>().unwrap(), VatRate::ReverseCharge);
    }

    #[test]
    fn unknown_token_is_an_error() {
        let err = VatRate::from_token("19").unwrap_err();
        match err {
            InvoiceError::UnknownCode { catalog, token } => {
                assert_eq!(catalog, "VatRate");
                assert_eq!(token, "19");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(InvoiceType::from_token("vat").is_err());
    }

    #[test]
    fn tokens_are_unique_per_catalog() {
        for (i, (_, a)) in VatRate::ALL.iter().enumerate() {
            for (_, b) in &VatRate::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn every_variant_round_trips_through_its_token() {
        for (variant, token) in InvoiceType::ALL {
            assert_eq!(variant.token(), *token);
            assert_eq!(InvoiceType::from_token(token).unwrap(), *variant);
        }
        for (variant, token) in ThirdPartyRole::ALL {
            assert_eq!(ThirdPartyRole::from_token(token).unwrap(), *variant);
        }
    }

    #[test]
    fn legacy_rates_map_to_modern() {
        assert!(VatRate::Rate22.is_legacy());
        assert_eq!(VatRate::Rate22.modern_equivalent(), VatRate::Rate23);
        assert_eq!(VatRate::Rate7.modern_equivalent(), VatRate::Rate8);
        assert_eq!(VatRate::Rate3.modern_equivalent(), VatRate::Rate4);
        assert_eq!(VatRate::Rate5.modern_equivalent(), VatRate::Rate5);
        assert!(!VatRate::Exempt.is_taxed());
    }

    #[test]
    fn correction_types() {
        assert!(InvoiceType::Kor.is_correction());
        assert!(InvoiceType::KorZal.is_correction());
        assert!(InvoiceType::KorRoz.is_correction());
        assert!(!InvoiceType::Zal.is_correction());
        assert_eq!(InvoiceType::KorZal.to_string(), "KOR_ZAL");
    }
}
