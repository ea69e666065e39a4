//! ISO 4217 currency codes (`KodWaluty`).
//!
//! Covers the currencies the National Bank of Poland publishes exchange
//! rates for, which is the set relevant to domestic e-invoicing.

use super::codes::code_catalog;

code_catalog! {
    /// `TKodWaluty` — invoice currency.
    pub enum CurrencyCode ("CurrencyCode") {
        /// UAE Dirham
        Aed => "AED",
        /// Albanian Lek
        All => "ALL",
        /// Armenian Dram
        Amd => "AMD",
        /// Argentine Peso
        Ars => "ARS",
        /// Australian Dollar
        Aud => "AUD",
        /// Bosnia-Herzegovina Convertible Mark
        Bam => "BAM",
        /// Bangladeshi Taka
        Bdt => "BDT",
        /// Bulgarian Lev
        Bgn => "BGN",
        /// Brazilian Real
        Brl => "BRL",
        /// Belarusian Ruble
        Byn => "BYN",
        /// Canadian Dollar
        Cad => "CAD",
        /// Swiss Franc
        Chf => "CHF",
        /// Chilean Peso
        Clp => "CLP",
        /// Chinese Yuan
        Cny => "CNY",
        /// Colombian Peso
        Cop => "COP",
        /// Czech Koruna
        Czk => "CZK",
        /// Danish Krone
        Dkk => "DKK",
        /// Egyptian Pound
        Egp => "EGP",
        /// Euro
        Eur => "EUR",
        /// Pound Sterling
        Gbp => "GBP",
        /// Georgian Lari
        Gel => "GEL",
        /// Hong Kong Dollar
        Hkd => "HKD",
        /// Hungarian Forint
        Huf => "HUF",
        /// Indonesian Rupiah
        Idr => "IDR",
        /// Israeli Shekel
        Ils => "ILS",
        /// Indian Rupee
        Inr => "INR",
        /// Icelandic Krona
        Isk => "ISK",
        /// Japanese Yen
        Jpy => "JPY",
        /// Kenyan Shilling
        Kes => "KES",
        /// South Korean Won
        Krw => "KRW",
        /// Kuwaiti Dinar
        Kwd => "KWD",
        /// Kazakhstani Tenge
        Kzt => "KZT",
        /// Moldovan Leu
        Mdl => "MDL",
        /// Macedonian Denar
        Mkd => "MKD",
        /// Mexican Peso
        Mxn => "MXN",
        /// Malaysian Ringgit
        Myr => "MYR",
        /// Nigerian Naira
        Ngn => "NGN",
        /// Norwegian Krone
        Nok => "NOK",
        /// New Zealand Dollar
        Nzd => "NZD",
        /// Peruvian Sol
        Pen => "PEN",
        /// Philippine Peso
        Php => "PHP",
        /// Pakistani Rupee
        Pkr => "PKR",
        /// Polish Zloty
        Pln => "PLN",
        /// Qatari Riyal
        Qar => "QAR",
        /// Romanian Leu
        Ron => "RON",
        /// Serbian Dinar
        Rsd => "RSD",
        /// Russian Ruble
        Rub => "RUB",
        /// Saudi Riyal
        Sar => "SAR",
        /// Swedish Krona
        Sek => "SEK",
        /// Singapore Dollar
        Sgd => "SGD",
        /// Thai Baht
        Thb => "THB",
        /// Turkish Lira
        Try => "TRY",
        /// New Taiwan Dollar
        Twd => "TWD",
        /// Ukrainian Hryvnia
        Uah => "UAH",
        /// US Dollar
        Usd => "USD",
        /// Vietnamese Dong
        Vnd => "VND",
        /// Special Drawing Rights
        Xdr => "XDR",
        /// South African Rand
        Zar => "ZAR",
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::Pln
    }
}

impl CurrencyCode {
    pub fn is_domestic(&self) -> bool {
        *self == Self::Pln
    }
}
