use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::codes::*;
use super::countries::CountryCode;
use super::currencies::CurrencyCode;

/// `Faktura` — the top-level document.
///
/// `Invoice::default()` is structurally empty but never missing a required
/// section: header, seller, buyer and body are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// `Naglowek`: creation timestamp and producing system.
    pub header: Header,
    /// `Podmiot1`: the seller.
    pub seller: Party,
    /// `Podmiot2`: the buyer.
    pub buyer: Party,
    /// `Podmiot3`: other parties, each with a role.
    pub third_parties: Vec<ThirdParty>,
    /// `PodmiotUpowazniony`.
    pub authorized_entity: Option<AuthorizedEntity>,
    /// `Fa`: invoice body.
    pub body: InvoiceBody,
    /// `Stopka`.
    pub footer: Option<Footer>,
    /// `Zalacznik`.
    pub attachment: Option<Attachment>,
}

impl Invoice {
    /// True for `KOR`, `KOR_ZAL` and `KOR_ROZ` invoices.
    pub fn is_correction(&self) -> bool {
        self.body.invoice_type.is_correction()
    }
}

/// `Naglowek`. The form code and variant are fixed by the codec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// `DataWytworzeniaFa`: when the document was produced (UTC).
    pub created_at: Option<DateTime<Utc>>,
    /// `SystemInfo`: name of the producing system.
    pub system_info: Option<String>,
}

/// Seller, buyer, third party or authorized entity.
///
/// Not every element is allowed in every role; the codec writes the ones
/// the role's schema section defines and ignores the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// `PrefiksPodatnika`: VAT prefix (seller only).
    pub taxpayer_prefix: Option<String>,
    /// `NrEORI`.
    pub eori: Option<String>,
    /// `DaneIdentyfikacyjne`.
    pub identification: PartyIdentification,
    /// `Adres`.
    pub address: Option<Address>,
    /// `AdresKoresp`.
    pub correspondence_address: Option<Address>,
    /// `DaneKontaktowe` (up to three).
    pub contacts: Vec<Contact>,
    /// `StatusInfoPodatnika` (seller only).
    pub taxpayer_status: Option<TaxpayerStatus>,
    /// `NrKlienta` (buyer and third parties).
    pub customer_number: Option<String>,
    /// `IDNabywcy` (buyer and third parties).
    pub buyer_id: Option<String>,
}

/// `DaneIdentyfikacyjne`.
///
/// Exactly one way of identifying the party is expected: a Polish NIP,
/// an EU VAT number, another tax identifier, or the `BrakID` marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyIdentification {
    /// `NIP`: Polish tax identifier (10 digits).
    pub nip: Option<String>,
    /// `KodUE`: EU member state prefix (e.g. "DE", "EL").
    pub eu_code: Option<String>,
    /// `NrVatUE`: VAT number without the prefix.
    pub eu_vat_number: Option<String>,
    /// `KodKraju` of a non-EU identifier.
    pub country_code: Option<CountryCode>,
    /// `NrID`: any other tax identifier.
    pub other_id: Option<String>,
    /// `BrakID`: the party has no identifier.
    pub no_id: bool,
    /// `Nazwa`.
    pub name: Option<String>,
}

/// `Adres` / `AdresKoresp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// `KodKraju`.
    pub country_code: CountryCode,
    /// `AdresL1`: street, number, postal code and city.
    pub line1: String,
    /// `AdresL2`.
    pub line2: Option<String>,
    /// `GLN`.
    pub gln: Option<String>,
}

/// `DaneKontaktowe`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// `Podmiot3`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThirdParty {
    pub party: Party,
    /// `Rola`.
    pub role: Option<ThirdPartyRole>,
    /// `RolaInna` + `OpisRoli`: a role outside the code list.
    pub other_role: Option<String>,
    /// `Udzial`: percentage share (additional buyers).
    pub share: Option<Decimal>,
}

/// `PodmiotUpowazniony`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizedEntity {
    pub party: Party,
    /// `RolaPU`.
    pub role: AuthorizedRole,
}

/// `Fa` — invoice body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceBody {
    /// `KodWaluty`.
    pub currency: CurrencyCode,
    /// `P_1`: issue date.
    pub issue_date: Option<NaiveDate>,
    /// `P_1M`: place of issue.
    pub issue_place: Option<String>,
    /// `P_2`: invoice number, unique per issuer.
    pub number: String,
    /// `WZ`: warehouse dispatch documents.
    pub warehouse_documents: Vec<String>,
    /// `P_6`: date of sale, when common to all lines.
    pub sale_date: Option<NaiveDate>,
    /// `OkresFa`: sale period, alternative to `sale_date`.
    pub sale_period: Option<SalePeriod>,
    /// `P_13_x` / `P_14_x` summary buckets.
    pub summary: VatSummary,
    /// `P_15`: total amount due (gross).
    pub total_amount: Decimal,
    /// `Adnotacje`.
    pub annotations: Annotations,
    /// `RodzajFaktury`.
    pub invoice_type: InvoiceType,
    /// `PrzyczynaKorekty`.
    pub correction_reason: Option<String>,
    /// `TypKorekty`.
    pub correction_type: Option<CorrectionType>,
    /// `DaneFaKorygowanej`.
    pub corrected_invoices: Vec<CorrectedInvoice>,
    /// `NrFaKorygowany`: correct number when the correction fixes the number itself.
    pub previous_correction_number: Option<String>,
    /// `OkresFaKorygowanej`.
    pub corrected_invoice_period: Option<String>,
    /// `ZaliczkaCzesciowa`.
    pub advance_payments: Vec<AdvancePayment>,
    /// `FaWiersz`.
    pub lines: Vec<LineItem>,
    /// `Platnosc`.
    pub payment: Option<Payment>,
    /// `WarunkiTransakcji`.
    pub transaction_terms: Option<TransactionTerms>,
    /// `DodatkowyOpis`.
    pub additional_descriptions: Vec<AdditionalDescription>,
    /// `FakturaZaliczkowa`.
    pub advance_invoices: Vec<AdvanceInvoiceRef>,
}

impl InvoiceBody {
    /// Sum of every net bucket. Recomputed on each call.
    pub fn total_net(&self) -> Decimal {
        self.summary.total_net()
    }

    /// Sum of every VAT bucket. Recomputed on each call.
    pub fn total_vat(&self) -> Decimal {
        self.summary.total_vat()
    }

    /// Net plus VAT over all buckets, unrounded.
    pub fn total_gross(&self) -> Decimal {
        self.total_net().saturating_add(self.total_vat())
    }
}

/// `OkresFa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalePeriod {
    /// `P_6_Od`.
    pub from: NaiveDate,
    /// `P_6_Do`.
    pub to: NaiveDate,
}

/// Invoice-level VAT summary buckets.
///
/// The `_pln` fields (`P_14_xW`) carry the VAT converted to PLN on foreign
/// currency invoices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VatSummary {
    /// `P_13_1`: net at 23% (and legacy 22%).
    pub net_23: Option<Decimal>,
    /// `P_14_1`.
    pub vat_23: Option<Decimal>,
    /// `P_14_1W`.
    pub vat_23_pln: Option<Decimal>,
    /// `P_13_2`: net at 8% (and legacy 7%).
    pub net_8: Option<Decimal>,
    /// `P_14_2`.
    pub vat_8: Option<Decimal>,
    /// `P_14_2W`.
    pub vat_8_pln: Option<Decimal>,
    /// `P_13_3`: net at 5%.
    pub net_5: Option<Decimal>,
    /// `P_14_3`.
    pub vat_5: Option<Decimal>,
    /// `P_14_3W`.
    pub vat_5_pln: Option<Decimal>,
    /// `P_13_4`: net at 4% (and legacy 3%).
    pub net_4: Option<Decimal>,
    /// `P_14_4`.
    pub vat_4: Option<Decimal>,
    /// `P_14_4W`.
    pub vat_4_pln: Option<Decimal>,
    /// `P_13_5`: net under the OSS special procedure.
    pub net_oss: Option<Decimal>,
    /// `P_14_5`.
    pub vat_oss: Option<Decimal>,
    /// `P_13_6_1`: 0% domestic.
    pub net_zero_domestic: Option<Decimal>,
    /// `P_13_6_2`: 0% intra-community supply.
    pub net_zero_intra_community: Option<Decimal>,
    /// `P_13_6_3`: 0% export.
    pub net_zero_export: Option<Decimal>,
    /// `P_13_7`: exempt.
    pub net_exempt: Option<Decimal>,
    /// `P_13_8`: not subject to tax in Poland.
    pub net_not_taxable: Option<Decimal>,
    /// `P_13_9`: services under art. 100 ust. 1 pkt 4.
    pub net_not_taxable_art100: Option<Decimal>,
    /// `P_13_10`: reverse charge.
    pub net_reverse_charge: Option<Decimal>,
    /// `P_13_11`: margin procedure.
    pub net_margin: Option<Decimal>,
}

impl VatSummary {
    pub fn total_net(&self) -> Decimal {
        [
            self.net_23,
            self.net_8,
            self.net_5,
            self.net_4,
            self.net_oss,
            self.net_zero_domestic,
            self.net_zero_intra_community,
            self.net_zero_export,
            self.net_exempt,
            self.net_not_taxable,
            self.net_not_taxable_art100,
            self.net_reverse_charge,
            self.net_margin,
        ]
        .into_iter()
        .flatten()
        .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn total_vat(&self) -> Decimal {
        [self.vat_23, self.vat_8, self.vat_5, self.vat_4, self.vat_oss]
            .into_iter()
            .flatten()
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

/// `Adnotacje`. The four flags are mandatory on the wire (`1` = yes, `2` = no).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    /// `P_16`: cash accounting method.
    pub cash_method: bool,
    /// `P_17`: self-billing.
    pub self_billing: bool,
    /// `P_18`: reverse charge.
    pub reverse_charge: bool,
    /// `P_18A`: split payment mechanism.
    pub split_payment: bool,
    /// `Zwolnienie`.
    pub exemption: Option<Exemption>,
    /// `NoweSrodkiTransportu`.
    pub new_transport_means: Option<NewTransportMeans>,
    /// `P_23`: simplified triangular procedure.
    pub simplified_procedure: Option<bool>,
    /// `PMarzy`.
    pub margin_procedure: Option<MarginProcedure>,
}

/// `Zwolnienie`: either the legal basis of an exemption or `P_19N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exemption {
    /// `P_19` with its basis.
    Applies(ExemptionBasis),
    /// `P_19N`.
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExemptionBasis {
    /// `P_19A`: provision of the national VAT act.
    NationalLaw(String),
    /// `P_19B`: provision of directive 2006/112/EC.
    Directive(String),
    /// `P_19C`: any other legal basis.
    Other(String),
}

/// `NoweSrodkiTransportu`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewTransportMeans {
    /// `P_22`, with `P_42_5` telling whether art. 42 ust. 5 applies.
    Supplied { art_42_5: bool },
    /// `P_22N`.
    NotApplicable,
}

/// `PMarzy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginProcedure {
    /// `P_PMarzy_2`.
    TravelAgency,
    /// `P_PMarzy_3_1`.
    UsedGoods,
    /// `P_PMarzy_3_2`.
    WorksOfArt,
    /// `P_PMarzy_3_3`.
    Antiques,
    /// `P_PMarzyN`.
    NotApplicable,
}

/// `DaneFaKorygowanej`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectedInvoice {
    /// `DataWystFaKorygowanej`.
    pub issue_date: Option<NaiveDate>,
    /// `NrFaKorygowanej`.
    pub number: String,
    /// `NrKSeFFaKorygowanej`; `None` writes the `NrKSeFN` marker.
    pub ksef_number: Option<String>,
}

/// `ZaliczkaCzesciowa`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancePayment {
    /// `P_6Z`.
    pub date: Option<NaiveDate>,
    /// `P_15Z`.
    pub amount: Decimal,
    /// `KursWalutyZW`.
    pub exchange_rate: Option<Decimal>,
}

/// `FakturaZaliczkowa`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceInvoiceRef {
    /// `NrKSeFFaZaliczkowej`.
    Ksef(String),
    /// `NrKSeFZN` + `NrFaZaliczkowej`: issued outside KSeF.
    OutsideKsef(String),
}

/// `FaWiersz`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// `NrWierszaFa`: 1-based, assigned by the builder.
    pub number: u32,
    /// `P_7`.
    pub name: String,
    /// `P_8A`.
    pub unit: Option<String>,
    /// `P_8B`.
    pub quantity: Option<Decimal>,
    /// `P_9A`: unit net price.
    pub unit_net_price: Option<Decimal>,
    /// `P_9B`: unit gross price (tax-inclusive mode).
    pub unit_gross_price: Option<Decimal>,
    /// `P_10`.
    pub discount: Option<Decimal>,
    /// `P_11`: net amount.
    pub net_amount: Option<Decimal>,
    /// `P_11Vat`.
    pub vat_amount: Option<Decimal>,
    /// `P_11A`: gross amount (tax-inclusive mode).
    pub gross_amount: Option<Decimal>,
    /// `P_12`.
    pub vat_rate: VatRate,
    /// `P_6A`: sale date of this line, when it differs per line.
    pub sale_date: Option<NaiveDate>,
    /// `GTIN`.
    pub gtin: Option<String>,
    /// `PKWiU`.
    pub pkwiu: Option<String>,
    /// `CN`.
    pub cn: Option<String>,
}

impl LineItem {
    /// True when the line is priced tax-inclusive.
    pub fn is_gross_mode(&self) -> bool {
        self.unit_gross_price.is_some() || (self.gross_amount.is_some() && self.net_amount.is_none())
    }
}

/// `Platnosc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// `Zaplacono`.
    pub paid: bool,
    /// `DataZaplaty`.
    pub payment_date: Option<NaiveDate>,
    /// `ZaplataCzesciowa`; non-empty writes `ZnacznikZaplatyCzesciowej`.
    pub partial_payments: Vec<PartialPayment>,
    /// `TerminPlatnosci`.
    pub terms: Vec<PaymentTerm>,
    /// `FormaPlatnosci`.
    pub method: Option<PaymentMethod>,
    /// `PlatnoscInna` + `OpisPlatnosci`.
    pub other_method: Option<String>,
    /// `RachunekBankowy`.
    pub bank_accounts: Vec<BankAccount>,
    /// `RachunekBankowyFaktora`.
    pub factor_bank_accounts: Vec<BankAccount>,
    /// `Skonto`.
    pub discount: Option<CashDiscount>,
}

/// `ZaplataCzesciowa`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialPayment {
    /// `KwotaZaplatyCzesciowej`.
    pub amount: Decimal,
    /// `DataZaplatyCzesciowej`.
    pub date: Option<NaiveDate>,
}

/// `TerminPlatnosci`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerm {
    /// `Termin`.
    pub due_date: Option<NaiveDate>,
    /// `TerminOpis`.
    pub description: Option<String>,
}

/// `RachunekBankowy`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    /// `NrRB`.
    pub number: String,
    /// `SWIFT`.
    pub swift: Option<String>,
    /// `NazwaBanku`.
    pub bank_name: Option<String>,
    /// `OpisRachunku`.
    pub description: Option<String>,
}

/// `Skonto`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashDiscount {
    /// `WarunkiSkonta`.
    pub conditions: String,
    /// `WysokoscSkonta`.
    pub amount: String,
}

/// `WarunkiTransakcji`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTerms {
    /// `Umowy`.
    pub contracts: Vec<DocumentReference>,
    /// `Zamowienia`.
    pub orders: Vec<DocumentReference>,
    /// `NrPartiiTowaru`.
    pub batch_numbers: Vec<String>,
    /// `WarunkiDostawy` (e.g. Incoterms).
    pub delivery_terms: Option<String>,
}

/// Date and number of a contract or order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentReference {
    pub date: Option<NaiveDate>,
    pub number: Option<String>,
}

/// `DodatkowyOpis`: free-form key/value pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalDescription {
    /// `NrWiersza`: line the description refers to, if any.
    pub line_number: Option<u32>,
    /// `Klucz`.
    pub key: String,
    /// `Wartosc`.
    pub value: String,
}

/// `Stopka`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    /// `Informacje/StopkaFaktury`.
    pub info: Vec<String>,
    /// `Rejestry`.
    pub registers: Vec<Register>,
}

/// `Rejestry`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Register {
    /// `PelnaNazwa`.
    pub full_name: Option<String>,
    /// `KRS`.
    pub krs: Option<String>,
    /// `REGON`.
    pub regon: Option<String>,
    /// `BDO`.
    pub bdo: Option<String>,
}

/// `Zalacznik`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// `BlokDanych`.
    pub blocks: Vec<DataBlock>,
}

/// `BlokDanych`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataBlock {
    /// `ZNaglowek`.
    pub header: Option<String>,
    /// `MetaDane`.
    pub metadata: Vec<MetadataEntry>,
    /// `Tekst/Akapit`.
    pub paragraphs: Vec<String>,
}

/// `MetaDane`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// `ZKlucz`.
    pub key: String,
    /// `ZWartosc`.
    pub value: String,
}
