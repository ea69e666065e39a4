use chrono::{NaiveDate, SubsecRound, Utc};
use rust_decimal::Decimal;

use super::codes::*;
use super::countries::CountryCode;
use super::currencies::CurrencyCode;
use super::totals;
use super::types::*;

/// Start assembling an invoice.
pub fn build_invoice() -> InvoiceBuilder {
    InvoiceBuilder::new()
}

/// Builder for constructing invoices.
///
/// Line items are numbered in the order `add_line_item` is called. Unless
/// disabled with [`auto_aggregate`](Self::auto_aggregate), `build()` derives
/// the VAT summary and `P_15` from the lines.
///
/// ```
/// use chrono::NaiveDate;
/// use ksef_fa::core::*;
/// use rust_decimal_macros::dec;
///
/// let invoice = build_invoice()
///     .number("FV/2024/001")
///     .issue_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .with_seller(PartyBuilder::new("ACME Sp. z o.o.").nip("5260250274").build())
///     .with_buyer(PartyBuilder::new("Klient S.A.").nip("1234563218").build())
///     .add_line_item(|l| l.name("Konsultacje").net_amount(dec!(100)).vat_amount(dec!(23)))
///     .build();
///
/// assert_eq!(invoice.body.lines[0].number, 1);
/// assert_eq!(invoice.body.total_amount, dec!(123.00));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvoiceBuilder {
    invoice: Invoice,
    lines: Vec<LineItem>,
    next_line_number: u32,
    skip_aggregation: bool,
}

impl InvoiceBuilder {
    pub fn new() -> Self {
        Self {
            next_line_number: 1,
            ..Default::default()
        }
    }

    /// Run `configure` against a fresh line and append it with the next number.
    pub fn add_line_item<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(LineItemBuilder) -> LineItemBuilder,
    {
        let number = self.next_line_number.max(1);
        self.next_line_number = number + 1;
        let mut line = configure(LineItemBuilder::new()).build();
        line.number = number;
        self.lines.push(line);
        self
    }

    /// Enable or disable VAT summary derivation in `build()` (default: on).
    pub fn auto_aggregate(mut self, enabled: bool) -> Self {
        self.skip_aggregation = !enabled;
        self
    }

    pub fn with_seller(mut self, seller: Party) -> Self {
        self.invoice.seller = seller;
        self
    }

    pub fn with_buyer(mut self, buyer: Party) -> Self {
        self.invoice.buyer = buyer;
        self
    }

    pub fn add_third_party(mut self, third_party: ThirdParty) -> Self {
        self.invoice.third_parties.push(third_party);
        self
    }

    pub fn with_authorized_entity(mut self, entity: AuthorizedEntity) -> Self {
        self.invoice.authorized_entity = Some(entity);
        self
    }

    /// Replace the whole body. Lines added through `add_line_item` still win.
    pub fn with_body(mut self, body: InvoiceBody) -> Self {
        self.invoice.body = body;
        self
    }

    pub fn with_payment(mut self, payment: Payment) -> Self {
        self.invoice.body.payment = Some(payment);
        self
    }

    pub fn with_transaction_terms(mut self, terms: TransactionTerms) -> Self {
        self.invoice.body.transaction_terms = Some(terms);
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.invoice.body.annotations = annotations;
        self
    }

    pub fn with_footer(mut self, footer: Footer) -> Self {
        self.invoice.footer = Some(footer);
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.invoice.attachment = Some(attachment);
        self
    }

    pub fn system_info(mut self, info: impl Into<String>) -> Self {
        self.invoice.header.system_info = Some(info.into());
        self
    }

    pub fn created_at(mut self, at: chrono::DateTime<Utc>) -> Self {
        self.invoice.header.created_at = Some(at);
        self
    }

    pub fn currency(mut self, currency: CurrencyCode) -> Self {
        self.invoice.body.currency = currency;
        self
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.invoice.body.number = number.into();
        self
    }

    pub fn issue_date(mut self, date: NaiveDate) -> Self {
        self.invoice.body.issue_date = Some(date);
        self
    }

    pub fn issue_place(mut self, place: impl Into<String>) -> Self {
        self.invoice.body.issue_place = Some(place.into());
        self
    }

    pub fn add_warehouse_document(mut self, document: impl Into<String>) -> Self {
        self.invoice.body.warehouse_documents.push(document.into());
        self
    }

    /// Common sale date. Clears any sale period.
    pub fn sale_date(mut self, date: NaiveDate) -> Self {
        self.invoice.body.sale_date = Some(date);
        self.invoice.body.sale_period = None;
        self
    }

    /// Sale period. Clears any common sale date.
    pub fn sale_period(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.invoice.body.sale_period = Some(SalePeriod { from, to });
        self.invoice.body.sale_date = None;
        self
    }

    pub fn invoice_type(mut self, invoice_type: InvoiceType) -> Self {
        self.invoice.body.invoice_type = invoice_type;
        self
    }

    /// Mark the invoice as a correction of `corrected`.
    ///
    /// Switches a non-correction type to its correction variant
    /// (`ZAL` → `KOR_ZAL`, `ROZ` → `KOR_ROZ`, anything else → `KOR`).
    pub fn correction(
        mut self,
        reason: impl Into<String>,
        correction_type: CorrectionType,
        corrected: CorrectedInvoice,
    ) -> Self {
        let body = &mut self.invoice.body;
        body.invoice_type = match body.invoice_type {
            t if t.is_correction() => t,
            InvoiceType::Zal => InvoiceType::KorZal,
            InvoiceType::Roz => InvoiceType::KorRoz,
            _ => InvoiceType::Kor,
        };
        body.correction_reason = Some(reason.into());
        body.correction_type = Some(correction_type);
        body.corrected_invoices.push(corrected);
        self
    }

    pub fn corrected_invoice_period(mut self, period: impl Into<String>) -> Self {
        self.invoice.body.corrected_invoice_period = Some(period.into());
        self
    }

    pub fn previous_correction_number(mut self, number: impl Into<String>) -> Self {
        self.invoice.body.previous_correction_number = Some(number.into());
        self
    }

    pub fn add_advance_payment(mut self, payment: AdvancePayment) -> Self {
        self.invoice.body.advance_payments.push(payment);
        self
    }

    pub fn add_advance_invoice(mut self, reference: AdvanceInvoiceRef) -> Self {
        self.invoice.body.advance_invoices.push(reference);
        self
    }

    pub fn add_additional_description(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.invoice
            .body
            .additional_descriptions
            .push(AdditionalDescription {
                line_number: None,
                key: key.into(),
                value: value.into(),
            });
        self
    }

    /// Set `P_15` by hand. Overwritten by aggregation unless it is disabled.
    pub fn total_amount(mut self, amount: Decimal) -> Self {
        self.invoice.body.total_amount = amount;
        self
    }

    /// Assemble the invoice.
    ///
    /// Attaches added lines, derives the VAT summary (unless disabled and
    /// only when there is at least one line), and stamps the creation time
    /// with the current second if it was never set.
    pub fn build(self) -> Invoice {
        let mut invoice = self.invoice;
        if !self.lines.is_empty() {
            invoice.body.lines = self.lines;
        }
        if !self.skip_aggregation && !invoice.body.lines.is_empty() {
            totals::aggregate_vat(&mut invoice.body);
        }
        if invoice.header.created_at.is_none() {
            invoice.header.created_at = Some(Utc::now().trunc_subsecs(0));
        }
        invoice
    }
}

/// Builder for a single line item. The line number is not settable; the
/// invoice builder assigns it.
#[derive(Debug, Clone, Default)]
pub struct LineItemBuilder {
    line: LineItem,
}

impl LineItemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.line.name = name.into();
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.line.unit = Some(unit.into());
        self
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.line.quantity = Some(quantity);
        self
    }

    /// Net unit price. Clears a gross unit price.
    pub fn unit_net_price(mut self, price: Decimal) -> Self {
        self.line.unit_net_price = Some(price);
        self.line.unit_gross_price = None;
        self
    }

    /// Gross (tax-inclusive) unit price. Clears a net unit price.
    pub fn unit_gross_price(mut self, price: Decimal) -> Self {
        self.line.unit_gross_price = Some(price);
        self.line.unit_net_price = None;
        self
    }

    pub fn discount(mut self, discount: Decimal) -> Self {
        self.line.discount = Some(discount);
        self
    }

    /// Net amount. Clears a gross amount.
    pub fn net_amount(mut self, amount: Decimal) -> Self {
        self.line.net_amount = Some(amount);
        self.line.gross_amount = None;
        self
    }

    /// Gross amount. Clears a net amount.
    pub fn gross_amount(mut self, amount: Decimal) -> Self {
        self.line.gross_amount = Some(amount);
        self.line.net_amount = None;
        self
    }

    pub fn vat_amount(mut self, amount: Decimal) -> Self {
        self.line.vat_amount = Some(amount);
        self
    }

    pub fn vat_rate(mut self, rate: VatRate) -> Self {
        self.line.vat_rate = rate;
        self
    }

    pub fn sale_date(mut self, date: NaiveDate) -> Self {
        self.line.sale_date = Some(date);
        self
    }

    pub fn gtin(mut self, gtin: impl Into<String>) -> Self {
        self.line.gtin = Some(gtin.into());
        self
    }

    pub fn pkwiu(mut self, pkwiu: impl Into<String>) -> Self {
        self.line.pkwiu = Some(pkwiu.into());
        self
    }

    pub fn cn(mut self, cn: impl Into<String>) -> Self {
        self.line.cn = Some(cn.into());
        self
    }

    pub fn build(self) -> LineItem {
        self.line
    }
}

/// Builder for a party (seller, buyer, third party or authorized entity).
#[derive(Debug, Clone, Default)]
pub struct PartyBuilder {
    party: Party,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let mut party = Party::default();
        party.identification.name = Some(name.into());
        Self { party }
    }

    pub fn nip(mut self, nip: impl Into<String>) -> Self {
        self.party.identification.nip = Some(nip.into());
        self
    }

    /// EU VAT number, e.g. `eu_vat("DE", "123456789")`.
    pub fn eu_vat(mut self, code: impl Into<String>, number: impl Into<String>) -> Self {
        self.party.identification.eu_code = Some(code.into());
        self.party.identification.eu_vat_number = Some(number.into());
        self
    }

    /// Non-EU tax identifier.
    pub fn foreign_id(mut self, country: Option<CountryCode>, id: impl Into<String>) -> Self {
        self.party.identification.country_code = country;
        self.party.identification.other_id = Some(id.into());
        self
    }

    /// The party has no tax identifier (`BrakID`).
    pub fn no_id(mut self) -> Self {
        self.party.identification.no_id = true;
        self
    }

    pub fn taxpayer_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.party.taxpayer_prefix = Some(prefix.into());
        self
    }

    pub fn eori(mut self, eori: impl Into<String>) -> Self {
        self.party.eori = Some(eori.into());
        self
    }

    pub fn address(mut self, address: Address) -> Self {
        self.party.address = Some(address);
        self
    }

    pub fn correspondence_address(mut self, address: Address) -> Self {
        self.party.correspondence_address = Some(address);
        self
    }

    pub fn contact(mut self, email: Option<String>, phone: Option<String>) -> Self {
        self.party.contacts.push(Contact { email, phone });
        self
    }

    pub fn taxpayer_status(mut self, status: TaxpayerStatus) -> Self {
        self.party.taxpayer_status = Some(status);
        self
    }

    pub fn customer_number(mut self, number: impl Into<String>) -> Self {
        self.party.customer_number = Some(number.into());
        self
    }

    pub fn buyer_id(mut self, id: impl Into<String>) -> Self {
        self.party.buyer_id = Some(id.into());
        self
    }

    pub fn build(self) -> Party {
        self.party
    }

    /// Finish as a `Podmiot3` with the given role.
    pub fn build_third_party(self, role: ThirdPartyRole) -> ThirdParty {
        ThirdParty {
            party: self.party,
            role: Some(role),
            other_role: None,
            share: None,
        }
    }

    /// Finish as a `PodmiotUpowazniony`.
    pub fn build_authorized(self, role: AuthorizedRole) -> AuthorizedEntity {
        AuthorizedEntity {
            party: self.party,
            role,
        }
    }
}

/// Builder for Address.
#[derive(Debug, Clone)]
pub struct AddressBuilder {
    address: Address,
}

impl AddressBuilder {
    pub fn new(country_code: CountryCode, line1: impl Into<String>) -> Self {
        Self {
            address: Address {
                country_code,
                line1: line1.into(),
                line2: None,
                gln: None,
            },
        }
    }

    pub fn line2(mut self, line2: impl Into<String>) -> Self {
        self.address.line2 = Some(line2.into());
        self
    }

    pub fn gln(mut self, gln: impl Into<String>) -> Self {
        self.address.gln = Some(gln.into());
        self
    }

    pub fn build(self) -> Address {
        self.address
    }
}

/// Builder for the `Platnosc` section.
#[derive(Debug, Clone, Default)]
pub struct PaymentBuilder {
    payment: Payment,
}

impl PaymentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark as paid on `date`.
    pub fn paid(mut self, date: NaiveDate) -> Self {
        self.payment.paid = true;
        self.payment.payment_date = Some(date);
        self
    }

    pub fn add_partial_payment(mut self, amount: Decimal, date: NaiveDate) -> Self {
        self.payment.partial_payments.push(PartialPayment {
            amount,
            date: Some(date),
        });
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.payment.terms.push(PaymentTerm {
            due_date: Some(date),
            description: None,
        });
        self
    }

    pub fn add_term(mut self, term: PaymentTerm) -> Self {
        self.payment.terms.push(term);
        self
    }

    /// Coded payment method. Clears a free-text method.
    pub fn method(mut self, method: PaymentMethod) -> Self {
        self.payment.method = Some(method);
        self.payment.other_method = None;
        self
    }

    /// Free-text payment method (`PlatnoscInna`). Clears a coded method.
    pub fn other_method(mut self, description: impl Into<String>) -> Self {
        self.payment.other_method = Some(description.into());
        self.payment.method = None;
        self
    }

    pub fn bank_account(mut self, number: impl Into<String>) -> Self {
        self.payment.bank_accounts.push(BankAccount {
            number: number.into(),
            ..Default::default()
        });
        self
    }

    pub fn add_bank_account(mut self, account: BankAccount) -> Self {
        self.payment.bank_accounts.push(account);
        self
    }

    pub fn add_factor_bank_account(mut self, account: BankAccount) -> Self {
        self.payment.factor_bank_accounts.push(account);
        self
    }

    pub fn cash_discount(mut self, conditions: impl Into<String>, amount: impl Into<String>) -> Self {
        self.payment.discount = Some(CashDiscount {
            conditions: conditions.into(),
            amount: amount.into(),
        });
        self
    }

    pub fn build(self) -> Payment {
        self.payment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn line_numbers_follow_call_order() {
        let inv = build_invoice()
            .add_line_item(|l| l.name("a"))
            .add_line_item(|l| l.name("b").net_amount(dec!(1)))
            .add_line_item(|l| l)
            .build();
        let numbers: Vec<u32> = inv.body.lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn creation_time_defaults_to_now() {
        let before = Utc::now().trunc_subsecs(0);
        let inv = build_invoice().build();
        let created = inv.header.created_at.unwrap();
        assert!(created >= before);
        assert_eq!(created.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn explicit_creation_time_is_kept() {
        let at = chrono::DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let inv = build_invoice().created_at(at).build();
        assert_eq!(inv.header.created_at, Some(at));
    }

    #[test]
    fn aggregation_can_be_disabled() {
        let inv = build_invoice()
            .total_amount(dec!(5))
            .auto_aggregate(false)
            .add_line_item(|l| l.net_amount(dec!(100)).vat_amount(dec!(23)))
            .build();
        assert_eq!(inv.body.total_amount, dec!(5));
        assert_eq!(inv.body.summary.net_23, None);
    }

    #[test]
    fn no_lines_means_no_aggregation() {
        let inv = build_invoice().total_amount(dec!(42)).build();
        assert_eq!(inv.body.total_amount, dec!(42));
    }

    #[test]
    fn setters_replace_previous_values() {
        let inv = build_invoice()
            .with_seller(PartyBuilder::new("First").build())
            .with_seller(PartyBuilder::new("Second").build())
            .build();
        assert_eq!(inv.seller.identification.name.as_deref(), Some("Second"));
    }

    #[test]
    fn sale_date_and_period_are_exclusive() {
        let d = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let e = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let inv = build_invoice().sale_date(d).sale_period(d, e).build();
        assert!(inv.body.sale_date.is_none());
        assert_eq!(inv.body.sale_period, Some(SalePeriod { from: d, to: e }));
    }

    #[test]
    fn pricing_modes_are_exclusive() {
        let line = LineItemBuilder::new()
            .unit_net_price(dec!(10))
            .net_amount(dec!(10))
            .unit_gross_price(dec!(12.3))
            .gross_amount(dec!(12.3))
            .build();
        assert!(line.unit_net_price.is_none());
        assert!(line.net_amount.is_none());
        assert!(line.is_gross_mode());
    }

    #[test]
    fn correction_switches_type() {
        let corrected = CorrectedInvoice {
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            number: "FV/1".into(),
            ksef_number: None,
        };
        let inv = build_invoice()
            .invoice_type(InvoiceType::Zal)
            .correction("wrong price", CorrectionType::CorrectionPeriod, corrected)
            .build();
        assert_eq!(inv.body.invoice_type, InvoiceType::KorZal);
        assert!(inv.is_correction());
        assert_eq!(inv.body.correction_reason.as_deref(), Some("wrong price"));
        assert_eq!(inv.body.corrected_invoices.len(), 1);
    }

    #[test]
    fn builder_lines_replace_body_lines() {
        let body = InvoiceBody {
            lines: vec![LineItem {
                number: 7,
                name: "preset".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let kept = build_invoice().with_body(body.clone()).build();
        assert_eq!(kept.body.lines[0].number, 7);

        let replaced = build_invoice()
            .with_body(body)
            .add_line_item(|l| l.name("new"))
            .build();
        assert_eq!(replaced.body.lines.len(), 1);
        assert_eq!(replaced.body.lines[0].name, "new");
    }
}
