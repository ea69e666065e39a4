use crate::core::format::{format_datetime_utc, format_price, format_quantity};
use crate::core::*;

use super::xml_utils::XmlWriter;
use super::{ETD_NAMESPACE, FA_NAMESPACE, FORM_CODE, FORM_SYSTEM_CODE, FORM_VARIANT, SCHEMA_VERSION};

/// Serialize an invoice to FA XML bytes (UTF-8, no byte-order mark).
pub(crate) fn write_invoice(invoice: &Invoice, indent: usize) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new(indent)?;

    w.start_element_with_attrs(
        "Faktura",
        &[("xmlns", FA_NAMESPACE), ("xmlns:etd", ETD_NAMESPACE)],
    )?;

    write_header(&mut w, &invoice.header)?;

    w.start_element("Podmiot1")?;
    write_seller(&mut w, &invoice.seller)?;
    w.end_element("Podmiot1")?;

    w.start_element("Podmiot2")?;
    write_buyer(&mut w, &invoice.buyer)?;
    w.end_element("Podmiot2")?;

    for third in &invoice.third_parties {
        write_third_party(&mut w, third)?;
    }
    if let Some(entity) = &invoice.authorized_entity {
        write_authorized_entity(&mut w, entity)?;
    }

    write_body(&mut w, &invoice.body)?;

    if let Some(footer) = &invoice.footer {
        write_footer(&mut w, footer)?;
    }
    if let Some(attachment) = &invoice.attachment {
        write_attachment(&mut w, attachment)?;
    }

    w.end_element("Faktura")?;
    Ok(w.into_bytes())
}

fn write_header(w: &mut XmlWriter, header: &Header) -> Result<()> {
    w.start_element("Naglowek")?;
    w.text_element_with_attrs(
        "KodFormularza",
        FORM_CODE,
        &[("kodSystemowy", FORM_SYSTEM_CODE), ("wersjaSchemy", SCHEMA_VERSION)],
    )?;
    w.text_element("WariantFormularza", FORM_VARIANT)?;
    w.opt_with("DataWytworzeniaFa", header.created_at, format_datetime_utc)?;
    w.opt_text("SystemInfo", header.system_info.as_deref())?;
    w.end_element("Naglowek")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parties
// ---------------------------------------------------------------------------

fn write_seller(w: &mut XmlWriter, party: &Party) -> Result<()> {
    w.opt_text("PrefiksPodatnika", party.taxpayer_prefix.as_deref())?;
    w.opt_text("NrEORI", party.eori.as_deref())?;
    write_identification(w, &party.identification)?;
    write_addresses(w, party)?;
    write_contacts(w, &party.contacts, "Email", "Telefon")?;
    w.opt_with("StatusInfoPodatnika", party.taxpayer_status, |s| {
        s.token().to_string()
    })?;
    Ok(())
}

fn write_buyer(w: &mut XmlWriter, party: &Party) -> Result<()> {
    w.opt_text("NrEORI", party.eori.as_deref())?;
    write_identification(w, &party.identification)?;
    write_addresses(w, party)?;
    write_contacts(w, &party.contacts, "Email", "Telefon")?;
    w.opt_text("NrKlienta", party.customer_number.as_deref())?;
    w.opt_text("IDNabywcy", party.buyer_id.as_deref())?;
    Ok(())
}

fn write_third_party(w: &mut XmlWriter, third: &ThirdParty) -> Result<()> {
    let party = &third.party;
    w.start_element("Podmiot3")?;
    w.opt_text("IDNabywcy", party.buyer_id.as_deref())?;
    w.opt_text("NrEORI", party.eori.as_deref())?;
    write_identification(w, &party.identification)?;
    write_addresses(w, party)?;
    write_contacts(w, &party.contacts, "Email", "Telefon")?;
    if let Some(role) = third.role {
        w.text_element("Rola", role.token())?;
    } else if let Some(description) = third.other_role.as_deref().filter(|d| !d.is_empty()) {
        w.marker("RolaInna")?;
        w.text_element("OpisRoli", description)?;
    }
    w.opt_with("Udzial", third.share, format_quantity)?;
    w.opt_text("NrKlienta", party.customer_number.as_deref())?;
    w.end_element("Podmiot3")?;
    Ok(())
}

fn write_authorized_entity(w: &mut XmlWriter, entity: &AuthorizedEntity) -> Result<()> {
    let party = &entity.party;
    w.start_element("PodmiotUpowazniony")?;
    w.opt_text("NrEORI", party.eori.as_deref())?;
    write_identification(w, &party.identification)?;
    write_addresses(w, party)?;
    write_contacts(w, &party.contacts, "EmailPU", "TelefonPU")?;
    w.text_element("RolaPU", entity.role.token())?;
    w.end_element("PodmiotUpowazniony")?;
    Ok(())
}

fn write_identification(w: &mut XmlWriter, id: &PartyIdentification) -> Result<()> {
    w.start_element("DaneIdentyfikacyjne")?;
    w.opt_text("NIP", id.nip.as_deref())?;
    w.opt_text("KodUE", id.eu_code.as_deref())?;
    w.opt_text("NrVatUE", id.eu_vat_number.as_deref())?;
    w.opt_with("KodKraju", id.country_code, |c| c.token().to_string())?;
    w.opt_text("NrID", id.other_id.as_deref())?;
    if id.no_id {
        w.marker("BrakID")?;
    }
    w.opt_text("Nazwa", id.name.as_deref())?;
    w.end_element("DaneIdentyfikacyjne")?;
    Ok(())
}

fn write_addresses(w: &mut XmlWriter, party: &Party) -> Result<()> {
    if let Some(address) = &party.address {
        write_address(w, "Adres", address)?;
    }
    if let Some(address) = &party.correspondence_address {
        write_address(w, "AdresKoresp", address)?;
    }
    Ok(())
}

fn write_address(w: &mut XmlWriter, wrapper: &str, address: &Address) -> Result<()> {
    w.start_element(wrapper)?;
    w.text_element("KodKraju", address.country_code.token())?;
    w.text_element("AdresL1", &address.line1)?;
    w.opt_text("AdresL2", address.line2.as_deref())?;
    w.opt_text("GLN", address.gln.as_deref())?;
    w.end_element(wrapper)?;
    Ok(())
}

fn write_contacts(w: &mut XmlWriter, contacts: &[Contact], email: &str, phone: &str) -> Result<()> {
    for contact in contacts
        .iter()
        .filter(|c| has_text(&c.email) || has_text(&c.phone))
    {
        w.start_element("DaneKontaktowe")?;
        w.opt_text(email, contact.email.as_deref())?;
        w.opt_text(phone, contact.phone.as_deref())?;
        w.end_element("DaneKontaktowe")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

fn write_body(w: &mut XmlWriter, body: &InvoiceBody) -> Result<()> {
    w.start_element("Fa")?;
    w.text_element("KodWaluty", body.currency.token())?;
    w.opt_date("P_1", body.issue_date)?;
    w.opt_text("P_1M", body.issue_place.as_deref())?;
    w.text_element("P_2", &body.number)?;
    for wz in &body.warehouse_documents {
        w.text_element("WZ", wz)?;
    }
    w.opt_date("P_6", body.sale_date)?;
    if let Some(period) = &body.sale_period {
        w.start_element("OkresFa")?;
        w.opt_date("P_6_Od", Some(period.from))?;
        w.opt_date("P_6_Do", Some(period.to))?;
        w.end_element("OkresFa")?;
    }

    write_summary(w, &body.summary)?;
    w.amount("P_15", body.total_amount)?;

    write_annotations(w, &body.annotations)?;
    w.text_element("RodzajFaktury", body.invoice_type.token())?;

    w.opt_text("PrzyczynaKorekty", body.correction_reason.as_deref())?;
    w.opt_with("TypKorekty", body.correction_type, |t| t.token().to_string())?;
    for corrected in &body.corrected_invoices {
        write_corrected_invoice(w, corrected)?;
    }
    w.opt_text("NrFaKorygowany", body.previous_correction_number.as_deref())?;
    w.opt_text("OkresFaKorygowanej", body.corrected_invoice_period.as_deref())?;

    for advance in &body.advance_payments {
        w.start_element("ZaliczkaCzesciowa")?;
        w.opt_date("P_6Z", advance.date)?;
        w.amount("P_15Z", advance.amount)?;
        w.opt_with("KursWalutyZW", advance.exchange_rate, format_price)?;
        w.end_element("ZaliczkaCzesciowa")?;
    }

    for line in &body.lines {
        write_line(w, line)?;
    }

    if let Some(payment) = &body.payment {
        write_payment(w, payment)?;
    }
    if let Some(terms) = &body.transaction_terms {
        write_transaction_terms(w, terms)?;
    }

    for description in &body.additional_descriptions {
        w.start_element("DodatkowyOpis")?;
        w.opt_with("NrWiersza", description.line_number, |n| n.to_string())?;
        w.text_element("Klucz", &description.key)?;
        w.text_element("Wartosc", &description.value)?;
        w.end_element("DodatkowyOpis")?;
    }

    for reference in &body.advance_invoices {
        w.start_element("FakturaZaliczkowa")?;
        match reference {
            AdvanceInvoiceRef::Ksef(number) => {
                w.text_element("NrKSeFFaZaliczkowej", number)?;
            }
            AdvanceInvoiceRef::OutsideKsef(number) => {
                w.marker("NrKSeFZN")?;
                w.text_element("NrFaZaliczkowej", number)?;
            }
        }
        w.end_element("FakturaZaliczkowa")?;
    }

    w.end_element("Fa")?;
    Ok(())
}

fn write_summary(w: &mut XmlWriter, s: &VatSummary) -> Result<()> {
    w.opt_amount("P_13_1", s.net_23)?;
    w.opt_amount("P_14_1", s.vat_23)?;
    w.opt_amount("P_14_1W", s.vat_23_pln)?;
    w.opt_amount("P_13_2", s.net_8)?;
    w.opt_amount("P_14_2", s.vat_8)?;
    w.opt_amount("P_14_2W", s.vat_8_pln)?;
    w.opt_amount("P_13_3", s.net_5)?;
    w.opt_amount("P_14_3", s.vat_5)?;
    w.opt_amount("P_14_3W", s.vat_5_pln)?;
    w.opt_amount("P_13_4", s.net_4)?;
    w.opt_amount("P_14_4", s.vat_4)?;
    w.opt_amount("P_14_4W", s.vat_4_pln)?;
    w.opt_amount("P_13_5", s.net_oss)?;
    w.opt_amount("P_14_5", s.vat_oss)?;
    w.opt_amount("P_13_6_1", s.net_zero_domestic)?;
    w.opt_amount("P_13_6_2", s.net_zero_intra_community)?;
    w.opt_amount("P_13_6_3", s.net_zero_export)?;
    w.opt_amount("P_13_7", s.net_exempt)?;
    w.opt_amount("P_13_8", s.net_not_taxable)?;
    w.opt_amount("P_13_9", s.net_not_taxable_art100)?;
    w.opt_amount("P_13_10", s.net_reverse_charge)?;
    w.opt_amount("P_13_11", s.net_margin)?;
    Ok(())
}

fn write_annotations(w: &mut XmlWriter, a: &Annotations) -> Result<()> {
    w.start_element("Adnotacje")?;
    w.flag("P_16", a.cash_method)?;
    w.flag("P_17", a.self_billing)?;
    w.flag("P_18", a.reverse_charge)?;
    w.flag("P_18A", a.split_payment)?;

    if let Some(exemption) = &a.exemption {
        w.start_element("Zwolnienie")?;
        match exemption {
            Exemption::Applies(basis) => {
                w.marker("P_19")?;
                match basis {
                    ExemptionBasis::NationalLaw(text) => w.text_element("P_19A", text)?,
                    ExemptionBasis::Directive(text) => w.text_element("P_19B", text)?,
                    ExemptionBasis::Other(text) => w.text_element("P_19C", text)?,
                };
            }
            Exemption::NotApplicable => {
                w.marker("P_19N")?;
            }
        }
        w.end_element("Zwolnienie")?;
    }

    if let Some(transport) = &a.new_transport_means {
        w.start_element("NoweSrodkiTransportu")?;
        match transport {
            NewTransportMeans::Supplied { art_42_5 } => {
                w.marker("P_22")?;
                w.flag("P_42_5", *art_42_5)?;
            }
            NewTransportMeans::NotApplicable => {
                w.marker("P_22N")?;
            }
        }
        w.end_element("NoweSrodkiTransportu")?;
    }

    if let Some(simplified) = a.simplified_procedure {
        w.flag("P_23", simplified)?;
    }

    if let Some(margin) = &a.margin_procedure {
        w.start_element("PMarzy")?;
        let element = match margin {
            MarginProcedure::TravelAgency => Some("P_PMarzy_2"),
            MarginProcedure::UsedGoods => Some("P_PMarzy_3_1"),
            MarginProcedure::WorksOfArt => Some("P_PMarzy_3_2"),
            MarginProcedure::Antiques => Some("P_PMarzy_3_3"),
            MarginProcedure::NotApplicable => None,
        };
        match element {
            Some(name) => {
                w.marker("P_PMarzy")?;
                w.marker(name)?;
            }
            None => {
                w.marker("P_PMarzyN")?;
            }
        }
        w.end_element("PMarzy")?;
    }

    w.end_element("Adnotacje")?;
    Ok(())
}

fn write_corrected_invoice(w: &mut XmlWriter, corrected: &CorrectedInvoice) -> Result<()> {
    w.start_element("DaneFaKorygowanej")?;
    w.opt_date("DataWystFaKorygowanej", corrected.issue_date)?;
    w.text_element("NrFaKorygowanej", &corrected.number)?;
    match &corrected.ksef_number {
        Some(number) => {
            w.marker("NrKSeF")?;
            w.text_element("NrKSeFFaKorygowanej", number)?;
        }
        None => {
            w.marker("NrKSeFN")?;
        }
    }
    w.end_element("DaneFaKorygowanej")?;
    Ok(())
}

fn write_line(w: &mut XmlWriter, line: &LineItem) -> Result<()> {
    w.start_element("FaWiersz")?;
    w.text_element("NrWierszaFa", &line.number.to_string())?;
    w.text_element("P_7", &line.name)?;
    w.opt_text("P_8A", line.unit.as_deref())?;
    w.opt_with("P_8B", line.quantity, format_quantity)?;
    w.opt_with("P_9A", line.unit_net_price, format_price)?;
    w.opt_with("P_9B", line.unit_gross_price, format_price)?;
    w.opt_with("P_10", line.discount, format_price)?;
    w.opt_amount("P_11", line.net_amount)?;
    w.opt_amount("P_11Vat", line.vat_amount)?;
    w.opt_amount("P_11A", line.gross_amount)?;
    w.text_element("P_12", line.vat_rate.token())?;
    w.opt_date("P_6A", line.sale_date)?;
    w.opt_text("GTIN", line.gtin.as_deref())?;
    w.opt_text("PKWiU", line.pkwiu.as_deref())?;
    w.opt_text("CN", line.cn.as_deref())?;
    w.end_element("FaWiersz")?;
    Ok(())
}

fn write_payment(w: &mut XmlWriter, payment: &Payment) -> Result<()> {
    w.start_element("Platnosc")?;
    if payment.paid {
        w.marker("Zaplacono")?;
    }
    w.opt_date("DataZaplaty", payment.payment_date)?;
    if !payment.partial_payments.is_empty() {
        w.marker("ZnacznikZaplatyCzesciowej")?;
    }
    for partial in &payment.partial_payments {
        w.start_element("ZaplataCzesciowa")?;
        w.amount("KwotaZaplatyCzesciowej", partial.amount)?;
        w.opt_date("DataZaplatyCzesciowej", partial.date)?;
        w.end_element("ZaplataCzesciowa")?;
    }
    for term in &payment.terms {
        w.start_element("TerminPlatnosci")?;
        w.opt_date("Termin", term.due_date)?;
        w.opt_text("TerminOpis", term.description.as_deref())?;
        w.end_element("TerminPlatnosci")?;
    }
    if let Some(method) = payment.method {
        w.text_element("FormaPlatnosci", method.token())?;
    } else if let Some(description) = &payment.other_method {
        w.marker("PlatnoscInna")?;
        w.text_element("OpisPlatnosci", description)?;
    }
    for account in &payment.bank_accounts {
        write_bank_account(w, "RachunekBankowy", account)?;
    }
    for account in &payment.factor_bank_accounts {
        write_bank_account(w, "RachunekBankowyFaktora", account)?;
    }
    if let Some(discount) = &payment.discount {
        w.start_element("Skonto")?;
        w.text_element("WarunkiSkonta", &discount.conditions)?;
        w.text_element("WysokoscSkonta", &discount.amount)?;
        w.end_element("Skonto")?;
    }
    w.end_element("Platnosc")?;
    Ok(())
}

fn write_bank_account(w: &mut XmlWriter, wrapper: &str, account: &BankAccount) -> Result<()> {
    w.start_element(wrapper)?;
    w.text_element("NrRB", &account.number)?;
    w.opt_text("SWIFT", account.swift.as_deref())?;
    w.opt_text("NazwaBanku", account.bank_name.as_deref())?;
    w.opt_text("OpisRachunku", account.description.as_deref())?;
    w.end_element(wrapper)?;
    Ok(())
}

fn write_transaction_terms(w: &mut XmlWriter, terms: &TransactionTerms) -> Result<()> {
    w.start_element("WarunkiTransakcji")?;
    for contract in terms.contracts.iter().filter(|c| has_reference(c)) {
        w.start_element("Umowy")?;
        w.opt_date("DataUmowy", contract.date)?;
        w.opt_text("NrUmowy", contract.number.as_deref())?;
        w.end_element("Umowy")?;
    }
    for order in terms.orders.iter().filter(|o| has_reference(o)) {
        w.start_element("Zamowienia")?;
        w.opt_date("DataZamowienia", order.date)?;
        w.opt_text("NrZamowienia", order.number.as_deref())?;
        w.end_element("Zamowienia")?;
    }
    for batch in &terms.batch_numbers {
        w.text_element("NrPartiiTowaru", batch)?;
    }
    w.opt_text("WarunkiDostawy", terms.delivery_terms.as_deref())?;
    w.end_element("WarunkiTransakcji")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Footer and attachment
// ---------------------------------------------------------------------------

fn write_footer(w: &mut XmlWriter, footer: &Footer) -> Result<()> {
    w.start_element("Stopka")?;
    for info in &footer.info {
        w.start_element("Informacje")?;
        w.text_element("StopkaFaktury", info)?;
        w.end_element("Informacje")?;
    }
    for register in footer.registers.iter().filter(|r| {
        has_text(&r.full_name) || has_text(&r.krs) || has_text(&r.regon) || has_text(&r.bdo)
    }) {
        w.start_element("Rejestry")?;
        w.opt_text("PelnaNazwa", register.full_name.as_deref())?;
        w.opt_text("KRS", register.krs.as_deref())?;
        w.opt_text("REGON", register.regon.as_deref())?;
        w.opt_text("BDO", register.bdo.as_deref())?;
        w.end_element("Rejestry")?;
    }
    w.end_element("Stopka")?;
    Ok(())
}

fn write_attachment(w: &mut XmlWriter, attachment: &Attachment) -> Result<()> {
    w.start_element("Zalacznik")?;
    for block in &attachment.blocks {
        w.start_element("BlokDanych")?;
        w.opt_text("ZNaglowek", block.header.as_deref())?;
        for entry in &block.metadata {
            w.start_element("MetaDane")?;
            w.text_element("ZKlucz", &entry.key)?;
            w.text_element("ZWartosc", &entry.value)?;
            w.end_element("MetaDane")?;
        }
        if !block.paragraphs.is_empty() {
            w.start_element("Tekst")?;
            for paragraph in &block.paragraphs {
                w.text_element("Akapit", paragraph)?;
            }
            w.end_element("Tekst")?;
        }
        w.end_element("BlokDanych")?;
    }
    w.end_element("Zalacznik")?;
    Ok(())
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// A contract or order reference with at least one field to write.
fn has_reference(reference: &DocumentReference) -> bool {
    reference.date.is_some() || has_text(&reference.number)
}
