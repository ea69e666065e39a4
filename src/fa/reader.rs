use rust_decimal::Decimal;
use tracing::trace;

use crate::core::format::parse_datetime;
use crate::core::*;

use super::xml_utils::{XmlNode, parse_tree};

/// Parse FA XML text into an invoice.
///
/// Unknown elements are skipped. Missing optional elements stay `None`;
/// missing required elements leave the model default in place. Malformed
/// XML and tokens outside a code list are errors.
pub(crate) fn read_invoice(xml: &str) -> Result<Invoice> {
    let root = parse_tree(xml)?;
    if root.name != "Faktura" {
        return Err(InvoiceError::InvalidDocument(format!(
            "expected root element <Faktura>, found <{}>",
            root.name
        )));
    }

    let mut invoice = Invoice::default();

    if let Some(header) = root.child("Naglowek") {
        invoice.header = read_header(header)?;
    }
    if let Some(node) = root.child("Podmiot1") {
        invoice.seller = read_seller(node)?;
    }
    if let Some(node) = root.child("Podmiot2") {
        invoice.buyer = read_buyer(node)?;
    }
    for node in root.children_named("Podmiot3") {
        invoice.third_parties.push(read_third_party(node)?);
    }
    if let Some(node) = root.child("PodmiotUpowazniony") {
        invoice.authorized_entity = Some(read_authorized_entity(node)?);
    }
    if let Some(node) = root.child("Fa") {
        invoice.body = read_body(node)?;
    }
    if let Some(node) = root.child("Stopka") {
        invoice.footer = Some(read_footer(node));
    }
    if let Some(node) = root.child("Zalacznik") {
        invoice.attachment = Some(read_attachment(node));
    }

    trace!(
        number = %invoice.body.number,
        lines = invoice.body.lines.len(),
        "parsed FA document"
    );
    Ok(invoice)
}

fn read_header(node: &XmlNode) -> Result<Header> {
    Ok(Header {
        created_at: node
            .text_of("DataWytworzeniaFa")
            .map(parse_datetime)
            .transpose()?,
        system_info: node.string("SystemInfo"),
    })
}

// ---------------------------------------------------------------------------
// Parties
// ---------------------------------------------------------------------------

fn read_party_common(node: &XmlNode) -> Result<Party> {
    let mut party = Party {
        eori: node.string("NrEORI"),
        ..Default::default()
    };
    if let Some(id) = node.child("DaneIdentyfikacyjne") {
        party.identification = read_identification(id)?;
    }
    if let Some(address) = node.child("Adres") {
        party.address = Some(read_address(address)?);
    }
    if let Some(address) = node.child("AdresKoresp") {
        party.correspondence_address = Some(read_address(address)?);
    }
    Ok(party)
}

fn read_seller(node: &XmlNode) -> Result<Party> {
    let mut party = read_party_common(node)?;
    party.taxpayer_prefix = node.string("PrefiksPodatnika");
    party.contacts = read_contacts(node, "Email", "Telefon");
    party.taxpayer_status = node.code("StatusInfoPodatnika")?;
    Ok(party)
}

fn read_buyer(node: &XmlNode) -> Result<Party> {
    let mut party = read_party_common(node)?;
    party.contacts = read_contacts(node, "Email", "Telefon");
    party.customer_number = node.string("NrKlienta");
    party.buyer_id = node.string("IDNabywcy");
    Ok(party)
}

fn read_third_party(node: &XmlNode) -> Result<ThirdParty> {
    let mut party = read_party_common(node)?;
    party.contacts = read_contacts(node, "Email", "Telefon");
    party.customer_number = node.string("NrKlienta");
    party.buyer_id = node.string("IDNabywcy");

    let role: Option<ThirdPartyRole> = node.code("Rola")?;
    let other_role = if role.is_none() && node.flag("RolaInna") {
        Some(node.string("OpisRoli").unwrap_or_default())
    } else {
        None
    };

    Ok(ThirdParty {
        party,
        role,
        other_role,
        share: node.amount("Udzial")?,
    })
}

fn read_authorized_entity(node: &XmlNode) -> Result<AuthorizedEntity> {
    let mut party = read_party_common(node)?;
    party.contacts = read_contacts(node, "EmailPU", "TelefonPU");
    Ok(AuthorizedEntity {
        party,
        role: node.code("RolaPU")?.unwrap_or_default(),
    })
}

fn read_identification(node: &XmlNode) -> Result<PartyIdentification> {
    Ok(PartyIdentification {
        nip: node.string("NIP"),
        eu_code: node.string("KodUE"),
        eu_vat_number: node.string("NrVatUE"),
        country_code: node.code("KodKraju")?,
        other_id: node.string("NrID"),
        no_id: node.flag("BrakID"),
        name: node.string("Nazwa"),
    })
}

fn read_address(node: &XmlNode) -> Result<Address> {
    Ok(Address {
        country_code: node.code("KodKraju")?.unwrap_or_default(),
        line1: node.string("AdresL1").unwrap_or_default(),
        line2: node.string("AdresL2"),
        gln: node.string("GLN"),
    })
}

fn read_contacts(node: &XmlNode, email: &str, phone: &str) -> Vec<Contact> {
    node.children_named("DaneKontaktowe")
        .map(|c| Contact {
            email: c.string(email),
            phone: c.string(phone),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

fn read_body(node: &XmlNode) -> Result<InvoiceBody> {
    let mut body = InvoiceBody {
        currency: node.code("KodWaluty")?.unwrap_or_default(),
        issue_date: node.date("P_1")?,
        issue_place: node.string("P_1M"),
        number: node.string("P_2").unwrap_or_default(),
        warehouse_documents: node.children_named("WZ").map(|n| n.text.clone()).collect(),
        sale_date: node.date("P_6")?,
        summary: read_summary(node)?,
        total_amount: node.amount("P_15")?.unwrap_or(Decimal::ZERO),
        invoice_type: node.code("RodzajFaktury")?.unwrap_or_default(),
        correction_reason: node.string("PrzyczynaKorekty"),
        correction_type: node.code("TypKorekty")?,
        previous_correction_number: node.string("NrFaKorygowany"),
        corrected_invoice_period: node.string("OkresFaKorygowanej"),
        ..Default::default()
    };

    if let Some(period) = node.child("OkresFa") {
        if let (Some(from), Some(to)) = (period.date("P_6_Od")?, period.date("P_6_Do")?) {
            body.sale_period = Some(SalePeriod { from, to });
        }
    }

    if let Some(annotations) = node.child("Adnotacje") {
        body.annotations = read_annotations(annotations);
    }

    for corrected in node.children_named("DaneFaKorygowanej") {
        body.corrected_invoices.push(CorrectedInvoice {
            issue_date: corrected.date("DataWystFaKorygowanej")?,
            number: corrected.string("NrFaKorygowanej").unwrap_or_default(),
            ksef_number: corrected.string("NrKSeFFaKorygowanej"),
        });
    }

    for advance in node.children_named("ZaliczkaCzesciowa") {
        body.advance_payments.push(AdvancePayment {
            date: advance.date("P_6Z")?,
            amount: advance.amount("P_15Z")?.unwrap_or(Decimal::ZERO),
            exchange_rate: advance.amount("KursWalutyZW")?,
        });
    }

    for line in node.children_named("FaWiersz") {
        body.lines.push(read_line(line)?);
    }

    if let Some(payment) = node.child("Platnosc") {
        body.payment = Some(read_payment(payment)?);
    }
    if let Some(terms) = node.child("WarunkiTransakcji") {
        body.transaction_terms = Some(read_transaction_terms(terms)?);
    }

    for description in node.children_named("DodatkowyOpis") {
        body.additional_descriptions.push(AdditionalDescription {
            line_number: description.number("NrWiersza")?,
            key: description.string("Klucz").unwrap_or_default(),
            value: description.string("Wartosc").unwrap_or_default(),
        });
    }

    for reference in node.children_named("FakturaZaliczkowa") {
        if let Some(number) = reference.string("NrKSeFFaZaliczkowej") {
            body.advance_invoices.push(AdvanceInvoiceRef::Ksef(number));
        } else if let Some(number) = reference.string("NrFaZaliczkowej") {
            body.advance_invoices.push(AdvanceInvoiceRef::OutsideKsef(number));
        }
    }

    Ok(body)
}

fn read_summary(node: &XmlNode) -> Result<VatSummary> {
    Ok(VatSummary {
        net_23: node.amount("P_13_1")?,
        vat_23: node.amount("P_14_1")?,
        vat_23_pln: node.amount("P_14_1W")?,
        net_8: node.amount("P_13_2")?,
        vat_8: node.amount("P_14_2")?,
        vat_8_pln: node.amount("P_14_2W")?,
        net_5: node.amount("P_13_3")?,
        vat_5: node.amount("P_14_3")?,
        vat_5_pln: node.amount("P_14_3W")?,
        net_4: node.amount("P_13_4")?,
        vat_4: node.amount("P_14_4")?,
        vat_4_pln: node.amount("P_14_4W")?,
        net_oss: node.amount("P_13_5")?,
        vat_oss: node.amount("P_14_5")?,
        net_zero_domestic: node.amount("P_13_6_1")?,
        net_zero_intra_community: node.amount("P_13_6_2")?,
        net_zero_export: node.amount("P_13_6_3")?,
        net_exempt: node.amount("P_13_7")?,
        net_not_taxable: node.amount("P_13_8")?,
        net_not_taxable_art100: node.amount("P_13_9")?,
        net_reverse_charge: node.amount("P_13_10")?,
        net_margin: node.amount("P_13_11")?,
    })
}

fn read_annotations(node: &XmlNode) -> Annotations {
    let exemption = node.child("Zwolnienie").map(|z| {
        if z.flag("P_19N") {
            Exemption::NotApplicable
        } else if let Some(text) = z.string("P_19A") {
            Exemption::Applies(ExemptionBasis::NationalLaw(text))
        } else if let Some(text) = z.string("P_19B") {
            Exemption::Applies(ExemptionBasis::Directive(text))
        } else {
            Exemption::Applies(ExemptionBasis::Other(
                z.string("P_19C").unwrap_or_default(),
            ))
        }
    });

    let new_transport_means = node.child("NoweSrodkiTransportu").map(|n| {
        if n.flag("P_22") {
            NewTransportMeans::Supplied {
                art_42_5: n.flag("P_42_5"),
            }
        } else {
            NewTransportMeans::NotApplicable
        }
    });

    let margin_procedure = node.child("PMarzy").map(|m| {
        if m.flag("P_PMarzy_2") {
            MarginProcedure::TravelAgency
        } else if m.flag("P_PMarzy_3_1") {
            MarginProcedure::UsedGoods
        } else if m.flag("P_PMarzy_3_2") {
            MarginProcedure::WorksOfArt
        } else if m.flag("P_PMarzy_3_3") {
            MarginProcedure::Antiques
        } else {
            MarginProcedure::NotApplicable
        }
    });

    Annotations {
        cash_method: node.flag("P_16"),
        self_billing: node.flag("P_17"),
        reverse_charge: node.flag("P_18"),
        split_payment: node.flag("P_18A"),
        exemption,
        new_transport_means,
        simplified_procedure: node.token_of("P_23").map(|t| t == "1"),
        margin_procedure,
    }
}

fn read_line(node: &XmlNode) -> Result<LineItem> {
    Ok(LineItem {
        number: node.number("NrWierszaFa")?.unwrap_or_default(),
        name: node.string("P_7").unwrap_or_default(),
        unit: node.string("P_8A"),
        quantity: node.amount("P_8B")?,
        unit_net_price: node.amount("P_9A")?,
        unit_gross_price: node.amount("P_9B")?,
        discount: node.amount("P_10")?,
        net_amount: node.amount("P_11")?,
        vat_amount: node.amount("P_11Vat")?,
        gross_amount: node.amount("P_11A")?,
        vat_rate: node.code("P_12")?.unwrap_or_default(),
        sale_date: node.date("P_6A")?,
        gtin: node.string("GTIN"),
        pkwiu: node.string("PKWiU"),
        cn: node.string("CN"),
    })
}

fn read_payment(node: &XmlNode) -> Result<Payment> {
    let mut payment = Payment {
        paid: node.flag("Zaplacono"),
        payment_date: node.date("DataZaplaty")?,
        method: node.code("FormaPlatnosci")?,
        ..Default::default()
    };
    if payment.method.is_none() && node.flag("PlatnoscInna") {
        payment.other_method = Some(node.string("OpisPlatnosci").unwrap_or_default());
    }

    for partial in node.children_named("ZaplataCzesciowa") {
        payment.partial_payments.push(PartialPayment {
            amount: partial
                .amount("KwotaZaplatyCzesciowej")?
                .unwrap_or(Decimal::ZERO),
            date: partial.date("DataZaplatyCzesciowej")?,
        });
    }
    for term in node.children_named("TerminPlatnosci") {
        payment.terms.push(PaymentTerm {
            due_date: term.date("Termin")?,
            description: term.string("TerminOpis"),
        });
    }
    payment.bank_accounts = node
        .children_named("RachunekBankowy")
        .map(read_bank_account)
        .collect();
    payment.factor_bank_accounts = node
        .children_named("RachunekBankowyFaktora")
        .map(read_bank_account)
        .collect();
    payment.discount = node.child("Skonto").map(|s| CashDiscount {
        conditions: s.string("WarunkiSkonta").unwrap_or_default(),
        amount: s.string("WysokoscSkonta").unwrap_or_default(),
    });
    Ok(payment)
}

fn read_bank_account(node: &XmlNode) -> BankAccount {
    BankAccount {
        number: node.string("NrRB").unwrap_or_default(),
        swift: node.string("SWIFT"),
        bank_name: node.string("NazwaBanku"),
        description: node.string("OpisRachunku"),
    }
}

fn read_transaction_terms(node: &XmlNode) -> Result<TransactionTerms> {
    let mut terms = TransactionTerms {
        batch_numbers: node
            .children_named("NrPartiiTowaru")
            .map(|n| n.text.clone())
            .collect(),
        delivery_terms: node.string("WarunkiDostawy"),
        ..Default::default()
    };
    for contract in node.children_named("Umowy") {
        terms.contracts.push(DocumentReference {
            date: contract.date("DataUmowy")?,
            number: contract.string("NrUmowy"),
        });
    }
    for order in node.children_named("Zamowienia") {
        terms.orders.push(DocumentReference {
            date: order.date("DataZamowienia")?,
            number: order.string("NrZamowienia"),
        });
    }
    Ok(terms)
}

// ---------------------------------------------------------------------------
// Footer and attachment
// ---------------------------------------------------------------------------

fn read_footer(node: &XmlNode) -> Footer {
    Footer {
        info: node
            .children_named("Informacje")
            .filter_map(|i| i.string("StopkaFaktury"))
            .collect(),
        registers: node
            .children_named("Rejestry")
            .map(|r| Register {
                full_name: r.string("PelnaNazwa"),
                krs: r.string("KRS"),
                regon: r.string("REGON"),
                bdo: r.string("BDO"),
            })
            .collect(),
    }
}

fn read_attachment(node: &XmlNode) -> Attachment {
    Attachment {
        blocks: node
            .children_named("BlokDanych")
            .map(|b| DataBlock {
                header: b.string("ZNaglowek"),
                metadata: b
                    .children_named("MetaDane")
                    .map(|m| MetadataEntry {
                        key: m.string("ZKlucz").unwrap_or_default(),
                        value: m.string("ZWartosc").unwrap_or_default(),
                    })
                    .collect(),
                paragraphs: b
                    .child("Tekst")
                    .map(|t| t.children_named("Akapit").map(|a| a.text.clone()).collect())
                    .unwrap_or_default(),
            })
            .collect(),
    }
}
