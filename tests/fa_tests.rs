#![cfg(feature = "fa")]

use chrono::{NaiveDate, TimeZone, Utc};
use ksef_fa::core::*;
use ksef_fa::fa::{self, FaCodec, FaOptions};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seller() -> Party {
    PartyBuilder::new("ACME Sp. z o.o.")
        .nip("5260250274")
        .address(AddressBuilder::new(CountryCode::Pl, "ul. Marszałkowska 10, 00-001 Warszawa").build())
        .contact(Some("faktury@acme.pl".into()), None)
        .build()
}

fn buyer() -> Party {
    PartyBuilder::new("Klient S.A.")
        .nip("1234563218")
        .address(AddressBuilder::new(CountryCode::Pl, "ul. Długa 1, 80-001 Gdańsk").build())
        .customer_number("K-042")
        .build()
}

fn sample_invoice() -> Invoice {
    build_invoice()
        .created_at(Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap())
        .system_info("ksef-fa")
        .number("FV/2024/06/001")
        .issue_date(date(2024, 6, 15))
        .issue_place("Warszawa")
        .sale_date(date(2024, 6, 14))
        .with_seller(seller())
        .with_buyer(buyer())
        .add_line_item(|l| {
            l.name("Usługa A")
                .unit("szt.")
                .quantity(dec!(2))
                .unit_net_price(dec!(50))
                .net_amount(dec!(100.00))
                .vat_amount(dec!(23.00))
                .vat_rate(VatRate::Rate23)
        })
        .add_line_item(|l| {
            l.name("Usługa B")
                .net_amount(dec!(50.00))
                .vat_amount(dec!(4.00))
                .vat_rate(VatRate::Rate8)
        })
        .add_line_item(|l| {
            l.name("Eksport")
                .net_amount(dec!(200.00))
                .vat_rate(VatRate::ZeroExport)
        })
        .with_payment(
            PaymentBuilder::new()
                .due_date(date(2024, 7, 15))
                .method(PaymentMethod::Transfer)
                .bank_account("PL61109010140000071219812874")
                .build(),
        )
        .build()
}

/// Assert that each needle occurs, in order.
fn assert_in_order(xml: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        let pos = xml[from..]
            .find(needle)
            .unwrap_or_else(|| panic!("{needle} missing or out of order in:\n{xml}"));
        from += pos + needle.len();
    }
}

// --- Serialization ---

#[test]
fn root_carries_namespaces_and_form_code() {
    let xml = fa::to_xml(&sample_invoice()).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains(&format!("<Faktura xmlns=\"{}\"", fa::FA_NAMESPACE)));
    assert!(xml.contains(&format!("xmlns:etd=\"{}\"", fa::ETD_NAMESPACE)));
    assert!(xml.contains(
        "<KodFormularza kodSystemowy=\"FA (3)\" wersjaSchemy=\"1-0E\">FA</KodFormularza>"
    ));
    assert!(xml.contains("<WariantFormularza>3</WariantFormularza>"));
    assert!(xml.contains("<DataWytworzeniaFa>2024-06-15T10:00:00Z</DataWytworzeniaFa>"));
}

#[test]
fn top_level_sections_in_schema_order() {
    let xml = fa::to_xml(&sample_invoice()).unwrap();
    assert_in_order(
        &xml,
        &["<Naglowek>", "<Podmiot1>", "<Podmiot2>", "<Fa>", "</Faktura>"],
    );
}

#[test]
fn body_fields_in_schema_order() {
    let xml = fa::to_xml(&sample_invoice()).unwrap();
    assert_in_order(
        &xml,
        &[
            "<KodWaluty>PLN</KodWaluty>",
            "<P_1>2024-06-15</P_1>",
            "<P_1M>Warszawa</P_1M>",
            "<P_2>FV/2024/06/001</P_2>",
            "<P_6>2024-06-14</P_6>",
            "<P_13_1>100.00</P_13_1>",
            "<P_14_1>23.00</P_14_1>",
            "<P_13_2>50.00</P_13_2>",
            "<P_14_2>4.00</P_14_2>",
            "<P_13_6_3>200.00</P_13_6_3>",
            "<P_15>377.00</P_15>",
            "<Adnotacje>",
            "<RodzajFaktury>VAT</RodzajFaktury>",
            "<FaWiersz>",
            "<Platnosc>",
            "</Fa>",
        ],
    );
}

#[test]
fn line_fields_are_formatted() {
    let xml = fa::to_xml(&sample_invoice()).unwrap();
    assert_in_order(
        &xml,
        &[
            "<NrWierszaFa>1</NrWierszaFa>",
            "<P_7>Usługa A</P_7>",
            "<P_8A>szt.</P_8A>",
            "<P_8B>2</P_8B>",
            "<P_9A>50.00</P_9A>",
            "<P_11>100.00</P_11>",
            "<P_11Vat>23.00</P_11Vat>",
            "<P_12>23</P_12>",
            "<NrWierszaFa>3</NrWierszaFa>",
            "<P_12>0 EX</P_12>",
        ],
    );
}

#[test]
fn seller_identification_and_address() {
    let xml = fa::to_xml(&sample_invoice()).unwrap();
    assert_in_order(
        &xml,
        &[
            "<Podmiot1>",
            "<DaneIdentyfikacyjne>",
            "<NIP>5260250274</NIP>",
            "<Nazwa>ACME Sp. z o.o.</Nazwa>",
            "<Adres>",
            "<KodKraju>PL</KodKraju>",
            "<AdresL1>",
            "<DaneKontaktowe>",
            "<Email>faktury@acme.pl</Email>",
            "</Podmiot1>",
            "<Podmiot2>",
            "<NIP>1234563218</NIP>",
            "<NrKlienta>K-042</NrKlienta>",
            "</Podmiot2>",
        ],
    );
}

#[test]
fn absent_optionals_are_omitted() {
    let xml = fa::to_xml(&sample_invoice()).unwrap();
    for absent in [
        "<P_13_3>",
        "<P_14_3>",
        "<P_13_7>",
        "<OkresFa>",
        "<Podmiot3>",
        "<PodmiotUpowazniony>",
        "<Stopka>",
        "<Zalacznik>",
        "<PrzyczynaKorekty>",
        "<Telefon>",
        "<P_11A>",
        "<GTIN>",
        "<WarunkiTransakcji>",
    ] {
        assert!(!xml.contains(absent), "{absent} should be omitted");
    }
    assert!(!xml.contains("/>"), "no empty-element placeholders");
}

#[test]
fn annotations_default_to_no() {
    let xml = fa::to_xml(&sample_invoice()).unwrap();
    assert_in_order(
        &xml,
        &[
            "<Adnotacje>",
            "<P_16>2</P_16>",
            "<P_17>2</P_17>",
            "<P_18>2</P_18>",
            "<P_18A>2</P_18A>",
            "</Adnotacje>",
        ],
    );
}

#[test]
fn annotations_with_choices() {
    let inv = build_invoice()
        .number("A/1")
        .with_annotations(Annotations {
            split_payment: true,
            exemption: Some(Exemption::Applies(ExemptionBasis::NationalLaw(
                "art. 43 ust. 1 pkt 37".into(),
            ))),
            new_transport_means: Some(NewTransportMeans::NotApplicable),
            simplified_procedure: Some(false),
            margin_procedure: Some(MarginProcedure::UsedGoods),
            ..Default::default()
        })
        .build();
    let xml = fa::to_xml(&inv).unwrap();
    assert_in_order(
        &xml,
        &[
            "<P_18A>1</P_18A>",
            "<Zwolnienie>",
            "<P_19>1</P_19>",
            "<P_19A>art. 43 ust. 1 pkt 37</P_19A>",
            "</Zwolnienie>",
            "<NoweSrodkiTransportu>",
            "<P_22N>1</P_22N>",
            "<P_23>2</P_23>",
            "<PMarzy>",
            "<P_PMarzy>1</P_PMarzy>",
            "<P_PMarzy_3_1>1</P_PMarzy_3_1>",
        ],
    );

    let parsed = fa::parse_fa_xml(&xml).unwrap();
    assert_eq!(parsed.body.annotations, inv.body.annotations);
}

#[test]
fn amounts_use_two_decimals_and_dot() {
    let inv = build_invoice()
        .number("R/1")
        .add_line_item(|l| {
            l.name("Drobne")
                .quantity(dec!(1.5))
                .unit_net_price(dec!(0.123456))
                .net_amount(dec!(1234567.5))
                .vat_amount(dec!(283950.525))
        })
        .build();
    let xml = fa::to_xml(&inv).unwrap();
    assert!(xml.contains("<P_8B>1.5</P_8B>"));
    assert!(xml.contains("<P_9A>0.123456</P_9A>"));
    assert!(xml.contains("<P_11>1234567.50</P_11>"));
    assert!(xml.contains("<P_11Vat>283950.53</P_11Vat>"));
    assert!(xml.contains("<P_15>1518518.03</P_15>"));
}

#[test]
fn correction_fields() {
    let inv = build_invoice()
        .number("KOR/1")
        .correction(
            "Zwrot towaru",
            CorrectionType::CorrectionPeriod,
            CorrectedInvoice {
                issue_date: Some(date(2024, 5, 2)),
                number: "FV/2024/05/001".into(),
                ksef_number: None,
            },
        )
        .build();
    let xml = fa::to_xml(&inv).unwrap();
    assert_in_order(
        &xml,
        &[
            "<RodzajFaktury>KOR</RodzajFaktury>",
            "<PrzyczynaKorekty>Zwrot towaru</PrzyczynaKorekty>",
            "<TypKorekty>2</TypKorekty>",
            "<DaneFaKorygowanej>",
            "<DataWystFaKorygowanej>2024-05-02</DataWystFaKorygowanej>",
            "<NrFaKorygowanej>FV/2024/05/001</NrFaKorygowanej>",
            "<NrKSeFN>1</NrKSeFN>",
        ],
    );
}

#[test]
fn bytes_have_no_bom() {
    let bytes = fa::to_bytes(&sample_invoice()).unwrap();
    assert!(bytes.starts_with(b"<?xml"));
    assert_eq!(String::from_utf8(bytes).unwrap(), fa::to_xml(&sample_invoice()).unwrap());
}

#[test]
fn special_characters_are_escaped() {
    let inv = build_invoice()
        .number("A&B <1>")
        .with_seller(PartyBuilder::new("\"Kowalski\" & Syn").build())
        .build();
    let xml = fa::to_xml(&inv).unwrap();
    assert!(xml.contains("<P_2>A&amp;B &lt;1&gt;</P_2>"));
    let parsed = fa::from_xml(&xml).unwrap();
    assert_eq!(parsed.body.number, "A&B <1>");
    assert_eq!(parsed.seller.identification.name.as_deref(), Some("\"Kowalski\" & Syn"));
}

// --- Round-trip ---

#[test]
fn empty_aggregates_are_not_written() {
    let mut inv = sample_invoice();
    inv.buyer.contacts.push(Contact::default());
    inv.third_parties.push(ThirdParty {
        party: PartyBuilder::new("Odbiorca").build(),
        role: None,
        other_role: Some(String::new()),
        share: None,
    });
    inv.body.transaction_terms = Some(TransactionTerms {
        contracts: vec![DocumentReference::default()],
        orders: vec![DocumentReference {
            date: None,
            number: Some("ZAM/7".into()),
        }],
        ..Default::default()
    });
    inv.footer = Some(Footer {
        info: vec!["Dziękujemy".into()],
        registers: vec![Register::default()],
    });

    let xml = fa::to_xml(&inv).unwrap();
    assert_eq!(xml.matches("<DaneKontaktowe>").count(), 1);
    assert!(!xml.contains("<OpisRoli"));
    assert!(!xml.contains("<RolaInna"));
    assert!(!xml.contains("<Umowy"));
    assert!(xml.contains("<NrZamowienia>ZAM/7</NrZamowienia>"));
    assert!(!xml.contains("<Rejestry"));
    assert!(!xml.contains("></"), "empty element written:\n{xml}");
}

#[test]
fn roundtrip_reproduces_document() {
    let inv = sample_invoice();
    let xml = fa::to_xml(&inv).unwrap();
    let parsed = fa::from_xml(&xml).unwrap();
    assert_eq!(parsed, inv);
}

#[test]
fn roundtrip_every_rate_class() {
    let mut builder = build_invoice()
        .created_at(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
        .number("ALL/1")
        .issue_date(date(2024, 1, 2))
        .with_seller(seller())
        .with_buyer(buyer());
    for (rate, _) in VatRate::ALL {
        let vat = if rate.is_taxed() { Some(dec!(1.11)) } else { None };
        builder = builder.add_line_item(|l| {
            let l = l.name(format!("Stawka {rate}")).net_amount(dec!(10.00)).vat_rate(*rate);
            match vat {
                Some(v) => l.vat_amount(v),
                None => l,
            }
        });
    }
    let inv = builder.build();
    let parsed = fa::from_xml(&fa::to_xml(&inv).unwrap()).unwrap();

    assert_eq!(parsed.seller, inv.seller);
    assert_eq!(parsed.buyer, inv.buyer);
    assert_eq!(parsed.body.summary, inv.body.summary);
    assert_eq!(parsed.body.total_amount, inv.body.total_amount);
    assert_eq!(parsed.body.lines, inv.body.lines);
}

#[test]
fn roundtrip_full_document() {
    let inv = build_invoice()
        .created_at(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap())
        .currency(CurrencyCode::Eur)
        .number("FV/EU/7")
        .issue_date(date(2024, 6, 15))
        .add_warehouse_document("WZ/1")
        .add_warehouse_document("WZ/2")
        .sale_period(date(2024, 6, 1), date(2024, 6, 30))
        .invoice_type(InvoiceType::Zal)
        .add_advance_payment(AdvancePayment {
            date: Some(date(2024, 6, 10)),
            amount: dec!(500),
            exchange_rate: Some(dec!(4.3125)),
        })
        .add_advance_invoice(AdvanceInvoiceRef::Ksef("5260250274-20240601-0123456789AB-CD".into()))
        .add_advance_invoice(AdvanceInvoiceRef::OutsideKsef("ZAL/2024/1".into()))
        .add_additional_description("Projekt", "Alfa")
        .with_seller(
            PartyBuilder::new("ACME Sp. z o.o.")
                .nip("5260250274")
                .taxpayer_prefix("PL")
                .eori("PL526025027400000")
                .taxpayer_status(TaxpayerStatus::Restructuring)
                .address(AddressBuilder::new(CountryCode::Pl, "ul. Prosta 1").gln("5901234123457").build())
                .correspondence_address(AddressBuilder::new(CountryCode::Pl, "skr. poczt. 12").build())
                .build(),
        )
        .with_buyer(
            PartyBuilder::new("Kunde GmbH")
                .eu_vat("DE", "123456789")
                .address(AddressBuilder::new(CountryCode::De, "Hauptstraße 5").line2("10115 Berlin").build())
                .contact(Some("rechnung@kunde.de".into()), Some("+49 30 1234".into()))
                .buyer_id("B-1")
                .build(),
        )
        .add_third_party(ThirdParty {
            party: PartyBuilder::new("Odbiorca").no_id().build(),
            role: None,
            other_role: Some("Przewoźnik".into()),
            share: Some(dec!(50)),
        })
        .with_authorized_entity(
            PartyBuilder::new("Przedstawiciel")
                .nip("1234563218")
                .contact(Some("pu@example.pl".into()), None)
                .build_authorized(AuthorizedRole::TaxRepresentative),
        )
        .add_line_item(|l| {
            l.name("Maszyna")
                .unit("szt.")
                .quantity(dec!(1))
                .unit_net_price(dec!(1000))
                .discount(dec!(10))
                .net_amount(dec!(1000))
                .vat_amount(dec!(0))
                .vat_rate(VatRate::ZeroIntraCommunity)
                .sale_date(date(2024, 6, 3))
                .gtin("05901234123457")
                .pkwiu("28.11.11.0")
                .cn("8407")
        })
        .with_payment(
            PaymentBuilder::new()
                .add_partial_payment(dec!(100), date(2024, 6, 16))
                .add_term(PaymentTerm {
                    due_date: None,
                    description: Some("14 dni od dostawy".into()),
                })
                .other_method("Kompensata")
                .add_bank_account(BankAccount {
                    number: "DE89370400440532013000".into(),
                    swift: Some("COBADEFFXXX".into()),
                    bank_name: Some("Commerzbank".into()),
                    description: None,
                })
                .add_factor_bank_account(BankAccount {
                    number: "PL61109010140000071219812874".into(),
                    ..Default::default()
                })
                .cash_discount("Zapłata w 7 dni", "2%")
                .build(),
        )
        .with_transaction_terms(TransactionTerms {
            contracts: vec![DocumentReference {
                date: Some(date(2024, 1, 1)),
                number: Some("UM/1".into()),
            }],
            orders: vec![DocumentReference {
                date: None,
                number: Some("ZAM/9".into()),
            }],
            batch_numbers: vec!["LOT-7".into()],
            delivery_terms: Some("DAP".into()),
        })
        .with_footer(Footer {
            info: vec!["Dziękujemy".into()],
            registers: vec![Register {
                full_name: Some("ACME Sp. z o.o.".into()),
                krs: Some("0000123456".into()),
                regon: Some("123456785".into()),
                bdo: None,
            }],
        })
        .with_attachment(Attachment {
            blocks: vec![DataBlock {
                header: Some("Specyfikacja".into()),
                metadata: vec![MetadataEntry {
                    key: "wersja".into(),
                    value: "2".into(),
                }],
                paragraphs: vec!["Akapit pierwszy".into(), "Akapit drugi".into()],
            }],
        })
        .build();

    let xml = fa::to_xml(&inv).unwrap();
    assert_in_order(
        &xml,
        &[
            "<Podmiot2>",
            "</Podmiot2>",
            "<Podmiot3>",
            "<BrakID>1</BrakID>",
            "<RolaInna>1</RolaInna>",
            "<OpisRoli>Przewoźnik</OpisRoli>",
            "<Udzial>50</Udzial>",
            "</Podmiot3>",
            "<PodmiotUpowazniony>",
            "<EmailPU>pu@example.pl</EmailPU>",
            "<RolaPU>3</RolaPU>",
            "<Fa>",
            "<OkresFa>",
            "<P_6_Od>2024-06-01</P_6_Od>",
            "<P_6_Do>2024-06-30</P_6_Do>",
            "<ZaliczkaCzesciowa>",
            "<KursWalutyZW>4.3125</KursWalutyZW>",
            "<FaWiersz>",
            "<Platnosc>",
            "<ZnacznikZaplatyCzesciowej>1</ZnacznikZaplatyCzesciowej>",
            "<PlatnoscInna>1</PlatnoscInna>",
            "<RachunekBankowyFaktora>",
            "<Skonto>",
            "<WarunkiTransakcji>",
            "<DodatkowyOpis>",
            "<FakturaZaliczkowa>",
            "<NrKSeFZN>1</NrKSeFZN>",
            "</Fa>",
            "<Stopka>",
            "<Zalacznik>",
            "<Akapit>Akapit drugi</Akapit>",
        ],
    );

    let parsed = fa::parse_fa_xml(&xml).unwrap();
    assert_eq!(parsed, inv);
}

// --- Parsing ---

#[test]
fn surrounding_whitespace_in_text_roundtrips() {
    let inv = build_invoice()
        .created_at(Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap())
        .number(" FV/2024/06/003 ")
        .issue_date(date(2024, 6, 15))
        .with_seller(seller())
        .with_buyer(buyer())
        .add_line_item(|l| {
            l.name("  Usługa  ")
                .unit("\tszt.")
                .net_amount(dec!(10))
                .vat_amount(dec!(2.30))
        })
        .build();
    let parsed = fa::from_xml(&fa::to_xml(&inv).unwrap()).unwrap();
    assert_eq!(parsed.body.lines[0].name, "  Usługa  ");
    assert_eq!(parsed.body.number, " FV/2024/06/003 ");
    assert_eq!(parsed, inv);
}

#[test]
fn padded_numbers_and_codes_still_parse() {
    let xml = fa::to_xml(&sample_invoice())
        .unwrap()
        .replace("<P_12>23</P_12>", "<P_12> 23 </P_12>")
        .replace("<P_15>377.00</P_15>", "<P_15>\n  377.00\n</P_15>")
        .replace("<KodWaluty>PLN</KodWaluty>", "<KodWaluty> PLN</KodWaluty>");
    let parsed = fa::parse_fa_xml(&xml).unwrap();
    assert_eq!(parsed.body.lines[0].vat_rate, VatRate::Rate23);
    assert_eq!(parsed.body.total_amount, dec!(377));
    assert_eq!(parsed.body.currency, CurrencyCode::Pln);
}

#[test]
fn graceful_failure_on_bad_input() {
    assert!(fa::from_xml("").is_none());
    assert!(fa::from_xml("<not-valid").is_none());
    assert!(fa::from_bytes(b"").is_none());
    assert!(fa::from_xml("<Other/>").is_none());
}

#[test]
fn strict_parse_reports_errors() {
    assert!(fa::parse_fa_xml("").is_err());
    let err = fa::parse_fa_xml("<Invoice></Invoice>").unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidDocument(_)));
}

#[test]
fn unknown_token_is_an_error() {
    let xml = fa::to_xml(&sample_invoice())
        .unwrap()
        .replace("<P_12>23</P_12>", "<P_12>17</P_12>");
    let err = fa::parse_fa_xml(&xml).unwrap_err();
    assert!(matches!(
        err,
        InvoiceError::UnknownCode { catalog: "VatRate", ref token } if token == "17"
    ));
    assert!(fa::from_xml(&xml).is_none());
}

#[test]
fn unknown_elements_are_ignored() {
    let xml = fa::to_xml(&sample_invoice())
        .unwrap()
        .replace("<P_2>", "<Nowy>x</Nowy><P_2>");
    let parsed = fa::from_xml(&xml).unwrap();
    assert_eq!(parsed.body.number, "FV/2024/06/001");
}

#[test]
fn minimal_document_uses_defaults() {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Faktura xmlns="{}">
  <Fa>
    <P_2>M/1</P_2>
  </Fa>
</Faktura>"#,
        fa::FA_NAMESPACE
    );
    let inv = fa::from_xml(&xml).unwrap();
    assert_eq!(inv.body.number, "M/1");
    assert_eq!(inv.body.currency, CurrencyCode::Pln);
    assert_eq!(inv.body.invoice_type, InvoiceType::Vat);
    assert!(inv.body.issue_date.is_none());
    assert!(inv.header.created_at.is_none());
    assert!(inv.seller.address.is_none());
}

#[test]
fn prefixed_elements_are_accepted() {
    let xml = format!(
        r#"<fa:Faktura xmlns:fa="{}"><fa:Fa><fa:P_2>P/1</fa:P_2><fa:P_15>10.00</fa:P_15></fa:Fa></fa:Faktura>"#,
        fa::FA_NAMESPACE
    );
    let inv = fa::from_xml(&xml).unwrap();
    assert_eq!(inv.body.number, "P/1");
    assert_eq!(inv.body.total_amount, dec!(10));
}

// --- Codec options ---

#[test]
fn validating_codec_rejects_incomplete_invoice() {
    let codec = FaCodec::with_options(FaOptions::new().validate_before_serialize(true));
    let err = codec.to_xml(&build_invoice().build()).unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidDocument(_)));
    assert!(codec.to_xml(&sample_invoice()).is_ok());
}

#[test]
fn default_codec_does_not_validate() {
    assert!(fa::to_xml(&build_invoice().build()).is_ok());
}

#[test]
fn validating_codec_accepts_sub_grosz_lines() {
    let inv = build_invoice()
        .number("FV/2024/06/004")
        .issue_date(date(2024, 6, 15))
        .with_seller(seller())
        .with_buyer(buyer())
        .add_line_item(|l| l.name("Zwolniona").net_amount(dec!(10.005)).vat_rate(VatRate::Exempt))
        .add_line_item(|l| l.name("Eksport").net_amount(dec!(10.005)).vat_rate(VatRate::ZeroExport))
        .build();
    let codec = FaCodec::with_options(FaOptions::new().validate_before_serialize(true));
    let xml = codec.to_xml(&inv).unwrap();
    assert!(xml.contains("<P_13_6_3>10.01</P_13_6_3>"));
    assert!(xml.contains("<P_13_7>10.01</P_13_7>"));
    assert!(xml.contains("<P_15>20.02</P_15>"));
}
