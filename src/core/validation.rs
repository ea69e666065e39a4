use rust_decimal::Decimal;

use super::error::{ValidationError, ValidationResult};
use super::format::{is_valid_nip, round_amount};
use super::types::*;

/// Check an invoice for the business rules the builder and codec leave open.
/// Returns all validation errors found (not just the first).
pub fn validate(invoice: &Invoice) -> ValidationResult {
    let mut errors = Vec::new();
    let body = &invoice.body;

    if body.number.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "body.number",
            "invoice number (P_2) must not be empty",
            "FA-01",
        ));
    }

    if body.issue_date.is_none() {
        errors.push(ValidationError::with_rule(
            "body.issue_date",
            "issue date (P_1) is required",
            "FA-02",
        ));
    }

    validate_seller(&invoice.seller, &mut errors);
    validate_buyer(&invoice.buyer, &mut errors);

    if body.sale_date.is_some() && body.sale_period.is_some() {
        errors.push(ValidationError::with_rule(
            "body.sale_date",
            "sale date (P_6) and sale period (OkresFa) are mutually exclusive",
            "FA-06",
        ));
    }

    if let Some(period) = &body.sale_period {
        if period.from > period.to {
            errors.push(ValidationError::with_rule(
                "body.sale_period",
                format!("period starts after it ends ({} > {})", period.from, period.to),
                "FA-06",
            ));
        }
    }

    if invoice.is_correction() {
        if body
            .correction_reason
            .as_deref()
            .is_none_or(|r| r.trim().is_empty())
        {
            errors.push(ValidationError::with_rule(
                "body.correction_reason",
                "correction invoices must state a reason",
                "FA-KOR-01",
            ));
        }
        if body.corrected_invoices.is_empty() {
            errors.push(ValidationError::with_rule(
                "body.corrected_invoices",
                "correction invoices must reference the corrected invoice",
                "FA-KOR-02",
            ));
        }
    }

    validate_lines(&body.lines, &mut errors);

    let expected = bucket_total(&body.summary);
    if round_amount(expected) != round_amount(body.total_amount) {
        errors.push(ValidationError::with_rule(
            "body.total_amount",
            format!(
                "total amount (P_15) {} does not match summary buckets {}",
                body.total_amount,
                round_amount(expected)
            ),
            "FA-15",
        ));
    }

    ValidationResult { errors }
}

fn validate_seller(seller: &Party, errors: &mut Vec<ValidationError>) {
    match seller.identification.nip.as_deref() {
        None | Some("") => errors.push(ValidationError::with_rule(
            "seller.identification.nip",
            "seller NIP is required",
            "FA-P1-01",
        )),
        Some(nip) if !is_valid_nip(nip) => errors.push(ValidationError::with_rule(
            "seller.identification.nip",
            format!("seller NIP '{nip}' fails the checksum"),
            "FA-P1-02",
        )),
        Some(_) => {}
    }

    if seller
        .identification
        .name
        .as_deref()
        .is_none_or(|n| n.trim().is_empty())
    {
        errors.push(ValidationError::with_rule(
            "seller.identification.name",
            "seller name is required",
            "FA-P1-03",
        ));
    }

    if seller.address.is_none() {
        errors.push(ValidationError::with_rule(
            "seller.address",
            "seller address is required",
            "FA-P1-04",
        ));
    }
}

fn validate_buyer(buyer: &Party, errors: &mut Vec<ValidationError>) {
    let id = &buyer.identification;
    let identified = id.nip.is_some()
        || (id.eu_code.is_some() && id.eu_vat_number.is_some())
        || id.other_id.is_some()
        || id.no_id;
    if !identified {
        errors.push(ValidationError::with_rule(
            "buyer.identification",
            "buyer needs a NIP, an EU VAT number, another identifier, or BrakID",
            "FA-P2-01",
        ));
    }

    if let Some(nip) = &id.nip {
        if !is_valid_nip(nip) {
            errors.push(ValidationError::with_rule(
                "buyer.identification.nip",
                format!("buyer NIP '{nip}' fails the checksum"),
                "FA-P2-02",
            ));
        }
    }
}

fn validate_lines(lines: &[LineItem], errors: &mut Vec<ValidationError>) {
    for (i, line) in lines.iter().enumerate() {
        let expected = i as u32 + 1;
        if line.number != expected {
            errors.push(ValidationError::with_rule(
                format!("body.lines[{i}].number"),
                format!("expected line number {expected}, found {}", line.number),
                "FA-W-01",
            ));
        }
        if line.name.trim().is_empty() {
            errors.push(ValidationError::with_rule(
                format!("body.lines[{i}].name"),
                "product name (P_7) must not be empty",
                "FA-W-02",
            ));
        }
        if line.unit_net_price.is_some() && line.unit_gross_price.is_some() {
            errors.push(ValidationError::with_rule(
                format!("body.lines[{i}].unit_net_price"),
                "net and gross unit price are mutually exclusive",
                "FA-W-03",
            ));
        }
        if line.net_amount.is_some() && line.gross_amount.is_some() {
            errors.push(ValidationError::with_rule(
                format!("body.lines[{i}].net_amount"),
                "net and gross amount are mutually exclusive",
                "FA-W-04",
            ));
        }
    }
}

/// Net + VAT for taxed buckets, net alone for the rest.
fn bucket_total(summary: &VatSummary) -> Decimal {
    summary.total_net().saturating_add(summary.total_vat())
}
