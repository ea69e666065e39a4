use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::codes::VatRate;
use super::format::round_amount;
use super::types::*;

/// Derive the summary buckets and `P_15` from the body's line items.
///
/// Lines carrying neither a net nor a gross amount are skipped. The VAT of a
/// line is taken from its own `vat_amount`, never recomputed from the rate.
/// Legacy rates accumulate into the bucket of their modern counterpart.
/// Reverse charge and both "not subject" rates share `P_13_8`.
///
/// Every bucket a line maps to is rounded half away from zero, and
/// `total_amount` is overwritten with the sum of those rounded buckets, so
/// `P_15` always agrees with the buckets written next to it. Buckets no line
/// maps to keep their previous value. Sums saturate at the `Decimal` range
/// instead of overflowing.
pub fn aggregate_vat(body: &mut InvoiceBody) {
    let mut groups: HashMap<VatRate, (Decimal, Decimal)> = HashMap::new();

    for line in &body.lines {
        let vat = line.vat_amount.unwrap_or(Decimal::ZERO);
        let net = match (line.net_amount, line.gross_amount) {
            (Some(net), _) => net,
            (None, Some(gross)) => gross.saturating_sub(vat),
            (None, None) => continue,
        };
        let entry = groups
            .entry(bucket_key(line.vat_rate))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 = entry.0.saturating_add(net);
        entry.1 = entry.1.saturating_add(vat);
    }

    let summary = &mut body.summary;
    let mut total = Decimal::ZERO;

    // Walk the catalog so routing order is stable across runs.
    for (rate, _) in VatRate::ALL {
        let Some(&(net, vat)) = groups.get(rate) else {
            continue;
        };
        trace!(rate = %rate, %net, %vat, "routing VAT group");

        let (net_bucket, mut vat_bucket) = buckets_for(summary, *rate);
        debug_assert_eq!(vat_bucket.is_some(), rate.is_taxed());
        // 5% has no legacy sibling, so its bucket is assigned outright.
        if *rate == VatRate::Rate5 {
            *net_bucket = None;
            if let Some(v) = vat_bucket.as_mut() {
                **v = None;
            }
        }
        total = total.saturating_add(merge(net_bucket, net));
        if let Some(vat_bucket) = vat_bucket {
            total = total.saturating_add(merge(vat_bucket, vat));
        }
    }

    body.total_amount = round_amount(total);
    debug!(
        groups = groups.len(),
        total = %body.total_amount,
        "aggregated VAT summary"
    );
}

/// One representative rate per summary bucket: legacy rates fold into their
/// modern counterpart and the untaxed rates into reverse charge.
fn bucket_key(rate: VatRate) -> VatRate {
    match rate.modern_equivalent() {
        VatRate::NotSubjectI | VatRate::NotSubjectII => VatRate::ReverseCharge,
        other => other,
    }
}

/// The net bucket of a rate, plus its VAT bucket when the rate is taxed.
fn buckets_for(
    summary: &mut VatSummary,
    rate: VatRate,
) -> (&mut Option<Decimal>, Option<&mut Option<Decimal>>) {
    match rate {
        VatRate::Rate23 | VatRate::Rate22 => (&mut summary.net_23, Some(&mut summary.vat_23)),
        VatRate::Rate8 | VatRate::Rate7 => (&mut summary.net_8, Some(&mut summary.vat_8)),
        VatRate::Rate5 => (&mut summary.net_5, Some(&mut summary.vat_5)),
        VatRate::Rate4 | VatRate::Rate3 => (&mut summary.net_4, Some(&mut summary.vat_4)),
        VatRate::ZeroDomestic => (&mut summary.net_zero_domestic, None),
        VatRate::ZeroIntraCommunity => (&mut summary.net_zero_intra_community, None),
        VatRate::ZeroExport => (&mut summary.net_zero_export, None),
        VatRate::Exempt => (&mut summary.net_exempt, None),
        VatRate::ReverseCharge | VatRate::NotSubjectI | VatRate::NotSubjectII => {
            (&mut summary.net_not_taxable, None)
        }
    }
}

/// Additive merge into a bucket that may be unset or already hold a sum.
/// Returns the rounded bucket value now stored.
fn merge(bucket: &mut Option<Decimal>, amount: Decimal) -> Decimal {
    let merged = round_amount(bucket.unwrap_or(Decimal::ZERO).saturating_add(amount));
    *bucket = Some(merged);
    merged
}
