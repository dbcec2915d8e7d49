use crate::model::{ReceiptAggregate, ReceiptReport, Report};

/// Turn finished aggregates into a report, skipping receipts with no
/// beer or bottle rows. Order follows the input.
pub fn build_report(aggregates: Vec<ReceiptAggregate>) -> Report {
    let mut receipts = Vec::with_capacity(aggregates.len());
    let mut mismatch_count = 0;

    for agg in aggregates {
        if agg.is_empty() {
            continue;
        }
        let bottles = agg.bottles().collect();
        let diff_ml = agg.bottle_total_ml - agg.beer_ml;
        let matched = diff_ml == 0;
        if !matched {
            mismatch_count += 1;
        }
        receipts.push(ReceiptReport {
            receipt_no: agg.receipt_no,
            issued_at: agg.issued_at,
            beer_ml: agg.beer_ml,
            bottles,
            bottle_total_ml: agg.bottle_total_ml,
            diff_ml,
            matched,
        });
    }

    Report {
        total_receipts: receipts.len(),
        mismatch_count,
        receipts,
    }
}
