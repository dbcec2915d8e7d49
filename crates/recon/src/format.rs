//! Plain-text rendering of a [`Report`].

use crate::model::{BottleLine, ReceiptReport, Report};
use crate::phrases::{match_phrase, mismatch_phrase, snark_phrase, PhraseSource, RandomPhrases};

/// Upper bound for the summary, in bytes. Chat transports reject longer
/// messages.
pub const DEFAULT_MESSAGE_BUDGET: usize = 3900;

const TRUNCATION_MARKER: &str = "...truncated";

/// `1500` -> `"1.50L"`
pub fn format_liters(ml: i64) -> String {
    format!("{:.2}L", ml as f64 / 1000.0)
}

fn format_liters_unsigned(ml: u64) -> String {
    format!("{:.2}L", ml as f64 / 1000.0)
}

/// Signed difference, `+` for zero as well.
pub fn format_diff(diff_ml: i64) -> String {
    let sign = if diff_ml < 0 { '-' } else { '+' };
    format!("{sign}{}", format_liters_unsigned(diff_ml.unsigned_abs()))
}

/// `"0.50L x2, 1.00L x1"`, or `"-"` when there are no bottles.
pub fn format_bottle_list(bottles: &[BottleLine]) -> String {
    if bottles.is_empty() {
        return "-".to_string();
    }
    bottles
        .iter()
        .map(|line| format!("{} x{}", format_liters(line.size_ml), line.count))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_mismatch_card(rec: &ReceiptReport) -> String {
    format!(
        "===== Receipt {} =====\nTime: {}\nTotal beer: {}\nTotal bottles: {}\nDifference: {}\nBottles: {}\n\n",
        rec.receipt_no,
        rec.issued_at.as_deref().unwrap_or("-"),
        format_liters(rec.beer_ml),
        format_liters(rec.bottle_total_ml),
        format_diff(rec.diff_ml),
        format_bottle_list(&rec.bottles),
    )
}

/// Summary text. Mismatch cards stop once the next one would push the text
/// past `budget` bytes.
pub fn format_summary(report: &Report, budget: usize, phrases: &mut dyn PhraseSource) -> String {
    if report.receipts.is_empty() {
        return "No matching beer/PET rows found.".to_string();
    }

    if report.mismatch_count == 0 {
        return format!(
            "{}\nChecked {} receipts. All beer vs bottles match.",
            match_phrase(phrases),
            report.total_receipts
        );
    }

    let mut out = format!(
        "Checked {} receipts. Found {} mismatches.\n",
        report.total_receipts, report.mismatch_count
    );

    for rec in report.mismatches() {
        let card = format_mismatch_card(rec);
        if out.len() + card.len() > budget {
            out.push_str(TRUNCATION_MARKER);
            break;
        }
        out.push_str(&card);
    }

    out.trim().to_string()
}

/// Extra line for reports with mismatches; empty otherwise.
pub fn format_snark(report: &Report, phrases: &mut dyn PhraseSource) -> String {
    if report.mismatch_count == 0 {
        return String::new();
    }
    let headline = mismatch_phrase(phrases);
    format!("{headline}\n{}", snark_phrase(phrases, false))
}

impl Report {
    pub fn format_text(&self) -> String {
        self.format_text_with(DEFAULT_MESSAGE_BUDGET, &mut RandomPhrases::new())
    }

    pub fn format_text_with(&self, budget: usize, phrases: &mut dyn PhraseSource) -> String {
        format_summary(self, budget, phrases)
    }

    pub fn mismatch_snark_text(&self) -> String {
        self.mismatch_snark_text_with(&mut RandomPhrases::new())
    }

    pub fn mismatch_snark_text_with(&self, phrases: &mut dyn PhraseSource) -> String {
        format_snark(self, phrases)
    }
}
