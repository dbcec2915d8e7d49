use std::collections::HashMap;

use serde::Serialize;

/// One data row, positionally aligned to the header row.
pub type RawRow = Vec<String>;

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Running totals for one receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptAggregate {
    pub receipt_no: String,
    pub issued_at: Option<String>,
    pub beer_ml: i64,
    pub bottle_by_ml: HashMap<i64, i64>,
    /// Distinct bottle sizes in first-seen order.
    pub bottle_order: Vec<i64>,
    pub bottle_total_ml: i64,
}

impl ReceiptAggregate {
    pub fn new(receipt_no: impl Into<String>) -> Self {
        Self {
            receipt_no: receipt_no.into(),
            issued_at: None,
            beer_ml: 0,
            bottle_by_ml: HashMap::new(),
            bottle_order: Vec::new(),
            bottle_total_ml: 0,
        }
    }

    /// `None` when the total would overflow; the aggregate is left unchanged.
    pub fn add_beer(&mut self, ml: i64) -> Option<()> {
        self.beer_ml = self.beer_ml.checked_add(ml)?;
        Some(())
    }

    /// `None` when a count or the volume total would overflow; the aggregate
    /// is left unchanged.
    pub fn add_bottles(&mut self, size_ml: i64, count: i64) -> Option<()> {
        let seen = self.bottle_by_ml.get(&size_ml).copied();
        let new_count = seen.unwrap_or(0).checked_add(count)?;
        let total = size_ml
            .checked_mul(count)
            .and_then(|ml| self.bottle_total_ml.checked_add(ml))?;

        if seen.is_none() {
            self.bottle_order.push(size_ml);
        }
        self.bottle_by_ml.insert(size_ml, new_count);
        self.bottle_total_ml = total;
        Some(())
    }

    /// No beer and no bottle rows were seen.
    pub fn is_empty(&self) -> bool {
        self.beer_ml == 0 && self.bottle_total_ml == 0 && self.bottle_by_ml.is_empty()
    }

    /// Bottle sizes with their counts, in first-seen order.
    pub fn bottles(&self) -> impl Iterator<Item = BottleLine> + '_ {
        self.bottle_order.iter().map(|&size_ml| BottleLine {
            size_ml,
            count: self.bottle_by_ml.get(&size_ml).copied().unwrap_or(0),
        })
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BottleLine {
    pub size_ml: i64,
    pub count: i64,
}

/// Final figures for one receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptReport {
    pub receipt_no: String,
    pub issued_at: Option<String>,
    pub beer_ml: i64,
    pub bottles: Vec<BottleLine>,
    pub bottle_total_ml: i64,
    /// `bottle_total_ml - beer_ml`
    pub diff_ml: i64,
    pub matched: bool,
}

impl ReceiptReport {
    pub fn bottle_count(&self, size_ml: i64) -> Option<i64> {
        self.bottles
            .iter()
            .find(|line| line.size_ml == size_ml)
            .map(|line| line.count)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub receipts: Vec<ReceiptReport>,
    pub total_receipts: usize,
    pub mismatch_count: usize,
}

impl Report {
    pub fn mismatches(&self) -> impl Iterator<Item = &ReceiptReport> {
        self.receipts.iter().filter(|r| !r.matched)
    }

    pub fn receipt(&self, receipt_no: &str) -> Option<&ReceiptReport> {
        self.receipts.iter().find(|r| r.receipt_no == receipt_no)
    }
}
