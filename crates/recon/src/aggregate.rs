use std::collections::HashMap;

use crate::classify::{is_beer_category, is_bottle_row};
use crate::columns::{cell, ColumnIndex};
use crate::error::{ReconError, RowField};
use crate::model::ReceiptAggregate;
use crate::numeric::{bottle_size_ml, parse_decimal_to_milli, parse_whole_count};

/// Folds rows into per-receipt totals.
///
/// `receipts` is the first-seen order; `by_receipt` only indexes into it.
#[derive(Debug)]
pub struct Aggregator {
    columns: ColumnIndex,
    receipts: Vec<ReceiptAggregate>,
    by_receipt: HashMap<String, usize>,
}

impl Aggregator {
    pub fn new(columns: ColumnIndex) -> Self {
        Self {
            columns,
            receipts: Vec::with_capacity(256),
            by_receipt: HashMap::new(),
        }
    }

    /// Add one data row. `row_num` is the 1-based row in the source file.
    pub fn push_row(&mut self, row: &[String], row_num: usize) -> Result<(), ReconError> {
        let receipt_no = cell(row, self.columns.receipt).trim();
        if receipt_no.is_empty() {
            return Ok(());
        }

        let category = cell(row, self.columns.category).trim();
        let product = cell(row, self.columns.product).trim();
        let issued_at = cell(row, self.columns.issued_at).trim();
        let quantity = cell(row, self.columns.quantity).trim();

        let agg = self.receipt_mut(receipt_no);
        if agg.issued_at.is_none() && !issued_at.is_empty() {
            agg.issued_at = Some(issued_at.to_string());
        }

        if is_beer_category(category) {
            let ml = parse_decimal_to_milli(quantity)
                .map_err(|source| field_error(row_num, RowField::BeerQuantity, source))?;
            agg.add_beer(ml)
                .ok_or_else(|| overflow(row_num, RowField::BeerQuantity, quantity))?;
        }

        if is_bottle_row(category, product) {
            let size = bottle_size_ml(product)
                .map_err(|source| field_error(row_num, RowField::BottleSize, source))?;
            // Labels without a liters marker are not bottles we can size.
            if let Some(size_ml) = size {
                let count = parse_whole_count(quantity)
                    .map_err(|source| field_error(row_num, RowField::BottleQuantity, source))?;
                agg.add_bottles(size_ml, count)
                    .ok_or_else(|| overflow(row_num, RowField::BottleQuantity, quantity))?;
            }
        }

        Ok(())
    }

    fn receipt_mut(&mut self, receipt_no: &str) -> &mut ReceiptAggregate {
        let idx = match self.by_receipt.get(receipt_no) {
            Some(&idx) => idx,
            None => {
                self.receipts.push(ReceiptAggregate::new(receipt_no));
                let idx = self.receipts.len() - 1;
                self.by_receipt.insert(receipt_no.to_string(), idx);
                idx
            }
        };
        &mut self.receipts[idx]
    }

    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }

    /// Finished aggregates in first-seen order.
    pub fn finish(self) -> Vec<ReceiptAggregate> {
        self.receipts
    }
}

fn field_error(row: usize, field: RowField, source: crate::error::NumberError) -> ReconError {
    ReconError::InvalidField { row, field, source }
}

fn overflow(row: usize, field: RowField, quantity: &str) -> ReconError {
    field_error(row, field, crate::error::NumberError::Overflow(quantity.to_string()))
}
