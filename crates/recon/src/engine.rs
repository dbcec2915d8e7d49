use crate::aggregate::Aggregator;
use crate::columns::{map_headers, HeaderNames};
use crate::error::ReconError;
use crate::model::{RawRow, Report};
use crate::report::build_report;

/// A header row followed by data rows, read lazily.
///
/// Rows are yielded in file order; a source is consumed once and has to be
/// reopened to read again. Row errors carry their own row number.
pub trait RowSource: Iterator<Item = Result<RawRow, ReconError>> {
    fn header(&self) -> &[String];

    /// 1-based row in the underlying file of the row last yielded.
    fn row_number(&self) -> usize;
}

/// Rows already held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    header: Vec<String>,
    rows: std::vec::IntoIter<RawRow>,
    row: usize,
}

impl MemorySource {
    pub fn new(header: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self {
            header,
            rows: rows.into_iter(),
            row: 1,
        }
    }
}

impl Iterator for MemorySource {
    type Item = Result<RawRow, ReconError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        self.row += 1;
        Some(Ok(row))
    }
}

impl RowSource for MemorySource {
    fn header(&self) -> &[String] {
        &self.header
    }

    fn row_number(&self) -> usize {
        self.row
    }
}

/// Reconcile one file's rows. Any bad row aborts the whole run.
pub fn reconcile<S: RowSource>(mut source: S, names: &HeaderNames) -> Result<Report, ReconError> {
    let columns = map_headers(source.header(), names)?;
    let mut aggregator = Aggregator::new(columns);

    while let Some(row) = source.next() {
        aggregator.push_row(&row?, source.row_number())?;
    }

    Ok(build_report(aggregator.finish()))
}
