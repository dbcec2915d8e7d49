// Excel receipt exports (first worksheet only)

use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::{NaiveDateTime, Timelike};

use tapcheck_recon::{RawRow, ReconError, RowSource};

/// First worksheet of a workbook opened as a [`RowSource`].
///
/// The used range is read up front; rows are rendered to text as they are
/// pulled. Leading empty rows and columns outside the used range are not
/// part of the table.
pub struct XlsxSource {
    header: Vec<String>,
    range: Range<Data>,
    next: usize,
    first_row: usize,
}

impl XlsxSource {
    pub fn open(path: &Path) -> Result<Self, ReconError> {
        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e| ReconError::Io(format!("{}", e)))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(ReconError::NoSheets)?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ReconError::OpenRows(format!("sheet '{}': {}", sheet_name, e)))?;

        Self::from_range(range)
    }

    pub fn from_range(range: Range<Data>) -> Result<Self, ReconError> {
        let (height, width) = range.get_size();
        if height == 0 || width == 0 {
            return Err(ReconError::EmptySheet);
        }

        // Range start offset (data may not begin at A1)
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

        let mut source = Self {
            header: Vec::new(),
            range,
            next: 0,
            first_row,
        };
        source.header = source.render_row(0);
        source.next = 1;
        Ok(source)
    }

    fn render_row(&self, row: usize) -> RawRow {
        let (_, width) = self.range.get_size();
        (0..width)
            .map(|col| self.range.get((row, col)).map(cell_text).unwrap_or_default())
            .collect()
    }
}

impl Iterator for XlsxSource {
    type Item = Result<RawRow, ReconError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (height, _) = self.range.get_size();
        if self.next >= height {
            return None;
        }
        let row = self.render_row(self.next);
        self.next += 1;
        Some(Ok(row))
    }
}

impl RowSource for XlsxSource {
    fn header(&self) -> &[String] {
        &self.header
    }

    /// Sheet row, counted from row 1 even when the used range starts lower.
    fn row_number(&self) -> usize {
        self.first_row + self.next
    }
}

/// Text of one cell, as the receipt parser expects it.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Format nicely: integers without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => format_datetime(&value),
            None => format!("{}", dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

fn format_datetime(value: &NaiveDateTime) -> String {
    if value.time().num_seconds_from_midnight() == 0 {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
