// CSV receipt exports

use std::io::Cursor;
use std::path::Path;

use tapcheck_recon::{RawRow, ReconError, RowSource};

/// Delimited text opened as a [`RowSource`]. The first record is the header.
pub struct CsvSource {
    header: Vec<String>,
    records: csv::StringRecordsIntoIter<Cursor<Vec<u8>>>,
    row: usize,
}

impl CsvSource {
    pub fn open(path: &Path) -> Result<Self, ReconError> {
        let content = read_file_as_utf8(path)?;
        Self::from_string(content)
    }

    pub fn from_string(content: String) -> Result<Self, ReconError> {
        let delimiter = detect_delimiter(first_line(&content));
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(content.into_bytes()));

        let mut records = reader.into_records();
        let header = match records.next() {
            None => return Err(ReconError::EmptySheet),
            Some(Err(e)) => return Err(ReconError::ReadHeader(e.to_string())),
            Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        };

        Ok(Self {
            header,
            records,
            row: 1,
        })
    }
}

impl Iterator for CsvSource {
    type Item = Result<RawRow, ReconError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.records.next()?;
        self.row += 1;
        Some(match result {
            Ok(record) => Ok(record.iter().map(str::to_string).collect()),
            Err(e) => Err(ReconError::ReadRow {
                row: self.row,
                message: e.to_string(),
            }),
        })
    }
}

impl RowSource for CsvSource {
    fn header(&self) -> &[String] {
        &self.header
    }

    fn row_number(&self) -> usize {
        self.row
    }
}

fn first_line(content: &str) -> &str {
    content.split('\n').next().unwrap_or("")
}

/// Pick the field delimiter from a single line.
///
/// Counts `,` `;` and tab outside of quoted spans. Semicolon wins when it
/// beats comma and is not below tab; tab wins when it beats both; comma
/// otherwise.
pub fn detect_delimiter(line: &str) -> u8 {
    let (mut comma, mut semi, mut tab) = (0usize, 0usize, 0usize);
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                // "" inside a quoted span is a literal quote
                if in_quotes && chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            _ if in_quotes => {}
            ',' => comma += 1,
            ';' => semi += 1,
            '\t' => tab += 1,
            _ => {}
        }
    }

    if semi > comma && semi >= tab {
        b';'
    } else if tab > comma && tab > semi {
        b'\t'
    } else {
        b','
    }
}

/// Read file and convert to UTF-8 if needed. Non-UTF-8 input is taken to be
/// Windows-1250, the usual encoding of Czech POS exports.
pub fn read_file_as_utf8(path: &Path) -> Result<String, ReconError> {
    let bytes = std::fs::read(path).map_err(|e| ReconError::Io(e.to_string()))?;
    Ok(decode_bytes(bytes))
}

fn decode_bytes(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1250.decode(&bytes);
            decoded.into_owned()
        }
    }
}
