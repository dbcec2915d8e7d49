use std::fmt;

/// Failure of a single quantity or size field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    /// No digit in the field at all.
    Empty,
    /// A character other than digits, one separator, spaces or tabs.
    Invalid(String),
    /// A count with a non-zero fractional part.
    NotWhole(String),
    /// A bottle size of zero liters.
    InvalidLiters,
    /// The value does not fit the 64-bit accumulator.
    Overflow(String),
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty value"),
            Self::Invalid(raw) => write!(f, "invalid number: {raw}"),
            Self::NotWhole(raw) => write!(f, "expected whole number, got {raw}"),
            Self::InvalidLiters => write!(f, "invalid liters value"),
            Self::Overflow(raw) => write!(f, "number too large: {raw}"),
        }
    }
}

impl std::error::Error for NumberError {}

/// Which field of a row failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    BeerQuantity,
    BottleSize,
    BottleQuantity,
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeerQuantity => write!(f, "beer quantity"),
            Self::BottleSize => write!(f, "bottle size"),
            Self::BottleQuantity => write!(f, "bottle quantity"),
        }
    }
}

#[derive(Debug)]
pub enum ReconError {
    /// Extension other than `.xlsx` / `.csv`.
    UnsupportedFileType(String),
    /// File could not be opened or read.
    Io(String),
    /// Workbook has no worksheet.
    NoSheets,
    /// Sheet or text stream has no header row.
    EmptySheet,
    /// Worksheet rows could not be opened.
    OpenRows(String),
    /// Header row could not be read.
    ReadHeader(String),
    /// A data row could not be read (1-based row number, header is row 1).
    ReadRow { row: usize, message: String },
    /// Canonical names of every required column that was not found.
    MissingColumns(Vec<String>),
    /// A quantity or bottle size failed to parse.
    InvalidField {
        row: usize,
        field: RowField,
        source: NumberError,
    },
}

impl ReconError {
    /// Row number for row-level failures.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::ReadRow { row, .. } | Self::InvalidField { row, .. } => Some(*row),
            _ => None,
        }
    }
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFileType(ext) => write!(f, "unsupported file type: {ext}"),
            Self::Io(msg) => write!(f, "open file: {msg}"),
            Self::NoSheets => write!(f, "no sheets found"),
            Self::EmptySheet => write!(f, "empty sheet"),
            Self::OpenRows(msg) => write!(f, "open rows: {msg}"),
            Self::ReadHeader(msg) => write!(f, "read header: {msg}"),
            Self::ReadRow { row, message } => write!(f, "read row {row}: {message}"),
            Self::MissingColumns(names) => {
                write!(f, "missing required columns: {}", names.join(", "))
            }
            Self::InvalidField { row, field, source } => {
                write!(f, "row {row}: invalid {field}: {source}")
            }
        }
    }
}

impl std::error::Error for ReconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidField { source, .. } => Some(source),
            _ => None,
        }
    }
}
