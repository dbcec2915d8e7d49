use serde::{Deserialize, Serialize};

use crate::classify::eq_fold;
use crate::error::ReconError;

/// Logical columns the engine needs from every export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Receipt,
    Category,
    Product,
    IssuedAt,
    Quantity,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Receipt,
        Column::Category,
        Column::Product,
        Column::IssuedAt,
        Column::Quantity,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Receipt => "Receipt document number",
            Self::Category => "Category",
            Self::Product => "Product",
            Self::IssuedAt => "Issue date",
            Self::Quantity => "Quantity sold",
        }
    }

    /// Header text used by the Czech point-of-sale export.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::Receipt => "Číslo daňového dokladu",
            Self::Category => "Kategorie",
            Self::Product => "Produkt",
            Self::IssuedAt => "Datum vystavení",
            Self::Quantity => "Prodané množství",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Accepted header texts per column. The first entry of each list is the
/// name reported when the column is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderNames {
    pub receipt: Vec<String>,
    pub category: Vec<String>,
    pub product: Vec<String>,
    pub issued_at: Vec<String>,
    pub quantity: Vec<String>,
}

impl Default for HeaderNames {
    fn default() -> Self {
        let both = |c: Column| vec![c.canonical_name().to_string(), c.native_name().to_string()];
        Self {
            receipt: both(Column::Receipt),
            category: both(Column::Category),
            product: both(Column::Product),
            issued_at: both(Column::IssuedAt),
            quantity: both(Column::Quantity),
        }
    }
}

impl HeaderNames {
    pub fn names(&self, column: Column) -> &[String] {
        match column {
            Column::Receipt => &self.receipt,
            Column::Category => &self.category,
            Column::Product => &self.product,
            Column::IssuedAt => &self.issued_at,
            Column::Quantity => &self.quantity,
        }
    }

    fn display_name(&self, column: Column) -> String {
        self.names(column)
            .first()
            .cloned()
            .unwrap_or_else(|| column.canonical_name().to_string())
    }

    fn matches(&self, column: Column, header: &str) -> bool {
        self.names(column).iter().any(|name| eq_fold(header, name.trim()))
    }
}

/// Zero-based positions of the required columns in one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub receipt: usize,
    pub category: usize,
    pub product: usize,
    pub issued_at: usize,
    pub quantity: usize,
}

/// Trim surrounding whitespace and a leading byte-order mark.
pub fn normalize_header(raw: &str) -> &str {
    let header = raw.trim();
    header.strip_prefix('\u{feff}').unwrap_or(header).trim()
}

/// Resolve every required column; reports all missing ones at once.
pub fn map_headers(header_row: &[String], names: &HeaderNames) -> Result<ColumnIndex, ReconError> {
    let mut found: [Option<usize>; 5] = [None; 5];

    for (i, raw) in header_row.iter().enumerate() {
        let header = normalize_header(raw);
        if let Some(slot) = Column::ALL.iter().position(|&c| names.matches(c, header)) {
            found[slot] = Some(i);
        }
    }

    let missing: Vec<String> = Column::ALL
        .iter()
        .zip(found.iter())
        .filter(|(_, pos)| pos.is_none())
        .map(|(&c, _)| names.display_name(c))
        .collect();

    match found {
        [Some(receipt), Some(category), Some(product), Some(issued_at), Some(quantity)] => {
            Ok(ColumnIndex {
                receipt,
                category,
                product,
                issued_at,
                quantity,
            })
        }
        _ => Err(ReconError::MissingColumns(missing)),
    }
}

/// Cell at `idx`, or `""` when the row is shorter than the header.
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}
