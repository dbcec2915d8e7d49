//! `tapcheck-recon`: draft beer vs. PET bottle reconciliation engine.
//!
//! Pure engine crate: receives header and rows through [`RowSource`],
//! returns a [`Report`]. File formats live in `tapcheck-io`.

pub mod aggregate;
pub mod classify;
pub mod columns;
pub mod engine;
pub mod error;
pub mod format;
pub mod model;
pub mod numeric;
pub mod phrases;
pub mod report;

pub use columns::{Column, ColumnIndex, HeaderNames};
pub use engine::{reconcile, MemorySource, RowSource};
pub use error::{NumberError, ReconError, RowField};
pub use format::DEFAULT_MESSAGE_BUDGET;
pub use model::{BottleLine, RawRow, ReceiptReport, Report};
pub use phrases::{FixedPhrase, PhraseSource, RandomPhrases};
