// Receipt export readers

pub mod csv;
pub mod source;
pub mod xlsx;

pub use source::{
    process_csv, process_csv_with, process_file, process_file_with, process_xlsx,
    process_xlsx_with, FileKind,
};
