//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain     | Description                                  |
//! |---------|------------|----------------------------------------------|
//! | 0       | Universal  | Success (every receipt matches)              |
//! | 1       | Universal  | Mismatches found                             |
//! | 2       | Universal  | CLI usage error (bad args)                   |
//! | 3-9     | check      | File could not be processed                  |
//! | 10-19   | config     | Settings file problems                       |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use tapcheck_recon::ReconError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - every receipt balanced (or there was nothing to check).
pub const EXIT_SUCCESS: u8 = 0;

/// At least one receipt's bottle volume differs from its beer volume.
/// Like `diff(1)`, exit 1 means "totals differ."
pub const EXIT_MISMATCH: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// clap exits with this code itself; listed to keep the registry complete.
#[allow(dead_code)]
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Check (3-9)
// =============================================================================

/// Extension other than .xlsx / .csv.
pub const EXIT_CHECK_UNSUPPORTED: u8 = 3;

/// File is larger than `max_file_bytes`.
pub const EXIT_CHECK_TOO_LARGE: u8 = 4;

/// File could not be opened or its rows could not be read.
pub const EXIT_CHECK_READ: u8 = 5;

/// Header row lacks one or more required columns.
pub const EXIT_CHECK_COLUMNS: u8 = 6;

/// A quantity or bottle label failed to parse.
pub const EXIT_CHECK_ROW: u8 = 7;

/// Processing did not finish within `timeout_secs`.
pub const EXIT_CHECK_TIMEOUT: u8 = 8;

/// Report could not be rendered (JSON serialization).
pub const EXIT_CHECK_OUTPUT: u8 = 9;

// =============================================================================
// Config (10-19)
// =============================================================================

/// Settings file exists but cannot be read or parsed.
pub const EXIT_CONFIG_INVALID: u8 = 10;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::UnsupportedFileType(_) => EXIT_CHECK_UNSUPPORTED,
        ReconError::Io(_)
        | ReconError::NoSheets
        | ReconError::EmptySheet
        | ReconError::OpenRows(_)
        | ReconError::ReadHeader(_)
        | ReconError::ReadRow { .. } => EXIT_CHECK_READ,
        ReconError::MissingColumns(_) => EXIT_CHECK_COLUMNS,
        ReconError::InvalidField { .. } => EXIT_CHECK_ROW,
    }
}
