//! `tapcheck check`: reconcile one receipt export.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tapcheck_config::Settings;
use tapcheck_io::{process_file_with, FileKind};
use tapcheck_recon::{HeaderNames, RandomPhrases, ReconError, Report};
use tracing::{debug, error, info};

use crate::exit_codes::{
    recon_exit_code, EXIT_CHECK_READ, EXIT_CHECK_TIMEOUT, EXIT_CHECK_TOO_LARGE, EXIT_CHECK_OUTPUT,
    EXIT_MISMATCH,
};
use crate::CliError;

/// Shown instead of engine error details; the details go to the log.
pub const PROCESS_FAILED: &str = "Failed to process the file.";

pub struct CheckOptions {
    pub file: PathBuf,
    pub json: bool,
    pub no_snark: bool,
    pub budget: Option<usize>,
}

pub fn cmd_check(opts: CheckOptions, settings: &Settings) -> Result<(), CliError> {
    let file = opts.file;

    FileKind::from_path(&file).map_err(|e| {
        CliError::new(recon_exit_code(&e), e.to_string()).with_hint("pass a .xlsx or .csv file")
    })?;
    check_size(&file, settings.max_file_bytes)?;

    let started = Instant::now();
    let report = run_with_timeout(&file, &settings.columns, settings.timeout_secs)?;
    info!(
        file = %file.display(),
        receipts = report.total_receipts,
        mismatches = report.mismatch_count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "file checked"
    );

    if opts.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::new(EXIT_CHECK_OUTPUT, format!("JSON serialization error: {e}")))?;
        println!("{json}");
    } else {
        let budget = opts.budget.unwrap_or(settings.message_budget);
        let mut phrases = RandomPhrases::new();
        println!("{}", report.format_text_with(budget, &mut phrases));
        if !opts.no_snark && report.mismatch_count > 0 {
            println!();
            println!("{}", report.mismatch_snark_text_with(&mut phrases));
        }
    }

    if report.mismatch_count > 0 {
        return Err(CliError::new(EXIT_MISMATCH, String::new()));
    }
    Ok(())
}

fn check_size(file: &Path, max_bytes: u64) -> Result<(), CliError> {
    let meta = std::fs::metadata(file).map_err(|e| {
        error!(file = %file.display(), error = %e, "cannot stat file");
        CliError::new(EXIT_CHECK_READ, PROCESS_FAILED)
    })?;

    let size = meta.len();
    debug!(file = %file.display(), size, max_bytes, "size check");
    if size > max_bytes {
        return Err(CliError::new(EXIT_CHECK_TOO_LARGE, too_large_message(size, max_bytes))
            .with_hint("raise max_file_bytes in settings.toml"));
    }
    Ok(())
}

pub fn too_large_message(size: u64, max_bytes: u64) -> String {
    format!("file is too large ({size} bytes). Max allowed is {max_bytes} bytes.")
}

/// Run the engine on a worker thread. `timeout_secs == 0` waits forever.
fn run_with_timeout(
    file: &Path,
    names: &HeaderNames,
    timeout_secs: u64,
) -> Result<Report, CliError> {
    let (tx, rx) = mpsc::channel();
    let path = file.to_path_buf();
    let names = names.clone();
    thread::Builder::new()
        .name("tapcheck-worker".into())
        .spawn(move || {
            // Receiver may be gone after a timeout.
            let _ = tx.send(process_file_with(&path, &names));
        })
        .map_err(|e| CliError::new(EXIT_CHECK_READ, format!("cannot start worker: {e}")))?;

    let outcome = if timeout_secs == 0 {
        rx.recv().map_err(|_| mpsc::RecvTimeoutError::Disconnected)
    } else {
        rx.recv_timeout(Duration::from_secs(timeout_secs))
    };

    match outcome {
        Ok(result) => result.map_err(|e| process_error(file, e)),
        Err(mpsc::RecvTimeoutError::Timeout) => {
            error!(file = %file.display(), timeout_secs, "processing timed out");
            Err(CliError::new(
                EXIT_CHECK_TIMEOUT,
                format!("processing timed out after {timeout_secs}s"),
            )
            .with_hint("raise timeout_secs in settings.toml"))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            error!(file = %file.display(), "worker exited without a result");
            Err(CliError::new(EXIT_CHECK_READ, PROCESS_FAILED))
        }
    }
}

fn process_error(file: &Path, err: ReconError) -> CliError {
    match err.row() {
        Some(row) => error!(file = %file.display(), row, error = %err, "processing failed"),
        None => error!(file = %file.display(), error = %err, "processing failed"),
    }
    CliError::new(recon_exit_code(&err), PROCESS_FAILED)
}
