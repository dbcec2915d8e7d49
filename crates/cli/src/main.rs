// tapcheck CLI - draft beer vs. PET bottle receipt checks

mod check;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tapcheck_config::Settings;
use tracing::{debug, warn};

use check::{cmd_check, CheckOptions};
use exit_codes::{EXIT_CHECK_OUTPUT, EXIT_CONFIG_INVALID, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "tapcheck")]
#[command(about = "Check that draft beer sold matches the PET bottles it was poured into")]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/tapcheck/settings.toml)
    #[arg(long, global = true, env = "TAPCHECK_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log debug details to stderr (overrides TAPCHECK_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile one receipt export (.xlsx or .csv)
    #[command(after_help = "\
Examples:
  tapcheck check sales.xlsx
  tapcheck check export.csv --no-snark
  tapcheck check export.csv --json > report.json
  tapcheck check export.csv --budget 1000

Exit codes:
  0  every receipt matches
  1  mismatches found
  3+ the file could not be processed")]
    Check {
        /// Receipt export to check
        file: PathBuf,

        /// Print the report as JSON instead of the text summary
        #[arg(long)]
        json: bool,

        /// Leave out the extra remark after mismatch summaries
        #[arg(long)]
        no_snark: bool,

        /// Summary size limit in bytes (default: message_budget setting)
        #[arg(long, value_name = "BYTES")]
        budget: Option<usize>,
    },

    /// Print the effective settings as TOML
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_settings(cli.config.as_deref()).and_then(|settings| match cli.command {
        Commands::Check {
            file,
            json,
            no_snark,
            budget,
        } => cmd_check(
            CheckOptions {
                file,
                json,
                no_snark,
                budget,
            },
            &settings,
        ),
        Commands::Config => cmd_config(&settings, cli.config.as_deref()),
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// stderr logging. `TAPCHECK_LOG` takes an env-filter directive; `-v` wins.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TAPCHECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn load_settings(path: Option<&std::path::Path>) -> Result<Settings, CliError> {
    let loaded = match path {
        Some(path) => {
            // An explicit file has to exist.
            if !path.exists() {
                return Err(CliError::new(
                    EXIT_CONFIG_INVALID,
                    format!("settings file not found: {}", path.display()),
                ));
            }
            Settings::load_from(path)
        }
        None => Settings::load(),
    };

    match loaded {
        Ok(settings) => {
            debug!(?settings, "settings loaded");
            Ok(settings)
        }
        Err(e) if path.is_some() => Err(CliError::new(EXIT_CONFIG_INVALID, e.to_string())),
        Err(e) => {
            warn!(error = %e, "using default settings");
            Ok(Settings::default())
        }
    }
}

// ============================================================================
// config
// ============================================================================

fn cmd_config(settings: &Settings, path: Option<&std::path::Path>) -> Result<(), CliError> {
    let text = settings
        .to_toml()
        .map_err(|e| CliError::new(EXIT_CHECK_OUTPUT, e.to_string()))?;

    let source = match path {
        Some(path) => path.display().to_string(),
        None => Settings::config_path_display(),
    };
    println!("# {}", source);
    print!("{}", text);
    Ok(())
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
