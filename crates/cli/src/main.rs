// billaudit CLI - headless hospital bill audit runs

mod audit;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

/// Structured CLI failure: exit code plus a message for stderr.
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Parser)]
#[command(name = "billaudit")]
#[command(about = "Audits a hospital bill for internal arithmetic consistency")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit an extraction document against its own stated figures
    #[command(after_help = "\
Examples:
  billaudit audit extraction.json
  billaudit audit extraction.json --ocr-text bill.txt --json
  billaudit audit extraction.json --candidates-csv totals.csv
  billaudit audit extraction.json --config ward.toml -o result.json")]
    Audit {
        /// Extraction JSON produced by the OCR/LLM collaborator
        input: PathBuf,

        /// Raw OCR text; line items parsed from it drive the computed total
        #[arg(long)]
        ocr_text: Option<PathBuf>,

        /// Additional candidate totals CSV, appended after the JSON ones
        #[arg(long)]
        candidates_csv: Option<PathBuf>,

        /// Tolerance config TOML (contract defaults are built in)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full audit result as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write the full audit result JSON to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Validate an audit config without running
    #[command(after_help = "\
Examples:
  billaudit validate ward.toml")]
    Validate {
        /// Path to the audit config TOML
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Audit {
            input,
            ocr_text,
            candidates_csv,
            config,
            json,
            output,
        } => audit::cmd_audit(input, ocr_text, candidates_csv, config, json, output),
        Commands::Validate { config } => audit::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}
