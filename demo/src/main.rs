//! Cutscene Validation — Demo CLI
//!
//! Validates one or more cutscene JSON documents against schema version 1
//! and prints every diagnostic found.
//!
//! Usage:
//!   cargo run -p demo -- check intro.json
//!   cargo run -p demo -- check chapter1.json chapter2.json --json

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cutscene_contracts::diagnostic::Diagnostic;
use cutscene_contracts::document::CutsceneDoc;
use cutscene_validate::v1::V1SchemaValidator;
use cutscene_validate::SchemaValidator;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Cutscene document schema validator.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Cutscene document schema validation demo",
    long_about = "Validates cutscene JSON documents against schema version 1,\n\
                  reporting every rule violation with its code and document path."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate one or more cutscene documents.
    Check {
        /// Paths to cutscene JSON files.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Emit diagnostics as a JSON array instead of text lines.
        #[arg(long)]
        json: bool,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check { files, json } => check(&files, json),
    }
}

// ── Validation dispatch ───────────────────────────────────────────────────────

fn check(files: &[PathBuf], json: bool) -> ExitCode {
    let mut clean = true;

    for file in files {
        let diags = validate_file(file);
        if !diags.is_empty() {
            clean = false;
        }

        if json {
            match serde_json::to_string_pretty(&diags) {
                Ok(out) => println!("{out}"),
                Err(e) => {
                    eprintln!("{}: failed to serialize diagnostics: {e}", file.display());
                    return ExitCode::FAILURE;
                }
            }
        } else {
            print_report(file, &diags);
        }
    }

    if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn validate_file(file: &PathBuf) -> Vec<Diagnostic> {
    // An unreadable or unparseable file collapses to the absent-document
    // diagnostic, same as a null document would.
    let doc = match CutsceneDoc::from_json_file(file) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!(file = %file.display(), error = %e, "could not load document");
            None
        }
    };

    V1SchemaValidator.validate(doc.as_ref())
}

fn print_report(file: &PathBuf, diags: &[Diagnostic]) {
    if diags.is_empty() {
        println!("{}: OK", file.display());
        return;
    }

    println!("{}: {} problem(s)", file.display(), diags.len());
    for diag in diags {
        println!("  [{}] {}: {}", diag.code, diag.path, diag.message);
    }
}
