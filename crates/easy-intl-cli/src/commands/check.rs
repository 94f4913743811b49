//! Implementation of the `easy-intl check` command.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use clap::Args;
use easy_intl::loader::key_count;
use easy_intl::{Bundle, FormatterRegistry, lint_dictionary, parse_bundle};
use miette::{IntoDiagnostic, Report, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;

use crate::output::BundleDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Bundle files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with non-zero code if any template has lint warnings
    #[arg(long)]
    pub strict: bool,
}

/// Per-file result of a check.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    /// Set when the file could not be read or parsed.
    error: Option<String>,
    scopes: usize,
    keys: usize,
    warnings: Vec<TemplateWarning>,
}

#[derive(Debug, Serialize)]
struct TemplateWarning {
    scope: String,
    key: String,
    message: String,
}

/// Lint every template of a parsed bundle.
fn lint_bundle(bundle: &Bundle, registry: &FormatterRegistry) -> Vec<TemplateWarning> {
    bundle
        .iter()
        .flat_map(|(scope, dictionary)| {
            lint_dictionary(dictionary, registry)
                .into_iter()
                .map(move |(key, warning)| TemplateWarning {
                    scope: scope.clone(),
                    key,
                    message: warning.to_string(),
                })
        })
        .collect()
}

/// Check one file. Errors are rendered immediately unless `json`.
fn check_file(path: &Path, registry: &FormatterRegistry, json: bool) -> FileReport {
    let file = path.display().to_string();
    debug!(file = %file, "Checking bundle");

    let failed = |file: String, error: String| FileReport {
        file,
        error: Some(error),
        scopes: 0,
        keys: 0,
        warnings: Vec::new(),
    };

    let content = match read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let error = format!("cannot read file: {e}");
            if !json {
                eprintln!("{} {}: {}", "error:".red().bold(), file, error);
            }
            return failed(file, error);
        }
    };

    match parse_bundle(&file, &content) {
        Ok(bundle) => FileReport {
            warnings: lint_bundle(&bundle, registry),
            scopes: bundle.len(),
            keys: key_count(&bundle),
            error: None,
            file,
        },
        Err(e) => {
            if !json {
                match BundleDiagnostic::from_load_error(path, &content, &e) {
                    Some(diagnostic) => eprintln!("{:?}", Report::new(diagnostic)),
                    None => eprintln!("{} {}", "error:".red().bold(), e),
                }
            }
            failed(file, e.to_string())
        }
    }
}

/// Print warnings and a summary line. Failed files were reported already.
fn print_report(report: &FileReport) {
    if report.error.is_some() {
        return;
    }

    for warning in &report.warnings {
        println!(
            "{} {} {}/{}: {}",
            "warning:".yellow().bold(),
            report.file,
            warning.scope,
            warning.key,
            warning.message
        );
    }
    let status = if report.warnings.is_empty() {
        "ok".green().to_string()
    } else {
        format!("{} warning(s)", report.warnings.len())
            .yellow()
            .to_string()
    };
    println!(
        "{}: {} scope(s), {} key(s), {}",
        report.file.bold(),
        report.scopes,
        report.keys,
        status
    );
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let registry = FormatterRegistry::with_defaults();
    let reports: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| check_file(path, &registry, args.json))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    let any_error = reports.iter().any(|r| r.error.is_some());
    let any_warning = reports.iter().any(|r| !r.warnings.is_empty());
    if any_error || (args.strict && any_warning) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
