//! Coverage command implementation.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use clap::Args;
use easy_intl::loader::{key_count, missing_keys};
use easy_intl::{Bundle, parse_bundle};
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;
use tracing::{debug, warn};

use crate::output::BundleDiagnostic;
use crate::output::table::{LanguageCoverage, format_coverage_table};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Source language bundle (e.g., en.json).
    #[arg(long)]
    pub source: PathBuf,

    /// Languages to check coverage for (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Directory containing translation bundles. Defaults to source file directory.
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    language: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
}

/// Read and parse a bundle, turning parse errors into source diagnostics.
fn read_bundle(path: &Path) -> Result<Bundle> {
    let content = read_to_string(path)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to read bundle {}: {}", path.display(), e))?;

    parse_bundle(&path.display().to_string(), &content).map_err(|e| {
        match BundleDiagnostic::from_load_error(path, &content, &e) {
            Some(diagnostic) => diagnostic.into(),
            None => miette!("{}", e),
        }
    })
}

/// Compare one language against the source bundle.
fn language_coverage(language: &str, source: &Bundle, target: &Bundle) -> LanguageCoverage {
    let missing: Vec<String> = missing_keys(source, target)
        .into_iter()
        .map(|(scope, key)| format!("{scope}/{key}"))
        .collect();
    LanguageCoverage {
        language: language.to_string(),
        translated: key_count(source) - missing.len(),
        missing,
    }
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let source = read_bundle(&args.source)?;
    let source_count = key_count(&source);
    debug!(keys = source_count, "Loaded source bundle");

    // Determine base directory for translation files
    let base_dir = args
        .translations
        .clone()
        .or_else(|| args.source.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut coverage_data: Vec<LanguageCoverage> = Vec::new();
    for lang in &args.lang {
        let lang_file = base_dir.join(format!("{lang}.json"));
        let target = if lang_file.exists() {
            read_bundle(&lang_file)?
        } else {
            warn!(file = %lang_file.display(), "Translation bundle not found");
            Bundle::new()
        };
        coverage_data.push(language_coverage(lang, &source, &target));
    }

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                language: c.language.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{json_output}");
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{table}");

        for lang_coverage in &coverage_data {
            if !lang_coverage.missing.is_empty() {
                println!("\nMissing in {}:", lang_coverage.language);
                for name in &lang_coverage.missing {
                    println!("  - {name}");
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
