use std::path::PathBuf;

use clap::Parser;
use hyperschema_core::SchemaRegistry;
use hyperschema_loader::{CheckConfig, SchemaLoader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Exit status bit: a `$ref` is malformed or dangling.
const VALIDATE_FAULTS: i32 = 1;
/// Exit status bit: at least one file could not be ingested cleanly.
const FILE_FAULTS: i32 = 1 << 1;
/// Exit status bit: a source could not be walked, or the input is unusable.
const INPUT_FAILURE: i32 = 1 << 2;

#[derive(Debug, Parser)]
#[command(name = "jhs-check", version)]
#[command(about = "Check JSON Hyper-schema source trees for structural faults and dangling references")]
struct Cli {
    /// Schema files and/or directories to check.
    #[arg(required = true)]
    sources: Vec<PathBuf>,
    /// Regular expression matched against file names (overrides the config).
    #[arg(short, long)]
    pattern: Option<String>,
    /// YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let status = match run(&cli) {
        Ok(status) => status,
        Err(err) => {
            eprintln!("error: {err}");
            INPUT_FAILURE
        }
    };
    std::process::exit(status);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads every source, validates references and reports to stderr.
///
/// Returns the exit status bitmask; `Err` means the run could not start.
fn run(cli: &Cli) -> Result<i32, String> {
    let loader = build_loader(cli)?;
    let mut registry = SchemaRegistry::new();
    let outcome = loader.load(&mut registry, &cli.sources);

    let mut status = 0;
    for err in &outcome.walk_errors {
        eprintln!("error: {err}");
        status |= INPUT_FAILURE;
    }
    if !outcome.file_errors.is_empty() {
        eprint!("{}", outcome.file_errors);
        status |= FILE_FAULTS;
    }
    if let Err(faults) = registry.validate() {
        eprintln!("{faults}");
        status |= VALIDATE_FAULTS;
    }

    info!(
        files = outcome.files,
        schemas = registry.len(),
        status,
        "check finished"
    );
    Ok(status)
}

fn build_loader(cli: &Cli) -> Result<SchemaLoader, String> {
    let mut config = match &cli.config {
        Some(path) => CheckConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => CheckConfig::default(),
    };
    if let Some(pattern) = &cli.pattern {
        config.pattern = Some(pattern.clone());
    }
    SchemaLoader::from_config(&config).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["jhs-check", "-p", r"\.yml$", "-c", "c.yml", "a", "b"]).unwrap();
        assert_eq!(cli.sources, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(cli.pattern.as_deref(), Some(r"\.yml$"));
        assert_eq!(cli.config, Some(PathBuf::from("c.yml")));
    }

    #[test]
    fn test_sources_are_required() {
        assert!(Cli::try_parse_from(["jhs-check"]).is_err());
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        let cli = Cli::try_parse_from(["jhs-check", "--pattern", "(", "."]).unwrap();
        let err = build_loader(&cli).unwrap_err();
        assert!(err.contains("invalid file pattern"));
    }

    #[test]
    fn test_status_bits_are_distinct() {
        assert_eq!(VALIDATE_FAULTS | FILE_FAULTS | INPUT_FAILURE, 7);
    }
}
