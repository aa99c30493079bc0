//! pkgver - package version extraction for CI release automation.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pkgver::{append_outputs, render_json, resolve, FileSpec, VersionInfo};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Extract a package version from Python project metadata and emit
/// normalized outputs for release automation.
#[derive(Parser, Debug)]
#[command(name = "pkgver", version, about)]
struct Cli {
    /// Path to the version file, or "auto" to search setup.py,
    /// pyproject.toml and __init__.py candidates
    #[arg(long, default_value = "auto")]
    file_path: String,

    /// Version to use when no version can be extracted
    #[arg(long, default_value = "0.0.0")]
    fallback_version: String,

    /// File to append key=value output lines to
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf>,

    /// Directory to search and to resolve a relative file path against
    #[arg(short = 'C', long, default_value = ".")]
    directory: PathBuf,

    /// Format of the summary printed to stdout
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable summary lines
    Text,
    /// A single JSON object with the output fields
    Json,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn print_summary(format: Format, info: &VersionInfo) -> Result<()> {
    match format {
        Format::Text => {
            println!("Extracted version: {}", info.version);
            println!("Tag: {}", info.tag);
            println!("Parts: {}.{}.{}", info.major, info.minor, info.patch);
        }
        Format::Json => {
            let json = render_json(info).context("failed to render JSON summary")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let spec = FileSpec::from_arg(&cli.file_path);
    let info = resolve(&cli.directory, &spec, &cli.fallback_version);

    print_summary(cli.format, &info)?;

    if let Some(ref output_file) = cli.output_file {
        append_outputs(output_file, &info)
            .with_context(|| format!("failed to write outputs to {}", output_file.display()))?;
    }

    Ok(())
}
