//! cppdoc — generate a cross-linked HTML documentation site from the C++
//! declarations recorded by a discovery tool.
//!
//! Each input file holds the declarations seen in one translation unit.
//! Sightings are merged into one symbol database and every visible
//! namespace, record, function, concept and alias gets a page:
//!
//! `cppdoc -o site/ --project-name mylib build/decls/*.json`

mod config;
mod database;
mod diag;
mod error;
mod generate;
mod html;
mod links;
mod markdown;
mod model;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cppdoc",
    version,
    about = "Generate a cross-linked HTML documentation site from C++ declaration files"
)]
struct Cli {
    /// Declaration files (glob patterns and directories supported).
    #[arg(required = true)]
    files: Vec<String>,

    /// Output directory (overrides `site.output` in the config file)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Configuration file [default: ./cppdoc.toml if present]
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Site title shown in every page title
    #[arg(long)]
    title: Option<String>,

    /// Project name shown first in every breadcrumb
    #[arg(long)]
    project_name: Option<String>,

    /// URL prefix the site is served under, e.g. `/docs/`
    #[arg(long)]
    base_url: Option<String>,

    /// Stylesheet URL; may be repeated. Replaces the bundled stylesheet.
    #[arg(long = "stylesheet")]
    stylesheets: Vec<String>,

    /// Hide declarations from source files matching this glob; may be repeated
    #[arg(long = "exclude-source")]
    exclude_sources: Vec<String>,

    /// Log progress at info level
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // --verbose enables INFO, otherwise RUST_LOG, defaulting to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::load(cli.config.as_deref())
        .context("failed to load configuration")?;
    let (options, visibility) = config.resolve(config::CliSettings {
        output: cli.output,
        title: cli.title,
        project_name: cli.project_name,
        base_url: cli.base_url,
        stylesheets: cli.stylesheets,
        exclude_sources: cli.exclude_sources,
    })?;

    let input_files = expand_globs(&cli.files)?;
    if input_files.is_empty() {
        anyhow::bail!("no declaration files matched");
    }

    let db = database::load::build(&input_files, &visibility)
        .context("failed to build the symbol database")?;
    tracing::info!(
        files = input_files.len(),
        entities = db.len(),
        "Loaded symbol database"
    );

    let report = generate::generate(&db, &options)?;
    if !report.is_success() {
        anyhow::bail!(
            "{} page(s) failed to generate ({} written)",
            report.failures.len(),
            report.pages_written
        );
    }
    Ok(())
}

/// File extension of declaration files found by scanning a directory.
const DECLARATION_EXTENSION: &str = "json";

/// Resolve the command-line inputs to the declaration files to merge.
///
/// Each input is a file, a directory (its `.json` files, not recursive) or a
/// glob pattern. The result is sorted and deduplicated: that order is the
/// order sightings are merged in.
fn expand_globs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        let found = if path.is_file() {
            vec![path.to_path_buf()]
        } else if path.is_dir() {
            declaration_files_in(path)?
        } else {
            glob_files(input)?
        };
        if found.is_empty() {
            tracing::warn!("no declaration files in {input}");
        }
        files.extend(found);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn declaration_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    Ok(entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == DECLARATION_EXTENSION))
        .collect())
}

fn glob_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
    Ok(paths.filter_map(Result::ok).filter(|p| p.is_file()).collect())
}
