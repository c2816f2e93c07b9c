//! `metatype-build` — Generates metatype metadata and the `AppConfiguration`
//! component stub for every configuration type listed in a manifest.
//!
//! **Outputs** (under `--project`):
//! - `OSGI-INF/metatype/<id>.xml` — one metatype document per configuration
//! - `target/generated-sources/annotations/TmpAppConfiguration.java`
//! - `src/main/java/<package path>/AppConfiguration.java`
//!
//! **Usage:**
//! ```
//! metatype-build --manifest <path> [--project <path>] [--dry-run]
//! ```
//!
//! Exits non-zero if any configuration type fails to generate.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use metatype_host::{
    run_all, FsArtifactStore, Manifest, MemoryStore, OutputLayout, RunReport, Severity,
};

/// Generate metatype metadata and component stubs.
#[derive(Parser)]
#[command(
    name = "metatype-build",
    about = "Generate metatype XML and AppConfiguration stubs from a manifest"
)]
struct Args {
    /// Manifest listing the configuration types (`.json` or `.toml`).
    #[arg(long)]
    manifest: PathBuf,

    /// Root of the configuration project receiving the artifacts.
    #[arg(long, default_value = "metatype-configuration")]
    project: PathBuf,

    /// Render everything in memory and print it instead of writing files.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(project = %args.project.display(), dry_run = args.dry_run, "starting generator");
    let manifest = Manifest::load(&args.manifest)
        .with_context(|| format!("Failed to load manifest: {}", args.manifest.display()))?;

    println!(
        "Metatype generator: {} configuration type(s) from {}",
        manifest.configurations.len(),
        args.manifest.display()
    );

    let report = if args.dry_run {
        let mut store = MemoryStore::new();
        let report = run_all(&manifest, &mut store)?;
        for (name, xml) in &store.metadata {
            println!("--- {name}");
            print!("{xml}");
        }
        for (path, source) in &store.sources {
            println!("--- {}", path.display());
            print!("{source}");
        }
        report
    } else {
        let layout = OutputLayout::for_project(&args.project);
        run_all(&manifest, &mut FsArtifactStore::new(layout))?
    };

    print_summary(&report);

    let failed = report.failure_count();
    if failed > 0 {
        eprintln!("Generation FAILED: {failed} configuration type(s) were not generated.");
        process::exit(1);
    }
    Ok(())
}

fn print_summary(report: &RunReport) {
    println!();
    for outcome in &report.outcomes {
        let status = match outcome.severity {
            Severity::Pass => "PASS",
            Severity::Warning => "WARN",
            Severity::Failure => "FAIL",
        };
        println!("[{status}] {}: {}", outcome.configuration, outcome.message);
        for path in &outcome.artifacts {
            println!("       Written: {}", path.display());
        }
    }
    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        report.outcomes.len() - report.failure_count() - report.warning_count(),
        report.warning_count(),
        report.failure_count()
    );
}
