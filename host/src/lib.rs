//! Metatype host collaborator.
//!
//! Drives one generator run: prepares the output location once, then for
//! every configuration type in the manifest collects its attributes,
//! renders the metatype XML and the component stub, and persists both
//! through an [`ArtifactStore`]. Configuration types are independent; a
//! failure in one is reported and the run moves on.
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//! use metatype_host::{run_all, FsArtifactStore, Manifest, OutputLayout};
//!
//! let manifest = Manifest::load(Path::new("metatype.json")).expect("manifest");
//! let mut store = FsArtifactStore::new(OutputLayout::for_project(Path::new(".")));
//! let report = run_all(&manifest, &mut store).expect("run");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod layout;
pub mod manifest;
pub mod report;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use metatype::serializer::xml::{to_xml, MetaTypeDocument};
use metatype::{collect, CollectedConfiguration, ConfigurationType};

pub use layout::{ArtifactStore, FsArtifactStore, MemoryStore, OutputLayout};
pub use manifest::Manifest;
pub use report::{Outcome, RunReport, Severity};

/// Both artifacts of one configuration type, rendered but not yet stored.
#[derive(Debug, Clone)]
pub struct GeneratedArtifacts {
    /// The collected attribute model both artifacts were built from.
    pub collected: CollectedConfiguration,
    /// Metatype XML document.
    pub metadata: String,
    /// Component stub source.
    pub source: String,
}

/// Renders both artifacts for `config` without touching any store.
///
/// # Errors
///
/// Returns an error if the metadata document cannot be rendered.
pub fn generate(config: &ConfigurationType) -> Result<GeneratedArtifacts> {
    render(config, collect(config))
}

fn render(
    config: &ConfigurationType,
    collected: CollectedConfiguration,
) -> Result<GeneratedArtifacts> {
    let doc = MetaTypeDocument::build(config, &collected);
    let metadata = to_xml(&doc)
        .with_context(|| format!("Unable to create the metadata XML for `{}`", config.id))?;
    let source = metatype_codegen::generate_source(config, &collected);
    Ok(GeneratedArtifacts {
        collected,
        metadata,
        source,
    })
}

/// Stores both artifacts. Each path is pushed to `written` as soon as the
/// artifact exists; the stub path is returned.
fn persist(
    config: &ConfigurationType,
    artifacts: &GeneratedArtifacts,
    store: &mut impl ArtifactStore,
    written: &mut Vec<PathBuf>,
) -> Result<PathBuf> {
    written.push(store.write_metadata(&config.id, &artifacts.metadata)?);
    let source_path = store.write_source(&config.package, &artifacts.source)?;
    written.push(source_path.clone());
    Ok(source_path)
}

/// Generates and stores the artifacts of a single configuration type.
///
/// # Errors
///
/// Returns an error if rendering fails or either artifact cannot be stored.
pub fn process(
    config: &ConfigurationType,
    store: &mut impl ArtifactStore,
) -> Result<(GeneratedArtifacts, Vec<PathBuf>)> {
    let artifacts = generate(config)?;
    let mut written = Vec::new();
    persist(config, &artifacts, store, &mut written)?;
    Ok((artifacts, written))
}

/// Runs the generator over every configuration type in `manifest`.
///
/// Configuration types sharing a package share one component stub; the
/// later one replaces the earlier and the replacement is reported as a
/// warning.
///
/// # Errors
///
/// Returns an error only if the output location cannot be prepared;
/// per-configuration failures are recorded in the report.
pub fn run_all(manifest: &Manifest, store: &mut impl ArtifactStore) -> Result<RunReport> {
    store
        .prepare()
        .context("Unable to prepare the metadata output location")?;

    let mut report = RunReport::new();
    let mut stub_owners: HashMap<PathBuf, String> = HashMap::new();
    for config in &manifest.configurations {
        let span = tracing::info_span!("configuration", id = %config.id);
        let _guard = span.enter();

        let collected = collect(config);
        for diagnostic in &collected.diagnostics {
            report.push(Outcome::warn(&config.id, diagnostic.to_string()));
        }

        let artifacts = match render(config, collected) {
            Ok(artifacts) => artifacts,
            Err(err) => {
                tracing::error!("generation failed: {err:#}");
                report.push(Outcome::fail(&config.id, format!("{err:#}")));
                continue;
            }
        };

        let mut written = Vec::new();
        match persist(config, &artifacts, store, &mut written) {
            Ok(source_path) => {
                if let Some(previous) = stub_owners.insert(source_path.clone(), config.id.clone())
                {
                    tracing::warn!(
                        replaced = %previous,
                        path = %source_path.display(),
                        "component stub overwritten"
                    );
                    report.push(Outcome::warn(
                        &config.id,
                        format!(
                            "component stub {} replaced the one generated for `{previous}`",
                            source_path.display()
                        ),
                    ));
                }
                tracing::info!(
                    attributes = artifacts.collected.attributes.len(),
                    "artifacts written"
                );
                report.push(Outcome::pass(
                    &config.id,
                    format!(
                        "{} attribute(s) generated",
                        artifacts.collected.attributes.len()
                    ),
                    written,
                ));
            }
            Err(err) => {
                tracing::error!("storing artifacts failed: {err:#}");
                report.push(Outcome::fail(&config.id, format!("{err:#}")).with_artifacts(written));
            }
        }
    }
    Ok(report)
}
