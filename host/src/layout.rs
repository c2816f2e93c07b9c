//! Output placement for generated artifacts.
//!
//! [`ArtifactStore`] is the capability the runner writes through.
//! [`FsArtifactStore`] lays artifacts out the way a Maven-style
//! configuration project expects them; [`MemoryStore`] keeps them in memory
//! for dry runs and tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use metatype::serializer::xml::metadata_file_name;
use metatype_codegen::{JAVA_EXT, TARGET_CLASS_NAME, TARGET_TMP_NAME};
use walkdir::WalkDir;

/// Metadata directory relative to the project root.
pub const METADATA_DIR: &str = "OSGI-INF/metatype";
/// Generated sources directory relative to the project root.
pub const GENERATED_DIR: &str = "target/generated-sources/annotations";
/// Source tree relative to the project root.
pub const SOURCE_DIR: &str = "src/main/java";

/// Where generated artifacts go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Receives `<lowercased id>.xml`. Cleared by [`ArtifactStore::prepare`].
    pub metadata_dir: PathBuf,
    /// Receives the temporary component source.
    pub generated_dir: PathBuf,
    /// Root of the caller's source tree.
    pub source_dir: PathBuf,
}

impl OutputLayout {
    /// The conventional layout under a project root.
    pub fn for_project(root: &Path) -> Self {
        Self {
            metadata_dir: root.join(METADATA_DIR),
            generated_dir: root.join(GENERATED_DIR),
            source_dir: root.join(SOURCE_DIR),
        }
    }

    /// Path of the component stub for `package` inside the source tree.
    ///
    /// Path separators inside a package segment become `_`.
    pub fn source_path(&self, package: &str) -> PathBuf {
        let mut path = self.source_dir.clone();
        for segment in package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment.replace(['/', '\\'], "_"));
        }
        path.join(format!("{TARGET_CLASS_NAME}{JAVA_EXT}"))
    }
}

/// Sink for the artifacts of a generator run.
pub trait ArtifactStore {
    /// Clears and recreates the metadata location. Calling it twice is
    /// the same as calling it once.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be cleared or created.
    fn prepare(&mut self) -> Result<()>;

    /// Stores the metadata document of configuration `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn write_metadata(&mut self, id: &str, xml: &str) -> Result<PathBuf>;

    /// Stores the component stub for `package`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be written.
    fn write_source(&mut self, package: &str, source: &str) -> Result<PathBuf>;
}

/// Filesystem-backed store.
///
/// The stub is written to `generated_dir/TmpAppConfiguration.java` and then
/// copied over `source_dir/<package path>/AppConfiguration.java`.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    layout: OutputLayout,
}

impl FsArtifactStore {
    /// Creates a store over `layout`.
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }
}

impl ArtifactStore for FsArtifactStore {
    fn prepare(&mut self) -> Result<()> {
        let dir = &self.layout.metadata_dir;
        if dir.exists() {
            for entry in WalkDir::new(dir).min_depth(1).contents_first(true) {
                let entry = entry
                    .with_context(|| format!("Failed to walk directory: {}", dir.display()))?;
                let path = entry.path();
                let removed = if entry.file_type().is_dir() {
                    fs::remove_dir(path)
                } else {
                    fs::remove_file(path)
                };
                removed.with_context(|| format!("Failed to delete: {}", path.display()))?;
                tracing::debug!(path = %path.display(), "removed stale artifact");
            }
        }
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        tracing::info!(dir = %dir.display(), "metadata directory prepared");
        Ok(())
    }

    fn write_metadata(&mut self, id: &str, xml: &str) -> Result<PathBuf> {
        let path = self.layout.metadata_dir.join(metadata_file_name(id));
        write_text(&path, xml)?;
        Ok(path)
    }

    fn write_source(&mut self, package: &str, source: &str) -> Result<PathBuf> {
        let tmp = self
            .layout
            .generated_dir
            .join(format!("{TARGET_TMP_NAME}{JAVA_EXT}"));
        write_text(&tmp, source)?;

        let target = self.layout.source_path(package);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::copy(&tmp, &target).with_context(|| {
            format!("Failed to copy {} to {}", tmp.display(), target.display())
        })?;
        Ok(target)
    }
}

/// Writes a text file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}

/// In-memory store keyed by the relative paths the filesystem store would use.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Metadata documents by file name.
    pub metadata: BTreeMap<String, String>,
    /// Component stubs by path relative to the source tree.
    pub sources: BTreeMap<PathBuf, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for MemoryStore {
    fn prepare(&mut self) -> Result<()> {
        self.metadata.clear();
        Ok(())
    }

    fn write_metadata(&mut self, id: &str, xml: &str) -> Result<PathBuf> {
        let name = metadata_file_name(id);
        self.metadata.insert(name.clone(), xml.to_owned());
        Ok(Path::new(METADATA_DIR).join(name))
    }

    fn write_source(&mut self, package: &str, source: &str) -> Result<PathBuf> {
        let layout = OutputLayout::for_project(Path::new(""));
        let path = layout.source_path(package);
        self.sources.insert(path.clone(), source.to_owned());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_path_follows_package() {
        let layout = OutputLayout::for_project(Path::new("/proj"));
        assert_eq!(
            layout.source_path("org.acme.app"),
            PathBuf::from("/proj/src/main/java/org/acme/app/AppConfiguration.java")
        );
        assert_eq!(
            layout.source_path(""),
            PathBuf::from("/proj/src/main/java/AppConfiguration.java")
        );
    }

    #[test]
    fn prepare_clears_stale_metadata() {
        let root = tempfile::tempdir().unwrap();
        let layout = OutputLayout::for_project(root.path());
        fs::create_dir_all(layout.metadata_dir.join("nested")).unwrap();
        fs::write(layout.metadata_dir.join("old.xml"), "<old/>").unwrap();
        fs::write(layout.metadata_dir.join("nested/deep.xml"), "<old/>").unwrap();

        let mut store = FsArtifactStore::new(layout.clone());
        store.prepare().unwrap();
        assert!(layout.metadata_dir.is_dir());
        assert_eq!(fs::read_dir(&layout.metadata_dir).unwrap().count(), 0);

        // Idempotent.
        store.prepare().unwrap();
        assert!(layout.metadata_dir.is_dir());
    }

    #[test]
    fn writes_metadata_and_copies_source() {
        let root = tempfile::tempdir().unwrap();
        let layout = OutputLayout::for_project(root.path());
        let mut store = FsArtifactStore::new(layout.clone());
        store.prepare().unwrap();

        let xml_path = store.write_metadata("My.App", "<xml/>").unwrap();
        assert_eq!(xml_path, layout.metadata_dir.join("my.app.xml"));
        assert_eq!(fs::read_to_string(&xml_path).unwrap(), "<xml/>");

        let src_path = store.write_source("org.acme", "class X {}").unwrap();
        assert_eq!(fs::read_to_string(&src_path).unwrap(), "class X {}");
        assert!(layout
            .generated_dir
            .join("TmpAppConfiguration.java")
            .is_file());
    }

    #[test]
    fn ids_and_packages_stay_inside_their_directories() {
        let root = tempfile::tempdir().unwrap();
        let layout = OutputLayout::for_project(root.path());
        let mut store = FsArtifactStore::new(layout.clone());
        store.prepare().unwrap();

        let xml_path = store.write_metadata("../../escape", "<xml/>").unwrap();
        assert_eq!(xml_path.parent(), Some(layout.metadata_dir.as_path()));
        assert!(xml_path.is_file());

        let src_path = layout.source_path("org./../..x");
        assert!(src_path.starts_with(&layout.source_dir));
        assert!(!src_path
            .components()
            .any(|c| c == std::path::Component::ParentDir));
    }

    #[test]
    fn memory_store_prepare_drops_metadata() {
        let mut store = MemoryStore::new();
        store.write_metadata("a", "<a/>").unwrap();
        store.prepare().unwrap();
        assert!(store.metadata.is_empty());
    }
}
