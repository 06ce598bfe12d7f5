//! Source tree traversal and per-file ingestion.
//!
//! [`SchemaLoader`] walks every source path, keeps the files whose name
//! matches the configured pattern, and feeds each one into a
//! [`SchemaRegistry`]. Faults are collected per file in [`FileErrors`];
//! traversal failures are collected separately and never stop the other
//! sources from being read.
//!
//! # Example
//!
//! ```no_run
//! use hyperschema_core::SchemaRegistry;
//! use hyperschema_loader::SchemaLoader;
//!
//! let loader = SchemaLoader::builder()
//!     .pattern(r"\.ya?ml$")
//!     .exclude("node_modules")
//!     .build()
//!     .unwrap();
//!
//! let mut registry = SchemaRegistry::new();
//! let outcome = loader.load(&mut registry, &["schemas/"]);
//! if !outcome.file_errors.is_empty() {
//!     eprint!("{}", outcome.file_errors);
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use hyperschema_core::{Diagnostics, SchemaRegistry};
use regex::Regex;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::CheckConfig;
use crate::error::{LoaderError, Result};
use crate::format::read_document;

/// Decides which directory entries are looked at.
///
/// # Examples
///
/// ```
/// use hyperschema_loader::FileFilter;
/// use regex::Regex;
///
/// let filter = FileFilter::new().with_pattern(Regex::new(r"\.yml$").unwrap());
/// assert!(filter.accepts_file("user.yml"));
/// assert!(!filter.accepts_file("user.json"));
/// assert!(FileFilter::new().accepts_file("anything"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    pattern: Option<Regex>,
    exclude: Vec<String>,
}

impl FileFilter {
    /// A filter that accepts every file and excludes no directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept files whose name matches `pattern`.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Never descend into directories called `name`.
    pub fn with_excluded_dir(mut self, name: impl Into<String>) -> Self {
        self.exclude.push(name.into());
        self
    }

    /// Returns `true` if a file called `name` should be ingested.
    pub fn accepts_file(&self, name: &str) -> bool {
        self.pattern.as_ref().is_none_or(|re| re.is_match(name))
    }

    /// Returns `true` if a directory called `name` should be skipped.
    pub fn excludes_dir(&self, name: &str) -> bool {
        self.exclude.iter().any(|d| d == name)
    }
}

/// Faults collected per source file, ordered by path.
#[derive(Debug, Default)]
pub struct FileErrors {
    errors: BTreeMap<PathBuf, Diagnostics>,
}

impl FileErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the faults of one file, replacing earlier ones for that path.
    pub fn insert(&mut self, path: impl Into<PathBuf>, diagnostics: Diagnostics) {
        self.errors.insert(path.into(), diagnostics);
    }

    pub fn get(&self, path: &Path) -> Option<&Diagnostics> {
        self.errors.get(path)
    }

    /// Number of files with faults.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Diagnostics)> {
        self.errors.iter().map(|(path, d)| (path.as_path(), d))
    }
}

/// Renders one block per file: the path, each fault indented by two spaces,
/// then a blank line.
impl fmt::Display for FileErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, diagnostics) in &self.errors {
            writeln!(f, "{}", path.display())?;
            for line in diagnostics.to_string().lines() {
                writeln!(f, "  {}", line.trim_start())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// What a [`SchemaLoader::load`] run saw.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Number of files that passed the filter and were ingested.
    pub files: usize,
    /// Faults found in individual files.
    pub file_errors: FileErrors,
    /// Failures of the traversal itself.
    pub walk_errors: Vec<LoaderError>,
}

/// Walks source trees and ingests schema files into a registry.
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    filter: FileFilter,
    follow_links: bool,
}

impl SchemaLoader {
    /// Returns a new [`LoaderBuilder`].
    pub fn builder() -> LoaderBuilder {
        LoaderBuilder::new()
    }

    /// Creates a loader with the given filter.
    pub fn new(filter: FileFilter) -> Self {
        Self {
            filter,
            follow_links: false,
        }
    }

    /// Builds a loader from a [`CheckConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidPattern`] if the configured pattern does
    /// not compile.
    pub fn from_config(config: &CheckConfig) -> Result<Self> {
        let mut builder = LoaderBuilder::new().follow_links(config.follow_links);
        if let Some(pattern) = &config.pattern {
            builder = builder.pattern(pattern);
        }
        for name in &config.exclude {
            builder = builder.exclude(name);
        }
        builder.build()
    }

    /// Ingests every accepted file below each source into `registry`.
    ///
    /// A source may be a file or a directory. Directories are always
    /// descended (except excluded ones) and are never ingested themselves;
    /// the file pattern applies to file names only.
    pub fn load<P: AsRef<Path>>(&self, registry: &mut SchemaRegistry, sources: &[P]) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();

        for source in sources {
            let source = source.as_ref();
            if !source.exists() {
                warn!(source = %source.display(), "source does not exist");
                outcome
                    .walk_errors
                    .push(LoaderError::MissingSource(source.to_path_buf()));
                continue;
            }

            let walker = WalkDir::new(source)
                .follow_links(self.follow_links)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !self.is_excluded(entry));

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        let path = err.path().unwrap_or(source).to_path_buf();
                        warn!(path = %path.display(), error = %err, "walk failed");
                        outcome
                            .walk_errors
                            .push(LoaderError::Walk { path, source: err });
                        continue;
                    }
                };

                if entry.file_type().is_dir() {
                    continue;
                }
                if !self.filter.accepts_file(&entry.file_name().to_string_lossy()) {
                    continue;
                }

                outcome.files += 1;
                if let Err(diagnostics) = ingest_file(registry, entry.path()) {
                    outcome.file_errors.insert(entry.path(), diagnostics);
                }
            }
        }

        info!(
            files = outcome.files,
            failed_files = outcome.file_errors.len(),
            walk_errors = outcome.walk_errors.len(),
            "loaded schema sources"
        );
        outcome
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self.filter.excludes_dir(&entry.file_name().to_string_lossy())
    }
}

/// Builder for [`SchemaLoader`].
///
/// The pattern is compiled in [`build`](Self::build), so an invalid pattern
/// is reported there.
#[derive(Debug, Clone, Default)]
pub struct LoaderBuilder {
    pattern: Option<String>,
    exclude: Vec<String>,
    follow_links: bool,
}

impl LoaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file-name pattern. An empty pattern accepts every file.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Adds a directory name to skip.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.push(name.into());
        self
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Compiles the pattern and returns the loader.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidPattern`] if the pattern does not
    /// compile.
    pub fn build(self) -> Result<SchemaLoader> {
        let mut filter = FileFilter::new();
        if let Some(pattern) = self.pattern.filter(|p| !p.is_empty()) {
            filter = filter.with_pattern(Regex::new(&pattern)?);
        }
        for name in self.exclude {
            filter = filter.with_excluded_dir(name);
        }
        Ok(SchemaLoader {
            filter,
            follow_links: self.follow_links,
        })
    }
}

/// Reads one schema file and adds it to `registry`.
///
/// # Errors
///
/// Returns the file's faults: an unsupported or unparsable file, or every
/// fault reported while registering the document.
pub fn ingest_file(registry: &mut SchemaRegistry, path: &Path) -> std::result::Result<(), Diagnostics> {
    debug!(path = %path.display(), "ingesting schema file");
    let raw = read_document(path)?;
    registry.add_document(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults() {
        let filter = FileFilter::new();
        assert!(filter.accepts_file("user.yml"));
        assert!(!filter.excludes_dir("schemas"));
    }

    #[test]
    fn test_filter_pattern_matches_name() {
        let filter = FileFilter::new().with_pattern(Regex::new("^user").unwrap());
        assert!(filter.accepts_file("user.yml"));
        assert!(!filter.accepts_file("group.yml"));
    }

    #[test]
    fn test_builder_rejects_bad_pattern() {
        let err = SchemaLoader::builder().pattern("(").build().unwrap_err();
        assert!(matches!(err, LoaderError::InvalidPattern(_)));
    }

    #[test]
    fn test_builder_empty_pattern_accepts_all() {
        let loader = SchemaLoader::builder().pattern("").build().unwrap();
        assert!(loader.filter.accepts_file("README.md"));
    }

    #[test]
    fn test_from_config() {
        let config = CheckConfig {
            pattern: Some(r"\.json$".into()),
            exclude: vec!["vendor".into()],
            follow_links: true,
        };
        let loader = SchemaLoader::from_config(&config).unwrap();
        assert!(loader.follow_links);
        assert!(loader.filter.accepts_file("a.json"));
        assert!(!loader.filter.accepts_file("a.yml"));
        assert!(loader.filter.excludes_dir("vendor"));
    }

    #[test]
    fn test_file_errors_render() {
        let mut errors = FileErrors::new();
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(hyperschema_core::Fault::MissingId);
        diagnostics.push(hyperschema_core::Fault::duplicated("a"));
        errors.insert("b.yml", diagnostics);
        errors.insert("a.yml", hyperschema_core::Fault::unsupported_extension().into());

        assert_eq!(
            errors.to_string(),
            "a.yml\n  not supported file(0)\n\nb.yml\n  ID is empty(3)\n  duplicated ID 'a'(2)\n\n"
        );
        assert_eq!(errors.len(), 2);
        assert!(errors.get(Path::new("a.yml")).is_some());
    }
}
