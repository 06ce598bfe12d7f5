//! Source file formats.
//!
//! The format is chosen by file extension: `.yaml`/`.yml` are read as YAML,
//! `.json`/`.js` as JSON. Anything else is rejected with
//! [`Fault::UnsupportedFile`] without reading the file; read and parse
//! failures produce the same fault wrapping the underlying error.

use std::fs;
use std::path::Path;

use hyperschema_core::{Fault, RawSchema};

/// Serialization format of a schema source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    /// Picks the format from the file extension (case-sensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use hyperschema_loader::SourceFormat;
    ///
    /// assert_eq!(SourceFormat::from_path(Path::new("user.yml")), Some(SourceFormat::Yaml));
    /// assert_eq!(SourceFormat::from_path(Path::new("user.js")), Some(SourceFormat::Json));
    /// assert_eq!(SourceFormat::from_path(Path::new("README.md")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            "json" | "js" => Some(SourceFormat::Json),
            _ => None,
        }
    }

    /// Deserializes a document.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::UnsupportedFile`] wrapping the parser error.
    pub fn parse(self, content: &[u8]) -> Result<RawSchema, Fault> {
        match self {
            SourceFormat::Yaml => serde_yaml::from_slice(content).map_err(Fault::unsupported_file),
            SourceFormat::Json => serde_json::from_slice(content).map_err(Fault::unsupported_file),
        }
    }
}

/// Reads and deserializes the schema document at `path`.
///
/// # Errors
///
/// Returns [`Fault::UnsupportedFile`] if the extension is unknown, the file
/// cannot be read, or its content does not parse.
pub fn read_document(path: &Path) -> Result<RawSchema, Fault> {
    let format = SourceFormat::from_path(path).ok_or_else(Fault::unsupported_extension)?;
    let content = fs::read(path).map_err(Fault::unsupported_file)?;
    format.parse(&content)
}
