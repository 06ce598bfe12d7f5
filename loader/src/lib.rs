//! Source discovery and document loading for `jhs-check`.
//!
//! This crate turns paths on disk into registered schemas:
//!
//! - [`SchemaLoader`] walks source trees, filters file names by pattern and
//!   ingests every accepted file into a
//!   [`SchemaRegistry`](hyperschema_core::SchemaRegistry).
//! - [`SourceFormat`] picks YAML or JSON by extension.
//! - [`FileErrors`] keeps the faults of each file under its path and renders
//!   the per-file report.
//! - [`CheckConfig`] is the optional YAML configuration file.
//!
//! # Quick start
//!
//! ```no_run
//! use hyperschema_core::SchemaRegistry;
//! use hyperschema_loader::{CheckConfig, SchemaLoader};
//!
//! let config = CheckConfig::load("jhs-check.yml").unwrap();
//! let loader = SchemaLoader::from_config(&config).unwrap();
//!
//! let mut registry = SchemaRegistry::new();
//! let outcome = loader.load(&mut registry, &["schemas/"]);
//! print!("{}", outcome.file_errors);
//!
//! if let Err(faults) = registry.validate() {
//!     println!("{faults}");
//! }
//! ```

mod config;
mod error;
mod format;
mod loader;

pub use config::CheckConfig;
pub use error::{LoaderError, Result};
pub use format::{SourceFormat, read_document};
pub use loader::{FileErrors, FileFilter, LoadOutcome, LoaderBuilder, SchemaLoader, ingest_file};
