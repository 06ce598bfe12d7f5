//! Registry and reference checker for JSON Hyper-schema (draft-04) documents.
//!
//! This crate holds the engine behind `jhs-check`:
//!
//! - [`RawSchema`] / [`RawLink`]: a document as written in YAML or JSON.
//! - [`Schema`] / [`Link`]: the normalized, immutable form, addressed by a
//!   hierarchical identifier such as `user/properties/name`.
//! - [`SchemaRegistry`]: registers documents, collecting every structural
//!   fault instead of stopping at the first, then checks that every `$ref`
//!   resolves ([`SchemaRegistry::validate`]).
//! - [`Fault`] / [`Diagnostics`]: the fault taxonomy and its ordered
//!   accumulator.
//! - [`Visit`]: steering for depth-first walks over registered schemas.
//!
//! Reading files, matching file names and rendering reports live in the
//! `hyperschema-loader` crate and the `jhs-check` binary.
//!
//! # Example
//!
//! ```
//! use hyperschema_core::*;
//!
//! let mut registry = SchemaRegistry::new();
//!
//! // `tags` is an array without an item schema.
//! let user = RawSchema::typed("object")
//!     .with_id("api/user")
//!     .with_dialect(HYPER_SCHEMA_DRAFT_04)
//!     .with_property("tags", RawSchema::typed("array"))
//!     .with_property("group", RawSchema::reference("#/group"));
//!
//! let faults = registry.add_document(&user).unwrap_err();
//! assert_eq!(faults.to_string(), "items in 'user/properties/tags' is nil(4)");
//!
//! // `#/group` was never registered.
//! let faults = registry.validate().unwrap_err();
//! assert_eq!(faults.with_kind(FaultKind::InvalidRef).len(), 1);
//! ```

mod diagnostic;
mod raw;
mod registry;
mod types;
mod walk;

pub use diagnostic::{Cause, Diagnostics, Fault, FaultKind, PropertyProblem};
pub use raw::{RawLink, RawSchema, TypeDecl};
pub use registry::{LOCAL_REF_PREFIX, Registration, SchemaRegistry};
pub use types::{HYPER_SCHEMA_DRAFT_04, KNOWN_TYPES, Link, Schema};
pub use walk::Visit;
