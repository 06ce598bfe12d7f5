//! Depth-first traversal over normalized schemas.
//!
//! The visitor is called once per schema node and decides whether the walk
//! descends below that node. Children are visited in a fixed order:
//! definitions, properties, items, link schemas. Returning an error from the
//! visitor aborts the whole walk.
//!
//! # Examples
//!
//! ```
//! use std::convert::Infallible;
//!
//! use hyperschema_core::{RawSchema, SchemaRegistry, Visit};
//!
//! let mut registry = SchemaRegistry::new();
//! let raw = RawSchema::typed("object")
//!     .with_property("name", RawSchema::typed("string"))
//!     .with_property("tags", RawSchema::typed("array").with_items(RawSchema::typed("string")));
//! registry.register("user", Some(&raw));
//!
//! let mut seen = Vec::new();
//! registry
//!     .walk(|schema| {
//!         seen.push(schema.id().to_string());
//!         Ok::<_, Infallible>(Visit::Continue)
//!     })
//!     .unwrap();
//! assert_eq!(
//!     seen,
//!     ["user", "user/properties/name", "user/properties/tags", "user/properties/tags/items"]
//! );
//! ```

use crate::Schema;

/// Visitor decision for the node it was just given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Descend into the node's children.
    Continue,
    /// Do not visit anything below this node; siblings are still visited.
    Skip,
}

impl Schema {
    /// Walks this schema and everything below it, depth first.
    pub fn walk<E, F>(&self, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(&Schema) -> Result<Visit, E>,
    {
        self.walk_with(&mut visitor)
    }

    pub(crate) fn walk_with<E, F>(&self, visitor: &mut F) -> Result<(), E>
    where
        F: FnMut(&Schema) -> Result<Visit, E>,
    {
        if visitor(self)? == Visit::Skip {
            return Ok(());
        }
        for child in self.children() {
            child.walk_with(visitor)?;
        }
        Ok(())
    }
}
