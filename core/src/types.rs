//! Normalized schema model.
//!
//! A [`Schema`] is built once by the [`SchemaRegistry`](crate::SchemaRegistry)
//! from a [`RawSchema`](crate::RawSchema) and never changes afterwards.
//! Nested schemas are shared through [`Arc`] between their parent and the
//! registry's identifier map.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

/// Dialect URI every source document must declare in `$schema`.
pub const HYPER_SCHEMA_DRAFT_04: &str = "http://json-schema.org/draft-04/hyper-schema";

/// Type names accepted in the `type` keyword.
pub const KNOWN_TYPES: &[&str] = &[
    "object", "array", "string", "bool", "boolean", "integer", "number",
];

/// A normalized schema node.
///
/// Exactly one of [`reference`](Schema::reference) and
/// [`types`](Schema::types) is non-empty for a schema that registered without
/// faults. Bounds are already resolved from their legacy aliases.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub(crate) id: String,
    /// Dialect URI (`$schema`), usually only set on document roots.
    pub dialect: String,
    /// Resolved type names; empty when the schema is a pure reference.
    pub types: Vec<String>,
    pub description: String,
    /// Raw `$ref` value; empty when absent.
    pub reference: String,
    pub example: Option<Value>,
    pub pattern: String,
    pub required: Vec<String>,
    /// Effective lower bound (`min`, else `minValue`, else 0).
    pub min_value: f64,
    /// Effective upper bound (`max`, else `maxValue`, else 0).
    pub max_value: f64,
    pub min_length: i64,
    pub max_length: i64,
    pub definitions: BTreeMap<String, Arc<Schema>>,
    pub properties: BTreeMap<String, Arc<Schema>>,
    pub enum_values: Vec<String>,
    /// Item schema of an array type.
    pub items: Option<Arc<Schema>>,
    pub links: Vec<Link>,
}

impl Schema {
    /// Hierarchical identifier this schema is registered under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `true` if this schema is a `$ref`.
    pub fn is_reference(&self) -> bool {
        !self.reference.is_empty()
    }

    /// Returns `true` if `name` is one of the resolved types.
    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t == name)
    }

    /// Direct sub-schemas in traversal order: definitions, properties, items,
    /// then link schemas.
    pub fn children(&self) -> impl Iterator<Item = &Schema> {
        self.definitions
            .values()
            .chain(self.properties.values())
            .chain(self.items.iter())
            .chain(self.links.iter().filter_map(|link| link.schema.as_ref()))
            .map(|schema| &**schema)
    }
}

/// A normalized hypermedia link.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub title: String,
    pub href: String,
    pub method: String,
    pub rel: String,
    pub description: String,
    /// Request schema, registered under `<owner>/links/<index>`.
    pub schema: Option<Arc<Schema>>,
}
