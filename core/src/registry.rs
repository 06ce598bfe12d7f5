//! Schema registration and reference checking.
//!
//! [`SchemaRegistry`] turns raw documents into normalized [`Schema`] nodes,
//! giving every nested node a hierarchical identifier:
//!
//! | node                    | identifier                      |
//! |-------------------------|---------------------------------|
//! | definition `name`       | `<owner>/definitions/<name>`    |
//! | property `name`         | `<owner>/properties/<name>`     |
//! | schema of link `n`      | `<owner>/links/<n>`             |
//! | array item schema       | `<owner>/items`                 |
//!
//! Registration never stops at the first problem: every fault found in a
//! document (and in all of its sub-schemas) is collected and returned
//! together. References are only checked later, by
//! [`validate`](SchemaRegistry::validate), once every document is loaded.
//!
//! # Examples
//!
//! ```
//! use hyperschema_core::{HYPER_SCHEMA_DRAFT_04, RawSchema, SchemaRegistry};
//!
//! let mut registry = SchemaRegistry::new();
//!
//! let group = RawSchema::typed("object")
//!     .with_id("api/group")
//!     .with_dialect(HYPER_SCHEMA_DRAFT_04);
//! let user = RawSchema::typed("object")
//!     .with_id("api/user")
//!     .with_dialect(HYPER_SCHEMA_DRAFT_04)
//!     .with_property("group", RawSchema::reference("#/group"));
//!
//! registry.add_document(&group).unwrap();
//! registry.add_document(&user).unwrap();
//! assert!(registry.contains("user/properties/group"));
//! assert!(registry.validate().is_ok());
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::diagnostic::{Diagnostics, Fault, PropertyProblem};
use crate::raw::{RawLink, RawSchema, TypeDecl};
use crate::types::{HYPER_SCHEMA_DRAFT_04, KNOWN_TYPES, Link, Schema};
use crate::walk::Visit;

/// Prefix of a reference into the loaded schema set.
pub const LOCAL_REF_PREFIX: &str = "#/";

/// Result of registering one schema: the normalized node (absent when there
/// was no input) and the faults found while building it.
pub type Registration = (Option<Arc<Schema>>, Option<Diagnostics>);

/// In-memory set of normalized schemas keyed by identifier.
///
/// Holds two aligned maps filled together on every registration:
/// identifier → schema and identifier → raw `$ref` (empty when the schema has
/// none). Identifiers passed directly to [`register`](Self::register) are
/// also remembered as walk roots, in registration order.
///
/// Registering the same identifier twice reports
/// [`Fault::Duplicated`] and the later schema replaces the stored one.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Arc<Schema>>,
    refs: BTreeMap<String, String>,
    roots: Vec<String>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests one parsed source document.
    ///
    /// The document must carry a non-empty `id` without a trailing `/` and
    /// declare the draft-04 hyper-schema dialect; each of these checks fails
    /// alone, before anything is registered. The document is then registered
    /// under the last `/`-separated segment of its `id`.
    ///
    /// # Errors
    ///
    /// Returns every fault found in the document.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperschema_core::{Fault, RawSchema, SchemaRegistry};
    ///
    /// let mut registry = SchemaRegistry::new();
    /// let err = registry.add_document(&RawSchema::typed("object")).unwrap_err();
    /// assert!(matches!(err.iter().next(), Some(Fault::MissingId)));
    /// assert!(registry.is_empty());
    /// ```
    pub fn add_document(&mut self, raw: &RawSchema) -> Result<(), Diagnostics> {
        if raw.id.is_empty() {
            return Err(Fault::MissingId.into());
        }
        if raw.id.ends_with('/') {
            return Err(Fault::extra_slash(&raw.id).into());
        }
        if raw.dialect.is_empty() {
            return Err(Fault::property(&raw.id, "schema", PropertyProblem::Empty).into());
        }
        if raw.dialect != HYPER_SCHEMA_DRAFT_04 {
            return Err(Fault::incorrect(&raw.id, "schema", &raw.dialect).into());
        }

        let key = raw.id.rsplit('/').next().unwrap_or(&raw.id);
        debug!(id = %raw.id, key, "registering document");

        match self.register(key, Some(raw)) {
            (_, None) => Ok(()),
            (_, Some(diagnostics)) => Err(diagnostics),
        }
    }

    /// Registers `raw` and all of its sub-schemas under `id`.
    ///
    /// `None` input registers nothing and reports nothing. The returned
    /// schema is stored even when faults were reported, so that later
    /// reference checks see it.
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty while `raw` is present. Child identifiers are
    /// always derived from a non-empty owner, so this only happens when a
    /// caller breaks that contract.
    pub fn register(&mut self, id: &str, raw: Option<&RawSchema>) -> Registration {
        let registration = self.register_node(id, raw);
        if registration.0.is_some() && !self.roots.iter().any(|root| root == id) {
            self.roots.push(id.to_string());
        }
        registration
    }

    fn register_node(&mut self, id: &str, raw: Option<&RawSchema>) -> Registration {
        let Some(raw) = raw else {
            return (None, None);
        };
        assert!(
            !id.is_empty(),
            "bug: schema registered under an empty identifier"
        );

        let mut diagnostics = Diagnostics::new();
        if self.schemas.contains_key(id) {
            diagnostics.push(Fault::duplicated(id));
        }

        let definitions = self.register_map(id, "definitions", &raw.definitions, &mut diagnostics);
        let properties = self.register_map(id, "properties", &raw.properties, &mut diagnostics);
        let links = self.register_links(id, &raw.links, &mut diagnostics);
        let (items, faults) = self.register_node(&format!("{id}/items"), raw.items.as_deref());
        diagnostics.merge(faults);

        let types = resolve_types(id, raw.type_decl.as_ref(), &mut diagnostics);
        let min_value = resolve_bound(id, "min, minValue", raw.min, raw.min_value, &mut diagnostics);
        let max_value = resolve_bound(id, "max, maxValue", raw.max, raw.max_value, &mut diagnostics);

        // $ref targets are checked by `validate`, after every document is in.
        match (raw.reference.is_empty(), types.is_empty()) {
            (true, true) => {
                diagnostics.push(Fault::property(id, "$ref", PropertyProblem::Nil));
                diagnostics.push(Fault::property(id, "type", PropertyProblem::Nil));
            }
            (false, false) => {
                diagnostics.push(Fault::property(id, "$ref, type", PropertyProblem::Conflicted));
            }
            _ => {}
        }

        for name in &types {
            match name.as_str() {
                "array" => {
                    if items.is_none() {
                        diagnostics.push(Fault::property(id, "items", PropertyProblem::Nil));
                    }
                }
                known if KNOWN_TYPES.contains(&known) => {}
                unknown => diagnostics.push(Fault::incorrect(id, "type", unknown)),
            }
        }

        let schema = Arc::new(Schema {
            id: id.to_string(),
            dialect: raw.dialect.clone(),
            types,
            description: raw.description.clone(),
            reference: raw.reference.clone(),
            example: raw.example.clone(),
            pattern: raw.pattern.clone(),
            required: raw.required.clone(),
            min_value,
            max_value,
            min_length: raw.min_length,
            max_length: raw.max_length,
            definitions,
            properties,
            enum_values: raw.enum_values.clone(),
            items,
            links,
        });

        self.schemas.insert(id.to_string(), Arc::clone(&schema));
        self.refs.insert(id.to_string(), raw.reference.clone());
        (Some(schema), diagnostics.into_option())
    }

    fn register_map(
        &mut self,
        id: &str,
        section: &str,
        source: &BTreeMap<String, Option<RawSchema>>,
        diagnostics: &mut Diagnostics,
    ) -> BTreeMap<String, Arc<Schema>> {
        let mut schemas = BTreeMap::new();
        for (name, raw) in source {
            let (child, faults) = self.register_node(&format!("{id}/{section}/{name}"), raw.as_ref());
            diagnostics.merge(faults);
            if let Some(child) = child {
                schemas.insert(name.clone(), child);
            }
        }
        schemas
    }

    fn register_links(
        &mut self,
        id: &str,
        source: &[RawLink],
        diagnostics: &mut Diagnostics,
    ) -> Vec<Link> {
        source
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let (schema, faults) =
                    self.register_node(&format!("{id}/links/{index}"), raw.schema.as_deref());
                diagnostics.merge(faults);
                Link {
                    title: raw.title.clone(),
                    href: raw.href.clone(),
                    method: raw.method.clone(),
                    rel: raw.rel.clone(),
                    description: raw.description.clone(),
                    schema,
                }
            })
            .collect()
    }

    /// Checks every stored `$ref` against the registered identifiers.
    ///
    /// A reference must start with `#/`; the rest is looked up as an
    /// identifier. Entries are checked in identifier order.
    ///
    /// # Errors
    ///
    /// Returns one [`Fault::PropertyIncorrect`] per reference without the
    /// `#/` prefix and one [`Fault::InvalidRef`] per dangling reference.
    pub fn validate(&self) -> Result<(), Diagnostics> {
        let mut diagnostics = Diagnostics::new();

        for (id, reference) in &self.refs {
            if reference.is_empty() {
                continue;
            }
            let Some(target) = reference.strip_prefix(LOCAL_REF_PREFIX) else {
                diagnostics.push(Fault::incorrect(id, "$ref", reference));
                continue;
            };
            if !self.schemas.contains_key(target) {
                diagnostics.push(Fault::invalid_ref(id, reference));
            }
        }

        debug!(
            schemas = self.schemas.len(),
            faults = diagnostics.len(),
            "validated references"
        );
        diagnostics.into_result()
    }

    /// Walks every root schema depth first, in registration order.
    ///
    /// See [`Visit`] for how the visitor steers the walk. The first error
    /// returned by the visitor stops the walk and is returned.
    pub fn walk<E, F>(&self, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(&Schema) -> Result<Visit, E>,
    {
        for root in &self.roots {
            if let Some(schema) = self.schemas.get(root) {
                schema.walk_with(&mut visitor)?;
            }
        }
        Ok(())
    }

    /// Looks up a schema by identifier.
    pub fn get(&self, id: &str) -> Option<&Arc<Schema>> {
        self.schemas.get(id)
    }

    /// Returns `true` if a schema is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.schemas.contains_key(id)
    }

    /// Raw `$ref` recorded for `id` (empty when the schema has none).
    pub fn reference(&self, id: &str) -> Option<&str> {
        self.refs.get(id).map(String::as_str)
    }

    /// Number of registered schemas, nested ones included.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// All registered identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Identifiers registered as roots, in registration order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }
}

fn resolve_types(id: &str, decl: Option<&TypeDecl>, diagnostics: &mut Diagnostics) -> Vec<String> {
    let Some(decl) = decl else {
        return Vec::new();
    };
    match decl.names() {
        Some(names) => names,
        None => {
            diagnostics.push(Fault::incorrect(id, "type", decl));
            Vec::new()
        }
    }
}

/// Legacy spelling wins over the canonical one; both set is a conflict.
fn resolve_bound(
    id: &str,
    property: &str,
    legacy: Option<f64>,
    canonical: Option<f64>,
    diagnostics: &mut Diagnostics,
) -> f64 {
    match (legacy, canonical) {
        (Some(legacy), Some(_)) => {
            diagnostics.push(Fault::property(id, property, PropertyProblem::Conflicted));
            legacy
        }
        (Some(value), None) | (None, Some(value)) => value,
        (None, None) => 0.0,
    }
}
