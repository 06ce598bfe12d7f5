//! Raw document model.
//!
//! These types mirror a hyper-schema document exactly as it was written
//! (YAML or JSON). Nothing is checked here: every field is optional, and the
//! `type` keyword keeps whatever shape it had so the registry can report a
//! wrong shape instead of the parser rejecting the whole file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `type` keyword as written: one name, a list of names, or anything
/// else (kept verbatim so it can be reported).
///
/// # Examples
///
/// ```
/// use hyperschema_core::TypeDecl;
///
/// assert_eq!(TypeDecl::from("object").names(), Some(vec!["object".to_string()]));
///
/// let list: TypeDecl = serde_json::from_str(r#"["string", "integer"]"#).unwrap();
/// assert_eq!(list.names().unwrap().len(), 2);
///
/// let bad: TypeDecl = serde_json::from_str(r#"["string", 5]"#).unwrap();
/// assert!(bad.names().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    /// `type: string`
    Name(String),
    /// `type: [string, "null"]`
    Names(Vec<String>),
    /// Any other shape.
    Other(Value),
}

impl TypeDecl {
    /// Resolves the declaration into an ordered list of type names, or
    /// `None` when it is neither a string nor a list of strings.
    pub fn names(&self) -> Option<Vec<String>> {
        match self {
            TypeDecl::Name(name) => Some(vec![name.clone()]),
            TypeDecl::Names(names) => Some(names.clone()),
            TypeDecl::Other(_) => None,
        }
    }
}

impl From<&str> for TypeDecl {
    fn from(name: &str) -> Self {
        TypeDecl::Name(name.to_string())
    }
}

impl From<Vec<&str>> for TypeDecl {
    fn from(names: Vec<&str>) -> Self {
        TypeDecl::Names(names.into_iter().map(String::from).collect())
    }
}

/// A schema node as written in a source document.
///
/// `min`/`max` are legacy spellings of `minValue`/`maxValue`; setting both
/// spellings of the same bound is reported as a conflict during registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSchema {
    /// Document identifier (only meaningful on the document root).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Dialect URI from `$schema`.
    #[serde(rename = "$schema", skip_serializing_if = "String::is_empty")]
    pub dialect: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_decl: Option<TypeDecl>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Local reference from `$ref`.
    #[serde(rename = "$ref", skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pattern: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    pub min_length: i64,
    pub max_length: i64,
    /// Named sub-schemas; an entry written without a value is kept as `None`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, Option<RawSchema>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Option<RawSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<RawSchema>>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RawLink>,
}

impl RawSchema {
    /// Creates a schema declaring the given type(s).
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperschema_core::RawSchema;
    ///
    /// let user = RawSchema::typed("object")
    ///     .with_property("name", RawSchema::typed("string"))
    ///     .with_property("group", RawSchema::reference("#/group"));
    /// assert_eq!(user.properties.len(), 2);
    /// ```
    pub fn typed(type_decl: impl Into<TypeDecl>) -> Self {
        Self {
            type_decl: Some(type_decl.into()),
            ..Self::default()
        }
    }

    /// Creates a schema that is only a `$ref`.
    pub fn reference(reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            ..Self::default()
        }
    }

    /// Sets the document identifier.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets `$schema`.
    pub fn with_dialect(mut self, dialect: &str) -> Self {
        self.dialect = dialect.to_string();
        self
    }

    pub fn with_definition(mut self, name: &str, schema: RawSchema) -> Self {
        self.definitions.insert(name.to_string(), Some(schema));
        self
    }

    pub fn with_property(mut self, name: &str, schema: RawSchema) -> Self {
        self.properties.insert(name.to_string(), Some(schema));
        self
    }

    pub fn with_items(mut self, schema: RawSchema) -> Self {
        self.items = Some(Box::new(schema));
        self
    }

    pub fn with_link(mut self, link: RawLink) -> Self {
        self.links.push(link);
        self
    }
}

/// A hypermedia link as written in a source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLink {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub method: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Request schema embedded in the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Box<RawSchema>>,
}

impl RawLink {
    /// Creates a link for `method href` with the given relation.
    pub fn new(rel: &str, method: &str, href: &str) -> Self {
        Self {
            rel: rel.to_string(),
            method: method.to_string(),
            href: href.to_string(),
            ..Self::default()
        }
    }

    /// Attaches a request schema.
    pub fn with_schema(mut self, schema: RawSchema) -> Self {
        self.schema = Some(Box::new(schema));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_yaml_document() {
        let yaml = r##"
id: api/user
$schema: http://json-schema.org/draft-04/hyper-schema
type: object
description: A user
definitions:
  name:
    type: string
    minLength: 1
    maxLength: 64
properties:
  name:
    $ref: "#/user/definitions/name"
  age:
    type: [integer, "null"]
    minValue: 0
    max: 200
  tags:
    type: array
    items:
      type: string
      enum: [a, b]
links:
  - title: Info
    href: /users/{id}
    method: GET
    rel: self
    schema:
      type: object
"##;
        let raw: RawSchema = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(raw.id, "api/user");
        assert_eq!(raw.dialect, "http://json-schema.org/draft-04/hyper-schema");
        assert_eq!(raw.type_decl, Some(TypeDecl::from("object")));
        let name = raw.definitions["name"].as_ref().unwrap();
        assert_eq!(name.min_length, 1);
        assert_eq!(name.max_length, 64);
        let name_ref = raw.properties["name"].as_ref().unwrap();
        assert_eq!(name_ref.reference, "#/user/definitions/name");

        let age = raw.properties["age"].as_ref().unwrap();
        assert_eq!(age.type_decl, Some(TypeDecl::from(vec!["integer", "null"])));
        assert_eq!(age.min_value, Some(0.0));
        assert_eq!(age.max, Some(200.0));
        assert_eq!(age.min, None);

        let tags = raw.properties["tags"].as_ref().unwrap();
        let items = tags.items.as_deref().unwrap();
        assert_eq!(items.enum_values, vec!["a", "b"]);

        assert_eq!(raw.links.len(), 1);
        assert_eq!(raw.links[0].method, "GET");
        assert!(raw.links[0].schema.is_some());
    }

    #[test]
    fn test_entry_without_value_is_none() {
        let raw: RawSchema = serde_yaml::from_str("properties:\n  foo:\n  bar:\n    type: string\n").unwrap();
        assert_eq!(raw.properties.len(), 2);
        assert!(raw.properties["foo"].is_none());
        assert!(raw.properties["bar"].is_some());
    }

    #[test]
    fn test_negative_lengths_parse() {
        let raw: RawSchema = serde_yaml::from_str("minLength: -1\nmaxLength: -5").unwrap();
        assert_eq!(raw.min_length, -1);
        assert_eq!(raw.max_length, -5);
    }

    #[test]
    fn test_unexpected_type_shape_is_kept() {
        let raw: RawSchema = serde_yaml::from_str("type: 5").unwrap();
        assert!(matches!(raw.type_decl, Some(TypeDecl::Other(_))));

        let raw: RawSchema = serde_yaml::from_str("type: {a: b}").unwrap();
        assert!(raw.type_decl.unwrap().names().is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let raw: RawSchema =
            serde_json::from_str(r#"{"title": "x", "type": "string", "format": "uuid"}"#).unwrap();
        assert_eq!(raw.type_decl, Some(TypeDecl::from("string")));
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let json = serde_json::to_value(RawSchema::reference("#/a")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"$ref": "#/a", "minLength": 0, "maxLength": 0})
        );
    }
}
