//! Fault reporting for schema registration and reference checking.
//!
//! A single problem is a [`Fault`]; every registration or validation pass
//! collects its faults into a [`Diagnostics`] accumulator instead of stopping
//! at the first one. Accumulators are normalized at every public boundary:
//! an accumulator that collected nothing becomes `None` / `Ok(())`, never an
//! empty value.
//!
//! # Examples
//!
//! ```
//! use hyperschema_core::{Diagnostics, Fault, FaultKind};
//!
//! let mut diagnostics = Diagnostics::new();
//! diagnostics.merge(None);
//! assert!(diagnostics.into_option().is_none());
//!
//! let mut diagnostics = Diagnostics::new();
//! diagnostics.push(Fault::MissingId);
//! diagnostics.push(Fault::duplicated("user"));
//! assert_eq!(diagnostics.len(), 2);
//! assert_eq!(diagnostics.with_kind(FaultKind::Duplicated).len(), 1);
//! assert_eq!(
//!     diagnostics.to_string(),
//!     "ID is empty(3)\nduplicated ID 'user'(2)"
//! );
//! ```

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Underlying error wrapped by a [`Fault`] (I/O or parse failures).
pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// Fault category. The discriminant is the numeric code shown in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaultKind {
    /// File could not be read or is not a supported document format.
    UnsupportedFile = 0,
    /// Identifier ends with a path separator.
    ExtraSlash = 1,
    /// Identifier registered more than once.
    Duplicated = 2,
    /// Document has no identifier.
    MissingId = 3,
    /// A named property is nil, empty, or conflicts with another.
    Property = 4,
    /// A property holds a value of the wrong shape or content.
    PropertyIncorrect = 5,
    /// A `$ref` points at an identifier that was never registered.
    InvalidRef = 6,
}

impl FaultKind {
    /// Numeric code of this category.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// What is wrong with a named property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyProblem {
    Nil,
    Empty,
    Conflicted,
}

impl fmt::Display for PropertyProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PropertyProblem::Nil => "is nil",
            PropertyProblem::Empty => "is empty",
            PropertyProblem::Conflicted => "are conflicted",
        })
    }
}

/// A single structural problem found in a schema document.
///
/// `Display` renders the bare message; [`Diagnostics`] appends the numeric
/// code and any wrapped cause when rendering a report.
#[derive(Debug, Error)]
pub enum Fault {
    /// The file extension is not supported, or the file could not be read or
    /// parsed (in which case `cause` holds the underlying error).
    #[error("not supported file")]
    UnsupportedFile {
        #[source]
        cause: Option<Cause>,
    },

    /// The document identifier ends with `/`.
    #[error("extra slash in ID '{id}'")]
    ExtraSlash { id: String },

    /// An identifier was registered twice.
    #[error("duplicated ID '{id}'")]
    Duplicated { id: String },

    /// The document carries no identifier.
    #[error("ID is empty")]
    MissingId,

    /// A named property (or pair of properties) is nil, empty or conflicted.
    #[error("{property} in '{id}' {problem}")]
    Property {
        id: String,
        property: String,
        problem: PropertyProblem,
    },

    /// A property has a structurally wrong value; `value` is a debug dump of
    /// the offending value.
    #[error("{property} in '{id}', {value} is incorrect")]
    PropertyIncorrect {
        id: String,
        property: String,
        value: String,
    },

    /// A local reference does not resolve to a registered identifier.
    #[error("referred from '{id}' to {reference} but it's not found")]
    InvalidRef { id: String, reference: String },
}

impl Fault {
    /// A file fault wrapping the error that made the file unusable.
    pub fn unsupported_file(cause: impl Into<Cause>) -> Self {
        Fault::UnsupportedFile {
            cause: Some(cause.into()),
        }
    }

    /// A file fault for an extension that is not handled at all.
    pub fn unsupported_extension() -> Self {
        Fault::UnsupportedFile { cause: None }
    }

    pub fn extra_slash(id: impl Into<String>) -> Self {
        Fault::ExtraSlash { id: id.into() }
    }

    pub fn duplicated(id: impl Into<String>) -> Self {
        Fault::Duplicated { id: id.into() }
    }

    pub fn property(
        id: impl Into<String>,
        property: impl Into<String>,
        problem: PropertyProblem,
    ) -> Self {
        Fault::Property {
            id: id.into(),
            property: property.into(),
            problem,
        }
    }

    /// A wrong-value fault. The value is captured with its `Debug` form.
    pub fn incorrect(
        id: impl Into<String>,
        property: impl Into<String>,
        value: impl fmt::Debug,
    ) -> Self {
        Fault::PropertyIncorrect {
            id: id.into(),
            property: property.into(),
            value: format!("{value:?}"),
        }
    }

    pub fn invalid_ref(id: impl Into<String>, reference: impl Into<String>) -> Self {
        Fault::InvalidRef {
            id: id.into(),
            reference: reference.into(),
        }
    }

    /// Category of this fault.
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::UnsupportedFile { .. } => FaultKind::UnsupportedFile,
            Fault::ExtraSlash { .. } => FaultKind::ExtraSlash,
            Fault::Duplicated { .. } => FaultKind::Duplicated,
            Fault::MissingId => FaultKind::MissingId,
            Fault::Property { .. } => FaultKind::Property,
            Fault::PropertyIncorrect { .. } => FaultKind::PropertyIncorrect,
            Fault::InvalidRef { .. } => FaultKind::InvalidRef,
        }
    }

    /// Numeric code of this fault's category.
    pub fn code(&self) -> u8 {
        self.kind().code()
    }

    /// Name of the offending property, for property faults.
    pub fn property_name(&self) -> Option<&str> {
        match self {
            Fault::Property { property, .. } | Fault::PropertyIncorrect { property, .. } => {
                Some(property)
            }
            _ => None,
        }
    }

    /// Writes the report line: `<message>(<code>)`, followed by
    /// `;internal:<cause>` when the fault wraps one.
    fn write_line(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self, self.code())?;
        if let Some(cause) = self.source() {
            write!(f, ";internal:{cause}")?;
        }
        Ok(())
    }
}

/// Ordered, append-only collection of faults from one pass.
///
/// Faults keep their order of occurrence and render oldest first, one per
/// line. Use [`into_option`](Diagnostics::into_option) or
/// [`into_result`](Diagnostics::into_result) when handing an accumulator
/// across an API boundary so that "nothing reported" is always `None` /
/// `Ok(())`.
#[derive(Debug, Default)]
pub struct Diagnostics {
    faults: Vec<Fault>,
}

impl Diagnostics {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fault.
    pub fn push(&mut self, fault: Fault) {
        self.faults.push(fault);
    }

    /// Appends every fault of `other`, keeping their order. `None` is a no-op.
    pub fn merge(&mut self, other: Option<Diagnostics>) {
        if let Some(other) = other {
            self.faults.extend(other.faults);
        }
    }

    pub fn len(&self) -> usize {
        self.faults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    /// Iterates faults oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Fault> {
        self.faults.iter()
    }

    /// Returns all faults of the given category.
    pub fn with_kind(&self, kind: FaultKind) -> Vec<&Fault> {
        self.faults.iter().filter(|f| f.kind() == kind).collect()
    }

    /// `None` if nothing was collected, otherwise `Some(self)`.
    pub fn into_option(self) -> Option<Self> {
        if self.faults.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// `Ok(())` if nothing was collected, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        match self.into_option() {
            None => Ok(()),
            Some(diagnostics) => Err(diagnostics),
        }
    }

    /// Consumes the accumulator, returning its faults.
    pub fn into_vec(self) -> Vec<Fault> {
        self.faults
    }
}

impl From<Fault> for Diagnostics {
    fn from(fault: Fault) -> Self {
        Self {
            faults: vec![fault],
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fault) in self.faults.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            fault.write_line(f)?;
        }
        Ok(())
    }
}

impl StdError for Diagnostics {}

impl IntoIterator for Diagnostics {
    type Item = Fault;
    type IntoIter = std::vec::IntoIter<Fault>;

    fn into_iter(self) -> Self::IntoIter {
        self.faults.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Fault;
    type IntoIter = std::slice::Iter<'a, Fault>;

    fn into_iter(self) -> Self::IntoIter {
        self.faults.iter()
    }
}
