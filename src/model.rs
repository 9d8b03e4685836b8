//! Data model for parsed annotations — format-agnostic.

use crate::types::TypeExpr;

/// A single documented function, built from one annotation block.
///
/// Immutable once constructed; renderers only borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionDoc {
    /// Assigned by the caller from the definition line, not parsed from
    /// the block body.
    pub name: String,
    /// Single optional summary line (empty when absent).
    pub summary: String,
    /// `@param` entries, in source order.
    pub params: Vec<Param>,
    /// `@return` entries, in source order (a positional tuple, not
    /// alternatives).
    pub returns: Vec<Return>,
    /// Verbatim `@example` block.
    pub example: Option<String>,
    /// Verbatim `@note` block.
    pub note: Option<String>,
    /// `@private` — excluded from all rendered output.
    pub private: bool,
}

impl FunctionDoc {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionDoc {
            name: name.into(),
            ..FunctionDoc::default()
        }
    }

    /// True if any top-level parameter carries sub-parameters; toggles the
    /// extra table column in the markdown renderer.
    pub fn has_subparams(&self) -> bool {
        self.params.iter().any(|p| !p.subparams.is_empty())
    }

    /// Clone this document under a different display name, e.g. to publish
    /// a constructor's documentation as the containing module's entry.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        let mut doc = self.clone();
        doc.name = name.into();
        doc
    }
}

/// A `@param` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeExpr,
    pub desc: String,
    /// Nested fields of a table-shaped parameter. One level deep only.
    pub subparams: Vec<Param>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeExpr, desc: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            ty,
            desc: desc.into(),
            subparams: Vec::new(),
        }
    }
}

/// A `@return` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Return {
    pub ty: TypeExpr,
    pub desc: String,
}
