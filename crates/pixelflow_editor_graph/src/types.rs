// SPDX-License-Identifier: MIT OR Apache-2.0
//! Type expressions consumed by the inference subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A structured type expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpression {
    /// A numeric literal type
    Numeric(f64),
    /// A named type with named numeric fields
    Named(NamedExpression),
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Named(expr) => expr.fmt(f),
        }
    }
}

/// A named type with a mapping of named numeric fields,
/// e.g. `UpscaleModel { scale: 4 }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedExpression {
    /// Type name
    pub name: String,
    /// Named numeric fields
    pub fields: Vec<NamedField>,
}

impl NamedExpression {
    /// Create a named expression without fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a named numeric field
    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.push(NamedField {
            name: name.into(),
            value,
        });
        self
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<f64> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value)
    }
}

impl fmt::Display for NamedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return write!(f, "{}", self.name);
        }
        write!(f, "{} {{ ", self.name)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field.name, field.value)?;
        }
        write!(f, " }}")
    }
}

/// One named numeric field of a [`NamedExpression`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedField {
    /// Field name
    pub name: String,
    /// Field value
    pub value: f64,
}

/// Manual override for one node output's type.
///
/// An explicit sum type so the clear transition is unambiguous: writing
/// [`OutputTypeOverride::NoOverride`] restores inference-based typing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum OutputTypeOverride {
    /// No override; the inferred type applies
    #[default]
    NoOverride,
    /// The given expression supersedes the inferred type
    Override(TypeExpression),
}

impl OutputTypeOverride {
    /// The overriding expression, if any
    pub fn as_expression(&self) -> Option<&TypeExpression> {
        match self {
            Self::NoOverride => None,
            Self::Override(expr) => Some(expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_expression_fields() {
        let expr = NamedExpression::new("UpscaleModel")
            .with_field("scale", 4.0)
            .with_field("nf", 64.0);
        assert_eq!(expr.field("scale"), Some(4.0));
        assert_eq!(expr.field("channels"), None);
    }

    #[test]
    fn test_display() {
        let expr = NamedExpression::new("UpscaleModel")
            .with_field("scale", 4.0)
            .with_field("nf", 64.0);
        assert_eq!(expr.to_string(), "UpscaleModel { scale: 4, nf: 64 }");
        assert_eq!(NamedExpression::new("Image").to_string(), "Image");
        assert_eq!(TypeExpression::Numeric(2.0).to_string(), "2");
    }

    #[test]
    fn test_override_expression_access() {
        let over = OutputTypeOverride::Override(TypeExpression::Numeric(1.0));
        assert!(over.as_expression().is_some());
        assert!(OutputTypeOverride::NoOverride.as_expression().is_none());
    }
}
