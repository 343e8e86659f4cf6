//! Type descriptors for diagnostics.

use std::fmt;

/// The type of a [`crate::Value`], used in error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// The null type.
    Null,
    /// Boolean.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// Text.
    Text,
    /// Raw byte string.
    Blob,
    /// Persistent list.
    List,
    /// Persistent ordered map.
    Map,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Text => write!(f, "text"),
            Self::Blob => write!(f, "blob"),
            Self::List => write!(f, "list"),
            Self::Map => write!(f, "map"),
        }
    }
}
