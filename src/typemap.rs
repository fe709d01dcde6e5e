//! Translation of runtime [`Type`] tags into TypeScript type names.
//!
//! [`TYPESCRIPT_TYPES`] is the only place the two type vocabularies meet.
//! Supporting another type means adding a row there.

use crate::types::Type;
use serde::Serialize;
use thiserror::Error;

/// Written as the return type of stubs for functions that return `()`.
pub const VOID: &str = "void";

pub const TYPESCRIPT_TYPES: &[(Type, &str)] = &[
    (Type::Int, "number"),
    (Type::String, "string"),
    (Type::Float, "number"),
    (Type::Bool, "boolean"),
    (Type::Nil, "null"),
    (Type::Any, "any"),
];

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("unsupported type: {0}")]
pub struct UnmappedType(pub Type);

pub fn map_type(tag: &Type) -> Result<&'static str, UnmappedType> {
    TYPESCRIPT_TYPES
        .iter()
        .find(|(known, _)| known == tag)
        .map(|(_, ts)| *ts)
        .ok_or_else(|| UnmappedType(tag.clone()))
}

/// Like [`map_type`], except that `Nil` means the function has no result.
pub fn map_return(tag: &Type) -> Result<&'static str, UnmappedType> {
    match tag {
        Type::Nil => Ok(VOID),
        other => map_type(other),
    }
}
