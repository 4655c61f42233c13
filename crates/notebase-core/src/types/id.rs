//! Identifier parsing and normalization.
//!
//! Client-supplied identifiers are validated here before any store query;
//! a malformed id short-circuits with a validation error and never reaches
//! the database. An empty string in a reference position means "no
//! reference", not "malformed".

use uuid::Uuid;

use crate::error::AppError;

/// Parse a client-supplied identifier, rejecting malformed values.
pub fn parse_id(value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value).map_err(|_| AppError::validation("invalid id"))
}

/// Normalize an optional reference field from a create payload.
///
/// `None` and `Some("")` both mean "no reference"; any other value must be
/// a well-formed identifier.
pub fn parse_optional_ref(value: Option<&str>) -> Result<Option<Uuid>, AppError> {
    match value {
        None => Ok(None),
        Some("") => Ok(None),
        Some(raw) => parse_id(raw).map(Some),
    }
}

/// A reference change requested by a partial update.
///
/// Distinct from an omitted field: omission leaves the stored reference
/// untouched, while an empty string clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefPatch {
    /// Remove the stored reference.
    Clear,
    /// Point the reference at the given entity.
    Set(Uuid),
}

impl RefPatch {
    /// Parse a reference field that was present in a patch payload.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        if value.is_empty() {
            Ok(Self::Clear)
        } else {
            parse_id(value).map(Self::Set)
        }
    }

    /// The target id, if this patch sets one.
    pub fn target(&self) -> Option<Uuid> {
        match self {
            Self::Clear => None,
            Self::Set(id) => Some(*id),
        }
    }
}
