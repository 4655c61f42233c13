//! Shared domain-neutral types and helpers.

pub mod id;

pub use id::{RefPatch, parse_id, parse_optional_ref};
