//! # notebase-core
//!
//! Core crate for Notebase. Contains configuration schemas, identifier
//! helpers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Notebase crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
