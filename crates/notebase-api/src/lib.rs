//! # notebase-api
//!
//! HTTP API layer for Notebase built on Axum.
//!
//! Provides the REST endpoints, the bearer-token extractor, DTOs, and
//! request logging. Handlers are thin: extract, call the service layer,
//! wrap the result. The error-to-status mapping lives on [`AppError`]
//! itself (in `notebase-core`, next to the type).
//!
//! [`AppError`]: notebase_core::error::AppError

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
