//! Tag management services.

pub mod service;

pub use service::TagService;
