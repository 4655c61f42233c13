//! Note management services.

pub mod service;

pub use service::NoteService;
