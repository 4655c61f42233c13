//! Folder management services.

pub mod service;

pub use service::FolderService;
