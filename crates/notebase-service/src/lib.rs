//! # notebase-service
//!
//! Business logic service layer for Notebase. This is where ownership
//! scoping and referential integrity live: every operation receives a
//! trusted [`RequestContext`] from the boundary and validates that all
//! cross-entity references point at entities owned by the same user
//! before anything is written.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod context;
pub mod folder;
pub mod note;
pub mod tag;

pub use account::AccountService;
pub use context::RequestContext;
pub use folder::FolderService;
pub use note::NoteService;
pub use tag::TagService;
