//! # notebase-entity
//!
//! Domain entity models for Notebase: users, folders, tags, and notes,
//! together with the data carriers used to create and update them.

pub mod folder;
pub mod note;
pub mod tag;
pub mod user;

pub use folder::Folder;
pub use note::Note;
pub use tag::Tag;
pub use user::User;
