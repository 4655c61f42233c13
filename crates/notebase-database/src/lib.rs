//! # notebase-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all Notebase entities.
//!
//! Every folder/tag/note query is owner-scoped at the SQL level: the
//! `owner_id` of the trusted caller is part of every WHERE clause, so a
//! foreign-owned row is indistinguishable from an absent one.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::create_pool;
