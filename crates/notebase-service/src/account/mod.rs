//! Account services — signup, credential verification, token issuing.

pub mod service;

pub use service::AccountService;
