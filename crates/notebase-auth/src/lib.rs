//! # notebase-auth
//!
//! The token-issuing boundary for Notebase: JWT encoding/decoding and
//! Argon2id password hashing. Tokens are bound to exactly one user and
//! time-limited; the rest of the application consumes the verified
//! identity and never re-derives it from raw credentials.

pub mod jwt;
pub mod password;

pub use jwt::claims::{Claims, TokenType};
pub use jwt::decoder::JwtDecoder;
pub use jwt::encoder::{JwtEncoder, TokenPair};
pub use password::hasher::PasswordHasher;
