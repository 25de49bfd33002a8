//! Authentication primitives for the admin area.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed session token generation and validation.
//! - [`cookie`] -- the session cookie carrying the token.

pub mod cookie;
pub mod jwt;
pub mod password;
