//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- access/refresh token generation and validation.
//! - [`cookies`] -- setting and clearing the token cookies.

pub mod cookies;
pub mod jwt;
pub mod password;
