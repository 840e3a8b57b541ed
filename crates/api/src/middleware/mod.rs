//! Request middleware and extractors.
//!
//! - [`auth::AuthUser`] -- identity from a valid access token.
//! - [`auth::RefreshUser`] -- identity from a valid refresh token.
//! - [`preload::preload`] -- loads the entity named by `/{id}` before dispatch.

pub mod auth;
pub mod preload;
