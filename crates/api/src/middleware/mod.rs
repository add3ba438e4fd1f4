//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated account from a JWT Bearer token.

pub mod auth;
