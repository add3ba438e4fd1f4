//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`accounts`] -- the fixed mock accounts accepted by the login endpoint.

pub mod accounts;
pub mod jwt;
