//! HTTP mock backend for manufacturing master data (BOM and Material).
//!
//! The binary in `main.rs` only loads configuration and serves
//! [`router::build_app_router`]; integration tests build the same router
//! around deterministic stores.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
