//! Master-data domain: BOM and Material records, the list-query pipeline
//! (filter, sort, paginate), CSV projection, import validation and the mock
//! mutation actions used by the admin API.
//!
//! Nothing in this crate performs I/O; handlers in `mdm-api` own the
//! transport and feed request data through these functions.

pub mod actions;
pub mod bom;
pub mod error;
pub mod export;
pub mod faults;
pub mod field;
pub mod fixtures;
pub mod import;
pub mod material;
pub mod paginate;
pub mod query;
pub mod record;
pub mod store;
pub mod types;
