pub mod auth;
pub mod master_data;
