//! CLI command implementations

pub mod extract;
pub mod routes;
pub mod validate;
