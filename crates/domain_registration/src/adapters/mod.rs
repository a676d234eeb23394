//! Adapters implementing the registration domain ports

pub mod backend_api;

pub use backend_api::{BackendApiAdapter, BackendApiConfig};
