//! Adapters implementing the geo domain port

pub mod geo_api;

pub use geo_api::{GeoApiAdapter, GeoApiConfig};
