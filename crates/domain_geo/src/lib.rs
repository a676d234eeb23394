//! Geo Lookup Domain
//!
//! Provides the wizard's geographic data: the department list, fetched once
//! at wizard start, and a city list per selected department. The department
//! fields of the store, personal, and company steps each drive their own
//! independent cascade; a city value is only meaningful relative to the
//! department that produced its option list.
//!
//! # Stale responses
//!
//! City fetches are keyed to the department value that triggered them. When
//! a department changes twice in quick succession, the late response for the
//! first selection is discarded by [`cascade::CityCascade::resolve`]; see
//! the cascade module for the full state machine.

pub mod adapters;
pub mod cascade;
pub mod error;
pub mod ports;

pub use adapters::{GeoApiAdapter, GeoApiConfig};
pub use cascade::{CascadeState, CityCascade, GeoScope};
pub use error::GeoError;
pub use ports::GeoPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockGeoPort;
