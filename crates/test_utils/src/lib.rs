//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! registration test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built valid field sets for every wizard step
//! - `builders`: Builder patterns for registration form construction
//! - `assertions`: Custom assertion helpers for validation-error maps
//! - `generators`: Property-based and fake-data generators
//! - `logging`: Tracing subscriber setup for tests

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod logging;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use logging::*;
