//! Core Kernel - Foundational types and utilities for the registration system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers
//! - Common error types
//! - Port and adapter abstractions for external collaborators

pub mod circuit;
pub mod error;
pub mod identifiers;
pub mod ports;

pub use circuit::CircuitBreaker;
pub use error::CoreError;
pub use identifiers::{SubmissionId, UserId};
pub use ports::{
    AdapterHealth, CircuitBreakerConfig, DomainPort, HealthCheckResult, HealthCheckable,
    OperationMetadata, PortError,
};
