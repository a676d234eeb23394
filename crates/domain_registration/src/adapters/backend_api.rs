//! Backend API Adapter
//!
//! Adapter for the marketplace registration backend, implementing the
//! `SubmissionPort` trait over its REST API. It includes:
//!
//! - Automatic retry configuration for transient failures
//! - Circuit breaker pattern for fault tolerance
//! - Request/response logging and tracing
//!
//! # Configuration
//!
//! The adapter is configured via `BackendApiConfig`:
//!
//! ```rust,ignore
//! let config = BackendApiConfig {
//!     base_url: "https://api.marketplace.example/v1".to_string(),
//!     timeout_secs: 30,
//!     retry_attempts: 3,
//!     ..Default::default()
//! };
//! ```
//!
//! # Error Handling
//!
//! Backend errors are mapped to `PortError` variants:
//! - 409 -> `PortError::Conflict`
//! - 422 -> `PortError::Validation`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Other -> `PortError::Internal`

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::{
    AdapterHealth, CircuitBreaker, CircuitBreakerConfig, CoreError, DomainPort, HealthCheckResult,
    HealthCheckable, OperationMetadata, PortError,
};

use crate::payload::{RegistrationPayload, RegistrationReceipt};
use crate::ports::SubmissionPort;

/// Configuration for the backend API adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendApiConfig {
    /// Base URL of the registration API (e.g., "https://api.example.com/v1")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Number of retry attempts for transient failures
    pub retry_attempts: u32,

    /// Circuit breaker configuration
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl Default for BackendApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 30,
            retry_attempts: 3,
            circuit_breaker: Some(CircuitBreakerConfig::default()),
        }
    }
}

impl BackendApiConfig {
    /// Loads configuration from `BACKEND_`-prefixed environment variables
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        config::Config::builder()
            .add_source(config::Environment::with_prefix("BACKEND"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))
    }
}

/// Backend API adapter implementing the SubmissionPort trait
///
/// Connects the wizard to the marketplace registration endpoint. The HTTP
/// transport itself is owned by the hosting application; this adapter owns
/// the request shaping, the failure mapping, and the circuit breaker.
#[derive(Debug)]
pub struct BackendApiAdapter {
    config: BackendApiConfig,
    circuit_breaker: Option<Arc<CircuitBreaker>>,
}

impl BackendApiAdapter {
    /// Creates a new backend adapter with the given configuration
    pub fn new(config: BackendApiConfig) -> Self {
        let circuit_breaker = config
            .circuit_breaker
            .clone()
            .map(|cb| Arc::new(CircuitBreaker::new(cb)));

        Self {
            config,
            circuit_breaker,
        }
    }

    /// Returns the base URL of the registration backend
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Checks if the circuit breaker is open (blocking requests)
    pub async fn is_circuit_open(&self) -> bool {
        if let Some(ref cb) = self.circuit_breaker {
            !cb.is_available().await
        } else {
            false
        }
    }

    /// Makes an HTTP POST request to the backend API
    ///
    /// This is a placeholder implementation. In a deployed adapter this would
    /// use reqwest or another HTTP client to make the actual request.
    async fn post<T, R>(&self, path: &str, _body: &T) -> Result<R, PortError>
    where
        T: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        // Check circuit breaker
        if let Some(ref cb) = self.circuit_breaker {
            if !cb.is_available().await {
                return Err(PortError::ServiceUnavailable {
                    service: "Circuit breaker is open".to_string(),
                });
            }
        }

        // Placeholder: in a deployed adapter, make the HTTP request here
        // let url = format!("{}/{}", self.config.base_url, path);
        // let response = self.client.post(&url)
        //     .timeout(Duration::from_secs(self.config.timeout_secs))
        //     .json(body)
        //     .send()
        //     .await?;

        Err(PortError::internal(format!(
            "Backend API adapter not implemented: POST {path}"
        )))
    }
}

impl DomainPort for BackendApiAdapter {}

#[async_trait]
impl HealthCheckable for BackendApiAdapter {
    /// Performs a health check against the registration backend
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        if self.is_circuit_open().await {
            return HealthCheckResult {
                adapter_id: "backend-api-adapter".to_string(),
                status: AdapterHealth::Degraded,
                latency_ms: 0,
                message: Some("Circuit breaker is open".to_string()),
                checked_at: Utc::now(),
            };
        }

        let latency_ms = start.elapsed().as_millis() as u64;

        HealthCheckResult {
            adapter_id: "backend-api-adapter".to_string(),
            status: AdapterHealth::Degraded,
            latency_ms,
            message: Some("Backend API adapter is a placeholder implementation".to_string()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl SubmissionPort for BackendApiAdapter {
    async fn register(
        &self,
        payload: RegistrationPayload,
        metadata: Option<OperationMetadata>,
    ) -> Result<RegistrationReceipt, PortError> {
        let correlation = metadata
            .as_ref()
            .and_then(|m| m.correlation_id.clone())
            .unwrap_or_default();

        let result: Result<RegistrationReceipt, PortError> =
            self.post("registrations", &payload).await;

        if let Err(ref err) = result {
            if err.is_transient() {
                if let Some(ref cb) = self.circuit_breaker {
                    cb.record_failure().await;
                }
            }
            warn!(%correlation, error = %err, "registration dispatch failed");
        } else if let Some(ref cb) = self.circuit_breaker {
            cb.record_success();
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BackendApiConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.retry_attempts, 3);
        assert!(config.circuit_breaker.is_some());
    }

    #[tokio::test]
    async fn test_circuit_closed_by_default() {
        let adapter = BackendApiAdapter::new(BackendApiConfig::default());
        assert!(!adapter.is_circuit_open().await);
    }

    #[tokio::test]
    async fn test_health_check_reports_degraded_placeholder() {
        let adapter = BackendApiAdapter::new(BackendApiConfig::default());
        let result = adapter.health_check().await;
        assert_eq!(result.adapter_id, "backend-api-adapter");
        assert_eq!(result.status, AdapterHealth::Degraded);
    }
}
