//! Geo API Adapter
//!
//! Adapter for the marketplace's geographic lookup endpoint, implementing
//! the `GeoPort` trait over its REST API. Failures are mapped onto
//! `PortError` so the cascades can treat every adapter the same way; the
//! wizard never blocks on a geo failure.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use core_kernel::{
    AdapterHealth, CircuitBreaker, CircuitBreakerConfig, CoreError, DomainPort, HealthCheckResult,
    HealthCheckable, PortError,
};

use crate::ports::GeoPort;

/// Configuration for the geo API adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoApiConfig {
    /// Base URL of the geo API (e.g., "https://api.example.com/v1/geo")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Circuit breaker configuration
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl Default for GeoApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 10,
            circuit_breaker: Some(CircuitBreakerConfig::default()),
        }
    }
}

impl GeoApiConfig {
    /// Loads configuration from `GEO_`-prefixed environment variables
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        config::Config::builder()
            .add_source(config::Environment::with_prefix("GEO"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))
    }
}

/// Geo API adapter implementing the GeoPort trait
#[derive(Debug)]
pub struct GeoApiAdapter {
    config: GeoApiConfig,
    circuit_breaker: Option<Arc<CircuitBreaker>>,
}

impl GeoApiAdapter {
    /// Creates a new geo adapter with the given configuration
    pub fn new(config: GeoApiConfig) -> Self {
        let circuit_breaker = config
            .circuit_breaker
            .clone()
            .map(|cb| Arc::new(CircuitBreaker::new(cb)));

        Self {
            config,
            circuit_breaker,
        }
    }

    /// Returns the base URL of the geo service
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

    /// Makes an HTTP GET request to the geo API
    ///
    /// This is a placeholder implementation. In a deployed adapter this would
    /// use reqwest or another HTTP client to make the actual request.
    async fn get<R: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<R, PortError> {
        if let Some(ref cb) = self.circuit_breaker {
            if !cb.is_available().await {
                return Err(PortError::ServiceUnavailable {
                    service: "Circuit breaker is open".to_string(),
                });
            }
        }

        // Placeholder: in a deployed adapter, make the HTTP request here
        // let url = format!("{}/{}", self.config.base_url, path);
        // let response = self.client.get(&url)
        //     .timeout(Duration::from_secs(self.config.timeout_secs))
        //     .send()
        //     .await?;

        Err(PortError::internal(format!(
            "Geo API adapter not implemented: GET {path}"
        )))
    }
}

impl DomainPort for GeoApiAdapter {}

#[async_trait]
impl HealthCheckable for GeoApiAdapter {
    /// Performs a health check against the geo service
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        if self.is_circuit_open().await {
            return HealthCheckResult {
                adapter_id: "geo-api-adapter".to_string(),
                status: AdapterHealth::Degraded,
                latency_ms: 0,
                message: Some("Circuit breaker is open".to_string()),
                checked_at: Utc::now(),
            };
        }

        let latency_ms = start.elapsed().as_millis() as u64;

        HealthCheckResult {
            adapter_id: "geo-api-adapter".to_string(),
            status: AdapterHealth::Degraded,
            latency_ms,
            message: Some("Geo API adapter is a placeholder implementation".to_string()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl GeoPort for GeoApiAdapter {
    async fn departments(&self) -> Result<Vec<String>, PortError> {
        let result = self.get("departments").await;
        if let Err(ref err) = result {
            if err.is_transient() {
                if let Some(ref cb) = self.circuit_breaker {
                    cb.record_failure().await;
                }
            }
        } else if let Some(ref cb) = self.circuit_breaker {
            cb.record_success();
        }
        result
    }

    async fn cities(&self, department: &str) -> Result<Vec<String>, PortError> {
        let result = self.get(&format!("departments/{department}/cities")).await;
        if let Err(ref err) = result {
            if err.is_transient() {
                if let Some(ref cb) = self.circuit_breaker {
                    cb.record_failure().await;
                }
            }
        } else if let Some(ref cb) = self.circuit_breaker {
            cb.record_success();
        }
        result
    }
}
