//! Geo Domain Ports
//!
//! The `GeoPort` trait defines the two lookups the wizard needs from the
//! geographic data source: the department list, fetched once at wizard
//! start, and the city list for a given department, refetched on every
//! department change. Adapters:
//!
//! - **External API Adapter**: calls the marketplace's geo endpoint
//! - **Mock Adapter**: seeded in-memory data for testing

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};

/// The port trait for geographic lookups
///
/// Department and city values are opaque display strings; a city value is
/// only meaningful relative to the department that produced its option list.
#[async_trait]
pub trait GeoPort: DomainPort {
    /// Returns the full list of administrative departments
    ///
    /// No pagination; the full list per call.
    async fn departments(&self) -> Result<Vec<String>, PortError>;

    /// Returns the full list of cities for one department
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` when the department is unknown.
    async fn cities(&self, department: &str) -> Result<Vec<String>, PortError>;
}

/// Mock implementation of GeoPort for testing
///
/// Stores department→cities data in memory with optional failure injection
/// for exercising the recoverable-failure path of the cascades.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of GeoPort
    #[derive(Debug)]
    pub struct MockGeoPort {
        data: Arc<RwLock<BTreeMap<String, Vec<String>>>>,
        fail_next: Arc<RwLock<bool>>,
    }

    impl MockGeoPort {
        /// Creates a mock port seeded with a small Colombian dataset
        pub fn new() -> Self {
            let mut data = BTreeMap::new();
            data.insert(
                "Antioquia".to_string(),
                vec![
                    "Medellín".to_string(),
                    "Envigado".to_string(),
                    "El Retiro".to_string(),
                    "Rionegro".to_string(),
                ],
            );
            data.insert(
                "Cundinamarca".to_string(),
                vec![
                    "Bogotá".to_string(),
                    "Chía".to_string(),
                    "Zipaquirá".to_string(),
                ],
            );
            data.insert(
                "Valle del Cauca".to_string(),
                vec![
                    "Cali".to_string(),
                    "Palmira".to_string(),
                    "Buenaventura".to_string(),
                ],
            );
            Self {
                data: Arc::new(RwLock::new(data)),
                fail_next: Arc::new(RwLock::new(false)),
            }
        }

        /// Creates a mock port with explicit data
        pub fn with_data(data: BTreeMap<String, Vec<String>>) -> Self {
            Self {
                data: Arc::new(RwLock::new(data)),
                fail_next: Arc::new(RwLock::new(false)),
            }
        }

        /// Makes the next lookup fail with a connection error
        pub async fn fail_next(&self) {
            *self.fail_next.write().await = true;
        }

        async fn take_failure(&self) -> bool {
            let mut flag = self.fail_next.write().await;
            std::mem::take(&mut *flag)
        }
    }

    impl Default for MockGeoPort {
        fn default() -> Self {
            Self::new()
        }
    }

    impl DomainPort for MockGeoPort {}

    #[async_trait]
    impl GeoPort for MockGeoPort {
        async fn departments(&self) -> Result<Vec<String>, PortError> {
            if self.take_failure().await {
                return Err(PortError::connection("geo service unreachable"));
            }
            Ok(self.data.read().await.keys().cloned().collect())
        }

        async fn cities(&self, department: &str) -> Result<Vec<String>, PortError> {
            if self.take_failure().await {
                return Err(PortError::connection("geo service unreachable"));
            }
            self.data
                .read()
                .await
                .get(department)
                .cloned()
                .ok_or_else(|| PortError::not_found("Department", department))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockGeoPort;
    use super::*;

    #[tokio::test]
    async fn test_mock_port_departments_sorted() {
        let port = MockGeoPort::new();
        let departments = port.departments().await.unwrap();
        assert_eq!(
            departments,
            vec!["Antioquia", "Cundinamarca", "Valle del Cauca"]
        );
    }

    #[tokio::test]
    async fn test_mock_port_cities_per_department() {
        let port = MockGeoPort::new();
        let cities = port.cities("Antioquia").await.unwrap();
        assert!(cities.contains(&"Medellín".to_string()));

        let other = port.cities("Cundinamarca").await.unwrap();
        assert!(other.contains(&"Bogotá".to_string()));
        assert!(!other.contains(&"Medellín".to_string()));
    }

    #[tokio::test]
    async fn test_mock_port_unknown_department() {
        let port = MockGeoPort::new();
        let err = port.cities("Narnia").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_port_failure_injection_is_one_shot() {
        let port = MockGeoPort::new();
        port.fail_next().await;
        assert!(port.departments().await.is_err());
        assert!(port.departments().await.is_ok());
    }
}
