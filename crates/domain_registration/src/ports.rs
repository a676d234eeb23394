//! Registration Domain Ports
//!
//! The `SubmissionPort` trait defines the single operation the wizard needs
//! from the registration backend. Adapters:
//!
//! - **External API Adapter**: posts the payload to the marketplace backend
//! - **Mock Adapter**: in-memory capture for testing without a network
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_registration::ports::SubmissionPort;
//! use std::sync::Arc;
//!
//! pub struct WizardController {
//!     submission: Arc<dyn SubmissionPort>,
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, OperationMetadata, PortError};

use crate::payload::{RegistrationPayload, RegistrationReceipt};

/// The port trait for dispatching a completed registration
///
/// All methods are async and return `Result<T, PortError>` for consistent
/// error handling across adapter implementations.
#[async_trait]
pub trait SubmissionPort: DomainPort {
    /// Submits an assembled registration payload to the backend
    ///
    /// # Arguments
    ///
    /// * `payload` - One of the three branch payload shapes
    /// * `metadata` - Optional operation metadata for tracing/auditing
    ///
    /// # Returns
    ///
    /// The created account's identifier and role, or a `PortError` whose
    /// message the controller routes to a field or a notification.
    async fn register(
        &self,
        payload: RegistrationPayload,
        metadata: Option<OperationMetadata>,
    ) -> Result<RegistrationReceipt, PortError>;
}

/// Mock implementation of SubmissionPort for testing
///
/// Captures submitted payloads in memory and rejects duplicate emails the
/// way the real backend does.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::UserId;

    /// In-memory mock implementation of SubmissionPort
    #[derive(Debug, Default)]
    pub struct MockSubmissionPort {
        submissions: Arc<RwLock<Vec<RegistrationPayload>>>,
        registered_emails: Arc<RwLock<HashSet<String>>>,
        fail_with: Arc<RwLock<Option<String>>>,
    }

    impl MockSubmissionPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every subsequent call fail validation with the given message
        ///
        /// Used to exercise the controller's error routing.
        pub async fn fail_with(&self, message: impl Into<String>) {
            *self.fail_with.write().await = Some(message.into());
        }

        /// Clears a previously configured failure
        pub async fn recover(&self) {
            *self.fail_with.write().await = None;
        }

        /// Number of payloads accepted so far
        pub async fn submission_count(&self) -> usize {
            self.submissions.read().await.len()
        }

        /// The most recently accepted payload, if any
        pub async fn last_submission(&self) -> Option<RegistrationPayload> {
            self.submissions.read().await.last().cloned()
        }
    }

    impl DomainPort for MockSubmissionPort {}

    #[async_trait]
    impl SubmissionPort for MockSubmissionPort {
        async fn register(
            &self,
            payload: RegistrationPayload,
            _metadata: Option<OperationMetadata>,
        ) -> Result<RegistrationReceipt, PortError> {
            if let Some(message) = self.fail_with.read().await.clone() {
                return Err(PortError::validation(message));
            }

            let email = payload.email().to_string();
            let mut emails = self.registered_emails.write().await;
            if !emails.insert(email.clone()) {
                return Err(PortError::Conflict {
                    message: format!("An account already exists for {email}"),
                });
            }

            let role = payload.role();
            self.submissions.write().await.push(payload);
            Ok(RegistrationReceipt {
                user_id: UserId::new_v7(),
                role,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockSubmissionPort;
    use super::*;
    use crate::document::DocumentType;
    use crate::flow::Role;
    use crate::payload::{AddressPayload, BuyerRegistration, CredentialsPayload};

    fn buyer_payload(email: &str) -> RegistrationPayload {
        RegistrationPayload::Buyer(BuyerRegistration {
            role: Role::Buyer,
            credentials: CredentialsPayload {
                email: email.to_string(),
                password: "supersecret123".to_string(),
                password_confirmation: "supersecret123".to_string(),
                accept_terms: true,
                accept_privacy: true,
            },
            first_name: "Ana".to_string(),
            last_name: "Mora".to_string(),
            document_type: DocumentType::Cedula,
            document_number: "123456789".to_string(),
            phone: "3001234567".to_string(),
            electronic_billing: false,
            address: AddressPayload::new("Antioquia", "Medellín", "Calle 10", ""),
        })
    }

    #[tokio::test]
    async fn test_mock_port_accepts_and_records() {
        let port = MockSubmissionPort::new();
        let receipt = port
            .register(buyer_payload("ana@example.com"), None)
            .await
            .unwrap();
        assert_eq!(receipt.role, Role::Buyer);
        assert_eq!(port.submission_count().await, 1);
    }

    #[tokio::test]
    async fn test_mock_port_rejects_duplicate_email() {
        let port = MockSubmissionPort::new();
        port.register(buyer_payload("ana@example.com"), None)
            .await
            .unwrap();
        let err = port
            .register(buyer_payload("ana@example.com"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Conflict { .. }));
        assert_eq!(port.submission_count().await, 1);
    }

    #[tokio::test]
    async fn test_mock_port_configured_failure() {
        let port = MockSubmissionPort::new();
        port.fail_with("The password is too weak").await;
        let err = port
            .register(buyer_payload("ana@example.com"), None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("password"));

        port.recover().await;
        assert!(port
            .register(buyer_payload("ana@example.com"), None)
            .await
            .is_ok());
    }
}
