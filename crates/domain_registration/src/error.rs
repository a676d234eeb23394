//! Registration domain errors

use thiserror::Error;

/// Errors that can occur in the registration domain
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// No account type has been selected yet
    #[error("No account type selected")]
    MissingRole,

    /// A seller has not selected a person type yet
    #[error("No person type selected")]
    MissingPersonType,

    /// The terms and conditions have not been accepted
    #[error("Terms and conditions must be accepted")]
    TermsNotAccepted,

    /// The privacy policy has not been accepted
    #[error("Privacy policy must be accepted")]
    PrivacyNotAccepted,

    /// The electronic-billing radio has no selection
    #[error("Electronic billing selection is required")]
    BillingSelectionMissing,

    /// The electronic-billing radio holds a value outside true/false
    #[error("Electronic billing selection is not valid: {0}")]
    BillingSelectionInvalid(String),

    /// The NIT pair failed re-validation at assembly time
    #[error("Invalid NIT: {0}")]
    InvalidNit(String),
}

impl RegistrationError {
    /// Creates an InvalidNit error with a message
    pub fn invalid_nit(message: impl Into<String>) -> Self {
        RegistrationError::InvalidNit(message.into())
    }
}
