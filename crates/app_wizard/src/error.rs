//! Wizard application errors

use thiserror::Error;

use domain_geo::GeoError;
use domain_registration::{RegistrationError, ValidationErrors};

/// Errors surfaced by the wizard controller
#[derive(Debug, Error)]
pub enum WizardError {
    /// A person type was selected while the role is not seller
    #[error("Person type can only be chosen for sellers")]
    PersonTypeWithoutSeller,

    /// Submission was attempted away from the final step
    #[error("Submission is only available on the final step")]
    NotOnTerminalStep,

    /// A previous data-entry step has not passed validation yet
    #[error("Earlier steps must be completed before submitting")]
    PriorStepsIncomplete,

    /// The terminal step's fields are invalid
    #[error("Current step is not valid: {0}")]
    StepInvalid(ValidationErrors),

    /// The assembler refused to build a payload
    #[error(transparent)]
    Blocked(#[from] RegistrationError),

    /// A geographic selection was inconsistent with the loaded lists
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// The backend rejected the registration
    #[error("Registration failed: {0}")]
    SubmissionFailed(String),
}
