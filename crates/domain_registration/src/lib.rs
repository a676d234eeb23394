//! Registration Domain
//!
//! This crate models the core of the marketplace registration wizard: a
//! single visitor registers as a buyer or as one of two seller sub-types and
//! is walked through a role-specific sequence of data-collection steps
//! ending in credential creation and submission.
//!
//! # Flow Model
//!
//! The three registration paths are a tagged union of flow variants, each
//! carrying its own ordered step table:
//!
//! - **Buyer**: account type → personal info → credentials
//! - **SellerNatural**: account type → person type → store → personal info → credentials
//! - **SellerJuridica**: account type → person type → store → company → representative → credentials
//!
//! # Examples
//!
//! ```rust
//! use domain_registration::flow::{FlowVariant, PersonType, Role, StepIdentity};
//!
//! let flow = FlowVariant::resolve(Some(Role::Seller), Some(PersonType::Juridica)).unwrap();
//! assert_eq!(flow.total_steps(), 6);
//! assert_eq!(flow.step_identity(4), StepIdentity::CompanyInfo);
//!
//! // The progress bar hides the two branch-selection steps
//! assert_eq!(flow.display_progress(2), None);
//! assert_eq!(flow.display_progress(3), Some((1, 4)));
//! ```
//!
//! Validation is step-scoped and every invalid field of a step is reported
//! at once; the submission assembler narrows the superset form state to the
//! payload shape of the resolved variant, so stale fields from an abandoned
//! branch can never leak into a request.

pub mod adapters;
pub mod assembler;
pub mod document;
pub mod error;
pub mod flow;
pub mod form;
pub mod payload;
pub mod ports;
pub mod validation;

pub use adapters::{BackendApiAdapter, BackendApiConfig};
pub use assembler::SubmissionAssembler;
pub use document::{DocumentType, NitFields};
pub use error::RegistrationError;
pub use flow::{FlowVariant, PersonType, Role, StepIdentity};
pub use form::{
    CompanyFields, CredentialFields, PersonalFields, RegistrationForm, RepresentativeFields,
    StoreFields,
};
pub use payload::{
    AddressPayload, BuyerRegistration, CompanyPayload, CredentialsPayload, RegistrationPayload,
    RegistrationReceipt, RepresentativePayload, SellerJuridicaRegistration,
    SellerNaturalRegistration, StorePayload, VendorType,
};
pub use ports::SubmissionPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockSubmissionPort;
pub use validation::{StepValidator, ValidationErrors};
