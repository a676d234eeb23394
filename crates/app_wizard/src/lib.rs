//! Registration Wizard Application Service
//!
//! Orchestrates the registration wizard on top of the domain crates: the
//! [`controller::WizardController`] advances and retreats the step counter,
//! triggers step-scoped validation before every advance, keeps the three
//! department→city cascades consistent with the form, and assembles and
//! dispatches the final payload through the submission port.
//!
//! # Collaborators
//!
//! - `GeoPort` (domain_geo): department and city lookups
//! - `SubmissionPort` (domain_registration): the registration backend
//! - `NotificationPort` (this crate): fire-and-forget toasts
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use app_wizard::{TracingNotifier, WizardController};
//!
//! let mut wizard = WizardController::new(geo, submission, Arc::new(TracingNotifier));
//! wizard.start().await;
//! wizard.select_role(Role::Buyer);
//! match wizard.advance() {
//!     StepAdvance::Advanced(step) => { /* render step */ }
//!     StepAdvance::Blocked(errors) => { /* render field errors */ }
//! }
//! ```

pub mod controller;
pub mod error;
pub mod notify;

pub use controller::{CityFetch, StepAdvance, WizardController};
pub use error::WizardError;
pub use notify::mock::RecordingNotifier;
pub use notify::{NotificationLevel, NotificationPort, TracingNotifier};
