//! Wizard controller
//!
//! The application service orchestrating the registration wizard: it owns
//! the form state, the step counter, and the three city cascades, and wires
//! the geo, submission, and notification collaborators.
//!
//! Execution is single-threaded and event-driven: the controller mutates
//! state only in response to discrete user events or resolved fetches, and
//! every mutation that clears a dependent field (the city on a department
//! change) happens in the same call as the triggering change, so no caller
//! can observe an orphaned city value.

use std::sync::Arc;

use tracing::{debug, info, warn};

use core_kernel::{OperationMetadata, SubmissionId};
use domain_geo::{CityCascade, GeoError, GeoPort, GeoScope};
use domain_registration::validation::field;
use domain_registration::{
    FlowVariant, PersonType, RegistrationError, RegistrationForm, RegistrationReceipt, Role,
    StepIdentity, StepValidator, SubmissionAssembler, SubmissionPort, ValidationErrors,
};

use crate::error::WizardError;
use crate::notify::{NotificationLevel, NotificationPort};

/// Outcome of an advance attempt
#[derive(Debug, Clone, PartialEq)]
pub enum StepAdvance {
    /// The step validated and the counter moved (or stayed clamped at the end)
    Advanced(u8),
    /// The step did not validate; every invalid field is reported at once
    Blocked(ValidationErrors),
}

/// A city fetch keyed to the department that triggered it
///
/// Produced by [`WizardController::select_department`]; the key must be
/// passed back to [`WizardController::apply_cities`] so stale responses can
/// be recognized and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityFetch {
    pub scope: GeoScope,
    pub department: String,
}

/// The three independent city cascades
#[derive(Debug)]
struct CascadeSet {
    store: CityCascade,
    personal: CityCascade,
    company: CityCascade,
}

impl CascadeSet {
    fn new() -> Self {
        Self {
            store: CityCascade::new(GeoScope::Store),
            personal: CityCascade::new(GeoScope::Personal),
            company: CityCascade::new(GeoScope::Company),
        }
    }

    fn get(&self, scope: GeoScope) -> &CityCascade {
        match scope {
            GeoScope::Store => &self.store,
            GeoScope::Personal => &self.personal,
            GeoScope::Company => &self.company,
        }
    }

    fn get_mut(&mut self, scope: GeoScope) -> &mut CityCascade {
        match scope {
            GeoScope::Store => &mut self.store,
            GeoScope::Personal => &mut self.personal,
            GeoScope::Company => &mut self.company,
        }
    }
}

/// The registration wizard application service
pub struct WizardController {
    form: RegistrationForm,
    step: u8,
    departments: Vec<String>,
    departments_loaded: bool,
    cascades: CascadeSet,
    field_errors: ValidationErrors,
    geo: Arc<dyn GeoPort>,
    submission: Arc<dyn SubmissionPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl WizardController {
    pub fn new(
        geo: Arc<dyn GeoPort>,
        submission: Arc<dyn SubmissionPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            form: RegistrationForm::new(),
            step: 1,
            departments: Vec::new(),
            departments_loaded: false,
            cascades: CascadeSet::new(),
            field_errors: ValidationErrors::ok(),
            geo,
            submission,
            notifier,
        }
    }

    /// Loads the department list, once per wizard session
    ///
    /// A failure is recoverable: it surfaces a non-blocking notification and
    /// leaves the list empty so a later call can retry.
    pub async fn start(&mut self) {
        if self.departments_loaded {
            return;
        }
        match self.geo.departments().await {
            Ok(departments) => {
                info!(count = departments.len(), "departments loaded");
                self.departments = departments;
                self.departments_loaded = true;
            }
            Err(err) => {
                warn!(error = %err, "department load failed");
                self.notifier.notify(
                    NotificationLevel::Error,
                    "Could not load the department list, please try again",
                );
            }
        }
    }

    // ========================================================================
    // State accessors
    // ========================================================================

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Mutable access for plain data-entry fields
    ///
    /// Department and city values must go through
    /// [`select_department`](Self::select_department) and
    /// [`select_city`](Self::select_city) so the cascade bookkeeping stays
    /// consistent with the form.
    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// The resolved flow, if both branch selectors are set
    pub fn flow(&self) -> Option<FlowVariant> {
        self.form.flow()
    }

    /// Validation errors from the last rejected advance or submission
    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    /// City options for one cascade; empty while loading or idle
    pub fn cities(&self, scope: GeoScope) -> &[String] {
        self.cascades.get(scope).cities()
    }

    /// Whether a city fetch is in flight for one cascade
    pub fn is_loading_cities(&self, scope: GeoScope) -> bool {
        self.cascades.get(scope).is_loading()
    }

    /// The flow used for step arithmetic before both selectors are set
    ///
    /// Until the branch is resolved only the branch-selection steps are
    /// reachable, and their identities agree across the candidate flows, so
    /// the fallback is never observable.
    fn effective_flow(&self) -> FlowVariant {
        self.form.flow().unwrap_or(match self.form.role {
            Some(Role::Seller) => FlowVariant::SellerNatural,
            _ => FlowVariant::Buyer,
        })
    }

    /// The identity of the step the visitor is currently on
    pub fn step_identity(&self) -> StepIdentity {
        self.effective_flow().step_identity(self.step)
    }

    /// Total steps of the active flow
    pub fn total_steps(&self) -> u8 {
        self.effective_flow().total_steps()
    }

    /// The (adjusted step, adjusted total) pair for the progress bar
    ///
    /// `None` while on a branch-selection step; the bar must not render.
    pub fn display_progress(&self) -> Option<(u8, u8)> {
        self.effective_flow().display_progress(self.step)
    }

    // ========================================================================
    // Branch selection
    // ========================================================================

    /// Sets the account type
    pub fn select_role(&mut self, role: Role) {
        debug!(?role, "role selected");
        self.form.role = Some(role);
        self.field_errors = ValidationErrors::ok();
        self.step = self.effective_flow().clamp_step(self.step);
    }

    /// Sets the seller sub-type
    ///
    /// Switching sub-type changes the step count; the counter is clamped
    /// into the new flow's range and the branch-specific data-entry steps
    /// are re-validated on their next advance, while entered values and the
    /// shared store step survive untouched.
    pub fn select_person_type(&mut self, person_type: PersonType) -> Result<(), WizardError> {
        if self.form.role != Some(Role::Seller) {
            return Err(WizardError::PersonTypeWithoutSeller);
        }
        let changed = self.form.person_type != Some(person_type);
        self.form.person_type = Some(person_type);
        if changed {
            debug!(?person_type, "person type switched");
            self.form.invalidate_steps(&[
                StepIdentity::PersonalInfo,
                StepIdentity::CompanyInfo,
                StepIdentity::Representative,
            ]);
        }
        self.field_errors = ValidationErrors::ok();
        self.step = self.effective_flow().clamp_step(self.step);
        Ok(())
    }

    // ========================================================================
    // Geo cascades
    // ========================================================================

    /// Handles a department selection for one scope
    ///
    /// Atomically, in this single call: the department field is updated, the
    /// paired city field is cleared, and the cascade enters `Loading` keyed
    /// to the new value. No caller can observe the new department alongside
    /// the old city. Returns the fetch ticket to resolve later.
    pub fn select_department(
        &mut self,
        scope: GeoScope,
        department: impl Into<String>,
    ) -> Result<CityFetch, WizardError> {
        let department = department.into();
        if !self.departments.iter().any(|d| d == &department) {
            return Err(GeoError::unknown_department(department).into());
        }

        self.set_department_field(scope, &department);
        self.clear_city_field(scope);
        self.cascades.get_mut(scope).begin(department.clone());

        Ok(CityFetch { scope, department })
    }

    /// Fetches the city list for a ticket without touching wizard state
    ///
    /// Kept separate from [`apply_cities`](Self::apply_cities) so multiple
    /// fetches may be in flight per cascade and resolve out of order.
    pub async fn fetch_cities(
        &self,
        request: &CityFetch,
    ) -> Result<Vec<String>, core_kernel::PortError> {
        self.geo.cities(&request.department).await
    }

    /// Applies a resolved (or failed) city fetch
    ///
    /// Stale results, whose department no longer matches the cascade's
    /// current selection, are discarded. A failure resets the cascade to a
    /// recoverable idle state and surfaces a non-blocking notification.
    /// Returns whether the result was applied.
    pub fn apply_cities(
        &mut self,
        request: &CityFetch,
        result: Result<Vec<String>, core_kernel::PortError>,
    ) -> bool {
        let cascade = self.cascades.get_mut(request.scope);
        match result {
            Ok(cities) => cascade.resolve(&request.department, cities),
            Err(err) => {
                let applied = cascade.fail(&request.department);
                if applied {
                    warn!(scope = ?request.scope, error = %err, "city fetch failed");
                    self.notifier.notify(
                        NotificationLevel::Error,
                        "Could not load the city list, please re-select the department",
                    );
                }
                applied
            }
        }
    }

    /// Convenience: selects a department and completes its fetch inline
    pub async fn change_department(
        &mut self,
        scope: GeoScope,
        department: impl Into<String>,
    ) -> Result<(), WizardError> {
        let request = self.select_department(scope, department)?;
        let result = self.fetch_cities(&request).await;
        self.apply_cities(&request, result);
        Ok(())
    }

    /// Handles a city selection for one scope
    ///
    /// The city must be an option of the current department's loaded list; a
    /// value is only meaningful relative to the department that produced it.
    pub fn select_city(
        &mut self,
        scope: GeoScope,
        city: impl Into<String>,
    ) -> Result<(), WizardError> {
        let city = city.into();
        let cascade = self.cascades.get(scope);
        let department = cascade
            .current_department()
            .ok_or_else(|| GeoError::CitiesNotLoaded("<none>".to_string()))?
            .to_string();
        if cascade.is_loading() {
            return Err(GeoError::CitiesNotLoaded(department).into());
        }
        if !cascade.cities().iter().any(|c| c == &city) {
            return Err(GeoError::unknown_city(city, department).into());
        }
        self.set_city_field(scope, &city);
        Ok(())
    }

    fn set_department_field(&mut self, scope: GeoScope, value: &str) {
        match scope {
            GeoScope::Store => self.form.store.department = value.to_string(),
            GeoScope::Personal => self.form.personal.department = value.to_string(),
            GeoScope::Company => self.form.company.department = value.to_string(),
        }
    }

    fn clear_city_field(&mut self, scope: GeoScope) {
        match scope {
            GeoScope::Store => self.form.store.city.clear(),
            GeoScope::Personal => self.form.personal.city.clear(),
            GeoScope::Company => self.form.company.city.clear(),
        }
    }

    fn set_city_field(&mut self, scope: GeoScope, value: &str) {
        match scope {
            GeoScope::Store => self.form.store.city = value.to_string(),
            GeoScope::Personal => self.form.personal.city = value.to_string(),
            GeoScope::Company => self.form.company.city = value.to_string(),
        }
    }

    // ========================================================================
    // Step navigation
    // ========================================================================

    /// Validates the current step and advances on success
    ///
    /// Only the current step's rules run. On failure every invalid field is
    /// reported at once and the counter does not move.
    pub fn advance(&mut self) -> StepAdvance {
        let identity = self.step_identity();
        let errors = StepValidator::validate_step(identity, &self.form);
        if !errors.is_valid() {
            debug!(?identity, count = errors.len(), "advance blocked");
            self.field_errors = errors.clone();
            return StepAdvance::Blocked(errors);
        }
        self.form.mark_completed(identity);
        self.field_errors = ValidationErrors::ok();
        self.step = self.effective_flow().next_step(self.step);
        debug!(step = self.step, "advanced");
        StepAdvance::Advanced(self.step)
    }

    /// Steps back without validating, clamped at the first step
    pub fn retreat(&mut self) {
        self.step = FlowVariant::prev_step(self.step);
        self.field_errors = ValidationErrors::ok();
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Assembles and dispatches the registration on the terminal step
    ///
    /// Hard-blocks unless the terminal step validates, every prior step has
    /// passed, and the acceptance/billing guards hold. On a backend error
    /// the wizard stays on the terminal step: password-related messages are
    /// routed to the password field, everything else to a notification.
    pub async fn submit(&mut self) -> Result<RegistrationReceipt, WizardError> {
        let flow = match (self.form.role, self.form.person_type) {
            (None, _) => return Err(RegistrationError::MissingRole.into()),
            (Some(Role::Seller), None) => {
                return Err(RegistrationError::MissingPersonType.into())
            }
            _ => self.effective_flow(),
        };
        if !flow.is_terminal(self.step) {
            return Err(WizardError::NotOnTerminalStep);
        }
        if !self.form.prior_steps_completed(flow) {
            return Err(WizardError::PriorStepsIncomplete);
        }

        let errors = StepValidator::validate_step(StepIdentity::Credentials, &self.form);
        if !errors.is_valid() {
            self.field_errors = errors.clone();
            return Err(WizardError::StepInvalid(errors));
        }
        self.field_errors = ValidationErrors::ok();

        let payload = SubmissionAssembler::assemble(flow, &self.form)?;
        let metadata = OperationMetadata::with_correlation_id(SubmissionId::new_v7().to_string());

        match self.submission.register(payload, Some(metadata)).await {
            Ok(receipt) => {
                info!(user_id = %receipt.user_id, "registration accepted");
                self.notifier
                    .notify(NotificationLevel::Success, "Registration completed");
                self.form.mark_completed(StepIdentity::Credentials);
                Ok(receipt)
            }
            Err(err) => {
                let message = err.to_string();
                if Self::is_password_related(&message) {
                    self.field_errors.add(field::PASSWORD, message.clone());
                } else {
                    self.notifier.notify(NotificationLevel::Error, &message);
                }
                warn!(error = %message, "registration rejected");
                Err(WizardError::SubmissionFailed(message))
            }
        }
    }

    /// Whether a backend error message should land on the password field
    ///
    /// Intentionally a string heuristic, not a structured error code.
    fn is_password_related(message: &str) -> bool {
        let lower = message.to_lowercase();
        lower.contains("password") || lower.contains("contraseña")
    }
}
