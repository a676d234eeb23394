//! Registration form state
//!
//! A single superset record holds every field across all branches so that
//! values survive backtracking and branch switches. The superset is split
//! into typed sub-records, one per step family, and the assembler narrows to
//! the sub-records of the resolved flow variant at submission time. Fields
//! belonging to another branch may hold stale defaults but are never read
//! into a payload.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::document::{DocumentType, NitFields};
use crate::flow::{FlowVariant, PersonType, Role, StepIdentity};

/// Personal data for buyers and natural-person sellers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalFields {
    pub first_name: String,
    pub last_name: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub phone: String,
    pub department: String,
    pub city: String,
    pub address_line1: String,
    /// Optional second address line; empty means absent
    pub address_line2: String,
}

/// Store data shared by both seller branches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreFields {
    pub store_name: String,
    /// The single selected category identifier
    pub category: String,
    pub department: String,
    pub city: String,
    pub address_line1: String,
    pub address_line2: String,
}

/// Company data for legal-entity sellers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFields {
    pub company_name: String,
    pub nit: NitFields,
    pub email: String,
    pub confirm_email: String,
    pub phone: String,
    pub department: String,
    pub city: String,
    pub address_line1: String,
    pub address_line2: String,
}

/// Legal representative data for legal-entity sellers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepresentativeFields {
    pub first_name: String,
    pub last_name: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub phone: String,
    pub email: String,
    pub confirm_email: String,
}

/// Credential and consent data collected on the terminal step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialFields {
    pub email: String,
    pub confirm_email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
    pub accept_privacy: bool,
    /// Electronic-billing radio: `"true"` or `"false"` once selected,
    /// `None` while unset. Coerced to a boolean only at assembly.
    pub electronic_billing: Option<String>,
}

/// The single source of truth for all wizard field values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub role: Option<Role>,
    pub person_type: Option<PersonType>,
    pub personal: PersonalFields,
    pub store: StoreFields,
    pub company: CompanyFields,
    pub representative: RepresentativeFields,
    pub credentials: CredentialFields,
    /// Steps whose validation has passed at least once in the current branch
    #[serde(default)]
    completed: BTreeSet<StepIdentity>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The flow variant resolved from the branch selectors, if complete
    pub fn flow(&self) -> Option<FlowVariant> {
        FlowVariant::resolve(self.role, self.person_type)
    }

    /// Records that a step's validation has passed
    pub fn mark_completed(&mut self, step: StepIdentity) {
        self.completed.insert(step);
    }

    /// Whether a step's validation has passed at least once
    pub fn is_completed(&self, step: StepIdentity) -> bool {
        self.completed.contains(&step)
    }

    /// Drops completion status for steps whose meaning changed
    ///
    /// Used when a seller switches person type: the data-entry steps that
    /// differ between the two sub-flows must be re-validated, while shared
    /// steps (store info) keep their status and their values.
    pub fn invalidate_steps(&mut self, steps: &[StepIdentity]) {
        for step in steps {
            self.completed.remove(step);
        }
    }

    /// Whether every step up to, but excluding, `terminal` has passed
    pub fn prior_steps_completed(&self, flow: FlowVariant) -> bool {
        let table = flow.steps();
        table[..table.len() - 1]
            .iter()
            .all(|s| self.is_completed(*s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_resolution_tracks_selectors() {
        let mut form = RegistrationForm::new();
        assert_eq!(form.flow(), None);

        form.role = Some(Role::Seller);
        assert_eq!(form.flow(), None);

        form.person_type = Some(PersonType::Natural);
        assert_eq!(form.flow(), Some(FlowVariant::SellerNatural));

        form.role = Some(Role::Buyer);
        assert_eq!(form.flow(), Some(FlowVariant::Buyer));
    }

    #[test]
    fn test_completion_tracking() {
        let mut form = RegistrationForm::new();
        assert!(!form.is_completed(StepIdentity::StoreInfo));

        form.mark_completed(StepIdentity::StoreInfo);
        form.mark_completed(StepIdentity::CompanyInfo);
        assert!(form.is_completed(StepIdentity::StoreInfo));

        form.invalidate_steps(&[StepIdentity::CompanyInfo, StepIdentity::Representative]);
        assert!(!form.is_completed(StepIdentity::CompanyInfo));
        // Shared steps keep their status
        assert!(form.is_completed(StepIdentity::StoreInfo));
    }

    #[test]
    fn test_prior_steps_completed_excludes_terminal() {
        let mut form = RegistrationForm::new();
        form.mark_completed(StepIdentity::AccountType);
        form.mark_completed(StepIdentity::PersonalInfo);
        assert!(form.prior_steps_completed(FlowVariant::Buyer));
        // Credentials itself is not required
        assert!(!form.is_completed(StepIdentity::Credentials));
    }

    #[test]
    fn test_branch_switch_preserves_store_values() {
        let mut form = RegistrationForm::new();
        form.role = Some(Role::Seller);
        form.person_type = Some(PersonType::Juridica);
        form.store.store_name = "Finca La Esperanza".to_string();
        form.store.category = "7".to_string();

        form.person_type = Some(PersonType::Natural);
        assert_eq!(form.flow(), Some(FlowVariant::SellerNatural));
        assert_eq!(form.store.store_name, "Finca La Esperanza");
        assert_eq!(form.store.category, "7");
    }
}
