//! Test Data Builders
//!
//! Builder patterns for constructing registration forms with sensible
//! defaults, letting tests specify only the fields they care about.

use domain_registration::flow::{PersonType, Role};
use domain_registration::form::RegistrationForm;

use crate::fixtures::{
    valid_company_fields, valid_credential_fields, valid_personal_fields,
    valid_representative_fields, valid_store_fields,
};

/// Builder for registration form test data
pub struct RegistrationFormBuilder {
    form: RegistrationForm,
}

impl Default for RegistrationFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationFormBuilder {
    /// Creates an empty builder with nothing selected
    pub fn new() -> Self {
        Self {
            form: RegistrationForm::new(),
        }
    }

    /// A buyer with every data-entry step filled with valid values
    pub fn buyer() -> Self {
        let mut builder = Self::new();
        builder.form.role = Some(Role::Buyer);
        builder.form.personal = valid_personal_fields();
        builder.form.credentials = valid_credential_fields();
        builder
    }

    /// A natural-person seller with every data-entry step filled
    pub fn seller_natural() -> Self {
        let mut builder = Self::buyer();
        builder.form.role = Some(Role::Seller);
        builder.form.person_type = Some(PersonType::Natural);
        builder.form.store = valid_store_fields();
        builder
    }

    /// A legal-entity seller with every data-entry step filled
    pub fn seller_juridica() -> Self {
        let mut builder = Self::new();
        builder.form.role = Some(Role::Seller);
        builder.form.person_type = Some(PersonType::Juridica);
        builder.form.store = valid_store_fields();
        builder.form.company = valid_company_fields();
        builder.form.representative = valid_representative_fields();
        builder.form.credentials = valid_credential_fields();
        builder
    }

    /// Sets the account email and its confirmation together
    pub fn email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.form.credentials.email = email.clone();
        self.form.credentials.confirm_email = email;
        self
    }

    /// Sets the password and its confirmation together
    pub fn password(mut self, password: impl Into<String>) -> Self {
        let password = password.into();
        self.form.credentials.password = password.clone();
        self.form.credentials.confirm_password = password;
        self
    }

    /// Sets both acceptance checkboxes
    pub fn acceptance(mut self, accepted: bool) -> Self {
        self.form.credentials.accept_terms = accepted;
        self.form.credentials.accept_privacy = accepted;
        self
    }

    /// Sets the electronic-billing radio value (`"true"`/`"false"`), or
    /// clears it with `None`
    pub fn billing(mut self, value: Option<&str>) -> Self {
        self.form.credentials.electronic_billing = value.map(str::to_string);
        self
    }

    /// Applies an arbitrary mutation to the form under construction
    pub fn with(mut self, mutate: impl FnOnce(&mut RegistrationForm)) -> Self {
        mutate(&mut self.form);
        self
    }

    pub fn build(self) -> RegistrationForm {
        self.form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_registration::flow::{FlowVariant, StepIdentity};
    use domain_registration::validation::StepValidator;

    #[test]
    fn test_buyer_builder_passes_every_buyer_step() {
        let form = RegistrationFormBuilder::buyer().build();
        assert_eq!(form.flow(), Some(FlowVariant::Buyer));
        for step in [
            StepIdentity::AccountType,
            StepIdentity::PersonalInfo,
            StepIdentity::Credentials,
        ] {
            let errors = StepValidator::validate_step(step, &form);
            assert!(errors.is_valid(), "step {step:?} failed: {errors}");
        }
    }

    #[test]
    fn test_juridica_builder_passes_every_juridica_step() {
        let form = RegistrationFormBuilder::seller_juridica().build();
        assert_eq!(form.flow(), Some(FlowVariant::SellerJuridica));
        for step in FlowVariant::SellerJuridica.steps() {
            let errors = StepValidator::validate_step(*step, &form);
            assert!(errors.is_valid(), "step {step:?} failed: {errors}");
        }
    }

    #[test]
    fn test_builder_modifiers() {
        let form = RegistrationFormBuilder::buyer()
            .email("otro@example.com")
            .password("anotherlongpassword")
            .acceptance(false)
            .billing(None)
            .build();
        assert_eq!(form.credentials.confirm_email, "otro@example.com");
        assert!(!form.credentials.accept_terms);
        assert_eq!(form.credentials.electronic_billing, None);
    }
}
