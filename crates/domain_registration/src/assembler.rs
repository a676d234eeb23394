//! Submission assembly
//!
//! Maps the flat form state into the branch-appropriate backend payload.
//! Runs only after the terminal step's validation passes; the acceptance
//! checkboxes and the billing radio are enforced again here as a hard block,
//! independent of the inline warnings.
//!
//! The assembler matches on the resolved flow variant and reads only that
//! variant's sub-records, so a buyer payload structurally cannot pick up
//! store or company fields.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::RegistrationError;
use crate::flow::{FlowVariant, Role};
use crate::form::RegistrationForm;
use crate::payload::{
    AddressPayload, BuyerRegistration, CompanyPayload, CredentialsPayload, RegistrationPayload,
    RepresentativePayload, SellerJuridicaRegistration, SellerNaturalRegistration, StorePayload,
    VendorType,
};

static NIT_BASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9,12}$").unwrap());
static CHECK_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]$").unwrap());

/// Builds the backend payload for the resolved flow variant
pub struct SubmissionAssembler;

impl SubmissionAssembler {
    /// Assembles the payload for `flow` from the current form values
    ///
    /// # Errors
    ///
    /// Fails when the acceptance checks or the billing selection do not
    /// hold, or when the company NIT fails re-validation.
    pub fn assemble(
        flow: FlowVariant,
        form: &RegistrationForm,
    ) -> Result<RegistrationPayload, RegistrationError> {
        let electronic_billing = Self::billing_flag(form)?;
        Self::check_acceptance(form)?;

        let payload = match flow {
            FlowVariant::Buyer => RegistrationPayload::Buyer(BuyerRegistration {
                role: Role::Buyer,
                credentials: Self::credentials(form),
                first_name: form.personal.first_name.clone(),
                last_name: form.personal.last_name.clone(),
                document_type: form.personal.document_type,
                document_number: form.personal.document_number.clone(),
                phone: form.personal.phone.clone(),
                electronic_billing,
                address: Self::personal_address(form),
            }),
            FlowVariant::SellerNatural => {
                RegistrationPayload::SellerNatural(SellerNaturalRegistration {
                    role: Role::Seller,
                    vendor_type: VendorType::Natural,
                    credentials: Self::credentials(form),
                    first_name: form.personal.first_name.clone(),
                    last_name: form.personal.last_name.clone(),
                    document_type: form.personal.document_type,
                    document_number: form.personal.document_number.clone(),
                    phone: form.personal.phone.clone(),
                    electronic_billing,
                    address: Self::personal_address(form),
                    store: Self::store(form),
                })
            }
            FlowVariant::SellerJuridica => {
                RegistrationPayload::SellerJuridica(SellerJuridicaRegistration {
                    role: Role::Seller,
                    vendor_type: VendorType::Legal,
                    credentials: Self::credentials(form),
                    electronic_billing,
                    store: Self::store(form),
                    company: Self::company(form)?,
                    legal_representative: Self::representative(form),
                })
            }
        };

        debug!(?flow, email = payload.email(), "assembled registration payload");
        Ok(payload)
    }

    /// Coerces the billing radio's string value into a boolean
    fn billing_flag(form: &RegistrationForm) -> Result<bool, RegistrationError> {
        match form.credentials.electronic_billing.as_deref() {
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => Err(RegistrationError::BillingSelectionInvalid(other.to_string())),
            None => Err(RegistrationError::BillingSelectionMissing),
        }
    }

    fn check_acceptance(form: &RegistrationForm) -> Result<(), RegistrationError> {
        if !form.credentials.accept_terms {
            return Err(RegistrationError::TermsNotAccepted);
        }
        if !form.credentials.accept_privacy {
            return Err(RegistrationError::PrivacyNotAccepted);
        }
        Ok(())
    }

    fn credentials(form: &RegistrationForm) -> CredentialsPayload {
        CredentialsPayload {
            email: form.credentials.email.clone(),
            password: form.credentials.password.clone(),
            password_confirmation: form.credentials.confirm_password.clone(),
            accept_terms: form.credentials.accept_terms,
            accept_privacy: form.credentials.accept_privacy,
        }
    }

    fn personal_address(form: &RegistrationForm) -> AddressPayload {
        AddressPayload::new(
            form.personal.department.clone(),
            form.personal.city.clone(),
            form.personal.address_line1.clone(),
            &form.personal.address_line2,
        )
    }

    fn store(form: &RegistrationForm) -> StorePayload {
        StorePayload {
            name: form.store.store_name.clone(),
            category_ids: vec![form.store.category.clone()],
            address: AddressPayload::new(
                form.store.department.clone(),
                form.store.city.clone(),
                form.store.address_line1.clone(),
                &form.store.address_line2,
            ),
        }
    }

    fn company(form: &RegistrationForm) -> Result<CompanyPayload, RegistrationError> {
        let nit = &form.company.nit;
        if !NIT_BASE_RE.is_match(nit.base.trim()) {
            return Err(RegistrationError::invalid_nit("NIT must be 9 to 12 digits"));
        }
        if !nit.check_digit.is_empty() && !CHECK_DIGIT_RE.is_match(nit.check_digit.trim()) {
            return Err(RegistrationError::invalid_nit(
                "Verification digit must be a single digit from 0 to 9",
            ));
        }
        Ok(CompanyPayload {
            name: form.company.company_name.clone(),
            nit: nit.combined(),
            email: form.company.email.clone(),
            phone: form.company.phone.clone(),
            address: AddressPayload::new(
                form.company.department.clone(),
                form.company.city.clone(),
                form.company.address_line1.clone(),
                &form.company.address_line2,
            ),
        })
    }

    fn representative(form: &RegistrationForm) -> RepresentativePayload {
        RepresentativePayload {
            first_name: form.representative.first_name.clone(),
            last_name: form.representative.last_name.clone(),
            document_type: form.representative.document_type,
            document_number: form.representative.document_number.clone(),
            phone: form.representative.phone.clone(),
            email: form.representative.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentType, NitFields};
    use crate::flow::PersonType;

    fn terminal_ready_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.role = Some(Role::Buyer);
        form.personal.first_name = "Ana".to_string();
        form.personal.last_name = "Mora".to_string();
        form.personal.document_type = DocumentType::Cedula;
        form.personal.document_number = "123456789".to_string();
        form.personal.phone = "3001234567".to_string();
        form.personal.department = "Antioquia".to_string();
        form.personal.city = "Medellín".to_string();
        form.personal.address_line1 = "Calle 10 # 43-12".to_string();
        form.credentials.email = "ana@example.com".to_string();
        form.credentials.confirm_email = "ana@example.com".to_string();
        form.credentials.password = "supersecret123".to_string();
        form.credentials.confirm_password = "supersecret123".to_string();
        form.credentials.accept_terms = true;
        form.credentials.accept_privacy = true;
        form.credentials.electronic_billing = Some("true".to_string());
        form
    }

    #[test]
    fn test_buyer_assembly_coerces_billing() {
        let form = terminal_ready_form();
        let payload = SubmissionAssembler::assemble(FlowVariant::Buyer, &form).unwrap();
        match payload {
            RegistrationPayload::Buyer(buyer) => {
                assert!(buyer.electronic_billing);
                assert_eq!(buyer.role, Role::Buyer);
                assert_eq!(buyer.address.city, "Medellín");
            }
            other => panic!("expected buyer payload, got {other:?}"),
        }
    }

    #[test]
    fn test_assembly_blocked_without_terms() {
        let mut form = terminal_ready_form();
        form.credentials.accept_terms = false;
        let err = SubmissionAssembler::assemble(FlowVariant::Buyer, &form).unwrap_err();
        assert!(matches!(err, RegistrationError::TermsNotAccepted));
    }

    #[test]
    fn test_assembly_blocked_without_privacy() {
        let mut form = terminal_ready_form();
        form.credentials.accept_privacy = false;
        let err = SubmissionAssembler::assemble(FlowVariant::Buyer, &form).unwrap_err();
        assert!(matches!(err, RegistrationError::PrivacyNotAccepted));
    }

    #[test]
    fn test_assembly_blocked_without_billing_selection() {
        let mut form = terminal_ready_form();
        form.credentials.electronic_billing = None;
        let err = SubmissionAssembler::assemble(FlowVariant::Buyer, &form).unwrap_err();
        assert!(matches!(err, RegistrationError::BillingSelectionMissing));
    }

    #[test]
    fn test_juridica_assembly_combines_nit_and_wraps_category() {
        let mut form = terminal_ready_form();
        form.role = Some(Role::Seller);
        form.person_type = Some(PersonType::Juridica);
        form.store.store_name = "Finca La Esperanza".to_string();
        form.store.category = "7".to_string();
        form.store.department = "Antioquia".to_string();
        form.store.city = "El Retiro".to_string();
        form.store.address_line1 = "Km 4 vía El Retiro".to_string();
        form.company.company_name = "Agro SAS".to_string();
        form.company.nit = NitFields::new("900123456", "7");
        form.company.email = "contacto@agrosas.com".to_string();
        form.company.confirm_email = "contacto@agrosas.com".to_string();
        form.company.phone = "6041234567".to_string();
        form.company.department = "Antioquia".to_string();
        form.company.city = "Medellín".to_string();
        form.company.address_line1 = "Carrera 43A # 1-50".to_string();
        form.representative.first_name = "Carlos".to_string();
        form.representative.last_name = "Ruiz".to_string();
        form.representative.document_number = "98765432".to_string();
        form.representative.phone = "3109876543".to_string();
        form.representative.email = "rep@agrosas.com".to_string();
        form.representative.confirm_email = "rep@agrosas.com".to_string();

        let payload = SubmissionAssembler::assemble(FlowVariant::SellerJuridica, &form).unwrap();
        match payload {
            RegistrationPayload::SellerJuridica(seller) => {
                assert_eq!(seller.vendor_type, VendorType::Legal);
                assert_eq!(seller.company.nit, "900123456-7");
                assert_eq!(seller.store.category_ids, vec!["7".to_string()]);
                assert_eq!(seller.legal_representative.first_name, "Carlos");
            }
            other => panic!("expected juridica payload, got {other:?}"),
        }
    }

    #[test]
    fn test_juridica_assembly_revalidates_nit() {
        let mut form = terminal_ready_form();
        form.company.nit = NitFields::new("12345", "7");
        let err = SubmissionAssembler::assemble(FlowVariant::SellerJuridica, &form).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidNit(_)));
    }

    #[test]
    fn test_nit_without_digit_has_no_trailing_separator() {
        let mut form = terminal_ready_form();
        form.store.store_name = "Tienda".to_string();
        form.store.category = "3".to_string();
        form.store.department = "Antioquia".to_string();
        form.store.city = "Medellín".to_string();
        form.store.address_line1 = "Calle 1".to_string();
        form.company.company_name = "Agro SAS".to_string();
        form.company.nit = NitFields::new("900123456", "");
        form.company.email = "c@agrosas.com".to_string();
        form.company.phone = "6041234567".to_string();
        form.company.department = "Antioquia".to_string();
        form.company.city = "Medellín".to_string();
        form.company.address_line1 = "Carrera 43A".to_string();

        let payload = SubmissionAssembler::assemble(FlowVariant::SellerJuridica, &form).unwrap();
        match payload {
            RegistrationPayload::SellerJuridica(seller) => {
                assert_eq!(seller.company.nit, "900123456");
            }
            other => panic!("expected juridica payload, got {other:?}"),
        }
    }

    #[test]
    fn test_buyer_payload_never_reads_store_fields() {
        let mut form = terminal_ready_form();
        // Stale seller data left over from an abandoned branch
        form.store.store_name = "Stale Store".to_string();
        form.company.company_name = "Stale Co".to_string();

        let payload = SubmissionAssembler::assemble(FlowVariant::Buyer, &form).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("store").is_none());
        assert!(json.get("company").is_none());
        assert!(!json.to_string().contains("Stale"));
    }
}
