//! Step-scoped field validation
//!
//! Advancing from step N runs only the rules belonging to step N's identity,
//! never the whole form. The engine returns one message per invalid field so
//! the caller can surface every error simultaneously; an empty result means
//! the step may advance.
//!
//! # Rules
//!
//! - Name fields: non-empty, minimum length (2 for first names, 3 for last
//!   names), letters (including accented letters) and spaces only.
//! - Document numbers: pattern keyed on the currently selected document type
//!   (cédulas: 1–10 digits; passport: 6–12 alphanumerics).
//! - Phone numbers: exactly 10 digits.
//! - Email pairs: both sides well-formed; equality reported only once both
//!   are present.
//! - Password: at least 10 characters, confirmation must match.
//! - NIT: 9–12 digit base plus a single 0–9 verification digit; the combined
//!   field surfaces the failing sub-field's own message.
//! - Terminal step: both acceptance checks true, billing radio explicitly
//!   selected.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use crate::document::DocumentType;
use crate::flow::StepIdentity;
use crate::form::{
    CompanyFields, CredentialFields, PersonalFields, RegistrationForm, RepresentativeFields,
    StoreFields,
};

/// Field keys used in validation error maps and error routing
pub mod field {
    pub const ROLE: &str = "role";
    pub const PERSON_TYPE: &str = "person_type";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const DOCUMENT_NUMBER: &str = "document_number";
    pub const PHONE: &str = "phone";
    pub const EMAIL: &str = "email";
    pub const CONFIRM_EMAIL: &str = "confirm_email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirm_password";
    pub const STORE_NAME: &str = "store_name";
    pub const CATEGORY: &str = "category";
    pub const DEPARTMENT: &str = "department";
    pub const CITY: &str = "city";
    pub const ADDRESS_LINE1: &str = "address_line1";
    pub const COMPANY_NAME: &str = "company_name";
    pub const NIT: &str = "nit";
    pub const ACCEPT_TERMS: &str = "accept_terms";
    pub const ACCEPT_PRIVACY: &str = "accept_privacy";
    pub const ELECTRONIC_BILLING: &str = "electronic_billing";
}

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L} ]+$").unwrap());
static ID_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,10}$").unwrap());
static PASSPORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{6,12}$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static NIT_BASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9,12}$").unwrap());
static CHECK_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]$").unwrap());

/// Result of validating one step: field key → human-readable message
///
/// Ordered by field key so error surfaces are deterministic. An empty map
/// means the step may advance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    /// Creates an empty (passing) result
    pub fn ok() -> Self {
        Self::default()
    }

    /// Records an error for a field, keeping the first message per field
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Whether the step may advance
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The message recorded for a field, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterates over (field, message) pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Merges another result into this one
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, message) in other.errors {
            self.errors.entry(field).or_insert(message);
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

/// Validator for wizard steps
///
/// Stateless; every rule reads the current form values, so changing a
/// document-type selector immediately changes which pattern the number is
/// checked against.
pub struct StepValidator;

impl StepValidator {
    /// Validates the fields belonging to one step identity
    ///
    /// A step with no rules for the current branch returns the empty map.
    pub fn validate_step(identity: StepIdentity, form: &RegistrationForm) -> ValidationErrors {
        let mut errors = ValidationErrors::ok();
        match identity {
            StepIdentity::AccountType => {
                if form.role.is_none() {
                    errors.add(field::ROLE, "Select an account type");
                }
            }
            StepIdentity::PersonType => {
                if form.person_type.is_none() {
                    errors.add(field::PERSON_TYPE, "Select a person type");
                }
            }
            StepIdentity::StoreInfo => Self::validate_store(&form.store, &mut errors),
            StepIdentity::PersonalInfo => Self::validate_personal(&form.personal, &mut errors),
            StepIdentity::CompanyInfo => Self::validate_company(&form.company, &mut errors),
            StepIdentity::Representative => {
                Self::validate_representative(&form.representative, &mut errors)
            }
            StepIdentity::Credentials => Self::validate_credentials(&form.credentials, &mut errors),
        }
        errors
    }

    fn validate_store(store: &StoreFields, errors: &mut ValidationErrors) {
        if store.store_name.trim().is_empty() {
            errors.add(field::STORE_NAME, "Store name is required");
        }
        if store.category.trim().is_empty() {
            errors.add(field::CATEGORY, "Select a category");
        }
        Self::check_address(&store.department, &store.city, &store.address_line1, errors);
    }

    fn validate_personal(personal: &PersonalFields, errors: &mut ValidationErrors) {
        Self::check_first_name(&personal.first_name, errors);
        Self::check_last_name(&personal.last_name, errors);
        Self::check_document_number(personal.document_type, &personal.document_number, errors);
        Self::check_phone(&personal.phone, errors);
        Self::check_address(
            &personal.department,
            &personal.city,
            &personal.address_line1,
            errors,
        );
    }

    fn validate_company(company: &CompanyFields, errors: &mut ValidationErrors) {
        if company.company_name.trim().is_empty() {
            errors.add(field::COMPANY_NAME, "Company name is required");
        }
        Self::check_nit(&company.nit.base, &company.nit.check_digit, errors);
        Self::check_email_pair(&company.email, &company.confirm_email, errors);
        Self::check_phone(&company.phone, errors);
        Self::check_address(
            &company.department,
            &company.city,
            &company.address_line1,
            errors,
        );
    }

    fn validate_representative(rep: &RepresentativeFields, errors: &mut ValidationErrors) {
        Self::check_first_name(&rep.first_name, errors);
        Self::check_last_name(&rep.last_name, errors);
        Self::check_document_number(rep.document_type, &rep.document_number, errors);
        Self::check_phone(&rep.phone, errors);
        Self::check_email_pair(&rep.email, &rep.confirm_email, errors);
    }

    fn validate_credentials(credentials: &CredentialFields, errors: &mut ValidationErrors) {
        Self::check_email_pair(&credentials.email, &credentials.confirm_email, errors);

        if credentials.password.is_empty() {
            errors.add(field::PASSWORD, "Password is required");
        } else if credentials.password.chars().count() < 10 {
            errors.add(field::PASSWORD, "Password must be at least 10 characters");
        }
        if credentials.confirm_password.is_empty() {
            errors.add(field::CONFIRM_PASSWORD, "Confirm your password");
        } else if credentials.confirm_password != credentials.password {
            errors.add(field::CONFIRM_PASSWORD, "Password confirmation does not match");
        }

        if !credentials.accept_terms {
            errors.add(field::ACCEPT_TERMS, "You must accept the terms and conditions");
        }
        if !credentials.accept_privacy {
            errors.add(field::ACCEPT_PRIVACY, "You must accept the privacy policy");
        }
        match credentials.electronic_billing.as_deref() {
            Some("true") | Some("false") => {}
            Some(_) => errors.add(
                field::ELECTRONIC_BILLING,
                "Electronic billing selection is not valid",
            ),
            None => errors.add(
                field::ELECTRONIC_BILLING,
                "Select whether you require electronic billing",
            ),
        }
    }

    fn check_first_name(value: &str, errors: &mut ValidationErrors) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            errors.add(field::FIRST_NAME, "First name is required");
        } else if trimmed.chars().count() < 2 {
            errors.add(field::FIRST_NAME, "First name must be at least 2 characters");
        } else if !NAME_RE.is_match(trimmed) {
            errors.add(
                field::FIRST_NAME,
                "First name may only contain letters and spaces",
            );
        }
    }

    fn check_last_name(value: &str, errors: &mut ValidationErrors) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            errors.add(field::LAST_NAME, "Last name is required");
        } else if trimmed.chars().count() < 3 {
            errors.add(field::LAST_NAME, "Last name must be at least 3 characters");
        } else if !NAME_RE.is_match(trimmed) {
            errors.add(
                field::LAST_NAME,
                "Last name may only contain letters and spaces",
            );
        }
    }

    /// Checks a document number against the pattern of the selected type
    fn check_document_number(
        document_type: DocumentType,
        value: &str,
        errors: &mut ValidationErrors,
    ) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            errors.add(field::DOCUMENT_NUMBER, "Document number is required");
            return;
        }
        match document_type {
            DocumentType::Cedula | DocumentType::CedulaExtranjeria => {
                if !ID_NUMBER_RE.is_match(trimmed) {
                    errors.add(
                        field::DOCUMENT_NUMBER,
                        "Document number must be 1 to 10 digits",
                    );
                }
            }
            DocumentType::Passport => {
                // Pure digit runs are cédula territory, a passport carries letters
                let has_letter = trimmed.chars().any(|c| c.is_ascii_alphabetic());
                if !PASSPORT_RE.is_match(trimmed) || !has_letter {
                    errors.add(
                        field::DOCUMENT_NUMBER,
                        "Passport number must be 6 to 12 letters and digits",
                    );
                }
            }
        }
    }

    fn check_phone(value: &str, errors: &mut ValidationErrors) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            errors.add(field::PHONE, "Phone number is required");
        } else if !PHONE_RE.is_match(trimmed) {
            errors.add(field::PHONE, "Phone number must be exactly 10 digits");
        }
    }

    /// Validates an email/confirmation pair
    ///
    /// Each side must independently be a well-formed address; the equality
    /// check is reported only once both sides are present.
    fn check_email_pair(email: &str, confirm: &str, errors: &mut ValidationErrors) {
        if email.trim().is_empty() {
            errors.add(field::EMAIL, "Email address is required");
        } else if !email.validate_email() {
            errors.add(field::EMAIL, "Email address is not valid");
        }
        if confirm.trim().is_empty() {
            errors.add(field::CONFIRM_EMAIL, "Confirm your email address");
        } else if !confirm.validate_email() {
            errors.add(field::CONFIRM_EMAIL, "Email address is not valid");
        } else if !email.trim().is_empty() && email != confirm {
            errors.add(field::CONFIRM_EMAIL, "Email confirmation does not match");
        }
    }

    /// Validates the NIT pair, surfacing the failing sub-field's message on
    /// the combined field
    fn check_nit(base: &str, check_digit: &str, errors: &mut ValidationErrors) {
        let base = base.trim();
        let check_digit = check_digit.trim();
        if base.is_empty() {
            errors.add(field::NIT, "NIT is required");
        } else if !NIT_BASE_RE.is_match(base) {
            errors.add(field::NIT, "NIT must be 9 to 12 digits");
        } else if !check_digit.is_empty() && !CHECK_DIGIT_RE.is_match(check_digit) {
            errors.add(
                field::NIT,
                "Verification digit must be a single digit from 0 to 9",
            );
        }
    }

    fn check_address(
        department: &str,
        city: &str,
        address_line1: &str,
        errors: &mut ValidationErrors,
    ) {
        if department.trim().is_empty() {
            errors.add(field::DEPARTMENT, "Select a department");
        }
        if city.trim().is_empty() {
            errors.add(field::CITY, "Select a city");
        }
        if address_line1.trim().is_empty() {
            errors.add(field::ADDRESS_LINE1, "Address is required");
        }
    }
}
