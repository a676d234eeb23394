//! Pre-built valid field sets for every wizard step
//!
//! The geographic values match the seeded dataset of `MockGeoPort` so
//! controller tests can select them through the real cascade path.

use domain_registration::document::{DocumentType, NitFields};
use domain_registration::form::{
    CompanyFields, CredentialFields, PersonalFields, RepresentativeFields, StoreFields,
};

/// A complete, valid personal-info step
pub fn valid_personal_fields() -> PersonalFields {
    PersonalFields {
        first_name: "María".to_string(),
        last_name: "Gómez".to_string(),
        document_type: DocumentType::Cedula,
        document_number: "123456789".to_string(),
        phone: "3001234567".to_string(),
        department: "Antioquia".to_string(),
        city: "Medellín".to_string(),
        address_line1: "Calle 10 # 43-12".to_string(),
        address_line2: String::new(),
    }
}

/// A complete, valid store-info step
pub fn valid_store_fields() -> StoreFields {
    StoreFields {
        store_name: "Finca La Esperanza".to_string(),
        category: "7".to_string(),
        department: "Antioquia".to_string(),
        city: "El Retiro".to_string(),
        address_line1: "Km 4 vía El Retiro".to_string(),
        address_line2: String::new(),
    }
}

/// A complete, valid company-info step
pub fn valid_company_fields() -> CompanyFields {
    CompanyFields {
        company_name: "Agro Antioquia SAS".to_string(),
        nit: NitFields::new("900123456", "7"),
        email: "contacto@agroantioquia.com".to_string(),
        confirm_email: "contacto@agroantioquia.com".to_string(),
        phone: "6041234567".to_string(),
        department: "Antioquia".to_string(),
        city: "Medellín".to_string(),
        address_line1: "Carrera 43A # 1-50".to_string(),
        address_line2: "Oficina 301".to_string(),
    }
}

/// A complete, valid representative step
pub fn valid_representative_fields() -> RepresentativeFields {
    RepresentativeFields {
        first_name: "Carlos".to_string(),
        last_name: "Ruiz".to_string(),
        document_type: DocumentType::Cedula,
        document_number: "98765432".to_string(),
        phone: "3109876543".to_string(),
        email: "representante@agroantioquia.com".to_string(),
        confirm_email: "representante@agroantioquia.com".to_string(),
    }
}

/// A complete, valid credentials step with both acceptances and billing set
pub fn valid_credential_fields() -> CredentialFields {
    CredentialFields {
        email: "maria@example.com".to_string(),
        confirm_email: "maria@example.com".to_string(),
        password: "supersecret123".to_string(),
        confirm_password: "supersecret123".to_string(),
        accept_terms: true,
        accept_privacy: true,
        electronic_billing: Some("true".to_string()),
    }
}
