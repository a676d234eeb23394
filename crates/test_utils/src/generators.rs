//! Property-Based Test Generators
//!
//! Proptest strategies and fake-data helpers for generating test data that
//! maintains domain invariants.

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use proptest::prelude::*;

use domain_registration::document::DocumentType;
use domain_registration::flow::{FlowVariant, PersonType, Role};

/// Strategy for generating flow variants
pub fn flow_strategy() -> impl Strategy<Value = FlowVariant> {
    prop_oneof![
        Just(FlowVariant::Buyer),
        Just(FlowVariant::SellerNatural),
        Just(FlowVariant::SellerJuridica),
    ]
}

/// Strategy for generating roles
pub fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Buyer), Just(Role::Seller)]
}

/// Strategy for generating person types
pub fn person_type_strategy() -> impl Strategy<Value = PersonType> {
    prop_oneof![Just(PersonType::Natural), Just(PersonType::Juridica)]
}

/// Strategy for generating document types
pub fn document_type_strategy() -> impl Strategy<Value = DocumentType> {
    prop_oneof![
        Just(DocumentType::Cedula),
        Just(DocumentType::CedulaExtranjeria),
        Just(DocumentType::Passport),
    ]
}

/// Strategy for generating a reachable step within a flow
pub fn step_strategy(flow: FlowVariant) -> impl Strategy<Value = u8> {
    1u8..=flow.total_steps()
}

/// Strategy for valid cédula numbers (1–10 digits)
pub fn cedula_number_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9]{1,10}").expect("valid regex")
}

/// Strategy for valid ten-digit phone numbers
pub fn phone_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9]{10}").expect("valid regex")
}

/// A random plausible email address
pub fn random_email() -> String {
    SafeEmail().fake()
}

/// A random plausible first name
pub fn random_first_name() -> String {
    FirstName().fake()
}

/// A random plausible last name
pub fn random_last_name() -> String {
    LastName().fake()
}
