//! Backend payload shapes
//!
//! Three disjoint payload shapes, one per flow variant, each a strict
//! subset/transform of the form state, never a superset. A payload is
//! constructed once, immediately before dispatch, and never partially sent.

use serde::{Deserialize, Serialize};

use core_kernel::UserId;

use crate::document::DocumentType;
use crate::flow::Role;

/// Seller sub-type discriminator as the backend spells it
///
/// The wizard's "juridica" person type maps to `legal` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorType {
    Natural,
    Legal,
}

/// A nested address block as the backend accepts it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressPayload {
    pub department: String,
    pub city: String,
    pub line_1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_2: Option<String>,
}

impl AddressPayload {
    /// Builds an address block, mapping an empty second line to absent
    pub fn new(
        department: impl Into<String>,
        city: impl Into<String>,
        line_1: impl Into<String>,
        line_2: &str,
    ) -> Self {
        Self {
            department: department.into(),
            city: city.into(),
            line_1: line_1.into(),
            line_2: if line_2.trim().is_empty() {
                None
            } else {
                Some(line_2.to_string())
            },
        }
    }
}

/// Credential block shared by all three payload shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialsPayload {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub accept_terms: bool,
    pub accept_privacy: bool,
}

/// Store block for both seller shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePayload {
    pub name: String,
    /// The single selected category wrapped as a one-element array
    pub category_ids: Vec<String>,
    pub address: AddressPayload,
}

/// Company block for legal-entity sellers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyPayload {
    pub name: String,
    /// Combined NIT in `base-digit` form
    pub nit: String,
    pub email: String,
    pub phone: String,
    pub address: AddressPayload,
}

/// Legal representative block for legal-entity sellers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepresentativePayload {
    pub first_name: String,
    pub last_name: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub phone: String,
    pub email: String,
}

/// Buyer registration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyerRegistration {
    pub role: Role,
    #[serde(flatten)]
    pub credentials: CredentialsPayload,
    pub first_name: String,
    pub last_name: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub phone: String,
    pub electronic_billing: bool,
    pub address: AddressPayload,
}

/// Natural-person seller registration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerNaturalRegistration {
    pub role: Role,
    pub vendor_type: VendorType,
    #[serde(flatten)]
    pub credentials: CredentialsPayload,
    pub first_name: String,
    pub last_name: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub phone: String,
    pub electronic_billing: bool,
    pub address: AddressPayload,
    pub store: StorePayload,
}

/// Legal-entity seller registration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerJuridicaRegistration {
    pub role: Role,
    pub vendor_type: VendorType,
    #[serde(flatten)]
    pub credentials: CredentialsPayload,
    pub electronic_billing: bool,
    pub store: StorePayload,
    pub company: CompanyPayload,
    pub legal_representative: RepresentativePayload,
}

/// One of the three disjoint registration payloads
///
/// Serialized untagged: each shape already carries its own `role` (and for
/// sellers `vendor_type`) discriminator fields. Variants are ordered most
/// specific first so untagged deserialization cannot mistake a seller
/// payload for the buyer shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegistrationPayload {
    SellerJuridica(SellerJuridicaRegistration),
    SellerNatural(SellerNaturalRegistration),
    Buyer(BuyerRegistration),
}

impl RegistrationPayload {
    /// The account email carried by this payload
    pub fn email(&self) -> &str {
        match self {
            RegistrationPayload::SellerJuridica(p) => &p.credentials.email,
            RegistrationPayload::SellerNatural(p) => &p.credentials.email,
            RegistrationPayload::Buyer(p) => &p.credentials.email,
        }
    }

    /// The role discriminator carried by this payload
    pub fn role(&self) -> Role {
        match self {
            RegistrationPayload::SellerJuridica(p) => p.role,
            RegistrationPayload::SellerNatural(p) => p.role,
            RegistrationPayload::Buyer(p) => p.role,
        }
    }
}

/// Successful registration response from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    pub user_id: UserId,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_payload_drops_empty_second_line() {
        let with = AddressPayload::new("Antioquia", "Medellín", "Calle 10", "Apto 201");
        assert_eq!(with.line_2.as_deref(), Some("Apto 201"));

        let without = AddressPayload::new("Antioquia", "Medellín", "Calle 10", "  ");
        assert_eq!(without.line_2, None);

        let json = serde_json::to_value(&without).unwrap();
        assert!(json.get("line_2").is_none());
    }

    #[test]
    fn test_buyer_payload_serialization_shape() {
        let payload = RegistrationPayload::Buyer(BuyerRegistration {
            role: Role::Buyer,
            credentials: CredentialsPayload {
                email: "a@b.com".to_string(),
                password: "supersecret123".to_string(),
                password_confirmation: "supersecret123".to_string(),
                accept_terms: true,
                accept_privacy: true,
            },
            first_name: "Ana".to_string(),
            last_name: "Mora".to_string(),
            document_type: DocumentType::Cedula,
            document_number: "123456789".to_string(),
            phone: "3001234567".to_string(),
            electronic_billing: true,
            address: AddressPayload::new("Antioquia", "Medellín", "Calle 10", ""),
        });

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["role"], "buyer");
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["electronic_billing"], true);
        // Strict subset: no seller blocks on a buyer payload
        assert!(json.get("store").is_none());
        assert!(json.get("company").is_none());
        assert!(json.get("vendor_type").is_none());
    }

    #[test]
    fn test_vendor_type_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&VendorType::Legal).unwrap(),
            "\"legal\""
        );
    }
}
