//! Identity document types and the NIT composite field
//!
//! Document numbers are validated against the pattern of the *currently
//! selected* document type; switching the selector immediately changes which
//! pattern applies, even if the number text is untouched.

use serde::{Deserialize, Serialize};

/// Identity document type for natural persons and representatives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Cédula de ciudadanía (national ID)
    Cedula,
    /// Cédula de extranjería (foreign resident ID)
    CedulaExtranjeria,
    /// Passport
    Passport,
}

impl DocumentType {
    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Cedula => "Cédula de ciudadanía",
            DocumentType::CedulaExtranjeria => "Cédula de extranjería",
            DocumentType::Passport => "Pasaporte",
        }
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        DocumentType::Cedula
    }
}

/// The two sub-fields of a company NIT as typed by the user
///
/// The combined `base-digit` value is derived at read time by
/// [`NitFields::combined`]; it is never stored separately, so the pair and
/// the combined value cannot fall out of sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NitFields {
    /// Base tax number, 9 to 12 digits
    pub base: String,
    /// Single verification digit, 0 to 9
    pub check_digit: String,
}

impl NitFields {
    pub fn new(base: impl Into<String>, check_digit: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            check_digit: check_digit.into(),
        }
    }

    /// The combined NIT in `base-digit` form
    ///
    /// While the verification digit is still empty the combined value equals
    /// the base unmodified, with no trailing separator.
    pub fn combined(&self) -> String {
        if self.check_digit.is_empty() {
            self.base.clone()
        } else {
            format!("{}-{}", self.base, self.check_digit)
        }
    }

    /// Whether neither sub-field has been typed yet
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.check_digit.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_with_digit() {
        let nit = NitFields::new("900123456", "7");
        assert_eq!(nit.combined(), "900123456-7");
    }

    #[test]
    fn test_combined_without_digit_has_no_separator() {
        let nit = NitFields::new("900123456", "");
        assert_eq!(nit.combined(), "900123456");
    }

    #[test]
    fn test_document_type_default_is_cedula() {
        assert_eq!(DocumentType::default(), DocumentType::Cedula);
    }

    #[test]
    fn test_document_type_serde_tags() {
        assert_eq!(
            serde_json::to_string(&DocumentType::CedulaExtranjeria).unwrap(),
            "\"cedula_extranjeria\""
        );
    }
}
