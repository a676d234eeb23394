//! Custom Test Assertions
//!
//! Assertion helpers for validation-error maps that give more meaningful
//! failure messages than standard assertions.

use domain_registration::validation::ValidationErrors;

/// Asserts that a field failed validation with a message containing `needle`
///
/// # Panics
///
/// Panics when the field has no error or its message does not contain the
/// expected fragment.
pub fn assert_field_error(errors: &ValidationErrors, field: &str, needle: &str) {
    match errors.get(field) {
        Some(message) => assert!(
            message.contains(needle),
            "field '{field}' failed with '{message}', expected it to contain '{needle}'"
        ),
        None => panic!("expected an error on field '{field}', errors were: {errors}"),
    }
}

/// Asserts that a step validated cleanly
pub fn assert_step_valid(errors: &ValidationErrors) {
    assert!(errors.is_valid(), "expected a valid step, errors were: {errors}");
}

/// Asserts that exactly the given fields are invalid
pub fn assert_invalid_fields(errors: &ValidationErrors, expected: &[&str]) {
    let actual: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
    assert_eq!(
        actual, expected,
        "invalid-field set mismatch, errors were: {errors}"
    );
}
