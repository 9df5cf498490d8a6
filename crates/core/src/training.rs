//! Training-parameter enumerations and validation.
//!
//! The provider is parameterised with a fixed vocabulary for the trained
//! subject. Requests carrying values outside these sets are rejected before
//! anything is submitted.

use crate::error::CoreError;

/// Subject types a model can be trained on.
pub const SUBJECT_TYPES: &[&str] = &["Man", "Woman", "Other"];

/// Accepted ethnicity descriptors.
pub const ETHNICITIES: &[&str] = &[
    "White",
    "Black",
    "Asian American",
    "East Asian",
    "South_Asian",
    "Middle_Eastern",
    "Pacific",
    "Hispanic",
];

/// Accepted eye colors.
pub const EYE_COLORS: &[&str] = &["Brown", "Blue", "Hazel", "Gray"];

/// Upper bound on the subject age; ages are plain years.
pub const MAX_AGE: i32 = 120;

/// Validate training parameters against the fixed enumerations.
///
/// Returns the first failure found; no side effects.
pub fn validate_training_params(
    subject_type: &str,
    ethnicity: &str,
    eye_color: &str,
    age: i32,
) -> Result<(), CoreError> {
    if !SUBJECT_TYPES.contains(&subject_type) {
        return Err(CoreError::Validation(format!(
            "Invalid subject type: {subject_type}"
        )));
    }
    if !ETHNICITIES.contains(&ethnicity) {
        return Err(CoreError::Validation(format!(
            "Invalid ethnicity: {ethnicity}"
        )));
    }
    if !EYE_COLORS.contains(&eye_color) {
        return Err(CoreError::Validation(format!(
            "Invalid eye color: {eye_color}"
        )));
    }
    if age <= 0 || age > MAX_AGE {
        return Err(CoreError::Validation(format!("Invalid age: {age}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_params() {
        validate_training_params("Woman", "East Asian", "Brown", 31)
            .expect("valid params should pass");
    }

    #[test]
    fn test_rejects_unknown_subject_type() {
        let err = validate_training_params("Robot", "White", "Blue", 30).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_rejects_unknown_ethnicity() {
        let err = validate_training_params("Man", "Martian", "Blue", 30).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_rejects_unknown_eye_color() {
        let err = validate_training_params("Man", "White", "Red", 30).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_rejects_out_of_range_age() {
        assert!(validate_training_params("Man", "White", "Blue", 0).is_err());
        assert!(validate_training_params("Man", "White", "Blue", 200).is_err());
    }
}
