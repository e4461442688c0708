use models::{FieldValue, PackageDescriptor, ValidationResult};

const MAX_DESCRIPTION_CHARS: usize = 80;

/// Descriptions are displayed in single-line package listings and should
/// stay within 80 characters.
pub fn validate_description(pkg: &PackageDescriptor, result: &mut ValidationResult) {
    if let Some(FieldValue::Scalar(description)) = pkg.field("description") {
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            result.add_warning("description should not exceed 80 characters");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn described(description: &str) -> PackageDescriptor {
        let mut descriptor = PackageDescriptor::new();
        descriptor.set_field("description", description);
        descriptor
    }

    #[test]
    fn short_description_is_clean() {
        let mut result = ValidationResult::new();
        validate_description(&described("A very capable shell"), &mut result);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn exactly_eighty_characters_is_still_fine() {
        let mut result = ValidationResult::new();
        validate_description(&described(&"x".repeat(80)), &mut result);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn overlong_description_warns() {
        let mut result = ValidationResult::new();
        validate_description(&described(&"x".repeat(81)), &mut result);
        assert_eq!(result.warnings, ["description should not exceed 80 characters"]);
        assert!(result.errors.is_empty());
    }
}
