use lazy_static::lazy_static;
use models::{FieldValue, PackageDescriptor, ValidationResult};
use regex::Regex;

lazy_static! {
    static ref NAME_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
    static ref LOWERCASE_PATTERN: Regex = Regex::new(r"^[a-z0-9_-]+$").unwrap();
}

/// The package name must consist entirely of alphanumerics, underscores and
/// dashes (error), and should additionally be all-lowercase (warning). The
/// lowercase check only runs once the character-class check has passed.
pub fn validate_name(pkg: &PackageDescriptor, result: &mut ValidationResult) {
    let name = match pkg.field("name") {
        Some(FieldValue::Scalar(name)) if !name.is_empty() => name,
        Some(FieldValue::List(values)) if !values.is_empty() => {
            result.add_error("package name must be a single value");
            return;
        }
        // Absence is reported by the required-fields rule
        _ => return,
    };

    if !NAME_PATTERN.is_match(name) {
        result.add_error("package name must be alphanumeric");
    } else if !LOWERCASE_PATTERN.is_match(name) {
        result.add_warning("package name should be in lower case");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> PackageDescriptor {
        let mut descriptor = PackageDescriptor::new();
        descriptor.set_field("name", name);
        descriptor
    }

    #[test]
    fn lowercase_names_are_clean() {
        let mut result = ValidationResult::new();
        validate_name(&named("zsh-git_5"), &mut result);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn mixed_case_name_warns_only() {
        let mut result = ValidationResult::new();
        validate_name(&named("My_Package-1"), &mut result);
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings, ["package name should be in lower case"]);
    }

    #[test]
    fn invalid_characters_error_and_suppress_the_case_warning() {
        let mut result = ValidationResult::new();
        validate_name(&named("bad name!"), &mut result);
        assert_eq!(result.errors, ["package name must be alphanumeric"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn absent_name_is_left_to_the_required_fields_rule() {
        let mut result = ValidationResult::new();
        validate_name(&PackageDescriptor::new(), &mut result);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }
}
