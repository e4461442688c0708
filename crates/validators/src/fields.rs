use models::{PackageDescriptor, ValidationResult, REQUIRED_FIELDS};

/// Every required field must be present with a non-empty value. A field
/// carrying an empty string or an empty array counts as missing.
pub fn validate_required_fields(pkg: &PackageDescriptor, result: &mut ValidationResult) {
    for field in REQUIRED_FIELDS {
        let missing = match pkg.field(field) {
            None => true,
            Some(value) => value.is_empty(),
        };
        if missing {
            result.add_error(format!("{} field is required", field));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_error_per_missing_field() {
        let mut descriptor = PackageDescriptor::new();
        descriptor.set_field("name", "zsh");
        descriptor.set_field("version", "5.9");
        descriptor.set_field("description", ""); // present but blank
        let mut result = ValidationResult::new();
        validate_required_fields(&descriptor, &mut result);
        assert_eq!(
            result.errors,
            [
                "description field is required",
                "release field is required",
                "licenses field is required",
                "arch field is required",
            ]
        );
    }

    #[test]
    fn complete_descriptor_passes() {
        let mut descriptor = PackageDescriptor::new();
        descriptor.set_field("name", "zsh");
        descriptor.set_field("description", "A shell");
        descriptor.set_field("version", "5.9");
        descriptor.set_field("release", "1");
        descriptor.set_field("licenses", vec!["MIT"]);
        descriptor.set_field("arch", vec!["x86_64"]);
        let mut result = ValidationResult::new();
        validate_required_fields(&descriptor, &mut result);
        assert!(result.errors.is_empty());
    }
}
