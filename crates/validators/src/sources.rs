use models::{PackageDescriptor, ValidationResult, CHECKSUM_FIELDS, SOURCE_FIELD};

/// Every declared checksum array must align one-to-one with the source
/// array, and sources may not be declared without any checksums at all.
pub fn validate_sources(pkg: &PackageDescriptor, result: &mut ValidationResult) {
    let source_count = pkg.field(SOURCE_FIELD).map_or(0, |value| value.len());

    let mut found_sums = false;
    for field in CHECKSUM_FIELDS {
        let sums = match pkg.field(field) {
            Some(value) if !value.is_empty() => value,
            _ => continue,
        };
        found_sums = true;
        if sums.len() != source_count {
            result.add_error(format!("amount of {} and sources does not match", field));
        }
    }

    if source_count > 0 && !found_sums {
        result.add_error("sources exist without checksums");
    }
}
