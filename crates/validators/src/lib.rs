// validators crate

mod description;
mod fields;
mod name;
mod sources;

pub use description::validate_description;
pub use fields::validate_required_fields;
pub use name::validate_name;
pub use sources::validate_sources;

use models::{FieldValue, PackageDescriptor, ValidationResult};
use once_cell::unsync::OnceCell;

/// Run every policy rule against the descriptor. Rules never short-circuit
/// each other, so a single pass reports every problem found.
pub fn validate(pkg: &PackageDescriptor) -> ValidationResult {
    let mut result = ValidationResult::new();
    validate_required_fields(pkg, &mut result);
    validate_name(pkg, &mut result);
    validate_description(pkg, &mut result);
    validate_sources(pkg, &mut result);
    result
}

/// A descriptor paired with its validation verdict. The verdict is computed
/// on the first query and cached; later queries return the cached result
/// even if fields were patched in between.
#[derive(Debug)]
pub struct Package {
    descriptor: PackageDescriptor,
    verdict: OnceCell<ValidationResult>,
}

impl Package {
    pub fn new(descriptor: PackageDescriptor) -> Self {
        Package {
            descriptor,
            verdict: OnceCell::new(),
        }
    }

    pub fn descriptor(&self) -> &PackageDescriptor {
        &self.descriptor
    }

    pub fn into_descriptor(self) -> PackageDescriptor {
        self.descriptor
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.descriptor.field(name)
    }

    /// Patch a field before validation. Patching after validation does not
    /// invalidate the cached verdict.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.descriptor.set_field(name, value);
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.descriptor.has_field(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.descriptor.field_names()
    }

    /// Validate now (or return the verdict already computed).
    pub fn validate(&self) -> &ValidationResult {
        self.verdict.get_or_init(|| validate(&self.descriptor))
    }

    pub fn is_validated(&self) -> bool {
        self.verdict.get().is_some()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }

    pub fn has_errors(&self) -> bool {
        self.validate().has_errors()
    }

    pub fn has_warnings(&self) -> bool {
        self.validate().has_warnings()
    }

    pub fn errors(&self) -> &[String] {
        &self.validate().errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.validate().warnings
    }
}

impl From<PackageDescriptor> for Package {
    fn from(descriptor: PackageDescriptor) -> Self {
        Package::new(descriptor)
    }
}
