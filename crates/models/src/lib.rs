use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields every package descriptor must declare with a non-empty value.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "name",
    "description",
    "version",
    "release",
    "licenses",
    "arch",
];

/// Checksum arrays recognised by the repository, each positionally aligned
/// with the `source` array.
pub const CHECKSUM_FIELDS: [&str; 5] = [
    "md5sums",
    "sha1sums",
    "sha256sums",
    "sha384sums",
    "sha512sums",
];

pub const SOURCE_FIELD: &str = "source";

/// A single descriptor field: either a scalar assignment (`pkgver=1.0`) or an
/// array assignment (`source=(a b c)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(value) => Some(value),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::Scalar(_) => None,
            FieldValue::List(values) => Some(values),
        }
    }

    /// Number of declared values. An empty scalar counts as zero so that
    /// "present but blank" and "absent" behave the same during validation.
    pub fn len(&self) -> usize {
        match self {
            FieldValue::Scalar(value) => {
                if value.is_empty() {
                    0
                } else {
                    1
                }
            }
            FieldValue::List(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::List(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::List(values.iter().map(|v| v.to_string()).collect())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Scalar(value) => write!(f, "{}", value),
            FieldValue::List(values) => write!(f, "({})", values.join(" ")),
        }
    }
}

/// The flat field mapping extracted from one PKGBUILD. Field order is the
/// order the evaluator emitted them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackageDescriptor {
    fields: IndexMap<String, FieldValue>,
}

impl PackageDescriptor {
    pub fn new() -> Self {
        PackageDescriptor {
            fields: IndexMap::new(),
        }
    }

    pub fn from_fields(fields: IndexMap<String, FieldValue>) -> Self {
        PackageDescriptor { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Insert or overwrite a field. Later assignments win, matching the
    /// shell semantics of the descriptor format.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for PackageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.fields {
            writeln!(f, "{} = {}", name, value)?;
        }
        Ok(())
    }
}

/// The classified findings of one validation pass. Errors make the package
/// invalid; warnings never do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        ValidationResult {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_count_as_missing() {
        assert!(FieldValue::Scalar(String::new()).is_empty());
        assert!(FieldValue::List(Vec::new()).is_empty());
        assert!(!FieldValue::from("zsh").is_empty());
        assert_eq!(FieldValue::from(vec!["a", "b"]).len(), 2);
    }

    #[test]
    fn later_assignments_overwrite_earlier_ones() {
        let mut descriptor = PackageDescriptor::new();
        descriptor.set_field("version", "1.0");
        descriptor.set_field("version", "2.0");
        assert_eq!(descriptor.len(), 1);
        assert_eq!(
            descriptor.field("version").and_then(FieldValue::as_str),
            Some("2.0")
        );
    }

    #[test]
    fn field_order_is_preserved() {
        let mut descriptor = PackageDescriptor::new();
        descriptor.set_field("name", "zsh");
        descriptor.set_field("version", "5.9");
        descriptor.set_field("arch", vec!["x86_64"]);
        let names: Vec<&str> = descriptor.field_names().collect();
        assert_eq!(names, ["name", "version", "arch"]);
    }

    #[test]
    fn descriptor_serializes_to_flat_json_object() {
        let mut descriptor = PackageDescriptor::new();
        descriptor.set_field("name", "zsh");
        descriptor.set_field("source", vec!["zsh-5.9.tar.xz"]);
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["name"], "zsh");
        assert_eq!(json["source"][0], "zsh-5.9.tar.xz");
    }

    #[test]
    fn validity_tracks_errors_only() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());
        result.add_warning("package name should be in lower case");
        assert!(result.is_valid());
        assert!(result.has_warnings());
        result.add_error("name field is required");
        assert!(!result.is_valid());
        assert!(result.has_errors());
    }
}
