mod archive;
mod protocol;

pub use archive::{extract_descriptor, is_source_archive, ExtractedDescriptor};
pub use protocol::parse_line;

use evaluator::{EvaluatorError, ShellEvaluator};
use models::PackageDescriptor;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Canonical descriptor filename, matched as a substring of archive member
/// names.
pub const DESCRIPTOR_FILENAME: &str = "PKGBUILD";

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("invalid package: {0}")]
    InvalidPackage(String),

    #[error("failed to read archive: {0}")]
    Archive(#[source] io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed evaluator output `{line}`: {reason}")]
    Protocol { line: String, reason: String },

    #[error("evaluator failed: {0}")]
    Evaluator(#[from] EvaluatorError),
}

/// Load a package descriptor from a PKGBUILD file or a `.tar.gz` source
/// archive containing one. Fails fast on any extraction problem; no partial
/// descriptor is ever returned.
pub fn load_package(path: &Path) -> Result<PackageDescriptor, ParserError> {
    let evaluator = ShellEvaluator::new()?;
    load_package_with(path, &evaluator)
}

/// Like [`load_package`], with an explicitly configured evaluator.
pub fn load_package_with(
    path: &Path,
    evaluator: &ShellEvaluator,
) -> Result<PackageDescriptor, ParserError> {
    if is_source_archive(path) {
        let extracted = extract_descriptor(path)?;
        let loaded = evaluate_descriptor(extracted.path(), evaluator);
        // The extracted copy is removed on success and failure alike; only
        // the temp directory removal is best-effort.
        extracted.dispose();
        loaded
    } else {
        evaluate_descriptor(path, evaluator)
    }
}

fn evaluate_descriptor(
    file: &Path,
    evaluator: &ShellEvaluator,
) -> Result<PackageDescriptor, ParserError> {
    if !file.is_file() {
        return Err(ParserError::InvalidPackage(format!(
            "{} is not a readable file",
            file.display()
        )));
    }

    let filename = file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            ParserError::InvalidPackage(format!("{} has no usable filename", file.display()))
        })?;

    // The evaluator runs from the descriptor's directory; the descriptor may
    // reference sibling files by relative path.
    let working_dir = match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let lines = evaluator.evaluate(working_dir, filename)?;

    let mut descriptor = PackageDescriptor::new();
    for line in &lines {
        if line.trim().is_empty() {
            continue;
        }
        let (name, value) = protocol::parse_line(line)?;
        descriptor.set_field(name, value);
    }

    logging::debug(&format!(
        "extracted {} field(s) from {}",
        descriptor.len(),
        file.display()
    ));
    Ok(descriptor)
}
