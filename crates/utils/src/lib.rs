// utils crate

use std::path::{Path, PathBuf};

/// Whether the path plausibly names a package descriptor input: a PKGBUILD
/// file or a gzip-compressed source archive.
pub fn is_descriptor_input(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();

    name == "PKGBUILD" || name.ends_with(".tar.gz") || name.ends_with(".tgz")
}

/// Resolve a user-supplied path to a concrete descriptor input. A directory
/// resolves to the PKGBUILD inside it, if one exists.
pub fn resolve_descriptor_input(path: &Path) -> Option<PathBuf> {
    if path.is_dir() {
        let candidate = path.join("PKGBUILD");
        if candidate.is_file() {
            return Some(candidate);
        }
        return None;
    }
    if path.exists() {
        return Some(path.to_path_buf());
    }
    None
}
