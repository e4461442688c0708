use crate::{ParserError, DESCRIPTOR_FILENAME};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tar::Archive;
use tempfile::TempDir;

/// Whether the path names a gzip-compressed source archive rather than a
/// plain descriptor file.
pub fn is_source_archive(path: &Path) -> bool {
    let name = path.to_string_lossy();
    name.ends_with(".tar.gz") || name.ends_with(".tgz")
}

/// A descriptor extracted from an archive into its own temporary directory.
/// Dropping the value removes the directory; [`ExtractedDescriptor::dispose`]
/// additionally deletes the extracted file explicitly.
pub struct ExtractedDescriptor {
    path: PathBuf,
    dir: TempDir,
}

impl ExtractedDescriptor {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the extracted file, then best-effort remove the directory.
    /// Directory removal failure never aborts the surrounding operation.
    pub fn dispose(self) {
        if let Err(e) = fs::remove_file(&self.path) {
            logging::warning(&format!(
                "could not remove extracted descriptor {}: {}",
                self.path.display(),
                e
            ));
        }
        let _ = self.dir.close();
    }
}

/// Scan the archive for the first member whose path contains the canonical
/// descriptor filename and extract that single member into a fresh
/// temporary directory.
pub fn extract_descriptor(archive_path: &Path) -> Result<ExtractedDescriptor, ParserError> {
    let file = File::open(archive_path).map_err(ParserError::Archive)?;
    let mut archive = Archive::new(GzDecoder::new(file));

    let dir = TempDir::new()?;
    for entry in archive.entries().map_err(ParserError::Archive)? {
        let mut entry = entry.map_err(ParserError::Archive)?;
        let member: PathBuf = entry.path().map_err(ParserError::Archive)?.to_path_buf();
        if !member.to_string_lossy().contains(DESCRIPTOR_FILENAME) {
            continue;
        }
        // unpack_in refuses members that would escape the directory
        if !entry.unpack_in(dir.path()).map_err(ParserError::Archive)? {
            return Err(ParserError::InvalidPackage(format!(
                "archive member {} has an unsafe path",
                member.display()
            )));
        }
        let path = dir.path().join(&member);
        logging::debug(&format!(
            "extracted {} to {}",
            member.display(),
            path.display()
        ));
        return Ok(ExtractedDescriptor { path, dir });
    }

    Err(ParserError::InvalidPackage(
        "archive does not contain a PKGBUILD".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn build_archive(path: &Path, members: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, contents) in members {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, contents.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn recognises_source_archives_by_suffix() {
        assert!(is_source_archive(Path::new("zsh-5.9.tar.gz")));
        assert!(is_source_archive(Path::new("zsh-5.9.tgz")));
        assert!(!is_source_archive(Path::new("PKGBUILD")));
        assert!(!is_source_archive(Path::new("zsh-5.9.tar.xz")));
    }

    #[test]
    fn extracts_the_descriptor_member() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("pkg.tar.gz");
        build_archive(
            &archive_path,
            &[("zsh/README", "docs"), ("zsh/PKGBUILD", "pkgname=zsh\n")],
        );

        let extracted = extract_descriptor(&archive_path).unwrap();
        let contents = fs::read_to_string(extracted.path()).unwrap();
        assert_eq!(contents, "pkgname=zsh\n");

        let path = extracted.path().to_path_buf();
        extracted.dispose();
        assert!(!path.exists());
    }

    #[test]
    fn missing_descriptor_member_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("pkg.tar.gz");
        build_archive(&archive_path, &[("zsh/README", "docs")]);

        assert!(matches!(
            extract_descriptor(&archive_path),
            Err(ParserError::InvalidPackage(_))
        ));
    }

    #[test]
    fn unreadable_archive_is_an_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("pkg.tar.gz");
        fs::write(&archive_path, "not a gzip stream").unwrap();

        assert!(matches!(
            extract_descriptor(&archive_path),
            Err(ParserError::Archive(_))
        ));
    }
}
