//! `.tar.gz` unpacking with the top-level directory stripped.
//!
//! GitHub tarballs wrap everything in `<repo>-<ref>/`; templates expect the
//! repository root to be the destination itself.

use std::io::Read;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::{Archive, EntryType};
use tracing::{debug, trace};

use super::FetchError;

/// Unpack a gzipped tarball into `dest`, dropping the first path component.
///
/// Entries containing `..`, absolute paths, or links are rejected or skipped.
/// Returns the number of files written.
pub fn unpack_tarball(reader: impl Read, dest: &Path) -> Result<usize, FetchError> {
    std::fs::create_dir_all(dest)
        .map_err(|e| FetchError::io(format!("create {}", dest.display()), e))?;

    let mut archive = Archive::new(GzDecoder::new(reader));
    let entries = archive
        .entries()
        .map_err(|e| FetchError::io("read archive", e))?;

    let mut written = 0;
    for entry in entries {
        let mut entry = entry.map_err(|e| FetchError::io("read archive entry", e))?;
        let raw = entry
            .path()
            .map_err(|e| FetchError::io("read entry path", e))?
            .into_owned();

        let Some(relative) = strip_root(&raw)? else {
            continue;
        };
        let target = dest.join(&relative);

        match entry.header().entry_type() {
            EntryType::Directory => {
                std::fs::create_dir_all(&target)
                    .map_err(|e| FetchError::io(format!("create {}", target.display()), e))?;
            }
            EntryType::Regular | EntryType::Continuous => {
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| FetchError::io(format!("create {}", parent.display()), e))?;
                }
                entry
                    .unpack(&target)
                    .map_err(|e| FetchError::io(format!("unpack {}", relative.display()), e))?;
                trace!(file = %relative.display(), "unpacked");
                written += 1;
            }
            other => {
                debug!(path = %raw.display(), kind = ?other, "Skipping archive entry");
            }
        }
    }
    Ok(written)
}

/// Drop the leading directory. `None` for the root entry itself.
fn strip_root(path: &Path) -> Result<Option<PathBuf>, FetchError> {
    let mut components = path.components();
    components.next();

    let mut out = PathBuf::new();
    for component in components {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => return Err(FetchError::UnsafeEntry(path.display().to_string())),
        }
    }
    Ok(if out.as_os_str().is_empty() { None } else { Some(out) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{Compression, write::GzEncoder};
    use tempfile::TempDir;

    fn tarball(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        for (path, data) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_entry_type(EntryType::Regular);
            header.set_cksum();
            builder.append_data(&mut header, path, *data).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn strips_the_wrapping_directory() {
        let tmp = TempDir::new().unwrap();
        let bytes = tarball(&[
            ("templates-main/templates.json", b"{}"),
            ("templates-main/templates/barebone/package.json", b"{\"name\":\"x\"}"),
        ]);

        let count = unpack_tarball(bytes.as_slice(), tmp.path()).unwrap();

        assert_eq!(count, 2);
        assert!(tmp.path().join("templates.json").is_file());
        assert!(tmp.path().join("templates/barebone/package.json").is_file());
    }

    #[test]
    fn parent_components_are_rejected() {
        assert!(matches!(
            strip_root(Path::new("root/../../etc/passwd")),
            Err(FetchError::UnsafeEntry(_))
        ));
        assert_eq!(strip_root(Path::new("root/")).unwrap(), None);
        assert_eq!(
            strip_root(Path::new("root/a/b")).unwrap(),
            Some(PathBuf::from("a/b"))
        );
    }

    #[test]
    fn garbage_input_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(unpack_tarball(&b"not a tarball"[..], tmp.path()).is_err());
    }
}
