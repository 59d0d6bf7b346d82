use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::report::{EntryKind, ExtractReport, ExtractedEntry};
use crate::sanitize::{ensure_contained, sanitize_entry_path};

struct PlannedEntry {
    index: usize,
    name: String,
    relative: PathBuf,
    kind: EntryKind,
}

/// Extract the zip archive at `archive` into `destination`.
pub fn extract_archive(archive: &Path, destination: &Path) -> Result<ExtractReport> {
    let file = File::open(archive).map_err(|e| Error::Open {
        path: archive.to_path_buf(),
        source: e,
    })?;
    extract_from_reader(io::BufReader::new(file), destination)
}

/// Extract a zip archive read from `reader` into `destination`.
///
/// Every entry name is validated before the first byte is written, so an
/// archive with a single escaping entry leaves the destination untouched.
/// Files are created with create-new semantics: an existing path is an
/// error, never silently overwritten.
pub fn extract_from_reader<R: Read + Seek>(reader: R, destination: &Path) -> Result<ExtractReport> {
    std::fs::create_dir_all(destination).map_err(|e| directory_failed(destination, e))?;
    let root = destination
        .canonicalize()
        .map_err(|e| directory_failed(destination, e))?;

    let mut archive = zip::ZipArchive::new(reader)?;
    let plan = plan_entries(&mut archive, &root)?;
    tracing::debug!(entries = plan.len(), root = %root.display(), "archive validated");

    let mut report = ExtractReport::default();
    for entry in plan {
        let target = root.join(&entry.relative);
        let size = match entry.kind {
            EntryKind::Directory => {
                create_dirs_within(&entry.name, &root, &entry.relative)?;
                0
            }
            EntryKind::File => {
                if let Some(parent) = entry.relative.parent() {
                    create_dirs_within(&entry.name, &root, parent)?;
                }
                let mut source = archive.by_index(entry.index)?;
                write_new_file(&mut source, &target)?
            }
        };

        report.record(ExtractedEntry {
            original_path: entry.name,
            path: entry.relative,
            kind: entry.kind,
            size,
        });
    }

    Ok(report)
}

fn plan_entries<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    root: &Path,
) -> Result<Vec<PlannedEntry>> {
    let mut plan = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let file = archive.by_index_raw(index)?;
        let name = file.name().to_string();
        let kind = if file.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        drop(file);

        let sanitized = sanitize_entry_path(&name, root)?;
        if kind == EntryKind::File && sanitized.relative.as_os_str().is_empty() {
            return Err(Error::InvalidPath { entry: name });
        }

        plan.push(PlannedEntry {
            index,
            name,
            relative: sanitized.relative,
            kind,
        });
    }
    Ok(plan)
}

/// Create `relative` below `root` one component at a time.
///
/// Existing symlinks on the way are only walked through if they resolve
/// inside `root`, so nothing is ever created outside it.
fn create_dirs_within(entry: &str, root: &Path, relative: &Path) -> Result<()> {
    let mut current = root.to_path_buf();
    for component in relative.components() {
        current.push(component);
        match std::fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => ensure_contained(entry, &current, root)?,
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => match std::fs::create_dir(&current) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(directory_failed(&current, e)),
            },
            Err(e) => return Err(directory_failed(&current, e)),
        }
    }
    Ok(())
}

fn directory_failed(path: &Path, source: io::Error) -> Error {
    Error::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source,
    }
}

fn write_new_file(source: &mut impl Read, target: &Path) -> Result<u64> {
    let extraction_failed = |e: io::Error| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source: e,
    };
    let mut out = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .map_err(extraction_failed)?;
    let written = io::copy(source, &mut out).map_err(extraction_failed)?;
    out.sync_all().map_err(extraction_failed)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ZipFixture;
    use std::io::Cursor;

    #[test]
    fn extract_directory_then_file() {
        let zip = ZipFixture::new()
            .dir("data/")
            .file("data/blk0001.dat", b"blocks")
            .build();

        let temp_dir = tempfile::tempdir().unwrap();
        let dest = temp_dir.path().join("output");
        let report = extract_from_reader(Cursor::new(zip), &dest).unwrap();

        assert_eq!(report.entry_count, 2);
        assert_eq!(report.total_bytes, 6);
        assert_eq!(std::fs::read(dest.join("data/blk0001.dat")).unwrap(), b"blocks");
    }

    #[test]
    fn missing_directory_entry_creates_ancestors() {
        let zip = ZipFixture::new()
            .file("txleveldb/deep/000005.ldb", b"index")
            .build();

        let temp_dir = tempfile::tempdir().unwrap();
        extract_from_reader(Cursor::new(zip), temp_dir.path()).unwrap();

        assert!(temp_dir.path().join("txleveldb/deep").is_dir());
        assert!(temp_dir.path().join("txleveldb/deep/000005.ldb").is_file());
    }

    #[test]
    fn existing_file_is_not_overwritten() {
        let zip = ZipFixture::new().file("blk0001.dat", b"fresh").build();

        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("blk0001.dat"), b"stale").unwrap();

        let result = extract_from_reader(Cursor::new(zip), temp_dir.path());
        assert!(matches!(result, Err(Error::ExtractionFailed { .. })));
        assert_eq!(std::fs::read(temp_dir.path().join("blk0001.dat")).unwrap(), b"stale");
    }

    #[test]
    fn traversal_anywhere_writes_nothing() {
        let zip = ZipFixture::new()
            .file("blk0001.dat", b"blocks")
            .dir("txleveldb/")
            .file("../escaped.dat", b"evil")
            .build();

        let temp_dir = tempfile::tempdir().unwrap();
        let dest = temp_dir.path().join("root");
        let result = extract_from_reader(Cursor::new(zip), &dest);

        match result {
            Err(Error::PathTraversal { entry }) => assert_eq!(entry, "../escaped.dat"),
            other => panic!("expected traversal, got {other:?}"),
        }
        assert!(!temp_dir.path().join("escaped.dat").exists());
        assert_eq!(std::fs::read_dir(&dest).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_inside_destination_is_not_followed_out() {
        let zip = ZipFixture::new().file("linked/payload.bin", b"evil").build();

        let temp_dir = tempfile::tempdir().unwrap();
        let outside = temp_dir.path().join("outside");
        let dest = temp_dir.path().join("root");
        std::fs::create_dir_all(&outside).unwrap();
        std::fs::create_dir_all(&dest).unwrap();
        std::os::unix::fs::symlink(&outside, dest.join("linked")).unwrap();

        let result = extract_from_reader(Cursor::new(zip), &dest);
        assert!(matches!(result, Err(Error::PathTraversal { .. })));
        assert!(!outside.join("payload.bin").exists());
    }

    #[test]
    fn garbage_is_corrupted() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = extract_from_reader(Cursor::new(b"not a zip".to_vec()), temp_dir.path());
        assert!(matches!(result, Err(Error::Corrupted(_))));
    }
}
