//! Snapshot files on disk
//!
//! Files are opened, read or written in full, and closed within a single
//! call. Saves go through a sibling temp file and a rename.

use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use super::codec;
use crate::store::RecordStore;
use crate::{Error, Result};

/// Write the whole store to `path`, replacing any previous snapshot.
pub fn save(store: &RecordStore, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path_for(path);
    let written = write_temp(store, &tmp_path).and_then(|()| {
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    });
    if let Err(e) = written {
        // The temp file must not outlive a failed save
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    tracing::info!(
        path = %path.display(),
        students = store.len_students(),
        courses = store.len_courses(),
        "Snapshot saved"
    );
    Ok(())
}

/// Read a snapshot from `path`.
///
/// A missing file is reported as `MissingSnapshot`; anything unreadable as a
/// snapshot is `CorruptSnapshot`.
pub fn load(path: &Path) -> Result<RecordStore> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::MissingSnapshot(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => Error::CorruptSnapshot(format!("not UTF-8: {}", e)),
        _ => Error::Io(e),
    })?;
    drop(file);

    let store = codec::from_json_str(&contents)?;
    tracing::info!(
        path = %path.display(),
        students = store.len_students(),
        courses = store.len_courses(),
        "Snapshot loaded"
    );
    Ok(store)
}

/// Like [`load`], but a missing file yields `Ok(None)`.
pub fn load_if_exists(path: &Path) -> Result<Option<RecordStore>> {
    match load(path) {
        Ok(store) => Ok(Some(store)),
        Err(Error::MissingSnapshot(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn write_temp(store: &RecordStore, tmp_path: &Path) -> Result<()> {
    let file = File::create(tmp_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &codec::export(store)).map_err(encode_error)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

/// Writer failures stay I/O errors; anything else is an encoding failure
fn encode_error(err: serde_json::Error) -> Error {
    if err.is_io() {
        Error::Io(err.into())
    } else {
        Error::Encode(err.to_string())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| super::DEFAULT_SNAPSHOT_FILE.into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> RecordStore {
        let mut store = RecordStore::new();
        store.add_student("S1", "Ana", 20, "X St").unwrap();
        store.add_course("C1", "Algo", "Dr. K").unwrap();
        store.enroll("S1", "C1").unwrap();
        store.add_grade("S1", "C1", "A").unwrap();
        store
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let store = sample_store();
        save(&store, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, store);
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("records.json");

        save(&sample_store(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = load(&path).unwrap_err();
        assert!(err.is_missing_snapshot());
        assert!(load_if_exists(&path).unwrap().is_none());
    }

    #[test]
    fn test_garbage_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load(&path), Err(Error::CorruptSnapshot(_))));
        assert!(matches!(load_if_exists(&path), Err(Error::CorruptSnapshot(_))));
    }

    #[test]
    fn test_failed_save_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        // A directory in the way makes the final rename fail
        std::fs::create_dir(&path).unwrap();

        assert!(save(&sample_store(), &path).is_err());
        assert!(!temp_path_for(&path).exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_encode_error_is_not_io() {
        let mut odd_keys = std::collections::BTreeMap::new();
        odd_keys.insert(vec![1u8], 1);
        let err = serde_json::to_string(&odd_keys).unwrap_err();
        assert!(matches!(encode_error(err), Error::Encode(_)));
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        save(&sample_store(), &path).unwrap();
        save(&RecordStore::new(), &path).unwrap();
        assert!(load(&path).unwrap().is_empty());
    }
}
