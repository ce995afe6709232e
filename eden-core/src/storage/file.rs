//! Directory-backed storage: one `<key>.json` file per key.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::Storage;
use crate::error::{EdenError, EdenResult};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> EdenResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(EdenError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> EdenResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set_item(&self, key: &str, value: &str) -> EdenResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // One temp file per write; readers never see a half-written blob.
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.persist(&path).map_err(|e| EdenError::Io(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data"));

        assert_eq!(storage.get_item("edenFestivalSchedule").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data"));

        storage.set_item("edenFestivalTags", "[\"Talk\"]").unwrap();
        assert_eq!(
            storage.get_item("edenFestivalTags").unwrap().as_deref(),
            Some("[\"Talk\"]")
        );
        assert!(dir.path().join("data/edenFestivalTags.json").exists());

        let leftovers = std::fs::read_dir(dir.path().join("data")).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_concurrent_writers_never_lose_a_write() {
        let dir = tempfile::tempdir().unwrap();
        let first = FileStorage::new(dir.path());
        let second = first.clone();

        let writer = |storage: FileStorage, value: &'static str| {
            std::thread::spawn(move || {
                (0..200)
                    .filter(|_| storage.set_item("edenFestivalSchedule", value).is_err())
                    .count()
            })
        };
        let a = writer(first.clone(), "[\"a\"]");
        let b = writer(second, "[\"b\"]");

        assert_eq!(a.join().unwrap(), 0);
        assert_eq!(b.join().unwrap(), 0);

        let last = first.get_item("edenFestivalSchedule").unwrap().unwrap();
        assert!(last == "[\"a\"]" || last == "[\"b\"]");
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(matches!(
            storage.set_item("../escape", "x"),
            Err(EdenError::Storage(_))
        ));
    }
}
