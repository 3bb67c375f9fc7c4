use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::KeyValueSlot;
use crate::error::SlotError;

/// Slot backend keeping one `<key>.json` file per key inside a directory.
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, SlotError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(SlotError::Unavailable(format!("invalid slot key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        // Rename over the target so readers never see a half-written document
        let written = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote slot file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let slot = FileSlot::new(tmp.path());
        assert!(slot.read("resolve_decision_logs").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let tmp = TempDir::new().unwrap();
        let mut slot = FileSlot::new(tmp.path());

        slot.write("logs", "[]").unwrap();
        assert_eq!(slot.read("logs").unwrap().as_deref(), Some("[]"));
        assert!(tmp.path().join("logs.json").exists());
        assert!(!tmp.path().join("logs.json.tmp").exists());
    }

    #[test]
    fn test_write_to_missing_directory_fails_without_side_effects() {
        let tmp = TempDir::new().unwrap();
        let mut slot = FileSlot::new(tmp.path().join("gone"));

        assert!(matches!(slot.write("logs", "[]"), Err(SlotError::Io(_))));
        assert!(!tmp.path().join("gone").exists());
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let mut slot = FileSlot::new(tmp.path());

        // A directory squatting on the target makes the write fail after the temp file exists
        fs::create_dir(tmp.path().join("logs.json")).unwrap();
        fs::write(tmp.path().join("logs.json").join("keep"), "x").unwrap();

        assert!(matches!(slot.write("logs", "[]"), Err(SlotError::Io(_))));
        assert!(!tmp.path().join("logs.json.tmp").exists());
        assert!(tmp.path().join("logs.json").join("keep").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let tmp = TempDir::new().unwrap();
        let slot = FileSlot::new(tmp.path());

        assert!(slot.path_for("../escape").is_err());
        assert!(slot.path_for("a/b").is_err());
        assert!(slot.path_for("").is_err());
        assert!(slot.path_for("resolve_decision_logs").is_ok());
    }
}
