use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::models::{BirthdayRecord, BirthdayStore};

/// Field separator used in birthday files
pub const DELIMITER: &str = ", ";

/// Storage errors callers may want to match on
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Birthday file not found: {0:?}")]
    FileNotFound(PathBuf),
}

/// Trait for birthday persistence
pub trait BirthdayStorage {
    /// Load a store from `path`
    fn load(&self, path: &Path) -> Result<BirthdayStore>;

    /// Write every record of `store` to `path`, replacing its contents
    fn save(&self, store: &BirthdayStore, path: &Path) -> Result<()>;
}

/// Plain text storage, one "name, birthday" record per line
#[derive(Debug, Clone)]
pub struct DelimitedFileStorage {
    create_if_missing: bool,
    normalize_loaded: bool,
}

impl DelimitedFileStorage {
    pub fn new(create_if_missing: bool, normalize_loaded: bool) -> Self {
        DelimitedFileStorage {
            create_if_missing,
            normalize_loaded,
        }
    }
}

impl Default for DelimitedFileStorage {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl BirthdayStorage for DelimitedFileStorage {
    fn load(&self, path: &Path) -> Result<BirthdayStore> {
        if !path.exists() {
            if self.create_if_missing {
                log::info!("Birthday file not found at {:?}, starting empty", path);
                return Ok(BirthdayStore::new());
            }
            return Err(StorageError::FileNotFound(path.to_path_buf()).into());
        }

        let file =
            File::open(path).with_context(|| format!("Failed to open birthdays from {:?}", path))?;

        let mut store = BirthdayStore::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line
                .with_context(|| format!("Failed to read line {} of {:?}", index + 1, path))?;
            match parse_line(&line) {
                Some(record) => store.insert_raw(record.name, record.birthday),
                None => log::debug!("Skipping blank line {} of {:?}", index + 1, path),
            }
        }

        if self.normalize_loaded {
            store.normalize_all();
        }

        log::info!("Loaded {} birthdays from {:?}", store.len(), path);
        Ok(store)
    }

    fn save(&self, store: &BirthdayStore, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to open {:?} for writing", path))?;

        let mut writer = BufWriter::new(file);
        for record in store.list() {
            writeln!(writer, "{}", format_line(&record))
                .with_context(|| format!("Failed to write birthdays to {:?}", path))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write birthdays to {:?}", path))?;

        log::debug!("Saved {} birthdays to {:?}", store.len(), path);
        Ok(())
    }
}

/// Split a line on the first delimiter. The birthday keeps any later delimiters.
/// Returns None for blank lines.
pub fn parse_line(line: &str) -> Option<BirthdayRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (name, birthday) = line.split_once(DELIMITER).unwrap_or((line, ""));
    Some(BirthdayRecord::new(name, birthday))
}

/// Inverse of `parse_line`
pub fn format_line(record: &BirthdayRecord) -> String {
    format!("{}{}{}", record.name, DELIMITER, record.birthday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("Alice, January 1\n"),
            Some(BirthdayRecord::new("Alice", "January 1"))
        );
        assert_eq!(
            parse_line("Bob, Friday, March 3, 1990"),
            Some(BirthdayRecord::new("Bob", "Friday, March 3, 1990"))
        );
        assert_eq!(parse_line("Carol"), Some(BirthdayRecord::new("Carol", "")));
        assert_eq!(parse_line("Dave,May 5"), Some(BirthdayRecord::new("Dave,May 5", "")));
        assert_eq!(parse_line("   \n"), None);
    }

    #[test]
    fn test_load_single_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("birthdays.csv");
        fs::write(&path, "Alice, January 1\n").unwrap();

        let store = DelimitedFileStorage::default().load(&path).unwrap();
        assert_eq!(store.list(), vec![BirthdayRecord::new("Alice", "January 1")]);
    }

    #[test]
    fn test_load_later_lines_win() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("birthdays.csv");
        fs::write(&path, "Bob, March 3\n\nBob, April 4\n").unwrap();

        let store = DelimitedFileStorage::default().load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Bob"), Some("April 4"));
    }

    #[test]
    fn test_load_keeps_raw_case_by_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("birthdays.csv");
        fs::write(&path, "alice, january 1\n").unwrap();

        let raw = DelimitedFileStorage::default().load(&path).unwrap();
        assert_eq!(raw.get("alice"), Some("january 1"));

        let normalized = DelimitedFileStorage::new(true, true).load(&path).unwrap();
        assert_eq!(normalized.get("Alice"), Some("January 1"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");

        let store = DelimitedFileStorage::new(true, false).load(&path).unwrap();
        assert!(store.is_empty());

        let err = DelimitedFileStorage::new(false, false).load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::FileNotFound(p)) if p == &path
        ));
    }

    #[test]
    fn test_save_sorted_and_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale content that is longer than the new file\n").unwrap();

        let mut store = BirthdayStore::new();
        store.insert_raw("Bob", "March 3");
        store.insert_raw("Alice", "January 1");

        DelimitedFileStorage::default().save(&store, &path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Alice, January 1\nBob, March 3\n"
        );
    }

    #[test]
    fn test_save_invalid_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("out.csv");

        let result = DelimitedFileStorage::default().save(&BirthdayStore::new(), &path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_then_save_preserves_pairs() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "Zed, July 4\nAlice, January 1\nBob, Friday, March 3\n").unwrap();

        let storage = DelimitedFileStorage::default();
        let store = storage.load(&input).unwrap();
        storage.save(&store, &output).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Alice, January 1\nBob, Friday, March 3\nZed, July 4\n"
        );
        assert_eq!(storage.load(&output).unwrap(), store);
    }
}
