// 💾 Record Store - the backing JSON file
// Whole collection is rewritten on every mutation; index = identity

use crate::record::CollaboratorRecord;
use log::{error, info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to load data from '{}': {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to save data to '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("No record at position {index} (collection has {len})")]
    OutOfRange { index: usize, len: usize },
}

pub struct RecordStore {
    path: PathBuf,
    records: Vec<CollaboratorRecord>,
}

impl RecordStore {
    /// Store bound to `path`, initially empty. Nothing is read until `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecordStore {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Create the store and load it. A load failure degrades to an empty
    /// collection; the error is handed back so the caller can show it.
    pub fn open(path: impl Into<PathBuf>) -> (Self, Option<StoreError>) {
        let mut store = Self::new(path);
        let err = store.load().err();
        (store, err)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[CollaboratorRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&CollaboratorRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the in-memory collection with the file's content.
    ///
    /// A missing file is an empty collection. On any read or parse failure the
    /// collection is reset to empty and the error returned.
    pub fn load(&mut self) -> Result<(), StoreError> {
        if !self.path.exists() {
            info!("event=store_load status=missing path={}", self.path.display());
            self.records.clear();
            return Ok(());
        }

        match read_records(&self.path) {
            Ok(records) => {
                info!(
                    "event=store_load status=ok path={} count={}",
                    self.path.display(),
                    records.len()
                );
                self.records = records;
                Ok(())
            }
            Err(err) => {
                warn!("event=store_load status=degraded error=\"{}\"", err);
                self.records.clear();
                Err(err)
            }
        }
    }

    /// Overwrite the backing file with the full collection.
    pub fn save(&self) -> Result<(), StoreError> {
        let bytes = encode_records(&self.records)?;
        fs::write(&self.path, bytes).map_err(|source| {
            let err = StoreError::Write {
                path: self.path.clone(),
                source,
            };
            error!("event=store_save status=error error=\"{}\"", err);
            err
        })?;

        info!(
            "event=store_save status=ok path={} count={}",
            self.path.display(),
            self.records.len()
        );
        Ok(())
    }

    pub fn add(&mut self, record: CollaboratorRecord) -> Result<(), StoreError> {
        self.records.push(record);
        info!("event=record_added index={}", self.records.len() - 1);
        self.save()
    }

    pub fn update(&mut self, index: usize, record: CollaboratorRecord) -> Result<(), StoreError> {
        if index >= self.records.len() {
            return Err(self.out_of_range(index));
        }
        self.records[index] = record;
        info!("event=record_updated index={}", index);
        self.save()
    }

    pub fn delete(&mut self, index: usize) -> Result<(), StoreError> {
        if index >= self.records.len() {
            return Err(self.out_of_range(index));
        }
        self.records.remove(index);
        info!("event=record_deleted index={}", index);
        self.save()
    }

    fn out_of_range(&self, index: usize) -> StoreError {
        let err = StoreError::OutOfRange {
            index,
            len: self.records.len(),
        };
        error!("event=index_invariant_violated error=\"{}\"", err);
        err
    }
}

fn read_records(path: &Path) -> Result<Vec<CollaboratorRecord>, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// UTF-8 JSON with 4-space indentation; non-ASCII is written literally.
fn encode_records(records: &[CollaboratorRecord]) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser).map_err(StoreError::Encode)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn data_path(dir: &TempDir) -> PathBuf {
        dir.path().join("funcionarios.json")
    }

    fn sample(name: &str) -> CollaboratorRecord {
        CollaboratorRecord::new(name, "10/05/1990", "01/06/2024", false)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let (store, err) = RecordStore::open(data_path(&dir));

        assert!(err.is_none());
        assert!(store.is_empty());
        assert_eq!(store.path(), data_path(&dir));
        assert!(!data_path(&dir).exists());
    }

    #[test]
    fn test_add_then_fresh_load() {
        let dir = TempDir::new().unwrap();
        let record = CollaboratorRecord::new("Ana Souza", "29/02/2000", "05/01/2024", true);

        let mut store = RecordStore::new(data_path(&dir));
        store.add(record.clone()).unwrap();

        let (fresh, err) = RecordStore::open(data_path(&dir));
        assert!(err.is_none());
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh.get(0), Some(&record));
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(data_path(&dir), "{ not json").unwrap();

        let (store, err) = RecordStore::open(data_path(&dir));
        assert!(matches!(err, Some(StoreError::Corrupt { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_failure_resets_existing_records() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::new(data_path(&dir));
        store.add(sample("a")).unwrap();

        fs::write(data_path(&dir), "[{\"nome\": 1}]").unwrap();
        assert!(store.load().is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::new(data_path(&dir));
        store
            .add(CollaboratorRecord::new("José Conceição", "01/01/1980", "02/02/2024", true))
            .unwrap();

        let content = fs::read_to_string(data_path(&dir)).unwrap();
        assert!(content.starts_with("[\n    {\n        \"nome\": \"José Conceição\""));
        assert!(content.contains("\"cadastro\": \"02/02/2024\""));
        assert!(content.contains("\"pago\": true"));
        assert!(!content.contains("\\u"));
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let dir = TempDir::new().unwrap();
        let original = r#"[{"pago": false, "cadastro": "03/03/2024", "nome": "Zé", "nascimento": "07/07/1977"},
                           {"nome": "Li", "nascimento": "08/08/1988", "cadastro": "09/09/2024", "pago": true}]"#;
        fs::write(data_path(&dir), original).unwrap();

        let (store, err) = RecordStore::open(data_path(&dir));
        assert!(err.is_none());
        store.save().unwrap();

        let before: serde_json::Value = serde_json::from_str(original).unwrap();
        let after: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(data_path(&dir)).unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_load_keeps_records_with_both_payment_keys() {
        let dir = TempDir::new().unwrap();
        let original = r#"[{"nome": "A", "nascimento": "01/01/1990", "cadastro": "02/02/2024", "pagamento": "02/02/2024", "pago": true},
                           {"nome": "B", "nascimento": "03/03/1993", "cadastro": "04/04/2024", "pago": false}]"#;
        fs::write(data_path(&dir), original).unwrap();

        let (mut store, err) = RecordStore::open(data_path(&dir));
        assert!(err.is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().payment_date, "02/02/2024");

        store.add(sample("c")).unwrap();
        let (fresh, _) = RecordStore::open(data_path(&dir));
        assert_eq!(fresh.len(), 3);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::new(data_path(&dir));
        for name in ["a", "b", "c"] {
            store.add(sample(name)).unwrap();
        }

        let replacement = CollaboratorRecord::new("B", "11/11/1911", "12/12/2012", true);
        store.update(1, replacement.clone()).unwrap();

        let (fresh, _) = RecordStore::open(data_path(&dir));
        let names: Vec<&str> = fresh.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "B", "c"]);
        assert_eq!(fresh.get(1), Some(&replacement));
    }

    #[test]
    fn test_delete_preserves_relative_order() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::new(data_path(&dir));
        for name in ["a", "b", "c", "d"] {
            store.add(sample(name)).unwrap();
        }

        store.delete(1).unwrap();

        let (fresh, _) = RecordStore::open(data_path(&dir));
        let names: Vec<&str> = fresh.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_out_of_range_mutations_change_nothing() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::new(data_path(&dir));
        store.add(sample("a")).unwrap();

        let err = store.update(5, sample("x")).unwrap_err();
        assert!(matches!(err, StoreError::OutOfRange { index: 5, len: 1 }));

        let err = store.delete(1).unwrap_err();
        assert!(matches!(err, StoreError::OutOfRange { index: 1, len: 1 }));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().name, "a");
    }

    #[test]
    fn test_failed_save_keeps_mutation_in_memory() {
        let dir = TempDir::new().unwrap();
        // the backing path is a directory, so writing it fails
        let mut store = RecordStore::new(dir.path());

        let err = store.add(sample("a")).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(store.len(), 1);
    }
}
