//! In-memory record store with lookup indices on both headword forms.

use std::collections::{HashMap, HashSet};

use log::warn;

use crate::builder::record_builder::DictionaryRecord;
use crate::error::IngestError;
use crate::storage::record_store::{RecordStore, SchemaOptions};
use crate::{CedictError, Result};

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    pub options: SchemaOptions,
    records: Vec<DictionaryRecord>,
    keys: HashSet<(String, String, String)>,
    by_traditional: HashMap<String, Vec<usize>>,
    by_simplified: HashMap<String, Vec<usize>>,
    errors: Vec<IngestError>,
    committed: bool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[DictionaryRecord] {
        &self.records
    }

    pub fn errors(&self) -> &[IngestError] {
        &self.errors
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn lookup_traditional(&self, word: &str) -> Vec<&DictionaryRecord> {
        self.lookup(&self.by_traditional, word)
    }

    pub fn lookup_simplified(&self, word: &str) -> Vec<&DictionaryRecord> {
        self.lookup(&self.by_simplified, word)
    }

    fn lookup(&self, index: &HashMap<String, Vec<usize>>, word: &str) -> Vec<&DictionaryRecord> {
        index
            .get(word)
            .map(|positions| positions.iter().map(|&pos| &self.records[pos]).collect())
            .unwrap_or_default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn create_schema(&mut self, options: &SchemaOptions) -> Result<()> {
        *self = Self {
            options: *options,
            ..Self::default()
        };
        Ok(())
    }

    fn insert(&mut self, record: &DictionaryRecord) -> Result<()> {
        if self.options.unique_key {
            let (traditional, simplified, romanization) = record.unique_key();
            let key = (traditional.to_string(), simplified.to_string(), romanization.to_string());
            if !self.keys.insert(key) {
                return Err(CedictError::duplicate_record(traditional, simplified, romanization));
            }
        }

        let mut record = record.clone();
        if !self.options.include_toned {
            record.romanization_toned = None;
        }

        let pos = self.records.len();
        self.by_traditional.entry(record.traditional.clone()).or_default().push(pos);
        self.by_simplified.entry(record.simplified.clone()).or_default().push(pos);
        self.records.push(record);
        Ok(())
    }

    fn report_error(&mut self, error: &IngestError) {
        warn!("Skipping malformed line: {}", error);
        self.errors.push(error.clone());
    }

    fn commit(&mut self) -> Result<()> {
        self.committed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedLine;

    fn record(ordinal: u64, traditional: &str, simplified: &str, romanization: &str) -> DictionaryRecord {
        DictionaryRecord {
            ordinal,
            traditional: traditional.to_string(),
            simplified: simplified.to_string(),
            romanization_numeric: romanization.to_string(),
            romanization_toned: Some("x".to_string()),
            glosses: vec!["gloss".to_string()],
        }
    }

    #[test]
    fn test_lookup_indices() {
        let mut store = MemoryRecordStore::new();
        store.create_schema(&SchemaOptions { include_toned: true, unique_key: true }).unwrap();
        store.insert(&record(1, "長", "长", "chang2")).unwrap();
        store.insert(&record(2, "長", "长", "zhang3")).unwrap();
        store.insert(&record(3, "張", "张", "zhang1")).unwrap();

        assert_eq!(store.lookup_traditional("長").len(), 2);
        assert_eq!(store.lookup_simplified("张")[0].ordinal, 3);
        assert!(store.lookup_simplified("無").is_empty());
        assert_eq!(store.records()[0].romanization_toned.as_deref(), Some("x"));
    }

    #[test]
    fn test_unique_key_is_enforced() {
        let mut store = MemoryRecordStore::new();
        store.create_schema(&SchemaOptions::default()).unwrap();
        store.insert(&record(1, "長", "长", "chang2")).unwrap();
        let err = store.insert(&record(2, "長", "长", "chang2")).unwrap_err();
        assert!(matches!(err, CedictError::DuplicateRecord { .. }));
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].romanization_toned, None);
    }

    #[test]
    fn test_duplicates_allowed_without_unique_key() {
        let mut store = MemoryRecordStore::new();
        store.create_schema(&SchemaOptions { include_toned: false, unique_key: false }).unwrap();
        store.insert(&record(1, "長", "长", "chang2")).unwrap();
        store.insert(&record(2, "長", "长", "chang2")).unwrap();
        assert_eq!(store.lookup_traditional("長").len(), 2);
    }

    #[test]
    fn test_errors_are_collected_and_schema_resets() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut store = MemoryRecordStore::new();
        store.create_schema(&SchemaOptions::default()).unwrap();
        store.report_error(&IngestError::new(4, MalformedLine::EmptyGloss));
        store.insert(&record(1, "長", "长", "chang2")).unwrap();
        assert_eq!(store.errors().len(), 1);

        store.create_schema(&SchemaOptions::default()).unwrap();
        assert!(store.records().is_empty());
        assert!(store.errors().is_empty());
        assert!(store.lookup_traditional("長").is_empty());
    }
}
