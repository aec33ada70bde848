//! Record store writing one JSON object per line.

use std::collections::HashSet;
use std::io::Write;

use crate::builder::record_builder::DictionaryRecord;
use crate::storage::record_store::{RecordStore, SchemaOptions};
use crate::{CedictError, Result};

pub struct JsonLinesStore<W: Write> {
    writer: W,
    options: SchemaOptions,
    keys: HashSet<(String, String, String)>,
    records_written: u64,
}

impl<W: Write> JsonLinesStore<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            options: SchemaOptions::default(),
            keys: HashSet::new(),
            records_written: 0,
        }
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordStore for JsonLinesStore<W> {
    fn create_schema(&mut self, options: &SchemaOptions) -> Result<()> {
        self.options = *options;
        self.keys.clear();
        self.records_written = 0;
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

        if self.options.include_toned || record.romanization_toned.is_none() {
            serde_json::to_writer(&mut self.writer, record)?;
        } else {
            let stripped = DictionaryRecord {
                romanization_toned: None,
                ..record.clone()
            };
            serde_json::to_writer(&mut self.writer, &stripped)?;
        }
        self.writer.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
