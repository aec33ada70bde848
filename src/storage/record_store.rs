//! Record store abstraction.
//!
//! The ingester hands finished records to a [`RecordStore`] and never looks at
//! how they are persisted. Stores are responsible for enforcing the
//! (traditional, simplified, romanization) uniqueness constraint and for
//! keeping lookup indices.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::builder::record_builder::DictionaryRecord;
use crate::error::IngestError;
use crate::Result;

/// Options passed to [`RecordStore::create_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaOptions {
    /// Records carry `romanization_toned` and the store should keep it
    pub include_toned: bool,
    /// Reject a record whose (traditional, simplified, romanization) tuple is
    /// already stored
    pub unique_key: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            include_toned: false,
            unique_key: true,
        }
    }
}

/// Destination of an ingest run.
///
/// # Examples
///
/// ```
/// use cedict_ingest::builder::DictionaryRecord;
/// use cedict_ingest::storage::{RecordStore, SchemaOptions};
/// use cedict_ingest::Result;
///
/// struct CountingStore(usize);
///
/// impl RecordStore for CountingStore {
///     fn create_schema(&mut self, _options: &SchemaOptions) -> Result<()> {
///         Ok(())
///     }
///
///     fn insert(&mut self, _record: &DictionaryRecord) -> Result<()> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait RecordStore {
    /// Prepares the store for a new run. Called once, before any insert.
    fn create_schema(&mut self, options: &SchemaOptions) -> Result<()>;

    /// Persists one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record violates a store constraint or cannot
    /// be written. Such errors end the run.
    fn insert(&mut self, record: &DictionaryRecord) -> Result<()>;

    /// Receives a malformed-line diagnostic. The default implementation logs it.
    fn report_error(&mut self, error: &IngestError) {
        warn!("Skipping malformed line: {}", error);
    }

    /// Makes every inserted record durable. Called once at the end of a run
    /// that was not aborted.
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}
