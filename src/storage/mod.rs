// Record stores
//
// This module defines the contract an ingest run writes to, and the stores
// shipped with the crate: in-memory, JSON lines and a Tantivy full-text index.

pub mod record_store;
pub mod memory_store;
pub mod json_lines_store;
pub mod fts_store;

pub use record_store::{RecordStore, SchemaOptions};
pub use memory_store::MemoryRecordStore;
pub use json_lines_store::JsonLinesStore;
pub use fts_store::FtsRecordStore;
