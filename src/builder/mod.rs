//! Builder module for turning CEDICT text into dictionary records
//!
//! This module contains everything between a decoded line and a record store:
//! the record builder, the line-by-line ingest pipeline, the source loader and
//! the ingest driver.

pub mod record_builder;
pub mod ingest_config;
pub mod ingest_pipeline;
pub mod cedict_source_loader;
pub mod cedict_ingestor;

// Re-export commonly used types for convenience
pub use record_builder::{DictionaryRecord, RecordBuilder, RecordOptions};
pub use ingest_config::{IngestConfig, MalformedLinePolicy};
pub use ingest_pipeline::{IngestPipeline, IngestState};
pub use cedict_source_loader::CedictSourceLoader;
pub use cedict_ingestor::{CedictIngestor, IngestSummary};
