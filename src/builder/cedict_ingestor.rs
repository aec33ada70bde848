//! Drives an ingest run from a line source into a [`RecordStore`].
//!
//! # Overview
//!
//! 1. Ask the store to create its schema
//! 2. Feed every line through an [`IngestState`]
//! 3. Insert each record, report each malformed line
//! 4. Commit the store
//!
//! Under [`MalformedLinePolicy::Abort`] the first malformed line is reported to
//! the store and the run ends with [`CedictError::IngestAborted`] without a
//! commit. Cancellation through the progress callback is only checked between
//! lines, after the current record has been inserted, so a record is never
//! half-written.
//!
//! # Examples
//!
//! ```
//! use cedict_ingest::builder::{CedictIngestor, IngestConfig};
//! use cedict_ingest::storage::MemoryRecordStore;
//!
//! # fn main() -> cedict_ingest::Result<()> {
//! let document = "# CC-CEDICT\n你 你 [ni3] /you/\n好 好 [hao3] /good/well/\n";
//! let config = IngestConfig { tone_accents: true, ..IngestConfig::default() };
//! let mut store = MemoryRecordStore::new();
//!
//! let summary = CedictIngestor::ingest(document.lines(), &config, &mut store, None)?;
//! assert_eq!(summary.records_written, 2);
//! assert_eq!(store.lookup_simplified("好")[0].romanization_toned.as_deref(), Some("hǎo"));
//! # Ok(())
//! # }
//! ```

use std::io::BufRead;

use log::{info, warn};

use crate::builder::cedict_source_loader::CedictSourceLoader;
use crate::builder::ingest_config::{IngestConfig, MalformedLinePolicy};
use crate::builder::ingest_pipeline::IngestState;
use crate::error::IngestError;
use crate::storage::RecordStore;
use crate::utils::progress_report::{ProgressReportFn, ProgressState};
use crate::{CedictError, Result};

/// Totals of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Raw lines read, including comments and malformed lines
    pub lines_read: u64,
    pub records_written: u64,
    /// Every malformed line met during the run, in source order
    pub errors: Vec<IngestError>,
}

pub struct CedictIngestor<'a, S: RecordStore> {
    state: IngestState,
    policy: MalformedLinePolicy,
    store: &'a mut S,
    errors: Vec<IngestError>,
    records_written: u64,
}

impl<'a, S: RecordStore> CedictIngestor<'a, S> {
    fn begin(config: &IngestConfig, store: &'a mut S) -> Result<Self> {
        config.validate()?;
        store.create_schema(&config.schema_options())?;
        Ok(Self {
            state: IngestState::new(config),
            policy: config.on_malformed_line,
            store,
            errors: Vec::new(),
            records_written: 0,
        })
    }

    fn process_line(&mut self, line: &str) -> Result<()> {
        match self.state.ingest_line(line) {
            None => Ok(()),
            Some(Ok(record)) => {
                self.store.insert(&record)?;
                self.records_written += 1;
                Ok(())
            }
            Some(Err(error)) => {
                self.store.report_error(&error);
                self.errors.push(error.clone());
                if self.policy == MalformedLinePolicy::Abort {
                    warn!("Aborting ingest at {}", error);
                    return Err(error.into());
                }
                Ok(())
            }
        }
    }

    fn finish(self) -> Result<IngestSummary> {
        info!("Committing {} records...", self.records_written);
        self.store.commit()?;
        info!(
            "Ingest completed: {} lines, {} records, {} malformed lines",
            self.state.lines_read(),
            self.records_written,
            self.errors.len()
        );
        Ok(IngestSummary {
            lines_read: self.state.lines_read(),
            records_written: self.records_written,
            errors: self.errors,
        })
    }

    /// Ingests an in-memory sequence of lines.
    ///
    /// Progress is reported per line against an unknown total.
    pub fn ingest<I>(lines: I, config: &IngestConfig, store: &'a mut S, prog_rpt: Option<ProgressReportFn>) -> Result<IngestSummary>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut ingestor = Self::begin(config, store)?;
        let mut progress_state = ProgressState::new("CedictIngestor::ingest", 0, config.report_interval_percent, prog_rpt);

        for line in lines {
            ingestor.process_line(line.as_ref())?;
            if progress_state.report(ingestor.state.lines_read()) {
                info!("Ingest cancelled by user");
                return Err(CedictError::user_interrupted());
            }
        }
        ingestor.finish()
    }

    /// Ingests every line of `loader`.
    ///
    /// Progress is reported in bytes against the loader's total size.
    pub fn ingest_source<R: BufRead>(
        loader: &mut CedictSourceLoader<R>,
        config: &IngestConfig,
        store: &'a mut S,
        prog_rpt: Option<ProgressReportFn>,
    ) -> Result<IngestSummary> {
        info!("Ingesting source: {}", loader.source_name);
        let mut ingestor = Self::begin(config, store)?;
        let mut progress_state = ProgressState::new(
            "CedictIngestor::ingest_source",
            loader.total_size(),
            config.report_interval_percent,
            prog_rpt,
        );

        while let Some(line) = loader.next_line()? {
            ingestor.process_line(&line)?;
            if progress_state.report(loader.bytes_read()) {
                info!("Ingest cancelled by user");
                return Err(CedictError::user_interrupted());
            }
        }
        ingestor.finish()
    }
}
