//! Full-text record store backed by Tantivy.
//!
//! Every record becomes one document. `simplified`, `traditional`,
//! `romanization_numeric`, `glosses` and, when enabled, `romanization_toned`
//! are tokenized for full-text search. The two headword forms are also stored
//! untokenized so they can be looked up exactly.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tantivy::collector::TopDocs;
use tantivy::query::{QueryParser, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema, Value, INDEXED, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexWriter, TantivyDocument, Term};

use crate::builder::record_builder::DictionaryRecord;
use crate::parser::SENSE_SEPARATOR;
use crate::storage::record_store::{RecordStore, SchemaOptions};
use crate::{CedictError, Result};

/// Heap given to the index writer.
const WRITER_HEAP_SIZE: usize = 50_000_000;

pub struct IndexFields {
    pub ordinal: Field,
    pub traditional: Field,
    pub simplified: Field,
    pub traditional_exact: Field,
    pub simplified_exact: Field,
    pub romanization_numeric: Field,
    pub romanization_toned: Option<Field>,
    pub glosses: Field,
}

fn build_schema(options: &SchemaOptions) -> (Schema, IndexFields) {
    let mut schema_builder = Schema::builder();

    let ordinal = schema_builder.add_u64_field("ordinal", INDEXED | STORED);
    let traditional = schema_builder.add_text_field("traditional", TEXT | STORED);
    let simplified = schema_builder.add_text_field("simplified", TEXT | STORED);
    let traditional_exact = schema_builder.add_text_field("traditional_exact", STRING);
    let simplified_exact = schema_builder.add_text_field("simplified_exact", STRING);
    let romanization_numeric = schema_builder.add_text_field("romanization_numeric", TEXT | STORED);
    let romanization_toned = options
        .include_toned
        .then(|| schema_builder.add_text_field("romanization_toned", TEXT | STORED));
    // Senses are stored joined with the canonical separator.
    let glosses = schema_builder.add_text_field("glosses", TEXT | STORED);

    let fields = IndexFields {
        ordinal,
        traditional,
        simplified,
        traditional_exact,
        simplified_exact,
        romanization_numeric,
        romanization_toned,
        glosses,
    };
    (schema_builder.build(), fields)
}

pub struct FtsRecordStore {
    index_dir_path: PathBuf,
    index: Option<Index>,
    writer: Option<IndexWriter>,
    fields: Option<IndexFields>,
    options: SchemaOptions,
    keys: HashSet<(String, String, String)>,
}

impl FtsRecordStore {
    /// Creates a store that will build its index in `index_dir_path`. Nothing
    /// touches the disk before [`RecordStore::create_schema`].
    pub fn new<P: AsRef<Path>>(index_dir_path: P) -> Self {
        Self {
            index_dir_path: index_dir_path.as_ref().to_path_buf(),
            index: None,
            writer: None,
            fields: None,
            options: SchemaOptions::default(),
            keys: HashSet::new(),
        }
    }

    fn fields(&self) -> Result<&IndexFields> {
        self.fields
            .as_ref()
            .ok_or_else(|| CedictError::index_error("Schema has not been created"))
    }

    fn index(&self) -> Result<&Index> {
        self.index
            .as_ref()
            .ok_or_else(|| CedictError::index_error("Schema has not been created"))
    }

    /// Merges all searchable segments into one.
    fn merge_segments(&mut self) -> Result<()> {
        let segment_ids = self.index()?.searchable_segment_ids()?;
        if segment_ids.len() < 2 {
            return Ok(());
        }
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| CedictError::index_error("Index writer is closed"))?;
        writer
            .merge(&segment_ids)
            .wait()
            .map_err(|e| CedictError::index_error(format!("Failed to merge segments: {}", e)))?;
        writer.commit()?;
        debug!("Merged segments: {:?}", segment_ids);
        Ok(())
    }

    /// Full-text search over headwords, romanizations and glosses.
    pub fn search(&self, query_str: &str, max_results: usize) -> Result<Vec<DictionaryRecord>> {
        let index = self.index()?;
        let fields = self.fields()?;

        let mut default_fields = vec![
            fields.simplified,
            fields.traditional,
            fields.romanization_numeric,
            fields.glosses,
        ];
        default_fields.extend(fields.romanization_toned);
        let query_parser = QueryParser::for_index(index, default_fields);
        let query = query_parser
            .parse_query(query_str)
            .map_err(|e| CedictError::index_error(format!("Failed to parse query '{}': {}", query_str, e)))?;

        let searcher = index.reader()?.searcher();
        let top_docs = searcher.search(&query, &TopDocs::with_limit(max_results))?;
        top_docs
            .into_iter()
            .map(|(_score, doc_address)| {
                let retrieved_doc = searcher.doc::<TantivyDocument>(doc_address)?;
                self.record_from_doc(&retrieved_doc)
            })
            .collect()
    }

    /// Exact lookup on the simplified headword.
    pub fn lookup_simplified(&self, word: &str) -> Result<Vec<DictionaryRecord>> {
        let field = self.fields()?.simplified_exact;
        self.lookup_exact(field, word)
    }

    /// Exact lookup on the traditional headword.
    pub fn lookup_traditional(&self, word: &str) -> Result<Vec<DictionaryRecord>> {
        let field = self.fields()?.traditional_exact;
        self.lookup_exact(field, word)
    }

    fn lookup_exact(&self, field: Field, word: &str) -> Result<Vec<DictionaryRecord>> {
        let query = TermQuery::new(Term::from_field_text(field, word), IndexRecordOption::Basic);
        let searcher = self.index()?.reader()?.searcher();
        let limit = (searcher.num_docs() as usize).max(1);
        let mut records = searcher
            .search(&query, &TopDocs::with_limit(limit))?
            .into_iter()
            .map(|(_score, doc_address)| {
                let retrieved_doc = searcher.doc::<TantivyDocument>(doc_address)?;
                self.record_from_doc(&retrieved_doc)
            })
            .collect::<Result<Vec<_>>>()?;
        records.sort_by_key(|record| record.ordinal);
        Ok(records)
    }

    /// Number of committed records.
    pub fn num_records(&self) -> Result<u64> {
        Ok(self.index()?.reader()?.searcher().num_docs())
    }

    fn record_from_doc(&self, retrieved_doc: &TantivyDocument) -> Result<DictionaryRecord> {
        let fields = self.fields()?;
        let text = |field: Field| -> String {
            retrieved_doc
                .get_first(field)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        let ordinal = retrieved_doc
            .get_first(fields.ordinal)
            .and_then(|v| v.as_u64())
            .ok_or_else(|| CedictError::index_error("Ordinal not found in FTS index"))?;

        Ok(DictionaryRecord {
            ordinal,
            traditional: text(fields.traditional),
            simplified: text(fields.simplified),
            romanization_numeric: text(fields.romanization_numeric),
            romanization_toned: fields.romanization_toned.map(&text),
            glosses: text(fields.glosses)
                .split(SENSE_SEPARATOR)
                .map(str::to_string)
                .collect(),
        })
    }
}

impl RecordStore for FtsRecordStore {
    /// Recreates the index directory with a fresh schema.
    fn create_schema(&mut self, options: &SchemaOptions) -> Result<()> {
        if self.index_dir_path.exists() {
            fs::remove_dir_all(&self.index_dir_path)?;
        }
        fs::create_dir_all(&self.index_dir_path)?;

        let (schema, fields) = build_schema(options);
        let index = Index::create_in_dir(&self.index_dir_path, schema)?;
        let writer = index
            .writer(WRITER_HEAP_SIZE)
            .map_err(|e| CedictError::index_error(format!("Failed to create index writer: {}", e)))?;
        info!("Created Tantivy index at: {}", self.index_dir_path.display());

        self.index = Some(index);
        self.writer = Some(writer);
        self.fields = Some(fields);
        self.options = *options;
        self.keys.clear();
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

        let fields = self.fields()?;
        let mut document = doc!(
            fields.ordinal => record.ordinal,
            fields.traditional => record.traditional.clone(),
            fields.simplified => record.simplified.clone(),
            fields.traditional_exact => record.traditional.clone(),
            fields.simplified_exact => record.simplified.clone(),
            fields.romanization_numeric => record.romanization_numeric.clone(),
            fields.glosses => record.joined_glosses(),
        );
        if let (Some(field), Some(toned)) = (fields.romanization_toned, record.romanization_toned.as_deref()) {
            document.add_text(field, toned);
        }

        self.writer
            .as_ref()
            .ok_or_else(|| CedictError::index_error("Index writer is closed"))?
            .add_document(document)
            .map_err(|e| CedictError::index_error(format!("Failed to add document: {}", e)))?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        info!("Committing index...");
        self.writer
            .as_mut()
            .ok_or_else(|| CedictError::index_error("Index writer is closed"))?
            .commit()?;
        self.merge_segments()?;
        if let Some(writer) = self.writer.take() {
            writer
                .wait_merging_threads()
                .map_err(|e| CedictError::index_error(format!("Failed to finish merging: {}", e)))?;
        }
        info!("Index committed at: {}", self.index_dir_path.display());
        Ok(())
    }
}
