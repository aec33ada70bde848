//! Turns a [`ParsedLine`] into a [`DictionaryRecord`].
//!
//! The builder splits the raw gloss into senses, optionally derives the
//! tone-marked romanization and stamps the record with its ordinal.

use serde::{Deserialize, Serialize};

use crate::error::MalformedLine;
use crate::parser::{ParsedLine, SENSE_SEPARATOR};
use crate::pinyin::{to_toned_form, ErhuaPolicy};

/// One dictionary entry as handed to a record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryRecord {
    /// 1-based position among the successfully parsed lines of a run
    pub ordinal: u64,
    pub traditional: String,
    pub simplified: String,
    /// Numbered romanization exactly as found in the source
    pub romanization_numeric: String,
    /// Tone-marked romanization, only present when tone accents are enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romanization_toned: Option<String>,
    /// Senses in source order, never empty
    pub glosses: Vec<String>,
}

impl DictionaryRecord {
    /// Senses joined with the canonical `/` separator.
    pub fn joined_glosses(&self) -> String {
        self.glosses.join(&SENSE_SEPARATOR.to_string())
    }

    /// The (traditional, simplified, romanization) tuple stores keep unique.
    pub fn unique_key(&self) -> (&str, &str, &str) {
        (&self.traditional, &self.simplified, &self.romanization_numeric)
    }
}

/// Options consumed by [`RecordBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordOptions {
    /// Populate [`DictionaryRecord::romanization_toned`]
    pub tone_accents: bool,
    /// Keep the space before a neutral-tone `r` suffix in the toned form
    pub erhua_keep_space: bool,
}

/// Splits a raw gloss on `/`, trims every sense and drops blank ones.
///
/// ```
/// use cedict_ingest::builder::record_builder::split_glosses;
///
/// assert_eq!(split_glosses(" to eat / food //meal "), vec!["to eat", "food", "meal"]);
/// ```
pub fn split_glosses(gloss_raw: &str) -> Vec<String> {
    gloss_raw
        .split(SENSE_SEPARATOR)
        .map(str::trim)
        .filter(|sense| !sense.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecordBuilder {
    pub options: RecordOptions,
}

impl RecordBuilder {
    pub fn new(options: RecordOptions) -> Self {
        Self { options }
    }

    /// Builds the record for `parsed`.
    ///
    /// Fails with [`MalformedLine::EmptyGloss`] when the gloss holds no
    /// non-blank sense.
    pub fn build(&self, parsed: ParsedLine, ordinal: u64) -> Result<DictionaryRecord, MalformedLine> {
        let glosses = split_glosses(&parsed.gloss_raw);
        if glosses.is_empty() {
            return Err(MalformedLine::EmptyGloss);
        }

        let romanization_toned = self.options.tone_accents.then(|| {
            to_toned_form(
                &parsed.romanization_numeric,
                ErhuaPolicy::from_keep_space(self.options.erhua_keep_space),
            )
        });

        Ok(DictionaryRecord {
            ordinal,
            traditional: parsed.traditional,
            simplified: parsed.simplified,
            romanization_numeric: parsed.romanization_numeric,
            romanization_toned,
            glosses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(romanization: &str, gloss: &str) -> ParsedLine {
        ParsedLine {
            traditional: "一點兒".to_string(),
            simplified: "一点儿".to_string(),
            romanization_numeric: romanization.to_string(),
            gloss_raw: gloss.to_string(),
        }
    }

    #[test]
    fn test_build_without_tone_accents() {
        let builder = RecordBuilder::default();
        let record = builder.build(parsed("yi1 dian3 r5", "a bit/a little"), 7).unwrap();
        assert_eq!(record.ordinal, 7);
        assert_eq!(record.traditional, "一點兒");
        assert_eq!(record.simplified, "一点儿");
        assert_eq!(record.romanization_numeric, "yi1 dian3 r5");
        assert_eq!(record.romanization_toned, None);
        assert_eq!(record.glosses, vec!["a bit", "a little"]);
        assert_eq!(record.joined_glosses(), "a bit/a little");
        assert_eq!(record.unique_key(), ("一點兒", "一点儿", "yi1 dian3 r5"));
    }

    #[test]
    fn test_build_with_tone_accents_and_erhua_policy() {
        let merge = RecordBuilder::new(RecordOptions { tone_accents: true, erhua_keep_space: false });
        let keep = RecordBuilder::new(RecordOptions { tone_accents: true, erhua_keep_space: true });

        let merged = merge.build(parsed("yi1 dian3 r5", "a bit"), 1).unwrap();
        let spaced = keep.build(parsed("yi1 dian3 r5", "a bit"), 1).unwrap();
        assert_eq!(merged.romanization_toned.as_deref(), Some("yī diǎnr"));
        assert_eq!(spaced.romanization_toned.as_deref(), Some("yī diǎn r"));
        assert_eq!(merged.romanization_numeric, "yi1 dian3 r5");
    }

    #[test]
    fn test_gloss_normalization() {
        let test_cases = [
            ("you", vec!["you"]),
            ("tradition/traditional", vec!["tradition", "traditional"]),
            (" a /  b / c", vec!["a", "b", "c"]),
            ("a//b", vec!["a", "b"]),
            ("/a/", vec!["a"]),
        ];
        for (raw, expected) in test_cases {
            assert_eq!(split_glosses(raw), expected, "split_glosses({:?})", raw);
        }
    }

    #[test]
    fn test_blank_gloss_is_rejected() {
        let builder = RecordBuilder::default();
        assert_eq!(builder.build(parsed("a1", " / / "), 1), Err(MalformedLine::EmptyGloss));
        assert_eq!(builder.build(parsed("a1", ""), 1), Err(MalformedLine::EmptyGloss));
    }

    #[test]
    fn test_serialized_record_omits_missing_toned_form() {
        let record = RecordBuilder::default().build(parsed("yi1", "one"), 3).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("romanization_toned"));
        let back: DictionaryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
