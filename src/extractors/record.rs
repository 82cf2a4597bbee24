// src/extractors/record.rs
use serde::Serialize;
use std::collections::BTreeMap;

/// A value held under a [`Record`] key: plain text or a nested record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Text(String),
    Nested(Record),
}

/// String-keyed mapping produced by an extractor.
///
/// Inserting an existing key replaces the earlier value (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), Field::Text(value.into()));
    }

    pub fn insert_record(&mut self, key: impl Into<String>, value: Record) {
        self.fields.insert(key.into(), Field::Nested(value));
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key)? {
            Field::Text(value) => Some(value),
            Field::Nested(_) => None,
        }
    }

    pub fn record(&self, key: &str) -> Option<&Record> {
        match self.fields.get(key)? {
            Field::Nested(record) => Some(record),
            Field::Text(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert_text(key, value);
        }
        record
    }
}

/// Why a row was dropped or only partly understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Cell arity did not match the extractor's pattern.
    ShapeMismatch,
    /// Values, header labels and date labels disagree in length.
    LengthMismatch,
    /// A data row appeared before any section marker.
    OutsideSection,
    /// A date key could not be normalized and was kept as text.
    DateUnparsed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Zero-based row index within the table being scanned.
    pub row: usize,
    pub kind: DiagnosticKind,
    pub detail: String,
}

/// Output of one extractor run: the record plus every soft failure met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub record: Record,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note(&mut self, row: usize, kind: DiagnosticKind, detail: impl Into<String>) {
        let detail = detail.into();
        match kind {
            DiagnosticKind::ShapeMismatch => {
                tracing::trace!("Skipping row {}: {}", row, detail);
            }
            _ => tracing::warn!("Row {} ({:?}): {}", row, kind, detail),
        }
        self.diagnostics.push(Diagnostic { row, kind, detail });
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}
