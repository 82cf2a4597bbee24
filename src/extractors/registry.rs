// src/extractors/registry.rs

// --- Imports ---
use crate::extractors::date_matrix::extract_date_matrix;
use crate::extractors::eps::{extract_basic_eps, extract_eps_sections, EPS_SECTION_MARKER};
use crate::extractors::key_value::{extract_by_row_arity, extract_flat, extract_paired};
use crate::extractors::record::Extraction;
use crate::extractors::shareholding::extract_shareholding;
use crate::extractors::table::TableNode;
use crate::utils::error::ExtractError;
use serde::Serialize;

/// Every table shape the crate knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extractor {
    FlatKeyValue,
    PairedKeyValue,
    DateMatrix,
    Shareholding,
    SectionedEps,
    BasicEps,
    RowArity,
}

impl Extractor {
    pub fn name(&self) -> &'static str {
        match self {
            Extractor::FlatKeyValue => "flat key/value",
            Extractor::PairedKeyValue => "paired key/value",
            Extractor::DateMatrix => "date matrix",
            Extractor::Shareholding => "shareholding",
            Extractor::SectionedEps => "sectioned EPS",
            Extractor::BasicEps => "basic EPS",
            Extractor::RowArity => "row arity",
        }
    }

    /// Runs this extractor. Only [`Extractor::DateMatrix`] can fail.
    pub fn extract(&self, table: &TableNode) -> Result<Extraction, ExtractError> {
        let extraction = match self {
            Extractor::FlatKeyValue => extract_flat(table),
            Extractor::PairedKeyValue => extract_paired(table),
            Extractor::DateMatrix => extract_date_matrix(table)?,
            Extractor::Shareholding => extract_shareholding(table),
            Extractor::SectionedEps => extract_eps_sections(table),
            Extractor::BasicEps => extract_basic_eps(table),
            Extractor::RowArity => extract_by_row_arity(table),
        };
        Ok(extraction)
    }
}

/// Structural fingerprint of a table, used to pick an [`Extractor`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSignature {
    /// `(header cells, data cells)` for each row.
    pub row_shapes: Vec<(usize, usize)>,
    pub has_nested_table: bool,
    pub has_eps_marker: bool,
    pub has_date_row: bool,
    /// Row 0 opens with a "Particulars" label cell, as column-labelled tables do.
    pub leads_with_particulars: bool,
}

impl TableSignature {
    pub fn of(table: &TableNode) -> Self {
        let mut signature = TableSignature::default();
        let rows = table.rows();
        signature.leads_with_particulars = rows
            .first()
            .and_then(|row| row.data_cells().first().map(|cell| cell.text()))
            .is_some_and(|label| label.contains("Particulars"));
        for row in &rows {
            let text = row.raw_text();
            signature.row_shapes.push((row.header_cells().len(), row.data_cells().len()));
            signature.has_nested_table |= row.has_nested_table();
            signature.has_eps_marker |= text.contains(EPS_SECTION_MARKER);
            signature.has_date_row |= text.contains("Ending on");
        }
        signature
    }

    fn header_less(&self) -> bool {
        self.row_shapes.iter().all(|&(headers, _)| headers == 0)
    }

    /// First matching rule wins; `None` when no extractor fits.
    pub fn detect(&self) -> Option<Extractor> {
        if self.row_shapes.is_empty() {
            return None;
        }
        if self.has_eps_marker || self.has_date_row {
            return Some(Extractor::SectionedEps);
        }
        if self.has_nested_table {
            return Some(Extractor::Shareholding);
        }
        if self.row_shapes.contains(&(2, 2)) {
            return Some(Extractor::PairedKeyValue);
        }
        if self.row_shapes.iter().any(|&(headers, data)| headers == 1 && data >= 1) {
            return Some(Extractor::FlatKeyValue);
        }
        if self.header_less() {
            if self.leads_with_particulars && self.row_shapes[0].1 >= 2 {
                return Some(Extractor::DateMatrix);
            }
            if self.row_shapes.iter().all(|&(_, data)| data == 2 || data == 3) {
                return Some(Extractor::RowArity);
            }
            if self.row_shapes[0].1 >= 2 {
                return Some(Extractor::DateMatrix);
            }
        }
        None
    }
}

/// Extractor and title for a table at a given position on the company page.
///
/// Mirrors the page as it was laid out when first scraped; other positions are unhandled.
pub fn by_position(index: usize) -> Option<(Extractor, &'static str)> {
    let entry = match index {
        0 => (Extractor::FlatKeyValue, "Financial Statement and Price Sensitive Information"),
        1 => (Extractor::PairedKeyValue, "Basic Information"),
        2 => (Extractor::FlatKeyValue, "Dividend Information"),
        3 => (Extractor::BasicEps, "Interim Financial Performance"),
        9 => (Extractor::Shareholding, "Share Holding Information"),
        10 => (Extractor::RowArity, "Corporate Performance at a glance"),
        11 => (Extractor::RowArity, "Address of the Company"),
        _ => return None,
    };
    Some(entry)
}
