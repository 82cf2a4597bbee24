// src/extractors/shareholding.rs
use crate::extractors::date::normalize_date;
use crate::extractors::record::{DiagnosticKind, Extraction, Record};
use crate::extractors::table::{Cell, TableNode};

/// Output keys of a shareholding breakdown, in cell order.
pub const SHAREHOLDER_FIELDS: [&str; 5] = ["Sponsor/Director", "Govt", "Institute", "Foreign", "Public"];

/// Reads the share holding table.
///
/// A row with an inner table is keyed by its normalized date cell and yields a
/// five-field breakdown; a plain two-cell row ("Listing Year", "Market Category")
/// becomes a flat entry beside the dated ones.
pub fn extract_shareholding(table: &TableNode) -> Extraction {
    let mut out = Extraction::new();

    for (idx, row) in table.rows().iter().enumerate() {
        let cells = row.data_cells();
        let mut matched = false;

        for nested in cells.iter().filter_map(Cell::nested_table) {
            matched = true;
            // A nested table implies at least one cell, so `cells[0]` exists.
            let raw_date = cells[0].text();
            let date = normalize_date(&raw_date);
            if !date.is_parsed() {
                out.note(idx, DiagnosticKind::DateUnparsed, format!("kept date text '{}'", date.as_str()));
            }

            let breakdown = read_breakdown(&nested, idx, &mut out);
            out.record.insert_record(date.into_string(), breakdown);
        }

        if let [key, value] = cells.as_slice() {
            if !row.has_nested_table() {
                matched = true;
                out.record.insert_text(key.text(), value.text());
            }
        }

        if !matched {
            out.note(
                idx,
                DiagnosticKind::ShapeMismatch,
                format!("no nested table and {} data cells", cells.len()),
            );
        }
    }

    tracing::debug!("Shareholding extraction produced {} fields", out.record.len());
    out
}

/// Collects the five percentages from the inner table; the last five-cell row wins.
fn read_breakdown(nested: &TableNode, outer_row: usize, out: &mut Extraction) -> Record {
    let mut breakdown = Record::new();

    for (idx, row) in nested.rows().iter().enumerate() {
        let cells = row.data_cells();
        if cells.len() != SHAREHOLDER_FIELDS.len() {
            out.note(
                outer_row,
                DiagnosticKind::ShapeMismatch,
                format!("nested row {} has {} cells, expected 5", idx, cells.len()),
            );
            continue;
        }

        for (field, cell) in SHAREHOLDER_FIELDS.iter().zip(cells.iter()) {
            breakdown.insert_text(*field, strip_label(&cell.text(), field));
        }
    }

    breakdown
}

/// Drops a leading `"<label>:"` from a cell such as `"Govt: 5%"`.
fn strip_label<'t>(text: &'t str, label: &str) -> &'t str {
    let text = text.trim();
    text.strip_prefix(label)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(text)
        .trim()
}
