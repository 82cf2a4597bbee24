// src/extractors/key_value.rs
//
// Extractors for tables that are plain label/value grids in one of three row shapes.

use crate::extractors::record::{DiagnosticKind, Extraction};
use crate::extractors::table::TableNode;

/// One `<th>` label and its `<td>` value per row.
///
/// Used for the financial statement and dividend tables. Rows without exactly one
/// header cell and at least one data cell are skipped.
pub fn extract_flat(table: &TableNode) -> Extraction {
    let mut out = Extraction::new();

    for (idx, row) in table.rows().iter().enumerate() {
        let headers = row.header_cells();
        let data = row.data_cells();

        match (headers.as_slice(), data.first()) {
            ([header], Some(value)) => out.record.insert_text(header.text(), value.text()),
            _ => out.note(
                idx,
                DiagnosticKind::ShapeMismatch,
                format!("expected 1 header and at least 1 data cell, found {} and {}", headers.len(), data.len()),
            ),
        }
    }

    tracing::debug!("Flat extraction produced {} fields", out.record.len());
    out
}

/// Two label/value pairs per row: `th td th td`.
///
/// Shared by the basic information and capital/market-lot tables. A row holding a
/// nested table is never read here, whatever its cell counts.
pub fn extract_paired(table: &TableNode) -> Extraction {
    let mut out = Extraction::new();

    for (idx, row) in table.rows().iter().enumerate() {
        if row.has_nested_table() {
            out.note(idx, DiagnosticKind::ShapeMismatch, "row holds a nested table");
            continue;
        }

        let headers = row.header_cells();
        let data = row.data_cells();
        if headers.len() != 2 || data.len() != 2 {
            out.note(
                idx,
                DiagnosticKind::ShapeMismatch,
                format!("expected 2 headers and 2 data cells, found {} and {}", headers.len(), data.len()),
            );
            continue;
        }

        for (header, value) in headers.iter().zip(data.iter()) {
            out.record.insert_text(header.text(), value.text());
        }
    }

    tracing::debug!("Paired extraction produced {} fields", out.record.len());
    out
}

/// Header-less rows keyed by arity: `[ordinal, key, value]` or `[key, value]`.
///
/// Serves both the corporate performance and the address/contact tables.
pub fn extract_by_row_arity(table: &TableNode) -> Extraction {
    let mut out = Extraction::new();

    for (idx, row) in table.rows().iter().enumerate() {
        match row.data_cells().as_slice() {
            [_, key, value] | [key, value] => out.record.insert_text(key.text(), value.text()),
            other => out.note(
                idx,
                DiagnosticKind::ShapeMismatch,
                format!("expected 2 or 3 data cells, found {}", other.len()),
            ),
        }
    }

    tracing::debug!("Row-arity extraction produced {} fields", out.record.len());
    out
}
