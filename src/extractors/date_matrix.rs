// src/extractors/date_matrix.rs
use crate::extractors::record::{DiagnosticKind, Extraction, Record};
use crate::extractors::table::TableNode;
use crate::utils::error::ExtractError;

/// Reads a table whose first row labels the columns (usually dates), such as the
/// P/E ratio tables.
///
/// Row 0's data cells after the first are the column labels. Every later row
/// becomes `record[first cell] = { label: value, ... }`, zipped by position.
pub fn extract_date_matrix(table: &TableNode) -> Result<Extraction, ExtractError> {
    let rows = table.rows();
    let (header_row, body) = rows
        .split_first()
        .ok_or(ExtractError::EmptyTable("date matrix"))?;

    let labels: Vec<String> = header_row
        .data_cells()
        .iter()
        .skip(1)
        .map(|cell| cell.text())
        .collect();
    if labels.is_empty() {
        return Err(ExtractError::MissingColumnLabels);
    }
    tracing::debug!("Date matrix columns: {:?}", labels);

    let mut out = Extraction::new();
    for (offset, row) in body.iter().enumerate() {
        let cells = row.data_cells();
        let Some((key_cell, value_cells)) = cells.split_first() else {
            out.note(offset + 1, DiagnosticKind::ShapeMismatch, "row has no data cells");
            continue;
        };

        let values: Record = labels
            .iter()
            .zip(value_cells.iter())
            .map(|(label, cell)| (label.clone(), cell.text()))
            .collect();
        out.record.insert_record(key_cell.text(), values);
    }

    Ok(out)
}
