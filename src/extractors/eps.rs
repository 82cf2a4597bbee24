// src/extractors/eps.rs

// --- Imports ---
use crate::extractors::record::{DiagnosticKind, Extraction, Record};
use crate::extractors::table::{Row, TableNode};

// --- Marker Text ---
pub const EPS_SECTION_MARKER: &str = "Earnings Per Share (EPS)";
const DATE_ROW_MARKER: &str = "Ending on";
const PARTICULARS_MARKER: &str = "Particulars";
const DATA_ROW_MARKERS: [&str; 3] = ["Basic", "Diluted", "Market price per share"];

/// Header rows carry more than this many data cells.
const MIN_HEADER_CELLS: usize = 5;

/// Output keys of the basic EPS row, in cell order after the row label.
pub const BASIC_EPS_PERIODS: [&str; 6] = ["Q1", "Q2", "Half Yearly", "Q3", "9 Months", "Annual"];

/// Scan state for the interim performance table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    NoSection,
    InSection {
        name: String,
        headers: Vec<String>,
        dates: Vec<String>,
        /// Data rows emitted so far, written out when the section closes.
        entries: Record,
    },
}

/// Row-by-row state machine over an EPS table.
///
/// Each section marker row closes the current section and opens a fresh one with
/// empty header and date labels.
/// Data rows are only emitted when values, headers and dates line up once the
/// leading "Particulars" column is dropped from the labels.
#[derive(Debug)]
pub struct EpsScanner {
    state: ScanState,
    out: Extraction,
}

impl Default for EpsScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl EpsScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::NoSection,
            out: Extraction::new(),
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Feeds one row; `idx` is only used for diagnostics.
    pub fn push_row(&mut self, idx: usize, row: &Row) {
        let raw = row.raw_text();

        if raw.contains(EPS_SECTION_MARKER) {
            let name = row.text();
            tracing::debug!("Entering EPS section '{}'", name);
            self.close_section();
            self.state = ScanState::InSection {
                name,
                headers: Vec::new(),
                dates: Vec::new(),
                entries: Record::new(),
            };
            return;
        }

        let cell_texts: Vec<String> = row.data_cells().iter().map(|cell| cell.text()).collect();

        if raw.contains(DATE_ROW_MARKER) {
            if let ScanState::InSection { dates, .. } = &mut self.state {
                *dates = cell_texts;
                tracing::trace!("Captured date labels: {:?}", dates);
            }
            return;
        }

        if let ScanState::InSection { headers, dates, .. } = &mut self.state {
            if cell_texts.len() > MIN_HEADER_CELLS && !raw.contains(PARTICULARS_MARKER) && dates.is_empty() {
                tracing::trace!("Captured header labels: {:?}", cell_texts);
                *headers = cell_texts.clone();
            }
        }

        if DATA_ROW_MARKERS.iter().any(|marker| raw.contains(marker)) {
            self.push_data_row(idx, &cell_texts);
        }
    }

    fn push_data_row(&mut self, idx: usize, cell_texts: &[String]) {
        let Some((key, values)) = cell_texts.split_first() else {
            self.out.note(idx, DiagnosticKind::ShapeMismatch, "data row has no cells");
            return;
        };

        let ScanState::InSection { headers, dates, entries, .. } = &mut self.state else {
            self.out.note(idx, DiagnosticKind::OutsideSection, format!("'{}' row before any EPS section", key));
            return;
        };

        let header_labels = headers.get(1..).unwrap_or_default();
        let date_labels = dates.get(1..).unwrap_or_default();
        if values.len() != header_labels.len() || header_labels.len() != date_labels.len() {
            let detail = format!(
                "mismatched lengths in '{}' row: {} values, {} headers, {} dates; skipping",
                key,
                values.len(),
                header_labels.len(),
                date_labels.len()
            );
            self.out.note(idx, DiagnosticKind::LengthMismatch, detail);
            return;
        }

        let mut by_label = Record::new();
        for ((label, value), date) in header_labels.iter().zip(values).zip(date_labels) {
            let mut entry = Record::new();
            entry.insert_text("value", value.as_str());
            entry.insert_text("date", date.as_str());
            by_label.insert_record(label.as_str(), entry);
        }

        entries.insert_record(key.as_str(), by_label);
    }

    /// Stores the open section, if any; a repeated section name replaces the earlier one.
    fn close_section(&mut self) {
        if let ScanState::InSection { name, entries, .. } = std::mem::replace(&mut self.state, ScanState::NoSection) {
            self.out.record.insert_record(name, entries);
        }
    }

    pub fn finish(mut self) -> Extraction {
        self.close_section();
        self.out
    }
}

/// Reads every EPS section of the interim financial performance table.
pub fn extract_eps_sections(table: &TableNode) -> Extraction {
    let mut scanner = EpsScanner::new();
    for (idx, row) in table.rows().iter().enumerate() {
        scanner.push_row(idx, row);
    }
    scanner.finish()
}

/// Reads only the basic EPS figures, keyed by fixed period names.
///
/// Considers seven-cell rows: one whose first cell names the EPS section opens it,
/// and the first "Basic" row after that supplies the six period values.
pub fn extract_basic_eps(table: &TableNode) -> Extraction {
    let mut out = Extraction::new();
    let mut in_eps_section = false;

    for (idx, row) in table.rows().iter().enumerate() {
        let cells = row.data_cells();
        if cells.len() != BASIC_EPS_PERIODS.len() + 1 {
            continue;
        }

        let label = cells[0].raw_text();
        if label.contains(EPS_SECTION_MARKER) {
            in_eps_section = true;
        } else if in_eps_section && label.contains("Basic") {
            for (period, cell) in BASIC_EPS_PERIODS.iter().zip(&cells[1..]) {
                out.record.insert_text(*period, cell.text());
            }
            tracing::debug!("Basic EPS found on row {}", idx);
            break;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::test_support::first_table;
    use scraper::Html;

    fn row_html(cells: &[&str]) -> String {
        let tds: String = cells.iter().map(|c| format!("<td>{}</td>", c)).collect();
        format!("<tr>{}</tr>", tds)
    }

    const HEADERS: [&str; 7] = ["Particulars", "Q1", "Q2", "Half Yearly", "Q3", "9 Months", "Annual"];
    const DATES: [&str; 7] = [
        "Ending on",
        "Sep 30, 2023",
        "Dec 31, 2023",
        "Dec 31, 2023",
        "Mar 31, 2024",
        "Mar 31, 2024",
        "Jun 30, 2024",
    ];

    /// Header row without "Particulars" so it is picked up as the fallback header.
    fn header_row() -> String {
        let mut cells = HEADERS;
        cells[0] = "Period";
        row_html(&cells)
    }

    #[test]
    fn test_row_emitted_when_lengths_agree() {
        let html = Html::parse_fragment(&format!(
            "<table>{}{}{}{}</table>",
            row_html(&["Earnings Per Share (EPS)"]),
            header_row(),
            row_html(&DATES),
            row_html(&["Basic", "1.2", "1.3", "2.5", "1.1", "3.6", "6.2"]),
        ));
        let out = extract_eps_sections(&first_table(&html));

        let section = out.record.record("Earnings Per Share (EPS)").unwrap();
        let basic = section.record("Basic").unwrap();
        assert_eq!(basic.len(), 6);

        let q3 = basic.record("Q3").unwrap();
        assert_eq!(q3.text("value"), Some("1.1"));
        assert_eq!(q3.text("date"), Some("Mar 31, 2024"));
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_short_row_is_dropped_with_diagnostic() {
        let html = Html::parse_fragment(&format!(
            "<table>{}{}{}{}{}</table>",
            row_html(&["Earnings Per Share (EPS)"]),
            header_row(),
            row_html(&DATES),
            row_html(&["Diluted", "1.2", "1.3", "2.5", "1.1", "3.6"]),
            row_html(&["Market price per share", "100", "101", "102", "103", "104", "105"]),
        ));
        let out = extract_eps_sections(&first_table(&html));

        let section = out.record.record("Earnings Per Share (EPS)").unwrap();
        assert!(section.get("Diluted").is_none());
        assert!(section.get("Market price per share").is_some());
        assert_eq!(out.count(DiagnosticKind::LengthMismatch), 1);
        assert_eq!(out.diagnostics[0].row, 3);
    }

    #[test]
    fn test_particulars_row_is_not_a_header() {
        let html = Html::parse_fragment(&format!(
            "<table>{}{}{}{}</table>",
            row_html(&["Earnings Per Share (EPS)"]),
            row_html(&HEADERS),
            row_html(&DATES),
            row_html(&["Basic", "1.2", "1.3", "2.5", "1.1", "3.6", "6.2"]),
        ));
        let out = extract_eps_sections(&first_table(&html));

        let section = out.record.record("Earnings Per Share (EPS)").unwrap();
        assert!(section.is_empty());
        assert_eq!(out.count(DiagnosticKind::LengthMismatch), 1);
    }

    #[test]
    fn test_new_section_resets_labels() {
        let html = Html::parse_fragment(&format!(
            "<table>{}{}{}{}{}{}</table>",
            row_html(&["Earnings Per Share (EPS) - Continuing"]),
            header_row(),
            row_html(&DATES),
            row_html(&["Earnings Per Share (EPS) - Restated"]),
            row_html(&["Basic", "1.2", "1.3", "2.5", "1.1", "3.6", "6.2"]),
            row_html(&["Diluted", "1.0", "1.1", "2.1", "0.9", "3.0", "5.8"]),
        ));
        let table = first_table(&html);
        let out = extract_eps_sections(&table);

        assert!(out.record.record("Earnings Per Share (EPS) - Continuing").unwrap().is_empty());
        let restated = out.record.record("Earnings Per Share (EPS) - Restated").unwrap();
        assert!(restated.get("Basic").is_none());
        assert!(restated.get("Diluted").is_none());
        assert_eq!(out.count(DiagnosticKind::LengthMismatch), 2);

        assert_eq!(extract_eps_sections(&table), out);
    }

    #[test]
    fn test_repeated_section_name_keeps_last_section() {
        let html = Html::parse_fragment(&format!(
            "<table>{}{}{}{}{}{}{}</table>",
            row_html(&["Earnings Per Share (EPS)"]),
            header_row(),
            row_html(&DATES),
            row_html(&["Basic", "1.2", "1.3", "2.5", "1.1", "3.6", "6.2"]),
            row_html(&["Earnings Per Share (EPS)"]),
            header_row(),
            row_html(&["Diluted", "1.0", "1.1", "2.1", "0.9", "3.0", "5.8"]),
        ));
        let out = extract_eps_sections(&first_table(&html));

        assert_eq!(out.record.len(), 1);
        let section = out.record.record("Earnings Per Share (EPS)").unwrap();
        assert!(section.get("Basic").is_none());
        assert!(section.get("Diluted").is_none());
        assert_eq!(out.count(DiagnosticKind::LengthMismatch), 1);
    }

    #[test]
    fn test_data_row_before_section_is_dropped() {
        let html = Html::parse_fragment(&format!(
            "<table>{}</table>",
            row_html(&["Basic", "1.2"]),
        ));
        let out = extract_eps_sections(&first_table(&html));

        assert!(out.record.is_empty());
        assert_eq!(out.count(DiagnosticKind::OutsideSection), 1);
    }

    #[test]
    fn test_scanner_state_transitions() {
        let html = Html::parse_fragment(&format!(
            "<table>{}{}{}</table>",
            row_html(&["Unaudited"]),
            row_html(&["Earnings Per Share (EPS)"]),
            row_html(&DATES),
        ));
        let rows = first_table(&html).rows();
        let mut scanner = EpsScanner::new();

        scanner.push_row(0, &rows[0]);
        assert_eq!(scanner.state(), &ScanState::NoSection);

        scanner.push_row(1, &rows[1]);
        scanner.push_row(2, &rows[2]);
        match scanner.state() {
            ScanState::InSection { name, headers, dates, .. } => {
                assert_eq!(name, "Earnings Per Share (EPS)");
                assert!(headers.is_empty());
                assert_eq!(dates.len(), 7);
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_basic_eps_fixed_keys() {
        let html = Html::parse_fragment(&format!(
            "<table>{}{}{}{}</table>",
            row_html(&["Basic", "9", "9", "9", "9", "9", "9"]),
            row_html(&["Earnings Per Share (EPS)", "", "", "", "", "", ""]),
            row_html(&["Basic", "1.2", "1.3", "2.5", "1.1", "3.6", "6.2"]),
            row_html(&["Basic", "0", "0", "0", "0", "0", "0"]),
        ));
        let out = extract_basic_eps(&first_table(&html));

        let expected: Record = [
            ("Q1", "1.2"),
            ("Q2", "1.3"),
            ("Half Yearly", "2.5"),
            ("Q3", "1.1"),
            ("9 Months", "3.6"),
            ("Annual", "6.2"),
        ]
        .into_iter()
        .collect();
        assert_eq!(out.record, expected);
    }

    #[test]
    fn test_basic_eps_without_section_is_empty() {
        let html = Html::parse_fragment(&format!(
            "<table>{}</table>",
            row_html(&["Basic", "1.2", "1.3", "2.5", "1.1", "3.6", "6.2"]),
        ));

        assert!(extract_basic_eps(&first_table(&html)).record.is_empty());
    }
}
