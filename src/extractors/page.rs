// src/extractors/page.rs

// --- Imports ---
use crate::extractors::record::{Diagnostic, Record};
use crate::extractors::registry::{by_position, Extractor, TableSignature};
use crate::extractors::table::TableNode;
use crate::utils::error::ExtractError;
use scraper::{Html, Selector};
use serde::Serialize;

pub const DEFAULT_TABLE_CLASS: &str = "table table-bordered background-white";

/// How each table on the page is matched to an extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Dispatch {
    /// Inspect each table's structure.
    Signature,
    /// Trust the table's position on the company page.
    Position,
}

#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Space-separated classes every selected table must carry.
    pub table_class: String,
    pub dispatch: Dispatch,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            table_class: DEFAULT_TABLE_CLASS.to_string(),
            dispatch: Dispatch::Signature,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub index: usize,
    pub extractor: Option<Extractor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    pub record: Record,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub source: String,
    pub extracted_at: String,
    pub tables: Vec<TableReport>,
}

/// Builds a compound class selector such as `table.table.table-bordered`.
fn table_selector(table_class: &str) -> Result<Selector, ExtractError> {
    let selector = std::iter::once("table")
        .chain(table_class.split_whitespace())
        .collect::<Vec<_>>()
        .join(".");
    Selector::parse(&selector).map_err(|e| {
        tracing::error!("Invalid table selector '{}': {:?}", selector, e);
        ExtractError::InvalidSelector(selector.clone())
    })
}

/// Extracts every recognized table from a company page.
pub fn extract_page(html: &str, source: &str, options: &PageOptions) -> Result<PageReport, ExtractError> {
    let document = Html::parse_document(html);
    let selector = table_selector(&options.table_class)?;

    let tables: Vec<TableNode> = document.select(&selector).filter_map(TableNode::new).collect();
    tracing::info!("Found {} company tables in {}", tables.len(), source);

    let reports = tables
        .iter()
        .enumerate()
        .map(|(index, table)| extract_table(index, table, options.dispatch))
        .collect();

    Ok(PageReport {
        source: source.to_string(),
        extracted_at: chrono::Utc::now().to_rfc3339(),
        tables: reports,
    })
}

fn extract_table(index: usize, table: &TableNode, dispatch: Dispatch) -> TableReport {
    let (extractor, title) = match dispatch {
        Dispatch::Signature => (TableSignature::of(table).detect(), None),
        Dispatch::Position => match by_position(index) {
            Some((extractor, title)) => (Some(extractor), Some(title)),
            None => (None, None),
        },
    };

    let mut report = TableReport {
        index,
        extractor,
        title,
        record: Record::new(),
        diagnostics: Vec::new(),
        error: None,
    };

    let Some(extractor) = extractor else {
        tracing::debug!("Table {}: no extractor matched", index);
        return report;
    };

    match extractor.extract(table) {
        Ok(extraction) => {
            tracing::info!(
                "Table {} ({}): {} fields, {} diagnostics",
                index,
                extractor.name(),
                extraction.record.len(),
                extraction.diagnostics.len()
            );
            report.record = extraction.record;
            report.diagnostics = extraction.diagnostics;
        }
        Err(e) => {
            tracing::error!("Table {} ({}) failed: {}", index, extractor.name(), e);
            report.error = Some(e.to_string());
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html><html><body>
        <table class="table table-bordered background-white">
          <tr><th>Last AGM held on</th><td>22 Jun, 2023</td></tr>
        </table>
        <table class="layout"><tr><th>Ignored</th><td>x</td></tr></table>
        <table class="table table-bordered background-white">
          <tr><th>Authorized Capital</th><td>5,000</td><th>Market Lot</th><td>1</td></tr>
        </table>
        <table class="table table-bordered background-white">
          <tr><td>Particulars</td></tr>
          <tr><td>only one cell</td></tr>
        </table>
        <table class="table table-bordered background-white"></table>
      </body></html>"#;

    #[test]
    fn test_signature_dispatch_over_page() {
        let report = extract_page(PAGE, "fixture", &PageOptions::default()).unwrap();

        assert_eq!(report.tables.len(), 4);
        assert_eq!(report.tables[0].extractor, Some(Extractor::FlatKeyValue));
        assert_eq!(report.tables[0].record.text("Last AGM held on"), Some("22 Jun, 2023"));
        assert_eq!(report.tables[1].extractor, Some(Extractor::PairedKeyValue));
        assert_eq!(report.tables[1].record.text("Market Lot"), Some("1"));
        assert_eq!(report.tables[2].extractor, None);
        assert_eq!(report.tables[3].extractor, None);
    }

    #[test]
    fn test_position_dispatch_uses_page_layout() {
        let options = PageOptions {
            dispatch: Dispatch::Position,
            ..PageOptions::default()
        };
        let report = extract_page(PAGE, "fixture", &options).unwrap();

        assert_eq!(report.tables[1].title, Some("Basic Information"));
        assert_eq!(report.tables[1].record.len(), 2);
        assert_eq!(report.tables[2].title, Some("Dividend Information"));
        assert!(report.tables[2].record.is_empty());
        assert_eq!(report.tables[3].extractor, Some(Extractor::BasicEps));
    }

    #[test]
    fn test_report_serializes_records_as_json_objects() {
        let report = extract_page(PAGE, "fixture", &PageOptions::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["tables"][0]["extractor"], "flat_key_value");
        assert_eq!(json["tables"][0]["record"]["Last AGM held on"], "22 Jun, 2023");
        assert!(json["tables"][0].get("error").is_none());
    }

    #[test]
    fn test_table_selector_requires_every_class() {
        let selector = table_selector("table table-bordered").unwrap();
        let document = Html::parse_document(
            r#"<table class="table"></table><table class="table table-bordered x"></table>"#,
        );

        assert_eq!(document.select(&selector).count(), 1);
    }
}
