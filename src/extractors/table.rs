// src/extractors/table.rs

// --- Imports ---
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

// --- CSS Selectors (Lazy Static) ---
static NESTED_TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table").expect("Failed to compile NESTED_TABLE_SELECTOR")
});

/// Handle to one `<table>` element.
///
/// Only row/cell topology and text are read; attributes and styling are ignored.
/// Rows of nested tables are never reported as rows of this table.
#[derive(Debug, Clone, Copy)]
pub struct TableNode<'a> {
    element: ElementRef<'a>,
}

impl<'a> TableNode<'a> {
    /// Wraps an element, returning `None` unless it is a `<table>`.
    pub fn new(element: ElementRef<'a>) -> Option<Self> {
        (element.value().name() == "table").then_some(Self { element })
    }

    /// Rows in document order, looking through `thead`/`tbody`/`tfoot` groups.
    pub fn rows(&self) -> Vec<Row<'a>> {
        let mut rows = Vec::new();
        for child in child_elements(self.element) {
            match child.value().name() {
                "tr" => rows.push(Row { element: child }),
                "thead" | "tbody" | "tfoot" => rows.extend(
                    child_elements(child)
                        .filter(|el| el.value().name() == "tr")
                        .map(|element| Row { element }),
                ),
                _ => {}
            }
        }
        rows
    }
}

/// One `<tr>` of a [`TableNode`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    element: ElementRef<'a>,
}

impl<'a> Row<'a> {
    /// `<th>` children in document order.
    pub fn header_cells(&self) -> Vec<Cell<'a>> {
        self.cells_named("th")
    }

    /// `<td>` children in document order.
    pub fn data_cells(&self) -> Vec<Cell<'a>> {
        self.cells_named("td")
    }

    fn cells_named(&self, name: &str) -> Vec<Cell<'a>> {
        child_elements(self.element)
            .filter(|el| el.value().name() == name)
            .map(|element| Cell { element })
            .collect()
    }

    /// Untrimmed concatenation of every text node in the row, nested content included.
    pub fn raw_text(&self) -> String {
        self.element.text().collect()
    }

    /// Row text with each fragment trimmed and joined without separators.
    pub fn text(&self) -> String {
        stripped_text(self.element)
    }

    /// True when any cell of this row holds an inner table.
    pub fn has_nested_table(&self) -> bool {
        self.header_cells()
            .iter()
            .chain(self.data_cells().iter())
            .any(|cell| cell.nested_table().is_some())
    }
}

/// One `<th>` or `<td>` of a [`Row`].
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    element: ElementRef<'a>,
}

impl<'a> Cell<'a> {
    /// Cell text with each fragment trimmed and joined without separators.
    pub fn text(&self) -> String {
        stripped_text(self.element)
    }

    pub fn raw_text(&self) -> String {
        self.element.text().collect()
    }

    /// First table found anywhere inside this cell.
    pub fn nested_table(&self) -> Option<TableNode<'a>> {
        self.element
            .select(&NESTED_TABLE_SELECTOR)
            .next()
            .map(|element| TableNode { element })
    }
}

fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

fn stripped_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}
