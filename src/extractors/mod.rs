// src/extractors/mod.rs
pub mod date;
pub mod date_matrix;
pub mod eps;
pub mod key_value;
pub mod page;
pub mod record;
pub mod registry;
pub mod shareholding;
pub mod table;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use page::{extract_page, Dispatch, PageOptions, PageReport, TableReport};
#[allow(unused_imports)]
pub use record::{Diagnostic, DiagnosticKind, Extraction, Field, Record};
#[allow(unused_imports)]
pub use registry::{Extractor, TableSignature};
#[allow(unused_imports)]
pub use table::TableNode;
