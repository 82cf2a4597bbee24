// src/dse/models.rs
use crate::utils::error::FetchError;
use serde::Serialize;

pub const DEFAULT_BASE_URL: &str = "https://dsebd.org/displayCompany.php";

/// A company profile page identified by its trading code.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyPage {
    pub symbol: String,
    pub base_url: String,
}

impl CompanyPage {
    pub fn new(symbol: &str, base_url: &str) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            base_url: base_url.to_string(),
        }
    }

    /// Constructs the URL of the profile page, e.g. `...displayCompany.php?name=RENATA`.
    pub fn url(&self) -> Result<String, FetchError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.query_pairs_mut().append_pair("name", &self.symbol);
        Ok(url.to_string())
    }
}
