// src/extractors/date.rs
use chrono::Month;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// Parenthetical asides such as "(year ended)" or "(audited)"
static PARENTHETICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(.*?\)").expect("Failed to compile PARENTHETICAL_RE"));

const AS_ON_MARKER: &str = "as on";
const NOISE_CHARS: [char; 4] = ['\r', '\n', '[', ']'];

/// Result of normalizing an "as on <Mon> <day>, <Year>" phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedDate {
    /// `01/MM/YYYY`.
    Parsed(String),
    /// The cleaned text, returned when no month/year could be recognized.
    Unparsed(String),
}

impl NormalizedDate {
    pub fn is_parsed(&self) -> bool {
        matches!(self, NormalizedDate::Parsed(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            NormalizedDate::Parsed(s) | NormalizedDate::Unparsed(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            NormalizedDate::Parsed(s) | NormalizedDate::Unparsed(s) => s,
        }
    }
}

/// Normalizes text like `"Share Holding (%) as on Jun 30, 2023"` to `"01/06/2023"`.
///
/// The page never supplies a usable day, so the day is always `01`. Never fails:
/// unrecognized input comes back as [`NormalizedDate::Unparsed`].
pub fn normalize_date(raw: &str) -> NormalizedDate {
    let without_asides = PARENTHETICAL_RE.replace_all(raw, "");
    let cleaned: String = without_asides
        .chars()
        .filter(|c| !NOISE_CHARS.contains(c))
        .collect();

    let tail = cleaned
        .rsplit(AS_ON_MARKER)
        .next()
        .unwrap_or_default()
        .trim();

    let tokens: Vec<&str> = tail.split_whitespace().collect();
    if let [month, _day, year] = tokens.as_slice() {
        if let Some(month) = month_number(month) {
            return NormalizedDate::Parsed(format!("01/{:02}/{}", month, year));
        }
        tracing::debug!("Unrecognized month token '{}' in date text '{}'", month, tail);
    } else {
        tracing::debug!("Expected 3 date tokens, found {} in '{}'", tokens.len(), tail);
    }

    NormalizedDate::Unparsed(tail.to_string())
}

/// Month number for a three-letter English abbreviation, case-insensitive.
fn month_number(token: &str) -> Option<u32> {
    if token.len() != 3 {
        return None;
    }
    token
        .parse::<Month>()
        .ok()
        .map(|month| month.number_from_month())
}
