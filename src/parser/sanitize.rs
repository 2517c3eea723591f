use std::sync::LazyLock;

use regex::Regex;

/// Footer/tracking codes: a line made only of 8+ digits.
static NUMERIC_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{8,}$").unwrap());

/// Letterhead and site-navigation fragments seen in the exported exam PDFs.
pub const DEFAULT_NOISE_FRAGMENTS: &[&str] = &["Acessar Lista", "ALERJ"];

/// Trim a line, or return "" when it is known junk.
pub fn clean_line<'a>(line: &'a str, noise_fragments: &[String]) -> &'a str {
    let trimmed = line.trim();
    if NUMERIC_CODE_RE.is_match(trimmed) {
        return "";
    }
    if noise_fragments
        .iter()
        .any(|frag| !frag.is_empty() && line.contains(frag.as_str()))
    {
        return "";
    }
    trimmed
}
