use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::record::Choice;
use super::sanitize::clean_line;

static OPTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-E])[\s.)\-](.*)$").unwrap());

/// Statement lines this short are stray page artifacts.
const MIN_STATEMENT_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Option { choice: Choice, text: &'a str },
    Statement(&'a str),
    Skip,
}

/// Classify one already-sanitized line.
pub fn classify_line(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Skip;
    }

    if let Some(caps) = OPTION_RE.captures(line) {
        if let Some(choice) = caps[1].chars().next().and_then(Choice::from_letter) {
            let text = caps.get(2).map_or("", |m| m.as_str()).trim();
            return Line::Option { choice, text };
        }
    }

    if line.chars().count() >= MIN_STATEMENT_CHARS {
        Line::Statement(line)
    } else {
        Line::Skip
    }
}

/// Statement lines in order, and option text per letter.
#[derive(Debug, Default)]
pub struct ClassifiedBody<'a> {
    pub statement: Vec<&'a str>,
    pub options: BTreeMap<Choice, String>,
}

/// Sanitize and classify every line of a question body. A repeated letter
/// replaces the earlier option text.
pub fn classify_body<'a>(body: &'a str, noise_fragments: &[String]) -> ClassifiedBody<'a> {
    let mut out = ClassifiedBody::default();

    for raw in body.split('\n') {
        match classify_line(clean_line(raw, noise_fragments)) {
            Line::Option { choice, text } => {
                out.options.insert(choice, text.to_string());
            }
            Line::Statement(s) => out.statement.push(s),
            Line::Skip => {}
        }
    }

    out
}
