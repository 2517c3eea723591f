use std::sync::LazyLock;

use regex::Regex;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Questão\s+\d+").unwrap());
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// A "Questão N" header and the text up to the next header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionBlock<'a> {
    pub header: &'a str,
    pub body: &'a str,
}

impl QuestionBlock<'_> {
    /// First digit run of the header. None when it is absent or overflows.
    pub fn number(&self) -> Option<u64> {
        DIGITS_RE.find(self.header)?.as_str().parse().ok()
    }
}

/// Split on question headers. Text before the first header is dropped.
pub fn split_questions(text: &str) -> Vec<QuestionBlock<'_>> {
    let headers: Vec<_> = HEADER_RE.find_iter(text).collect();
    let mut blocks = Vec::with_capacity(headers.len());

    for (i, m) in headers.iter().enumerate() {
        let body_end = headers.get(i + 1).map_or(text.len(), |next| next.start());
        blocks.push(QuestionBlock {
            header: m.as_str(),
            body: &text[m.end()..body_end],
        });
    }

    blocks
}
