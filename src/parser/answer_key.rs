use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::record::Choice;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Respostas:").unwrap());
static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s+([A-E])").unwrap());

/// How many trailing characters are scanned for key pairs when a document has
/// no "Respostas:" marker. Exported exams put the answer table on the last
/// page, so only the tail is searched. Known limitation: that tail is also
/// part of the question text, so a statement like "2 Alternativas" near the
/// end can leak into the key. A window of 0 scans nothing, so a document
/// without the marker gets an empty key.
pub const DEFAULT_KEY_WINDOW: usize = 5000;

/// Where the answer-key region was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Byte offset of the first "Respostas:" marker.
    Marker(usize),
    TailWindow,
}

impl KeySource {
    /// Question text ends where the key region starts.
    pub fn questions_end(&self, text: &str) -> usize {
        match self {
            KeySource::Marker(start) => *start,
            KeySource::TailWindow => text.len(),
        }
    }
}

/// Question number → correct choice for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerKey {
    answers: BTreeMap<u64, Choice>,
}

impl AnswerKey {
    /// Later pairs overwrite earlier ones for the same number.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u64, Choice)>) -> Self {
        let mut answers = BTreeMap::new();
        for (num, choice) in pairs {
            answers.insert(num, choice);
        }
        AnswerKey { answers }
    }

    pub fn get(&self, id: u64) -> Option<Choice> {
        self.answers.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Build the answer key from the marker region, or from the last
/// `window` characters when there is no marker.
pub fn extract(text: &str, window: usize) -> (AnswerKey, KeySource) {
    let (region, source) = match MARKER_RE.find(text) {
        Some(m) => (&text[m.start()..], KeySource::Marker(m.start())),
        None => (tail_chars(text, window), KeySource::TailWindow),
    };

    let pairs = PAIR_RE.captures_iter(region).filter_map(|caps| {
        let num = caps[1].parse::<u64>().ok()?;
        let choice = caps[2].chars().next().and_then(Choice::from_letter)?;
        Some((num, choice))
    });

    (AnswerKey::from_pairs(pairs), source)
}

/// The last `n` characters of `text`, or all of it when shorter.
fn tail_chars(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}
