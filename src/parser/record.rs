use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::answer_key::AnswerKey;

/// One of the five lettered choices of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
    C,
    D,
    E,
}

impl Choice {
    pub const ALL: [Choice; 5] = [Choice::A, Choice::B, Choice::C, Choice::D, Choice::E];

    pub fn from_letter(c: char) -> Option<Choice> {
        match c {
            'A' => Some(Choice::A),
            'B' => Some(Choice::B),
            'C' => Some(Choice::C),
            'D' => Some(Choice::D),
            'E' => Some(Choice::E),
            _ => None,
        }
    }
}

/// A parsed question, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub text: String,
    pub options: [String; 5],
    pub correct: Option<Choice>,
    pub explanation: String,
}

/// Join statement lines, lay options out A..E and look up the key.
pub fn assemble(
    id: u64,
    statement: &[&str],
    options: &BTreeMap<Choice, String>,
    key: &AnswerKey,
) -> Record {
    let ordered = Choice::ALL.map(|c| options.get(&c).cloned().unwrap_or_default());

    Record {
        id,
        text: statement.join(" "),
        options: ordered,
        correct: key.get(id),
        explanation: String::new(),
    }
}
