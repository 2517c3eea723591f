pub mod answer_key;
pub mod lines;
pub mod record;
pub mod sanitize;
pub mod segments;

use answer_key::{AnswerKey, KeySource, DEFAULT_KEY_WINDOW};
use record::Record;
use sanitize::DEFAULT_NOISE_FRAGMENTS;

/// Knobs for one document parse.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Characters scanned for key pairs when there is no "Respostas:" marker.
    /// Zero disables the fallback scan.
    pub key_window: usize,
    /// Lines containing any of these are dropped as letterhead.
    pub noise_fragments: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            key_window: DEFAULT_KEY_WINDOW,
            noise_fragments: DEFAULT_NOISE_FRAGMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub records: Vec<Record>,
    pub key: AnswerKey,
    pub key_source: KeySource,
    /// Blocks whose header had no usable question number.
    pub dropped_blocks: usize,
}

impl ParsedDocument {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records that got a correct choice from the key.
    pub fn answered(&self) -> usize {
        self.records.iter().filter(|r| r.correct.is_some()).count()
    }
}

/// Full pipeline: answer key → question blocks → classified lines → records.
///
/// Without a marker the whole text is segmented, so the tail window used for
/// the key may also end up inside the last question's body.
pub fn parse_document(text: &str, opts: &ParseOptions) -> ParsedDocument {
    let (key, key_source) = answer_key::extract(text, opts.key_window);

    let questions_text = &text[..key_source.questions_end(text)];

    let mut records = Vec::new();
    let mut dropped_blocks = 0;

    for block in segments::split_questions(questions_text) {
        let Some(id) = block.number() else {
            dropped_blocks += 1;
            continue;
        };
        let body = lines::classify_body(block.body, &opts.noise_fragments);
        records.push(record::assemble(id, &body.statement, &body.options, &key));
    }

    ParsedDocument {
        records,
        key,
        key_source,
        dropped_blocks,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use super::record::Choice;

    fn parse(text: &str) -> ParsedDocument {
        parse_document(text, &ParseOptions::default())
    }

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.txt", name)).unwrap()
    }

    #[test]
    fn capital_question_end_to_end() {
        let doc = parse("Questão 7\nWhat is the capital?\nA) Paris\nB) Lyon\nRespostas:\n7 A");
        assert_eq!(doc.records.len(), 1);
        assert_eq!(
            doc.records[0],
            Record {
                id: 7,
                text: "What is the capital?".to_string(),
                options: ["Paris", "Lyon", "", "", ""].map(String::from),
                correct: Some(Choice::A),
                explanation: String::new(),
            }
        );
        assert!(matches!(doc.key_source, KeySource::Marker(_)));
    }

    #[test]
    fn key_applied_by_id() {
        let doc = parse("Questão 1\nPrimeira pergunta\nQuestão 2\nSegunda pergunta\nRespostas:\n1 A\n2 B");
        assert_eq!(doc.records.len(), 2);
        assert_eq!(doc.records[0].correct, Some(Choice::A));
        assert_eq!(doc.records[1].correct, Some(Choice::B));
        assert_eq!(doc.answered(), 2);
    }

    #[test]
    fn answer_section_not_parsed_as_question() {
        let doc = parse("Questão 1\nEnunciado\nA) x\nRespostas:\nQuestão 1 A");
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.records[0].text, "Enunciado");
    }

    #[test]
    fn no_key_leaves_correct_empty() {
        let doc = parse("Questão 1\nQual é o prazo?\nA) um dia\nB) dois dias");
        assert!(doc.key.is_empty());
        assert_eq!(doc.key_source, KeySource::TailWindow);
        assert!(doc.records.iter().all(|r| r.correct.is_none()));
    }

    #[test]
    fn no_headers_no_records() {
        let doc = parse("Texto sem cabeçalhos\nRespostas:\n1 A");
        assert!(doc.is_empty());
        assert_eq!(doc.key.len(), 1);
    }

    #[test]
    fn options_always_five() {
        let doc = parse("Questão 1\nSó enunciado\nQuestão 2\nA) a\nB) b\nC) c\nD) d\nE) e\nQuestão 3\nC) só C");
        assert!(doc.records.iter().all(|r| r.options.len() == 5));
        assert_eq!(doc.records[2].options[2], "só C");
    }

    #[test]
    fn repeated_option_letter_last_wins() {
        let doc = parse("Questão 1\nA) first\nA) second");
        assert_eq!(doc.records[0].options[0], "second");
    }

    #[test]
    fn repeated_ids_not_deduplicated() {
        let doc = parse("Questão 2\nprimeira\nQuestão 2\nsegunda\nRespostas:\n2 C");
        let ids: Vec<u64> = doc.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 2]);
        assert!(doc.records.iter().all(|r| r.correct == Some(Choice::C)));
    }

    #[test]
    fn unparsable_header_dropped() {
        let doc = parse("Questão 1234567890123456789012345\nperdida\nQuestão 1\nmantida");
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.records[0].id, 1);
        assert_eq!(doc.dropped_blocks, 1);
    }

    #[test]
    fn ten_digit_header_kept() {
        let doc = parse("Questão 5000000000\nEnunciado grande\nA) x\nRespostas:\n5000000000 A");
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.records[0].id, 5_000_000_000);
        assert_eq!(doc.records[0].correct, Some(Choice::A));
        assert_eq!(doc.dropped_blocks, 0);
    }

    #[test]
    fn zero_key_window_leaves_unanswered() {
        let opts = ParseOptions {
            key_window: 0,
            ..ParseOptions::default()
        };
        let doc = parse_document("Questão 1\nEnunciado\n1 B", &opts);
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.records[0].correct, None);
    }

    #[test]
    fn tracking_codes_never_in_output() {
        let doc = parse("Questão 1\n123456789\nEnunciado\nA) opção\n123456789\nB) outra");
        for r in &doc.records {
            assert!(!r.text.contains("123456789"));
            assert!(r.options.iter().all(|o| !o.contains("123456789")));
        }
    }

    #[test]
    fn fallback_window_overlaps_last_question() {
        // No marker: the tail is both the last body and the key source.
        let doc = parse("Questão 1\nEnunciado um\nQuestão 2\nEnunciado dois\n1 C\n2 D");
        assert_eq!(doc.key_source, KeySource::TailWindow);
        assert_eq!(doc.records[0].correct, Some(Choice::C));
        assert_eq!(doc.records[1].correct, Some(Choice::D));
        assert_eq!(doc.records[1].text, "Enunciado dois 1 C 2 D");
    }

    #[test]
    fn custom_key_window() {
        let text = format!("Questão 1\nEnunciado\n1 B\n{}", "z".repeat(200));
        let narrow = ParseOptions {
            key_window: 100,
            ..ParseOptions::default()
        };
        assert_eq!(parse_document(&text, &narrow).records[0].correct, None);
        assert_eq!(parse(&text).records[0].correct, Some(Choice::B));
    }

    #[test]
    fn parse_is_deterministic() {
        let text = fixture("alerj_sample");
        let a = parse(&text);
        let b = parse(&text);
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn alerj_fixture() {
        let doc = parse(&fixture("alerj_sample"));
        assert_eq!(doc.records.len(), 4);
        let ids: Vec<u64> = doc.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let q1 = &doc.records[0];
        assert_eq!(
            q1.text,
            "De acordo com a Constituição do Estado do Rio de Janeiro, compete à Assembleia Legislativa:"
        );
        assert_eq!(q1.options[0], "legislar sobre direito penal;");
        assert_eq!(q1.options[4], "fixar o subsídio dos Deputados Estaduais.");
        assert_eq!(q1.correct, Some(Choice::E));

        // Letterhead and tracking codes between pages are gone.
        for r in &doc.records {
            assert!(!r.text.contains("ALERJ"));
            assert!(!r.text.contains("Acessar Lista"));
            assert!(!r.text.contains("20231105"));
        }

        // Question 3 lost option D in extraction.
        assert_eq!(doc.records[2].options[3], "");
        assert_eq!(doc.records[3].correct, None);
        assert_eq!(doc.answered(), 3);
    }

    #[test]
    fn no_key_fixture() {
        let doc = parse(&fixture("no_key"));
        assert_eq!(doc.records.len(), 2);
        assert!(doc.key.is_empty());
        assert!(doc.records.iter().all(|r| r.correct.is_none()));
    }
}
