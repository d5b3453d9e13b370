use std::time::{Duration, SystemTime};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use typeglow::text_buffer::{count_words, MAX_WORDS};
use typeglow::{
    Action, KeyEventProcessor, Metrics, SessionState, TextBuffer, TypingError, TypingSession,
};

const KEYS: &[&str] = &[
    "a", "b", "c", "A", " ", "Enter", "Tab", "Backspace", "Backspace", "Shift", "Control", "Alt",
    "ArrowLeft", "F5", "é", "",
];

fn session(text: &str) -> TypingSession {
    let (buffer, _) = TextBuffer::load(text).unwrap();
    TypingSession::new(buffer)
}

fn assert_invariants(s: &TypingSession) {
    assert_eq!(s.flags().len(), s.cursor());
    assert_eq!(s.correct_count() + s.error_count(), s.cursor());
    assert!(s.cursor() <= s.text().len());
    assert_eq!(
        s.correct_count(),
        s.flags().iter().filter(|&&ok| ok).count()
    );
}

#[test]
fn invariants_hold_for_random_key_streams() {
    let texts = ["abc", "a b\nc\td", "Aa Bb", "x", "abc abc abc abc"];
    let processor = KeyEventProcessor::new();

    for seed in 0..200u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let text = texts[rng.gen_range(0..texts.len())];
        let mut s = session(text);
        let now = SystemTime::now();

        for _ in 0..60 {
            let key = KEYS.choose(&mut rng).unwrap();
            let before = s.cursor();
            let outcome = processor.process(key, &mut s, now);
            assert_invariants(&s);

            let after = s.cursor();
            assert!(after == before || after + 1 == before || after == before + 1);
            if !outcome.changed {
                assert_eq!(after, before);
            }
        }
    }
}

#[test]
fn backspace_then_retype_restores_counts() {
    let processor = KeyEventProcessor::new();
    let now = SystemTime::now();

    for (text, typed) in [("hello", "hxllo"), ("ab cd", "ab cd"), ("Tab\there", "tab\there")] {
        let mut s = session(text);
        for c in typed.chars().take(text.len() - 1) {
            let raw = if c == '\t' { "Tab".to_string() } else { c.to_string() };
            processor.process(&raw, &mut s, now);

            let before = (s.cursor(), s.correct_count(), s.error_count());
            let last = *s.flags().last().unwrap();
            assert!(s.backspace());
            s.record(last, now).unwrap();
            assert_eq!((s.cursor(), s.correct_count(), s.error_count()), before);
        }
    }
}

#[test]
fn load_truncates_1200_words_to_1000() {
    let raw = (0..1200).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
    let (buffer, report) = TextBuffer::load(&raw).expect("no error for long input");
    assert_eq!(count_words(&buffer.as_string()), MAX_WORDS);
    assert!(report.truncated);
    assert!(buffer.as_string().ends_with("w999"));
}

#[test]
fn load_empty_string_is_rejected() {
    assert_eq!(TextBuffer::load(""), Err(TypingError::EmptyInput));
}

#[test]
fn scenario_two_chars_one_error() {
    let processor = KeyEventProcessor::new();
    let mut s = session("ab");
    let now = SystemTime::now();
    assert_eq!(processor.process("a", &mut s, now).action, Action::Accept { correct: true });
    assert_eq!(processor.process("x", &mut s, now).action, Action::Accept { correct: false });

    assert_eq!(s.cursor(), 2);
    assert_eq!(s.correct_count(), 1);
    assert_eq!(s.error_count(), 1);
    assert_eq!(s.state(), SessionState::Complete);
    assert_eq!(Metrics::compute(Some(&s), now).accuracy, 50);
}

#[test]
fn scenario_wpm_after_thirty_seconds() {
    let mut s = session("hello world and more");
    let now = SystemTime::now();
    let started = now - Duration::from_millis(30_000);
    for _ in 0.."hello world".len() {
        s.record(true, started).unwrap();
    }
    let m = Metrics::compute(Some(&s), now);
    assert_eq!(m.words_typed, 2);
    assert_eq!(m.wpm, 4);
}

#[test]
fn scenario_backspace_at_start_changes_nothing() {
    let processor = KeyEventProcessor::new();
    let mut s = session("abc");
    let outcome = processor.process("Backspace", &mut s, SystemTime::now());
    assert_eq!(outcome.action, Action::Backspace);
    assert_eq!(s.cursor(), 0);
    assert_eq!(s.state(), SessionState::NotStarted);
    assert_eq!(s.started_at(), None);
}

#[test]
fn scenario_shift_is_ignored_everywhere() {
    let processor = KeyEventProcessor::new();
    let mut s = session("ab");
    let now = SystemTime::now();
    for _ in 0..3 {
        let cursor = s.cursor();
        assert_eq!(processor.process("Shift", &mut s, now).action, Action::Ignore);
        assert_eq!(s.cursor(), cursor);
        processor.process("a", &mut s, now);
    }
}
