//! Rule-based yes/no intent interpretation.
//!
//! A fixed, ordered cascade with no scoring and no backtracking: multi-word
//! phrases first, then single-token matches, then a negation-substring
//! fallback. First match wins at every stage.

use std::sync::LazyLock;

use regex::Regex;

/// The interpretation of one free-text utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Affirmative,
    Negative,
    Unknown,
}

// Multi-word phrases take priority over single tokens so that "no way"
// cannot be intercepted by a token scan seeing "no" first.
const AFFIRMATIVE_PHRASES: &[&str] = &[
    "of course",
    "yeah sure",
    "yes please",
    "definitely yes",
    "sure thing",
];

const NEGATIVE_PHRASES: &[&str] = &[
    "not at all",
    "no way",
    "definitely not",
    "absolutely not",
    "never ever",
];

// Bare "sure" is deliberately absent: it only counts inside the phrase list,
// so hedged inputs like "i am not sure" fall through to the negation
// fallback below.
const AFFIRMATIVE_WORDS: &[&str] = &[
    "yes",
    "yeah",
    "yep",
    "absolutely",
    "ok",
    "okay",
    "alright",
    "fine",
    "definitely",
];

const NEGATIVE_WORDS: &[&str] = &["no", "nah", "nope", "never", "negative"];

// The fallback can only ever yield Negative, never Affirmative. That
// asymmetry is part of the contract.
const NEGATION_MARKERS: &[&str] = &["not", "don't"];

/// Word tokenizer: runs of letters with embedded apostrophes, punctuation
/// stripped. Applied to already-lowercased text.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)*").expect("Invalid token regex"));

/// Stateless yes/no classifier. Pure function of the input string and the
/// fixed word lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentInterpreter;

impl IntentInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// Classify an utterance as affirmative, negative, or unknown.
    pub fn interpret(&self, text: &str) -> Intent {
        let text = text.to_lowercase();

        // Stage 1: multi-word phrases, affirmative checked first.
        if AFFIRMATIVE_PHRASES.iter().any(|p| text.contains(p)) {
            return Intent::Affirmative;
        }
        if NEGATIVE_PHRASES.iter().any(|p| text.contains(p)) {
            return Intent::Negative;
        }

        // Stage 2: left-to-right token scan, affirmative set first per token.
        for token in TOKEN_RE.find_iter(&text) {
            let token = token.as_str();
            if AFFIRMATIVE_WORDS.contains(&token) {
                return Intent::Affirmative;
            }
            if NEGATIVE_WORDS.contains(&token) {
                return Intent::Negative;
            }
        }

        // Stage 3: negation-substring fallback.
        if NEGATION_MARKERS.iter().any(|m| text.contains(m)) {
            return Intent::Negative;
        }

        Intent::Unknown
    }
}
