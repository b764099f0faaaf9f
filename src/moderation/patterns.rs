// Pattern heuristics — named, independently testable predicates over
// submitted text.
//
// Each evasion shape is its own function so new patterns can be added
// without touching existing ones. Repetition checks are plain scans over
// chars() because the regex crate has no backreferences; everything else
// is a compiled regex.

use once_cell::sync::Lazy;
use regex::Regex;

// Compile regexes once at startup
static SPACED_LETTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z]\s+[a-zA-Z]\s+[a-zA-Z]\b").unwrap());

static PUNCTUATION_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[!?.,]{3,}").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{3,}").unwrap());

static SYMBOL_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]{4,}").unwrap());

// The admission allow-list: Unicode letters, numbers, emoji, whitespace,
// and a fixed punctuation set.
static VALID_INPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[\p{L}\p{N}\p{Emoji}\s!#%?.,:'"\-$_]+$"#).unwrap());

static ALL_CAPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z\s!?.,]+$").unwrap());

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://|www\.").unwrap());

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").unwrap());

static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d\-+()]{10,}").unwrap());

// Emoji_Presentation rather than Emoji: the bare Emoji property also
// covers ASCII digits and '#', which would make every number count.
static EMOJI: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Emoji_Presentation}").unwrap());

/// Any character repeated `n` or more times consecutively.
fn has_char_run(text: &str, n: usize) -> bool {
    let mut run = 0;
    let mut prev = None;
    for c in text.chars() {
        if Some(c) == prev {
            run += 1;
        } else {
            run = 1;
            prev = Some(c);
        }
        if run >= n {
            return true;
        }
    }
    false
}

/// Any word character (letter, digit, underscore) repeated `n` or more
/// times consecutively — catches stretched-letter evasion like "fuuuck".
fn has_word_char_run(text: &str, n: usize) -> bool {
    let mut run = 0;
    let mut prev = None;
    for c in text.chars() {
        let wordy = c.is_alphanumeric() || c == '_';
        if wordy && Some(c) == prev {
            run += 1;
        } else if wordy {
            run = 1;
            prev = Some(c);
        } else {
            run = 0;
            prev = None;
        }
        if run >= n {
            return true;
        }
    }
    false
}

/// Spam: a character repeated 4+ times, or any word used more than twice.
pub fn is_spam(text: &str) -> bool {
    if has_char_run(text, 4) {
        return true;
    }

    let lowered = text.to_lowercase();
    let mut counts = std::collections::HashMap::new();
    for word in lowered.split_whitespace() {
        let count = counts.entry(word).or_insert(0u32);
        *count += 1;
        if *count > 2 {
            return true;
        }
    }
    false
}

/// Suspicious: shapes that usually mean someone is working around the
/// other filters rather than writing a fortune.
pub fn is_suspicious(text: &str) -> bool {
    SPACED_LETTERS.is_match(text)
        || has_char_run(text, 5)
        || PUNCTUATION_RUN.is_match(text)
        || WHITESPACE_RUN.is_match(text)
        || SYMBOL_RUN.is_match(text)
        || has_word_char_run(text, 3)
}

/// Structural validity: non-empty and every character on the allow-list.
pub fn is_structurally_valid(text: &str) -> bool {
    !text.is_empty() && VALID_INPUT.is_match(text)
}

// --- Extended content-shape checks (strict profile only) ---

pub fn has_repeated_punctuation(text: &str) -> bool {
    PUNCTUATION_RUN.is_match(text)
}

/// All caps, and long enough that it reads as shouting.
pub fn is_all_caps(text: &str) -> bool {
    ALL_CAPS.is_match(text) && text.chars().count() > 10
}

pub fn contains_url(text: &str) -> bool {
    URL.is_match(text)
}

pub fn contains_email(text: &str) -> bool {
    EMAIL.is_match(text)
}

/// A run of 10+ digits and phone separators.
pub fn contains_phone_number(text: &str) -> bool {
    PHONE.is_match(text)
}

pub fn has_excessive_spacing(text: &str) -> bool {
    WHITESPACE_RUN.is_match(text)
}

pub fn too_many_emoji(text: &str) -> bool {
    EMOJI.find_iter(text).count() > 5
}

/// A single character repeated 5+ times consecutively.
pub fn has_long_char_run(text: &str) -> bool {
    has_char_run(text, 5)
}
