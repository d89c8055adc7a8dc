use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// OE fitment codes recognised as standalone catalogue words.
const KNOWN_CODES: [&str; 12] = [
    "MO", "AO", "VO", "RO", "LR", "FR", "N0", "N1", "N2", "N3", "N4", "N5",
];

/// Markers that may trail a description after the fitment code.
const SUFFIX_MARKERS: [&str; 6] = ["XL", "RFT", "RF", "RUNFLAT", "ZR", "ZRF"];

/// `*MO*`, `*AO*`, and similar asterisk-delimited codes.
static DELIMITED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\*([A-Z]{2,})\*").expect("valid regex"));

/// A lone `*` (the BMW star marking) at the end of a description.
static TRAILING_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\s*$").expect("valid regex"));

/// `(MO)`, `(+)`, `(-)` and similar parenthesised markings.
static PARENTHESISED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(([A-Z+\-]{1,})\)").expect("valid regex"));

/// A code written before a literal `OE`, e.g. `MO OE`.
static BEFORE_OE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b([A-Z]{2,})\s*OE").expect("valid regex"));

/// A code written after a literal `OE`, e.g. `OE MO`.
static AFTER_OE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)OE\s*([A-Z]{2,})").expect("valid regex"));

/// A word shaped like a load/speed marking, e.g. `91W` or `110V`.
static LOAD_SPEED_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[A-Z]$").expect("valid regex"));

/// An original-equipment fitment marker extracted from a description.
///
/// Manufacturer approval codes such as `MO` (Mercedes) or `N0` (Porsche),
/// the star marking used by BMW, or a bare `+`/`-` variant suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OeFitment(String);

impl OeFitment {
    /// Searches a description for a fitment marker.
    ///
    /// Patterns are tried strictly in order, first match wins: delimited
    /// (`*MO*`), trailing star, parenthesised (`(MO)`, `(+)`), code before or
    /// after a literal `OE`, known codes in word position, and finally a bare
    /// trailing `+`/`-`. Later patterns are deliberately broader; they only
    /// run when every stricter pattern has missed.
    #[must_use]
    pub fn find_in(description: &str) -> Option<Self> {
        if let Some(caps) = DELIMITED.captures(description) {
            return Some(Self(caps[1].to_uppercase()));
        }
        if TRAILING_STAR.is_match(description) {
            return Some(Self("*".to_string()));
        }
        if let Some(caps) = PARENTHESISED.captures(description) {
            return Some(Self(caps[1].to_uppercase()));
        }
        if let Some(caps) = BEFORE_OE.captures(description) {
            return Some(Self(caps[1].to_uppercase()));
        }
        if let Some(caps) = AFTER_OE.captures(description) {
            return Some(Self(caps[1].to_uppercase()));
        }
        if let Some(code) = scan_words(description) {
            return Some(Self(code));
        }
        let trimmed = description.trim();
        if trimmed.ends_with('+') {
            return Some(Self("+".to_string()));
        }
        if trimmed.ends_with('-') {
            return Some(Self("-".to_string()));
        }
        None
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OeFitment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Looks for known codes in word position: the last word, the word before a
/// trailing suffix marker or load/speed marking, and any word immediately
/// followed by a load/speed marking.
fn scan_words(description: &str) -> Option<String> {
    let words: Vec<&str> = description.split_whitespace().collect();
    let last = normalise_word(words.last()?);
    if KNOWN_CODES.contains(&last.as_str()) {
        return Some(last);
    }
    if words.len() > 1 && (SUFFIX_MARKERS.contains(&last.as_str()) || LOAD_SPEED_WORD.is_match(&last))
    {
        let second_last = normalise_word(words[words.len() - 2]);
        if KNOWN_CODES.contains(&second_last.as_str()) {
            return Some(second_last);
        }
    }
    for pair in words.windows(2) {
        let word = normalise_word(pair[0]);
        if KNOWN_CODES.contains(&word.as_str()) && LOAD_SPEED_WORD.is_match(&pair[1].to_uppercase())
        {
            return Some(word);
        }
    }
    None
}

/// Uppercases a word and strips trailing punctuation.
fn normalise_word(word: &str) -> String {
    word.to_uppercase()
        .trim_end_matches(['.', ',', ';', ':'])
        .to_string()
}
