// src/core/transcriber.rs

/// Where a grapheme cluster has to sit for its rule to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Anywhere,
    /// Only when followed by the end of the token or a non-word character.
    WordEnd,
}

/// A grapheme-cluster substitution.
#[derive(Debug, Clone, Copy)]
struct Rule {
    pattern: &'static str,
    replacement: &'static str,
    anchor: Anchor,
}

const fn anywhere(pattern: &'static str, replacement: &'static str) -> Rule {
    Rule { pattern, replacement, anchor: Anchor::Anywhere }
}

const fn word_end(pattern: &'static str, replacement: &'static str) -> Rule {
    Rule { pattern, replacement, anchor: Anchor::WordEnd }
}

/// Applied top to bottom. Later rules see the output of earlier ones, so the
/// order is part of the behaviour.
const RULES: &[Rule] = &[
    word_end("tion", "ʃən"),
    word_end("sion", "ʒən"),
    anywhere("ough", "ʌf"),
    anywhere("augh", "ɔː"),
    anywhere("igh", "aɪ"),
    anywhere("ph", "f"),
    anywhere("ch", "tʃ"),
    anywhere("sh", "ʃ"),
    anywhere("th", "θ"),
    anywhere("oo", "uː"),
    anywhere("ee", "iː"),
    anywhere("ea", "iː"),
    anywhere("ai", "eɪ"),
    anywhere("ay", "eɪ"),
    anywhere("oa", "oʊ"),
    anywhere("ie", "aɪ"),
    anywhere("ou", "aʊ"),
    anywhere("ow", "oʊ"),
    word_end("er", "ɚ"),
    anywhere("ar", "ɑːr"),
    anywhere("or", "ɔːr"),
    anywhere("ir", "ɜr"),
    anywhere("ur", "ɜr"),
    anywhere("al", "ɔːl"),
    anywhere("qu", "kw"),
];

/// Separator placed between the hints of a multi-word phrase.
pub const WORD_SEPARATOR: &str = " · ";

/// A rule-based grapheme-to-phoneme approximator.
/// Deterministic: the same word always yields the same hint.
pub struct PhoneticEngine;

impl PhoneticEngine {
    pub fn new() -> Self {
        Self
    }

    /// Transcribes a single token.
    pub fn transcribe(&self, word: &str) -> String {
        let mut value = word.to_lowercase();
        for rule in RULES {
            value = apply_rule(&value, rule);
        }

        let mut result = String::with_capacity(value.len() * 2);
        for c in value.chars() {
            match letter_to_ipa(c) {
                Some(ipa) => result.push_str(ipa),
                None => result.push(c),
            }
        }
        result
    }

    /// Transcribes every whitespace-separated token and wraps the result in
    /// slashes, e.g. `"thank you"` becomes `"/θænk · iæʊ/"`.
    pub fn transcribe_phrase(&self, text: &str) -> String {
        let pieces: Vec<String> = text.split_whitespace().map(|piece| self.transcribe(piece)).collect();
        if pieces.is_empty() {
            return String::new();
        }
        format!("/{}/", pieces.join(WORD_SEPARATOR))
    }
}

impl Default for PhoneticEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces every non-overlapping occurrence of the rule's pattern, scanning
/// left to right.
fn apply_rule(input: &str, rule: &Rule) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while !rest.is_empty() {
        if rest.starts_with(rule.pattern) && anchor_holds(&rest[rule.pattern.len()..], rule.anchor) {
            out.push_str(rule.replacement);
            rest = &rest[rule.pattern.len()..];
            continue;
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}

fn anchor_holds(after: &str, anchor: Anchor) -> bool {
    match anchor {
        Anchor::Anywhere => true,
        // Word characters are ASCII letters, digits and underscore; anything
        // else (including already-substituted IPA symbols) ends the word.
        Anchor::WordEnd => match after.chars().next() {
            None => true,
            Some(c) => !(c.is_ascii_alphanumeric() || c == '_'),
        },
    }
}

fn letter_to_ipa(c: char) -> Option<&'static str> {
    match c {
        'a' => Some("æ"), 'b' => Some("b"), 'c' => Some("k"), 'd' => Some("d"),
        'e' => Some("ɛ"), 'f' => Some("f"), 'g' => Some("g"), 'h' => Some("h"),
        'i' => Some("ɪ"), 'j' => Some("ʤ"), 'k' => Some("k"), 'l' => Some("l"),
        'm' => Some("m"), 'n' => Some("n"), 'o' => Some("ɒ"), 'p' => Some("p"),
        'q' => Some("k"), 'r' => Some("ɹ"), 's' => Some("s"), 't' => Some("t"),
        'u' => Some("ʌ"), 'v' => Some("v"), 'w' => Some("w"), 'x' => Some("ks"),
        'y' => Some("i"), 'z' => Some("z"),
        _ => None,
    }
}
