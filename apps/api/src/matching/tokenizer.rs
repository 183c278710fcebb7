use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Minimal EN + FR stop-word list.
///
/// Accented entries can never match: the word pattern below is ASCII-only,
/// so `été` reaches the filter as `t` (dropped for length) and never whole.
const STOP_WORDS: &[&str] = &[
    // EN
    "the", "a", "an", "and", "or", "for", "to", "of", "in", "on", "with", "at", "by", "from",
    "as", "this", "that", "these", "those", "is", "are", "was", "were", "be", "been", "being",
    "it", "its", "you", "your", "we", "our", "they", "their", "i", "me", "my", "he", "she", "his",
    "her", "them", "us", "but", "if", "so", "not", "no", "yes", "can", "could", "would",
    "should",
    // FR
    "le", "la", "les", "un", "une", "des", "de", "du", "au", "aux", "en", "dans", "sur", "sous",
    "par", "pour", "avec", "sans", "chez", "ce", "cet", "cette", "ces", "et", "ou", "mais",
    "donc", "ni", "car", "est", "sont", "été", "etre", "être", "avoir", "ai", "ont", "sera",
    "seront", "était", "étaient", "il", "elle", "ils", "elles", "nous", "vous", "tu", "te", "ton",
    "ta", "tes", "mon", "ma", "mes", "nos", "vos", "leur", "leurs", "qui", "que", "quoi", "dont",
    "où", "deux", "trois",
];

const MIN_TOKEN_LEN: usize = 2;

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z0-9]+").expect("Invalid word regex"))
}

pub fn is_stop_word(token: &str) -> bool {
    stop_words().contains(token)
}

/// Lowercases `text` and splits it into ASCII alphanumeric tokens, dropping
/// stop words and single-character tokens. Order follows the input.
///
/// Non-ASCII letters are separators here, so `Développeur` yields
/// `d` + `veloppeur`. No stemming is applied.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !is_stop_word(t))
        .map(String::from)
        .collect()
}
