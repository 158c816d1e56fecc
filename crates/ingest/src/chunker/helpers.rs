//! Text splitting utilities used by the chunking engine.

/// Collapse all whitespace runs (including newlines) to single spaces.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `text` at sentence-like boundaries: `". "`, `"! "`, `"? "`.
///
/// A simple heuristic, not sentence parsing (abbreviations and decimals are
/// not special-cased). Each unit keeps its terminal punctuation; the
/// delimiting space is consumed.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut sentences = Vec::new();
    let mut start = 0;

    let mut i = 0;
    while i < bytes.len() {
        let is_terminal = matches!(bytes[i], b'.' | b'!' | b'?');
        if is_terminal && i + 1 < bytes.len() && bytes[i + 1] == b' ' {
            sentences.push(&text[start..=i]);
            start = i + 2;
            i = start;
        } else {
            i += 1;
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Extract the trailing `word_count` words from `text`, joined by single
/// spaces. Fewer words than requested is not an error; all of them are used.
pub(crate) fn overlap_tail(text: &str, word_count: usize) -> String {
    if word_count == 0 {
        return String::new();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    let take = word_count.min(words.len());
    words[words.len() - take..].join(" ")
}
