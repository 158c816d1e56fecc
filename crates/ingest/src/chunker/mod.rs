//! Text chunking engine.
//!
//! Splits document text into overlapping, size-bounded chunks suitable for
//! embedding: whitespace is normalized, text is cut at sentence-like
//! boundaries, and sentences are greedily packed into a character budget with
//! a word-tail overlap seeding each new chunk.

mod helpers;
mod types;

pub use types::{Chunk, ChunkConfig};

use helpers::{normalize_whitespace, overlap_tail, split_sentences};

/// Split `text` into ordered chunks according to `config`.
///
/// Sentences are accumulated until the next one would push the buffer past
/// `max_size` characters; the buffer is then flushed and the new buffer is
/// seeded with the trailing `overlap / 5` words of the previous chunk. A
/// single sentence longer than `max_size` is kept whole, so chunks may exceed
/// the budget by up to one sentence.
///
/// Empty or whitespace-only input yields no chunks.
pub fn split_text(text: &str, config: &ChunkConfig) -> Vec<Chunk> {
    let normalized = normalize_whitespace(text);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut contents: Vec<String> = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(&normalized) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        if current.len() + sentence.len() > config.max_size {
            let closed = current.trim();
            if !closed.is_empty() {
                contents.push(closed.to_string());
            }

            if !contents.is_empty() && config.overlap > 0 {
                // Convert the character-oriented overlap budget into a word
                // count (approximation: ~5 chars per word).
                let tail = overlap_tail(&current, config.overlap / 5);
                current = if tail.is_empty() {
                    sentence.to_string()
                } else {
                    format!("{tail} {sentence}")
                };
            } else {
                current = sentence.to_string();
            }
        } else {
            current.push(' ');
            current.push_str(sentence);
        }
    }

    let remainder = current.trim();
    if !remainder.is_empty() {
        contents.push(remainder.to_string());
    }

    contents
        .into_iter()
        .enumerate()
        .map(|(index, content)| Chunk { index, content })
        .collect()
}

#[cfg(test)]
mod tests;
