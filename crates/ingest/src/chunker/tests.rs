//! Tests for the chunking engine.

use super::helpers::{normalize_whitespace, overlap_tail, split_sentences};
use super::{split_text, Chunk, ChunkConfig};

fn config(max_size: usize, overlap: usize) -> ChunkConfig {
    ChunkConfig { max_size, overlap }
}

// ── Sentence splitting ──────────────────────────────────────────────

#[test]
fn splits_on_all_three_terminators() {
    let sents = split_sentences("First one. Second one! Third one? Fourth");
    assert_eq!(sents, vec!["First one.", "Second one!", "Third one?", "Fourth"]);
}

#[test]
fn terminator_without_space_does_not_split() {
    // Decimals and abbreviations are not special-cased; only the
    // punctuation-space pair delimits.
    let sents = split_sentences("Pi is 3.14 exactly");
    assert_eq!(sents.len(), 1);
}

#[test]
fn trailing_terminator_keeps_punctuation() {
    let sents = split_sentences("Only sentence.");
    assert_eq!(sents, vec!["Only sentence."]);
}

// ── Normalization ───────────────────────────────────────────────────

#[test]
fn normalize_collapses_newlines_and_tabs() {
    assert_eq!(
        normalize_whitespace("a\n\nb\t c \r\n d"),
        "a b c d"
    );
    assert_eq!(normalize_whitespace("   \n\t  "), "");
}

// ── Overlap tail ────────────────────────────────────────────────────

#[test]
fn overlap_tail_extracts_trailing_words() {
    assert_eq!(overlap_tail("a b c d e", 3), "c d e");
    assert_eq!(overlap_tail("a b", 5), "a b"); // budget exceeds available words
    assert_eq!(overlap_tail("a b c", 0), "");
}

// ── Chunking ────────────────────────────────────────────────────────

#[test]
fn empty_input_produces_no_chunks() {
    assert!(split_text("", &ChunkConfig::default()).is_empty());
    assert!(split_text("   \n\t  ", &ChunkConfig::default()).is_empty());
}

#[test]
fn short_text_produces_single_chunk() {
    let chunks = split_text("Just one sentence here.", &ChunkConfig::default());
    assert_eq!(
        chunks,
        vec![Chunk {
            index: 0,
            content: "Just one sentence here.".to_string()
        }]
    );
}

#[test]
fn reassembly_preserves_content_in_order() {
    let text = "Alpha comes first. Beta follows! Gamma asks a question? Delta ends it. \
                Epsilon adds more. Zeta keeps going. Eta nearly done. Theta closes.";
    let chunks = split_text(text, &config(40, 0));
    assert!(chunks.len() > 1);

    // With zero overlap, rejoining the chunks reproduces the normalized text.
    let rejoined = chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(rejoined, normalize_whitespace(text));
}

#[test]
fn oversized_sentence_is_kept_whole() {
    let long = "This single sentence is far longer than the configured chunk budget allows.";
    assert!(long.len() > 20);
    let chunks = split_text(long, &config(20, 0));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, long);
}

#[test]
fn overlap_seeds_next_chunk_with_word_tail() {
    // Two sentences that individually fit a 50-char budget but jointly
    // exceed it; overlap budget 25 converts to a 5-word tail.
    let s1 = "one two three four five six seven eight nine ten.";
    let s2 = "More text follows in the second sentence here.";
    assert!(s1.len() <= 50 && s2.len() <= 50 && s1.len() + s2.len() > 50);

    let chunks = split_text(&format!("{s1} {s2}"), &config(50, 25));
    assert!(chunks.len() >= 2);
    assert_eq!(chunks[0].content, s1);
    assert!(
        chunks[1].content.starts_with("six seven eight nine ten."),
        "chunk 2 must begin with the trailing 5 words of chunk 1: {:?}",
        chunks[1].content
    );
    assert!(chunks[1].content.ends_with(s2));
}

#[test]
fn zero_overlap_produces_no_repeated_words() {
    let text = "Alpha bravo charlie delta echo foxtrot. Golf hotel india juliet kilo lima.";
    let chunks = split_text(text, &config(40, 0));
    assert_eq!(chunks.len(), 2);
    assert!(!chunks[1].content.contains("Alpha"));
    assert!(!chunks[1].content.contains("foxtrot"));
}

#[test]
fn overlap_budget_below_word_size_seeds_nothing() {
    // overlap / 5 == 0 words, so the new buffer starts with the triggering
    // sentence alone.
    let text = "Alpha bravo charlie delta echo foxtrot. Golf hotel india juliet kilo lima.";
    let chunks = split_text(text, &config(40, 4));
    assert_eq!(chunks.len(), 2);
    assert!(chunks[1].content.starts_with("Golf"));
}

#[test]
fn overlap_larger_than_available_words_uses_all_of_them() {
    let text = "Tiny first. This second sentence is long enough to force a split right here.";
    let chunks = split_text(text, &config(12, 1000));
    assert!(chunks.len() >= 2);
    // 1000 / 5 = 200 words requested; chunk 1 has only two. Both seed chunk 2.
    assert!(chunks[1].content.starts_with("Tiny first."));
}

#[test]
fn chunk_indices_are_sequential() {
    let text = "One sentence here. Two sentences here. Three sentences here. Four here.";
    let chunks = split_text(text, &config(25, 0));
    for (i, c) in chunks.iter().enumerate() {
        assert_eq!(c.index, i);
    }
}

#[test]
fn upload_scenario_splits_into_multiple_chunks() {
    let text = "Page 1. It has two sentences! Page 2 continues here.";
    let chunks = split_text(text, &config(20, 0));
    assert!(chunks.len() >= 2);
    for c in &chunks {
        assert!(!c.content.trim().is_empty());
    }
}
