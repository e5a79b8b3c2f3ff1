//! Pagination: splitting text into page-sized chunks
//!
//! Lengths and break offsets are counted in extended grapheme clusters, so a
//! hard cut never lands inside a user-perceived character.
//!
//! Break candidates are tried from the largest structural unit down:
//! paragraph, line, sentence, clause, word, any whitespace, and finally a
//! hard cut. Each kind must land past a fraction of the capacity to be
//! accepted, and the fraction tightens as the unit gets smaller.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Loop bound for a single pagination pass
pub const MAX_ITERATIONS: usize = 1000;

/// Break-point acceptance thresholds, as fractions of capacity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationConfig {
    pub paragraph_threshold: f32,
    pub line_threshold: f32,
    pub sentence_threshold: f32,
    pub clause_threshold: f32,
    /// Also the lower bound of the backward whitespace scan
    pub word_threshold: f32,
    /// Breaks below this fraction are forced forward to guarantee progress
    pub min_progress: f32,
    pub max_iterations: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            paragraph_threshold: 0.60,
            line_threshold: 0.65,
            sentence_threshold: 0.65,
            clause_threshold: 0.75,
            word_threshold: 0.80,
            min_progress: 0.10,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

/// What kind of boundary a chunk ended on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakKind {
    Paragraph,
    Line,
    Sentence,
    Clause,
    Word,
    Whitespace,
    HardCut,
}

/// A chosen break: the remaining text is split before `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakPoint {
    pub kind: BreakKind,
    /// Offset in grapheme clusters
    pub offset: usize,
}

/// One page worth of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    /// Boundary that ended this chunk, `None` for the final one
    pub break_kind: Option<BreakKind>,
}

/// Text paginator
#[derive(Debug, Clone, Copy, Default)]
pub struct Paginator {
    config: PaginationConfig,
}

impl Paginator {
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Split text into trimmed, non-empty page chunks
    pub fn paginate(&self, text: &str, capacity: usize) -> Vec<String> {
        self.split(text, capacity)
            .into_iter()
            .map(|chunk| chunk.text)
            .collect()
    }

    /// Split text, recording the boundary kind of each chunk
    pub fn split(&self, text: &str, capacity: usize) -> Vec<Chunk> {
        let capacity = capacity.max(1);
        let units: Vec<&str> = text.graphemes(true).collect();
        let (mut start, end) = trim_bounds(&units, 0, units.len());

        let mut chunks = Vec::new();
        let mut iterations = 0;

        while start < end {
            let remaining = &units[start..end];

            if iterations >= self.config.max_iterations {
                log::warn!(
                    "pagination exceeded {} iterations; flushing {} characters into one page",
                    self.config.max_iterations,
                    remaining.len()
                );
                chunks.push(Chunk {
                    text: remaining.concat(),
                    break_kind: None,
                });
                break;
            }
            iterations += 1;

            if remaining.len() <= capacity {
                chunks.push(Chunk {
                    text: remaining.concat(),
                    break_kind: None,
                });
                break;
            }

            let mut point = self.find_break(remaining, capacity);
            if (point.offset as f32) < self.config.min_progress * capacity as f32 || point.offset == 0
            {
                point = BreakPoint {
                    kind: BreakKind::HardCut,
                    offset: capacity.min(remaining.len()),
                };
            }

            let (chunk_start, chunk_end) = trim_bounds(remaining, 0, point.offset);
            if chunk_start < chunk_end {
                chunks.push(Chunk {
                    text: remaining[chunk_start..chunk_end].concat(),
                    break_kind: Some(point.kind),
                });
            }

            start = trim_bounds(&units, start + point.offset, end).0;
        }

        chunks
    }

    /// Choose where to split `remaining`, which is longer than `capacity`
    pub fn find_break(&self, remaining: &[&str], capacity: usize) -> BreakPoint {
        if remaining.is_empty() {
            return BreakPoint {
                kind: BreakKind::HardCut,
                offset: 0,
            };
        }
        let capacity = capacity.min(remaining.len());
        let window = &remaining[..capacity];
        let past = |pos: usize, threshold: f32| pos as f32 > threshold * capacity as f32;

        if let Some(pos) = rfind_pair(window, |a, b| is_newline(a) && is_newline(b)) {
            if past(pos, self.config.paragraph_threshold) {
                return BreakPoint {
                    kind: BreakKind::Paragraph,
                    offset: pos + 2,
                };
            }
        }

        if let Some(pos) = window.iter().rposition(|g| is_newline(g)) {
            if past(pos, self.config.line_threshold) {
                return BreakPoint {
                    kind: BreakKind::Line,
                    offset: pos + 1,
                };
            }
        }

        if let Some(pos) = rfind_pair(window, |a, b| {
            matches!(a, "." | "!" | "?") && (b == " " || is_newline(b))
        }) {
            if past(pos, self.config.sentence_threshold) {
                return BreakPoint {
                    kind: BreakKind::Sentence,
                    offset: pos + 2,
                };
            }
        }

        if let Some(pos) = rfind_pair(window, |a, b| {
            matches!(a, "," | ";") && (b == " " || is_newline(b))
        }) {
            if past(pos, self.config.clause_threshold) {
                return BreakPoint {
                    kind: BreakKind::Clause,
                    offset: pos + 2,
                };
            }
        }

        if let Some(pos) = window.iter().rposition(|g| *g == " ") {
            if past(pos, self.config.word_threshold) {
                return BreakPoint {
                    kind: BreakKind::Word,
                    offset: pos + 1,
                };
            }
        }

        // The grapheme at `capacity` would open the next page, so it is a
        // valid split point too.
        let floor = (self.config.word_threshold * capacity as f32).ceil().max(1.0) as usize;
        let last = capacity.min(remaining.len() - 1);
        if floor <= last {
            if let Some(pos) = (floor..=last).rev().find(|&i| is_whitespace(remaining[i])) {
                return BreakPoint {
                    kind: BreakKind::Whitespace,
                    offset: pos,
                };
            }
        }

        BreakPoint {
            kind: BreakKind::HardCut,
            offset: capacity,
        }
    }
}

/// Paginate with the default thresholds
pub fn paginate(text: &str, capacity: usize) -> Vec<String> {
    Paginator::default().paginate(text, capacity)
}

/// Last index `i` where `matches(window[i], window[i + 1])` holds
fn rfind_pair(window: &[&str], matches: impl Fn(&str, &str) -> bool) -> Option<usize> {
    window
        .windows(2)
        .rposition(|pair| matches(pair[0], pair[1]))
}

fn is_newline(grapheme: &str) -> bool {
    matches!(grapheme, "\n" | "\r\n" | "\r")
}

fn is_whitespace(grapheme: &str) -> bool {
    !grapheme.is_empty() && grapheme.chars().all(char::is_whitespace)
}

/// Narrow `start..end` past leading and trailing whitespace
fn trim_bounds(units: &[&str], mut start: usize, mut end: usize) -> (usize, usize) {
    end = end.min(units.len());
    while start < end && is_whitespace(units[start]) {
        start += 1;
    }
    while end > start && is_whitespace(units[end - 1]) {
        end -= 1;
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grapheme_len(text: &str) -> usize {
        text.graphemes(true).count()
    }

    fn visible(text: &str) -> String {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Prose of exactly `len` characters, never ending in whitespace
    fn prose(len: usize) -> String {
        let words = ["lorem", "ipsum", "dolor", "sit", "amet", "consectetur"];
        let mut text = String::new();
        let mut i = 0;
        while text.len() < len {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(words[i % words.len()]);
            i += 1;
        }
        text.truncate(len);
        if text.ends_with(' ') {
            text.pop();
            text.push('x');
        }
        text
    }

    /// Deterministic pseudo-random text built from mixed tokens
    fn generated_text(seed: u64, tokens: usize) -> String {
        let vocabulary = [
            "word", "ink", "paper", " ", " ", " ", "\n", "\n\n", ". ", ", ", "; ", "! ", "?\n",
            "\t", "é", "日本語", "👍🏽", "pneumonoultramicroscopicsilicovolcanoconiosis",
            "  ", ".\n",
        ];
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let mut text = String::new();
        for _ in 0..tokens {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let index = (state >> 33) as usize % vocabulary.len();
            text.push_str(vocabulary[index]);
        }
        text
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = paginate("Hello world", 100);
        assert_eq!(chunks, vec!["Hello world".to_string()]);
    }

    #[test]
    fn test_empty_and_blank_text() {
        assert!(paginate("", 100).is_empty());
        assert!(paginate("  \n\n\t ", 100).is_empty());
    }

    #[test]
    fn test_prefers_paragraph_break() {
        let first = prose(55);
        let text = format!("{}\n\n{} {}", first, prose(25), prose(39));
        assert_eq!(grapheme_len(&text), 122);

        let chunks = Paginator::default().split(&text, 70);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].break_kind, Some(BreakKind::Paragraph));
        assert_eq!(chunks[0].text, first);
        assert_eq!(chunks[1].break_kind, None);
    }

    #[test]
    fn test_paragraph_too_early_falls_to_sentence() {
        // Paragraph break at 20 is below 60% of 100
        let text = format!(
            "{}\n\n{}. {}",
            prose(20),
            prose(60),
            prose(80)
        );
        let chunks = Paginator::default().split(&text, 100);
        assert_eq!(chunks[0].break_kind, Some(BreakKind::Sentence));
        assert!(chunks[0].text.ends_with('.'));
    }

    #[test]
    fn test_line_break_preferred_over_sentence() {
        let text = format!("{}. {}\n{}", prose(40), prose(30), prose(80));
        let chunks = Paginator::default().split(&text, 100);
        assert_eq!(chunks[0].break_kind, Some(BreakKind::Line));
        assert_eq!(grapheme_len(&chunks[0].text), 72);
    }

    #[test]
    fn test_sentence_closest_to_capacity_wins() {
        let text = format!("{}! {}? {}", prose(66), prose(20), prose(80));
        let chunks = Paginator::default().split(&text, 100);
        assert_eq!(chunks[0].break_kind, Some(BreakKind::Sentence));
        assert!(chunks[0].text.ends_with('?'));
    }

    #[test]
    fn test_clause_break() {
        // No sentence end; comma at 90 is past 75%
        let text = format!("{}, {}", prose(90), prose(60));
        let chunks = Paginator::default().split(&text, 100);
        assert_eq!(chunks[0].break_kind, Some(BreakKind::Clause));
        assert!(chunks[0].text.ends_with(','));
    }

    #[test]
    fn test_word_break() {
        let text = format!("{} {}", "a".repeat(90), "b".repeat(60));
        let chunks = Paginator::default().split(&text, 100);
        assert_eq!(chunks[0].break_kind, Some(BreakKind::Word));
        assert_eq!(chunks[0].text, "a".repeat(90));
        assert_eq!(chunks[1].text, "b".repeat(60));
    }

    #[test]
    fn test_whitespace_at_capacity_boundary() {
        // The space sits exactly at the capacity index, outside the window
        let text = format!("{} {}", "a".repeat(100), "b".repeat(50));
        let chunks = Paginator::default().split(&text, 100);
        assert_eq!(chunks[0].break_kind, Some(BreakKind::Whitespace));
        assert_eq!(chunks[0].text, "a".repeat(100));
    }

    #[test]
    fn test_tab_counts_as_whitespace() {
        let text = format!("{}\t{}", "a".repeat(85), "b".repeat(60));
        let chunks = Paginator::default().split(&text, 100);
        assert_eq!(chunks[0].break_kind, Some(BreakKind::Whitespace));
        assert_eq!(chunks[0].text, "a".repeat(85));
    }

    #[test]
    fn test_no_whitespace_hard_cut() {
        let text = "a".repeat(500);
        let chunks = paginate(&text, 100);
        assert_eq!(chunks.len(), 5);
        assert!(chunks.iter().all(|c| c.len() == 100));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_oversized_token() {
        let token: String = ('a'..='z').cycle().take(300).collect();
        let chunks = paginate(&token, 100);
        assert_eq!(
            chunks.iter().map(|c| c.len()).collect::<Vec<_>>(),
            vec![100, 100, 100]
        );
        assert_eq!(chunks.concat(), token);
    }

    #[test]
    fn test_long_input_terminates() {
        let text = "x".repeat(10_000);
        let chunks = paginate(&text, 100);
        assert_eq!(chunks.len(), 100);
        assert!(chunks.iter().all(|c| c.len() == 100));
    }

    #[test]
    fn test_hard_cut_respects_graphemes() {
        let text = "👍🏽".repeat(250);
        let chunks = paginate(&text, 100);
        assert_eq!(chunks.len(), 3);
        assert_eq!(grapheme_len(&chunks[0]), 100);
        assert_eq!(grapheme_len(&chunks[2]), 50);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_iteration_cap_flushes_remainder() {
        let paginator = Paginator::new(PaginationConfig {
            max_iterations: 3,
            ..PaginationConfig::default()
        });
        let text = "a".repeat(1000);
        let chunks = paginator.paginate(&text, 100);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[3].len(), 700);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_zero_capacity_still_progresses() {
        let chunks = paginate("abc def", 0);
        assert_eq!(chunks.concat(), "abcdef");
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_no_loss_on_generated_text() {
        for seed in 0..24u64 {
            let text = generated_text(seed, 1500);
            for capacity in [100usize, 137, 250, 400] {
                let chunks = paginate(&text, capacity);
                assert_eq!(visible(&chunks.concat()), visible(&text), "seed {}", seed);
                for chunk in &chunks {
                    assert!(!chunk.is_empty());
                    assert_eq!(chunk.trim(), chunk.as_str());
                    assert!(grapheme_len(chunk) <= capacity);
                }
            }
        }
    }

    /// Covers determinism and that each chunk paginates to itself. Joining
    /// chunks and splitting again may move boundaries, since trimming drops
    /// the delimiter a chunk ended on.
    #[test]
    fn test_pagination_is_stable() {
        let text = generated_text(7, 2000);
        let first = paginate(&text, 180);
        let second = paginate(&text, 180);
        assert_eq!(first, second);

        // Every chunk is a fixed point
        for chunk in &first {
            assert_eq!(paginate(chunk, 180), vec![chunk.clone()]);
        }
    }
}
