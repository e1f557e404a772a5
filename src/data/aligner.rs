// ============================================================
// Layer 4 — Offset Aligner
// ============================================================
// Converts a character-level answer annotation into token-level
// (start, end) positions inside one tokenization window.
//
// Why is this needed?
//   The dataset labels answers as character offsets into the
//   passage text, but an extractive model predicts TOKEN
//   positions in the [CLS] question [SEP] context [SEP] input.
//   The two are connected through the window's offset mapping.
//
// Why is it subtle?
//   A passage longer than max_length is split into several
//   overlapping windows. The same logical answer may be fully
//   inside one window, clipped at the edge of another, and
//   absent from a third. Each window must be labelled
//   independently: (0, 0) — the no-answer sentinel — whenever
//   the answer's character span is not fully contained in that
//   window's passage-token region. An answer clipped at a
//   stride boundary is recovered from an adjacent overlapping
//   window, never from this one.
//
// Algorithm per window:
//   1. Locate the passage-token region [context_start, context_end].
//   2. end_char = char_start + answer length.
//   3. If the region's character coverage does not fully contain
//      [char_start, end_char) → sentinel.
//   4. Scan forward from context_start while a token still starts
//      at or before char_start; scan backward from context_end
//      while a token still ends at or after end_char. The scans
//      overshoot by exactly one token each, so the span is
//      (idx_fwd - 1, idx_back + 1), inclusive on both ends.
//
// Reference: Devlin et al. (2019) - BERT paper, SQuAD fine-tuning

use crate::data::windows::TokenWindow;
use crate::domain::annotation::AnswerAnnotation;

/// Token-level sentinel for "this window has no answer".
/// Position 0 is always the [CLS] token, never passage text.
pub const NO_ANSWER_SPAN: (usize, usize) = (0, 0);

/// Align one annotation to one window.
///
/// Returns the inclusive (start_token, end_token) span whose
/// tokens cover the answer text, or NO_ANSWER_SPAN when the
/// annotation is empty or the answer is not representable in
/// this window.
pub fn align_answer(window: &TokenWindow, annotation: &AnswerAnnotation) -> (usize, usize) {
    // Empty annotation → always the sentinel, in every window
    if annotation.is_empty() {
        return NO_ANSWER_SPAN;
    }

    // A window with no passage tokens (empty context) cannot
    // contain any answer
    let Some((context_start, context_end)) = window.context_span() else {
        return NO_ANSWER_SPAN;
    };

    let start_char = annotation.char_start;
    let end_char   = annotation.char_end();

    // ── Containment check ─────────────────────────────────────────────────
    // The first passage token must start at or before the answer,
    // and the last must end at or after it. Otherwise the answer
    // is (partly) outside this window.
    if window.offsets[context_start].0 > start_char
        || window.offsets[context_end].1 < end_char
    {
        return NO_ANSWER_SPAN;
    }

    // ── Forward scan for the start token ──────────────────────────────────
    // Advance while tokens still begin at or before start_char;
    // the token before the stopping point contains the answer start.
    let mut idx = context_start;
    while idx <= context_end && window.offsets[idx].0 <= start_char {
        idx += 1;
    }
    let start_token = idx - 1;

    // ── Backward scan for the end token ───────────────────────────────────
    // Retreat while tokens still end at or after end_char; the
    // token after the stopping point contains the answer end.
    // isize because the scan may legitimately stop one position
    // before context_start.
    let mut idx = context_end as isize;
    while idx >= context_start as isize && window.offsets[idx as usize].1 >= end_char {
        idx -= 1;
    }
    let end_token = (idx + 1) as usize;

    (start_token, end_token)
}

/// Decode a token span back to the passage substring it covers.
///
/// Returns None for the sentinel or for spans outside the
/// window's passage-token region. The decoded range fully
/// contains the original answer text for any span produced by
/// `align_answer`.
pub fn decode_span<'a>(
    window:       &TokenWindow,
    passage_text: &'a str,
    span:         (usize, usize),
) -> Option<&'a str> {
    if span == NO_ANSWER_SPAN {
        return None;
    }
    let (context_start, context_end) = window.context_span()?;
    let (start_token, end_token) = span;
    if start_token < context_start || end_token > context_end || start_token > end_token {
        return None;
    }
    let from = window.offsets[start_token].0;
    let to   = window.offsets[end_token].1;
    passage_text.get(from..to)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::windows::split_windows;
    use crate::domain::annotation::AnswerAnnotation;

    /// Whitespace-tokenize `text` into synthetic ids + offsets,
    /// the way a word-level tokenizer would.
    fn word_tokenize(text: &str) -> (Vec<u32>, Vec<(usize, usize)>) {
        let mut ids     = Vec::new();
        let mut offsets = Vec::new();
        let mut pos = 0usize;
        for word in text.split_whitespace() {
            let start = text[pos..].find(word).unwrap() + pos;
            ids.push(2000 + ids.len() as u32);
            offsets.push((start, start + word.len()));
            pos = start + word.len();
        }
        (ids, offsets)
    }

    fn single_window(context: &str, max_length: usize) -> TokenWindow {
        let (ctx_ids, ctx_offsets) = word_tokenize(context);
        let windows = split_windows(&[7, 8], &ctx_ids, &ctx_offsets, max_length, 2).unwrap();
        assert_eq!(windows.len(), 1);
        windows.into_iter().next().unwrap()
    }

    #[test]
    fn test_exact_answer_at_context_start() {
        // "fever" starts at char 0 of "fever is bad"
        let context = "fever is bad";
        let window  = single_window(context, 16);
        let ann     = AnswerAnnotation::new("fever", 0);

        let span = align_answer(&window, &ann);
        assert_ne!(span, NO_ANSWER_SPAN);
        assert_eq!(decode_span(&window, context, span), Some("fever"));
    }

    #[test]
    fn test_answer_in_the_middle() {
        let context = "drink plenty of water today";
        let window  = single_window(context, 16);
        let start   = context.find("of water").unwrap();
        let ann     = AnswerAnnotation::new("of water", start);

        let span    = align_answer(&window, &ann);
        let decoded = decode_span(&window, context, span).unwrap();
        assert!(decoded.contains("of water"));
    }

    #[test]
    fn test_answer_at_context_end() {
        let context = "the fever broke at dawn";
        let window  = single_window(context, 16);
        let start   = context.find("dawn").unwrap();
        let ann     = AnswerAnnotation::new("dawn", start);

        let span = align_answer(&window, &ann);
        assert_eq!(decode_span(&window, context, span), Some("dawn"));
    }

    #[test]
    fn test_empty_annotation_is_sentinel_everywhere() {
        let context = "fever is a common symptom of infection";
        let (ctx_ids, ctx_offsets) = word_tokenize(context);
        let windows = split_windows(&[7], &ctx_ids, &ctx_offsets, 9, 2).unwrap();
        assert!(windows.len() > 1);

        for w in &windows {
            assert_eq!(align_answer(w, &AnswerAnnotation::empty()), NO_ANSWER_SPAN);
        }
    }

    #[test]
    fn test_answer_outside_window_is_sentinel() {
        // Two windows; the answer sits in the tail of the context,
        // entirely after the first window's passage region.
        let context = "one two three four five six seven eight nine ten";
        let (ctx_ids, ctx_offsets) = word_tokenize(context);
        // capacity = 10 - 4 = 6, stride 2 → window 0 covers words 0..6
        let windows = split_windows(&[7], &ctx_ids, &ctx_offsets, 10, 2).unwrap();
        assert!(windows.len() >= 2);

        let start = context.find("ten").unwrap();
        let ann   = AnswerAnnotation::new("ten", start);
        assert_eq!(align_answer(&windows[0], &ann), NO_ANSWER_SPAN);

        // ...but at least one later window aligns it correctly
        let hits: Vec<_> = windows
            .iter()
            .filter_map(|w| {
                let span = align_answer(w, &ann);
                decode_span(w, context, span)
            })
            .collect();
        assert!(hits.iter().any(|h| h.contains("ten")));
    }

    #[test]
    fn test_answer_clipped_at_stride_boundary_recovered_by_neighbour() {
        // A two-word answer that straddles the edge of the first
        // window must be sentinel there and whole in the overlap.
        let context = "alpha bravo charlie delta echo foxtrot golf hotel";
        let (ctx_ids, ctx_offsets) = word_tokenize(context);
        // capacity = 10 - 4 = 6 → window 0 covers words 0..6,
        // window 1 (stride 3) covers words 3..8
        let windows = split_windows(&[7], &ctx_ids, &ctx_offsets, 10, 3).unwrap();
        assert_eq!(windows.len(), 2);

        let start = context.find("foxtrot golf").unwrap();
        let ann   = AnswerAnnotation::new("foxtrot golf", start);

        // Clipped in window 0 ("golf" is word 6, outside)
        assert_eq!(align_answer(&windows[0], &ann), NO_ANSWER_SPAN);

        // Fully contained in window 1
        let span = align_answer(&windows[1], &ann);
        assert_ne!(span, NO_ANSWER_SPAN);
        assert_eq!(decode_span(&windows[1], context, span), Some("foxtrot golf"));
    }

    #[test]
    fn test_answer_aligned_in_multiple_overlapping_windows() {
        // An answer inside the overlap region must align in both
        // windows that cover it.
        let context = "alpha bravo charlie delta echo foxtrot golf hotel";
        let (ctx_ids, ctx_offsets) = word_tokenize(context);
        let windows = split_windows(&[7], &ctx_ids, &ctx_offsets, 10, 3).unwrap();
        assert_eq!(windows.len(), 2);

        // "delta" is word 3: last third of window 0, start of window 1
        let start = context.find("delta").unwrap();
        let ann   = AnswerAnnotation::new("delta", start);

        for w in &windows {
            let span = align_answer(w, &ann);
            assert_eq!(decode_span(w, context, span), Some("delta"));
        }
    }

    #[test]
    fn test_round_trip_contains_answer_for_every_enclosing_window() {
        let context = "a quick brown fox jumps over the lazy dog again and again";
        let (ctx_ids, ctx_offsets) = word_tokenize(context);
        let windows = split_windows(&[7, 8], &ctx_ids, &ctx_offsets, 12, 2).unwrap();

        for answer in ["quick brown", "lazy", "dog again and"] {
            let start = context.find(answer).unwrap();
            let ann   = AnswerAnnotation::new(answer, start);
            for w in &windows {
                let span = align_answer(w, &ann);
                if span != NO_ANSWER_SPAN {
                    let decoded = decode_span(w, context, span).unwrap();
                    assert!(
                        decoded.contains(answer),
                        "decoded '{decoded}' does not contain '{answer}'"
                    );
                }
            }
        }
    }

    #[test]
    fn test_non_ascii_context_aligns_on_byte_offsets() {
        // The corpus loader rebases annotations to byte offsets;
        // "é" is two bytes, so "bad" starts at byte 9, not char 8.
        // Alignment must label exactly the "bad" token.
        let context = "café is bad";
        let window  = single_window(context, 16);
        let ann     = AnswerAnnotation::new("bad", 9);

        let span = align_answer(&window, &ann);
        assert_eq!(decode_span(&window, context, span), Some("bad"));
    }

    #[test]
    fn test_window_without_passage_tokens_is_sentinel() {
        let windows = split_windows(&[7], &[], &[], 8, 1).unwrap();
        let ann = AnswerAnnotation::new("x", 0);
        assert_eq!(align_answer(&windows[0], &ann), NO_ANSWER_SPAN);
    }

    #[test]
    fn test_decode_span_rejects_sentinel() {
        let window = single_window("fever is bad", 16);
        assert_eq!(decode_span(&window, "fever is bad", NO_ANSWER_SPAN), None);
    }
}
