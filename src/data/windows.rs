// ============================================================
// Layer 4 — Tokenization Windows
// ============================================================
// A long passage does not fit into one model input, so each
// (question, passage) pair is tokenized into one or more
// overlapping windows of at most max_length tokens:
//
//   [CLS] question [SEP] context-slice [SEP] [PAD]...
//
// Consecutive windows of the same passage overlap by `stride`
// context tokens, so an answer cut off at one window's edge is
// fully contained in a neighbouring window.
//
// Every token carries two pieces of metadata:
//   - its role (question side, passage side, or padding)
//   - its (char_start, char_end) offsets into the passage text
//     (non-passage tokens get the (0, 0) placeholder)
//
// The Offset Aligner uses both to turn character-level answer
// annotations into token positions.
//
// `split_windows` is a pure function over already-tokenized ids
// and offsets; the tokenizer itself stays behind the
// WindowTokenizer capability trait.

use serde::{Deserialize, Serialize};

use crate::error::{QaError, QaResult};

/// BERT-convention special token ids, matching the tokenizer
/// vocabulary used throughout the system.
pub const CLS_ID: u32 = 101;
pub const SEP_ID: u32 = 102;
pub const PAD_ID: u32 = 0;

/// Which side of the input a token belongs to. Special tokens
/// ([CLS], [SEP]) count as Question — the aligner only needs to
/// know which tokens are passage text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenRole {
    Question,
    Passage,
    Padding,
}

/// One tokenized window of a (question, passage) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenWindow {
    /// Token ids, padded to max_length
    pub input_ids: Vec<u32>,

    /// 1 = real token, 0 = padding
    pub attention_mask: Vec<u32>,

    /// (char_start, char_end) into the passage text per token;
    /// (0, 0) for question, special and padding tokens
    pub offsets: Vec<(usize, usize)>,

    /// Role per token, same length as input_ids
    pub roles: Vec<TokenRole>,

    /// Index of the passage this window was split from, stamped
    /// by the caller that iterates the corpus
    pub source_passage_index: usize,
}

impl TokenWindow {
    /// First and last token indices whose role is Passage, or
    /// None for a window with no passage tokens (empty context).
    pub fn context_span(&self) -> Option<(usize, usize)> {
        let start = self.roles.iter().position(|r| *r == TokenRole::Passage)?;
        let mut idx = start;
        while idx < self.roles.len() && self.roles[idx] == TokenRole::Passage {
            idx += 1;
        }
        Some((start, idx - 1))
    }

    /// Offsets with every non-passage position overwritten to None.
    ///
    /// Inference windows keep only this masked mapping so span
    /// decoding can distinguish passage tokens from question and
    /// padding tokens unambiguously.
    pub fn masked_offsets(&self) -> Vec<Option<(usize, usize)>> {
        self.roles
            .iter()
            .zip(self.offsets.iter())
            .map(|(role, off)| match role {
                TokenRole::Passage => Some(*off),
                _ => None,
            })
            .collect()
    }
}

/// Split an already-tokenized (question, context) pair into
/// overlapping windows.
///
/// Per-window context capacity is `max_length - question_len - 3`
/// (three special tokens). Consecutive windows overlap by exactly
/// `stride` context tokens. An empty context yields one window
/// with no passage tokens.
///
/// Deterministic: the window count depends only on the context
/// length, max_length and stride.
pub fn split_windows(
    question_ids:    &[u32],
    context_ids:     &[u32],
    context_offsets: &[(usize, usize)],
    max_length:      usize,
    stride:          usize,
) -> QaResult<Vec<TokenWindow>> {
    debug_assert_eq!(context_ids.len(), context_offsets.len());

    // [CLS] + question + [SEP] + at least one context token + [SEP]
    let reserved = question_ids.len() + 3;
    if reserved >= max_length {
        return Err(QaError::WindowConfig {
            reason: format!(
                "question occupies {} of {} tokens, leaving no room for context",
                reserved, max_length
            ),
        });
    }
    let capacity = max_length - reserved;

    // The next window starts capacity - stride tokens further on;
    // stride >= capacity would never advance.
    if stride >= capacity {
        return Err(QaError::WindowConfig {
            reason: format!(
                "stride {} must be smaller than the per-window context capacity {}",
                stride, capacity
            ),
        });
    }

    let mut windows = Vec::new();
    let mut start = 0usize;
    loop {
        let end = (start + capacity).min(context_ids.len());
        windows.push(build_window(
            question_ids,
            &context_ids[start..end],
            &context_offsets[start..end],
            max_length,
        ));
        if end == context_ids.len() {
            break;
        }
        start = end - stride;
    }

    Ok(windows)
}

/// Assemble one [CLS] q [SEP] ctx [SEP] [PAD]... window.
fn build_window(
    question_ids:  &[u32],
    slice_ids:     &[u32],
    slice_offsets: &[(usize, usize)],
    max_length:    usize,
) -> TokenWindow {
    let mut input_ids = Vec::with_capacity(max_length);
    let mut offsets   = Vec::with_capacity(max_length);
    let mut roles     = Vec::with_capacity(max_length);

    input_ids.push(CLS_ID);
    offsets.push((0, 0));
    roles.push(TokenRole::Question);

    for &id in question_ids {
        input_ids.push(id);
        offsets.push((0, 0));
        roles.push(TokenRole::Question);
    }

    input_ids.push(SEP_ID);
    offsets.push((0, 0));
    roles.push(TokenRole::Question);

    for (&id, &off) in slice_ids.iter().zip(slice_offsets.iter()) {
        input_ids.push(id);
        offsets.push(off);
        roles.push(TokenRole::Passage);
    }

    input_ids.push(SEP_ID);
    offsets.push((0, 0));
    roles.push(TokenRole::Question);

    // Attention mask: 1 for real tokens, 0 for padding
    let real_len = input_ids.len();
    let mut attention_mask = vec![1u32; real_len];

    while input_ids.len() < max_length {
        input_ids.push(PAD_ID);
        offsets.push((0, 0));
        roles.push(TokenRole::Padding);
        attention_mask.push(0);
    }

    TokenWindow {
        input_ids,
        attention_mask,
        offsets,
        roles,
        source_passage_index: 0,
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// Synthetic context of `n` five-char words separated by one
    /// space: token i covers chars [6*i, 6*i + 5).
    fn synthetic_context(n: usize) -> (Vec<u32>, Vec<(usize, usize)>) {
        let ids: Vec<u32> = (0..n as u32).map(|i| 1000 + i).collect();
        let offsets: Vec<(usize, usize)> = (0..n).map(|i| (6 * i, 6 * i + 5)).collect();
        (ids, offsets)
    }

    #[test]
    fn test_short_context_yields_single_window() {
        let (ctx, offs) = synthetic_context(5);
        let windows = split_windows(&[7, 8], &ctx, &offs, 16, 2).unwrap();
        assert_eq!(windows.len(), 1);

        let w = &windows[0];
        assert_eq!(w.input_ids.len(), 16);
        assert_eq!(w.attention_mask.len(), 16);
        // [CLS] 7 8 [SEP] ctx0..ctx4 [SEP] = 10 real tokens
        assert_eq!(w.attention_mask.iter().sum::<u32>(), 10);
        assert_eq!(w.context_span(), Some((4, 8)));
    }

    #[test]
    fn test_long_context_overlaps_by_stride() {
        // capacity = 16 - (2 + 3) = 11, stride 4 → step of 7
        let (ctx, offs) = synthetic_context(25);
        let windows = split_windows(&[7, 8], &ctx, &offs, 16, 4).unwrap();
        assert_eq!(windows.len(), 3);

        let first_ctx: Vec<u32> = windows[0].input_ids[4..15].to_vec();
        let second_ctx: Vec<u32> = windows[1].input_ids[4..15].to_vec();
        // Last `stride` context tokens of window 0 reappear at the
        // start of window 1
        assert_eq!(&first_ctx[7..], &second_ctx[..4]);
    }

    #[test]
    fn test_every_context_token_appears_in_some_window() {
        let (ctx, offs) = synthetic_context(40);
        let windows = split_windows(&[7], &ctx, &offs, 16, 3).unwrap();
        let mut seen = vec![false; 40];
        for w in &windows {
            for (role, &id) in w.roles.iter().zip(w.input_ids.iter()) {
                if *role == TokenRole::Passage {
                    seen[(id - 1000) as usize] = true;
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_empty_context_yields_window_without_passage_tokens() {
        let windows = split_windows(&[7, 8], &[], &[], 16, 2).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].context_span(), None);
    }

    #[test]
    fn test_question_too_long_is_rejected() {
        let q: Vec<u32> = (0..14).collect();
        let (ctx, offs) = synthetic_context(5);
        let err = split_windows(&q, &ctx, &offs, 16, 2).unwrap_err();
        assert!(matches!(err, crate::error::QaError::WindowConfig { .. }));
    }

    #[test]
    fn test_stride_must_be_smaller_than_capacity() {
        let (ctx, offs) = synthetic_context(30);
        // capacity = 16 - 4 = 12
        let err = split_windows(&[7], &ctx, &offs, 16, 12).unwrap_err();
        assert!(matches!(err, crate::error::QaError::WindowConfig { .. }));
    }

    #[test]
    fn test_masked_offsets_hide_non_passage_tokens() {
        let (ctx, offs) = synthetic_context(3);
        let windows = split_windows(&[7], &ctx, &offs, 12, 1).unwrap();
        let masked = windows[0].masked_offsets();

        // [CLS] q [SEP] → None, passage tokens → Some, rest → None
        assert_eq!(masked[0], None);
        assert_eq!(masked[1], None);
        assert_eq!(masked[2], None);
        assert_eq!(masked[3], Some((0, 5)));
        assert_eq!(masked[4], Some((6, 11)));
        assert_eq!(masked[5], Some((12, 17)));
        assert!(masked[6..].iter().all(|o| o.is_none()));
    }

    #[test]
    fn test_window_count_is_deterministic() {
        let (ctx, offs) = synthetic_context(100);
        let a = split_windows(&[7, 8, 9], &ctx, &offs, 32, 8).unwrap();
        let b = split_windows(&[7, 8, 9], &ctx, &offs, 32, 8).unwrap();
        assert_eq!(a.len(), b.len());
        for (wa, wb) in a.iter().zip(b.iter()) {
            assert_eq!(wa.input_ids, wb.input_ids);
            assert_eq!(wa.offsets, wb.offsets);
        }
    }
}
