//! Sentence segmentation
//!
//! Splits raw text into sentence spans on runs of terminator characters.
//! Line breaks are hard paragraph boundaries; a configured exception such as
//! `Mr.` suppresses the boundary its run would otherwise produce.

use crate::language::{CharClass, LanguageProfile};
use std::ops::Range;

/// Characters that stay attached to the sentence they close
const CLOSING: &[char] = &[
    '"', '\'', '”', '’', '»', '›', ')', ']', '}', '）', '】', '」', '』', '〕', '〉', '》', '〗',
];

/// One sentence of the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSpan<'t> {
    /// 0-based position among the text's sentences
    pub ordinal: usize,
    /// Byte offsets of `text` in the source
    pub start: usize,
    pub end: usize,
    /// Trimmed sentence text
    pub text: &'t str,
}

impl SentenceSpan<'_> {
    /// Byte range in the source text
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Sentence splitter configured from a language profile
#[derive(Debug, Clone)]
pub struct SentenceSegmenter<'p> {
    terminators: &'p CharClass,
    exceptions: &'p [String],
}

impl<'p> SentenceSegmenter<'p> {
    /// Segmenter using the profile's split characters and exceptions
    pub fn new(profile: &'p LanguageProfile) -> Self {
        Self::with_rules(profile.sentence_split(), profile.exceptions())
    }

    /// Segmenter from explicit rules
    pub fn with_rules(terminators: &'p CharClass, exceptions: &'p [String]) -> Self {
        Self {
            terminators,
            exceptions,
        }
    }

    /// Split `text` into ordered sentence spans
    ///
    /// Empty or whitespace-only input yields no spans.
    pub fn segment<'t>(&self, text: &'t str) -> Vec<SentenceSpan<'t>> {
        let mut spans = Vec::new();
        let mut line_start = 0;

        for line in text.split('\n') {
            self.segment_line(text, line_start, line_start + line.len(), &mut spans);
            line_start += line.len() + 1;
        }

        log::trace!("segmented {} bytes into {} sentences", text.len(), spans.len());
        spans
    }

    fn segment_line<'t>(
        &self,
        text: &'t str,
        line_start: usize,
        line_end: usize,
        spans: &mut Vec<SentenceSpan<'t>>,
    ) {
        let line = &text[line_start..line_end];
        let mut sentence_start = 0;
        let mut chars = line.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            if !self.terminators.contains(ch) {
                continue;
            }

            let run_start = idx;
            let mut run_end = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !self.terminators.contains(next) {
                    break;
                }
                run_end = next_idx + next.len_utf8();
                chars.next();
            }

            let terminators_end = run_end;
            while let Some(&(next_idx, next)) = chars.peek() {
                if !CLOSING.contains(&next) {
                    break;
                }
                run_end = next_idx + next.len_utf8();
                chars.next();
            }

            if is_inner_dot_run(line, run_start, terminators_end) {
                continue;
            }
            if self.is_exception(&line[sentence_start..terminators_end]) {
                continue;
            }

            push_trimmed(text, line_start + sentence_start, line_start + run_end, spans);
            sentence_start = run_end;
        }

        push_trimmed(text, line_start + sentence_start, line_end, spans);
    }

    /// Whether the whitespace-delimited token ending the candidate is an exception
    fn is_exception(&self, sentence_so_far: &str) -> bool {
        if self.exceptions.is_empty() {
            return false;
        }
        let token = sentence_so_far
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or(sentence_so_far);
        self.exceptions.iter().any(|e| e == token)
    }
}

/// A run of only `.` with alphanumerics on both sides (`3.14`, `e.g`)
fn is_inner_dot_run(line: &str, run_start: usize, run_end: usize) -> bool {
    if !line[run_start..run_end].chars().all(|c| c == '.') {
        return false;
    }
    let before = line[..run_start].chars().next_back();
    let after = line[run_end..].chars().next();
    matches!((before, after), (Some(b), Some(a)) if b.is_alphanumeric() && a.is_alphanumeric())
}

fn push_trimmed<'t>(text: &'t str, start: usize, end: usize, spans: &mut Vec<SentenceSpan<'t>>) {
    let raw = &text[start..end];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let leading = raw.len() - raw.trim_start().len();
    let start = start + leading;
    spans.push(SentenceSpan {
        ordinal: spans.len(),
        start,
        end: start + trimmed.len(),
        text: trimmed,
    });
}
