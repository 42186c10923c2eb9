//! Spacing reconstruction for externally segmented text
//!
//! External segmenters return bare tokens. They are joined with a zero-width
//! space (ZWS) marker, and readable spacing is restored from the marked string
//! with a per-pair rule over the neighbouring characters.

use crate::language::CharClass;
use crate::tokenizer::RawToken;

/// Zero-width space, the token boundary marker
pub const ZWS: char = '\u{200B}';

/// Punctuation after which a following word gets a space, and before which no
/// space is ever inserted
const CLOSING_OR_TERMINAL: &[char] = &[
    '.', ',', '!', '?', ';', ':', ')', ']', '}', '"', '\'', '”', '’', '»', '…',
];

/// Join tokens into a ZWS-marked string
pub fn join_with_zws<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut joined = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            joined.push(ZWS);
        }
        joined.push_str(token.as_ref());
    }
    joined
}

/// Whether a space belongs between two adjacent segments
pub fn needs_space(prev: &str, next: &str, word_chars: &CharClass) -> bool {
    let (Some(last), Some(first)) = (prev.chars().next_back(), next.chars().next()) else {
        return false;
    };
    if CLOSING_OR_TERMINAL.contains(&first) {
        return false;
    }
    if !word_chars.contains(first) {
        return false;
    }
    word_chars.contains(last) || CLOSING_OR_TERMINAL.contains(&last)
}

/// Replace ZWS markers with spaces where the per-pair rule asks for one
///
/// Empty segments (leading, trailing or doubled markers) are dropped and the
/// result is trimmed, so an all-ZWS input becomes the empty string.
pub fn convert_zws_to_spacing(text: &str, word_chars: &CharClass) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<&str> = None;

    for segment in text.split(ZWS).filter(|s| !s.is_empty()) {
        if let Some(prev) = prev {
            if needs_space(prev, segment, word_chars) {
                out.push(' ');
            }
        }
        out.push_str(segment);
        prev = Some(segment);
    }

    out.trim().to_string()
}

/// Recover separators for externally produced tokens
///
/// Tokens are located in `sentence` in order and the whitespace between two
/// consecutive tokens becomes the separator of the first. If a token cannot be
/// found, or non-whitespace text lies between two tokens, the separators come
/// from [`separators_from_marked`] over `marked`, the ZWS-joined surfaces.
/// Returns whether alignment succeeded.
pub fn assign_separators(
    sentence: &str,
    marked: &str,
    tokens: &mut [RawToken],
    word_chars: &CharClass,
) -> bool {
    let mut gaps: Vec<&str> = Vec::with_capacity(tokens.len());
    let mut cursor = 0;
    let mut aligned = true;

    for (i, token) in tokens.iter().enumerate() {
        let Some(offset) = sentence[cursor..].find(token.surface.as_str()) else {
            aligned = false;
            break;
        };
        let skipped = &sentence[cursor..cursor + offset];
        if !skipped.chars().all(char::is_whitespace) {
            aligned = false;
            break;
        }
        if i > 0 {
            gaps.push(skipped);
        }
        cursor += offset + token.surface.len();
    }

    if aligned {
        gaps.push("");
        for (token, gap) in tokens.iter_mut().zip(gaps) {
            token.separator = gap.to_string();
        }
        return true;
    }

    separators_from_marked(marked, tokens, word_chars);
    false
}

/// Assign the spacing [`convert_zws_to_spacing`] restores for `marked`
///
/// Each token gets a single space as separator where the converted string has
/// one after its surface. Surfaces that do not line up with the converted
/// string (a surface holding a marker itself) fall back to [`needs_space`].
pub fn separators_from_marked(marked: &str, tokens: &mut [RawToken], word_chars: &CharClass) {
    let spaced = convert_zws_to_spacing(marked, word_chars);
    let mut rest = spaced.as_str();
    let mut spaces = Vec::with_capacity(tokens.len());

    for token in tokens.iter() {
        let Some(after) = rest.strip_prefix(token.surface.as_str()) else {
            break;
        };
        let after_space = after.strip_prefix(' ');
        spaces.push(after_space.is_some());
        rest = after_space.unwrap_or(after);
    }
    if spaces.len() < tokens.len() {
        pair_rule(tokens, word_chars);
        return;
    }

    for (token, spaced) in tokens.iter_mut().zip(spaces) {
        token.separator = if spaced { " ".to_string() } else { String::new() };
    }
}

fn pair_rule(tokens: &mut [RawToken], word_chars: &CharClass) {
    let spaced: Vec<bool> = tokens
        .windows(2)
        .map(|pair| needs_space(&pair[0].surface, &pair[1].surface, word_chars))
        .collect();
    for (i, token) in tokens.iter_mut().enumerate() {
        token.separator = match spaced.get(i) {
            Some(true) => " ".to_string(),
            _ => String::new(),
        };
    }
}
