//! Parser output decoding
//!
//! `line` output carries one token per line, optionally followed by a tab and a
//! word flag (`1` word, `0` non-word). `wakati` output is whitespace separated
//! tokens. Without a flag a token is a word when it contains a word character.

use shiori_core::{CharClass, OutputFormat, RawToken};

/// Decode raw parser output into tokens
///
/// Returns the reason on malformed output.
pub fn decode(
    output: &[u8],
    format: OutputFormat,
    word_chars: &CharClass,
) -> Result<Vec<RawToken>, String> {
    let text = std::str::from_utf8(output)
        .map_err(|e| format!("output is not valid UTF-8: {e}"))?;

    match format {
        OutputFormat::Line => decode_lines(text, word_chars),
        OutputFormat::Wakati => Ok(text
            .split_whitespace()
            .map(|surface| classify(surface, word_chars))
            .collect()),
    }
}

fn decode_lines(text: &str, word_chars: &CharClass) -> Result<Vec<RawToken>, String> {
    let mut tokens = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let token = match line.split_once('\t') {
            None => classify(line.trim(), word_chars),
            Some((surface, flag)) => {
                let surface = surface.trim();
                if surface.is_empty() {
                    return Err(format!("line {}: empty token before word flag", idx + 1));
                }
                match flag.trim() {
                    "1" => RawToken::word(surface),
                    "0" => RawToken::non_word(surface),
                    other => {
                        return Err(format!(
                            "line {}: word flag must be 0 or 1, got '{other}'",
                            idx + 1
                        ))
                    }
                }
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn classify(surface: &str, word_chars: &CharClass) -> RawToken {
    if word_chars.contains_any(surface) {
        RawToken::word(surface)
    } else {
        RawToken::non_word(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cjk() -> CharClass {
        CharClass::new(r"\p{Han}\p{Hiragana}\p{Katakana}").unwrap()
    }

    fn surfaces(tokens: &[RawToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.surface.as_str()).collect()
    }

    #[test]
    fn test_wakati() {
        let tokens = decode("私 は 学生 です 。\n".as_bytes(), OutputFormat::Wakati, &cjk()).unwrap();
        assert_eq!(surfaces(&tokens), vec!["私", "は", "学生", "です", "。"]);
        assert!(tokens[..4].iter().all(|t| t.is_word));
        assert!(!tokens[4].is_word);
    }

    #[test]
    fn test_lines_skip_blanks() {
        let tokens = decode("我\n\n喜欢\r\n  \n。\n".as_bytes(), OutputFormat::Line, &cjk()).unwrap();
        assert_eq!(surfaces(&tokens), vec!["我", "喜欢", "。"]);
        assert!(!tokens[2].is_word);
    }

    #[test]
    fn test_lines_with_word_flags() {
        let tokens = decode("東京\t1\n「\t0\nABC\t1\n".as_bytes(), OutputFormat::Line, &cjk()).unwrap();
        let flags: Vec<bool> = tokens.iter().map(|t| t.is_word).collect();
        assert_eq!(flags, vec![true, false, true]);
        assert_eq!(tokens[2].lowercase, "abc");
    }

    #[test]
    fn test_bad_flag_is_malformed() {
        let err = decode("東京\tyes\n".as_bytes(), OutputFormat::Line, &cjk()).unwrap_err();
        assert!(err.contains("line 1"));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = decode(&[0xff, 0xfe, b'\n'], OutputFormat::Wakati, &cjk()).unwrap_err();
        assert!(err.contains("UTF-8"));
    }
}
