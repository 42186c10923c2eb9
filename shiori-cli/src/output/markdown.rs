//! Markdown output formatter

use super::{direction_label, render_sentence, OutputFormatter};
use anyhow::Result;
use shiori_core::AnnotatedText;
use std::io::Write;

/// Markdown formatter - a section per text with numbered sentences
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    show_lemmas: bool,
    text_count: usize,
    sentence_count: usize,
    word_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W, show_lemmas: bool) -> Self {
        Self {
            writer,
            show_lemmas,
            text_count: 0,
            sentence_count: 0,
            word_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_text(&mut self, source: &str, text: &AnnotatedText) -> Result<()> {
        self.text_count += 1;
        self.sentence_count += text.sentences().len();
        self.word_count += text.word_count();

        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "*Language: {} ({})*",
            text.language,
            direction_label(text.direction)
        )?;
        writeln!(self.writer)?;
        for (i, sentence) in text.sentences().iter().enumerate() {
            writeln!(
                self.writer,
                "{}. {}",
                i + 1,
                render_sentence(text, sentence, self.show_lemmas)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Total texts: {}, sentences: {}, words: {}*",
            self.text_count, self.sentence_count, self.word_count
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::sample;

    #[test]
    fn test_markdown_output() {
        let mut buf = Vec::new();
        {
            let mut formatter = MarkdownFormatter::new(&mut buf, false);
            formatter.format_text("story.txt", &sample()).unwrap();
            formatter.finish().unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("## story.txt\n\n*Language: en (ltr)*\n\n"));
        assert!(out.contains("1. I gave up [ice cream] .\n2. It was hard .\n"));
        assert!(out.ends_with("---\n*Total texts: 1, sentences: 2, words: 8*\n"));
    }
}
