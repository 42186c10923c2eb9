//! Plain text output formatter

use super::{render_sentence, OutputFormatter};
use anyhow::Result;
use shiori_core::AnnotatedText;
use std::io::Write;

/// Plain text formatter - one tokenized sentence per line
pub struct TextFormatter<W: Write> {
    writer: W,
    show_lemmas: bool,
    texts: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, show_lemmas: bool) -> Self {
        Self {
            writer,
            show_lemmas,
            texts: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_text(&mut self, source: &str, text: &AnnotatedText) -> Result<()> {
        if self.texts > 0 {
            writeln!(self.writer)?;
        }
        self.texts += 1;

        writeln!(self.writer, "==> {source} <==")?;
        for sentence in text.sentences() {
            writeln!(
                self.writer,
                "{}",
                render_sentence(text, sentence, self.show_lemmas)
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
