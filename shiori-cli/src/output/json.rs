//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use shiori_core::AnnotatedText;
use std::io::Write;

/// JSON formatter - outputs all texts as one JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    texts: Vec<serde_json::Value>,
}

/// One entry of the JSON output
#[derive(Debug, Serialize)]
pub struct TextData<'a> {
    /// Input the text was read from
    pub source: &'a str,
    /// Tokenization result
    #[serde(flatten)]
    pub text: &'a AnnotatedText,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            texts: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_text(&mut self, source: &str, text: &AnnotatedText) -> Result<()> {
        self.texts
            .push(serde_json::to_value(TextData { source, text })?);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.texts)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.texts)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
