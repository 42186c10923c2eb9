//! Subprocess invocation
//!
//! One call spawns the configured binary, feeds it the sentence (on stdin or
//! through a temp file), and collects its stdout and exit status under a single
//! deadline. Any failure is returned as an [`ExternalProcessError`]; there is
//! no fallback to the internal tokenizer.

use crate::error::ExternalProcessError;
use crate::external::limiter::SpawnLimiter;
use crate::external::output;
use shiori_core::{
    assign_separators, join_with_zws, CharClass, ExternalParserConfig, InputMode, RawToken,
};
use std::io::{self, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Longest stderr excerpt kept in an error
const STDERR_LIMIT: usize = 1024;

const POLL_START: Duration = Duration::from_millis(1);
const POLL_MAX: Duration = Duration::from_millis(25);

type Result<T> = std::result::Result<T, ExternalProcessError>;

/// One sentence as segmented by an external parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSentence {
    /// Tokens with separators recovered
    pub tokens: Vec<RawToken>,
    /// Token surfaces joined with the zero-width space marker
    pub marked: String,
}

/// Runs one configured external parser
#[derive(Debug, Clone)]
pub struct ExternalParserAdapter {
    config: ExternalParserConfig,
    timeout: Duration,
    limiter: Option<Arc<SpawnLimiter>>,
}

impl ExternalParserAdapter {
    /// Adapter with its own timeout and no spawn limit
    pub fn new(config: ExternalParserConfig, timeout: Duration) -> Self {
        Self {
            config,
            timeout,
            limiter: None,
        }
    }

    /// Share a spawn limiter with other adapters
    pub fn with_limiter(mut self, limiter: Arc<SpawnLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Parser configuration
    pub fn config(&self) -> &ExternalParserConfig {
        &self.config
    }

    /// Per-invocation timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Tokenize one sentence
    pub fn tokenize(&self, sentence: &str, word_chars: &CharClass) -> Result<Vec<RawToken>> {
        Ok(self.parse(sentence, word_chars)?.tokens)
    }

    /// Segment one sentence and build its ZWS-marked form
    ///
    /// Separators are recovered by aligning the tokens with `sentence`, or from
    /// the marked string when the parser altered the text. A non-blank
    /// sentence that yields no tokens is malformed output.
    pub fn parse(&self, sentence: &str, word_chars: &CharClass) -> Result<ParsedSentence> {
        let stdout = self.run(sentence)?;
        let mut tokens = output::decode(&stdout, self.config.output_format(), word_chars)
            .map_err(|reason| self.malformed(reason))?;

        if tokens.is_empty() && !sentence.trim().is_empty() {
            return Err(self.malformed("no tokens for non-empty input".to_string()));
        }

        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
        let marked = join_with_zws(&surfaces);
        if !assign_separators(sentence, &marked, &mut tokens, word_chars) {
            log::debug!(
                "parser '{}' output does not align with its input, spacing reconstructed",
                self.config.parser_type()
            );
        }
        Ok(ParsedSentence { tokens, marked })
    }

    /// Run the parser on `text` and return its raw stdout
    ///
    /// The timeout covers the whole call: process exit, writing stdin and
    /// reading both output pipes to the end. Helpers the parser leaves behind
    /// holding a pipe are killed with it.
    pub fn run(&self, text: &str) -> Result<Vec<u8>> {
        let _permit = self.limiter.as_ref().map(|limiter| limiter.acquire());

        // Must outlive the child: the file is deleted on drop
        let (args, _input_file) = match self.config.input_mode() {
            InputMode::Stdin => (self.config.args().to_vec(), None),
            InputMode::File => {
                let file = self.write_input_file(text)?;
                (self.config.args_for_file(file.path()), Some(file))
            }
        };

        log::trace!("spawning {} {:?}", self.config.binary(), args);
        let mut command = Command::new(self.config.binary());
        command
            .args(&args)
            .stdin(match self.config.input_mode() {
                InputMode::Stdin => Stdio::piped(),
                InputMode::File => Stdio::null(),
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        let mut child = command.spawn().map_err(|source| ExternalProcessError::Spawn {
            binary: self.binary(),
            source,
        })?;
        let deadline = Instant::now() + self.timeout;

        let writer = child.stdin.take().map(|mut stdin| {
            let input = text.as_bytes().to_vec();
            background(move || match stdin.write_all(&input) {
                // The parser may legitimately exit without reading everything
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            })
        });
        let stdout = child.stdout.take().map(|pipe| background(move || read_all(pipe)));
        let stderr = child.stderr.take().map(|pipe| background(move || read_all(pipe)));

        let status = self.wait_with_deadline(&mut child, deadline)?;

        let written = match writer {
            Some(rx) => self.recv_before(rx, deadline, &mut child)?,
            None => Ok(()),
        };
        let stdout = match stdout {
            Some(rx) => self.recv_before(rx, deadline, &mut child)?,
            None => Ok(Vec::new()),
        };
        let stderr = match stderr {
            Some(rx) => self.recv_before(rx, deadline, &mut child)?.unwrap_or_default(),
            None => Vec::new(),
        };

        if !status.success() {
            return Err(ExternalProcessError::Exit {
                binary: self.binary(),
                code: status.code(),
                stderr: excerpt(&stderr),
            });
        }
        written.map_err(|source| self.io(source))?;
        let stdout = stdout.map_err(|source| self.io(source))?;

        log::trace!(
            "parser '{}' produced {} bytes",
            self.config.parser_type(),
            stdout.len()
        );
        Ok(stdout)
    }

    fn write_input_file(&self, text: &str) -> Result<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("shiori-")
            .suffix(".txt")
            .tempfile()
            .map_err(|source| self.io(source))?;
        file.write_all(text.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| self.io(source))?;
        Ok(file)
    }

    /// Poll the child until it exits or the deadline passes
    fn wait_with_deadline(&self, child: &mut Child, deadline: Instant) -> Result<ExitStatus> {
        let mut poll = POLL_START;

        loop {
            if let Some(status) = child.try_wait().map_err(|source| self.io(source))? {
                return Ok(status);
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(self.kill(child));
            }

            thread::sleep(poll.min(deadline - now));
            poll = (poll * 2).min(POLL_MAX);
        }
    }

    /// Wait for a pipe thread until the deadline; a late pipe kills the group
    fn recv_before<T>(
        &self,
        rx: Receiver<io::Result<T>>,
        deadline: Instant,
        child: &mut Child,
    ) -> Result<io::Result<T>> {
        match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(result) => Ok(result),
            Err(RecvTimeoutError::Timeout) => Err(self.kill(child)),
            Err(RecvTimeoutError::Disconnected) => {
                Ok(Err(io::Error::other("parser I/O thread panicked")))
            }
        }
    }

    /// Kill the parser and its process group, then reap it
    fn kill(&self, child: &mut Child) -> ExternalProcessError {
        kill_process_group(child);
        let _ = child.kill();
        let _ = child.wait();
        log::warn!(
            "parser '{}' killed after {:?}",
            self.config.parser_type(),
            self.timeout
        );
        ExternalProcessError::Timeout {
            binary: self.binary(),
            timeout: self.timeout,
        }
    }

    fn binary(&self) -> String {
        self.config.binary().to_string()
    }

    fn io(&self, source: io::Error) -> ExternalProcessError {
        ExternalProcessError::Io {
            binary: self.binary(),
            source,
        }
    }

    fn malformed(&self, reason: String) -> ExternalProcessError {
        ExternalProcessError::MalformedOutput {
            binary: self.binary(),
            reason,
        }
    }
}

/// Run `work` on its own thread and hand its result over a channel
fn background<T, F>(work: F) -> Receiver<io::Result<T>>
where
    T: Send + 'static,
    F: FnOnce() -> io::Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(work());
    });
    rx
}

fn read_all<R: Read>(mut pipe: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(buf)
}

/// The child leads its own group, so the group id is its pid
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    let group = format!("-{}", child.id());
    let _ = Command::new("kill")
        .args(["-KILL", "--", group.as_str()])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

fn excerpt(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    match text.char_indices().nth(STDERR_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
