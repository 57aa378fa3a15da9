//! Console bound to an input stream and a prompt sink.
//!
//! Every read is one transaction: show the prompt, scan a value, then
//! discard whatever is left of the line so the next read starts on a
//! fresh line. Failures never escape; each read substitutes a default.
use crate::{
    error::ScanError,
    line_buffer::{self, LineBuffer, MAX_LINE_CAPACITY},
    options::InputOptions,
    scan::{self, Line, LineEnd, Scan},
};
use anyhow::Result;
use crossterm::{style::Print, QueueableCommand};
use std::{
    ffi::{c_double, c_float, c_int, c_long, c_longlong, c_short},
    io::{self, BufRead, StdinLock, Stdout, Write},
    sync::atomic::{AtomicBool, Ordering},
};

/// Widest floating point type available to [Console::read_extended].
pub type Extended = f64;

/// Bytes read past the line capacity so truncation can find a grapheme
/// boundary.
const GRAPHEME_LOOKAHEAD: usize = 32;

/// Set while a prompt is on screen and its line has not been read.
static PROMPT_PENDING: AtomicBool = AtomicBool::new(false);

#[cfg_attr(not(feature = "panic"), allow(dead_code))]
pub(crate) fn prompt_pending() -> bool {
    PROMPT_PENDING.load(Ordering::Relaxed)
}

/// Reads typed values from `R`, writing prompts to `W`.
#[derive(Debug)]
pub struct Console<R, W> {
    reader: R,
    writer: W,
    options: InputOptions,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console for the process standard input and output.
    ///
    /// Standard input stays locked until the console is dropped.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console with default options.
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_options(reader, writer, Default::default())
    }

    /// Create a console with the given options.
    pub fn with_options(reader: R, writer: W, options: InputOptions) -> Self {
        Self {
            reader,
            writer,
            options,
        }
    }

    /// Get the options.
    pub fn options(&self) -> &InputOptions {
        &self.options
    }

    /// Get the prompt sink.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Split the console into its reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn show_prompt(&mut self, prompt: &str) -> Result<()> {
        if prompt.is_empty() {
            return Ok(());
        }
        self.writer.queue(Print(prompt))?;
        self.writer.flush()?;
        PROMPT_PENDING.store(true, Ordering::Relaxed);
        Ok(())
    }

    /// Show the prompt, run `read` and finish the current line.
    ///
    /// The line is finished even when `read` returns early.
    fn transact<T>(
        &mut self,
        prompt: &str,
        read: impl FnOnce(&mut R, &InputOptions) -> T,
    ) -> T {
        if let Err(error) = self.show_prompt(prompt) {
            tracing::trace!(%error, "failed to write prompt");
        }

        let options = &self.options;
        let mut reader = scopeguard::guard(&mut self.reader, |reader| {
            match scan::discard_line(reader) {
                Ok(count) => tracing::trace!(count, "discarded rest of line"),
                Err(error) => {
                    tracing::trace!(%error, "failed to discard rest of line")
                }
            }
            PROMPT_PENDING.store(false, Ordering::Relaxed);
        });
        read(&mut **reader, options)
    }

    /// Read one value of any [Scan] type.
    ///
    /// Malformed input, an empty line, end of input and read errors all
    /// produce [Scan::DEFAULT].
    pub fn read_value<T: Scan>(&mut self, prompt: &str) -> T {
        self.transact(prompt, |reader, options| {
            T::scan(reader, options).unwrap_or_else(|error| {
                tracing::debug!(%error, "substituting default value");
                T::DEFAULT
            })
        })
    }

    /// Read at most `limit` bytes of the next line.
    fn read_text(&mut self, prompt: &str, limit: usize) -> String {
        let text = self.transact(prompt, |reader, options| {
            match scan::take_line(reader, limit.saturating_add(GRAPHEME_LOOKAHEAD)) {
                Ok(Some(line)) => decode(line, options),
                Ok(None) => {
                    let error = ScanError::EndOfInput;
                    tracing::debug!(%error, "substituting empty line");
                    String::new()
                }
                Err(error) => {
                    tracing::debug!(%error, "substituting empty line");
                    String::new()
                }
            }
        });
        let fitted = line_buffer::fit(&text, limit);
        if fitted.len() < text.len() {
            tracing::trace!(
                kept = fitted.len(),
                dropped = text.len() - fitted.len(),
                "truncated line"
            );
        }
        fitted.to_string()
    }

    /// Read a line of text into `buf`.
    ///
    /// Stores at most `buf.len() - 1` bytes followed by a NUL and returns
    /// the stored text. The line terminator is removed; the rest of an
    /// overlong line is discarded. End of input or a read error stores the
    /// empty string.
    pub fn read_line<'b>(&mut self, prompt: &str, buf: &'b mut [u8]) -> &'b str {
        let text = self.read_text(prompt, buf.len().saturating_sub(1));
        line_buffer::write_terminated(buf, &text);
        let buf: &'b [u8] = buf;
        line_buffer::terminated_str(buf)
    }

    /// Read a line of text into a [LineBuffer].
    pub fn read_into<'b, const N: usize>(
        &mut self,
        prompt: &str,
        buffer: &'b mut LineBuffer<N>,
    ) -> &'b str {
        self.read_line(prompt, buffer.as_mut())
    }

    /// Read a line of at most `max_len` bytes as an owned string.
    ///
    /// `max_len` is capped at [MAX_LINE_CAPACITY] less the terminator.
    pub fn read_string(&mut self, prompt: &str, max_len: usize) -> String {
        self.read_text(prompt, max_len.min(MAX_LINE_CAPACITY - 1))
    }

    /// Read a `short`; zero on failure.
    pub fn read_short(&mut self, prompt: &str) -> c_short {
        self.read_value(prompt)
    }

    /// Read an `int`; zero on failure.
    pub fn read_int(&mut self, prompt: &str) -> c_int {
        self.read_value(prompt)
    }

    /// Read a `long`; zero on failure.
    pub fn read_long(&mut self, prompt: &str) -> c_long {
        self.read_value(prompt)
    }

    /// Read a `long long`; zero on failure.
    pub fn read_long_long(&mut self, prompt: &str) -> c_longlong {
        self.read_value(prompt)
    }

    /// Read a `float`; zero on failure.
    pub fn read_float(&mut self, prompt: &str) -> c_float {
        self.read_value(prompt)
    }

    /// Read a `double`; zero on failure.
    pub fn read_double(&mut self, prompt: &str) -> c_double {
        self.read_value(prompt)
    }

    /// Read an extended precision float; zero on failure.
    pub fn read_extended(&mut self, prompt: &str) -> Extended {
        self.read_value(prompt)
    }

    /// Read the first non-whitespace character.
    ///
    /// Blank lines are skipped. Returns `'\0'` at end of input.
    pub fn read_char(&mut self, prompt: &str) -> char {
        self.read_value(prompt)
    }
}

/// Convert raw line bytes to text.
///
/// Invalid UTF-8 is replaced, except for a character cut off by the read
/// limit, which is dropped.
fn decode(line: Line, options: &InputOptions) -> String {
    let Line { mut bytes, end } = line;
    if end == LineEnd::Terminator
        && options.strip_carriage_return
        && bytes.last() == Some(&b'\r')
    {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let error = e.utf8_error();
            let mut bytes = e.into_bytes();
            if end == LineEnd::Limit && error.error_len().is_none() {
                bytes.truncate(error.valid_up_to());
            }
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}
