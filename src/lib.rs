#![deny(missing_docs)]

//! Typed input helpers for console programs.
//!
//! Each reader prints a prompt, reads one value from standard input and
//! then discards the rest of the line, so the next read always starts on
//! a fresh line. A read never fails: malformed input, end of input and
//! read errors all produce a default (`0`, `0.0`, `'\0'` or the empty
//! string).
//!
//! The free functions here use the process standard streams and lock
//! standard input for the duration of each call. Use [Console] to read
//! from any [BufRead](std::io::BufRead) and prompt to any
//! [Write](std::io::Write).
//!
//! ```no_run
//! let mut name = [0u8; 50];
//! let name = console_input::read_line("Enter your name: ", &mut name);
//! let age = console_input::read_int("Enter your age: ");
//! let grade = console_input::read_char("Enter your grade (A-F): ");
//! println!("{} is {} with grade {}", name, age, grade);
//! ```
use std::ffi::{c_double, c_float, c_int, c_long, c_longlong, c_short};

mod console;
mod error;
pub mod line_buffer;
mod options;
mod scan;

#[cfg(feature = "panic")]
mod panic;

pub use console::{Console, Extended};
pub use error::ScanError;
pub use line_buffer::{
    DefaultLineBuffer, LineBuffer, DEFAULT_LINE_CAPACITY, MAX_LINE_CAPACITY,
};
pub use options::{InputOptions, DEFAULT_MAX_TOKEN_LEN};
pub use scan::Scan;

#[cfg(feature = "panic")]
pub use panic::{stderr_panic_hook, stdout_panic_hook};

/// Version of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read a line of text into `buf`, see [Console::read_line].
pub fn read_line<'b>(prompt: &str, buf: &'b mut [u8]) -> &'b str {
    Console::stdio().read_line(prompt, buf)
}

/// Read a line of text into a [LineBuffer].
pub fn read_into<'b, const N: usize>(
    prompt: &str,
    buffer: &'b mut LineBuffer<N>,
) -> &'b str {
    Console::stdio().read_into(prompt, buffer)
}

/// Read a line of at most `max_len` bytes as an owned string.
pub fn read_string(prompt: &str, max_len: usize) -> String {
    Console::stdio().read_string(prompt, max_len)
}

/// Read one value of any [Scan] type.
pub fn read_value<T: Scan>(prompt: &str) -> T {
    Console::stdio().read_value(prompt)
}

/// Read a `short`; zero on failure.
pub fn read_short(prompt: &str) -> c_short {
    Console::stdio().read_short(prompt)
}

/// Read an `int`; zero on failure.
pub fn read_int(prompt: &str) -> c_int {
    Console::stdio().read_int(prompt)
}

/// Read a `long`; zero on failure.
pub fn read_long(prompt: &str) -> c_long {
    Console::stdio().read_long(prompt)
}

/// Read a `long long`; zero on failure.
pub fn read_long_long(prompt: &str) -> c_longlong {
    Console::stdio().read_long_long(prompt)
}

/// Read a `float`; zero on failure.
pub fn read_float(prompt: &str) -> c_float {
    Console::stdio().read_float(prompt)
}

/// Read a `double`; zero on failure.
pub fn read_double(prompt: &str) -> c_double {
    Console::stdio().read_double(prompt)
}

/// Read an extended precision float; zero on failure.
pub fn read_extended(prompt: &str) -> Extended {
    Console::stdio().read_extended(prompt)
}

/// Read the first non-whitespace character; `'\0'` at end of input.
pub fn read_char(prompt: &str) -> char {
    Console::stdio().read_char(prompt)
}
