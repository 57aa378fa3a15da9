//! Helper functions for gracefully handling panics.
//!
//! A panic raised after a prompt was written but before its line was
//! read would print the panic message on the prompt line. Call the hook
//! for the stream your prompts go to before showing any prompts; when a
//! prompt is pending it moves the cursor to a fresh line first.
use backtrace::Backtrace;
use crossterm::{cursor, execute};
use std::{ffi::OsStr, fmt::Display};

use crate::console::prompt_pending;

/// `RUST_BACKTRACE` is set to anything but `0`.
fn backtrace_enabled(value: Option<&OsStr>) -> bool {
    value.map_or(false, |value| value != "0")
}

fn report(info: &dyn Display) {
    let thread = std::thread::current();
    let thread_name = thread.name().unwrap_or("<unnamed>");
    eprintln!("thread '{}' {}", thread_name, info);
    if backtrace_enabled(std::env::var_os("RUST_BACKTRACE").as_deref()) {
        let backtrace = Backtrace::new();
        eprintln!("{:?}", backtrace);
    } else {
        eprintln!("note: run with `RUST_BACKTRACE=1` environment variable to display a backtrace")
    }
}

/// Set a panic hook writing terminal commands to stdout.
pub fn stdout_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        if prompt_pending() {
            let _ = execute!(std::io::stdout(), cursor::MoveToNextLine(1));
        }
        report(info);
    }));
}

/// Set a panic hook writing terminal commands to stderr.
pub fn stderr_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        if prompt_pending() {
            let _ = execute!(std::io::stderr(), cursor::MoveToNextLine(1));
        }
        report(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backtrace_setting() {
        assert!(!backtrace_enabled(None));
        assert!(!backtrace_enabled(Some(OsStr::new("0"))));
        assert!(backtrace_enabled(Some(OsStr::new("1"))));
        assert!(backtrace_enabled(Some(OsStr::new("full"))));
    }
}
