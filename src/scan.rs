//! Scanning values from a buffered reader.
//!
//! Scanners stop in front of the line terminator that ends a value and
//! never consume it, so [discard_line] can always finish the current
//! line afterwards without swallowing the next one.
use crate::{error::ScanError, options::InputOptions};
use std::io::{self, BufRead};

/// Whitespace that does not end a line.
fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | 0x0b | 0x0c)
}

fn is_space(byte: u8) -> bool {
    byte == b'\n' || is_blank(byte)
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xc0 == 0x80
}

/// Number of bytes in the UTF-8 sequence introduced by `lead`.
fn utf8_width(lead: u8) -> usize {
    match lead {
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 1,
    }
}

/// Look at the next byte without consuming it.
fn peek<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    loop {
        match reader.fill_buf() {
            Ok(available) => return Ok(available.first().copied()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Consume whitespace and return the first byte after it, still unread.
///
/// Line terminators are only skipped when `across_lines` is set.
fn skip_whitespace<R: BufRead + ?Sized>(
    reader: &mut R,
    across_lines: bool,
) -> io::Result<Option<u8>> {
    while let Some(byte) = peek(reader)? {
        if is_blank(byte) || (across_lines && byte == b'\n') {
            reader.consume(1);
        } else {
            return Ok(Some(byte));
        }
    }
    Ok(None)
}

/// Consume everything up to and including the next line terminator.
///
/// Returns the number of bytes discarded. Does not allocate.
pub(crate) fn discard_line<R: BufRead + ?Sized>(
    reader: &mut R,
) -> io::Result<usize> {
    let mut discarded = 0;
    loop {
        let (used, done) = {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            match available.iter().position(|&b| b == b'\n') {
                Some(index) => (index + 1, true),
                None => (available.len(), available.is_empty()),
            }
        };
        reader.consume(used);
        discarded += used;
        if done {
            return Ok(discarded);
        }
    }
}

/// Read the next whitespace-delimited token on the current line.
pub(crate) fn next_token<R: BufRead + ?Sized>(
    reader: &mut R,
    limit: usize,
) -> Result<Vec<u8>, ScanError> {
    match skip_whitespace(reader, false)? {
        None => return Err(ScanError::EndOfInput),
        Some(b'\n') => return Err(ScanError::Empty),
        Some(_) => {}
    }

    let mut token = Vec::new();
    while let Some(byte) = peek(reader)? {
        if is_space(byte) {
            break;
        }
        if token.len() == limit {
            return Err(ScanError::TooLong { limit });
        }
        token.push(byte);
        reader.consume(1);
    }
    Ok(token)
}

/// Read the first non-whitespace character, looking past blank lines.
pub(crate) fn next_char<R: BufRead + ?Sized>(
    reader: &mut R,
) -> Result<char, ScanError> {
    let lead = skip_whitespace(reader, true)?.ok_or(ScanError::EndOfInput)?;
    let width = utf8_width(lead);

    let mut bytes = [0u8; 4];
    let mut len = 0;
    while len < width {
        match peek(reader)? {
            Some(byte) if len == 0 || is_continuation(byte) => {
                bytes[len] = byte;
                len += 1;
                reader.consume(1);
            }
            _ => break,
        }
    }

    std::str::from_utf8(&bytes[..len])
        .ok()
        .and_then(|s| s.chars().next())
        .ok_or_else(|| ScanError::malformed("char", &bytes[..len]))
}

/// Why [take_line] stopped reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineEnd {
    /// The line terminator is next in the reader.
    Terminator,
    /// The stream ended.
    EndOfInput,
    /// The byte limit was reached inside the line.
    Limit,
}

/// One physical line, read up to a byte limit.
#[derive(Debug)]
pub(crate) struct Line {
    /// Bytes of the line without its terminator.
    pub bytes: Vec<u8>,
    pub end: LineEnd,
}

/// Read at most `limit` bytes of the current line.
///
/// The terminator itself is left in the reader. Returns `None` when the
/// stream is already at its end.
pub(crate) fn take_line<R: BufRead + ?Sized>(
    reader: &mut R,
    limit: usize,
) -> io::Result<Option<Line>> {
    let mut bytes = Vec::new();
    loop {
        match peek(reader)? {
            None if bytes.is_empty() => return Ok(None),
            None => {
                return Ok(Some(Line {
                    bytes,
                    end: LineEnd::EndOfInput,
                }))
            }
            Some(b'\n') => {
                return Ok(Some(Line {
                    bytes,
                    end: LineEnd::Terminator,
                }))
            }
            Some(_) if bytes.len() == limit => {
                return Ok(Some(Line {
                    bytes,
                    end: LineEnd::Limit,
                }))
            }
            Some(byte) => {
                bytes.push(byte);
                reader.consume(1);
            }
        }
    }
}

/// Types that can be scanned from a line of console input.
pub trait Scan: Sized {
    /// Value substituted when scanning fails.
    const DEFAULT: Self;

    /// Scan one value, leaving the remainder of the line unread.
    fn scan<R: BufRead + ?Sized>(
        reader: &mut R,
        options: &InputOptions,
    ) -> Result<Self, ScanError>;
}

macro_rules! scan_number {
    ($($ty:ty => $zero:expr),* $(,)?) => {$(
        impl Scan for $ty {
            const DEFAULT: Self = $zero;

            fn scan<R: BufRead + ?Sized>(
                reader: &mut R,
                options: &InputOptions,
            ) -> Result<Self, ScanError> {
                let token = next_token(reader, options.max_token_len)?;
                std::str::from_utf8(&token)
                    .ok()
                    .and_then(|text| text.parse().ok())
                    .ok_or_else(|| ScanError::malformed(stringify!($ty), &token))
            }
        }
    )*};
}

scan_number!(
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0,
);

impl Scan for char {
    const DEFAULT: Self = '\0';

    fn scan<R: BufRead + ?Sized>(
        reader: &mut R,
        _options: &InputOptions,
    ) -> Result<Self, ScanError> {
        next_char(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan<T: Scan>(input: &[u8]) -> (Result<T, ScanError>, &[u8]) {
        let mut reader = input;
        let value = T::scan(&mut reader, &Default::default());
        (value, reader)
    }

    #[test]
    fn token_stops_before_terminator() {
        let mut reader = &b"  42\nnext"[..];
        assert_eq!(b"42".to_vec(), next_token(&mut reader, 16).unwrap());
        assert_eq!(b"\nnext", reader);
    }

    #[test]
    fn token_blank_line_is_empty() {
        let mut reader = &b" \t\r\n7\n"[..];
        assert!(matches!(next_token(&mut reader, 16), Err(ScanError::Empty)));
        assert_eq!(b"\n7\n", reader);
    }

    #[test]
    fn token_too_long() {
        let mut reader = &b"123456789\n"[..];
        assert!(matches!(
            next_token(&mut reader, 4),
            Err(ScanError::TooLong { limit: 4 })
        ));
    }

    #[test]
    fn discard_line_keeps_next_line() {
        let mut reader = &b" garbage here\nnext\n"[..];
        assert_eq!(14, discard_line(&mut reader).unwrap());
        assert_eq!(b"next\n", reader);

        let mut reader = &b"no terminator"[..];
        assert_eq!(13, discard_line(&mut reader).unwrap());
        assert!(reader.is_empty());
        assert_eq!(0, discard_line(&mut reader).unwrap());
    }

    #[test]
    fn integers() {
        assert_eq!(42, scan::<i32>(b"42\n").0.unwrap());
        assert_eq!(-7, scan::<i32>(b"  -7 trailing\n").0.unwrap());
        assert_eq!(5, scan::<i16>(b"+5\n").0.unwrap());
        assert!(scan::<i16>(b"40000\n").0.is_err());
        assert!(scan::<i32>(b"12.5.3\n").0.is_err());
        assert!(scan::<i32>(b"abc\n").0.is_err());
        assert!(scan::<u32>(b"-1\n").0.is_err());
        assert!(matches!(scan::<i64>(b"").0, Err(ScanError::EndOfInput)));
    }

    #[test]
    fn floats() {
        assert_eq!(2.75, scan::<f64>(b"2.75\n").0.unwrap());
        assert_eq!(-1.5e3, scan::<f64>(b"-1.5e3\n").0.unwrap());
        assert_eq!(0.5, scan::<f32>(b".5\n").0.unwrap());
        assert!(scan::<f64>(b"inf\n").0.unwrap().is_infinite());
        assert!(scan::<f64>(b"12.5.3\n").0.is_err());
        assert!(scan::<f32>(b"1,5\n").0.is_err());
    }

    #[test]
    fn chars() {
        let (value, rest) = scan::<char>(b"   x\n");
        assert_eq!('x', value.unwrap());
        assert_eq!(b"\n", rest);

        assert_eq!('y', scan::<char>(b"\n\n \ty\n").0.unwrap());
        assert_eq!('é', scan::<char>("é!\n".as_bytes()).0.unwrap());
        assert_eq!('🦀', scan::<char>("🦀\n".as_bytes()).0.unwrap());
        assert!(scan::<char>(b"\xff\n").0.is_err());
        assert!(scan::<char>(b"\xe2\x82\n").0.is_err());
        assert!(matches!(
            scan::<char>(b" \n\n").0,
            Err(ScanError::EndOfInput)
        ));
    }

    #[test]
    fn take_line_limits() {
        let mut reader = &b"hello\nworld\n"[..];
        let line = take_line(&mut reader, 16).unwrap().unwrap();
        assert_eq!(b"hello".to_vec(), line.bytes);
        assert_eq!(LineEnd::Terminator, line.end);
        assert_eq!(b"\nworld\n", reader);

        let mut reader = &b"hello\n"[..];
        let line = take_line(&mut reader, 3).unwrap().unwrap();
        assert_eq!(b"hel".to_vec(), line.bytes);
        assert_eq!(LineEnd::Limit, line.end);

        let mut reader = &b"tail"[..];
        let line = take_line(&mut reader, 16).unwrap().unwrap();
        assert_eq!(b"tail".to_vec(), line.bytes);
        assert_eq!(LineEnd::EndOfInput, line.end);

        let mut reader = &b""[..];
        assert!(take_line(&mut reader, 3).unwrap().is_none());
    }
}
