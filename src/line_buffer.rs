//! Fixed-capacity storage for a line of text.
//!
//! The storage always holds a NUL terminator so it can be handed to code
//! that expects C strings. Text is truncated on grapheme cluster
//! boundaries so a multi-byte character, or a base character and its
//! combining marks, are never split.
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Capacity of a [DefaultLineBuffer], terminator included.
pub const DEFAULT_LINE_CAPACITY: usize = 256;

/// Largest line capacity, terminator included, an owned line read will use.
pub const MAX_LINE_CAPACITY: usize = 4096;

/// Line buffer sized for typical console answers.
pub type DefaultLineBuffer = LineBuffer<DEFAULT_LINE_CAPACITY>;

/// Longest prefix of `text` that fits in `limit` bytes without splitting
/// a grapheme cluster.
pub fn fit(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let end = text
        .grapheme_indices(true)
        .map(|(index, grapheme)| index + grapheme.len())
        .take_while(|end| *end <= limit)
        .last()
        .unwrap_or(0);
    &text[..end]
}

/// Copy `text` into `dest` followed by a NUL terminator.
///
/// At most `dest.len() - 1` bytes of text are written; the rest is
/// dropped. Returns the number of text bytes written. An empty `dest`
/// has no room for the terminator and is left untouched.
pub fn write_terminated(dest: &mut [u8], text: &str) -> usize {
    let Some(limit) = dest.len().checked_sub(1) else {
        return 0;
    };
    let fitted = fit(text, limit);
    dest[..fitted.len()].copy_from_slice(fitted.as_bytes());
    dest[fitted.len()] = 0;
    fitted.len()
}

/// Text stored in `bytes` before the first NUL.
///
/// Bytes that are not valid UTF-8 end the text early.
pub fn terminated_str(bytes: &[u8]) -> &str {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    match std::str::from_utf8(&bytes[..end]) {
        Ok(text) => text,
        Err(e) => std::str::from_utf8(&bytes[..e.valid_up_to()])
            .unwrap_or_default(),
    }
}

/// Stack-allocated, NUL-terminated line of at most `N - 1` bytes.
#[derive(Clone, Copy)]
pub struct LineBuffer<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> LineBuffer<N> {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { bytes: [0; N] }
    }

    /// Total storage including the terminator.
    pub fn capacity(&self) -> usize {
        N
    }

    /// Get the stored text.
    pub fn as_str(&self) -> &str {
        terminated_str(&self.bytes)
    }

    /// Number of bytes of stored text.
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    /// Determine if no text is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the stored text, truncating it to fit.
    ///
    /// Returns the number of bytes kept.
    pub fn set(&mut self, text: &str) -> usize {
        write_terminated(&mut self.bytes, text)
    }

    /// Remove the stored text.
    pub fn clear(&mut self) {
        self.set("");
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> AsRef<[u8]> for LineBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> AsMut<[u8]> for LineBuffer<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl<const N: usize> fmt::Debug for LineBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineBuffer")
            .field("capacity", &N)
            .field("text", &self.as_str())
            .finish()
    }
}

impl<const N: usize> fmt::Display for LineBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> From<LineBuffer<N>> for String {
    fn from(buffer: LineBuffer<N>) -> Self {
        buffer.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fit_keeps_clusters_whole() {
        assert_eq!("hello", fit("hello", 5));
        assert_eq!("hel", fit("hello", 3));
        // 'é' is two bytes
        assert_eq!("ab", fit("abé", 3));
        // 'e' followed by a combining acute accent
        assert_eq!("a", fit("ae\u{301}", 3));
        assert_eq!("", fit("🦀", 3));
    }

    #[test]
    fn write_terminated_capacity() {
        let mut dest = [0xffu8; 6];
        assert_eq!(5, write_terminated(&mut dest, "hello world"));
        assert_eq!(b"hello\0", &dest);

        let mut dest = [0xffu8; 1];
        assert_eq!(0, write_terminated(&mut dest, "hello"));
        assert_eq!([0u8], dest);

        let mut dest: [u8; 0] = [];
        assert_eq!(0, write_terminated(&mut dest, "hello"));
    }

    #[test]
    fn terminated_str_stops_at_nul() {
        assert_eq!("abc", terminated_str(b"abc\0def"));
        assert_eq!("abc", terminated_str(b"abc"));
        assert_eq!("ab", terminated_str(b"ab\xff\0"));
    }

    #[test]
    fn line_buffer_basic() {
        let mut buffer = LineBuffer::<8>::new();
        assert!(buffer.is_empty());
        assert_eq!(8, buffer.capacity());

        assert_eq!(7, buffer.set("overflowing"));
        assert_eq!("overflo", buffer.as_str());
        assert_eq!(7, buffer.len());
        assert_eq!(0, buffer.as_ref()[7]);

        buffer.set("hi");
        assert_eq!("hi", buffer.to_string());

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!("", String::from(buffer));
    }

    #[test]
    fn line_buffer_invalid_bytes_are_empty() {
        let mut buffer = LineBuffer::<4>::new();
        buffer.as_mut()[..2].copy_from_slice(b"\xff\0");
        assert_eq!(0, buffer.len());
        assert!(buffer.is_empty());
    }

    #[test]
    fn default_line_buffer() {
        let buffer = DefaultLineBuffer::default();
        assert_eq!(DEFAULT_LINE_CAPACITY, buffer.capacity());
        assert!(buffer.is_empty());
    }
}
