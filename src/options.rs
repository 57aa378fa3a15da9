//! Options for reading input.

/// Default limit for a single numeric or character token.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 256;

/// The options to use when creating a console.
#[derive(Debug, Clone)]
pub struct InputOptions {
    /// Longest token, in bytes, a numeric reader will accept.
    ///
    /// Longer tokens are rejected without buffering them.
    pub(crate) max_token_len: usize,

    /// Remove a `\r` that precedes the line terminator.
    pub(crate) strip_carriage_return: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
            strip_carriage_return: true,
        }
    }
}

impl InputOptions {
    /// Create new input options.
    pub fn new() -> Self {
        Default::default()
    }

    /// Configure the token length limit.
    pub fn max_token_len(mut self, max_token_len: usize) -> Self {
        self.max_token_len = max_token_len;
        self
    }

    /// Configure carriage return handling for line input.
    pub fn strip_carriage_return(mut self, strip: bool) -> Self {
        self.strip_carriage_return = strip;
        self
    }
}
