//! Byte-position cursor over the input text
//!
//! The resolution engine and all extractors share one [`Cursor`] per
//! resolution call. The position only ever moves forward: once bytes are
//! consumed they are gone, there is no backtracking.

use crate::error::Error;

/// Forward-only read position over input text.
#[derive(Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Bytes consumed since the start of the input
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Drop the next `n` bytes.
    ///
    /// Fails with [`Error::ShortInput`] if fewer than `n` bytes remain.
    pub fn discard(&mut self, n: usize) -> Result<(), Error> {
        if n > self.remaining() {
            return Err(Error::ShortInput {
                requested: n,
                remaining: self.remaining(),
            });
        }
        self.pos += n;
        Ok(())
    }

    /// Consume and return the next `n` bytes.
    ///
    /// Returns raw bytes rather than `&str`: the caller is comparing input
    /// against a template span and the input is not guaranteed to split on
    /// a character boundary at `n`.
    pub fn take_bytes(&mut self, n: usize) -> Result<&'a [u8], Error> {
        if n > self.remaining() {
            return Err(Error::ShortInput {
                requested: n,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.input.as_bytes()[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Consume and return the next character, or `None` at end of input.
    pub fn next_char(&mut self) -> Option<char> {
        let rest = self.input.get(self.pos..)?;
        let c = rest.chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Look at the next character without consuming it.
    pub fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos..)?.chars().next()
    }

    /// Consume and return all characters up to (not including) the first
    /// character matching `stop`, or to end of input.
    ///
    /// The stop character is left unconsumed. Never fails: reaching end of
    /// input returns whatever was read.
    pub fn read_until<F: Fn(char) -> bool>(&mut self, stop: F) -> &'a str {
        let rest = self.input.get(self.pos..).unwrap_or("");
        let end = rest
            .char_indices()
            .find(|(_, c)| stop(*c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    /// Read up to the next whitespace character or end of input.
    pub fn read_until_whitespace(&mut self) -> &'a str {
        self.read_until(char::is_whitespace)
    }

    /// Read up to the next `"` or `'` or end of input.
    pub fn read_quoted(&mut self) -> &'a str {
        self.read_until(|c| c == '"' || c == '\'')
    }
}
