//! Cursor over a media type string.
//!
//! The tokenizer walks a borrowed `&str` with a byte cursor that always sits
//! on a character boundary. By default every scanning operation first skips
//! ASCII whitespace; quoted values turn this off for their duration with
//! [`Tokenizer::without_whitespace_skipping`].

/// A movable read cursor over a string.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    skips_whitespace: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            skips_whitespace: true,
        }
    }

    /// Returns the current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor back to an offset previously returned by [`position`](Self::position).
    pub fn reset(&mut self, pos: usize) {
        debug_assert!(self.input.is_char_boundary(pos));
        self.pos = pos;
    }

    /// Returns the unread part of the input.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Reports whether whitespace is skipped before each scan.
    pub fn skips_whitespace(&self) -> bool {
        self.skips_whitespace
    }

    /// Reports whether nothing but skippable characters remain.
    pub fn is_at_end(&self) -> bool {
        if self.skips_whitespace {
            self.remaining()
                .trim_start_matches(|c: char| c.is_ascii_whitespace())
                .is_empty()
        } else {
            self.remaining().is_empty()
        }
    }

    /// Runs `f` with whitespace skipping disabled, restoring the previous
    /// setting afterwards regardless of how `f` returns.
    pub fn without_whitespace_skipping<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.skips_whitespace, false);
        let result = f(self);
        self.skips_whitespace = saved;
        result
    }

    /// Consumes any ASCII whitespace at the cursor.
    pub fn skip_whitespace(&mut self) {
        let rest = self.remaining();
        let trimmed = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
        self.pos += rest.len() - trimmed.len();
    }

    fn skip_configured(&mut self) {
        if self.skips_whitespace {
            self.skip_whitespace();
        }
    }

    /// Returns the next `n` characters without consuming them, or `None` if
    /// fewer than `n` remain. Never skips whitespace.
    pub fn lookahead(&self, n: usize) -> Option<&'a str> {
        let rest = self.remaining();
        let end = rest
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(rest.len()))
            .nth(n)?;
        Some(&rest[..end])
    }

    /// Returns the next character without consuming it. Never skips whitespace.
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consumes and returns the next character. Never skips whitespace.
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes `expected` if it is the next character.
    pub fn scan_char(&mut self, expected: char) -> bool {
        let start = self.pos;
        self.skip_configured();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            self.pos = start;
            false
        }
    }

    /// Consumes the longest run of characters matching `pred`, possibly empty.
    pub fn scan_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        self.skip_configured();
        let rest = self.remaining();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Consumes characters up to, not including, the first one matching `pred`.
    pub fn scan_up_to(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        self.scan_while(|c| !pred(c))
    }

    /// Parses exactly `length` characters as an unsigned integer in `radix`.
    ///
    /// Consumes nothing and returns `None` if fewer characters remain, if any
    /// of them is not a digit in `radix`, or if the value overflows `u32`.
    pub fn scan_unsigned_integer(&mut self, length: usize, radix: u32) -> Option<u32> {
        if length == 0 || !(2..=36).contains(&radix) {
            return None;
        }
        let digits = self.lookahead(length)?;
        let value = digits.chars().try_fold(0u32, |acc, c| {
            let digit = c.to_digit(radix)?;
            acc.checked_mul(radix)?.checked_add(digit)
        })?;
        self.pos += digits.len();
        Some(value)
    }
}
