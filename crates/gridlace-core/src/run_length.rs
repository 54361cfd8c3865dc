//! Run-length encoding shared by the descriptor codecs.
//!
//! Consecutive empty cells collapse into a lowercase letter: `a` is a run of
//! one, `z` a run of 26, and longer runs are chained (`zd` is 30). Every other
//! character is a literal token whose meaning belongs to the calling codec.
//!
//! # Examples
//!
//! ```
//! use gridlace_core::run_length::{self, RunLengthWriter};
//!
//! let mut w = RunLengthWriter::new();
//! w.push_empty_n(3);
//! w.push_token("5");
//! w.push_empty();
//! assert_eq!(w.finish(), "c5a");
//!
//! let cells = run_length::decode("grid", "c5a", 5, |c, _| {
//!     c.to_digit(10).map(|d| d as u8).ok_or(c)
//! })?;
//! assert_eq!(cells, vec![0, 0, 0, 5, 0]);
//! # Ok::<(), gridlace_core::DescriptorError>(())
//! ```

use std::{iter::Peekable, str::Chars};

use crate::DescriptorError;

const MAX_RUN: usize = 26;

/// Builds a run-length encoded section.
#[derive(Debug, Default, Clone)]
pub struct RunLengthWriter {
    out: String,
    run: usize,
}

impl RunLengthWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one empty cell.
    pub fn push_empty(&mut self) {
        self.run += 1;
        if self.run == MAX_RUN {
            self.flush();
        }
    }

    /// Appends `n` empty cells.
    pub fn push_empty_n(&mut self, n: usize) {
        for _ in 0..n {
            self.push_empty();
        }
    }

    /// Appends a literal token, closing any pending run.
    pub fn push_token(&mut self, token: &str) {
        self.flush();
        self.out.push_str(token);
    }

    /// Appends a literal character, closing any pending run.
    pub fn push_char(&mut self, c: char) {
        self.flush();
        self.out.push(c);
    }

    /// Closes the pending run and returns the encoded text.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.flush();
        self.out
    }

    fn flush(&mut self) {
        if self.run > 0 {
            #[expect(clippy::cast_possible_truncation)]
            let c = char::from(b'a' + (self.run - 1) as u8);
            self.out.push(c);
            self.run = 0;
        }
    }
}

/// A token read from a run-length encoded section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunToken {
    /// A run of this many empty cells.
    Empty(usize),
    /// A literal character.
    Symbol(char),
}

/// Reads tokens from a run-length encoded section.
#[derive(Debug, Clone)]
pub struct RunLengthReader<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> RunLengthReader<'a> {
    /// Creates a reader over `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    /// Consumes a decimal number directly following the current position.
    ///
    /// Returns `None` if no digit follows. Saturates instead of overflowing.
    pub fn take_number(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;
        while let Some(d) = self.chars.peek().and_then(|c| c.to_digit(10)) {
            self.chars.next();
            value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d));
        }
        value
    }
}

impl Iterator for RunLengthReader<'_> {
    type Item = RunToken;

    fn next(&mut self) -> Option<RunToken> {
        let c = self.chars.next()?;
        Some(if c.is_ascii_lowercase() {
            RunToken::Empty(c as usize - 'a' as usize + 1)
        } else {
            RunToken::Symbol(c)
        })
    }
}

/// Encodes `cells`, mapping each one to `Some(token)` or `None` for empty.
pub fn encode<T, F>(cells: &[T], mut token: F) -> String
where
    F: FnMut(&T) -> Option<String>,
{
    let mut w = RunLengthWriter::new();
    for cell in cells {
        match token(cell) {
            Some(t) => w.push_token(&t),
            None => w.push_empty(),
        }
    }
    w.finish()
}

/// Decodes a section of exactly `len` cells.
///
/// `symbol` converts a literal character (plus any trailing data it reads from
/// the reader) into a cell value. It returns `Err(c)` to reject the character.
/// Empty cells are `T::default()`. An empty `input` decodes to all-empty.
///
/// # Errors
///
/// Returns [`DescriptorError::TooLong`] if tokens run past `len` cells,
/// [`DescriptorError::TooShort`] if fewer than `len` cells are described, or
/// [`DescriptorError::InvalidCharacter`] for a rejected character.
pub fn decode<T, F>(
    section: &'static str,
    input: &str,
    len: usize,
    mut symbol: F,
) -> Result<Vec<T>, DescriptorError>
where
    T: Default + Clone,
    F: FnMut(char, &mut RunLengthReader<'_>) -> Result<T, char>,
{
    let mut cells = vec![T::default(); len];
    if input.is_empty() {
        return Ok(cells);
    }

    let mut reader = RunLengthReader::new(input);
    let mut pos = 0;
    while let Some(token) = reader.next() {
        if pos >= len {
            return Err(DescriptorError::TooLong { section });
        }
        match token {
            RunToken::Empty(n) => pos += n,
            RunToken::Symbol(c) => {
                let value = symbol(c, &mut reader)
                    .map_err(|ch| DescriptorError::InvalidCharacter { section, ch })?;
                cells[pos] = value;
                pos += 1;
            }
        }
    }

    if pos > len {
        return Err(DescriptorError::TooLong { section });
    }
    if pos < len {
        return Err(DescriptorError::TooShort { section });
    }
    Ok(cells)
}
