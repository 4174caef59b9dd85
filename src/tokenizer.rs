//! Whitespace tokenizer for geometry file rows.
//!
//! Rows are split on runs of whitespace so ragged column alignment and
//! `\r\n` line endings decode the same as tidy files. Numeric conversion
//! is left to the caller, which knows the type of each column.

use crate::error::{GeometryError, Result};
use std::str::FromStr;

/// Split a line into whitespace-delimited tokens
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// One tokenized line of the input
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    /// 1-based line number
    pub line: usize,
    pub text: &'a str,
    tokens: Vec<&'a str>,
}

impl<'a> Row<'a> {
    /// Tokenize the line at 0-based `offset`
    pub fn new(offset: usize, text: &'a str) -> Self {
        Self {
            line: offset + 1,
            text,
            tokens: tokenize(text),
        }
    }

    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn last(&self) -> Option<&'a str> {
        self.tokens.last().copied()
    }

    /// Token at `index`, or `MalformedRow` when the row is too short
    pub fn token(&self, index: usize) -> Result<&'a str> {
        self.tokens.get(index).copied().ok_or_else(|| {
            GeometryError::malformed(
                self.line,
                self.text,
                format!(
                    "expected at least {} columns, found {}",
                    index + 1,
                    self.tokens.len()
                ),
            )
        })
    }

    /// Parse the token at `index` as `T`, naming `field` on failure
    pub fn parse<T: FromStr>(&self, index: usize, field: &str) -> Result<T> {
        let token = self.token(index)?;
        token.parse::<T>().map_err(|_| {
            GeometryError::malformed(
                self.line,
                self.text,
                format!("column {} ({}) has invalid value '{}'", index, field, token),
            )
        })
    }
}
