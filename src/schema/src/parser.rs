// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Object name parser.
//!
//! This module lexes a raw object name into its dot-separated segments. A
//! segment is either a bare identifier or a quoted identifier delimited by
//! backticks, double quotes, or square brackets. There is no escape mechanism
//! for a quote delimiter inside a quoted segment.
//!
//! The parser imposes no limit on the number of segments; enforcing that an
//! object name has at most one qualifier is the responsibility of
//! [`Name`](crate::name::Name), which can then report the number of
//! qualifiers it found.

use std::error::Error;
use std::fmt;

use crate::lex::LexBuf;
use crate::name::Ident;

/// An error that occurred while lexing an object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
    /// The byte position with which the error is associated.
    pub pos: usize,
    /// A human-readable description of the error.
    pub message: String,
}

impl ParserError {
    /// Constructs an error at `pos` with the given message.
    pub(crate) fn new<S>(pos: usize, message: S) -> ParserError
    where
        S: Into<String>,
    {
        ParserError {
            pos,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (near position {})", self.message, self.pos)
    }
}

impl Error for ParserError {}

macro_rules! bail {
    ($pos:expr, $($fmt:expr),*) => {
        return Err(ParserError::new($pos, format!($($fmt),*)))
    }
}

/// Parses a raw object name into its segments.
///
/// The empty string parses to an empty segment list. Returns an error if the
/// name is lexically invalid.
pub fn parse(name: &str) -> Result<Vec<Ident>, ParserError> {
    let buf = &mut LexBuf::new(name);
    let mut idents = vec![];
    if buf.peek().is_none() {
        return Ok(idents);
    }
    loop {
        idents.push(lex_segment(buf)?);
        let pos = buf.pos();
        match buf.next() {
            Some('.') => continue,
            Some(ch) => bail!(pos, "unexpected character in object name: {}", ch),
            None => break,
        }
    }
    Ok(idents)
}

fn lex_segment(buf: &mut LexBuf) -> Result<Ident, ParserError> {
    let pos = buf.pos();
    match buf.next() {
        Some('`') => Ok(Ident::quoted(lex_quoted_segment(buf, '`', pos)?)),
        Some('"') => Ok(Ident::quoted(lex_quoted_segment(buf, '"', pos)?)),
        Some('[') => Ok(Ident::quoted(lex_quoted_segment(buf, ']', pos)?)),
        Some(ch) if is_ident_start(ch) => {
            buf.prev();
            Ok(Ident::unquoted(buf.take_while(is_ident_cont)))
        }
        Some('.') => bail!(pos, "empty identifier before period"),
        Some(ch) => bail!(pos, "unexpected character in object name: {}", ch),
        None => bail!(pos, "expected identifier after period"),
    }
}

fn lex_quoted_segment(
    buf: &mut LexBuf,
    delimiter: char,
    pos: usize,
) -> Result<String, ParserError> {
    let mut s = String::new();
    loop {
        match buf.next() {
            Some(ch) if ch == delimiter => return Ok(s),
            Some(ch) => s.push(ch),
            None => bail!(pos, "unterminated quoted identifier"),
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    matches!(ch, 'A'..='Z' | 'a'..='z' | '_' | '\u{80}'..=char::MAX)
}

fn is_ident_cont(ch: char) -> bool {
    matches!(ch, 'A'..='Z' | 'a'..='z' | '0'..='9' | '$' | '_' | '\u{80}'..=char::MAX)
}
