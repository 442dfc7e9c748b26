// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! A rewindable character buffer for hand-rolled lexers.

/// A buffer over the characters of a string that tracks its position and can
/// be rewound one character at a time.
#[derive(Debug)]
pub struct LexBuf<'a> {
    buf: &'a str,
    pos: usize,
}

impl<'a> LexBuf<'a> {
    /// Creates a new lexical buffer over `buf`.
    pub fn new(buf: &'a str) -> LexBuf<'a> {
        LexBuf { buf, pos: 0 }
    }

    /// Returns the current byte position of the buffer.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the next character in the buffer without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.buf[self.pos..].chars().next()
    }

    /// Rewinds the buffer by one character.
    ///
    /// Panics if the buffer is at its start. Callers must only rewind over a
    /// character they have already consumed.
    pub fn prev(&mut self) {
        match self.buf[..self.pos].chars().next_back() {
            Some(ch) => self.pos -= ch.len_utf8(),
            None => panic!("LexBuf::prev called on buffer at position 0"),
        }
    }

    /// Consumes the next character if it equals `ch`, returning whether the
    /// character was consumed.
    pub fn consume(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consumes characters as long as `predicate` returns true, returning the
    /// consumed prefix.
    pub fn take_while<P>(&mut self, mut predicate: P) -> &'a str
    where
        P: FnMut(char) -> bool,
    {
        let pos = self.pos;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.next();
        }
        &self.buf[pos..self.pos]
    }
}

impl<'a> Iterator for LexBuf<'a> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }
}
