use std::{io, iter::FusedIterator};

use tracing::{debug, trace, warn};

use super::{
    chars::{is_alpha, is_digit, is_whitespace},
    source::{SourceReader, DEFAULT_CHUNK_LEN},
    tokens::{lookup_keyword, Token, TokenKind},
};

/// One byte pulled from the source together with where it sits. `byte` is
/// `None` once the source is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scanned {
    byte: Option<u8>,
    line: usize,
    column: usize,
}

/// Character-level scanner producing one [`Token`] per call.
///
/// Input is pulled from a [`SourceReader`] one chunk (at most one physical
/// line) at a time. A single character of pushback is kept in `peeked`,
/// which carries its own position, so un-reading right after a refill is
/// well defined.
pub struct Scanner<R> {
    reader: R,
    chunk: Vec<u8>,
    chunk_len: usize,
    cursor: usize,
    line_number: usize,
    // Column offset of `chunk[0]` within its physical line.
    chunk_column: usize,
    // Whether the last chunk ended with a newline, i.e. the next chunk
    // starts a new physical line.
    line_complete: bool,
    peeked: Option<Scanned>,
    at_eof: bool,
    eof_position: (usize, usize),
    finished: bool,
    token_line: usize,
    token_column: usize,
    io_error: Option<io::Error>,
}

impl<R: SourceReader> Scanner<R> {
    pub fn new(reader: R) -> Scanner<R> {
        Scanner::with_chunk_len(reader, DEFAULT_CHUNK_LEN)
    }

    /// Creates a scanner that refills at most `chunk_len` bytes at a time.
    /// A length of zero is treated as one.
    pub fn with_chunk_len(reader: R, chunk_len: usize) -> Scanner<R> {
        let chunk_len = chunk_len.max(1);

        Scanner {
            reader,
            chunk: Vec::with_capacity(chunk_len),
            chunk_len,
            cursor: 0,
            line_number: 0,
            chunk_column: 0,
            line_complete: true,
            peeked: None,
            at_eof: false,
            eof_position: (1, 1),
            finished: false,
            token_line: 0,
            token_column: 0,
            io_error: None,
        }
    }

    /// Scans and returns the next token. Once end of input is reached every
    /// further call returns another end-of-input token.
    pub fn next_token(&mut self) -> Token {
        let first = self.skip_trivia();
        let token = self.scan(first);

        self.token_line = token.line;
        self.token_column = token.column;
        trace!(kind = %token.kind, lexeme = %token.lexeme, line = token.line, column = token.column, "token");

        token
    }

    /// Line of the last returned token, `0` before the first call.
    pub fn current_line(&self) -> usize {
        self.token_line
    }

    /// Column of the first character of the last returned token, `0`
    /// before the first call.
    pub fn current_column(&self) -> usize {
        self.token_column
    }

    /// The read failure that ended the stream early, if there was one.
    pub fn io_error(&self) -> Option<&io::Error> {
        self.io_error.as_ref()
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn scan(&mut self, first: Scanned) -> Token {
        let Scanned { byte, line, column } = first;

        let Some(b) = byte else {
            return Token::eof(line, column);
        };

        let kind = match b {
            b';' => TokenKind::Semi,
            b',' => TokenKind::Comma,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBrack,
            b']' => TokenKind::RBrack,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'*' => TokenKind::Times,
            b'/' => TokenKind::Divide,
            b'+' => self.either(b'+', TokenKind::Increment, TokenKind::Plus),
            b'-' => self.either(b'-', TokenKind::Decrement, TokenKind::Minus),
            b'<' => self.either(b'=', TokenKind::Lte, TokenKind::Lt),
            b'>' => self.either(b'=', TokenKind::Gte, TokenKind::Gt),
            b'=' => self.either(b'=', TokenKind::Eq, TokenKind::Assign),
            // A lone `!` has no meaning of its own.
            b'!' => self.either(b'=', TokenKind::Neq, TokenKind::Error),
            _ if is_alpha(b) => {
                let word = self.take_while(b, is_alpha);
                let kind = lookup_keyword(&word).unwrap_or(TokenKind::Id);
                return Token::new(kind, word, line, column);
            }
            _ if is_digit(b) => {
                let digits = self.take_while(b, is_digit);
                return Token::new(TokenKind::Num, digits, line, column);
            }
            _ => TokenKind::Error,
        };

        match kind.spelling() {
            Some(spelling) => Token::new(kind, spelling, line, column),
            None => {
                let token = Token::error(b, line, column);
                debug!(character = %token.lexeme, line, column, "unrecognised character");
                token
            }
        }
    }

    /// Consumes `second` if it comes next and yields `double`, otherwise
    /// leaves the input alone and yields `single`.
    fn either(&mut self, second: u8, double: TokenKind, single: TokenKind) -> TokenKind {
        let next = self.bump();

        if next.byte == Some(second) {
            double
        } else {
            self.unread(next);
            single
        }
    }

    fn take_while(&mut self, first: u8, accept: fn(u8) -> bool) -> String {
        let mut lexeme = String::from(first as char);

        loop {
            let next = self.bump();
            match next.byte {
                Some(b) if accept(b) => lexeme.push(b as char),
                _ => {
                    self.unread(next);
                    return lexeme;
                }
            }
        }
    }

    /// Skips whitespace and block comments, returning the first character
    /// that belongs to a token (or end of input).
    fn skip_trivia(&mut self) -> Scanned {
        loop {
            let mut current = self.bump();
            while matches!(current.byte, Some(b) if is_whitespace(b)) {
                current = self.bump();
            }

            if current.byte != Some(b'/') {
                return current;
            }

            let next = self.bump();
            if next.byte != Some(b'*') {
                self.unread(next);
                return current;
            }

            self.skip_block_comment();
        }
    }

    // Runs to the first `*/` or end of input. No nesting.
    fn skip_block_comment(&mut self) {
        let mut after_star = false;

        loop {
            match self.bump().byte {
                None => return,
                Some(b'/') if after_star => return,
                Some(b) => after_star = b == b'*',
            }
        }
    }

    fn bump(&mut self) -> Scanned {
        if let Some(peeked) = self.peeked.take() {
            return peeked;
        }

        if self.cursor >= self.chunk.len() && !self.refill() {
            let (line, column) = self.eof_position;
            return Scanned {
                byte: None,
                line,
                column,
            };
        }

        let scanned = Scanned {
            byte: Some(self.chunk[self.cursor]),
            line: self.line_number,
            column: self.chunk_column + self.cursor + 1,
        };
        self.cursor += 1;

        scanned
    }

    fn unread(&mut self, scanned: Scanned) {
        debug_assert!(self.peeked.is_none(), "only one character of pushback is supported");
        self.peeked = Some(scanned);
    }

    fn refill(&mut self) -> bool {
        if self.at_eof {
            return false;
        }

        // End of input sits just past the last byte read.
        let end = (self.line_number.max(1), self.chunk_column + self.chunk.len() + 1);
        let next_column = if self.line_complete {
            0
        } else {
            self.chunk_column + self.chunk.len()
        };

        match self.reader.read_chunk(&mut self.chunk, self.chunk_len) {
            Ok(0) => {
                trace!(line = end.0, "end of input");
                self.finish_input(end);
                false
            }
            Ok(read) => {
                if self.line_complete {
                    self.line_number += 1;
                }
                self.chunk_column = next_column;
                self.line_complete = self.chunk.last() == Some(&b'\n');
                self.cursor = 0;
                trace!(line = self.line_number, column = self.chunk_column + 1, bytes = read, "refilled line buffer");
                true
            }
            Err(e) => {
                warn!(error = %e, line = end.0, "source read failed, treating as end of input");
                self.io_error = Some(e);
                self.finish_input(end);
                false
            }
        }
    }

    fn finish_input(&mut self, end: (usize, usize)) {
        self.at_eof = true;
        self.eof_position = end;
        self.chunk.clear();
        self.cursor = 0;
    }
}

impl<R: SourceReader> Iterator for Scanner<R> {
    type Item = Token;

    /// Yields tokens up to and including the first end-of-input token.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.is_eof() {
            self.finished = true;
        }

        Some(token)
    }
}

impl<R: SourceReader> FusedIterator for Scanner<R> {}

/// Scans all of `source`, end-of-input token included.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source.as_bytes()).collect()
}
