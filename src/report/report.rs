use std::io::{self, Write};

use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Scanner,
        source::SourceReader,
        tokens::{Token, TokenKind},
    },
    Position,
};

/// Width of every column in the token table.
pub const COLUMN_WIDTH: usize = 20;

/// What a drained scanner produced, besides the table itself.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Tokens written, end of input excluded.
    pub tokens: usize,
    /// One diagnostic per error token, in source order.
    pub errors: Vec<Error>,
    /// Set when the source stopped because a read failed.
    pub read_error: Option<Error>,
}

impl ScanSummary {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.read_error.is_none()
    }
}

/// Writes the three-column `TOKEN` / `LEXEME` / `VALUE` table.
pub struct TokenTable<W> {
    out: W,
}

impl<W: Write> TokenTable<W> {
    pub fn new(out: W) -> Self {
        TokenTable { out }
    }

    pub fn write_header(&mut self) -> Result<(), Error> {
        let header = format!(
            "{:<width$}{:<width$}{:<width$}\n{:<width$}{:<width$}{:<width$}\n",
            "TOKEN",
            "LEXEME",
            "VALUE",
            "=====",
            "======",
            "=====",
            width = COLUMN_WIDTH
        );
        self.emit(&header)
    }

    pub fn write_row(&mut self, token: &Token) -> Result<(), Error> {
        self.emit(&format_row(token))
    }

    pub fn write_footer(&mut self) -> Result<(), Error> {
        let footer = format!("{:<width$}\"\" \n", TokenKind::EndOfFile.name(), width = COLUMN_WIDTH);
        self.emit(&footer)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) -> Result<(), Error> {
        self.out.write_all(text.as_bytes()).map_err(write_failed)
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.out.flush().map_err(write_failed)
    }
}

/// One table row: kind name, quoted lexeme, then the value column. Errors
/// show where they were found, identifiers their quoted name and numbers
/// their digits. Everything else leaves the value empty.
pub fn format_row(token: &Token) -> String {
    let value = match token.kind {
        TokenKind::Error => format!("Line: {}; Column: {}", token.line, token.column),
        TokenKind::Id => format!("\"{}\"", token.lexeme),
        TokenKind::Num => token.lexeme.clone(),
        _ => String::new(),
    };

    format!(
        "{:<width$}{:<width$}{}\n",
        token.kind.name(),
        format!("\"{}\"", token.lexeme),
        value,
        width = COLUMN_WIDTH
    )
}

/// The diagnostic for an error token, carrying the token's own position.
pub fn diagnostic(token: &Token) -> Option<Error> {
    if !token.is_error() {
        return None;
    }

    Some(Error::new(
        ErrorImpl::UnrecognisedCharacter {
            character: token.lexeme.clone(),
        },
        Position::new(token.line, token.column),
    ))
}

pub fn diagnostics(tokens: &[Token]) -> Vec<Error> {
    tokens.iter().filter_map(diagnostic).collect()
}

/// Drains `scanner` into a token table on `out`.
pub fn write_token_table<R, W>(scanner: &mut Scanner<R>, out: W) -> Result<ScanSummary, Error>
where
    R: SourceReader,
    W: Write,
{
    let mut table = TokenTable::new(out);
    let mut summary = ScanSummary::default();

    table.write_header()?;
    loop {
        let token = scanner.next_token();
        if token.is_eof() {
            break;
        }

        table.write_row(&token)?;
        summary.tokens += 1;
        summary.errors.extend(diagnostic(&token));
    }
    table.write_footer()?;
    table.flush()?;

    summary.read_error = scanner.io_error().map(|e| {
        Error::unpositioned(ErrorImpl::SourceRead {
            message: e.to_string(),
        })
    });

    debug!(tokens = summary.tokens, errors = summary.errors.len(), "token table written");
    Ok(summary)
}

fn write_failed(e: io::Error) -> Error {
    Error::unpositioned(ErrorImpl::OutputWrite {
        message: e.to_string(),
    })
}
