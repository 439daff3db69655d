#![allow(clippy::module_inception)]

use std::{fmt::Display, io::Write, sync::Once};

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod report;

/// 1-based line/column of a character in the source. `0:0` means no
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    pub fn null() -> Self {
        Position { line: 0, column: 0 }
    }

    pub fn is_null(&self) -> bool {
        self.line == 0 && self.column == 0
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Nothing is installed unless `RUST_LOG` is
/// set, e.g. `RUST_LOG=cminus_lexer=trace`. Output goes to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

pub fn display_error(error: &Error, file: &str, out: &mut impl Write) -> std::io::Result<()> {
    /*
        Error: UnrecognisedCharacter (Unrecognised character `@`)
        -> main.cm:3:7
    */

    if let ErrorTip::None = error.get_tip() {
        writeln!(out, "Error: {}", error.get_error_name())?;
    } else {
        writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip())?;
    }

    let position = error.get_position();
    if position.is_null() {
        writeln!(out, "-> {}", file)
    } else {
        writeln!(out, "-> {}:{}", file, position)
    }
}
