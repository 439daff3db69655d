//! Error types and error handling for the lexer driver.
//!
//! The scanner never fails: unrecognised characters come back as error
//! tokens. This module holds what the surrounding glue reports:
//!
//! - Diagnostics built from error tokens, with their line/column
//! - Source read, output write and file open failures
//! - Short human-readable tips for each of them

pub mod errors;

#[cfg(test)]
mod tests;
