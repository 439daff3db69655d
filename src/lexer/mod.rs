//! Lexical analysis for the C-minus language.
//!
//! This module contains the scanner that turns raw source bytes into a
//! stream of tokens. It handles:
//!
//! - Pulling input one line-sized chunk at a time from a [`source::SourceReader`]
//! - Skipping whitespace and `/* ... */` comments
//! - Maximal-munch recognition of one- and two-character operators
//! - Telling reserved words apart from identifiers
//! - Reporting unrecognised characters as error tokens instead of failing

pub mod chars;
pub mod lexer;
pub mod source;
pub mod tokens;
