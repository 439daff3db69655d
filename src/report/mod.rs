//! Rendering of scanned tokens for people.
//!
//! The scanner only produces tokens; this module drains it into the
//! fixed-width token table and turns error tokens into diagnostics.

pub mod report;
