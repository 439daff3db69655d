//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedCharacter {
            character: "@".to_string(),
        },
        Position::new(1, 10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedCharacter");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnrecognisedCharacter {
            character: "#".to_string(),
        },
        Position::new(4, 2),
    );

    assert_eq!(error.get_position().line, 4);
    assert_eq!(error.get_position().column, 2);
}

#[test]
fn test_error_names() {
    let read = Error::unpositioned(ErrorImpl::SourceRead {
        message: "interrupted".to_string(),
    });
    let write = Error::unpositioned(ErrorImpl::OutputWrite {
        message: "disk full".to_string(),
    });
    let open = Error::unpositioned(ErrorImpl::OpenFile {
        path: "missing.cm".to_string(),
        message: "No such file or directory".to_string(),
    });

    assert_eq!(read.get_error_name(), "SourceRead");
    assert_eq!(write.get_error_name(), "OutputWrite");
    assert_eq!(open.get_error_name(), "OpenFile");
}

#[test]
fn test_unpositioned_error() {
    let error = Error::unpositioned(ErrorImpl::OutputWrite {
        message: "disk full".to_string(),
    });

    assert!(error.get_position().is_null());
    assert_eq!(error.to_string(), "error writing output: disk full");
}

#[test]
fn test_error_display_includes_position() {
    let error = Error::new(
        ErrorImpl::UnrecognisedCharacter {
            character: "$".to_string(),
        },
        Position::new(2, 5),
    );

    assert_eq!(error.to_string(), "unrecognised character: \"$\" at 2:5");
}

#[test]
fn test_error_tips() {
    let unknown = Error::new(
        ErrorImpl::UnrecognisedCharacter {
            character: "@".to_string(),
        },
        Position::new(1, 1),
    );
    let bang = Error::new(
        ErrorImpl::UnrecognisedCharacter {
            character: "!".to_string(),
        },
        Position::new(1, 1),
    );
    let write = Error::unpositioned(ErrorImpl::OutputWrite {
        message: "disk full".to_string(),
    });

    assert_eq!(unknown.get_tip().to_string(), "Unrecognised character `@`");
    assert_eq!(bang.get_tip().to_string(), "`!` is only valid as part of `!=`");
    assert!(matches!(write.get_tip(), ErrorTip::None));
}

#[test]
fn test_tip_escapes_control_characters() {
    let error = Error::new(
        ErrorImpl::UnrecognisedCharacter {
            character: "\r".to_string(),
        },
        Position::new(1, 2),
    );

    assert_eq!(error.get_tip().to_string(), "Unrecognised character `\\r`");
}

#[test]
fn test_open_file_tip() {
    let error = Error::unpositioned(ErrorImpl::OpenFile {
        path: "missing.cm".to_string(),
        message: "No such file or directory".to_string(),
    });

    assert_eq!(error.get_tip().to_string(), "Could not open `missing.cm`");
    assert_eq!(
        error.to_string(),
        "cannot open \"missing.cm\": No such file or directory"
    );
}
