use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// An error with no meaningful source position, such as a failed open.
    pub fn unpositioned(error_impl: ErrorImpl) -> Self {
        Error::new(error_impl, Position::null())
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::SourceRead { .. } => "SourceRead",
            ErrorImpl::OutputWrite { .. } => "OutputWrite",
            ErrorImpl::OpenFile { .. } => "OpenFile",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { character } if character == "!" => {
                ErrorTip::Suggestion(String::from("`!` is only valid as part of `!=`"))
            }
            ErrorImpl::UnrecognisedCharacter { character } => {
                // Non-ASCII bytes arrive already escaped as `\xNN`.
                let shown = if character.chars().count() == 1 {
                    character.escape_debug().to_string()
                } else {
                    character.clone()
                };
                ErrorTip::Suggestion(format!("Unrecognised character `{}`", shown))
            }
            ErrorImpl::SourceRead { message } => {
                ErrorTip::Suggestion(format!("Input ended early: {}", message))
            }
            ErrorImpl::OutputWrite { .. } => ErrorTip::None,
            ErrorImpl::OpenFile { path, .. } => {
                ErrorTip::Suggestion(format!("Could not open `{}`", path))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.position.is_null() {
            write!(f, "{}", self.internal_error)
        } else {
            write!(f, "{} at {}", self.internal_error, self.position)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unrecognised character: {character:?}")]
    UnrecognisedCharacter { character: String },
    #[error("error reading source: {message}")]
    SourceRead { message: String },
    #[error("error writing output: {message}")]
    OutputWrite { message: String },
    #[error("cannot open {path:?}: {message}")]
    OpenFile { path: String, message: String },
}
