use std::{fmt::Display, io};

use thiserror::Error;

use crate::{lexer::lexer::LexerMode, Position};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{internal_error}")]
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

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_mode(&self) -> LexerMode {
        match &self.internal_error {
            ErrorImpl::Stream { mode, .. }
            | ErrorImpl::StringTooLong { mode, .. }
            | ErrorImpl::UnexpectedSpacing { mode, .. }
            | ErrorImpl::UnterminatedString { mode, .. }
            | ErrorImpl::UnterminatedChar { mode, .. }
            | ErrorImpl::Syntax { mode, .. } => *mode,
        }
    }

    /// The buffered text the lexer was holding when it failed.
    pub fn get_text(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::Stream { text, .. }
            | ErrorImpl::StringTooLong { text, .. }
            | ErrorImpl::UnexpectedSpacing { text, .. }
            | ErrorImpl::UnterminatedString { text, .. }
            | ErrorImpl::UnterminatedChar { text, .. }
            | ErrorImpl::Syntax { text, .. } => text,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::Stream { .. } => "StreamError",
            ErrorImpl::StringTooLong { .. } => "StringTooLong",
            ErrorImpl::UnexpectedSpacing { .. } => "UnexpectedSpacing",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnterminatedChar { .. } => "UnterminatedChar",
            ErrorImpl::Syntax { .. } => "SyntaxError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::Stream { message, .. } => {
                ErrorTip::Suggestion(format!("Failed to read input: {}", message))
            }
            ErrorImpl::StringTooLong { .. } => ErrorTip::Suggestion(format!(
                "Strings must be shorter than {} characters",
                crate::lexer::lexer::MAX_STRING
            )),
            ErrorImpl::UnexpectedSpacing { text, .. } => ErrorTip::Suggestion(format!(
                "`{}` is not a valid value, values start with a letter and contain only letters, digits and `_`",
                text
            )),
            ErrorImpl::UnterminatedString { .. } => {
                ErrorTip::Suggestion(String::from("Missing closing `\"`"))
            }
            ErrorImpl::UnterminatedChar { .. } => ErrorTip::Suggestion(String::from(
                "Character literals are a backslash followed by up to three octal digits",
            )),
            ErrorImpl::Syntax { .. } => ErrorTip::None,
        }
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
    #[error("state={mode}: read error ({kind:?}): {message} after {text:?}")]
    Stream {
        kind: io::ErrorKind,
        message: String,
        mode: LexerMode,
        text: String,
    },
    #[error("state={mode}: string too long: {text:?}")]
    StringTooLong { mode: LexerMode, text: String },
    #[error("state={mode}: unexpected spacing: <{text}>")]
    UnexpectedSpacing { mode: LexerMode, text: String },
    #[error("state={mode}: unterminated string: {text:?}")]
    UnterminatedString { mode: LexerMode, text: String },
    #[error("state={mode}: unterminated character literal: {text:?}")]
    UnterminatedChar { mode: LexerMode, text: String },
    #[error("state={mode}: {text:?}")]
    Syntax { mode: LexerMode, text: String },
}
