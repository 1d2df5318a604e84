//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::lexer::LexerMode;
use crate::Position;
use std::{io::ErrorKind, sync::Arc};

fn at(offset: u32) -> Position {
    Position(offset, Arc::new("test.map".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::Syntax {
            mode: LexerMode::Normal,
            text: "@".to_string(),
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "SyntaxError");
    assert_eq!(error.get_position().0, 10);
}

#[test]
fn test_error_carries_mode_and_text() {
    let error = Error::new(
        ErrorImpl::UnexpectedSpacing {
            mode: LexerMode::Value,
            text: "9a".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_mode(), LexerMode::Value);
    assert_eq!(error.get_text(), "9a");
    assert_eq!(error.to_string(), "state=Value: unexpected spacing: <9a>");
}

#[test]
fn test_string_too_long_error() {
    let error = Error::new(
        ErrorImpl::StringTooLong {
            mode: LexerMode::Normal,
            text: "x".repeat(512),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "StringTooLong");
    assert!(error.to_string().starts_with("state=Normal: string too long"));
}

#[test]
fn test_stream_error() {
    let error = Error::new(
        ErrorImpl::Stream {
            kind: ErrorKind::UnexpectedEof,
            message: "closed".to_string(),
            mode: LexerMode::Include,
            text: "inc".to_string(),
        },
        at(3),
    );

    assert_eq!(error.get_error_name(), "StreamError");
    assert_eq!(error.get_mode(), LexerMode::Include);
    assert_eq!(error.get_text(), "inc");
    assert!(error.to_string().contains("closed"));
}

#[test]
fn test_unterminated_errors() {
    let string = Error::new(
        ErrorImpl::UnterminatedString {
            mode: LexerMode::Normal,
            text: "abc".to_string(),
        },
        at(4),
    );
    let literal = Error::new(
        ErrorImpl::UnterminatedChar {
            mode: LexerMode::Value,
            text: "12".to_string(),
        },
        at(3),
    );

    assert_eq!(string.get_error_name(), "UnterminatedString");
    assert_eq!(literal.get_error_name(), "UnterminatedChar");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::Syntax {
            mode: LexerMode::Normal,
            text: "@".to_string(),
        },
        at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnterminatedString {
            mode: LexerMode::Normal,
            text: "abc".to_string(),
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains('"')),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
