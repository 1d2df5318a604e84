//! Utility macros for the tokenizer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_ERROR!` - Creates a positioned lexer error from the lexer's state

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's octets
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, b"42".to_vec());
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr) => {
        Token {
            kind: $kind,
            value: $value,
        }
    };
}

/// Creates an error carrying the lexer's current mode, buffer and offset.
///
/// # Arguments
///
/// * `$lexer` - The Lexer the error occurred in
/// * `$variant` - The ErrorImpl variant name; `mode` and `text` are filled in
///
/// # Example
///
/// ```ignore
/// return Err(MK_ERROR!(self, Syntax));
/// ```
#[macro_export]
macro_rules! MK_ERROR {
    ($lexer:expr, $variant:ident) => {
        $crate::errors::errors::Error::new(
            $crate::errors::errors::ErrorImpl::$variant {
                mode: $lexer.mode,
                text: String::from_utf8_lossy(&$lexer.buf).into_owned(),
            },
            $crate::Position($lexer.input.offset(), std::sync::Arc::clone(&$lexer.file)),
        )
    };
}
