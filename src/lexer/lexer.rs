use std::{fmt::Display, io::{self, Read}, sync::Arc};

use lazy_static::lazy_static;
use regex::bytes::Regex;
use tracing::{debug, trace};

use crate::{errors::errors::{Error, ErrorImpl}, Position, MK_ERROR, MK_TOKEN};

use super::{
    stream::ByteStream,
    tokens::{longer_keyword_octets, Token, TokenKind, LONGEST_KEYWORD, RESERVED_LOOKUP},
};

/// Decoded strings must stay strictly shorter than this.
pub const MAX_STRING: usize = 512;

const UNICODE_LEN: usize = "U+XXXX".len();
const ALT_IS_META_LEN: usize = "alt_is_meta".len();

lazy_static! {
    static ref ALT_IS_META: Regex = Regex::new("(?i)^alt[-_]is[-_]meta$").unwrap();
    static ref HEX: Regex = Regex::new("^0[xX][0-9a-fA-F]+$").unwrap();
    static ref UNICODE: Regex = Regex::new(r"^U\+[0-9a-fA-F]{4}$").unwrap();
    static ref LITERAL: Regex = Regex::new("^[a-zA-Z][a-zA-Z_0-9]*$").unwrap();
}

/// Interpretation context for the rest of the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexerMode {
    #[default]
    Normal,
    /// Right-hand side of `=`, `string` or `to`: no keywords, bare words are literals.
    Value,
    /// After `include`; scans like Normal.
    Include,
}

impl Display for LexerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OctetClass {
    Blank,
    CommentStart,
    Dash,
    Plus,
    Comma,
    NewLine,
    Equals,
    Quote,
    Digit,
    Backslash,
    Other,
}

fn classify(c: u8) -> OctetClass {
    match c {
        b' ' | b'\t' | b'\r' => OctetClass::Blank,
        b'#' | b'!' => OctetClass::CommentStart,
        b'-' => OctetClass::Dash,
        b'+' => OctetClass::Plus,
        b',' => OctetClass::Comma,
        b'\n' => OctetClass::NewLine,
        b'=' => OctetClass::Equals,
        b'"' => OctetClass::Quote,
        b'0'..=b'9' => OctetClass::Digit,
        b'\\' => OctetClass::Backslash,
        _ => OctetClass::Other,
    }
}

fn is_blank(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r')
}

fn is_spacing(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_octal(c: u8) -> bool {
    matches!(c, b'0'..=b'7')
}

/// Outcome of one accumulation step.
enum Step {
    Emit(Token),
    More,
}

pub struct Lexer<R> {
    input: ByteStream<R>,
    mode: LexerMode,
    buf: Vec<u8>,
    file: Arc<String>,
    /// The buffer is a hex numeral whose next octet was a hex digit.
    hex_run: bool,
    done: bool,
}

impl<R: Read> Lexer<R> {
    pub fn new(reader: R, file: Option<String>) -> Lexer<R> {
        let file_name = if let Some(file) = file {
            Arc::new(file)
        } else {
            Arc::new(String::from("<stdin>"))
        };

        Lexer {
            input: ByteStream::new(reader),
            mode: LexerMode::Normal,
            buf: vec![],
            file: file_name,
            hex_run: false,
            done: false,
        }
    }

    /// Produces the next token, `Ok(None)` once the input is exhausted.
    pub fn get(&mut self) -> Result<Option<Token>, Error> {
        loop {
            let Some(c) = self.read()? else {
                return self.finish();
            };
            self.buf.push(c);

            let step = if self.buf.len() > 1 {
                self.scan_run()?
            } else {
                self.scan_octet(c)?
            };

            if let Step::Emit(token) = step {
                trace!(kind = %token.kind, text = %token.text(), "token");
                return Ok(Some(token));
            }
        }
    }

    fn set_mode(&mut self, mode: LexerMode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "lexer mode");
        }
        self.mode = mode;
    }

    fn read(&mut self) -> Result<Option<u8>, Error> {
        match self.input.read() {
            Ok(c) => Ok(c),
            Err(e) => Err(self.stream_error(e)),
        }
    }

    fn peek(&mut self) -> Result<Option<u8>, Error> {
        match self.input.peek() {
            Ok(c) => Ok(c),
            Err(e) => Err(self.stream_error(e)),
        }
    }

    /// Moves the last buffered octet back to the stream.
    fn unread(&mut self) {
        if let Some(c) = self.buf.pop() {
            self.input.unread(c);
        }
    }

    fn stream_error(&self, e: io::Error) -> Error {
        Error::new(
            ErrorImpl::Stream {
                kind: e.kind(),
                message: e.to_string(),
                mode: self.mode,
                text: String::from_utf8_lossy(&self.buf).into_owned(),
            },
            Position(self.input.offset(), Arc::clone(&self.file)),
        )
    }

    fn emit(&mut self, kind: TokenKind) -> Step {
        self.hex_run = false;
        Step::Emit(MK_TOKEN!(kind, std::mem::take(&mut self.buf)))
    }

    /// True if the next octet is one of `octets`. End of input never is.
    fn next_is(&mut self, octets: &[u8]) -> Result<bool, Error> {
        Ok(self.peek()?.is_some_and(|c| octets.contains(&c)))
    }

    /// Rules for a buffer of two or more octets, in precedence order.
    ///
    /// Every rule is gated on the buffer length or on state carried from the
    /// previous octet, so an unrecognised run costs constant work per octet.
    fn scan_run(&mut self) -> Result<Step, Error> {
        if self.buf.ends_with(b"\\\n") {
            self.buf.truncate(self.buf.len() - 2);
            self.hex_run = false;
            return Ok(Step::More);
        }

        if self.buf.len() == UNICODE_LEN && UNICODE.is_match(&self.buf) {
            return Ok(self.emit(TokenKind::Unicode));
        }

        // "0x" plus one digit is the shortest numeral; after that the run
        // only grows by octets already peeked as hex digits.
        if self.hex_run || (self.buf.len() == 3 && HEX.is_match(&self.buf)) {
            if self.peek()?.is_some_and(|c| c.is_ascii_hexdigit()) {
                self.hex_run = true;
                return Ok(Step::More);
            }
            return Ok(self.emit(TokenKind::Number));
        }

        if self.mode == LexerMode::Value {
            return self.scan_value();
        }

        if let Some(kind) = self.keyword()? {
            return Ok(self.emit(kind));
        }

        if self.buf.len() == ALT_IS_META_LEN && ALT_IS_META.is_match(&self.buf) {
            return Ok(self.emit(TokenKind::AltIsMeta));
        }

        Ok(Step::More)
    }

    /// Value mode: spacing closes a literal.
    fn scan_value(&mut self) -> Result<Step, Error> {
        if !self.buf.last().is_some_and(|c| is_spacing(*c)) {
            return Ok(Step::More);
        }

        self.unread();
        if LITERAL.is_match(&self.buf) {
            return Ok(self.emit(TokenKind::Literal));
        }
        Err(MK_ERROR!(self, UnexpectedSpacing))
    }

    fn keyword(&mut self) -> Result<Option<TokenKind>, Error> {
        if self.buf.len() > LONGEST_KEYWORD {
            return Ok(None);
        }

        let mut lowered = [0u8; LONGEST_KEYWORD];
        let lowered = &mut lowered[..self.buf.len()];
        lowered.copy_from_slice(&self.buf);
        lowered.make_ascii_lowercase();

        let Some(&kind) = RESERVED_LOOKUP.get(&*lowered) else {
            return Ok(None);
        };

        let longer = longer_keyword_octets(kind);
        if !longer.is_empty() && self.next_is(longer)? {
            return Ok(None);
        }

        match kind {
            TokenKind::Control if self.mode == LexerMode::Value => return Ok(None),
            TokenKind::String | TokenKind::To => self.set_mode(LexerMode::Value),
            TokenKind::Include => self.set_mode(LexerMode::Include),
            _ => {}
        }
        Ok(Some(kind))
    }

    /// Rules for the first octet of a token.
    fn scan_octet(&mut self, c: u8) -> Result<Step, Error> {
        match classify(c) {
            OctetClass::Blank => self.consume_while(is_blank, TokenKind::Space),
            OctetClass::CommentStart => self.consume_while(|c: u8| c != b'\n', TokenKind::Comment),
            OctetClass::Dash => Ok(self.emit(TokenKind::Dash)),
            OctetClass::Plus => Ok(self.emit(TokenKind::Plus)),
            OctetClass::Comma => Ok(self.emit(TokenKind::Comma)),
            OctetClass::NewLine => {
                self.set_mode(LexerMode::Normal);
                Ok(self.emit(TokenKind::NewLine))
            }
            OctetClass::Equals => {
                self.set_mode(LexerMode::Value);
                Ok(self.emit(TokenKind::Equals))
            }
            OctetClass::Quote => {
                self.set_mode(LexerMode::Normal);
                self.scan_string()
            }
            OctetClass::Digit => {
                if c == b'0' && self.next_is(b"xX")? {
                    return Ok(Step::More);
                }
                self.consume_while(|c: u8| c.is_ascii_digit(), TokenKind::Number)
            }
            OctetClass::Backslash => self.scan_char(),
            OctetClass::Other => Ok(Step::More),
        }
    }

    fn consume_while(&mut self, f: fn(u8) -> bool, kind: TokenKind) -> Result<Step, Error> {
        while let Some(c) = self.read()? {
            if !f(c) {
                self.input.unread(c);
                break;
            }
            self.buf.push(c);
        }
        Ok(self.emit(kind))
    }

    /// Decodes a quoted string. `\n` becomes a newline, any other escaped
    /// octet stands for itself.
    fn scan_string(&mut self) -> Result<Step, Error> {
        self.buf.clear();

        loop {
            let c = match self.read()? {
                Some(b'"') => break,
                Some(b'\\') => match self.read()? {
                    Some(b'n') => b'\n',
                    Some(escaped) => escaped,
                    None => return Err(MK_ERROR!(self, UnterminatedString)),
                },
                Some(c) => c,
                None => return Err(MK_ERROR!(self, UnterminatedString)),
            };

            self.buf.push(c);
            if self.buf.len() >= MAX_STRING {
                return Err(MK_ERROR!(self, StringTooLong));
            }
        }

        Ok(self.emit(TokenKind::String))
    }

    /// Decodes `\nnn`: up to three octal digits, or any single octet that
    /// does not start an octal run.
    fn scan_char(&mut self) -> Result<Step, Error> {
        if self.next_is(b"\n")? {
            self.read()?;
            self.buf.clear();
            return Ok(Step::More);
        }

        self.buf.clear();
        let Some(first) = self.read()? else {
            return Err(MK_ERROR!(self, UnterminatedChar));
        };
        self.buf.push(first);

        if is_octal(first) {
            while self.buf.len() < 3 {
                let Some(c) = self.read()? else {
                    return Err(MK_ERROR!(self, UnterminatedChar));
                };
                if !is_octal(c) {
                    self.input.unread(c);
                    break;
                }
                self.buf.push(c);
            }
        }

        Ok(self.emit(TokenKind::Char))
    }

    /// End of input: an empty buffer ends the stream, a Value-mode word is
    /// closed as a literal, anything else was never recognised.
    fn finish(&mut self) -> Result<Option<Token>, Error> {
        if self.buf.is_empty() {
            debug!(file = %self.file, offset = self.input.offset(), "end of input");
            return Ok(None);
        }

        if self.mode == LexerMode::Value && LITERAL.is_match(&self.buf) {
            let token = MK_TOKEN!(TokenKind::Literal, std::mem::take(&mut self.buf));
            trace!(kind = %token.kind, text = %token.text(), "token");
            return Ok(Some(token));
        }

        Err(MK_ERROR!(self, Syntax))
    }
}

impl<R: Read> Iterator for Lexer<R> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.get() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

pub fn tokenize<R: Read>(source: R, file: Option<String>) -> Result<Vec<Token>, Error> {
    Lexer::new(source, file).collect()
}
