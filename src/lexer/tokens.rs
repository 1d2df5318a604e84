use lazy_static::lazy_static;
use serde::{ser::SerializeStruct, Serialize, Serializer};
use std::{borrow::Cow, collections::HashMap, fmt::Display};

lazy_static! {
    /// Keyword spellings, lowercased. Lookups must lowercase the candidate first.
    pub static ref RESERVED_LOOKUP: HashMap<&'static [u8], TokenKind> = {
        let mut map: HashMap<&'static [u8], TokenKind> = HashMap::new();
        map.insert(b"include", TokenKind::Include);
        map.insert(b"altgr", TokenKind::AltGr);
        map.insert(b"alt", TokenKind::Alt);
        map.insert(b"strings", TokenKind::Strings);
        map.insert(b"string", TokenKind::String);
        map.insert(b"shiftl", TokenKind::ShiftL);
        map.insert(b"shiftr", TokenKind::ShiftR);
        map.insert(b"shift", TokenKind::Shift);
        map.insert(b"keycode", TokenKind::Keycode);
        map.insert(b"charset", TokenKind::Charset);
        map.insert(b"keymaps", TokenKind::Keymaps);
        map.insert(b"plain", TokenKind::Plain);
        map.insert(b"control", TokenKind::Control);
        map.insert(b"ctrll", TokenKind::CtrlL);
        map.insert(b"ctrlr", TokenKind::CtrlR);
        map.insert(b"capsshift", TokenKind::CapsShift);
        map.insert(b"compose", TokenKind::Compose);
        map.insert(b"usual", TokenKind::Usual);
        map.insert(b"for", TokenKind::For);
        map.insert(b"as", TokenKind::As);
        map.insert(b"on", TokenKind::On);
        map.insert(b"to", TokenKind::To);
        map
    };
}

/// Length of the longest spelling in `RESERVED_LOOKUP` (`capsshift`).
pub const LONGEST_KEYWORD: usize = 9;

/// Octets that, when they follow a complete keyword, extend it into a
/// longer word (`alt` -> `altgr` or `alt_is_meta`, `string` -> `strings`,
/// `shift` -> `shiftl`).
pub fn longer_keyword_octets(kind: TokenKind) -> &'static [u8] {
    match kind {
        TokenKind::Alt => b"gG-_",
        TokenKind::String => b"sS",
        TokenKind::Shift => b"rRlL",
        _ => b"",
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    Unknown,
    Space,
    NewLine,
    Comment,
    Equals,
    Dash,
    Comma,
    Plus,
    Char,
    Number,
    Unicode,
    Literal,

    // Reserved, never produced
    Escaped,
    Quote,
    Strval,

    AltIsMeta,

    // Keywords
    Strings,
    String,
    Charset,
    Keymaps,
    Keycode,
    Plain,
    CapsShift,
    Compose,
    Control,
    CtrlL,
    CtrlR,
    AltGr,
    Alt,
    ShiftL,
    ShiftR,
    Shift,
    Usual,
    For,
    As,
    On,
    To,
    Include,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A leaf of the keymap source: a classified run of octets.
///
/// For strings `value` holds the decoded content, for char literals the
/// digits without the leading backslash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Vec<u8>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut leaf = serializer.serialize_struct("Leaf", 3)?;
        leaf.serialize_field("Type", "Leaf")?;
        leaf.serialize_field("Kind", &self.kind)?;
        leaf.serialize_field("Data", &self.text())?;
        leaf.end()
    }
}

impl Token {
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }

    /// Renders the `{"Type":"Leaf","Kind":..,"Data":..}` debug record.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// True when the token is a keyword spelling rather than a decoded
    /// value. A quoted string shares `TokenKind::String` with the
    /// `string` keyword and is only a keyword if its text spells one.
    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP
            .get(self.value.to_ascii_lowercase().as_slice())
            .is_some_and(|kind| *kind == self.kind)
    }
}
