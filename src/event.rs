//! Event identifiers — string names and opaque symbolic tokens.
//!
//! An [`EventName`] keys one listener channel. String names compare by
//! value; [`Token`]s compare by identity, so two tokens are never equal
//! unless one is a copy of the other — the Rust counterpart of keying a
//! channel by a `Symbol` rather than a string.

use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// An opaque event identifier equal only to copies of itself.
///
/// Each call to [`Token::new`] (or [`Token::labeled`]) draws a fresh ID
/// from a process-global counter. The optional label is carried for
/// `Debug` output only and plays no part in equality or hashing.
#[derive(Clone, Copy)]
pub struct Token {
    id: u64,
    label: Option<&'static str>,
}

impl Token {
    /// Allocate a new token, distinct from every other token in the process.
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            label: None,
        }
    }

    /// Allocate a new token carrying a diagnostic label.
    ///
    /// Tokens with equal labels are still distinct identifiers.
    pub fn labeled(label: &'static str) -> Self {
        Self {
            label: Some(label),
            ..Self::new()
        }
    }

    /// The diagnostic label, if one was given.
    pub fn label(&self) -> Option<&'static str> {
        self.label
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Token {}

impl std::hash::Hash for Token {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(label) => write!(f, "Token({} \"{label}\")", self.id),
            None => write!(f, "Token({})", self.id),
        }
    }
}

/// The name of an event channel — a string or a [`Token`].
///
/// String names use `Cow<'static, str>` so that the common
/// `&'static str` registration and lookup path never allocates.
/// Every public emitter method takes `impl Into<EventName>`, so plain
/// string literals and tokens can be passed directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventName {
    /// A string-valued name, compared by value.
    Str(Cow<'static, str>),
    /// A symbolic token, compared by identity.
    Token(Token),
}

impl EventName {
    /// The string form of this name, or `None` for a token.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Token(_) => None,
        }
    }

    /// Whether this name is a symbolic token.
    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

impl From<&'static str> for EventName {
    fn from(name: &'static str) -> Self {
        Self::Str(Cow::Borrowed(name))
    }
}

impl From<String> for EventName {
    fn from(name: String) -> Self {
        Self::Str(Cow::Owned(name))
    }
}

impl From<Cow<'static, str>> for EventName {
    fn from(name: Cow<'static, str>) -> Self {
        Self::Str(name)
    }
}

impl From<Token> for EventName {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Token(t) => write!(f, "{t:?}"),
        }
    }
}
