//! Selector token types.
//!
//! A reduced set of the [CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/#tokenization)
//! tokens: everything the selector compiler reacts to, plus the few kinds it
//! has to recognise in order to skip them.

use core::fmt;

/// A selector token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// One or more whitespace code points. Acts as the descendant combinator.
    Whitespace,

    /// A single punctuation code point: `>`, `[`, `]`, `*`, `=`, `~`, `^`, ...
    Delim(char),

    /// A bare word: `rect`, `fill`, `data-role`.
    Ident(String),

    /// `#` followed by an ident sequence. The value excludes the `#`.
    Hash(String),

    /// A quoted string. The value excludes both quotes and has escapes resolved.
    String(String),

    /// A string interrupted by a raw newline.
    BadString,

    /// A numeric literal, kept as written (`12`, `-0.5`, `10px`, `50%`).
    Number(String),

    /// An ident immediately followed by `(`: `nth-child(`.
    Function(String),

    /// End of input.
    EOF,
}

impl Token {
    /// Build an [`Token::Ident`].
    #[must_use]
    pub fn ident(value: impl Into<String>) -> Self {
        Self::Ident(value.into())
    }

    /// Build a [`Token::Hash`] from the name without its `#`.
    #[must_use]
    pub fn hash(value: impl Into<String>) -> Self {
        Self::Hash(value.into())
    }

    /// Build a [`Token::String`] from the unquoted payload.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Whether this token ends the stream.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EOF)
    }
}

/// Renders the token back as selector source text. Whitespace runs come out
/// as a single space and strings are re-quoted with `"`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whitespace => f.write_str(" "),
            Self::Delim(c) => write!(f, "{c}"),
            Self::Ident(name) | Self::Number(name) => f.write_str(name),
            Self::Hash(name) => write!(f, "#{name}"),
            Self::String(text) => write!(f, "{text:?}"),
            Self::BadString => f.write_str("\"\n"),
            Self::Function(name) => write!(f, "{name}("),
            Self::EOF => Ok(()),
        }
    }
}
