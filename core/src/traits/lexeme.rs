use core::fmt;

/// Identifier of a lexical token type.
///
/// Token types are assigned by the lexer collaborator; the engine only ever
/// compares them for equality against the type an element expects.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenType(pub u32);

impl From<u32> for TokenType {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A lexed token as seen by the matcher.
///
/// The engine treats tokens as opaque apart from their type. Tokens are cloned
/// into [`ParseNode`](crate::ParseNode)s so the presentation layer can render
/// what was actually matched.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone)]
/// struct SqlToken {
///     kind: SqlKind,
///     slice: String,
/// }
///
/// impl Lexeme for SqlToken {
///     fn token_type(&self) -> TokenType {
///         TokenType(self.kind as u32)
///     }
///
///     fn text(&self) -> &str {
///         &self.slice
///     }
/// }
/// ```
pub trait Lexeme: Clone {
    /// The type identifier compared against element expectations.
    fn token_type(&self) -> TokenType;

    /// Source text of the token.
    fn text(&self) -> &str;
}

/// Owned token for callers without a token type of their own.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub token_type: TokenType,
    pub text: String,
}

impl Token {
    #[inline]
    pub fn new(token_type: impl Into<TokenType>, text: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            text: text.into(),
        }
    }
}

impl Lexeme for Token {
    #[inline]
    fn token_type(&self) -> TokenType {
        self.token_type
    }

    #[inline]
    fn text(&self) -> &str {
        &self.text
    }
}
