use serde::{Deserialize, Serialize};

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Literal text of the token (string contents without the quotes)
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }
}

/// All possible token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Literals
    /// Run of decimal digits
    Number,
    /// Double-quoted string
    String,

    // Delimiters
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,

    // Operators
    /// Plus operator (+)
    Plus,
    /// Minus operator (-)
    Minus,
    /// Star operator (*)
    Star,
    /// Slash operator (/)
    Slash,
    /// Remainder keyword (re)
    Remainder,

    // Keywords
    /// IF keyword
    If,
    /// DEFUNC keyword
    Defunc,

    /// Function or parameter name
    Identifier,
}

impl TokenKind {
    /// Reserved word lookup for a completed identifier run
    pub fn keyword(s: &str) -> Option<TokenKind> {
        match s {
            "if" => Some(TokenKind::If),
            "defunc" => Some(TokenKind::Defunc),
            "re" => Some(TokenKind::Remainder),
            _ => None,
        }
    }

    /// Check if token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::If | TokenKind::Defunc | TokenKind::Remainder)
    }

    /// Check if token is an arithmetic operator (including `re`)
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Remainder
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let text = match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Remainder => "'re'",
            TokenKind::If => "'if'",
            TokenKind::Defunc => "'defunc'",
            TokenKind::Identifier => "identifier",
        };
        write!(f, "{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_detection() {
        assert_eq!(TokenKind::keyword("if"), Some(TokenKind::If));
        assert_eq!(TokenKind::keyword("defunc"), Some(TokenKind::Defunc));
        assert_eq!(TokenKind::keyword("re"), Some(TokenKind::Remainder));
        assert_eq!(TokenKind::keyword("iff"), None);
        assert_eq!(TokenKind::keyword("If"), None);
    }

    #[test]
    fn test_is_keyword() {
        assert!(TokenKind::If.is_keyword());
        assert!(TokenKind::Remainder.is_keyword());
        assert!(!TokenKind::Plus.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());
        assert!(TokenKind::Remainder.is_operator());
        assert!(!TokenKind::If.is_operator());
    }
}
