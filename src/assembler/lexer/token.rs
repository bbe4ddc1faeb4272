use std::fmt;

use super::source_position::SourcePositionSpan;

/// TokenType defines the types of tokens that are found in source code.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum TokenType {
    /// Mnemonic or label name.
    ///
    /// Anything that starts with a letter or underscore and is not a keyword.
    Identifier,
    /// `$` followed by the register name, e.g. `$3` or `$H`. The literal excludes the `$`.
    Register,
    /// Numeric literal as written, e.g. `-5`, `0x1f` or `101b`
    Number,
    /// Character literal, the literal holds the unescaped character
    Char,
    /// String literal without the quotes
    ///
    /// Only data directives take strings and those are rejected by the parser, so a string
    /// never reaches an instruction.
    String,
    /// Reserved data keyword, e.g. `declare` or `word`
    Keyword,
    /// `,`
    Comma,
    /// `.` Directive prefix
    Dot,
    /// `:` Label suffix
    Colon,
    /// End of a line
    Eol,
    /// Eof marks the end of file
    #[default]
    Eof,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            TokenType::Identifier => "identifier",
            TokenType::Register => "register",
            TokenType::Number => "number",
            TokenType::Char => "character",
            TokenType::String => "string",
            TokenType::Keyword => "keyword",
            TokenType::Comma => "','",
            TokenType::Dot => "'.'",
            TokenType::Colon => "':'",
            TokenType::Eol => "end of line",
            TokenType::Eof => "end of file",
        };
        write!(f, "{}", description)
    }
}

/// Token is a lexical unit of source code.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Token {
    /// Type of Token
    pub token: TokenType,
    /// Literal string of token, e.g. `"addi"`, `"0x10"`, `"3"` etc.
    pub literal: String,
    /// Where in the file the token is found
    pub span: SourcePositionSpan,
}

impl Token {
    pub fn new(token: TokenType, literal: &str, span: SourcePositionSpan) -> Self {
        Self {
            token,
            literal: literal.to_owned(),
            span,
        }
    }

    fn literal_str(&self) -> String {
        match self.token {
            TokenType::Register => format!("${}", self.literal),
            TokenType::Char => format!("'{}'", self.literal.escape_default()),
            TokenType::String => format!("\"{}\"", self.literal),
            TokenType::Comma => ",".to_owned(),
            TokenType::Dot => ".".to_owned(),
            TokenType::Colon => ":".to_owned(),
            TokenType::Eol => "<eol>".to_owned(),
            TokenType::Eof => "<eof>".to_owned(),
            TokenType::Identifier | TokenType::Number | TokenType::Keyword => {
                self.literal.to_owned()
            }
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at {}", self.token, self.literal_str(), self.span)
    }
}
