pub mod source_position;
pub mod token;

use thiserror::Error;

use source_position::{SourcePosition, SourcePositionSpan};
pub use token::{Token, TokenType};

// Example code:
//
//     ldi $1, 0          ; comments start with ';', '#', '!' or '//'
// loop:
//     addi $1, $1, 1     /* block comments may
//                           span lines */
//     subi $2, $1, 10
//     bnz loop

/// Words reserved for data declarations.
const KEYWORDS: [&str; 6] = ["declare", "byte", "bytes", "word", "words", "base"];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LexerError {
    #[error("Unexpected character '{0}' at {1}")]
    UnexpectedCharacter(char, SourcePosition),
    #[error("Unterminated block comment starting at {0}")]
    UnterminatedComment(SourcePosition),
    #[error("Unterminated string starting at {0}")]
    UnterminatedString(SourcePosition),
    #[error("Unterminated character literal at {0}")]
    UnterminatedChar(SourcePosition),
    #[error("Unknown escape sequence '\\{0}' at {1}")]
    UnknownEscape(char, SourcePosition),
}

/// Lexes code into tokens.
///
/// Newlines are significant and produce [`TokenType::Eol`] tokens, every other run of
/// whitespace is skipped.
#[derive(Debug)]
pub struct Lexer {
    /// Input source code
    input: Vec<char>,
    /// Index of the current char
    position: usize,
    /// Current char under examination
    ch: Option<char>,
    /// Line and column of the current char
    source_position: SourcePosition,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        let ch = input.first().copied();
        Self {
            input,
            position: 0,
            ch,
            source_position: SourcePosition::default(),
        }
    }

    fn read_char(&mut self) {
        match self.ch {
            Some('\n') => self.source_position.increment_line(),
            Some(_) => self.source_position.increment_column(),
            None => return,
        }
        self.position += 1;
        self.ch = self.input.get(self.position).copied();
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.ch {
            if ch == '\n' || !ch.is_whitespace() {
                break;
            }
            self.read_char();
        }
    }

    /// Skip to the end of the line, leaving the newline for the next token.
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.ch {
            if ch == '\n' {
                break;
            }
            self.read_char();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexerError> {
        let start = self.source_position;
        // '/*'
        self.read_char();
        self.read_char();
        loop {
            match (self.ch, self.peek_char()) {
                (Some('*'), Some('/')) => {
                    self.read_char();
                    self.read_char();
                    return Ok(());
                }
                (Some(_), _) => self.read_char(),
                (None, _) => return Err(LexerError::UnterminatedComment(start)),
            }
        }
    }

    fn read_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let start = self.position;
        while let Some(ch) = self.ch {
            if !predicate(ch) {
                break;
            }
            self.read_char();
        }
        self.input[start..self.position].iter().collect()
    }

    /// Read the char after a backslash.
    fn read_escape(&mut self) -> Result<char, LexerError> {
        let position = self.source_position;
        let escaped = match self.ch {
            Some('a') => '\x07',
            Some('b') => '\x08',
            Some('f') => '\x0c',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('v') => '\x0b',
            Some('0') => '\0',
            Some(ch @ ('\\' | '\'' | '"')) => ch,
            Some(ch) => return Err(LexerError::UnknownEscape(ch, position)),
            None => return Err(LexerError::UnterminatedChar(position)),
        };
        self.read_char();
        Ok(escaped)
    }

    fn read_char_literal(&mut self, start: SourcePosition) -> Result<String, LexerError> {
        // Opening quote
        self.read_char();
        let value = match self.ch {
            Some('\\') => {
                self.read_char();
                self.read_escape()?
            }
            Some(ch) if ch != '\n' && ch != '\'' => {
                self.read_char();
                ch
            }
            _ => return Err(LexerError::UnterminatedChar(start)),
        };
        if self.ch != Some('\'') {
            return Err(LexerError::UnterminatedChar(start));
        }
        self.read_char();
        Ok(value.to_string())
    }

    fn read_string(&mut self, start: SourcePosition) -> Result<String, LexerError> {
        // Opening quote
        self.read_char();
        let mut string = String::new();
        loop {
            match self.ch {
                Some('"') => {
                    self.read_char();
                    return Ok(string);
                }
                Some('\\') => {
                    self.read_char();
                    string.push(self.read_escape()?);
                }
                Some('\n') | None => return Err(LexerError::UnterminatedString(start)),
                Some(ch) => {
                    string.push(ch);
                    self.read_char();
                }
            }
        }
    }

    fn single(&mut self, token: TokenType) -> (TokenType, String) {
        let literal = self.ch.map(String::from).unwrap_or_default();
        self.read_char();
        (token, literal)
    }

    /// Lex the next token.
    ///
    /// Once the input is exhausted every call returns an [`TokenType::Eof`] token.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace();

        let start = self.source_position;
        let (token, literal) = match self.ch {
            None => (TokenType::Eof, String::new()),
            Some(ch) => match ch {
                ';' | '#' | '!' => {
                    self.skip_line_comment();
                    return self.next_token();
                }
                '/' if self.peek_char() == Some('/') => {
                    self.skip_line_comment();
                    return self.next_token();
                }
                '/' if self.peek_char() == Some('*') => {
                    self.skip_block_comment()?;
                    return self.next_token();
                }
                '\n' => self.single(TokenType::Eol),
                ',' => self.single(TokenType::Comma),
                '.' => self.single(TokenType::Dot),
                ':' => self.single(TokenType::Colon),
                '$' => {
                    self.read_char();
                    (
                        TokenType::Register,
                        self.read_while(|c| c.is_ascii_alphanumeric()),
                    )
                }
                '\'' => (TokenType::Char, self.read_char_literal(start)?),
                '"' => (TokenType::String, self.read_string(start)?),
                '-' if self.peek_char().is_some_and(|c| c.is_ascii_digit()) => {
                    self.read_char();
                    let digits = self.read_while(|c| c.is_ascii_alphanumeric());
                    (TokenType::Number, format!("-{}", digits))
                }
                '0'..='9' => (
                    TokenType::Number,
                    self.read_while(|c| c.is_ascii_alphanumeric()),
                ),
                'A'..='Z' | 'a'..='z' | '_' => {
                    let identifier = self.read_while(|c| c.is_ascii_alphanumeric() || c == '_');
                    if KEYWORDS.contains(&identifier.to_lowercase().as_str()) {
                        (TokenType::Keyword, identifier)
                    } else {
                        (TokenType::Identifier, identifier)
                    }
                }
                _ => return Err(LexerError::UnexpectedCharacter(ch, start)),
            },
        };

        Ok(Token::new(
            token,
            &literal,
            SourcePositionSpan::new(start, self.source_position),
        ))
    }
}
