use std::num::IntErrorKind;

use thiserror::Error;

use crate::{
    assembler::lexer::{Lexer, LexerError, Token, TokenType},
    ast::{Condition, Instruction, Node, Operand, Operation, Register, AST},
};

/// Mnemonic lookup table.
pub mod mnemonic;

use mnemonic::Mnemonic;

/// Smallest accepted numeric literal; negative values are stored as two's complement.
const NUMBER_MIN: i64 = -0x8000;
/// Largest accepted numeric literal
const NUMBER_MAX: i64 = 0xffff;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error("Expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: Token },
    #[error("Unknown mnemonic: {0}")]
    UnknownMnemonic(Token),
    #[error("Unknown register: {0}")]
    UnknownRegister(Token),
    #[error("Invalid number: {0}")]
    InvalidNumber(Token),
    #[error("Number out of range: {0}")]
    NumberOutOfRange(Token),
    #[error("Unsupported directive: {0}")]
    UnsupportedDirective(Token),
}

/// Recursive descent parser producing an [`AST`] from tokens.
///
/// Pseudo-instructions are expanded while parsing and ALU immediates get their narrow or wide
/// form here, so the AST only holds encodable instructions and labels.
pub struct Parser<'a> {
    lexer: &'a mut Lexer,
    current_token: Token,
    peek_token: Token,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: &'a mut Lexer) -> Result<Self, ParseError> {
        let mut parser = Self {
            lexer,
            current_token: Token::default(),
            peek_token: Token::default(),
        };

        // Feed the lexer so its tokens are ready to be consumed
        parser.next_token()?;
        parser.next_token()?;

        Ok(parser)
    }

    fn next_token(&mut self) -> Result<(), ParseError> {
        let next = self.lexer.next_token()?;
        self.current_token = std::mem::replace(&mut self.peek_token, next);
        Ok(())
    }

    fn current_token_is(&self, token_type: TokenType) -> bool {
        self.current_token.token == token_type
    }

    fn peek_token_is(&self, token_type: TokenType) -> bool {
        self.peek_token.token == token_type
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_owned(),
            found: self.current_token.clone(),
        }
    }

    fn parse_register(&self) -> Result<Register, ParseError> {
        if !self.current_token_is(TokenType::Register) {
            return Err(self.unexpected("register"));
        }
        Register::from_name(&self.current_token.literal)
            .ok_or_else(|| ParseError::UnknownRegister(self.current_token.clone()))
    }

    fn expect_register(&mut self) -> Result<Register, ParseError> {
        self.next_token()?;
        self.parse_register()
    }

    fn expect_comma(&mut self) -> Result<(), ParseError> {
        self.next_token()?;
        if !self.current_token_is(TokenType::Comma) {
            return Err(self.unexpected("','"));
        }
        Ok(())
    }

    /// Number, character or label
    fn parse_immediate(&self) -> Result<Operand, ParseError> {
        match self.current_token.token {
            TokenType::Number => Ok(Operand::Value(parse_number(&self.current_token)?)),
            TokenType::Char => {
                let value = self
                    .current_token
                    .literal
                    .chars()
                    .next()
                    .and_then(|ch| u16::try_from(u32::from(ch)).ok())
                    .ok_or_else(|| ParseError::NumberOutOfRange(self.current_token.clone()))?;
                Ok(Operand::Value(value))
            }
            TokenType::Identifier => Ok(Operand::Label(self.current_token.literal.clone())),
            _ => Err(self.unexpected("immediate or label")),
        }
    }

    fn expect_immediate(&mut self) -> Result<Operand, ParseError> {
        self.next_token()?;
        self.parse_immediate()
    }

    /// `$d, $l, $r`
    fn parse_three_registers(&mut self) -> Result<(Register, Register, Register), ParseError> {
        let dest = self.expect_register()?;
        self.expect_comma()?;
        let left = self.expect_register()?;
        self.expect_comma()?;
        let right = self.expect_register()?;
        Ok((dest, left, right))
    }

    fn parse_instruction(&mut self) -> Result<Instruction, ParseError> {
        let mnemonic = mnemonic::lookup(&self.current_token.literal)
            .ok_or_else(|| ParseError::UnknownMnemonic(self.current_token.clone()))?;

        let ins = match mnemonic {
            Mnemonic::Alu(op) => {
                let (dest, left, right) = self.parse_three_registers()?;
                Instruction::Register {
                    op,
                    dest,
                    left,
                    right,
                }
            }
            Mnemonic::AluImmediate(op) => {
                let dest = self.expect_register()?;
                self.expect_comma()?;
                let left = self.expect_register()?;
                self.expect_comma()?;
                let imm = self.expect_immediate()?;
                Instruction::alu_immediate(op, dest, left, imm)
            }
            Mnemonic::Jump(cond) => {
                self.next_token()?;
                if self.current_token_is(TokenType::Register) {
                    Instruction::JumpRegister {
                        cond,
                        reg: self.parse_register()?,
                    }
                } else {
                    Instruction::JumpImmediate {
                        cond,
                        target: self.parse_immediate()?,
                    }
                }
            }
            Mnemonic::Branch(cond) => Instruction::Branch {
                cond,
                target: self.expect_immediate()?,
            },
            Mnemonic::Nop => Instruction::Register {
                op: Operation::Add,
                dest: Register::R0,
                left: Register::R0,
                right: Register::R0,
            },
            Mnemonic::Not => {
                let reg = self.expect_register()?;
                Instruction::Register {
                    op: Operation::Xor,
                    dest: reg,
                    left: reg,
                    right: Register::H,
                }
            }
            Mnemonic::Neg => {
                let reg = self.expect_register()?;
                Instruction::Register {
                    op: Operation::Sub,
                    dest: reg,
                    left: Register::R0,
                    right: reg,
                }
            }
            Mnemonic::Mv => {
                let dest = self.expect_register()?;
                self.expect_comma()?;
                let src = self.expect_register()?;
                Instruction::Register {
                    op: Operation::Add,
                    dest,
                    left: src,
                    right: Register::R0,
                }
            }
            Mnemonic::Ldi => {
                let dest = self.expect_register()?;
                self.expect_comma()?;
                let imm = self.expect_immediate()?;
                Instruction::alu_immediate(Operation::Add, dest, Register::R0, imm)
            }
        };

        Ok(ins)
    }

    /// An instruction must be the last thing on its line.
    fn expect_end_of_statement(&mut self) -> Result<(), ParseError> {
        self.next_token()?;
        if self.current_token_is(TokenType::Eol) || self.current_token_is(TokenType::Eof) {
            Ok(())
        } else {
            Err(self.unexpected("end of line"))
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn parse_program(&mut self) -> Result<AST, ParseError> {
        let mut ast = AST::new();

        while !self.current_token_is(TokenType::Eof) {
            match self.current_token.token {
                TokenType::Eol => (),
                TokenType::Identifier if self.peek_token_is(TokenType::Colon) => {
                    ast.push(Node::Label(self.current_token.literal.clone()));
                    self.next_token()?; // Consume the colon
                }
                TokenType::Identifier => {
                    ast.push(Node::Instruction(self.parse_instruction()?));
                    self.expect_end_of_statement()?;
                }
                TokenType::Dot => {
                    return Err(ParseError::UnsupportedDirective(self.peek_token.clone()))
                }
                TokenType::Keyword => {
                    return Err(ParseError::UnsupportedDirective(self.current_token.clone()))
                }
                _ => return Err(self.unexpected("label or instruction")),
            }
            self.next_token()?;
        }

        Ok(ast)
    }
}

/// Parse a numeric literal.
///
/// `0x` selects hexadecimal, otherwise a trailing `h`, `d`, `o` or `b` selects the base and a
/// bare number is decimal.
fn parse_number(token: &Token) -> Result<u16, ParseError> {
    let literal = token.literal.as_str();
    let (negative, literal) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };

    let (digits, radix) = match literal.strip_prefix("0x") {
        Some(hex) => (hex, 16),
        None => match literal.chars().last() {
            Some('h') => (&literal[..literal.len() - 1], 16),
            Some('d') => (&literal[..literal.len() - 1], 10),
            Some('o') => (&literal[..literal.len() - 1], 8),
            Some('b') => (&literal[..literal.len() - 1], 2),
            _ => (literal, 10),
        },
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ParseError::InvalidNumber(token.clone()));
    }

    let magnitude = i64::from_str_radix(digits, radix).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => ParseError::NumberOutOfRange(token.clone()),
        _ => ParseError::InvalidNumber(token.clone()),
    })?;
    let value = if negative { -magnitude } else { magnitude };

    if !(NUMBER_MIN..=NUMBER_MAX).contains(&value) {
        return Err(ParseError::NumberOutOfRange(token.clone()));
    }

    Ok(value as u16)
}
