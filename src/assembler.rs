use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use crate::hexdump;

/// Lexes code into tokens.
///
/// Converts a string into tokens. For example, the string `addi $1, $1, 5` would be
/// converted into the following tokens:
///
/// ```text
/// [
///     Token { token: TokenType::Identifier, literal: "addi", .. },
///     Token { token: TokenType::Register, literal: "1", .. },
///     Token { token: TokenType::Comma, literal: ",", .. },
///     Token { token: TokenType::Register, literal: "1", .. },
///     Token { token: TokenType::Comma, literal: ",", .. },
///     Token { token: TokenType::Number, literal: "5", .. },
///     Token { token: TokenType::Eof, literal: "", .. },
/// ]
/// ```
pub mod lexer;

/// Parses tokens into an AST.
pub mod parser;

/// Label table and resolution of label operands.
pub mod symbols;

/// Generates machine code from an AST.
pub mod codegen;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssemblerError {
    #[error("Parser error: {0}")]
    Parse(#[from] parser::ParseError),
    #[error("Code generation error: {0}")]
    CodeGen(#[from] codegen::CodeGenError),
}

/// Utility function for generating machine code from an assembly program.
#[tracing::instrument(skip(input))]
pub fn compile_code(input: &str) -> Result<Vec<u8>, AssemblerError> {
    let mut lexer = lexer::Lexer::new(input);
    let mut parser = parser::Parser::new(&mut lexer)?;
    let ast = parser.parse_program()?;

    let program = codegen::generate(&ast)?;

    Ok(program)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw big-endian machine words
    #[default]
    Binary,
    /// Logisim `v2.0 raw` ROM image
    Logisim,
}

#[derive(Args, Debug)]
pub struct AssemblyArgs {
    #[arg(value_name = "SOURCE")]
    #[arg(help = "Assembly source file")]
    pub input: PathBuf,
    #[arg(short, long, default_value = "a.bin")]
    #[arg(help = "Output file")]
    pub output: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Binary)]
    #[arg(help = "Format of the output file")]
    pub format: OutputFormat,
    #[arg(long)]
    #[arg(help = "Print a hexdump of the assembled program")]
    pub hexdump: bool,
}

/// Assemble a source file and write the program to the output file.
pub fn assemble(args: &AssemblyArgs) -> Result<()> {
    let source = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Unable to read file {}", args.input.display()))?;

    let program = compile_code(&source)
        .with_context(|| format!("Assembly of {} failed", args.input.display()))?;

    match args.format {
        OutputFormat::Binary => std::fs::write(&args.output, &program),
        OutputFormat::Logisim => std::fs::write(&args.output, hexdump::logisim_image(&program)),
    }
    .with_context(|| format!("Unable to write file {}", args.output.display()))?;

    if args.hexdump {
        println!("{}", hexdump::hexdump(&program, 7, 16));
    }
    eprintln!(
        "Wrote {} bytes to {}",
        program.len(),
        args.output.display()
    );

    Ok(())
}
