use thiserror::Error;

use crate::{
    assembler::symbols::{resolve_instruction, resolve_symbols, SymbolError, SymbolTable},
    ast::{self, Instruction, AST},
    codec::{self, CodecError},
};

/// Largest program that fits the 16-bit address space.
pub const MAX_PROGRAM_SIZE: usize = 0x10000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodeGenError {
    #[error(transparent)]
    Symbol(#[from] SymbolError),
    #[error("Failed to encode '{instruction}' at {offset:#06x}: {source}")]
    Encoding {
        offset: usize,
        instruction: Instruction,
        source: CodecError,
    },
    #[error("Program too large")]
    ProgramOverflow,
}

/// Generate machine code from a sequence of instructions.
///
/// Label operands are resolved through the symbol table just before each instruction is
/// encoded. The first failure aborts the whole emission and no bytes are returned.
#[tracing::instrument(skip(instructions))]
pub fn emit(
    instructions: &[Instruction],
    symbol_table: &SymbolTable,
) -> Result<Vec<u8>, CodeGenError> {
    let mut bytes = vec![];

    for ins in instructions {
        let offset = bytes.len();
        let address = u16::try_from(offset).map_err(|_| CodeGenError::ProgramOverflow)?;
        let resolved = resolve_instruction(ins, symbol_table)?;
        let ins_bytes =
            codec::encode(&resolved, address).map_err(|source| CodeGenError::Encoding {
                offset,
                instruction: ins.clone(),
                source,
            })?;
        bytes.extend(ins_bytes);
    }

    if bytes.len() > MAX_PROGRAM_SIZE {
        return Err(CodeGenError::ProgramOverflow);
    }

    Ok(bytes)
}

/// Compile the AST to machine code.
///
/// Runs the label pass over the whole program first so that both backward and forward
/// references resolve.
#[tracing::instrument(skip(ast))]
pub fn generate(ast: &AST) -> Result<Vec<u8>, CodeGenError> {
    let symbol_table = resolve_symbols(ast)?;
    emit(&ast::instructions(ast), &symbol_table)
}
