use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use thiserror::Error;

use crate::{
    assembler::codegen::MAX_PROGRAM_SIZE,
    ast::Instruction,
    codec::{self, CodecError},
};

pub mod listing;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DisassemblerError {
    #[error("Decoding failed: {0}")]
    Decode(#[from] CodecError),
    #[error("Program too large: {0} bytes")]
    ProgramOverflow(usize),
    #[error("Encoding failed at {offset:#06x}: {source}")]
    Encode { offset: usize, source: CodecError },
}

/// Decode a whole program, starting at offset 0.
///
/// Branch targets come back as absolute addresses relative to the start of the program.
#[tracing::instrument(skip(input))]
pub fn disassemble_code(input: &[u8]) -> Result<Vec<Instruction>, DisassemblerError> {
    if input.len() > MAX_PROGRAM_SIZE {
        return Err(DisassemblerError::ProgramOverflow(input.len()));
    }

    let mut code = vec![];
    let mut curr_ix = 0;

    while curr_ix < input.len() {
        let (ins, size) = codec::decode(&input[curr_ix..], curr_ix as u16)?;
        tracing::trace!("{:#06x}: {}", curr_ix, ins);
        code.push(ins);
        curr_ix += size;
    }

    Ok(code)
}

/// Decode a program and encode it again, which clears every reserved bit.
#[tracing::instrument(skip(input))]
pub fn canonicalize(input: &[u8]) -> Result<Vec<u8>, DisassemblerError> {
    let mut bytes = Vec::with_capacity(input.len());

    for ins in disassemble_code(input)? {
        let offset = bytes.len();
        let encoded = codec::encode(&ins, offset as u16)
            .map_err(|source| DisassemblerError::Encode { offset, source })?;
        bytes.extend(encoded);
    }

    Ok(bytes)
}

/// Render instructions as assembly source, one per line.
pub fn to_source(code: &[Instruction]) -> String {
    code.iter().map(|ins| format!("{}\n", ins)).collect()
}

#[derive(Args, Debug)]
pub struct DisassemblyArgs {
    #[arg(value_name = "BINFILE")]
    #[arg(help = "Binary program file")]
    pub input: PathBuf,
    #[arg(short, long)]
    #[arg(help = "Output file, defaults to stdout")]
    pub output: Option<PathBuf>,
    #[arg(long)]
    #[arg(help = "Print addresses and machine words next to each instruction")]
    pub listing: bool,
}

#[derive(Args, Debug)]
pub struct BincatArgs {
    #[arg(value_name = "BINFILE")]
    #[arg(help = "Binary program file")]
    pub input: PathBuf,
    #[arg(value_name = "OUTFILE")]
    #[arg(help = "Output file for the canonical program")]
    pub output: PathBuf,
}

/// Rewrite a binary file in canonical form.
pub fn bincat(args: &BincatArgs) -> Result<()> {
    let program = std::fs::read(&args.input)
        .with_context(|| format!("Unable to read file {}", args.input.display()))?;

    let canonical = canonicalize(&program)
        .with_context(|| format!("Unable to decode {}", args.input.display()))?;

    std::fs::write(&args.output, &canonical)
        .with_context(|| format!("Unable to write file {}", args.output.display()))?;

    Ok(())
}

/// Disassemble a binary file.
pub fn disassemble(args: &DisassemblyArgs) -> Result<()> {
    let program = std::fs::read(&args.input)
        .with_context(|| format!("Unable to read file {}", args.input.display()))?;

    let code = disassemble_code(&program)
        .with_context(|| format!("Disassembly of {} failed", args.input.display()))?;

    let text = if args.listing {
        listing::Listing::new(&program, code, 0).generate()
    } else {
        to_source(&code)
    };

    match &args.output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Unable to write file {}", path.display()))?,
        None => print!("{}", text),
    }

    Ok(())
}
