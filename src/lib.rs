/// Instruction model shared by every stage of the toolchain
pub mod ast;

/// Binary encoding and decoding of single instructions
pub mod codec;

/// Transforms assembly code to machine code.
///
/// The steps are:
/// 1. **Lexing** - converting a string into tokens
/// 2. **Parsing** - converting tokens into an AST
/// 3. **Compiling** - converting an AST into machine code in two passes
///     - Pass 1: Symbol resolution - recording the byte offset of every label
///     - Pass 2: Code generation - resolving operands and encoding instructions
pub mod assembler;

/// Transforms machine code back to instructions
pub mod disassembler;

/// CPU emulator
pub mod emulator;

/// Hexdump utility
pub mod hexdump;

/// Logging and tracing setup
pub mod instrumentation;
