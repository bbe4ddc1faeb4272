//! Bit-level encoding of [`Instruction`]s.
//!
//! Every instruction starts with a 16-bit big-endian word whose two top bits select the class:
//!
//! ```text
//! R   00 oper dest left right 00
//! NI  01 oper dest left imm5
//! WI  10 oper dest left 00000     + imm16
//! JI  11 0 cond 00 00000000       + imm16
//! JR  11 0 cond 01 reg 00000
//! B   11 1 cond offset10
//! ```
//!
//! The branch offset is a signed count of 16-bit words relative to the address of the branch
//! itself. Decoding turns it back into the absolute target address, so an [`Instruction`] never
//! carries a relative offset.

use thiserror::Error;

use crate::ast::{Condition, Instruction, Operand, Operation, Register};

const CLASS_SHIFT: u16 = 14;
const CLASS_REGISTER: u16 = 0b00;
const CLASS_NARROW_IMMEDIATE: u16 = 0b01;
const CLASS_WIDE_IMMEDIATE: u16 = 0b10;
const CLASS_JUMP: u16 = 0b11;

const BRANCH_BIT: u16 = 1 << 13;
const JUMP_REGISTER_BIT: u16 = 1 << 8;

const OPER_SHIFT: u16 = 11;
const DEST_SHIFT: u16 = 8;
const LEFT_SHIFT: u16 = 5;
const RIGHT_SHIFT: u16 = 2;
const COND_SHIFT: u16 = 10;
const JUMP_REGISTER_SHIFT: u16 = 5;
const FIELD_MASK: u16 = 0b111;

const NARROW_IMMEDIATE_MASK: u16 = 0x1f;
const BRANCH_OFFSET_MASK: u16 = 0x3ff;

/// Smallest branch offset in words
pub const BRANCH_OFFSET_MIN: i16 = -512;
/// Largest branch offset in words
pub const BRANCH_OFFSET_MAX: i16 = 511;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    #[error("Branch at {address:#06x} cannot reach {target:#06x}")]
    BranchOffsetOutOfRange { address: u16, target: u16 },
    #[error("Branch at {address:#06x} targets odd distance to {target:#06x}")]
    MisalignedBranchTarget { address: u16, target: u16 },
    #[error("Immediate does not fit the narrow form: {0:#x}")]
    ImmediateOutOfRange(u16),
    #[error("Operand has not been resolved: {0}")]
    UnresolvedOperand(String),
    #[error("Truncated instruction at {0:#06x}")]
    TruncatedInstruction(u16),
    #[error("Unhandled opcode {word:#06x} at {address:#06x}")]
    UnhandledOpcode { address: u16, word: u16 },
    #[error("Unsupported ALU operation: {0}")]
    UnsupportedAluOperation(u8),
}

/// Encode a fully resolved instruction located at `address`.
///
/// The address is only used by branches, whose target is stored relative to the branch.
#[tracing::instrument]
pub fn encode(ins: &Instruction, address: u16) -> Result<Vec<u8>, CodecError> {
    let words = match ins {
        Instruction::Register {
            op,
            dest,
            left,
            right,
        } => vec![
            (CLASS_REGISTER << CLASS_SHIFT)
                | alu_fields(*op, *dest, *left)
                | ((*right as u16) << RIGHT_SHIFT),
        ],
        Instruction::NarrowImmediate {
            op,
            dest,
            left,
            imm,
        } => {
            let value = resolved(imm)?;
            if value > NARROW_IMMEDIATE_MASK {
                return Err(CodecError::ImmediateOutOfRange(value));
            }
            vec![(CLASS_NARROW_IMMEDIATE << CLASS_SHIFT) | alu_fields(*op, *dest, *left) | value]
        }
        Instruction::WideImmediate {
            op,
            dest,
            left,
            imm,
        } => vec![
            (CLASS_WIDE_IMMEDIATE << CLASS_SHIFT) | alu_fields(*op, *dest, *left),
            resolved(imm)?,
        ],
        Instruction::JumpRegister { cond, reg } => vec![
            (CLASS_JUMP << CLASS_SHIFT)
                | ((*cond as u16) << COND_SHIFT)
                | JUMP_REGISTER_BIT
                | ((*reg as u16) << JUMP_REGISTER_SHIFT),
        ],
        Instruction::JumpImmediate { cond, target } => vec![
            (CLASS_JUMP << CLASS_SHIFT) | ((*cond as u16) << COND_SHIFT),
            resolved(target)?,
        ],
        Instruction::Branch { cond, target } => {
            let offset = branch_offset(address, resolved(target)?)?;
            vec![
                (CLASS_JUMP << CLASS_SHIFT)
                    | BRANCH_BIT
                    | ((*cond as u16) << COND_SHIFT)
                    | ((offset as u16) & BRANCH_OFFSET_MASK),
            ]
        }
    };

    Ok(words.iter().flat_map(|word| word.to_be_bytes()).collect())
}

/// Decode the instruction at the start of `bytes`, which is located at `address`.
///
/// Returns the instruction and the number of bytes it occupies. Reserved bits are ignored.
#[tracing::instrument(skip(bytes))]
pub fn decode(bytes: &[u8], address: u16) -> Result<(Instruction, usize), CodecError> {
    let first = read_word(bytes, 0).ok_or(CodecError::TruncatedInstruction(address))?;
    let second = || read_word(bytes, 2).ok_or(CodecError::TruncatedInstruction(address));
    let register = |shift: u16| {
        Register::from_repr(((first >> shift) & FIELD_MASK) as u8).ok_or(
            CodecError::UnhandledOpcode {
                address,
                word: first,
            },
        )
    };

    let decoded = match first >> CLASS_SHIFT {
        CLASS_REGISTER => (
            Instruction::Register {
                op: operation(first)?,
                dest: register(DEST_SHIFT)?,
                left: register(LEFT_SHIFT)?,
                right: register(RIGHT_SHIFT)?,
            },
            2,
        ),
        CLASS_NARROW_IMMEDIATE => (
            Instruction::NarrowImmediate {
                op: operation(first)?,
                dest: register(DEST_SHIFT)?,
                left: register(LEFT_SHIFT)?,
                imm: Operand::Value(first & NARROW_IMMEDIATE_MASK),
            },
            2,
        ),
        CLASS_WIDE_IMMEDIATE => (
            Instruction::WideImmediate {
                op: operation(first)?,
                dest: register(DEST_SHIFT)?,
                left: register(LEFT_SHIFT)?,
                imm: Operand::Value(second()?),
            },
            4,
        ),
        CLASS_JUMP => {
            let cond = Condition::from_repr(((first >> COND_SHIFT) & FIELD_MASK) as u8).ok_or(
                CodecError::UnhandledOpcode {
                    address,
                    word: first,
                },
            )?;
            if first & BRANCH_BIT != 0 {
                let offset = sign_extend_offset(first & BRANCH_OFFSET_MASK);
                (
                    Instruction::Branch {
                        cond,
                        target: Operand::Value(branch_target(address, offset)),
                    },
                    2,
                )
            } else if first & JUMP_REGISTER_BIT != 0 {
                (
                    Instruction::JumpRegister {
                        cond,
                        reg: register(JUMP_REGISTER_SHIFT)?,
                    },
                    2,
                )
            } else {
                (
                    Instruction::JumpImmediate {
                        cond,
                        target: Operand::Value(second()?),
                    },
                    4,
                )
            }
        }
        _ => {
            return Err(CodecError::UnhandledOpcode {
                address,
                word: first,
            })
        }
    };

    Ok(decoded)
}

/// Word offset from a branch at `address` to `target`.
///
/// Addresses wrap around at 2^16 like the program counter, so a branch near address 0 may
/// target the top of the address space and vice versa.
pub fn branch_offset(address: u16, target: u16) -> Result<i16, CodecError> {
    let distance = target.wrapping_sub(address) as i16 as i32;
    if distance % 2 != 0 {
        return Err(CodecError::MisalignedBranchTarget { address, target });
    }

    let words = distance / 2;
    if words < BRANCH_OFFSET_MIN as i32 || words > BRANCH_OFFSET_MAX as i32 {
        return Err(CodecError::BranchOffsetOutOfRange { address, target });
    }

    Ok(words as i16)
}

/// Absolute target of a branch at `address` with a word offset.
pub fn branch_target(address: u16, offset: i16) -> u16 {
    address.wrapping_add_signed(offset.wrapping_mul(2))
}

fn sign_extend_offset(field: u16) -> i16 {
    ((field << 6) as i16) >> 6
}

fn alu_fields(op: Operation, dest: Register, left: Register) -> u16 {
    ((op as u16) << OPER_SHIFT) | ((dest as u16) << DEST_SHIFT) | ((left as u16) << LEFT_SHIFT)
}

fn operation(word: u16) -> Result<Operation, CodecError> {
    let field = ((word >> OPER_SHIFT) & FIELD_MASK) as u8;
    Operation::from_repr(field).ok_or(CodecError::UnsupportedAluOperation(field))
}

fn resolved(operand: &Operand) -> Result<u16, CodecError> {
    match operand {
        Operand::Value(value) => Ok(*value),
        Operand::Label(label) => Err(CodecError::UnresolvedOperand(label.clone())),
    }
}

fn read_word(bytes: &[u8], offset: usize) -> Option<u16> {
    match bytes.get(offset..offset + 2) {
        Some([high, low]) => Some(u16::from_be_bytes([*high, *low])),
        _ => None,
    }
}
