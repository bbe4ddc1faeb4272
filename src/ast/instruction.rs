pub mod condition;
pub mod operand;
pub mod operation;
pub mod register;

use std::fmt;

pub use condition::Condition;
pub use operand::Operand;
pub use operation::Operation;
pub use register::Register;

/// A machine instruction in one of the six encodable shapes.
///
/// Jump and branch targets are always held as absolute byte addresses; the codec turns a branch
/// target into a word offset relative to the branch's own address.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Instruction {
    /// `<op> $d, $l, $r`
    Register {
        op: Operation,
        dest: Register,
        left: Register,
        right: Register,
    },
    /// `<op>i $d, $l, imm` with a 5-bit unsigned immediate
    NarrowImmediate {
        op: Operation,
        dest: Register,
        left: Register,
        imm: Operand,
    },
    /// `<op>i $d, $l, imm` with a full 16-bit immediate in a second word
    WideImmediate {
        op: Operation,
        dest: Register,
        left: Register,
        imm: Operand,
    },
    /// `j<cond> $r`
    JumpRegister { cond: Condition, reg: Register },
    /// `j<cond> addr`
    JumpImmediate { cond: Condition, target: Operand },
    /// `b<cond> addr`
    Branch { cond: Condition, target: Operand },
}

impl Instruction {
    /// Largest immediate that fits the narrow form.
    pub const NARROW_IMMEDIATE_MAX: u16 = 0x1f;

    /// Build an ALU immediate instruction, choosing the narrow form only when the operand is a
    /// literal that fits in 5 bits. Labels always get the wide form since their value is not
    /// known until every label has been indexed.
    pub fn alu_immediate(op: Operation, dest: Register, left: Register, imm: Operand) -> Self {
        match imm {
            Operand::Value(value) if value <= Self::NARROW_IMMEDIATE_MAX => {
                Instruction::NarrowImmediate {
                    op,
                    dest,
                    left,
                    imm,
                }
            }
            _ => Instruction::WideImmediate {
                op,
                dest,
                left,
                imm,
            },
        }
    }

    /// Size of the encoded instruction in bytes
    pub fn size(&self) -> usize {
        match self {
            Instruction::Register { .. }
            | Instruction::NarrowImmediate { .. }
            | Instruction::JumpRegister { .. }
            | Instruction::Branch { .. } => 2,
            Instruction::WideImmediate { .. } | Instruction::JumpImmediate { .. } => 4,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Register {
                op,
                dest,
                left,
                right,
            } => write!(f, "{} {}, {}, {}", op, dest, left, right),
            Instruction::NarrowImmediate {
                op,
                dest,
                left,
                imm,
            }
            | Instruction::WideImmediate {
                op,
                dest,
                left,
                imm,
            } => write!(f, "{}i {}, {}, {}", op, dest, left, imm),
            Instruction::JumpRegister { cond, reg } => {
                write!(f, "{} {}", cond.jump_mnemonic(), reg)
            }
            Instruction::JumpImmediate { cond, target } => {
                write!(f, "{} {}", cond.jump_mnemonic(), target)
            }
            Instruction::Branch { cond, target } => {
                write!(f, "{} {}", cond.branch_mnemonic(), target)
            }
        }
    }
}
