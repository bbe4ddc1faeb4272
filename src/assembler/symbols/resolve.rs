use super::{SymbolError, SymbolTable};
use crate::ast::{Instruction, Operand};

fn resolve_operand(operand: &Operand, symbol_table: &SymbolTable) -> Result<Operand, SymbolError> {
    match operand {
        Operand::Value(value) => Ok(Operand::Value(*value)),
        Operand::Label(label) => Ok(Operand::Value(symbol_table.resolve(label)?)),
    }
}

/// Replace a label operand with the address of the label.
///
/// Returns a resolved copy and leaves the input untouched. Jump and branch operands both resolve
/// to the absolute address; turning a branch target into an offset is up to the encoder.
#[tracing::instrument]
pub fn resolve_instruction(
    ins: &Instruction,
    symbol_table: &SymbolTable,
) -> Result<Instruction, SymbolError> {
    let resolved = match ins {
        Instruction::Register { .. } | Instruction::JumpRegister { .. } => ins.clone(),
        Instruction::NarrowImmediate {
            op,
            dest,
            left,
            imm,
        } => Instruction::NarrowImmediate {
            op: *op,
            dest: *dest,
            left: *left,
            imm: resolve_operand(imm, symbol_table)?,
        },
        Instruction::WideImmediate {
            op,
            dest,
            left,
            imm,
        } => Instruction::WideImmediate {
            op: *op,
            dest: *dest,
            left: *left,
            imm: resolve_operand(imm, symbol_table)?,
        },
        Instruction::JumpImmediate { cond, target } => Instruction::JumpImmediate {
            cond: *cond,
            target: resolve_operand(target, symbol_table)?,
        },
        Instruction::Branch { cond, target } => Instruction::Branch {
            cond: *cond,
            target: resolve_operand(target, symbol_table)?,
        },
    };

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Condition, Operation, Register};

    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_instruction() -> Result<(), SymbolError> {
        let mut symbol_table = SymbolTable::new();
        symbol_table.declare("table", 0x40)?;
        symbol_table.declare("loop", 0x06)?;

        let tests = vec![
            (
                Instruction::WideImmediate {
                    op: Operation::Add,
                    dest: Register::R1,
                    left: Register::R0,
                    imm: Operand::Label("table".to_string()),
                },
                Instruction::WideImmediate {
                    op: Operation::Add,
                    dest: Register::R1,
                    left: Register::R0,
                    imm: Operand::Value(0x40),
                },
            ),
            (
                Instruction::Branch {
                    cond: Condition::Zero,
                    target: Operand::Label("loop".to_string()),
                },
                Instruction::Branch {
                    cond: Condition::Zero,
                    target: Operand::Value(0x06),
                },
            ),
            (
                Instruction::JumpImmediate {
                    cond: Condition::Always,
                    target: Operand::Value(0x1234),
                },
                Instruction::JumpImmediate {
                    cond: Condition::Always,
                    target: Operand::Value(0x1234),
                },
            ),
            (
                Instruction::JumpRegister {
                    cond: Condition::Carry,
                    reg: Register::R2,
                },
                Instruction::JumpRegister {
                    cond: Condition::Carry,
                    reg: Register::R2,
                },
            ),
        ];

        for (input, expected) in tests {
            assert_eq!(resolve_instruction(&input, &symbol_table)?, expected);
        }

        Ok(())
    }

    #[test]
    fn test_undefined_label() {
        let symbol_table = SymbolTable::new();
        let ins = Instruction::JumpImmediate {
            cond: Condition::Always,
            target: Operand::Label("undefined".to_string()),
        };

        assert_eq!(
            resolve_instruction(&ins, &symbol_table),
            Err(SymbolError::UndefinedLabel("undefined".to_string()))
        );
    }
}
