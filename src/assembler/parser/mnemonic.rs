use std::collections::HashMap;

use lazy_static::lazy_static;
use strum::IntoEnumIterator;

use crate::ast::{Condition, Operation};

/// What a mnemonic assembles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    /// `add`, `sub`, ...
    Alu(Operation),
    /// `addi`, `subi`, ...
    AluImmediate(Operation),
    /// `jmp`, `jz`, ...
    Jump(Condition),
    /// `bra`, `bz`, ...
    Branch(Condition),
    /// `add $0, $0, $0`
    Nop,
    /// `xor $r, $r, $H`
    Not,
    /// `sub $r, $0, $r`
    Neg,
    /// `add $a, $b, $0`
    Mv,
    /// `addi $r, $0, imm`
    Ldi,
}

lazy_static! {
    pub static ref MNEMONICS: HashMap<String, Mnemonic> = {
        let mut mnemonics = HashMap::new();
        for op in Operation::iter() {
            mnemonics.insert(op.to_string(), Mnemonic::Alu(op));
            mnemonics.insert(format!("{}i", op), Mnemonic::AluImmediate(op));
        }
        for cond in Condition::iter() {
            mnemonics.insert(cond.jump_mnemonic().to_owned(), Mnemonic::Jump(cond));
            mnemonics.insert(cond.branch_mnemonic().to_owned(), Mnemonic::Branch(cond));
        }
        mnemonics.insert("nop".to_owned(), Mnemonic::Nop);
        mnemonics.insert("not".to_owned(), Mnemonic::Not);
        mnemonics.insert("neg".to_owned(), Mnemonic::Neg);
        mnemonics.insert("mv".to_owned(), Mnemonic::Mv);
        mnemonics.insert("ldi".to_owned(), Mnemonic::Ldi);
        mnemonics
    };
}

/// Case-insensitive mnemonic lookup.
pub fn lookup(name: &str) -> Option<Mnemonic> {
    MNEMONICS.get(&name.to_lowercase()).copied()
}
