use std::fmt;

/// The immediate operand of an instruction.
///
/// This represents the literal value or address that is used by the instruction. For jumps and
/// branches the value is always the absolute byte address of the target.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub enum Operand {
    Value(u16),
    /// A reference to a [`Node::Label`][crate::ast::Node#variant.Label] node, replaced with the
    /// label's byte offset before the instruction is encoded.
    Label(String),
}

impl Operand {
    /// The literal value, or `None` if the operand still refers to a label.
    pub fn value(&self) -> Option<u16> {
        match self {
            Operand::Value(value) => Some(*value),
            Operand::Label(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Value(value) => write!(f, "{:#x}", value),
            Operand::Label(label) => write!(f, "{}", label),
        }
    }
}
