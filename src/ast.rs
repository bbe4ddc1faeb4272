pub mod instruction;

use std::fmt;

pub use instruction::{Condition, Instruction, Operand, Operation, Register};

/// A single node in the AST, i.e. a single statement in the source code.
#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    /// A machine instruction, with pseudo-instructions already expanded
    Instruction(Instruction),
    /// A label to mark a location in the code
    ///
    /// Labels are resolved to absolute byte offsets during code generation.
    /// E.g. `loop:`
    Label(String),
}

impl Node {
    pub fn get_instruction(&self) -> Option<&Instruction> {
        match self {
            Node::Instruction(instruction) => Some(instruction),
            Node::Label(_) => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Instruction(instruction) => write!(f, "    {}", instruction),
            Node::Label(label) => write!(f, "{}:", label),
        }
    }
}

/// An AST (Abstract Syntax Tree) is a collection of AST nodes.
///
/// The AST is the result of parsing the source code.
pub type AST = Vec<Node>;

/// The instructions of a program in emission order, without its labels.
pub fn instructions(ast: &AST) -> Vec<Instruction> {
    ast.iter().filter_map(Node::get_instruction).cloned().collect()
}
