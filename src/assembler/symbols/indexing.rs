use super::{SymbolError, SymbolTable};
use crate::ast::{Node, AST};

/// Find and add labels in the AST to the symbol table.
///
/// Every label gets the byte offset of the instruction following it.
#[tracing::instrument(skip(ast))]
pub fn index_labels(ast: &AST, symbol_table: &mut SymbolTable) -> Result<(), SymbolError> {
    let mut current_addr = 0;

    for node in ast.iter() {
        match node {
            Node::Instruction(ins) => {
                current_addr += ins.size();
            }
            Node::Label(label) => symbol_table.declare(label, current_addr)?,
        }
    }

    Ok(())
}
