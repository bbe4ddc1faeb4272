use thiserror::Error;

pub use self::{indexing::index_labels, resolve::resolve_instruction};
use crate::ast::AST;

/// Find all labels in the AST and add them to the symbol table.
mod indexing;

/// Resolving of label operands to addresses.
mod resolve;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SymbolError {
    #[error("Label already defined: {0}")]
    DuplicateLabel(String),
    #[error("Label not defined: {0}")]
    UndefinedLabel(String),
    #[error("Label {name} is outside the address space: {byte_offset:#x}")]
    LabelOutOfRange { name: String, byte_offset: usize },
}

#[derive(Debug, PartialEq)]
pub struct Symbol {
    /// Name of the label
    pub name: String,
    /// Offset of the label from the start of the program, fixed when declared
    pub byte_offset: usize,
}

/// The symbol table is used to resolve labels.
#[derive(Debug, Default)]
pub struct SymbolTable {
    pub symbols: Vec<Symbol>,
}

impl SymbolTable {
    #[tracing::instrument]
    pub fn new() -> SymbolTable {
        SymbolTable {
            symbols: Vec::new(),
        }
    }

    #[tracing::instrument]
    pub fn find_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|symbol| symbol.name == name)
    }

    /// Declare a label at the given byte offset.
    #[tracing::instrument]
    pub fn declare(&mut self, name: &str, byte_offset: usize) -> Result<(), SymbolError> {
        if self.find_symbol(name).is_some() {
            return Err(SymbolError::DuplicateLabel(name.to_owned()));
        }

        tracing::debug!("Declared label '{}' at {:#06x}", name, byte_offset);
        self.symbols.push(Symbol {
            name: name.to_owned(),
            byte_offset,
        });
        Ok(())
    }

    /// Look up the address of a label.
    #[tracing::instrument]
    pub fn resolve(&self, name: &str) -> Result<u16, SymbolError> {
        let symbol = self
            .find_symbol(name)
            .ok_or_else(|| SymbolError::UndefinedLabel(name.to_owned()))?;

        u16::try_from(symbol.byte_offset).map_err(|_| SymbolError::LabelOutOfRange {
            name: symbol.name.clone(),
            byte_offset: symbol.byte_offset,
        })
    }
}

/// Build the symbol table of a program.
#[tracing::instrument(skip(ast))]
pub fn resolve_symbols(ast: &AST) -> Result<SymbolTable, SymbolError> {
    let mut symbol_table = SymbolTable::new();
    index_labels(ast, &mut symbol_table)?;
    Ok(symbol_table)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_declare_and_resolve() -> Result<(), SymbolError> {
        let mut symbol_table = SymbolTable::new();
        symbol_table.declare("start", 0)?;
        symbol_table.declare("loop", 0x24)?;

        assert_eq!(symbol_table.resolve("start")?, 0);
        assert_eq!(symbol_table.resolve("loop")?, 0x24);
        assert_eq!(
            symbol_table.resolve("Loop"),
            Err(SymbolError::UndefinedLabel("Loop".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_duplicate_declaration_keeps_first_offset() -> Result<(), SymbolError> {
        let mut symbol_table = SymbolTable::new();
        symbol_table.declare("label", 2)?;

        assert_eq!(
            symbol_table.declare("label", 8),
            Err(SymbolError::DuplicateLabel("label".to_string()))
        );
        assert_eq!(symbol_table.resolve("label")?, 2);
        Ok(())
    }

    #[test]
    fn test_label_past_address_space() -> Result<(), SymbolError> {
        let mut symbol_table = SymbolTable::new();
        symbol_table.declare("end", 0x10000)?;

        assert_eq!(
            symbol_table.resolve("end"),
            Err(SymbolError::LabelOutOfRange {
                name: "end".to_string(),
                byte_offset: 0x10000
            })
        );
        Ok(())
    }
}
