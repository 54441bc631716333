//! Program representation: the instruction store plus its label table.
//!
//! Label declarations are not instructions. Each label maps to the index
//! of the instruction that follows its declaration, which may equal
//! `instructions.len()` when a label closes the file.

use std::collections::BTreeMap;

use crate::instruction::Instruction;

/// Label name → index of the first instruction of its body.
pub type LabelTable = BTreeMap<String, usize>;

/// A loaded stackasm program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The instruction store.
    pub instructions: Vec<Instruction>,
    /// Label table, written once during loading.
    pub labels: LabelTable,
}

impl Program {
    /// Create a program from instructions and labels.
    pub fn new(instructions: Vec<Instruction>, labels: LabelTable) -> Self {
        Self {
            instructions,
            labels,
        }
    }

    /// Body start of a label, if declared.
    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    /// Instruction at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Labels whose body starts at `index`, in name order.
    pub fn labels_at(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.labels
            .iter()
            .filter(move |&(_, &at)| at == index)
            .map(|(name, _)| name.as_str())
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
