//! Variable memory for the formula prompt.
//!
//! Installing [`MemoryExtension`] adds two entries to every menu:
//!
//! - **Add to memory** asks for an input kind and a variable name, reads a
//!   value of that kind and stores it;
//! - **Read from memory** prints every stored variable.
//!
//! It also registers a preprocessor, so typing a stored name at any input
//! prompt yields the stored value as-is (a list stored as `x` satisfies a
//! number input when `x` is typed).

pub mod actions;
pub mod table;

pub use actions::{AddToMemory, ReadFromMemory};
pub use table::{MemoryLookup, MemoryTable};

use fprompt_nav::{Extension, Prompt};

/// Installs the memory entries and lookup on a [`Prompt`].
#[derive(Debug, Clone, Default)]
pub struct MemoryExtension {
    table: MemoryTable,
}

impl MemoryExtension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &MemoryTable {
        &self.table
    }
}

impl Extension for MemoryExtension {
    fn install(&self, prompt: &mut Prompt) {
        prompt.add_preprocessor(MemoryLookup::new(self.table.clone()));
        prompt.add_persistent_entry(AddToMemory::new(self.table.clone()));
        prompt.add_persistent_entry(ReadFromMemory::new(self.table.clone()));
    }
}
