//! Menu entries for capturing and inspecting variables.

use tracing::info;

use fprompt_core::error::PromptError;
use fprompt_core::input::{Input, InputKind};
use fprompt_core::Result;
use fprompt_nav::menu::{self, MenuItem};
use fprompt_nav::{Flow, MenuAction, Session};
use fprompt_ui::styles::EntryStyle;

use crate::table::MemoryTable;

const PICK_INPUT: &str = "Pick an input type:";

/// "Add to memory": pick a kind, name the variable, read and store a value.
#[derive(Debug, Clone)]
pub struct AddToMemory {
    table: MemoryTable,
}

impl AddToMemory {
    pub fn new(table: MemoryTable) -> Self {
        Self { table }
    }

    /// Runs the sub-menu until a value is stored or the user goes back.
    fn pick_and_store(&self, session: &mut Session<'_>) -> Result<()> {
        let mut items = vec![MenuItem::new("Go back", EntryStyle::Navigation)];
        items.extend(
            InputKind::ALL
                .iter()
                .map(|&kind| MenuItem::new(kind.as_str(), EntryStyle::Item)),
        );

        loop {
            let index = menu::choose(session, &items, PICK_INPUT)?;
            let Some(&kind) = index.checked_sub(1).and_then(|i| InputKind::ALL.get(i)) else {
                return Ok(());
            };
            match self.capture(kind, session) {
                Ok(()) => return Ok(()),
                Err(PromptError::Abandoned) => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn capture(&self, kind: InputKind, session: &mut Session<'_>) -> Result<()> {
        let name = read_variable_name(session)?;
        let input = Input::of_kind(kind);
        if let Some(value) = session.read_input(&input)? {
            info!(name = %name, kind = ?kind, "variable captured");
            self.table.store(&name, value);
        }
        Ok(())
    }
}

impl MenuAction for AddToMemory {
    fn label(&self) -> &str {
        "Add to memory"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Flow> {
        self.pick_and_store(session)?;
        Ok(Flow::Stay)
    }
}

/// "Read from memory": prints every stored variable.
#[derive(Debug, Clone)]
pub struct ReadFromMemory {
    table: MemoryTable,
}

impl ReadFromMemory {
    pub fn new(table: MemoryTable) -> Self {
        Self { table }
    }
}

impl MenuAction for ReadFromMemory {
    fn label(&self) -> &str {
        "Read from memory"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Flow> {
        if self.table.is_empty() {
            let line = session.theme.muted("Memory is empty.");
            session.say(&line)?;
            return Ok(Flow::Stay);
        }
        for (name, value) in self.table.entries() {
            session.say(&format!("{name} = {value}"))?;
        }
        Ok(Flow::Stay)
    }
}

fn read_variable_name(session: &mut Session<'_>) -> Result<String> {
    for _ in 0..session.pipeline.max_attempts() {
        session.say("Enter variable name")?;
        let name = session.console.read_entry()?;
        let name = name.trim();
        if MemoryTable::is_valid_name(name) {
            return Ok(name.to_string());
        }
        session.warn("Invalid input")?;
    }
    Err(PromptError::Abandoned)
}
