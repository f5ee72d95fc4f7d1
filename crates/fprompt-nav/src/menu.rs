//! Numbered menu display and bounded-retry selection.

use fprompt_core::error::PromptError;
use fprompt_core::Result;
use fprompt_ui::styles::EntryStyle;

use crate::session::Session;

/// Prompt shown under navigation menus.
pub const PICK_FORMULA: &str = "Pick a formula:";

/// One line of a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub style: EntryStyle,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, style: EntryStyle) -> Self {
        Self {
            label: label.into(),
            style,
        }
    }
}

/// Renders `items` as `<index>:\t<label>` lines, numbered from 0.
pub fn render(session: &Session<'_>, items: &[MenuItem]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| session.theme.menu_line(i, &item.label, item.style))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shows `items` and reads a selection.
///
/// Non-numeric and out-of-range entries are retried up to the session's
/// attempt budget, after which [`PromptError::Abandoned`] is returned.
pub fn choose(session: &mut Session<'_>, items: &[MenuItem], prompt: &str) -> Result<usize> {
    let listing = render(session, items);
    session.say(&listing)?;
    for _ in 0..session.pipeline.max_attempts() {
        session.say(prompt)?;
        let selection = session.console.read_entry()?;
        match selection.trim().parse::<usize>() {
            Ok(index) if index < items.len() => return Ok(index),
            _ => session.warn("Invalid input. Try again.")?,
        }
    }
    Err(PromptError::Abandoned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fprompt_core::console::ScriptedConsole;
    use fprompt_core::pipeline::InputPipeline;
    use fprompt_ui::Theme;

    fn items() -> Vec<MenuItem> {
        vec![
            MenuItem::new("Go back", EntryStyle::Navigation),
            MenuItem::new("mean", EntryStyle::Item),
            MenuItem::new("median", EntryStyle::Item),
        ]
    }

    fn choose_with(lines: &[&str]) -> (Result<usize>, String) {
        let mut console = ScriptedConsole::new(lines.iter().copied());
        let pipeline = InputPipeline::new();
        let result = {
            let mut session = Session::new(&mut console, &pipeline, Theme::plain());
            choose(&mut session, &items(), PICK_FORMULA)
        };
        (result, console.transcript().to_string())
    }

    #[test]
    fn menu_rendering() {
        let (result, transcript) = choose_with(&["2"]);
        assert_eq!(result.unwrap(), 2);
        insta::assert_snapshot!(transcript.trim_end(), @r"
        0:	Go back
        1:	mean
        2:	median
        Pick a formula:
        >>>
        ");
    }

    #[test]
    fn invalid_selections_are_retried() {
        let (result, transcript) = choose_with(&["x", "7", "1"]);
        assert_eq!(result.unwrap(), 1);
        assert_eq!(transcript.matches("Invalid input. Try again.").count(), 2);
    }

    #[test]
    fn three_invalid_selections_abandon() {
        let (result, _) = choose_with(&["", "-1", "3"]);
        assert!(result.unwrap_err().is_abandoned());
    }
}
