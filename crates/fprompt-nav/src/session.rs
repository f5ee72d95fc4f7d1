//! Per-launch state threaded through every menu and formula run.

use fprompt_core::console::Console;
use fprompt_core::input::Input;
use fprompt_core::pipeline::InputPipeline;
use fprompt_core::value::Value;
use fprompt_core::Result;
use fprompt_ui::Theme;

/// What the caller should do after a menu element has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Show the current menu again.
    Stay,
    /// Leave the current group.
    Leave,
}

/// The console, input pipeline and theme for one launch.
pub struct Session<'a> {
    pub console: &'a mut dyn Console,
    pub pipeline: &'a InputPipeline,
    pub theme: Theme,
}

impl<'a> Session<'a> {
    pub fn new(console: &'a mut dyn Console, pipeline: &'a InputPipeline, theme: Theme) -> Self {
        Self {
            console,
            pipeline,
            theme,
        }
    }

    /// Reads one input through the session's pipeline.
    pub fn read_input(&mut self, input: &Input) -> Result<Option<Value>> {
        input.read(&mut *self.console, self.pipeline)
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        self.console.write_line(text)
    }

    /// Prints a recoverable diagnostic.
    pub fn warn(&mut self, text: &str) -> Result<()> {
        let line = self.theme.warning(text);
        self.console.write_line(&line)
    }
}

/// A menu entry installed by an extension, shown in every group after
/// "Go back"/"Quit".
pub trait MenuAction {
    fn label(&self) -> &str;

    /// Runs the entry. [`Flow::Leave`] makes the enclosing group exit.
    fn run(&self, session: &mut Session<'_>) -> Result<Flow>;
}
