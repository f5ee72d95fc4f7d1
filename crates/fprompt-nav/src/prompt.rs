//! The composition root: registry, input pipeline and extension entries.

use tracing::{debug, info};

use fprompt_core::console::{Console, StdConsole};
use fprompt_core::error::{FormulaError, PromptError};
use fprompt_core::pipeline::{InputPipeline, Preprocessor};
use fprompt_core::value::{Args, Output};
use fprompt_core::Result;
use fprompt_ui::Theme;

use crate::error::RegistryError;
use crate::formula::FormulaHandle;
use crate::navigator::Navigator;
use crate::registrar::{FormulaSpec, Registrar};
use crate::session::{MenuAction, Session};

/// How a launch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user picked "Quit" at the root.
    Quit,
    /// The root selection was abandoned after too many invalid entries.
    Abandoned,
    /// The input stream closed.
    EndOfInput,
}

/// A bundle of preprocessors and menu entries installed together.
pub trait Extension {
    fn install(&self, prompt: &mut Prompt);
}

/// Owns everything a launch needs.
pub struct Prompt {
    registrar: Registrar,
    pipeline: InputPipeline,
    persistent: Vec<Box<dyn MenuAction>>,
    auto_select: bool,
    theme: Theme,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            registrar: Registrar::new(),
            pipeline: InputPipeline::new(),
            persistent: Vec::new(),
            auto_select: false,
            theme: Theme::plain(),
        }
    }

    pub fn registrar(&self) -> &Registrar {
        &self.registrar
    }

    /// Shorthand for [`Registrar::register`].
    pub fn register<F>(
        &mut self,
        spec: impl Into<FormulaSpec>,
        func: F,
    ) -> std::result::Result<FormulaHandle, RegistryError>
    where
        F: Fn(&Args) -> std::result::Result<Output, FormulaError> + 'static,
    {
        self.registrar.register(spec, func)
    }

    /// Appends a preprocessor consulted by every input read.
    pub fn add_preprocessor(&mut self, preprocessor: impl Preprocessor + 'static) {
        self.pipeline.push(Box::new(preprocessor));
    }

    /// Appends an entry shown in every group's menu.
    pub fn add_persistent_entry(&mut self, entry: impl MenuAction + 'static) {
        debug!(label = entry.label(), "adding persistent entry");
        self.persistent.push(Box::new(entry));
    }

    pub fn install(&mut self, extension: &dyn Extension) {
        extension.install(self);
    }

    pub fn set_auto_select(&mut self, enabled: bool) {
        self.auto_select = enabled;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Precision for formulas registered afterwards without their own.
    pub fn set_default_precision(&mut self, places: Option<u32>) {
        self.registrar.set_default_precision(places);
    }

    pub fn set_max_attempts(&mut self, attempts: u32) {
        self.pipeline = std::mem::take(&mut self.pipeline).with_max_attempts(attempts);
    }

    /// Runs the menu on stdin/stdout until the user quits.
    pub fn launch(&self) -> Result<Exit> {
        let mut console = StdConsole::new();
        self.launch_with(&mut console)
    }

    /// Runs the menu on `console` until the user quits.
    ///
    /// Formula errors and console I/O failures are returned as errors; every
    /// other way of ending is an [`Exit`].
    pub fn launch_with(&self, console: &mut dyn Console) -> Result<Exit> {
        info!(
            formulas = self.registrar.tree().formula_count(),
            extensions = self.persistent.len(),
            "launching prompt"
        );
        let mut session = Session::new(console, &self.pipeline, self.theme);
        let navigator = Navigator::new(self.registrar.tree(), &self.persistent)
            .with_auto_select(self.auto_select);

        match navigator.run_root(&mut session) {
            Ok(()) => Ok(Exit::Quit),
            Err(PromptError::Abandoned) => Ok(Exit::Abandoned),
            Err(PromptError::EndOfInput) => Ok(Exit::EndOfInput),
            Err(e) => Err(e),
        }
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::session::Flow;
    use fprompt_core::console::ScriptedConsole;
    use fprompt_core::input::Input;
    use fprompt_core::value::Value;
    use pretty_assertions::assert_eq;

    fn stats_prompt() -> Prompt {
        let mut prompt = Prompt::new();
        prompt
            .register(
                FormulaSpec::new([Input::list("x")]).named("stats.mean"),
                |args: &Args| {
                    let x = args.list(0)?;
                    Ok((x.iter().sum::<f64>() / x.len() as f64).into())
                },
            )
            .unwrap();
        prompt
            .register(
                FormulaSpec::new([Input::list("x")]).named("stats.median"),
                |_: &Args| Ok(Output::None),
            )
            .unwrap();
        prompt
            .register(
                FormulaSpec::new([Input::number("rate")]).named("factors.future"),
                |args: &Args| Ok((1.0 + args.float(0)?).into()),
            )
            .unwrap();
        prompt
    }

    fn launch(prompt: &Prompt, lines: &[&str]) -> (Exit, String) {
        let mut console = ScriptedConsole::new(lines.iter().copied());
        let exit = prompt.launch_with(&mut console).unwrap();
        (exit, console.transcript().to_string())
    }

    #[test]
    fn quit_at_root() {
        let (exit, transcript) = launch(&stats_prompt(), &["0"]);
        assert_eq!(exit, Exit::Quit);
        assert!(transcript.starts_with("0:\tQuit\n1:\tfactors\n2:\tstats\nPick a formula:\n"));
    }

    #[test]
    fn runs_a_nested_formula_and_goes_back() {
        // root -> stats -> mean, enter a list, return, go back, quit.
        let lines = ["2", "1", "2", "4", "", "0", "0", "0"];
        let (exit, transcript) = launch(&stats_prompt(), &lines);
        assert_eq!(exit, Exit::Quit);
        assert!(transcript.contains("0:\tGo back\n1:\tmean\n2:\tmedian\n"));
        assert!(transcript.contains("stats.mean:\n3.0\n"));
    }

    #[test]
    fn abandoned_input_returns_to_the_parent_group() {
        // stats -> mean, three bad entries cancel the run, then go back and quit.
        let lines = ["2", "1", "a", "b", "c", "0", "0"];
        let (exit, transcript) = launch(&stats_prompt(), &lines);
        assert_eq!(exit, Exit::Quit);
        assert_eq!(transcript.matches("0:\tGo back\n1:\tmean").count(), 2);
    }

    #[test]
    fn abandoned_input_two_groups_deep_redisplays_the_innermost_menu() {
        let mut prompt = Prompt::new();
        for name in ["a.b.f", "a.b.g", "a.c"] {
            prompt
                .register(
                    FormulaSpec::new([Input::number("x")]).named(name),
                    |args: &Args| Ok(args.float(0)?.into()),
                )
                .unwrap();
        }

        // a -> b -> f, three bad entries, then back out to the root and quit.
        let lines = ["1", "1", "1", "x", "y", "z", "0", "0", "0"];
        let (exit, transcript) = launch(&prompt, &lines);
        assert_eq!(exit, Exit::Quit);
        assert_eq!(transcript.matches("0:\tGo back\n1:\tf\n2:\tg\n").count(), 2);
        assert_eq!(transcript.matches("0:\tGo back\n1:\tb\n2:\tc\n").count(), 2);
        assert_eq!(transcript.matches("0:\tQuit\n").count(), 2);
        assert!(!transcript.contains("a.b.f:"));
    }

    #[test]
    fn abandoned_selection_in_subgroup_goes_back_one_level() {
        let lines = ["2", "x", "y", "z", "0"];
        let (exit, transcript) = launch(&stats_prompt(), &lines);
        assert_eq!(exit, Exit::Quit);
        assert_eq!(transcript.matches("0:\tQuit").count(), 2);
    }

    #[test]
    fn abandoned_selection_at_root_ends_the_launch() {
        let (exit, _) = launch(&stats_prompt(), &["9", "x", ""]);
        assert_eq!(exit, Exit::Abandoned);
    }

    #[test]
    fn closed_input_ends_the_launch() {
        let (exit, _) = launch(&stats_prompt(), &["2", "1", "5"]);
        assert_eq!(exit, Exit::EndOfInput);
    }

    #[test]
    fn formula_errors_escape_launch() {
        let mut prompt = Prompt::new();
        prompt
            .register(FormulaSpec::new([]).named("boom"), |_: &Args| {
                Err(FormulaError::domain("no"))
            })
            .unwrap();
        let mut console = ScriptedConsole::new(["1"]);
        let err = prompt.launch_with(&mut console).unwrap_err();
        assert!(matches!(err, PromptError::Formula(FormulaError::Domain(_))));
    }

    // -- auto-select ---------------------------------------------------------

    fn single_child_prompt(auto_select: bool) -> Prompt {
        let mut prompt = Prompt::new();
        prompt
            .register(
                FormulaSpec::new([Input::number("x")]).named("only.double"),
                |args: &Args| Ok((args.float(0)? * 2.0).into()),
            )
            .unwrap();
        prompt.set_auto_select(auto_select);
        prompt
    }

    #[test]
    fn auto_select_runs_the_only_child_without_a_menu() {
        let (exit, transcript) = launch(&single_child_prompt(true), &["4", "0"]);
        assert_eq!(exit, Exit::Quit);
        assert!(!transcript.contains("Pick a formula:"));
        assert!(transcript.contains("only.double:\n8.0\n"));
    }

    #[test]
    fn without_auto_select_the_menu_is_shown() {
        let lines = ["1", "1", "4", "0", "0", "0"];
        let (exit, transcript) = launch(&single_child_prompt(false), &lines);
        assert_eq!(exit, Exit::Quit);
        assert_eq!(transcript.matches("Pick a formula:").count(), 4);
        assert!(transcript.contains("only.double:\n8.0\n"));
    }

    // -- extensions ----------------------------------------------------------

    struct Counter(Rc<RefCell<u32>>);

    impl MenuAction for Counter {
        fn label(&self) -> &str {
            "Count"
        }

        fn run(&self, _: &mut Session<'_>) -> Result<Flow> {
            *self.0.borrow_mut() += 1;
            Ok(Flow::Stay)
        }
    }

    struct CounterExtension(Rc<RefCell<u32>>);

    impl Extension for CounterExtension {
        fn install(&self, prompt: &mut Prompt) {
            prompt.add_persistent_entry(Counter(Rc::clone(&self.0)));
            prompt.add_preprocessor(|raw: &str| (raw == "ten").then_some(Value::Float(10.0)));
        }
    }

    #[test]
    fn persistent_entries_follow_the_leave_entry_everywhere() {
        let count = Rc::new(RefCell::new(0));
        let mut prompt = stats_prompt();
        prompt.install(&CounterExtension(Rc::clone(&count)));

        // Count at root, enter stats, Count there, go back, quit.
        let lines = ["1", "3", "1", "0", "0"];
        let (exit, transcript) = launch(&prompt, &lines);
        assert_eq!(exit, Exit::Quit);
        assert_eq!(*count.borrow(), 2);
        assert!(transcript.contains("0:\tQuit\n1:\tCount\n2:\tfactors\n3:\tstats\n"));
        assert!(transcript.contains("0:\tGo back\n1:\tCount\n2:\tmean\n"));
    }

    #[test]
    fn persistent_entries_keep_single_child_menus_visible() {
        let count = Rc::new(RefCell::new(0));
        let mut prompt = single_child_prompt(true);
        prompt.install(&CounterExtension(Rc::clone(&count)));

        // only -> Count -> double, then back out and quit.
        let lines = ["2", "1", "2", "4", "0", "0", "0"];
        let (exit, transcript) = launch(&prompt, &lines);
        assert_eq!(exit, Exit::Quit);
        assert_eq!(*count.borrow(), 1);
        assert!(transcript.starts_with("0:\tQuit\n1:\tCount\n2:\tonly\nPick a formula:\n"));
        assert!(transcript.contains("0:\tGo back\n1:\tCount\n2:\tdouble\n"));
        assert!(transcript.contains("only.double:\n8.0\n"));
    }

    #[test]
    fn preprocessors_reach_formula_inputs() {
        let mut prompt = stats_prompt();
        prompt.install(&CounterExtension(Rc::new(RefCell::new(0))));

        // factors -> future with the substituted value.
        let lines = ["2", "2", "ten", "0", "0", "0"];
        let (_, transcript) = launch(&prompt, &lines);
        assert!(transcript.contains("factors.future:\n11.0\n"));
    }
}
