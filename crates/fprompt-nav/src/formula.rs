//! Formula records and their run loop.
//!
//! A run cycles through: collect every input, call the body, print the
//! (rounded) result, then ask whether to go again. Abandoning any input
//! cancels the run without calling the body.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use fprompt_core::error::{FormulaError, PromptError};
use fprompt_core::input::Input;
use fprompt_core::rounding::round_output;
use fprompt_core::value::{Args, Output, Value};
use fprompt_core::Result;

use crate::session::{Flow, Session};

/// Signature of a formula body.
pub type FormulaFn = dyn Fn(&Args) -> std::result::Result<Output, FormulaError>;

/// Entry typed at the repeat prompt to return to the menu.
pub const RETURN_SENTINEL: &str = "0";

/// A registered formula: display name, declared inputs, precision and body.
pub struct FormulaRecord {
    name: String,
    inputs: Vec<Input>,
    precision: Option<u32>,
    func: Box<FormulaFn>,
}

impl FormulaRecord {
    pub(crate) fn new(
        name: String,
        inputs: Vec<Input>,
        precision: Option<u32>,
        func: Box<FormulaFn>,
    ) -> Self {
        Self {
            name,
            inputs,
            precision,
            func,
        }
    }
}

impl fmt::Debug for FormulaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormulaRecord")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("precision", &self.precision)
            .finish_non_exhaustive()
    }
}

/// Shared handle to a registered formula.
///
/// Returned by registration so the formula stays callable from code, with the
/// same rounding the menu applies.
#[derive(Debug, Clone)]
pub struct FormulaHandle(Rc<FormulaRecord>);

impl FormulaHandle {
    pub(crate) fn new(record: FormulaRecord) -> Self {
        Self(Rc::new(record))
    }

    /// Full dotted display name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn inputs(&self) -> &[Input] {
        &self.0.inputs
    }

    /// Decimal places results are rounded to, `None` for no rounding.
    pub fn precision(&self) -> Option<u32> {
        self.0.precision
    }

    /// Calls the body and rounds the result.
    pub fn call(&self, args: &Args) -> std::result::Result<Output, FormulaError> {
        let output = (self.0.func)(args)?;
        Ok(round_output(output, self.0.precision))
    }

    /// Calls the body with every argument present.
    pub fn call_with(&self, values: Vec<Value>) -> std::result::Result<Output, FormulaError> {
        self.call(&Args::from(values))
    }

    /// Runs the interactive loop for this formula.
    ///
    /// Returns [`Flow::Stay`] whether the user returned or cancelled, so the
    /// enclosing group shows its menu again.
    pub fn run(&self, session: &mut Session<'_>) -> Result<Flow> {
        loop {
            let Some(args) = self.collect(session)? else {
                debug!(formula = %self.name(), "run cancelled");
                return Ok(Flow::Stay);
            };

            let output = self.call(&args).map_err(PromptError::from)?;
            if !output.is_none() {
                let title = session.theme.result_title(self.name());
                session.say(&title)?;
                session.say(&output.to_string())?;
            }

            session.say("\nEnter to run again or 0 to return...")?;
            if session.console.read_entry()?.trim() == RETURN_SENTINEL {
                return Ok(Flow::Stay);
            }
        }
    }

    /// Reads every input in order; `None` if one was abandoned.
    fn collect(&self, session: &mut Session<'_>) -> Result<Option<Args>> {
        let mut values = Vec::with_capacity(self.inputs().len());
        for input in self.inputs() {
            match session.read_input(input) {
                Ok(value) => values.push(value),
                Err(PromptError::Abandoned) => return Ok(None),
                Err(e) => return Err(e),
            }
        }
        Ok(Some(Args::new(values)))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use fprompt_core::console::ScriptedConsole;
    use fprompt_core::pipeline::InputPipeline;
    use fprompt_ui::Theme;
    use pretty_assertions::assert_eq;

    fn doubler() -> FormulaHandle {
        FormulaHandle::new(FormulaRecord::new(
            "math.double".into(),
            vec![Input::number("x")],
            Some(2),
            Box::new(|args: &Args| Ok(Output::Number(args.float(0)? * 2.0))),
        ))
    }

    fn run(formula: &FormulaHandle, lines: &[&str]) -> (Result<Flow>, String) {
        let mut console = ScriptedConsole::new(lines.iter().copied());
        let pipeline = InputPipeline::new();
        let result = {
            let mut session = Session::new(&mut console, &pipeline, Theme::plain());
            formula.run(&mut session)
        };
        (result, console.transcript().to_string())
    }

    #[test]
    fn call_applies_precision() {
        let out = doubler().call_with(vec![Value::Float(1.23456)]).unwrap();
        assert_eq!(out, Output::Number(2.47));
    }

    #[test]
    fn run_prints_result_then_returns_on_sentinel() {
        let (result, transcript) = run(&doubler(), &["1.5", "0"]);
        assert_eq!(result.unwrap(), Flow::Stay);
        assert_eq!(
            transcript,
            "Input x:\n>>> math.double:\n3.0\n\nEnter to run again or 0 to return...\n>>> "
        );
    }

    #[test]
    fn run_repeats_until_sentinel() {
        let (result, transcript) = run(&doubler(), &["1", "", "2", "0"]);
        assert_eq!(result.unwrap(), Flow::Stay);
        assert!(transcript.contains("2.0"));
        assert!(transcript.contains("4.0"));
    }

    #[test]
    fn abandoned_input_skips_the_body() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let formula = FormulaHandle::new(FormulaRecord::new(
            "count".into(),
            vec![Input::number("a"), Input::number("b")],
            None,
            Box::new(move |_: &Args| {
                seen.set(seen.get() + 1);
                Ok(Output::None)
            }),
        ));

        let (result, transcript) = run(&formula, &["1", "x", "y", "z"]);
        assert_eq!(result.unwrap(), Flow::Stay);
        assert_eq!(calls.get(), 0);
        assert!(!transcript.contains("Enter to run again"));
    }

    #[test]
    fn no_output_prints_nothing() {
        let formula = FormulaHandle::new(FormulaRecord::new(
            "silent".into(),
            vec![],
            None,
            Box::new(|_: &Args| Ok(Output::None)),
        ));
        let (_, transcript) = run(&formula, &["0"]);
        assert!(!transcript.contains("silent:"));
    }

    #[test]
    fn formula_errors_propagate() {
        let formula = FormulaHandle::new(FormulaRecord::new(
            "broken".into(),
            vec![],
            None,
            Box::new(|_: &Args| Err(FormulaError::domain("lists differ in length"))),
        ));
        let (result, _) = run(&formula, &[]);
        assert!(matches!(result, Err(PromptError::Formula(_))));
    }
}
