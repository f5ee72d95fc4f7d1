//! Formula registration.
//!
//! ```ignore
//! registrar.register(
//!     FormulaSpec::new([Input::number("side length")]).named("geometry.cube"),
//!     |args: &Args| Ok(args.float(0)?.powi(3).into()),
//! )?;
//! ```
//!
//! Plain `fn` items may omit the name; their identifier is used instead.

use tracing::info;

use fprompt_core::error::FormulaError;
use fprompt_core::input::Input;
use fprompt_core::value::{Args, Output};

use crate::error::{RegistryError, Result};
use crate::formula::{FormulaHandle, FormulaRecord};
use crate::tree::MenuTree;

/// Decimal places used when neither the formula nor the configuration says otherwise.
pub const DEFAULT_DECIMAL_PLACES: u32 = 4;

/// Rounding requested by a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// Use the registrar's default.
    #[default]
    Default,
    /// Round to this many decimals.
    Places(u32),
    /// Never round.
    Exact,
}

impl Precision {
    fn resolve(self, default: Option<u32>) -> Option<u32> {
        match self {
            Self::Default => default,
            Self::Places(places) => Some(places),
            Self::Exact => None,
        }
    }
}

/// Everything about a formula except its body.
#[derive(Debug, Clone, Default)]
pub struct FormulaSpec {
    name: Option<String>,
    inputs: Vec<Input>,
    precision: Precision,
}

impl FormulaSpec {
    pub fn new<I>(inputs: I) -> Self
    where
        I: IntoIterator<Item = Input>,
    {
        Self {
            name: None,
            inputs: inputs.into_iter().collect(),
            precision: Precision::Default,
        }
    }

    /// Sets the dotted display name; each `.` opens a menu group.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn precision(mut self, places: u32) -> Self {
        self.precision = Precision::Places(places);
        self
    }

    pub fn no_rounding(mut self) -> Self {
        self.precision = Precision::Exact;
        self
    }
}

impl From<Input> for FormulaSpec {
    fn from(input: Input) -> Self {
        Self::new([input])
    }
}

impl From<Vec<Input>> for FormulaSpec {
    fn from(inputs: Vec<Input>) -> Self {
        Self::new(inputs)
    }
}

impl<const N: usize> From<[Input; N]> for FormulaSpec {
    fn from(inputs: [Input; N]) -> Self {
        Self::new(inputs)
    }
}

/// Builds the menu tree from formula registrations.
#[derive(Debug)]
pub struct Registrar {
    tree: MenuTree,
    default_precision: Option<u32>,
}

impl Registrar {
    pub fn new() -> Self {
        Self {
            tree: MenuTree::new(),
            default_precision: Some(DEFAULT_DECIMAL_PLACES),
        }
    }

    /// Precision applied to formulas registered afterwards with [`Precision::Default`].
    pub fn set_default_precision(&mut self, places: Option<u32>) {
        self.default_precision = places;
    }

    pub fn default_precision(&self) -> Option<u32> {
        self.default_precision
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    /// Registers `func` and inserts it into the menu tree.
    ///
    /// Returns a handle that can still be called directly.
    pub fn register<F>(&mut self, spec: impl Into<FormulaSpec>, func: F) -> Result<FormulaHandle>
    where
        F: Fn(&Args) -> std::result::Result<Output, FormulaError> + 'static,
    {
        let spec = spec.into();
        let name = match spec.name {
            Some(name) => name,
            None => callable_name::<F>()
                .ok_or(RegistryError::UnnamedCallable)?
                .to_string(),
        };
        let precision = spec.precision.resolve(self.default_precision);
        let handle = FormulaHandle::new(FormulaRecord::new(
            name,
            spec.inputs,
            precision,
            Box::new(func),
        ));
        self.tree.insert(handle.clone())?;
        info!(formula = handle.name(), arity = handle.inputs().len(), "formula registered");
        Ok(handle)
    }
}

impl Default for Registrar {
    fn default() -> Self {
        Self::new()
    }
}

/// The identifier of a `fn` item, or `None` for closures and other types.
fn callable_name<F>() -> Option<&'static str> {
    let last = std::any::type_name::<F>().rsplit("::").next()?;
    let is_ident = last
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && last.chars().all(|c| c.is_alphanumeric() || c == '_');
    is_ident.then_some(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fprompt_core::value::Value;
    use pretty_assertions::assert_eq;

    fn volume_of_cube(args: &Args) -> std::result::Result<Output, FormulaError> {
        Ok(args.float(0)?.powi(3).into())
    }

    #[test]
    fn fn_items_default_to_their_identifier() {
        let mut registrar = Registrar::new();
        let handle = registrar
            .register(Input::number("side length"), volume_of_cube)
            .unwrap();
        assert_eq!(handle.name(), "volume_of_cube");
        assert!(registrar.tree().find("volume_of_cube").is_some());
    }

    #[test]
    fn closures_need_a_name() {
        let mut registrar = Registrar::new();
        let err = registrar
            .register(Input::number("x"), |_: &Args| Ok(Output::None))
            .unwrap_err();
        assert_eq!(err, RegistryError::UnnamedCallable);
    }

    #[test]
    fn handle_stays_callable_and_rounds() {
        let mut registrar = Registrar::new();
        let third = registrar
            .register(
                FormulaSpec::new([Input::number("x")]).named("third").precision(3),
                |args: &Args| Ok((args.float(0)? / 3.0).into()),
            )
            .unwrap();
        assert_eq!(third.call_with(vec![Value::Float(1.0)]).unwrap(), Output::Number(0.333));
    }

    #[test]
    fn precision_resolution() {
        let mut registrar = Registrar::new();
        registrar.set_default_precision(Some(1));
        let default = registrar
            .register(FormulaSpec::new([]).named("a"), |_: &Args| Ok(Output::Number(1.26)))
            .unwrap();
        let exact = registrar
            .register(
                FormulaSpec::new([]).named("b").no_rounding(),
                |_: &Args| Ok(Output::Number(1.26)),
            )
            .unwrap();
        assert_eq!(default.precision(), Some(1));
        assert_eq!(default.call(&Args::default()).unwrap(), Output::Number(1.3));
        assert_eq!(exact.precision(), None);
        assert_eq!(exact.call(&Args::default()).unwrap(), Output::Number(1.26));
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registrar = Registrar::new();
        let spec = || FormulaSpec::new([]).named("stats.mean");
        registrar.register(spec(), |_: &Args| Ok(Output::None)).unwrap();
        let err = registrar
            .register(spec(), |_: &Args| Ok(Output::None))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName { .. }));
        assert_eq!(registrar.tree().formula_count(), 1);
    }
}
