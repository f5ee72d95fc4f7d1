//! Values entered by the user and results produced by formulas.

use std::fmt;

use indexmap::IndexMap;

use crate::error::FormulaError;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A value collected from the user for one formula argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A floating-point number.
    Float(f64),
    /// An integer.
    Int(i64),
    /// A list of floating-point numbers.
    List(Vec<f64>),
}

impl Value {
    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Float(_) => "a number",
            Self::Int(_) => "an integer",
            Self::List(_) => "a list",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::List(items) => write!(f, "{items:?}"),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<Vec<f64>> for Value {
    fn from(items: Vec<f64>) -> Self {
        Self::List(items)
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// What a formula returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Nothing to display.
    None,
    /// A single floating-point number.
    Number(f64),
    /// An integer.
    Int(i64),
    /// A list of numbers (e.g. a sorted sample).
    List(Vec<f64>),
    /// Free-form text.
    Text(String),
    /// Named sub-results, displayed in insertion order.
    Map(IndexMap<String, Output>),
}

impl Output {
    /// Returns `true` if there is nothing to display.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Builds a [`Output::Map`] from `(name, value)` pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Output>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Number(x) => write!(f, "{x:?}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::List(items) => write!(f, "{items:?}"),
            Self::Text(s) => f.write_str(s),
            Self::Map(entries) => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<f64> for Output {
    fn from(x: f64) -> Self {
        Self::Number(x)
    }
}

impl From<i64> for Output {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<Vec<f64>> for Output {
    fn from(items: Vec<f64>) -> Self {
        Self::List(items)
    }
}

impl From<String> for Output {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Output {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<()> for Output {
    fn from(_: ()) -> Self {
        Self::None
    }
}

impl<T: Into<Output>> From<Option<T>> for Output {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Args
// ---------------------------------------------------------------------------

/// Positional arguments handed to a formula body, in declared input order.
///
/// An entry is `None` when an optional input was left blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<Option<Value>>,
}

impl Args {
    pub fn new(values: Vec<Option<Value>>) -> Self {
        Self { values }
    }

    /// Number of arguments, including absent optional ones.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw value at `index`, or `None` if absent or out of range.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// A required number. Integers are widened to `f64`.
    pub fn float(&self, index: usize) -> Result<f64, FormulaError> {
        self.opt_float(index)?
            .ok_or(FormulaError::MissingArgument { index })
    }

    /// An optional number. Integers are widened to `f64`.
    pub fn opt_float(&self, index: usize) -> Result<Option<f64>, FormulaError> {
        match self.get(index) {
            None => Ok(None),
            Some(Value::Float(x)) => Ok(Some(*x)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)),
            Some(other) => Err(type_error(index, "a number", other)),
        }
    }

    /// A required integer.
    pub fn int(&self, index: usize) -> Result<i64, FormulaError> {
        self.opt_int(index)?
            .ok_or(FormulaError::MissingArgument { index })
    }

    /// An optional integer. Floats with no fractional part are accepted.
    pub fn opt_int(&self, index: usize) -> Result<Option<i64>, FormulaError> {
        match self.get(index) {
            None => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(Value::Float(x)) if x.fract() == 0.0 && x.is_finite() => Ok(Some(*x as i64)),
            Some(other) => Err(type_error(index, "an integer", other)),
        }
    }

    /// A required list of numbers.
    pub fn list(&self, index: usize) -> Result<&[f64], FormulaError> {
        match self.get(index) {
            None => Err(FormulaError::MissingArgument { index }),
            Some(Value::List(items)) => Ok(items),
            Some(other) => Err(type_error(index, "a list", other)),
        }
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values.into_iter().map(Some).collect())
    }
}

fn type_error(index: usize, expected: &'static str, found: &Value) -> FormulaError {
    FormulaError::ArgumentType {
        index,
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn value_display_matches_entry_format() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::List(vec![2.0, 4.5]).to_string(), "[2.0, 4.5]");
    }

    #[test]
    fn map_output_displays_one_entry_per_line() {
        let out = Output::map([("P/A", 8.5302), ("A/P", 0.1172)]);
        assert_eq!(out.to_string(), "P/A: 8.5302\nA/P: 0.1172");
    }

    #[test]
    fn args_widen_integers() {
        let args = Args::from(vec![Value::Int(3)]);
        assert_eq!(args.float(0).unwrap(), 3.0);
    }

    #[test]
    fn args_report_missing_and_mistyped() {
        let args = Args::new(vec![None, Some(Value::List(vec![1.0]))]);
        assert_eq!(args.opt_float(0).unwrap(), None);
        assert_eq!(
            args.float(0).unwrap_err(),
            FormulaError::MissingArgument { index: 0 }
        );
        assert_eq!(
            args.float(1).unwrap_err(),
            FormulaError::ArgumentType {
                index: 1,
                expected: "a number",
                found: "a list",
            }
        );
        assert_eq!(args.list(1).unwrap(), &[1.0]);
    }

    #[test]
    fn option_into_output() {
        assert!(Output::from(None::<f64>).is_none());
        assert_eq!(Output::from(Some(1.5)), Output::Number(1.5));
    }
}
