//! Formula registry and interactive navigation.
//!
//! Formulas are registered under dotted names (`"stats.mean"`); every prefix
//! becomes a [`tree::Group`] in the menu. [`Prompt`] owns the tree, the input
//! pipeline and any extension entries, and [`Prompt::launch`] runs the menu
//! loop until the user quits.

pub mod error;
pub mod formula;
pub mod menu;
pub mod navigator;
pub mod prompt;
pub mod registrar;
pub mod session;
pub mod tree;

pub use error::RegistryError;
pub use formula::FormulaHandle;
pub use prompt::{Exit, Extension, Prompt};
pub use registrar::{FormulaSpec, Precision, Registrar};
pub use session::{Flow, MenuAction, Session};
