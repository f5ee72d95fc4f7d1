//! Core types for the formula prompt.
//!
//! This crate holds everything below the navigation layer: the values a user
//! can enter, the shapes a formula can return, the typed [`input::Input`]
//! readers with their bounded-retry loops, the pluggable preprocessing stage,
//! and the line-oriented [`console::Console`] they all read from.

pub mod console;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod rounding;
pub mod value;

pub use error::{FormulaError, PromptError, Result};

/// Number of consecutive invalid entries tolerated before an operation is abandoned.
pub const MAX_ENTRY_ATTEMPTS: u32 = 3;
