//! Terminal UI helpers for the formula prompt.
//!
//! Provides terminal detection and the Ayu-themed [`styles::Theme`] used to
//! render menus, diagnostics and results.

pub mod styles;
pub mod terminal;

pub use styles::Theme;
