//! Ayu color theme for prompt output.
//!
//! Color source: <https://github.com/ayu-theme/ayu-colors>
//!
//! Only structure gets color: menu indices are muted, groups use the accent,
//! result titles use pass green and diagnostics use warn. Labels keep
//! their exact text so scripted sessions can match on them.

use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

/// Styling applied to everything the prompt prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    color: bool,
}

impl Theme {
    /// No escape codes at all.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Truecolor output regardless of the terminal.
    pub fn colored() -> Self {
        Self { color: true }
    }

    /// Colored when the environment and stdout allow it.
    pub fn detect() -> Self {
        Self {
            color: supports_color(),
        }
    }

    fn paint(&self, s: &str, rgb: (u8, u8, u8)) -> String {
        if self.color {
            s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
        } else {
            s.to_string()
        }
    }

    fn paint_bold(&self, s: &str, rgb: (u8, u8, u8)) -> String {
        if self.color {
            s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
        } else {
            s.to_string()
        }
    }

    /// One numbered menu line: `<index>:\t<label>`.
    pub fn menu_line(&self, index: usize, label: &str, kind: EntryStyle) -> String {
        let label = match kind {
            EntryStyle::Navigation => self.paint(label, MUTED),
            EntryStyle::Group => self.paint_bold(label, ACCENT),
            EntryStyle::Item => label.to_string(),
        };
        format!("{}\t{}", self.paint(&format!("{index}:"), MUTED), label)
    }

    /// Title printed above a formula result.
    pub fn result_title(&self, name: &str) -> String {
        self.paint_bold(&format!("{name}:"), PASS)
    }

    /// A recoverable input problem ("Invalid input. Try again.").
    pub fn warning(&self, message: &str) -> String {
        self.paint(message, WARN)
    }

    /// Secondary text such as hints and empty-state messages.
    pub fn muted(&self, message: &str) -> String {
        self.paint(message, MUTED)
    }

    /// A group heading in listings.
    pub fn heading(&self, label: &str) -> String {
        self.paint_bold(label, ACCENT)
    }
}

/// How a menu entry is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStyle {
    /// "Go back", "Quit" and extension entries.
    Navigation,
    /// A nested group.
    Group,
    /// A formula or other leaf.
    Item,
}
