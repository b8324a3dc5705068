//! Builder‐style helper for constructing **Markdown** text.
//!
//! Used both for prompt fragments and for rendering generated articles and
//! the history panel.  Every method returns `self`, enabling call-chaining:
//!
//! ```rust
//! use scribe_prompt::builder::PromptBuilder;
//!
//! let md = PromptBuilder::new()
//!     .add_section_h2("Why Rust Wins")
//!     .add_blank_line()
//!     .add_line("Memory safety without a garbage collector.")
//!     .finalize();
//!
//! assert!(md.starts_with("## Why Rust Wins\n\n"));
//! ```
//!
//! Newlines and whitespace are emitted exactly as requested; the builder does
//! no smart formatting.

use std::fmt::{Display, Write as _};

/// Fluent helper to produce markdown fragments.
pub struct PromptBuilder {
    buffer: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    /// Create a fresh, empty builder.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Add a level-1 (`#`) heading.
    pub fn add_section_h1(self, line: impl Display) -> Self {
        self.add_line(format_args!("# {line}"))
    }

    /// Add a level-2 (`##`) heading.
    pub fn add_section_h2(self, line: impl Display) -> Self {
        self.add_line(format_args!("## {line}"))
    }

    /// Add a plain line of text and a trailing newline.
    pub fn add_line(mut self, line: impl Display) -> Self {
        // Writing into a `String` cannot fail.
        let _ = writeln!(self.buffer, "{line}");
        self
    }

    /// Add a numbered list item: `{n}. text`.
    pub fn add_numbered(self, n: usize, line: impl Display) -> Self {
        self.add_line(format_args!("{n}. {line}"))
    }

    /// Insert a single blank line.
    pub fn add_blank_line(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Retrieve the accumulated markdown and consume the builder.
    pub fn finalize(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_headings_and_lists() {
        let md = PromptBuilder::new()
            .add_section_h1("History")
            .add_numbered(1, "First")
            .add_numbered(2, "Second")
            .finalize();

        assert_eq!(md, "# History\n1. First\n2. Second\n");
    }
}
