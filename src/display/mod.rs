//! Status display
//!
//! The live report is drawn through a [`StatusSink`]: at most one spinner is
//! active at a time, and finished work is persisted as permanent lines.
//! [`TerminalSink`] draws to the terminal; [`RecordingSink`] keeps the render
//! calls in memory.

pub mod memory;
pub mod palette;
pub mod terminal;
pub mod timing;

use async_trait::async_trait;

pub use memory::{Render, RecordingSink};
pub use palette::{Palette, Tone};
pub use terminal::TerminalSink;

/// Marker shown in front of a persisted line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Success,
    Failure,
    /// No marker, the text starts right after the indentation
    None,
}

/// Live display surface
///
/// Depths are indentation levels of two spaces each.
#[async_trait]
pub trait StatusSink: Send {
    /// Start a spinner, replacing any active one
    async fn start_spinner(&mut self, depth: usize, label: &str);

    /// Change the label of the active spinner
    async fn update_active_label(&mut self, label: &str);

    /// Stop the active spinner (if any) and print a permanent line in its place
    async fn stop_and_persist(&mut self, symbol: Symbol, depth: usize, text: &str);

    /// Print a permanent line, leaving the active spinner running
    async fn print_plain_line(&mut self, text: &str);

    async fn print_blank_line(&mut self);
}

/// Indentation for `depth`
pub fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
