//! Terminal sink backed by indicatif spinners

use std::time::Duration;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};

use super::{indent, Palette, StatusSink, Symbol};

/// Spinner redraw interval
const TICK: Duration = Duration::from_millis(80);

const SPINNER_TEMPLATE: &str = "{prefix}{spinner:.cyan} {msg}";
const PLAIN_SPINNER_TEMPLATE: &str = "{prefix}{spinner} {msg}";

/// Spinner layout, uncolored when the palette is off
fn spinner_template(palette: &Palette) -> &'static str {
    if palette.is_enabled() {
        SPINNER_TEMPLATE
    } else {
        PLAIN_SPINNER_TEMPLATE
    }
}

/// Draws spinners on stderr and persisted lines on stdout
///
/// indicatif hides the spinner when stderr is not a terminal, so piped
/// output contains only the persisted report.
pub struct TerminalSink {
    palette: Palette,
    active: Option<ProgressBar>,
}

impl TerminalSink {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            active: None,
        }
    }

    fn spinner(&self, depth: usize, label: &str) -> ProgressBar {
        let style = ProgressStyle::with_template(spinner_template(&self.palette))
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.set_prefix(indent(depth));
        pb.set_message(label.to_string());
        pb.enable_steady_tick(TICK);
        pb
    }

    /// Print above the active spinner without tearing it
    fn println(&self, line: &str) {
        match &self.active {
            Some(pb) => pb.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }
}

#[async_trait]
impl StatusSink for TerminalSink {
    async fn start_spinner(&mut self, depth: usize, label: &str) {
        if let Some(previous) = self.active.take() {
            previous.finish_and_clear();
        }
        self.active = Some(self.spinner(depth, label));
    }

    async fn update_active_label(&mut self, label: &str) {
        if let Some(pb) = &self.active {
            pb.set_message(label.to_string());
        }
    }

    async fn stop_and_persist(&mut self, symbol: Symbol, depth: usize, text: &str) {
        if let Some(pb) = self.active.take() {
            pb.finish_and_clear();
        }
        let line = match symbol {
            Symbol::None => format!("{}{}", indent(depth), text),
            marker => format!("{}{} {}", indent(depth), self.palette.symbol(marker), text),
        };
        println!("{line}");
    }

    async fn print_plain_line(&mut self, text: &str) {
        self.println(text);
    }

    async fn print_blank_line(&mut self) {
        self.println("");
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        if let Some(pb) = self.active.take() {
            pb.finish_and_clear();
        }
    }
}
