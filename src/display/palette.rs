//! Report colors

use colored::Colorize;

use super::Symbol;

/// Semantic colors used by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Name of a passing test
    Pass,
    /// Name of a failing test, error text
    Fail,
    /// Passing total
    Green,
    /// "No tests matched" notice
    BrightYellow,
    /// Secondary information
    Light,
    /// Timing under 200ms
    Fast,
    /// Timing under one second
    Medium,
    /// Timing over one second
    Slow,
}

/// Applies [`Tone`]s, or leaves text alone when color is disabled
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match tone {
            Tone::Pass | Tone::Light | Tone::Fast => text.bright_black().to_string(),
            Tone::Fail | Tone::Slow => text.red().to_string(),
            Tone::Green => text.green().to_string(),
            Tone::BrightYellow => text.bright_yellow().to_string(),
            Tone::Medium => text.yellow().to_string(),
        }
    }

    /// Glyph for a persisted line marker
    pub fn symbol(&self, symbol: Symbol) -> String {
        match symbol {
            Symbol::Success if self.enabled => "✓".green().to_string(),
            Symbol::Failure if self.enabled => "✗".red().to_string(),
            Symbol::Success => "✓".to_string(),
            Symbol::Failure => "✗".to_string(),
            Symbol::None => String::new(),
        }
    }
}
