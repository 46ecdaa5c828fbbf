//! In-memory sink

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{indent, StatusSink, Symbol};

/// One call made on a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    Spinner { depth: usize, label: String },
    Relabel(String),
    Persist { symbol: Symbol, depth: usize, text: String },
    Line(String),
    Blank,
}

/// Records render calls instead of drawing them
///
/// Clones share the same record, so a handle kept by the caller sees what
/// the dispatcher rendered after the sink was moved into it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    renders: Arc<Mutex<Vec<Render>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Render>> {
        self.renders.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, render: Render) {
        self.lock().push(render);
    }

    /// Every render call so far, in order
    pub fn renders(&self) -> Vec<Render> {
        self.lock().clone()
    }

    /// The permanent output as it would appear on screen, one entry per line
    ///
    /// Spinners and relabels leave no trace; persisted lines use the plain
    /// `✓`/`✗` glyphs.
    pub fn transcript(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|render| match render {
                Render::Persist { symbol, depth, text } => Some(match symbol {
                    Symbol::Success => format!("{}✓ {}", indent(*depth), text),
                    Symbol::Failure => format!("{}✗ {}", indent(*depth), text),
                    Symbol::None => format!("{}{}", indent(*depth), text),
                }),
                Render::Line(text) => Some(text.clone()),
                Render::Blank => Some(String::new()),
                Render::Spinner { .. } | Render::Relabel(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl StatusSink for RecordingSink {
    async fn start_spinner(&mut self, depth: usize, label: &str) {
        self.push(Render::Spinner {
            depth,
            label: label.to_string(),
        });
    }

    async fn update_active_label(&mut self, label: &str) {
        self.push(Render::Relabel(label.to_string()));
    }

    async fn stop_and_persist(&mut self, symbol: Symbol, depth: usize, text: &str) {
        self.push(Render::Persist {
            symbol,
            depth,
            text: text.to_string(),
        });
    }

    async fn print_plain_line(&mut self, text: &str) {
        self.push(Render::Line(text.to_string()));
    }

    async fn print_blank_line(&mut self) {
        self.push(Render::Blank);
    }
}
