//! Unreal Test Wrapper - live reports for Unreal Automation runs
//!
//! This library launches the Unreal Editor headless on a test pattern and
//! interprets its log stream into a hierarchical, colorized test report.

pub mod commands;
pub mod common;
pub mod display;
pub mod engine;
pub mod runner;
pub mod stream;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use stream::{Dispatcher, RunSummary, TestEvent};
