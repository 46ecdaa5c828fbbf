//! Streaming log interpreter
//!
//! Turns the editor's stdout into a live report:
//!
//! ```text
//! bytes -> LineReassembler -> lines -> Classifier -> TestEvent -> Dispatcher
//!                                                                  |-> PathCursor
//!                                                                  |-> RunState
//!                                                                  '-> StatusSink
//! ```
//!
//! The reader task owns the reassembler; everything downstream lives on the
//! dispatch task behind the [`Gate`].

pub mod dispatch;
pub mod gate;
pub mod grammar;
pub mod lines;
pub mod path;
pub mod state;

pub use dispatch::Dispatcher;
pub use gate::{pump, Gate};
pub use grammar::{Classifier, TestEvent};
pub use lines::LineReassembler;
pub use path::{PathCursor, PathRender};
pub use state::{ActiveTest, RunState, RunSummary};
