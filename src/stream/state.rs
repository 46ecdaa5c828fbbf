//! Aggregate run state

use std::time::{Duration, Instant};

use chrono::NaiveDateTime;

use crate::display::timing::elapsed_ms;

/// The test whose spinner is currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTest {
    pub name: String,
    /// Indentation of the spinner line
    pub depth: usize,
    pub started_at: NaiveDateTime,
}

/// Counters and bookkeeping for one run
///
/// `passing + failing` only ever grows. At most one test is active.
#[derive(Debug)]
pub struct RunState {
    /// Discovered test names still to be listed by the engine
    pending_discovery: usize,
    passing: usize,
    failing: usize,
    /// Deferred errors, shown if the run ends abnormally
    errors: Vec<String>,
    spawned_at: Instant,
    run_started: Option<NaiveDateTime>,
    initialized: bool,
    active: Option<ActiveTest>,
}

impl RunState {
    /// State for an editor spawned at `spawned_at`
    pub fn new(spawned_at: Instant) -> Self {
        Self {
            pending_discovery: 0,
            passing: 0,
            failing: 0,
            errors: Vec::new(),
            spawned_at,
            run_started: None,
            initialized: false,
            active: None,
        }
    }

    pub fn countdown_active(&self) -> bool {
        self.pending_discovery > 0
    }

    /// Record that the engine finished starting up
    ///
    /// Returns the startup duration the first time, `None` afterwards.
    pub fn initialize(&mut self, time: NaiveDateTime) -> Option<Duration> {
        self.run_started.get_or_insert(time);
        if self.initialized {
            return None;
        }
        self.initialized = true;
        Some(self.spawned_at.elapsed())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn begin_countdown(&mut self, count: usize) {
        self.pending_discovery = count;
    }

    /// One discovered test name was listed
    pub fn tick(&mut self) {
        self.pending_discovery = self.pending_discovery.saturating_sub(1);
    }

    pub fn record_error(&mut self, message: String) {
        self.errors.push(message);
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn active(&self) -> Option<&ActiveTest> {
        self.active.as_ref()
    }

    /// Make `test` the active test
    ///
    /// Callers settle any previously active test first.
    pub fn start_test(&mut self, test: ActiveTest) {
        debug_assert!(self.active.is_none(), "previous test still active");
        self.active = Some(test);
    }

    /// Count a reported result, returning the test it belongs to
    pub fn complete_test(&mut self, success: bool) -> Option<ActiveTest> {
        if success {
            self.passing += 1;
        } else {
            self.failing += 1;
        }
        self.active.take()
    }

    /// Fail the active test without a reported result
    pub fn abort_active(&mut self) -> Option<ActiveTest> {
        let test = self.active.take()?;
        self.failing += 1;
        Some(test)
    }

    /// Milliseconds between the start of the run and `now`
    pub fn run_elapsed_ms(&self, now: NaiveDateTime) -> i64 {
        self.run_started
            .map(|start| elapsed_ms(start, now))
            .unwrap_or(0)
    }

    pub fn passing(&self) -> usize {
        self.passing
    }

    pub fn failing(&self) -> usize {
        self.failing
    }

    /// Summary of the finished run
    pub fn into_summary(self, exit_code: i32, abnormal: bool) -> RunSummary {
        RunSummary {
            passing: self.passing,
            failing: self.failing,
            errors: self.errors,
            exit_code,
            abnormal,
        }
    }
}

/// Final record of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub passing: usize,
    pub failing: usize,
    pub errors: Vec<String>,
    /// The editor's exit code, which is also ours
    pub exit_code: i32,
    /// The editor quit mid-test, before initializing, or with a failure code
    pub abnormal: bool,
}

impl RunSummary {
    pub fn no_tests_ran(&self) -> bool {
        self.passing == 0 && self.failing == 0
    }
}
