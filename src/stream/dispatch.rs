//! Event dispatch
//!
//! The [`Dispatcher`] owns everything a run mutates: the classifier's time
//! memory, the aggregate [`RunState`], the [`PathCursor`] and the sink. It
//! applies events strictly in the order lines arrive.

use std::time::Instant;

use chrono::NaiveDateTime;

use crate::display::timing::{elapsed_ms, time_text};
use crate::display::{indent, Palette, StatusSink, Symbol, Tone};

use super::grammar::{Classifier, TestEvent};
use super::path::PathCursor;
use super::state::{ActiveTest, RunState, RunSummary};

/// Annotation for a test cut short by the engine going down
const EXITED_MID_TEST: &str = "Unreal exited before test finished";

/// Annotation for a test superseded by the next one without a result
const NO_RESULT: &str = "did not report a result";

/// Applies classified log lines to the run state and the display
pub struct Dispatcher<S> {
    classifier: Classifier,
    state: RunState,
    cursor: PathCursor,
    sink: S,
    palette: Palette,
    /// Test pattern, quoted when nothing matched
    pattern: String,
}

impl<S: StatusSink> Dispatcher<S> {
    /// A dispatcher for an editor launched now
    pub fn new(sink: S, palette: Palette, pattern: impl Into<String>) -> Self {
        Self {
            classifier: Classifier::new(),
            state: RunState::new(Instant::now()),
            cursor: PathCursor::new(),
            sink,
            palette,
            pattern: pattern.into(),
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Show the startup spinner
    pub async fn starting(&mut self) {
        self.sink.start_spinner(0, "Starting Unreal").await;
    }

    /// The editor process is up
    pub async fn spawned(&mut self, pid: u32) {
        self.sink
            .update_active_label(&format!("Starting Unreal (pid {pid})"))
            .await;
    }

    /// Dispatch the lines reassembled from one chunk, in order
    pub async fn dispatch_batch(&mut self, lines: &[String]) {
        tracing::trace!(lines = lines.len(), "Dispatching batch");
        for line in lines {
            self.dispatch_line(line).await;
        }
    }

    pub async fn dispatch_line(&mut self, line: &str) {
        if let Some(event) = self.classifier.classify(line, self.state.countdown_active()) {
            tracing::debug!(?event, "Classified line");
            self.apply(event).await;
        }
    }

    /// Apply one event
    pub async fn apply(&mut self, event: TestEvent) {
        match event {
            TestEvent::ModuleMissing { name } => self.state.record_error(format!(
                "Missing game module: {name}; did you compile the right target for this configuration?"
            )),
            TestEvent::TestsDiscovered { count, time } => {
                tracing::info!(count, "Tests discovered");
                self.initialized(time).await;
                self.state.begin_countdown(count);
            }
            TestEvent::NoTestsMatched { time } => self.initialized(time).await,
            TestEvent::CountdownTick => self.state.tick(),
            TestEvent::TestStarted { name, path, time } => {
                self.test_started(name, path, time).await
            }
            TestEvent::TestCompleted {
                name,
                path,
                success,
                time,
            } => self.test_completed(name, path, success, time).await,
            TestEvent::AppError { message } => self.app_error(message).await,
            TestEvent::RunComplete { time } => self.run_complete(time).await,
        }
    }

    async fn initialized(&mut self, time: NaiveDateTime) {
        if let Some(startup) = self.state.initialize(time) {
            let ms = i64::try_from(startup.as_millis()).unwrap_or(i64::MAX);
            let text = format!("Unreal Initialized {}", time_text(&self.palette, ms, true));
            self.sink.stop_and_persist(Symbol::None, 0, &text).await;
        }
    }

    async fn test_started(&mut self, name: String, path: Vec<String>, time: NaiveDateTime) {
        if !self.state.is_initialized() {
            self.initialized(time).await;
        }

        if let Some(previous) = self.state.abort_active() {
            tracing::warn!(
                test = %previous.name,
                next = %name,
                "Test started before the previous one reported a result"
            );
            self.persist_failure(&previous, NO_RESULT).await;
        }

        let render = self.cursor.advance(&path);
        if render.separator {
            self.sink.print_blank_line().await;
        }
        for (depth, label) in &render.segments {
            self.sink
                .print_plain_line(&format!("{}{}", indent(*depth), label))
                .await;
        }

        let depth = path.len() + 1;
        self.sink.start_spinner(depth, &name).await;
        self.state.start_test(ActiveTest {
            name,
            depth,
            started_at: time,
        });
    }

    async fn test_completed(
        &mut self,
        name: String,
        path: Vec<String>,
        success: bool,
        time: NaiveDateTime,
    ) {
        let (depth, started_at) = match self.state.complete_test(success) {
            Some(active) => {
                if active.name != name {
                    tracing::warn!(started = %active.name, completed = %name, "Result for a different test");
                }
                (active.depth, active.started_at)
            }
            None => {
                tracing::warn!(test = %name, "Result for a test that never started");
                (path.len() + 1, time)
            }
        };

        let (symbol, tone) = if success {
            (Symbol::Success, Tone::Pass)
        } else {
            (Symbol::Failure, Tone::Fail)
        };
        let text = format!(
            "{} {}",
            self.palette.paint(tone, &name),
            time_text(&self.palette, elapsed_ms(started_at, time), false)
        );
        self.sink.stop_and_persist(symbol, depth, &text).await;
    }

    async fn app_error(&mut self, message: String) {
        tracing::warn!(%message, "Unreal app error");
        if let Some(test) = self.state.abort_active() {
            self.persist_failure(&test, EXITED_MID_TEST).await;
            self.sink.print_blank_line().await;
        }
        let line = self
            .palette
            .paint(Tone::Fail, &format!("  Unreal App Error: {message}"));
        self.sink.print_plain_line(&line).await;
    }

    async fn run_complete(&mut self, time: NaiveDateTime) {
        let ms = self.state.run_elapsed_ms(time);
        self.sink.print_blank_line().await;
        let line = self
            .palette
            .paint(Tone::Light, &format!("  Tests finished ({ms}ms)"));
        self.sink.print_plain_line(&line).await;
    }

    async fn persist_failure(&mut self, test: &ActiveTest, reason: &str) {
        let text = self
            .palette
            .paint(Tone::Fail, &format!("{} ({reason})", test.name));
        self.sink
            .stop_and_persist(Symbol::Failure, test.depth, &text)
            .await;
    }

    /// The editor exited with `exit_code`: settle open work and print totals
    ///
    /// Must only be called once every batch has been dispatched.
    pub async fn finish(mut self, exit_code: i32) -> RunSummary {
        self.sink.print_blank_line().await;

        let interrupted = self.state.abort_active();
        let initialized = self.state.is_initialized();

        if let Some(test) = &interrupted {
            tracing::warn!(test = %test.name, exit_code, "Unreal exited mid-test");
            self.persist_failure(test, EXITED_MID_TEST).await;
        } else if !initialized {
            tracing::warn!(exit_code, "Unreal exited before initializing");
            let text = self
                .palette
                .paint(Tone::Fail, "Unreal exited before running tests");
            self.sink.stop_and_persist(Symbol::Failure, 0, &text).await;
        }
        if interrupted.is_some() || !initialized {
            self.sink.print_blank_line().await;
        }

        let abnormal = interrupted.is_some() || !initialized || exit_code != 0;
        if abnormal && !self.state.errors().is_empty() {
            for error in self.state.errors() {
                let line = self.palette.paint(Tone::Fail, &format!("  {error}"));
                self.sink.print_plain_line(&line).await;
            }
            self.sink.print_blank_line().await;
        }

        let (passing, failing) = (self.state.passing(), self.state.failing());
        if passing > 0 {
            let text = self.palette.paint(Tone::Green, &format!("{passing} passing"));
            self.sink.print_plain_line(&format!("  {text}")).await;
        }
        if failing > 0 {
            let text = self.palette.paint(Tone::Fail, &format!("{failing} failing"));
            self.sink.print_plain_line(&format!("  {text}")).await;
        }
        if passing == 0 && failing == 0 {
            let text = self.palette.paint(
                Tone::BrightYellow,
                &format!("No tests matched the pattern \"{}\"", self.pattern),
            );
            self.sink.print_plain_line(&format!("  {text}")).await;
        }
        self.sink.print_blank_line().await;

        tracing::info!(passing, failing, exit_code, abnormal, "Run finished");
        self.state.into_summary(exit_code, abnormal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{RecordingSink, Render};

    const STAMP: &str = "[2024.03.01-10.00.01:000][  0]";

    fn dispatcher() -> (Dispatcher<RecordingSink>, RecordingSink) {
        let sink = RecordingSink::new();
        (Dispatcher::new(sink.clone(), Palette::plain(), "G"), sink)
    }

    #[tokio::test]
    async fn test_result_without_start_is_counted() {
        let (mut dispatcher, sink) = dispatcher();
        dispatcher
            .dispatch_line(&format!(
                "{STAMP}LogAutomationController: Error: Test Completed. Result={{Fail}} Name={{Orphan}} Path={{G.H.Orphan}}"
            ))
            .await;

        assert_eq!(dispatcher.state().failing(), 1);
        assert_eq!(
            sink.renders(),
            vec![Render::Persist {
                symbol: Symbol::Failure,
                depth: 3,
                text: "Orphan (0ms)".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_enumerated_names_are_swallowed() {
        let (mut dispatcher, sink) = dispatcher();
        dispatcher
            .dispatch_batch(&[
                format!("{STAMP}LogAutomationCommandLine: Display: Found 1 automation tests based on 'G'"),
                format!("{STAMP}LogAutomationCommandLine: Display: \tG.TEST COMPLETE"),
            ])
            .await;

        assert!(!dispatcher.state().countdown_active());
        assert!(!sink
            .transcript()
            .iter()
            .any(|line| line.contains("Tests finished")));
    }

    #[tokio::test]
    async fn test_run_complete_measures_from_discovery() {
        let (mut dispatcher, sink) = dispatcher();
        dispatcher
            .dispatch_batch(&[
                format!("{STAMP}LogAutomationCommandLine: Display: Found 0 automation tests based on 'G'"),
                "[2024.03.01-10.00.01:750][  9]LogAutomationCommandLine: Display: **** TEST COMPLETE. EXIT CODE: 0 ****".to_string(),
            ])
            .await;

        assert_eq!(
            sink.transcript().last(),
            Some(&"  Tests finished (750ms)".to_string())
        );
    }

    #[tokio::test]
    async fn test_app_error_between_tests() {
        let (mut dispatcher, sink) = dispatcher();
        dispatcher
            .dispatch_line(&format!("{STAMP}LogWindows: Error: appError called: Assertion failed"))
            .await;

        assert_eq!(dispatcher.state().failing(), 0);
        assert_eq!(
            sink.renders(),
            vec![Render::Line("  Unreal App Error: Assertion failed".to_string())]
        );
    }

    #[tokio::test]
    async fn test_finish_without_tests_keeps_exit_code() {
        let (dispatcher, sink) = dispatcher();
        let summary = dispatcher.finish(3).await;

        assert_eq!(summary.exit_code, 3);
        assert!(summary.abnormal);
        assert!(sink
            .transcript()
            .contains(&"✗ Unreal exited before running tests".to_string()));
    }
}
