//! Log line grammar
//!
//! The automation framework announces discovery, test starts and results
//! with a handful of fixed log statements. Each is matched by one row of an
//! ordered rule table; the first matching row decides the line's event and
//! later rows are not consulted. Anything else is noise.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Format of the engine's `[2024.03.01-10.00.00:123]` line prefix
const TIMESTAMP_FORMAT: &str = "%Y.%m.%d-%H.%M.%S:%3f";

/// Byte range of the timestamp inside a log line (after the opening bracket)
const TIMESTAMP_RANGE: std::ops::Range<usize> = 1..24;

/// What a recognized log line means for the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestEvent {
    /// The project's game module was not built for this configuration
    ModuleMissing { name: String },
    /// Discovery finished; `count` enumeration lines follow
    TestsDiscovered { count: usize, time: NaiveDateTime },
    NoTestsMatched { time: NaiveDateTime },
    TestStarted {
        name: String,
        path: Vec<String>,
        time: NaiveDateTime,
    },
    TestCompleted {
        name: String,
        path: Vec<String>,
        success: bool,
        time: NaiveDateTime,
    },
    /// The engine hit a fatal error
    AppError { message: String },
    RunComplete { time: NaiveDateTime },
    /// One discovered test name was listed
    CountdownTick,
}

type Build = fn(&Captures<'_>, NaiveDateTime) -> Option<TestEvent>;

struct Rule {
    pattern: Regex,
    /// Only consulted while discovered test names are being listed
    countdown_only: bool,
    build: Build,
}

impl Rule {
    fn new(pattern: &str, countdown_only: bool, build: Build) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("invalid grammar regex"),
            countdown_only,
            build,
        }
    }
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"LogAutomationCommandLine: Display: \t", true, |_, _| {
            Some(TestEvent::CountdownTick)
        }),
        Rule::new(r"The game module '([^']*)' could not be found", false, |caps, _| {
            Some(TestEvent::ModuleMissing {
                name: caps[1].to_string(),
            })
        }),
        Rule::new(
            r"LogAutomationController: Display: Test Started\. Name=\{(.*?)\} Path=\{(.*)\}",
            false,
            |caps, time| {
                Some(TestEvent::TestStarted {
                    name: caps[1].to_string(),
                    path: group_path(&caps[2]),
                    time,
                })
            },
        ),
        Rule::new(
            r"LogAutomationController: (?:Display|Error): Test Completed\. Result=\{(.*?)\} Name=\{(.*?)\} Path=\{(.*)\}",
            false,
            |caps, time| {
                Some(TestEvent::TestCompleted {
                    name: caps[2].to_string(),
                    path: group_path(&caps[3]),
                    success: &caps[1] == "Success",
                    time,
                })
            },
        ),
        Rule::new(r"Error: appError called: (.*)", false, |caps, _| {
            Some(TestEvent::AppError {
                message: caps[1].to_string(),
            })
        }),
        Rule::new(r"TEST COMPLETE", false, |_, time| {
            Some(TestEvent::RunComplete { time })
        }),
        Rule::new(
            r"LogAutomationCommandLine: Error: No automation tests matched",
            false,
            |_, time| Some(TestEvent::NoTestsMatched { time }),
        ),
        Rule::new(
            r"LogAutomationCommandLine: Display: Found ([0-9]+) automation tests based on",
            false,
            |caps, time| {
                let count = caps[1].parse().ok()?;
                Some(TestEvent::TestsDiscovered { count, time })
            },
        ),
    ]
});

/// Group segments of a dotted test path; the last segment is the test itself
pub fn group_path(full: &str) -> Vec<String> {
    let mut segments: Vec<String> = full.split('.').map(str::to_string).collect();
    segments.pop();
    segments
}

/// The engine timestamp embedded at the start of `line`, if present
pub fn line_timestamp(line: &str) -> Option<NaiveDateTime> {
    let stamp = line.get(TIMESTAMP_RANGE)?;
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}

/// Classifies complete log lines into [`TestEvent`]s
///
/// Lines without an engine timestamp reuse the most recent one seen on any
/// line. Before the first timestamp the wall clock in UTC (the engine's
/// default log time zone) stands in.
#[derive(Debug, Default)]
pub struct Classifier {
    last_seen: Option<NaiveDateTime>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one line
    ///
    /// `countdown_active` enables the discovered-test listing rule, which
    /// then takes priority over every other rule.
    pub fn classify(&mut self, line: &str, countdown_active: bool) -> Option<TestEvent> {
        let time = self.line_time(line);

        RULES
            .iter()
            .filter(|rule| countdown_active || !rule.countdown_only)
            .find_map(|rule| rule.pattern.captures(line).map(|caps| (rule.build)(&caps, time)))
            .flatten()
    }

    fn line_time(&mut self, line: &str) -> NaiveDateTime {
        if let Some(time) = line_timestamp(line) {
            self.last_seen = Some(time);
            return time;
        }
        self.last_seen
            .unwrap_or_else(|| chrono::Utc::now().naive_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_milli_opt(h, m, s, ms)
            .unwrap()
    }

    #[test]
    fn test_line_timestamp() {
        let line = "[2024.03.01-10.15.42:071][  3]LogAutomationController: Display: Test Started. Name={A} Path={G.A}";
        assert_eq!(line_timestamp(line), Some(at(10, 15, 42, 71)));
        assert_eq!(line_timestamp("LogInit: Display: nothing here"), None);
        assert_eq!(line_timestamp("short"), None);
    }

    #[test]
    fn test_test_started() {
        let mut c = Classifier::new();
        let event = c.classify(
            "[2024.03.01-10.00.00:000][  0]LogAutomationController: Display: Test Started. Name={Loads Map} Path={Project.Maps.Loads Map}",
            false,
        );
        assert_eq!(
            event,
            Some(TestEvent::TestStarted {
                name: "Loads Map".to_string(),
                path: vec!["Project".to_string(), "Maps".to_string()],
                time: at(10, 0, 0, 0),
            })
        );
    }

    #[test]
    fn test_test_completed_display_and_error() {
        let mut c = Classifier::new();
        let pass = c.classify(
            "[2024.03.01-10.00.01:250][  0]LogAutomationController: Display: Test Completed. Result={Success} Name={A} Path={G.A}",
            false,
        );
        assert!(matches!(pass, Some(TestEvent::TestCompleted { success: true, .. })));

        let fail = c.classify(
            "[2024.03.01-10.00.02:000][  0]LogAutomationController: Error: Test Completed. Result={Fail} Name={B} Path={G.H.B}",
            false,
        );
        match fail {
            Some(TestEvent::TestCompleted { name, path, success, .. }) => {
                assert_eq!(name, "B");
                assert_eq!(path, vec!["G", "H"]);
                assert!(!success);
            }
            other => panic!("Expected TestCompleted, got {:?}", other),
        }
    }

    #[test]
    fn test_module_missing() {
        let mut c = Classifier::new();
        let event = c.classify(
            "LogModuleManager: Error: The game module 'MyGame' could not be found. Please ensure that this module exists and that it is compiled.",
            false,
        );
        assert_eq!(
            event,
            Some(TestEvent::ModuleMissing {
                name: "MyGame".to_string()
            })
        );
    }

    #[test]
    fn test_app_error_keeps_remainder() {
        let mut c = Classifier::new();
        let event = c.classify(
            "[2024.03.01-10.00.00:000][  0]LogWindows: Error: appError called: Assertion failed: x != nullptr",
            false,
        );
        assert_eq!(
            event,
            Some(TestEvent::AppError {
                message: "Assertion failed: x != nullptr".to_string()
            })
        );
    }

    #[test]
    fn test_discovery_and_no_match() {
        let mut c = Classifier::new();
        let found = c.classify(
            "[2024.03.01-10.00.00:000][  0]LogAutomationCommandLine: Display: Found 12 automation tests based on 'Project'",
            false,
        );
        assert!(matches!(found, Some(TestEvent::TestsDiscovered { count: 12, .. })));

        let none = c.classify(
            "LogAutomationCommandLine: Error: No automation tests matched 'Nope'",
            false,
        );
        assert_eq!(none, Some(TestEvent::NoTestsMatched { time: at(10, 0, 0, 0) }));
    }

    #[test]
    fn test_run_complete() {
        let mut c = Classifier::new();
        let event = c.classify("[2024.03.01-10.05.00:000][  0]LogAutomationCommandLine: Display: ...Automation Test Queue Empty 4 tests performed. **** TEST COMPLETE. EXIT CODE: 0 ****", false);
        assert_eq!(event, Some(TestEvent::RunComplete { time: at(10, 5, 0, 0) }));
    }

    #[test]
    fn test_countdown_rule_only_while_active() {
        let mut c = Classifier::new();
        let line = "LogAutomationCommandLine: Display: \tProject.Maps.Loads Map";
        assert_eq!(c.classify(line, true), Some(TestEvent::CountdownTick));
        assert_eq!(c.classify(line, false), None);
    }

    #[test]
    fn test_countdown_rule_takes_priority() {
        // A listed test name that happens to contain another rule's marker
        let mut c = Classifier::new();
        let line = "LogAutomationCommandLine: Display: \tProject.TEST COMPLETE";
        assert_eq!(c.classify(line, true), Some(TestEvent::CountdownTick));
        assert!(matches!(
            c.classify(line, false),
            Some(TestEvent::RunComplete { .. })
        ));
    }

    #[test]
    fn test_noise_is_ignored() {
        let mut c = Classifier::new();
        assert_eq!(c.classify("LogInit: Display: Engine is initialized.", false), None);
        assert_eq!(c.classify("", false), None);
    }

    #[test]
    fn test_missing_timestamp_reuses_last_seen() {
        let mut c = Classifier::new();
        c.classify("[2024.03.01-10.00.07:500][  0]LogTemp: unrelated", false);
        let event = c.classify("LogAutomationCommandLine: Error: No automation tests matched", false);
        assert_eq!(event, Some(TestEvent::NoTestsMatched { time: at(10, 0, 7, 500) }));
    }

    #[test]
    fn test_group_path() {
        assert_eq!(group_path("A.B.Test"), vec!["A", "B"]);
        assert_eq!(group_path("Test"), Vec::<String>::new());
        assert_eq!(group_path(""), Vec::<String>::new());
    }
}
