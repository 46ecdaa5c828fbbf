//! Elapsed time annotations

use chrono::NaiveDateTime;

use super::{Palette, Tone};

/// Above this a test is painted as slow
const SLOW_MS: i64 = 1000;
/// Above this a test is painted as medium
const MEDIUM_MS: i64 = 200;

/// Milliseconds from `start` to `stop`, never negative
pub fn elapsed_ms(start: NaiveDateTime, stop: NaiveDateTime) -> i64 {
    (stop - start).num_milliseconds().max(0)
}

/// Tone for a duration of `ms`; always [`Tone::Fast`] when `ignore_speed`
pub fn speed_tone(ms: i64, ignore_speed: bool) -> Tone {
    if ignore_speed || ms <= MEDIUM_MS {
        Tone::Fast
    } else if ms > SLOW_MS {
        Tone::Slow
    } else {
        Tone::Medium
    }
}

/// `(123ms)`, colored by speed unless `ignore_speed`
pub fn time_text(palette: &Palette, ms: i64, ignore_speed: bool) -> String {
    palette.paint(speed_tone(ms, ignore_speed), &format!("({ms}ms)"))
}
