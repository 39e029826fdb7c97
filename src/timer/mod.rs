//! Countdown Timer
//!
//! Validates a duration, then ticks once per period rendering the remaining
//! `MM:SS` in place on one terminal line (carriage return, no newline),
//! and prints a final message when the count is exhausted.

use std::io::Write;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{Instant, MissedTickBehavior};

/// One tick per second.
pub const TICK: Duration = Duration::from_secs(1);

/// Usage line printed with validation errors and when no argument is given.
pub const USAGE: &str = "Usage: countdown <seconds>";

/// Exit status for a rejected duration.
pub const EXIT_USAGE: u8 = 2;

/// Final line, padded to overwrite the last `Time remaining` render.
pub const FINISHED: &str = "\rTimer finished!             \n";

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("Please provide a positive number for the duration in seconds (got '{0}').")]
    InvalidDuration(String),

    #[error("failed to write to the terminal: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a command-line duration. Fractions are floored; anything that is
/// not a finite number greater than zero is rejected.
pub fn parse_duration(raw: &str) -> Result<u64, TimerError> {
    let invalid = || TimerError::InvalidDuration(raw.to_string());
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 || value > u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(value.floor() as u64)
}

/// What the `countdown` binary does with its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// Count down this many seconds.
    Run(u64),
    /// Stop right away with this exit status.
    Exit(u8),
}

/// Check the command-line argument. No argument prints usage to `out` and
/// exits 0; a rejected one prints the error and usage to `err` and exits
/// with [`EXIT_USAGE`].
pub fn launch<O: Write, E: Write>(
    raw: Option<&str>,
    out: &mut O,
    err: &mut E,
) -> std::io::Result<Launch> {
    let Some(raw) = raw else {
        writeln!(out, "{}", USAGE)?;
        writeln!(out, "Example: countdown 60  (for a 1-minute timer)")?;
        return Ok(Launch::Exit(0));
    };

    match parse_duration(raw) {
        Ok(seconds) => Ok(Launch::Run(seconds)),
        Err(e) => {
            writeln!(err, "Error: {}", e)?;
            writeln!(err, "{}", USAGE)?;
            Ok(Launch::Exit(EXIT_USAGE))
        }
    }
}

/// A rendered tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Zero-padded `MM:SS` (minutes grow past two digits when needed).
    pub clock: String,
    /// This was the last tick.
    pub finished: bool,
}

/// Format whole seconds as zero-padded `MM:SS`.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Countdown state: whole seconds left, or `None` once finished.
#[derive(Debug, Clone)]
pub struct Countdown {
    total: u64,
    remaining: Option<u64>,
}

impl Countdown {
    pub fn new(seconds: u64) -> Self {
        Self {
            total: seconds,
            remaining: Some(seconds),
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.remaining.is_none()
    }

    /// Render the current value and count down by one. Returns `None` after
    /// the tick that rendered `00:00`.
    pub fn tick(&mut self) -> Option<Frame> {
        let current = self.remaining?;
        self.remaining = current.checked_sub(1);
        Some(Frame {
            clock: format_clock(current),
            finished: self.remaining.is_none(),
        })
    }

    /// Drive the countdown on a recurring interval, writing to `out`.
    ///
    /// The first tick fires one `period` after the start message.
    pub async fn run<W: Write>(mut self, out: &mut W, period: Duration) -> Result<(), TimerError> {
        writeln!(out, "Timer started for {} seconds.", self.total)?;
        out.flush()?;

        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let Some(frame) = self.tick() else {
                break;
            };
            // Trailing spaces wipe leftovers of a longer previous line
            write!(out, "\rTime remaining: {}   ", frame.clock)?;
            if frame.finished {
                out.write_all(FINISHED.as_bytes())?;
            }
            out.flush()?;
            if frame.finished {
                break;
            }
        }
        tracing::debug!("Countdown of {}s complete", self.total);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn frames(seconds: u64) -> Vec<Frame> {
        let mut countdown = Countdown::new(seconds);
        std::iter::from_fn(|| countdown.tick()).collect()
    }

    #[test]
    fn test_five_second_sequence() {
        let rendered = frames(5);
        let clocks: Vec<&str> = rendered.iter().map(|f| f.clock.as_str()).collect();
        assert_eq!(clocks, ["00:05", "00:04", "00:03", "00:02", "00:01", "00:00"]);
        assert!(rendered[..5].iter().all(|f| !f.finished));
        assert!(rendered[5].finished);
    }

    #[test]
    fn test_no_ticks_after_finish() {
        let mut countdown = Countdown::new(1);
        assert!(countdown.tick().is_some());
        assert!(countdown.tick().is_some());
        assert!(countdown.is_finished());
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.tick(), None);
    }

    #[rstest]
    #[case(0, "00:00")]
    #[case(5, "00:05")]
    #[case(65, "01:05")]
    #[case(125, "02:05")]
    #[case(3_599, "59:59")]
    #[case(6_000, "100:00")]
    fn test_format_clock(#[case] seconds: u64, #[case] expected: &str) {
        assert_eq!(format_clock(seconds), expected);
    }

    #[rstest]
    #[case("5", 5)]
    #[case(" 60 ", 60)]
    #[case("2.9", 2)]
    #[case("1e2", 100)]
    fn test_parse_valid(#[case] raw: &str, #[case] expected: u64) {
        assert_eq!(parse_duration(raw).expect("valid"), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("abc")]
    #[case("")]
    #[case("NaN")]
    #[case("inf")]
    #[case("-0.5")]
    #[case("12abc")]
    fn test_parse_invalid(#[case] raw: &str) {
        assert!(matches!(
            parse_duration(raw),
            Err(TimerError::InvalidDuration(got)) if got == raw
        ));
    }

    fn launch_with(raw: Option<&str>) -> (Launch, String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let launched = launch(raw, &mut out, &mut err).expect("write to buffers");
        (
            launched,
            String::from_utf8(out).expect("utf8"),
            String::from_utf8(err).expect("utf8"),
        )
    }

    #[test]
    fn test_launch_without_argument_prints_usage() {
        let (launched, out, err) = launch_with(None);
        assert_eq!(launched, Launch::Exit(0));
        assert!(out.starts_with(USAGE));
        assert!(out.contains("Example: countdown 60"));
        assert!(err.is_empty());
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("abc")]
    fn test_launch_rejects_with_usage(#[case] raw: &str) {
        let (launched, out, err) = launch_with(Some(raw));
        assert_eq!(launched, Launch::Exit(EXIT_USAGE));
        assert!(out.is_empty());
        assert_eq!(
            err,
            format!(
                "Error: Please provide a positive number for the duration in seconds (got '{}').\n{}\n",
                raw, USAGE
            )
        );
    }

    #[test]
    fn test_launch_accepts_valid_duration() {
        let (launched, out, err) = launch_with(Some("90"));
        assert_eq!(launched, Launch::Run(90));
        assert!(out.is_empty() && err.is_empty());
    }

    #[tokio::test]
    async fn test_run_renders_in_place() {
        let mut out: Vec<u8> = Vec::new();
        Countdown::new(5)
            .run(&mut out, Duration::from_millis(1))
            .await
            .expect("run");

        let text = String::from_utf8(out).expect("utf8");
        let ticks: String = ["00:05", "00:04", "00:03", "00:02", "00:01", "00:00"]
            .iter()
            .map(|clock| format!("\rTime remaining: {}   ", clock))
            .collect();
        let expected = format!("Timer started for 5 seconds.\n{}{}", ticks, FINISHED);
        assert_eq!(text, expected);
        assert_eq!(text.matches('\n').count(), 2);
    }

    #[tokio::test]
    async fn test_run_zero_renders_once() {
        let mut out: Vec<u8> = Vec::new();
        Countdown::new(0)
            .run(&mut out, Duration::from_millis(1))
            .await
            .expect("run");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.matches("Time remaining").count(), 1);
        assert!(text.ends_with(FINISHED));
    }

    proptest! {
        #[test]
        fn prop_one_frame_per_second_plus_zero(seconds in 0u64..5_000) {
            let rendered = frames(seconds);
            prop_assert_eq!(rendered.len() as u64, seconds + 1);
            prop_assert_eq!(rendered[0].clock.clone(), format_clock(seconds));
            prop_assert_eq!(rendered.last().map(|f| f.clock.as_str()), Some("00:00"));
            prop_assert_eq!(rendered.iter().filter(|f| f.finished).count(), 1);
        }
    }
}
