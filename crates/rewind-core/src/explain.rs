//! Step-by-step narration of a start-time subtraction
//!
//! Given the finish time, the duration, and the start time computed by the
//! codec, this derives the column arithmetic a learner would write down:
//! whether the minutes column needs to borrow an hour, and what the borrowed
//! values are.

use std::fmt;

use serde::Serialize;

use crate::time::{format_time, parse_time, split_clock};
use crate::Result;

/// Arithmetic behind one subtraction, derived from the final inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplanationTrace {
    /// Finish time as entered
    pub end_time: String,
    /// Start time computed from `end_time` and `duration_minutes`
    pub start_time: String,
    pub end_hour: i64,
    pub end_minute: i64,
    pub duration_minutes: i64,
    /// Whole hours in the duration
    pub duration_hours: i64,
    /// Minutes left over after the whole hours
    pub duration_remainder: i64,
    /// True when the minutes column is too small to subtract from
    pub needs_borrow: bool,
    /// Minutes column after borrowing one hour (always computed)
    pub borrowed_minute_value: i64,
    /// Hours column after lending one hour (always computed)
    pub borrowed_hour_value: i64,
}

/// One line of the narration, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplanationStep {
    /// Step 1: where we finished
    FinishTime { time: String },
    /// Step 2: how far to go back
    GoBack { minutes: i64 },
    /// Hour/minute columns with the amount being subtracted
    Columns {
        hour: i64,
        minute: i64,
        subtrahend: i64,
    },
    /// Borrow one hour into the minutes column
    Borrow {
        hour_from: i64,
        hour_to: i64,
        minute_from: i64,
        minute_to: i64,
    },
    /// Step 3: the answer
    Result { start_time: String },
}

impl ExplanationStep {
    /// Step number shown next to the numbered steps
    pub fn number(&self) -> Option<u8> {
        match self {
            ExplanationStep::FinishTime { .. } => Some(1),
            ExplanationStep::GoBack { .. } => Some(2),
            ExplanationStep::Result { .. } => Some(3),
            ExplanationStep::Columns { .. } | ExplanationStep::Borrow { .. } => None,
        }
    }
}

impl fmt::Display for ExplanationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplanationStep::FinishTime { time } => write!(f, "Finish time: {}.", time),
            ExplanationStep::GoBack { minutes } => write!(f, "Go back {} mins.", minutes),
            ExplanationStep::Columns {
                hour,
                minute,
                subtrahend,
            } => write!(f, "Hour : Min  {:>2} : {:<2}  -{}", hour, minute, subtrahend),
            ExplanationStep::Borrow {
                hour_from,
                hour_to,
                minute_from,
                minute_to,
            } => write!(
                f,
                "Borrow 1 Hour: {} becomes {}, {} becomes {}",
                hour_from, hour_to, minute_from, minute_to
            ),
            ExplanationStep::Result { start_time } => {
                write!(f, "Final Calculation: <- {}", start_time)
            }
        }
    }
}

/// Build the trace for a finish time, a duration and the computed start time
///
/// Performs no validation: `start_time` is assumed to come from
/// [`format_time`] applied to `parse_time(end_time) - duration_minutes`.
pub fn explain(end_time: &str, duration_minutes: i64, start_time: &str) -> ExplanationTrace {
    let parts = split_clock(end_time);
    let duration_remainder = duration_minutes.rem_euclid(60);

    ExplanationTrace {
        end_time: end_time.to_string(),
        start_time: start_time.to_string(),
        end_hour: parts.hour,
        end_minute: parts.minute,
        duration_minutes,
        duration_hours: duration_minutes.div_euclid(60),
        duration_remainder,
        needs_borrow: parts.minute < duration_remainder,
        borrowed_minute_value: parts.minute.saturating_add(60),
        borrowed_hour_value: parts.hour.saturating_sub(1),
    }
}

/// Compute the start time for `end_time` and `duration_minutes`, then explain it
pub fn solve(end_time: &str, duration_minutes: i64) -> ExplanationTrace {
    let start_minutes = parse_time(end_time).saturating_sub(duration_minutes);
    explain(end_time, duration_minutes, &format_time(start_minutes as f64))
}

impl ExplanationTrace {
    /// Narration steps in display order
    ///
    /// The borrow step only appears when the minutes column needs it.
    pub fn steps(&self) -> Vec<ExplanationStep> {
        let mut steps = vec![
            ExplanationStep::FinishTime {
                time: self.end_time.clone(),
            },
            ExplanationStep::GoBack {
                minutes: self.duration_minutes,
            },
            ExplanationStep::Columns {
                hour: self.end_hour,
                minute: self.end_minute,
                subtrahend: self.duration_minutes,
            },
        ];

        if self.needs_borrow {
            steps.push(ExplanationStep::Borrow {
                hour_from: self.end_hour,
                hour_to: self.borrowed_hour_value,
                minute_from: self.end_minute,
                minute_to: self.borrowed_minute_value,
            });
        }

        steps.push(ExplanationStep::Result {
            start_time: self.start_time.clone(),
        });

        steps
    }

    /// Pretty-printed JSON for machine consumers
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borrow_case() {
        let trace = solve("09:24", 34);
        assert_eq!(trace.start_time, "08:50");
        assert_eq!(trace.end_hour, 9);
        assert_eq!(trace.end_minute, 24);
        assert!(trace.needs_borrow);
        assert_eq!(trace.borrowed_minute_value, 84);
        assert_eq!(trace.borrowed_hour_value, 8);
    }

    #[test]
    fn test_no_borrow_case() {
        let trace = solve("10:50", 20);
        assert_eq!(trace.start_time, "10:30");
        assert!(!trace.needs_borrow);
        // Still computed, just not narrated
        assert_eq!(trace.borrowed_minute_value, 110);
    }

    #[test]
    fn test_equal_minutes_do_not_borrow() {
        let trace = solve("10:20", 20);
        assert_eq!(trace.start_time, "10:00");
        assert!(!trace.needs_borrow);
    }

    #[test]
    fn test_borrow_uses_minutes_past_the_hour() {
        // 90 min = 1 h 30 min; 20 < 30 so the minutes column borrows
        let trace = solve("10:20", 90);
        assert_eq!(trace.start_time, "08:50");
        assert_eq!(trace.duration_hours, 1);
        assert_eq!(trace.duration_remainder, 30);
        assert!(trace.needs_borrow);

        // 120 min = 2 h 0 min; nothing to borrow
        let trace = solve("10:20", 120);
        assert_eq!(trace.start_time, "08:20");
        assert!(!trace.needs_borrow);
    }

    #[test]
    fn test_crossing_midnight() {
        let trace = solve("00:10", 30);
        assert_eq!(trace.start_time, "23:40");
        assert!(trace.needs_borrow);
        assert_eq!(trace.borrowed_hour_value, -1);
    }

    #[test]
    fn test_start_time_matches_codec() {
        for (end, duration) in [("09:24", 34), ("10:50", 20), ("00:00", 180), ("23:59", 1)] {
            let trace = solve(end, duration);
            let expected = format_time((parse_time(end) - duration) as f64);
            assert_eq!(trace.start_time, expected);
        }
    }

    #[test]
    fn test_explain_uses_given_start_time() {
        let trace = explain("09:24", 34, "08:50");
        assert_eq!(trace.start_time, "08:50");
        assert_eq!(trace.end_time, "09:24");
    }

    #[test]
    fn test_steps_with_borrow() {
        let steps = solve("09:24", 34).steps();
        assert_eq!(steps.len(), 5);
        assert_eq!(
            steps[3],
            ExplanationStep::Borrow {
                hour_from: 9,
                hour_to: 8,
                minute_from: 24,
                minute_to: 84,
            }
        );
        assert_eq!(
            steps.last(),
            Some(&ExplanationStep::Result {
                start_time: "08:50".to_string()
            })
        );
    }

    #[test]
    fn test_steps_without_borrow() {
        let steps = solve("10:50", 20).steps();
        assert_eq!(steps.len(), 4);
        assert!(!steps
            .iter()
            .any(|s| matches!(s, ExplanationStep::Borrow { .. })));
    }

    #[test]
    fn test_step_numbers_and_text() {
        let steps = solve("09:24", 34).steps();
        let numbers: Vec<_> = steps.iter().filter_map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        assert_eq!(steps[0].to_string(), "Finish time: 09:24.");
        assert_eq!(steps[1].to_string(), "Go back 34 mins.");
        assert_eq!(
            steps[3].to_string(),
            "Borrow 1 Hour: 9 becomes 8, 24 becomes 84"
        );
    }

    #[test]
    fn test_to_json() {
        let json = solve("09:24", 34).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["start_time"], "08:50");
        assert_eq!(value["needs_borrow"], true);
        assert_eq!(value["borrowed_minute_value"], 84);
    }
}
