//! Pure interpolation for a single rewind run
//!
//! Nothing here reads a clock: every function takes the current instant as a
//! parameter, so a run can be replayed against any frame schedule.

use std::time::{Duration, Instant};

use crate::time::{format_time, get_rotation, RotationAngles};

/// Length of the rewind animation
pub const DEFAULT_REWIND_WINDOW: Duration = Duration::from_millis(3000);

/// Calculate animation progress (0.0 to 1.0) at `now`
///
/// Instants before `start` count as zero elapsed time. A zero-length window
/// is always complete.
#[inline]
pub fn progress(start: Instant, now: Instant, window: Duration) -> f64 {
    if window.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / window.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if the window has fully elapsed at `now`
#[inline]
pub fn is_complete(start: Instant, now: Instant, window: Duration) -> bool {
    now.saturating_duration_since(start) >= window
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// One published display value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Minutes since midnight shown on the clock (may be fractional or negative)
    pub displayed_minutes: f64,
    /// 1.0 at the finish time, 0.0 once rewound to the start time
    pub visual_progress: f64,
}

impl Sample {
    /// The resting sample: finish time, full progress
    pub fn at_end(end_minutes: i64) -> Self {
        Self {
            displayed_minutes: end_minutes as f64,
            visual_progress: 1.0,
        }
    }

    /// Displayed value as `HH:MM`
    pub fn clock(&self) -> String {
        format_time(self.displayed_minutes)
    }

    /// Hand angles for the displayed value
    pub fn rotation(&self) -> RotationAngles {
        get_rotation(self.displayed_minutes)
    }
}

/// Snapshot of the inputs a run was started with
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRun {
    pub(crate) id: u64,
    pub end_time: String,
    pub end_minutes: i64,
    pub duration_minutes: i64,
    pub started_at: Instant,
    /// Highest raw progress published so far
    pub(crate) reached: f64,
}

impl AnimationRun {
    pub(crate) fn new(
        id: u64,
        end_time: String,
        duration_minutes: i64,
        started_at: Instant,
    ) -> Self {
        let end_minutes = crate::time::parse_time(&end_time);
        Self {
            id,
            end_time,
            end_minutes,
            duration_minutes,
            started_at,
            reached: 0.0,
        }
    }

    /// Exact value the run settles on
    pub fn start_minutes(&self) -> i64 {
        self.end_minutes.saturating_sub(self.duration_minutes)
    }

    /// Raw progress published most recently (0.0 to 1.0)
    pub fn reached(&self) -> f64 {
        self.reached
    }
}

/// Result of advancing a run to some instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Still inside the window; keep requesting frames
    Continue { sample: Sample, raw_progress: f64 },
    /// Window elapsed; the sample is the exact analytic start value
    Settle(Sample),
}

/// Interpolate `run` at `now`
///
/// The displayed value moves linearly from `end_minutes` (raw progress 0)
/// to `end_minutes - duration_minutes` (raw progress 1). Progress never
/// drops below what the run already reached, so a host clock that steps
/// backward cannot make the animation run in reverse.
pub fn advance(run: &AnimationRun, now: Instant, window: Duration) -> Step {
    if is_complete(run.started_at, now, window) {
        return Step::Settle(Sample {
            displayed_minutes: run.start_minutes() as f64,
            visual_progress: 0.0,
        });
    }

    let raw_progress = progress(run.started_at, now, window).max(run.reached);
    let end = run.end_minutes as f64;
    let displayed_minutes = lerp(end, end - run.duration_minutes as f64, raw_progress);

    Step::Continue {
        sample: Sample {
            displayed_minutes,
            visual_progress: 1.0 - raw_progress,
        },
        raw_progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_at(start: Instant) -> AnimationRun {
        AnimationRun::new(1, "09:24".to_string(), 34, start)
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
        assert!((lerp(564.0, 530.0, 0.5) - 547.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_window() {
        let start = Instant::now();
        assert!((progress(start, start, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_clamps() {
        let start = Instant::now();
        let window = Duration::from_millis(3000);
        assert_eq!(progress(start, start, window), 0.0);
        assert!((progress(start, start + Duration::from_millis(750), window) - 0.25).abs() < 1e-9);
        assert_eq!(progress(start, start + Duration::from_secs(10), window), 1.0);
    }

    #[test]
    fn test_progress_before_start_is_zero() {
        let now = Instant::now();
        let start = now + Duration::from_millis(500);
        assert_eq!(progress(start, now, DEFAULT_REWIND_WINDOW), 0.0);
        assert!(!is_complete(start, now, DEFAULT_REWIND_WINDOW));
    }

    #[test]
    fn test_advance_midway() {
        let start = Instant::now();
        let run = run_at(start);
        match advance(&run, start + Duration::from_millis(1500), DEFAULT_REWIND_WINDOW) {
            Step::Continue {
                sample,
                raw_progress,
            } => {
                assert!((raw_progress - 0.5).abs() < 1e-9);
                assert!((sample.displayed_minutes - 547.0).abs() < 1e-9);
                assert!((sample.visual_progress - 0.5).abs() < 1e-9);
            }
            other => panic!("expected Continue, got {:?}", other),
        }
    }

    #[test]
    fn test_advance_settles_exactly() {
        let start = Instant::now();
        let run = run_at(start);
        let step = advance(&run, start + DEFAULT_REWIND_WINDOW, DEFAULT_REWIND_WINDOW);
        assert_eq!(
            step,
            Step::Settle(Sample {
                displayed_minutes: 530.0,
                visual_progress: 0.0,
            })
        );
    }

    #[test]
    fn test_advance_never_goes_backward() {
        let start = Instant::now();
        let mut run = run_at(start);
        run.reached = 0.6;
        match advance(&run, start + Duration::from_millis(300), DEFAULT_REWIND_WINDOW) {
            Step::Continue { raw_progress, .. } => assert!((raw_progress - 0.6).abs() < 1e-9),
            other => panic!("expected Continue, got {:?}", other),
        }
    }

    #[test]
    fn test_sample_helpers() {
        let sample = Sample::at_end(564);
        assert_eq!(sample.clock(), "09:24");
        assert_eq!(sample.visual_progress, 1.0);

        let negative = Sample {
            displayed_minutes: -10.0,
            visual_progress: 0.0,
        };
        assert_eq!(negative.clock(), "23:50");
        assert!((negative.rotation().minute_degrees - 300.0).abs() < 1e-9);
    }
}
