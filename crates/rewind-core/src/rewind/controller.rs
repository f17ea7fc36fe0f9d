//! Rewind animation controller
//!
//! Owns the Idle -> Running -> Settled state machine and the two published
//! display values. The host drives it cooperatively: `start` hands back a
//! [`FrameTicket`], and each call to `tick` with that ticket either returns
//! the next ticket or ends the run. Nothing here spawns threads or sleeps.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::timing::{advance, AnimationRun, Sample, Step, DEFAULT_REWIND_WINDOW};
use crate::explain::{explain, ExplanationTrace};
use crate::time::{format_time, parse_time};

/// The two user inputs the controller animates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewindInputs {
    /// Finish time, `HH:MM`
    pub end_time: String,
    /// Minutes to go back
    pub duration_minutes: i64,
}

impl Default for RewindInputs {
    fn default() -> Self {
        Self {
            end_time: "09:24".to_string(),
            duration_minutes: 34,
        }
    }
}

impl RewindInputs {
    pub fn new(end_time: impl Into<String>, duration_minutes: i64) -> Self {
        Self {
            end_time: end_time.into(),
            duration_minutes,
        }
    }

    pub fn end_minutes(&self) -> i64 {
        parse_time(&self.end_time)
    }

    pub fn start_minutes(&self) -> i64 {
        self.end_minutes().saturating_sub(self.duration_minutes)
    }

    /// Start time as `HH:MM`
    pub fn start_time(&self) -> String {
        format_time(self.start_minutes() as f64)
    }
}

/// Controller state; exactly one is active at a time
#[derive(Debug, Clone, PartialEq)]
pub enum RewindState {
    /// Showing the finish time, nothing playing
    Idle,
    /// A run is in flight
    Running(AnimationRun),
    /// The last run finished; its explanation is available
    Settled(ExplanationTrace),
}

/// Permission to advance one specific run by one frame
///
/// Tickets from a run that has been canceled or has settled are stale and
/// advance nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket {
    run_id: u64,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum RewindEvent {
    /// New display values
    Frame(Sample),
    /// A run settled; show the narration
    ExplanationReady(ExplanationTrace),
    /// Any shown narration is no longer valid
    ExplanationCleared,
}

/// Result of [`RewindController::start`]
#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    /// A new run began; schedule a frame with `ticket`
    Started {
        ticket: FrameTicket,
        events: Vec<RewindEvent>,
    },
    /// A run is already in flight; nothing changed
    AlreadyRunning,
}

/// Result of [`RewindController::tick`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickOutcome {
    pub events: Vec<RewindEvent>,
    /// Ticket for the next frame, `None` once the run has ended
    pub next: Option<FrameTicket>,
}

/// Rewind animation controller
///
/// Call `start()` to begin a run, then `tick()` once per frame with the
/// returned ticket until it stops handing out new ones.
#[derive(Debug, Clone)]
pub struct RewindController {
    inputs: RewindInputs,
    state: RewindState,
    sample: Sample,
    window: Duration,
    runs_started: u64,
}

impl Default for RewindController {
    fn default() -> Self {
        Self::new(RewindInputs::default(), DEFAULT_REWIND_WINDOW)
    }
}

impl RewindController {
    pub fn new(inputs: RewindInputs, window: Duration) -> Self {
        let sample = Sample::at_end(inputs.end_minutes());
        Self {
            inputs,
            state: RewindState::Idle,
            sample,
            window,
            runs_started: 0,
        }
    }

    pub fn inputs(&self) -> &RewindInputs {
        &self.inputs
    }

    pub fn state(&self) -> &RewindState {
        &self.state
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Most recently published display values
    #[inline]
    pub fn sample(&self) -> Sample {
        self.sample
    }

    #[inline]
    pub fn displayed_minutes(&self) -> f64 {
        self.sample.displayed_minutes
    }

    #[inline]
    pub fn visual_progress(&self) -> f64 {
        self.sample.visual_progress
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, RewindState::Running(_))
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        matches!(self.state, RewindState::Settled(_))
    }

    /// The run in flight, if any
    pub fn active_run(&self) -> Option<&AnimationRun> {
        match &self.state {
            RewindState::Running(run) => Some(run),
            _ => None,
        }
    }

    /// Narration of the last settled run
    pub fn explanation(&self) -> Option<&ExplanationTrace> {
        match &self.state {
            RewindState::Settled(trace) => Some(trace),
            _ => None,
        }
    }

    /// Begin a run from the current inputs
    ///
    /// Ignored while a run is already in flight.
    pub fn start(&mut self, now: Instant) -> StartOutcome {
        if let RewindState::Running(run) = &self.state {
            debug!(run = run.id, "Rewind already running, ignoring start");
            return StartOutcome::AlreadyRunning;
        }

        self.runs_started += 1;
        let run = AnimationRun::new(
            self.runs_started,
            self.inputs.end_time.clone(),
            self.inputs.duration_minutes,
            now,
        );
        debug!(
            run = run.id,
            end_time = %run.end_time,
            duration = run.duration_minutes,
            "Rewind started"
        );

        let ticket = FrameTicket { run_id: run.id };
        let was_settled = matches!(self.state, RewindState::Settled(_));
        self.sample = Sample::at_end(run.end_minutes);
        self.state = RewindState::Running(run);

        let mut events = vec![RewindEvent::Frame(self.sample)];
        if was_settled {
            events.push(RewindEvent::ExplanationCleared);
        }
        StartOutcome::Started { ticket, events }
    }

    /// Advance the run owning `ticket` to `now`
    ///
    /// A stale ticket publishes nothing and yields no follow-up ticket.
    pub fn tick(&mut self, ticket: FrameTicket, now: Instant) -> TickOutcome {
        let run = match &mut self.state {
            RewindState::Running(run) if run.id == ticket.run_id => run,
            _ => {
                debug!(run = ticket.run_id, "Dropping stale rewind frame");
                return TickOutcome::default();
            }
        };

        match advance(run, now, self.window) {
            Step::Continue {
                sample,
                raw_progress,
            } => {
                run.reached = raw_progress;
                self.sample = sample;
                trace!(
                    run = ticket.run_id,
                    minutes = sample.displayed_minutes,
                    progress = sample.visual_progress,
                    "Rewind frame"
                );
                TickOutcome {
                    events: vec![RewindEvent::Frame(sample)],
                    next: Some(ticket),
                }
            }
            Step::Settle(sample) => {
                let start_time = format_time(run.start_minutes() as f64);
                let trace = explain(&run.end_time, run.duration_minutes, &start_time);
                debug!(run = ticket.run_id, start_time = %start_time, "Rewind settled");

                self.sample = sample;
                self.state = RewindState::Settled(trace.clone());
                TickOutcome {
                    events: vec![
                        RewindEvent::Frame(sample),
                        RewindEvent::ExplanationReady(trace),
                    ],
                    next: None,
                }
            }
        }
    }

    /// Stop any run and return to the finish time
    ///
    /// Does nothing when already idle.
    pub fn cancel(&mut self) -> Vec<RewindEvent> {
        if matches!(self.state, RewindState::Idle) {
            return Vec::new();
        }
        debug!("Rewind canceled");
        self.reset_to_idle()
    }

    /// Replace the finish time
    ///
    /// When idle or settled the preview resets immediately. A run in flight
    /// keeps the snapshot it started with.
    pub fn update_end_time(&mut self, end_time: impl Into<String>) -> Vec<RewindEvent> {
        let end_time = end_time.into();
        if end_time == self.inputs.end_time {
            return Vec::new();
        }
        self.inputs.end_time = end_time;
        self.inputs_changed()
    }

    /// Replace the duration, with the same rules as [`Self::update_end_time`]
    pub fn update_duration(&mut self, duration_minutes: i64) -> Vec<RewindEvent> {
        if duration_minutes == self.inputs.duration_minutes {
            return Vec::new();
        }
        self.inputs.duration_minutes = duration_minutes;
        self.inputs_changed()
    }

    fn inputs_changed(&mut self) -> Vec<RewindEvent> {
        if self.is_running() {
            debug!("Inputs changed during a run; applying to the next run");
            return Vec::new();
        }
        self.reset_to_idle()
    }

    fn reset_to_idle(&mut self) -> Vec<RewindEvent> {
        self.state = RewindState::Idle;
        self.sample = Sample::at_end(self.inputs.end_minutes());
        vec![
            RewindEvent::Frame(self.sample),
            RewindEvent::ExplanationCleared,
        ]
    }
}
