use std::sync::Arc;
use std::time::Instant;

use rewind_core::rewind::{FrameTicket, RewindController, RewindEvent, Sample, StartOutcome};
use rewind_core::time::{format_time, parse_clock_strict, parse_time};
use rewind_core::{AppConfig, ExplanationTrace};
use tracing::debug;

use crate::input::Action;
use crate::theme::Theme;
use crate::themes::load_theme;

/// Input field that currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    EndTime,
    Duration,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::EndTime => Field::Duration,
            Field::Duration => Field::EndTime,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::EndTime => "Finish time",
            Field::Duration => "Duration",
        }
    }
}

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Adjusting fields with keys
    Normal,
    /// Typing a new value into the focused field
    Editing(String),
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Colors for every widget
    pub theme: Theme,
    /// Rewind state machine
    pub controller: RewindController,
    /// Display values from the last published frame
    pub display: Sample,
    /// Narration from the last settled run, cleared on reset
    pub explanation: Option<ExplanationTrace>,
    /// Ticket for the next animation frame while a rewind plays
    pub pending_frame: Option<FrameTicket>,
    /// Focused input field
    pub focus: Field,
    /// Current application mode
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let controller = RewindController::new(
            config.widget.initial_inputs(),
            config.animation.rewind_window(),
        );
        let theme = load_theme(&config.ui.theme);
        Self {
            display: controller.sample(),
            controller,
            theme,
            config,
            explanation: None,
            pending_frame: None,
            focus: Field::EndTime,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
        }
    }

    /// Finish time as entered
    pub fn end_time(&self) -> &str {
        &self.controller.inputs().end_time
    }

    /// Duration as entered
    pub fn duration(&self) -> i64 {
        self.controller.inputs().duration_minutes
    }

    pub fn is_rewinding(&self) -> bool {
        self.controller.is_running()
    }

    /// Whether the event loop should poll at the frame rate
    pub fn needs_fast_update(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Begin a rewind from the current inputs
    pub fn start(&mut self, now: Instant) {
        match self.controller.start(now) {
            StartOutcome::Started { ticket, events } => {
                self.pending_frame = Some(ticket);
                self.apply_events(events);
                self.set_status("Rewinding time...");
            }
            StartOutcome::AlreadyRunning => {
                self.set_status("Already rewinding");
            }
        }
    }

    /// Stop any rewind and show the finish time again
    pub fn reset(&mut self) {
        self.pending_frame = None;
        let events = self.controller.cancel();
        if !events.is_empty() {
            self.set_status("Reset");
        }
        self.apply_events(events);
    }

    /// Advance the pending frame, if any
    pub fn on_frame(&mut self, now: Instant) {
        let Some(ticket) = self.pending_frame.take() else {
            return;
        };
        let outcome = self.controller.tick(ticket, now);
        self.pending_frame = outcome.next;
        self.apply_events(outcome.events);
    }

    /// Fold controller notifications into the display state
    pub fn apply_events(&mut self, events: Vec<RewindEvent>) {
        for event in events {
            match event {
                RewindEvent::Frame(sample) => self.display = sample,
                RewindEvent::ExplanationReady(trace) => {
                    self.set_status(format!("Start time found: {}", trace.start_time));
                    self.explanation = Some(trace);
                }
                RewindEvent::ExplanationCleared => self.explanation = None,
            }
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        // Two fields, so previous is the same as next
        self.focus = self.focus.next();
    }

    /// Nudge the focused field
    ///
    /// `coarse` moves the finish time by an hour and the duration by ten
    /// minutes; otherwise both move by one minute. The finish time wraps
    /// around midnight, the duration is clamped to its range.
    pub fn adjust(&mut self, direction: i64, coarse: bool) {
        match self.focus {
            Field::EndTime => {
                let step = if coarse { 60 } else { 1 };
                let minutes = parse_time(self.end_time()).saturating_add(direction * step);
                self.set_end_time(format_time(minutes as f64));
            }
            Field::Duration => {
                let step = if coarse { 10 } else { 1 };
                let minutes = self
                    .config
                    .widget
                    .clamp_duration(self.duration().saturating_add(direction * step));
                self.set_duration(minutes);
            }
        }
    }

    pub fn set_end_time(&mut self, end_time: impl Into<String>) {
        let events = self.controller.update_end_time(end_time);
        self.after_input_change(events);
    }

    pub fn set_duration(&mut self, minutes: i64) {
        let events = self.controller.update_duration(minutes);
        self.after_input_change(events);
    }

    fn after_input_change(&mut self, events: Vec<RewindEvent>) {
        if self.is_rewinding() {
            self.set_status("Changes apply to the next rewind");
        } else if !events.is_empty() {
            self.clear_status();
        }
        self.apply_events(events);
    }

    /// Start typing into the focused field, prefilled with its value
    pub fn begin_edit(&mut self) {
        let current = match self.focus {
            Field::EndTime => self.end_time().to_string(),
            Field::Duration => self.duration().to_string(),
        };
        self.mode = Mode::Editing(current);
    }

    pub fn input_char(&mut self, c: char) {
        if let Mode::Editing(buffer) = &mut self.mode {
            if buffer.chars().count() < 8 {
                buffer.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Mode::Editing(buffer) = &mut self.mode {
            buffer.pop();
        }
    }

    /// Commit the typed value
    ///
    /// A malformed finish time is rejected with a status message and the
    /// previous value kept. Duration text is clamped, with unparsable text
    /// landing on the minimum.
    pub fn confirm_edit(&mut self) {
        let Mode::Editing(buffer) = std::mem::replace(&mut self.mode, Mode::Normal) else {
            return;
        };
        match self.focus {
            Field::EndTime => match parse_clock_strict(&buffer) {
                Ok(minutes) => self.set_end_time(format_time(minutes as f64)),
                Err(e) => {
                    debug!("Rejected finish time input: {}", e);
                    self.set_status(e.to_string());
                }
            },
            Field::Duration => {
                let minutes = self.config.widget.parse_duration_input(&buffer);
                self.set_duration(minutes);
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, Mode::Editing(_)) {
            self.mode = Mode::Normal;
        }
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Help => Mode::Normal,
            _ => Mode::Help,
        };
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Check if we're in a mode that accepts text input
    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Editing(_))
    }

    /// Apply one input action
    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Start => self.start(now),
            Action::Reset => self.reset(),
            Action::NextField => self.focus_next(),
            Action::PrevField => self.focus_prev(),
            Action::Increase => self.adjust(1, false),
            Action::Decrease => self.adjust(-1, false),
            Action::IncreaseMore => self.adjust(1, true),
            Action::DecreaseMore => self.adjust(-1, true),
            Action::Edit => self.begin_edit(),
            Action::ToggleHelp => self.toggle_help(),
            Action::ExitMode => {
                if self.mode == Mode::Normal {
                    self.clear_status();
                }
                self.mode = Mode::Normal;
            }
            Action::Confirm => self.confirm_edit(),
            Action::Cancel => self.cancel_edit(),
            Action::InputChar(c) => self.input_char(c),
            Action::Backspace => self.backspace(),
            Action::None => {}
        }
    }
}
