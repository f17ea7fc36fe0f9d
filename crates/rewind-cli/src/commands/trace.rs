use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use tracing::debug;

use rewind_core::rewind::{RewindController, RewindEvent, RewindInputs, Sample, StartOutcome};
use rewind_core::config::frame_interval;
use rewind_core::AppConfig;

use super::{resolve_duration, resolve_end_time};
use crate::InputArgs;

/// One published frame of a simulated run
#[derive(Debug, Clone, Copy)]
struct TraceRow {
    elapsed: Duration,
    sample: Sample,
}

impl TraceRow {
    fn format(&self) -> String {
        let rotation = self.sample.rotation();
        format!(
            "{:>7}  {}  {:>9.3}  {:>5.3}  {:>6.2}  {:>6.2}",
            self.elapsed.as_millis(),
            self.sample.clock(),
            self.sample.displayed_minutes,
            self.sample.visual_progress,
            rotation.hour_degrees,
            rotation.minute_degrees,
        )
    }
}

pub fn run(config: &AppConfig, inputs: InputArgs, fps: Option<u32>) -> Result<()> {
    let end_time = resolve_end_time(config, inputs.end.as_deref())?;
    let duration = resolve_duration(config, inputs.duration)?;
    let frame = frame_interval(fps.unwrap_or(config.animation.animation_fps));

    let (rows, start_time) = simulate(
        RewindInputs::new(end_time, duration),
        config.animation.rewind_window(),
        frame,
    )?;

    println!("elapsed_ms  clock    minutes  progress   hour°  minute°");
    for row in &rows {
        println!("{}", row.format());
    }
    if let Some(start_time) = start_time {
        println!("\nStart time: {}", start_time);
    }
    Ok(())
}

/// Drive a controller with a fake clock that advances one `frame` per tick
///
/// Returns every published frame and the start time from the explanation.
fn simulate(
    inputs: RewindInputs,
    window: Duration,
    frame: Duration,
) -> Result<(Vec<TraceRow>, Option<String>)> {
    let mut controller = RewindController::new(inputs, window);
    let t0 = Instant::now();
    let mut rows = Vec::new();
    let mut start_time = None;

    let mut record = |elapsed: Duration, events: Vec<RewindEvent>| {
        for event in events {
            match event {
                RewindEvent::Frame(sample) => rows.push(TraceRow { elapsed, sample }),
                RewindEvent::ExplanationReady(trace) => start_time = Some(trace.start_time),
                RewindEvent::ExplanationCleared => {}
            }
        }
    };

    let StartOutcome::Started { ticket, events } = controller.start(t0) else {
        bail!("a fresh controller refused to start");
    };
    record(Duration::ZERO, events);

    let mut next = Some(ticket);
    let mut elapsed = Duration::ZERO;
    while let Some(ticket) = next {
        elapsed += frame;
        let outcome = controller.tick(ticket, t0 + elapsed);
        record(elapsed, outcome.events);
        next = outcome.next;
    }
    debug!(frames = rows.len(), "Simulated rewind finished");

    Ok((rows, start_time))
}
