use anyhow::Result;

use rewind_core::{solve, AppConfig, ExplanationStep, ExplanationTrace};

use super::{resolve_duration, resolve_end_time};
use crate::InputArgs;

pub fn run(config: &AppConfig, inputs: InputArgs, json: bool) -> Result<()> {
    let end_time = resolve_end_time(config, inputs.end.as_deref())?;
    let duration = resolve_duration(config, inputs.duration)?;
    let trace = solve(&end_time, duration);

    if json {
        println!("{}", trace.to_json()?);
    } else {
        print!("{}", render(&trace));
    }
    Ok(())
}

/// Plain-text report: the three headline values, then the numbered steps
fn render(trace: &ExplanationTrace) -> String {
    let mut out = String::new();
    out.push_str(&format!("Finish time:  {}\n", trace.end_time));
    out.push_str(&format!("Duration:     {} min\n", trace.duration_minutes));
    out.push_str(&format!("Start time:   {}\n\n", trace.start_time));

    for step in trace.steps() {
        let prefix = match step.number() {
            Some(n) => format!("{}. ", n),
            None => "   ".to_string(),
        };
        match &step {
            ExplanationStep::Columns {
                hour,
                minute,
                subtrahend,
            } => {
                out.push_str("     Hour : Min\n");
                out.push_str(&format!("     {:>4} : {:<3}\n", hour, minute));
                out.push_str(&format!("     {:>10}\n", format!("- {}", subtrahend)));
            }
            _ => out.push_str(&format!("{}{}\n", prefix, step)),
        }
    }
    out
}
