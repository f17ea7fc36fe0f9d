pub mod config;
pub mod error;
pub mod explain;
pub mod rewind;
pub mod time;

pub use config::{AppConfig, KeymapConfig, ThemeColorOverrides, ThemeConfig, WidgetConfig};
pub use error::{Error, Result};
pub use explain::{explain, solve, ExplanationStep, ExplanationTrace};
pub use rewind::{RewindController, RewindEvent, RewindInputs, Sample};
pub use time::{format_time, get_rotation, parse_time, RotationAngles};
