pub mod angle;
pub mod codec;

pub use angle::{get_rotation, RotationAngles};
pub use codec::{
    format_time, normalize_minutes, parse_clock_strict, parse_time, split_clock, ClockParts,
    MINUTES_PER_DAY,
};
