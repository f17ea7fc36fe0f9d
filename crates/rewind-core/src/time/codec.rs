//! Conversion between `HH:MM` clock strings and minutes since midnight
//!
//! Parsing is total: any token that does not start with an integer counts as
//! zero, and out-of-range hours or minutes are accepted as-is. Formatting
//! always produces a well-formed 24-hour `HH:MM` by rounding to the nearest
//! minute and wrapping with a floored modulo.

use crate::{Error, Result};

/// Minutes in one day; the modulus used when formatting
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Hour and minute tokens of a clock string, before any normalisation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockParts {
    pub hour: i64,
    pub minute: i64,
}

impl ClockParts {
    /// Total minutes represented by these parts (`hour * 60 + minute`)
    pub fn total_minutes(&self) -> i64 {
        self.hour.saturating_mul(60).saturating_add(self.minute)
    }
}

/// Split a clock string on `:` and parse the first two tokens
///
/// Missing or unparsable tokens are zero. Extra tokens are ignored.
pub fn split_clock(clock: &str) -> ClockParts {
    let mut tokens = clock.split(':');
    let hour = tokens.next().map(parse_leading_int).unwrap_or(0);
    let minute = tokens.next().map(parse_leading_int).unwrap_or(0);
    ClockParts { hour, minute }
}

/// Parse a clock string into minutes since midnight
///
/// `"09:24"` parses to `564`. No range checking is done, so `"25:99"`
/// parses to `1599` and `"xx:10"` parses to `10`.
pub fn parse_time(clock: &str) -> i64 {
    split_clock(clock).total_minutes()
}

/// Round to the nearest whole minute and wrap into `[0, 1440)`
///
/// Halves round up, so `-0.5` becomes `0` and `2.5` becomes `3`.
/// Non-finite input never panics: NaN maps to midnight.
pub fn normalize_minutes(minutes: f64) -> i64 {
    // `minutes + 0.5` would round values just below a half up
    let floor = minutes.floor();
    let rounded = if minutes - floor >= 0.5 { floor + 1.0 } else { floor };
    (rounded as i64).rem_euclid(MINUTES_PER_DAY)
}

/// Format minutes since midnight as a zero-padded 24-hour `HH:MM`
///
/// Any input is accepted; negative and multi-day values wrap around.
pub fn format_time(minutes: f64) -> String {
    let t = normalize_minutes(minutes);
    format!("{:02}:{:02}", t / 60, t % 60)
}

/// Parse a clock string, rejecting anything outside `00:00`..=`23:59`
///
/// Accepts `H:MM` and `HH:MM`. Used at input boundaries where a typo should
/// be reported instead of silently becoming zero.
pub fn parse_clock_strict(clock: &str) -> Result<i64> {
    let invalid = || Error::InvalidClock(format!("expected HH:MM, got {:?}", clock));

    let (hour, minute) = clock.trim().split_once(':').ok_or_else(invalid)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if !(1..=2).contains(&hour.len()) || minute.len() != 2 {
        return Err(invalid());
    }
    if !all_digits(hour) || !all_digits(minute) {
        return Err(invalid());
    }

    let hour: i64 = hour.parse().map_err(|_| invalid())?;
    let minute: i64 = minute.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(Error::InvalidClock(format!(
            "{:?} is not a time of day (00:00 to 23:59)",
            clock
        )));
    }

    Ok(hour * 60 + minute)
}

/// Parse the integer prefix of a token: optional whitespace, optional sign,
/// then decimal digits. Returns 0 when there are no digits.
fn parse_leading_int(token: &str) -> i64 {
    let token = token.trim_start();
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative {
        -value
    } else {
        value
    }
}
