pub mod config;
pub mod run;
pub mod solve;
pub mod trace;

use anyhow::Result;
use rewind_core::time::{format_time, parse_clock_strict};
use rewind_core::{AppConfig, Error};

/// Resolve `--end`: `now` reads the local clock, anything else must be a
/// valid `HH:MM`. Falls back to the configured default.
pub fn resolve_end_time(config: &AppConfig, end: Option<&str>) -> Result<String> {
    match end.map(str::trim) {
        None => Ok(config.widget.default_end_time.clone()),
        Some(text) if text.eq_ignore_ascii_case("now") => {
            Ok(chrono::Local::now().format("%H:%M").to_string())
        }
        Some(text) => {
            let minutes = parse_clock_strict(text)?;
            Ok(format_time(minutes as f64))
        }
    }
}

/// Resolve `--duration`, falling back to the configured default
pub fn resolve_duration(config: &AppConfig, duration: Option<i64>) -> Result<i64> {
    match duration {
        None => Ok(config.widget.default_duration),
        Some(minutes) if minutes < 0 => Err(Error::InvalidDuration(format!(
            "duration must not be negative, got {}",
            minutes
        ))
        .into()),
        Some(minutes) => Ok(minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_end_time() {
        let config = AppConfig::default();
        assert_eq!(resolve_end_time(&config, None).unwrap(), "09:24");
        assert_eq!(resolve_end_time(&config, Some("7:05")).unwrap(), "07:05");
        assert!(resolve_end_time(&config, Some("24:00")).is_err());
        assert!(resolve_end_time(&config, Some("soon")).is_err());

        let now = resolve_end_time(&config, Some("NOW")).unwrap();
        assert!(parse_clock_strict(&now).is_ok());
    }

    #[test]
    fn test_resolve_duration() {
        let config = AppConfig::default();
        assert_eq!(resolve_duration(&config, None).unwrap(), 34);
        assert_eq!(resolve_duration(&config, Some(0)).unwrap(), 0);
        assert_eq!(resolve_duration(&config, Some(300)).unwrap(), 300);
        assert!(resolve_duration(&config, Some(-1)).is_err());
    }
}
