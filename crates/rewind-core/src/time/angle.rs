//! Clock-hand angles for a minutes-since-midnight value

use serde::Serialize;

/// Degrees the minute hand turns per minute (360 / 60)
pub const MINUTE_HAND_DEG_PER_MINUTE: f64 = 6.0;
/// Degrees the hour hand turns per hour (360 / 12)
pub const HOUR_HAND_DEG_PER_HOUR: f64 = 30.0;

/// Rotation of both hands, clockwise from 12 o'clock
///
/// Values are not wrapped to a single turn; renderers should treat them as
/// periodic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotationAngles {
    pub hour_degrees: f64,
    pub minute_degrees: f64,
}

/// Hand angles for a (possibly fractional, possibly negative) minute count
///
/// The hour hand moves continuously with the minutes. Both components use a
/// floored modulo so a negative minute count yields the same hands as its
/// positive equivalent a day later.
pub fn get_rotation(minutes: f64) -> RotationAngles {
    let minute = minutes.rem_euclid(60.0);
    let hour = (minutes / 60.0).rem_euclid(12.0);

    RotationAngles {
        hour_degrees: hour * HOUR_HAND_DEG_PER_HOUR,
        minute_degrees: minute * MINUTE_HAND_DEG_PER_MINUTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_midnight() {
        let r = get_rotation(0.0);
        assert_close(r.hour_degrees, 0.0);
        assert_close(r.minute_degrees, 0.0);
    }

    #[test]
    fn test_half_past_one() {
        let r = get_rotation(90.0);
        assert_close(r.hour_degrees, 45.0);
        assert_close(r.minute_degrees, 180.0);
    }

    #[test]
    fn test_hour_hand_is_continuous() {
        // 09:24 -> 9.4 hours
        let r = get_rotation(564.0);
        assert_close(r.hour_degrees, 282.0);
        assert_close(r.minute_degrees, 144.0);

        let a = get_rotation(564.0).hour_degrees;
        let b = get_rotation(564.5).hour_degrees;
        assert_close(b - a, 0.25);
    }

    #[test]
    fn test_afternoon_matches_morning() {
        let am = get_rotation(3.0 * 60.0 + 15.0);
        let pm = get_rotation(15.0 * 60.0 + 15.0);
        assert_close(am.hour_degrees, pm.hour_degrees);
        assert_close(am.minute_degrees, pm.minute_degrees);
    }

    #[test]
    fn test_negative_minutes_use_floored_modulo() {
        // -10 minutes is 23:50
        let negative = get_rotation(-10.0);
        let positive = get_rotation(1430.0);
        assert_close(negative.minute_degrees, 300.0);
        assert_close(negative.minute_degrees, positive.minute_degrees);
        assert_close(negative.hour_degrees, positive.hour_degrees);
        assert!(negative.minute_degrees >= 0.0);
        assert!(negative.hour_degrees >= 0.0);
    }

    #[test]
    fn test_fractional_minutes() {
        let r = get_rotation(30.5);
        assert_close(r.minute_degrees, 183.0);
    }
}
