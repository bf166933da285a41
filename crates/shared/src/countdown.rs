use chrono::{FixedOffset, NaiveDateTime};
use std::fmt;

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

pub const TARGET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum CountdownError {
    #[error("invalid countdown target: {0}")]
    Parse(#[from] chrono::ParseError),
    #[error("invalid utc offset: {0} minutes")]
    Offset(i32),
    #[error("countdown target does not exist in the given offset")]
    Ambiguous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownParts {
    /// Zero-padded labels in display order: days, hours, minutes, seconds.
    pub fn labels(&self) -> [String; 4] {
        [
            format!("{:02}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

impl fmt::Display for CountdownParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [d, h, m, s] = self.labels();
        write!(f, "{d}:{h}:{m}:{s}")
    }
}

/// Counts down to a fixed instant, expressed in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    target_ms: i64,
}

impl Countdown {
    pub fn new(target_ms: i64) -> Self {
        Self { target_ms }
    }

    /// Parses a local `YYYY-MM-DDTHH:MM:SS` string. `offset_minutes` is the
    /// local offset east of UTC.
    pub fn parse_local(raw: &str, offset_minutes: i32) -> Result<Self, CountdownError> {
        let naive = NaiveDateTime::parse_from_str(raw, TARGET_FORMAT)?;
        let offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(CountdownError::Offset(offset_minutes))?;
        let local = naive
            .and_local_timezone(offset)
            .single()
            .ok_or(CountdownError::Ambiguous)?;

        Ok(Self::new(local.timestamp_millis()))
    }

    /// Like [`Countdown::parse_local`], but asks `offset_at` for the offset in
    /// force at a given epoch millisecond, so a daylight saving change between
    /// now and the target is honored.
    pub fn parse_zoned(
        raw: &str,
        offset_at: impl Fn(i64) -> i32,
    ) -> Result<Self, CountdownError> {
        let wall_ms = NaiveDateTime::parse_from_str(raw, TARGET_FORMAT)?
            .and_utc()
            .timestamp_millis();
        // The wall time read as UTC is within a day of the real instant;
        // one refinement settles on the offset at the instant itself.
        let guess = offset_at(wall_ms);
        let offset = offset_at(wall_ms - i64::from(guess) * MINUTE_MS);
        Self::parse_local(raw, offset)
    }

    pub fn target_ms(&self) -> i64 {
        self.target_ms
    }

    /// Remaining time at `now_ms`, or `None` once the target has passed.
    pub fn remaining_at(&self, now_ms: i64) -> Option<CountdownParts> {
        let distance = self.target_ms - now_ms;
        if distance <= 0 {
            return None;
        }

        Some(CountdownParts {
            days: distance / DAY_MS,
            hours: (distance % DAY_MS) / HOUR_MS,
            minutes: (distance % HOUR_MS) / MINUTE_MS,
            seconds: (distance % MINUTE_MS) / SECOND_MS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_pad() {
        let countdown = Countdown::new(0);
        let now = -(2 * DAY_MS + 3 * HOUR_MS + 4 * MINUTE_MS + 5 * SECOND_MS + 999);
        let parts = countdown.remaining_at(now).unwrap();

        assert_eq!(
            parts,
            CountdownParts {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5
            }
        );
        assert_eq!(parts.to_string(), "02:03:04:05");
    }

    #[test]
    fn test_long_distances_are_not_truncated() {
        let parts = Countdown::new(123 * DAY_MS).remaining_at(0).unwrap();
        assert_eq!(parts.labels()[0], "123");
    }

    #[test]
    fn test_past_target_yields_nothing() {
        let countdown = Countdown::new(1_000);
        assert!(countdown.remaining_at(1_000).is_none());
        assert!(countdown.remaining_at(5_000).is_none());
    }

    #[test]
    fn test_parse_local_applies_offset() {
        let utc = Countdown::parse_local("2026-02-15T09:00:00", 0).unwrap();
        let quito = Countdown::parse_local("2026-02-15T09:00:00", -5 * 60).unwrap();

        assert_eq!(quito.target_ms() - utc.target_ms(), 5 * HOUR_MS);
    }

    #[test]
    fn test_parse_zoned_uses_offset_at_target() {
        // -5 h until 2026-03-08T07:00Z, -4 h afterwards
        let change = Countdown::parse_local("2026-03-08T07:00:00", 0)
            .unwrap()
            .target_ms();
        let offset_at = |ms: i64| if ms < change { -5 * 60 } else { -4 * 60 };

        let zoned = Countdown::parse_zoned("2026-04-01T09:00:00", offset_at).unwrap();
        let expected = Countdown::parse_local("2026-04-01T09:00:00", -4 * 60).unwrap();
        assert_eq!(zoned, expected);

        let before = Countdown::parse_zoned("2026-02-15T09:00:00", offset_at).unwrap();
        let expected = Countdown::parse_local("2026-02-15T09:00:00", -5 * 60).unwrap();
        assert_eq!(before, expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Countdown::parse_local("mañana", 0),
            Err(CountdownError::Parse(_))
        ));
        assert!(matches!(
            Countdown::parse_local("2026-02-15T09:00:00", 100_000),
            Err(CountdownError::Offset(_))
        ));
    }
}
