use chrono::{DateTime, FixedOffset, Offset, TimeDelta, Utc};

use crate::error::AppError;

/// Shown while a card has no snapshot yet (still loading or failed).
pub const TIME_PLACEHOLDER: &str = "--:--:--";

/// Formatted time-of-day and calendar-date pair for one clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockDisplay {
    /// Zero-padded `HH:MM:SS`
    pub time: String,
    /// Zero-padded `YYYY-MM-DD`
    pub date: String,
}

/// A live clock derived from a single server snapshot.
///
/// The clock is seeded once from the snapshot's instant and advanced by
/// exactly one second per tick; it never re-reads the system clock, so the
/// displayed time stays consistent with the fetched timezone rather than the
/// viewer's machine. Drift against true time is accepted. A new snapshot
/// means a new clock, never an incremental adjustment of this one.
#[derive(Debug, Clone)]
pub struct LocalClock {
    instant: DateTime<Utc>,
    offset: FixedOffset,
}

impl LocalClock {
    /// Seeds a clock from an ISO instant string (embedded offset accepted)
    /// and the UTC offset, in minutes, to render in.
    pub fn from_iso(iso_datetime: &str, offset_minutes: i32) -> Result<Self, AppError> {
        let instant = DateTime::parse_from_rfc3339(iso_datetime)?.with_timezone(&Utc);
        Ok(Self::new(instant, offset_minutes))
    }

    pub fn new(instant: DateTime<Utc>, offset_minutes: i32) -> Self {
        // Out-of-range offsets render as UTC rather than failing the card.
        let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| Utc.fix());
        Self { instant, offset }
    }

    /// Advances the clock by exactly one second.
    pub fn tick(&mut self) {
        self.instant = self.instant + TimeDelta::seconds(1);
    }

    /// Renders the current value in the target zone's local representation.
    pub fn display(&self) -> ClockDisplay {
        let local = self.instant.with_timezone(&self.offset);
        ClockDisplay {
            time: local.format("%H:%M:%S").to_string(),
            date: local.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Parses a signed `±HH:MM` UTC offset (an optional `UTC` prefix is
/// tolerated) into minutes. Missing or malformed offsets default to zero.
pub fn parse_utc_offset(offset: &str) -> i32 {
    let trimmed = offset.trim().trim_start_matches("UTC");
    if trimmed.is_empty() || trimmed == "Z" {
        return 0;
    }

    let (sign, rest) = match trimmed.split_at_checked(1) {
        Some(("-", rest)) => (-1, rest),
        Some(("+", rest)) => (1, rest),
        _ => (1, trimmed),
    };

    let mut parts = rest.split(':');
    let hours: i32 = match parts.next().and_then(|h| h.parse().ok()) {
        Some(h) => h,
        None => return 0,
    };
    let minutes: i32 = parts.next().and_then(|m| m.parse().ok()).unwrap_or(0);

    sign * (hours * 60 + minutes)
}

/// Formats an offset in minutes back into the signed `±HH:MM` form the APIs
/// use, for display on a clock card.
pub fn format_utc_offset(offset_minutes: i32) -> String {
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let magnitude = offset_minutes.abs();
    format!("{}{:02}:{:02}", sign, magnitude / 60, magnitude % 60)
}
