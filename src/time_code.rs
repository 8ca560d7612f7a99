use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::errors::ParseError;

// @module: SRT time code parsing and formatting

// @const: SRT time code line regex
static TIME_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2}),(\d{3})\s*-->\s*(\d{2,}):(\d{2}):(\d{2}),(\d{3})$")
        .unwrap()
});

/// Immutable start/end timestamp pair with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCode {
    /// Start time in milliseconds since 00:00:00,000
    pub start_ms: u64,

    /// End time in milliseconds since 00:00:00,000
    pub end_ms: u64,
}

impl TimeCode {
    /// Creates a new time code pair.
    pub fn new(start_ms: u64, end_ms: u64) -> Self {
        TimeCode { start_ms, end_ms }
    }

    /// Parse a full SRT time line: `00:01:13,933 --> 00:01:18,233`.
    ///
    /// `line_number` is carried into the error for the file locator.
    pub fn parse_line(text: &str, line_number: usize) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        let caps = TIME_LINE_REGEX
            .captures(trimmed)
            .ok_or_else(|| ParseError::InvalidTimeCode {
                line: line_number,
                found: trimmed.to_string(),
            })?;

        let start_ms = Self::capture_to_ms(&caps, 1, trimmed, line_number)?;
        let end_ms = Self::capture_to_ms(&caps, 5, trimmed, line_number)?;

        Ok(TimeCode { start_ms, end_ms })
    }

    // Four consecutive capture groups starting at start_idx: H, M, S, ms.
    fn capture_to_ms(
        caps: &regex::Captures,
        start_idx: usize,
        source: &str,
        line_number: usize,
    ) -> Result<u64, ParseError> {
        let field = |idx: usize| -> u64 {
            caps.get(start_idx + idx)
                .map_or(0, |m| m.as_str().parse().unwrap_or(0))
        };

        let hours = field(0);
        let minutes = field(1);
        let seconds = field(2);
        let millis = field(3);

        // The regex guarantees two digits for minutes/seconds and three for
        // millis, but not their numeric range.
        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(ParseError::TimeOutOfRange {
                line: line_number,
                found: source.to_string(),
            });
        }

        Ok((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
    }

    /// Format a millisecond timestamp as `HH:MM:SS,mmm`.
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Duration in milliseconds; zero when end does not follow start.
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Duration in seconds, for reading-speed arithmetic.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_ms() as f64 / 1000.0
    }

    /// Quick check whether a line looks like a time code line.
    pub fn is_time_line(text: &str) -> bool {
        TIME_LINE_REGEX.is_match(text.trim())
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} --> {}",
            Self::format_timestamp(self.start_ms),
            Self::format_timestamp(self.end_ms)
        )
    }
}
