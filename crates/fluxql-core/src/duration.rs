//! Compact duration literals (`10h`, `2d`, `15ms`, bare integers in microseconds).

use std::time::Duration;

/// Errors produced by the duration codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    /// The text is not a valid duration literal.
    #[error("invalid duration")]
    InvalidDuration,
}

const MICROS_PER_MILLI: u64 = 1_000;
const MICROS_PER_SECOND: u64 = 1_000_000;
const MICROS_PER_MINUTE: u64 = 60 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: u64 = 60 * MICROS_PER_MINUTE;
const MICROS_PER_DAY: u64 = 24 * MICROS_PER_HOUR;
const MICROS_PER_WEEK: u64 = 7 * MICROS_PER_DAY;

/// Parses a duration literal.
///
/// A bare integer is a number of microseconds. Otherwise the trailing unit is
/// one of `u`/`µ`, `ms`, `s`, `m`, `h`, `d` or `w`.
///
/// # Errors
///
/// Returns [`DurationError::InvalidDuration`] for empty input, an unknown
/// unit, a non-integer or negative amount, or a value that overflows.
pub fn parse_duration(s: &str) -> Result<Duration, DurationError> {
    let chars: Vec<char> = s.chars().collect();

    let (num, unit): (String, &str) = match chars.as_slice() {
        [] => return Err(DurationError::InvalidDuration),
        [.., last] if last.is_ascii_digit() => (s.to_string(), "u"),
        _ if s.len() > 2 && s.ends_with("ms") => (s[..s.len() - 2].to_string(), "ms"),
        [rest @ .., _] => {
            let unit_start = rest.iter().map(|c| c.len_utf8()).sum::<usize>();
            (rest.iter().collect(), &s[unit_start..])
        }
    };

    let n: u64 = num.parse().map_err(|_| DurationError::InvalidDuration)?;

    let scale = match unit {
        "u" | "µ" => 1,
        "ms" => MICROS_PER_MILLI,
        "s" => MICROS_PER_SECOND,
        "m" => MICROS_PER_MINUTE,
        "h" => MICROS_PER_HOUR,
        "d" => MICROS_PER_DAY,
        "w" => MICROS_PER_WEEK,
        _ => return Err(DurationError::InvalidDuration),
    };

    n.checked_mul(scale)
        .map(Duration::from_micros)
        .ok_or(DurationError::InvalidDuration)
}

/// Formats a duration using the largest unit that divides it evenly.
///
/// Sub-microsecond precision is dropped.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros == 0 {
        return "0s".to_string();
    }

    for (scale, suffix) in [
        (MICROS_PER_WEEK, "w"),
        (MICROS_PER_DAY, "d"),
        (MICROS_PER_HOUR, "h"),
        (MICROS_PER_MINUTE, "m"),
        (MICROS_PER_SECOND, "s"),
        (MICROS_PER_MILLI, "ms"),
    ] {
        let scale = u128::from(scale);
        if micros % scale == 0 {
            return format!("{}{suffix}", micros / scale);
        }
    }
    micros.to_string()
}

/// Formats a duration as a query literal.
///
/// Unlike [`format_duration`], a bare microsecond count keeps its `u` suffix
/// so it scans back as a duration rather than a number.
pub(crate) fn format_duration_literal(d: Duration) -> String {
    let mut s = format_duration(d);
    if s.bytes().all(|b| b.is_ascii_digit()) {
        s.push('u');
    }
    s
}
