//! CF-convention time axis decoding and encoding.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use crate::error::IoError;

const MS_PER_DAY: i64 = 86_400_000;

/// Day-of-year on which each month starts in the 365-day calendar
/// (index 0 unused, index 1 = January).
const MONTH_START_DOY: [i64; 13] = [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Unit of a CF time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "days" | "day" | "d" => Some(Self::Days),
            "hours" | "hour" | "hr" | "h" => Some(Self::Hours),
            "minutes" | "minute" | "min" => Some(Self::Minutes),
            "seconds" | "second" | "sec" | "s" => Some(Self::Seconds),
            _ => None,
        }
    }

    fn milliseconds(self) -> f64 {
        match self {
            Self::Days => 86_400_000.0,
            Self::Hours => 3_600_000.0,
            Self::Minutes => 60_000.0,
            Self::Seconds => 1_000.0,
        }
    }
}

/// Calendars that can be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Calendar {
    Standard,
    NoLeap,
}

impl Calendar {
    /// Parses a CF `calendar` attribute; a missing attribute means standard.
    pub(crate) fn parse(name: Option<&str>) -> Result<Self, IoError> {
        match name.map(str::to_ascii_lowercase).as_deref() {
            None | Some("standard" | "gregorian" | "proleptic_gregorian") => Ok(Self::Standard),
            Some("noleap" | "365_day") => Ok(Self::NoLeap),
            Some(other) => Err(IoError::InvalidTime {
                reason: format!("unsupported calendar '{other}'"),
            }),
        }
    }
}

/// Parsed `"<unit> since <base>"` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimeUnits {
    pub(crate) unit: TimeUnit,
    pub(crate) base: NaiveDateTime,
}

fn parse_base(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim().trim_end_matches(" UTC").trim_end_matches('Z');
    const FORMATS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parses CF units such as `"hours since 1900-01-01 00:00:00"`.
pub(crate) fn parse_time_units(units: &str) -> Result<TimeUnits, IoError> {
    let parts: Vec<&str> = units.trim().splitn(3, ' ').collect();
    if parts.len() < 3 || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units}'"),
        });
    }
    let unit = TimeUnit::parse(parts[0]).ok_or_else(|| IoError::InvalidTime {
        reason: format!("unsupported time unit '{}'", parts[0]),
    })?;
    let base = parse_base(parts[2]).ok_or_else(|| IoError::InvalidTime {
        reason: format!("failed to parse base date '{}'", parts[2]),
    })?;
    Ok(TimeUnits { unit, base })
}

fn offset_ms(offset: f64, unit: TimeUnit) -> Result<i64, IoError> {
    let ms = offset * unit.milliseconds();
    if !ms.is_finite() || ms.abs() > i64::MAX as f64 {
        return Err(IoError::InvalidTime {
            reason: format!("time offset {offset} is not representable"),
        });
    }
    Ok(ms.round() as i64)
}

fn noleap_day_number(date: NaiveDate) -> Result<i64, IoError> {
    if date.month() == 2 && date.day() == 29 {
        return Err(IoError::InvalidTime {
            reason: format!("{date} does not exist in the noleap calendar"),
        });
    }
    let doy0 = MONTH_START_DOY[date.month() as usize] - 1 + i64::from(date.day()) - 1;
    Ok(i64::from(date.year()) * 365 + doy0)
}

fn noleap_date(day_number: i64) -> Result<NaiveDate, IoError> {
    let year = day_number.div_euclid(365);
    let doy = day_number.rem_euclid(365) + 1;
    let month = (1..=12)
        .rev()
        .find(|&m| MONTH_START_DOY[m] <= doy)
        .unwrap_or(1);
    let day = doy - MONTH_START_DOY[month] + 1;
    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month as u32, day as u32))
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("noleap day {day_number} is out of range"),
        })
}

/// Converts offsets from `units.base` into timestamps.
///
/// Offsets are resolved to the millisecond.
pub(crate) fn decode_offsets(
    offsets: &[f64],
    units: TimeUnits,
    calendar: Calendar,
) -> Result<Vec<NaiveDateTime>, IoError> {
    offsets
        .iter()
        .map(|&offset| {
            let ms = offset_ms(offset, units.unit)?;
            match calendar {
                Calendar::Standard => units
                    .base
                    .checked_add_signed(TimeDelta::milliseconds(ms))
                    .ok_or_else(|| IoError::InvalidTime {
                        reason: format!("date overflow adding {offset} to {}", units.base),
                    }),
                Calendar::NoLeap => {
                    let time = units.base.time();
                    let since_midnight = i64::from(time.num_seconds_from_midnight()) * 1_000
                        + i64::from(time.nanosecond() / 1_000_000);
                    let total = since_midnight + ms;
                    let day = noleap_day_number(units.base.date())? + total.div_euclid(MS_PER_DAY);
                    let midnight = noleap_date(day)?.and_time(chrono::NaiveTime::MIN);
                    Ok(midnight + TimeDelta::milliseconds(total.rem_euclid(MS_PER_DAY)))
                }
            }
        })
        .collect()
}

/// Encodes timestamps as seconds since the first one.
///
/// Returns the offsets together with the matching CF units string.
pub(crate) fn encode_times(times: &[NaiveDateTime]) -> (Vec<f64>, String) {
    let Some(&base) = times.first() else {
        return (Vec::new(), "seconds since 1970-01-01 00:00:00".to_string());
    };
    let offsets = times
        .iter()
        .map(|&t| (t - base).num_milliseconds() as f64 / 1_000.0)
        .collect();
    (offsets, format!("seconds since {}", base.format("%Y-%m-%d %H:%M:%S")))
}
