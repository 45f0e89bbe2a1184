use chrono::{Duration, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref EXIF_DATE_TIME_RE: Regex = Regex::new(
        r"^(\d{4}):(\d{2}):(\d{2})[ T](\d{2}):(\d{2}):(\d{2})(?:\.(\d+))?\s*(Z|[+-]\d{2}:?\d{2})?$"
    )
    .unwrap();
    static ref EXIF_DATE_RE: Regex = Regex::new(r"^(\d{4}):(\d{2}):(\d{2})$").unwrap();
}

/// Date and time with explicit calendar fields. `month` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub millisecond: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tzoffset_minutes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
}

impl StructuredDate {
    /// Wall-clock instant with the timezone offset applied forward.
    /// `None` when the fields do not form a valid calendar date.
    pub fn to_adjusted(&self) -> Option<NaiveDateTime> {
        let base = NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_milli_opt(
            self.hour,
            self.minute,
            self.second,
            self.millisecond.unwrap_or(0),
        )?;
        let offset = Duration::minutes(i64::from(self.tzoffset_minutes.unwrap_or(0)));
        base.checked_add_signed(offset)
    }
}

/// Date without a time of day. `month` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
}

impl CalendarDate {
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// A date value lifted out of an engine string, tagged the same way the
/// browser front-end recognises it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_ctor")]
pub enum ExifDateValue {
    #[serde(rename = "ExifDateTime")]
    DateTime(StructuredDate),
    #[serde(rename = "ExifDate")]
    Date(CalendarDate),
}

impl ExifDateValue {
    /// Parses `YYYY:MM:DD HH:MM:SS[.fff][Z|±HH:MM]` or `YYYY:MM:DD`.
    /// Placeholder dates such as `0000:00:00 00:00:00` yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        if let Some(caps) = EXIF_DATE_TIME_RE.captures(raw) {
            let date = StructuredDate {
                year: caps[1].parse().ok()?,
                month: caps[2].parse().ok()?,
                day: caps[3].parse().ok()?,
                hour: caps[4].parse().ok()?,
                minute: caps[5].parse().ok()?,
                second: caps[6].parse().ok()?,
                millisecond: caps.get(7).and_then(|m| parse_millis(m.as_str())),
                tzoffset_minutes: match caps.get(8) {
                    Some(m) => Some(parse_offset(m.as_str())?),
                    None => None,
                },
                raw_value: Some(raw.to_string()),
            };
            date.to_adjusted()?;
            return Some(ExifDateValue::DateTime(date));
        }

        if let Some(caps) = EXIF_DATE_RE.captures(raw) {
            let date = CalendarDate {
                year: caps[1].parse().ok()?,
                month: caps[2].parse().ok()?,
                day: caps[3].parse().ok()?,
                raw_value: Some(raw.to_string()),
            };
            date.to_naive()?;
            return Some(ExifDateValue::Date(date));
        }

        None
    }
}

fn parse_millis(fraction: &str) -> Option<u32> {
    let digits: String = fraction.chars().chain("000".chars()).take(3).collect();
    digits.parse().ok()
}

fn parse_offset(offset: &str) -> Option<i32> {
    if offset == "Z" {
        return Some(0);
    }
    let sign = if offset.starts_with('-') { -1 } else { 1 };
    let digits: String = offset[1..].chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 4 {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    Some(sign * (hours * 60 + minutes))
}
