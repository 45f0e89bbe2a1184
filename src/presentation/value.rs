use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::constants::PLACEHOLDER;
use crate::models::{CalendarDate, StructuredDate};

lazy_static! {
    static ref COLON_DATE_RE: Regex = Regex::new(r"^(\d{4}):(\d{2}):(\d{2})").unwrap();
}

// en-US style, e.g. "5/1/2023, 11:00:00 AM"
const LOCALE_DATE_TIME: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
const LOCALE_DATE: &str = "%-m/%-d/%Y";

const WRAPPER_KEYS: [&str; 3] = ["value", "_", "Description"];
const DATE_TIME_FIELDS: [&str; 6] = ["year", "month", "day", "hour", "minute", "second"];

/// Shape of a metadata value, in the order the formatter resolves them.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue<'a> {
    Absent,
    StructuredDate(StructuredDate),
    CalendarDate(CalendarDate),
    Text(&'a str),
    Wrapper(&'a Value),
    Object(&'a Value),
    Scalar(&'a Value),
}

impl<'a> MetadataValue<'a> {
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => MetadataValue::Absent,
            Some(Value::String(s)) => MetadataValue::Text(s),
            Some(v @ Value::Object(map)) => classify_object(v, map),
            Some(v @ Value::Array(_)) => MetadataValue::Object(v),
            Some(v) => MetadataValue::Scalar(v),
        }
    }
}

fn classify_object<'a>(value: &'a Value, map: &'a Map<String, Value>) -> MetadataValue<'a> {
    let ctor = map.get("_ctor").and_then(Value::as_str);

    let has_date_time_fields = DATE_TIME_FIELDS
        .iter()
        .all(|field| map.get(*field).is_some_and(Value::is_number));
    if ctor == Some("ExifDateTime") || has_date_time_fields {
        if let Ok(date) = serde_json::from_value::<StructuredDate>(value.clone()) {
            return MetadataValue::StructuredDate(date);
        }
    }

    if ctor == Some("ExifDate") {
        if let Ok(date) = serde_json::from_value::<CalendarDate>(value.clone()) {
            return MetadataValue::CalendarDate(date);
        }
    }

    match WRAPPER_KEYS.iter().find_map(|key| map.get(*key)) {
        Some(inner) => MetadataValue::Wrapper(inner),
        None => MetadataValue::Object(value),
    }
}

/// Human-readable rendering of any metadata value, normalising the date
/// representations the engine can produce.
pub fn format_date_field(value: Option<&Value>) -> String {
    match MetadataValue::classify(value) {
        MetadataValue::Absent => PLACEHOLDER.to_string(),
        MetadataValue::StructuredDate(date) => match date.to_adjusted() {
            Some(instant) => instant.format(LOCALE_DATE_TIME).to_string(),
            None => date.raw_value.unwrap_or_else(|| PLACEHOLDER.to_string()),
        },
        MetadataValue::CalendarDate(date) => match date.to_naive() {
            Some(day) => day.format(LOCALE_DATE).to_string(),
            None => date.raw_value.unwrap_or_else(|| PLACEHOLDER.to_string()),
        },
        MetadataValue::Text(text) => COLON_DATE_RE.replace(text, "$1-$2-$3").into_owned(),
        MetadataValue::Wrapper(inner) => format_date_field(Some(inner)),
        MetadataValue::Object(v) => v.to_string(),
        MetadataValue::Scalar(v) => match v {
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        },
    }
}
