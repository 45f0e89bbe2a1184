use serde::Serialize;
use serde_json::Value;

use super::value::format_date_field;
use crate::models::MetadataRecord;

/// One labeled row of a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailGroup {
    pub title: &'static str,
    pub fields: Vec<Field>,
}

/// (label, engine tag)
type Row = (&'static str, &'static str);

const DETAIL_GROUPS: &[(&str, &[Row])] = &[
    (
        "Camera Information",
        &[
            ("Make", "Make"),
            ("Model", "Model"),
            ("Lens Model", "LensModel"),
            ("Software", "Software"),
            ("Firmware Version", "FirmwareVersion"),
        ],
    ),
    (
        "Exposure Settings",
        &[
            ("ISO", "ISO"),
            ("Aperture", "Aperture"),
            ("Shutter Speed", "ShutterSpeed"),
            ("Focal Length", "FocalLength"),
            ("Exposure Mode", "ExposureMode"),
            ("White Balance", "WhiteBalance"),
        ],
    ),
    (
        "Temperature & Hardware",
        &[
            ("Shutter Count", "ShutterCount"),
            ("Ambient Temperature", "AmbientTemperature"),
            ("Battery Level", "BatteryLevel"),
        ],
    ),
    (
        "Time & Dates",
        &[
            ("Date Time Original", "DateTimeOriginal"),
            ("Create Date", "CreateDate"),
            ("Modify Date", "ModifyDate"),
        ],
    ),
];

fn field(record: &MetadataRecord, tag: &str) -> String {
    format_date_field(record.get(tag))
}

fn present<'a>(record: &'a MetadataRecord, tag: &str) -> Option<&'a Value> {
    record.get(tag).filter(|v| !v.is_null())
}

pub fn render_summary(record: &MetadataRecord) -> Vec<Field> {
    let model = present(record, "Model")
        .map(|v| format_date_field(Some(v)))
        .unwrap_or_default();
    let camera = format!("{} {}", field(record, "Make"), model)
        .trim_end()
        .to_string();

    vec![
        Field { label: "Camera", value: camera },
        Field { label: "Lens", value: field(record, "LensModel") },
        Field { label: "Date Taken", value: field(record, "DateTimeOriginal") },
        Field {
            label: "Resolution",
            value: format!("{} x {}", field(record, "ImageWidth"), field(record, "ImageHeight")),
        },
        Field { label: "ISO", value: field(record, "ISO") },
        Field { label: "Aperture", value: field(record, "Aperture") },
        Field { label: "Shutter", value: field(record, "ShutterSpeed") },
        Field { label: "Shutter Count", value: field(record, "ShutterCount") },
    ]
}

pub fn render_details(record: &MetadataRecord) -> Vec<DetailGroup> {
    DETAIL_GROUPS
        .iter()
        .map(|&(title, rows)| DetailGroup {
            title,
            fields: rows
                .iter()
                .map(|&(label, tag)| Field { label, value: field(record, tag) })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> MetadataRecord {
        value.as_object().cloned().unwrap()
    }

    fn value_of<'a>(fields: &'a [Field], label: &str) -> &'a str {
        &fields.iter().find(|f| f.label == label).unwrap().value
    }

    #[test]
    fn test_summary_camera_line() {
        let summary = render_summary(&record(json!({ "Make": "Canon", "Model": "EOS R5" })));
        assert_eq!(value_of(&summary, "Camera"), "Canon EOS R5");
    }

    #[test]
    fn test_summary_defaults_to_placeholder() {
        let summary = render_summary(&MetadataRecord::new());
        assert_eq!(summary.len(), 8);
        assert_eq!(value_of(&summary, "Camera"), "-");
        assert_eq!(value_of(&summary, "Resolution"), "- x -");
        assert_eq!(value_of(&summary, "Shutter Count"), "-");
    }

    #[test]
    fn test_summary_values() {
        let summary = render_summary(&record(json!({
            "ImageWidth": 8192,
            "ImageHeight": 5464,
            "ISO": 400,
            "Aperture": 2.8,
            "ShutterSpeed": "1/250",
            "DateTimeOriginal": {
                "_ctor": "ExifDateTime",
                "year": 2023, "month": 5, "day": 1,
                "hour": 10, "minute": 0, "second": 0,
                "tzoffsetMinutes": 60
            }
        })));
        assert_eq!(value_of(&summary, "Resolution"), "8192 x 5464");
        assert_eq!(value_of(&summary, "ISO"), "400");
        assert_eq!(value_of(&summary, "Aperture"), "2.8");
        assert_eq!(value_of(&summary, "Shutter"), "1/250");
        assert_eq!(value_of(&summary, "Date Taken"), "5/1/2023, 11:00:00 AM");
    }

    #[test]
    fn test_details_groups_and_lookup_by_tag() {
        let details = render_details(&record(json!({
            "LensModel": "RF24-105mm F4 L IS USM",
            "ModifyDate": "2023:06:02 08:15:00",
            "ShutterCount": 15234
        })));

        let titles: Vec<_> = details.iter().map(|g| g.title).collect();
        assert_eq!(
            titles,
            ["Camera Information", "Exposure Settings", "Temperature & Hardware", "Time & Dates"]
        );
        assert_eq!(value_of(&details[0].fields, "Lens Model"), "RF24-105mm F4 L IS USM");
        assert_eq!(value_of(&details[0].fields, "Software"), "-");
        assert_eq!(value_of(&details[2].fields, "Shutter Count"), "15234");
        assert_eq!(value_of(&details[3].fields, "Modify Date"), "2023-06-02 08:15:00");
    }
}
