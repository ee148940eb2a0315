//! Item row as stored in the `items` table.

use chrono::{NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};
use sqlx::FromRow;

/// Rows inserted when the table is found empty at startup.
pub const SEED_ITEMS: &[(&str, &str)] = &[
    ("Item 1", "First sample item"),
    ("Item 2", "Second sample item"),
    ("Item 3", "Third sample item"),
];

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Rendered as `YYYY-MM-DD HH:MM:SS[.ffffff]`; the fraction is always six
    /// digits when present.
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: NaiveDateTime,
}

fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

fn format_timestamp(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() / 1_000 != 0 {
        ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn created_at_serializes_as_text() {
        let item = Item {
            id: 1,
            name: "Item 1".to_string(),
            description: Some("First sample item".to_string()),
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_micro_opt(9, 30, 0, 123456)
                .unwrap(),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Item 1");
        assert_eq!(json["description"], "First sample item");
        assert_eq!(json["created_at"], "2024-05-01 09:30:00.123456");
    }

    #[test]
    fn missing_description_serializes_as_null() {
        let item = Item {
            id: 7,
            name: "bare".to_string(),
            description: None,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert!(json["description"].is_null());
        assert_eq!(json["created_at"], "2024-01-02 03:04:05");
    }

    #[test]
    fn millisecond_aligned_fraction_keeps_six_digits() {
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_micro_opt(9, 30, 0, 123_000)
            .unwrap();
        let item = Item {
            id: 2,
            name: "Item 2".to_string(),
            description: None,
            created_at: ts,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["created_at"], "2024-05-01 09:30:00.123000");
    }

    #[test]
    fn sub_microsecond_remainder_is_dropped() {
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_nano_opt(9, 30, 0, 500)
            .unwrap();

        assert_eq!(format_timestamp(&ts), "2024-05-01 09:30:00");
    }

    #[test]
    fn seed_set_is_three_named_items() {
        let names: Vec<_> = SEED_ITEMS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["Item 1", "Item 2", "Item 3"]);
    }
}
