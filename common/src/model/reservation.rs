use serde::{Deserialize, Serialize};

/// Officiant-present ceremony, used when the import row leaves the type blank.
pub const DEFAULT_CEREMONY_TYPE: &str = "주례있음";
/// "None", used when no second party is given.
pub const DEFAULT_SECOND_PARTY: &str = "없음";
pub const DEFAULT_CEREMONY_TIME: &str = "14:00";
/// "Other", used when the referral source is blank.
pub const DEFAULT_REFERRAL_SOURCE: &str = "기타";
/// Placeholder inquiry password for imported rows that carry none.
pub const DEFAULT_PASSWORD: &str = "default123";

/// Lifecycle state of a reservation inquiry.
///
/// Imports always create `Pending` rows; the other states are set later by
/// administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

/// A reservation inquiry as written to the `reservations` table.
///
/// Field names serialize in the table's snake_case column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub title: String,
    pub bride: String,
    pub groom: String,
    pub contact: String,
    pub venue: String,
    pub ceremony_type: String,
    pub second_party: String,
    /// `YYYY-MM-DD`, stored as given.
    pub ceremony_date: String,
    pub ceremony_time: String,
    pub referral_source: String,
    pub additional_input: String,
    pub notes: String,
    pub status: ReservationStatus,
    pub password: String,
    /// Assigned host; `None` while unassigned.
    pub host_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ReservationStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        assert_eq!(ReservationStatus::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn as_str_matches_serde_name_for_every_status() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
        ] {
            let value = serde_json::to_value(status).unwrap();
            assert_eq!(value.as_str(), Some(status.as_str()));
            let back: ReservationStatus = serde_json::from_value(value).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn unassigned_host_serializes_as_null() {
        let record = ReservationRecord {
            title: "예약 문의합니다".into(),
            bride: "홍길동".into(),
            groom: "김영희".into(),
            contact: "010-1234-5678".into(),
            venue: "강남웨딩홀".into(),
            ceremony_type: DEFAULT_CEREMONY_TYPE.into(),
            second_party: DEFAULT_SECOND_PARTY.into(),
            ceremony_date: "2024-06-15".into(),
            ceremony_time: DEFAULT_CEREMONY_TIME.into(),
            referral_source: DEFAULT_REFERRAL_SOURCE.into(),
            additional_input: String::new(),
            notes: String::new(),
            status: ReservationStatus::default(),
            password: DEFAULT_PASSWORD.into(),
            host_id: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["host_id"], serde_json::Value::Null);
        assert_eq!(value["status"], "pending");
        assert_eq!(value["ceremony_date"], "2024-06-15");
    }
}
