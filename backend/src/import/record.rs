use super::parser::RawRow;
use common::model::csv::NON_EMPTY_COLUMNS;
use common::model::reservation::{
    ReservationRecord, ReservationStatus, DEFAULT_CEREMONY_TIME, DEFAULT_CEREMONY_TYPE,
    DEFAULT_PASSWORD, DEFAULT_REFERRAL_SOURCE, DEFAULT_SECOND_PARTY,
};

/// Why a raw row could not become a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    MissingField(&'static str),
}

fn value<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map(|v| v.trim()).unwrap_or("")
}

fn value_or(row: &RawRow, column: &str, default: &str) -> String {
    match value(row, column) {
        "" => default.to_string(),
        v => v.to_string(),
    }
}

/// Build a pending reservation from one parsed row.
///
/// Rows with a blank title, bride, groom, contact, venue or ceremony date
/// are rejected. Blank optional columns take their defaults.
pub fn build_record(row: &RawRow) -> Result<ReservationRecord, RowRejection> {
    if let Some(column) = NON_EMPTY_COLUMNS
        .iter()
        .copied()
        .find(|column| value(row, column).is_empty())
    {
        return Err(RowRejection::MissingField(column));
    }

    let host_id = match value(row, "host_id") {
        "" => None,
        id => Some(id.to_string()),
    };

    Ok(ReservationRecord {
        title: value(row, "title").to_string(),
        bride: value(row, "bride").to_string(),
        groom: value(row, "groom").to_string(),
        contact: value(row, "contact").to_string(),
        venue: value(row, "venue").to_string(),
        ceremony_type: value_or(row, "ceremony_type", DEFAULT_CEREMONY_TYPE),
        second_party: value_or(row, "second_party", DEFAULT_SECOND_PARTY),
        ceremony_date: value(row, "ceremony_date").to_string(),
        ceremony_time: value_or(row, "ceremony_time", DEFAULT_CEREMONY_TIME),
        referral_source: value_or(row, "referral_source", DEFAULT_REFERRAL_SOURCE),
        additional_input: value(row, "additional_input").to_string(),
        notes: value(row, "notes").to_string(),
        status: ReservationStatus::Pending,
        password: value_or(row, "password", DEFAULT_PASSWORD),
        host_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn minimal() -> RawRow {
        row(&[
            ("title", "예약 문의합니다"),
            ("bride", "홍길동"),
            ("groom", "김영희"),
            ("contact", "010-1234-5678"),
            ("venue", "강남웨딩홀"),
            ("ceremony_type", ""),
            ("ceremony_date", "2024-06-15"),
            ("ceremony_time", ""),
        ])
    }

    #[test]
    fn fills_defaults_for_blank_optional_fields() {
        let record = build_record(&minimal()).unwrap();
        assert_eq!(record.ceremony_type, DEFAULT_CEREMONY_TYPE);
        assert_eq!(record.second_party, DEFAULT_SECOND_PARTY);
        assert_eq!(record.ceremony_time, "14:00");
        assert_eq!(record.referral_source, DEFAULT_REFERRAL_SOURCE);
        assert_eq!(record.password, DEFAULT_PASSWORD);
        assert_eq!(record.additional_input, "");
        assert_eq!(record.notes, "");
        assert_eq!(record.host_id, None);
        assert_eq!(record.status, ReservationStatus::Pending);
    }

    #[test]
    fn keeps_given_optional_values() {
        let mut raw = minimal();
        raw.insert("ceremony_type".into(), "주례없음".into());
        raw.insert("password".into(), "mypass456".into());
        raw.insert("host_id".into(), "3".into());
        raw.insert("notes".into(), "문의드립니다".into());
        let record = build_record(&raw).unwrap();
        assert_eq!(record.ceremony_type, "주례없음");
        assert_eq!(record.password, "mypass456");
        assert_eq!(record.host_id.as_deref(), Some("3"));
        assert_eq!(record.notes, "문의드립니다");
    }

    #[test]
    fn rejects_blank_required_field() {
        let mut raw = minimal();
        raw.insert("venue".into(), "   ".into());
        assert_eq!(
            build_record(&raw),
            Err(RowRejection::MissingField("venue"))
        );
    }

    #[test]
    fn rejects_missing_ceremony_date() {
        let mut raw = minimal();
        raw.remove("ceremony_date");
        assert_eq!(
            build_record(&raw),
            Err(RowRejection::MissingField("ceremony_date"))
        );
    }

    #[test]
    fn date_format_is_not_checked() {
        let mut raw = minimal();
        raw.insert("ceremony_date".into(), "next spring".into());
        assert_eq!(build_record(&raw).unwrap().ceremony_date, "next spring");
    }
}
