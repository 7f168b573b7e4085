use actix_web::{HttpResponse, Responder};
use common::model::csv::ALL_COLUMNS;

const TEMPLATE_FILE_NAME: &str = "reservation_template.csv";

const SAMPLE_ROWS: [[&str; 13]; 2] = [
    [
        "예약 문의합니다",
        "홍길동",
        "김영희",
        "010-1234-5678",
        "강남웨딩홀",
        "주례있음",
        "없음",
        "2024-06-15",
        "14:00",
        "네이버 검색",
        "",
        "비용이 궁금합니다",
        "password123",
    ],
    [
        "두 번째 문의",
        "이민수",
        "박소영",
        "010-9876-5432",
        "서울웨딩홀",
        "주례없음",
        "있음",
        "2024-07-20",
        "16:00",
        "인스타그램",
        "",
        "문의드립니다",
        "mypass456",
    ],
];

/// CSV template: every importable column except `host_id`, plus two
/// example inquiries.
pub fn template_csv() -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(ALL_COLUMNS.iter().filter(|c| **c != "host_id"))?;
    for row in SAMPLE_ROWS {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

pub(crate) async fn process() -> impl Responder {
    match template_csv() {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", TEMPLATE_FILE_NAME),
            ))
            .body(bytes),
        Err(e) => HttpResponse::InternalServerError().body(format!("Error: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::pipeline::prepare_records;
    use common::model::csv::REQUIRED_COLUMNS;

    #[test]
    fn template_imports_cleanly() {
        let bytes = template_csv().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("title,bride,groom,contact,venue,ceremony_type,"));
        assert!(!text.contains("host_id"));

        let records = prepare_records(&text, &REQUIRED_COLUMNS).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].ceremony_type, "주례없음");
        assert_eq!(records[1].password, "mypass456");
    }
}
