use super::{RecordStore, StoreError, RESERVATIONS_TABLE};
use async_trait::async_trait;
use common::model::reservation::ReservationRecord;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

const CREATE_RESERVATIONS: &str = "
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        bride TEXT NOT NULL,
        groom TEXT NOT NULL,
        contact TEXT NOT NULL,
        venue TEXT NOT NULL,
        ceremony_type TEXT NOT NULL,
        second_party TEXT NOT NULL,
        ceremony_date TEXT NOT NULL,
        ceremony_time TEXT NOT NULL,
        referral_source TEXT NOT NULL,
        additional_input TEXT NOT NULL DEFAULT '',
        notes TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'pending',
        password TEXT NOT NULL,
        host_id TEXT,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )";

const INSERT_RESERVATION: &str = "
    INSERT INTO reservations (
        title, bride, groom, contact, venue, ceremony_type, second_party,
        ceremony_date, ceremony_time, referral_source, additional_input,
        notes, status, password, host_id
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)";

/// Embedded SQLite record store.
///
/// The connection is shared behind a mutex and every batch runs inside one
/// transaction on the blocking thread pool.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(CREATE_RESERVATIONS)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Number of rows currently stored in `table`.
    pub fn count_rows(&self, table: &str) -> Result<usize, StoreError> {
        check_table(table)?;
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::Task("sqlite connection lock poisoned".to_string()))?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM reservations", [], |row| {
            row.get(0)
        })?;
        Ok(count as usize)
    }
}

fn check_table(table: &str) -> Result<(), StoreError> {
    if table == RESERVATIONS_TABLE {
        Ok(())
    } else {
        Err(StoreError::UnknownTable(table.to_string()))
    }
}

fn insert_blocking(
    conn: &Mutex<Connection>,
    records: &[ReservationRecord],
) -> Result<(), StoreError> {
    let mut conn = conn
        .lock()
        .map_err(|_| StoreError::Task("sqlite connection lock poisoned".to_string()))?;
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(INSERT_RESERVATION)?;
        for r in records {
            stmt.execute(params![
                r.title,
                r.bride,
                r.groom,
                r.contact,
                r.venue,
                r.ceremony_type,
                r.second_party,
                r.ceremony_date,
                r.ceremony_time,
                r.referral_source,
                r.additional_input,
                r.notes,
                r.status.as_str(),
                r.password,
                r.host_id,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn insert_batch(
        &self,
        table: &str,
        records: &[ReservationRecord],
    ) -> Result<(), StoreError> {
        check_table(table)?;
        let conn = Arc::clone(&self.conn);
        let records = records.to_vec();
        tokio::task::spawn_blocking(move || insert_blocking(&conn, &records))
            .await
            .map_err(|e| StoreError::Task(format!("join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::reservation::ReservationStatus;

    fn record(title: &str) -> ReservationRecord {
        ReservationRecord {
            title: title.to_string(),
            bride: "홍길동".into(),
            groom: "김영희".into(),
            contact: "010-1234-5678".into(),
            venue: "강남웨딩홀".into(),
            ceremony_type: "주례있음".into(),
            second_party: "없음".into(),
            ceremony_date: "2024-06-15".into(),
            ceremony_time: "14:00".into(),
            referral_source: "기타".into(),
            additional_input: String::new(),
            notes: String::new(),
            status: ReservationStatus::Pending,
            password: "default123".into(),
            host_id: None,
        }
    }

    #[tokio::test]
    async fn inserts_a_batch() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert_batch(RESERVATIONS_TABLE, &[record("a"), record("b")])
            .await
            .unwrap();
        assert_eq!(store.count_rows(RESERVATIONS_TABLE).unwrap(), 2);
    }

    #[tokio::test]
    async fn stores_status_and_host() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut assigned = record("assigned");
        assigned.host_id = Some("host-7".into());
        store
            .insert_batch(RESERVATIONS_TABLE, &[assigned])
            .await
            .unwrap();

        let conn = store.conn.lock().unwrap();
        let (status, host): (String, Option<String>) = conn
            .query_row("SELECT status, host_id FROM reservations", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(status, "pending");
        assert_eq!(host.as_deref(), Some("host-7"));
    }

    #[tokio::test]
    async fn rejects_other_tables() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store.insert_batch("hosts", &[record("a")]).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownTable(t) if t == "hosts"));
    }

    #[tokio::test]
    async fn rows_survive_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.sqlite");
        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .insert_batch(RESERVATIONS_TABLE, &[record("a")])
                .await
                .unwrap();
        }
        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.count_rows(RESERVATIONS_TABLE).unwrap(), 1);
    }
}
