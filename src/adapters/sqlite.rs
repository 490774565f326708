//! SQLite 後端，schema 與網頁版相同：`leads` 與 `appointments` 兩張表。

use crate::domain::model::{
    Appointment, AppointmentId, AppointmentRecord, Lead, LeadId, LeadRecord, Stats,
};
use crate::domain::ports::LeadStore;
use crate::utils::error::{IntakeError, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, ErrorCode};
use std::path::Path;
use std::sync::{Arc, Mutex};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS leads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    interest TEXT NOT NULL,
    qualification TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    lead_id INTEGER NOT NULL,
    date TEXT NOT NULL,
    time TEXT NOT NULL,
    type TEXT NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY(lead_id) REFERENCES leads(id)
);
";

/// 單一連線放在 mutex 後面，所有寫入因此是序列化的
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// 開啟（或建立）資料庫檔案，必要時建立上層目錄
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        tracing::debug!("Opened SQLite database at {}", path.display());
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 開啟並初始化
    pub async fn connect<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self::open(path)?;
        store.init().await?;
        Ok(store)
    }

    /// 在 blocking 執行緒上持鎖執行，避免卡住 async runtime
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| IntakeError::LockPoisoned)?;
            f(&mut guard)
        })
        .await?
    }
}

fn count(conn: &Connection, sql: &str) -> Result<u64> {
    let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
    Ok(n as u64)
}

impl LeadStore for SqliteStore {
    async fn init(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;
        tracing::debug!("SQLite schema ready");
        Ok(())
    }

    async fn insert_lead(&self, lead: &LeadRecord) -> Result<LeadId> {
        let lead = lead.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO leads (name, phone, interest, qualification, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    lead.name,
                    lead.phone,
                    lead.interest.as_str(),
                    lead.qualification.as_str(),
                    lead.created_at
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    async fn insert_appointment(&self, appointment: &AppointmentRecord) -> Result<AppointmentId> {
        let appointment = appointment.clone();
        self.with_conn(move |conn| {
            let inserted = conn.execute(
                "INSERT INTO appointments (lead_id, date, time, type, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    appointment.lead_id,
                    appointment.date,
                    appointment.time,
                    appointment.appointment_type.as_str(),
                    appointment.status.as_str(),
                    appointment.created_at
                ],
            );

            match inserted {
                Ok(_) => Ok(conn.last_insert_rowid()),
                // 唯一的約束是 lead_id 外鍵
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == ErrorCode::ConstraintViolation =>
                {
                    Err(IntakeError::UnknownLead {
                        lead_id: appointment.lead_id,
                    })
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    async fn get_stats(&self) -> Result<Stats> {
        self.with_conn(|conn| {
            // 同一個讀取交易內的兩次計數
            let tx = conn.transaction()?;
            let total_leads = count(&tx, "SELECT COUNT(*) FROM leads")?;
            let total_appointments = count(&tx, "SELECT COUNT(*) FROM appointments")?;
            tx.commit()?;

            Ok(Stats {
                total_leads,
                total_appointments,
            })
        })
        .await
    }

    async fn list_leads(&self) -> Result<Vec<Lead>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, phone, interest, qualification, created_at
                 FROM leads ORDER BY id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?;

            let mut leads = Vec::new();
            for row in rows {
                let (id, name, phone, interest, qualification, created_at) = row?;
                leads.push(Lead {
                    id,
                    record: LeadRecord {
                        name,
                        phone,
                        interest: interest.parse()?,
                        qualification: qualification.parse()?,
                        created_at,
                    },
                });
            }
            Ok(leads)
        })
        .await
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, lead_id, date, time, type, status, created_at
                 FROM appointments ORDER BY id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })?;

            let mut appointments = Vec::new();
            for row in rows {
                let (id, lead_id, date, time, appointment_type, status, created_at) = row?;
                appointments.push(Appointment {
                    id,
                    record: AppointmentRecord {
                        lead_id,
                        date,
                        time,
                        appointment_type: appointment_type.parse()?,
                        status: status.parse()?,
                        created_at,
                    },
                });
            }
            Ok(appointments)
        })
        .await
    }

    async fn count_leads_on(&self, date: NaiveDate) -> Result<u64> {
        let day = date.format("%Y-%m-%d").to_string();
        self.with_conn(move |conn| {
            let n: i64 = conn.query_row(
                "SELECT COUNT(*) FROM leads WHERE substr(created_at, 1, 10) = ?1",
                params![day],
                |row| row.get(0),
            )?;
            Ok(n as u64)
        })
        .await
    }
}
