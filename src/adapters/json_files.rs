//! 桌面版的檔案後端：`leads.json` 與 `citas.json` 兩份陣列文件，每次異動整份重寫。

use crate::domain::model::{
    Appointment, AppointmentId, AppointmentRecord, Lead, LeadId, LeadRecord, Stats,
};
use crate::domain::ports::LeadStore;
use crate::utils::error::{IntakeError, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub const LEADS_FILE: &str = "leads.json";
pub const APPOINTMENTS_FILE: &str = "citas.json";

#[derive(Debug, Default)]
struct Documents {
    loaded: bool,
    leads: Vec<Lead>,
    appointments: Vec<Appointment>,
}

#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    docs: Mutex<Documents>,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            docs: Mutex::new(Documents::default()),
        }
    }

    /// 建立並初始化
    pub async fn open<P: Into<PathBuf>>(dir: P) -> Result<Self> {
        let store = Self::new(dir);
        store.init().await?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn leads_path(&self) -> PathBuf {
        self.dir.join(LEADS_FILE)
    }

    fn appointments_path(&self) -> PathBuf {
        self.dir.join(APPOINTMENTS_FILE)
    }

    /// 從磁碟重新載入；缺少的檔案以空陣列建立
    async fn load(&self, docs: &mut Documents) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        docs.leads = read_or_create(&self.leads_path()).await?;
        docs.appointments = read_or_create(&self.appointments_path()).await?;
        docs.loaded = true;
        tracing::debug!(
            "Loaded {} leads and {} appointments from {}",
            docs.leads.len(),
            docs.appointments.len(),
            self.dir.display()
        );
        Ok(())
    }

    async fn ensure_loaded(&self, docs: &mut Documents) -> Result<()> {
        if !docs.loaded {
            self.load(docs).await?;
        }
        Ok(())
    }
}

async fn read_or_create<T: Serialize + DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let empty: Vec<T> = Vec::new();
            write_document(path, &empty).await?;
            Ok(empty)
        }
        Err(e) => Err(e.into()),
    }
}

/// 先寫暫存檔再改名，讀者不會看到寫一半的文件
async fn write_document<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let data = serde_json::to_vec_pretty(items)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &data).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

fn next_id(last: Option<i64>) -> i64 {
    last.map_or(1, |id| id + 1)
}

impl LeadStore for JsonFileStore {
    async fn init(&self) -> Result<()> {
        let mut docs = self.docs.lock().await;
        self.load(&mut docs).await
    }

    async fn insert_lead(&self, lead: &LeadRecord) -> Result<LeadId> {
        let mut docs = self.docs.lock().await;
        self.ensure_loaded(&mut docs).await?;

        let id = next_id(docs.leads.iter().map(|l| l.id).max());
        docs.leads.push(Lead {
            id,
            record: lead.clone(),
        });

        let written = write_document(&self.leads_path(), &docs.leads).await;
        if let Err(e) = written {
            // 磁碟寫失敗時記憶體也不保留
            docs.leads.pop();
            return Err(e);
        }
        Ok(id)
    }

    async fn insert_appointment(&self, appointment: &AppointmentRecord) -> Result<AppointmentId> {
        let mut docs = self.docs.lock().await;
        self.ensure_loaded(&mut docs).await?;

        if !docs.leads.iter().any(|l| l.id == appointment.lead_id) {
            return Err(IntakeError::UnknownLead {
                lead_id: appointment.lead_id,
            });
        }

        let id = next_id(docs.appointments.iter().map(|a| a.id).max());
        docs.appointments.push(Appointment {
            id,
            record: appointment.clone(),
        });

        let written = write_document(&self.appointments_path(), &docs.appointments).await;
        if let Err(e) = written {
            docs.appointments.pop();
            return Err(e);
        }
        Ok(id)
    }

    async fn get_stats(&self) -> Result<Stats> {
        let mut docs = self.docs.lock().await;
        self.ensure_loaded(&mut docs).await?;

        Ok(Stats {
            total_leads: docs.leads.len() as u64,
            total_appointments: docs.appointments.len() as u64,
        })
    }

    async fn list_leads(&self) -> Result<Vec<Lead>> {
        let mut docs = self.docs.lock().await;
        self.ensure_loaded(&mut docs).await?;
        Ok(docs.leads.clone())
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        let mut docs = self.docs.lock().await;
        self.ensure_loaded(&mut docs).await?;
        Ok(docs.appointments.clone())
    }

    async fn count_leads_on(&self, date: NaiveDate) -> Result<u64> {
        let day = date.format("%Y-%m-%d").to_string();
        let mut docs = self.docs.lock().await;
        self.ensure_loaded(&mut docs).await?;

        Ok(docs
            .leads
            .iter()
            .filter(|l| l.record.created_at.starts_with(&day))
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AppointmentStatus, Category, QualificationTier};
    use tempfile::TempDir;

    fn lead(name: &str) -> LeadRecord {
        LeadRecord {
            name: name.to_string(),
            phone: "3001112222".to_string(),
            interest: Category::Business,
            qualification: QualificationTier::Medium,
            created_at: "2024-01-01T08:00:00.000000".to_string(),
        }
    }

    fn appointment(lead_id: LeadId) -> AppointmentRecord {
        AppointmentRecord {
            lead_id,
            date: "2024-01-02".to_string(),
            time: "10:00".to_string(),
            appointment_type: Category::Business,
            status: AppointmentStatus::Confirmed,
            created_at: "2024-01-01T08:05:00.000000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_init_creates_empty_documents() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("datos_academia")).await.unwrap();

        let leads = std::fs::read_to_string(store.dir().join(LEADS_FILE)).unwrap();
        let citas = std::fs::read_to_string(store.dir().join(APPOINTMENTS_FILE)).unwrap();
        assert_eq!(leads.trim(), "[]");
        assert_eq!(citas.trim(), "[]");
    }

    #[tokio::test]
    async fn test_documents_are_rewritten_and_reloaded() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        let lead_id = store.insert_lead(&lead("Ana")).await.unwrap();
        let appt_id = store.insert_appointment(&appointment(lead_id)).await.unwrap();
        assert_eq!((lead_id, appt_id), (1, 1));

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join(APPOINTMENTS_FILE)).unwrap())
                .unwrap();
        assert_eq!(raw[0]["lead_id"], 1);
        assert_eq!(raw[0]["type"], "Business");

        let reopened = JsonFileStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.list_leads().await.unwrap()[0].record, lead("Ana"));
        assert_eq!(reopened.insert_lead(&lead("Eva")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unknown_lead_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        let err = store.insert_appointment(&appointment(5)).await.unwrap_err();
        assert!(matches!(err, IntakeError::UnknownLead { lead_id: 5 }));
        assert_eq!(store.get_stats().await.unwrap(), Stats::default());
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        store.insert_lead(&lead("Ana")).await.unwrap();

        store.init().await.unwrap();
        store.init().await.unwrap();

        assert_eq!(store.get_stats().await.unwrap().total_leads, 1);
    }

    #[tokio::test]
    async fn test_corrupted_document_is_storage_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(LEADS_FILE), "{not json").unwrap();

        let err = JsonFileStore::open(dir.path()).await.err().unwrap();
        assert!(err.is_storage_error());
    }
}
