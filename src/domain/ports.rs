use crate::domain::model::{
    Appointment, AppointmentId, AppointmentRecord, Lead, LeadId, LeadRecord, Stats,
};
use crate::utils::error::Result;
use chrono::{NaiveDate, NaiveDateTime};

/// 「現在」的來源，測試時可替換成固定時間
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// leads 與 appointments 的持久化介面
///
/// 實作必須在內部序列化寫入，讓 `get_stats` 只會看到完整寫入前或寫入後的狀態。
pub trait LeadStore: Send + Sync {
    /// 確保兩個集合存在，可重複呼叫
    fn init(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    fn insert_lead(
        &self,
        lead: &LeadRecord,
    ) -> impl std::future::Future<Output = Result<LeadId>> + Send;

    /// `lead_id` 必須指向已存在的 lead，否則回傳 `UnknownLead`
    fn insert_appointment(
        &self,
        appointment: &AppointmentRecord,
    ) -> impl std::future::Future<Output = Result<AppointmentId>> + Send;

    fn get_stats(&self) -> impl std::future::Future<Output = Result<Stats>> + Send;

    fn list_leads(&self) -> impl std::future::Future<Output = Result<Vec<Lead>>> + Send;

    fn list_appointments(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Appointment>>> + Send;

    /// 指定日期建立的 lead 數量
    fn count_leads_on(
        &self,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<u64>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn academy_name(&self) -> &str;
    fn backend(&self) -> crate::config::StorageBackend;
    fn database_path(&self) -> &str;
    fn data_dir(&self) -> &str;
}
