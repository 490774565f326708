use crate::core::{classifier, qualifier};
use crate::domain::model::{
    AppointmentRecord, AppointmentSlot, AppointmentStatus, Category, LeadId, LeadRecord,
};
use crate::domain::ports::Clock;
use chrono::NaiveDateTime;

/// ISO-8601 本地時間，含微秒
pub fn iso_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// 組出待寫入的 lead。欄位驗證由邊界層負責。
pub fn build_lead(clock: &dyn Clock, name: &str, phone: &str, interest_text: &str) -> LeadRecord {
    let interest = classifier::classify(interest_text);
    let qualification = qualifier::qualify(interest);

    LeadRecord {
        name: name.to_string(),
        phone: phone.to_string(),
        interest,
        qualification,
        created_at: iso_timestamp(clock.now()),
    }
}

/// 提議的時段一律直接記為 `Confirmed`
pub fn build_appointment(
    clock: &dyn Clock,
    lead_id: LeadId,
    category: Category,
    slot: AppointmentSlot,
) -> AppointmentRecord {
    AppointmentRecord {
        lead_id,
        date: slot.date,
        time: slot.time,
        appointment_type: category,
        status: AppointmentStatus::Confirmed,
        created_at: iso_timestamp(clock.now()),
    }
}
