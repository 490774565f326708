use crate::core::records::{build_appointment, build_lead};
use crate::core::scheduler::{propose, SystemClock};
use crate::domain::model::{
    AppointmentSlot, BookedAppointment, Dashboard, Stats, Submission, SubmissionOutcome,
};
use crate::domain::ports::{Clock, LeadStore};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;

/// 收件服務：驗證表單、分類、寫入 lead，必要時再排一個約
///
/// 儲存層由呼叫端建立後傳入，服務本身不持有任何全域連線。
pub struct IntakeService<S: LeadStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl<S: LeadStore> IntakeService<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: LeadStore, C: Clock> IntakeService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 目前會提議的時段（語音流程在徵詢同意前先念給客戶聽）
    pub fn preview_slot(&self) -> AppointmentSlot {
        propose(&self.clock)
    }

    pub async fn submit(&self, submission: Submission) -> Result<SubmissionOutcome> {
        // 必填欄位先檢查，任何一個缺少都不會寫入
        let name = validate_required_field("name", &submission.name)?;
        let phone = validate_required_field("phone", &submission.phone)?;

        let lead = build_lead(&self.clock, name, phone, &submission.interest_text);
        let lead_id = self.store.insert_lead(&lead).await?;
        tracing::info!(
            "📝 Lead {} stored (interest: {}, qualification: {})",
            lead_id,
            lead.interest,
            lead.qualification
        );

        let appointment = if submission.schedule {
            let slot = propose(&self.clock);
            let record = build_appointment(&self.clock, lead_id, lead.interest, slot);
            let id = self.store.insert_appointment(&record).await?;
            tracing::info!(
                "📅 Appointment {} booked for lead {} on {} at {}",
                id,
                lead_id,
                record.date,
                record.time
            );
            Some(BookedAppointment {
                id,
                date: record.date,
                time: record.time,
            })
        } else {
            None
        };

        Ok(SubmissionOutcome {
            lead_id,
            qualification: lead.qualification,
            interest: lead.interest,
            appointment,
        })
    }

    pub async fn stats(&self) -> Result<Stats> {
        self.store.get_stats().await
    }

    /// 總數加上今天的來電數
    pub async fn dashboard(&self) -> Result<Dashboard> {
        let stats = self.store.get_stats().await?;
        let leads_today = self.store.count_leads_on(self.clock.today()).await?;

        Ok(Dashboard {
            total_leads: stats.total_leads,
            total_appointments: stats.total_appointments,
            leads_today,
        })
    }
}
