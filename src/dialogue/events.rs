use crate::domain::model::{AppointmentId, Category, LeadId, QualificationTier};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    System,
    Error,
}

/// 通話流程對外發出的訊息，由介面端逐一處理
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AgentEvent {
    /// 代理要對客戶說的話
    Say { text: String },
    /// 客戶的回答（`None` 表示沒聽到）
    Heard { text: Option<String> },
    Log { kind: LogKind, message: String },
    LeadRecorded {
        lead_id: LeadId,
        interest: Category,
        qualification: QualificationTier,
    },
    AppointmentBooked {
        appointment_id: AppointmentId,
        date: String,
        time: String,
    },
    CallEnded,
}

pub trait EventHandler {
    fn handle(&mut self, event: &AgentEvent);
}

/// 收集所有事件
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<AgentEvent>,
}

impl EventLog {
    pub fn spoken(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AgentEvent::Say { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl EventHandler for EventLog {
    fn handle(&mut self, event: &AgentEvent) {
        self.events.push(event.clone());
    }
}

/// 終端機輸出：對話印到 stdout，其餘走 tracing
#[derive(Debug, Default)]
pub struct ConsoleHandler;

impl EventHandler for ConsoleHandler {
    fn handle(&mut self, event: &AgentEvent) {
        match event {
            AgentEvent::Say { text } => println!("🤖 {}", text),
            AgentEvent::Heard { text: Some(text) } => tracing::debug!("👤 {}", text),
            AgentEvent::Heard { text: None } => tracing::debug!("👤 (silence)"),
            AgentEvent::Log { kind, message } => match kind {
                LogKind::Info => tracing::info!("{}", message),
                LogKind::System => tracing::info!("⚙️ {}", message),
                LogKind::Error => tracing::error!("❌ {}", message),
            },
            AgentEvent::LeadRecorded {
                lead_id,
                interest,
                qualification,
            } => tracing::info!(
                "📝 Lead {} recorded ({}, {})",
                lead_id,
                interest,
                qualification
            ),
            AgentEvent::AppointmentBooked {
                appointment_id,
                date,
                time,
            } => tracing::info!("📅 Appointment {} on {} {}", appointment_id, date, time),
            AgentEvent::CallEnded => tracing::info!("📞 Call finished"),
        }
    }
}
