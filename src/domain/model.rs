use crate::utils::error::IntakeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type LeadId = i64;
pub type AppointmentId = i64;

/// 興趣分類，依關鍵字決定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Languages,
    Technology,
    Business,
    PersonalDevelopment,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Languages,
        Category::Technology,
        Category::Business,
        Category::PersonalDevelopment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Languages => "Languages",
            Category::Technology => "Technology",
            Category::Business => "Business",
            Category::PersonalDevelopment => "PersonalDevelopment",
            Category::Other => "Other",
        }
    }

    /// 語音代理對客戶說出的名稱
    pub fn spanish_label(&self) -> &'static str {
        match self {
            Category::Languages => "Idiomas",
            Category::Technology => "Tecnología",
            Category::Business => "Negocios",
            Category::PersonalDevelopment => "Desarrollo personal",
            Category::Other => "Otros",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| IntakeError::ProcessingError {
                message: format!("Unknown category: {}", s),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualificationTier {
    High,
    Medium,
    Low,
}

impl QualificationTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualificationTier::High => "High",
            QualificationTier::Medium => "Medium",
            QualificationTier::Low => "Low",
        }
    }

    pub fn spanish_label(&self) -> &'static str {
        match self {
            QualificationTier::High => "Alta",
            QualificationTier::Medium => "Media",
            QualificationTier::Low => "Baja",
        }
    }
}

impl fmt::Display for QualificationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualificationTier {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(QualificationTier::High),
            "Medium" => Ok(QualificationTier::Medium),
            "Low" => Ok(QualificationTier::Low),
            other => Err(IntakeError::ProcessingError {
                message: format!("Unknown qualification tier: {}", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Proposed,
    Confirmed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Proposed => "Proposed",
            AppointmentStatus::Confirmed => "Confirmed",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Proposed" => Ok(AppointmentStatus::Proposed),
            "Confirmed" => Ok(AppointmentStatus::Confirmed),
            other => Err(IntakeError::ProcessingError {
                message: format!("Unknown appointment status: {}", other),
            }),
        }
    }
}

/// 尚未寫入儲存層的 lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub name: String,
    pub phone: String,
    pub interest: Category,
    pub qualification: QualificationTier,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    #[serde(flatten)]
    pub record: LeadRecord,
}

/// 提議的時段：日期 `YYYY-MM-DD`，時間 `HH:MM`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSlot {
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub lead_id: LeadId,
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub appointment_type: Category,
    pub status: AppointmentStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(flatten)]
    pub record: AppointmentRecord,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_leads: u64,
    pub total_appointments: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_leads: u64,
    pub total_appointments: u64,
    pub leads_today: u64,
}

/// 邊界層收到的原始表單，欄位可能缺漏
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub interest_text: String,
    #[serde(default)]
    pub schedule: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedAppointment {
    pub id: AppointmentId,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub lead_id: LeadId,
    pub qualification: QualificationTier,
    pub interest: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<BookedAppointment>,
}
