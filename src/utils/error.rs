use crate::domain::model::LeadId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Lead {lead_id} does not exist")]
    UnknownLead { lead_id: LeadId },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

/// 錯誤分類，決定呼叫端如何回報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 呼叫端送來的資料不完整
    Input,
    Storage,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl IntakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IntakeError::MissingFieldError { .. } => ErrorCategory::Input,
            IntakeError::DatabaseError(_)
            | IntakeError::IoError(_)
            | IntakeError::SerializationError(_)
            | IntakeError::UnknownLead { .. }
            | IntakeError::ProcessingError { .. } => ErrorCategory::Storage,
            IntakeError::TomlError(_)
            | IntakeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            IntakeError::TaskError(_) | IntakeError::LockPoisoned => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 儲存層錯誤：邊界層應回報為伺服器端失敗
    pub fn is_storage_error(&self) -> bool {
        self.category() == ErrorCategory::Storage
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            IntakeError::MissingFieldError { field } => {
                format!("Provide a non-empty value for '{}' and submit again", field)
            }
            IntakeError::UnknownLead { .. } => {
                "Register the lead before scheduling an appointment for it".to_string()
            }
            IntakeError::DatabaseError(_) => {
                "Check that the database file is writable and not locked by another process"
                    .to_string()
            }
            IntakeError::IoError(_) => {
                "Check permissions and free disk space in the data directory".to_string()
            }
            IntakeError::SerializationError(_) | IntakeError::ProcessingError { .. } => {
                "The stored data looks corrupted; restore it from a backup or remove the file"
                    .to_string()
            }
            IntakeError::TomlError(_) => "Fix the syntax of the TOML configuration file".to_string(),
            IntakeError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
            IntakeError::TaskError(_) | IntakeError::LockPoisoned => {
                "Restart the process; a previous operation crashed while holding the store"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("The submission was rejected: {}", self),
            ErrorCategory::Storage => format!("The data could not be saved or read: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("Internal failure: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_input_error() {
        let err = IntakeError::MissingFieldError {
            field: "phone".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(!err.is_storage_error());
        assert!(err.to_string().contains("phone"));
    }

    #[test]
    fn test_unknown_lead_is_storage_error() {
        let err = IntakeError::UnknownLead { lead_id: 42 };
        assert!(err.is_storage_error());
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("42"));
    }

    #[test]
    fn test_lock_poisoned_is_critical() {
        assert_eq!(IntakeError::LockPoisoned.severity(), ErrorSeverity::Critical);
    }
}
