pub mod adapters;
pub mod config;
pub mod core;
pub mod dialogue;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::{JsonFileStore, SqliteStore};
pub use config::{Settings, StorageBackend};
pub use crate::core::{
    intake::IntakeService,
    scheduler::{FixedClock, SystemClock},
};
pub use domain::model::{
    Appointment, AppointmentRecord, AppointmentSlot, AppointmentStatus, Category, Lead,
    LeadRecord, QualificationTier, Stats, Submission, SubmissionOutcome,
};
pub use domain::ports::{Clock, ConfigProvider, LeadStore};
pub use utils::error::{IntakeError, Result};
