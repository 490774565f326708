pub mod classifier;
pub mod intake;
pub mod qualifier;
pub mod records;
pub mod scheduler;

pub use crate::domain::model::{Category, LeadRecord, QualificationTier};
pub use crate::domain::ports::{Clock, ConfigProvider, LeadStore};
pub use crate::utils::error::Result;
