use crate::config::toml_config::TomlConfig;
use crate::config::{Settings, StorageBackend};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "academia-leads")]
#[command(about = "Lead intake and appointment scheduling for the academy voice agent")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend (overrides the configuration file)
    #[arg(long, value_enum, global = true)]
    pub backend: Option<StorageBackend>,

    /// SQLite database file
    #[arg(long, global = true)]
    pub database_path: Option<String>,

    /// Directory holding leads.json and citas.json
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the lead and appointment collections if they are missing
    Init,

    /// Classify, qualify and store a lead
    Submit {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Free-text statement of interest
        #[arg(long, default_value = "")]
        interest: String,

        /// Also book the next available appointment
        #[arg(long)]
        schedule: bool,
    },

    /// Print lead and appointment totals
    Stats,

    /// List stored leads
    Leads,

    /// List stored appointments
    Appointments,

    /// Run a text-driven agent call on stdin/stdout
    Call {
        /// Read the caller's replies from a file, one per line
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

impl CliConfig {
    /// 讀取設定檔（若有）並套用命令列覆蓋
    pub fn settings(&self) -> Result<Settings> {
        let file_config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        // 設定檔本身先驗證，錯誤訊息才會指到檔案裡的欄位
        file_config.validate()?;

        Ok(Settings::from_toml(&file_config).with_overrides(
            self.backend,
            self.database_path.clone(),
            self.data_dir.clone(),
        ))
    }
}
