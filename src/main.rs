use academia_leads::dialogue::{CallAgent, CallOutcome, ConsoleHandler, ScriptedListener, StdinListener};
use academia_leads::utils::error::{ErrorSeverity, IntakeError};
use academia_leads::utils::{logger, validation::Validate};
use academia_leads::{
    CliConfig, Command, ConfigProvider, IntakeService, JsonFileStore, LeadStore, Result, Settings,
    SqliteStore, StorageBackend, Submission,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    // 初始化日誌
    if cli.json_logs || settings.log_json {
        logger::init_json_logger(cli.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, settings.log_level.as_deref());
    }

    tracing::info!("🚀 Starting academia-leads ({} backend)", settings.backend());
    tracing::debug!("Settings: {:?}", settings);

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    // 儲存層在這裡建立，再傳給服務
    let result = match settings.backend() {
        StorageBackend::Sqlite => match SqliteStore::open(settings.database_path()) {
            Ok(store) => run(cli.command, store, &settings).await,
            Err(e) => Err(e),
        },
        StorageBackend::Json => {
            let store = JsonFileStore::new(settings.data_dir());
            run(cli.command, store, &settings).await
        }
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Operation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(e: &IntakeError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2, // 輸入錯誤
        ErrorSeverity::High => 1,   // 儲存或設定錯誤
        ErrorSeverity::Critical => 3,
    }
}

async fn run<S: LeadStore>(command: Command, store: S, settings: &Settings) -> Result<()> {
    // 每次啟動都確認資料表存在
    store.init().await?;
    let service = IntakeService::new(store);

    match command {
        Command::Init => {
            tracing::info!("✅ Storage initialized");
            println!("✅ Storage ready");
        }
        Command::Submit {
            name,
            phone,
            interest,
            schedule,
        } => {
            let outcome = service
                .submit(Submission {
                    name,
                    phone,
                    interest_text: interest,
                    schedule,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Stats => {
            let dashboard = service.dashboard().await?;
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
        Command::Leads => {
            let leads = service.store().list_leads().await?;
            println!("{}", serde_json::to_string_pretty(&leads)?);
        }
        Command::Appointments => {
            let appointments = service.store().list_appointments().await?;
            println!("{}", serde_json::to_string_pretty(&appointments)?);
        }
        Command::Call { script } => {
            let outcome = match script {
                Some(path) => {
                    let content = tokio::fs::read_to_string(&path).await?;
                    let listener = ScriptedListener::new(content.lines());
                    CallAgent::new(&service, settings.academy_name(), listener, ConsoleHandler)
                        .run_call()
                        .await?
                }
                None => {
                    CallAgent::new(
                        &service,
                        settings.academy_name(),
                        StdinListener::new(),
                        ConsoleHandler,
                    )
                    .run_call()
                    .await?
                }
            };

            match outcome {
                CallOutcome::Completed(outcome) => {
                    println!("{}", serde_json::to_string_pretty(&outcome)?)
                }
                CallOutcome::Abandoned { field } => {
                    tracing::warn!("Call abandoned: could not capture {}", field)
                }
            }
        }
    }

    Ok(())
}
