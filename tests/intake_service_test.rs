use academia_leads::config::toml_config::TomlConfig;
use academia_leads::dialogue::{CallAgent, CallOutcome, EventLog, ScriptedListener};
use academia_leads::{
    Category, ConfigProvider, FixedClock, IntakeError, IntakeService, JsonFileStore, LeadStore,
    QualificationTier, Settings, SqliteStore, StorageBackend, Submission,
};
use anyhow::Result;
use chrono::NaiveDate;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn clock() -> FixedClock {
    FixedClock::on_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
}

#[tokio::test]
async fn test_submission_end_to_end_on_sqlite() -> Result<()> {
    let dir = TempDir::new()?;
    let store = SqliteStore::connect(dir.path().join("datos_academia").join("data.db")).await?;
    let service = IntakeService::with_clock(store, clock());

    let outcome = service
        .submit(Submission {
            name: Some("María Pérez".to_string()),
            phone: Some("57300111222".to_string()),
            interest_text: "Cursos de Python".to_string(),
            schedule: true,
        })
        .await?;

    assert_eq!(outcome.interest, Category::Technology);
    assert_eq!(outcome.qualification, QualificationTier::High);
    let appointment = outcome.appointment.expect("appointment should be booked");
    assert_eq!(appointment.date, "2024-01-02");
    assert_eq!(appointment.time, "10:00");

    let json = serde_json::to_value(service.stats().await?)?;
    assert_eq!(json, serde_json::json!({"total_leads": 1, "total_appointments": 1}));
    Ok(())
}

#[tokio::test]
async fn test_rejected_submission_leaves_store_untouched() -> Result<()> {
    let dir = TempDir::new()?;
    let service = IntakeService::with_clock(JsonFileStore::open(dir.path()).await?, clock());

    let submission: Submission = serde_json::from_str(r#"{"phone": "3001112222"}"#)?;
    let err = service.submit(submission).await.unwrap_err();
    assert!(matches!(err, IntakeError::MissingFieldError { .. }));
    assert!(!err.is_storage_error());

    assert_eq!(service.stats().await?.total_leads, 0);
    Ok(())
}

#[tokio::test]
async fn test_voice_call_persists_to_json_documents() -> Result<()> {
    let dir = TempDir::new()?;
    let service = IntakeService::with_clock(JsonFileStore::open(dir.path()).await?, clock());
    let listener = ScriptedListener::new([
        "Carlos Ruiz",
        "57 300 444 5555",
        "un curso de liderazgo",
        "ok",
        "bien",
    ]);

    let mut agent = CallAgent::new(&service, "Academia Sin Fronteras", listener, EventLog::default());
    let CallOutcome::Completed(outcome) = agent.run_call().await? else {
        panic!("call should complete");
    };
    assert_eq!(outcome.interest, Category::PersonalDevelopment);
    assert_eq!(outcome.qualification, QualificationTier::Low);

    let citas = std::fs::read_to_string(dir.path().join("citas.json"))?;
    let citas: serde_json::Value = serde_json::from_str(&citas)?;
    assert_eq!(citas[0]["lead_id"], outcome.lead_id);
    assert_eq!(citas[0]["status"], "Confirmed");

    let dashboard = service.dashboard().await?;
    assert_eq!(dashboard.leads_today, 1);
    assert_eq!(service.store().list_leads().await?[0].record.phone, "573004445555");
    Ok(())
}

#[test]
fn test_settings_from_config_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        "[academy]\nname = \"Academia Centro\"\n\n[storage]\nbackend = \"json\"\ndata_dir = \"./datos\"\n"
    )?;

    let config = TomlConfig::from_file(file.path())?;
    let settings = Settings::from_toml(&config).with_overrides(None, None, Some("/srv/datos".into()));

    assert_eq!(settings.academy_name(), "Academia Centro");
    assert_eq!(settings.backend(), StorageBackend::Json);
    assert_eq!(settings.data_dir(), "/srv/datos");
    Ok(())
}
