use crate::core::classifier::classify;
use crate::core::intake::IntakeService;
use crate::dialogue::events::{AgentEvent, EventHandler, LogKind};
use crate::dialogue::extract::{extract_name, extract_phone, is_confirmation, is_consent, spoken_date};
use crate::dialogue::listener::Listener;
use crate::domain::model::{Submission, SubmissionOutcome};
use crate::domain::ports::{Clock, LeadStore};
use crate::utils::error::Result;

/// 每個欄位最多問幾次
pub const MAX_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Completed(SubmissionOutcome),
    /// 重試用完仍拿不到必填欄位，這通電話不建立 lead
    Abandoned { field: &'static str },
}

/// 一通語音電話：問姓名、電話、興趣，再徵詢是否預約
pub struct CallAgent<'a, S: LeadStore, C: Clock, L: Listener, H: EventHandler> {
    service: &'a IntakeService<S, C>,
    academy_name: String,
    listener: L,
    handler: H,
}

impl<'a, S: LeadStore, C: Clock, L: Listener, H: EventHandler> CallAgent<'a, S, C, L, H> {
    pub fn new(
        service: &'a IntakeService<S, C>,
        academy_name: impl Into<String>,
        listener: L,
        handler: H,
    ) -> Self {
        Self {
            service,
            academy_name: academy_name.into(),
            listener,
            handler,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    fn emit(&mut self, event: AgentEvent) {
        self.handler.handle(&event);
    }

    fn say(&mut self, text: impl Into<String>) {
        self.emit(AgentEvent::Say { text: text.into() });
    }

    fn log(&mut self, kind: LogKind, message: impl Into<String>) {
        self.emit(AgentEvent::Log {
            kind,
            message: message.into(),
        });
    }

    async fn hear(&mut self) -> Result<Option<String>> {
        let reply = self.listener.listen().await?;
        self.emit(AgentEvent::Heard {
            text: reply.clone(),
        });
        Ok(reply)
    }

    /// 問一次，聽不懂就重問，最多 `MAX_ATTEMPTS` 輪
    async fn ask<T>(
        &mut self,
        prompt: &str,
        retry_prompt: &str,
        extract: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        self.say(prompt);
        for attempt in 0..MAX_ATTEMPTS {
            if let Some(reply) = self.hear().await? {
                if let Some(value) = extract(&reply) {
                    return Ok(Some(value));
                }
            }
            if attempt + 1 < MAX_ATTEMPTS {
                self.say(retry_prompt);
            }
        }
        Ok(None)
    }

    pub async fn run_call(&mut self) -> Result<CallOutcome> {
        self.log(LogKind::System, "📞 Incoming call");
        let welcome = format!(
            "¡Bienvenido a {}! Soy su asistente virtual. ¿En qué puedo ayudarle hoy?",
            self.academy_name
        );
        self.say(welcome);

        let Some(name) = self
            .ask(
                "Para poder ayudarle mejor, ¿podría decirme su nombre completo?",
                "No logré entender su nombre completo. ¿Podría repetirlo por favor?",
                extract_name,
            )
            .await?
        else {
            return Ok(self.abandon(
                "name",
                "Lo siento, no pude registrar su nombre. Le pedimos que se comunique nuevamente.",
            ));
        };
        self.say(format!("Mucho gusto {}", name));

        let Some(phone) = self
            .ask(
                "¿Podría proporcionarme un número de teléfono para contactarlo?",
                "No logré entender su número de teléfono. ¿Podría repetirlo por favor?",
                extract_phone,
            )
            .await?
        else {
            return Ok(self.abandon(
                "phone",
                "Lo siento, no pude registrar su teléfono. Le pedimos que se comunique nuevamente.",
            ));
        };
        self.say(format!("Perfecto, he registrado el número {}", phone));

        let interest_text = match self
            .ask(
                "¿En qué área de formación está interesado? Ofrecemos cursos de idiomas, tecnología, negocios y desarrollo personal.",
                "¿Podría especificar en qué área está interesado?",
                |reply| Some(reply.to_string()),
            )
            .await?
        {
            Some(text) => {
                self.say(format!(
                    "Entendido, está interesado en {}",
                    classify(&text).spanish_label()
                ));
                text
            }
            None => {
                self.say("Le enviaremos información general de nuestros cursos.");
                String::new()
            }
        };

        let schedule = self.ask_for_appointment().await?;

        let submission = Submission {
            name: Some(name),
            phone: Some(phone),
            interest_text,
            schedule,
        };
        let outcome = match self.service.submit(submission).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.log(LogKind::Error, format!("Error guardando datos: {}", e));
                return Err(e);
            }
        };

        self.emit(AgentEvent::LeadRecorded {
            lead_id: outcome.lead_id,
            interest: outcome.interest,
            qualification: outcome.qualification,
        });
        self.log(
            LogKind::Info,
            format!(
                "Calificación del lead: {}",
                outcome.qualification.spanish_label()
            ),
        );
        if let Some(appointment) = &outcome.appointment {
            self.emit(AgentEvent::AppointmentBooked {
                appointment_id: appointment.id,
                date: appointment.date.clone(),
                time: appointment.time.clone(),
            });
            self.say("Perfecto, hemos agendado su cita. Recibirá una confirmación por mensaje. ¡Gracias por contactar a nuestra academia!");
        } else {
            self.say("Gracias por su interés. Le enviaremos más información por mensaje. ¡Que tenga un excelente día!");
        }

        self.emit(AgentEvent::CallEnded);
        Ok(CallOutcome::Completed(outcome))
    }

    /// 先徵詢意願，再確認提議的時段；兩次都同意才預約
    async fn ask_for_appointment(&mut self) -> Result<bool> {
        self.say("¿Le gustaría agendar una cita con uno de nuestros asesores para recibir información más detallada?");
        let consent = self.hear().await?;
        if !consent.as_deref().is_some_and(is_consent) {
            return Ok(false);
        }

        let slot = self.service.preview_slot();
        self.say(format!(
            "Perfecto, tenemos disponibilidad para el {} a las {}. ¿Le parece bien?",
            spoken_date(&slot.date),
            slot.time
        ));
        let confirmation = self.hear().await?;
        Ok(confirmation.as_deref().is_some_and(is_confirmation))
    }

    fn abandon(&mut self, field: &'static str, apology: &str) -> CallOutcome {
        self.say(apology);
        self.log(LogKind::System, format!("Call ended without {}", field));
        self.emit(AgentEvent::CallEnded);
        CallOutcome::Abandoned { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::JsonFileStore;
    use crate::core::scheduler::FixedClock;
    use crate::dialogue::events::EventLog;
    use crate::dialogue::listener::ScriptedListener;
    use crate::domain::model::{Category, QualificationTier};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    async fn service(dir: &TempDir) -> IntakeService<JsonFileStore, FixedClock> {
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let clock = FixedClock::on_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        IntakeService::with_clock(store, clock)
    }

    #[tokio::test]
    async fn test_full_call_books_appointment() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir).await;
        let listener = ScriptedListener::new([
            "maría pérez",
            "mi número es 300 111 2222",
            "quiero aprender inglés",
            "sí, claro",
            "perfecto",
        ]);

        let mut agent = CallAgent::new(&service, "Academia Sin Fronteras", listener, EventLog::default());
        let outcome = agent.run_call().await.unwrap();

        let CallOutcome::Completed(outcome) = outcome else {
            panic!("call should complete");
        };
        assert_eq!(outcome.interest, Category::Languages);
        assert_eq!(outcome.qualification, QualificationTier::High);
        assert_eq!(outcome.appointment.as_ref().unwrap().date, "2024-01-02");

        let log = agent.into_handler();
        assert!(log.spoken().iter().any(|s| s.contains("02 de enero")));
        assert!(log.events.iter().any(|e| matches!(
            e,
            AgentEvent::Log { kind: LogKind::Info, message } if message.ends_with("Alta")
        )));
        assert_eq!(log.events.last(), Some(&AgentEvent::CallEnded));

        let leads = service.store().list_leads().await.unwrap();
        assert_eq!(leads[0].record.name, "María Pérez");
        assert_eq!(leads[0].record.phone, "3001112222");
    }

    #[tokio::test]
    async fn test_declined_appointment_stores_only_lead() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir).await;
        let listener =
            ScriptedListener::new(["Ana Gómez", "3001112222", "marketing", "no gracias"]);

        let mut agent = CallAgent::new(&service, "Academia", listener, EventLog::default());
        let outcome = agent.run_call().await.unwrap();

        assert!(matches!(outcome, CallOutcome::Completed(ref o) if o.appointment.is_none()));
        let stats = service.stats().await.unwrap();
        assert_eq!((stats.total_leads, stats.total_appointments), (1, 0));
    }

    #[tokio::test]
    async fn test_spoken_refusal_does_not_book() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir).await;
        let listener = ScriptedListener::new([
            "Ana Gómez",
            "3001112222",
            "inglés",
            "no, no lo necesito",
            "no, imposible",
        ]);

        let mut agent = CallAgent::new(&service, "Academia", listener, EventLog::default());
        let CallOutcome::Completed(outcome) = agent.run_call().await.unwrap() else {
            panic!("call should complete");
        };

        assert!(outcome.appointment.is_none());
        assert_eq!(service.stats().await.unwrap().total_appointments, 0);
        assert!(agent
            .handler()
            .events
            .iter()
            .all(|e| !matches!(e, AgentEvent::AppointmentBooked { .. })));
    }

    #[tokio::test]
    async fn test_three_failed_phone_attempts_abandon_call() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir).await;
        let listener = ScriptedListener::new(["Luis Díaz", "no sé", "123", ""]);

        let mut agent = CallAgent::new(&service, "Academia", listener, EventLog::default());
        let outcome = agent.run_call().await.unwrap();

        assert_eq!(outcome, CallOutcome::Abandoned { field: "phone" });
        let log = agent.into_handler();
        assert!(log
            .spoken()
            .iter()
            .any(|s| s.starts_with("Lo siento, no pude registrar su teléfono")));
        assert_eq!(log.events.last(), Some(&AgentEvent::CallEnded));
        assert_eq!(service.stats().await.unwrap().total_leads, 0);
    }

    #[tokio::test]
    async fn test_three_failed_name_attempts_abandon_call() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir).await;
        let listener = ScriptedListener::new(["eh", "", "hola"]);

        let mut agent = CallAgent::new(&service, "Academia", listener, EventLog::default());
        let outcome = agent.run_call().await.unwrap();

        assert_eq!(outcome, CallOutcome::Abandoned { field: "name" });
        let retries = agent
            .handler()
            .spoken()
            .iter()
            .filter(|s| s.starts_with("No logré entender su nombre"))
            .count();
        assert_eq!(retries, MAX_ATTEMPTS - 1);
        assert_eq!(service.stats().await.unwrap().total_leads, 0);
    }

    #[tokio::test]
    async fn test_missing_interest_falls_back_to_other() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir).await;
        let listener = ScriptedListener::new(["Luis Díaz", "3001112222", "", "", ""]);

        let mut agent = CallAgent::new(&service, "Academia", listener, EventLog::default());
        let CallOutcome::Completed(outcome) = agent.run_call().await.unwrap() else {
            panic!("call should complete");
        };

        assert_eq!(outcome.interest, Category::Other);
        assert_eq!(outcome.qualification, QualificationTier::Low);
        assert!(outcome.appointment.is_none());
    }
}
