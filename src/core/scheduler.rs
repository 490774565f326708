use crate::domain::model::AppointmentSlot;
use crate::domain::ports::Clock;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

pub const APPOINTMENT_TIME: &str = "10:00";

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// 固定時間的時鐘
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// 當天 00:00
    pub fn on_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

/// 永遠提議隔天 10:00，不檢查衝突
pub fn propose(clock: &dyn Clock) -> AppointmentSlot {
    let today = clock.today();
    // 日曆最後一天沒有隔天
    let date = today.succ_opt().unwrap_or(today);

    AppointmentSlot {
        date: date.format("%Y-%m-%d").to_string(),
        time: APPOINTMENT_TIME.to_string(),
    }
}
