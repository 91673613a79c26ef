use std::sync::Mutex;

use chrono::{DateTime, Local, TimeZone};

use crate::application::Clock;

/// The real wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Settable clock for tests: cooldown transitions without real time.
pub struct ManualClock {
    epoch: Mutex<i64>,
}

impl ManualClock {
    pub fn at(epoch_seconds: i64) -> Self {
        Self {
            epoch: Mutex::new(epoch_seconds),
        }
    }

    pub fn advance(&self, seconds: i64) {
        *self.epoch.lock().expect("clock lock") += seconds;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        let epoch = *self.epoch.lock().expect("clock lock");
        Local.timestamp_opt(epoch, 0).single().expect("valid epoch")
    }
}
