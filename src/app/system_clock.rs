use chrono::{DateTime, Local};

use tally_core::Clock;

/// Real-time clock reading the system time in the machine's local zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Zone = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
