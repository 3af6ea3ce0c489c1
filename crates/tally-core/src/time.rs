use chrono::{DateTime, NaiveDate, TimeZone};

/// Clock abstracts access to the current instant so services remain deterministic in tests.
///
/// The associated zone decides what "local wall-clock" means for window
/// boundaries and goal deadlines.
pub trait Clock {
    type Zone: TimeZone;

    /// Returns the current instant in the clock's zone.
    fn now(&self) -> DateTime<Self::Zone>;

    /// Returns the current calendar date in the clock's zone.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone> {
    now: DateTime<Tz>,
}

impl<Tz: TimeZone> FixedClock<Tz> {
    pub fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: DateTime<Tz>) {
        self.now = now;
    }
}

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Zone = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.now.clone()
    }
}
