use chrono::{DateTime, Local, NaiveDate};
use std::time::Instant;

/// Source of monotonic and wall-clock time
pub trait Clock {
    /// Monotonic time, drives the countdown
    fn instant(&self) -> Instant;

    /// Local wall time, drives `finished_at` and "today"
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn instant(&self) -> Instant {
        Instant::now()
    }

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[cfg(test)]
pub mod testing {
    use super::Clock;
    use chrono::{DateTime, Local, TimeZone};
    use std::cell::Cell;
    use std::time::{Duration, Instant};

    /// Clock that only moves when told to
    pub struct ManualClock {
        instant: Cell<Instant>,
        now: Cell<DateTime<Local>>,
    }

    impl ManualClock {
        pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
            Self {
                instant: Cell::new(Instant::now()),
                now: Cell::new(Local.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap()),
            }
        }

        pub fn advance_secs(&self, secs: u64) {
            self.instant.set(self.instant.get() + Duration::from_secs(secs));
            self.now.set(self.now.get() + chrono::Duration::seconds(secs as i64));
        }

        pub fn advance_millis(&self, millis: u64) {
            self.instant.set(self.instant.get() + Duration::from_millis(millis));
            self.now.set(self.now.get() + chrono::Duration::milliseconds(millis as i64));
        }
    }

    impl Clock for ManualClock {
        fn instant(&self) -> Instant {
            self.instant.get()
        }

        fn now(&self) -> DateTime<Local> {
            self.now.get()
        }
    }
}
