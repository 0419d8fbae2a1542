//! Clock abstraction for movement timestamps.
//!
//! The service never reads the wall clock directly; it asks an injected
//! `Clock`, so tests can pin time to a fixed instant.

use chrono::{DateTime, Utc};

/// Time source used to stamp stock movements.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Constant time source for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
