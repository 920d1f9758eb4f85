//! Clock and id-generation seams used at task creation time.
//!
//! Production code uses [`SystemClock`] and [`UuidIdGenerator`]; tests swap
//! in deterministic implementations.

use crate::model::task::TaskId;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of "now" for new tasks.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh task ids.
///
/// Values must be unique with overwhelming probability for the process
/// lifetime. The store tolerates occasional repeats by drawing again, and
/// switches to [`UuidIdGenerator`] when a generator keeps repeating.
pub trait IdGenerator {
    fn new_id(&mut self) -> TaskId;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random UUID v4 ids in hyphenated lowercase form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn new_id(&mut self) -> TaskId {
        TaskId::new(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, UuidIdGenerator};
    use std::collections::HashSet;
    use uuid::Uuid;

    #[test]
    fn uuid_ids_are_parseable_and_distinct() {
        let mut ids = UuidIdGenerator;
        let seen = (0..64)
            .map(|_| ids.new_id())
            .inspect(|id| assert!(Uuid::parse_str(id.as_str()).is_ok()))
            .collect::<HashSet<_>>();
        assert_eq!(seen.len(), 64);
    }
}
