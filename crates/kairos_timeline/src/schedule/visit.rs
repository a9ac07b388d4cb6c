use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{error::ScheduleError, utils::time::advance};

/// A scheduled service stop with a fixed start instant and service duration.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    start_time: Timestamp,
    duration: SignedDuration,
}

impl Visit {
    pub fn new(start_time: Timestamp, duration: SignedDuration) -> Result<Self, ScheduleError> {
        if duration.is_negative() {
            return Err(ScheduleError::NegativeDuration(duration));
        }

        Ok(Visit {
            start_time,
            duration,
        })
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }

    /// Instant at which service is done and the vehicle can depart.
    pub fn end_time(&self) -> Timestamp {
        advance(self.start_time, self.duration)
    }
}
