use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{error::ScheduleError, utils::time::advance};

/// A rest period the operator must observe within the route's duty window.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Break {
    start_time: Timestamp,
    duration: SignedDuration,
}

impl Break {
    pub fn new(start_time: Timestamp, duration: SignedDuration) -> Result<Self, ScheduleError> {
        if duration.is_negative() {
            return Err(ScheduleError::NegativeDuration(duration));
        }

        Ok(Break {
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

    pub fn end_time(&self) -> Timestamp {
        advance(self.start_time, self.duration)
    }
}
