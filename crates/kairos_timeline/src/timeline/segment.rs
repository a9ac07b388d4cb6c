use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

use crate::utils::time::span_between;

/// How a span of a vehicle's on-duty time was spent.
///
/// `IdleTime` is recognized for downstream consumers (chart rendering, time
/// accounting) but the builder never emits it: uncovered gaps between
/// segments are the only representation of idle time.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentCategory {
    Driving,
    Service,
    BreakTime,
    IdleTime,
}

/// One contiguous, categorized span of time in a route's timeline.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    category: SegmentCategory,
    start_time: Timestamp,
    end_time: Timestamp,
}

impl Segment {
    pub fn new(category: SegmentCategory, start_time: Timestamp, end_time: Timestamp) -> Self {
        Segment {
            category,
            start_time,
            end_time,
        }
    }

    pub fn category(&self) -> SegmentCategory {
        self.category
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn end_time(&self) -> Timestamp {
        self.end_time
    }

    pub fn duration(&self) -> SignedDuration {
        span_between(self.start_time, self.end_time)
    }
}
