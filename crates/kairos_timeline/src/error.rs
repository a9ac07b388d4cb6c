use jiff::{SignedDuration, Timestamp};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("duration must not be negative, got {0}")]
    NegativeDuration(SignedDuration),
    #[error("vehicle shift ends at {end} before it starts at {start}")]
    ShiftEndsBeforeStart { start: Timestamp, end: Timestamp },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineError {
    #[error(
        "route has {travel_steps} travel steps for {visits} visits, expected one leg per visit plus the return leg"
    )]
    TravelVisitCountMismatch { travel_steps: usize, visits: usize },
}
