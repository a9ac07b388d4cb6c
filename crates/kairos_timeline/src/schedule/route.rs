use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{error::ScheduleError, schedule::breaks::Break};

/// One driving leg between two consecutive stops (depot, visit, or depot).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelStep {
    duration: SignedDuration,
}

impl TravelStep {
    pub fn new(duration: SignedDuration) -> Result<Self, ScheduleError> {
        if duration.is_negative() {
            return Err(ScheduleError::NegativeDuration(duration));
        }

        Ok(TravelStep { duration })
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }
}

/// A single vehicle's planned day: the duty window, the ordered driving legs
/// and the breaks scheduled into it. The visits the legs connect are stored
/// alongside the route (see [`super::repository::RouteRepository`]) and are
/// supplied to the timeline builder together with the route.
///
/// A route serving `n` visits always carries `n + 1` travel steps: out to the
/// first visit, between consecutive visits, and back from the last one.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Route {
    vehicle_start_time: Timestamp,
    vehicle_end_time: Timestamp,
    travel_steps: Vec<TravelStep>,
    breaks: Vec<Break>,
}

impl Route {
    pub fn new(
        vehicle_start_time: Timestamp,
        vehicle_end_time: Timestamp,
        travel_steps: Vec<TravelStep>,
        breaks: Vec<Break>,
    ) -> Result<Self, ScheduleError> {
        if vehicle_end_time < vehicle_start_time {
            return Err(ScheduleError::ShiftEndsBeforeStart {
                start: vehicle_start_time,
                end: vehicle_end_time,
            });
        }

        Ok(Route {
            vehicle_start_time,
            vehicle_end_time,
            travel_steps,
            breaks,
        })
    }

    pub fn vehicle_start_time(&self) -> Timestamp {
        self.vehicle_start_time
    }

    pub fn vehicle_end_time(&self) -> Timestamp {
        self.vehicle_end_time
    }

    pub fn travel_steps(&self) -> &[TravelStep] {
        &self.travel_steps
    }

    pub fn breaks(&self) -> &[Break] {
        &self.breaks
    }
}
