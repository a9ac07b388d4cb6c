use jiff::{SignedDuration, Timestamp};
use tracing::{Level, debug, instrument, warn};

use crate::{
    error::TimelineError,
    schedule::{breaks::Break, route::Route, visit::Visit},
    timeline::{
        segment::{Segment, SegmentCategory},
        timeline::Timeline,
    },
    utils::time::{add_durations, advance, rewind, span_between, sub_durations},
};

/// Builds the activity timeline for a single route.
///
/// The route's travel legs, visit instants and break instants are three
/// independently-authored time series that do not always align. Each leg is
/// anchored against whichever boundary is known (the duty window bounds or a
/// neighbouring visit) and the opposite boundary is inferred from the
/// reported travel duration. Each travel gap can absorb at most one break:
/// the first pending break whose start falls inside the gap is placed there,
/// splitting the driving around it; a break that does not fit compresses the
/// driving to whatever the gap leaves, so reported travel time never spills
/// past a scheduling boundary. Breaks that never match a gap are appended as
/// standalone segments and ordered by the final sort.
///
/// Returns `Ok(None)` for a route with no visits.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn build_timeline(route: &Route, visits: &[Visit]) -> Result<Option<Timeline>, TimelineError> {
    if visits.is_empty() {
        return Ok(None);
    }

    let travel_steps = route.travel_steps();
    if travel_steps.len() != visits.len() + 1 {
        return Err(TimelineError::TravelVisitCountMismatch {
            travel_steps: travel_steps.len(),
            visits: visits.len(),
        });
    }

    let mut segments: Vec<Segment> = Vec::with_capacity(travel_steps.len() + visits.len());

    // Working list of breaks still to be placed, in their authored order.
    // Each break is consumed at most once; breaks starting outside the duty
    // window are dropped up front.
    let mut pending_breaks: Vec<Break> = route
        .breaks()
        .iter()
        .filter(|b| {
            b.start_time() >= route.vehicle_start_time()
                && b.start_time() <= route.vehicle_end_time()
        })
        .copied()
        .collect();

    // Breaks starting before the shift are emitted ahead of the first leg.
    // The window filter above already excludes them, so this pass only fires
    // if the filtering rule ever changes.
    let mut position = 0;
    while position < pending_breaks.len() {
        if pending_breaks[position].start_time() < route.vehicle_start_time() {
            let placed = pending_breaks.remove(position);
            segments.push(Segment::new(
                SegmentCategory::BreakTime,
                placed.start_time(),
                placed.end_time(),
            ));
        } else {
            position += 1;
        }
    }

    let mut last_driving: Option<usize> = None;

    for (leg, step) in travel_steps.iter().enumerate() {
        let next_visit = visits.get(leg);
        let prev_visit = leg.checked_sub(1).and_then(|i| visits.get(i));
        let travel_duration = step.duration();

        // A zero-duration leg contributes no driving segment; the visit that
        // follows it is still emitted below.
        if !travel_duration.is_zero() {
            let (start, end, gap_start, gap_end) =
                travel_window(route, prev_visit, next_visit, travel_duration);
            let identified_travel_duration = span_between(start, end);

            match take_break_in_gap(&mut pending_breaks, gap_start, gap_end) {
                None => {
                    // Clamp so a reported travel duration cannot overrun the
                    // gap when the upstream traffic model was infeasible.
                    let clamped_end = end.min(gap_end);
                    if clamped_end < end {
                        warn!(
                            leg,
                            overrun = ?span_between(clamped_end, end),
                            "travel leg overruns its gap, clamping"
                        );
                    }
                    segments.push(Segment::new(SegmentCategory::Driving, start, clamped_end));
                    last_driving = Some(segments.len() - 1);
                }
                Some(taken) => {
                    let gap_duration = span_between(gap_start, gap_end);
                    let fits = add_durations(taken.duration(), identified_travel_duration)
                        <= gap_duration;

                    // When break and travel together exceed the gap, the
                    // travel window is squeezed to exactly the gap and the
                    // driving shrinks to whatever the break leaves over.
                    let (window_start, available_travel_duration) = if fits {
                        (start, identified_travel_duration)
                    } else {
                        warn!(
                            leg,
                            ?gap_duration,
                            break_duration = ?taken.duration(),
                            "break does not fit beside travel, compressing the driving"
                        );
                        (gap_start, sub_durations(gap_duration, taken.duration()))
                    };

                    let before_break_duration =
                        span_between(window_start, taken.start_time()).max(SignedDuration::ZERO);
                    let after_break_duration =
                        sub_durations(available_travel_duration, before_break_duration);

                    if before_break_duration > SignedDuration::ZERO {
                        segments.push(Segment::new(
                            SegmentCategory::Driving,
                            window_start,
                            taken.start_time(),
                        ));
                    }

                    segments.push(Segment::new(
                        SegmentCategory::BreakTime,
                        taken.start_time(),
                        taken.end_time(),
                    ));

                    if after_break_duration > SignedDuration::ZERO {
                        let resume = taken.end_time();
                        segments.push(Segment::new(
                            SegmentCategory::Driving,
                            resume,
                            advance(resume, after_break_duration),
                        ));
                        last_driving = Some(segments.len() - 1);
                    }
                }
            }
        }

        if let Some(visit) = next_visit {
            segments.push(Segment::new(
                SegmentCategory::Service,
                visit.start_time(),
                visit.end_time(),
            ));
        }
    }

    // Breaks that never matched a travel gap still belong on the timeline.
    if !pending_breaks.is_empty() {
        debug!(
            count = pending_breaks.len(),
            "appending breaks that matched no travel gap"
        );
    }
    for stray in pending_breaks {
        segments.push(Segment::new(
            SegmentCategory::BreakTime,
            stray.start_time(),
            stray.end_time(),
        ));
    }

    // The final driving segment always reaches the end of the duty window so
    // the end-of-route marker stays anchored after visit edits.
    if let Some(index) = last_driving {
        let start = segments[index].start_time();
        segments[index] = Segment::new(
            SegmentCategory::Driving,
            start,
            route.vehicle_end_time().max(start),
        );
    }

    // Leftover breaks and edit-induced overlaps arrive out of order.
    segments.sort_by_key(|segment| (segment.start_time(), segment.end_time()));

    Ok(Some(Timeline::new(segments)))
}

/// Anchors a travel leg against the boundaries that are known and infers the
/// opposite boundary from the reported duration. Returns the travel window
/// `(start, end)` followed by the gap `(gap_start, gap_end)` the leg and an
/// optional break must be placed in.
fn travel_window(
    route: &Route,
    prev_visit: Option<&Visit>,
    next_visit: Option<&Visit>,
    travel_duration: SignedDuration,
) -> (Timestamp, Timestamp, Timestamp, Timestamp) {
    match (prev_visit, next_visit) {
        // First leg, leaving the depot: anchored on the duty start.
        (None, _) => {
            let start = route.vehicle_start_time();
            let end = advance(start, travel_duration);
            let gap_end = match next_visit {
                Some(next) => end.max(next.start_time()),
                None => end.max(route.vehicle_end_time()),
            };
            (start, end, start, gap_end)
        }
        // Last leg, returning to the depot: anchored on the duty end.
        (Some(prev), None) => {
            let end = route.vehicle_end_time();
            let start = rewind(end, travel_duration);
            let gap_start = prev.end_time().min(start);
            (start, end, gap_start, end)
        }
        // Leg between two visits: anchored on the previous visit's departure.
        (Some(prev), Some(next)) => {
            let start = prev.end_time();
            let end = advance(start, travel_duration);
            (start, end, start, end.max(next.start_time()))
        }
    }
}

/// Removes and returns the first pending break whose start falls inside
/// `[gap_start, gap_end)`. The pending list keeps its authored order, which
/// is not necessarily time order; a gap holds at most one break, so a second
/// break in the same gap stays pending and ends up appended as a leftover.
fn take_break_in_gap(
    pending_breaks: &mut Vec<Break>,
    gap_start: Timestamp,
    gap_end: Timestamp,
) -> Option<Break> {
    let position = pending_breaks
        .iter()
        .position(|b| b.start_time() >= gap_start && b.start_time() < gap_end)?;

    Some(pending_breaks.remove(position))
}
