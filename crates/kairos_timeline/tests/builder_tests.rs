mod test_utils;

use kairos_timeline::{
    error::TimelineError,
    timeline::{builder::build_timeline, segment::SegmentCategory},
};
use test_utils::{assert_well_formed, break_time, driving, rest, route, secs, service, visit};

#[test]
fn test_no_visits_yields_no_timeline() {
    let route = route(0, 100, &[10], vec![]);

    assert_eq!(build_timeline(&route, &[]), Ok(None));
}

#[test]
fn test_travel_visit_count_mismatch_is_rejected() {
    let route = route(0, 100, &[10], vec![]);
    let visits = vec![visit(15, 5)];

    assert_eq!(
        build_timeline(&route, &visits),
        Err(TimelineError::TravelVisitCountMismatch {
            travel_steps: 1,
            visits: 1,
        })
    );
}

#[test]
fn test_route_without_breaks() {
    let route = route(0, 100, &[10, 20], vec![]);
    let visits = vec![visit(15, 5)];

    let timeline = build_timeline(&route, &visits).unwrap().unwrap();

    // The spans [10, 15] and [20, 80] are idle and produce no segment.
    assert_eq!(
        timeline.segments(),
        &[driving(0, 10), service(15, 20), driving(80, 100)]
    );
    assert_well_formed(&timeline);
}

#[test]
fn test_break_splits_travel_leg() {
    let route = route(0, 100, &[30, 55], vec![rest(20, 10)]);
    let visits = vec![visit(40, 5)];

    let timeline = build_timeline(&route, &visits).unwrap().unwrap();

    assert_eq!(
        timeline.segments(),
        &[
            driving(0, 20),
            break_time(20, 30),
            driving(30, 40),
            service(40, 45),
            driving(45, 100),
        ]
    );
    assert_well_formed(&timeline);
}

#[test]
fn test_break_compresses_travel_that_does_not_fit() {
    // Gap between the visits is 20 seconds; a 15 second break plus 10
    // seconds of reported travel exceed it, so the driving is compressed to
    // the 5 seconds the break leaves over instead of overrunning the gap.
    let route = route(0, 100, &[10, 10, 20], vec![rest(40, 15)]);
    let visits = vec![visit(30, 5), visit(55, 5)];

    let timeline = build_timeline(&route, &visits).unwrap().unwrap();

    assert_eq!(
        timeline.segments(),
        &[
            driving(0, 10),
            service(30, 35),
            driving(35, 40),
            break_time(40, 55),
            service(55, 60),
            driving(80, 100),
        ]
    );
    assert_well_formed(&timeline);

    // Only 5 of the 10 reported travel seconds survive around the break.
    assert_eq!(timeline.segments()[2].duration(), secs(5));
}

#[test]
fn test_zero_duration_leg_emits_no_driving() {
    let route = route(0, 100, &[0, 50], vec![]);
    let visits = vec![visit(10, 5)];

    let timeline = build_timeline(&route, &visits).unwrap().unwrap();

    assert_eq!(timeline.segments(), &[service(10, 15), driving(50, 100)]);
    assert_well_formed(&timeline);
}

#[test]
fn test_breaks_outside_duty_window_are_discarded() {
    let route = route(0, 100, &[10, 20], vec![rest(-20, 10), rest(150, 10)]);
    let visits = vec![visit(15, 5)];

    let timeline = build_timeline(&route, &visits).unwrap().unwrap();

    assert_eq!(
        timeline.segments(),
        &[driving(0, 10), service(15, 20), driving(80, 100)]
    );
}

#[test]
fn test_second_break_in_same_gap_is_appended_as_leftover() {
    // Both breaks fall inside the gap after the visit, but a gap holds at
    // most one break: the first in authored order is placed inline, the
    // other surfaces as a standalone segment ordered by the final sort.
    let route = route(0, 100, &[10, 20], vec![rest(30, 5), rest(50, 5)]);
    let visits = vec![visit(15, 5)];

    let timeline = build_timeline(&route, &visits).unwrap().unwrap();

    assert_eq!(
        timeline.segments(),
        &[
            driving(0, 10),
            service(15, 20),
            break_time(30, 35),
            driving(35, 100),
            break_time(50, 55),
        ]
    );
    assert_well_formed(&timeline);

    let break_segments = timeline
        .iter()
        .filter(|segment| segment.category() == SegmentCategory::BreakTime)
        .count();
    assert_eq!(break_segments, 2);
}

#[test]
fn test_break_at_gap_end_is_excluded() {
    // Gap bounds are half-open: a break starting exactly where the next
    // visit starts matches no gap and is appended as a leftover.
    let route = route(0, 100, &[10, 20], vec![rest(15, 5)]);
    let visits = vec![visit(15, 5)];

    let timeline = build_timeline(&route, &visits).unwrap().unwrap();

    assert_eq!(
        timeline.segments(),
        &[
            driving(0, 10),
            service(15, 20),
            break_time(15, 20),
            driving(80, 100),
        ]
    );
}

#[test]
fn test_last_driving_segment_reaches_duty_end() {
    // The after-break driving is the last travel segment of the route, so
    // the tail clamp stretches it to the duty end.
    let route = route(0, 100, &[10, 20], vec![rest(30, 5)]);
    let visits = vec![visit(15, 5)];

    let timeline = build_timeline(&route, &visits).unwrap().unwrap();

    let last_driving = timeline
        .iter()
        .rev()
        .find(|segment| segment.category() == SegmentCategory::Driving)
        .unwrap();
    assert_eq!(last_driving.end_time(), test_utils::ts(100));
}

#[test]
fn test_build_is_idempotent() {
    let route = route(0, 100, &[30, 55], vec![rest(20, 10)]);
    let visits = vec![visit(40, 5)];

    let first = build_timeline(&route, &visits).unwrap().unwrap();
    let second = build_timeline(&route, &visits).unwrap().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_idle_time_is_never_emitted() {
    let route = route(0, 1_000, &[10, 20, 30], vec![rest(100, 50)]);
    let visits = vec![visit(50, 5), visit(300, 5)];

    let timeline = build_timeline(&route, &visits).unwrap().unwrap();

    assert!(
        timeline
            .iter()
            .all(|segment| segment.category() != SegmentCategory::IdleTime)
    );
    assert_well_formed(&timeline);
}
