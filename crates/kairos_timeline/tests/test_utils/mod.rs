use jiff::{SignedDuration, Timestamp};
use kairos_timeline::{
    schedule::{
        breaks::Break,
        route::{Route, TravelStep},
        visit::Visit,
    },
    timeline::{
        segment::{Segment, SegmentCategory},
        timeline::Timeline,
    },
};

pub fn ts(seconds: i64) -> Timestamp {
    Timestamp::from_second(seconds).unwrap()
}

pub fn secs(seconds: i64) -> SignedDuration {
    SignedDuration::from_secs(seconds)
}

pub fn visit(start: i64, duration: i64) -> Visit {
    Visit::new(ts(start), secs(duration)).unwrap()
}

pub fn rest(start: i64, duration: i64) -> Break {
    Break::new(ts(start), secs(duration)).unwrap()
}

pub fn route(start: i64, end: i64, steps: &[i64], breaks: Vec<Break>) -> Route {
    let travel_steps = steps
        .iter()
        .map(|&duration| TravelStep::new(secs(duration)).unwrap())
        .collect();

    Route::new(ts(start), ts(end), travel_steps, breaks).unwrap()
}

pub fn driving(start: i64, end: i64) -> Segment {
    Segment::new(SegmentCategory::Driving, ts(start), ts(end))
}

pub fn service(start: i64, end: i64) -> Segment {
    Segment::new(SegmentCategory::Service, ts(start), ts(end))
}

pub fn break_time(start: i64, end: i64) -> Segment {
    Segment::new(SegmentCategory::BreakTime, ts(start), ts(end))
}

pub fn assert_well_formed(timeline: &Timeline) {
    for segment in timeline.iter() {
        assert!(
            segment.start_time() <= segment.end_time(),
            "segment ends before it starts: {segment:?}"
        );
    }

    for pair in timeline.segments().windows(2) {
        let first = (pair[0].start_time(), pair[0].end_time());
        let second = (pair[1].start_time(), pair[1].end_time());
        assert!(
            first <= second,
            "timeline is not sorted: {:?} before {:?}",
            pair[0],
            pair[1]
        );
    }
}
