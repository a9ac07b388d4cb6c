use jiff::{SignedDuration, Timestamp};

// Instant arithmetic saturates at the timestamp range limits instead of
// panicking. Real schedules sit many orders of magnitude inside the range;
// saturation only matters for hostile or corrupted inputs.

pub(crate) fn advance(instant: Timestamp, duration: SignedDuration) -> Timestamp {
    instant
        .saturating_add(duration)
        .expect("SignedDuration arithmetic never yields calendar-unit errors")
}

pub(crate) fn rewind(instant: Timestamp, duration: SignedDuration) -> Timestamp {
    instant
        .saturating_sub(duration)
        .expect("SignedDuration arithmetic never yields calendar-unit errors")
}

/// Signed span from `start` to `end`; negative when `end` precedes `start`.
pub(crate) fn span_between(start: Timestamp, end: Timestamp) -> SignedDuration {
    end.duration_since(start)
}

pub(crate) fn add_durations(a: SignedDuration, b: SignedDuration) -> SignedDuration {
    a.saturating_add(b)
}

pub(crate) fn sub_durations(a: SignedDuration, b: SignedDuration) -> SignedDuration {
    a.saturating_sub(b)
}
