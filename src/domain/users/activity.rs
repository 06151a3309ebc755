use chrono::{DateTime, Utc};

/// Gaps shorter than this are treated as continuous activity.
const MIN_GAP_MINUTES: i64 = 1;
/// Gaps longer than this are treated as the user having walked away.
const MAX_GAP_MINUTES: i64 = 180;

/// Running total of a user's active minutes plus the last ping time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityState {
    pub last_active: Option<DateTime<Utc>>,
    pub total_minutes: i64,
}

/// Advance the accumulator to `now`. The gap since the previous ping is
/// credited only when it falls within a sane window; anything outside just
/// moves `last_active` forward without adding time.
pub fn advance(state: ActivityState, now: DateTime<Utc>) -> ActivityState {
    let Some(last) = state.last_active else {
        return ActivityState {
            last_active: Some(now),
            total_minutes: state.total_minutes,
        };
    };
    let gap = (now - last).num_minutes();
    let credited = if (MIN_GAP_MINUTES..=MAX_GAP_MINUTES).contains(&gap) {
        gap
    } else {
        0
    };
    ActivityState {
        last_active: Some(now),
        total_minutes: state.total_minutes + credited,
    }
}
