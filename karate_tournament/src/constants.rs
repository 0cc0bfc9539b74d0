//! Tournament-wide constants.

/// Youngest age a junior bucket admits.
pub const JUNIOR_MIN_AGE: u8 = 1;

/// Oldest age a junior bucket admits.
pub const JUNIOR_MAX_AGE: u8 = 17;

/// Participants at or above this age compete as seniors.
pub const SENIOR_MIN_AGE: u8 = 18;

/// Upper bound of the senior bucket.
pub const SENIOR_MAX_AGE: u8 = 99;

/// Name every senior category carries, regardless of belts.
pub const SENIOR_CATEGORY_NAME: &str = "Senior";

/// Name of a category without any age or belt restriction.
pub const OPEN_CATEGORY_NAME: &str = "Open";

/// Regulation bout length (3 minutes).
pub const DEFAULT_MATCH_DURATION_SECS: u32 = 180;

/// Length of one overtime (encho-sen) segment.
pub const DEFAULT_OVERTIME_SECS: u32 = 60;

/// Cadence of the live match clock.
pub const DEFAULT_TICK_INTERVAL_MILLIS: u64 = 100;

/// Judges needed before a performance can be scored.
pub const DEFAULT_MIN_JUDGES: usize = 3;

/// Highest mark a judge may award, in tenths of a point.
pub const MAX_JUDGE_SCORE_TENTHS: u32 = 100;
