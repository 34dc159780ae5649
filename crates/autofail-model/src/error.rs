use thiserror::Error;

/// Errors raised by the auto-fail detection and repair pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutoFailError {
    #[error("Timeline contains no hit objects")]
    EmptyTimeline,

    #[error("Hit object {index} ends before it starts ({start_time} > {end_time})")]
    InvalidHitObject {
        index: usize,
        start_time: i64,
        end_time: i64,
    },

    #[error("Hit object {index} has time {time} outside the supported range")]
    TimeOutOfRange { index: usize, time: i64 },

    #[error("Can't find a safe place to place objects between {start} and {end}")]
    NoSafePlacement { start: i64, end: i64 },
}
