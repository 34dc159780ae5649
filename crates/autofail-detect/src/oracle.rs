//! Reproduction of the engine's object-loading window.
//!
//! The engine binary-searches the object list by *end* time even though the
//! list is ordered by *start* time. An object whose end lies far past the
//! ends of the objects after it can therefore fall outside every window the
//! search produces.

use std::ops::Range;

use autofail_model::{HitKind, HitObject, Timeline, TimingParams};

/// Time after which the engine may safely unload `ho`.
pub fn adjusted_end_time(ho: &HitObject, params: &TimingParams) -> i64 {
    let point_end = ho
        .start_time
        .saturating_add(params.hit_window_50)
        .saturating_add(params.physics_margin);
    let ranged_end = ho.end_time.saturating_add(params.physics_margin);
    match ho.kind {
        HitKind::Point => point_end,
        HitKind::HeldRange | HitKind::ChanneledRange => ranged_end,
        HitKind::Other => point_end.max(ranged_end),
    }
}

/// Index range of the objects the engine holds in memory at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedWindow {
    /// First loaded index
    pub start: usize,
    /// One past the last loaded index
    pub end: usize,
}

impl LoadedWindow {
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Answers "what is loaded at time t" exactly the way the engine does.
#[derive(Debug, Clone, Copy)]
pub struct WindowOracle<'a> {
    objects: &'a [HitObject],
    params: TimingParams,
}

impl<'a> WindowOracle<'a> {
    /// `params` are clamped into their valid ranges.
    pub fn new(timeline: &'a Timeline, mut params: TimingParams) -> Self {
        params.validate();
        Self {
            objects: timeline.objects(),
            params,
        }
    }

    pub fn params(&self) -> &TimingParams {
        &self.params
    }

    pub fn adjusted_end_time(&self, ho: &HitObject) -> i64 {
        adjusted_end_time(ho, &self.params)
    }

    /// Objects loaded at `time`.
    ///
    /// The lower bound comes from the end-time search on `time - approach_time`;
    /// the window then extends over every following object that starts no
    /// later than `time + approach_time`.
    pub fn loaded_window(&self, time: i64) -> LoadedWindow {
        let start = self.lower_bound(time - self.params.approach_time);
        let latest_start = time + self.params.approach_time;
        let end = self.objects[start..]
            .iter()
            .position(|ho| ho.start_time > latest_start)
            .map_or(self.objects.len(), |offset| start + offset);
        LoadedWindow { start, end }
    }

    /// Lower bound of the window at `time` if `left` filler objects sat
    /// before index 0 and `right` after the last index.
    ///
    /// The result is a position in the padded index space, where real object
    /// `i` keeps position `i` and the left fillers occupy `-left..0`.
    pub fn loaded_window_padded(&self, time: i64, left: usize, right: usize) -> i64 {
        self.search(time - self.params.approach_time, left, right)
    }

    /// The engine's binary search over end times.
    ///
    /// Returns the probed index on an exact match, otherwise the position
    /// where the search gave up.
    pub fn lower_bound(&self, query: i64) -> usize {
        // Without padding the search never leaves 0..=len.
        self.search(query, 0, 0) as usize
    }

    fn search(&self, query: i64, left: usize, right: usize) -> i64 {
        let last = self.objects.len() as i64 - 1;
        let mut min = -(left as i64);
        let mut max = last + right as i64;
        while min <= max {
            let mid = min + (max - min) / 2;
            let end_time = if mid < 0 {
                i64::MIN
            } else if mid > last {
                i64::MAX
            } else {
                self.objects[mid as usize].end_time
            };

            if query == end_time {
                return mid;
            }
            if query > end_time {
                min = mid + 1;
            } else {
                max = mid - 1;
            }
        }
        min
    }
}
