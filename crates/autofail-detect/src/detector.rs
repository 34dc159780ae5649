//! Problem area scan.
//!
//! An object can be unloaded by any later object whose end time lies before
//! the object's adjusted end minus the approach time. Every such object is
//! collected as a problem area, areas already covered by the previous one are
//! dropped, and the rest are confirmed by replaying the engine's window at each
//! critical time.

use std::collections::BTreeSet;

use autofail_model::{AutoFailError, Timeline, TimingParams};
use log::{debug, info};

use crate::oracle::WindowOracle;
use crate::problem_area::ProblemArea;

/// Outcome of one detection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    problem_areas: Vec<ProblemArea>,
    unloading_objects: Vec<i64>,
    potential_unloading_objects: Vec<i64>,
    disruptors: Vec<i64>,
}

impl Detection {
    /// Whether the engine really unloads at least one object.
    pub fn has_auto_fail(&self) -> bool {
        !self.unloading_objects.is_empty()
    }

    /// Reduced problem areas in timeline order, confirmed or not.
    pub fn problem_areas(&self) -> &[ProblemArea] {
        &self.problem_areas
    }

    /// Start times of the objects the engine actually unloads.
    pub fn unloading_objects(&self) -> &[i64] {
        &self.unloading_objects
    }

    /// Start times of every problem area object.
    pub fn potential_unloading_objects(&self) -> &[i64] {
        &self.potential_unloading_objects
    }

    /// Start times of the objects that can evict an earlier object.
    pub fn disruptors(&self) -> &[i64] {
        &self.disruptors
    }
}

/// Scans a validated timeline for objects the engine may unload.
#[derive(Debug, Clone, Copy)]
pub struct ProblemAreaDetector<'a> {
    timeline: &'a Timeline,
    oracle: WindowOracle<'a>,
}

impl<'a> ProblemAreaDetector<'a> {
    pub fn new(timeline: &'a Timeline, params: TimingParams) -> Result<Self, AutoFailError> {
        timeline.validate()?;
        Ok(Self {
            timeline,
            oracle: WindowOracle::new(timeline, params),
        })
    }

    pub fn oracle(&self) -> &WindowOracle<'a> {
        &self.oracle
    }

    /// Run the full scan and confirmation.
    pub fn detect(&self) -> Detection {
        let mut detection = Detection::default();
        self.collect_problem_areas(&mut detection);

        for area in &detection.problem_areas {
            if self.is_unloaded(area) {
                debug!(
                    "object at {} (index {}) is unloaded",
                    area.start_time(),
                    area.index
                );
                detection.unloading_objects.push(area.start_time());
            }
        }

        info!(
            "{} problem areas, {} unloaded objects",
            detection.problem_areas.len(),
            detection.unloading_objects.len()
        );
        detection
    }

    /// Whether the engine's window drops the area's object at any checked time.
    pub fn is_unloaded(&self, area: &ProblemArea) -> bool {
        area.times_to_check
            .iter()
            .any(|&time| !self.oracle.loaded_window(time).contains(area.index))
    }

    /// Times at which the window's lower bound can move: just at and just
    /// after each object's end plus the approach time.
    fn boundary_times(&self) -> BTreeSet<i64> {
        let approach_time = self.oracle.params().approach_time;
        self.timeline
            .iter()
            .flat_map(|ho| {
                let boundary = ho.end_time + approach_time;
                [boundary, boundary + 1]
            })
            .collect()
    }

    fn collect_problem_areas(&self, detection: &mut Detection) {
        let approach_time = self.oracle.params().approach_time;
        let boundaries = self.boundary_times();
        let objects = self.timeline.objects();

        for (i, ho) in objects.iter().enumerate() {
            let adjusted_end_time = self.oracle.adjusted_end_time(ho);

            // Fixing the enclosing area fixes everything inside it
            if detection
                .problem_areas
                .last()
                .is_some_and(|last| adjusted_end_time <= last.adjusted_end_time)
            {
                continue;
            }

            let eviction_limit = adjusted_end_time - approach_time;
            let disruptors: Vec<usize> = objects
                .iter()
                .enumerate()
                .skip(i + 1)
                .filter(|(_, later)| later.end_time < eviction_limit)
                .map(|(j, _)| j)
                .collect();
            detection
                .disruptors
                .extend(disruptors.iter().map(|&j| objects[j].start_time));

            if disruptors.is_empty() {
                continue;
            }

            let times_to_check = if ho.start_time <= adjusted_end_time {
                boundaries
                    .range(ho.start_time..=adjusted_end_time)
                    .copied()
                    .collect()
            } else {
                BTreeSet::new()
            };

            let area = ProblemArea {
                index: i,
                object: *ho,
                adjusted_end_time,
                disruptors,
                times_to_check,
            };
            if detection
                .problem_areas
                .last()
                .is_some_and(|last| area.is_contained_in(last))
            {
                continue;
            }

            debug!(
                "problem area at {} (index {}): {} disruptors, {} times to check",
                area.start_time(),
                i,
                area.disruptors.len(),
                area.times_to_check.len()
            );
            detection.potential_unloading_objects.push(area.start_time());
            detection.problem_areas.push(area);
        }
    }
}

/// Validate `timeline` and run a detection pass over it.
pub fn detect(timeline: &Timeline, params: TimingParams) -> Result<Detection, AutoFailError> {
    Ok(ProblemAreaDetector::new(timeline, params)?.detect())
}
