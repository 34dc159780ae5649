use std::collections::BTreeSet;

use autofail_model::HitObject;

/// One object that later objects may push out of the loaded window.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemArea {
    /// Index of the object in the sorted timeline
    pub index: usize,
    /// The object at risk of being unloaded
    pub object: HitObject,
    /// End time plus the kind-dependent safety margin
    pub adjusted_end_time: i64,
    /// Timeline indices of the later objects that end early enough to evict it
    pub disruptors: Vec<usize>,
    /// Query times at which the engine's window decision can change
    pub times_to_check: BTreeSet<i64>,
}

impl ProblemArea {
    pub fn start_time(&self) -> i64 {
        self.object.start_time
    }

    pub fn end_time(&self) -> i64 {
        self.object.end_time
    }

    /// Whether this area adds nothing that `outer` does not already cover.
    pub fn is_contained_in(&self, outer: &ProblemArea) -> bool {
        self.adjusted_end_time <= outer.adjusted_end_time
            || self.times_to_check.is_subset(&outer.times_to_check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(index: usize, adjusted_end_time: i64, times: &[i64]) -> ProblemArea {
        ProblemArea {
            index,
            object: HitObject::channeled_range(index as i64 * 100, adjusted_end_time),
            adjusted_end_time,
            disruptors: vec![index + 1],
            times_to_check: times.iter().copied().collect(),
        }
    }

    #[test]
    fn test_contained_by_adjusted_end() {
        let outer = area(0, 5000, &[1000, 1001]);
        let inner = area(3, 4000, &[4100]);
        assert!(inner.is_contained_in(&outer));
    }

    #[test]
    fn test_contained_by_times_subset() {
        let outer = area(0, 5000, &[1000, 1001, 2000]);
        let inner = area(3, 6000, &[1001, 2000]);
        assert!(inner.is_contained_in(&outer));
    }

    #[test]
    fn test_not_contained() {
        let outer = area(0, 5000, &[1000, 1001]);
        let later = area(3, 6000, &[1001, 5500]);
        assert!(!later.is_contained_in(&outer));
    }

    #[test]
    fn test_start_and_end_time() {
        let a = area(2, 3000, &[]);
        assert_eq!(a.start_time(), 200);
        assert_eq!(a.end_time(), 3000);
    }
}
