// Filler placement: finds collision-free times in each gap and builds the
// filler objects for an accepted solution.

use autofail_detect::{ProblemArea, adjusted_end_time};
use autofail_model::{AutoFailError, HitObject, Timeline, TimingParams};
use log::{debug, warn};

use crate::solver::PaddingSolution;

/// Latest time in `start..end` not inside any object's load interval.
///
/// An object occupies `start_time..=adjusted_end_time - approach_time`.
pub fn safe_placement_time(
    timeline: &Timeline,
    params: &TimingParams,
    start: i64,
    end: i64,
) -> Result<i64, AutoFailError> {
    find_free_time(timeline.objects(), params, start, end)
}

fn find_free_time(
    objects: &[HitObject],
    params: &TimingParams,
    start: i64,
    end: i64,
) -> Result<i64, AutoFailError> {
    let occupied: Vec<(i64, i64)> = objects
        .iter()
        .filter(|ho| ho.end_time >= start && ho.start_time <= end)
        .map(|ho| {
            (
                ho.start_time,
                adjusted_end_time(ho, params).saturating_sub(params.approach_time),
            )
        })
        .collect();

    let mut time = end.saturating_sub(1);
    while time >= start {
        // Everything from the earliest covering start up to `time` is taken
        let covered_from = occupied
            .iter()
            .filter(|&&(from, to)| from <= time && time <= to)
            .map(|&(from, _)| from)
            .min();
        match covered_from {
            Some(from) if from > start => time = from - 1,
            Some(_) => break,
            None => return Ok(time),
        }
    }

    warn!("no safe filler time between {start} and {end}");
    Err(AutoFailError::NoSafePlacement { start, end })
}

/// Filler objects realising `solution`, stacked at one safe time per gap.
///
/// Gap `i` runs from the previous area's adjusted end minus the approach time
/// (0 for the first gap) to the start of area `i`; the trailing gap ends at the
/// timeline's latest end time. Nothing is returned unless every non-empty gap
/// has room.
pub fn plan_fillers(
    timeline: &Timeline,
    params: &TimingParams,
    areas: &[ProblemArea],
    solution: &PaddingSolution,
) -> Result<Vec<HitObject>, AutoFailError> {
    let mut objects = timeline.objects().to_vec();
    let original_len = objects.len();
    let mut gap_start = 0;

    let gap_ends = areas
        .iter()
        .map(ProblemArea::start_time)
        .chain(std::iter::once(timeline.max_end_time().unwrap_or(0)));

    for (i, (gap_end, &count)) in gap_ends.zip(solution.gaps()).enumerate() {
        if count > 0 {
            let time = find_free_time(&objects, params, gap_start, gap_end)?;
            debug!("placing {count} fillers at {time}");
            objects.extend(std::iter::repeat_n(HitObject::filler(time), count));
        }
        if let Some(area) = areas.get(i) {
            gap_start = area.adjusted_end_time - params.approach_time;
        }
    }

    Ok(objects.split_off(original_len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TimingParams {
        TimingParams::new(1000, 150, 160)
    }

    #[test]
    fn test_safe_time_is_latest_free() {
        let tl = Timeline::new(vec![HitObject::point(0), HitObject::point(500)]);
        // Points occupy nothing: 0 + 310 - 1000 < 0
        assert_eq!(safe_placement_time(&tl, &params(), 0, 2000), Ok(1999));
    }

    #[test]
    fn test_safe_time_skips_occupied() {
        let tl = Timeline::new(vec![HitObject::held_range(0, 5000)]);
        // The slider occupies 0..=4160
        assert_eq!(safe_placement_time(&tl, &params(), 0, 4500), Ok(4499));
        assert_eq!(safe_placement_time(&tl, &params(), 0, 4162), Ok(4161));
        assert_eq!(
            safe_placement_time(&tl, &params(), 0, 4161),
            Err(AutoFailError::NoSafePlacement { start: 0, end: 4161 })
        );
    }

    #[test]
    fn test_safe_time_jumps_over_overlapping_objects() {
        let tl = Timeline::new(vec![
            HitObject::held_range(100, 5000),
            HitObject::held_range(3000, 9000),
        ]);
        // Occupied: 100..=4160 and 3000..=8160
        assert_eq!(safe_placement_time(&tl, &params(), 0, 8161), Ok(99));
        assert_eq!(safe_placement_time(&tl, &params(), 0, 9000), Ok(8999));
    }

    #[test]
    fn test_wide_occupied_gap_fails_fast() {
        let tl = Timeline::new(vec![HitObject::held_range(0, 2_000_000_000)]);
        assert_eq!(
            safe_placement_time(&tl, &params(), 0, 1_999_999_161),
            Err(AutoFailError::NoSafePlacement {
                start: 0,
                end: 1_999_999_161,
            })
        );
    }

    #[test]
    fn test_empty_gap_has_no_safe_time() {
        let tl = Timeline::new(vec![HitObject::point(0)]);
        assert_eq!(
            safe_placement_time(&tl, &params(), 0, 0),
            Err(AutoFailError::NoSafePlacement { start: 0, end: 0 })
        );
    }

    #[test]
    fn test_no_areas_uses_trailing_gap() {
        let tl = Timeline::new(vec![HitObject::point(0), HitObject::point(800)]);
        let fillers = plan_fillers(&tl, &params(), &[], &PaddingSolution::new(vec![2])).unwrap();
        assert_eq!(fillers, vec![HitObject::filler(799); 2]);
    }

    #[test]
    fn test_zero_solution_places_nothing() {
        let tl = Timeline::new(vec![HitObject::point(0)]);
        let fillers = plan_fillers(&tl, &params(), &[], &PaddingSolution::new(vec![0])).unwrap();
        assert!(fillers.is_empty());
    }
}
