//! Detection-and-repair session over one chart.
//!
//! The session owns the timeline for its whole lifetime. Detection results are
//! cached until the timeline changes; the only change a session ever makes is
//! inserting the fillers of an accepted solution.

use autofail_detect::{Detection, ProblemAreaDetector, WindowOracle};
use autofail_model::{AutoFailError, HitObject, Timeline, TimingParams};
use log::info;

use crate::dialogue::{Decision, FixDecider, FixOutcome, FixProposal};
use crate::guide::FixGuide;
use crate::placement::plan_fillers;
use crate::solver::PaddingSolver;

#[derive(Debug, Clone)]
pub struct AutoFailSession {
    timeline: Timeline,
    params: TimingParams,
    max_padding: Option<usize>,
    detection: Option<Detection>,
}

impl AutoFailSession {
    /// Rejects empty timelines and malformed objects; `params` are clamped
    /// into their valid ranges.
    pub fn new(timeline: Timeline, mut params: TimingParams) -> Result<Self, AutoFailError> {
        timeline.validate()?;
        params.validate();
        Ok(Self {
            timeline,
            params,
            max_padding: None,
            detection: None,
        })
    }

    pub fn from_objects(
        objects: Vec<HitObject>,
        params: TimingParams,
    ) -> Result<Self, AutoFailError> {
        Self::new(Timeline::new(objects), params)
    }

    /// Cap on the total filler count the dialogue will propose.
    pub fn with_max_padding(mut self, max_padding: Option<usize>) -> Self {
        self.max_padding = max_padding;
        self
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }

    pub fn params(&self) -> &TimingParams {
        &self.params
    }

    /// Run detection and report whether any object is really unloaded.
    pub fn detect(&mut self) -> Result<bool, AutoFailError> {
        Ok(self.detection()?.has_auto_fail())
    }

    /// The cached detection, computed on first use.
    pub fn detection(&mut self) -> Result<&Detection, AutoFailError> {
        cached_detection(&mut self.detection, &self.timeline, self.params)
    }

    pub fn unloading_objects(&self) -> &[i64] {
        self.detection
            .as_ref()
            .map(Detection::unloading_objects)
            .unwrap_or_default()
    }

    pub fn potential_unloading_objects(&self) -> &[i64] {
        self.detection
            .as_ref()
            .map(Detection::potential_unloading_objects)
            .unwrap_or_default()
    }

    pub fn disruptors(&self) -> &[i64] {
        self.detection
            .as_ref()
            .map(Detection::disruptors)
            .unwrap_or_default()
    }

    /// Propose padding solutions, cheapest first, until `decider` accepts or
    /// aborts. With `auto_apply` the accepted fillers are inserted into the
    /// timeline and the cached detection is dropped.
    pub fn run_fix_dialogue<D>(
        &mut self,
        auto_apply: bool,
        decider: &mut D,
    ) -> Result<FixOutcome, AutoFailError>
    where
        D: FixDecider + ?Sized,
    {
        let detection = cached_detection(&mut self.detection, &self.timeline, self.params)?;
        let areas = detection.problem_areas();
        if areas.is_empty() {
            return Ok(FixOutcome::NothingToFix);
        }

        let oracle = WindowOracle::new(&self.timeline, self.params);
        let solver = PaddingSolver::new(oracle, areas).with_max_padding(self.max_padding);

        let mut accepted = None;
        for (i, solution) in solver.solutions().enumerate() {
            let proposal = FixProposal {
                number: i + 1,
                guide: FixGuide::new(areas, &self.params, &solution),
                solution,
            };
            match decider.decide(&proposal) {
                Decision::Accept => {
                    accepted = Some(proposal.solution);
                    break;
                }
                Decision::Reject => {}
                Decision::Abort => {
                    info!("fix dialogue aborted after {} proposals", i + 1);
                    return Ok(FixOutcome::Aborted);
                }
            }
        }

        let Some(solution) = accepted else {
            return Ok(FixOutcome::Exhausted);
        };
        if !auto_apply {
            return Ok(FixOutcome::Accepted(solution));
        }

        let fillers = plan_fillers(&self.timeline, &self.params, areas, &solution)?;
        info!("inserting {} filler objects", fillers.len());
        self.timeline.insert(fillers);
        self.detection = None;
        Ok(FixOutcome::Applied(solution))
    }
}

/// Fill `slot` with a fresh detection of `timeline` unless it already holds one.
fn cached_detection<'s>(
    slot: &'s mut Option<Detection>,
    timeline: &Timeline,
    params: TimingParams,
) -> Result<&'s Detection, AutoFailError> {
    let detection = match slot.take() {
        Some(detection) => detection,
        None => ProblemAreaDetector::new(timeline, params)?.detect(),
    };
    Ok(slot.insert(detection))
}
