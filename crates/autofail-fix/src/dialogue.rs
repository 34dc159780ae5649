// Accept/reject protocol between the padding search and whoever reviews its
// proposals (a prompt, a script, a test).

use std::fmt;

use crate::guide::FixGuide;
use crate::solver::PaddingSolution;

/// Reviewer's answer to one proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Use this solution
    Accept,
    /// Show the next solution
    Reject,
    /// Stop without fixing anything
    Abort,
}

/// A candidate solution as presented to the reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixProposal {
    /// 1-based position in the proposal sequence
    pub number: usize,
    pub solution: PaddingSolution,
    pub guide: FixGuide,
}

impl fmt::Display for FixProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution {}", self.number)?;
        write!(f, "{}", self.guide)
    }
}

/// Decides on proposals one at a time.
pub trait FixDecider {
    fn decide(&mut self, proposal: &FixProposal) -> Decision;
}

impl<F> FixDecider for F
where
    F: FnMut(&FixProposal) -> Decision,
{
    fn decide(&mut self, proposal: &FixProposal) -> Decision {
        self(proposal)
    }
}

/// How a fix dialogue ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    /// The last detection found no problem areas
    NothingToFix,
    /// A solution was accepted and its fillers inserted
    Applied(PaddingSolution),
    /// A solution was accepted but auto-apply was off
    Accepted(PaddingSolution),
    /// The reviewer aborted
    Aborted,
    /// The padding limit ran out before anything was accepted
    Exhausted,
}

impl FixOutcome {
    /// Whether the timeline was changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The accepted solution, applied or not.
    pub fn solution(&self) -> Option<&PaddingSolution> {
        match self {
            Self::Applied(solution) | Self::Accepted(solution) => Some(solution),
            _ => None,
        }
    }
}
