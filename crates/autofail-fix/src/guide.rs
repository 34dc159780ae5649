use std::fmt;

use autofail_detect::ProblemArea;
use autofail_model::TimingParams;

use crate::solver::PaddingSolution;

/// One gap of a fix guide and the number of fillers it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideEntry {
    /// Before the first problem area
    Before { until: i64, count: usize },
    /// Between the end of one problem area and the start of the next
    Between { from: i64, until: i64, count: usize },
    /// After the last problem area
    After { from: i64, count: usize },
}

impl GuideEntry {
    pub fn count(&self) -> usize {
        match *self {
            Self::Before { count, .. } | Self::Between { count, .. } | Self::After { count, .. } => {
                count
            }
        }
    }
}

impl fmt::Display for GuideEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Before { until, count } => write!(f, "Extra objects before {until}: {count}"),
            Self::Between { from, until, count } => {
                write!(f, "Extra objects between {from} - {until}: {count}")
            }
            Self::After { from, count } => write!(f, "Extra objects after {from}: {count}"),
        }
    }
}

/// Human-readable instructions for placing a padding solution by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixGuide {
    entries: Vec<GuideEntry>,
}

impl FixGuide {
    pub fn new(areas: &[ProblemArea], params: &TimingParams, solution: &PaddingSolution) -> Self {
        let gaps = solution.gaps();
        let mut entries = Vec::with_capacity(areas.len() + 1);
        let mut last_end = 0;
        for (i, area) in areas.iter().enumerate() {
            let count = gaps.get(i).copied().unwrap_or(0);
            entries.push(if i == 0 {
                GuideEntry::Before {
                    until: area.start_time(),
                    count,
                }
            } else {
                GuideEntry::Between {
                    from: last_end,
                    until: area.start_time(),
                    count,
                }
            });
            last_end = area.adjusted_end_time - params.approach_time;
        }
        entries.push(GuideEntry::After {
            from: last_end,
            count: solution.trailing(),
        });
        Self { entries }
    }

    pub fn entries(&self) -> &[GuideEntry] {
        &self.entries
    }

    /// Total fillers the guide asks for.
    pub fn total(&self) -> usize {
        self.entries.iter().map(GuideEntry::count).sum()
    }
}

impl fmt::Display for FixGuide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Auto-fail fix guide. Place these extra objects to fix auto-fail:")?;
        writeln!(f)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
