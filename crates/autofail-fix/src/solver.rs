//! Padding search.
//!
//! Filler objects placed in the gaps between problem areas shift the index
//! space the engine's binary search runs over. For a total padding count `P`
//! each area gets every feasible amount of padding to its left; solutions are
//! the non-decreasing assignments of those amounts across areas. Counts are
//! tried from the smallest feasible `P` upward, so proposals never get cheaper.

use autofail_detect::{ProblemArea, WindowOracle};
use log::debug;

/// Filler counts per gap: one gap before each problem area plus a trailing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaddingSolution {
    gaps: Vec<usize>,
}

impl PaddingSolution {
    pub fn new(gaps: Vec<usize>) -> Self {
        Self { gaps }
    }

    /// Build from the cumulative left padding of each area.
    fn from_cumulative(lefts: &[usize], total: usize) -> Self {
        let mut gaps = Vec::with_capacity(lefts.len() + 1);
        let mut previous = 0;
        for &left in lefts {
            gaps.push(left - previous);
            previous = left;
        }
        gaps.push(total - previous);
        Self { gaps }
    }

    pub fn gaps(&self) -> &[usize] {
        &self.gaps
    }

    /// Total number of filler objects.
    pub fn total(&self) -> usize {
        self.gaps.iter().sum()
    }

    /// Filler count in the gap after the last problem area.
    pub fn trailing(&self) -> usize {
        self.gaps.last().copied().unwrap_or(0)
    }
}

/// Searches filler distributions that keep every problem area loaded.
#[derive(Debug, Clone, Copy)]
pub struct PaddingSolver<'a> {
    oracle: WindowOracle<'a>,
    areas: &'a [ProblemArea],
    max_padding: Option<usize>,
}

impl<'a> PaddingSolver<'a> {
    pub fn new(oracle: WindowOracle<'a>, areas: &'a [ProblemArea]) -> Self {
        Self {
            oracle,
            areas,
            max_padding: None,
        }
    }

    /// Stop searching once the total padding would exceed `max_padding`.
    pub fn with_max_padding(mut self, max_padding: Option<usize>) -> Self {
        self.max_padding = max_padding;
        self
    }

    fn within_limit(&self, padding: usize) -> bool {
        self.max_padding.is_none_or(|max| padding <= max)
    }

    /// Whether `left` fillers before and `right` after keep `area` loaded at
    /// every one of its checked times.
    pub fn padding_works(&self, area: &ProblemArea, left: usize, right: usize) -> bool {
        area.times_to_check.iter().all(|&time| {
            self.oracle.loaded_window_padded(time, left, right) <= area.index as i64
        })
    }

    /// Every left padding in `minimal_left..=total` that works for `area`,
    /// ascending.
    pub fn area_candidates(&self, area: &ProblemArea, total: usize, minimal_left: usize) -> Vec<usize> {
        (minimal_left..=total)
            .filter(|&left| self.padding_works(area, left, total - left))
            .collect()
    }

    /// Greedy pass at a fixed total: each area takes the lowest left padding
    /// it can.
    fn greedy_at(&self, total: usize) -> Option<PaddingSolution> {
        let mut lefts = Vec::with_capacity(self.areas.len());
        let mut left = 0;
        for area in self.areas {
            left = *self.area_candidates(area, total, left).first()?;
            lefts.push(left);
        }
        Some(PaddingSolution::from_cumulative(&lefts, total))
    }

    /// The cheapest solution, found greedily.
    ///
    /// Returns `None` only when a padding limit is set and reached.
    pub fn minimal_solution(&self) -> Option<PaddingSolution> {
        let mut total = 0;
        while self.within_limit(total) {
            if let Some(solution) = self.greedy_at(total) {
                debug!("minimal padding is {total}");
                return Some(solution);
            }
            total += 1;
        }
        None
    }

    /// Per-area candidate lists at `total`, or `None` if `total` is infeasible.
    fn candidate_table(&self, total: usize) -> Option<Vec<Vec<usize>>> {
        let mut table = Vec::with_capacity(self.areas.len());
        let mut minimal_left = 0;
        for area in self.areas {
            let candidates = self.area_candidates(area, total, minimal_left);
            minimal_left = *candidates.first()?;
            table.push(candidates);
        }

        // Padding can't regress, so no area may take more than the next can
        let mut maximal_left = total;
        for candidates in table.iter_mut().rev() {
            candidates.retain(|&left| left <= maximal_left);
            maximal_left = *candidates.last()?;
        }
        Some(table)
    }

    /// All solutions with exactly `total` fillers.
    pub fn solutions_at(&self, total: usize) -> MonotoneCombinations {
        MonotoneCombinations::new(self.candidate_table(total), total)
    }

    /// Every solution in order of total padding, starting from the cheapest.
    pub fn solutions(&self) -> PaddingSolutions<'a> {
        let start = self.minimal_solution().map(|s| s.total());
        PaddingSolutions {
            solver: *self,
            next_total: start,
            current: None,
        }
    }
}

/// Lazy enumeration of non-decreasing picks, one from each candidate list.
#[derive(Debug, Clone)]
pub struct MonotoneCombinations {
    table: Vec<Vec<usize>>,
    positions: Vec<usize>,
    total: usize,
    started: bool,
    exhausted: bool,
}

impl MonotoneCombinations {
    fn new(table: Option<Vec<Vec<usize>>>, total: usize) -> Self {
        let exhausted = table.is_none();
        let table = table.unwrap_or_default();
        let positions = vec![0; table.len()];
        Self {
            table,
            positions,
            total,
            started: false,
            exhausted,
        }
    }

    fn value(&self, depth: usize) -> usize {
        self.table[depth][self.positions[depth]]
    }

    /// Point every level from `from` on at its smallest allowed pick.
    fn descend(&mut self, from: usize) -> bool {
        for depth in from..self.table.len() {
            let minimum = if depth == 0 { 0 } else { self.value(depth - 1) };
            match self.table[depth].iter().position(|&left| left >= minimum) {
                Some(position) => self.positions[depth] = position,
                None => return false,
            }
        }
        true
    }

    /// Step to the next combination in lexicographic order.
    fn advance(&mut self) -> bool {
        let mut depth = self.table.len();
        while depth > 0 {
            depth -= 1;
            let next = self.positions[depth] + 1;
            // A larger pick here only raises the floor for deeper levels, so a
            // failed descent means moving up a level.
            if next < self.table[depth].len() {
                self.positions[depth] = next;
                if self.descend(depth + 1) {
                    return true;
                }
            }
        }
        false
    }

    fn current(&self) -> PaddingSolution {
        let lefts: Vec<usize> = (0..self.table.len()).map(|d| self.value(d)).collect();
        PaddingSolution::from_cumulative(&lefts, self.total)
    }
}

impl Iterator for MonotoneCombinations {
    type Item = PaddingSolution;

    fn next(&mut self) -> Option<PaddingSolution> {
        if self.exhausted {
            return None;
        }
        let found = if self.started {
            self.advance()
        } else {
            self.started = true;
            self.descend(0)
        };
        if found {
            Some(self.current())
        } else {
            self.exhausted = true;
            None
        }
    }
}

/// Every valid solution, cheapest totals first. Unbounded unless the solver
/// has a padding limit.
#[derive(Debug, Clone)]
pub struct PaddingSolutions<'a> {
    solver: PaddingSolver<'a>,
    next_total: Option<usize>,
    current: Option<MonotoneCombinations>,
}

impl Iterator for PaddingSolutions<'_> {
    type Item = PaddingSolution;

    fn next(&mut self) -> Option<PaddingSolution> {
        loop {
            if let Some(solution) = self.current.as_mut().and_then(Iterator::next) {
                return Some(solution);
            }
            let total = self.next_total?;
            if !self.solver.within_limit(total) {
                self.next_total = None;
                return None;
            }
            debug!("enumerating solutions with {total} fillers");
            self.current = Some(self.solver.solutions_at(total));
            self.next_total = Some(total + 1);
        }
    }
}
