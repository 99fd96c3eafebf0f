use bevy::prelude::*;

use super::phase::Phase;

/// Element counts per collection, published by scene composition.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseRoster {
    pub scatter_points: usize,
    pub orbit_dots: usize,
    pub first_stage_lines: usize,
    pub second_stage_lines: usize,
}

impl PhaseRoster {
    /// Reporting tweens the sequencer waits for before leaving `phase`.
    /// `None` marks a timer-driven phase.
    pub fn expected(&self, phase: Phase) -> Option<usize> {
        match phase {
            Phase::Scatter => None,
            Phase::Combine | Phase::Contract => Some(self.scatter_points),
            Phase::Rotate => Some(1),
            Phase::Logo => Some(self.second_stage_lines),
            Phase::ResetLine => Some(self.first_stage_lines),
            Phase::ResetLogo => Some(1),
            Phase::ResetAll => Some(self.scatter_points + self.orbit_dots),
        }
    }
}

/// Counts completions reported for the current phase.
#[derive(Resource, Debug, Default)]
pub struct CompletionBarrier {
    phase: Option<Phase>,
    expected: usize,
    completed: usize,
}

impl CompletionBarrier {
    pub fn arm(&mut self, phase: Phase, expected: usize) {
        self.phase = Some(phase);
        self.expected = expected;
        self.completed = 0;
    }

    pub fn disarm(&mut self) {
        self.phase = None;
        self.expected = 0;
        self.completed = 0;
    }

    /// Count one completion. Reports tagged with another phase are stale and ignored.
    pub fn record(&mut self, phase: Phase) -> bool {
        if self.phase != Some(phase) {
            return false;
        }
        self.completed += 1;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_some() && self.completed >= self.expected
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// (completed, expected)
    pub fn progress(&self) -> (usize, usize) {
        (self.completed, self.expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_only_after_all_reports() {
        let mut b = CompletionBarrier::default();
        b.arm(Phase::Combine, 3);
        assert!(b.record(Phase::Combine));
        assert!(b.record(Phase::Combine));
        assert!(!b.is_complete());
        assert!(b.record(Phase::Combine));
        assert!(b.is_complete());
        assert_eq!(b.progress(), (3, 3));
    }

    #[test]
    fn stale_reports_are_ignored() {
        let mut b = CompletionBarrier::default();
        b.arm(Phase::Contract, 1);
        assert!(!b.record(Phase::Combine));
        assert!(!b.is_complete());
    }

    #[test]
    fn zero_expected_is_immediately_complete() {
        let mut b = CompletionBarrier::default();
        b.arm(Phase::Logo, 0);
        assert!(b.is_complete());
    }

    #[test]
    fn disarmed_barrier_never_completes() {
        let mut b = CompletionBarrier::default();
        assert!(!b.is_complete());
        b.arm(Phase::Rotate, 1);
        b.disarm();
        assert!(!b.record(Phase::Rotate));
        assert!(!b.is_complete());
    }

    #[test]
    fn roster_counts_per_phase() {
        let roster = PhaseRoster {
            scatter_points: 324,
            orbit_dots: 30,
            first_stage_lines: 2,
            second_stage_lines: 4,
        };
        assert_eq!(roster.expected(Phase::Scatter), None);
        assert_eq!(roster.expected(Phase::Combine), Some(324));
        assert_eq!(roster.expected(Phase::Rotate), Some(1));
        assert_eq!(roster.expected(Phase::Logo), Some(4));
        assert_eq!(roster.expected(Phase::ResetLine), Some(2));
        assert_eq!(roster.expected(Phase::ResetAll), Some(354));
    }
}
