//! Phase store: the single authoritative animation phase plus the legacy
//! boolean flag view derived from it.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Points float in their scattered layout, orbit dots circle.
    #[default]
    Scatter,
    Combine,
    Rotate,
    Contract,
    Logo,
    ResetLine,
    ResetLogo,
    ResetAll,
}

impl Phase {
    /// Cycle order starting from the initial phase.
    pub const CYCLE: [Phase; 8] = [
        Phase::Scatter,
        Phase::Combine,
        Phase::Rotate,
        Phase::Contract,
        Phase::Logo,
        Phase::ResetLine,
        Phase::ResetLogo,
        Phase::ResetAll,
    ];

    pub const fn next(self) -> Phase {
        self.exit().to()
    }

    /// The only transition allowed out of this phase.
    pub const fn exit(self) -> Transition {
        match self {
            Phase::Scatter => Transition::StartCombineSphere,
            Phase::Combine => Transition::StartRotateSphere,
            Phase::Rotate => Transition::StartContractSphere,
            Phase::Contract => Transition::StartLogoAnimation,
            Phase::Logo => Transition::ResetLineAnimation,
            Phase::ResetLine => Transition::ResetLogoAnimation,
            Phase::ResetLogo => Transition::ResetAllAnimation,
            Phase::ResetAll => Transition::FinishReset,
        }
    }

    pub fn flags(self) -> PhaseFlags {
        let mut f = PhaseFlags::default();
        match self {
            Phase::Scatter => {
                f.blue_ball_animation = true;
                f.little_ball_float_animation = true;
            }
            Phase::Combine => f.combine_sphere_animation = true,
            Phase::Rotate => f.rotate_sphere_animation = true,
            Phase::Contract => f.contract_sphere_animation = true,
            Phase::Logo => f.logo_animation = true,
            Phase::ResetLine => f.reset_line = true,
            Phase::ResetLogo => f.reset_logo = true,
            Phase::ResetAll => {
                f.reset_all = true;
                f.blue_ball_animation = true;
                f.little_ball_float_animation = true;
            }
        }
        f
    }
}

/// Snapshot of the per-phase boolean flags elements gate their motion on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseFlags {
    /// Orbit dots circle; big center dot hidden.
    pub blue_ball_animation: bool,
    /// Scatter points spin in place.
    pub little_ball_float_animation: bool,
    pub combine_sphere_animation: bool,
    pub rotate_sphere_animation: bool,
    pub contract_sphere_animation: bool,
    pub logo_animation: bool,
    pub reset_line: bool,
    pub reset_logo: bool,
    pub reset_all: bool,
}

impl PhaseFlags {
    pub fn forward_count(&self) -> usize {
        [
            self.combine_sphere_animation,
            self.rotate_sphere_animation,
            self.contract_sphere_animation,
            self.logo_animation,
        ]
        .into_iter()
        .filter(|f| *f)
        .count()
    }

    pub fn reset_count(&self) -> usize {
        [self.reset_line, self.reset_logo, self.reset_all]
            .into_iter()
            .filter(|f| *f)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    StartCombineSphere,
    StartRotateSphere,
    StartContractSphere,
    StartLogoAnimation,
    ResetLineAnimation,
    ResetLogoAnimation,
    ResetAllAnimation,
    /// Clears `reset_all` once the scene is back in its scatter layout.
    FinishReset,
}

impl Transition {
    pub const ALL: [Transition; 8] = [
        Transition::StartCombineSphere,
        Transition::StartRotateSphere,
        Transition::StartContractSphere,
        Transition::StartLogoAnimation,
        Transition::ResetLineAnimation,
        Transition::ResetLogoAnimation,
        Transition::ResetAllAnimation,
        Transition::FinishReset,
    ];

    pub const fn from(self) -> Phase {
        match self {
            Transition::StartCombineSphere => Phase::Scatter,
            Transition::StartRotateSphere => Phase::Combine,
            Transition::StartContractSphere => Phase::Rotate,
            Transition::StartLogoAnimation => Phase::Contract,
            Transition::ResetLineAnimation => Phase::Logo,
            Transition::ResetLogoAnimation => Phase::ResetLine,
            Transition::ResetAllAnimation => Phase::ResetLogo,
            Transition::FinishReset => Phase::ResetAll,
        }
    }

    pub const fn to(self) -> Phase {
        match self {
            Transition::StartCombineSphere => Phase::Combine,
            Transition::StartRotateSphere => Phase::Rotate,
            Transition::StartContractSphere => Phase::Contract,
            Transition::StartLogoAnimation => Phase::Logo,
            Transition::ResetLineAnimation => Phase::ResetLine,
            Transition::ResetLogoAnimation => Phase::ResetLogo,
            Transition::ResetAllAnimation => Phase::ResetAll,
            Transition::FinishReset => Phase::Scatter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PhaseError {
    #[error("{transition:?} is only legal from {expected:?}, current phase is {current:?}")]
    IllegalTransition {
        transition: Transition,
        expected: Phase,
        current: Phase,
    },
}

/// Current phase; mutated only through the named transitions.
#[derive(Resource, Debug, Default)]
pub struct PhaseStore {
    phase: Phase,
    cycles: u32,
}

impl PhaseStore {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flags(&self) -> PhaseFlags {
        self.phase.flags()
    }

    /// Number of completed reset cycles.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn apply(&mut self, transition: Transition) -> Result<Phase, PhaseError> {
        if self.phase != transition.from() {
            return Err(PhaseError::IllegalTransition {
                transition,
                expected: transition.from(),
                current: self.phase,
            });
        }
        self.phase = transition.to();
        if transition == Transition::FinishReset {
            self.cycles += 1;
        }
        Ok(self.phase)
    }

    pub fn start_combine_sphere(&mut self) -> Result<Phase, PhaseError> {
        self.apply(Transition::StartCombineSphere)
    }
    pub fn start_rotate_sphere(&mut self) -> Result<Phase, PhaseError> {
        self.apply(Transition::StartRotateSphere)
    }
    pub fn start_contract_sphere(&mut self) -> Result<Phase, PhaseError> {
        self.apply(Transition::StartContractSphere)
    }
    pub fn start_logo_animation(&mut self) -> Result<Phase, PhaseError> {
        self.apply(Transition::StartLogoAnimation)
    }
    pub fn reset_line_animation(&mut self) -> Result<Phase, PhaseError> {
        self.apply(Transition::ResetLineAnimation)
    }
    pub fn reset_logo_animation(&mut self) -> Result<Phase, PhaseError> {
        self.apply(Transition::ResetLogoAnimation)
    }
    pub fn reset_all_animation(&mut self) -> Result<Phase, PhaseError> {
        self.apply(Transition::ResetAllAnimation)
    }
    pub fn finish_reset(&mut self) -> Result<Phase, PhaseError> {
        self.apply(Transition::FinishReset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn named_operations_walk_full_cycle() {
        let mut store = PhaseStore::default();
        assert_eq!(store.phase(), Phase::Scatter);
        assert_eq!(store.start_combine_sphere(), Ok(Phase::Combine));
        assert_eq!(store.start_rotate_sphere(), Ok(Phase::Rotate));
        assert_eq!(store.start_contract_sphere(), Ok(Phase::Contract));
        assert_eq!(store.start_logo_animation(), Ok(Phase::Logo));
        assert_eq!(store.reset_line_animation(), Ok(Phase::ResetLine));
        assert_eq!(store.reset_logo_animation(), Ok(Phase::ResetLogo));
        assert_eq!(store.reset_all_animation(), Ok(Phase::ResetAll));
        assert_eq!(store.finish_reset(), Ok(Phase::Scatter));
        assert_eq!(store.cycles(), 1);
    }

    #[test]
    fn flags_match_transition_table() {
        let mut store = PhaseStore::default();
        let f = store.flags();
        assert!(f.blue_ball_animation && f.little_ball_float_animation);

        store.start_combine_sphere().unwrap();
        let f = store.flags();
        assert!(!f.blue_ball_animation && !f.little_ball_float_animation);
        assert!(f.combine_sphere_animation);

        store.start_rotate_sphere().unwrap();
        assert!(!store.flags().combine_sphere_animation);
        assert!(store.flags().rotate_sphere_animation);

        store.start_contract_sphere().unwrap();
        store.start_logo_animation().unwrap();
        store.reset_line_animation().unwrap();
        assert!(!store.flags().logo_animation && store.flags().reset_line);
        store.reset_logo_animation().unwrap();
        store.reset_all_animation().unwrap();
        let f = store.flags();
        assert!(f.reset_all && f.blue_ball_animation && f.little_ball_float_animation);
        assert!(!f.reset_logo);

        store.finish_reset().unwrap();
        assert!(!store.flags().reset_all);
    }

    #[test]
    fn illegal_transition_is_rejected_without_side_effects() {
        let mut store = PhaseStore::default();
        let err = store.start_rotate_sphere().unwrap_err();
        assert_eq!(
            err,
            PhaseError::IllegalTransition {
                transition: Transition::StartRotateSphere,
                expected: Phase::Combine,
                current: Phase::Scatter,
            }
        );
        assert_eq!(store.phase(), Phase::Scatter);
        // re-entrant call of the same operation
        store.start_combine_sphere().unwrap();
        assert!(store.start_combine_sphere().is_err());
        assert_eq!(store.phase(), Phase::Combine);
    }

    #[test]
    fn next_follows_cycle_order() {
        for (i, phase) in Phase::CYCLE.iter().enumerate() {
            let expected = Phase::CYCLE[(i + 1) % Phase::CYCLE.len()];
            assert_eq!(phase.next(), expected);
            assert_eq!(phase.exit().from(), *phase);
        }
    }

    #[test]
    fn random_interleavings_keep_flags_exclusive() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let mut store = PhaseStore::default();
            let mut visited = vec![store.phase()];
            for _ in 0..64 {
                let t = Transition::ALL[rng.gen_range(0..Transition::ALL.len())];
                let before = store.phase();
                match store.apply(t) {
                    Ok(after) => {
                        assert_eq!(before.next(), after, "skipped a phase");
                        visited.push(after);
                    }
                    Err(_) => assert_eq!(store.phase(), before),
                }
                let f = store.flags();
                assert!(f.forward_count() <= 1, "{f:?}");
                assert!(f.reset_count() <= 1, "{f:?}");
            }
            for pair in visited.windows(2) {
                assert_eq!(pair[0].next(), pair[1]);
            }
        }
    }
}
