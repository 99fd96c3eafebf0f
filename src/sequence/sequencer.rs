use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use std::time::Duration;

use super::barrier::{CompletionBarrier, PhaseRoster};
use super::phase::{Phase, PhaseStore, Transition};
use crate::animation::TweenResolved;
use crate::core::config::{SceneConfig, TimingConfig};

/// Emitted once per applied transition; animators key their tween requests on `to`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChanged {
    pub from: Phase,
    pub to: Phase,
    /// Lap being targeted at the time of the change.
    pub laps: u32,
}

/// Rotation laps; starts at 1 and grows by one per finished rotation, across cycles.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapCounter {
    laps: u32,
}

impl Default for LapCounter {
    fn default() -> Self {
        Self { laps: 1 }
    }
}

impl LapCounter {
    /// Lap the next rotation targets (`-π × laps`).
    pub fn laps(&self) -> u32 {
        self.laps
    }

    pub fn completed(&self) -> u32 {
        self.laps - 1
    }

    pub fn rotation_target(&self) -> f32 {
        -std::f32::consts::PI * self.laps as f32
    }

    fn complete_lap(&mut self) {
        self.laps += 1;
    }
}

#[derive(Resource, Debug, Default)]
pub struct SequenceClock {
    /// Delay before points leave the scatter layout.
    pub scatter: Option<Timer>,
    /// Force-advance deadline for the current barrier phase.
    pub watchdog: Option<Timer>,
}

/// Expected wall time of a phase, from entry to its last reporting tween.
pub fn phase_budget(phase: Phase, t: &TimingConfig) -> Duration {
    match phase {
        Phase::Scatter => t.scatter_delay(),
        Phase::Combine => t.point_combine.span(),
        Phase::Rotate => t.sphere_rotate.span(),
        Phase::Contract => t.point_contract.span(),
        Phase::Logo => t
            .line_second_grow
            .span()
            .max(t.line_first_grow.span())
            .max(t.logo_assemble.span()),
        Phase::ResetLine => t.line_first_reset.span().max(t.line_second_reset.span()),
        Phase::ResetLogo => t.center_reset.span(),
        Phase::ResetAll => t.point_reset.span().max(t.orbit_reset.span()),
    }
}

pub fn arm_scatter_timer(cfg: Res<SceneConfig>, mut clock: ResMut<SequenceClock>) {
    clock.scatter = Some(Timer::new(cfg.timing.scatter_delay(), TimerMode::Once));
    info!(
        delay_ms = cfg.timing.scatter_delay_ms,
        "sequence: scatter phase armed"
    );
}

#[derive(SystemParam)]
pub struct Sequencer<'w, 's> {
    cfg: Res<'w, SceneConfig>,
    roster: Res<'w, PhaseRoster>,
    store: ResMut<'w, PhaseStore>,
    barrier: ResMut<'w, CompletionBarrier>,
    clock: ResMut<'w, SequenceClock>,
    laps: ResMut<'w, LapCounter>,
    resolved: EventReader<'w, 's, TweenResolved>,
    changed: EventWriter<'w, PhaseChanged>,
}

impl Sequencer<'_, '_> {
    pub fn tick(&mut self, delta: Duration) {
        for ev in self.resolved.read() {
            self.barrier.record(ev.phase);
        }

        let scatter_fired = self
            .clock
            .scatter
            .as_mut()
            .is_some_and(|t| t.tick(delta).finished());
        if scatter_fired {
            self.clock.scatter = None;
            if self.store.phase() == Phase::ResetAll {
                self.transition(Transition::FinishReset);
            }
            self.transition(Transition::StartCombineSphere);
        }

        self.drain_barrier();

        let watchdog_fired = self
            .clock
            .watchdog
            .as_mut()
            .is_some_and(|t| t.tick(delta).finished());
        if watchdog_fired {
            self.clock.watchdog = None;
            let phase = self.store.phase();
            let (done, expected) = self.barrier.progress();
            warn!(
                ?phase,
                done, expected, "sequence: watchdog expired, forcing phase advance"
            );
            self.transition(phase.exit());
            self.drain_barrier();
        }
    }

    /// Advance through every phase whose barrier is already satisfied.
    fn drain_barrier(&mut self) {
        while self.barrier.is_complete() && self.barrier.phase() == Some(self.store.phase()) {
            let exit = self.store.phase().exit();
            if !self.transition(exit) {
                break;
            }
        }
    }

    fn transition(&mut self, transition: Transition) -> bool {
        let from = self.store.phase();
        match self.store.apply(transition) {
            Ok(to) => {
                self.enter(from, to);
                true
            }
            Err(e) => {
                warn!("sequence: {e}");
                false
            }
        }
    }

    fn enter(&mut self, from: Phase, to: Phase) {
        if from == Phase::Rotate {
            self.laps.complete_lap();
        }
        match self.roster.expected(to) {
            Some(expected) => self.barrier.arm(to, expected),
            None => self.barrier.disarm(),
        }
        let factor = self.cfg.sequencer.watchdog_factor;
        self.clock.watchdog = if factor > 0.0 && self.barrier.phase().is_some() {
            let budget = phase_budget(to, &self.cfg.timing).mul_f32(factor);
            Some(Timer::new(budget, TimerMode::Once))
        } else {
            None
        };
        if to == Phase::ResetAll {
            self.clock.scatter = Some(Timer::new(
                self.cfg.timing.scatter_delay(),
                TimerMode::Once,
            ));
        }
        info!(
            ?from,
            ?to,
            laps = self.laps.laps(),
            cycle = self.store.cycles(),
            "sequence: phase change"
        );
        self.changed.write(PhaseChanged {
            from,
            to,
            laps: self.laps.laps(),
        });
    }
}

pub fn drive_sequence(time: Res<Time>, mut sequencer: Sequencer) {
    sequencer.tick(time.delta());
}
