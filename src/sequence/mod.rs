//! Phase sequencing: store, completion barrier, and the driver that chains
//! phases together.

pub mod barrier;
pub mod phase;
pub mod sequencer;

use bevy::prelude::*;

use crate::core::system::system_order::SequenceSet;
pub use barrier::{CompletionBarrier, PhaseRoster};
pub use phase::{Phase, PhaseError, PhaseFlags, PhaseStore, Transition};
pub use sequencer::{LapCounter, PhaseChanged, SequenceClock};

pub struct SequencePlugin;

impl Plugin for SequencePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhaseStore>()
            .init_resource::<CompletionBarrier>()
            .init_resource::<PhaseRoster>()
            .init_resource::<SequenceClock>()
            .init_resource::<LapCounter>()
            .add_event::<PhaseChanged>()
            .add_systems(Startup, sequencer::arm_scatter_timer)
            .add_systems(
                Update,
                sequencer::drive_sequence.in_set(SequenceSet::Drive),
            );
    }
}
