use bevy::prelude::*;

use super::stats::{DebugState, DebugStats};

pub fn debug_logging_system(time: Res<Time>, mut state: ResMut<DebugState>, stats: Res<DebugStats>) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!(
            "SEQ frame={} t={:.3}s fps={:.1} ft_ms={:.1} phase={:?} cycle={} laps={} tweening={}/{}",
            state.frame_counter,
            time.elapsed_secs(),
            stats.fps,
            stats.frame_time_ms,
            stats.phase,
            stats.cycles,
            stats.laps_completed,
            stats.tweening,
            stats.animated
        );
    }
}
