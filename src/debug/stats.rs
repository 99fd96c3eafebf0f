use bevy::prelude::*;

use crate::animation::Animated;
use crate::sequence::{LapCounter, Phase, PhaseStore};

#[derive(Resource, Debug)]
pub struct DebugState {
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            log_interval: 1.0,
            time_accum: 0.0,
            frame_counter: 0,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub phase: Phase,
    pub cycles: u32,
    pub laps_completed: u32,
    pub animated: usize,
    pub tweening: usize,
}

pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    store: Res<PhaseStore>,
    laps: Res<LapCounter>,
    q: Query<&Animated>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    stats.fps = if stats.fps == 0.0 {
        inst_fps
    } else {
        stats.fps * 0.9 + inst_fps * 0.1
    };
    let inst_ms = dt * 1000.0;
    stats.frame_time_ms = if stats.frame_time_ms == 0.0 {
        inst_ms
    } else {
        stats.frame_time_ms * 0.9 + inst_ms * 0.1
    };
    stats.phase = store.phase();
    stats.cycles = store.cycles();
    stats.laps_completed = laps.completed();
    stats.animated = q.iter().count();
    stats.tweening = q.iter().filter(|a| a.is_tweening()).count();
}
