//! Central system ordering labels to make the per-frame sequence explicit.
//! Stages (high-level, all in `Update`):
//! 1. Drive (timers, completion barrier, watchdog -> phase transitions)
//! 2. React (animators turn phase changes into tween requests)
//! 3. Animate (procedural motion + tween evaluation)
//! 4. Apply (animated values -> transforms / materials)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum SequenceSet {
    Drive,
    React,
    Animate,
    Apply,
}
