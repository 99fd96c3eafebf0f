//! Tween runtime standing in for a spring engine: requests in, per-frame
//! values and one-shot resolution events out.

pub mod easing;
pub mod tween;

use bevy::prelude::*;

use crate::core::system::system_order::SequenceSet;
pub use easing::Easing;
pub use tween::{AnimValues, Animated, TweenRequest, TweenResolved, TweenTarget};

pub struct TweenPlugin;

impl Plugin for TweenPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TweenResolved>()
            .add_systems(
                Update,
                tween::advance_tweens.in_set(SequenceSet::Animate),
            )
            .add_systems(Update, tween::sync_transforms.in_set(SequenceSet::Apply));
    }
}
