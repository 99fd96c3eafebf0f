//! Per-element reactions: each element kind turns phase changes into tween
//! requests, and the idle kinds run procedural motion while their flag holds.

pub mod center_dot;
pub mod logo;
pub mod orbit;
pub mod points;

use bevy::prelude::*;

use crate::animation::tween::advance_tweens;
use crate::core::system::system_order::SequenceSet;

pub struct AnimatorsPlugin;

impl Plugin for AnimatorsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                points::react_scatter_points,
                points::react_sphere_group,
                orbit::react_orbit_dots,
                center_dot::react_center_dot,
                logo::react_logo_dots,
                logo::react_connector_lines,
            )
                .in_set(SequenceSet::React),
        )
        .add_systems(
            Update,
            (points::float_scatter_points, orbit::orbit_dots)
                .in_set(SequenceSet::Animate)
                .before(advance_tweens),
        );
    }
}
