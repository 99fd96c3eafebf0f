//! Scatter points and the sphere group that carries them.

use bevy::prelude::*;

use crate::animation::{Animated, TweenRequest, TweenTarget};
use crate::core::components::{ScatterPoint, SphereGroup};
use crate::core::config::SceneConfig;
use crate::sequence::{Phase, PhaseChanged, PhaseStore};

pub fn react_scatter_points(
    mut changes: EventReader<PhaseChanged>,
    cfg: Res<SceneConfig>,
    mut q: Query<(&ScatterPoint, &mut Animated)>,
) {
    let t = &cfg.timing;
    for change in changes.read() {
        for (point, mut animated) in &mut q {
            let request = match change.to {
                Phase::Combine => TweenRequest::new(
                    TweenTarget::default()
                        .translation(point.sphere)
                        .uniform_scale(1.0)
                        .opacity(1.0),
                    t.point_combine,
                ),
                Phase::Contract => TweenRequest::new(
                    TweenTarget::default()
                        .translation(Vec3::ZERO)
                        .uniform_scale(1.0)
                        .opacity(0.0),
                    t.point_contract,
                ),
                Phase::ResetAll => TweenRequest::new(
                    TweenTarget::default()
                        .translation(point.scatter)
                        .uniform_scale(point.scale)
                        .opacity(1.0),
                    t.point_reset,
                ),
                _ => continue,
            };
            animated.start(request.reporting(change.to));
        }
    }
}

pub fn react_sphere_group(
    mut changes: EventReader<PhaseChanged>,
    cfg: Res<SceneConfig>,
    mut q: Query<&mut Animated, With<SphereGroup>>,
) {
    for change in changes.read() {
        if change.to != Phase::Rotate {
            continue;
        }
        let target = -std::f32::consts::PI * change.laps as f32;
        for mut animated in &mut q {
            animated.start(
                TweenRequest::new(
                    TweenTarget::default().rotation_y(target),
                    cfg.timing.sphere_rotate,
                )
                .reporting(Phase::Rotate),
            );
        }
    }
}

/// Idle spin of every resting point about the group's y axis.
pub fn float_scatter_points(
    time: Res<Time>,
    store: Res<PhaseStore>,
    mut q: Query<(&ScatterPoint, &mut Animated)>,
) {
    if !store.flags().little_ball_float_animation {
        return;
    }
    let dt = time.delta_secs();
    for (point, mut animated) in &mut q {
        if animated.is_tweening() {
            continue;
        }
        let spin = Quat::from_rotation_y(point.float_speed * dt);
        let v = animated.values_mut();
        v.translation = spin * v.translation;
    }
}
