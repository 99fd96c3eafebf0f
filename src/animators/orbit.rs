use bevy::prelude::*;

use crate::animation::{Animated, TweenRequest, TweenTarget};
use crate::core::components::OrbitDot;
use crate::core::config::SceneConfig;
use crate::sequence::{Phase, PhaseChanged, PhaseStore};

pub fn react_orbit_dots(
    mut changes: EventReader<PhaseChanged>,
    cfg: Res<SceneConfig>,
    mut q: Query<(&mut OrbitDot, &mut Animated)>,
) {
    let t = &cfg.timing;
    for change in changes.read() {
        for (mut orbit, mut animated) in &mut q {
            match change.to {
                // collapse onto the z axis and fade out
                Phase::Combine => animated.start(TweenRequest::new(
                    TweenTarget::default()
                        .translation(Vec3::new(0.0, 0.0, orbit.base.z))
                        .opacity(0.0),
                    t.orbit_collapse,
                )),
                Phase::ResetAll => {
                    orbit.angle = 0.0;
                    animated.start(
                        TweenRequest::new(
                            TweenTarget::default().translation(orbit.base).opacity(1.0),
                            t.orbit_reset,
                        )
                        .reporting(Phase::ResetAll),
                    );
                }
                _ => {}
            }
        }
    }
}

pub fn orbit_dots(
    time: Res<Time>,
    store: Res<PhaseStore>,
    mut q: Query<(&mut OrbitDot, &mut Animated)>,
) {
    if !store.flags().blue_ball_animation {
        return;
    }
    let dt = time.delta_secs();
    for (mut orbit, mut animated) in &mut q {
        if animated.is_tweening() {
            continue;
        }
        orbit.angle += orbit.speed * dt;
        animated.values_mut().translation = Quat::from_rotation_z(orbit.angle) * orbit.base;
    }
}
