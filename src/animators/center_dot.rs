use bevy::prelude::*;

use crate::animation::{Animated, TweenRequest, TweenTarget};
use crate::core::components::CenterDot;
use crate::core::config::SceneConfig;
use crate::sequence::{Phase, PhaseChanged};

pub fn react_center_dot(
    mut changes: EventReader<PhaseChanged>,
    cfg: Res<SceneConfig>,
    mut q: Query<&mut Animated, With<CenterDot>>,
) {
    let t = &cfg.timing;
    let ball = cfg.colors.ball_color();
    let accent = cfg.colors.accent_color();
    for change in changes.read() {
        let request = match change.to {
            Phase::Combine => TweenRequest::new(TweenTarget::default().uniform_scale(1.0), t.center_grow),
            Phase::Contract => TweenRequest::new(
                TweenTarget::default().uniform_scale(0.5).color(ball),
                t.center_contract,
            ),
            Phase::Logo => TweenRequest::new(TweenTarget::default().uniform_scale(0.0), t.center_vanish),
            Phase::ResetLogo => TweenRequest::new(
                TweenTarget::default().uniform_scale(1.0).color(accent),
                t.center_reset,
            )
            .reporting(Phase::ResetLogo),
            Phase::ResetAll => TweenRequest::new(
                TweenTarget::default().uniform_scale(0.0).color(accent),
                t.center_hide,
            ),
            _ => continue,
        };
        for mut animated in &mut q {
            animated.start(request);
        }
    }
}
