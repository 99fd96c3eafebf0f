//! Logo dots and the connector lines between them.

use bevy::prelude::*;

use crate::animation::{Animated, TweenRequest, TweenTarget};
use crate::core::components::{ConnectorLine, LineStage, LogoDot};
use crate::core::config::SceneConfig;
use crate::sequence::{Phase, PhaseChanged};

pub fn react_logo_dots(
    mut changes: EventReader<PhaseChanged>,
    cfg: Res<SceneConfig>,
    mut q: Query<(&LogoDot, &mut Animated)>,
) {
    let t = &cfg.timing;
    for change in changes.read() {
        for (dot, mut animated) in &mut q {
            let request = match change.to {
                Phase::Logo => TweenRequest::new(
                    TweenTarget::default()
                        .translation(dot.target)
                        .uniform_scale(1.0)
                        .opacity(1.0),
                    t.logo_assemble,
                ),
                Phase::ResetLogo => TweenRequest::new(
                    TweenTarget::default()
                        .translation(dot.origin)
                        .uniform_scale(cfg.logo.collapsed_scale)
                        .opacity(0.0),
                    t.logo_reset,
                ),
                _ => continue,
            };
            animated.start(request);
        }
    }
}

/// Lines grow in two staggered stages and retract in reverse order; the
/// stage that finishes last reports for the phase.
pub fn react_connector_lines(
    mut changes: EventReader<PhaseChanged>,
    cfg: Res<SceneConfig>,
    mut q: Query<(&ConnectorLine, &mut Animated)>,
) {
    let t = &cfg.timing;
    let collapsed = TweenTarget::default().scale(Vec3::ONE).opacity(0.0);
    for change in changes.read() {
        for (line, mut animated) in &mut q {
            let request = match (change.to, line.stage) {
                (Phase::Logo, LineStage::First) => TweenRequest::new(
                    grown(cfg.logo.first_line_length),
                    t.line_first_grow,
                ),
                (Phase::Logo, LineStage::Second) => TweenRequest::new(
                    grown(cfg.logo.second_line_length),
                    t.line_second_grow,
                )
                .reporting(Phase::Logo),
                (Phase::ResetLine, LineStage::Second) => {
                    TweenRequest::new(collapsed, t.line_second_reset)
                }
                (Phase::ResetLine, LineStage::First) => {
                    TweenRequest::new(collapsed, t.line_first_reset).reporting(Phase::ResetLine)
                }
                _ => continue,
            };
            animated.start(request);
        }
    }
}

fn grown(length: f32) -> TweenTarget {
    TweenTarget::default()
        .scale(Vec3::new(1.0, length, 1.0))
        .opacity(1.0)
}
