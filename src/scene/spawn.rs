use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use super::layout::{
    connector_placement, dot_sphere_layout, logo_dots, orbit_ring_layout, LOGO_GLYPH, LOGO_LINKS,
};
use crate::animation::{AnimValues, Animated};
use crate::core::components::{
    CenterDot, ConnectorLine, FixedRotation, LineStage, SphereGroup, Visual, VisualShape,
};
use crate::core::config::SceneConfig;
use crate::sequence::PhaseRoster;

/// Spawn every element once and publish the per-phase completion roster.
pub fn compose_scene(mut commands: Commands, cfg: Res<SceneConfig>) {
    let mut rng = match cfg.layout_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let colors = &cfg.colors;
    let ball = colors.ball_color();
    let accent = colors.accent_color();

    let points = dot_sphere_layout(&cfg.sphere, &mut rng);
    let point_visual = Visual {
        shape: VisualShape::Sphere {
            radius: cfg.sphere.point_radius,
            sectors: 32,
            stacks: 16,
        },
        lit: false,
    };
    commands
        .spawn((
            Name::new("DotSphere"),
            SphereGroup,
            Animated::new(AnimValues::default()),
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|group| {
            for point in &points {
                group.spawn((
                    *point,
                    Animated::new(
                        AnimValues::at(point.scatter)
                            .with_scale(point.scale)
                            .with_color(ball),
                    ),
                    point_visual,
                    Transform::from_translation(point.scatter),
                ));
            }
        });

    let mut orbit_dots = 0;
    for ring in &cfg.orbits {
        let ring_visual = Visual {
            shape: VisualShape::Sphere {
                radius: ring.dot_radius,
                sectors: 32,
                stacks: 16,
            },
            lit: false,
        };
        for dot in orbit_ring_layout(ring, &mut rng) {
            commands.spawn((
                dot,
                Animated::new(AnimValues::at(dot.base).with_color(accent)),
                ring_visual,
                Transform::from_translation(dot.base),
            ));
            orbit_dots += 1;
        }
    }

    let center = Vec3::new(0.0, 0.0, cfg.center_dot.z);
    commands.spawn((
        Name::new("CenterDot"),
        CenterDot,
        Animated::new(AnimValues::at(center).with_scale(0.0).with_color(accent)),
        Visual {
            shape: VisualShape::Sphere {
                radius: cfg.center_dot.radius,
                sectors: 64,
                stacks: 64,
            },
            lit: false,
        },
        Transform::from_translation(center),
    ));

    let logo = logo_dots(&cfg.logo);
    for (dot, glyph) in logo.iter().zip(LOGO_GLYPH.iter()) {
        commands.spawn((
            *dot,
            Animated::new(
                AnimValues::at(dot.origin)
                    .with_scale(cfg.logo.collapsed_scale)
                    .with_opacity(0.0)
                    .with_color(if dot.accent { accent } else { ball }),
            ),
            Visual {
                shape: VisualShape::Sphere {
                    radius: cfg.logo.base_radius * glyph.radius_multiple,
                    sectors: 64,
                    stacks: 64,
                },
                lit: true,
            },
            Transform::from_translation(dot.origin),
        ));
    }

    let line_color = colors.line_color();
    let mut roster = PhaseRoster {
        scatter_points: points.len(),
        orbit_dots,
        ..Default::default()
    };
    for &(from, to, stage) in LOGO_LINKS.iter() {
        let (Some(a), Some(b)) = (logo.get(from), logo.get(to)) else {
            continue;
        };
        let (mid, angle) = connector_placement(a.target, b.target);
        commands.spawn((
            ConnectorLine { stage, from, to },
            Animated::new(AnimValues::at(mid).with_opacity(0.0).with_color(line_color)),
            FixedRotation(Quat::from_rotation_z(angle)),
            Visual {
                shape: VisualShape::Bar {
                    size: Vec3::from_array(cfg.logo.line_box),
                },
                lit: false,
            },
            Transform::from_translation(mid).with_rotation(Quat::from_rotation_z(angle)),
        ));
        match stage {
            LineStage::First => roster.first_stage_lines += 1,
            LineStage::Second => roster.second_stage_lines += 1,
        }
    }

    info!(
        points = roster.scatter_points,
        orbit_dots = roster.orbit_dots,
        logo_dots = logo.len(),
        lines = roster.first_stage_lines + roster.second_stage_lines,
        "scene composed"
    );
    commands.insert_resource(roster);
}
