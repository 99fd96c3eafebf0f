use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use crate::core::config::{config::parse_hex, SceneConfig};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands, cfg: Res<SceneConfig>) {
    let cam = &cfg.camera;
    let fog_color = parse_hex(&cam.fog_color).unwrap_or(Color::srgb_u8(0x20, 0x20, 0x25));
    commands.insert_resource(ClearColor(fog_color));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: cam.ambient_brightness,
        ..default()
    });
    commands.spawn((
        Name::new("MainCamera"),
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: cam.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, cam.distance).looking_at(Vec3::ZERO, Vec3::Y),
        DistanceFog {
            color: fog_color,
            falloff: FogFalloff::Linear {
                start: cam.fog_start,
                end: cam.fog_end,
            },
            ..default()
        },
    ));
    commands.spawn((
        Name::new("KeyLight"),
        PointLight {
            intensity: cam.point_light_intensity,
            range: cam.distance * 4.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(cam.point_light_position)),
    ));
}
