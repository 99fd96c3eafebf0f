//! Window-side presentation: camera, lights, fog, and per-element materials.
//! Nothing here feeds back into the sequence.

pub mod camera;
pub mod materials;

use bevy::prelude::*;

use crate::core::system::system_order::SequenceSet;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<materials::ElementMeshes>()
            .add_plugins(camera::CameraPlugin)
            .add_systems(
                Update,
                (
                    materials::attach_element_visuals,
                    materials::sync_element_tints,
                )
                    .chain()
                    .in_set(SequenceSet::Apply),
            );
    }
}
