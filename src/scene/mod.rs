//! Scene composition: layout math and the one-shot spawn of every element.

pub mod layout;
pub mod spawn;

use bevy::prelude::*;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn::compose_scene);
    }
}
