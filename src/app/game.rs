// This file is part of Logo Sphere.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::animation::TweenPlugin;
use crate::animators::AnimatorsPlugin;
use crate::app::auto_close::AutoClosePlugin;
use crate::core::system::system_order::SequenceSet;
use crate::debug::DebugPlugin;
use crate::rendering::RenderingPlugin;
use crate::scene::ScenePlugin;
use crate::sequence::SequencePlugin;

/// Everything that drives the animation; runs headless under `MinimalPlugins`.
pub struct SequenceCorePlugin;

impl Plugin for SequenceCorePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SequenceSet::Drive,
                SequenceSet::React,
                SequenceSet::Animate,
                SequenceSet::Apply,
            )
                .chain(),
        )
        .add_plugins((TweenPlugin, SequencePlugin, AnimatorsPlugin, ScenePlugin));
    }
}

pub struct LogoSpherePlugin;

impl Plugin for LogoSpherePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            SequenceCorePlugin,
            RenderingPlugin,
            AutoClosePlugin,
            DebugPlugin,
        ));
    }
}
