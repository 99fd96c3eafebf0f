use bevy::prelude::*;
use std::collections::HashMap;

use crate::animation::Animated;
use crate::core::components::{Visual, VisualShape};

/// Shape identity for mesh sharing; floats keyed by bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MeshKey {
    Sphere { radius: u32, sectors: u32, stacks: u32 },
    Bar([u32; 3]),
}

impl From<VisualShape> for MeshKey {
    fn from(shape: VisualShape) -> Self {
        match shape {
            VisualShape::Sphere {
                radius,
                sectors,
                stacks,
            } => MeshKey::Sphere {
                radius: radius.to_bits(),
                sectors,
                stacks,
            },
            VisualShape::Bar { size } => MeshKey::Bar(size.to_array().map(f32::to_bits)),
        }
    }
}

#[derive(Resource, Default)]
pub struct ElementMeshes(HashMap<MeshKey, Handle<Mesh>>);

impl ElementMeshes {
    fn get_or_build(&mut self, shape: VisualShape, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
        self.0
            .entry(MeshKey::from(shape))
            .or_insert_with(|| match shape {
                VisualShape::Sphere {
                    radius,
                    sectors,
                    stacks,
                } => meshes.add(Sphere::new(radius).mesh().uv(sectors, stacks)),
                VisualShape::Bar { size } => meshes.add(Cuboid::from_size(size)),
            })
            .clone()
    }
}

/// Last color pushed to an element's material.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AppliedTint(pub LinearRgba);

fn tint_of(animated: &Animated) -> LinearRgba {
    let v = animated.values();
    LinearRgba {
        alpha: v.opacity.clamp(0.0, 1.0),
        ..v.color
    }
}

/// Give every new element its mesh and an own material (opacity is per element).
pub fn attach_element_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut cache: ResMut<ElementMeshes>,
    q: Query<(Entity, &Visual, &Animated), Added<Visual>>,
) {
    for (entity, visual, animated) in &q {
        let tint = tint_of(animated);
        let material = materials.add(StandardMaterial {
            base_color: Color::LinearRgba(tint),
            alpha_mode: AlphaMode::Blend,
            unlit: !visual.lit,
            perceptual_roughness: 0.6,
            ..default()
        });
        commands.entity(entity).insert((
            Mesh3d(cache.get_or_build(visual.shape, &mut meshes)),
            MeshMaterial3d(material),
            AppliedTint(tint),
        ));
    }
}

pub fn sync_element_tints(
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut q: Query<
        (&Animated, &MeshMaterial3d<StandardMaterial>, &mut AppliedTint),
        Changed<Animated>,
    >,
) {
    for (animated, material, mut applied) in &mut q {
        let tint = tint_of(animated);
        if applied.0 == tint {
            continue;
        }
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color = Color::LinearRgba(tint);
            applied.0 = tint;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimValues;

    #[test]
    fn identical_shapes_share_a_key() {
        let a = VisualShape::Sphere {
            radius: 0.2,
            sectors: 32,
            stacks: 16,
        };
        let b = VisualShape::Sphere {
            radius: 0.2,
            sectors: 32,
            stacks: 16,
        };
        let c = VisualShape::Bar {
            size: Vec3::new(0.1, 0.01, 0.1),
        };
        assert_eq!(MeshKey::from(a), MeshKey::from(b));
        assert_ne!(MeshKey::from(a), MeshKey::from(c));
    }

    #[test]
    fn tint_carries_clamped_opacity() {
        let mut values = AnimValues::default().with_color(Color::srgb(0.0, 0.0, 1.0));
        values.opacity = 1.3;
        let tint = tint_of(&Animated::new(values));
        assert_eq!(tint.alpha, 1.0);
        assert_eq!(tint.blue, 1.0);
        let tint = tint_of(&Animated::new(values.with_opacity(0.25)));
        assert_eq!(tint.alpha, 0.25);
    }
}
