use bevy::prelude::*;

/// Point of the dot sphere (child of [`SphereGroup`]).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    /// Randomized start position; resets always return here.
    pub scatter: Vec3,
    /// Position on the sphere grid.
    pub sphere: Vec3,
    /// Scale while scattered.
    pub scale: f32,
    /// Signed spin about the group's y axis (rad/s) while floating.
    pub float_speed: f32,
}

/// Parent of all scatter points; carries the sphere rotation.
#[derive(Component, Debug, Default)]
pub struct SphereGroup;

/// Dot circling the z axis while the scene idles.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitDot {
    pub base: Vec3,
    /// Signed angular speed about z (rad/s).
    pub speed: f32,
    /// Accumulated orbit angle; restarts at 0 on reset.
    pub angle: f32,
}

/// The big dot that grows behind the sphere and seeds the logo.
#[derive(Component, Debug, Default)]
pub struct CenterDot;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct LogoDot {
    pub id: u8,
    pub origin: Vec3,
    pub target: Vec3,
    pub accent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStage {
    First,
    Second,
}

/// Connector bar between two logo dots (indices into the glyph table).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ConnectorLine {
    pub stage: LineStage,
    pub from: usize,
    pub to: usize,
}

/// Rotation applied underneath the animated y rotation.
#[derive(Component, Debug, Clone, Copy, Deref)]
pub struct FixedRotation(pub Quat);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualShape {
    Sphere { radius: f32, sectors: u32, stacks: u32 },
    Bar { size: Vec3 },
}

/// What the renderer should attach to an element.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub shape: VisualShape,
    /// Unlit elements render their flat color.
    pub lit: bool,
}
