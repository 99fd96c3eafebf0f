//! Pure layout math for the scene: deterministic targets plus the randomized
//! scatter / ring placement, all driven by a caller-supplied RNG.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::{PI, TAU};

use crate::core::components::{LineStage, LogoDot, OrbitDot, ScatterPoint};
use crate::core::config::{LogoConfig, OrbitRingConfig, SphereConfig};

/// Cartesian point for spherical `(radius, phi, theta)`; phi from +y, theta about y from +z.
pub fn from_spherical(radius: f32, phi: f32, theta: f32) -> Vec3 {
    let sin_phi_radius = phi.sin() * radius;
    Vec3::new(
        sin_phi_radius * theta.sin(),
        phi.cos() * radius,
        sin_phi_radius * theta.cos(),
    )
}

/// Latitude/longitude grid of `count * count` points; poles excluded.
pub fn sphere_grid(count: usize, radius: f32) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    let phi_span = PI / (count + 1) as f32;
    let theta_span = TAU / count as f32;
    (1..=count)
        .flat_map(|i| {
            (0..count).map(move |j| from_spherical(radius, phi_span * i as f32, theta_span * j as f32))
        })
        .collect()
}

/// Uniform point in a cube of side `3 * radius` centred on the origin.
pub fn scatter_position<R: Rng>(rng: &mut R, radius: f32) -> Vec3 {
    let extent = radius * 3.0;
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * extent,
        (rng.gen::<f32>() - 0.5) * extent,
        (rng.gen::<f32>() - 0.5) * extent,
    )
}

pub fn dot_sphere_layout<R: Rng>(cfg: &SphereConfig, rng: &mut R) -> Vec<ScatterPoint> {
    let scale_range = &cfg.scale_range;
    sphere_grid(cfg.count, cfg.radius)
        .into_iter()
        .map(|sphere| {
            let scale = if scale_range.min < scale_range.max {
                rng.gen_range(scale_range.min..scale_range.max)
            } else {
                scale_range.min
            };
            let magnitude = (rng.gen::<f32>() + rng.gen::<f32>()) * 0.5 * cfg.float_speed;
            let float_speed = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
            ScatterPoint {
                scatter: scatter_position(rng, cfg.radius),
                sphere,
                scale,
                float_speed,
            }
        })
        .collect()
}

/// Evenly spaced base angles for a ring of `count` dots.
pub fn ring_base_angles(count: usize) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let span = TAU / count as f32;
    (0..count).map(|i| i as f32 * span).collect()
}

pub fn orbit_ring_layout<R: Rng>(ring: &OrbitRingConfig, rng: &mut R) -> Vec<OrbitDot> {
    ring_base_angles(ring.count)
        .into_iter()
        .map(|theta| {
            let jitter = ring.jitter.max(0.0);
            let (dx, dy) = if jitter > 0.0 {
                (rng.gen_range(-jitter..jitter), rng.gen_range(-jitter..jitter))
            } else {
                (0.0, 0.0)
            };
            let clockwise = rng.gen_bool(0.5);
            let speed = (rng.gen::<f32>() * 0.1 + rng.gen::<f32>() * 0.1) * ring.speed_offset;
            OrbitDot {
                base: Vec3::new(
                    ring.radius * theta.cos() + dx,
                    ring.radius * theta.sin() + dy,
                    ring.z,
                ),
                speed: if clockwise { speed } else { -speed },
                angle: 0.0,
            }
        })
        .collect()
}

/// One glyph dot: (id, radius multiplier, accent colour, layout x, layout y).
pub struct GlyphDot {
    pub id: u8,
    pub radius_multiple: f32,
    pub accent: bool,
    pub x: f32,
    pub y: f32,
}

/// Flag-like glyph: one apex, two shoulders, four feet.
pub const LOGO_GLYPH: [GlyphDot; 7] = [
    GlyphDot { id: 1, radius_multiple: 5.0, accent: true, x: 0.0, y: 2.32 },
    GlyphDot { id: 2, radius_multiple: 4.0, accent: true, x: -1.78, y: 0.0 },
    GlyphDot { id: 3, radius_multiple: 4.0, accent: false, x: 1.78, y: 0.0 },
    GlyphDot { id: 4, radius_multiple: 3.0, accent: false, x: -2.86, y: -2.31 },
    GlyphDot { id: 5, radius_multiple: 3.0, accent: true, x: -0.69, y: -2.31 },
    GlyphDot { id: 6, radius_multiple: 3.0, accent: false, x: 0.69, y: -2.31 },
    GlyphDot { id: 7, radius_multiple: 3.0, accent: false, x: 2.86, y: -2.31 },
];

/// Connector pairs as indices into [`LOGO_GLYPH`].
pub const LOGO_LINKS: [(usize, usize, LineStage); 6] = [
    (0, 1, LineStage::First),
    (0, 2, LineStage::First),
    (1, 3, LineStage::Second),
    (1, 4, LineStage::Second),
    (2, 5, LineStage::Second),
    (2, 6, LineStage::Second),
];

pub fn logo_dots(cfg: &LogoConfig) -> Vec<LogoDot> {
    let origin = Vec3::new(0.0, 0.0, cfg.z);
    LOGO_GLYPH
        .iter()
        .map(|g| LogoDot {
            id: g.id,
            origin,
            target: Vec3::new(g.x * cfg.position_multiple, g.y * cfg.position_multiple, cfg.z),
            accent: g.accent,
        })
        .collect()
}

/// Midpoint (at `a.z`) and z rotation aligning a bar's y axis from `a` to `b`.
pub fn connector_placement(a: Vec3, b: Vec3) -> (Vec3, f32) {
    let mid = Vec3::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, a.z);
    let angle = -(b.x - a.x).atan2(b.y - a.y);
    (mid, angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn grid_has_count_squared_points_on_sphere() {
        for (count, radius) in [(18, 13.0), (5, 2.5), (1, 1.0)] {
            let pts = sphere_grid(count, radius);
            assert_eq!(pts.len(), count * count);
            for p in pts {
                assert!((p.length() - radius).abs() < 1e-3, "{p} not on r={radius}");
            }
        }
        assert!(sphere_grid(0, 3.0).is_empty());
    }

    #[test]
    fn grid_first_point_follows_spherical_convention() {
        let pts = sphere_grid(2, 1.0);
        // phi = pi/3, theta = 0 -> x = 0, y = cos(phi), z = sin(phi)
        let p = pts[0];
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 0.5).abs() < 1e-6);
        assert!((p.z - (PI / 3.0).sin()).abs() < 1e-6);
    }

    #[test]
    fn scatter_stays_inside_bounding_cube() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let p = scatter_position(&mut rng, 13.0);
            assert!(p.abs().max_element() <= 19.5);
        }
    }

    #[test]
    fn dot_sphere_layout_is_seed_deterministic() {
        let cfg = SphereConfig::default();
        let a = dot_sphere_layout(&cfg, &mut StdRng::seed_from_u64(9));
        let b = dot_sphere_layout(&cfg, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_eq!(a.len(), cfg.count * cfg.count);
        for p in &a {
            assert!(p.scale >= cfg.scale_range.min && p.scale < cfg.scale_range.max);
            assert!(p.float_speed.abs() <= cfg.float_speed);
        }
    }

    #[test]
    fn ring_angles_are_evenly_spaced() {
        for count in [1usize, 3, 10, 20] {
            let angles = ring_base_angles(count);
            assert_eq!(angles.len(), count);
            for pair in angles.windows(2) {
                assert!((pair[1] - pair[0] - TAU / count as f32).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn orbit_jitter_is_bounded() {
        let ring = OrbitRingConfig {
            radius: 7.0,
            count: 20,
            z: -5.0,
            ..Default::default()
        };
        let dots = orbit_ring_layout(&ring, &mut StdRng::seed_from_u64(3));
        for (dot, theta) in dots.iter().zip(ring_base_angles(ring.count)) {
            let ideal = Vec2::new(ring.radius * theta.cos(), ring.radius * theta.sin());
            let off = dot.base.truncate() - ideal;
            assert!(off.x.abs() <= ring.jitter && off.y.abs() <= ring.jitter);
            assert_eq!(dot.base.z, -5.0);
            assert!(dot.speed.abs() <= 0.2 * ring.speed_offset);
        }
    }

    #[test]
    fn logo_targets_scale_by_multiple() {
        let cfg = LogoConfig::default();
        let dots = logo_dots(&cfg);
        assert_eq!(dots.len(), 7);
        assert!((dots[0].target.y - 2.32 * 3.5).abs() < 1e-5);
        assert!(dots.iter().all(|d| d.origin == Vec3::new(0.0, 0.0, 4.0)));
        assert_eq!(dots.iter().filter(|d| d.accent).count(), 3);
    }

    #[test]
    fn connector_bar_points_from_a_to_b() {
        let a = Vec3::new(0.0, 8.0, 4.0);
        let b = Vec3::new(-6.0, 0.0, 4.0);
        let (mid, angle) = connector_placement(a, b);
        assert_eq!(mid, Vec3::new(-3.0, 4.0, 4.0));
        let dir = Quat::from_rotation_z(angle) * Vec3::Y;
        let expected = (b - a).normalize();
        assert!(dir.abs_diff_eq(expected, 1e-5) || dir.abs_diff_eq(-expected, 1e-5));
    }
}
