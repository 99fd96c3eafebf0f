//! Minimal tween runtime: every animated element owns one [`Animated`]
//! component holding its current values and at most one in-flight tween.

use bevy::color::Mix;
use bevy::prelude::*;
use std::time::Duration;

use super::easing::Easing;
use crate::core::components::FixedRotation;
use crate::core::config::TweenTiming;
use crate::sequence::phase::Phase;

/// Smallest scale written to a `Transform`; zero scale breaks culling bounds.
const MIN_SCALE: f32 = 1e-4;

/// Values an element animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimValues {
    pub translation: Vec3,
    pub scale: Vec3,
    /// Angle about the local y axis, unbounded so multi-lap targets keep their direction.
    pub rotation_y: f32,
    pub opacity: f32,
    pub color: LinearRgba,
}

impl Default for AnimValues {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation_y: 0.0,
            opacity: 1.0,
            color: LinearRgba::WHITE,
        }
    }
}

impl AnimValues {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color.to_linear();
        self
    }

    fn interpolate(&self, target: &TweenTarget, t: f32) -> Self {
        Self {
            translation: target
                .translation
                .map_or(self.translation, |to| self.translation.lerp(to, t)),
            scale: target.scale.map_or(self.scale, |to| self.scale.lerp(to, t)),
            rotation_y: target
                .rotation_y
                .map_or(self.rotation_y, |to| self.rotation_y + (to - self.rotation_y) * t),
            opacity: target
                .opacity
                .map_or(self.opacity, |to| self.opacity + (to - self.opacity) * t),
            color: target.color.map_or(self.color, |to| self.color.mix(&to, t)),
        }
    }
}

/// Partial target; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TweenTarget {
    pub translation: Option<Vec3>,
    pub scale: Option<Vec3>,
    pub rotation_y: Option<f32>,
    pub opacity: Option<f32>,
    pub color: Option<LinearRgba>,
}

impl TweenTarget {
    pub fn translation(mut self, v: Vec3) -> Self {
        self.translation = Some(v);
        self
    }
    pub fn scale(mut self, v: Vec3) -> Self {
        self.scale = Some(v);
        self
    }
    pub fn uniform_scale(self, s: f32) -> Self {
        self.scale(Vec3::splat(s))
    }
    pub fn rotation_y(mut self, angle: f32) -> Self {
        self.rotation_y = Some(angle);
        self
    }
    pub fn opacity(mut self, o: f32) -> Self {
        self.opacity = Some(o);
        self
    }
    pub fn color(mut self, c: Color) -> Self {
        self.color = Some(c.to_linear());
        self
    }
}

/// One tween request: where to go, how, and which phase (if any) its completion counts for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenRequest {
    pub target: TweenTarget,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
    pub report: Option<Phase>,
}

impl TweenRequest {
    pub fn new(target: TweenTarget, timing: TweenTiming) -> Self {
        Self {
            target,
            duration: timing.duration(),
            delay: timing.delay(),
            easing: timing.easing,
            report: None,
        }
    }

    pub fn reporting(mut self, phase: Phase) -> Self {
        self.report = Some(phase);
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveTween {
    request: TweenRequest,
    /// Captured when the delay runs out.
    from: Option<AnimValues>,
    delay_left: Duration,
    elapsed: Duration,
}

/// Result of a tween reaching its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenOutcome {
    pub report: Option<Phase>,
}

#[derive(Component, Debug, Clone)]
pub struct Animated {
    values: AnimValues,
    tween: Option<ActiveTween>,
}

impl Animated {
    pub fn new(values: AnimValues) -> Self {
        Self {
            values,
            tween: None,
        }
    }

    pub fn values(&self) -> &AnimValues {
        &self.values
    }

    /// Direct access for procedural motion; callers skip elements that are tweening.
    pub fn values_mut(&mut self) -> &mut AnimValues {
        &mut self.values
    }

    pub fn is_tweening(&self) -> bool {
        self.tween.is_some()
    }

    /// Start a tween from the current values, replacing any in-flight one.
    pub fn start(&mut self, request: TweenRequest) {
        self.tween = Some(ActiveTween {
            request,
            from: None,
            delay_left: request.delay,
            elapsed: Duration::ZERO,
        });
    }

    /// Step the active tween by `dt`; returns the outcome on the frame it resolves.
    pub fn advance(&mut self, dt: Duration) -> Option<TweenOutcome> {
        let tween = self.tween.as_mut()?;
        let mut dt = dt;
        if !tween.delay_left.is_zero() {
            if dt < tween.delay_left {
                tween.delay_left -= dt;
                return None;
            }
            dt -= tween.delay_left;
            tween.delay_left = Duration::ZERO;
        }
        let from = *tween.from.get_or_insert(self.values);
        tween.elapsed += dt;
        let duration = tween.request.duration;
        let progress = if duration.is_zero() {
            1.0
        } else {
            (tween.elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
        };
        let eased = tween.request.easing.apply(progress);
        self.values = from.interpolate(&tween.request.target, eased);
        if progress < 1.0 {
            return None;
        }
        let report = tween.request.report;
        self.tween = None;
        Some(TweenOutcome { report })
    }
}

/// A reporting tween reached its target.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenResolved {
    pub entity: Entity,
    pub phase: Phase,
}

pub fn advance_tweens(
    time: Res<Time>,
    mut q: Query<(Entity, &mut Animated)>,
    mut resolved: EventWriter<TweenResolved>,
) {
    let dt = time.delta();
    for (entity, mut animated) in &mut q {
        if !animated.is_tweening() {
            continue;
        }
        if let Some(TweenOutcome {
            report: Some(phase),
        }) = animated.advance(dt)
        {
            resolved.write(TweenResolved { entity, phase });
        }
    }
}

pub fn sync_transforms(
    mut q: Query<(&Animated, &mut Transform, Option<&FixedRotation>), Changed<Animated>>,
) {
    for (animated, mut tf, fixed) in &mut q {
        let v = animated.values();
        tf.translation = v.translation;
        tf.scale = v.scale.max(Vec3::splat(MIN_SCALE));
        let spin = Quat::from_rotation_y(v.rotation_y);
        tf.rotation = match fixed {
            Some(base) => base.0 * spin,
            None => spin,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(ms: u64, delay: u64) -> TweenTiming {
        TweenTiming::new(ms, Easing::Linear).delayed(delay)
    }

    #[test]
    fn linear_tween_reaches_target_and_reports() {
        let mut a = Animated::new(AnimValues::at(Vec3::ZERO));
        a.start(
            TweenRequest::new(
                TweenTarget::default().translation(Vec3::new(10.0, 0.0, 0.0)),
                timing(100, 0),
            )
            .reporting(Phase::Combine),
        );
        assert!(a.advance(Duration::from_millis(50)).is_none());
        assert!((a.values().translation.x - 5.0).abs() < 1e-4);
        let outcome = a.advance(Duration::from_millis(60)).expect("resolved");
        assert_eq!(outcome.report, Some(Phase::Combine));
        assert_eq!(a.values().translation, Vec3::new(10.0, 0.0, 0.0));
        assert!(!a.is_tweening());
    }

    #[test]
    fn delay_holds_values_and_captures_start_late() {
        let mut a = Animated::new(AnimValues::default().with_opacity(0.0));
        a.start(TweenRequest::new(TweenTarget::default().opacity(1.0), timing(100, 200)));
        assert!(a.advance(Duration::from_millis(150)).is_none());
        assert_eq!(a.values().opacity, 0.0);
        // procedural change during the delay is the tween's starting point
        a.values_mut().opacity = 0.5;
        assert!(a.advance(Duration::from_millis(100)).is_none());
        assert!((a.values().opacity - 0.75).abs() < 1e-4);
        assert!(a.advance(Duration::from_millis(100)).is_some());
        assert_eq!(a.values().opacity, 1.0);
    }

    #[test]
    fn new_request_overrides_in_flight_tween() {
        let mut a = Animated::new(AnimValues::default());
        a.start(TweenRequest::new(TweenTarget::default().uniform_scale(3.0), timing(100, 0)));
        a.advance(Duration::from_millis(50));
        a.start(TweenRequest::new(TweenTarget::default().uniform_scale(0.0), timing(100, 0)));
        a.advance(Duration::from_millis(100));
        assert_eq!(a.values().scale, Vec3::ZERO);
    }

    #[test]
    fn untouched_fields_keep_values() {
        let start = AnimValues::at(Vec3::ONE)
            .with_scale(2.0)
            .with_color(Color::srgb(0.0, 0.0, 1.0));
        let mut a = Animated::new(start);
        a.start(TweenRequest::new(TweenTarget::default().rotation_y(-3.0), timing(10, 0)));
        a.advance(Duration::from_millis(10));
        assert_eq!(a.values().translation, Vec3::ONE);
        assert_eq!(a.values().scale, Vec3::splat(2.0));
        assert_eq!(a.values().color, start.color);
        assert_eq!(a.values().rotation_y, -3.0);
    }

    #[test]
    fn zero_duration_resolves_immediately() {
        let mut a = Animated::new(AnimValues::default());
        a.start(TweenRequest::new(TweenTarget::default().opacity(0.0), timing(0, 0)));
        assert!(a.advance(Duration::ZERO).is_some());
        assert_eq!(a.values().opacity, 0.0);
    }

    #[test]
    fn advance_system_emits_reports_only() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
                Duration::from_millis(20),
            ))
            .add_event::<TweenResolved>()
            .add_systems(Update, advance_tweens);
        let mut quiet = Animated::new(AnimValues::default());
        quiet.start(TweenRequest::new(TweenTarget::default().opacity(0.0), timing(20, 0)));
        let mut loud = Animated::new(AnimValues::default());
        loud.start(
            TweenRequest::new(TweenTarget::default().opacity(0.0), timing(20, 0))
                .reporting(Phase::Rotate),
        );
        app.world_mut().spawn(quiet);
        let loud_id = app.world_mut().spawn(loud).id();
        app.update();
        app.update();
        let events = app.world().resource::<Events<TweenResolved>>();
        let mut cursor = events.get_cursor();
        let seen: Vec<_> = cursor.read(events).copied().collect();
        assert_eq!(
            seen,
            vec![TweenResolved {
                entity: loud_id,
                phase: Phase::Rotate
            }]
        );
    }
}
