//! Easing curves used by tween requests.
//!
//! Formulas follow the usual easings.net definitions so timings tuned against
//! other engines carry over unchanged.

use serde::Deserialize;
use std::f32::consts::PI;

const BACK_C1: f32 = 1.70158;
const BACK_C3: f32 = BACK_C1 + 1.0;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;

/// Easing curve applied to normalized tween progress.
///
/// Written as a quoted name in RON (`easing: "CubicOut"`) so the value
/// survives the layered loader's untyped merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Easing {
    #[default]
    Linear,
    SineIn,
    CubicIn,
    CubicOut,
    /// Overshoots below zero before snapping to the target.
    ElasticIn,
    /// Overshoots past the target and settles back.
    BackOut,
}

impl TryFrom<String> for Easing {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Ok(match name.as_str() {
            "Linear" => Easing::Linear,
            "SineIn" => Easing::SineIn,
            "CubicIn" => Easing::CubicIn,
            "CubicOut" => Easing::CubicOut,
            "ElasticIn" => Easing::ElasticIn,
            "BackOut" => Easing::BackOut,
            other => return Err(format!("unknown easing `{other}`")),
        })
    }
}

impl Easing {
    /// Map linear progress `t` (clamped to 0..=1) onto the curve.
    ///
    /// `ElasticIn` and `BackOut` leave the unit range mid-flight; endpoints are exact.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SineIn => 1.0 - ((t * PI) / 2.0).cos(),
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::ElasticIn => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
                }
            }
            Easing::BackOut => {
                let u = t - 1.0;
                1.0 + BACK_C3 * u.powi(3) + BACK_C1 * u.powi(2)
            }
        }
    }
}
