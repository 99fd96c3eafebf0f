use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::animation::easing::Easing;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse RON {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Logo Sphere".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub distance: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub fog_color: String,
    pub fog_start: f32,
    pub fog_end: f32,
    pub ambient_brightness: f32,
    pub point_light_position: [f32; 3],
    pub point_light_intensity: f32,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 40.0,
            fov_degrees: 50.0,
            fog_color: "#202025".into(),
            fog_start: 10.0,
            fog_end: 80.0,
            ambient_brightness: 400.0,
            point_light_position: [-5.0, 10.0, 30.0],
            point_light_intensity: 4_000_000.0,
        }
    }
}

/// Shared palette as hex strings (`#RRGGBB`).
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ColorsConfig {
    pub ball: String,
    pub accent: String,
    pub line: String,
}
impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            ball: "#FFFFFF".into(),
            accent: "#0067FF".into(),
            line: "#FFFFFF".into(),
        }
    }
}
impl ColorsConfig {
    pub fn ball_color(&self) -> Color {
        parse_hex(&self.ball).unwrap_or(Color::WHITE)
    }
    pub fn accent_color(&self) -> Color {
        parse_hex(&self.accent).unwrap_or(Color::srgb_u8(0x00, 0x67, 0xFF))
    }
    pub fn line_color(&self) -> Color {
        parse_hex(&self.line).unwrap_or(Color::WHITE)
    }
}

pub fn parse_hex(hex: &str) -> Option<Color> {
    Srgba::hex(hex).ok().map(Color::from)
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SphereConfig {
    /// Grid resolution; the sphere holds `count * count` points.
    pub count: usize,
    pub radius: f32,
    pub point_radius: f32,
    /// Per-point scale while scattered.
    pub scale_range: SpawnRange<f32>,
    /// Max float spin in radians per second (sum of two uniform halves, random sign).
    pub float_speed: f32,
}
impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            count: 18,
            radius: 13.0,
            point_radius: 0.2,
            scale_range: SpawnRange { min: 0.5, max: 1.5 },
            float_speed: 1.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OrbitRingConfig {
    pub radius: f32,
    pub count: usize,
    pub z: f32,
    pub speed_offset: f32,
    /// Max absolute offset applied to x and y of each base position.
    pub jitter: f32,
    pub dot_radius: f32,
}
impl Default for OrbitRingConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            count: 5,
            z: 0.0,
            speed_offset: 7.0,
            jitter: 1.0,
            dot_radius: 0.2,
        }
    }
}

fn default_orbits() -> Vec<OrbitRingConfig> {
    vec![
        OrbitRingConfig {
            radius: 7.0,
            count: 20,
            z: -5.0,
            ..Default::default()
        },
        OrbitRingConfig {
            radius: 2.0,
            count: 10,
            z: 5.0,
            ..Default::default()
        },
    ]
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CenterDotConfig {
    pub radius: f32,
    pub z: f32,
}
impl Default for CenterDotConfig {
    fn default() -> Self {
        Self { radius: 1.0, z: 5.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogoConfig {
    pub base_radius: f32,
    /// Multiplier applied to the glyph layout coordinates.
    pub position_multiple: f32,
    pub z: f32,
    /// Unscaled connector box (x, y, z); lines grow along y.
    pub line_box: [f32; 3],
    pub first_line_length: f32,
    pub second_line_length: f32,
    /// Scale of a logo dot while collapsed at the origin.
    pub collapsed_scale: f32,
}
impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            base_radius: 0.25,
            position_multiple: 3.5,
            z: 4.0,
            line_box: [0.1, 0.01, 0.1],
            first_line_length: 700.0,
            second_line_length: 600.0,
            collapsed_scale: 0.1,
        }
    }
}

/// Duration, delay and easing of one tween request.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TweenTiming {
    pub duration_ms: u64,
    pub delay_ms: u64,
    pub easing: Easing,
}
impl Default for TweenTiming {
    fn default() -> Self {
        Self {
            duration_ms: 500,
            delay_ms: 0,
            easing: Easing::Linear,
        }
    }
}
impl TweenTiming {
    pub const fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            easing,
        }
    }
    pub const fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
    /// Delay plus duration.
    pub fn span(&self) -> Duration {
        self.delay() + self.duration()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Idle time in the scatter layout before points converge.
    pub scatter_delay_ms: u64,
    pub point_combine: TweenTiming,
    pub point_contract: TweenTiming,
    pub point_reset: TweenTiming,
    pub sphere_rotate: TweenTiming,
    pub orbit_collapse: TweenTiming,
    pub orbit_reset: TweenTiming,
    pub center_grow: TweenTiming,
    pub center_contract: TweenTiming,
    pub center_vanish: TweenTiming,
    pub center_reset: TweenTiming,
    pub center_hide: TweenTiming,
    pub logo_assemble: TweenTiming,
    pub logo_reset: TweenTiming,
    pub line_first_grow: TweenTiming,
    pub line_second_grow: TweenTiming,
    pub line_second_reset: TweenTiming,
    pub line_first_reset: TweenTiming,
}
impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scatter_delay_ms: 3000,
            point_combine: TweenTiming::new(500, Easing::ElasticIn),
            point_contract: TweenTiming::new(600, Easing::CubicIn),
            point_reset: TweenTiming::new(500, Easing::SineIn).delayed(200),
            sphere_rotate: TweenTiming::new(3000, Easing::CubicOut),
            orbit_collapse: TweenTiming::new(600, Easing::Linear),
            orbit_reset: TweenTiming::new(600, Easing::Linear),
            center_grow: TweenTiming::new(500, Easing::Linear),
            center_contract: TweenTiming::new(500, Easing::CubicIn),
            center_vanish: TweenTiming::new(1, Easing::CubicIn),
            center_reset: TweenTiming::new(500, Easing::Linear),
            center_hide: TweenTiming::new(500, Easing::Linear),
            logo_assemble: TweenTiming::new(1000, Easing::BackOut),
            logo_reset: TweenTiming::new(1000, Easing::BackOut),
            line_first_grow: TweenTiming::new(400, Easing::Linear).delayed(500),
            line_second_grow: TweenTiming::new(400, Easing::Linear).delayed(1000),
            line_second_reset: TweenTiming::new(400, Easing::Linear).delayed(1000),
            line_first_reset: TweenTiming::new(400, Easing::Linear).delayed(1500),
        }
    }
}
impl TimingConfig {
    pub fn scatter_delay(&self) -> Duration {
        Duration::from_millis(self.scatter_delay_ms)
    }

    fn all(&self) -> [(&'static str, &TweenTiming); 17] {
        [
            ("point_combine", &self.point_combine),
            ("point_contract", &self.point_contract),
            ("point_reset", &self.point_reset),
            ("sphere_rotate", &self.sphere_rotate),
            ("orbit_collapse", &self.orbit_collapse),
            ("orbit_reset", &self.orbit_reset),
            ("center_grow", &self.center_grow),
            ("center_contract", &self.center_contract),
            ("center_vanish", &self.center_vanish),
            ("center_reset", &self.center_reset),
            ("center_hide", &self.center_hide),
            ("logo_assemble", &self.logo_assemble),
            ("logo_reset", &self.logo_reset),
            ("line_first_grow", &self.line_first_grow),
            ("line_second_grow", &self.line_second_grow),
            ("line_second_reset", &self.line_second_reset),
            ("line_first_reset", &self.line_first_reset),
        ]
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SequencerConfig {
    /// Force-advance a phase whose completions have not arrived after
    /// `watchdog_factor` times its expected duration. 0.0 disables.
    pub watchdog_factor: f32,
}
impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            watchdog_factor: 2.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub colors: ColorsConfig,
    pub sphere: SphereConfig,
    #[serde(default = "default_orbits")]
    pub orbits: Vec<OrbitRingConfig>,
    pub center_dot: CenterDotConfig,
    pub logo: LogoConfig,
    pub timing: TimingConfig,
    pub sequencer: SequencerConfig,
    /// Fixed RNG seed for the randomized layouts; `None` draws from entropy.
    pub layout_seed: Option<u64>,
}
impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            camera: Default::default(),
            colors: Default::default(),
            sphere: Default::default(),
            orbits: default_orbits(),
            center_dot: Default::default(),
            logo: Default::default(),
            timing: Default::default(),
            sequencer: Default::default(),
            layout_seed: None,
        }
    }
}

impl SceneConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load multiple config layers, later files overriding earlier ones (deep merge on maps).
    /// Missing files are skipped; returns (config, list_of_layer_paths_used, list_of_errors).
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();

        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }

        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }

        match merged {
            Some(val) => match val.into_rust::<SceneConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (SceneConfig::default(), used, errors)
                }
            },
            None => (SceneConfig::default(), used, errors),
        }
    }

    /// Validate the configuration returning a list of human‑readable warning strings.
    /// These represent suspicious values, not hard errors; log each with `warn!`.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.camera.fov_degrees <= 0.0 || self.camera.fov_degrees >= 180.0 {
            w.push(format!(
                "camera.fov_degrees {} outside 0..180",
                self.camera.fov_degrees
            ));
        }
        if self.camera.fog_start > self.camera.fog_end {
            w.push(format!(
                "camera.fog_start ({}) greater than fog_end ({})",
                self.camera.fog_start, self.camera.fog_end
            ));
        }
        for (label, hex) in [
            ("camera.fog_color", &self.camera.fog_color),
            ("colors.ball", &self.colors.ball),
            ("colors.accent", &self.colors.accent),
            ("colors.line", &self.colors.line),
        ] {
            if parse_hex(hex).is_none() {
                w.push(format!("{label} '{hex}' is not a valid hex color"));
            }
        }
        if self.sphere.count == 0 {
            w.push("sphere.count is 0; no points will spawn".into());
        }
        if self.sphere.count > 100 {
            w.push(format!(
                "sphere.count {} very high ({} points); performance may suffer",
                self.sphere.count,
                self.sphere.count * self.sphere.count
            ));
        }
        if self.sphere.radius <= 0.0 {
            w.push("sphere.radius must be > 0".into());
        }
        if self.sphere.point_radius <= 0.0 {
            w.push("sphere.point_radius must be > 0".into());
        }
        let sr = &self.sphere.scale_range;
        if sr.min > sr.max {
            w.push(format!(
                "sphere.scale_range min ({}) greater than max ({})",
                sr.min, sr.max
            ));
        }
        if sr.min <= 0.0 {
            w.push("sphere.scale_range.min must be > 0".into());
        }
        for (i, ring) in self.orbits.iter().enumerate() {
            if ring.count == 0 {
                w.push(format!("orbits[{i}].count is 0; ring is empty"));
            }
            if ring.radius <= 0.0 {
                w.push(format!("orbits[{i}].radius must be > 0"));
            }
            if ring.jitter < 0.0 {
                w.push(format!("orbits[{i}].jitter negative"));
            }
        }
        if self.center_dot.radius <= 0.0 {
            w.push("center_dot.radius must be > 0".into());
        }
        if self.logo.base_radius <= 0.0 {
            w.push("logo.base_radius must be > 0".into());
        }
        if self.logo.first_line_length <= 0.0 || self.logo.second_line_length <= 0.0 {
            w.push("logo line lengths must be > 0".into());
        }
        if self.timing.scatter_delay_ms == 0 {
            w.push("timing.scatter_delay_ms is 0; points converge immediately".into());
        }
        for (label, t) in self.timing.all() {
            if t.duration_ms == 0 {
                w.push(format!("timing.{label}.duration_ms is 0"));
            }
        }
        if self.sequencer.watchdog_factor < 0.0 {
            w.push(format!(
                "sequencer.watchdog_factor {} negative -> watchdog disabled",
                self.sequencer.watchdog_factor
            ));
        } else if self.sequencer.watchdog_factor > 0.0 && self.sequencer.watchdog_factor < 1.0 {
            w.push(format!(
                "sequencer.watchdog_factor {} < 1 fires before tweens can finish",
                self.sequencer.watchdog_factor
            ));
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate_cleanly() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.orbits.len(), 2);
        assert_eq!(cfg.sphere.count, 18);
        assert_eq!(cfg.timing.point_combine.easing, Easing::ElasticIn);
        let warnings = cfg.validate();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn parse_sample_config() {
        let sample = r##"(
            window: (width: 800.0, height: 600.0, title: "Test"),
            colors: (ball: "#EEEEEE", accent: "#112233", line: "#FFFFFF"),
            sphere: (count: 6, radius: 4.0),
            orbits: [
                (radius: 3.0, count: 4, z: 1.0),
            ],
            timing: (
                scatter_delay_ms: 1000,
                point_combine: (duration_ms: 250, easing: "CubicOut"),
                line_first_reset: (duration_ms: 100, delay_ms: 50),
            ),
            sequencer: (watchdog_factor: 3.0),
            layout_seed: Some(7),
        )"##;
        let mut file = tempfile::NamedTempFile::new().expect("tmp file");
        file.write_all(sample.as_bytes()).unwrap();
        let cfg = SceneConfig::load_from_file(file.path()).expect("parse config");
        assert_eq!(cfg.window.width, 800.0);
        assert_eq!(cfg.sphere.count, 6);
        assert_eq!(cfg.orbits.len(), 1);
        assert_eq!(cfg.orbits[0].count, 4);
        assert_eq!(cfg.timing.scatter_delay_ms, 1000);
        assert_eq!(cfg.timing.point_combine.duration_ms, 250);
        assert_eq!(cfg.timing.point_combine.easing, Easing::CubicOut);
        assert_eq!(cfg.timing.line_first_reset.delay_ms, 50);
        assert_eq!(cfg.layout_seed, Some(7));
        // untouched sections keep defaults
        assert_eq!(cfg.logo, LogoConfig::default());
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn omitted_orbits_use_default_rings() {
        let sample = r"(sphere: (count: 3))";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample.as_bytes()).unwrap();
        let cfg = SceneConfig::load_from_file(file.path()).expect("parse config");
        assert_eq!(cfg.orbits, default_orbits());
    }

    #[test]
    fn validate_detects_warnings() {
        let mut bad = SceneConfig::default();
        bad.window.width = 0.0;
        bad.colors.accent = "not-a-color".into();
        bad.sphere.count = 0;
        bad.sphere.radius = -1.0;
        bad.sphere.scale_range = SpawnRange { min: 2.0, max: 1.0 };
        bad.orbits[0].count = 0;
        bad.timing.sphere_rotate.duration_ms = 0;
        bad.sequencer.watchdog_factor = -1.0;
        let joined = bad.validate().join(" | ");
        assert!(joined.contains("window dimensions must be > 0"));
        assert!(joined.contains("colors.accent"));
        assert!(joined.contains("sphere.count is 0"));
        assert!(joined.contains("sphere.radius must be > 0"));
        assert!(joined.contains("sphere.scale_range min (2"));
        assert!(joined.contains("orbits[0].count is 0"));
        assert!(joined.contains("timing.sphere_rotate.duration_ms is 0"));
        assert!(joined.contains("watchdog disabled"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = SceneConfig::load_from_file("this/file/does/not/exist.ron");
        assert!(matches!(err, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"(window: (width: ").unwrap();
        let err = SceneConfig::load_from_file(file.path());
        assert!(matches!(err, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn layered_merge_overrides() {
        let base = r"(
            window: (width: 900.0),
            sphere: (count: 10, radius: 8.0),
        )";
        let override_one = r#"(
            window: (title: "Custom Title"),
            sphere: (radius: 9.5),
            timing: (point_combine: (easing: "BackOut")),
        )"#;
        let mut f1 = tempfile::NamedTempFile::new().unwrap();
        let mut f2 = tempfile::NamedTempFile::new().unwrap();
        f1.write_all(base.as_bytes()).unwrap();
        f2.write_all(override_one.as_bytes()).unwrap();
        let (cfg, used, errors) = SceneConfig::load_layered([f1.path(), f2.path()]);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.window.width, 900.0);
        assert_eq!(cfg.window.title, "Custom Title");
        assert_eq!(cfg.sphere.count, 10); // from base
        assert_eq!(cfg.sphere.radius, 9.5); // overridden
        assert_eq!(cfg.window.height, WindowConfig::default().height);
        assert_eq!(cfg.timing.point_combine.easing, Easing::BackOut);
        assert_eq!(cfg.timing.point_combine.duration_ms, 500);
    }

    #[test]
    fn layered_reports_missing_layers() {
        let (cfg, used, errors) = SceneConfig::load_layered(["missing/a.ron", "missing/b.ron"]);
        assert!(used.is_empty());
        assert_eq!(errors.len(), 2);
        assert_eq!(cfg, SceneConfig::default());
    }

    #[test]
    fn timing_span_includes_delay() {
        let t = TimingConfig::default();
        assert_eq!(t.line_first_reset.span(), Duration::from_millis(1900));
        assert_eq!(t.point_reset.span(), Duration::from_millis(700));
        assert_eq!(t.scatter_delay(), Duration::from_secs(3));
    }

    #[test]
    fn palette_parses_hex() {
        let colors = ColorsConfig::default();
        let accent = colors.accent_color().to_srgba();
        assert!((accent.blue - 1.0).abs() < 1e-6);
        assert!(accent.red.abs() < 1e-6);
        assert!(parse_hex("#12345").is_none());
    }
}
