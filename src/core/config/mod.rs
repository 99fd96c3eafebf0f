pub mod config;

pub use config::{
    CameraConfig, CenterDotConfig, ColorsConfig, ConfigError, LogoConfig, OrbitRingConfig,
    SceneConfig, SequencerConfig, SphereConfig, SpawnRange, TimingConfig, TweenTiming,
    WindowConfig,
};
