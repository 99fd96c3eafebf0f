pub mod animation;
pub mod animators;
pub mod app;
pub mod core;
pub mod debug;
pub mod rendering;
pub mod scene;
pub mod sequence;

// Curated re-exports
pub use crate::app::game::{LogoSpherePlugin, SequenceCorePlugin};
pub use crate::core::config::{config::SceneConfig, config::WindowConfig};
pub use crate::sequence::{LapCounter, Phase, PhaseChanged, PhaseStore};
