//! Render settings: the parameters every scene consumer reads.
//!
//! # Invariants
//! - Consumers only ever see a [`ValidatedConfig`]; a config that fails any
//!   rule never reaches the framebuffer, shading, tessellation or camera code.
//! - A published snapshot is never mutated. Live edits publish a new one.

pub mod config;
pub mod load;
pub mod shared;
pub mod validate;

pub use config::{
    CameraSettings, LightSettings, MAX_FRAMEBUFFER_SIDE, MAX_TESSELLATION_LEVELS, MaterialSettings, MouseSettings,
    RenderConfig,
};
pub use load::{ConfigFormat, LoadError, load_validated};
pub use shared::{SharedConfig, ValidatedConfig};
pub use validate::{ConfigError, ConfigWarning, MATERIAL_SUM_WARN_LIMIT, Rule, Violation};
