//! Validated, shareable handles to the render settings.
//!
//! [`ValidatedConfig`] is what consumers hold. [`SharedConfig`] swaps in new
//! snapshots for live edits.

use crate::config::{CameraSettings, LightSettings, MaterialSettings, MouseSettings, RenderConfig};
use crate::validate::ConfigError;
use parking_lot::RwLock;
use std::sync::Arc;

/// A [`RenderConfig`] that passed every rule.
///
/// Only [`RenderConfig::validated`] builds one. It is immutable and cheap to
/// clone, so the render, input and geometry threads can each hold a handle
/// without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig(Arc<RenderConfig>);

impl RenderConfig {
    /// Validate and freeze. Soft warnings are logged, not returned.
    pub fn validated(self) -> Result<ValidatedConfig, ConfigError> {
        self.validate()?;
        for warning in self.warnings() {
            tracing::warn!(%warning, "render config warning");
        }
        Ok(ValidatedConfig(Arc::new(self)))
    }
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        Self(Arc::new(RenderConfig::default()))
    }
}

impl ValidatedConfig {
    pub fn framebuffer_side(&self) -> u32 {
        self.0.framebuffer_side
    }

    pub fn background_color(&self) -> [f32; 4] {
        self.0.background_color
    }

    pub fn light(&self) -> &LightSettings {
        &self.0.light
    }

    pub fn material(&self) -> &MaterialSettings {
        &self.0.material
    }

    /// Always a valid index into the mesh table.
    pub fn tessellation_level(&self) -> usize {
        self.0.tessellation_level as usize
    }

    pub fn mouse(&self) -> &MouseSettings {
        &self.0.mouse
    }

    pub fn camera(&self) -> &CameraSettings {
        &self.0.camera
    }

    /// The underlying values, e.g. for serialization.
    pub fn as_config(&self) -> &RenderConfig {
        &self.0
    }
}

/// Copy-on-write holder for live reconfiguration.
///
/// Writers publish a whole new snapshot; readers grab the current one and
/// never see a half-applied edit. The generation counter lets consumers that
/// cache derived state notice a newer snapshot.
#[derive(Debug)]
pub struct SharedConfig {
    current: RwLock<(u64, ValidatedConfig)>,
}

impl SharedConfig {
    pub fn new(initial: ValidatedConfig) -> Self {
        Self {
            current: RwLock::new((0, initial)),
        }
    }

    /// Generation and snapshot read under one guard, so the pair always
    /// belongs to the same publish.
    pub fn current(&self) -> (u64, ValidatedConfig) {
        let guard = self.current.read();
        (guard.0, guard.1.clone())
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> ValidatedConfig {
        self.current.read().1.clone()
    }

    /// Bumped on every successful publish.
    pub fn generation(&self) -> u64 {
        self.current.read().0
    }

    /// Validate `candidate` and swap it in. On failure the current snapshot
    /// stays in place.
    pub fn publish(&self, candidate: RenderConfig) -> Result<ValidatedConfig, ConfigError> {
        let next = candidate.validated()?;
        let mut guard = self.current.write();
        guard.0 += 1;
        guard.1 = next.clone();
        tracing::info!(generation = guard.0, "published render config");
        Ok(next)
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(ValidatedConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_TESSELLATION_LEVELS;
    use std::thread;

    #[test]
    fn validated_exposes_fields() {
        let v = RenderConfig::default().validated().unwrap();
        assert_eq!(v.framebuffer_side(), 2048);
        assert_eq!(v.tessellation_level(), 3);
        assert_eq!(v.camera().far_plane, 1000.0);
        assert_eq!(v.as_config(), &RenderConfig::default());
        assert_eq!(v, ValidatedConfig::default());
    }

    #[test]
    fn invalid_config_never_validates() {
        let mut c = RenderConfig::default();
        c.camera.near_plane = 0.0;
        assert!(c.validated().is_err());
    }

    #[test]
    fn publish_swaps_snapshot() {
        let shared = SharedConfig::default();
        let before = shared.snapshot();

        let mut next = RenderConfig::default();
        next.tessellation_level = 1;
        shared.publish(next).unwrap();

        assert_eq!(shared.generation(), 1);
        assert_eq!(shared.snapshot().tessellation_level(), 1);
        // Old handles keep their values.
        assert_eq!(before.tessellation_level(), 3);
    }

    #[test]
    fn current_pairs_generation_with_its_snapshot() {
        let shared = Arc::new(SharedConfig::default());
        let writer = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for level in 1..=40 {
                    let mut c = RenderConfig::default();
                    c.tessellation_level = level % MAX_TESSELLATION_LEVELS;
                    c.framebuffer_side = 64 + level as u32;
                    shared.publish(c).unwrap();
                }
            })
        };
        for _ in 0..500 {
            let (generation, snap) = shared.current();
            // Publish n writes side 64 + n; the default predates publish 1.
            let expected = if generation == 0 { 2048 } else { 64 + generation as u32 };
            assert_eq!(snap.framebuffer_side(), expected);
        }
        writer.join().unwrap();
        assert_eq!(shared.current().0, 40);
    }

    #[test]
    fn rejected_publish_keeps_current() {
        let shared = SharedConfig::default();
        let mut bad = RenderConfig::default();
        bad.mouse.zoom_sensitivity = 0.0;

        let err = shared.publish(bad).unwrap_err();
        assert!(err.mentions("mouse.zoom_sensitivity"));
        assert_eq!(shared.generation(), 0);
        assert_eq!(shared.snapshot(), ValidatedConfig::default());
    }

    #[test]
    fn concurrent_readers_see_whole_snapshots() {
        let shared = Arc::new(SharedConfig::default());
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let snap = shared.snapshot();
                        // Both fields change together in every publish below.
                        let level = snap.tessellation_level();
                        let side = snap.framebuffer_side();
                        assert_eq!(side, 256 << level);
                    }
                })
            })
            .collect();

        for level in 0..4 {
            let mut c = RenderConfig::default();
            c.tessellation_level = level;
            c.framebuffer_side = 256 << level;
            shared.publish(c).unwrap();
        }
        for r in readers {
            r.join().unwrap();
        }
    }
}
