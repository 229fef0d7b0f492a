//! Rule checks for [`RenderConfig`].
//!
//! Every rule is evaluated on every call, so a rejected config reports all of
//! its problems at once. Nothing is clamped.

use crate::config::{MAX_FRAMEBUFFER_SIDE, MAX_TESSELLATION_LEVELS, RenderConfig};
use std::fmt;

/// Above this, `ambient + diffuse + specular` earns a warning. Phong
/// coefficients need not sum to 1, so this is never a hard failure.
pub const MATERIAL_SUM_WARN_LIMIT: f32 = 2.0;

/// The constraint a field broke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    NotFinite,
    MustBePositive,
    MustBeNonNegative,
    /// Value must not exceed `max`.
    AboveMaximum { max: u32 },
    /// Value must lie in [0,1].
    OutsideUnitRange,
    /// Level must lie in `0..max`.
    LevelOutOfRange { max: i32 },
    /// Field of view must lie in (0,180) degrees.
    FovOutOfRange,
    /// Far plane must lie beyond the near plane.
    NotBeyondNearPlane { near: f32 },
    /// Zoom limit would put the camera inside the near clip plane.
    InsideNearPlane { near: f32 },
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::NotFinite => write!(f, "must be finite"),
            Rule::MustBePositive => write!(f, "must be > 0"),
            Rule::MustBeNonNegative => write!(f, "must be >= 0"),
            Rule::AboveMaximum { max } => write!(f, "must be <= {max}"),
            Rule::OutsideUnitRange => write!(f, "must be within [0, 1]"),
            Rule::LevelOutOfRange { max } => write!(f, "must be within [0, {}]", max - 1),
            Rule::FovOutOfRange => write!(f, "must be within (0, 180) degrees"),
            Rule::NotBeyondNearPlane { near } => write!(f, "must be > near plane ({near})"),
            Rule::InsideNearPlane { near } => write!(f, "must be >= near plane ({near})"),
        }
    }
}

/// One broken rule: which field, which rule, and the offending value.
#[derive(Debug, Clone)]
pub struct Violation {
    pub field: String,
    pub rule: Rule,
    pub value: f32,
}

/// Values compare bitwise so a NaN violation equals itself.
impl PartialEq for Violation {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.rule == other.rule
            && self.value.to_bits() == other.value.to_bits()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} {}", self.field, self.value, self.rule)
    }
}

/// A config that failed validation, with every violation found.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid render configuration ({}): {}", count(.violations), join(.violations))]
pub struct ConfigError {
    pub violations: Vec<Violation>,
}

impl ConfigError {
    /// Whether any violation names `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn count(violations: &[Violation]) -> String {
    format!("{} violation(s)", violations.len())
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Soft findings. They are logged but do not block rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    FramebufferNotPowerOfTwo(u32),
    MaterialSumHigh { sum: f32 },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::FramebufferNotPowerOfTwo(side) => {
                write!(f, "framebuffer_side = {side} is not a power of two")
            }
            ConfigWarning::MaterialSumHigh { sum } => write!(
                f,
                "material coefficients sum to {sum}, above {MATERIAL_SUM_WARN_LIMIT}"
            ),
        }
    }
}

#[derive(Default)]
struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    fn fail(&mut self, field: impl Into<String>, rule: Rule, value: f32) {
        self.violations.push(Violation {
            field: field.into(),
            rule,
            value,
        });
    }

    /// Records a violation for NaN/inf and returns whether `value` can be
    /// checked further.
    fn finite(&mut self, field: &str, value: f32) -> bool {
        if value.is_finite() {
            true
        } else {
            self.fail(field, Rule::NotFinite, value);
            false
        }
    }

    fn positive(&mut self, field: &str, value: f32) -> bool {
        if !self.finite(field, value) {
            return false;
        }
        if value <= 0.0 {
            self.fail(field, Rule::MustBePositive, value);
            return false;
        }
        true
    }

    fn unit(&mut self, field: &str, value: f32) {
        if self.finite(field, value) && !(0.0..=1.0).contains(&value) {
            self.fail(field, Rule::OutsideUnitRange, value);
        }
    }

    fn finish(self) -> Result<(), ConfigError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError {
                violations: self.violations,
            })
        }
    }
}

impl RenderConfig {
    /// Check every rule and report all violations.
    ///
    /// Pure: the same config always produces the same result.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut c = Checker::default();

        if self.framebuffer_side == 0 {
            c.fail("framebuffer_side", Rule::MustBePositive, 0.0);
        } else if self.framebuffer_side > MAX_FRAMEBUFFER_SIDE {
            c.fail(
                "framebuffer_side",
                Rule::AboveMaximum {
                    max: MAX_FRAMEBUFFER_SIDE,
                },
                self.framebuffer_side as f32,
            );
        }

        for (i, &channel) in self.background_color.iter().enumerate() {
            c.unit(&format!("background_color[{i}]"), channel);
        }
        for (i, &p) in self.light.position.to_array().iter().enumerate() {
            c.finite(&format!("light.position[{i}]"), p);
        }
        for (i, &channel) in self.light.color.to_array().iter().enumerate() {
            c.unit(&format!("light.color[{i}]"), channel);
        }

        let m = &self.material;
        c.unit("material.ambient", m.ambient);
        c.unit("material.diffuse", m.diffuse);
        c.unit("material.specular", m.specular);
        if m.shininess < 0 {
            c.fail("material.shininess", Rule::MustBeNonNegative, m.shininess as f32);
        }

        if !(0..MAX_TESSELLATION_LEVELS).contains(&self.tessellation_level) {
            c.fail(
                "tessellation_level",
                Rule::LevelOutOfRange {
                    max: MAX_TESSELLATION_LEVELS,
                },
                self.tessellation_level as f32,
            );
        }

        c.positive("mouse.rotate_sensitivity", self.mouse.rotate_sensitivity);
        c.positive("mouse.zoom_sensitivity", self.mouse.zoom_sensitivity);

        let cam = &self.camera;
        if c.finite("camera.fov_degrees", cam.fov_degrees)
            && !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0)
        {
            c.fail("camera.fov_degrees", Rule::FovOutOfRange, cam.fov_degrees);
        }
        let near_ok = c.positive("camera.near_plane", cam.near_plane);
        let far_ok = c.finite("camera.far_plane", cam.far_plane);
        if near_ok && far_ok && cam.far_plane <= cam.near_plane {
            c.fail(
                "camera.far_plane",
                Rule::NotBeyondNearPlane {
                    near: cam.near_plane,
                },
                cam.far_plane,
            );
        }
        if c.positive("camera.min_zoom_distance", cam.min_zoom_distance)
            && near_ok
            && cam.min_zoom_distance < cam.near_plane
        {
            c.fail(
                "camera.min_zoom_distance",
                Rule::InsideNearPlane {
                    near: cam.near_plane,
                },
                cam.min_zoom_distance,
            );
        }

        let result = c.finish();
        match &result {
            Ok(()) => tracing::debug!("render config passed validation"),
            Err(e) => tracing::debug!(violations = e.violations.len(), "render config rejected"),
        }
        result
    }

    /// Soft findings that do not fail validation.
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut out = Vec::new();
        if self.framebuffer_side > 0 && !self.framebuffer_side.is_power_of_two() {
            out.push(ConfigWarning::FramebufferNotPowerOfTwo(self.framebuffer_side));
        }
        let sum = self.material.coefficient_sum();
        if sum.is_finite() && sum > MATERIAL_SUM_WARN_LIMIT {
            out.push(ConfigWarning::MaterialSumHigh { sum });
        }
        out
    }
}
