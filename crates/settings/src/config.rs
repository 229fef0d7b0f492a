use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Number of precomputed sphere/cylinder mesh resolutions. Valid
/// tessellation levels are `0..MAX_TESSELLATION_LEVELS`.
pub const MAX_TESSELLATION_LEVELS: i32 = 5;

/// Largest square target side accepted, matching common GPU texture limits.
pub const MAX_FRAMEBUFFER_SIDE: u32 = 16384;

/// Every tunable the scene renderer reads.
///
/// Plain data: nothing here is checked until [`RenderConfig::validate`] runs.
/// Missing keys in a config file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Side length in pixels of the square off-screen color/depth targets.
    pub framebuffer_side: u32,
    /// Clear color, RGBA in [0,1].
    pub background_color: [f32; 4],
    pub light: LightSettings,
    pub material: MaterialSettings,
    /// Index into the sphere/cylinder mesh table; 0 is the coarsest.
    pub tessellation_level: i32,
    pub mouse: MouseSettings,
    pub camera: CameraSettings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            framebuffer_side: 2048,
            background_color: [0.0, 0.0, 0.0, 1.0],
            light: LightSettings::default(),
            material: MaterialSettings::default(),
            tessellation_level: 3,
            mouse: MouseSettings::default(),
            camera: CameraSettings::default(),
        }
    }
}

/// The single scene light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSettings {
    pub position: Vec3,
    /// RGB in [0,1].
    pub color: Vec3,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(20.0, 20.0, 0.0),
            color: Vec3::ONE,
        }
    }
}

/// Phong reflectance coefficients shared by every atom and bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSettings {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    /// Specular exponent.
    pub shininess: i32,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            ambient: 0.2,
            diffuse: 0.4,
            specular: 0.6,
            shininess: 8,
        }
    }
}

impl MaterialSettings {
    pub fn coefficient_sum(&self) -> f32 {
        self.ambient + self.diffuse + self.specular
    }
}

/// Scale factors applied to raw pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseSettings {
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
}

impl Default for MouseSettings {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 2.0,
            zoom_sensitivity: 0.15,
        }
    }
}

/// Perspective projection and zoom limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Closest the camera may get to the orbit target.
    pub min_zoom_distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            min_zoom_distance: 1.0,
        }
    }
}
