use crate::action::PointerAction;
use glam::{Mat4, Vec3};
use molview_settings::{CameraSettings, MouseSettings, ValidatedConfig};
use std::f32::consts::PI;

const PITCH_LIMIT: f32 = 89.0 * PI / 180.0;

/// Camera orbiting a target point at some distance.
///
/// A drag across the full viewport height turns the camera by
/// `rotate_sensitivity * 180` degrees. Each scroll step scales the distance
/// by `exp(-zoom_sensitivity)`.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub aspect: f32,
    camera: CameraSettings,
    mouse: MouseSettings,
    home: (Vec3, f32),
}

impl OrbitCamera {
    pub fn new(config: &ValidatedConfig, aspect: f32) -> Self {
        let camera = *config.camera();
        let distance = (camera.min_zoom_distance * 10.0).min(camera.far_plane);
        Self {
            target: Vec3::ZERO,
            distance,
            yaw: 0.0,
            pitch: 0.0,
            aspect,
            camera,
            mouse: *config.mouse(),
            home: (Vec3::ZERO, distance),
        }
    }

    /// Pick up a newly published config, keeping the current pose but
    /// re-applying the zoom limits.
    pub fn apply_config(&mut self, config: &ValidatedConfig) {
        self.camera = *config.camera();
        self.mouse = *config.mouse();
        self.distance = self.clamp_distance(self.distance);
        self.home.1 = self.clamp_distance(self.home.1);
    }

    /// Aim at a sphere of `radius` around `center` so it fills the view, and
    /// remember that pose for [`PointerAction::Reset`].
    pub fn frame(&mut self, center: Vec3, radius: f32) {
        let half_fov = (self.camera.fov_degrees.to_radians() / 2.0).sin();
        self.target = center;
        self.distance = self.clamp_distance(radius / half_fov);
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.home = (self.target, self.distance);
    }

    fn clamp_distance(&self, d: f32) -> f32 {
        d.clamp(self.camera.min_zoom_distance, self.camera.far_plane)
    }

    /// Rotate by a pointer delta in pixels over a viewport `viewport_height`
    /// pixels tall.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !(viewport_height > 0.0 && viewport_height.is_finite()) {
            return;
        }
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        let scale = self.mouse.rotate_sensitivity * PI / viewport_height;
        self.yaw -= dx * scale;
        self.pitch = (self.pitch + dy * scale).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Zoom by scroll steps; positive steps move closer.
    pub fn zoom(&mut self, steps: f32) {
        if !steps.is_finite() {
            return;
        }
        let factor = (-self.mouse.zoom_sensitivity * steps).exp();
        self.distance = self.clamp_distance(self.distance * factor);
    }

    pub fn apply(&mut self, action: PointerAction, viewport_height: f32) {
        match action {
            PointerAction::Rotate { dx, dy } => self.rotate(dx, dy, viewport_height),
            PointerAction::Zoom(steps) => self.zoom(steps),
            PointerAction::Reset => {
                (self.target, self.distance) = self.home;
                self.yaw = 0.0;
                self.pitch = 0.0;
            }
        }
        tracing::trace!(?action, distance = self.distance, "camera updated");
    }

    /// Unit vector from the target towards the eye.
    fn offset_dir(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        )
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.offset_dir() * self.distance
    }

    pub fn fov_degrees(&self) -> f32 {
        self.camera.fov_degrees
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.camera.fov_degrees.to_radians(),
            self.aspect,
            self.camera.near_plane,
            self.camera.far_plane,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4Swizzles;
    use molview_settings::RenderConfig;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(&ValidatedConfig::default(), 1.0)
    }

    #[test]
    fn default_camera_looks_at_target() {
        let cam = camera();
        assert_relative_eq!(cam.eye().distance(cam.target), 10.0);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn zoom_never_passes_min_distance() {
        let mut cam = camera();
        for _ in 0..200 {
            cam.zoom(1.0);
        }
        assert_eq!(cam.distance, 1.0);
        for _ in 0..500 {
            cam.zoom(-1.0);
        }
        assert_eq!(cam.distance, 1000.0);
    }

    #[test]
    fn non_finite_input_leaves_pose_alone() {
        let mut cam = camera();
        let (yaw, pitch, distance) = (cam.yaw, cam.pitch, cam.distance);
        cam.apply(PointerAction::Zoom(f32::NAN), 600.0);
        cam.apply(PointerAction::Zoom(f32::INFINITY), 600.0);
        cam.apply(PointerAction::Rotate { dx: f32::NAN, dy: 1.0 }, 600.0);
        cam.apply(PointerAction::Rotate { dx: 1.0, dy: f32::NEG_INFINITY }, 600.0);
        cam.apply(PointerAction::Rotate { dx: 1.0, dy: 1.0 }, f32::NAN);
        assert_eq!(cam.distance, distance);
        assert_eq!(cam.yaw, yaw);
        assert_eq!(cam.pitch, pitch);
        assert!(cam.distance >= 1.0);
    }

    #[test]
    fn zoom_step_uses_sensitivity() {
        let mut cam = camera();
        cam.zoom(1.0);
        assert_relative_eq!(cam.distance, 10.0 * (-0.15_f32).exp(), epsilon = 1e-5);
    }

    #[test]
    fn full_height_drag_turns_by_sensitivity() {
        let mut c = RenderConfig::default();
        c.mouse.rotate_sensitivity = 0.5;
        let mut cam = OrbitCamera::new(&c.validated().unwrap(), 1.0);
        cam.rotate(600.0, 0.0, 600.0);
        assert_relative_eq!(cam.yaw, -PI / 2.0, epsilon = 1e-5);
        // Eye swung from +Z to -X.
        assert_relative_eq!(cam.eye().x, -10.0, epsilon = 1e-4);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = camera();
        cam.apply(PointerAction::Rotate { dx: 0.0, dy: 10_000.0 }, 100.0);
        assert_relative_eq!(cam.pitch, PITCH_LIMIT);
        cam.apply(PointerAction::Rotate { dx: 0.0, dy: 1.0 }, 0.0);
        assert_relative_eq!(cam.pitch, PITCH_LIMIT);
    }

    #[test]
    fn frame_and_reset() {
        let mut cam = camera();
        cam.frame(Vec3::new(1.0, 2.0, 3.0), 0.1);
        // Tiny molecule: framing distance is held at the zoom limit.
        assert_eq!(cam.distance, 1.0);
        assert_eq!(cam.target, Vec3::new(1.0, 2.0, 3.0));

        cam.apply(PointerAction::Zoom(-3.0), 600.0);
        cam.apply(PointerAction::Rotate { dx: 50.0, dy: 20.0 }, 600.0);
        cam.apply(PointerAction::Reset, 600.0);
        assert_eq!(cam.distance, 1.0);
        assert_eq!(cam.yaw, 0.0);
        assert_eq!(cam.pitch, 0.0);
    }

    #[test]
    fn target_projects_inside_clip_volume() {
        let mut cam = camera();
        cam.frame(Vec3::ZERO, 5.0);
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        let ndc = clip.xyz() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn new_config_reclamps_distance() {
        let mut cam = camera();
        cam.zoom(100.0);
        let mut c = RenderConfig::default();
        c.camera.min_zoom_distance = 4.0;
        cam.apply_config(&c.validated().unwrap());
        assert_eq!(cam.distance, 4.0);
    }
}
