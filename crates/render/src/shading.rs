use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use molview_settings::ValidatedConfig;

/// Lighting parameters laid out for a uniform buffer.
///
/// `coefficients` packs ambient, diffuse, specular and shininess.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PhongUniform {
    pub light_position: [f32; 4],
    pub light_color: [f32; 4],
    pub coefficients: [f32; 4],
    pub background: [f32; 4],
}

/// Phong shading with the single scene light.
#[derive(Debug, Clone, Copy)]
pub struct PhongShader {
    light_position: Vec3,
    light_color: Vec3,
    ambient: f32,
    diffuse: f32,
    specular: f32,
    shininess: i32,
    background: [f32; 4],
}

impl PhongShader {
    pub fn from_config(config: &ValidatedConfig) -> Self {
        let light = config.light();
        let m = config.material();
        Self {
            light_position: light.position,
            light_color: light.color,
            ambient: m.ambient,
            diffuse: m.diffuse,
            specular: m.specular,
            shininess: m.shininess,
            background: config.background_color(),
        }
    }

    /// Color of a surface point with `base` albedo seen from `eye`, clamped
    /// to [0,1]. The specular term is tinted by the light only.
    pub fn shade(&self, point: Vec3, normal: Vec3, eye: Vec3, base: Vec3) -> Vec3 {
        let n = normal.normalize_or_zero();
        let l = (self.light_position - point).normalize_or_zero();
        let v = (eye - point).normalize_or_zero();

        let lambert = n.dot(l).max(0.0);
        let spec = if lambert > 0.0 {
            let r = reflect(-l, n);
            v.dot(r).max(0.0).powi(self.shininess)
        } else {
            0.0
        };

        let lit = (self.ambient + self.diffuse * lambert) * self.light_color * base
            + self.specular * spec * self.light_color;
        lit.clamp(Vec3::ZERO, Vec3::ONE)
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.background
    }

    pub fn uniform(&self) -> PhongUniform {
        PhongUniform {
            light_position: self.light_position.extend(1.0).to_array(),
            light_color: self.light_color.extend(1.0).to_array(),
            coefficients: [
                self.ambient,
                self.diffuse,
                self.specular,
                self.shininess as f32,
            ],
            background: self.background,
        }
    }
}

fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}
