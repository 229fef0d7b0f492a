use crate::shading::PhongShader;
use crate::tessellation::MeshTable;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use molview_common::{Atom, Molecule};
use molview_settings::ValidatedConfig;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a molecule and a view, then produces output. It never
/// mutates the molecule.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the molecule from the given view.
    fn render(&self, molecule: &Molecule, view: &RenderView) -> Self::Output;
}

/// Per-instance data for drawing a unit mesh: model matrix columns plus color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct InstanceData {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    pub color: [f32; 4],
}

impl InstanceData {
    fn new(model: Mat4, color: Vec3) -> Self {
        Self {
            model_0: model.x_axis.to_array(),
            model_1: model.y_axis.to_array(),
            model_2: model.z_axis.to_array(),
            model_3: model.w_axis.to_array(),
            color: color.extend(1.0).to_array(),
        }
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&[self.model_0, self.model_1, self.model_2, self.model_3])
    }
}

/// Instances for the unit sphere (one per atom) and the unit cylinder (one
/// per bond, stretched between its atoms). Bonds take the color of their
/// first atom.
pub fn instances(molecule: &Molecule) -> (Vec<InstanceData>, Vec<InstanceData>) {
    let atoms = molecule
        .atoms()
        .iter()
        .map(|a| {
            let model = Mat4::from_scale_rotation_translation(
                Vec3::splat(a.radius),
                Quat::IDENTITY,
                a.position,
            );
            InstanceData::new(model, a.color)
        })
        .collect();

    let bonds = molecule
        .bonds()
        .iter()
        .filter_map(|b| {
            let (start, end) = molecule.bond_endpoints(b)?;
            let axis = end - start;
            let rotation = Quat::from_rotation_arc(Vec3::Z, axis.normalize_or(Vec3::Z));
            let model = Mat4::from_scale_rotation_translation(
                Vec3::new(b.radius, b.radius, axis.length()),
                rotation,
                start,
            );
            Some(InstanceData::new(model, molecule.atoms()[b.a].color))
        })
        .collect();

    (atoms, bonds)
}

/// Text renderer for the CLI and tests.
///
/// Reports what a GPU pass would draw: target size, chosen mesh resolution,
/// triangle budget, and the Phong color of each atom's point nearest the
/// camera.
#[derive(Debug)]
pub struct DebugTextRenderer {
    config: ValidatedConfig,
    meshes: MeshTable,
    shader: PhongShader,
}

impl DebugTextRenderer {
    pub fn new(config: ValidatedConfig) -> Self {
        let shader = PhongShader::from_config(&config);
        Self {
            config,
            meshes: MeshTable::new(),
            shader,
        }
    }

    /// Shaded color of the atom's surface point facing `eye`.
    pub fn shade_atom(&self, atom: &Atom, eye: Vec3) -> Vec3 {
        let normal = (eye - atom.position).normalize_or(Vec3::Z);
        let point = atom.position + normal * atom.radius;
        self.shader.shade(point, normal, eye, atom.color)
    }

    /// Triangles drawn for the whole molecule at the configured level.
    pub fn triangle_budget(&self, molecule: &Molecule) -> usize {
        let (sphere, cylinder) = self.meshes.for_config(&self.config);
        molecule.atoms().len() * sphere.triangle_count()
            + molecule.bonds().len() * cylinder.triangle_count()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, molecule: &Molecule, view: &RenderView) -> String {
        let (sphere, cylinder) = self.meshes.for_config(&self.config);
        let side = self.config.framebuffer_side();
        let bg = self.shader.clear_color();

        let mut out = String::new();
        out.push_str(&format!(
            "=== Molecule (atoms={}, bonds={}) ===\n",
            molecule.atoms().len(),
            molecule.bonds().len()
        ));
        out.push_str(&format!(
            "Framebuffer: {side}x{side} clear=({:.2}, {:.2}, {:.2}, {:.2})\n",
            bg[0], bg[1], bg[2], bg[3]
        ));
        out.push_str(&format!(
            "Tessellation: level {} (sphere {} verts/{} tris, cylinder {} tris)\n",
            self.config.tessellation_level(),
            sphere.vertex_count(),
            sphere.triangle_count(),
            cylinder.triangle_count()
        ));
        out.push_str(&format!("Triangles: {}\n", self.triangle_budget(molecule)));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        for atom in molecule.atoms() {
            let p = atom.position;
            let c = self.shade_atom(atom, view.eye);
            out.push_str(&format!(
                "  [{}] pos=({:.2}, {:.2}, {:.2}) r={:.2} shade=({:.2}, {:.2}, {:.2})\n",
                atom.element, p.x, p.y, p.z, atom.radius, c.x, c.y, c.z
            ));
        }

        tracing::debug!(atoms = molecule.atoms().len(), "debug frame rendered");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use molview_settings::RenderConfig;

    fn view() -> RenderView {
        RenderView {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
        }
    }

    #[test]
    fn debug_renderer_empty_molecule() {
        let renderer = DebugTextRenderer::new(ValidatedConfig::default());
        let output = renderer.render(&Molecule::new(), &view());

        assert!(output.contains("atoms=0, bonds=0"));
        assert!(output.contains("Framebuffer: 2048x2048"));
        assert!(output.contains("Triangles: 0"));
    }

    #[test]
    fn debug_renderer_with_water() {
        let renderer = DebugTextRenderer::new(ValidatedConfig::default());
        let output = renderer.render(&Molecule::water(), &view());

        assert!(output.contains("atoms=3, bonds=2"));
        // Level 3: 1280-triangle spheres, 48-segment cylinders.
        assert!(output.contains("level 3 (sphere 642 verts/1280 tris, cylinder 96 tris)"));
        assert!(output.contains(&format!("Triangles: {}", 3 * 1280 + 2 * 96)));
        assert!(output.contains("[O] pos="));
    }

    #[test]
    fn coarser_level_shrinks_budget() {
        let water = Molecule::water();
        let fine = DebugTextRenderer::new(ValidatedConfig::default());
        let mut c = RenderConfig::default();
        c.tessellation_level = 0;
        let coarse = DebugTextRenderer::new(c.validated().unwrap());
        assert!(coarse.triangle_budget(&water) < fine.triangle_budget(&water));
        assert_eq!(coarse.triangle_budget(&water), 3 * 20 + 2 * 12);
    }

    #[test]
    fn instances_place_atoms_and_bonds() {
        let water = Molecule::water();
        let (atoms, bonds) = instances(&water);
        assert_eq!(atoms.len(), 3);
        assert_eq!(bonds.len(), 2);

        let h = &water.atoms()[1];
        let centre = atoms[1].model().transform_point3(Vec3::ZERO);
        assert_relative_eq!(centre.distance(h.position), 0.0, epsilon = 1e-6);

        // The unit cylinder's top (z = 1) lands on the bonded atom.
        let top = bonds[0].model().transform_point3(Vec3::Z);
        assert_relative_eq!(top.distance(h.position), 0.0, epsilon = 1e-5);
        assert_eq!(bytemuck::cast_slice::<_, u8>(&bonds).len(), 2 * 80);
    }
}
