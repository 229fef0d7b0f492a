//! Precomputed unit meshes for atoms (spheres) and bonds (cylinders).
//!
//! Level `n` is an icosphere with `n` subdivisions and a cylinder with
//! `6 * 2^n` side segments, so both grow strictly with the level.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use molview_settings::{MAX_TESSELLATION_LEVELS, ValidatedConfig};
use std::collections::HashMap;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleave positions and normals for a vertex buffer.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| Vertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }
}

/// Sphere and cylinder meshes for every supported level.
#[derive(Debug, Clone)]
pub struct MeshTable {
    spheres: Vec<Mesh>,
    cylinders: Vec<Mesh>,
}

impl MeshTable {
    pub fn new() -> Self {
        let _span = tracing::info_span!("build_mesh_table").entered();
        let levels = MAX_TESSELLATION_LEVELS as u32;
        let spheres: Vec<Mesh> = (0..levels).map(icosphere).collect();
        let cylinders: Vec<Mesh> = (0..levels).map(|l| cylinder(6 << l)).collect();
        tracing::debug!(
            levels,
            finest_sphere_tris = spheres.last().map_or(0, Mesh::triangle_count),
            "mesh table built"
        );
        Self { spheres, cylinders }
    }

    pub fn levels(&self) -> usize {
        self.spheres.len()
    }

    pub fn sphere(&self, level: usize) -> Option<&Mesh> {
        self.spheres.get(level)
    }

    pub fn cylinder(&self, level: usize) -> Option<&Mesh> {
        self.cylinders.get(level)
    }

    /// Sphere and cylinder meshes for the configured level.
    pub fn for_config(&self, config: &ValidatedConfig) -> (&Mesh, &Mesh) {
        // A validated level is always below MAX_TESSELLATION_LEVELS.
        let level = config.tessellation_level();
        (&self.spheres[level], &self.cylinders[level])
    }
}

impl Default for MeshTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit icosphere, refined `subdivisions` times.
fn icosphere(subdivisions: u32) -> Mesh {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    #[rustfmt::skip]
    let mut positions: Vec<Vec3> = [
        (-1.0, t, 0.0), (1.0, t, 0.0), (-1.0, -t, 0.0), (1.0, -t, 0.0),
        (0.0, -1.0, t), (0.0, 1.0, t), (0.0, -1.0, -t), (0.0, 1.0, -t),
        (t, 0.0, -1.0), (t, 0.0, 1.0), (-t, 0.0, -1.0), (-t, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    #[rustfmt::skip]
    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Vec3>| -> u32 {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let p = (positions[a as usize] + positions[b as usize]).normalize();
                positions.push(p);
                (positions.len() - 1) as u32
            })
        };

        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(a, b, &mut positions);
            let bc = midpoint(b, c, &mut positions);
            let ca = midpoint(c, a, &mut positions);
            next.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }
        faces = next;
    }

    Mesh {
        normals: positions.clone(),
        positions,
        indices: faces.into_iter().flatten().collect(),
    }
}

/// Open unit cylinder of radius 1 from z = 0 to z = 1. Caps are hidden
/// inside the atoms, so none are generated.
fn cylinder(segments: u32) -> Mesh {
    let mut mesh = Mesh::default();
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        let n = Vec3::new(angle.cos(), angle.sin(), 0.0);
        mesh.positions.push(n);
        mesh.positions.push(n + Vec3::Z);
        mesh.normals.push(n);
        mesh.normals.push(n);
    }
    for i in 0..segments {
        let j = (i + 1) % segments;
        let (b0, t0, b1, t1) = (2 * i, 2 * i + 1, 2 * j, 2 * j + 1);
        mesh.indices.extend([b0, b1, t1, b0, t1, t0]);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use molview_settings::RenderConfig;

    #[test]
    fn icosphere_counts() {
        let base = icosphere(0);
        assert_eq!(base.vertex_count(), 12);
        assert_eq!(base.triangle_count(), 20);
        let once = icosphere(1);
        assert_eq!(once.vertex_count(), 42);
        assert_eq!(once.triangle_count(), 80);
        for p in &once.positions {
            assert_relative_eq!(p.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn resolution_grows_with_level() {
        let table = MeshTable::new();
        assert_eq!(table.levels(), MAX_TESSELLATION_LEVELS as usize);
        for level in 1..table.levels() {
            let (s0, s1) = (table.sphere(level - 1).unwrap(), table.sphere(level).unwrap());
            let (c0, c1) = (table.cylinder(level - 1).unwrap(), table.cylinder(level).unwrap());
            assert!(s1.triangle_count() > s0.triangle_count());
            assert!(c1.triangle_count() > c0.triangle_count());
        }
        assert!(table.sphere(table.levels()).is_none());
    }

    #[test]
    fn every_valid_level_resolves() {
        let table = MeshTable::new();
        for level in 0..MAX_TESSELLATION_LEVELS {
            let mut c = RenderConfig::default();
            c.tessellation_level = level;
            let (sphere, cyl) = table.for_config(&c.validated().unwrap());
            assert!(sphere.triangle_count() >= 20);
            assert_eq!(cyl.triangle_count(), 2 * (6 << level) as usize);
        }
    }

    #[test]
    fn indices_stay_in_bounds() {
        let table = MeshTable::new();
        for level in 0..table.levels() {
            for mesh in [table.sphere(level).unwrap(), table.cylinder(level).unwrap()] {
                let n = mesh.vertex_count() as u32;
                assert!(mesh.indices.iter().all(|&i| i < n));
                assert_eq!(mesh.vertices().len(), mesh.vertex_count());
            }
        }
    }
}
