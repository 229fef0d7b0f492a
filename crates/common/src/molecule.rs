use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A single atom drawn as a sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// Element symbol, e.g. "O".
    pub element: String,
    pub position: Vec3,
    /// Display radius in scene units.
    pub radius: f32,
    /// Linear RGB in [0,1].
    pub color: Vec3,
}

impl Atom {
    pub fn new(element: impl Into<String>, position: Vec3, radius: f32, color: Vec3) -> Self {
        Self {
            element: element.into(),
            position,
            radius,
            color,
        }
    }
}

/// A bond between two atoms, drawn as a cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub radius: f32,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MoleculeError {
    #[error("bond references atom {index}, but the molecule has {count} atoms")]
    UnknownAtom { index: usize, count: usize },
    #[error("atom {0} cannot be bonded to itself")]
    SelfBond(usize),
}

/// Atoms plus the bonds between them.
///
/// Every bond references two distinct existing atoms; deserialization goes
/// through the same checks as [`Molecule::add_bond`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MoleculeData")]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

/// Unchecked wire form of a [`Molecule`].
#[derive(Deserialize)]
struct MoleculeData {
    #[serde(default)]
    atoms: Vec<Atom>,
    #[serde(default)]
    bonds: Vec<Bond>,
}

impl TryFrom<MoleculeData> for Molecule {
    type Error = MoleculeError;

    fn try_from(data: MoleculeData) -> Result<Self, Self::Error> {
        let mut m = Molecule {
            atoms: data.atoms,
            bonds: Vec::with_capacity(data.bonds.len()),
        };
        for b in data.bonds {
            m.add_bond(b.a, b.b, b.radius)?;
        }
        Ok(m)
    }
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an atom and return its index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    pub fn add_bond(&mut self, a: usize, b: usize, radius: f32) -> Result<(), MoleculeError> {
        let count = self.atoms.len();
        for index in [a, b] {
            if index >= count {
                return Err(MoleculeError::UnknownAtom { index, count });
            }
        }
        if a == b {
            return Err(MoleculeError::SelfBond(a));
        }
        self.bonds.push(Bond { a, b, radius });
        Ok(())
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Endpoints of a bond, or `None` if it does not belong to this molecule.
    pub fn bond_endpoints(&self, bond: &Bond) -> Option<(Vec3, Vec3)> {
        Some((self.atoms.get(bond.a)?.position, self.atoms.get(bond.b)?.position))
    }

    /// Mean atom position, or the origin for an empty molecule.
    pub fn centroid(&self) -> Vec3 {
        if self.atoms.is_empty() {
            return Vec3::ZERO;
        }
        let sum: Vec3 = self.atoms.iter().map(|a| a.position).sum();
        sum / self.atoms.len() as f32
    }

    /// Radius of the sphere around the centroid that encloses every atom
    /// including its display radius.
    pub fn bounding_radius(&self) -> f32 {
        let c = self.centroid();
        self.atoms
            .iter()
            .map(|a| a.position.distance(c) + a.radius)
            .fold(0.0, f32::max)
    }

    /// A water molecule, handy for previews and tests.
    pub fn water() -> Self {
        let mut m = Self::new();
        let o = m.add_atom(Atom::new(
            "O",
            Vec3::ZERO,
            0.35,
            Vec3::new(1.0, 0.05, 0.05),
        ));
        let h1 = m.add_atom(Atom::new("H", Vec3::new(0.757, 0.586, 0.0), 0.2, Vec3::ONE));
        let h2 = m.add_atom(Atom::new("H", Vec3::new(-0.757, 0.586, 0.0), 0.2, Vec3::ONE));
        // Indices come straight from add_atom.
        m.bonds.push(Bond { a: o, b: h1, radius: 0.08 });
        m.bonds.push(Bond { a: o, b: h2, radius: 0.08 });
        m
    }
}
