//! Shared types: atoms, bonds and the molecule that owns them.

pub mod molecule;

pub use molecule::{Atom, Bond, Molecule, MoleculeError};
