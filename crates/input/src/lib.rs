//! Camera/input controller: raw pointer deltas in, view and projection out.
//!
//! # Invariants
//! - Sensitivities, clip planes and zoom limits come from a validated config.
//! - The camera never gets closer to its target than `min_zoom_distance`.

pub mod action;
pub mod camera;

pub use action::PointerAction;
pub use camera::OrbitCamera;
