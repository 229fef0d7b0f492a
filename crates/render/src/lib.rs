//! Rendering Adapter: the consumers of the render settings.
//!
//! # Invariants
//! - Everything here is built from a `ValidatedConfig`, never a raw one.
//! - Renderers read the molecule; they never mutate it.

pub mod framebuffer;
pub mod renderer;
pub mod shading;
pub mod tessellation;

pub use framebuffer::Framebuffer;
pub use renderer::{DebugTextRenderer, InstanceData, RenderView, Renderer, instances};
pub use shading::{PhongShader, PhongUniform};
pub use tessellation::{Mesh, MeshTable, Vertex};
