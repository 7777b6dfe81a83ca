//! WebGPU rendering module
//!
//! The scene is a flat list of colored triangles built from a simulation
//! `Snapshot` each frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, playfield_to_ndc};
pub use shapes::scene;
pub use vertex::Vertex;
