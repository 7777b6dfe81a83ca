//! Vertex format and colour palette

use bytemuck::{Pod, Zeroable};

/// Playfield-space position and straight-alpha colour
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout matching `VertexInput` in `shader.wgsl`
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Savanna palette (sRGB, straight alpha)
pub mod colors {
    /// #F6D66A
    pub const SKY: [f32; 4] = [0.965, 0.839, 0.416, 1.0];
    /// #E2B85A
    pub const GROUND: [f32; 4] = [0.886, 0.722, 0.353, 1.0];
    /// #8BBF4A
    pub const REED: [f32; 4] = [0.545, 0.749, 0.290, 1.0];
    /// #6FA23A
    pub const LEAF: [f32; 4] = [0.435, 0.635, 0.227, 1.0];
    /// #B48BC8
    pub const HIPPO: [f32; 4] = [0.706, 0.545, 0.784, 1.0];
    pub const GAME_OVER_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.45];
}
