//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for scene elements
pub mod colors {
    use crate::sim::roach::rgb;

    /// Floor the roaches run across (clear colour)
    pub const FLOOR: [f32; 4] = rgb(0xD7CCC8);
    pub const LEG: [f32; 4] = rgb(0x3E2723);
    pub const BACK_MARK: [f32; 4] = [0.0, 0.0, 0.0, 0.2];
    pub const BOMB: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BOMB_SHINE: [f32; 4] = rgb(0x444444);
    pub const BOMB_FUSE: [f32; 4] = rgb(0x333333);
    pub const BOMB_SPARK: [f32; 4] = rgb(0xFFC107);
    pub const CHILL_GLAZE: [f32; 4] = [0.251, 0.769, 1.0, 0.4];
    pub const DEAD_EYES: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    pub const FLUID: [f32; 4] = rgb(0x7CB342);
    pub const SPARK: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    pub const PULSE_RING: [f32; 4] = rgb(0x29B6F6);
    pub const PULSE_FILL: [f32; 4] = [0.161, 0.714, 0.965, 0.1];

    pub const LABEL_HEAL: [f32; 4] = rgb(0x66BB6A);
    pub const LABEL_BONUS: [f32; 4] = rgb(0xFFD700);
    pub const LABEL_OUTLINE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    pub const SLIPPER_SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.2];
    pub const SLIPPER_SOLE: [f32; 4] = rgb(0xFF7043);
    pub const SLIPPER_EDGE: [f32; 4] = rgb(0xD84315);
    pub const SLIPPER_HEEL: [f32; 4] = rgb(0xF4511E);
    pub const SLIPPER_STRAP: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    pub const FLASH: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_struct() {
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, 24);
        assert_eq!(desc.attributes[1].offset, 8);
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn test_vertex_bytes() {
        let v = [Vertex::new(1.0, 2.0, colors::SPARK)];
        let bytes: &[u8] = bytemuck::cast_slice(&v);
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
    }
}
