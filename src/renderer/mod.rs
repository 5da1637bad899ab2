//! Rendering module
//!
//! Scene code draws through the [`Canvas`] trait; [`DrawList`] turns that
//! into a triangle list which [`RenderState`] uploads to WebGPU.

pub mod canvas;
pub mod font;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use canvas::{Canvas, Color, DrawList};
pub use pipeline::RenderState;
pub use scene::draw_scene;
pub use vertex::Vertex;
