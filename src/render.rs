//! Draw-list primitives handed to the host renderer.
//!
//! The engine accumulates quads of four vertices each; the host consumes
//! every quad as two triangles through the fixed [`QUAD_INDICES`] pattern
//! with an externally managed index buffer.

use crate::color::Color;
use crate::math::Rect;

/// Index pattern turning one quad of four vertices into two triangles.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// Number of vertices per emitted quad.
pub const VERTICES_PER_QUAD: usize = 4;

/// One draw-list vertex: position, atlas UV, texture slot and color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub texture_index: f32,
    pub color: Color,
}

impl Vertex {
    pub fn new(x: f32, y: f32, u: f32, v: f32, texture_index: f32, color: Color) -> Self {
        Self {
            position: [x, y, 0.0],
            uv: [u, v],
            texture_index,
            color,
        }
    }
}

/// Appends one rectangle quad with the given UV rect, in the corner order
/// the index pattern expects: top-left, top-right, bottom-right, bottom-left.
pub(crate) fn push_quad(
    vertices: &mut Vec<Vertex>,
    rect: Rect,
    uv: Rect,
    texture_index: f32,
    color: Color,
) {
    vertices.push(Vertex::new(rect.x0, rect.y0, uv.x0, uv.y0, texture_index, color));
    vertices.push(Vertex::new(rect.x1, rect.y0, uv.x1, uv.y0, texture_index, color));
    vertices.push(Vertex::new(rect.x1, rect.y1, uv.x1, uv.y1, texture_index, color));
    vertices.push(Vertex::new(rect.x0, rect.y1, uv.x0, uv.y1, texture_index, color));
}

/// The UV rect used for untextured (solid) quads.
pub(crate) const SOLID_UV: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);
