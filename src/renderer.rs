//! Reference renderer backed by macroquad.
//!
//! The engine's draw list is renderer-agnostic; this backend turns it into
//! macroquad meshes. Consecutive quads sharing a texture slot are batched
//! into one mesh, with the index buffer generated from [`QUAD_INDICES`].
//! Slot 0 is the untextured slot used for solid quads; glyph quads reference
//! whichever slot their font atlas was registered under.

use macroquad::color::Color as MqColor;
use macroquad::models::{draw_mesh, Mesh, Vertex as MqVertex};
use macroquad::texture::Texture2D;

use crate::render::{Vertex, QUAD_INDICES, VERTICES_PER_QUAD};

/// Texture table plus mesh submission for one window.
#[derive(Default)]
pub struct MacroquadBackend {
    textures: Vec<Option<Texture2D>>,
}

impl MacroquadBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `texture` to a slot so quads carrying that texture index sample
    /// it. Growing the table fills the gap with untextured slots.
    pub fn set_texture(&mut self, slot: usize, texture: Texture2D) {
        if slot >= self.textures.len() {
            self.textures.resize(slot + 1, None);
        }
        self.textures[slot] = Some(texture);
    }

    /// Submits one frame's draw list, batching runs of quads that share a
    /// texture slot. Intended as the body of `end_frame`'s render callback.
    pub fn draw(&self, vertices: &[Vertex]) {
        let mut start = 0;
        while start + VERTICES_PER_QUAD <= vertices.len() {
            let slot = vertices[start].texture_index;
            let mut end = start;
            while end + VERTICES_PER_QUAD <= vertices.len()
                && vertices[end].texture_index == slot
            {
                end += VERTICES_PER_QUAD;
            }
            self.draw_run(&vertices[start..end], slot as usize);
            start = end;
        }
    }

    fn draw_run(&self, run: &[Vertex], slot: usize) {
        let mut mesh_vertices = Vec::with_capacity(run.len());
        for v in run {
            mesh_vertices.push(MqVertex::new(
                v.position[0],
                v.position[1],
                v.position[2],
                v.uv[0],
                v.uv[1],
                MqColor::new(v.color.r, v.color.g, v.color.b, v.color.a),
            ));
        }

        let quad_count = run.len() / VERTICES_PER_QUAD;
        let mut indices = Vec::with_capacity(quad_count * QUAD_INDICES.len());
        for quad in 0..quad_count {
            let base = (quad * VERTICES_PER_QUAD) as u16;
            indices.extend(QUAD_INDICES.iter().map(|i| base + i));
        }

        let texture = self.textures.get(slot).and_then(|t| t.clone());
        draw_mesh(&Mesh {
            vertices: mesh_vertices,
            indices,
            texture,
        });
    }
}
