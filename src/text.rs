//! Text shaping collaborator.
//!
//! The engine does not bake font atlases or own glyph metrics. The host
//! registers a [`TextShaper`] per font id; the engine queries it for
//! measurement during text-content sizing and for one glyph quad per
//! visible codepoint while building the draw list.

use rustc_hash::FxHashMap;

use crate::math::{Dimensions, Vector2};

/// An opaque reference to a host-registered font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontHandle {
    /// Key into the context's shaper registry.
    pub font_id: u16,
    /// Pixel size text is shaped at; also the height text-content sizing
    /// assigns to a single line.
    pub pixel_size: f32,
    /// Texture slot glyph quads are emitted with.
    pub atlas_index: u16,
}

impl FontHandle {
    pub const fn new(font_id: u16, pixel_size: f32, atlas_index: u16) -> Self {
        Self {
            font_id,
            pixel_size,
            atlas_index,
        }
    }
}

/// One positioned glyph: screen-space corners and atlas UVs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphQuad {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub s0: f32,
    pub t0: f32,
    pub s1: f32,
    pub t1: f32,
}

/// Host-provided glyph lookup over baked font character data.
pub trait TextShaper {
    /// Returns the quad for `codepoint` positioned at `cursor` and advances
    /// the cursor past it.
    fn glyph(&self, codepoint: char, cursor: &mut Vector2, pixel_size: f32) -> GlyphQuad;

    /// Measured pixel extent of `text` shaped on a single line.
    fn measure(&self, text: &str, pixel_size: f32) -> Dimensions {
        let mut cursor = Vector2::ZERO;
        for c in text.chars().filter(|c| *c as u32 >= 32) {
            self.glyph(c, &mut cursor, pixel_size);
        }
        Dimensions::new(cursor.x, pixel_size)
    }
}

/// Registry of shapers keyed by font id.
#[derive(Default)]
pub(crate) struct FontRegistry {
    shapers: FxHashMap<u16, Box<dyn TextShaper>>,
}

impl FontRegistry {
    pub(crate) fn register(&mut self, font_id: u16, shaper: Box<dyn TextShaper>) {
        self.shapers.insert(font_id, shaper);
    }

    pub(crate) fn get(&self, font_id: u16) -> Option<&dyn TextShaper> {
        self.shapers.get(&font_id).map(|s| s.as_ref())
    }
}

/// A fixed-advance shaper: every glyph occupies `advance x pixel_size` and
/// maps to the whole atlas. Deterministic, useful for tests and for hosts
/// that have not wired a real atlas yet.
#[derive(Debug, Clone, Copy)]
pub struct MonoShaper {
    pub advance: f32,
}

impl MonoShaper {
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl TextShaper for MonoShaper {
    fn glyph(&self, _codepoint: char, cursor: &mut Vector2, pixel_size: f32) -> GlyphQuad {
        let quad = GlyphQuad {
            x0: cursor.x,
            y0: cursor.y,
            x1: cursor.x + self.advance,
            y1: cursor.y + pixel_size,
            s0: 0.0,
            t0: 0.0,
            s1: 1.0,
            t1: 1.0,
        };
        cursor.x += self.advance;
        quad
    }
}
