//! boxflow — a per-frame immediate-mode UI layout engine.
//!
//! The tree of UI boxes is re-declared every frame between
//! [`UiContext::begin_frame`] and [`UiContext::end_frame`]: create boxes,
//! nest them with `push`/`pop`, configure them through setters, and read
//! hover/click state back inline. `end_frame` resolves semantic sizes,
//! places flex rows and columns, and emits a draw list of textured quads
//! for the host renderer.
//!
//! ```no_run
//! use boxflow::prelude::*;
//!
//! let mut ui = UiContext::new(Dimensions::new(800.0, 600.0), StyleSheet::default());
//! loop {
//!     ui.begin_frame(FrameInput::default());
//!     let panel = boxed(&mut ui, BoxFlags::DRAW_BACKGROUND).unwrap().id;
//!     ui.size(panel, 200.0, 100.0).unwrap();
//!     ui.position(panel, 10.0, 10.0).unwrap();
//!     ui.end_frame(|vertices| {
//!         // hand the quads to the renderer
//!         let _ = vertices;
//!     });
//! }
//! ```

pub mod color;
pub mod elements;
pub mod engine;
pub mod errors;
pub mod flags;
pub mod layout;
pub mod math;
pub mod prelude;
pub mod render;
pub mod renderer;
pub mod style;
pub mod text;

pub use color::Color;
pub use elements::{boxed, button, flexbox};
pub use engine::{BoxId, BoxState, FrameInput, UiBox, UiContext};
pub use errors::Error;
pub use flags::BoxFlags;
pub use layout::{Padding, SemanticSize, SizeType, Sizes};
pub use math::{Dimensions, Rect, Vector2};
pub use render::{Vertex, QUAD_INDICES};
pub use renderer::MacroquadBackend;
pub use style::{Style, StyleSheet};
pub use text::{FontHandle, GlyphQuad, MonoShaper, TextShaper};
