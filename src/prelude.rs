//! Convenience re-exports for building UIs.
//!
//! ```
//! use boxflow::prelude::*;
//! ```

pub use crate::color::Color;
pub use crate::elements::{boxed, button, flexbox};
pub use crate::engine::{BoxId, BoxState, FrameInput, UiBox, UiContext};
pub use crate::errors::Error;
pub use crate::flags::BoxFlags;
pub use crate::layout::{Padding, SemanticSize, SizeType, Sizes};
pub use crate::math::{Dimensions, Rect, Vector2};
pub use crate::render::{Vertex, QUAD_INDICES};
pub use crate::style::{Style, StyleSheet};
pub use crate::text::{FontHandle, GlyphQuad, MonoShaper, TextShaper};
pub use crate::{percent, pixels, text_content};
