//! Semantic size declarations and padding.
//!
//! A size is declared as a resolution strategy rather than a raw number;
//! the engine resolves it against the parent's content area (or the
//! viewport for root boxes) when the box is placed.

/// Resolution strategy of one axis of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SizeType {
    /// Not yet declared; resolves to zero.
    #[default]
    Null,
    /// The value is used verbatim, in pixels.
    Pixels,
    /// The value is a fraction of the parent's content extent on the same
    /// axis. Expected in `0.0..=1.0`; out-of-range values are not clamped
    /// and propagate as declared.
    Percent,
    /// The extent is driven by the box's attached text plus padding.
    TextContent,
}

/// A per-axis semantic size descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SemanticSize {
    pub kind: SizeType,
    pub value: f32,
    /// Reserved for a future constraint solver; carried but not consulted
    /// by the resolver.
    pub strictness: f32,
}

impl SemanticSize {
    pub const NULL: Self = Self {
        kind: SizeType::Null,
        value: 0.0,
        strictness: 0.0,
    };

    pub const fn pixels(value: f32) -> Self {
        Self {
            kind: SizeType::Pixels,
            value,
            strictness: 1.0,
        }
    }

    pub const fn percent(value: f32) -> Self {
        Self {
            kind: SizeType::Percent,
            value,
            strictness: 1.0,
        }
    }

    pub const fn text_content() -> Self {
        Self {
            kind: SizeType::TextContent,
            value: 0.0,
            strictness: 1.0,
        }
    }

    pub fn is_null(&self) -> bool {
        self.kind == SizeType::Null
    }
}

/// The two axis descriptors of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sizes {
    pub x: SemanticSize,
    pub y: SemanticSize,
}

impl Sizes {
    pub const fn new(x: SemanticSize, y: SemanticSize) -> Self {
        Self { x, y }
    }

    pub const fn pixels(width: f32, height: f32) -> Self {
        Self::new(SemanticSize::pixels(width), SemanticSize::pixels(height))
    }

    pub const fn percent(width: f32, height: f32) -> Self {
        Self::new(SemanticSize::percent(width), SemanticSize::percent(height))
    }

    pub const fn text_content() -> Self {
        Self::new(SemanticSize::text_content(), SemanticSize::text_content())
    }

    pub fn is_null(&self) -> bool {
        self.x.is_null() && self.y.is_null()
    }
}

impl From<(SemanticSize, SemanticSize)> for Sizes {
    fn from(value: (SemanticSize, SemanticSize)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// Padding values for each side of a box, in pixels.
///
/// Padding shrinks the content area available to children; the box's own
/// rect stays its full bounding box including padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same padding on all sides.
    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Padding on the left and right sides only.
    pub const fn horizontal(value: f32) -> Self {
        Self::new(0.0, value, 0.0, value)
    }

    /// Padding on the top and bottom sides only.
    pub const fn vertical(value: f32) -> Self {
        Self::new(value, 0.0, value, 0.0)
    }
}

impl From<f32> for Padding {
    fn from(value: f32) -> Self {
        Self::all(value)
    }
}

impl From<(f32, f32, f32, f32)> for Padding {
    /// CSS order: (top, right, bottom, left).
    fn from((top, right, bottom, left): (f32, f32, f32, f32)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

/// The result of resolving both axes of a box, in pixels.
pub(crate) fn content_extent(rect: crate::math::Rect, padding: Padding) -> crate::math::Dimensions {
    crate::math::Dimensions::new(
        rect.width() - padding.left - padding.right,
        rect.height() - padding.top - padding.bottom,
    )
}

/// Shorthand macro for [`SemanticSize::pixels`].
#[macro_export]
macro_rules! pixels {
    ($val:expr) => {
        $crate::layout::SemanticSize::pixels($val)
    };
}

/// Shorthand macro for [`SemanticSize::percent`].
/// The value is expected in range `0.0..=1.0`.
#[macro_export]
macro_rules! percent {
    ($val:expr) => {
        $crate::layout::SemanticSize::percent($val)
    };
}

/// Shorthand macro for [`SemanticSize::text_content`].
#[macro_export]
macro_rules! text_content {
    () => {
        $crate::layout::SemanticSize::text_content()
    };
}
