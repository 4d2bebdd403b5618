//! Default visual styles applied to freshly created boxes.

use crate::color::Color;
use crate::layout::Padding;
use crate::text::FontHandle;

/// The visual defaults one box is seeded with at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub background_color: Color,
    /// Background used by the premade `button` component while hovered.
    pub hover_color: Color,
    pub border_color: Color,
    pub text_color: Color,
    pub padding: Padding,
    pub border_width: f32,
    pub border_radius: f32,
    pub font: Option<FontHandle>,
    /// Spacing between flex siblings, in pixels.
    pub flex_gap: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background_color: Color::TRANSPARENT,
            hover_color: Color::TRANSPARENT,
            border_color: Color::TRANSPARENT,
            text_color: Color::WHITE,
            padding: Padding::default(),
            border_width: 1.0,
            border_radius: 0.0,
            font: None,
            flex_gap: 0.0,
        }
    }
}

/// Per-context style defaults: one block for plain boxes, one for the
/// premade button component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleSheet {
    pub box_style: Style,
    pub button_style: Style,
}

impl StyleSheet {
    pub fn new(box_style: Style, button_style: Style) -> Self {
        Self {
            box_style,
            button_style,
        }
    }
}
