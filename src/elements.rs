//! Premade components built on the raw box API.
//!
//! Each helper creates a box, applies a default flag set and returns the
//! interaction snapshot so callers can branch on hover/click inline.
//!
//! Caller flags are combined with the defaults by XOR: passing a flag that
//! is already a default cancels it, so `button(ctx, "x", CLICKABLE)` yields
//! a button that is *not* clickable. Pass `BoxFlags::NONE` for the plain
//! default behavior.

use crate::engine::{BoxState, UiContext};
use crate::errors::Error;
use crate::flags::BoxFlags;
use crate::layout::Sizes;

/// Default capabilities of a [`button`]. `DRAW_TEXT` is not part of the
/// set; attaching the label turns it on.
pub const BUTTON_DEFAULT_FLAGS: BoxFlags = BoxFlags::DRAW_BACKGROUND
    .union(BoxFlags::HOVERABLE)
    .union(BoxFlags::CLICKABLE);

/// A plain box anchored at the parent's content origin. Size it afterwards
/// through the returned id.
pub fn boxed(ctx: &mut UiContext, flags: BoxFlags) -> Result<BoxState, Error> {
    let state = ctx.create(flags)?;
    ctx.position(state.id, 0.0, 0.0)?;
    Ok(state)
}

/// A flex container that becomes the current parent; callers declare its
/// children and then `pop`. Defaults to a row unless `FLEX_COLUMN` is passed.
pub fn flexbox(ctx: &mut UiContext, flags: BoxFlags) -> Result<BoxState, Error> {
    let flags = if flags.intersects(BoxFlags::FLEX_ROW | BoxFlags::FLEX_COLUMN) {
        flags
    } else {
        flags | BoxFlags::FLEX_ROW
    };
    let state = ctx.create(flags)?;
    ctx.position(state.id, 0.0, 0.0)?;
    ctx.push(state.id)?;
    Ok(state)
}

/// A text-content-sized button styled from the context's button style. The
/// returned snapshot is taken after the box is placed, so hover and click
/// are valid for the current frame; while hovered the background swaps to
/// the style's hover color.
pub fn button(ctx: &mut UiContext, label: &str, flags: BoxFlags) -> Result<BoxState, Error> {
    let flags = flags ^ BUTTON_DEFAULT_FLAGS;
    let state = ctx.create(flags)?;
    let id = state.id;

    let style = ctx.style().button_style;
    ctx.position(id, 0.0, 0.0)?;
    ctx.padding(id, style.padding)?;
    if let Some(font) = style.font {
        ctx.font(id, font)?;
    }
    ctx.background_color(id, style.background_color)?;
    ctx.border(id, style.border_color, style.border_width)?;
    ctx.text_color(id, style.text_color)?;
    ctx.text(id, label)?;
    ctx.semantic_size(id, Sizes::text_content())?;

    let state = ctx.interact(id)?;
    if state.hovered {
        ctx.background_color(id, style.hover_color)?;
    }
    Ok(state)
}
