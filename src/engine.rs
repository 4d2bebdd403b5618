//! The boxflow layout engine core.
//!
//! A [`UiContext`] owns one UI surface: the frame-scoped box arena, the
//! hierarchy cursor, the input snapshot and the vertex buffer. Callers
//! re-declare the whole tree every frame between [`UiContext::begin_frame`]
//! and [`UiContext::end_frame`]; boxes are referred to by dense per-frame
//! [`BoxId`]s.
//!
//! Setters recompute the affected box's sibling run eagerly, so rects and
//! hover state can be queried immediately. `end_frame` additionally runs one
//! authoritative top-down layout pass over the finished tree before emitting
//! the draw list, so final geometry never depends on setter call order.

use crate::color::Color;
use crate::errors::Error;
use crate::flags::BoxFlags;
use crate::layout::{content_extent, Padding, SizeType, Sizes};
use crate::math::{Dimensions, Rect, Vector2};
use crate::render::{push_quad, Vertex, SOLID_UV};
use crate::style::{Style, StyleSheet};
use crate::text::{FontHandle, FontRegistry, TextShaper};

// ============================================================================
// Constants
// ============================================================================

/// Arena capacity reserved up front; growth doubles from here.
const INITIAL_BOX_CAPACITY: usize = 32;

/// Hard cap on boxes per frame; exceeding it is a [`Error::CapacityExceeded`].
const DEFAULT_MAX_BOX_COUNT: usize = 8192;

/// Pixels scrolled per unit of wheel delta.
const SCROLL_MULTIPLIER: f32 = 10.0;

const SCROLLBAR_WIDTH: f32 = 6.0;
const SCROLLBAR_MIN_THUMB: f32 = 8.0;

// ============================================================================
// Public types
// ============================================================================

/// Dense per-frame box identifier, assigned in creation order starting at 0.
/// Stable only within one frame; the next `begin_frame` invalidates all ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoxId(pub(crate) u32);

impl BoxId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// The raw arena index.
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Hover/click snapshot of one box at the moment it was queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxState {
    pub id: BoxId,
    pub hovered: bool,
    pub clicked: bool,
}

/// Pointer and wheel state for one frame, passed to [`UiContext::begin_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub mouse_position: Vector2,
    /// Whether the primary button is currently down.
    pub left_down: bool,
    /// Wheel delta for this frame; positive scrolls content up.
    pub scroll_delta: f32,
}

/// One rectangular UI node in the per-frame tree.
///
/// Tree relations are arena indices rather than references, so they stay
/// valid across arena growth. All fields are frame-scoped except
/// `scroll_offset`/`scroll_offset_max`, which survive slot reuse so a
/// scroll container re-declared at the same arena position keeps its
/// scroll state across frames.
#[derive(Debug, Clone, Copy)]
pub struct UiBox {
    pub flags: BoxFlags,
    pub semantic_size: Sizes,
    /// Local offset relative to the parent's content origin. `None` means
    /// the box has not been positioned yet.
    pub position: Option<Vector2>,

    pub background_color: Color,
    pub border_color: Color,
    pub border_width: f32,
    pub border_radius: f32,
    pub text_color: Color,
    pub padding: Padding,
    pub font: Option<FontHandle>,
    pub flex_gap: f32,

    /// Byte range of the attached text inside the context's frame text
    /// buffer; the box does not own character data.
    pub text: Option<(u32, u32)>,

    pub parent: Option<BoxId>,
    pub first_child: Option<BoxId>,
    pub last_child: Option<BoxId>,
    pub prev_sibling: Option<BoxId>,
    pub next_sibling: Option<BoxId>,

    /// Final absolute rectangle, meaningful only while `placed` is true.
    pub rect: Rect,
    /// False until the box has a size or position to lay out with.
    pub placed: bool,

    // Transient flow state owned by the placer, reset on every reflow.
    pub(crate) flex_size: f32,
    pub(crate) flex_count: u32,

    pub scroll_offset: f32,
    pub scroll_offset_max: f32,
    /// Guards against applying one frame's wheel delta more than once.
    scroll_applied: bool,
}

impl UiBox {
    fn new(flags: BoxFlags, style: Style, parent: Option<BoxId>) -> Self {
        let mut b = Self {
            flags: BoxFlags::NONE,
            semantic_size: Sizes::default(),
            position: None,
            background_color: Color::TRANSPARENT,
            border_color: Color::TRANSPARENT,
            border_width: 0.0,
            border_radius: 0.0,
            text_color: Color::WHITE,
            padding: Padding::default(),
            font: None,
            flex_gap: 0.0,
            text: None,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            rect: Rect::default(),
            placed: false,
            flex_size: 0.0,
            flex_count: 0,
            scroll_offset: 0.0,
            scroll_offset_max: 0.0,
            scroll_applied: false,
        };
        b.reset(flags, style, parent);
        b
    }

    /// Reinitializes a reused arena slot. Scroll state is deliberately kept.
    fn reset(&mut self, flags: BoxFlags, style: Style, parent: Option<BoxId>) {
        self.flags = flags;
        self.semantic_size = Sizes::default();
        self.position = None;
        self.background_color = style.background_color;
        self.border_color = style.border_color;
        self.border_width = style.border_width;
        self.border_radius = style.border_radius;
        self.text_color = style.text_color;
        self.padding = style.padding;
        self.font = style.font;
        self.flex_gap = style.flex_gap;
        self.text = None;
        self.parent = parent;
        self.first_child = None;
        self.last_child = None;
        self.prev_sibling = None;
        self.next_sibling = None;
        self.rect = Rect::default();
        self.placed = false;
        self.flex_size = 0.0;
        self.flex_count = 0;
        self.scroll_applied = false;
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

// ============================================================================
// UiContext
// ============================================================================

/// One independent UI surface with a `new` / `begin_frame` / `end_frame`
/// lifecycle. Single-threaded; one writer owns the context for a whole frame.
pub struct UiContext {
    /// Creating more boxes than this per frame fails the frame.
    pub max_box_count: usize,

    viewport: Dimensions,
    style: StyleSheet,
    input: FrameInput,

    boxes: Vec<UiBox>,
    box_count: usize,
    current_parent: Option<BoxId>,

    /// Frame-scoped storage for attached text.
    text_data: String,
    fonts: FontRegistry,

    vertices: Vec<Vertex>,
    /// Per-parent bottom extents, reused across frames by the scroll pass.
    scroll_scratch: Vec<f32>,
}

impl UiContext {
    pub fn new(viewport: Dimensions, style: StyleSheet) -> Self {
        Self {
            max_box_count: DEFAULT_MAX_BOX_COUNT,
            viewport,
            style,
            input: FrameInput::default(),
            boxes: Vec::with_capacity(INITIAL_BOX_CAPACITY),
            box_count: 0,
            current_parent: None,
            text_data: String::new(),
            fonts: FontRegistry::default(),
            vertices: Vec::with_capacity(INITIAL_BOX_CAPACITY * 4),
            scroll_scratch: Vec::new(),
        }
    }

    /// Registers the shaper consulted for boxes whose font carries `font_id`.
    pub fn register_font(&mut self, font_id: u16, shaper: Box<dyn TextShaper>) {
        self.fonts.register(font_id, shaper);
    }

    /// Updates the root layout area, e.g. after a window resize.
    pub fn set_viewport(&mut self, viewport: Dimensions) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Dimensions {
        self.viewport
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    pub fn set_style(&mut self, style: StyleSheet) {
        self.style = style;
    }

    // ========================================================================
    // Frame lifecycle
    // ========================================================================

    /// Starts a new frame: resets the arena count and vertex buffer (storage
    /// is reused, not freed) and snapshots this frame's input.
    pub fn begin_frame(&mut self, input: FrameInput) {
        self.input = input;
        self.box_count = 0;
        self.current_parent = None;
        self.text_data.clear();
        self.vertices.clear();
    }

    /// Finishes the frame: runs the authoritative layout pass, builds the
    /// draw list and hands the vertex buffer to `render` exactly once.
    pub fn end_frame<F: FnMut(&[Vertex])>(&mut self, mut render: F) {
        self.perform_layout();
        self.build_draw_list();
        render(&self.vertices);
    }

    /// The vertex buffer produced by the last `end_frame`.
    pub fn draw_list(&self) -> &[Vertex] {
        &self.vertices
    }

    // ========================================================================
    // Box arena
    // ========================================================================

    /// Creates a box parented to the current parent and returns its
    /// interaction snapshot. The rect is zeroed at creation, so the snapshot
    /// reflects geometry only after the box has been sized and positioned;
    /// re-query with [`UiContext::interact`] for an up-to-date answer.
    pub fn create(&mut self, flags: BoxFlags) -> Result<BoxState, Error> {
        if flags.has_conflicting_flow() {
            return Err(Error::ConflictingFlags);
        }
        if self.box_count >= self.max_box_count {
            return Err(Error::CapacityExceeded);
        }

        let id = BoxId(self.box_count as u32);
        let style = self.style.box_style;
        let parent = self.current_parent;
        if self.box_count == self.boxes.len() {
            self.boxes.push(UiBox::new(flags, style, parent));
        } else {
            self.boxes[self.box_count].reset(flags, style, parent);
        }
        self.box_count += 1;

        let prev = match parent {
            Some(p) => self.boxes[p.index()].last_child,
            None => self.scan_prev_root(id),
        };
        self.boxes[id.index()].prev_sibling = prev;
        if let Some(prev) = prev {
            self.boxes[prev.index()].next_sibling = Some(id);
        }
        if let Some(p) = parent {
            if prev.is_none() {
                self.boxes[p.index()].first_child = Some(id);
            }
            self.boxes[p.index()].last_child = Some(id);
        }

        Ok(self.interact_unchecked(id))
    }

    /// Bounds-checked lookup; `None` for ids outside the current frame.
    pub fn get(&self, id: BoxId) -> Option<&UiBox> {
        if id.index() < self.box_count {
            Some(&self.boxes[id.index()])
        } else {
            None
        }
    }

    /// The id of the most recently created box this frame.
    pub fn last_id(&self) -> Option<BoxId> {
        if self.box_count == 0 {
            None
        } else {
            Some(BoxId(self.box_count as u32 - 1))
        }
    }

    pub fn box_count(&self) -> usize {
        self.box_count
    }

    fn check(&self, id: BoxId) -> Result<(), Error> {
        if id.index() < self.box_count {
            Ok(())
        } else {
            Err(Error::InvalidId)
        }
    }

    /// Nearest prior root box, scanning backward in creation order.
    fn scan_prev_root(&self, id: BoxId) -> Option<BoxId> {
        (0..id.index())
            .rev()
            .map(|i| BoxId(i as u32))
            .find(|b| self.boxes[b.index()].parent.is_none())
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Makes `id` the parent of subsequently created boxes.
    pub fn push(&mut self, id: BoxId) -> Result<(), Error> {
        self.check(id)?;
        self.current_parent = Some(id);
        Ok(())
    }

    /// Makes the most recently created box the current parent.
    pub fn push_last(&mut self) -> Result<(), Error> {
        match self.last_id() {
            Some(id) => self.push(id),
            None => Err(Error::InvalidId),
        }
    }

    /// Restores the previous parent by following the current parent's own
    /// parent link; the stack is implicit in the tree.
    pub fn pop(&mut self) -> Result<(), Error> {
        match self.current_parent {
            Some(cur) => {
                self.current_parent = self.boxes[cur.index()].parent;
                Ok(())
            }
            None => Err(Error::NoOpenParent),
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Replaces the box's flags wholesale.
    pub fn flags(&mut self, id: BoxId, flags: BoxFlags) -> Result<(), Error> {
        self.check(id)?;
        if flags.has_conflicting_flow() {
            return Err(Error::ConflictingFlags);
        }
        self.boxes[id.index()].flags = flags;
        self.reflow_siblings(id);
        self.reflow_children(id);
        Ok(())
    }

    pub fn add_flags(&mut self, id: BoxId, flags: BoxFlags) -> Result<(), Error> {
        self.check(id)?;
        let merged = self.boxes[id.index()].flags | flags;
        if merged.has_conflicting_flow() {
            return Err(Error::ConflictingFlags);
        }
        self.boxes[id.index()].flags = merged;
        self.reflow_siblings(id);
        self.reflow_children(id);
        Ok(())
    }

    pub fn remove_flags(&mut self, id: BoxId, flags: BoxFlags) -> Result<(), Error> {
        self.check(id)?;
        self.boxes[id.index()].flags &= !flags;
        self.reflow_siblings(id);
        self.reflow_children(id);
        Ok(())
    }

    pub fn semantic_size(&mut self, id: BoxId, sizes: impl Into<Sizes>) -> Result<(), Error> {
        self.check(id)?;
        self.boxes[id.index()].semantic_size = sizes.into();
        self.reflow_siblings(id);
        Ok(())
    }

    /// Pixel-size shorthand for [`UiContext::semantic_size`].
    pub fn size(&mut self, id: BoxId, width: f32, height: f32) -> Result<(), Error> {
        self.semantic_size(id, Sizes::pixels(width, height))
    }

    /// Sets the local offset relative to the parent's content origin.
    pub fn position(&mut self, id: BoxId, x: f32, y: f32) -> Result<(), Error> {
        self.check(id)?;
        self.boxes[id.index()].position = Some(Vector2::new(x, y));
        self.reflow_siblings(id);
        Ok(())
    }

    pub fn background_color(&mut self, id: BoxId, color: impl Into<Color>) -> Result<(), Error> {
        self.check(id)?;
        self.boxes[id.index()].background_color = color.into();
        Ok(())
    }

    pub fn border(&mut self, id: BoxId, color: impl Into<Color>, width: f32) -> Result<(), Error> {
        self.check(id)?;
        let b = &mut self.boxes[id.index()];
        b.border_color = color.into();
        b.border_width = width;
        Ok(())
    }

    pub fn padding(&mut self, id: BoxId, padding: impl Into<Padding>) -> Result<(), Error> {
        self.check(id)?;
        self.boxes[id.index()].padding = padding.into();
        self.reflow_siblings(id);
        self.reflow_children(id);
        Ok(())
    }

    pub fn text_color(&mut self, id: BoxId, color: impl Into<Color>) -> Result<(), Error> {
        self.check(id)?;
        self.boxes[id.index()].text_color = color.into();
        Ok(())
    }

    pub fn font(&mut self, id: BoxId, font: FontHandle) -> Result<(), Error> {
        self.check(id)?;
        self.boxes[id.index()].font = Some(font);
        self.reflow_siblings(id);
        Ok(())
    }

    /// Sets the spacing between the box's flex children.
    pub fn flex_gap(&mut self, id: BoxId, gap: f32) -> Result<(), Error> {
        self.check(id)?;
        self.boxes[id.index()].flex_gap = gap;
        self.reflow_children(id);
        Ok(())
    }

    /// Attaches text to the box. The characters are copied into the
    /// context's frame text buffer; also marks the box `DRAW_TEXT`.
    pub fn text(&mut self, id: BoxId, text: &str) -> Result<(), Error> {
        self.check(id)?;
        let start = self.text_data.len() as u32;
        self.text_data.push_str(text);
        let b = &mut self.boxes[id.index()];
        b.text = Some((start, text.len() as u32));
        b.flags |= BoxFlags::DRAW_TEXT;
        self.reflow_siblings(id);
        Ok(())
    }

    /// Moves the box to the end of `new_parent`'s child run.
    pub fn reparent(&mut self, id: BoxId, new_parent: BoxId) -> Result<(), Error> {
        self.check(id)?;
        self.check(new_parent)?;
        if id == new_parent {
            return Err(Error::CyclicReparent);
        }
        let mut cursor = self.boxes[new_parent.index()].parent;
        while let Some(ancestor) = cursor {
            if ancestor == id {
                return Err(Error::CyclicReparent);
            }
            cursor = self.boxes[ancestor.index()].parent;
        }

        let old_parent = self.boxes[id.index()].parent;
        if old_parent == Some(new_parent) {
            return Ok(());
        }

        self.unlink(id);
        let prev = self.boxes[new_parent.index()].last_child;
        {
            let b = &mut self.boxes[id.index()];
            b.parent = Some(new_parent);
            b.prev_sibling = prev;
            b.next_sibling = None;
        }
        if let Some(prev) = prev {
            self.boxes[prev.index()].next_sibling = Some(id);
        } else {
            self.boxes[new_parent.index()].first_child = Some(id);
        }
        self.boxes[new_parent.index()].last_child = Some(id);

        self.reflow(old_parent);
        self.reflow(Some(new_parent));
        Ok(())
    }

    fn unlink(&mut self, id: BoxId) {
        let (parent, prev, next) = {
            let b = &self.boxes[id.index()];
            (b.parent, b.prev_sibling, b.next_sibling)
        };
        if let Some(prev) = prev {
            self.boxes[prev.index()].next_sibling = next;
        }
        if let Some(next) = next {
            self.boxes[next.index()].prev_sibling = prev;
        }
        if let Some(p) = parent {
            let pb = &mut self.boxes[p.index()];
            if pb.first_child == Some(id) {
                pb.first_child = next;
            }
            if pb.last_child == Some(id) {
                pb.last_child = prev;
            }
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// The box's absolute rectangle as of its last placement.
    pub fn computed_rect(&self, id: BoxId) -> Result<Rect, Error> {
        self.check(id)?;
        Ok(self.boxes[id.index()].rect)
    }

    /// Resolved pixel extent of the box.
    pub fn computed_size(&self, id: BoxId) -> Result<Dimensions, Error> {
        let rect = self.computed_rect(id)?;
        Ok(Dimensions::new(rect.width(), rect.height()))
    }

    /// Resolved absolute position of the box's top-left corner.
    pub fn computed_position(&self, id: BoxId) -> Result<Vector2, Error> {
        let rect = self.computed_rect(id)?;
        Ok(Vector2::new(rect.x0, rect.y0))
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Re-derives hover/click state from the box's current rect and applies
    /// this frame's wheel delta to a scroll container (at most once per box
    /// per frame).
    pub fn interact(&mut self, id: BoxId) -> Result<BoxState, Error> {
        self.check(id)?;
        Ok(self.interact_unchecked(id))
    }

    fn interact_unchecked(&mut self, id: BoxId) -> BoxState {
        let input = self.input;
        let b = &mut self.boxes[id.index()];
        let inside = b.rect.contains(input.mouse_position);
        let state = BoxState {
            id,
            hovered: b.flags.contains(BoxFlags::HOVERABLE) && inside,
            clicked: b.flags.contains(BoxFlags::CLICKABLE) && input.left_down && inside,
        };

        if b.flags.contains(BoxFlags::SCROLL_VERTICAL)
            && input.scroll_delta != 0.0
            && !b.scroll_applied
        {
            b.scroll_applied = true;
            b.scroll_offset = (b.scroll_offset - input.scroll_delta * SCROLL_MULTIPLIER)
                .clamp(0.0, b.scroll_offset_max);
        }

        state
    }

    // ========================================================================
    // Size resolution and placement
    // ========================================================================

    fn box_font(&self, id: BoxId) -> Option<FontHandle> {
        self.boxes[id.index()].font.or(self.style.box_style.font)
    }

    fn box_text(&self, id: BoxId) -> Option<&str> {
        let (start, len) = self.boxes[id.index()].text?;
        Some(&self.text_data[start as usize..(start + len) as usize])
    }

    fn measure_text(&self, id: BoxId) -> Dimensions {
        let Some(font) = self.box_font(id) else {
            return Dimensions::default();
        };
        let Some(shaper) = self.fonts.get(font.font_id) else {
            return Dimensions::default();
        };
        let Some(text) = self.box_text(id) else {
            return Dimensions::default();
        };
        shaper.measure(text, font.pixel_size)
    }

    fn resolve_axis(&self, id: BoxId, axis: Axis, avail: Dimensions) -> f32 {
        let b = &self.boxes[id.index()];
        let descriptor = match axis {
            Axis::X => b.semantic_size.x,
            Axis::Y => b.semantic_size.y,
        };
        match descriptor.kind {
            SizeType::Null => 0.0,
            SizeType::Pixels => descriptor.value,
            // No clamping: out-of-range fractions propagate as declared.
            SizeType::Percent => match axis {
                Axis::X => descriptor.value * avail.width,
                Axis::Y => descriptor.value * avail.height,
            },
            SizeType::TextContent => match axis {
                Axis::X => self.measure_text(id).width + b.padding.left + b.padding.right,
                Axis::Y => {
                    let line = self.box_font(id).map_or(0.0, |f| f.pixel_size);
                    line + b.padding.top + b.padding.bottom
                }
            },
        }
    }

    /// Content origin and content-area size offered to children of `parent`.
    /// Root boxes lay out against the viewport.
    fn content_area(&self, parent: Option<BoxId>) -> (Vector2, Dimensions) {
        match parent {
            Some(p) => {
                let pb = &self.boxes[p.index()];
                (
                    Vector2::new(pb.rect.x0 + pb.padding.left, pb.rect.y0 + pb.padding.top),
                    content_extent(pb.rect, pb.padding),
                )
            }
            None => (Vector2::ZERO, self.viewport),
        }
    }

    /// Nearest already-placed previous sibling, following the sibling chain.
    fn prev_placed_sibling(&self, id: BoxId) -> Option<BoxId> {
        let mut cursor = self.boxes[id.index()].prev_sibling;
        while let Some(s) = cursor {
            if self.boxes[s.index()].placed {
                return Some(s);
            }
            cursor = self.boxes[s.index()].prev_sibling;
        }
        None
    }

    /// Places one box: resolves both axes, applies the parent's flex flow
    /// and writes the computed rect. A box with neither a size nor a
    /// position is left unplaced.
    fn place(&mut self, id: BoxId) {
        let idx = id.index();
        let (semantic, position, flags, parent) = {
            let b = &self.boxes[idx];
            (b.semantic_size, b.position, b.flags, b.parent)
        };
        if position.is_none() && semantic.is_null() {
            self.boxes[idx].placed = false;
            return;
        }

        let (origin, avail) = self.content_area(parent);
        let width = self.resolve_axis(id, Axis::X, avail);
        let height = self.resolve_axis(id, Axis::Y, avail);

        let local = position.unwrap_or(Vector2::ZERO);
        let mut pos = Vector2::new(origin.x + local.x, origin.y + local.y);

        if flags.contains(BoxFlags::POSITION_ABSOLUTE) {
            pos = local;
        } else if let Some(p) = parent {
            let pidx = p.index();
            let pflags = self.boxes[pidx].flags;
            let gap = self.boxes[pidx].flex_gap;
            let wrap = !pflags.contains(BoxFlags::FLEX_NOWRAP);

            if pflags.contains(BoxFlags::FLEX_ROW) {
                if height > self.boxes[pidx].flex_size {
                    self.boxes[pidx].flex_size = height;
                }
                if let Some(prev) = self.prev_placed_sibling(id) {
                    pos.x = self.boxes[prev.index()].rect.x1 + gap;
                    if wrap && pos.x + width > origin.x + avail.width {
                        pos.x = origin.x;
                        self.boxes[pidx].flex_count += 1;
                    }
                    pos.y += self.boxes[pidx].flex_count as f32 * self.boxes[pidx].flex_size;
                }
            } else if pflags.contains(BoxFlags::FLEX_COLUMN) {
                if width > self.boxes[pidx].flex_size {
                    self.boxes[pidx].flex_size = width;
                }
                if let Some(prev) = self.prev_placed_sibling(id) {
                    pos.y = self.boxes[prev.index()].rect.y1 + gap;
                    if wrap && pos.y + height > origin.y + avail.height {
                        pos.y = origin.y;
                        self.boxes[pidx].flex_count += 1;
                    }
                    pos.x += self.boxes[pidx].flex_count as f32 * self.boxes[pidx].flex_size;
                }
            }
        }

        let b = &mut self.boxes[idx];
        b.rect = Rect::new(pos.x, pos.y, pos.x + width, pos.y + height);
        b.placed = true;
    }

    /// Recomputes the rects of every child of `parent` in sibling order,
    /// restarting the parent's flow cursors. Idempotent for unchanged inputs.
    fn reflow(&mut self, parent: Option<BoxId>) {
        match parent {
            Some(p) => {
                let pidx = p.index();
                self.boxes[pidx].flex_size = 0.0;
                self.boxes[pidx].flex_count = 0;
                let mut child = self.boxes[pidx].first_child;
                while let Some(c) = child {
                    self.place(c);
                    child = self.boxes[c.index()].next_sibling;
                }
            }
            None => {
                for i in 0..self.box_count {
                    if self.boxes[i].parent.is_none() {
                        self.place(BoxId(i as u32));
                    }
                }
            }
        }
    }

    fn reflow_siblings(&mut self, id: BoxId) {
        let parent = self.boxes[id.index()].parent;
        self.reflow(parent);
    }

    fn reflow_children(&mut self, id: BoxId) {
        self.reflow(Some(id));
    }

    /// Recomputes the sibling run containing `id` and returns the box's
    /// rect. Calling this twice with unchanged inputs yields the identical
    /// rectangle.
    pub fn compute_rect(&mut self, id: BoxId) -> Result<Rect, Error> {
        self.check(id)?;
        self.reflow_siblings(id);
        Ok(self.boxes[id.index()].rect)
    }

    /// The authoritative layout pass: clears all transient flow state, then
    /// places every box parent-first (creation order guarantees parents
    /// precede children within one subtree) and refreshes scroll ranges.
    fn perform_layout(&mut self) {
        for i in 0..self.box_count {
            let b = &mut self.boxes[i];
            b.flex_size = 0.0;
            b.flex_count = 0;
            b.placed = false;
        }
        for i in 0..self.box_count {
            if self.boxes[i].parent.is_none() {
                self.place_subtree(BoxId(i as u32));
            }
        }
        self.update_scroll_ranges();
    }

    fn place_subtree(&mut self, id: BoxId) {
        self.place(id);
        let mut child = self.boxes[id.index()].first_child;
        while let Some(c) = child {
            self.place_subtree(c);
            child = self.boxes[c.index()].next_sibling;
        }
    }

    /// Sets `scroll_offset_max = max(0, content_height - viewport_height)`
    /// for every scroll container and clamps its offset into range.
    fn update_scroll_ranges(&mut self) {
        self.scroll_scratch.clear();
        self.scroll_scratch.resize(self.box_count, f32::NEG_INFINITY);
        for i in 0..self.box_count {
            let b = &self.boxes[i];
            if !b.placed {
                continue;
            }
            if let Some(p) = b.parent {
                let pidx = p.index();
                if b.rect.y1 > self.scroll_scratch[pidx] {
                    self.scroll_scratch[pidx] = b.rect.y1;
                }
            }
        }
        for i in 0..self.box_count {
            let (placed, scrolls, rect, padding) = {
                let b = &self.boxes[i];
                (
                    b.placed,
                    b.flags.contains(BoxFlags::SCROLL_VERTICAL),
                    b.rect,
                    b.padding,
                )
            };
            if !placed || !scrolls {
                continue;
            }
            let bottom = self.scroll_scratch[i];
            let content_height = if bottom == f32::NEG_INFINITY {
                0.0
            } else {
                bottom - (rect.y0 + padding.top)
            };
            let viewport_height = content_extent(rect, padding).height;
            let max = (content_height - viewport_height).max(0.0);
            let b = &mut self.boxes[i];
            b.scroll_offset_max = max;
            b.scroll_offset = b.scroll_offset.clamp(0.0, max);
        }
    }

    // ========================================================================
    // Draw list
    // ========================================================================

    /// Walks the finished tree once in creation order and appends background,
    /// border, glyph and scrollbar quads, applying scroll translation and
    /// vertical clipping for children of scroll containers.
    fn build_draw_list(&mut self) {
        self.vertices.clear();

        for i in 0..self.box_count {
            let b = self.boxes[i];
            if !b.placed {
                continue;
            }

            // Children of a vertically scrolling parent are translated by the
            // parent's offset and clipped to its band.
            let mut rect = b.rect;
            let mut band: Option<Rect> = None;
            if let Some(p) = b.parent {
                let pb = &self.boxes[p.index()];
                if pb.flags.contains(BoxFlags::SCROLL_VERTICAL) {
                    rect.y0 -= pb.scroll_offset;
                    rect.y1 -= pb.scroll_offset;
                    band = Some(pb.rect);
                }
            }

            let visible = match band {
                Some(band) => clip_rect_vertical(rect, band),
                None => Some(rect),
            };

            if let Some(vis) = visible {
                if b.flags.contains(BoxFlags::DRAW_BACKGROUND) {
                    push_quad(&mut self.vertices, vis, SOLID_UV, 0.0, b.background_color);
                }
                if b.flags.contains(BoxFlags::DRAW_BORDER) {
                    push_border(&mut self.vertices, vis, b.border_color, b.border_width);
                }
                if b.flags.contains(BoxFlags::SCROLL_VERTICAL)
                    && b.flags.contains(BoxFlags::DRAW_SCROLLBAR)
                    && b.scroll_offset_max > 0.0
                {
                    push_scrollbar(&mut self.vertices, vis, &b);
                }
            }

            if let Some((start, len)) = b.text {
                let id = BoxId(i as u32);
                let Some(font) = self.box_font(id) else {
                    continue;
                };
                let Some(shaper) = self.fonts.get(font.font_id) else {
                    continue;
                };
                let text = &self.text_data[start as usize..(start + len) as usize];

                let mut cursor = Vector2::new(rect.x0 + b.padding.left, rect.y0 + b.padding.top);
                if b.flags.contains(BoxFlags::TEXT_CENTER) {
                    let measured = shaper.measure(text, font.pixel_size);
                    let content_width = content_extent(rect, b.padding).width;
                    cursor.x += ((content_width - measured.width) / 2.0).max(0.0);
                }

                for c in text.chars() {
                    // Control characters are skipped; no newline handling.
                    if (c as u32) < 32 {
                        continue;
                    }
                    let quad = shaper.glyph(c, &mut cursor, font.pixel_size);
                    let glyph_rect = Rect::new(quad.x0, quad.y0, quad.x1, quad.y1);
                    let glyph_uv = Rect::new(quad.s0, quad.t0, quad.s1, quad.t1);
                    let clipped = match band {
                        Some(band) => clip_glyph_vertical(glyph_rect, glyph_uv, band),
                        None => Some((glyph_rect, glyph_uv)),
                    };
                    if let Some((gr, guv)) = clipped {
                        push_quad(
                            &mut self.vertices,
                            gr,
                            guv,
                            font.atlas_index as f32,
                            b.text_color,
                        );
                    }
                }
            }
        }
    }
}

// ============================================================================
// Draw helpers
// ============================================================================

/// Clips `rect` to the vertical band of `band`; `None` when fully outside.
fn clip_rect_vertical(rect: Rect, band: Rect) -> Option<Rect> {
    if rect.y1 <= band.y0 || rect.y0 >= band.y1 {
        return None;
    }
    Some(Rect::new(
        rect.x0,
        rect.y0.max(band.y0),
        rect.x1,
        rect.y1.min(band.y1),
    ))
}

/// Clips a glyph to the band, shrinking its UVs proportionally so the
/// visible part samples the matching slice of the atlas.
fn clip_glyph_vertical(rect: Rect, uv: Rect, band: Rect) -> Option<(Rect, Rect)> {
    if rect.y1 <= band.y0 || rect.y0 >= band.y1 {
        return None;
    }
    let height = rect.height();
    if height <= 0.0 {
        return Some((rect, uv));
    }
    let mut out = rect;
    let mut out_uv = uv;
    let uv_height = uv.y1 - uv.y0;
    if rect.y0 < band.y0 {
        let cut = (band.y0 - rect.y0) / height;
        out.y0 = band.y0;
        out_uv.y0 = uv.y0 + cut * uv_height;
    }
    if rect.y1 > band.y1 {
        let cut = (rect.y1 - band.y1) / height;
        out.y1 = band.y1;
        out_uv.y1 = uv.y1 - cut * uv_height;
    }
    Some((out, out_uv))
}

/// Four thin quads: top and bottom span the full width, left and right fill
/// the remaining vertical span between them.
fn push_border(vertices: &mut Vec<Vertex>, rect: Rect, color: Color, width: f32) {
    let w = width;
    push_quad(
        vertices,
        Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + w),
        SOLID_UV,
        0.0,
        color,
    );
    push_quad(
        vertices,
        Rect::new(rect.x0, rect.y1 - w, rect.x1, rect.y1),
        SOLID_UV,
        0.0,
        color,
    );
    push_quad(
        vertices,
        Rect::new(rect.x0, rect.y0 + w, rect.x0 + w, rect.y1 - w),
        SOLID_UV,
        0.0,
        color,
    );
    push_quad(
        vertices,
        Rect::new(rect.x1 - w, rect.y0 + w, rect.x1, rect.y1 - w),
        SOLID_UV,
        0.0,
        color,
    );
}

/// One thumb quad on the container's right edge, sized by the
/// viewport-to-content ratio and offset by the current scroll fraction.
fn push_scrollbar(vertices: &mut Vec<Vertex>, rect: Rect, b: &UiBox) {
    let viewport_height = content_extent(rect, b.padding).height;
    let content_height = viewport_height + b.scroll_offset_max;
    if content_height <= 0.0 {
        return;
    }
    let track_height = rect.height();
    let thumb_height =
        (track_height * viewport_height / content_height).max(SCROLLBAR_MIN_THUMB);
    let t = b.scroll_offset / b.scroll_offset_max;
    let thumb_y = rect.y0 + t * (track_height - thumb_height);
    push_quad(
        vertices,
        Rect::new(
            rect.x1 - SCROLLBAR_WIDTH,
            thumb_y,
            rect.x1,
            thumb_y + thumb_height,
        ),
        SOLID_UV,
        0.0,
        b.border_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MonoShaper;

    fn ctx() -> UiContext {
        UiContext::new(Dimensions::new(800.0, 600.0), StyleSheet::default())
    }

    fn ctx_sized(width: f32, height: f32) -> UiContext {
        UiContext::new(Dimensions::new(width, height), StyleSheet::default())
    }

    #[test]
    fn get_before_create_is_not_found() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        assert!(ui.get(BoxId(0)).is_none());
        assert_eq!(ui.last_id(), None);
    }

    #[test]
    fn create_initializes_defaults() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let state = ui.create(BoxFlags::NONE).unwrap();
        assert_eq!(state.id, BoxId(0));
        assert!(!state.hovered);
        assert!(!state.clicked);

        let b = ui.get(state.id).unwrap();
        assert!(b.semantic_size.is_null());
        assert_eq!(b.position, None);
        assert_eq!(b.rect, Rect::default());
        assert_eq!(b.parent, None);
        assert_eq!(b.prev_sibling, None);
        assert!(!b.placed);
    }

    #[test]
    fn ids_are_dense_and_frame_scoped() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        for i in 0..5 {
            let state = ui.create(BoxFlags::NONE).unwrap();
            assert_eq!(state.id.raw(), i);
        }
        assert!(ui.get(BoxId(5)).is_none());

        ui.begin_frame(FrameInput::default());
        assert!(ui.get(BoxId(0)).is_none());
        let state = ui.create(BoxFlags::NONE).unwrap();
        assert_eq!(state.id, BoxId(0));
    }

    #[test]
    fn setters_reject_invalid_ids() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let bogus = BoxId(7);
        assert_eq!(ui.size(bogus, 1.0, 1.0), Err(Error::InvalidId));
        assert_eq!(ui.position(bogus, 0.0, 0.0), Err(Error::InvalidId));
        assert_eq!(
            ui.background_color(bogus, Color::WHITE),
            Err(Error::InvalidId)
        );
        assert_eq!(ui.computed_rect(bogus), Err(Error::InvalidId));
    }

    #[test]
    fn capacity_is_diagnosed() {
        let mut ui = ctx();
        ui.max_box_count = 2;
        ui.begin_frame(FrameInput::default());
        ui.create(BoxFlags::NONE).unwrap();
        ui.create(BoxFlags::NONE).unwrap();
        assert_eq!(ui.create(BoxFlags::NONE), Err(Error::CapacityExceeded));
    }

    #[test]
    fn conflicting_flex_flags_are_rejected() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        assert_eq!(
            ui.create(BoxFlags::FLEX_ROW | BoxFlags::FLEX_COLUMN),
            Err(Error::ConflictingFlags)
        );
        let id = ui.create(BoxFlags::FLEX_ROW).unwrap().id;
        assert_eq!(
            ui.add_flags(id, BoxFlags::FLEX_COLUMN),
            Err(Error::ConflictingFlags)
        );
        // The failed setter must not have mutated the box.
        assert_eq!(ui.get(id).unwrap().flags, BoxFlags::FLEX_ROW);
    }

    #[test]
    fn pop_without_parent_fails() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        assert_eq!(ui.pop(), Err(Error::NoOpenParent));

        let id = ui.create(BoxFlags::NONE).unwrap().id;
        ui.push(id).unwrap();
        assert_eq!(ui.pop(), Ok(()));
        assert_eq!(ui.pop(), Err(Error::NoOpenParent));
    }

    #[test]
    fn push_pop_nests_parents() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let outer = ui.create(BoxFlags::NONE).unwrap().id;
        ui.push(outer).unwrap();
        let inner = ui.create(BoxFlags::NONE).unwrap().id;
        ui.push_last().unwrap();
        let leaf = ui.create(BoxFlags::NONE).unwrap().id;
        ui.pop().unwrap();
        let inner_sibling = ui.create(BoxFlags::NONE).unwrap().id;

        assert_eq!(ui.get(inner).unwrap().parent, Some(outer));
        assert_eq!(ui.get(leaf).unwrap().parent, Some(inner));
        assert_eq!(ui.get(inner_sibling).unwrap().parent, Some(outer));
        assert_eq!(ui.get(inner_sibling).unwrap().prev_sibling, Some(inner));
        assert_eq!(ui.get(inner).unwrap().next_sibling, Some(inner_sibling));
        assert_eq!(ui.get(outer).unwrap().first_child, Some(inner));
        assert_eq!(ui.get(outer).unwrap().last_child, Some(inner_sibling));
    }

    #[test]
    fn pixel_sizing_and_position() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let id = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(id, 200.0, 100.0).unwrap();
        ui.position(id, 10.0, 10.0).unwrap();
        assert_eq!(
            ui.computed_rect(id).unwrap(),
            Rect::new(10.0, 10.0, 210.0, 110.0)
        );
    }

    #[test]
    fn percent_sizing_resolves_against_parent_content() {
        let mut ui = ctx_sized(1000.0, 1000.0);
        ui.begin_frame(FrameInput::default());
        let parent = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(parent, 600.0, 600.0).unwrap();
        ui.position(parent, 0.0, 0.0).unwrap();
        ui.push(parent).unwrap();
        let child = ui.create(BoxFlags::NONE).unwrap().id;
        ui.semantic_size(child, Sizes::percent(0.5, 0.5)).unwrap();
        ui.position(child, 0.0, 0.0).unwrap();
        ui.pop().unwrap();

        assert_eq!(
            ui.computed_rect(child).unwrap(),
            Rect::new(0.0, 0.0, 300.0, 300.0)
        );
    }

    #[test]
    fn out_of_range_percent_propagates() {
        let mut ui = ctx_sized(100.0, 100.0);
        ui.begin_frame(FrameInput::default());
        let id = ui.create(BoxFlags::NONE).unwrap().id;
        ui.semantic_size(id, Sizes::percent(2.0, 1.0)).unwrap();
        ui.position(id, 0.0, 0.0).unwrap();
        assert_eq!(ui.computed_size(id).unwrap().width, 200.0);
    }

    #[test]
    fn padding_shrinks_child_content_area() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let parent = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(parent, 200.0, 200.0).unwrap();
        ui.position(parent, 0.0, 0.0).unwrap();
        ui.padding(parent, 10.0).unwrap();
        ui.push(parent).unwrap();
        let child = ui.create(BoxFlags::NONE).unwrap().id;
        ui.semantic_size(child, Sizes::percent(1.0, 1.0)).unwrap();
        ui.position(child, 0.0, 0.0).unwrap();
        ui.pop().unwrap();

        assert_eq!(
            ui.computed_rect(child).unwrap(),
            Rect::new(10.0, 10.0, 190.0, 190.0)
        );
    }

    #[test]
    fn absolute_position_ignores_parent_origin() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let parent = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(parent, 100.0, 100.0).unwrap();
        ui.position(parent, 100.0, 100.0).unwrap();
        ui.push(parent).unwrap();
        let child = ui.create(BoxFlags::POSITION_ABSOLUTE).unwrap().id;
        ui.size(child, 10.0, 10.0).unwrap();
        ui.position(child, 500.0, 500.0).unwrap();
        ui.pop().unwrap();

        assert_eq!(
            ui.computed_rect(child).unwrap(),
            Rect::new(500.0, 500.0, 510.0, 510.0)
        );
    }

    #[test]
    fn flag_toggles_update_placement_eagerly() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let parent = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(parent, 100.0, 100.0).unwrap();
        ui.position(parent, 100.0, 100.0).unwrap();
        ui.push(parent).unwrap();
        let child = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(child, 10.0, 10.0).unwrap();
        ui.position(child, 5.0, 5.0).unwrap();
        ui.pop().unwrap();

        let relative = Rect::new(105.0, 105.0, 115.0, 115.0);
        let absolute = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert_eq!(ui.computed_rect(child).unwrap(), relative);

        // Toggling a placement-affecting flag must move the rect without
        // waiting for end_frame.
        ui.add_flags(child, BoxFlags::POSITION_ABSOLUTE).unwrap();
        assert_eq!(ui.computed_rect(child).unwrap(), absolute);

        ui.remove_flags(child, BoxFlags::POSITION_ABSOLUTE).unwrap();
        assert_eq!(ui.computed_rect(child).unwrap(), relative);

        ui.flags(child, BoxFlags::POSITION_ABSOLUTE).unwrap();
        assert_eq!(ui.computed_rect(child).unwrap(), absolute);
    }

    #[test]
    fn unconfigured_box_is_never_placed() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let id = ui.create(BoxFlags::DRAW_BACKGROUND).unwrap().id;
        ui.end_frame(|_| {});
        assert!(!ui.get(id).unwrap().placed);
        assert!(ui.draw_list().is_empty());
    }

    fn declare_flex_row(ui: &mut UiContext, container_width: f32) -> (BoxId, [BoxId; 3]) {
        let container = ui.create(BoxFlags::FLEX_ROW).unwrap().id;
        ui.size(container, container_width, 100.0).unwrap();
        ui.position(container, 0.0, 0.0).unwrap();
        ui.push(container).unwrap();
        let mut children = [BoxId(0); 3];
        for child in &mut children {
            let id = ui.create(BoxFlags::NONE).unwrap().id;
            ui.size(id, 50.0, 20.0).unwrap();
            ui.position(id, 0.0, 0.0).unwrap();
            *child = id;
        }
        ui.pop().unwrap();
        (container, children)
    }

    #[test]
    fn flex_row_wraps_on_overflow() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let (_, children) = declare_flex_row(&mut ui, 120.0);
        ui.end_frame(|_| {});

        assert_eq!(
            ui.computed_rect(children[0]).unwrap(),
            Rect::new(0.0, 0.0, 50.0, 20.0)
        );
        assert_eq!(
            ui.computed_rect(children[1]).unwrap(),
            Rect::new(50.0, 0.0, 100.0, 20.0)
        );
        // Third child overflows 120 and wraps to a new row at y = row height.
        assert_eq!(
            ui.computed_rect(children[2]).unwrap(),
            Rect::new(0.0, 20.0, 50.0, 40.0)
        );
    }

    #[test]
    fn flex_nowrap_overflows_instead_of_wrapping() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let container = ui
            .create(BoxFlags::FLEX_ROW | BoxFlags::FLEX_NOWRAP)
            .unwrap()
            .id;
        ui.size(container, 120.0, 100.0).unwrap();
        ui.position(container, 0.0, 0.0).unwrap();
        ui.push(container).unwrap();
        let mut last = BoxId(0);
        for _ in 0..3 {
            last = ui.create(BoxFlags::NONE).unwrap().id;
            ui.size(last, 50.0, 20.0).unwrap();
            ui.position(last, 0.0, 0.0).unwrap();
        }
        ui.pop().unwrap();
        ui.end_frame(|_| {});

        assert_eq!(
            ui.computed_rect(last).unwrap(),
            Rect::new(100.0, 0.0, 150.0, 20.0)
        );
    }

    #[test]
    fn flex_row_respects_gap() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let container = ui.create(BoxFlags::FLEX_ROW).unwrap().id;
        ui.size(container, 400.0, 100.0).unwrap();
        ui.position(container, 0.0, 0.0).unwrap();
        ui.flex_gap(container, 8.0).unwrap();
        ui.push(container).unwrap();
        let a = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(a, 50.0, 20.0).unwrap();
        ui.position(a, 0.0, 0.0).unwrap();
        let b = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(b, 50.0, 20.0).unwrap();
        ui.position(b, 0.0, 0.0).unwrap();
        ui.pop().unwrap();
        ui.end_frame(|_| {});

        assert_eq!(ui.computed_rect(b).unwrap().x0, 58.0);
    }

    #[test]
    fn flex_column_wraps_on_overflow() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let container = ui.create(BoxFlags::FLEX_COLUMN).unwrap().id;
        ui.size(container, 100.0, 50.0).unwrap();
        ui.position(container, 0.0, 0.0).unwrap();
        ui.push(container).unwrap();
        let mut children = [BoxId(0); 3];
        for child in &mut children {
            let id = ui.create(BoxFlags::NONE).unwrap().id;
            ui.size(id, 30.0, 20.0).unwrap();
            ui.position(id, 0.0, 0.0).unwrap();
            *child = id;
        }
        ui.pop().unwrap();
        ui.end_frame(|_| {});

        assert_eq!(
            ui.computed_rect(children[0]).unwrap(),
            Rect::new(0.0, 0.0, 30.0, 20.0)
        );
        assert_eq!(
            ui.computed_rect(children[1]).unwrap(),
            Rect::new(0.0, 20.0, 30.0, 40.0)
        );
        // Third child would end at y = 60 > 50: wraps into a second column.
        assert_eq!(
            ui.computed_rect(children[2]).unwrap(),
            Rect::new(30.0, 0.0, 60.0, 20.0)
        );
    }

    #[test]
    fn compute_rect_is_idempotent() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let (_, children) = declare_flex_row(&mut ui, 120.0);

        let first = ui.compute_rect(children[2]).unwrap();
        let second = ui.compute_rect(children[2]).unwrap();
        assert_eq!(first, second);

        // Re-issuing an identical setter must not move anything either.
        ui.size(children[2], 50.0, 20.0).unwrap();
        assert_eq!(ui.computed_rect(children[2]).unwrap(), first);
    }

    #[test]
    fn layout_pass_fixes_children_sized_before_parent() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let parent = ui.create(BoxFlags::NONE).unwrap().id;
        ui.position(parent, 0.0, 0.0).unwrap();
        ui.push(parent).unwrap();
        let child = ui.create(BoxFlags::NONE).unwrap().id;
        ui.semantic_size(child, Sizes::percent(0.5, 0.5)).unwrap();
        ui.position(child, 0.0, 0.0).unwrap();
        ui.pop().unwrap();
        // Parent sized after the child was declared.
        ui.size(parent, 400.0, 400.0).unwrap();
        ui.end_frame(|_| {});

        assert_eq!(
            ui.computed_rect(child).unwrap(),
            Rect::new(0.0, 0.0, 200.0, 200.0)
        );
    }

    #[test]
    fn hover_uses_half_open_interval() {
        let declare = |ui: &mut UiContext, mouse: Vector2| {
            ui.begin_frame(FrameInput {
                mouse_position: mouse,
                ..FrameInput::default()
            });
            let id = ui.create(BoxFlags::HOVERABLE).unwrap().id;
            ui.size(id, 100.0, 100.0).unwrap();
            ui.position(id, 10.0, 10.0).unwrap();
            ui.interact(id).unwrap()
        };

        let mut ui = ctx();
        assert!(declare(&mut ui, Vector2::new(109.9, 109.9)).hovered);
        assert!(!declare(&mut ui, Vector2::new(110.0, 110.0)).hovered);
        assert!(!declare(&mut ui, Vector2::new(9.9, 9.9)).hovered);
        assert!(declare(&mut ui, Vector2::new(10.0, 10.0)).hovered);
    }

    #[test]
    fn click_requires_flag_button_and_containment() {
        let declare = |ui: &mut UiContext, flags: BoxFlags, down: bool| {
            ui.begin_frame(FrameInput {
                mouse_position: Vector2::new(50.0, 50.0),
                left_down: down,
                scroll_delta: 0.0,
            });
            let id = ui.create(flags).unwrap().id;
            ui.size(id, 100.0, 100.0).unwrap();
            ui.position(id, 0.0, 0.0).unwrap();
            ui.interact(id).unwrap()
        };

        let mut ui = ctx();
        assert!(declare(&mut ui, BoxFlags::CLICKABLE, true).clicked);
        assert!(!declare(&mut ui, BoxFlags::CLICKABLE, false).clicked);
        assert!(!declare(&mut ui, BoxFlags::HOVERABLE, true).clicked);
    }

    fn declare_scroll_frame(ui: &mut UiContext, delta: f32) -> BoxId {
        ui.begin_frame(FrameInput {
            scroll_delta: delta,
            ..FrameInput::default()
        });
        let container = ui.create(BoxFlags::SCROLL_VERTICAL).unwrap().id;
        ui.size(container, 100.0, 200.0).unwrap();
        ui.position(container, 0.0, 0.0).unwrap();
        ui.push(container).unwrap();
        let child = ui.create(BoxFlags::DRAW_BACKGROUND).unwrap().id;
        ui.size(child, 50.0, 800.0).unwrap();
        ui.position(child, 0.0, 0.0).unwrap();
        ui.pop().unwrap();
        ui.end_frame(|_| {});
        container
    }

    #[test]
    fn scroll_range_is_content_minus_viewport() {
        let mut ui = ctx();
        let container = declare_scroll_frame(&mut ui, 0.0);
        assert_eq!(ui.get(container).unwrap().scroll_offset_max, 600.0);
    }

    #[test]
    fn scroll_offset_saturates_at_both_ends() {
        let mut ui = ctx();
        declare_scroll_frame(&mut ui, 0.0);

        // Deltas worth 1000 pixels after the multiplier; range caps at 600.
        let mut container = BoxId(0);
        for _ in 0..10 {
            container = declare_scroll_frame(&mut ui, -10.0);
            let offset = ui.get(container).unwrap().scroll_offset;
            assert!((0.0..=600.0).contains(&offset));
        }
        assert_eq!(ui.get(container).unwrap().scroll_offset, 600.0);

        // Scrolling back far past the top clamps to zero.
        for _ in 0..10 {
            container = declare_scroll_frame(&mut ui, 10.0);
        }
        assert_eq!(ui.get(container).unwrap().scroll_offset, 0.0);
    }

    #[test]
    fn underfull_scroll_container_has_zero_range() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let container = ui.create(BoxFlags::SCROLL_VERTICAL).unwrap().id;
        ui.size(container, 100.0, 200.0).unwrap();
        ui.position(container, 0.0, 0.0).unwrap();
        ui.push(container).unwrap();
        let child = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(child, 50.0, 80.0).unwrap();
        ui.position(child, 0.0, 0.0).unwrap();
        ui.pop().unwrap();
        ui.end_frame(|_| {});

        assert_eq!(ui.get(container).unwrap().scroll_offset_max, 0.0);
    }

    #[test]
    fn reparent_moves_box_between_parents() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let a = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(a, 100.0, 100.0).unwrap();
        ui.position(a, 0.0, 0.0).unwrap();
        let b = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(b, 100.0, 100.0).unwrap();
        ui.position(b, 200.0, 0.0).unwrap();
        ui.push(a).unwrap();
        let child = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(child, 10.0, 10.0).unwrap();
        ui.position(child, 5.0, 5.0).unwrap();
        ui.pop().unwrap();

        ui.reparent(child, b).unwrap();
        assert_eq!(ui.get(child).unwrap().parent, Some(b));
        assert_eq!(ui.get(a).unwrap().first_child, None);
        assert_eq!(ui.get(b).unwrap().first_child, Some(child));
        assert_eq!(
            ui.computed_rect(child).unwrap(),
            Rect::new(205.0, 5.0, 215.0, 15.0)
        );
    }

    #[test]
    fn reparent_rejects_cycles() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let a = ui.create(BoxFlags::NONE).unwrap().id;
        ui.push(a).unwrap();
        let b = ui.create(BoxFlags::NONE).unwrap().id;
        ui.pop().unwrap();

        assert_eq!(ui.reparent(a, a), Err(Error::CyclicReparent));
        assert_eq!(ui.reparent(a, b), Err(Error::CyclicReparent));
    }

    #[test]
    fn text_content_sizing_uses_shaper_and_padding() {
        let mut ui = ctx();
        ui.register_font(1, Box::new(MonoShaper::new(8.0)));
        ui.begin_frame(FrameInput::default());
        let id = ui.create(BoxFlags::NONE).unwrap().id;
        ui.font(id, FontHandle::new(1, 16.0, 2)).unwrap();
        ui.padding(id, Padding::new(2.0, 3.0, 4.0, 5.0)).unwrap();
        ui.text(id, "hello").unwrap();
        ui.semantic_size(id, Sizes::text_content()).unwrap();
        ui.position(id, 0.0, 0.0).unwrap();

        let size = ui.computed_size(id).unwrap();
        assert_eq!(size.width, 5.0 * 8.0 + 5.0 + 3.0);
        assert_eq!(size.height, 16.0 + 2.0 + 4.0);
    }

    #[test]
    fn text_content_sizing_without_font_is_padding_only() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let id = ui.create(BoxFlags::NONE).unwrap().id;
        ui.padding(id, Padding::all(4.0)).unwrap();
        ui.text(id, "hello").unwrap();
        ui.semantic_size(id, Sizes::text_content()).unwrap();
        ui.position(id, 0.0, 0.0).unwrap();

        assert_eq!(ui.computed_size(id).unwrap(), Dimensions::new(8.0, 8.0));
    }

    #[test]
    fn draw_list_emits_one_background_quad() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let id = ui.create(BoxFlags::DRAW_BACKGROUND).unwrap().id;
        ui.size(id, 200.0, 100.0).unwrap();
        ui.position(id, 10.0, 10.0).unwrap();
        ui.background_color(id, Color::rgb(1.0, 0.0, 0.0)).unwrap();

        let mut seen = 0;
        ui.end_frame(|vertices| {
            seen = vertices.len();
            assert_eq!(vertices[0].position, [10.0, 10.0, 0.0]);
            assert_eq!(vertices[1].position, [210.0, 10.0, 0.0]);
            assert_eq!(vertices[2].position, [210.0, 110.0, 0.0]);
            assert_eq!(vertices[3].position, [10.0, 110.0, 0.0]);
            assert_eq!(vertices[0].texture_index, 0.0);
            assert_eq!(vertices[0].color, Color::rgb(1.0, 0.0, 0.0));
        });
        assert_eq!(seen, 4);
    }

    #[test]
    fn draw_list_emits_four_border_quads() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let id = ui.create(BoxFlags::DRAW_BORDER).unwrap().id;
        ui.size(id, 100.0, 100.0).unwrap();
        ui.position(id, 0.0, 0.0).unwrap();
        ui.border(id, Color::WHITE, 2.0).unwrap();
        ui.end_frame(|vertices| assert_eq!(vertices.len(), 16));
    }

    #[test]
    fn draw_list_emits_one_quad_per_visible_glyph() {
        let mut ui = ctx();
        ui.register_font(1, Box::new(MonoShaper::new(8.0)));
        ui.begin_frame(FrameInput::default());
        let id = ui.create(BoxFlags::NONE).unwrap().id;
        ui.font(id, FontHandle::new(1, 16.0, 3)).unwrap();
        ui.text(id, "ab\ncd").unwrap();
        ui.size(id, 100.0, 20.0).unwrap();
        ui.position(id, 0.0, 0.0).unwrap();

        ui.end_frame(|vertices| {
            // Four visible glyphs; the newline is skipped.
            assert_eq!(vertices.len(), 16);
            assert!(vertices.iter().all(|v| v.texture_index == 3.0));
        });
    }

    #[test]
    fn scrolled_children_are_translated_and_culled() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let container = ui.create(BoxFlags::SCROLL_VERTICAL).unwrap().id;
        ui.size(container, 100.0, 100.0).unwrap();
        ui.position(container, 0.0, 0.0).unwrap();
        ui.push(container).unwrap();
        let near = ui.create(BoxFlags::DRAW_BACKGROUND).unwrap().id;
        ui.size(near, 50.0, 50.0).unwrap();
        ui.position(near, 0.0, 0.0).unwrap();
        let far = ui.create(BoxFlags::DRAW_BACKGROUND).unwrap().id;
        ui.size(far, 50.0, 50.0).unwrap();
        ui.position(far, 0.0, 150.0).unwrap();
        ui.pop().unwrap();

        // The far child starts fully below the container's visible band.
        ui.end_frame(|vertices| assert_eq!(vertices.len(), 4));
        let _ = (near, far);
    }

    #[test]
    fn partially_visible_child_is_edge_clipped() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let container = ui.create(BoxFlags::SCROLL_VERTICAL).unwrap().id;
        ui.size(container, 100.0, 100.0).unwrap();
        ui.position(container, 0.0, 0.0).unwrap();
        ui.push(container).unwrap();
        let child = ui.create(BoxFlags::DRAW_BACKGROUND).unwrap().id;
        ui.size(child, 50.0, 40.0).unwrap();
        ui.position(child, 0.0, 80.0).unwrap();
        ui.pop().unwrap();

        ui.end_frame(|vertices| {
            assert_eq!(vertices.len(), 4);
            // Bottom edge clamped to the container's band.
            assert_eq!(vertices[2].position[1], 100.0);
            assert_eq!(vertices[0].position[1], 80.0);
        });
    }

    #[test]
    fn scrollbar_thumb_is_emitted_for_overflowing_container() {
        let mut ui = ctx();
        ui.begin_frame(FrameInput::default());
        let container = ui
            .create(BoxFlags::SCROLL_VERTICAL | BoxFlags::DRAW_SCROLLBAR)
            .unwrap()
            .id;
        ui.size(container, 100.0, 200.0).unwrap();
        ui.position(container, 0.0, 0.0).unwrap();
        ui.push(container).unwrap();
        let child = ui.create(BoxFlags::NONE).unwrap().id;
        ui.size(child, 50.0, 800.0).unwrap();
        ui.position(child, 0.0, 0.0).unwrap();
        ui.pop().unwrap();

        ui.end_frame(|vertices| {
            assert_eq!(vertices.len(), 4);
            // Thumb hugs the right edge and is a quarter of the track tall.
            assert_eq!(vertices[0].position[0], 100.0 - SCROLLBAR_WIDTH);
            assert_eq!(vertices[1].position[0], 100.0);
            assert_eq!(vertices[2].position[1] - vertices[0].position[1], 50.0);
        });
    }

    #[test]
    fn glyphs_are_clipped_with_uv_adjustment() {
        let mut ui = ctx();
        ui.register_font(1, Box::new(MonoShaper::new(10.0)));
        ui.begin_frame(FrameInput::default());
        let container = ui.create(BoxFlags::SCROLL_VERTICAL).unwrap().id;
        ui.size(container, 100.0, 100.0).unwrap();
        ui.position(container, 0.0, 0.0).unwrap();
        ui.push(container).unwrap();
        let label = ui.create(BoxFlags::NONE).unwrap().id;
        ui.font(label, FontHandle::new(1, 20.0, 1)).unwrap();
        ui.text(label, "x").unwrap();
        ui.size(label, 50.0, 20.0).unwrap();
        // Glyph spans y 90..110: lower half is outside the band.
        ui.position(label, 0.0, 90.0).unwrap();
        ui.pop().unwrap();

        ui.end_frame(|vertices| {
            // One clipped box-less glyph quad.
            assert_eq!(vertices.len(), 4);
            assert_eq!(vertices[2].position[1], 100.0);
            assert_eq!(vertices[2].uv[1], 0.5);
        });
    }
}
