use bitflags::bitflags;

bitflags! {
    /// Capability flags of a box.
    ///
    /// Flags are a plain in-memory capability set; no wire or on-disk
    /// stability is promised for the bit values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BoxFlags: u32 {
        const NONE = 0;
        /// The box reacts to the pointer resting over it.
        const HOVERABLE = 1 << 0;
        /// The box reacts to the primary button while the pointer is over it.
        const CLICKABLE = 1 << 1;
        /// Emit a background quad for the box.
        const DRAW_BACKGROUND = 1 << 2;
        /// Emit four border quads around the box.
        const DRAW_BORDER = 1 << 3;
        /// Emit glyph quads for the box's attached text.
        const DRAW_TEXT = 1 << 4;
        /// Children flow left-to-right, wrapping on overflow.
        const FLEX_ROW = 1 << 5;
        /// Children flow top-to-bottom, wrapping on overflow.
        const FLEX_COLUMN = 1 << 6;
        /// Suppresses wrapping in a flex flow.
        const FLEX_NOWRAP = 1 << 7;
        /// Text never wraps.
        const TEXT_NOWRAP = 1 << 8;
        /// Text is centered inside the box.
        const TEXT_CENTER = 1 << 9;
        /// Text wraps at word boundaries.
        const TEXT_WRAP_WORD = 1 << 10;
        /// The box's local position is taken verbatim in root space,
        /// ignoring the parent's content origin and flex flow.
        const POSITION_ABSOLUTE = 1 << 11;
        const SCROLL_HORIZONTAL = 1 << 12;
        /// The box scrolls its children vertically.
        const SCROLL_VERTICAL = 1 << 13;
        /// Emit a scrollbar thumb quad for a scroll container.
        const DRAW_SCROLLBAR = 1 << 14;
    }
}

impl BoxFlags {
    /// True when both flex directions are requested at once.
    pub fn has_conflicting_flow(&self) -> bool {
        self.contains(Self::FLEX_ROW | Self::FLEX_COLUMN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicting_flow_detection() {
        assert!((BoxFlags::FLEX_ROW | BoxFlags::FLEX_COLUMN).has_conflicting_flow());
        assert!(!BoxFlags::FLEX_ROW.has_conflicting_flow());
        assert!(!(BoxFlags::FLEX_COLUMN | BoxFlags::FLEX_NOWRAP).has_conflicting_flow());
    }
}
