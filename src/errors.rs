use std::fmt;

/// Errors reported by the layout engine.
///
/// All failures are signaled through return values; nothing panics in the
/// non-test paths of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Error {
    /// A setter or getter was called with an id outside the current frame's
    /// valid range. No state was mutated.
    InvalidId,
    /// `pop` was called while no parent was set.
    NoOpenParent,
    /// A box was given mutually exclusive options, e.g. both `FLEX_ROW` and
    /// `FLEX_COLUMN`.
    ConflictingFlags,
    /// Creating another box would exceed `max_box_count`. The frame cannot
    /// be completed consistently.
    CapacityExceeded,
    /// A parent reassignment would make a box an ancestor of itself.
    CyclicReparent,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::InvalidId => "box id is not valid in the current frame",
            Self::NoOpenParent => "pop called with no open parent",
            Self::ConflictingFlags => "mutually exclusive flags set on one box",
            Self::CapacityExceeded => "box arena capacity exceeded",
            Self::CyclicReparent => "reparenting would create a cycle",
        };
        f.write_str(text)
    }
}

impl std::error::Error for Error {}
