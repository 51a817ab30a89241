#![forbid(unsafe_code)]

//! Reusable row slots.
//!
//! A [`PoolSlot`] is built once with pre-allocated text buffers and then
//! rebound to different rows by overwriting fields in place. Every setter
//! compares before writing and reports what changed as a [`SlotDirty`] set, so
//! a surface only sees the writes that matter.

use logsmith_core::{LogEntry, LogLevel};

/// Offset used for slots that are parked outside the viewport.
pub const PARKED_OFFSET: f64 = -9999.0;

const TIMESTAMP_CAPACITY: usize = 32;
const MESSAGE_CAPACITY: usize = 96;

bitflags::bitflags! {
    /// Visibility and interaction state of a slot.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SlotFlags: u8 {
        /// Drawn inside the content area.
        const VISIBLE     = 0b0000_0001;
        /// Receives pointer input.
        const INTERACTIVE = 0b0000_0010;
        /// Skipped by assistive traversal.
        const HIDDEN      = 0b0000_0100;
    }
}

bitflags::bitflags! {
    /// Fields written by the last slot update.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SlotDirty: u8 {
        /// Timestamp text changed.
        const TIMESTAMP = 0b0000_0001;
        /// Level text and style class changed.
        const LEVEL     = 0b0000_0010;
        /// Message text changed.
        const MESSAGE   = 0b0000_0100;
        /// Offset or flags changed.
        const PLACEMENT = 0b0000_1000;
        /// Every text field.
        const CONTENT   = Self::TIMESTAMP.bits() | Self::LEVEL.bits() | Self::MESSAGE.bits();
    }
}

/// Where a slot sits along the scroll axis and how it behaves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Offset from the top of the content area.
    pub offset: f64,
    /// Visibility and interaction state.
    pub flags: SlotFlags,
}

impl Placement {
    /// Off-view, hidden, and inert.
    pub const PARKED: Self = Self {
        offset: PARKED_OFFSET,
        flags: SlotFlags::HIDDEN,
    };

    /// Visible and interactive at `offset`.
    #[must_use]
    pub const fn visible_at(offset: f64) -> Self {
        Self {
            offset,
            flags: SlotFlags::VISIBLE.union(SlotFlags::INTERACTIVE),
        }
    }

    /// Whether this placement is parked.
    #[must_use]
    pub fn is_parked(&self) -> bool {
        self.flags.contains(SlotFlags::HIDDEN) && !self.flags.contains(SlotFlags::VISIBLE)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::PARKED
    }
}

/// A reusable visual row.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSlot {
    timestamp: String,
    level: Option<LogLevel>,
    message: String,
    placement: Placement,
    bound_id: Option<u64>,
}

impl Default for PoolSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolSlot {
    /// A parked slot with its text buffers allocated up front.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timestamp: String::with_capacity(TIMESTAMP_CAPACITY),
            level: None,
            message: String::with_capacity(MESSAGE_CAPACITY),
            placement: Placement::PARKED,
            bound_id: None,
        }
    }

    /// Timestamp text.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Level of the bound row, if any row was ever bound.
    #[must_use]
    pub fn level(&self) -> Option<LogLevel> {
        self.level
    }

    /// Level text (`""` before the first bind).
    #[must_use]
    pub fn level_text(&self) -> &'static str {
        self.level.map_or("", LogLevel::as_str)
    }

    /// Level-derived style class.
    #[must_use]
    pub fn style_class(&self) -> &'static str {
        self.level.map_or("lvl", LogLevel::style_class)
    }

    /// Message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Current placement.
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Id of the last bound entry. Parking keeps it.
    #[must_use]
    pub fn bound_id(&self) -> Option<u64> {
        self.bound_id
    }

    /// Whether the slot is drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.placement.flags.contains(SlotFlags::VISIBLE)
    }

    /// Whether the slot receives input.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.placement.flags.contains(SlotFlags::INTERACTIVE)
    }

    /// Whether the slot is parked off-view.
    #[must_use]
    pub fn is_parked(&self) -> bool {
        self.placement.is_parked()
    }

    /// Overwrite the timestamp text.
    pub fn set_timestamp(&mut self, text: &str) -> SlotDirty {
        overwrite(&mut self.timestamp, text, SlotDirty::TIMESTAMP)
    }

    /// Overwrite the level text and style class.
    pub fn set_level(&mut self, level: LogLevel) -> SlotDirty {
        if self.level == Some(level) {
            return SlotDirty::empty();
        }
        self.level = Some(level);
        SlotDirty::LEVEL
    }

    /// Overwrite the message text.
    pub fn set_message(&mut self, text: &str) -> SlotDirty {
        overwrite(&mut self.message, text, SlotDirty::MESSAGE)
    }

    /// Move the slot or change its flags.
    pub fn set_placement(&mut self, placement: Placement) -> SlotDirty {
        if self.placement == placement {
            return SlotDirty::empty();
        }
        self.placement = placement;
        SlotDirty::PLACEMENT
    }

    /// Bind `entry` and show it at `offset`.
    pub fn bind(&mut self, entry: &LogEntry, offset: f64) -> SlotDirty {
        self.bound_id = Some(entry.id);
        self.set_timestamp(&entry.timestamp)
            | self.set_level(entry.level)
            | self.set_message(&entry.message)
            | self.set_placement(Placement::visible_at(offset))
    }

    /// Move off-view and make inert. Text is left in place for reuse.
    pub fn park(&mut self) -> SlotDirty {
        self.set_placement(Placement::PARKED)
    }

    /// Copy the fields of `source` flagged in `dirty`.
    ///
    /// Surfaces that keep their own copy of each slot use this in
    /// [`Surface::commit_slot`](crate::surface::Surface::commit_slot).
    pub fn apply(&mut self, source: &PoolSlot, dirty: SlotDirty) {
        if dirty.contains(SlotDirty::TIMESTAMP) {
            self.set_timestamp(source.timestamp());
        }
        if dirty.contains(SlotDirty::LEVEL)
            && let Some(level) = source.level()
        {
            self.set_level(level);
        }
        if dirty.contains(SlotDirty::MESSAGE) {
            self.set_message(source.message());
        }
        if dirty.contains(SlotDirty::PLACEMENT) {
            self.set_placement(source.placement());
        }
        self.bound_id = source.bound_id;
    }
}

fn overwrite(buf: &mut String, text: &str, flag: SlotDirty) -> SlotDirty {
    if buf.as_str() == text {
        return SlotDirty::empty();
    }
    buf.clear();
    buf.push_str(text);
    flag
}
