//! Shared element flags.
//!
//! Only capabilities common to every kind live here. Kind-specific options
//! (window titlebar, editbox masking, ...) are typed flag sets owned by the
//! kind's behavior, so no bit in this word changes meaning between kinds.

use bitflags::bitflags;

bitflags! {
    /// Capabilities and state bits carried by every element.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ElementFlags: u32 {
        /// The element is visible and can be processed.
        const VISIBLE = 1 << 0;
        /// The element is inactive (the user can't interact with it).
        const DISABLED = 1 << 1;
        /// The element has a background.
        const BACKGROUND = 1 << 2;
        /// The element has a border.
        const BORDER = 1 << 3;
        /// The element casts a shadow.
        const SHADOW = 1 << 4;
        /// The element can be dragged with the left mouse button.
        const DRAGGABLE = 1 << 5;
        /// Clip text to the element bounds.
        const CLIP = 1 << 6;
        /// Wrap text that exceeds the bounds (kinds that support it).
        const WRAP = 1 << 7;
        /// Rescale with the parent when the parent is resized.
        const AUTO_RESIZE = 1 << 8;
        /// Render with the parent's alpha.
        const INHERIT_ALPHA = 1 << 9;
        /// Enable animations (kinds that support them).
        const ANIMATION = 1 << 10;
        /// Tab can move focus to this element.
        const TABSTOP = 1 << 11;
        /// The element receives mouse input.
        const MOUSECTRL = 1 << 12;
        /// The element receives keyboard input and accepts focus.
        const KBCTRL = 1 << 13;
        /// Text casts a shadow.
        const TEXT_SHADOW = 1 << 14;
        /// Text may contain format tags.
        const TEXT_TAGS = 1 << 15;
        /// Depth-test this element against the scene (2D depth mode).
        const DEPTH_TEST = 1 << 16;
        /// The element is a 3D entity positioned by its 3D transform.
        const ENTITY_3D = 1 << 17;

        /// The cursor is over the element. Owned by the dispatch pipeline.
        const HOVERED = 1 << 18;
        /// The element is held down. Owned by the dispatch pipeline.
        const PRESSED = 1 << 19;
    }
}

impl ElementFlags {
    /// Bits the dispatch pipeline maintains on its own.
    pub const STATUS: Self = Self::HOVERED.union(Self::PRESSED);

    /// Returns true if the element can receive keyboard focus.
    #[must_use]
    pub const fn is_focusable(self) -> bool {
        self.contains(Self::VISIBLE.union(Self::KBCTRL)) && !self.contains(Self::DISABLED)
    }

    /// Returns true if the element takes part in hit-testing.
    #[must_use]
    pub const fn is_mouse_target(self) -> bool {
        self.contains(Self::VISIBLE.union(Self::MOUSECTRL)) && !self.contains(Self::DISABLED)
    }
}
