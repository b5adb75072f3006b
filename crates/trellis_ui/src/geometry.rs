//! Screen-space geometry.
//!
//! Absolute element bounds live in integer screen pixels. Relative bounds are
//! fractions of the parent's absolute size and use [`trellis_shared::Vec2`].

/// A rectangle in absolute screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// X position (left edge).
    pub x: i32,
    /// Y position (top edge).
    pub y: i32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge (exclusive).
    #[must_use]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(clamp_extent(self.width))
    }

    /// Returns the bottom edge (exclusive).
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(clamp_extent(self.height))
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the rectangle shrunk by the given padding.
    #[must_use]
    pub fn inset(&self, padding: Padding) -> Self {
        let horizontal = u32::from(padding.left) + u32::from(padding.right);
        let vertical = u32::from(padding.top) + u32::from(padding.bottom);
        Self::new(
            self.x + i32::from(padding.left),
            self.y + i32::from(padding.top),
            self.width.saturating_sub(horizontal),
            self.height.saturating_sub(vertical),
        )
    }

    /// Returns the rectangle moved by the given offset.
    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Text padding in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Padding {
    /// Top padding.
    pub top: u8,
    /// Bottom padding.
    pub bottom: u8,
    /// Left padding.
    pub left: u8,
    /// Right padding.
    pub right: u8,
}

impl Padding {
    /// Creates a new padding.
    #[must_use]
    pub const fn new(top: u8, bottom: u8, left: u8, right: u8) -> Self {
        Self { top, bottom, left, right }
    }

    /// Same padding on every side.
    #[must_use]
    pub const fn uniform(amount: u8) -> Self {
        Self::new(amount, amount, amount, amount)
    }
}

fn clamp_extent(extent: u32) -> i32 {
    i32::try_from(extent).unwrap_or(i32::MAX)
}
