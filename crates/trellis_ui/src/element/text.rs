//! Element text payload: string, font descriptor, alignment and placement.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::geometry::{Padding, Rect};
use crate::render::FontHandle;
use crate::style::{palette, Colour};
use crate::tags::{parse_format_tags, FormatTag};

bitflags! {
    /// Font style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct FontFlags: u8 {
        /// Bold.
        const BOLD = 1 << 0;
        /// Italic.
        const ITALIC = 1 << 1;
        /// Underline.
        const UNDERLINE = 1 << 2;
        /// Strike-out.
        const STRIKE_OUT = 1 << 3;
        /// Disable antialiasing.
        const NO_ANTIALIAS = 1 << 4;
    }
}

/// Font character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Charset {
    #[default]
    Ansi,
    Baltic,
    ChineseTraditional,
    Default,
    EastEurope,
    ChineseSimplified,
    Greek,
    HangulKorean,
    Apple,
    Oem,
    Cyrillic,
    Japanese,
    Symbol,
    Turkish,
    Vietnamese,
}

/// Everything a backend needs to load a font.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDesc {
    /// Font family name.
    pub name: String,
    /// Size in pixels.
    pub size: u8,
    /// Style flags.
    pub flags: FontFlags,
    /// Character set.
    pub charset: Charset,
}

impl FontDesc {
    /// Creates a font descriptor with no style flags and the ANSI charset.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u8) -> Self {
        Self {
            name: name.into(),
            size,
            flags: FontFlags::empty(),
            charset: Charset::Ansi,
        }
    }
}

impl Default for FontDesc {
    fn default() -> Self {
        Self::new("Tahoma", 11)
    }
}

bitflags! {
    /// Text alignment inside the element bounds.
    ///
    /// Horizontal and vertical directives combine; an axis with no directive
    /// defaults to left/top.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Alignment: u8 {
        /// Align to the left edge.
        const LEFT = 1 << 0;
        /// Align to the right edge.
        const RIGHT = 1 << 1;
        /// Align to the top edge.
        const TOP = 1 << 2;
        /// Align to the bottom edge.
        const BOTTOM = 1 << 3;
        /// Centre vertically.
        const CENTER_V = 1 << 4;
        /// Centre horizontally.
        const CENTER_H = 1 << 5;
        /// Centre on both axes.
        const CENTER = Self::CENTER_V.bits() | Self::CENTER_H.bits();
        /// Top-left corner.
        const TOP_LEFT = Self::TOP.bits() | Self::LEFT.bits();
        /// Bottom-right corner.
        const BOTTOM_RIGHT = Self::BOTTOM.bits() | Self::RIGHT.bits();
    }
}

/// Text carried by an element.
#[derive(Debug, Clone)]
pub struct Text {
    /// Text as set by the application, tags included.
    raw: String,
    /// Text with tags removed when tags are enabled, otherwise `raw`.
    plain: String,
    /// Parsed format tags, indexed into `plain`.
    tags: Vec<FormatTag>,
    /// Requested font.
    pub(crate) font: FontDesc,
    /// Backend font, if one could be loaded.
    pub(crate) font_handle: Option<FontHandle>,
    /// Text colour.
    pub colour: Colour,
    /// Alignment inside the element bounds.
    pub alignment: Alignment,
    /// Padding between the bounds and the text.
    pub padding: Padding,
    /// Measured size of `plain`.
    pub(crate) size: (u32, u32),
    /// Absolute top-left where the text is drawn.
    pub(crate) pos: (i32, i32),
    tags_enabled: bool,
    needs_layout: bool,
}

impl Text {
    /// Creates an empty text payload.
    #[must_use]
    pub fn new(font: FontDesc) -> Self {
        Self {
            raw: String::new(),
            plain: String::new(),
            tags: Vec::new(),
            font,
            font_handle: None,
            colour: palette::TEXT,
            alignment: Alignment::CENTER,
            padding: Padding::default(),
            size: (0, 0),
            pos: (0, 0),
            tags_enabled: false,
            needs_layout: true,
        }
    }

    /// Returns the text as it was set, tags included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the displayed text, tags removed when tags are enabled.
    #[must_use]
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// Returns the parsed format tags.
    #[must_use]
    pub fn tags(&self) -> &[FormatTag] {
        &self.tags
    }

    /// Number of characters in the text as set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.chars().count()
    }

    /// Returns true if there is no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the font descriptor.
    #[must_use]
    pub fn font(&self) -> &FontDesc {
        &self.font
    }

    /// Returns the backend font handle.
    #[must_use]
    pub fn font_handle(&self) -> Option<FontHandle> {
        self.font_handle
    }

    /// Returns the measured text size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Returns the absolute position the text is drawn at.
    #[must_use]
    pub fn pos(&self) -> (i32, i32) {
        self.pos
    }

    /// Replaces the text.
    pub fn set(&mut self, text: &str) {
        text.clone_into(&mut self.raw);
        self.reparse();
    }

    /// Inserts a character at a character index (clamped to the end).
    pub fn insert(&mut self, index: usize, ch: char) {
        let at = byte_offset(&self.raw, index);
        self.raw.insert(at, ch);
        self.reparse();
    }

    /// Removes the character at a character index. Returns false when out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }
        let at = byte_offset(&self.raw, index);
        self.raw.remove(at);
        self.reparse();
        true
    }

    /// Switches tag interpretation on or off.
    pub(crate) fn set_tags_enabled(&mut self, enabled: bool) {
        if self.tags_enabled != enabled {
            self.tags_enabled = enabled;
            self.reparse();
        }
    }

    /// Marks the placement stale.
    pub(crate) fn invalidate(&mut self) {
        self.needs_layout = true;
    }

    /// Returns and clears the stale-placement marker.
    pub(crate) fn take_needs_layout(&mut self) -> bool {
        std::mem::take(&mut self.needs_layout)
    }

    /// Stores a new measurement and places the text inside `bounds`.
    pub(crate) fn place(&mut self, size: (u32, u32), bounds: Rect) {
        self.size = size;
        self.pos = place_text(size, bounds, self.alignment, self.padding);
    }

    fn reparse(&mut self) {
        if self.tags_enabled {
            let parsed = parse_format_tags(&self.raw);
            self.plain = parsed.plain;
            self.tags = parsed.tags;
        } else {
            self.plain.clone_from(&self.raw);
            self.tags.clear();
        }
        self.needs_layout = true;
    }
}

/// Computes the top-left corner of a text box of `size` aligned in `bounds`.
#[must_use]
pub fn place_text(size: (u32, u32), bounds: Rect, alignment: Alignment, padding: Padding) -> (i32, i32) {
    let area = bounds.inset(padding);
    let free_w = i64::from(area.width) - i64::from(size.0);
    let free_h = i64::from(area.height) - i64::from(size.1);

    let dx = if alignment.contains(Alignment::CENTER_H) {
        free_w / 2
    } else if alignment.contains(Alignment::RIGHT) {
        free_w
    } else {
        0
    };
    let dy = if alignment.contains(Alignment::CENTER_V) {
        free_h / 2
    } else if alignment.contains(Alignment::BOTTOM) {
        free_h
    } else {
        0
    };

    let clamp = |v: i64| i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX });
    (clamp(i64::from(area.x) + dx), clamp(i64::from(area.y) + dy))
}

fn byte_offset(s: &str, index: usize) -> usize {
    s.char_indices().nth(index).map_or(s.len(), |(i, _)| i)
}
