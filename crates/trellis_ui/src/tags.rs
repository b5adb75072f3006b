//! Inline text format tags.
//!
//! Tagged text looks like `Hello [c=FF0000]red[/c] and [u]underlined[/u]`.
//! Parsing yields the plain text plus a list of [`FormatTag`] records whose
//! indices count characters of the plain text. Tags only change colour and
//! underline decoration, never glyph advance, so measuring tagged text is the
//! same as measuring its plain text.

use std::ops::Range;

use bitflags::bitflags;

use crate::style::Colour;

bitflags! {
    /// What a format tag does at its index.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TagFlags: u16 {
        /// Switch to a custom colour.
        const COLOUR = 1 << 0;
        /// Return to the default text colour.
        const COLOUR_END = 1 << 1;
        /// Start underlining.
        const UNDERLINE = 1 << 2;
        /// Stop underlining.
        const UNDERLINE_END = 1 << 3;
    }
}

/// A parsed format directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatTag {
    /// Character index in the plain text where the tag takes effect.
    pub index: usize,
    /// Tag kind.
    pub flags: TagFlags,
    /// Colour for [`TagFlags::COLOUR`] tags.
    pub colour: Colour,
}

/// Result of parsing tagged text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedText {
    /// Text with all recognised tags removed.
    pub plain: String,
    /// Tags in order of appearance.
    pub tags: Vec<FormatTag>,
}

/// A run of plain text drawn with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRun {
    /// Character range in the plain text.
    pub range: Range<usize>,
    /// Colour of the run.
    pub colour: Colour,
    /// Whether the run is underlined.
    pub underline: bool,
}

/// Parses format tags out of `text`.
#[must_use]
pub fn parse_format_tags(text: &str) -> ParsedText {
    let mut parsed = ParsedText {
        plain: String::with_capacity(text.len()),
        tags: Vec::new(),
    };
    let mut chars = 0usize;
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let (before, tail) = rest.split_at(open);
        parsed.plain.push_str(before);
        chars += before.chars().count();

        match tail.find(']').and_then(|close| parse_tag(&tail[1..close]).map(|t| (close, t))) {
            Some((close, (flags, colour))) => {
                parsed.tags.push(FormatTag { index: chars, flags, colour });
                rest = &tail[close + 1..];
            }
            None => {
                parsed.plain.push('[');
                chars += 1;
                rest = &tail[1..];
            }
        }
    }

    parsed.plain.push_str(rest);
    parsed
}

/// Strips every recognised tag, returning the plain text and its length in characters.
#[must_use]
pub fn strip_format_tags(text: &str) -> (String, usize) {
    let plain = parse_format_tags(text).plain;
    let len = plain.chars().count();
    (plain, len)
}

/// Splits plain text into uniformly styled runs.
///
/// `default` is the colour used outside colour tags. Empty runs are skipped.
#[must_use]
pub fn style_runs(plain: &str, tags: &[FormatTag], default: Colour) -> Vec<StyleRun> {
    let total = plain.chars().count();
    let mut runs = Vec::new();
    let mut colour = default;
    let mut underline = false;
    let mut start = 0usize;

    for tag in tags {
        let index = tag.index.min(total);
        if index > start {
            runs.push(StyleRun { range: start..index, colour, underline });
            start = index;
        }
        if tag.flags.contains(TagFlags::COLOUR) {
            colour = tag.colour;
        }
        if tag.flags.contains(TagFlags::COLOUR_END) {
            colour = default;
        }
        if tag.flags.contains(TagFlags::UNDERLINE) {
            underline = true;
        }
        if tag.flags.contains(TagFlags::UNDERLINE_END) {
            underline = false;
        }
    }
    if total > start {
        runs.push(StyleRun { range: start..total, colour, underline });
    }
    runs
}

fn parse_tag(body: &str) -> Option<(TagFlags, Colour)> {
    match body {
        "/c" => Some((TagFlags::COLOUR_END, Colour::TRANSPARENT)),
        "u" => Some((TagFlags::UNDERLINE, Colour::TRANSPARENT)),
        "/u" => Some((TagFlags::UNDERLINE_END, Colour::TRANSPARENT)),
        _ => {
            let hex = body.strip_prefix("c=")?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            let value = u32::from_str_radix(hex, 16).ok()?;
            let colour = match hex.len() {
                6 => Colour::hex((value << 8) | 0xFF),
                8 => Colour::hex(value),
                _ => return None,
            };
            Some((TagFlags::COLOUR, colour))
        }
    }
}
