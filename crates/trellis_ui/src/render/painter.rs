//! Drawing helpers handed to element behaviors during the render walk.

use super::{Renderer, TextFlags, TextureHandle};
use crate::element::{ElementFlags, ElementState};
use crate::geometry::Rect;
use crate::style::{palette, Colour};

/// Offset of an element's drop shadow.
pub(crate) const SHADOW_OFFSET: i32 = 2;

/// Screen area an element paints into: its bounds, plus the drop shadow
/// that falls below and right of them.
#[must_use]
pub(crate) fn paint_extent(element: &ElementState) -> Rect {
    let mut extent = element.bounds();
    if element.flags().contains(ElementFlags::SHADOW) {
        extent.width = extent.width.saturating_add(SHADOW_OFFSET.unsigned_abs());
        extent.height = extent.height.saturating_add(SHADOW_OFFSET.unsigned_abs());
    }
    extent
}

/// Thin wrapper over the active renderer for one element's render call.
///
/// When the element inherits its parent's alpha, every colour passed through
/// the painter has its alpha replaced.
pub struct Painter<'a> {
    renderer: &'a mut dyn Renderer,
    alpha: Option<u8>,
}

impl<'a> Painter<'a> {
    /// Creates a painter. `alpha` overrides the alpha of every colour drawn.
    pub fn new(renderer: &'a mut dyn Renderer, alpha: Option<u8>) -> Self {
        Self { renderer, alpha }
    }

    /// Raw access to the renderer.
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// Applies the alpha override to a colour.
    #[must_use]
    pub fn colour(&self, colour: Colour) -> Colour {
        match self.alpha {
            Some(alpha) => colour.with_alpha(alpha),
            None => colour,
        }
    }

    /// Fills a rectangle.
    pub fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        let colour = self.colour(colour);
        self.renderer.set_draw_colour(colour);
        self.renderer.draw_rect(rect.x, rect.y, rect.width, rect.height);
    }

    /// Draws a one pixel outline just inside a rectangle.
    pub fn outline_rect(&mut self, rect: Rect, colour: Colour) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let colour = self.colour(colour);
        self.renderer.set_draw_colour(colour);
        self.renderer.draw_rect(rect.x, rect.y, rect.width, 1);
        self.renderer.draw_rect(rect.x, rect.bottom() - 1, rect.width, 1);
        self.renderer.draw_rect(rect.x, rect.y, 1, rect.height);
        self.renderer.draw_rect(rect.right() - 1, rect.y, 1, rect.height);
    }

    /// Fills a triangle.
    pub fn triangle(&mut self, p1: (i32, i32), p2: (i32, i32), p3: (i32, i32), colour: Colour) {
        let colour = self.colour(colour);
        self.renderer.set_draw_colour(colour);
        self.renderer.draw_triangle(p1, p2, p3);
    }

    /// Draws a texture over a rectangle, tinted by `tint`.
    pub fn textured_rect(&mut self, texture: TextureHandle, rect: Rect, uv: [f32; 4], tint: Colour) {
        let tint = self.colour(tint);
        self.renderer.set_draw_colour(tint);
        self.renderer.draw_textured_rect(texture, rect.x, rect.y, rect.width, rect.height, uv);
    }

    /// Draws the shadow, background and border an element's flags ask for.
    pub fn panel(&mut self, element: &ElementState, body: Colour) {
        let bounds = element.bounds();
        let flags = element.flags();

        if flags.contains(ElementFlags::SHADOW) {
            self.fill_rect(bounds.translated(SHADOW_OFFSET, SHADOW_OFFSET), palette::SHADOW);
        }
        if flags.contains(ElementFlags::BACKGROUND) {
            self.fill_rect(bounds, body);
        }
        if flags.contains(ElementFlags::BORDER) {
            self.outline_rect(bounds, palette::BORDER);
        }
    }

    /// Draws the element's text at its computed placement.
    pub fn text(&mut self, element: &ElementState) {
        let text = element.text();
        let (x, y) = text.pos();
        self.text_at(element, text.plain(), x, y, true);
    }

    /// Draws arbitrary text with the element's font, colour and text flags.
    ///
    /// Format tags are passed only when `with_tags` is set and the element
    /// has tags enabled; they index into the element's own plain text.
    pub fn text_at(&mut self, element: &ElementState, content: &str, x: i32, y: i32, with_tags: bool) {
        let text = element.text();
        let Some(font) = text.font_handle() else {
            return;
        };
        if content.is_empty() {
            return;
        }

        let flags = element.flags();
        let mut text_flags = TextFlags::empty();
        let tags = if with_tags && flags.contains(ElementFlags::TEXT_TAGS) {
            text_flags |= TextFlags::TAGS;
            text.tags()
        } else {
            &[]
        };
        if flags.contains(ElementFlags::TEXT_SHADOW) {
            text_flags |= TextFlags::SHADOW;
        }

        let clip = flags.contains(ElementFlags::CLIP);
        if clip {
            let b = element.bounds();
            self.renderer.start_clip(b.x, b.y, b.width, b.height);
        }

        let colour = self.colour(text.colour);
        self.renderer.set_draw_colour(colour);
        self.renderer.draw_text(font, content, x, y, text_flags, tags);

        if clip {
            self.renderer.end_clip();
        }
    }
}
