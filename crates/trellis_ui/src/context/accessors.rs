//! Generic element accessors.
//!
//! Getters return `None` (or a zero value) for unknown elements; setters on
//! unknown elements do nothing.

use std::any::Any;

use trellis_shared::{Vec2, Vec3};

use super::Ui;
use crate::element::{Alignment, ElementFlags, ElementId, ElementState, FontDesc, FontFlags, RenderCache};
use crate::event::GuiEvent;
use crate::geometry::{Padding, Rect};
use crate::style::Colour;

impl Ui {
    /// Relative position (fraction of the parent's size).
    #[must_use]
    pub fn pos(&self, id: ElementId) -> Option<Vec2> {
        self.element(id).map(|s| s.rel_pos)
    }

    /// Relative size (fraction of the parent's size).
    #[must_use]
    pub fn size(&self, id: ElementId) -> Option<Vec2> {
        self.element(id).map(|s| s.rel_size)
    }

    /// Sets the relative position.
    pub fn set_pos(&mut self, id: ElementId, pos: Vec2) {
        self.set_rel_bounds(id, Some(pos), None);
    }

    /// Sets the relative size.
    pub fn set_size(&mut self, id: ElementId, size: Vec2) {
        self.set_rel_bounds(id, None, Some(size));
    }

    /// Absolute bounds in screen pixels.
    #[must_use]
    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.element(id).map(|s| s.bounds)
    }

    /// Absolute position in screen pixels.
    #[must_use]
    pub fn abs_pos(&self, id: ElementId) -> Option<(i32, i32)> {
        self.bounds(id).map(|b| (b.x, b.y))
    }

    /// Absolute size in pixels.
    #[must_use]
    pub fn abs_size(&self, id: ElementId) -> Option<(u32, u32)> {
        self.bounds(id).map(|b| (b.width, b.height))
    }

    /// Moves the element to an absolute screen position.
    pub fn set_abs_pos(&mut self, id: ElementId, x: i32, y: i32) {
        if let Some(b) = self.bounds(id) {
            self.set_abs_bounds(id, Rect::new(x, y, b.width, b.height));
        }
    }

    /// Resizes the element in pixels.
    pub fn set_abs_size(&mut self, id: ElementId, width: u32, height: u32) {
        if let Some(b) = self.bounds(id) {
            self.set_abs_bounds(id, Rect::new(b.x, b.y, width, height));
        }
    }

    /// Depth used for depth-tested and 3D drawing.
    #[must_use]
    pub fn z_depth(&self, id: ElementId) -> Option<f32> {
        self.element(id).map(|s| s.z_depth)
    }

    /// Sets the draw depth.
    pub fn set_z_depth(&mut self, id: ElementId, depth: f32) {
        self.update(id, |state| state.z_depth = depth);
    }

    /// 3D world position.
    #[must_use]
    pub fn position_3d(&self, id: ElementId) -> Option<Vec3> {
        self.element(id).map(|s| s.transform.position)
    }

    /// Sets the 3D world position.
    pub fn set_position_3d(&mut self, id: ElementId, position: Vec3) {
        self.update(id, |state| state.transform.position = position);
    }

    /// 3D rotation in radians.
    #[must_use]
    pub fn rotation_3d(&self, id: ElementId) -> Option<Vec3> {
        self.element(id).map(|s| s.transform.rotation)
    }

    /// Sets the 3D rotation in radians.
    pub fn set_rotation_3d(&mut self, id: ElementId, rotation: Vec3) {
        self.update(id, |state| state.transform.rotation = rotation);
    }

    /// 3D quad size.
    #[must_use]
    pub fn size_3d(&self, id: ElementId) -> Option<Vec2> {
        self.element(id).map(|s| s.transform.size)
    }

    /// Sets the 3D quad size.
    pub fn set_size_3d(&mut self, id: ElementId, size: Vec2) {
        self.update(id, |state| state.transform.size = size);
    }

    /// Sets the whole 3D transform.
    pub fn set_transform_3d(&mut self, id: ElementId, position: Vec3, rotation: Vec3, size: Vec2) {
        self.update(id, |state| {
            state.transform.position = position;
            state.transform.rotation = rotation;
            state.transform.size = size;
        });
    }

    /// Primary colour.
    #[must_use]
    pub fn colour(&self, id: ElementId) -> Option<Colour> {
        self.element(id).map(|s| s.colour)
    }

    /// Sets the primary colour.
    pub fn set_colour(&mut self, id: ElementId, colour: Colour) {
        self.update(id, |state| state.colour = colour);
    }

    /// Primary colour as `0xRRGGBBAA`; 0 for unknown elements.
    #[must_use]
    pub fn colour_hex(&self, id: ElementId) -> u32 {
        self.colour(id).map_or(0, Colour::to_hex)
    }

    /// Sets the primary colour from `0xRRGGBBAA`.
    pub fn set_colour_hex(&mut self, id: ElementId, hex: u32) {
        self.set_colour(id, Colour::hex(hex));
    }

    /// Text colour.
    #[must_use]
    pub fn text_colour(&self, id: ElementId) -> Option<Colour> {
        self.element(id).map(|s| s.text.colour)
    }

    /// Sets the text colour.
    pub fn set_text_colour(&mut self, id: ElementId, colour: Colour) {
        self.update(id, |state| state.text.colour = colour);
    }

    /// Text colour as `0xRRGGBBAA`; 0 for unknown elements.
    #[must_use]
    pub fn text_colour_hex(&self, id: ElementId) -> u32 {
        self.text_colour(id).map_or(0, Colour::to_hex)
    }

    /// Sets the text colour from `0xRRGGBBAA`.
    pub fn set_text_colour_hex(&mut self, id: ElementId, hex: u32) {
        self.set_text_colour(id, Colour::hex(hex));
    }

    /// Alpha of the primary colour.
    #[must_use]
    pub fn alpha(&self, id: ElementId) -> Option<u8> {
        self.colour(id).map(|c| c.a)
    }

    /// Sets the alpha of both the primary and the text colour.
    pub fn set_alpha(&mut self, id: ElementId, alpha: u8) {
        self.update(id, |state| {
            state.colour.a = alpha;
            state.text.colour.a = alpha;
        });
    }

    /// Text as set, tags included.
    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(|s| s.text.as_str())
    }

    /// Length of the text in characters; 0 for unknown elements.
    #[must_use]
    pub fn text_len(&self, id: ElementId) -> usize {
        self.element(id).map_or(0, |s| s.text.len())
    }

    /// Replaces the text.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        self.update(id, |state| state.text.set(text));
    }

    /// Measured size of the displayed text.
    #[must_use]
    pub fn text_size(&self, id: ElementId) -> Option<(u32, u32)> {
        self.element(id).map(|s| s.text.size)
    }

    /// Text alignment.
    #[must_use]
    pub fn alignment(&self, id: ElementId) -> Option<Alignment> {
        self.element(id).map(|s| s.text.alignment)
    }

    /// Sets the text alignment.
    pub fn set_alignment(&mut self, id: ElementId, alignment: Alignment) {
        self.update(id, |state| {
            state.text.alignment = alignment;
            state.text.invalidate();
        });
    }

    /// Text padding.
    #[must_use]
    pub fn text_padding(&self, id: ElementId) -> Option<Padding> {
        self.element(id).map(|s| s.text.padding)
    }

    /// Sets the text padding.
    pub fn set_text_padding(&mut self, id: ElementId, padding: Padding) {
        self.update(id, |state| {
            state.text.padding = padding;
            state.text.invalidate();
        });
    }

    /// Font descriptor.
    #[must_use]
    pub fn font(&self, id: ElementId) -> Option<&FontDesc> {
        self.element(id).map(|s| s.text.font())
    }

    /// Replaces the font.
    ///
    /// If the backend can't load the new font the element keeps its old one.
    pub fn set_font(&mut self, id: ElementId, desc: FontDesc) {
        if !self.tree.contains(id) {
            return;
        }
        let Some(handle) = self.renderer.load_font(&desc, self.config.glyphs()) else {
            tracing::warn!(font = %desc.name, size = desc.size, "font could not be loaded");
            return;
        };
        let mut old = None;
        self.update(id, |state| {
            old = state.text.font_handle.replace(handle);
            state.text.font = desc;
            state.text.invalidate();
        });
        if let Some(old) = old {
            self.renderer.destroy_font(old);
        }
    }

    /// Changes the font family.
    pub fn set_font_name(&mut self, id: ElementId, name: &str) {
        if let Some(mut desc) = self.font(id).cloned() {
            name.clone_into(&mut desc.name);
            self.set_font(id, desc);
        }
    }

    /// Changes the font size.
    pub fn set_font_size(&mut self, id: ElementId, size: u8) {
        if let Some(mut desc) = self.font(id).cloned() {
            desc.size = size;
            self.set_font(id, desc);
        }
    }

    /// Changes the font style flags.
    pub fn set_font_flags(&mut self, id: ElementId, flags: FontFlags) {
        if let Some(mut desc) = self.font(id).cloned() {
            desc.flags = flags;
            self.set_font(id, desc);
        }
    }

    /// Current flags; empty for unknown elements.
    #[must_use]
    pub fn flags(&self, id: ElementId) -> ElementFlags {
        self.element(id).map_or(ElementFlags::empty(), |s| s.flags)
    }

    /// Sets flag bits, leaving the others untouched.
    pub fn add_flags(&mut self, id: ElementId, flags: ElementFlags) {
        self.update(id, |state| state.insert_flags(flags));
        self.validate_focus();
    }

    /// Clears flag bits, leaving the others untouched.
    pub fn remove_flags(&mut self, id: ElementId, flags: ElementFlags) {
        self.update(id, |state| state.remove_flags(flags));
        self.validate_focus();
    }

    /// Registers the handler that receives the element's GUI events.
    ///
    /// `data` is handed back to the handler with every event.
    pub fn set_event_handler<F>(&mut self, id: ElementId, handler: F, data: Option<Box<dyn Any>>)
    where
        F: FnMut(&GuiEvent<'_>) + 'static,
    {
        if let Some(element) = self.tree.get_mut(id) {
            element.state.set_handler(Some(Box::new(handler)), data);
        }
    }

    /// Removes the element's handler and user data.
    pub fn clear_event_handler(&mut self, id: ElementId) {
        if let Some(element) = self.tree.get_mut(id) {
            element.state.set_handler(None, None);
        }
    }

    /// Renders the element's subtree into a cached render target.
    ///
    /// The cache is redrawn only after a change inside the subtree. Disabling
    /// releases the target.
    pub fn set_render_cache(&mut self, id: ElementId, enabled: bool) {
        let Some(element) = self.tree.get_mut(id) else {
            return;
        };
        if enabled {
            if element.cache.is_none() {
                element.cache = Some(RenderCache { dirty: true, ..RenderCache::default() });
            }
        } else if let Some(target) = element.cache.take().and_then(|c| c.target) {
            self.renderer.destroy_render_target(target);
        }
        self.redraw = true;
    }

    /// Returns true if the element renders through a cache.
    #[must_use]
    pub fn has_render_cache(&self, id: ElementId) -> bool {
        self.tree.get(id).is_some_and(|e| e.cache.is_some())
    }

    /// Applies a state edit and marks the element for redraw.
    fn update(&mut self, id: ElementId, edit: impl FnOnce(&mut ElementState)) {
        let Some(element) = self.tree.get_mut(id) else {
            return;
        };
        edit(&mut element.state);
        self.mark_dirty(id);
        self.refresh_text(id);
    }
}
