//! Kind-specific operations of the built-in elements.
//!
//! Each operation is a no-op (or returns `None`) when the element is not of
//! the expected kind.

use std::path::Path;

use super::Ui;
use crate::element::{AsAny, ElementId};
use crate::render::TextureHandle;
use crate::style::Colour;
use crate::widgets::{Editbox, EditboxFlags, Label, Sprite, Window, WindowFlags};

impl Ui {
    /// Resizes a label to its text plus padding.
    pub fn label_make_text_fit(&mut self, id: ElementId) {
        if self.behavior::<Label>(id).is_none() {
            return;
        }
        let Some(state) = self.element(id) else {
            return;
        };
        let (width, height) = state.text().size();
        let pad = state.text().padding;
        self.set_abs_size(
            id,
            width + u32::from(pad.left) + u32::from(pad.right),
            height + u32::from(pad.top) + u32::from(pad.bottom),
        );
    }

    /// Editbox cursor as a character index.
    #[must_use]
    pub fn editbox_cursor(&self, id: ElementId) -> Option<usize> {
        let editbox = self.behavior::<Editbox>(id)?;
        Some(editbox.cursor(self.element(id)?))
    }

    /// Moves the editbox cursor, clamped to the end of the text.
    pub fn editbox_set_cursor(&mut self, id: ElementId, cursor: usize) {
        let Some(element) = self.tree.get_mut(id) else {
            return;
        };
        let Some(editbox) = (*element.behavior).as_any_mut().downcast_mut::<Editbox>() else {
            return;
        };
        editbox.set_cursor(&element.state, cursor);
        self.mark_dirty(id);
    }

    /// Editbox-specific flags.
    #[must_use]
    pub fn editbox_flags(&self, id: ElementId) -> Option<EditboxFlags> {
        self.behavior::<Editbox>(id).map(Editbox::flags)
    }

    /// Replaces the editbox-specific flags.
    pub fn set_editbox_flags(&mut self, id: ElementId, flags: EditboxFlags) {
        if let Some(editbox) = self.behavior_mut::<Editbox>(id) {
            editbox.set_flags(flags);
        }
    }

    /// Loads a texture into a sprite.
    ///
    /// On failure the sprite keeps its previous texture and false is
    /// returned. On success the previous texture is released.
    pub fn sprite_set_texture(&mut self, id: ElementId, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if self.behavior::<Sprite>(id).is_none() {
            return false;
        }
        let Some(texture) = self.renderer.load_texture(path) else {
            tracing::warn!(path = %path.display(), element = id.raw(), "texture could not be loaded");
            return false;
        };

        let old = self
            .behavior_mut::<Sprite>(id)
            .and_then(|sprite| sprite.replace_texture(texture, path));
        if let Some(old) = old {
            self.renderer.destroy_texture(old.handle);
        }
        true
    }

    /// Handle of the sprite's texture.
    #[must_use]
    pub fn sprite_texture(&self, id: ElementId) -> Option<TextureHandle> {
        self.behavior::<Sprite>(id)?.texture().map(|t| t.handle)
    }

    /// Pixel size of the sprite's texture.
    #[must_use]
    pub fn sprite_texture_size(&self, id: ElementId) -> Option<(u32, u32)> {
        self.behavior::<Sprite>(id)?.texture().map(|t| (t.width, t.height))
    }

    /// Resizes a sprite to its texture's pixel size.
    pub fn sprite_resize(&mut self, id: ElementId) {
        if let Some((width, height)) = self.sprite_texture_size(id) {
            self.set_abs_size(id, width, height);
        }
    }

    /// Sprite texture coordinates `(u1, v1, u2, v2)`.
    #[must_use]
    pub fn sprite_uv(&self, id: ElementId) -> Option<[f32; 4]> {
        self.behavior::<Sprite>(id).map(Sprite::uv)
    }

    /// Sets the sprite texture coordinates.
    pub fn set_sprite_uv(&mut self, id: ElementId, uv: [f32; 4]) {
        if let Some(sprite) = self.behavior_mut::<Sprite>(id) {
            sprite.set_uv(uv);
        }
    }

    /// Window titlebar colour.
    #[must_use]
    pub fn window_title_colour(&self, id: ElementId) -> Option<Colour> {
        self.behavior::<Window>(id).map(Window::title_colour)
    }

    /// Sets the window titlebar colour.
    pub fn set_window_title_colour(&mut self, id: ElementId, colour: Colour) {
        if let Some(window) = self.behavior_mut::<Window>(id) {
            window.set_title_colour(colour);
        }
    }

    /// Window titlebar colour as `0xRRGGBBAA`; 0 for non-windows.
    #[must_use]
    pub fn window_title_colour_hex(&self, id: ElementId) -> u32 {
        self.window_title_colour(id).map_or(0, Colour::to_hex)
    }

    /// Sets the window titlebar colour from `0xRRGGBBAA`.
    pub fn set_window_title_colour_hex(&mut self, id: ElementId, hex: u32) {
        self.set_window_title_colour(id, Colour::hex(hex));
    }

    /// Window-specific flags.
    #[must_use]
    pub fn window_flags(&self, id: ElementId) -> Option<WindowFlags> {
        self.behavior::<Window>(id).map(Window::flags)
    }

    /// Replaces the window-specific flags.
    pub fn set_window_flags(&mut self, id: ElementId, flags: WindowFlags) {
        if let Some(window) = self.behavior_mut::<Window>(id) {
            window.set_flags(flags);
        }
    }
}
