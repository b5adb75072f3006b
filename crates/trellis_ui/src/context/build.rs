//! Element construction, destruction and tree relations.

use std::path::Path;

use trellis_shared::Vec2;

use super::Ui;
use crate::element::{Behavior, Element, ElementFlags, ElementId, ElementState, UiCx};
use crate::geometry::Rect;
use crate::style::Colour;
use crate::widgets::{Button, Canvas, Editbox, Label, Sprite, Window};

/// Explicit placement and look for the `create_*_ex` constructors.
///
/// `x`/`y` are pixel offsets from the parent's top-left corner (the
/// viewport's for roots). `flags` are added to the kind's default flags;
/// `colour` replaces the kind's default colour when set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSpec<'a> {
    /// Horizontal offset from the parent.
    pub x: i32,
    /// Vertical offset from the parent.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Flags added to the kind's defaults.
    pub flags: ElementFlags,
    /// Primary colour, if not the kind's default.
    pub colour: Option<Colour>,
    /// Initial text.
    pub text: &'a str,
}

impl<'a> ElementSpec<'a> {
    /// Placement with no extra flags, the default colour and no text.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            flags: ElementFlags::empty(),
            colour: None,
            text: "",
        }
    }

    /// Sets the flags added to the kind's defaults.
    #[must_use]
    pub const fn flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the colour.
    #[must_use]
    pub const fn colour(mut self, colour: Colour) -> Self {
        self.colour = Some(colour);
        self
    }

    /// Sets the initial text.
    #[must_use]
    pub const fn text(mut self, text: &'a str) -> Self {
        self.text = text;
        self
    }
}

impl Ui {
    /// Creates an element driven by an application-defined behavior.
    ///
    /// The element starts at the parent's top-left corner with zero size. A
    /// stale `parent` handle makes the element a root.
    pub fn create_element(&mut self, parent: Option<ElementId>, behavior: Box<dyn Behavior>) -> ElementId {
        let id = self.tree.next_id();
        let kind = behavior.kind();
        let mut state = ElementState::new(id, kind, self.config.default_font.clone());

        if behavior.uses_text() {
            state.text.font_handle = self.renderer.load_font(&self.config.default_font, self.config.glyphs());
            if state.text.font_handle.is_none() {
                tracing::warn!(font = %self.config.default_font.name, ?kind, "font could not be loaded");
            }
        }

        self.tree.insert_root(Element::new(state, behavior));
        if let Some(parent) = parent {
            self.tree.add_child(parent, id);
        }
        let origin = self.reference_rect(id);
        self.set_abs_bounds(id, Rect::new(origin.x, origin.y, 0, 0));
        self.call(id, |behavior, state, cx| behavior.on_create(state, cx));

        tracing::trace!(element = id.raw(), ?kind, "element created");
        self.mark_dirty(id);
        id
    }

    /// Destroys an element and its subtree, deepest first.
    ///
    /// Each element's `on_destroy` runs exactly once, then its font and
    /// render target are released. Returns false for unknown elements.
    pub fn destroy(&mut self, id: ElementId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        if let Some(parent) = self.tree.parent(id) {
            self.mark_dirty(parent);
        }

        for node in self.tree.subtree_postorder(id) {
            if self.hovered == Some(node) {
                self.hovered = None;
            }
            if self.focused == Some(node) {
                self.focused = None;
            }
            if self.pressed.is_some_and(|p| p.element == node) {
                self.pressed = None;
            }

            let Some(mut element) = self.tree.take(node) else {
                continue;
            };
            {
                let mut cx = UiCx::new(self.renderer.as_mut());
                element.behavior.on_destroy(&mut element.state, &mut cx);
            }
            if let Some(font) = element.state.text.font_handle.take() {
                self.renderer.destroy_font(font);
            }
            if let Some(target) = element.cache.take().and_then(|c| c.target) {
                self.renderer.destroy_render_target(target);
            }
            tracing::trace!(element = node.raw(), kind = ?element.state.kind(), "element destroyed");
        }
        self.redraw = true;
        true
    }

    /// Creates an element and applies an explicit spec.
    fn create_with(&mut self, parent: Option<ElementId>, behavior: Box<dyn Behavior>, spec: &ElementSpec<'_>) -> ElementId {
        let id = self.create_element(parent, behavior);
        if let Some(element) = self.tree.get_mut(id) {
            element.state.insert_flags(spec.flags);
            if let Some(colour) = spec.colour {
                element.state.colour = colour;
            }
            element.state.text.set(spec.text);
        }
        let origin = self.reference_rect(id);
        self.set_abs_bounds(
            id,
            Rect::new(origin.x + spec.x, origin.y + spec.y, spec.width, spec.height),
        );
        self.refresh_text(id);
        id
    }

    /// Creates a button.
    pub fn create_button(&mut self, parent: Option<ElementId>) -> ElementId {
        self.create_element(parent, Box::new(Button::new()))
    }

    /// Creates a button with explicit placement, flags, colour and text.
    pub fn create_button_ex(&mut self, parent: Option<ElementId>, spec: &ElementSpec<'_>) -> ElementId {
        self.create_with(parent, Box::new(Button::new()), spec)
    }

    /// Creates a canvas covering its parent (or the viewport).
    pub fn create_canvas(&mut self, parent: Option<ElementId>) -> ElementId {
        let id = self.create_element(parent, Box::new(Canvas));
        self.set_rel_bounds(id, Some(Vec2::ZERO), Some(Vec2::new(1.0, 1.0)));
        id
    }

    /// Creates an editbox.
    pub fn create_editbox(&mut self, parent: Option<ElementId>) -> ElementId {
        self.create_element(parent, Box::new(Editbox::new()))
    }

    /// Creates an editbox with explicit placement, flags, colour and text.
    pub fn create_editbox_ex(&mut self, parent: Option<ElementId>, spec: &ElementSpec<'_>) -> ElementId {
        let id = self.create_with(parent, Box::new(Editbox::new()), spec);
        self.editbox_set_cursor(id, usize::MAX);
        id
    }

    /// Creates a label.
    pub fn create_label(&mut self, parent: Option<ElementId>) -> ElementId {
        self.create_element(parent, Box::new(Label))
    }

    /// Creates a label with explicit placement, flags, colour and text.
    pub fn create_label_ex(&mut self, parent: Option<ElementId>, spec: &ElementSpec<'_>) -> ElementId {
        self.create_with(parent, Box::new(Label), spec)
    }

    /// Creates a sprite with no texture.
    pub fn create_sprite(&mut self, parent: Option<ElementId>) -> ElementId {
        self.create_element(parent, Box::new(Sprite::new()))
    }

    /// Creates a sprite at an offset from its parent, sized to its texture.
    pub fn create_sprite_ex(
        &mut self,
        parent: Option<ElementId>,
        x: i32,
        y: i32,
        flags: ElementFlags,
        colour: Colour,
        texture: impl AsRef<Path>,
    ) -> ElementId {
        let spec = ElementSpec::new(x, y, 0, 0).flags(flags).colour(colour);
        let id = self.create_with(parent, Box::new(Sprite::new()), &spec);
        if self.sprite_set_texture(id, texture) {
            self.sprite_resize(id);
        }
        id
    }

    /// Creates a window.
    pub fn create_window(&mut self, parent: Option<ElementId>) -> ElementId {
        self.create_element(parent, Box::new(Window::new()))
    }

    /// Creates a window with explicit placement, flags, colour and title.
    pub fn create_window_ex(&mut self, parent: Option<ElementId>, spec: &ElementSpec<'_>) -> ElementId {
        self.create_with(parent, Box::new(Window::new()), spec)
    }

    /// Moves `child` under `parent`, on top of its new siblings.
    ///
    /// The child keeps its absolute bounds. Rejected (returns false) for
    /// unknown elements and when `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        let old_parent = self.tree.parent(child);
        if !self.tree.add_child(parent, child) {
            return false;
        }
        if let Some(old) = old_parent {
            self.mark_dirty(old);
        }
        self.refresh_rel(child);
        self.mark_dirty(child);
        self.validate_focus();
        true
    }

    /// Detaches `child` from its parent; it becomes the topmost root and
    /// keeps its absolute bounds.
    pub fn remove_child(&mut self, child: ElementId) -> bool {
        let Some(parent) = self.tree.parent(child) else {
            return false;
        };
        self.mark_dirty(parent);
        if !self.tree.remove_child(child) {
            return false;
        }
        self.refresh_rel(child);
        self.redraw = true;
        self.validate_focus();
        true
    }

    /// Moves `child` one step toward the top of its siblings.
    pub fn move_forward(&mut self, child: ElementId) -> bool {
        let moved = self.tree.move_forward(child);
        self.after_reorder(child, moved)
    }

    /// Moves `child` one step toward the bottom of its siblings.
    pub fn move_backward(&mut self, child: ElementId) -> bool {
        let moved = self.tree.move_backward(child);
        self.after_reorder(child, moved)
    }

    /// Moves `child` above all its siblings.
    pub fn send_to_top(&mut self, child: ElementId) -> bool {
        let moved = self.tree.send_to_top(child);
        self.after_reorder(child, moved)
    }

    /// Moves `child` below all its siblings.
    pub fn send_to_bottom(&mut self, child: ElementId) -> bool {
        let moved = self.tree.send_to_bottom(child);
        self.after_reorder(child, moved)
    }

    /// Returns true if `parent` is a proper ancestor of `child`.
    #[must_use]
    pub fn is_child_of(&self, parent: ElementId, child: ElementId) -> bool {
        self.tree.is_child_of(parent, child)
    }

    /// Parent of an element.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.tree.parent(id)
    }

    /// Children of an element in paint order, bottommost first.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.tree.children(id)
    }

    /// Root elements in paint order, bottommost first.
    #[must_use]
    pub fn roots(&self) -> &[ElementId] {
        self.tree.roots()
    }

    fn after_reorder(&mut self, child: ElementId, moved: bool) -> bool {
        if moved {
            match self.tree.parent(child) {
                Some(parent) => self.mark_dirty(parent),
                None => self.redraw = true,
            }
        }
        moved
    }
}
