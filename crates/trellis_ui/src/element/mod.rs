//! The element: shared state plus a per-kind behavior.

mod behavior;
mod flags;
mod text;

pub use behavior::{AsAny, Behavior, UiCx};
pub use flags::ElementFlags;
pub use text::{place_text, Alignment, Charset, FontDesc, FontFlags, Text};

use std::any::Any;
use std::fmt;

use trellis_shared::{Mat4, Vec2, Vec3};

use crate::event::{EventHandler, EventPayload, GuiEvent, GuiEventKind};
use crate::geometry::Rect;
use crate::render::RenderTargetHandle;
use crate::style::Colour;

/// Opaque element handle.
///
/// Handles stay valid until the element is destroyed; afterwards every
/// operation taking the handle is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Creates an element ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Element type tag, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Pressable button.
    Button,
    /// Full-viewport container.
    Canvas,
    /// Single-line text input.
    Editbox,
    /// Static text.
    Label,
    /// Textured rectangle.
    Sprite,
    /// Movable container with an optional titlebar.
    Window,
    /// Application-defined kind.
    Custom(&'static str),
}

/// Placement of a 3D entity element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    /// World position.
    pub position: Vec3,
    /// Rotation in radians around each axis.
    pub rotation: Vec3,
    /// Quad size in world units.
    pub size: Vec2,
}

impl Transform3D {
    /// Returns the world matrix: scale, then rotate, then translate.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_euler(self.rotation)
            * Mat4::from_scale(Vec3::new(self.size.x, self.size.y, 1.0))
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            size: Vec2::new(1.0, 1.0),
        }
    }
}

/// Pixel offset and size per axis, kept where the reference extent was zero
/// and no fraction could be derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PixelPin {
    pub(crate) x: Option<i32>,
    pub(crate) y: Option<i32>,
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
}

/// Kind-independent element state.
///
/// Tree links live outside this struct so behaviors can't break the tree.
pub struct ElementState {
    id: ElementId,
    kind: ElementKind,
    pub(crate) bounds: Rect,
    pub(crate) rel_pos: Vec2,
    pub(crate) rel_size: Vec2,
    pub(crate) pin: PixelPin,
    pub(crate) transform: Transform3D,
    pub(crate) z_depth: f32,
    pub(crate) flags: ElementFlags,
    pub(crate) colour: Colour,
    pub(crate) text: Text,
    handler: Option<EventHandler>,
    user_data: Option<Box<dyn Any>>,
}

impl ElementState {
    pub(crate) fn new(id: ElementId, kind: ElementKind, font: FontDesc) -> Self {
        Self {
            id,
            kind,
            bounds: Rect::ZERO,
            rel_pos: Vec2::ZERO,
            rel_size: Vec2::ZERO,
            pin: PixelPin::default(),
            transform: Transform3D::default(),
            z_depth: 0.0,
            flags: ElementFlags::VISIBLE,
            colour: Colour::WHITE,
            text: Text::new(font),
            handler: None,
            user_data: None,
        }
    }

    /// Element handle.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Kind tag.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Absolute bounds in screen pixels.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Position as a fraction of the parent's size.
    #[must_use]
    pub fn rel_pos(&self) -> Vec2 {
        self.rel_pos
    }

    /// Size as a fraction of the parent's size.
    #[must_use]
    pub fn rel_size(&self) -> Vec2 {
        self.rel_size
    }

    /// 3D placement.
    #[must_use]
    pub fn transform(&self) -> &Transform3D {
        &self.transform
    }

    /// Depth used by depth-tested and 3D draws.
    #[must_use]
    pub fn z_depth(&self) -> f32 {
        self.z_depth
    }

    /// Current flags.
    #[must_use]
    pub fn flags(&self) -> ElementFlags {
        self.flags
    }

    /// Sets flag bits.
    pub fn insert_flags(&mut self, flags: ElementFlags) {
        self.flags.insert(flags);
        self.sync_text_flags();
    }

    /// Clears flag bits.
    pub fn remove_flags(&mut self, flags: ElementFlags) {
        self.flags.remove(flags);
        self.sync_text_flags();
    }

    /// Primary colour.
    #[must_use]
    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Text payload.
    #[must_use]
    pub fn text(&self) -> &Text {
        &self.text
    }

    /// Mutable text payload. Edits re-place the text after the callback returns.
    pub fn text_mut(&mut self) -> &mut Text {
        &mut self.text
    }

    /// Returns true if a handler is registered.
    #[must_use]
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// User data registered with the handler.
    #[must_use]
    pub fn user_data(&self) -> Option<&dyn Any> {
        self.user_data.as_deref()
    }

    /// Delivers a GUI event to the registered handler, synchronously.
    ///
    /// Returns false when there is no handler.
    pub fn raise_event(&mut self, kind: GuiEventKind, payload: EventPayload) -> bool {
        let Some(handler) = self.handler.as_mut() else {
            return false;
        };
        let event = GuiEvent {
            kind,
            element: self.id,
            data: self.user_data.as_deref(),
            payload,
        };
        tracing::trace!(element = self.id.raw(), ?kind, "gui event");
        handler(&event);
        true
    }

    pub(crate) fn set_handler(&mut self, handler: Option<EventHandler>, data: Option<Box<dyn Any>>) {
        self.handler = handler;
        self.user_data = data;
    }

    fn sync_text_flags(&mut self) {
        let tags = self.flags.contains(ElementFlags::TEXT_TAGS);
        self.text.set_tags_enabled(tags);
    }
}

impl fmt::Debug for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementState")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("bounds", &self.bounds)
            .field("flags", &self.flags)
            .field("text", &self.text.as_str())
            .field("has_handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}

/// Off-screen cache of an element's subtree.
#[derive(Debug, Clone, Default)]
pub(crate) struct RenderCache {
    pub(crate) target: Option<RenderTargetHandle>,
    pub(crate) size: (u32, u32),
    pub(crate) dirty: bool,
}

/// A tree node: state, behavior and links.
pub struct Element {
    pub(crate) state: ElementState,
    pub(crate) behavior: Box<dyn Behavior>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) cache: Option<RenderCache>,
}

impl Element {
    pub(crate) fn new(state: ElementState, behavior: Box<dyn Behavior>) -> Self {
        Self {
            state,
            behavior,
            parent: None,
            children: Vec::new(),
            cache: None,
        }
    }

    /// Shared state.
    #[must_use]
    pub fn state(&self) -> &ElementState {
        &self.state
    }

    /// Parent, or `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Children in paint order, bottommost first.
    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Behavior as `&dyn Any`, for downcasting to the concrete kind.
    #[must_use]
    pub fn behavior_any(&self) -> &dyn Any {
        (*self.behavior).as_any()
    }

    pub(crate) fn behavior_any_mut(&mut self) -> &mut dyn Any {
        (*self.behavior).as_any_mut()
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("state", &self.state)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_raise_event_without_handler() {
        let mut state = ElementState::new(ElementId::new(1), ElementKind::Label, FontDesc::default());
        assert!(!state.raise_event(GuiEventKind::Click, EventPayload::Mouse { x: 0, y: 0 }));
    }

    #[test]
    fn test_raise_event_passes_user_data() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut state = ElementState::new(ElementId::new(9), ElementKind::Button, FontDesc::default());
        state.set_handler(
            Some(Box::new(move |event: &GuiEvent<'_>| {
                sink.borrow_mut().push((event.kind, event.element, event.user_data::<&str>().copied()));
            })),
            Some(Box::new("payload")),
        );

        assert!(state.raise_event(GuiEventKind::Release, EventPayload::Mouse { x: 3, y: 4 }));
        assert_eq!(
            seen.borrow().as_slice(),
            &[(GuiEventKind::Release, ElementId::new(9), Some("payload"))]
        );
    }

    #[test]
    fn test_text_tags_follow_flag() {
        let mut state = ElementState::new(ElementId::new(1), ElementKind::Label, FontDesc::default());
        state.text_mut().set("[u]x");
        assert_eq!(state.text().plain(), "[u]x");
        state.insert_flags(ElementFlags::TEXT_TAGS);
        assert_eq!(state.text().plain(), "x");
        state.remove_flags(ElementFlags::TEXT_TAGS);
        assert_eq!(state.text().plain(), "[u]x");
    }

    #[test]
    fn test_transform_matrix_places_quad() {
        let transform = Transform3D {
            position: Vec3::new(5.0, 0.0, 0.0),
            rotation: Vec3::ZERO,
            size: Vec2::new(2.0, 3.0),
        };
        let corner = transform.matrix().transform_point(Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(corner, Vec3::new(7.0, 3.0, 0.0));
    }
}
