//! The behavior table every element kind supplies.

use std::any::Any;

use super::{ElementKind, ElementState};
use crate::input::{Key, MouseButton};
use crate::render::{Painter, Renderer};

/// What a behavior may touch besides its own element.
pub struct UiCx<'a> {
    renderer: &'a mut dyn Renderer,
    redraw: bool,
}

impl<'a> UiCx<'a> {
    /// Creates a context over the active renderer.
    pub fn new(renderer: &'a mut dyn Renderer) -> Self {
        Self { renderer, redraw: false }
    }

    /// The active renderer, for loading and releasing resources.
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// Asks for a redraw before the next frame.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Returns true if a redraw was requested.
    #[must_use]
    pub fn redraw_requested(&self) -> bool {
        self.redraw
    }
}

/// Object-safe access to the concrete behavior type.
///
/// Call it on the trait object (`(*boxed).as_any()`), not on the box, or the
/// box itself is what gets upcast.
pub trait AsAny: Any {
    /// Upcasts to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Upcasts to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-kind element operations.
///
/// Every operation has a no-op default, so a kind only implements what it
/// reacts to. The dispatch pipeline maintains `HOVERED`/`PRESSED`, focus and
/// the generic GUI events around these calls; behaviors add kind-specific
/// reactions and events on top.
#[allow(unused_variables)]
pub trait Behavior: AsAny {
    /// The kind tag of elements using this behavior.
    fn kind(&self) -> ElementKind;

    /// Whether the element displays its text.
    fn uses_text(&self) -> bool {
        true
    }

    /// Runs once after the element is registered in the tree.
    fn on_create(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>) {}

    /// Runs once before the element's storage is released; release resources here.
    fn on_destroy(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>) {}

    /// Draws the element.
    fn render(&self, element: &ElementState, painter: &mut Painter<'_>) {}

    /// Absolute position and/or size changed.
    fn on_bounds_changed(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>, pos: bool, size: bool) {}

    /// The cursor entered the element.
    fn on_mouse_enter(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>) {}

    /// The cursor left the element.
    fn on_mouse_leave(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>) {}

    /// A mouse button went down on the element.
    fn on_mouse_click(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>, button: MouseButton, x: i32, y: i32) {}

    /// The button that pressed the element went up, wherever the cursor is.
    fn on_mouse_release(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>, button: MouseButton, x: i32, y: i32) {}

    /// The cursor moved while the element is held down.
    fn on_mouse_drag(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>, x: i32, y: i32) {}

    /// A key went down or up while the element has focus.
    fn on_key_press(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>, key: Key, down: bool) {}

    /// Text input arrived while the element has focus.
    fn on_character(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>, ch: char) {}

    /// The element gained focus.
    fn on_focus_enter(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>) {}

    /// The element lost focus.
    fn on_focus_exit(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl Behavior for Probe {
        fn kind(&self) -> ElementKind {
            ElementKind::Custom("probe")
        }
    }

    #[test]
    fn test_downcast_through_trait_object() {
        let mut boxed: Box<dyn Behavior> = Box::new(Probe);
        assert!((*boxed).as_any().is::<Probe>());
        assert!((*boxed).as_any_mut().downcast_mut::<Probe>().is_some());
        assert_eq!(boxed.kind(), ElementKind::Custom("probe"));
        assert!(boxed.uses_text());
    }
}
