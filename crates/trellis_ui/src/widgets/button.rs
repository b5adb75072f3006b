//! Pressable button.

use crate::element::{Behavior, ElementFlags, ElementKind, ElementState, UiCx};
use crate::event::{EventPayload, GuiEventKind};
use crate::input::{Key, MouseButton};
use crate::render::Painter;
use crate::style::{palette, Colour};

/// Shading blended over the body while hovered.
const HOVER_TINT: Colour = Colour::WHITE;
/// Shading blended over the body while pressed.
const PRESS_TINT: Colour = Colour::BLACK;

/// Button: border, background and centred text.
///
/// With keyboard focus, Return and Space press and release the button the
/// same way the left mouse button does. Losing focus while a key holds the
/// button cancels the press without a release event.
#[derive(Debug, Clone, Default)]
pub struct Button {
    key_held: bool,
}

impl Button {
    /// Creates the button behavior.
    #[must_use]
    pub const fn new() -> Self {
        Self { key_held: false }
    }

    fn body_colour(element: &ElementState) -> Colour {
        let base = element.colour();
        let flags = element.flags();
        if flags.contains(ElementFlags::PRESSED) {
            base.lerp(PRESS_TINT.with_alpha(base.a), 0.25)
        } else if flags.contains(ElementFlags::HOVERED) {
            base.lerp(HOVER_TINT.with_alpha(base.a), 0.1)
        } else {
            base
        }
    }
}

impl Behavior for Button {
    fn kind(&self) -> ElementKind {
        ElementKind::Button
    }

    fn on_create(&mut self, element: &mut ElementState, _cx: &mut UiCx<'_>) {
        element.insert_flags(
            ElementFlags::BORDER | ElementFlags::BACKGROUND | ElementFlags::MOUSECTRL | ElementFlags::KBCTRL,
        );
        element.colour = palette::ELEMENT_DARK;
    }

    fn render(&self, element: &ElementState, painter: &mut Painter<'_>) {
        painter.panel(element, Self::body_colour(element));
        painter.text(element);
    }

    fn on_mouse_enter(&mut self, _element: &mut ElementState, cx: &mut UiCx<'_>) {
        cx.request_redraw();
    }

    fn on_mouse_leave(&mut self, _element: &mut ElementState, cx: &mut UiCx<'_>) {
        cx.request_redraw();
    }

    fn on_key_press(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>, key: Key, down: bool) {
        if key != Key::Return && key != Key::Space {
            return;
        }

        let origin = EventPayload::Mouse { x: 0, y: 0 };
        if down {
            self.key_held = true;
            element.insert_flags(ElementFlags::PRESSED);
            self.on_mouse_click(element, cx, MouseButton::Left, 0, 0);
            element.raise_event(GuiEventKind::Click, origin);
        } else if std::mem::take(&mut self.key_held) {
            element.remove_flags(ElementFlags::PRESSED);
            self.on_mouse_release(element, cx, MouseButton::Left, 0, 0);
            element.raise_event(GuiEventKind::Release, origin);
        } else {
            return;
        }
        cx.request_redraw();
    }

    fn on_focus_exit(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>) {
        if std::mem::take(&mut self.key_held) {
            element.remove_flags(ElementFlags::PRESSED);
            self.on_mouse_release(element, cx, MouseButton::Left, 0, 0);
            cx.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementId, FontDesc};
    use crate::event::GuiEvent;
    use crate::render::RecordingRenderer;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn button_state() -> (Button, ElementState) {
        let mut renderer = RecordingRenderer::new();
        let mut cx = UiCx::new(&mut renderer);
        let mut button = Button::new();
        let mut state = ElementState::new(ElementId::new(1), ElementKind::Button, FontDesc::default());
        button.on_create(&mut state, &mut cx);
        (button, state)
    }

    #[test]
    fn test_button_defaults() {
        let (_, state) = button_state();
        assert!(state.flags().contains(ElementFlags::BORDER | ElementFlags::KBCTRL));
        assert_eq!(state.colour(), palette::ELEMENT_DARK);
    }

    #[test]
    fn test_keyboard_press_and_release() {
        let (mut button, mut state) = button_state();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        state.set_handler(Some(Box::new(move |e: &GuiEvent<'_>| sink.borrow_mut().push((e.kind, e.payload)))), None);

        let mut renderer = RecordingRenderer::new();
        let mut cx = UiCx::new(&mut renderer);
        button.on_key_press(&mut state, &mut cx, Key::Return, true);
        assert!(state.flags().contains(ElementFlags::PRESSED));
        assert!(cx.redraw_requested());

        button.on_key_press(&mut state, &mut cx, Key::Space, false);
        assert!(!state.flags().contains(ElementFlags::PRESSED));

        button.on_key_press(&mut state, &mut cx, Key::A, true);

        let origin = EventPayload::Mouse { x: 0, y: 0 };
        assert_eq!(
            *seen.borrow(),
            vec![(GuiEventKind::Click, origin), (GuiEventKind::Release, origin)]
        );
    }

    #[test]
    fn test_key_release_without_press_is_ignored() {
        let (mut button, mut state) = button_state();
        let mut renderer = RecordingRenderer::new();
        let mut cx = UiCx::new(&mut renderer);

        button.on_key_press(&mut state, &mut cx, Key::Return, false);
        assert!(!cx.redraw_requested());
        assert!(!state.flags().contains(ElementFlags::PRESSED));
    }

    #[test]
    fn test_focus_exit_cancels_key_press() {
        let (mut button, mut state) = button_state();
        let mut renderer = RecordingRenderer::new();
        let mut cx = UiCx::new(&mut renderer);

        button.on_key_press(&mut state, &mut cx, Key::Space, true);
        button.on_focus_exit(&mut state, &mut cx);
        assert!(!state.flags().contains(ElementFlags::PRESSED));

        // A mouse press is not the button's to cancel.
        state.insert_flags(ElementFlags::PRESSED);
        button.on_focus_exit(&mut state, &mut cx);
        assert!(state.flags().contains(ElementFlags::PRESSED));
    }

    #[test]
    fn test_pressed_shading_darkens() {
        let (_, mut state) = button_state();
        let idle = Button::body_colour(&state);
        state.insert_flags(ElementFlags::PRESSED);
        let pressed = Button::body_colour(&state);
        assert!(pressed.r < idle.r);
        assert_eq!(pressed.a, idle.a);
    }
}
