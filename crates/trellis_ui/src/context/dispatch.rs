//! Input dispatch: hit-testing, hover, press/release, focus and key routing.

use super::{Press, Ui};
use crate::element::{ElementFlags, ElementId};
use crate::event::{EventPayload, GuiEventKind};
use crate::input::{InputEvent, Key, MouseButton};

impl Ui {
    /// Feeds one platform input event through the pipeline.
    ///
    /// Ignored when input is disabled in the configuration.
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.config.input_enabled {
            return;
        }
        self.input.apply(&event);

        match event {
            InputEvent::MouseMove { x, y } => self.mouse_moved(x, y),
            InputEvent::MouseDown { button, x, y } => self.mouse_pressed(button, x, y),
            InputEvent::MouseUp { button, x, y } => self.mouse_released(button, x, y),
            InputEvent::KeyDown(key) => self.key_event(key, true),
            InputEvent::KeyUp(key) => self.key_event(key, false),
            InputEvent::Text(ch) => {
                if let Some(focused) = self.focused {
                    self.call(focused, |behavior, state, cx| behavior.on_character(state, cx, ch));
                }
            }
            InputEvent::Modifiers(_) => {}
        }

        self.validate_focus();
    }

    /// Topmost element under a point that takes mouse input.
    #[must_use]
    pub fn element_at(&self, x: i32, y: i32) -> Option<ElementId> {
        self.tree.visible_paint_order().into_iter().rev().find(|&id| {
            self.tree
                .get(id)
                .is_some_and(|e| e.state.flags.is_mouse_target() && e.state.bounds.contains(x, y))
        })
    }

    /// Element under the cursor.
    #[must_use]
    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    /// Element held down by a mouse button.
    #[must_use]
    pub fn pressed(&self) -> Option<ElementId> {
        self.pressed.map(|p| p.element)
    }

    /// Element with keyboard focus.
    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Moves keyboard focus to an element.
    ///
    /// Returns false (focus unchanged) unless the element is shown, enabled
    /// and keyboard-interactive.
    pub fn set_focus(&mut self, id: ElementId) -> bool {
        if !self.can_focus(id) {
            return false;
        }
        self.change_focus(Some(id));
        true
    }

    /// Removes keyboard focus.
    pub fn clear_focus(&mut self) {
        self.change_focus(None);
    }

    /// Moves focus to the next (or previous) tab stop in paint order, wrapping.
    pub fn focus_next(&mut self, reverse: bool) -> Option<ElementId> {
        let stops: Vec<ElementId> = self
            .tree
            .visible_paint_order()
            .into_iter()
            .filter(|&id| {
                self.tree.get(id).is_some_and(|e| {
                    e.state.flags.contains(ElementFlags::TABSTOP) && e.state.flags.is_focusable()
                })
            })
            .collect();
        if stops.is_empty() {
            return None;
        }

        let current = self.focused.and_then(|f| stops.iter().position(|&s| s == f));
        let next = match (current, reverse) {
            (Some(i), false) => stops[(i + 1) % stops.len()],
            (Some(i), true) => stops[(i + stops.len() - 1) % stops.len()],
            (None, false) => stops[0],
            (None, true) => stops[stops.len() - 1],
        };
        self.change_focus(Some(next));
        Some(next)
    }

    /// Drops focus if the focused element stopped being eligible.
    pub(super) fn validate_focus(&mut self) {
        if let Some(focused) = self.focused {
            if !self.can_focus(focused) {
                self.change_focus(None);
            }
        }
    }

    fn can_focus(&self, id: ElementId) -> bool {
        self.tree.get(id).is_some_and(|e| e.state.flags.is_focusable()) && self.is_shown(id)
    }

    fn change_focus(&mut self, new: Option<ElementId>) {
        if self.focused == new {
            return;
        }
        let payload = self.cursor_payload();
        if let Some(old) = self.focused.take() {
            self.call(old, |behavior, state, cx| behavior.on_focus_exit(state, cx));
            self.raise(old, GuiEventKind::FocusExit, payload);
            self.mark_dirty(old);
        }
        self.focused = new;
        if let Some(new) = new {
            self.call(new, |behavior, state, cx| behavior.on_focus_enter(state, cx));
            self.raise(new, GuiEventKind::FocusEnter, payload);
            self.mark_dirty(new);
        }
        tracing::debug!(focused = ?new.map(ElementId::raw), "focus changed");
    }

    fn cursor_payload(&self) -> EventPayload {
        EventPayload::Mouse {
            x: self.input.mouse_x,
            y: self.input.mouse_y,
        }
    }

    fn mouse_moved(&mut self, x: i32, y: i32) {
        if let Some(press) = self.pressed {
            self.drag(press, x, y);
        }
        let target = self.element_at(x, y);
        self.update_hover(target, x, y);
    }

    fn drag(&mut self, press: Press, x: i32, y: i32) {
        let id = press.element;
        let draggable = press.button == MouseButton::Left
            && self.flags(id).contains(ElementFlags::DRAGGABLE);

        if draggable {
            let (dx, dy) = self.input.mouse_delta();
            if dx == 0 && dy == 0 {
                return;
            }
            if let Some((ex, ey)) = self.abs_pos(id) {
                self.set_abs_pos(id, ex + dx, ey + dy);
            }
        }

        self.call(id, |behavior, state, cx| behavior.on_mouse_drag(state, cx, x, y));
        if draggable {
            tracing::trace!(element = id.raw(), x, y, "drag");
            self.raise(id, GuiEventKind::Drag, EventPayload::Mouse { x, y });
        }
    }

    fn update_hover(&mut self, target: Option<ElementId>, x: i32, y: i32) {
        if self.hovered == target {
            return;
        }
        let payload = EventPayload::Mouse { x, y };

        if let Some(old) = self.hovered.take() {
            if let Some(element) = self.tree.get_mut(old) {
                element.state.remove_flags(ElementFlags::HOVERED);
            }
            self.call(old, |behavior, state, cx| behavior.on_mouse_leave(state, cx));
            self.raise(old, GuiEventKind::HoverLeave, payload);
            self.mark_dirty(old);
        }

        self.hovered = target;
        if let Some(new) = target {
            if let Some(element) = self.tree.get_mut(new) {
                element.state.insert_flags(ElementFlags::HOVERED);
            }
            self.call(new, |behavior, state, cx| behavior.on_mouse_enter(state, cx));
            self.raise(new, GuiEventKind::HoverEnter, payload);
            self.mark_dirty(new);
        }
    }

    fn mouse_pressed(&mut self, button: MouseButton, x: i32, y: i32) {
        let target = self.element_at(x, y);
        self.update_hover(target, x, y);

        let focus = target.filter(|&t| self.can_focus(t));
        self.change_focus(focus);

        let Some(id) = target else {
            return;
        };
        if self.pressed.is_some() {
            return;
        }
        tracing::trace!(element = id.raw(), ?button, x, y, "press");

        self.pressed = Some(Press { element: id, button });
        if let Some(element) = self.tree.get_mut(id) {
            element.state.insert_flags(ElementFlags::PRESSED);
        }
        self.call(id, |behavior, state, cx| behavior.on_mouse_click(state, cx, button, x, y));
        self.raise(id, GuiEventKind::Click, EventPayload::Mouse { x, y });
        self.mark_dirty(id);
    }

    fn mouse_released(&mut self, button: MouseButton, x: i32, y: i32) {
        if let Some(press) = self.pressed.filter(|p| p.button == button) {
            let id = press.element;
            self.pressed = None;
            tracing::trace!(element = id.raw(), ?button, x, y, "release");

            if let Some(element) = self.tree.get_mut(id) {
                element.state.remove_flags(ElementFlags::PRESSED);
            }
            self.call(id, |behavior, state, cx| behavior.on_mouse_release(state, cx, button, x, y));
            if self.bounds(id).is_some_and(|b| b.contains(x, y)) {
                self.raise(id, GuiEventKind::Release, EventPayload::Mouse { x, y });
            }
            self.mark_dirty(id);
        }

        let target = self.element_at(x, y);
        self.update_hover(target, x, y);
    }

    fn key_event(&mut self, key: Key, down: bool) {
        if key == Key::Tab {
            if down {
                self.focus_next(self.input.modifiers.shift);
            }
            return;
        }
        if let Some(focused) = self.focused {
            self.call(focused, |behavior, state, cx| behavior.on_key_press(state, cx, key, down));
        }
    }
}
