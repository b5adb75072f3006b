//! Container with an optional titlebar and close button.

use bitflags::bitflags;

use crate::element::{place_text, Alignment, Behavior, ElementFlags, ElementKind, ElementState, UiCx};
use crate::event::{EventPayload, GuiEventKind};
use crate::geometry::{Padding, Rect};
use crate::input::MouseButton;
use crate::render::Painter;
use crate::style::{palette, Colour};

bitflags! {
    /// Window-specific flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowFlags: u8 {
        /// Draw a titlebar with the window text as title.
        const TITLEBAR = 1 << 0;
        /// Draw a close button in the titlebar.
        const CLOSE_BUTTON = 1 << 1;
    }
}

/// Titlebar height in pixels.
pub const TITLEBAR_HEIGHT: u32 = 20;

/// Gap between the close button and the titlebar edges.
const CLOSE_MARGIN: u32 = 3;

/// Window: background, border and an optional titlebar.
#[derive(Debug, Clone)]
pub struct Window {
    flags: WindowFlags,
    title_colour: Colour,
    close_pressed: bool,
}

impl Window {
    /// Creates the window behavior with a titlebar and close button.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            flags: WindowFlags::TITLEBAR.union(WindowFlags::CLOSE_BUTTON),
            title_colour: palette::TITLEBAR,
            close_pressed: false,
        }
    }

    /// Window-specific flags.
    #[must_use]
    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    /// Replaces the window-specific flags.
    pub fn set_flags(&mut self, flags: WindowFlags) {
        self.flags = flags;
    }

    /// Titlebar colour.
    #[must_use]
    pub fn title_colour(&self) -> Colour {
        self.title_colour
    }

    /// Sets the titlebar colour.
    pub fn set_title_colour(&mut self, colour: Colour) {
        self.title_colour = colour;
    }

    /// Titlebar area, if the window has one.
    #[must_use]
    pub fn titlebar_rect(&self, bounds: Rect) -> Option<Rect> {
        self.flags
            .contains(WindowFlags::TITLEBAR)
            .then(|| Rect::new(bounds.x, bounds.y, bounds.width, TITLEBAR_HEIGHT.min(bounds.height)))
    }

    /// Close button area, if the window has one.
    #[must_use]
    pub fn close_rect(&self, bounds: Rect) -> Option<Rect> {
        if !self.flags.contains(WindowFlags::CLOSE_BUTTON) {
            return None;
        }
        let bar = self.titlebar_rect(bounds)?;
        let side = bar.height.saturating_sub(2 * CLOSE_MARGIN);
        if side == 0 || bar.width < side + 2 * CLOSE_MARGIN {
            return None;
        }
        let margin = CLOSE_MARGIN as i32;
        Some(Rect::new(bar.right() - margin - side as i32, bar.y + margin, side, side))
    }

    fn hits_close(&self, element: &ElementState, x: i32, y: i32) -> bool {
        self.close_rect(element.bounds()).is_some_and(|r| r.contains(x, y))
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for Window {
    fn kind(&self) -> ElementKind {
        ElementKind::Window
    }

    fn on_create(&mut self, element: &mut ElementState, _cx: &mut UiCx<'_>) {
        element.insert_flags(
            ElementFlags::BACKGROUND | ElementFlags::BORDER | ElementFlags::SHADOW | ElementFlags::MOUSECTRL,
        );
        element.colour = palette::ELEMENT_BODY;
    }

    fn render(&self, element: &ElementState, painter: &mut Painter<'_>) {
        painter.panel(element, element.colour());

        let bounds = element.bounds();
        let Some(bar) = self.titlebar_rect(bounds) else {
            return;
        };
        painter.fill_rect(bar, self.title_colour);

        let text = element.text();
        let (x, y) = place_text(text.size(), bar, Alignment::LEFT | Alignment::CENTER_V, Padding::new(0, 0, 6, 6));
        painter.text_at(element, text.plain(), x, y, true);

        if let Some(close) = self.close_rect(bounds) {
            let body = if self.close_pressed {
                palette::ELEMENT_DARK.lerp(Colour::BLACK, 0.25)
            } else {
                palette::ELEMENT_DARK
            };
            painter.fill_rect(close, body);
            painter.outline_rect(close, palette::BORDER);
        }
    }

    fn on_mouse_click(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>, button: MouseButton, x: i32, y: i32) {
        if button == MouseButton::Left && self.hits_close(element, x, y) {
            self.close_pressed = true;
            cx.request_redraw();
        }
    }

    fn on_mouse_release(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>, button: MouseButton, x: i32, y: i32) {
        if button != MouseButton::Left || !std::mem::take(&mut self.close_pressed) {
            return;
        }
        if self.hits_close(element, x, y) {
            element.remove_flags(ElementFlags::VISIBLE);
            element.raise_event(GuiEventKind::WindowClose, EventPayload::Mouse { x, y });
            tracing::debug!(element = element.id().raw(), "window closed");
        }
        cx.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_rect_sits_in_titlebar_corner() {
        let window = Window::new();
        let bounds = Rect::new(10, 10, 200, 100);
        let close = window.close_rect(bounds).unwrap();
        assert_eq!(close, Rect::new(193, 13, 14, 14));
        assert!(window.titlebar_rect(bounds).unwrap().contains(close.x, close.y));
    }

    #[test]
    fn test_no_close_without_titlebar() {
        let mut window = Window::new();
        window.set_flags(WindowFlags::CLOSE_BUTTON);
        assert!(window.close_rect(Rect::new(0, 0, 100, 100)).is_none());
        assert!(window.titlebar_rect(Rect::new(0, 0, 100, 100)).is_none());
    }

    #[test]
    fn test_tiny_window_has_no_close_button() {
        let window = Window::new();
        assert!(window.close_rect(Rect::new(0, 0, 10, 5)).is_none());
    }
}
