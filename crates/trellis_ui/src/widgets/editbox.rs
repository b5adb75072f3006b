//! Single-line text input.

use bitflags::bitflags;

use crate::element::{Alignment, Behavior, ElementFlags, ElementKind, ElementState, UiCx};
use crate::event::{EventPayload, GuiEventKind};
use crate::geometry::{Padding, Rect};
use crate::input::Key;
use crate::render::Painter;
use crate::style::palette;

bitflags! {
    /// Editbox-specific flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EditboxFlags: u8 {
        /// Render every character as `*`.
        const MASK_INPUT = 1 << 0;
    }
}

/// Character drawn in place of each masked character.
const MASK_CHAR: char = '*';

/// Editbox: text editing at a cursor, with change and return events.
///
/// The text is edited and shown exactly as typed; format tags are never
/// interpreted, so the cursor and the caret count the same characters.
#[derive(Debug, Clone, Default)]
pub struct Editbox {
    flags: EditboxFlags,
    cursor: usize,
    focused: bool,
}

impl Editbox {
    /// Creates the editbox behavior.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            flags: EditboxFlags::empty(),
            cursor: 0,
            focused: false,
        }
    }

    /// Editbox-specific flags.
    #[must_use]
    pub fn flags(&self) -> EditboxFlags {
        self.flags
    }

    /// Replaces the editbox-specific flags.
    pub fn set_flags(&mut self, flags: EditboxFlags) {
        self.flags = flags;
    }

    /// Cursor as a character index, clamped to the text.
    #[must_use]
    pub fn cursor(&self, element: &ElementState) -> usize {
        self.cursor.min(element.text().len())
    }

    /// Moves the cursor, clamping it to the text.
    pub fn set_cursor(&mut self, element: &ElementState, cursor: usize) {
        self.cursor = cursor.min(element.text().len());
    }

    /// Text as displayed, masked if requested.
    fn display_text(&self, element: &ElementState) -> String {
        let raw = element.text().as_str();
        if self.flags.contains(EditboxFlags::MASK_INPUT) {
            raw.chars().map(|_| MASK_CHAR).collect()
        } else {
            raw.to_owned()
        }
    }

    fn changed(element: &mut ElementState, cx: &mut UiCx<'_>, key: Key) {
        element.raise_event(GuiEventKind::InputChange, EventPayload::Key { key });
        cx.request_redraw();
    }
}

impl Behavior for Editbox {
    fn kind(&self) -> ElementKind {
        ElementKind::Editbox
    }

    fn on_create(&mut self, element: &mut ElementState, _cx: &mut UiCx<'_>) {
        element.insert_flags(
            ElementFlags::BORDER
                | ElementFlags::BACKGROUND
                | ElementFlags::CLIP
                | ElementFlags::MOUSECTRL
                | ElementFlags::KBCTRL
                | ElementFlags::TABSTOP,
        );
        element.colour = palette::ELEMENT_DARK;
        let text = element.text_mut();
        text.alignment = Alignment::LEFT | Alignment::CENTER_V;
        text.padding = Padding::new(0, 0, 4, 4);
        text.invalidate();
    }

    fn render(&self, element: &ElementState, painter: &mut Painter<'_>) {
        painter.panel(element, element.colour());

        let (x, y) = element.text().pos();
        let shown = self.display_text(element);
        painter.text_at(element, &shown, x, y, false);

        if !self.focused {
            return;
        }
        let Some(font) = element.text().font_handle() else {
            return;
        };
        let prefix: String = shown.chars().take(self.cursor(element)).collect();
        let (width, _) = painter.renderer().measure_text(font, &prefix);
        let height = element.text().size().1.max(u32::from(element.text().font().size));
        let caret_x = x.saturating_add(i32::try_from(width).unwrap_or(i32::MAX));
        let caret = Rect::new(caret_x, y, 1, height);
        painter.fill_rect(caret, element.text().colour);
    }

    fn on_key_press(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>, key: Key, down: bool) {
        if !down {
            return;
        }
        let len = element.text().len();
        let cursor = self.cursor(element);

        match key {
            Key::Backspace if cursor > 0 => {
                element.text_mut().remove(cursor - 1);
                self.cursor = cursor - 1;
                Self::changed(element, cx, key);
            }
            Key::Delete if cursor < len => {
                element.text_mut().remove(cursor);
                self.cursor = cursor;
                Self::changed(element, cx, key);
            }
            Key::Left => {
                self.cursor = cursor.saturating_sub(1);
                cx.request_redraw();
            }
            Key::Right => {
                self.cursor = (cursor + 1).min(len);
                cx.request_redraw();
            }
            Key::Home => {
                self.cursor = 0;
                cx.request_redraw();
            }
            Key::End => {
                self.cursor = len;
                cx.request_redraw();
            }
            Key::Return => {
                element.raise_event(GuiEventKind::InputReturn, EventPayload::Key { key });
            }
            _ => {}
        }
    }

    fn on_character(&mut self, element: &mut ElementState, cx: &mut UiCx<'_>, ch: char) {
        if ch.is_control() {
            return;
        }
        let cursor = self.cursor(element);
        element.text_mut().insert(cursor, ch);
        self.cursor = cursor + 1;
        Self::changed(element, cx, Key::Character(ch));
    }

    fn on_focus_enter(&mut self, _element: &mut ElementState, cx: &mut UiCx<'_>) {
        self.focused = true;
        cx.request_redraw();
    }

    fn on_focus_exit(&mut self, _element: &mut ElementState, cx: &mut UiCx<'_>) {
        self.focused = false;
        cx.request_redraw();
    }
}
