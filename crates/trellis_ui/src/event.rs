//! Synthetic GUI events delivered to application handlers.

use std::any::Any;
use std::fmt;

use crate::element::ElementId;
use crate::input::Key;

/// Kind of a GUI event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuiEventKind {
    /// The cursor entered the element.
    HoverEnter,
    /// The cursor left the element.
    HoverLeave,
    /// The element was pressed.
    Click,
    /// The element was released.
    Release,
    /// The element was dragged.
    Drag,
    /// The element gained keyboard focus.
    FocusEnter,
    /// The element lost keyboard focus.
    FocusExit,
    /// The element's input text was edited.
    InputChange,
    /// Return was pressed in a text input.
    InputReturn,
    /// A window was closed with its close button.
    WindowClose,
}

/// Event-specific data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPayload {
    /// Cursor position in screen pixels.
    Mouse {
        /// Cursor X.
        x: i32,
        /// Cursor Y.
        y: i32,
    },
    /// Key that caused the event.
    Key {
        /// The key.
        key: Key,
    },
}

/// One GUI event, passed by reference to the element's handler.
pub struct GuiEvent<'a> {
    /// What happened.
    pub kind: GuiEventKind,
    /// The element the event originates from.
    pub element: ElementId,
    /// User data registered with the handler.
    pub data: Option<&'a dyn Any>,
    /// Mouse coordinates or key code.
    pub payload: EventPayload,
}

impl GuiEvent<'_> {
    /// Returns the user data downcast to `T`.
    #[must_use]
    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.data.and_then(|data| data.downcast_ref::<T>())
    }

    /// Returns the mouse coordinates, if this is a mouse event.
    #[must_use]
    pub fn mouse(&self) -> Option<(i32, i32)> {
        match self.payload {
            EventPayload::Mouse { x, y } => Some((x, y)),
            EventPayload::Key { .. } => None,
        }
    }

    /// Returns the key, if this is a key event.
    #[must_use]
    pub fn key(&self) -> Option<Key> {
        match self.payload {
            EventPayload::Key { key } => Some(key),
            EventPayload::Mouse { .. } => None,
        }
    }
}

impl fmt::Debug for GuiEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuiEvent")
            .field("kind", &self.kind)
            .field("element", &self.element)
            .field("has_data", &self.data.is_some())
            .field("payload", &self.payload)
            .finish()
    }
}

/// Application event handler.
///
/// Runs synchronously inside dispatch. It has no access to the UI context, so
/// it cannot destroy the element it was called for.
pub type EventHandler = Box<dyn FnMut(&GuiEvent<'_>)>;
