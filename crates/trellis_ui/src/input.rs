//! Platform input for the dispatch pipeline.
//!
//! The embedding application translates its window-system events into
//! [`InputEvent`]s and feeds them to [`crate::Ui::handle_input`] one at a time.

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Return/Enter key.
    Return,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Space bar.
    Space,
    /// Alphabetic keys.
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    /// Number keys.
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    /// Function keys.
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    /// A translated character from text input.
    Character(char),
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
    /// Super/Command key is held.
    pub super_key: bool,
}

/// One platform input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The cursor moved to an absolute screen position.
    MouseMove {
        /// Cursor X.
        x: i32,
        /// Cursor Y.
        y: i32,
    },
    /// A mouse button went down.
    MouseDown {
        /// Button.
        button: MouseButton,
        /// Cursor X.
        x: i32,
        /// Cursor Y.
        y: i32,
    },
    /// A mouse button went up.
    MouseUp {
        /// Button.
        button: MouseButton,
        /// Cursor X.
        x: i32,
        /// Cursor Y.
        y: i32,
    },
    /// A key went down (auto-repeat delivers further downs).
    KeyDown(Key),
    /// A key went up.
    KeyUp(Key),
    /// Translated text input.
    Text(char),
    /// Modifier state changed.
    Modifiers(Modifiers),
}

/// Input state accumulated across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current mouse X position.
    pub mouse_x: i32,
    /// Current mouse Y position.
    pub mouse_y: i32,
    /// Mouse X position before the last move.
    pub prev_mouse_x: i32,
    /// Mouse Y position before the last move.
    pub prev_mouse_y: i32,
    /// Modifier keys state.
    pub modifiers: Modifiers,
    /// Mouse buttons currently held.
    buttons_down: u8,
    /// Keys currently held.
    keys_down: Vec<Key>,
}

impl InputState {
    /// Creates a new empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::MouseMove { x, y } => self.set_mouse_pos(x, y),
            InputEvent::MouseDown { button, x, y } => {
                self.set_mouse_pos(x, y);
                self.buttons_down |= Self::button_mask(button);
            }
            InputEvent::MouseUp { button, x, y } => {
                self.set_mouse_pos(x, y);
                self.buttons_down &= !Self::button_mask(button);
            }
            InputEvent::KeyDown(key) => {
                if !self.keys_down.contains(&key) {
                    self.keys_down.push(key);
                }
            }
            InputEvent::KeyUp(key) => self.keys_down.retain(|&k| k != key),
            InputEvent::Modifiers(modifiers) => self.modifiers = modifiers,
            InputEvent::Text(_) => {}
        }
    }

    /// Updates mouse position.
    pub fn set_mouse_pos(&mut self, x: i32, y: i32) {
        self.prev_mouse_x = self.mouse_x;
        self.prev_mouse_y = self.mouse_y;
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Returns true if the mouse button is currently held.
    #[must_use]
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        (self.buttons_down & Self::button_mask(button)) != 0
    }

    /// Returns true if the key is currently held.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns the mouse movement delta of the last move.
    #[must_use]
    pub fn mouse_delta(&self) -> (i32, i32) {
        (self.mouse_x - self.prev_mouse_x, self.mouse_y - self.prev_mouse_y)
    }

    /// Returns the bit mask for a button.
    const fn button_mask(button: MouseButton) -> u8 {
        match button {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
        }
    }
}
