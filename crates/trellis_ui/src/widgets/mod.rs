//! Built-in element kinds.
//!
//! Each kind is a [`Behavior`](crate::element::Behavior) that applies its
//! default flags and colours in `on_create`. Kind-specific flags live inside
//! the behavior, never in the shared flags word.

mod button;
mod canvas;
mod editbox;
mod label;
mod sprite;
mod window;

pub use button::Button;
pub use canvas::Canvas;
pub use editbox::{Editbox, EditboxFlags};
pub use label::Label;
pub use sprite::Sprite;
pub use window::{Window, WindowFlags, TITLEBAR_HEIGHT};
