//! # Trellis UI
//!
//! Retained-mode GUI core: a tree of elements, an input dispatch pipeline and
//! a renderer contract that keeps every drawing API out of the core.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          UI CONTEXT                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  InputEvent → Hit Test → Behavior ops → GuiEvent → Handler   │
//! │                               ↓                              │
//! │        process() → Render Walk → Painter → dyn Renderer      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`Ui`] owns the [`ElementTree`], the boxed [`Renderer`] and the
//!   hovered/pressed/focused state.
//! - Every element kind is a [`Behavior`]; the built-in ones live in
//!   [`widgets`], applications add their own through [`Ui::create_element`].
//! - Children are painted in sequence order: the last child is topmost and is
//!   hit-tested first.
//! - [`RecordingRenderer`] is a headless backend that logs every call.
//!
//! Everything runs on one thread. Stale element handles are ignored by every
//! operation.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod config;
pub mod context;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod render;
pub mod style;
pub mod tags;
pub mod tree;
pub mod widgets;

pub use config::{InitParams, UiConfig};
pub use context::{ElementSpec, Ui};
pub use element::{
    Alignment, Behavior, ElementFlags, ElementId, ElementKind, ElementState, FontDesc, FontFlags, UiCx,
};
pub use error::{UiError, UiResult};
pub use event::{EventPayload, GuiEvent, GuiEventKind};
pub use geometry::{Padding, Rect};
pub use input::{InputEvent, InputState, Key, Modifiers, MouseButton};
pub use render::{DrawCall, DrawMode, Painter, RecordingLog, RecordingRenderer, Renderer};
pub use style::{palette, Colour};
pub use tags::{parse_format_tags, strip_format_tags, FormatTag, TagFlags};
pub use tree::ElementTree;
