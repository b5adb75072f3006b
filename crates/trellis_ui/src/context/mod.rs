//! The UI context.
//!
//! [`Ui`] owns the element tree, the active renderer and all dispatch state
//! (hovered, pressed and focused element, redraw flag). Everything runs on the
//! thread that owns it: the application feeds input through
//! [`Ui::handle_input`] and calls [`Ui::process`] once per frame.

mod accessors;
mod bounds;
mod build;
mod dispatch;
mod frame;
mod kinds;

pub use build::ElementSpec;

use trellis_shared::Vec3;

use crate::config::UiConfig;
use crate::element::{Behavior, ElementFlags, ElementId, ElementState, UiCx};
use crate::event::{EventPayload, GuiEventKind};
use crate::input::{InputState, MouseButton};
use crate::render::Renderer;
use crate::tree::ElementTree;

/// The element currently held down by a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    element: ElementId,
    button: MouseButton,
}

/// Retained-mode UI: element tree, renderer and input dispatch.
pub struct Ui {
    config: UiConfig,
    tree: ElementTree,
    renderer: Box<dyn Renderer>,
    hovered: Option<ElementId>,
    pressed: Option<Press>,
    focused: Option<ElementId>,
    input: InputState,
    redraw: bool,
    viewport: (u32, u32),
}

impl Ui {
    /// Creates a UI drawing through `renderer`.
    pub fn new(renderer: Box<dyn Renderer>, config: UiConfig) -> Self {
        let viewport = (config.viewport_width, config.viewport_height);
        let mut ui = Self {
            config,
            tree: ElementTree::new(),
            renderer,
            hovered: None,
            pressed: None,
            focused: None,
            input: InputState::new(),
            redraw: true,
            viewport,
        };
        ui.renderer.resize(viewport.0, viewport.1);
        tracing::info!(
            width = viewport.0,
            height = viewport.1,
            params = ?ui.config.params(),
            "ui initialised"
        );
        ui
    }

    /// Destroys every element, releasing their backend resources, then the renderer.
    pub fn shutdown(self) {
        drop(self);
    }

    /// The configuration the UI was created with.
    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// The element tree.
    #[must_use]
    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// Shared state of an element.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.tree.get(id).map(|e| &e.state)
    }

    /// Returns true if the element exists.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.tree.contains(id)
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Input state accumulated from dispatched events.
    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Requests a redraw. Requests before the next frame collapse into one.
    pub fn force_redraw(&mut self) {
        self.redraw = true;
    }

    /// Returns true if a redraw is pending.
    #[must_use]
    pub fn redraw_pending(&self) -> bool {
        self.redraw
    }

    /// Handles a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.renderer.resize(width, height);
        for root in self.tree.roots().to_vec() {
            self.relayout(root);
        }
        self.redraw = true;
    }

    /// Maps a screen position (z = depth) into the 3D scene.
    #[must_use]
    pub fn screen_pos_to_world(&self, screen: Vec3) -> Vec3 {
        self.renderer.screen_pos_to_world(screen)
    }

    /// Maps a 3D scene position onto the screen.
    #[must_use]
    pub fn world_pos_to_screen(&self, world: Vec3) -> Vec3 {
        self.renderer.world_pos_to_screen(world)
    }

    /// Returns the behavior of an element if it is a `T`.
    #[must_use]
    pub fn behavior<T: Behavior>(&self, id: ElementId) -> Option<&T> {
        self.tree.get(id)?.behavior_any().downcast_ref::<T>()
    }

    /// Mutable access to the behavior of an element if it is a `T`.
    ///
    /// Counts as a visual change of the element.
    pub fn behavior_mut<T: Behavior>(&mut self, id: ElementId) -> Option<&mut T> {
        if self.behavior::<T>(id).is_none() {
            return None;
        }
        self.mark_dirty(id);
        self.tree.get_mut(id)?.behavior_any_mut().downcast_mut::<T>()
    }

    /// Runs a behavior operation with the element's state and a context.
    ///
    /// Afterwards honours the redraw request and re-places edited text.
    fn call<R>(
        &mut self,
        id: ElementId,
        op: impl FnOnce(&mut dyn Behavior, &mut ElementState, &mut UiCx<'_>) -> R,
    ) -> Option<R> {
        let element = self.tree.get_mut(id)?;
        let mut cx = UiCx::new(self.renderer.as_mut());
        let out = op(&mut *element.behavior, &mut element.state, &mut cx);
        if cx.redraw_requested() {
            self.mark_dirty(id);
        }
        self.refresh_text(id);
        Some(out)
    }

    /// Delivers a GUI event to an element's handler.
    fn raise(&mut self, id: ElementId, kind: GuiEventKind, payload: EventPayload) {
        if let Some(element) = self.tree.get_mut(id) {
            element.state.raise_event(kind, payload);
        }
    }

    /// Requests a redraw and invalidates the render caches above `id`.
    fn mark_dirty(&mut self, id: ElementId) {
        self.redraw = true;
        let mut current = Some(id);
        while let Some(node) = current {
            let Some(element) = self.tree.get_mut(node) else {
                break;
            };
            if let Some(cache) = element.cache.as_mut() {
                cache.dirty = true;
            }
            current = element.parent;
        }
    }

    /// Re-measures and re-places an element's text if it changed.
    fn refresh_text(&mut self, id: ElementId) {
        let Some(element) = self.tree.get_mut(id) else {
            return;
        };
        let text = &mut element.state.text;
        if !text.take_needs_layout() {
            return;
        }
        let size = match text.font_handle {
            Some(font) => self.renderer.measure_text(font, text.plain()),
            None => (0, 0),
        };
        text.place(size, element.state.bounds);
        self.mark_dirty(id);
    }

    /// Returns true if the element and all its ancestors are visible.
    fn is_shown(&self, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            match self.tree.get(node) {
                Some(e) if e.state.flags.contains(ElementFlags::VISIBLE) => current = e.parent,
                _ => return false,
            }
        }
        true
    }

    /// Destroys every element.
    fn teardown(&mut self) {
        for root in self.tree.roots().to_vec() {
            self.destroy(root);
        }
    }
}

impl Drop for Ui {
    fn drop(&mut self) {
        self.teardown();
        tracing::info!("ui shut down");
    }
}

impl std::fmt::Debug for Ui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("elements", &self.tree.len())
            .field("hovered", &self.hovered)
            .field("pressed", &self.pressed)
            .field("focused", &self.focused)
            .field("redraw", &self.redraw)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}
