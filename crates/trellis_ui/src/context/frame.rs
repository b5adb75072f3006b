//! The per-frame render walk.

use super::Ui;
use crate::element::{Element, ElementFlags, ElementId};
use crate::render::{paint_extent, DrawMode, Painter, Renderer};

impl Ui {
    /// Runs one frame.
    ///
    /// With draw-on-demand the frame renders only if a redraw was requested;
    /// otherwise it always renders. Returns whether a render pass ran.
    pub fn process(&mut self) -> bool {
        if self.config.draw_on_demand && !self.redraw {
            return false;
        }
        self.redraw = false;
        self.render_frame();
        true
    }

    fn render_frame(&mut self) {
        tracing::trace!(elements = self.tree.len(), "render pass");
        self.renderer.begin();
        for root in self.tree.roots().to_vec() {
            self.render_element(root, None, true);
        }
        self.renderer.end();
    }

    /// Renders an element, then its children above it.
    ///
    /// `parent_alpha` is the parent's effective alpha (`None` for roots).
    fn render_element(&mut self, id: ElementId, parent_alpha: Option<u8>, use_cache: bool) {
        let Some(element) = self.tree.get(id) else {
            return;
        };
        let flags = element.state.flags;
        if !flags.contains(ElementFlags::VISIBLE) {
            return;
        }

        let alpha = if flags.contains(ElementFlags::INHERIT_ALPHA) {
            parent_alpha
        } else {
            None
        };
        if use_cache && element.cache.is_some() && self.render_cached(id, alpha) {
            return;
        }

        let Some(element) = self.tree.get(id) else {
            return;
        };
        draw_element(element, self.renderer.as_mut(), alpha);

        let effective = alpha.unwrap_or(element.state.colour.a);
        for child in element.children.clone() {
            self.render_element(child, Some(effective), use_cache);
        }
    }

    /// Draws a cached subtree, refreshing the cache first if it is dirty.
    ///
    /// The target covers the element's paint extent, drop shadow included.
    ///
    /// Returns false when no render target is available; the caller then
    /// draws the subtree directly.
    fn render_cached(&mut self, id: ElementId, alpha: Option<u8>) -> bool {
        let Some(element) = self.tree.get_mut(id) else {
            return false;
        };
        let bounds = paint_extent(&element.state);
        let size = (bounds.width, bounds.height);
        let Some(cache) = element.cache.as_mut() else {
            return false;
        };

        if cache.target.is_none() || cache.size != size {
            if let Some(old) = cache.target.take() {
                self.renderer.destroy_render_target(old);
            }
            cache.target = self.renderer.create_render_target(size.0, size.1);
            cache.size = size;
            cache.dirty = true;
        }
        let Some(target) = cache.target else {
            tracing::debug!(element = id.raw(), "render target unavailable, drawing directly");
            return false;
        };
        let dirty = std::mem::take(&mut cache.dirty);

        if dirty {
            self.renderer.enable_render_target(target, bounds.x, bounds.y);
            self.render_element(id, alpha, false);
            self.renderer.disable_render_target(target);
        }
        self.renderer
            .draw_render_target(target, bounds.x, bounds.y, bounds.width, bounds.height);
        true
    }
}

/// Draws one element in the draw mode its flags ask for.
fn draw_element(element: &Element, renderer: &mut dyn Renderer, alpha: Option<u8>) {
    let state = &element.state;
    let flags = state.flags;
    let mode = if flags.contains(ElementFlags::ENTITY_3D) {
        DrawMode::Draw3D
    } else if flags.contains(ElementFlags::DEPTH_TEST) {
        DrawMode::Draw2DDepth
    } else {
        DrawMode::Draw2D
    };

    let previous = (mode != DrawMode::Draw2D).then(|| renderer.set_draw_mode(mode));
    match mode {
        DrawMode::Draw3D => {
            renderer.set_draw_depth(state.z_depth);
            renderer.set_draw_transform(&state.transform.matrix());
        }
        DrawMode::Draw2DDepth => renderer.set_draw_depth(state.z_depth),
        DrawMode::Draw2D => {}
    }

    element.behavior.render(state, &mut Painter::new(renderer, alpha));

    if mode == DrawMode::Draw3D {
        renderer.reset_draw_transform();
    }
    if let Some(previous) = previous {
        renderer.set_draw_mode(previous);
    }
}
