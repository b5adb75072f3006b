//! Relative/absolute geometry and its top-down propagation.

use trellis_shared::Vec2;

use super::Ui;
use crate::element::{ElementFlags, ElementId, PixelPin};
use crate::geometry::Rect;

impl Ui {
    /// Absolute rect an element's relative bounds refer to.
    pub(super) fn reference_rect(&self, id: ElementId) -> Rect {
        match self.tree.parent(id).and_then(|p| self.tree.get(p)) {
            Some(parent) => parent.state.bounds,
            None => Rect::new(0, 0, self.viewport.0, self.viewport.1),
        }
    }

    /// Sets absolute bounds and derives the relative ones.
    pub(super) fn set_abs_bounds(&mut self, id: ElementId, bounds: Rect) {
        let reference = self.reference_rect(id);
        let Some(element) = self.tree.get_mut(id) else {
            return;
        };
        let state = &mut element.state;
        (state.rel_pos, state.rel_size, state.pin) = to_rel(bounds, reference);
        self.apply_bounds(id, bounds);
    }

    /// Sets relative position and/or size and derives the absolute bounds.
    pub(super) fn set_rel_bounds(&mut self, id: ElementId, pos: Option<Vec2>, size: Option<Vec2>) {
        let reference = self.reference_rect(id);
        let Some(element) = self.tree.get_mut(id) else {
            return;
        };
        let state = &mut element.state;
        if let Some(pos) = pos {
            state.rel_pos = pos;
            state.pin.x = None;
            state.pin.y = None;
        }
        if let Some(size) = size {
            state.rel_size = size;
            state.pin.width = None;
            state.pin.height = None;
        }
        let bounds = from_rel(state.rel_pos, state.rel_size, state.pin, reference);
        self.apply_bounds(id, bounds);
    }

    /// Recomputes an element's relative bounds from its absolute ones.
    pub(super) fn refresh_rel(&mut self, id: ElementId) {
        let reference = self.reference_rect(id);
        if let Some(element) = self.tree.get_mut(id) {
            let state = &mut element.state;
            (state.rel_pos, state.rel_size, state.pin) = to_rel(state.bounds, reference);
        }
    }

    /// Re-derives an element's absolute bounds after its reference rect changed.
    ///
    /// Position always follows the relative position. Size follows the
    /// relative size only with `AUTO_RESIZE`; otherwise the absolute size is
    /// kept and the relative size refreshed. Pinned pixel values resolve into
    /// fractions once the reference has a nonzero extent.
    pub(super) fn relayout(&mut self, id: ElementId) {
        let reference = self.reference_rect(id);
        let Some(element) = self.tree.get_mut(id) else {
            return;
        };
        let state = &mut element.state;
        let mut bounds = from_rel(state.rel_pos, state.rel_size, state.pin, reference);
        if !state.flags.contains(ElementFlags::AUTO_RESIZE) {
            bounds.width = state.bounds.width;
            bounds.height = state.bounds.height;
            state.pin.width = None;
            state.pin.height = None;
        }

        let (rel_pos, rel_size, pin) = to_rel(bounds, reference);
        if state.pin.x.is_some() {
            state.rel_pos.x = rel_pos.x;
            state.pin.x = pin.x;
        }
        if state.pin.y.is_some() {
            state.rel_pos.y = rel_pos.y;
            state.pin.y = pin.y;
        }
        if state.pin.width.is_some() || !state.flags.contains(ElementFlags::AUTO_RESIZE) {
            state.rel_size.x = rel_size.x;
            state.pin.width = pin.width;
        }
        if state.pin.height.is_some() || !state.flags.contains(ElementFlags::AUTO_RESIZE) {
            state.rel_size.y = rel_size.y;
            state.pin.height = pin.height;
        }
        self.apply_bounds(id, bounds);
    }

    /// Stores new absolute bounds, notifies the behavior and propagates to children.
    fn apply_bounds(&mut self, id: ElementId, bounds: Rect) {
        let Some(element) = self.tree.get_mut(id) else {
            return;
        };
        let old = element.state.bounds;
        let pos_changed = (old.x, old.y) != (bounds.x, bounds.y);
        let size_changed = (old.width, old.height) != (bounds.width, bounds.height);
        if !pos_changed && !size_changed {
            return;
        }
        element.state.bounds = bounds;
        element.state.text.invalidate();

        self.call(id, |behavior, state, cx| behavior.on_bounds_changed(state, cx, pos_changed, size_changed));
        self.mark_dirty(id);

        for child in self.tree.children(id).to_vec() {
            self.relayout(child);
        }
    }
}

fn ratio(offset: f32, extent: u32) -> f32 {
    if extent == 0 {
        0.0
    } else {
        offset / extent as f32
    }
}

/// Relative position and size of `bounds` inside `reference`, plus pixel
/// pins for the axes where `reference` has no extent.
fn to_rel(bounds: Rect, reference: Rect) -> (Vec2, Vec2, PixelPin) {
    let dx = bounds.x - reference.x;
    let dy = bounds.y - reference.y;
    let pos = Vec2::new(ratio(dx as f32, reference.width), ratio(dy as f32, reference.height));
    let size = Vec2::new(
        ratio(bounds.width as f32, reference.width),
        ratio(bounds.height as f32, reference.height),
    );
    let pin = PixelPin {
        x: (reference.width == 0).then_some(dx),
        y: (reference.height == 0).then_some(dy),
        width: (reference.width == 0).then_some(bounds.width),
        height: (reference.height == 0).then_some(bounds.height),
    };
    (pos, size, pin)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn from_rel(pos: Vec2, size: Vec2, pin: PixelPin, reference: Rect) -> Rect {
    let w = reference.width as f32;
    let h = reference.height as f32;
    Rect::new(
        reference.x + pin.x.unwrap_or_else(|| (pos.x * w).round() as i32),
        reference.y + pin.y.unwrap_or_else(|| (pos.y * h).round() as i32),
        pin.width.unwrap_or_else(|| (size.x * w).round().max(0.0) as u32),
        pin.height.unwrap_or_else(|| (size.y * h).round().max(0.0) as u32),
    )
}
