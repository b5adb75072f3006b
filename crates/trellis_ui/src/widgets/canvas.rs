//! Full-viewport background container.

use crate::element::{Behavior, ElementFlags, ElementKind, ElementState, UiCx};
use crate::render::Painter;
use crate::style::Colour;

/// Canvas: a transparent container that follows its parent's size.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canvas;

impl Behavior for Canvas {
    fn kind(&self) -> ElementKind {
        ElementKind::Canvas
    }

    fn uses_text(&self) -> bool {
        false
    }

    fn on_create(&mut self, element: &mut ElementState, _cx: &mut UiCx<'_>) {
        element.insert_flags(ElementFlags::AUTO_RESIZE);
        element.colour = Colour::TRANSPARENT;
    }

    fn render(&self, element: &ElementState, painter: &mut Painter<'_>) {
        painter.panel(element, element.colour());
    }
}
