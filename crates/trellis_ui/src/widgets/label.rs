//! Static text.

use crate::element::{Alignment, Behavior, ElementKind, ElementState, UiCx};
use crate::render::Painter;
use crate::style::Colour;

/// Label: text, top-left aligned, with an optional panel behind it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Label;

impl Behavior for Label {
    fn kind(&self) -> ElementKind {
        ElementKind::Label
    }

    fn on_create(&mut self, element: &mut ElementState, _cx: &mut UiCx<'_>) {
        element.colour = Colour::TRANSPARENT;
        let text = element.text_mut();
        text.alignment = Alignment::TOP_LEFT;
        text.invalidate();
    }

    fn render(&self, element: &ElementState, painter: &mut Painter<'_>) {
        painter.panel(element, element.colour());
        painter.text(element);
    }
}
