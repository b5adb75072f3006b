//! # Element Tree Integration Test
//!
//! Hierarchy, z-order, geometry propagation and lifecycle through the public
//! `Ui` API.

use std::cell::RefCell;
use std::rc::Rc;

use trellis_shared::Vec2;
use trellis_ui::{
    Behavior, ElementFlags, ElementId, ElementKind, ElementSpec, ElementState, InputEvent, RecordingLog,
    RecordingRenderer, Ui, UiConfig, UiCx,
};

fn ui() -> (Ui, RecordingLog) {
    let renderer = RecordingRenderer::new();
    let log = renderer.log();
    (Ui::new(Box::new(renderer), UiConfig::default()), log)
}

/// Records the order its elements are destroyed in.
struct Probe {
    name: &'static str,
    destroyed: Rc<RefCell<Vec<&'static str>>>,
}

impl Behavior for Probe {
    fn kind(&self) -> ElementKind {
        ElementKind::Custom("probe")
    }

    fn on_destroy(&mut self, _element: &mut ElementState, _cx: &mut UiCx<'_>) {
        self.destroyed.borrow_mut().push(self.name);
    }
}

/// Test: A new child is the topmost of its siblings and hit first.
#[test]
fn test_new_child_is_topmost() {
    let (mut ui, _) = ui();
    let window = ui.create_window_ex(None, &ElementSpec::new(0, 0, 300, 200));
    let first = ui.create_button_ex(Some(window), &ElementSpec::new(10, 30, 100, 50));
    let second = ui.create_button_ex(Some(window), &ElementSpec::new(50, 40, 100, 50));

    assert_eq!(ui.children(window), &[first, second]);
    assert_eq!(ui.element_at(70, 60), Some(second));

    assert!(ui.send_to_top(first));
    assert_eq!(ui.children(window), &[second, first]);
    assert_eq!(ui.element_at(70, 60), Some(first));
}

/// Test: Stepping through z-order swaps with the neighbour and stops at the ends.
#[test]
fn test_move_forward_and_backward() {
    let (mut ui, _) = ui();
    let parent = ui.create_window(None);
    let a = ui.create_label(Some(parent));
    let b = ui.create_label(Some(parent));
    let c = ui.create_label(Some(parent));

    assert!(ui.move_forward(a));
    assert_eq!(ui.children(parent), &[b, a, c]);
    assert!(!ui.move_forward(c));
    assert!(ui.move_backward(c));
    assert_eq!(ui.children(parent), &[b, c, a]);
    assert!(ui.send_to_bottom(a));
    assert_eq!(ui.children(parent), &[a, b, c]);
    assert!(!ui.move_backward(a));
}

/// Test: Roots follow the same z-order rules as children.
#[test]
fn test_roots_reorder() {
    let (mut ui, _) = ui();
    let a = ui.create_button_ex(None, &ElementSpec::new(0, 0, 100, 100));
    let b = ui.create_button_ex(None, &ElementSpec::new(0, 0, 100, 100));
    assert_eq!(ui.element_at(5, 5), Some(b));

    assert!(ui.send_to_top(a));
    assert_eq!(ui.roots(), &[b, a]);
    assert_eq!(ui.element_at(5, 5), Some(a));
}

/// Test: Cycles and self-parenting are rejected without touching the tree.
#[test]
fn test_cycles_rejected() {
    let (mut ui, _) = ui();
    let outer = ui.create_window(None);
    let inner = ui.create_window(Some(outer));
    let leaf = ui.create_label(Some(inner));

    assert!(!ui.add_child(leaf, outer));
    assert!(!ui.add_child(inner, inner));
    assert!(!ui.add_child(ElementId::new(9999), leaf));
    assert_eq!(ui.parent(inner), Some(outer));
    assert!(ui.is_child_of(outer, leaf));
    assert!(!ui.is_child_of(leaf, outer));
    assert!(!ui.is_child_of(leaf, leaf));
}

/// Test: Reparenting keeps the absolute position and refreshes relative bounds.
#[test]
fn test_reparent_keeps_absolute_bounds() {
    let (mut ui, _) = ui();
    let left = ui.create_window_ex(None, &ElementSpec::new(0, 0, 200, 200));
    let right = ui.create_window_ex(None, &ElementSpec::new(400, 0, 200, 200));
    let button = ui.create_button_ex(Some(left), &ElementSpec::new(20, 20, 40, 20));

    assert!(ui.add_child(right, button));
    assert_eq!(ui.parent(button), Some(right));
    assert_eq!(ui.abs_pos(button), Some((20, 20)));
    assert_eq!(ui.children(left), &[] as &[ElementId]);

    assert!(ui.remove_child(button));
    assert_eq!(ui.parent(button), None);
    assert_eq!(ui.roots().last(), Some(&button));
    assert_eq!(ui.abs_pos(button), Some((20, 20)));
}

/// Test: Children follow their parent's moves; size follows only with AUTO_RESIZE.
#[test]
fn test_bounds_propagate_to_children() {
    let (mut ui, _) = ui();
    let window = ui.create_window_ex(None, &ElementSpec::new(0, 0, 200, 100));
    let fixed = ui.create_button_ex(Some(window), &ElementSpec::new(20, 10, 50, 20));
    let stretchy = ui.create_button_ex(
        Some(window),
        &ElementSpec::new(0, 0, 100, 50).flags(ElementFlags::AUTO_RESIZE),
    );

    ui.set_abs_size(window, 400, 200);
    assert_eq!(ui.abs_pos(fixed), Some((40, 20)));
    assert_eq!(ui.abs_size(fixed), Some((50, 20)));
    assert_eq!(ui.abs_size(stretchy), Some((200, 100)));

    ui.set_abs_pos(window, 100, 100);
    assert_eq!(ui.abs_pos(fixed), Some((140, 120)));
}

/// Test: Relative setters resolve against the parent's bounds.
#[test]
fn test_relative_bounds() {
    let (mut ui, _) = ui();
    let window = ui.create_window_ex(None, &ElementSpec::new(100, 100, 200, 100));
    let label = ui.create_label(Some(window));

    ui.set_pos(label, Vec2::new(0.5, 0.5));
    ui.set_size(label, Vec2::new(0.25, 0.5));
    assert_eq!(ui.abs_pos(label), Some((200, 150)));
    assert_eq!(ui.abs_size(label), Some((50, 50)));
    assert_eq!(ui.size(label), Some(Vec2::new(0.25, 0.5)));
}

/// Test: A canvas follows the viewport.
#[test]
fn test_canvas_follows_viewport() {
    let (mut ui, _) = ui();
    let canvas = ui.create_canvas(None);
    assert_eq!(ui.abs_size(canvas), Some((800, 600)));

    ui.resize(1024, 768);
    assert_eq!(ui.viewport(), (1024, 768));
    assert_eq!(ui.abs_size(canvas), Some((1024, 768)));
}

/// Test: Destroying a subtree runs each on_destroy once, deepest first.
#[test]
fn test_destroy_order() {
    let (mut ui, _) = ui();
    let destroyed = Rc::new(RefCell::new(Vec::new()));
    let probe = |name| {
        Box::new(Probe {
            name,
            destroyed: Rc::clone(&destroyed),
        })
    };

    let root = ui.create_element(None, probe("root"));
    let child = ui.create_element(Some(root), probe("child"));
    let grandchild = ui.create_element(Some(child), probe("grandchild"));

    assert!(ui.destroy(root));
    assert_eq!(*destroyed.borrow(), vec!["grandchild", "child", "root"]);
    assert!(!ui.contains(grandchild));
    assert!(!ui.destroy(root));
    assert!(ui.roots().is_empty());
}

/// Test: Stale handles are ignored everywhere.
#[test]
fn test_stale_handles_are_noops() {
    let (mut ui, _) = ui();
    let label = ui.create_label(None);
    assert!(ui.destroy(label));

    ui.set_text(label, "gone");
    ui.set_abs_pos(label, 5, 5);
    ui.add_flags(label, ElementFlags::BORDER);
    assert_eq!(ui.text(label), None);
    assert_eq!(ui.flags(label), ElementFlags::empty());
    assert!(!ui.send_to_top(label));

    let orphan = ui.create_label(Some(label));
    assert_eq!(ui.parent(orphan), None);
}

/// Test: Shutdown releases every font the elements loaded.
#[test]
fn test_shutdown_releases_fonts() {
    let (mut ui, log) = ui();
    let window = ui.create_window(None);
    ui.create_button(Some(window));
    ui.create_editbox(Some(window));
    ui.create_label(None);
    assert_eq!(log.live_fonts(), 4);

    ui.shutdown();
    assert_eq!(log.live_fonts(), 0);
}

/// Test: Children placed under a zero-sized parent keep their pixel offset
/// once the parent gets a size, and follow it as fractions afterwards.
#[test]
fn test_children_of_zero_sized_parent_keep_offset() {
    let (mut ui, _) = ui();
    let window = ui.create_window(None);
    ui.set_abs_pos(window, 100, 100);
    let button = ui.create_button_ex(Some(window), &ElementSpec::new(10, 30, 50, 20));
    assert_eq!(ui.abs_pos(button), Some((110, 130)));

    ui.set_abs_size(window, 300, 200);
    assert_eq!(ui.abs_pos(button), Some((110, 130)));
    assert_eq!(ui.abs_size(button), Some((50, 20)));

    ui.set_abs_pos(window, 200, 200);
    assert_eq!(ui.abs_pos(button), Some((210, 230)));

    ui.set_abs_size(window, 600, 400);
    assert_eq!(ui.abs_pos(button), Some((220, 260)));
}

/// Test: Adding and removing flags touches exactly the requested bits.
#[test]
fn test_flags_round_trip() {
    let (mut ui, _) = ui();
    let button = ui.create_button_ex(None, &ElementSpec::new(0, 0, 50, 50));
    ui.handle_input(InputEvent::MouseMove { x: 5, y: 5 });

    let before = ui.flags(button);
    assert!(before.contains(ElementFlags::HOVERED | ElementFlags::BORDER | ElementFlags::VISIBLE));

    let extra = ElementFlags::SHADOW | ElementFlags::DRAGGABLE | ElementFlags::TEXT_TAGS;
    ui.add_flags(button, extra);
    assert_eq!(ui.flags(button), before | extra);

    ui.remove_flags(button, extra);
    assert_eq!(ui.flags(button), before);

    ui.remove_flags(button, ElementFlags::BORDER);
    assert_eq!(ui.flags(button), before - ElementFlags::BORDER);
    assert!(ui.flags(button).contains(ElementFlags::HOVERED));
}
