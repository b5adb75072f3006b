//! # Input Dispatch Integration Test
//!
//! Hover, press/release, focus, keyboard routing, dragging and the kind
//! specific reactions of buttons, editboxes and windows.

use std::cell::RefCell;
use std::rc::Rc;

use trellis_ui::widgets::{EditboxFlags, WindowFlags};
use trellis_ui::{
    ElementFlags, ElementId, ElementSpec, EventPayload, GuiEvent, GuiEventKind, InputEvent, Key, Modifiers,
    MouseButton, RecordingRenderer, Ui, UiConfig,
};

type Events = Rc<RefCell<Vec<(GuiEventKind, EventPayload)>>>;

fn ui() -> Ui {
    Ui::new(Box::new(RecordingRenderer::new()), UiConfig::default())
}

fn record(ui: &mut Ui, id: ElementId) -> Events {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    ui.set_event_handler(
        id,
        move |event: &GuiEvent<'_>| sink.borrow_mut().push((event.kind, event.payload)),
        None,
    );
    events
}

fn kinds(events: &Events) -> Vec<GuiEventKind> {
    events.borrow().iter().map(|(kind, _)| *kind).collect()
}

fn down(x: i32, y: i32) -> InputEvent {
    InputEvent::MouseDown { button: MouseButton::Left, x, y }
}

fn up(x: i32, y: i32) -> InputEvent {
    InputEvent::MouseUp { button: MouseButton::Left, x, y }
}

/// Test: Moving over and off an element raises hover enter and leave.
#[test]
fn test_hover_enter_and_leave() {
    let mut ui = ui();
    let button = ui.create_button_ex(None, &ElementSpec::new(10, 10, 100, 40));
    let events = record(&mut ui, button);

    ui.handle_input(InputEvent::MouseMove { x: 20, y: 20 });
    assert_eq!(ui.hovered(), Some(button));
    assert!(ui.flags(button).contains(ElementFlags::HOVERED));

    ui.handle_input(InputEvent::MouseMove { x: 30, y: 25 });
    ui.handle_input(InputEvent::MouseMove { x: 300, y: 300 });
    assert_eq!(ui.hovered(), None);
    assert!(!ui.flags(button).contains(ElementFlags::HOVERED));

    assert_eq!(
        *events.borrow(),
        vec![
            (GuiEventKind::HoverEnter, EventPayload::Mouse { x: 20, y: 20 }),
            (GuiEventKind::HoverLeave, EventPayload::Mouse { x: 300, y: 300 }),
        ]
    );
}

/// Test: Release outside the pressed element clears PRESSED without a RELEASE event.
#[test]
fn test_release_requires_bounds() {
    let mut ui = ui();
    let button = ui.create_button_ex(None, &ElementSpec::new(10, 10, 100, 40));
    let events = record(&mut ui, button);

    ui.handle_input(down(20, 20));
    assert_eq!(ui.pressed(), Some(button));
    assert!(ui.flags(button).contains(ElementFlags::PRESSED));
    assert_eq!(ui.focused(), Some(button));

    ui.handle_input(up(500, 500));
    assert_eq!(ui.pressed(), None);
    assert!(!ui.flags(button).contains(ElementFlags::PRESSED));
    assert_eq!(
        kinds(&events),
        vec![
            GuiEventKind::HoverEnter,
            GuiEventKind::FocusEnter,
            GuiEventKind::Click,
            GuiEventKind::HoverLeave,
        ]
    );

    events.borrow_mut().clear();
    ui.handle_input(down(20, 20));
    ui.handle_input(up(25, 25));
    assert_eq!(
        *events.borrow(),
        vec![
            (GuiEventKind::HoverEnter, EventPayload::Mouse { x: 20, y: 20 }),
            (GuiEventKind::Click, EventPayload::Mouse { x: 20, y: 20 }),
            (GuiEventKind::Release, EventPayload::Mouse { x: 25, y: 25 }),
        ]
    );
}

/// Test: Only the button that pressed an element releases it.
#[test]
fn test_release_matches_button() {
    let mut ui = ui();
    let button = ui.create_button_ex(None, &ElementSpec::new(0, 0, 50, 50));

    ui.handle_input(down(5, 5));
    ui.handle_input(InputEvent::MouseUp { button: MouseButton::Right, x: 5, y: 5 });
    assert_eq!(ui.pressed(), Some(button));
    ui.handle_input(up(5, 5));
    assert_eq!(ui.pressed(), None);
}

/// Test: Clicking empty space clears focus.
#[test]
fn test_click_outside_clears_focus() {
    let mut ui = ui();
    let button = ui.create_button_ex(None, &ElementSpec::new(0, 0, 50, 50));
    let events = record(&mut ui, button);

    assert!(ui.set_focus(button));
    ui.handle_input(down(400, 400));
    ui.handle_input(up(400, 400));
    assert_eq!(ui.focused(), None);
    assert_eq!(kinds(&events), vec![GuiEventKind::FocusEnter, GuiEventKind::FocusExit]);
}

/// Test: Elements without keyboard control can't take focus.
#[test]
fn test_focus_requires_keyboard_control() {
    let mut ui = ui();
    let label = ui.create_label_ex(None, &ElementSpec::new(0, 0, 50, 50));
    let window = ui.create_window_ex(None, &ElementSpec::new(100, 100, 50, 50));
    assert!(!ui.set_focus(label));
    assert!(!ui.set_focus(window));

    ui.handle_input(down(110, 110));
    assert_eq!(ui.pressed(), Some(window));
    assert_eq!(ui.focused(), None);
}

/// Test: Hiding or disabling the focused element drops focus.
#[test]
fn test_focus_dropped_when_ineligible() {
    let mut ui = ui();
    let window = ui.create_window_ex(None, &ElementSpec::new(0, 0, 200, 200));
    let button = ui.create_button_ex(Some(window), &ElementSpec::new(10, 30, 50, 20));

    assert!(ui.set_focus(button));
    ui.remove_flags(window, ElementFlags::VISIBLE);
    assert_eq!(ui.focused(), None);
    assert!(!ui.set_focus(button));

    ui.add_flags(window, ElementFlags::VISIBLE);
    assert!(ui.set_focus(button));
    ui.add_flags(button, ElementFlags::DISABLED);
    assert_eq!(ui.focused(), None);
}

/// Test: Hidden subtrees and disabled elements are skipped by hit-testing.
#[test]
fn test_hit_test_skips_hidden_and_disabled() {
    let mut ui = ui();
    let window = ui.create_window_ex(None, &ElementSpec::new(0, 0, 200, 200));
    let button = ui.create_button_ex(Some(window), &ElementSpec::new(10, 30, 50, 20));

    assert_eq!(ui.element_at(15, 35), Some(button));
    ui.add_flags(button, ElementFlags::DISABLED);
    assert_eq!(ui.element_at(15, 35), Some(window));
    ui.remove_flags(button, ElementFlags::DISABLED);

    ui.remove_flags(window, ElementFlags::VISIBLE);
    assert_eq!(ui.element_at(15, 35), None);
}

/// Test: Return and Space press and release a focused button.
#[test]
fn test_button_keyboard_activation() {
    let mut ui = ui();
    let button = ui.create_button_ex(None, &ElementSpec::new(0, 0, 50, 50));
    assert!(ui.set_focus(button));
    let events = record(&mut ui, button);

    ui.handle_input(InputEvent::KeyDown(Key::Return));
    assert!(ui.flags(button).contains(ElementFlags::PRESSED));
    ui.handle_input(InputEvent::KeyUp(Key::Return));
    assert!(!ui.flags(button).contains(ElementFlags::PRESSED));
    ui.handle_input(InputEvent::KeyDown(Key::Space));
    ui.handle_input(InputEvent::KeyDown(Key::A));

    let origin = EventPayload::Mouse { x: 0, y: 0 };
    assert_eq!(
        *events.borrow(),
        vec![
            (GuiEventKind::Click, origin),
            (GuiEventKind::Release, origin),
            (GuiEventKind::Click, origin),
        ]
    );
}

/// Test: Reparenting the focused element under a hidden window drops focus.
#[test]
fn test_focus_dropped_when_reparented_out_of_sight() {
    let mut ui = ui();
    let hidden = ui.create_window_ex(None, &ElementSpec::new(0, 0, 200, 200));
    ui.remove_flags(hidden, ElementFlags::VISIBLE);
    let button = ui.create_button_ex(None, &ElementSpec::new(300, 300, 50, 20));
    let events = record(&mut ui, button);

    assert!(ui.set_focus(button));
    assert!(ui.add_child(hidden, button));
    assert_eq!(ui.focused(), None);

    ui.handle_input(InputEvent::KeyDown(Key::Return));
    assert!(!ui.flags(button).contains(ElementFlags::PRESSED));
    assert_eq!(kinds(&events), vec![GuiEventKind::FocusEnter, GuiEventKind::FocusExit]);

    assert!(ui.remove_child(button));
    assert!(ui.set_focus(button));
}

/// Test: Losing focus mid key press releases the button without a RELEASE event.
#[test]
fn test_focus_loss_cancels_keyboard_press() {
    let mut ui = ui();
    let button = ui.create_button_ex(None, &ElementSpec::new(0, 0, 50, 50));
    let other = ui.create_button_ex(None, &ElementSpec::new(100, 0, 50, 50).flags(ElementFlags::TABSTOP));
    assert!(ui.set_focus(button));
    let events = record(&mut ui, button);

    ui.handle_input(InputEvent::KeyDown(Key::Return));
    ui.handle_input(down(400, 400));
    ui.handle_input(up(400, 400));
    ui.handle_input(InputEvent::KeyUp(Key::Return));

    assert_eq!(ui.focused(), None);
    assert!(!ui.flags(button).contains(ElementFlags::PRESSED));
    assert_eq!(kinds(&events), vec![GuiEventKind::Click, GuiEventKind::FocusExit]);

    // Same through Tab: the key release lands on the next tab stop.
    assert!(ui.set_focus(button));
    ui.handle_input(InputEvent::KeyDown(Key::Space));
    ui.handle_input(InputEvent::KeyDown(Key::Tab));
    ui.handle_input(InputEvent::KeyUp(Key::Space));
    assert_eq!(ui.focused(), Some(other));
    assert!(!ui.flags(button).contains(ElementFlags::PRESSED));
    assert!(!ui.flags(other).contains(ElementFlags::PRESSED));
}

/// Test: Keys reach only the focused element.
#[test]
fn test_keys_go_to_focused_only() {
    let mut ui = ui();
    let button = ui.create_button_ex(None, &ElementSpec::new(0, 0, 50, 50));
    let events = record(&mut ui, button);

    ui.handle_input(InputEvent::KeyDown(Key::Return));
    assert!(events.borrow().is_empty());
}

/// Test: Tab and Shift+Tab cycle through tab stops in paint order.
#[test]
fn test_tab_cycles_focus() {
    let mut ui = ui();
    let stop = ElementSpec::new(0, 0, 10, 10).flags(ElementFlags::TABSTOP);
    let first = ui.create_button_ex(None, &stop);
    let skipped = ui.create_button_ex(None, &ElementSpec::new(0, 0, 10, 10));
    let second = ui.create_button_ex(None, &stop);
    let third = ui.create_button_ex(None, &stop);
    ui.add_flags(third, ElementFlags::DISABLED);
    let fourth = ui.create_button_ex(None, &stop);

    let mut order = Vec::new();
    for _ in 0..4 {
        ui.handle_input(InputEvent::KeyDown(Key::Tab));
        ui.handle_input(InputEvent::KeyUp(Key::Tab));
        order.push(ui.focused());
    }
    assert_eq!(order, vec![Some(first), Some(second), Some(fourth), Some(first)]);
    assert!(!order.contains(&Some(skipped)));

    ui.handle_input(InputEvent::Modifiers(Modifiers { shift: true, ..Modifiers::default() }));
    ui.handle_input(InputEvent::KeyDown(Key::Tab));
    assert_eq!(ui.focused(), Some(fourth));
}

/// Test: Dragging a draggable window moves it and its children.
#[test]
fn test_drag_moves_subtree() {
    let mut ui = ui();
    let spec = ElementSpec::new(100, 100, 200, 150).flags(ElementFlags::DRAGGABLE);
    let window = ui.create_window_ex(None, &spec);
    let label = ui.create_label_ex(Some(window), &ElementSpec::new(10, 30, 50, 20));
    let events = record(&mut ui, window);

    ui.handle_input(down(150, 150));
    ui.handle_input(InputEvent::MouseMove { x: 160, y: 170 });
    ui.handle_input(up(160, 170));

    assert_eq!(ui.abs_pos(window), Some((110, 120)));
    assert_eq!(ui.abs_pos(label), Some((120, 150)));
    assert!(events
        .borrow()
        .contains(&(GuiEventKind::Drag, EventPayload::Mouse { x: 160, y: 170 })));
}

/// Test: Elements without DRAGGABLE stay put while held.
#[test]
fn test_non_draggable_stays() {
    let mut ui = ui();
    let window = ui.create_window_ex(None, &ElementSpec::new(100, 100, 200, 150));
    let events = record(&mut ui, window);

    ui.handle_input(down(150, 150));
    ui.handle_input(InputEvent::MouseMove { x: 160, y: 170 });
    assert_eq!(ui.abs_pos(window), Some((100, 100)));
    assert!(!kinds(&events).contains(&GuiEventKind::Drag));
}

/// Test: Typing into a focused editbox edits at the cursor and raises events.
#[test]
fn test_editbox_typing() {
    let mut ui = ui();
    let editbox = ui.create_editbox_ex(None, &ElementSpec::new(0, 0, 200, 24).text("ac"));
    assert_eq!(ui.editbox_cursor(editbox), Some(2));

    ui.handle_input(InputEvent::Text('x'));
    assert_eq!(ui.text(editbox), Some("ac"));

    assert!(ui.set_focus(editbox));
    let events = record(&mut ui, editbox);
    ui.handle_input(InputEvent::KeyDown(Key::Left));
    ui.handle_input(InputEvent::Text('b'));
    assert_eq!(ui.text(editbox), Some("abc"));
    assert_eq!(ui.editbox_cursor(editbox), Some(2));

    ui.handle_input(InputEvent::KeyDown(Key::End));
    ui.handle_input(InputEvent::KeyDown(Key::Backspace));
    assert_eq!(ui.text(editbox), Some("ab"));

    ui.handle_input(InputEvent::KeyDown(Key::Return));
    assert_eq!(
        kinds(&events),
        vec![GuiEventKind::InputChange, GuiEventKind::InputChange, GuiEventKind::InputReturn]
    );

    ui.editbox_set_cursor(editbox, 99);
    assert_eq!(ui.editbox_cursor(editbox), Some(2));
    ui.set_editbox_flags(editbox, EditboxFlags::MASK_INPUT);
    assert_eq!(ui.editbox_flags(editbox), Some(EditboxFlags::MASK_INPUT));
}

/// Test: Press and release on the close button hides the window.
#[test]
fn test_window_close_button() {
    let mut ui = ui();
    let window = ui.create_window_ex(None, &ElementSpec::new(100, 100, 200, 150));
    let events = record(&mut ui, window);

    // Close button sits in the titlebar's right corner.
    ui.handle_input(down(290, 110));
    ui.handle_input(up(290, 110));

    assert!(!ui.flags(window).contains(ElementFlags::VISIBLE));
    assert!(kinds(&events).contains(&GuiEventKind::WindowClose));
    assert_eq!(ui.element_at(150, 150), None);
}

/// Test: Releasing away from the close button keeps the window open.
#[test]
fn test_window_close_cancelled() {
    let mut ui = ui();
    let window = ui.create_window_ex(None, &ElementSpec::new(100, 100, 200, 150));
    let events = record(&mut ui, window);

    ui.handle_input(down(290, 110));
    ui.handle_input(up(150, 200));
    assert!(ui.flags(window).contains(ElementFlags::VISIBLE));
    assert!(!kinds(&events).contains(&GuiEventKind::WindowClose));

    ui.set_window_flags(window, WindowFlags::TITLEBAR);
    ui.handle_input(down(290, 110));
    ui.handle_input(up(290, 110));
    assert!(ui.flags(window).contains(ElementFlags::VISIBLE));
}

/// Test: A UI built without input ignores every event.
#[test]
fn test_input_disabled() {
    let config = UiConfig {
        input_enabled: false,
        ..UiConfig::default()
    };
    let mut ui = Ui::new(Box::new(RecordingRenderer::new()), config);
    let button = ui.create_button_ex(None, &ElementSpec::new(0, 0, 50, 50));

    ui.handle_input(down(5, 5));
    assert_eq!(ui.pressed(), None);
    assert_eq!(ui.hovered(), None);
    assert!(ui.contains(button));
}

/// Test: User data registered with the handler comes back with each event.
#[test]
fn test_handler_user_data() {
    let mut ui = ui();
    let button = ui.create_button_ex(None, &ElementSpec::new(0, 0, 50, 50));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    ui.set_event_handler(
        button,
        move |event: &GuiEvent<'_>| {
            if let Some(tag) = event.user_data::<u32>() {
                sink.borrow_mut().push(*tag);
            }
        },
        Some(Box::new(7_u32)),
    );

    ui.handle_input(down(5, 5));
    ui.handle_input(up(5, 5));
    assert!(!seen.borrow().is_empty());
    assert!(seen.borrow().iter().all(|&tag| tag == 7));

    ui.clear_event_handler(button);
    seen.borrow_mut().clear();
    ui.handle_input(down(5, 5));
    assert!(seen.borrow().is_empty());
}
