use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use combobox::{
    Combobox, ComboboxConfig, EventResult, InteractionMode, SelectOption, SelectValue,
    SignalRegistry,
};
use termgrid::{Event, Key, MouseButton, Rect};

type Changes = Arc<Mutex<Vec<SelectValue>>>;

// Trigger occupies row 2, columns 2..22; a three-option menu drops to rows 3..6.
const TRIGGER: Rect = Rect::new(2, 2, 20, 1);

fn fruit(config: ComboboxConfig) -> (Combobox, Changes) {
    let changes: Changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    let mut widget = Combobox::new(
        config
            .options([("apple", "Apple"), ("banana", "Banana"), ("cherry", "Cherry")])
            .on_change(move |value| sink.lock().unwrap().push(value.clone())),
    )
    .unwrap();
    widget.layout(TRIGGER, Rect::from_size(40, 20));
    (widget, changes)
}

fn click(widget: &mut Combobox, signals: &mut SignalRegistry, x: u16, y: u16) -> EventResult {
    widget.handle_event(&Event::click(x, y), signals)
}

fn hover(widget: &mut Combobox, signals: &mut SignalRegistry, x: u16, y: u16) -> EventResult {
    widget.handle_event(&Event::PointerMove { x, y }, signals)
}

// ============================================================================
// Trigger
// ============================================================================

#[test]
fn test_click_toggles_menu() {
    let (mut w, changes) = fruit(ComboboxConfig::new("fruit"));
    let mut signals = SignalRegistry::new();

    assert_eq!(click(&mut w, &mut signals, 5, 2), EventResult::Consumed);
    assert!(w.is_open());
    assert_eq!(w.interaction_mode(), Some(InteractionMode::Pointer));
    assert_eq!(w.menu_position().map(|p| p.rect()), Some(Rect::new(2, 3, 20, 3)));

    click(&mut w, &mut signals, 5, 2);
    assert!(!w.is_open());
    assert!(changes.lock().unwrap().is_empty());
}

#[test]
fn test_right_click_does_not_open() {
    let (mut w, _) = fruit(ComboboxConfig::new("fruit"));
    let mut signals = SignalRegistry::new();
    let right = Event::PointerDown {
        x: 5,
        y: 2,
        button: MouseButton::Right,
    };
    assert_eq!(w.handle_event(&right, &mut signals), EventResult::Consumed);
    assert!(!w.is_open());
}

#[test]
fn test_disabled_swallows_click_without_opening() {
    let (mut w, _) = fruit(ComboboxConfig::new("fruit").disabled(true));
    let mut signals = SignalRegistry::new();
    assert_eq!(click(&mut w, &mut signals, 5, 2), EventResult::Consumed);
    assert!(!w.is_open());
}

#[test]
fn test_clear_button_clears_without_opening() {
    let (mut w, changes) = fruit(ComboboxConfig::new("fruit").initial_value("banana"));
    let mut signals = SignalRegistry::new();

    // Clear button sits four columns in from the trigger's right edge.
    click(&mut w, &mut signals, TRIGGER.right() - 4, 2);
    assert!(!w.is_open());
    assert_eq!(w.display_label(), None);
    assert_eq!(*changes.lock().unwrap(), vec![SelectValue::None]);
}

// ============================================================================
// Menu
// ============================================================================

#[test]
fn test_click_option_commits_and_closes() {
    let (mut w, changes) = fruit(ComboboxConfig::new("fruit"));
    let mut signals = SignalRegistry::new();
    w.open(&mut signals);

    assert_eq!(click(&mut w, &mut signals, 5, 4), EventResult::Consumed);
    assert!(!w.is_open());
    assert_eq!(*changes.lock().unwrap(), vec![SelectValue::Single("banana".into())]);
}

#[test]
fn test_multi_click_toggles_and_stays_open() {
    let (mut w, changes) = fruit(ComboboxConfig::new("fruit").multiple(true));
    let mut signals = SignalRegistry::new();
    w.open(&mut signals);

    click(&mut w, &mut signals, 5, 3);
    assert!(w.is_open());
    assert_eq!(w.display_label().as_deref(), Some("Apple"));

    click(&mut w, &mut signals, 5, 3);
    assert!(w.is_open());
    assert_eq!(w.display_label(), None);
    assert_eq!(changes.lock().unwrap().len(), 2);
}

#[test]
fn test_footer_actions() {
    let added = Arc::new(AtomicUsize::new(0));
    let refreshed = Arc::new(AtomicUsize::new(0));
    let (a, r) = (Arc::clone(&added), Arc::clone(&refreshed));
    let (mut w, _) = fruit(
        ComboboxConfig::new("fruit")
            .on_add_new(move || {
                a.fetch_add(1, Ordering::SeqCst);
            })
            .on_refresh(move || {
                r.fetch_add(1, Ordering::SeqCst);
            }),
    );
    let mut signals = SignalRegistry::new();

    // Three option rows then the footer on row 6, split in two halves.
    w.open(&mut signals);
    assert_eq!(w.menu_position().map(|p| p.height), Some(4));

    click(&mut w, &mut signals, 14, 6);
    assert_eq!(refreshed.load(Ordering::SeqCst), 1);
    assert!(w.is_open());

    click(&mut w, &mut signals, 4, 6);
    assert_eq!(added.load(Ordering::SeqCst), 1);
    assert!(!w.is_open());
}

#[test]
fn test_scroll_over_menu_moves_focus() {
    let (mut w, _) = fruit(ComboboxConfig::new("fruit"));
    let mut signals = SignalRegistry::new();
    w.open(&mut signals);

    let scroll = Event::Scroll {
        x: 5,
        y: 4,
        delta_y: 1,
    };
    assert_eq!(w.handle_event(&scroll, &mut signals), EventResult::Consumed);
    assert_eq!(w.focused_index(), Some(1));
}

// ============================================================================
// Outside clicks
// ============================================================================

#[test]
fn test_outside_click_closes_when_mounted() {
    let (mut w, changes) = fruit(ComboboxConfig::new("fruit").initial_value("cherry"));
    let mut signals = SignalRegistry::new();
    w.mount(&mut signals);
    w.open(&mut signals);

    assert_eq!(click(&mut w, &mut signals, 30, 15), EventResult::Ignored);
    assert!(!w.is_open());
    assert_eq!(w.display_label().as_deref(), Some("Cherry"));
    assert!(changes.lock().unwrap().is_empty());
}

#[test]
fn test_outside_click_ignored_without_subscription() {
    let (mut w, _) = fruit(ComboboxConfig::new("fruit"));
    let mut signals = SignalRegistry::new();
    w.open(&mut signals);

    click(&mut w, &mut signals, 30, 15);
    assert!(w.is_open());
}

// ============================================================================
// Hover
// ============================================================================

#[test]
fn test_hover_moves_focus() {
    let (mut w, _) = fruit(ComboboxConfig::new("fruit"));
    let mut signals = SignalRegistry::new();
    w.open(&mut signals);

    hover(&mut w, &mut signals, 5, 5);
    assert_eq!(w.focused_index(), Some(2));

    hover(&mut w, &mut signals, 30, 15);
    assert_eq!(w.focused_index(), None);
}

#[test]
fn test_keyboard_mode_suppresses_hover() {
    let (mut w, _) = fruit(ComboboxConfig::new("fruit"));
    let mut signals = SignalRegistry::new();
    w.open(&mut signals);
    hover(&mut w, &mut signals, 5, 3);
    assert_eq!(w.focused_index(), Some(0));

    w.handle_event(&Event::key(Key::Down), &mut signals);
    assert_eq!(w.focused_index(), Some(1));

    // Rows shifting under a still pointer must not steal focus.
    w.rehover();
    w.pointer_enter(2);
    w.pointer_leave();
    hover(&mut w, &mut signals, 5, 3);
    assert_eq!(w.focused_index(), Some(1));
    assert_eq!(w.interaction_mode(), Some(InteractionMode::Keyboard));

    // Real movement hands control back to the pointer.
    hover(&mut w, &mut signals, 6, 3);
    assert_eq!(w.interaction_mode(), Some(InteractionMode::Pointer));
    assert_eq!(w.focused_index(), Some(0));
}

#[test]
fn test_hover_maps_rows_through_scroll_offset() {
    let options: Vec<SelectOption> = (0..12)
        .map(|i| SelectOption::new(format!("v{i}"), format!("Item {i}")))
        .collect();
    let mut w = Combobox::new(ComboboxConfig::new("items").options(options)).unwrap();
    w.layout(TRIGGER, Rect::from_size(40, 20));
    let mut signals = SignalRegistry::new();
    w.open(&mut signals);
    assert_eq!(w.menu_position().map(|p| p.height), Some(8));

    w.handle_event(&Event::key(Key::End), &mut signals);
    assert_eq!(w.focused_index(), Some(11));

    // Eight visible rows ending at item 11, so the top row is item 4.
    hover(&mut w, &mut signals, 5, 3);
    assert_eq!(w.focused_index(), Some(4));
}
