use combobox::{Combobox, ComboboxConfig, SelectOption, SelectValue, Selection, display_label};

fn options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("1", "Acme Ltd"),
        SelectOption::new("2", "Globex"),
        SelectOption::new("3", "Initech"),
    ]
}

// ============================================================================
// display_label
// ============================================================================

#[test]
fn test_label_for_matching_initial_value() {
    let selection = Selection::from_value(&"2".into(), &options(), false);
    assert_eq!(display_label(&selection, &options(), false).as_deref(), Some("Globex"));
}

#[test]
fn test_label_none_for_unmatched_value() {
    let selection = Selection::from_value(&"99".into(), &options(), false);
    assert_eq!(display_label(&selection, &options(), false), None);
}

#[test]
fn test_label_none_for_empty_selection() {
    assert_eq!(display_label(&Selection::new(), &options(), true), None);
}

#[test]
fn test_multi_label_single_item_uses_its_label() {
    let selection = Selection::from_value(&vec!["3"].into(), &options(), true);
    assert_eq!(display_label(&selection, &options(), true).as_deref(), Some("Initech"));
}

#[test]
fn test_multi_label_counts_only_resolved_values() {
    let selection = Selection::from_value(&vec!["1", "gone", "3"].into(), &options(), true);
    assert_eq!(
        display_label(&selection, &options(), true).as_deref(),
        Some("2 items selected")
    );
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_single_mode_keeps_first_value() {
    let selection = Selection::from_value(&vec!["2", "3"].into(), &options(), false);
    assert_eq!(selection.values(), ["2".to_string()]);
}

#[test]
fn test_single_mode_prefers_first_matching_value() {
    let selection = Selection::from_value(&vec!["gone", "3"].into(), &options(), false);
    assert_eq!(selection.values(), ["3".to_string()]);

    // Nothing matches yet: keep the first so it can resolve later.
    let stale = Selection::from_value(&vec!["gone", "later"].into(), &options(), false);
    assert_eq!(stale.values(), ["gone".to_string()]);
}

#[test]
fn test_single_widget_seeds_from_matching_initial_value() {
    let w = Combobox::new(
        ComboboxConfig::new("customer")
            .options(options())
            .initial_value(vec!["gone", "2"]),
    )
    .unwrap();
    assert_eq!(w.display_label().as_deref(), Some("Globex"));
    assert_eq!(w.value(), SelectValue::Single("2".into()));
}

#[test]
fn test_toggle_adds_then_removes() {
    let mut selection = Selection::new();
    assert!(selection.toggle("1"));
    assert!(selection.toggle("2"));
    assert!(!selection.toggle("1"));
    assert_eq!(selection.values(), ["2".to_string()]);
}

#[test]
fn test_unresolved_values_are_kept_but_not_reported() {
    let selection = Selection::from_value(&vec!["1", "gone"].into(), &options(), true);
    assert_eq!(selection.unresolved(&options()), vec!["gone"]);
    assert_eq!(
        selection.to_value(&options(), true),
        SelectValue::Multiple(vec!["1".to_string()])
    );
}

// ============================================================================
// Host updates
// ============================================================================

#[test]
fn test_open_close_leaves_selection_alone() {
    let mut w = Combobox::new(
        ComboboxConfig::new("customer")
            .options(options())
            .initial_value("3"),
    )
    .unwrap();
    let mut signals = combobox::SignalRegistry::new();
    w.open(&mut signals);
    w.close(&mut signals);
    assert_eq!(w.display_label().as_deref(), Some("Initech"));
    assert_eq!(w.value(), SelectValue::Single("3".into()));
}

#[test]
fn test_stale_value_resolves_when_options_arrive() {
    let mut w = Combobox::new(ComboboxConfig::new("customer").initial_value("4")).unwrap();
    assert_eq!(w.display_label(), None);
    assert_eq!(w.unresolved_values(), vec!["4"]);
    assert!(w.value().is_empty());

    let mut more = options();
    more.push(SelectOption::new("4", "Umbrella"));
    w.set_options(more).unwrap();
    assert_eq!(w.display_label().as_deref(), Some("Umbrella"));
    assert!(w.unresolved_values().is_empty());
}

#[test]
fn test_multi_commit_prunes_stale_values() {
    let mut w = Combobox::new(
        ComboboxConfig::new("tags")
            .options(options())
            .multiple(true)
            .initial_value(vec!["gone", "1"]),
    )
    .unwrap();
    let mut signals = combobox::SignalRegistry::new();
    assert!(w.select_value("2", &mut signals));
    assert_eq!(w.selection().values(), ["1".to_string(), "2".to_string()]);
}

#[test]
fn test_set_initial_value_only_reseeds_on_change() {
    let mut w = Combobox::new(
        ComboboxConfig::new("customer")
            .options(options())
            .initial_value("1"),
    )
    .unwrap();
    let mut signals = combobox::SignalRegistry::new();
    w.select_value("2", &mut signals);

    // Same initial value again: the user's choice stands.
    w.set_initial_value("1".into());
    assert_eq!(w.display_label().as_deref(), Some("Globex"));

    w.set_initial_value("3".into());
    assert_eq!(w.display_label().as_deref(), Some("Initech"));
}

#[test]
fn test_set_options_clamps_focus() {
    let mut w = Combobox::new(ComboboxConfig::new("customer").options(options())).unwrap();
    let mut signals = combobox::SignalRegistry::new();
    w.open(&mut signals);
    w.focus_last();
    assert_eq!(w.focused_index(), Some(2));

    w.set_options(options().into_iter().take(2).collect()).unwrap();
    assert_eq!(w.focused_index(), Some(1));
    assert!(w.set_options(Vec::new()).is_ok());
    assert_eq!(w.focused_index(), None);
}

#[test]
fn test_select_unknown_value_is_rejected() {
    let mut w = Combobox::new(ComboboxConfig::new("customer").options(options())).unwrap();
    let mut signals = combobox::SignalRegistry::new();
    assert!(!w.select_value("nope", &mut signals));
    assert!(w.selection().is_empty());
}

#[test]
fn test_required_satisfaction() {
    let mut w = Combobox::new(
        ComboboxConfig::new("customer")
            .options(options())
            .required(true),
    )
    .unwrap();
    assert!(!w.is_satisfied());
    let mut signals = combobox::SignalRegistry::new();
    w.select_value("1", &mut signals);
    assert!(w.is_satisfied());
}
