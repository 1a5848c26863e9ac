use termgrid::text::{display_width, truncate_to_width};

#[test]
fn test_truncate_short_text_untouched() {
    assert_eq!(truncate_to_width("Acme", 10), "Acme");
}

#[test]
fn test_truncate_adds_ellipsis() {
    let out = truncate_to_width("Northwind Traders", 8);
    assert_eq!(out, "Northwi…");
    assert_eq!(display_width(&out), 8);
}

#[test]
fn test_truncate_wide_chars() {
    let out = truncate_to_width("日本語テキスト", 5);
    assert!(display_width(&out) <= 5);
    assert!(out.ends_with('…'));
}

#[test]
fn test_truncate_zero_width() {
    assert_eq!(truncate_to_width("anything", 0), "");
}
