use termgrid::{Buffer, Paint, Rect, Rgb};

#[test]
fn test_put_str_respects_max_width() {
    let mut buf = Buffer::new(10, 1);
    let written = buf.put_str(1, 0, "Invoices", 4, Paint::default());
    assert_eq!(written, 4);
    assert_eq!(buf.row_text(0), " Invo     ");
}

#[test]
fn test_put_str_wide_chars_use_two_cells() {
    let mut buf = Buffer::new(6, 1);
    let written = buf.put_str(0, 0, "日本", 6, Paint::default());
    assert_eq!(written, 4);
    assert!(buf.get(1, 0).unwrap().wide_continuation);
    assert_eq!(buf.row_text(0), "日本  ");
}

#[test]
fn test_put_str_drops_wide_char_at_edge() {
    let mut buf = Buffer::new(6, 1);
    let written = buf.put_str(0, 0, "a日", 2, Paint::default());
    assert_eq!(written, 1);
}

#[test]
fn test_fill_is_clipped() {
    let red = Paint::default().bg(Rgb::new(255, 0, 0));
    let mut buf = Buffer::new(4, 4);
    buf.fill(Rect::new(2, 2, 10, 10), red);
    assert_eq!(buf.get(3, 3).unwrap().bg, Rgb::new(255, 0, 0));
    assert_eq!(buf.get(1, 1).unwrap().bg, Rgb::new(0, 0, 0));
}

#[test]
fn test_blit_copies_at_offset() {
    let mut base = Buffer::new(5, 2);
    let mut small = Buffer::new(2, 1);
    small.put_str(0, 0, "ok", 2, Paint::default());
    base.blit(&small, 3, 1);
    assert_eq!(base.row_text(1), "   ok");
}

#[test]
fn test_diff_reports_changed_cells_only() {
    let a = Buffer::new(3, 2);
    let mut b = Buffer::new(3, 2);
    b.put_str(1, 1, "x", 1, Paint::default());
    let changed: Vec<(u16, u16)> = b.diff(&a).map(|(x, y, _)| (x, y)).collect();
    assert_eq!(changed, vec![(1, 1)]);
}

#[test]
fn test_out_of_bounds_access() {
    let mut buf = Buffer::new(2, 2);
    assert!(buf.get(2, 0).is_none());
    buf.set(5, 5, termgrid::Cell::new('z'));
    assert_eq!(buf.row_text(0), "  ");
}
