mod common;

use classpick_core::PickerConfig;
use classpick_core::dom::StyleProperty;
use classpick_core::highlight::{Highlight, StyleSnapshot};
use common::MemoryPage;

#[test]
fn test_snapshot_holds_styles_from_before_the_highlight() {
    let mut page = MemoryPage::new();
    let body = page.body();
    let card = page.append(body, "div");
    page.set_inline_style(card, StyleProperty::Outline, "1px dashed red");
    page.set_inline_style(card, StyleProperty::ZIndex, "5");

    let mut highlight = Highlight::new();
    assert!(highlight.snapshot().is_none());
    assert!(highlight.enter(&mut page, &card, &PickerConfig::default()));

    assert_eq!(
        highlight.snapshot(),
        Some(&StyleSnapshot {
            outline: "1px dashed red".to_string(),
            background_color: String::new(),
            position: String::new(),
            z_index: "5".to_string(),
        })
    );
    assert_eq!(
        page.inline_style(card, StyleProperty::Outline),
        "2px solid #007bff"
    );
}

#[test]
fn test_moving_the_highlight_replaces_the_snapshot() {
    let mut page = MemoryPage::new();
    let body = page.body();
    let first = page.append(body, "p");
    let second = page.append(body, "p");
    page.set_inline_style(second, StyleProperty::Position, "absolute");
    let config = PickerConfig::default();

    let mut highlight = Highlight::new();
    highlight.enter(&mut page, &first, &config);
    highlight.enter(&mut page, &second, &config);

    assert_eq!(highlight.current(), Some(&second));
    assert_eq!(
        highlight.snapshot().map(|s| s.position.as_str()),
        Some("absolute")
    );
    assert_eq!(page.inline_style(first, StyleProperty::Outline), "");

    assert!(highlight.clear(&mut page));
    assert!(highlight.snapshot().is_none());
    assert_eq!(page.inline_style(second, StyleProperty::Position), "absolute");
}
