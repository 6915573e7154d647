//! Tests for style sheets, value readers and grouped resolution.

use trellis_style::{
    BORDER_KEYS, Border, BorderStyle, BoxShadow, BoxSizing, ColorValue, ComputedStyle, Display,
    Keyword, Length, Position, StyleKey, StyleSheet, StyleValue, VerticalAlign,
};

// ========== StyleSheet ==========

#[test]
fn test_sheet_starts_empty() {
    let sheet = StyleSheet::new();
    assert!(sheet.is_empty());
    assert_eq!(sheet.get(StyleKey::Width), None);
}

#[test]
fn test_sheet_set_get_unset() {
    let mut sheet = StyleSheet::new();
    sheet.set(StyleKey::Width, StyleValue::Px(100.0));
    assert!(sheet.is_set(StyleKey::Width));
    assert_eq!(sheet.get(StyleKey::Width), Some(&StyleValue::Px(100.0)));

    assert_eq!(sheet.unset(StyleKey::Width), Some(StyleValue::Px(100.0)));
    assert!(sheet.is_empty());
}

#[test]
fn test_sheet_merge_overrides_set_slots_only() {
    let mut base = StyleSheet::new()
        .with(StyleKey::Width, StyleValue::Px(10.0))
        .with(StyleKey::Height, StyleValue::Px(20.0));
    let over = StyleSheet::new().with(StyleKey::Width, StyleValue::Scale(0.5));

    base.merge(&over);

    assert_eq!(base.get(StyleKey::Width), Some(&StyleValue::Scale(0.5)));
    assert_eq!(base.get(StyleKey::Height), Some(&StyleValue::Px(20.0)));
}

#[test]
fn test_sheet_diff_lists_changed_keys() {
    let old = StyleSheet::new()
        .with(StyleKey::Width, StyleValue::Px(10.0))
        .with(StyleKey::ZIndex, StyleValue::Int(1));
    let new = StyleSheet::new()
        .with(StyleKey::Width, StyleValue::Px(10.0))
        .with(StyleKey::Opacity, StyleValue::Scale(0.5));

    let changed: Vec<StyleKey> = old.diff(&new).collect();
    assert_eq!(changed, vec![StyleKey::ZIndex, StyleKey::Opacity]);
}

#[test]
fn test_sheet_iter_yields_set_slots() {
    let sheet = StyleSheet::new()
        .with(StyleKey::Top, StyleValue::Px(1.0))
        .with(StyleKey::Left, StyleValue::Px(2.0));
    let keys: Vec<StyleKey> = sheet.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec![StyleKey::Left, StyleKey::Top]);
}

// ========== value readers ==========

#[test]
fn test_length_from_value() {
    assert_eq!(Length::from_value(Some(&StyleValue::Px(5.0))), Length::Px(5.0));
    assert_eq!(
        Length::from_value(Some(&StyleValue::Scale(0.25))),
        Length::Scale(0.25)
    );
    assert_eq!(Length::from_value(Some(&StyleValue::Auto)), Length::Auto);
    assert_eq!(Length::from_value(None), Length::Auto);
    // A keyword in a length slot reads as auto.
    assert_eq!(
        Length::from_value(Some(&StyleValue::Keyword(Keyword::Block))),
        Length::Auto
    );
}

#[test]
fn test_length_resolve() {
    assert_eq!(Length::Px(5.0).resolve(200.0), Some(5.0));
    assert_eq!(Length::Scale(0.25).resolve(200.0), Some(50.0));
    assert_eq!(Length::Auto.resolve(200.0), None);
}

#[test]
fn test_keyword_readers_fall_back_to_initial_values() {
    assert_eq!(Display::from_value(None), Display::Block);
    assert_eq!(Position::from_value(None), Position::Static);
    assert_eq!(BoxSizing::from_value(None), BoxSizing::ContentBox);
    assert_eq!(VerticalAlign::from_value(None), VerticalAlign::Top);
    assert_eq!(
        Display::from_value(Some(&StyleValue::Px(1.0))),
        Display::Block
    );
    assert_eq!(
        Display::from_value(Some(&StyleValue::Keyword(Keyword::InlineBlock))),
        Display::InlineBlock
    );
    assert_eq!(
        Position::from_value(Some(&StyleValue::Keyword(Keyword::Absolute))),
        Position::Absolute
    );
}

#[test]
fn test_position_priority_order() {
    assert!(Position::Static < Position::Relative);
    assert!(Position::Relative < Position::Absolute);
}

#[test]
fn test_keyword_display_names() {
    assert_eq!(Keyword::InlineBlock.to_string(), "inline-block");
    assert_eq!(StyleKey::BorderTopLeftRadius.to_string(), "border-top-left-radius");
}

// ========== Color ==========

#[test]
fn test_color_from_hex() {
    assert_eq!(ColorValue::from_hex("#fff"), Some(ColorValue::WHITE));
    assert_eq!(
        ColorValue::from_hex("336699"),
        Some(ColorValue::rgb(0x33, 0x66, 0x99))
    );
    assert_eq!(
        ColorValue::from_hex("#33669980"),
        Some(ColorValue::rgba(0x33, 0x66, 0x99, 0x80))
    );
    assert_eq!(ColorValue::from_hex("#12"), None);
    assert_eq!(ColorValue::from_hex("#zzz"), None);
}

// ========== Border / BoxShadow ==========

#[test]
fn test_border_from_sheet_walks_key_table() {
    let mut sheet = StyleSheet::new();
    Border::uniform(2.0, BorderStyle::Solid, ColorValue::BLACK).write_to(&mut sheet);
    sheet.set(StyleKey::BorderTopLeftRadius, StyleValue::Scale(0.1));

    for key in BORDER_KEYS {
        assert!(sheet.is_set(key), "{key} should be written");
    }

    let border = Border::from_sheet(&sheet, 50.0);
    assert_eq!(border.widths().horizontal(), 4.0);
    assert_eq!(border.left.style, BorderStyle::Solid);
    assert_eq!(border.top_left_radius, 5.0);
    assert!(border.has_radius());
}

#[test]
fn test_border_negative_width_clamps_to_zero() {
    let sheet = StyleSheet::new().with(StyleKey::BorderTopWidth, StyleValue::Px(-3.0));
    assert_eq!(Border::from_sheet(&sheet, 0.0).top.width, 0.0);
}

#[test]
fn test_border_strips_cover_radius() {
    let mut border = Border::uniform(1.0, BorderStyle::Solid, ColorValue::BLACK);
    border.top_left_radius = 4.0;
    let [top, right, bottom, left] = border.strips(20.0, 10.0);

    assert_eq!(top.height, 4.0);
    assert_eq!(right.width, 1.0);
    assert_eq!(bottom.y, 9.0);
    assert_eq!(left.width, 4.0);
}

#[test]
fn test_shadow_geometry() {
    let sheet = StyleSheet::new()
        .with(StyleKey::BoxShadowX, StyleValue::Px(3.0))
        .with(StyleKey::BoxShadowBlur, StyleValue::Px(2.0));
    let shadow = BoxShadow::from_sheet(&sheet);

    assert_eq!(shadow.extent(), 2.0);
    let edges = shadow.edges();
    assert_eq!(edges.left, 0.0);
    assert_eq!(edges.right, 5.0);
    assert_eq!(edges.top, 2.0);

    let recolored = BoxShadow {
        color: ColorValue::WHITE,
        ..shadow
    };
    assert!(shadow.same_geometry(&recolored));
    assert!(!shadow.same_geometry(&BoxShadow::default()));
}

// ========== ComputedStyle ==========

#[test]
fn test_computed_defaults() {
    let style = ComputedStyle::default();
    assert!(style.visible);
    assert_eq!(style.opacity, 1.0);
    assert!(style.in_flow());
    assert!(style.is_block_in_flow());
    // A transparent background needs an alpha channel.
    assert!(style.needs_alpha());
}
