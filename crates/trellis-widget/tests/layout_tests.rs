//! Tests for size resolution, flow layout and positioning.

use trellis_style::{EdgeSizes, Keyword, Rect, StyleKey, StyleValue};
use trellis_widget::{TaskKind, WidgetId, WidgetKind, WidgetTree};

const EPSILON: f32 = 0.001;

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

fn child(tree: &mut WidgetTree, parent: WidgetId, styles: &[(StyleKey, StyleValue)]) -> WidgetId {
    let id = tree.create(WidgetKind::element("div"));
    for (key, value) in styles {
        tree.set_style(id, *key, *value).unwrap();
    }
    tree.append(parent, id).unwrap();
    id
}

fn block(tree: &mut WidgetTree, parent: WidgetId, height: f32) -> WidgetId {
    child(tree, parent, &[(StyleKey::Height, StyleValue::Px(height))])
}

fn inline_block(tree: &mut WidgetTree, parent: WidgetId, width: f32, height: f32) -> WidgetId {
    child(
        tree,
        parent,
        &[
            (StyleKey::Display, StyleValue::Keyword(Keyword::InlineBlock)),
            (StyleKey::Width, StyleValue::Px(width)),
            (StyleKey::Height, StyleValue::Px(height)),
        ],
    )
}

fn border(tree: &WidgetTree, id: WidgetId) -> Rect {
    tree.widget(id).unwrap().boxes().border
}

fn assert_all_consistent(tree: &WidgetTree) {
    for id in tree.descendants(tree.root()) {
        let widget = tree.widget(id).unwrap();
        assert!(
            widget.boxes().is_consistent(&widget.margin()),
            "{id} has inconsistent boxes: {:?}",
            widget.boxes()
        );
    }
}

// ========== block flow ==========

#[test]
fn test_blocks_stack_vertically() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let container = child(&mut tree, root, &[]);
    let a = block(&mut tree, container, 10.0);
    let b = block(&mut tree, container, 20.0);
    let c = block(&mut tree, container, 30.0);

    tree.flush();

    assert!(!tree.has_pending_tasks());
    assert_eq!(border(&tree, container), Rect::new(0.0, 0.0, 800.0, 60.0));
    assert_eq!(border(&tree, a), Rect::new(0.0, 0.0, 800.0, 10.0));
    assert_eq!(border(&tree, b), Rect::new(0.0, 10.0, 800.0, 20.0));
    assert_eq!(border(&tree, c), Rect::new(0.0, 30.0, 800.0, 30.0));
    assert_all_consistent(&tree);
}

#[test]
fn test_display_none_takes_no_space() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let _a = block(&mut tree, root, 10.0);
    let b = block(&mut tree, root, 20.0);
    let c = block(&mut tree, root, 30.0);
    tree.set_style(b, StyleKey::Display, StyleValue::Keyword(Keyword::None))
        .unwrap();

    tree.flush();

    assert_close(border(&tree, c).y, 10.0);
    assert!(!tree.widget(b).unwrap().is_visible());
}

#[test]
fn test_hidden_keeps_its_space() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let _a = block(&mut tree, root, 10.0);
    let b = block(&mut tree, root, 20.0);
    let c = block(&mut tree, root, 30.0);
    tree.hide(b).unwrap();

    tree.flush();

    assert_close(border(&tree, c).y, 30.0);
    assert!(!tree.widget(b).unwrap().is_visible());
}

#[test]
fn test_removing_child_reflows_siblings() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let container = child(&mut tree, root, &[]);
    let a = block(&mut tree, container, 10.0);
    let b = block(&mut tree, container, 20.0);
    tree.flush();

    tree.destroy(a).unwrap();
    tree.flush();

    assert_close(border(&tree, b).y, 0.0);
    assert_close(border(&tree, container).height, 20.0);
}

#[test]
fn test_parent_padding_offsets_children() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let container = child(&mut tree, root, &[]);
    tree.set_padding(container, EdgeSizes::uniform(10.0)).unwrap();
    let a = block(&mut tree, container, 10.0);

    tree.flush();

    assert_eq!(border(&tree, container), Rect::new(0.0, 0.0, 800.0, 30.0));
    assert_eq!(border(&tree, a), Rect::new(10.0, 10.0, 780.0, 10.0));
    assert_all_consistent(&tree);
}

// ========== inline flow ==========

#[test]
fn test_inline_blocks_wrap() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let row = child(&mut tree, root, &[(StyleKey::Width, StyleValue::Px(100.0))]);
    let items: Vec<WidgetId> = (0..3)
        .map(|_| inline_block(&mut tree, row, 40.0, 10.0))
        .collect();

    tree.flush();

    let origins: Vec<(f32, f32)> = items
        .iter()
        .map(|id| {
            let b = border(&tree, *id);
            (b.x, b.y)
        })
        .collect();
    assert_eq!(origins, vec![(0.0, 0.0), (40.0, 0.0), (0.0, 10.0)]);
    assert_close(border(&tree, row).height, 20.0);
}

#[test]
fn test_second_inline_block_wraps_when_row_is_full() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let row = child(&mut tree, root, &[(StyleKey::Width, StyleValue::Px(100.0))]);
    let a = inline_block(&mut tree, row, 60.0, 10.0);
    let b = inline_block(&mut tree, row, 60.0, 10.0);

    tree.flush();

    assert_eq!(border(&tree, a), Rect::new(0.0, 0.0, 60.0, 10.0));
    assert_eq!(border(&tree, b), Rect::new(0.0, 10.0, 60.0, 10.0));
    assert_close(border(&tree, row).height, 20.0);
}

#[test]
fn test_block_after_inline_starts_new_line() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let _first = inline_block(&mut tree, root, 40.0, 15.0);
    let _second = inline_block(&mut tree, root, 40.0, 25.0);
    let after = block(&mut tree, root, 10.0);

    tree.flush();

    assert_eq!(border(&tree, after), Rect::new(0.0, 25.0, 800.0, 10.0));
}

#[test]
fn test_oversized_inline_stays_on_its_line() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let row = child(&mut tree, root, &[(StyleKey::Width, StyleValue::Px(50.0))]);
    let wide = inline_block(&mut tree, row, 80.0, 10.0);

    tree.flush();

    let b = border(&tree, wide);
    assert_eq!((b.x, b.y), (0.0, 0.0));
}

#[test]
fn test_text_uses_natural_size() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let text = tree.create(WidgetKind::text("abcd"));
    tree.set_style(text, StyleKey::Display, StyleValue::Keyword(Keyword::InlineBlock))
        .unwrap();
    tree.append(root, text).unwrap();

    tree.flush();

    let b = border(&tree, text);
    assert_close(b.width, 4.0 * 14.0 * 0.6);
    assert_close(b.height, 14.0 * 1.2);
    assert!(tree.widget(text).unwrap().has_surface());
}

// ========== sizing ==========

#[test]
fn test_percentage_width_of_parent_content() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let half = child(
        &mut tree,
        root,
        &[
            (StyleKey::Width, StyleValue::Scale(0.5)),
            (StyleKey::Height, StyleValue::Scale(0.25)),
        ],
    );

    tree.flush();

    assert_eq!(border(&tree, half), Rect::new(0.0, 0.0, 400.0, 150.0));
}

#[test]
fn test_content_box_adds_padding_and_border_box_does_not() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let content_box = child(
        &mut tree,
        root,
        &[
            (StyleKey::Width, StyleValue::Px(100.0)),
            (StyleKey::Height, StyleValue::Px(40.0)),
        ],
    );
    let border_box = child(
        &mut tree,
        root,
        &[
            (StyleKey::Width, StyleValue::Px(100.0)),
            (StyleKey::Height, StyleValue::Px(40.0)),
            (StyleKey::BoxSizing, StyleValue::Keyword(Keyword::BorderBox)),
        ],
    );
    tree.set_padding(content_box, EdgeSizes::uniform(5.0)).unwrap();
    tree.set_padding(border_box, EdgeSizes::uniform(5.0)).unwrap();

    tree.flush();

    let a = tree.widget(content_box).unwrap().boxes();
    assert_close(a.border.width, 110.0);
    assert_close(a.content.width, 100.0);
    let b = tree.widget(border_box).unwrap().boxes();
    assert_close(b.border.width, 100.0);
    assert_close(b.content.width, 90.0);
    assert_all_consistent(&tree);
}

#[test]
fn test_min_and_max_clamp() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let id = child(
        &mut tree,
        root,
        &[
            (StyleKey::Width, StyleValue::Px(50.0)),
            (StyleKey::MinWidth, StyleValue::Px(80.0)),
            (StyleKey::Height, StyleValue::Px(500.0)),
            (StyleKey::MaxHeight, StyleValue::Px(120.0)),
        ],
    );

    tree.flush();

    let b = border(&tree, id);
    assert_close(b.width, 80.0);
    assert_close(b.height, 120.0);
    let computed = tree.widget(id).unwrap().computed();
    assert_eq!(computed.min_width, Some(80.0));
    assert_eq!(computed.max_width, None);
}

#[test]
fn test_auto_height_follows_content() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let container = child(&mut tree, root, &[]);
    let _a = block(&mut tree, container, 10.0);
    tree.flush();
    assert_close(border(&tree, container).height, 10.0);

    let _b = block(&mut tree, container, 15.0);
    tree.flush();
    assert_close(border(&tree, container).height, 25.0);
}

#[test]
fn test_zero_width_child_adds_no_height() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let container = child(&mut tree, root, &[]);
    let _a = block(&mut tree, container, 10.0);
    let sliver = inline_block(&mut tree, container, 0.0, 30.0);
    tree.flush();

    assert_eq!(border(&tree, sliver), Rect::new(0.0, 10.0, 0.0, 30.0));
    assert_close(border(&tree, container).height, 10.0);
}

#[test]
fn test_compute_max_width() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let fixed = child(&mut tree, root, &[(StyleKey::Width, StyleValue::Px(300.0))]);
    let half = child(&mut tree, fixed, &[(StyleKey::Width, StyleValue::Scale(0.5))]);
    let auto = child(&mut tree, root, &[]);
    tree.flush();

    assert_close(tree.compute_max_width(root), 800.0);
    assert_close(tree.compute_max_width(fixed), 300.0);
    assert_close(tree.compute_max_width(half), 150.0);
    assert_close(tree.compute_max_width(auto), 800.0);
}

// ========== positioning ==========

#[test]
fn test_absolute_right_bottom() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let id = child(
        &mut tree,
        root,
        &[
            (StyleKey::Position, StyleValue::Keyword(Keyword::Absolute)),
            (StyleKey::Right, StyleValue::Px(10.0)),
            (StyleKey::Bottom, StyleValue::Px(20.0)),
            (StyleKey::Width, StyleValue::Px(100.0)),
            (StyleKey::Height, StyleValue::Px(50.0)),
        ],
    );

    tree.flush();

    assert_eq!(border(&tree, id), Rect::new(690.0, 530.0, 100.0, 50.0));
}

#[test]
fn test_absolute_is_out_of_flow() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let _floating = child(
        &mut tree,
        root,
        &[
            (StyleKey::Position, StyleValue::Keyword(Keyword::Absolute)),
            (StyleKey::Left, StyleValue::Px(5.0)),
            (StyleKey::Top, StyleValue::Px(5.0)),
            (StyleKey::Width, StyleValue::Px(100.0)),
            (StyleKey::Height, StyleValue::Px(100.0)),
        ],
    );
    let flowing = block(&mut tree, root, 10.0);

    tree.flush();

    assert_close(border(&tree, flowing).y, 0.0);
}

#[test]
fn test_relative_offsets() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let pushed = child(
        &mut tree,
        root,
        &[
            (StyleKey::Position, StyleValue::Keyword(Keyword::Relative)),
            (StyleKey::Left, StyleValue::Px(5.0)),
            (StyleKey::Top, StyleValue::Px(7.0)),
            (StyleKey::Height, StyleValue::Px(10.0)),
        ],
    );
    let pulled = child(
        &mut tree,
        root,
        &[
            (StyleKey::Position, StyleValue::Keyword(Keyword::Relative)),
            (StyleKey::Right, StyleValue::Px(5.0)),
            (StyleKey::Height, StyleValue::Px(10.0)),
        ],
    );

    tree.flush();

    let a = border(&tree, pushed);
    assert_eq!((a.x, a.y), (5.0, 7.0));
    // Offsets do not move the following flow.
    let b = border(&tree, pulled);
    assert_eq!((b.x, b.y), (-5.0, 10.0));
}

#[test]
fn test_auto_margins_center() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let id = child(
        &mut tree,
        root,
        &[
            (StyleKey::Width, StyleValue::Px(200.0)),
            (StyleKey::Height, StyleValue::Px(10.0)),
            (StyleKey::MarginLeft, StyleValue::Auto),
            (StyleKey::MarginRight, StyleValue::Auto),
        ],
    );

    tree.flush();

    assert_close(border(&tree, id).x, 300.0);
    let margin = tree.widget(id).unwrap().margin();
    assert_close(margin.left, 300.0);
    assert_close(margin.right, 300.0);
    assert_all_consistent(&tree);
}

#[test]
fn test_vertical_align() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let middle = child(
        &mut tree,
        root,
        &[
            (StyleKey::Position, StyleValue::Keyword(Keyword::Absolute)),
            (StyleKey::Width, StyleValue::Px(100.0)),
            (StyleKey::Height, StyleValue::Px(100.0)),
            (StyleKey::VerticalAlign, StyleValue::Keyword(Keyword::Middle)),
        ],
    );
    let bottom = child(
        &mut tree,
        root,
        &[
            (StyleKey::Position, StyleValue::Keyword(Keyword::Absolute)),
            (StyleKey::Width, StyleValue::Px(100.0)),
            (StyleKey::Height, StyleValue::Px(100.0)),
            (StyleKey::VerticalAlign, StyleValue::Keyword(Keyword::Bottom)),
        ],
    );

    tree.flush();

    assert_close(border(&tree, middle).y, 250.0);
    assert_close(border(&tree, bottom).y, 500.0);
}

#[test]
fn test_move_to_moves_absolute_widget() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let id = child(
        &mut tree,
        root,
        &[
            (StyleKey::Position, StyleValue::Keyword(Keyword::Absolute)),
            (StyleKey::Width, StyleValue::Px(10.0)),
            (StyleKey::Height, StyleValue::Px(10.0)),
        ],
    );
    tree.flush();

    tree.move_to(id, 40.0, 60.0).unwrap();
    tree.flush();

    let b = border(&tree, id);
    assert_eq!((b.x, b.y), (40.0, 60.0));
    assert_eq!(tree.absolute_position(id), Some((40.0, 60.0)));
}

#[test]
fn test_resize_requests_parent_layout() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let a = block(&mut tree, root, 10.0);
    let b = block(&mut tree, root, 10.0);
    tree.flush();

    tree.resize(a, 800.0, 40.0).unwrap();
    tree.flush();

    assert_close(border(&tree, b).y, 40.0);
}

// ========== layout lock ==========

#[test]
fn test_layout_lock_suppresses_requests() {
    let mut tree = WidgetTree::new(800.0, 600.0);
    let root = tree.root();
    let container = child(&mut tree, root, &[]);
    tree.flush();

    tree.lock_layout(container).unwrap();
    let _a = block(&mut tree, container, 10.0);
    assert!(!tree.pending_tasks(container).contains(TaskKind::Layout));
    assert!(tree.widget(container).unwrap().is_layout_locked());

    tree.unlock_layout(container).unwrap();
    tree.request_task(container, TaskKind::Layout);
    assert!(tree.pending_tasks(container).contains(TaskKind::Layout));
}

#[test]
fn test_nested_layout_is_consistent() {
    let mut tree = WidgetTree::new(640.0, 480.0);
    let root = tree.root();
    let outer = child(&mut tree, root, &[]);
    tree.set_padding(outer, EdgeSizes::uniform(4.0)).unwrap();
    for _ in 0..3 {
        let row = child(&mut tree, outer, &[]);
        tree.set_margin(row, EdgeSizes::uniform(2.0)).unwrap();
        for _ in 0..4 {
            let _ = inline_block(&mut tree, row, 50.0, 20.0);
        }
    }

    tree.flush();

    assert!(!tree.has_pending_tasks());
    assert_all_consistent(&tree);
}
