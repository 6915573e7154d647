//! Property tests for the structural and paint-order invariants.

use quickcheck_macros::quickcheck;
use trellis_style::{Keyword, StyleKey, StyleValue};
use trellis_widget::{FIRST_CHILD, LAST_CHILD, WidgetId, WidgetKind, WidgetTree};

const POOL: usize = 6;

fn pool(tree: &mut WidgetTree) -> Vec<WidgetId> {
    (0..POOL)
        .map(|_| tree.create(WidgetKind::element("div")))
        .collect()
}

/// Check index, list and first/last invariants for every allocated widget
/// in `ids`.
fn structure_holds(tree: &WidgetTree, ids: &[WidgetId]) -> bool {
    ids.iter().all(|id| {
        let Ok(widget) = tree.widget(*id) else {
            return false;
        };
        let children = widget.children();
        let mut paint = widget.stacking_order().to_vec();
        let mut structural = children.to_vec();
        paint.sort();
        structural.sort();
        if paint != structural {
            return false;
        }
        let last = children.len().checked_sub(1);
        let children_ok = children.iter().enumerate().all(|(i, child)| {
            tree.widget(*child).is_ok_and(|c| {
                c.index() == i
                    && c.parent() == Some(*id)
                    && c.has_status(FIRST_CHILD) == (i == 0)
                    && c.has_status(LAST_CHILD) == (Some(i) == last)
            })
        });
        let detached_ok = widget.parent().is_some()
            || (!widget.has_status(FIRST_CHILD) && !widget.has_status(LAST_CHILD));
        children_ok && detached_ok
    })
}

#[quickcheck]
fn prop_mutations_keep_structure(ops: Vec<(u8, u8, u8)>) -> bool {
    let mut tree = WidgetTree::new(320.0, 240.0);
    let mut ids = pool(&mut tree);
    ids.push(tree.root());

    for (op, a, b) in ops {
        let child = ids[usize::from(a) % POOL];
        let parent = ids[usize::from(b) % ids.len()];
        // Cyclic and self insertions are rejected without changing the tree.
        let _ = match op % 3 {
            0 => tree.append(parent, child),
            1 => tree.prepend(parent, child),
            _ => tree.unlink(child),
        };
        if !structure_holds(&tree, &ids) {
            return false;
        }
    }
    tree.flush();
    structure_holds(&tree, &ids)
}

#[quickcheck]
fn prop_paint_order_sorted_by_key(layers: Vec<(i8, bool)>) -> bool {
    let mut tree = WidgetTree::new(320.0, 240.0);
    let root = tree.root();
    for (z, absolute) in layers.iter().take(12) {
        let id = tree.create(WidgetKind::element("div"));
        let _ = tree.set_style(id, StyleKey::ZIndex, StyleValue::Int(i32::from(*z)));
        if *absolute {
            let _ = tree.set_style(
                id,
                StyleKey::Position,
                StyleValue::Keyword(Keyword::Absolute),
            );
        }
        let _ = tree.append(root, id);
    }
    tree.flush();

    let Ok(root_widget) = tree.widget(root) else {
        return false;
    };
    let keys: Vec<_> = root_widget
        .stacking_order()
        .iter()
        .filter_map(|id| tree.widget(*id).ok())
        .map(|w| (w.computed().z_index, w.computed().position, w.index()))
        .collect();
    keys.len() == root_widget.children().len() && keys.windows(2).all(|pair| pair[0] <= pair[1])
}
