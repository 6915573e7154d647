//! Paint order among siblings.
//!
//! [Appendix E. Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! Each parent keeps its children in paint order, back to front. A child
//! paints after a sibling with a lower z-index; at equal z-index positioned
//! children paint after static ones (absolute after relative); after that,
//! structural order decides.

use std::cmp::Ordering;

use trellis_style::{Position, StyleKey, StyleValue};

use crate::id::WidgetId;
use crate::task::TaskKind;
use crate::tree::WidgetTree;
use crate::widget::Widget;

/// Sort key of a widget in its parent's paint order.
fn paint_key(widget: &Widget) -> (i32, Position, usize) {
    (
        widget.computed.z_index,
        widget.computed.position,
        widget.index,
    )
}

impl WidgetTree {
    /// Resolve the z-index of `id` and move it to its place in the
    /// parent's paint order.
    pub(crate) fn update_zindex(&mut self, id: WidgetId) {
        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        widget.computed.z_index = match widget.style.get(StyleKey::ZIndex) {
            Some(StyleValue::Int(z)) => *z,
            _ => 0,
        };
        let key = paint_key(widget);
        let position = widget.computed.position;
        let Some(parent) = widget.parent else {
            return;
        };
        let Some(p) = self.get_live(parent) else {
            return;
        };

        let mut order: Vec<WidgetId> = p.stacking.iter().copied().filter(|s| *s != id).collect();
        let at = order
            .iter()
            .position(|sibling| {
                self.get(*sibling)
                    .is_some_and(|s| paint_key(s).cmp(&key) == Ordering::Greater)
            })
            .unwrap_or(order.len());
        order.insert(at, id);
        if order == p.stacking {
            return;
        }

        log::trace!(target: "trellis::layout", "{id}: paint slot {at} under {parent}");
        if let Some(p) = self.get_live_mut(parent) {
            p.stacking = order;
        }
        if position != Position::Static {
            self.request_task(id, TaskKind::Refresh);
        }
    }
}
