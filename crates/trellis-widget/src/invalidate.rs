//! Dirty-region tracking.
//!
//! Each widget keeps a list of rectangles that must be repainted, in the
//! local coordinates of its own graph box. [`WidgetTree::invalidate_area`]
//! records on one widget and flags its ancestors so a renderer can find
//! dirty subtrees without a full walk. [`WidgetTree::push_invalid_area`]
//! translates a region up to the root, for changes whose old footprint
//! belongs to nobody any more (a widget moving away, hiding, or being
//! destroyed).

use serde::Serialize;
use trellis_style::{BoxKind, Rect};

use crate::id::WidgetId;
use crate::tree::WidgetTree;

/// A set of dirty rectangles with no rectangle inside another.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirtyRects {
    rects: Vec<Rect>,
}

impl DirtyRects {
    /// Record `rect`. Returns false when an existing rectangle already
    /// covers it; rectangles it covers are dropped.
    pub fn add(&mut self, rect: Rect) -> bool {
        if rect.is_empty() || self.rects.iter().any(|r| r.contains(&rect)) {
            return false;
        }
        self.rects.retain(|r| !rect.contains(r));
        self.rects.push(rect);
        true
    }

    /// The recorded rectangles.
    #[must_use]
    pub fn as_slice(&self) -> &[Rect] {
        &self.rects
    }

    /// Number of rectangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// True when nothing is dirty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Hand over the rectangles and start empty.
    pub fn take(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.rects)
    }
}

impl WidgetTree {
    /// Mark part of `id` dirty.
    ///
    /// `rect` is relative to the `kind` box of `id`; `None` means the whole
    /// box. The region is converted to graph-box-local coordinates and
    /// clipped to the graph box. Returns true if anything new was recorded.
    pub fn invalidate_area(&mut self, id: WidgetId, rect: Option<Rect>, kind: BoxKind) -> bool {
        let Some(widget) = self.get_live_mut(id) else {
            return false;
        };
        let area = widget.boxes.get(kind);
        let graph = widget.boxes.graph;
        let local = rect
            .unwrap_or_else(|| Rect::from_size(area.width, area.height))
            .translate(area.x - graph.x, area.y - graph.y);
        let Some(clipped) = local.intersect(&Rect::from_size(graph.width, graph.height)) else {
            return false;
        };
        if !widget.dirty.add(clipped) {
            return false;
        }

        let mut current = widget.parent;
        while let Some(parent) = current.and_then(|p| self.get_live_mut(p)) {
            if parent.has_dirty_child {
                break;
            }
            parent.has_dirty_child = true;
            current = parent.parent;
        }
        true
    }

    /// Mark a region of `id` dirty on the root, in root padding-box
    /// coordinates. The region is clipped to every ancestor's padding box
    /// on the way up. Widgets not attached to the live root are ignored.
    pub fn push_invalid_area(&mut self, id: WidgetId, rect: Option<Rect>, kind: BoxKind) -> bool {
        let root = self.root();
        if id == root {
            return self.invalidate_area(root, rect, kind);
        }
        if !self.is_rooted(id) {
            return false;
        }
        let Some(widget) = self.get_live(id) else {
            return false;
        };
        let area = widget.boxes.get(kind);
        // In the parent's padding-box space from here on.
        let mut region = rect
            .unwrap_or_else(|| Rect::from_size(area.width, area.height))
            .translate(area.x, area.y);
        let mut current = widget.parent;
        while let Some(parent_id) = current {
            let Some(parent) = self.get_live(parent_id) else {
                return false;
            };
            let padding = parent.boxes.padding;
            let Some(clipped) = region.intersect(&Rect::from_size(padding.width, padding.height))
            else {
                return false;
            };
            if parent_id == root {
                return self.invalidate_area(root, Some(clipped), BoxKind::Padding);
            }
            region = clipped.translate(padding.x, padding.y);
            current = parent.parent;
        }
        false
    }

    /// Drain the dirty rectangles of `id` and clear its dirty-child flag.
    pub fn take_dirty_rects(&mut self, id: WidgetId) -> Vec<Rect> {
        let Some(widget) = self.get_live_mut(id) else {
            return Vec::new();
        };
        widget.has_dirty_child = false;
        widget.dirty.take()
    }

    /// Drain the dirty rectangles of `id` and every descendant, each tagged
    /// with its widget.
    pub fn take_all_dirty_rects(&mut self, id: WidgetId) -> Vec<(WidgetId, Vec<Rect>)> {
        self.descendants(id)
            .into_iter()
            .filter_map(|widget| {
                let rects = self.take_dirty_rects(widget);
                (!rects.is_empty()).then_some((widget, rects))
            })
            .collect()
    }
}
