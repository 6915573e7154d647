//! Box-model engine.
//!
//! [§ 10.3 Calculating widths and margins](https://www.w3.org/TR/CSS2/visudet.html#Computing_widths_and_margins)
//!
//! Resolves a widget's border-box size from its sheet, derives the five
//! rectangles, keeps the paint surface in step with the graph box, and
//! decides which neighbours must be recomputed when the size changes.
//!
//! Sizes follow the widget's `box-sizing`: with `content-box` the `width`
//! and `height` declarations size the content box and padding and borders
//! are added on top; with `border-box` they size the border box directly.

use trellis_common::warning::warn_once;
use trellis_style::{
    BoxKind, BoxModel, BoxSizing, Display, Length, PADDING_KEYS, Position, Rect, StyleKey,
    StyleValue, VerticalAlign,
};

use crate::host::{PixelFormat, WidgetEvent};
use crate::id::WidgetId;
use crate::kind::WidgetBehavior;
use crate::style::resolve_edges;
use crate::task::TaskKind;
use crate::tree::WidgetTree;
use crate::widget::Widget;

/// Result of size resolution for one widget.
struct ResolvedSize {
    width: f32,
    height: f32,
    min_width: Option<f32>,
    max_width: Option<f32>,
    min_height: Option<f32>,
    max_height: Option<f32>,
    /// A percentage width was too narrow for the content and the parent
    /// has to grow.
    parent_must_grow: bool,
}

impl Widget {
    /// Rebuild the five rectangles from the outer-box origin, the
    /// border-box size, and the resolved edges.
    pub(crate) fn rebuild_boxes(&mut self) {
        let border = Rect::new(
            self.x + self.margin.left,
            self.y + self.margin.top,
            self.width,
            self.height,
        );
        self.boxes = BoxModel::from_border_box(
            border,
            &self.computed.border.widths(),
            &self.padding,
            &self.margin,
            &self.computed.shadow.edges(),
        );
    }
}

impl WidgetTree {
    pub(crate) fn update_size(&mut self, id: WidgetId) {
        let (basis_width, basis_height) = self.scale_basis(id);
        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        let old_graph = widget.boxes.graph;
        let old_padding = widget.padding;
        let old_width = widget.width;
        widget.padding = resolve_edges(&widget.style, &PADDING_KEYS, basis_width, basis_height);
        widget.computed.box_sizing = BoxSizing::from_value(widget.style.get(StyleKey::BoxSizing));

        let Some(size) = self.compute_size(id) else {
            return;
        };
        let parent = self.parent(id);
        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        widget.width = size.width;
        widget.height = size.height;
        widget.computed.min_width = size.min_width;
        widget.computed.max_width = size.max_width;
        widget.computed.min_height = size.min_height;
        widget.computed.max_height = size.max_height;
        widget.rebuild_boxes();
        let new_graph = widget.boxes.graph;
        let padding_changed = widget.padding != old_padding;
        let auto_margin = matches!(
            widget.style.get(StyleKey::MarginLeft),
            Some(StyleValue::Auto)
        ) || matches!(
            widget.style.get(StyleKey::MarginRight),
            Some(StyleValue::Auto)
        );
        if size.parent_must_grow
            && let Some(parent) = parent
        {
            self.request_task(parent, TaskKind::Resize);
        }
        self.update_surface(id);
        if auto_margin {
            self.update_margin(id);
        }

        if new_graph.same_size(&old_graph) && !padding_changed {
            return;
        }
        if new_graph.is_empty() && old_graph.is_empty() {
            return;
        }
        log::trace!(
            target: "trellis::layout",
            "{id}: resized to {}x{}",
            size.width,
            size.height
        );

        let Some(widget) = self.get_live(id) else {
            return;
        };
        let computed = widget.computed;
        let auto_height = widget.has_auto_height();
        let anchored_far =
            widget.style.is_set(StyleKey::Right) || widget.style.is_set(StyleKey::Bottom);
        if !auto_height || (size.width - old_width).abs() >= f32::EPSILON {
            self.request_task(id, TaskKind::Layout);
        }
        if computed.vertical_align != VerticalAlign::Top
            || (computed.position == Position::Absolute && anchored_far)
        {
            self.request_task(id, TaskKind::Position);
        }
        if let Some(parent) = parent {
            let _ = self.invalidate_area(parent, Some(old_graph), BoxKind::Padding);
            let _ = self.invalidate_area(parent, Some(new_graph), BoxKind::Padding);
            if self
                .get_live(parent)
                .is_some_and(|p| p.has_auto_width() || p.has_auto_height())
            {
                self.request_task(parent, TaskKind::Resize);
            }
            if computed.in_flow() {
                self.request_task(parent, TaskKind::Layout);
            }
        }
        self.emit(id, WidgetEvent::Resized);
        self.request_task(id, TaskKind::Refresh);
        self.update_children_size(id);
    }

    /// Resolve the border-box size of `id`. Padding, border widths, margins
    /// and box-sizing must already be current.
    fn compute_size(&self, id: WidgetId) -> Option<ResolvedSize> {
        let (basis_width, basis_height) = self.scale_basis(id);
        let widget = self.get_live(id)?;
        let parent = widget.parent.and_then(|p| self.get_live(p).map(|w| (p, w)));
        let border_box = widget.computed.box_sizing == BoxSizing::BorderBox;
        let borders = widget.computed.border.widths();
        let extra_width = widget.padding.horizontal() + borders.horizontal();
        let extra_height = widget.padding.vertical() + borders.vertical();

        // STEP 1: declared sizes, in box-sizing space.
        let declared_width = widget.length(StyleKey::Width);
        let declared_height = widget.length(StyleKey::Height);
        let mut width = declared_width.resolve(basis_width).unwrap_or(0.0);
        let mut height = declared_height.resolve(basis_height).unwrap_or(0.0);

        // The natural size converted to box-sizing space.
        let natural = || {
            let (w, h) = self.content_size(id);
            if border_box {
                (w + extra_width, h + extra_height)
            } else {
                (w, h)
            }
        };

        // STEP 2: auto sizes from content, or from the parent for blocks.
        if declared_width.is_auto() || declared_height.is_auto() {
            let (natural_width, natural_height) = natural();
            if declared_width.is_auto() {
                let chrome = widget.margin.horizontal() + if border_box { 0.0 } else { extra_width };
                width = match parent {
                    Some((parent_id, p))
                        if widget.computed.is_block_in_flow() && self.has_definite_width(parent_id) =>
                    {
                        (p.boxes.content.width - chrome).max(0.0)
                    }
                    Some((parent_id, _)) => {
                        let limit = (self.compute_max_width(parent_id) - chrome).max(0.0);
                        natural_width.min(limit)
                    }
                    None => natural_width,
                };
            }
            if declared_height.is_auto() {
                height = natural_height;
            }
        }

        // STEP 3: a percentage of an auto-width parent may not squeeze the
        // content; grow and let the parent follow.
        let mut parent_must_grow = false;
        if declared_width.is_scale()
            && let Some((_, p)) = parent
            && p.has_auto_width()
        {
            let (natural_width, natural_height) = natural();
            if natural_width > width {
                width = natural_width;
                height = natural_height;
                parent_must_grow = true;
            }
        }

        // STEP 4: min/max clamps.
        let bound = |key, basis| widget.length(key).resolve(basis);
        let min_width = bound(StyleKey::MinWidth, basis_width);
        let max_width = bound(StyleKey::MaxWidth, basis_width);
        let min_height = bound(StyleKey::MinHeight, basis_height);
        let max_height = bound(StyleKey::MaxHeight, basis_height);
        if let Some(max) = max_width {
            width = width.min(max);
        }
        if let Some(max) = max_height {
            height = height.min(max);
        }
        if let Some(min) = min_width {
            width = width.max(min);
        }
        if let Some(min) = min_height {
            height = height.max(min);
        }

        // STEP 5: to border-box size.
        let (width, height) = if border_box {
            (width.max(0.0), height.max(0.0))
        } else {
            (width.max(0.0) + extra_width, height.max(0.0) + extra_height)
        };
        Some(ResolvedSize {
            width,
            height,
            min_width,
            max_width,
            min_height,
            max_height,
            parent_must_grow,
        })
    }

    /// Natural content-box size of `id`: the type's measurement, or the
    /// extent of its visible in-flow children.
    ///
    /// A child sized by percentage contributes only its position plus its
    /// content size, so it cannot push the parent wider through its own
    /// margin, border and padding. Children with no outer width contribute
    /// nothing.
    fn content_size(&self, id: WidgetId) -> (f32, f32) {
        let Some(widget) = self.get_live(id) else {
            return (0.0, 0.0);
        };
        if let Some(size) = widget.kind.measure_natural_size() {
            return size;
        }
        let (mut width, mut height) = (0.0_f32, 0.0_f32);
        for child in widget.stacking.iter().filter_map(|c| self.get_live(*c)) {
            if !child.computed.visible || child.computed.position == Position::Absolute {
                continue;
            }
            let b = &child.boxes;
            if b.outer.width <= 0.0 {
                continue;
            }
            if child.length(StyleKey::Width).is_scale() {
                width = width.max(b.outer.x + b.content.width);
            } else {
                width = width.max(b.outer.right());
            }
            if child.length(StyleKey::Height).is_scale() {
                height = height.max(b.outer.y + b.content.height);
            } else if b.outer.height > 0.0 {
                height = height.max(b.outer.bottom());
            }
        }
        (
            (width - widget.padding.left).max(0.0),
            (height - widget.padding.top).max(0.0),
        )
    }

    /// True when the content width of `id` does not depend on its
    /// children: it is the root, it has a declared width, or it is an
    /// auto-width block in flow under such a widget.
    pub(crate) fn has_definite_width(&self, id: WidgetId) -> bool {
        let Some(widget) = self.get_live(id) else {
            return false;
        };
        let Some(parent) = widget.parent else {
            return id == self.root() || !widget.has_auto_width();
        };
        match widget.length(StyleKey::Width) {
            Length::Px(_) | Length::Scale(_) => true,
            Length::Auto => widget.computed.is_block_in_flow() && self.has_definite_width(parent),
        }
    }

    /// Widest line available to the children of `id`.
    ///
    /// Walks up from `id` to the nearest ancestor with a pixel width,
    /// multiplying the percentage widths met on the way and subtracting the
    /// horizontal padding of the percentage-sized ancestors. Without such an
    /// ancestor the root's padding width is the basis. Never negative.
    #[must_use]
    pub fn compute_max_width(&self, id: WidgetId) -> f32 {
        let mut width = self
            .get(self.root())
            .map_or(0.0, |root| root.boxes.padding.width);
        let mut scale = 1.0;
        let mut padding = 0.0;
        let mut current = Some(id);
        while let Some(node) = current {
            let Some(widget) = self.get(node) else {
                break;
            };
            if widget.parent.is_none() {
                break;
            }
            match widget.length(StyleKey::Width) {
                Length::Px(px) => {
                    width = px;
                    break;
                }
                Length::Scale(ratio) => {
                    scale *= ratio;
                    if node != id {
                        padding += widget.padding.horizontal();
                    }
                }
                Length::Auto => {}
            }
            current = widget.parent;
        }
        scale.mul_add(width, -padding).max(0.0)
    }

    /// Request recomputation of the children of `id` whose geometry depends
    /// on its size.
    pub(crate) fn update_children_size(&mut self, id: WidgetId) {
        for child_id in self.children_of(id) {
            let Some(child) = self.get_live(child_id) else {
                continue;
            };
            let style = &child.style;
            let width = child.length(StyleKey::Width);
            let height = child.length(StyleKey::Height);
            let mut resize = child.computed.display == Display::Block
                && (width.is_auto() || height.is_auto());
            resize |= width.is_scale() || height.is_scale();
            let mut reposition = child.computed.vertical_align != VerticalAlign::Top;
            if child.computed.position == Position::Absolute {
                reposition |= style.is_set(StyleKey::Right)
                    || style.is_set(StyleKey::Bottom)
                    || child.length(StyleKey::Left).is_scale()
                    || child.length(StyleKey::Top).is_scale();
            }
            let margin = matches!(style.get(StyleKey::MarginLeft), Some(StyleValue::Auto))
                || matches!(style.get(StyleKey::MarginRight), Some(StyleValue::Auto));

            if resize {
                self.request_task(child_id, TaskKind::Resize);
            }
            if reposition {
                self.request_task(child_id, TaskKind::Position);
            }
            if margin {
                self.request_task(child_id, TaskKind::Margin);
            }
        }
    }

    /// Keep the paint surface of `id` in step with its graph box.
    ///
    /// Widgets that do not paint, or whose graph box is empty, hold no
    /// surface. A failed allocation is reported once and leaves the widget
    /// without a surface.
    pub(crate) fn update_surface(&mut self, id: WidgetId) {
        let Some(widget) = self.get_live(id) else {
            return;
        };
        let graph = widget.boxes.graph;
        let had_surface = widget.has_surface;
        if !widget.enable_graph || graph.is_empty() {
            if had_surface {
                self.surfaces.free(id);
                if let Some(widget) = self.get_live_mut(id) {
                    widget.has_surface = false;
                }
            }
            return;
        }
        let format = if widget.computed.needs_alpha() {
            PixelFormat::Argb
        } else {
            PixelFormat::Rgb
        };
        let allocated = match self.surfaces.allocate(id, graph.width, graph.height, format) {
            Ok(()) => true,
            Err(err) => {
                warn_once("surface", &err.to_string());
                false
            }
        };
        if let Some(widget) = self.get_live_mut(id) {
            widget.has_surface = allocated;
        }
    }
}
