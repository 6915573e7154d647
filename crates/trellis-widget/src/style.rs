//! Style resolution.
//!
//! A widget's sheet comes from the [`Cascade`](crate::Cascade). The
//! `UpdateStyle` task swaps the new sheet in and requests one task per
//! changed property group; each of those tasks resolves its group into the
//! widget's [`ComputedStyle`](trellis_style::ComputedStyle) and decides what
//! else must be recomputed or repainted.
//!
//! Percentages resolve against the parent's content box, or against its
//! padding box when the widget is absolutely positioned. A widget with no
//! parent resolves percentages to zero.

use trellis_common::warning::warn_once;
use trellis_style::{
    Border, BoxKind, BoxShadow, BoxSizing, ColorValue, Display, Edge, EdgeSizes, Keyword, Length,
    MARGIN_KEYS, PADDING_KEYS, PointerEvents, Position, StyleKey, StyleSheet, StyleValue,
    VerticalAlign,
};

use crate::error::WidgetError;
use crate::host::WidgetEvent;
use crate::id::WidgetId;
use crate::task::{TaskKind, TaskSet};
use crate::tree::WidgetTree;

/// Tasks requested on a widget's first style pass.
const FIRST_PASS_TASKS: [TaskKind; 11] = [
    TaskKind::Props,
    TaskKind::Visible,
    TaskKind::Border,
    TaskKind::Shadow,
    TaskKind::Opacity,
    TaskKind::Margin,
    TaskKind::Resize,
    TaskKind::Position,
    TaskKind::ZIndex,
    TaskKind::Layout,
    TaskKind::Refresh,
];

/// The task that recomputes what `key` affects.
#[must_use]
pub const fn task_for_key(key: StyleKey) -> TaskKind {
    use StyleKey as K;
    match key {
        K::Visibility | K::Display => TaskKind::Visible,
        K::Position | K::Left | K::Top | K::Right | K::Bottom | K::VerticalAlign => {
            TaskKind::Position
        }
        K::ZIndex => TaskKind::ZIndex,
        K::Opacity => TaskKind::Opacity,
        K::Width
        | K::Height
        | K::MinWidth
        | K::MinHeight
        | K::MaxWidth
        | K::MaxHeight
        | K::BoxSizing
        | K::PaddingTop
        | K::PaddingRight
        | K::PaddingBottom
        | K::PaddingLeft => TaskKind::Resize,
        K::MarginTop | K::MarginRight | K::MarginBottom | K::MarginLeft => TaskKind::Margin,
        K::BorderTopWidth
        | K::BorderTopStyle
        | K::BorderTopColor
        | K::BorderRightWidth
        | K::BorderRightStyle
        | K::BorderRightColor
        | K::BorderBottomWidth
        | K::BorderBottomStyle
        | K::BorderBottomColor
        | K::BorderLeftWidth
        | K::BorderLeftStyle
        | K::BorderLeftColor
        | K::BorderTopLeftRadius
        | K::BorderTopRightRadius
        | K::BorderBottomRightRadius
        | K::BorderBottomLeftRadius => TaskKind::Border,
        K::BoxShadowX | K::BoxShadowY | K::BoxShadowBlur | K::BoxShadowSpread | K::BoxShadowColor => {
            TaskKind::Shadow
        }
        K::BackgroundColor => TaskKind::Refresh,
        K::PointerEvents | K::Focusable => TaskKind::Props,
    }
}

/// True when `value` is a kind of value `key` can hold.
const fn accepts(key: StyleKey, value: &StyleValue) -> bool {
    use StyleKey as K;
    match key {
        K::Visibility => matches!(value, StyleValue::Bool(_) | StyleValue::Keyword(_)),
        K::Display
        | K::Position
        | K::BoxSizing
        | K::VerticalAlign
        | K::PointerEvents
        | K::BorderTopStyle
        | K::BorderRightStyle
        | K::BorderBottomStyle
        | K::BorderLeftStyle => matches!(value, StyleValue::Keyword(_)),
        K::ZIndex => matches!(value, StyleValue::Int(_)),
        K::Opacity => matches!(
            value,
            StyleValue::Scale(_) | StyleValue::Int(_) | StyleValue::Px(_)
        ),
        K::BorderTopColor
        | K::BorderRightColor
        | K::BorderBottomColor
        | K::BorderLeftColor
        | K::BoxShadowColor
        | K::BackgroundColor => matches!(value, StyleValue::Color(_)),
        K::Focusable => matches!(value, StyleValue::Bool(_)),
        _ => matches!(
            value,
            StyleValue::Px(_) | StyleValue::Scale(_) | StyleValue::Auto
        ),
    }
}

/// Resolve four edge keys, in top/right/bottom/left order. Left and right
/// percentages use `width` as the basis, top and bottom use `height`.
/// Absent and `auto` edges are zero.
pub(crate) fn resolve_edges(
    sheet: &StyleSheet,
    keys: &[StyleKey; 4],
    width: f32,
    height: f32,
) -> EdgeSizes {
    let mut edges = EdgeSizes::ZERO;
    for (edge, key) in [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left]
        .into_iter()
        .zip(keys)
    {
        let basis = if edge.is_horizontal() { width } else { height };
        let size = Length::from_value(sheet.get(*key))
            .resolve(basis)
            .unwrap_or(0.0);
        edges.set(edge, size);
    }
    edges
}

fn is_visible_flag(value: Option<&StyleValue>) -> bool {
    !matches!(
        value,
        Some(StyleValue::Bool(false) | StyleValue::Keyword(Keyword::Hidden))
    )
}

impl WidgetTree {
    /// Basis for percentage lengths of `id`: the parent's padding box when
    /// absolutely positioned, its content box otherwise.
    pub(crate) fn scale_basis(&self, id: WidgetId) -> (f32, f32) {
        let Some(widget) = self.get_live(id) else {
            return (0.0, 0.0);
        };
        let Some(parent) = widget.parent.and_then(|p| self.get_live(p)) else {
            return (0.0, 0.0);
        };
        let basis = if widget.computed.position == Position::Absolute {
            parent.boxes.padding
        } else {
            parent.boxes.content
        };
        (basis.width, basis.height)
    }

    pub(crate) fn refresh_style(&mut self, id: WidgetId) {
        self.request_task(id, TaskKind::UpdateStyle);
        for child in self.children_of(id) {
            self.request_task(child, TaskKind::RefreshStyle);
        }
    }

    pub(crate) fn update_style(&mut self, id: WidgetId) {
        let Some(widget) = self.get_live(id) else {
            return;
        };
        let sheet = self.cascade.resolve(id, widget);
        for (key, value) in sheet.iter() {
            if !accepts(key, value) {
                warn_once(
                    "style",
                    &format!("{key}: ignoring {} value", value.kind_name()),
                );
            }
        }

        let first = !widget.style_ready;
        let mut tasks = TaskSet::default();
        if first {
            for kind in FIRST_PASS_TASKS {
                let _ = tasks.insert(kind);
            }
        } else {
            for key in widget.style.diff(&sheet) {
                let _ = tasks.insert(task_for_key(key));
            }
        }
        let old_position = widget.computed.position;
        let parent = widget.parent;

        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        let computed = &mut widget.computed;
        computed.position = Position::from_value(sheet.get(StyleKey::Position));
        computed.box_sizing = BoxSizing::from_value(sheet.get(StyleKey::BoxSizing));
        computed.vertical_align = VerticalAlign::from_value(sheet.get(StyleKey::VerticalAlign));
        computed.background_color = match sheet.get(StyleKey::BackgroundColor) {
            Some(StyleValue::Color(color)) => *color,
            _ => ColorValue::TRANSPARENT,
        };
        let position = computed.position;
        widget.style = sheet;
        widget.style_ready = true;
        log::trace!(
            target: "trellis::style",
            "{id}: style pass requests {} tasks",
            tasks.len()
        );

        if position != old_position {
            // Switching in or out of flow changes the percentage basis and
            // the paint priority.
            let _ = tasks.insert(TaskKind::Resize);
            let _ = tasks.insert(TaskKind::ZIndex);
            if let Some(parent) = parent {
                self.request_task(parent, TaskKind::Layout);
                if self.get_live(parent).is_some_and(|p| p.has_auto_width() || p.has_auto_height()) {
                    self.request_task(parent, TaskKind::Resize);
                }
            }
        }
        if tasks.contains(TaskKind::Refresh) {
            self.update_surface(id);
        }
        for kind in tasks.iter() {
            self.request_task(id, kind);
        }
        self.advance_lifecycle(id, false);
    }

    pub(crate) fn update_props(&mut self, id: WidgetId) {
        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        widget.computed.pointer_events =
            PointerEvents::from_value(widget.style.get(StyleKey::PointerEvents));
        widget.computed.focusable = !matches!(
            widget.style.get(StyleKey::Focusable),
            Some(StyleValue::Bool(false))
        );
    }

    pub(crate) fn update_visibility(&mut self, id: WidgetId) {
        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        let display = Display::from_value(widget.style.get(StyleKey::Display));
        let visible =
            is_visible_flag(widget.style.get(StyleKey::Visibility)) && display != Display::None;
        let was_visible = widget.computed.visible;
        let old_display = widget.computed.display;
        widget.computed.display = display;
        widget.computed.visible = visible;
        if visible == was_visible && display == old_display {
            return;
        }
        let absolute = widget.computed.position == Position::Absolute;
        let parent = widget.parent;

        if was_visible && !visible {
            let _ = self.push_invalid_area(id, None, BoxKind::Graph);
        } else if visible {
            self.request_task(id, TaskKind::Refresh);
        }
        if let Some(parent) = parent
            && (display != old_display || !absolute)
        {
            self.request_task(parent, TaskKind::Layout);
            if self.get_live(parent).is_some_and(|p| p.has_auto_width() || p.has_auto_height()) {
                self.request_task(parent, TaskKind::Resize);
            }
        }
        if visible != was_visible {
            log::debug!(target: "trellis::style", "{id}: visible = {visible}");
            self.emit(
                id,
                if visible {
                    WidgetEvent::Shown
                } else {
                    WidgetEvent::Hidden
                },
            );
        }
    }

    pub(crate) fn update_opacity(&mut self, id: WidgetId) {
        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        let opacity = match widget.style.get(StyleKey::Opacity) {
            Some(StyleValue::Scale(value) | StyleValue::Px(value)) => *value,
            Some(StyleValue::Int(value)) => {
                if *value > 0 {
                    1.0
                } else {
                    0.0
                }
            }
            _ => 1.0,
        }
        .clamp(0.0, 1.0);
        if (widget.computed.opacity - opacity).abs() < f32::EPSILON {
            return;
        }
        widget.computed.opacity = opacity;
        let _ = self.invalidate_area(id, None, BoxKind::Graph);
    }

    pub(crate) fn update_border(&mut self, id: WidgetId) {
        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        let old = widget.computed.border;
        let new = Border::from_sheet(&widget.style, widget.width);
        if old == new {
            return;
        }
        widget.computed.border = new;
        if old.widths() != new.widths() {
            self.request_task(id, TaskKind::Resize);
            self.request_task(id, TaskKind::Position);
            return;
        }
        // Same dimensions: only the painted strips change.
        let (width, height) = (widget.width, widget.height);
        for strip in old.strips(width, height).into_iter().chain(new.strips(width, height)) {
            let _ = self.invalidate_area(id, Some(strip), BoxKind::Border);
        }
        if old.has_radius() != new.has_radius() {
            self.update_surface(id);
        }
    }

    pub(crate) fn update_shadow(&mut self, id: WidgetId) {
        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        let old = widget.computed.shadow;
        let new = BoxShadow::from_sheet(&widget.style);
        if old == new {
            return;
        }
        widget.computed.shadow = new;
        if !old.same_geometry(&new) {
            self.request_task(id, TaskKind::Resize);
            self.request_task(id, TaskKind::Position);
            return;
        }
        let graph = widget.boxes.graph;
        let border = widget.boxes.border;
        for strip in graph.cut_four(&border) {
            let local = strip.translate(-graph.x, -graph.y);
            let _ = self.invalidate_area(id, Some(local), BoxKind::Graph);
        }
    }

    pub(crate) fn update_margin(&mut self, id: WidgetId) {
        let (basis_width, basis_height) = self.scale_basis(id);
        let Some(widget) = self.get_live(id) else {
            return;
        };
        let mut margin = resolve_edges(&widget.style, &MARGIN_KEYS, basis_width, basis_height);
        let left_auto = matches!(widget.style.get(StyleKey::MarginLeft), Some(StyleValue::Auto));
        let right_auto = matches!(widget.style.get(StyleKey::MarginRight), Some(StyleValue::Auto));
        let parent = widget.parent;
        if let Some(p) = parent.and_then(|p| self.get_live(p)) {
            let free = p.boxes.content.width - widget.width;
            match (left_auto, right_auto) {
                (true, true) => {
                    margin.left = (free / 2.0).max(0.0);
                    margin.right = margin.left;
                }
                (true, false) => margin.left = (free - margin.right).max(0.0),
                (false, true) => margin.right = (free - margin.left).max(0.0),
                (false, false) => {}
            }
        }

        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        widget.computed.margin_left_auto = left_auto;
        widget.computed.margin_right_auto = right_auto;
        if widget.margin == margin {
            return;
        }
        widget.margin = margin;
        widget.rebuild_boxes();
        let in_flow = widget.computed.in_flow();

        if let Some(parent) = parent {
            if self.get_live(parent).is_some_and(|p| p.has_auto_width() || p.has_auto_height()) {
                self.request_task(parent, TaskKind::Resize);
            }
            if in_flow {
                self.request_task(parent, TaskKind::Layout);
            }
        }
        self.request_task(id, TaskKind::Position);
    }

    /// Place `id` from its flow origin, offsets, margins and vertical
    /// alignment, then rebuild its boxes and repaint both footprints on the
    /// parent.
    pub(crate) fn update_position(&mut self, id: WidgetId) {
        let (basis_width, basis_height) = self.scale_basis(id);
        let Some(widget) = self.get_live(id) else {
            return;
        };
        let offset = |key, basis| widget.length(key).resolve(basis);
        let left = offset(StyleKey::Left, basis_width);
        let top = offset(StyleKey::Top, basis_height);
        let right = offset(StyleKey::Right, basis_width);
        let bottom = offset(StyleKey::Bottom, basis_height);

        let outer_width = widget.width + widget.margin.horizontal();
        let outer_height = widget.height + widget.margin.vertical();
        let parent_id = widget.parent;
        let parent = parent_id.and_then(|p| self.get_live(p));
        let (mut x, mut y) = (widget.origin_x, widget.origin_y);
        match widget.computed.position {
            Position::Absolute => {
                let (width, height) =
                    parent.map_or((0.0, 0.0), |p| (p.boxes.padding.width, p.boxes.padding.height));
                x = left
                    .or_else(|| right.map(|r| width - outer_width - r))
                    .unwrap_or(0.0);
                y = top
                    .or_else(|| bottom.map(|b| height - outer_height - b))
                    .unwrap_or(0.0);
            }
            position => {
                if position == Position::Relative {
                    x += left.or(right.map(|r| -r)).unwrap_or(0.0);
                    y += top.or(bottom.map(|b| -b)).unwrap_or(0.0);
                }
                if let Some(p) = parent {
                    x += p.padding.left;
                    y += p.padding.top;
                }
            }
        }
        if let Some(p) = parent {
            let room = p.boxes.content.height - outer_height;
            match widget.computed.vertical_align {
                VerticalAlign::Top => {}
                VerticalAlign::Middle => y += room / 2.0,
                VerticalAlign::Bottom => y += room,
            }
        }

        let old_graph = widget.boxes.graph;
        let old_border = widget.boxes.border;
        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        widget.computed.left = left;
        widget.computed.top = top;
        widget.computed.right = right;
        widget.computed.bottom = bottom;
        widget.x = x;
        widget.y = y;
        widget.rebuild_boxes();
        let new_graph = widget.boxes.graph;
        let moved = widget.boxes.border.x != old_border.x || widget.boxes.border.y != old_border.y;
        if !moved && new_graph == old_graph {
            return;
        }

        if let Some(parent) = parent_id {
            let _ = self.invalidate_area(parent, Some(old_graph), BoxKind::Padding);
            let _ = self.invalidate_area(parent, Some(new_graph), BoxKind::Padding);
        }
        if moved {
            log::trace!(target: "trellis::style", "{id}: moved to ({x}, {y})");
            self.emit(id, WidgetEvent::Moved);
        }
    }

    /// Set one inline declaration and schedule a style pass.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn set_style(
        &mut self,
        id: WidgetId,
        key: StyleKey,
        value: StyleValue,
    ) -> Result<(), WidgetError> {
        self.get_live_mut(id)
            .ok_or(WidgetError::InvalidWidget(id))?
            .inline_style
            .set(key, value);
        self.request_task(id, TaskKind::UpdateStyle);
        Ok(())
    }

    /// Remove one inline declaration and schedule a style pass.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn unset_style(&mut self, id: WidgetId, key: StyleKey) -> Result<(), WidgetError> {
        let widget = self.get_live_mut(id).ok_or(WidgetError::InvalidWidget(id))?;
        if widget.inline_style.unset(key).is_some() {
            self.request_task(id, TaskKind::UpdateStyle);
        }
        Ok(())
    }

    fn set_inline(
        &mut self,
        id: WidgetId,
        apply: impl FnOnce(&mut StyleSheet),
    ) -> Result<(), WidgetError> {
        apply(
            &mut self
                .get_live_mut(id)
                .ok_or(WidgetError::InvalidWidget(id))?
                .inline_style,
        );
        self.request_task(id, TaskKind::UpdateStyle);
        Ok(())
    }

    /// Set `left` and `top`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn move_to(&mut self, id: WidgetId, x: f32, y: f32) -> Result<(), WidgetError> {
        self.set_inline(id, |sheet| {
            sheet.set(StyleKey::Left, StyleValue::Px(x));
            sheet.set(StyleKey::Top, StyleValue::Px(y));
        })
    }

    /// Set `width` and `height`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn resize(&mut self, id: WidgetId, width: f32, height: f32) -> Result<(), WidgetError> {
        self.set_inline(id, |sheet| {
            sheet.set(StyleKey::Width, StyleValue::Px(width));
            sheet.set(StyleKey::Height, StyleValue::Px(height));
        })
    }

    /// Make the widget visible.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn show(&mut self, id: WidgetId) -> Result<(), WidgetError> {
        self.set_inline(id, |sheet| {
            sheet.set(StyleKey::Visibility, StyleValue::Bool(true));
        })
    }

    /// Hide the widget. It keeps its place in flow.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn hide(&mut self, id: WidgetId) -> Result<(), WidgetError> {
        self.set_inline(id, |sheet| {
            sheet.set(StyleKey::Visibility, StyleValue::Bool(false));
        })
    }

    /// Set all four paddings in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn set_padding(&mut self, id: WidgetId, padding: EdgeSizes) -> Result<(), WidgetError> {
        self.set_inline(id, |sheet| write_edges(sheet, &PADDING_KEYS, padding))
    }

    /// Set all four margins in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn set_margin(&mut self, id: WidgetId, margin: EdgeSizes) -> Result<(), WidgetError> {
        self.set_inline(id, |sheet| write_edges(sheet, &MARGIN_KEYS, margin))
    }

    /// Set every border key.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn set_border(&mut self, id: WidgetId, border: &Border) -> Result<(), WidgetError> {
        self.set_inline(id, |sheet| border.write_to(sheet))
    }

    /// Set every box-shadow key.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn set_box_shadow(&mut self, id: WidgetId, shadow: &BoxShadow) -> Result<(), WidgetError> {
        self.set_inline(id, |sheet| shadow.write_to(sheet))
    }

    /// Set the background color.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn set_background_color(
        &mut self,
        id: WidgetId,
        color: ColorValue,
    ) -> Result<(), WidgetError> {
        self.set_inline(id, |sheet| {
            sheet.set(StyleKey::BackgroundColor, StyleValue::Color(color));
        })
    }
}

fn write_edges(sheet: &mut StyleSheet, keys: &[StyleKey; 4], edges: EdgeSizes) {
    for (edge, key) in [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left]
        .into_iter()
        .zip(keys)
    {
        sheet.set(*key, StyleValue::Px(edges.get(edge)));
    }
}
