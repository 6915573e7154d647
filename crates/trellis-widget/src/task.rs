//! Recomputation tasks.
//!
//! Expensive work is never done where it is caused. A mutation *requests* a
//! task kind for a widget, which sets one bit in that widget's [`TaskSet`];
//! requesting again before it runs changes nothing. A scheduler later calls
//! [`WidgetTree::run_task`] for each pending bit. [`WidgetTree::update`] and
//! [`WidgetTree::flush`] are a ready-made single-threaded scheduler.

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter};
use trellis_common::warning::warn_once;
use trellis_style::BoxKind;

use crate::id::WidgetId;
use crate::tree::WidgetTree;

/// A kind of deferred recomputation. Within one widget, pending tasks run in
/// declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumCount, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum TaskKind {
    /// Ask the cascade again for this widget and its descendants.
    RefreshStyle,
    /// Diff the resolved sheet and request the tasks its changes affect.
    UpdateStyle,
    /// Repaint after a title change.
    Title,
    /// Pointer-events and focusability.
    Props,
    /// Visibility and display.
    Visible,
    /// Border sides and radii.
    Border,
    /// Box shadow.
    Shadow,
    /// Opacity.
    Opacity,
    /// Margins, including auto margins.
    Margin,
    /// Width, height, padding and the five rectangles.
    Resize,
    /// Placement from origin, offsets and alignment.
    Position,
    /// Paint-order position among siblings.
    ZIndex,
    /// Flow layout of the children.
    Layout,
    /// Repaint the whole graph box.
    Refresh,
}

impl TaskKind {
    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// A set of pending [`TaskKind`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TaskSet(u16);

impl TaskSet {
    /// Add a task. Returns true if it was not already pending.
    pub const fn insert(&mut self, kind: TaskKind) -> bool {
        let added = self.0 & kind.bit() == 0;
        self.0 |= kind.bit();
        added
    }

    /// Remove a task. Returns true if it was pending.
    pub const fn remove(&mut self, kind: TaskKind) -> bool {
        let present = self.0 & kind.bit() != 0;
        self.0 &= !kind.bit();
        present
    }

    /// True when `kind` is pending.
    #[must_use]
    pub const fn contains(self, kind: TaskKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// True when nothing is pending.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of pending tasks.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Pending tasks in run order.
    pub fn iter(self) -> impl Iterator<Item = TaskKind> {
        TaskKind::iter().filter(move |kind| self.contains(*kind))
    }
}

impl WidgetTree {
    /// Mark `kind` pending for `id`.
    ///
    /// Idempotent: requesting a pending task again is a no-op. Requests for
    /// unknown or deleted widgets are ignored, as are layout requests for a
    /// widget whose layout is locked.
    pub fn request_task(&mut self, id: WidgetId, kind: TaskKind) {
        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        if kind == TaskKind::Layout && widget.layout_locked {
            return;
        }
        if widget.tasks.insert(kind) {
            log::trace!(target: "trellis::task", "{id}: request {kind}");
        }
    }

    /// Request `kind` for `id` and every descendant.
    pub fn request_task_recursive(&mut self, id: WidgetId, kind: TaskKind) {
        self.request_task(id, kind);
        for child in self.children_of(id) {
            self.request_task_recursive(child, kind);
        }
    }

    /// Tasks pending for `id`; empty for unknown widgets.
    #[must_use]
    pub fn pending_tasks(&self, id: WidgetId) -> TaskSet {
        self.get(id).map(|w| w.tasks).unwrap_or_default()
    }

    /// True when any widget under the root has pending tasks.
    #[must_use]
    pub fn has_pending_tasks(&self) -> bool {
        self.descendants(self.root())
            .into_iter()
            .any(|id| !self.pending_tasks(id).is_empty())
    }

    /// Scheduler callback: run one task for one widget now.
    ///
    /// Clears the pending bit whether or not it was set. Does nothing for
    /// unknown or deleted widgets.
    pub fn run_task(&mut self, id: WidgetId, kind: TaskKind) {
        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        let _ = widget.tasks.remove(kind);
        log::trace!(target: "trellis::task", "{id}: run {kind}");
        match kind {
            TaskKind::RefreshStyle => self.refresh_style(id),
            TaskKind::UpdateStyle => self.update_style(id),
            TaskKind::Title | TaskKind::Refresh => {
                let _ = self.invalidate_area(id, None, BoxKind::Graph);
            }
            TaskKind::Props => self.update_props(id),
            TaskKind::Visible => self.update_visibility(id),
            TaskKind::Border => self.update_border(id),
            TaskKind::Shadow => self.update_shadow(id),
            TaskKind::Opacity => self.update_opacity(id),
            TaskKind::Margin => self.update_margin(id),
            TaskKind::Resize => self.update_size(id),
            TaskKind::Position => self.update_position(id),
            TaskKind::ZIndex => self.update_zindex(id),
            TaskKind::Layout => self.update_layout(id),
        }
    }

    /// One scheduler pass: walk the live tree in pre-order and, at each
    /// widget, run its pending tasks in [`TaskKind`] order. Tasks requested
    /// for widgets already visited wait for the next pass.
    ///
    /// Returns the number of tasks run.
    pub fn update(&mut self) -> usize {
        self.update_subtree(self.root())
    }

    fn update_subtree(&mut self, id: WidgetId) -> usize {
        let mut count = 0;
        for kind in TaskKind::iter() {
            // Earlier tasks may request later ones, so check each kind as
            // it comes up rather than snapshotting the set.
            if self.pending_tasks(id).contains(kind) {
                self.run_task(id, kind);
                count += 1;
            }
        }
        self.advance_lifecycle(id, false);
        for child in self.children_of(id) {
            count += self.update_subtree(child);
        }
        count
    }

    /// Run passes until nothing is pending, up to the configured limit,
    /// then tear down trashed widgets.
    pub fn flush(&mut self) {
        let mut passes = 0;
        while passes < self.config.max_passes && self.has_pending_tasks() {
            let _ = self.update();
            passes += 1;
        }
        if self.has_pending_tasks() {
            warn_once(
                "task",
                &format!(
                    "tasks still pending after {} passes; geometry may be stale",
                    self.config.max_passes
                ),
            );
        }
        log::debug!(target: "trellis::task", "flushed in {passes} passes");
        let _ = self.clear_trash();
    }
}
