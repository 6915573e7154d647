//! Structural mutation: insert, unlink, unwrap, destroy.
//!
//! Every operation validates its arguments before touching the tree, so an
//! error leaves the tree unchanged. After every successful operation:
//!
//! - each child's `index` equals its position in the structural list,
//! - the structural and paint lists of a parent hold the same set,
//! - exactly the first and last children carry `first-child` and
//!   `last-child`.

use trellis_style::{BoxKind, Position};

use crate::error::WidgetError;
use crate::host::WidgetEvent;
use crate::id::WidgetId;
use crate::kind::WidgetBehavior;
use crate::task::{TaskKind, TaskSet};
use crate::tree::WidgetTree;
use crate::widget::{FIRST_CHILD, LAST_CHILD, WidgetState};

/// Where [`WidgetTree::insert`] puts the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Before all existing children.
    Prepend,
    /// After all existing children.
    Append,
}

impl WidgetTree {
    /// Insert `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// See [`WidgetTree::insert`].
    pub fn append(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), WidgetError> {
        self.insert(parent, child, InsertPosition::Append)
    }

    /// Insert `child` as the first child of `parent`.
    ///
    /// # Errors
    ///
    /// See [`WidgetTree::insert`].
    pub fn prepend(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), WidgetError> {
        self.insert(parent, child, InsertPosition::Prepend)
    }

    /// Insert `child` under `parent`. A child that already has a parent is
    /// moved, not duplicated.
    ///
    /// # Errors
    ///
    /// - [`WidgetError::InvalidWidget`] if either handle is stale or deleted,
    ///   or if `child` is the root.
    /// - [`WidgetError::SelfInsertion`] if `parent == child`.
    /// - [`WidgetError::CyclicInsertion`] if `parent` is a descendant of
    ///   `child`.
    pub fn insert(
        &mut self,
        parent: WidgetId,
        child: WidgetId,
        position: InsertPosition,
    ) -> Result<(), WidgetError> {
        self.check_live(parent)?;
        self.check_live(child)?;
        if parent == child {
            return Err(WidgetError::SelfInsertion);
        }
        // The root never gains a parent.
        if child == self.root() {
            return Err(WidgetError::InvalidWidget(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(WidgetError::CyclicInsertion);
        }
        if self.parent(child).is_some() {
            self.unlink(child)?;
        }

        let Some(p) = self.get_live_mut(parent) else {
            return Err(WidgetError::InvalidWidget(parent));
        };
        let index = match position {
            InsertPosition::Prepend => 0,
            InsertPosition::Append => p.children.len(),
        };
        p.children.insert(index, child);
        match position {
            InsertPosition::Prepend => p.stacking.insert(0, child),
            InsertPosition::Append => p.stacking.push(child),
        }
        let later: Vec<WidgetId> = p.children[index..].to_vec();
        self.reindex(&later, index);
        if let Some(c) = self.get_live_mut(child) {
            c.parent = Some(parent);
        }
        self.sync_edge_status(parent, index.saturating_sub(1), index + 2);

        self.request_task_recursive(child, TaskKind::RefreshStyle);
        for kind in [TaskKind::Resize, TaskKind::Position, TaskKind::ZIndex] {
            self.request_task(child, kind);
        }
        self.request_task(parent, TaskKind::Layout);
        log::debug!(target: "trellis::tree", "{child}: inserted under {parent} at {index}");
        self.emit(child, WidgetEvent::Added);
        Ok(())
    }

    /// Detach `id` from its parent. The widget stays allocated and may be
    /// inserted again.
    ///
    /// # Errors
    ///
    /// - [`WidgetError::InvalidWidget`] if the handle is stale.
    /// - [`WidgetError::Detached`] if the widget has no parent.
    pub fn unlink(&mut self, id: WidgetId) -> Result<(), WidgetError> {
        let widget = self.get(id).ok_or(WidgetError::InvalidWidget(id))?;
        let parent = widget.parent.ok_or(WidgetError::Detached(id))?;
        let index = widget.index;
        let in_flow = widget.computed.position != Position::Absolute;
        if widget.is_visible() {
            let _ = self.push_invalid_area(id, None, BoxKind::Graph);
        }

        let Some(p) = self.get_mut(parent) else {
            return Err(WidgetError::InvalidWidget(parent));
        };
        let _ = p.children.remove(index);
        p.stacking.retain(|s| *s != id);
        let later: Vec<WidgetId> = p.children[index..].to_vec();
        self.reindex(&later, index);

        if let Some(w) = self.get_mut(id) {
            w.parent = None;
            w.index = 0;
            let _ = w.status.remove(FIRST_CHILD);
            let _ = w.status.remove(LAST_CHILD);
        }
        self.sync_edge_status(parent, index.saturating_sub(1), index + 1);
        if in_flow {
            self.request_task(parent, TaskKind::Layout);
        }
        log::debug!(target: "trellis::tree", "{id}: unlinked from {parent}");
        self.emit(id, WidgetEvent::Removed);
        Ok(())
    }

    /// Replace `id` with its children: they are spliced into `id`'s parent
    /// at `id`'s position in their original order, appended to the parent's
    /// paint order, and `id` is destroyed.
    ///
    /// # Errors
    ///
    /// - [`WidgetError::InvalidWidget`] if the handle is stale or deleted.
    /// - [`WidgetError::Detached`] if the widget has no parent.
    pub fn unwrap(&mut self, id: WidgetId) -> Result<(), WidgetError> {
        let widget = self.widget(id)?;
        let parent = widget.parent.ok_or(WidgetError::Detached(id))?;
        let index = widget.index;

        let Some(w) = self.get_live_mut(id) else {
            return Err(WidgetError::InvalidWidget(id));
        };
        let children = std::mem::take(&mut w.children);
        w.stacking.clear();

        if let Some(p) = self.get_mut(parent) {
            let at = index + 1;
            let _ = p.children.splice(at..at, children.iter().copied());
            p.stacking.extend(children.iter().copied());
            let later: Vec<WidgetId> = p.children[at..].to_vec();
            self.reindex(&later, at);
        }
        for child in &children {
            if let Some(c) = self.get_mut(*child) {
                c.parent = Some(parent);
                let _ = c.status.remove(FIRST_CHILD);
                let _ = c.status.remove(LAST_CHILD);
            }
            self.request_task_recursive(*child, TaskKind::RefreshStyle);
            for kind in [TaskKind::Resize, TaskKind::Position, TaskKind::ZIndex] {
                self.request_task(*child, kind);
            }
        }
        log::debug!(
            target: "trellis::tree",
            "{id}: unwrapped {} children into {parent}",
            children.len()
        );

        self.destroy(id)?;
        let count = self.get(parent).map_or(0, |p| p.children.len());
        self.sync_edge_status(parent, 0, count);
        Ok(())
    }

    /// Destroy `id` and its subtree.
    ///
    /// A widget under the live root is unlinked immediately, marked
    /// [`WidgetState::Deleted`], and torn down by the next
    /// [`WidgetTree::clear_trash`], so handles held by code still running
    /// against it stay valid until then. A widget outside the live root is
    /// torn down now. Destroying a widget already queued is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale handles and for the
    /// root.
    pub fn destroy(&mut self, id: WidgetId) -> Result<(), WidgetError> {
        let widget = self.get(id).ok_or(WidgetError::InvalidWidget(id))?;
        if id == self.root() {
            return Err(WidgetError::InvalidWidget(id));
        }
        if widget.state == WidgetState::Deleted {
            return Ok(());
        }

        if self.is_rooted(id) {
            // Unlinking pushes the old graph box as dirty and requests the
            // parent's layout unless the widget is out of flow.
            self.unlink(id)?;
            if let Some(w) = self.get_mut(id) {
                w.state = WidgetState::Deleted;
                w.tasks = TaskSet::default();
            }
            self.trash.push(id);
            log::debug!(target: "trellis::tree", "{id}: queued for teardown");
        } else {
            if widget.parent.is_some() {
                self.unlink(id)?;
            }
            self.teardown(id);
        }
        Ok(())
    }

    /// Destroy every child of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn empty(&mut self, id: WidgetId) -> Result<(), WidgetError> {
        self.check_live(id)?;
        for child in self.children_of(id) {
            self.destroy(child)?;
        }
        Ok(())
    }

    /// Tear down every widget queued by [`WidgetTree::destroy`]. Returns the
    /// number of widgets torn down, descendants included.
    pub fn clear_trash(&mut self) -> usize {
        let trash = std::mem::take(&mut self.trash);
        let before = self.len();
        for id in trash {
            if self.get(id).is_some_and(|w| w.state == WidgetState::Deleted) {
                self.teardown(id);
            }
        }
        before - self.len()
    }

    /// Widgets queued for teardown.
    #[must_use]
    pub fn trash(&self) -> &[WidgetId] {
        &self.trash
    }

    /// Release everything `id` holds and free its slot. `id` must already
    /// be unlinked from its parent.
    fn teardown(&mut self, id: WidgetId) {
        self.emit(id, WidgetEvent::Destroyed);
        self.events.release_capture(id);

        let Some(widget) = self.get_mut(id) else {
            return;
        };
        widget.state = WidgetState::Deleted;
        widget.style.clear();
        widget.inline_style.clear();
        let children = std::mem::take(&mut widget.children);
        widget.stacking.clear();
        for child in children {
            if let Some(c) = self.get_mut(child) {
                c.parent = None;
            }
            self.teardown(child);
        }

        let Some(widget) = self.get_mut(id) else {
            return;
        };
        let kind = widget.kind.clone();
        kind.on_destroy(widget);
        widget.attributes.clear();
        widget.classes.clear();
        widget.status.clear();
        widget.dirty.clear();
        let had_surface = std::mem::take(&mut widget.has_surface);
        let name = widget.name.take();

        if had_surface {
            self.surfaces.free(id);
        }
        if let Some(name) = name {
            let _ = self.registry.unregister(&name);
        }
        let _ = self.free_slot(id);
        log::trace!(target: "trellis::tree", "{id}: torn down");
    }

    /// Set `index` for each of `ids`, starting at `start`.
    fn reindex(&mut self, ids: &[WidgetId], start: usize) {
        for (offset, id) in ids.iter().enumerate() {
            if let Some(w) = self.get_mut(*id) {
                w.index = start + offset;
            }
        }
    }

    /// Recompute `first-child`/`last-child` for children of `parent` in
    /// `from..to`.
    fn sync_edge_status(&mut self, parent: WidgetId, from: usize, to: usize) {
        let children = self.children_of(parent);
        let last = children.len().checked_sub(1);
        let to = to.min(children.len());
        for (index, child) in children.iter().enumerate().take(to).skip(from) {
            let _ = self.set_status_flag(*child, FIRST_CHILD, index == 0);
            let _ = self.set_status_flag(*child, LAST_CHILD, Some(index) == last);
        }
    }
}
