//! Arena-based widget tree.
//!
//! All widgets live in one vector of slots addressed by [`WidgetId`]. A
//! freed slot bumps its generation and joins a free list, so a handle kept
//! past teardown is detected instead of silently aliasing a newer widget.
//!
//! Each widget holds its children twice: once in structural order, which
//! drives flow layout and `index`, and once in paint order, which drives
//! rendering and hit testing. Both are plain handle lists; the tree keeps
//! them holding the same set.

use trellis_style::{StyleKey, StyleValue};

use crate::error::WidgetError;
use crate::host::{Cascade, EventSink, Host, SurfaceProvider, WidgetEvent};
use crate::id::WidgetId;
use crate::kind::{WidgetBehavior, WidgetKind};
use crate::registry::IdRegistry;
use crate::task::TaskKind;
use crate::widget::{Widget, WidgetState};

/// Tree-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Upper bound on scheduler passes per [`WidgetTree::flush`].
    pub max_passes: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { max_passes: 32 }
    }
}

/// The widget tree: an arena of widgets, the live root, the trash of
/// widgets awaiting teardown, and the collaborators.
pub struct WidgetTree {
    slots: Vec<Option<Widget>>,
    generations: Vec<u32>,
    free_list: Vec<u32>,
    root: WidgetId,
    pub(crate) trash: Vec<WidgetId>,
    pub(crate) registry: IdRegistry,
    pub(crate) cascade: Box<dyn Cascade>,
    pub(crate) events: Box<dyn EventSink>,
    pub(crate) surfaces: Box<dyn SurfaceProvider>,
    pub(crate) config: TreeConfig,
}

impl WidgetTree {
    /// A tree whose root is `width` × `height`, with default collaborators.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_host(width, height, Host::default())
    }

    /// A tree with the given collaborators.
    #[must_use]
    pub fn with_host(width: f32, height: f32, host: Host) -> Self {
        Self::with_config(width, height, host, TreeConfig::default())
    }

    /// A tree with the given collaborators and settings.
    #[must_use]
    pub fn with_config(width: f32, height: f32, host: Host, config: TreeConfig) -> Self {
        let mut root = Widget::new(WidgetKind::Root);
        root.state = WidgetState::Normal;
        root.inline_style.set(StyleKey::Width, StyleValue::Px(width));
        root.inline_style.set(StyleKey::Height, StyleValue::Px(height));
        let mut tree = Self {
            slots: vec![Some(root)],
            generations: vec![0],
            free_list: Vec::new(),
            root: WidgetId::new(0, 0),
            trash: Vec::new(),
            registry: IdRegistry::new(),
            cascade: host.cascade,
            events: host.events,
            surfaces: host.surfaces,
            config,
        };
        tree.request_task(tree.root, TaskKind::RefreshStyle);
        tree
    }

    /// The live root.
    #[must_use]
    pub const fn root(&self) -> WidgetId {
        self.root
    }

    /// The id index. Clones share the index and may be sent to other
    /// threads.
    #[must_use]
    pub const fn registry(&self) -> &IdRegistry {
        &self.registry
    }

    /// Number of allocated widgets, including those awaiting teardown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when only the root exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// True when `id` names an allocated widget.
    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.get(id).is_some()
    }

    /// The widget behind `id`, if the handle is current.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        if self.generations.get(id.slot()) != Some(&id.generation) {
            return None;
        }
        self.slots.get(id.slot()).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        if self.generations.get(id.slot()) != Some(&id.generation) {
            return None;
        }
        self.slots.get_mut(id.slot()).and_then(Option::as_mut)
    }

    pub(crate) fn get_live(&self, id: WidgetId) -> Option<&Widget> {
        self.get(id).filter(|w| w.is_live())
    }

    pub(crate) fn get_live_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.get_mut(id).filter(|w| w.is_live())
    }

    /// The widget behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn widget(&self, id: WidgetId) -> Result<&Widget, WidgetError> {
        self.get_live(id).ok_or(WidgetError::InvalidWidget(id))
    }

    pub(crate) fn check_live(&self, id: WidgetId) -> Result<(), WidgetError> {
        self.widget(id).map(|_| ())
    }

    /// Allocate a detached widget of `kind` and run its type's init hook.
    pub fn create(&mut self, kind: WidgetKind) -> WidgetId {
        let mut widget = Widget::new(kind.clone());
        kind.on_init(&mut widget);
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = idx as usize;
            self.slots[slot] = Some(widget);
            WidgetId::new(idx, self.generations[slot])
        } else {
            let idx = u32::try_from(self.slots.len());
            // More than u32::MAX live slots is out of reach for a widget tree.
            debug_assert!(idx.is_ok(), "widget slots exhausted");
            let idx = idx.unwrap_or(u32::MAX);
            self.slots.push(Some(widget));
            self.generations.push(0);
            WidgetId::new(idx, 0)
        };
        log::trace!(target: "trellis::tree", "{id}: created {}", kind.type_name());
        id
    }

    /// Release a slot. The widget must already be unlinked.
    pub(crate) fn free_slot(&mut self, id: WidgetId) -> Option<Widget> {
        let widget = self.slots.get_mut(id.slot())?.take()?;
        if let Some(generation) = self.generations.get_mut(id.slot()) {
            *generation = generation.wrapping_add(1);
        }
        self.free_list.push(id.idx);
        Some(widget)
    }

    /// Children of `id` in structural order, copied so the caller may
    /// mutate the tree while iterating.
    #[must_use]
    pub fn children_of(&self, id: WidgetId) -> Vec<WidgetId> {
        self.get(id).map(|w| w.children.clone()).unwrap_or_default()
    }

    /// `id` and all its descendants, pre-order.
    #[must_use]
    pub fn descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(widget) = self.get(next) else {
                continue;
            };
            out.push(next);
            stack.extend(widget.children.iter().rev());
        }
        out
    }

    /// The parent of `id`.
    #[must_use]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.get(id).and_then(|w| w.parent)
    }

    /// The structural predecessor of `id`.
    #[must_use]
    pub fn prev_sibling(&self, id: WidgetId) -> Option<WidgetId> {
        let widget = self.get(id)?;
        let parent = self.get(widget.parent?)?;
        let index = widget.index.checked_sub(1)?;
        parent.children.get(index).copied()
    }

    /// The structural successor of `id`.
    #[must_use]
    pub fn next_sibling(&self, id: WidgetId) -> Option<WidgetId> {
        let widget = self.get(id)?;
        let parent = self.get(widget.parent?)?;
        parent.children.get(widget.index + 1).copied()
    }

    /// True when `ancestor` is `id` or lies on its parent chain.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// True when `id`'s parent chain ends at the live root.
    #[must_use]
    pub fn is_rooted(&self, id: WidgetId) -> bool {
        self.is_ancestor(self.root, id)
    }

    /// True when `id` is of type `name` or derives from it.
    #[must_use]
    pub fn check_type(&self, id: WidgetId, name: &str) -> bool {
        self.get(id).is_some_and(|w| w.kind.is_kind(name))
    }

    /// Deliver `event` for `id` to the event sink.
    pub(crate) fn emit(&mut self, id: WidgetId, event: WidgetEvent) {
        log::trace!(target: "trellis::tree", "{id}: {event}");
        self.events.trigger(id, &event);
    }

    /// Move `id` along its lifecycle. `layouted` is true when called from
    /// the parent's layout pass. The ready notification fires once, when a
    /// widget has both been placed and had its first style pass.
    pub(crate) fn advance_lifecycle(&mut self, id: WidgetId, layouted: bool) {
        let Some(widget) = self.get_live_mut(id) else {
            return;
        };
        if layouted && widget.state == WidgetState::Created {
            widget.state = WidgetState::Layouted;
        }
        if widget.state != WidgetState::Layouted || !widget.style_ready {
            return;
        }
        widget.state = WidgetState::Ready;
        self.emit(id, WidgetEvent::Ready);
        if let Some(widget) = self.get_live_mut(id) {
            widget.state = WidgetState::Normal;
        }
    }

    /// Suppress automatic layout requests for `id`. Pending layout stays
    /// pending.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn lock_layout(&mut self, id: WidgetId) -> Result<(), WidgetError> {
        self.get_live_mut(id)
            .ok_or(WidgetError::InvalidWidget(id))?
            .layout_locked = true;
        Ok(())
    }

    /// Allow layout requests for `id` again.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn unlock_layout(&mut self, id: WidgetId) -> Result<(), WidgetError> {
        self.get_live_mut(id)
            .ok_or(WidgetError::InvalidWidget(id))?
            .layout_locked = false;
        Ok(())
    }

    /// Set the title and request a repaint for it.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn set_title(&mut self, id: WidgetId, title: &str) -> Result<(), WidgetError> {
        self.get_live_mut(id)
            .ok_or(WidgetError::InvalidWidget(id))?
            .title = Some(title.to_string());
        self.request_task(id, TaskKind::Title);
        Ok(())
    }

    /// Front-most visible descendant of `id` whose border box contains
    /// `(x, y)`, given in `id`'s padding-box space. Descends as deep as
    /// possible; `None` when no child is hit.
    #[must_use]
    pub fn widget_at(&self, id: WidgetId, x: f32, y: f32) -> Option<WidgetId> {
        let (mut x, mut y) = (x, y);
        let mut target = id;
        loop {
            let widget = self.get_live(target)?;
            let hit = widget.stacking.iter().rev().copied().find(|child| {
                self.get_live(*child)
                    .is_some_and(|c| c.is_visible() && c.boxes.border.contains_point(x, y))
            });
            let Some(child) = hit else {
                break;
            };
            let padding = self.get_live(child)?.boxes.padding;
            x -= padding.x;
            y -= padding.y;
            target = child;
        }
        (target != id).then_some(target)
    }

    /// Border-box origin of `id` in the root's padding-box space.
    #[must_use]
    pub fn absolute_position(&self, id: WidgetId) -> Option<(f32, f32)> {
        let widget = self.get(id)?;
        let (mut x, mut y) = (widget.boxes.border.x, widget.boxes.border.y);
        let mut current = widget.parent;
        while let Some(parent) = current.and_then(|p| self.get(p)) {
            if parent.parent.is_none() {
                break;
            }
            x += parent.boxes.padding.x;
            y += parent.boxes.padding.y;
            current = parent.parent;
        }
        Some((x, y))
    }
}
