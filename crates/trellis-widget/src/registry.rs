//! Identity, classes, status tags and attributes.
//!
//! The id index is the only state shared beyond the UI thread: lookups may
//! come from anywhere, so it sits behind a lock. Classes, status tags and
//! attributes are plain per-widget sets; changing any of them can change
//! which rules the cascade selects, so each change requests a style refresh
//! for the widget and its subtree.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::WidgetError;
use crate::id::WidgetId;
use crate::task::TaskKind;
use crate::tree::WidgetTree;
use crate::widget::{AttributeValue, DISABLED};

/// Global unique-id index, shared by clones.
#[derive(Debug, Clone, Default)]
pub struct IdRegistry {
    ids: Arc<Mutex<HashMap<String, WidgetId>>>,
}

impl IdRegistry {
    /// An empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::DuplicateIdentity`] if another widget holds
    /// `name`; the index is left unchanged.
    pub fn register(&self, name: &str, id: WidgetId) -> Result<(), WidgetError> {
        let mut ids = self.ids.lock();
        match ids.get(name) {
            Some(existing) if *existing != id => {
                Err(WidgetError::DuplicateIdentity(name.to_string()))
            }
            _ => {
                let _ = ids.insert(name.to_string(), id);
                Ok(())
            }
        }
    }

    /// Forget `name`, returning the widget it named.
    pub fn unregister(&self, name: &str) -> Option<WidgetId> {
        self.ids.lock().remove(name)
    }

    /// The widget registered under `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<WidgetId> {
        self.ids.lock().get(name).copied()
    }

    /// Number of registered ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.lock().len()
    }

    /// True when no id is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.lock().is_empty()
    }
}

impl WidgetTree {
    /// Assign or clear the unique id of `id`.
    ///
    /// # Errors
    ///
    /// - [`WidgetError::InvalidWidget`] for stale or deleted handles.
    /// - [`WidgetError::DuplicateIdentity`] if another widget holds `name`.
    ///   The widget is left with no id.
    pub fn set_id(&mut self, id: WidgetId, name: Option<&str>) -> Result<(), WidgetError> {
        let widget = self.get_live_mut(id).ok_or(WidgetError::InvalidWidget(id))?;
        let old = widget.name.take();
        if let Some(old) = old {
            let _ = self.registry.unregister(&old);
        }
        if let Some(name) = name {
            self.registry.register(name, id)?;
            if let Some(widget) = self.get_live_mut(id) {
                widget.name = Some(name.to_string());
            }
        }
        self.request_task_recursive(id, TaskKind::RefreshStyle);
        Ok(())
    }

    /// The live widget registered under `name`.
    #[must_use]
    pub fn get_by_id(&self, name: &str) -> Option<WidgetId> {
        self.registry
            .lookup(name)
            .filter(|id| self.get_live(*id).is_some())
    }

    /// Add a class. Returns true if it was not already set.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn add_class(&mut self, id: WidgetId, class: &str) -> Result<bool, WidgetError> {
        let widget = self.get_live_mut(id).ok_or(WidgetError::InvalidWidget(id))?;
        let added = widget.classes.insert(class.to_string());
        if added {
            self.request_task_recursive(id, TaskKind::RefreshStyle);
        }
        Ok(added)
    }

    /// Remove a class. Returns true if it was set.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn remove_class(&mut self, id: WidgetId, class: &str) -> Result<bool, WidgetError> {
        let widget = self.get_live_mut(id).ok_or(WidgetError::InvalidWidget(id))?;
        let removed = widget.classes.remove(class);
        if removed {
            self.request_task_recursive(id, TaskKind::RefreshStyle);
        }
        Ok(removed)
    }

    /// Add a status tag. Returns true if it was not already set.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn add_status(&mut self, id: WidgetId, status: &str) -> Result<bool, WidgetError> {
        self.check_live(id)?;
        Ok(self.set_status_flag(id, status, true))
    }

    /// Remove a status tag. Returns true if it was set.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn remove_status(&mut self, id: WidgetId, status: &str) -> Result<bool, WidgetError> {
        self.check_live(id)?;
        Ok(self.set_status_flag(id, status, false))
    }

    /// Set or clear a status tag, refreshing style when it changes. Returns
    /// true on change.
    pub(crate) fn set_status_flag(&mut self, id: WidgetId, status: &str, on: bool) -> bool {
        let Some(widget) = self.get_live_mut(id) else {
            return false;
        };
        let changed = if on {
            widget.status.insert(status.to_string())
        } else {
            widget.status.remove(status)
        };
        if changed {
            self.request_task_recursive(id, TaskKind::RefreshStyle);
        }
        changed
    }

    /// Toggle the `disabled` status.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn set_disabled(&mut self, id: WidgetId, disabled: bool) -> Result<(), WidgetError> {
        self.check_live(id)?;
        let _ = self.set_status_flag(id, DISABLED, disabled);
        Ok(())
    }

    /// Set an attribute, dropping any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn set_attribute(
        &mut self,
        id: WidgetId,
        name: &str,
        value: AttributeValue,
    ) -> Result<(), WidgetError> {
        let widget = self.get_live_mut(id).ok_or(WidgetError::InvalidWidget(id))?;
        drop(widget.attributes.insert(name.to_string(), value));
        self.request_task_recursive(id, TaskKind::RefreshStyle);
        Ok(())
    }

    /// Remove an attribute and hand back its value.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidWidget`] for stale or deleted handles.
    pub fn remove_attribute(
        &mut self,
        id: WidgetId,
        name: &str,
    ) -> Result<Option<AttributeValue>, WidgetError> {
        let widget = self.get_live_mut(id).ok_or(WidgetError::InvalidWidget(id))?;
        let removed = widget.attributes.remove(name);
        if removed.is_some() {
            self.request_task_recursive(id, TaskKind::RefreshStyle);
        }
        Ok(removed)
    }
}
