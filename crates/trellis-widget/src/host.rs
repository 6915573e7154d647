//! Collaborator interfaces.
//!
//! The core does not select styles, dispatch events, or rasterize. It asks a
//! [`Cascade`] for each widget's resolved sheet, tells an [`EventSink`] what
//! happened, and asks a [`SurfaceProvider`] for backing stores. A [`Host`]
//! bundles one of each; the defaults do the minimum needed to run a tree
//! stand-alone.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use strum_macros::Display;

use crate::error::WidgetError;
use crate::id::WidgetId;
use crate::widget::Widget;
use trellis_style::StyleSheet;

/// Something that happened to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum WidgetEvent {
    /// Inserted under a parent.
    Added,
    /// Unlinked from its parent.
    Removed,
    /// Torn down.
    Destroyed,
    /// Became visible.
    Shown,
    /// Became invisible.
    Hidden,
    /// Its border box moved.
    Moved,
    /// Its graph box or padding changed size.
    Resized,
    /// Styled and laid out for the first time.
    Ready,
    /// Finished placing its children.
    AfterLayout,
}

/// Pixel format of a paint surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum PixelFormat {
    /// 32-bit with alpha.
    Argb,
    /// 24-bit opaque.
    Rgb,
}

/// Produces a widget's resolved style sheet.
pub trait Cascade {
    /// The sheet that applies to `widget`, with inline declarations already
    /// folded in.
    fn resolve(&self, id: WidgetId, widget: &Widget) -> StyleSheet;
}

/// Receives widget notifications.
pub trait EventSink {
    /// Deliver `event` for `id`.
    fn trigger(&mut self, id: WidgetId, event: &WidgetEvent);

    /// Drop any pointer or keyboard capture held by `id`.
    fn release_capture(&mut self, id: WidgetId);
}

/// Allocates backing stores for widgets that paint.
pub trait SurfaceProvider {
    /// Allocate or resize the surface of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::AllocationFailure`] when no surface could be
    /// provided.
    fn allocate(
        &mut self,
        id: WidgetId,
        width: f32,
        height: f32,
        format: PixelFormat,
    ) -> Result<(), WidgetError>;

    /// Release the surface of `id`.
    fn free(&mut self, id: WidgetId);
}

/// A cascade with no rules: a widget's sheet is its inline style.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineCascade;

impl Cascade for InlineCascade {
    fn resolve(&self, _id: WidgetId, widget: &Widget) -> StyleSheet {
        widget.inline_style().clone()
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEvents;

impl EventSink for NullEvents {
    fn trigger(&mut self, _id: WidgetId, _event: &WidgetEvent) {}

    fn release_capture(&mut self, _id: WidgetId) {}
}

/// Grants every allocation without holding pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurfaces;

impl SurfaceProvider for NullSurfaces {
    fn allocate(
        &mut self,
        _id: WidgetId,
        _width: f32,
        _height: f32,
        _format: PixelFormat,
    ) -> Result<(), WidgetError> {
        Ok(())
    }

    fn free(&mut self, _id: WidgetId) {}
}

/// An event sink that keeps every notification. Clones share the log, so
/// one clone can go into the tree while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct RecordedEvents {
    log: Rc<RefCell<Vec<(WidgetId, WidgetEvent)>>>,
    released: Rc<RefCell<Vec<WidgetId>>>,
}

impl RecordedEvents {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<(WidgetId, WidgetEvent)> {
        self.log.borrow().clone()
    }

    /// How many times `event` was delivered to `id`.
    #[must_use]
    pub fn count(&self, id: WidgetId, event: WidgetEvent) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|(target, kind)| *target == id && *kind == event)
            .count()
    }

    /// Widgets whose capture was released.
    #[must_use]
    pub fn released(&self) -> Vec<WidgetId> {
        self.released.borrow().clone()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
        self.released.borrow_mut().clear();
    }
}

impl EventSink for RecordedEvents {
    fn trigger(&mut self, id: WidgetId, event: &WidgetEvent) {
        self.log.borrow_mut().push((id, *event));
    }

    fn release_capture(&mut self, id: WidgetId) {
        self.released.borrow_mut().push(id);
    }
}

/// The collaborators a [`WidgetTree`](crate::WidgetTree) talks to.
pub struct Host {
    /// Style source.
    pub cascade: Box<dyn Cascade>,
    /// Notification sink.
    pub events: Box<dyn EventSink>,
    /// Backing-store allocator.
    pub surfaces: Box<dyn SurfaceProvider>,
}

impl Default for Host {
    fn default() -> Self {
        Self {
            cascade: Box::new(InlineCascade),
            events: Box::new(NullEvents),
            surfaces: Box::new(NullSurfaces),
        }
    }
}

impl Host {
    /// Replace the event sink.
    #[must_use]
    pub fn with_events(mut self, events: impl EventSink + 'static) -> Self {
        self.events = Box::new(events);
        self
    }

    /// Replace the cascade.
    #[must_use]
    pub fn with_cascade(mut self, cascade: impl Cascade + 'static) -> Self {
        self.cascade = Box::new(cascade);
        self
    }

    /// Replace the surface provider.
    #[must_use]
    pub fn with_surfaces(mut self, surfaces: impl SurfaceProvider + 'static) -> Self {
        self.surfaces = Box::new(surfaces);
        self
    }
}
