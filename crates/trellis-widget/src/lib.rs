//! Widget tree, box-model engine, flow layout and invalidation for Trellis.
//!
//! # Scope
//!
//! This crate implements the retained-mode core of the toolkit:
//! - **Widget tree** - an arena of widgets addressed by generational
//!   [`WidgetId`] handles, with structural and paint-order child lists
//! - **Tree mutation** - insert, unlink, unwrap and deferred destruction
//! - **Style resolution** - resolved sheets from a [`Cascade`] turned into
//!   concrete values, one property group per task
//! - **Box model** - the five rectangles of every widget, auto sizing,
//!   min/max clamps and paint surfaces
//! - **Flow layout** - block and inline-block placement with wrapping
//! - **Invalidation** - per-widget dirty rectangles and screen-space
//!   pushes to the root
//! - **Identity** - a thread-safe id index, classes, status tags and
//!   attributes
//!
//! # Tasks
//!
//! Nothing expensive happens where it is caused. Mutations request
//! [`TaskKind`]s, and a scheduler runs them through
//! [`WidgetTree::run_task`]. [`WidgetTree::update`] and
//! [`WidgetTree::flush`] are a ready-made single-threaded scheduler.
//!
//! # Not Yet Implemented
//!
//! - Text shaping (text widgets use a fixed per-character advance)
//! - Animation and transitions

/// Size resolution and paint surfaces.
pub mod box_model;
/// Errors returned by tree mutators.
pub mod error;
/// Collaborator interfaces: cascade, events, surfaces.
pub mod host;
/// Widget handles.
pub mod id;
/// Dirty-region tracking.
pub mod invalidate;
/// Widget types and their hooks.
pub mod kind;
/// Block and inline-block flow layout.
pub mod layout;
/// Insert, unlink, unwrap and destroy.
pub mod mutate;
/// Ids, classes, status tags and attributes.
pub mod registry;
/// Serializable tree dumps.
pub mod snapshot;
/// Paint order among siblings.
pub mod stacking;
/// Per-group style resolution and inline style setters.
pub mod style;
/// Recomputation tasks and the reference scheduler.
pub mod task;
/// The widget arena.
pub mod tree;
/// The widget node.
pub mod widget;

pub use error::WidgetError;
pub use host::{
    Cascade, EventSink, Host, InlineCascade, NullEvents, NullSurfaces, PixelFormat,
    RecordedEvents, SurfaceProvider, WidgetEvent,
};
pub use id::WidgetId;
pub use invalidate::DirtyRects;
pub use kind::{DEFAULT_FONT_SIZE, WidgetBehavior, WidgetKind};
pub use mutate::InsertPosition;
pub use registry::IdRegistry;
pub use snapshot::WidgetSnapshot;
pub use style::task_for_key;
pub use task::{TaskKind, TaskSet};
pub use tree::{TreeConfig, WidgetTree};
pub use widget::{AttributeValue, DISABLED, FIRST_CHILD, LAST_CHILD, Widget, WidgetState};
