//! The widget node.

use std::any::Any;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;
use strum_macros::Display;
use trellis_style::{BoxModel, ComputedStyle, EdgeSizes, Length, StyleKey, StyleSheet};

use crate::id::WidgetId;
use crate::invalidate::DirtyRects;
use crate::kind::WidgetKind;
use crate::task::TaskSet;

/// Status tag carried by the structurally first child.
pub const FIRST_CHILD: &str = "first-child";
/// Status tag carried by the structurally last child.
pub const LAST_CHILD: &str = "last-child";
/// Status tag carried by disabled widgets.
pub const DISABLED: &str = "disabled";

/// Lifecycle of a widget. Only ever moves forward, except that
/// [`WidgetState::Deleted`] may be entered from any state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum WidgetState {
    /// Allocated; not yet placed by a parent's layout.
    #[default]
    Created,
    /// Placed by a parent's layout, waiting for its first style pass.
    Layouted,
    /// Styled and placed; the one-time ready notification is being sent.
    Ready,
    /// Fully live.
    Normal,
    /// Queued for teardown. Structurally absent from the tree.
    Deleted,
}

/// Value of a widget attribute. Dropping the value is its destructor.
pub enum AttributeValue {
    /// A string value.
    Text(String),
    /// A present attribute without a value.
    Flag,
    /// Arbitrary owned data.
    Data(Box<dyn Any>),
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Flag => f.write_str("Flag"),
            Self::Data(_) => f.write_str("Data(..)"),
        }
    }
}

impl AttributeValue {
    /// The string value, if this is [`AttributeValue::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One node of the widget tree.
///
/// Fields are written by the tree's operations and tasks; the public surface
/// is read-only accessors.
#[derive(Debug)]
pub struct Widget {
    pub(crate) name: Option<String>,
    pub(crate) kind: WidgetKind,

    pub(crate) parent: Option<WidgetId>,
    /// Structural order. `children[i].index == i`.
    pub(crate) children: Vec<WidgetId>,
    /// Paint order, back to front. Same set as `children`.
    pub(crate) stacking: Vec<WidgetId>,
    pub(crate) index: usize,
    pub(crate) state: WidgetState,

    /// Outer-box origin in the parent's padding-box space.
    pub(crate) x: f32,
    pub(crate) y: f32,
    /// Border-box size.
    pub(crate) width: f32,
    pub(crate) height: f32,
    /// Flow position assigned by the parent's layout, before margins and
    /// offsets.
    pub(crate) origin_x: f32,
    pub(crate) origin_y: f32,
    pub(crate) padding: EdgeSizes,
    pub(crate) margin: EdgeSizes,

    pub(crate) inline_style: StyleSheet,
    pub(crate) style: StyleSheet,
    pub(crate) computed: ComputedStyle,
    pub(crate) boxes: BoxModel,

    pub(crate) layout_locked: bool,
    pub(crate) style_ready: bool,
    pub(crate) status: BTreeSet<String>,
    pub(crate) classes: BTreeSet<String>,
    pub(crate) attributes: HashMap<String, AttributeValue>,
    pub(crate) title: Option<String>,

    pub(crate) dirty: DirtyRects,
    pub(crate) has_dirty_child: bool,
    pub(crate) enable_graph: bool,
    pub(crate) has_surface: bool,

    pub(crate) tasks: TaskSet,
}

impl Widget {
    pub(crate) fn new(kind: WidgetKind) -> Self {
        Self {
            name: None,
            kind,
            parent: None,
            children: Vec::new(),
            stacking: Vec::new(),
            index: 0,
            state: WidgetState::Created,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            origin_x: 0.0,
            origin_y: 0.0,
            padding: EdgeSizes::ZERO,
            margin: EdgeSizes::ZERO,
            inline_style: StyleSheet::new(),
            style: StyleSheet::new(),
            computed: ComputedStyle::default(),
            boxes: BoxModel::default(),
            layout_locked: false,
            style_ready: false,
            status: BTreeSet::new(),
            classes: BTreeSet::new(),
            attributes: HashMap::new(),
            title: None,
            dirty: DirtyRects::default(),
            has_dirty_child: false,
            enable_graph: false,
            has_surface: false,
            tasks: TaskSet::default(),
        }
    }

    /// The unique identifier, if one is registered.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The widget's type.
    #[must_use]
    pub const fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    /// The parent, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Children in structural order.
    #[must_use]
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// Children in paint order, back to front.
    #[must_use]
    pub fn stacking_order(&self) -> &[WidgetId] {
        &self.stacking
    }

    /// Position among the parent's children.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> WidgetState {
        self.state
    }

    /// Outer-box x in the parent's padding-box space.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Outer-box y in the parent's padding-box space.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Border-box width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Border-box height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Flow position assigned by the parent's layout.
    #[must_use]
    pub const fn origin(&self) -> (f32, f32) {
        (self.origin_x, self.origin_y)
    }

    /// Resolved padding.
    #[must_use]
    pub const fn padding(&self) -> EdgeSizes {
        self.padding
    }

    /// Resolved margin.
    #[must_use]
    pub const fn margin(&self) -> EdgeSizes {
        self.margin
    }

    /// The five rectangles.
    #[must_use]
    pub const fn boxes(&self) -> &BoxModel {
        &self.boxes
    }

    /// The widget's own declarations.
    #[must_use]
    pub const fn inline_style(&self) -> &StyleSheet {
        &self.inline_style
    }

    /// The sheet applied by the last style pass.
    #[must_use]
    pub const fn style(&self) -> &StyleSheet {
        &self.style
    }

    /// Concrete values resolved from [`Widget::style`].
    #[must_use]
    pub const fn computed(&self) -> &ComputedStyle {
        &self.computed
    }

    /// True when visible and displayed.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.computed.visible
    }

    /// True while automatic layout requests are suppressed.
    #[must_use]
    pub const fn is_layout_locked(&self) -> bool {
        self.layout_locked
    }

    /// Status tags.
    pub fn status(&self) -> impl Iterator<Item = &str> {
        self.status.iter().map(String::as_str)
    }

    /// True when the status tag is set.
    #[must_use]
    pub fn has_status(&self, status: &str) -> bool {
        self.status.contains(status)
    }

    /// Class names.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// True when the class is set.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// An attribute's value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// The title text.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// True when the `disabled` status is set.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.has_status(DISABLED)
    }

    /// Pending dirty rectangles, in graph-box-local coordinates.
    #[must_use]
    pub const fn dirty_rects(&self) -> &DirtyRects {
        &self.dirty
    }

    /// True when some descendant has dirty rectangles.
    #[must_use]
    pub const fn has_dirty_child(&self) -> bool {
        self.has_dirty_child
    }

    /// True when the widget's type paints its own content.
    #[must_use]
    pub const fn enable_graph(&self) -> bool {
        self.enable_graph
    }

    /// True while a paint surface is held.
    #[must_use]
    pub const fn has_surface(&self) -> bool {
        self.has_surface
    }

    /// Tasks requested and not yet run.
    #[must_use]
    pub const fn pending_tasks(&self) -> TaskSet {
        self.tasks
    }

    pub(crate) fn length(&self, key: StyleKey) -> Length {
        Length::from_value(self.style.get(key))
    }

    pub(crate) fn has_auto_width(&self) -> bool {
        self.length(StyleKey::Width).is_auto()
    }

    pub(crate) fn has_auto_height(&self) -> bool {
        self.length(StyleKey::Height).is_auto()
    }

    pub(crate) fn is_live(&self) -> bool {
        self.state != WidgetState::Deleted
    }
}
