//! Box geometry types.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! Every widget carries five nested rectangles. All of them are expressed in
//! the coordinate space of the parent's padding box, so a child's rectangle
//! can be compared with (and invalidated on) its parent directly.
//!
//! ```text
//! ┌───────────────────────────────────────────┐  graph (border + shadow)
//! │  ┌─────────────────────────────────────┐  │
//! │  │            outer (margin)           │  │
//! │  │   ┌─────────────────────────────┐   │  │
//! │  │   │           border            │   │  │
//! │  │   │   ┌─────────────────────┐   │   │  │
//! │  │   │   │       padding       │   │   │  │
//! │  │   │   │   ┌─────────────┐   │   │   │  │
//! │  │   │   │   │   content   │   │   │   │  │
//! │  │   │   │   └─────────────┘   │   │   │  │
//! │  │   │   └─────────────────────┘   │   │  │
//! │  │   └─────────────────────────────┘   │  │
//! │  └─────────────────────────────────────┘  │
//! └───────────────────────────────────────────┘
//! ```
//!
//! The graph box is drawn outermost here, but it only grows past the
//! border box where a shadow reaches, so it may sit inside the outer box.

use serde::Serialize;
use strum_macros::Display;

/// A rectangle positioned in 2D space.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its origin and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle of the given size at the origin.
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// The x coordinate one past the right edge.
    #[must_use]
    pub const fn right(&self) -> f32 {
        self.x + self.width
    }

    /// The y coordinate one past the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the rectangle covers no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True when both rectangles have the same width and height.
    #[must_use]
    pub fn same_size(&self, other: &Self) -> bool {
        (self.width - other.width).abs() < f32::EPSILON
            && (self.height - other.height).abs() < f32::EPSILON
    }

    /// Half-open point containment: the left and top edges are inside, the
    /// right and bottom edges are not.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// True when `other` lies entirely within this rectangle.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// The overlapping region of two rectangles, or `None` if they do not
    /// overlap.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let rect = Self::new(x, y, right - x, bottom - y);
        if rect.is_empty() { None } else { Some(rect) }
    }

    /// The rectangle moved by `(dx, dy)`.
    #[must_use]
    pub const fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow outward by `edges` on every side.
    #[must_use]
    pub fn expand(&self, edges: &EdgeSizes) -> Self {
        Self::new(
            self.x - edges.left,
            self.y - edges.top,
            self.width + edges.horizontal(),
            self.height + edges.vertical(),
        )
    }

    /// Shrink inward by `edges` on every side. The size never goes negative.
    #[must_use]
    pub fn shrink(&self, edges: &EdgeSizes) -> Self {
        Self::new(
            self.x + edges.left,
            self.y + edges.top,
            (self.width - edges.horizontal()).max(0.0),
            (self.height - edges.vertical()).max(0.0),
        )
    }

    /// Partition `self` minus `inner` into four strips, in the order top,
    /// right, bottom, left. Top and bottom span the full width; left and
    /// right span the height of `inner`. Both rectangles must share a
    /// coordinate space and `inner` must lie within `self`.
    #[must_use]
    pub fn cut_four(&self, inner: &Self) -> [Self; 4] {
        [
            Self::new(self.x, self.y, self.width, inner.y - self.y),
            Self::new(
                inner.right(),
                inner.y,
                self.right() - inner.right(),
                inner.height,
            ),
            Self::new(
                self.x,
                inner.bottom(),
                self.width,
                self.bottom() - inner.bottom(),
            ),
            Self::new(self.x, inner.y, inner.x - self.x, inner.height),
        ]
    }
}

/// One side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Edge {
    /// The top side.
    Top,
    /// The right side.
    Right,
    /// The bottom side.
    Bottom,
    /// The left side.
    Left,
}

impl Edge {
    /// True for the left and right sides, which resolve percentages against
    /// a width.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Edge sizes for padding, border, or margin.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

impl EdgeSizes {
    /// All four edges zero.
    pub const ZERO: Self = Self::uniform(0.0);

    /// The same size on every edge.
    #[must_use]
    pub const fn uniform(size: f32) -> Self {
        Self {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }

    /// Sum of the left and right edges.
    #[must_use]
    pub const fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of the top and bottom edges.
    #[must_use]
    pub const fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Read one edge.
    #[must_use]
    pub const fn get(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    /// Write one edge.
    pub const fn set(&mut self, edge: Edge, size: f32) {
        match edge {
            Edge::Top => self.top = size,
            Edge::Right => self.right = size,
            Edge::Bottom => self.bottom = size,
            Edge::Left => self.left = size,
        }
    }
}

/// Selects one of the five rectangles of a [`BoxModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum BoxKind {
    /// Border box expanded by margins.
    Outer,
    /// The border box.
    Border,
    /// Border box minus border widths.
    Padding,
    /// Padding box minus padding.
    Content,
    /// Border box expanded by shadow extents; the paintable area.
    Graph,
}

/// The five rectangles of a widget.
///
/// Invariants after every resize:
/// `content ⊆ padding ⊆ border`, `outer = border + margins`,
/// `graph = border + shadow extents`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoxModel {
    /// [§ 3.1 Margins](https://www.w3.org/TR/css-box-3/#margins)
    ///
    /// "The margin box is the outermost box, and contains all four areas."
    pub outer: Rect,
    /// [§ 3.3 Borders](https://www.w3.org/TR/css-box-3/#borders)
    pub border: Rect,
    /// [§ 3.2 Padding](https://www.w3.org/TR/css-box-3/#paddings)
    pub padding: Rect,
    /// "The content box contains the actual content of the element."
    pub content: Rect,
    /// The area a paint surface has to cover, including any shadow.
    pub graph: Rect,
}

impl BoxModel {
    /// Derive all five rectangles from a border box and its surrounding
    /// edges.
    ///
    /// ```text
    /// padding = border - border widths
    /// content = padding - padding
    /// outer   = border + margin
    /// graph   = border + shadow
    /// ```
    #[must_use]
    pub fn from_border_box(
        border: Rect,
        border_widths: &EdgeSizes,
        padding: &EdgeSizes,
        margin: &EdgeSizes,
        shadow: &EdgeSizes,
    ) -> Self {
        let padding_box = border.shrink(border_widths);
        Self {
            outer: border.expand(margin),
            border,
            padding: padding_box,
            content: padding_box.shrink(padding),
            graph: border.expand(shadow),
        }
    }

    /// Select one rectangle.
    #[must_use]
    pub const fn get(&self, kind: BoxKind) -> Rect {
        match kind {
            BoxKind::Outer => self.outer,
            BoxKind::Border => self.border,
            BoxKind::Padding => self.padding,
            BoxKind::Content => self.content,
            BoxKind::Graph => self.graph,
        }
    }

    /// Check the nesting invariants on widths and heights.
    #[must_use]
    pub fn is_consistent(&self, margin: &EdgeSizes) -> bool {
        const TOLERANCE: f32 = 0.001;
        self.content.width <= self.padding.width
            && self.padding.width <= self.border.width
            && self.content.height <= self.padding.height
            && self.padding.height <= self.border.height
            && (self.outer.width - (self.border.width + margin.horizontal())).abs() < TOLERANCE
            && (self.outer.height - (self.border.height + margin.vertical())).abs() < TOLERANCE
    }
}
