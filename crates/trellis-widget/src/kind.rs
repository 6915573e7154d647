//! Widget types and their type-specific hooks.
//!
//! The set of widget types is closed. Each variant answers the three
//! questions the core asks of a type: how big is your content when nothing
//! constrains it, what do you need when created, and what do you release
//! when destroyed. Dispatch goes through [`WidgetBehavior`], implemented once
//! for [`WidgetKind`].

use serde::Serialize;

use crate::widget::Widget;

/// Font size used by text widgets created through the shorthand
/// constructors.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Width of one character as a fraction of the font size.
const CHAR_WIDTH_RATIO: f32 = 0.6;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// The type of a widget, with its type-specific data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WidgetKind {
    /// The tree root. Exactly one exists per tree.
    Root,
    /// A plain container, tagged with a free-form type name.
    Element(String),
    /// A block of text.
    TextView {
        /// The text, possibly spanning several lines.
        text: String,
        /// Font size in pixels.
        font_size: f32,
    },
    /// A clickable text label. Derives from `textview`.
    Button {
        /// The label text.
        label: String,
        /// Font size in pixels.
        font_size: f32,
    },
    /// An image with a fixed intrinsic size.
    Image {
        /// Intrinsic width in pixels.
        width: f32,
        /// Intrinsic height in pixels.
        height: f32,
    },
}

impl WidgetKind {
    /// A plain container with the given type name.
    #[must_use]
    pub fn element(name: &str) -> Self {
        Self::Element(name.to_string())
    }

    /// A text view at [`DEFAULT_FONT_SIZE`].
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self::TextView {
            text: text.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// A button at [`DEFAULT_FONT_SIZE`].
    #[must_use]
    pub fn button(label: &str) -> Self {
        Self::Button {
            label: label.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// The type's own name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::Element(name) => name,
            Self::TextView { .. } => "textview",
            Self::Button { .. } => "button",
            Self::Image { .. } => "image",
        }
    }

    /// The names of the types this one derives from, nearest first.
    #[must_use]
    pub const fn base_types(&self) -> &'static [&'static str] {
        match self {
            Self::Button { .. } => &["textview", "widget"],
            _ => &["widget"],
        }
    }

    /// True when the widget is of type `name` or derives from it.
    #[must_use]
    pub fn is_kind(&self, name: &str) -> bool {
        self.type_name() == name || self.base_types().contains(&name)
    }
}

/// Type-specific behavior.
pub trait WidgetBehavior {
    /// The natural content-box size, or `None` when the size comes from the
    /// widget's children.
    fn measure_natural_size(&self) -> Option<(f32, f32)>;

    /// Called once when the widget is created, before it is inserted.
    fn on_init(&self, widget: &mut Widget);

    /// Called during teardown after the children are gone.
    fn on_destroy(&self, widget: &mut Widget);
}

/// Size of `text` with a fixed advance per character: the widest line sets
/// the width, the number of lines sets the height.
#[allow(clippy::cast_precision_loss)]
fn approximate_text_size(text: &str, font_size: f32) -> (f32, f32) {
    let mut lines = 0_usize;
    let mut widest = 0_usize;
    for line in text.lines() {
        lines += 1;
        widest = widest.max(line.chars().count());
    }
    let lines = lines.max(1);
    (
        widest as f32 * font_size * CHAR_WIDTH_RATIO,
        lines as f32 * font_size * LINE_HEIGHT_RATIO,
    )
}

impl WidgetBehavior for WidgetKind {
    fn measure_natural_size(&self) -> Option<(f32, f32)> {
        match self {
            Self::Root | Self::Element(_) => None,
            Self::TextView { text, font_size }
            | Self::Button {
                label: text,
                font_size,
            } => Some(approximate_text_size(text, *font_size)),
            Self::Image { width, height } => Some((*width, *height)),
        }
    }

    fn on_init(&self, widget: &mut Widget) {
        // Types that draw their own content need a surface.
        widget.enable_graph = matches!(
            self,
            Self::TextView { .. } | Self::Button { .. } | Self::Image { .. }
        );
    }

    fn on_destroy(&self, widget: &mut Widget) {
        log::trace!(target: "trellis::tree", "{} type teardown", self.type_name());
        widget.enable_graph = false;
    }
}
