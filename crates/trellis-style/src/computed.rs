//! Computed style values.
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//!
//! "The computed value is the result of resolving the specified value as
//! defined in the 'Computed Value' line of the property definition table."
//!
//! A [`ComputedStyle`] holds what a widget's recomputation tasks resolved
//! from its sheet: keyword enums, flags, and pixel offsets. Sizes are not
//! stored here; they live in the widget's box model.

use serde::Serialize;

use crate::border::{Border, BoxShadow};
use crate::color::ColorValue;
use crate::value::{BoxSizing, Display, PointerEvents, Position, VerticalAlign};

/// Concrete style of one widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComputedStyle {
    /// [§ 2 The display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
    pub display: Display,
    /// The `visibility` flag AND `display != none`.
    pub visible: bool,
    /// [§ 2 position](https://www.w3.org/TR/css-position-3/#position-property)
    pub position: Position,
    /// [§ 4.4 box-sizing](https://www.w3.org/TR/css-sizing-3/#box-sizing)
    pub box_sizing: BoxSizing,
    /// Vertical placement inside the parent's content box.
    pub vertical_align: VerticalAlign,
    /// Pointer-input participation.
    pub pointer_events: PointerEvents,
    /// Whether the widget can take keyboard focus.
    pub focusable: bool,
    /// [§ 3.2 opacity](https://www.w3.org/TR/css-color-4/#transparency)
    /// "Any values outside the range 0 (fully transparent) to 1 (fully
    /// opaque) will be clamped to this range."
    pub opacity: f32,
    /// Stack level among siblings.
    pub z_index: i32,
    /// Resolved `left` offset in pixels, if specified.
    pub left: Option<f32>,
    /// Resolved `top` offset in pixels, if specified.
    pub top: Option<f32>,
    /// Resolved `right` offset in pixels, if specified.
    pub right: Option<f32>,
    /// Resolved `bottom` offset in pixels, if specified.
    pub bottom: Option<f32>,
    /// Lower bound on the border-box width.
    pub min_width: Option<f32>,
    /// Upper bound on the border-box width.
    pub max_width: Option<f32>,
    /// Lower bound on the border-box height.
    pub min_height: Option<f32>,
    /// Upper bound on the border-box height.
    pub max_height: Option<f32>,
    /// `margin-left: auto`.
    pub margin_left_auto: bool,
    /// `margin-right: auto`.
    pub margin_right_auto: bool,
    /// Border sides and radii.
    pub border: Border,
    /// Outer shadow.
    pub shadow: BoxShadow,
    /// [§ 3.2 'background-color'](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    pub background_color: ColorValue,
}

impl Default for ComputedStyle {
    /// Initial values for every property.
    fn default() -> Self {
        Self {
            display: Display::Block,
            visible: true,
            position: Position::Static,
            box_sizing: BoxSizing::ContentBox,
            vertical_align: VerticalAlign::Top,
            pointer_events: PointerEvents::Auto,
            focusable: true,
            opacity: 1.0,
            z_index: 0,
            left: None,
            top: None,
            right: None,
            bottom: None,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            margin_left_auto: false,
            margin_right_auto: false,
            border: Border::default(),
            shadow: BoxShadow::default(),
            background_color: ColorValue::TRANSPARENT,
        }
    }
}

impl ComputedStyle {
    /// True when the widget takes part in flow layout.
    #[must_use]
    pub fn in_flow(&self) -> bool {
        self.position != Position::Absolute && self.display != Display::None
    }

    /// True when the widget is block-level and in flow.
    #[must_use]
    pub fn is_block_in_flow(&self) -> bool {
        self.display == Display::Block && self.position != Position::Absolute
    }

    /// True when a paint surface for this style needs an alpha channel.
    #[must_use]
    pub fn needs_alpha(&self) -> bool {
        self.border.has_radius() || !self.background_color.is_opaque() || self.shadow.blur > 0.0
    }
}
