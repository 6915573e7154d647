//! Style property keys.
//!
//! Every property the widget core understands has a fixed slot. Related
//! properties are contiguous so each group can be resolved by walking a
//! fixed key range rather than scanning the whole sheet.

use serde::Serialize;
use strum_macros::{Display, EnumCount, EnumIter};

/// A style property understood by the widget core.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumCount, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum StyleKey {
    /// `visibility`: `visible` or `hidden`.
    Visibility,
    /// `display`: `none`, `block` or `inline-block`.
    Display,
    /// `position`: `static`, `relative` or `absolute`.
    Position,
    /// `left` offset.
    Left,
    /// `top` offset.
    Top,
    /// `right` offset.
    Right,
    /// `bottom` offset.
    Bottom,
    /// `z-index`.
    ZIndex,
    /// `opacity`, a ratio in `[0, 1]`.
    Opacity,
    /// `width`.
    Width,
    /// `height`.
    Height,
    /// `min-width`.
    MinWidth,
    /// `min-height`.
    MinHeight,
    /// `max-width`.
    MaxWidth,
    /// `max-height`.
    MaxHeight,
    /// `box-sizing`: `content-box` or `border-box`.
    BoxSizing,
    /// `vertical-align`: `top`, `middle` or `bottom`.
    VerticalAlign,
    /// `margin-top`.
    MarginTop,
    /// `margin-right`.
    MarginRight,
    /// `margin-bottom`.
    MarginBottom,
    /// `margin-left`.
    MarginLeft,
    /// `padding-top`.
    PaddingTop,
    /// `padding-right`.
    PaddingRight,
    /// `padding-bottom`.
    PaddingBottom,
    /// `padding-left`.
    PaddingLeft,
    /// `border-top-width`.
    BorderTopWidth,
    /// `border-top-style`.
    BorderTopStyle,
    /// `border-top-color`.
    BorderTopColor,
    /// `border-right-width`.
    BorderRightWidth,
    /// `border-right-style`.
    BorderRightStyle,
    /// `border-right-color`.
    BorderRightColor,
    /// `border-bottom-width`.
    BorderBottomWidth,
    /// `border-bottom-style`.
    BorderBottomStyle,
    /// `border-bottom-color`.
    BorderBottomColor,
    /// `border-left-width`.
    BorderLeftWidth,
    /// `border-left-style`.
    BorderLeftStyle,
    /// `border-left-color`.
    BorderLeftColor,
    /// `border-top-left-radius`.
    BorderTopLeftRadius,
    /// `border-top-right-radius`.
    BorderTopRightRadius,
    /// `border-bottom-right-radius`.
    BorderBottomRightRadius,
    /// `border-bottom-left-radius`.
    BorderBottomLeftRadius,
    /// Horizontal shadow offset.
    BoxShadowX,
    /// Vertical shadow offset.
    BoxShadowY,
    /// Shadow blur radius.
    BoxShadowBlur,
    /// Shadow spread radius.
    BoxShadowSpread,
    /// Shadow color.
    BoxShadowColor,
    /// `background-color`.
    BackgroundColor,
    /// `pointer-events`: `auto` or `none`.
    PointerEvents,
    /// Whether the widget can take keyboard focus.
    Focusable,
}

impl StyleKey {
    /// Position of this key's slot in a [`StyleSheet`](crate::StyleSheet).
    #[must_use]
    pub const fn slot(self) -> usize {
        self as usize
    }
}

/// The four margin keys in top, right, bottom, left order.
pub const MARGIN_KEYS: [StyleKey; 4] = [
    StyleKey::MarginTop,
    StyleKey::MarginRight,
    StyleKey::MarginBottom,
    StyleKey::MarginLeft,
];

/// The four padding keys in top, right, bottom, left order.
pub const PADDING_KEYS: [StyleKey; 4] = [
    StyleKey::PaddingTop,
    StyleKey::PaddingRight,
    StyleKey::PaddingBottom,
    StyleKey::PaddingLeft,
];

/// The border keys: width/style/color per edge, then the four radii.
pub const BORDER_KEYS: [StyleKey; 16] = [
    StyleKey::BorderTopWidth,
    StyleKey::BorderTopStyle,
    StyleKey::BorderTopColor,
    StyleKey::BorderRightWidth,
    StyleKey::BorderRightStyle,
    StyleKey::BorderRightColor,
    StyleKey::BorderBottomWidth,
    StyleKey::BorderBottomStyle,
    StyleKey::BorderBottomColor,
    StyleKey::BorderLeftWidth,
    StyleKey::BorderLeftStyle,
    StyleKey::BorderLeftColor,
    StyleKey::BorderTopLeftRadius,
    StyleKey::BorderTopRightRadius,
    StyleKey::BorderBottomRightRadius,
    StyleKey::BorderBottomLeftRadius,
];

/// The box-shadow keys.
pub const BOX_SHADOW_KEYS: [StyleKey; 5] = [
    StyleKey::BoxShadowX,
    StyleKey::BoxShadowY,
    StyleKey::BoxShadowBlur,
    StyleKey::BoxShadowSpread,
    StyleKey::BoxShadowColor,
];
