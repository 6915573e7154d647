//! Border and box-shadow values
//!
//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)
//!
//! Both groups are resolved from a sheet by walking a fixed table that maps
//! each key of the group to a setter, so adding a property means adding a
//! row rather than another branch.

use serde::Serialize;

use crate::color::ColorValue;
use crate::geometry::{EdgeSizes, Rect};
use crate::key::StyleKey;
use crate::sheet::StyleSheet;
use crate::value::{BorderStyle, Keyword, StyleValue};

/// Applies one sheet value to a [`Border`]. The `f32` is the widget's own
/// border-box width, the basis for percentage radii.
type BorderSetter = fn(&mut Border, &StyleValue, f32);

/// Applies one sheet value to a [`BoxShadow`].
type ShadowSetter = fn(&mut BoxShadow, &StyleValue);

/// [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
///
/// One side of a border: width, style, and color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BorderSide {
    /// [§ 4.3 'border-width'](https://www.w3.org/TR/css-backgrounds-3/#border-width)
    pub width: f32,
    /// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
    pub style: BorderStyle,
    /// [§ 4.1 'border-color'](https://www.w3.org/TR/css-backgrounds-3/#border-color)
    pub color: ColorValue,
}

/// The four border sides and the four corner radii.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Border {
    /// Top side.
    pub top: BorderSide,
    /// Right side.
    pub right: BorderSide,
    /// Bottom side.
    pub bottom: BorderSide,
    /// Left side.
    pub left: BorderSide,
    /// [§ 5.1 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
    pub top_left_radius: f32,
    /// Top-right corner radius.
    pub top_right_radius: f32,
    /// Bottom-right corner radius.
    pub bottom_right_radius: f32,
    /// Bottom-left corner radius.
    pub bottom_left_radius: f32,
}

fn px(value: &StyleValue) -> f32 {
    match value {
        StyleValue::Px(v) => v.max(0.0),
        _ => 0.0,
    }
}

fn radius(value: &StyleValue, own_width: f32) -> f32 {
    match value {
        StyleValue::Px(v) => v.max(0.0),
        StyleValue::Scale(scale) => (scale * own_width).max(0.0),
        _ => 0.0,
    }
}

fn color(value: &StyleValue) -> ColorValue {
    match value {
        StyleValue::Color(color) => *color,
        _ => ColorValue::TRANSPARENT,
    }
}

fn border_style(value: &StyleValue) -> BorderStyle {
    BorderStyle::from_value(Some(value))
}

const BORDER_SETTERS: [(StyleKey, BorderSetter); 16] = [
    (StyleKey::BorderTopWidth, |b, v, _| b.top.width = px(v)),
    (StyleKey::BorderTopStyle, |b, v, _| b.top.style = border_style(v)),
    (StyleKey::BorderTopColor, |b, v, _| b.top.color = color(v)),
    (StyleKey::BorderRightWidth, |b, v, _| b.right.width = px(v)),
    (StyleKey::BorderRightStyle, |b, v, _| b.right.style = border_style(v)),
    (StyleKey::BorderRightColor, |b, v, _| b.right.color = color(v)),
    (StyleKey::BorderBottomWidth, |b, v, _| b.bottom.width = px(v)),
    (StyleKey::BorderBottomStyle, |b, v, _| {
        b.bottom.style = border_style(v);
    }),
    (StyleKey::BorderBottomColor, |b, v, _| b.bottom.color = color(v)),
    (StyleKey::BorderLeftWidth, |b, v, _| b.left.width = px(v)),
    (StyleKey::BorderLeftStyle, |b, v, _| b.left.style = border_style(v)),
    (StyleKey::BorderLeftColor, |b, v, _| b.left.color = color(v)),
    (StyleKey::BorderTopLeftRadius, |b, v, w| {
        b.top_left_radius = radius(v, w);
    }),
    (StyleKey::BorderTopRightRadius, |b, v, w| {
        b.top_right_radius = radius(v, w);
    }),
    (StyleKey::BorderBottomRightRadius, |b, v, w| {
        b.bottom_right_radius = radius(v, w);
    }),
    (StyleKey::BorderBottomLeftRadius, |b, v, w| {
        b.bottom_left_radius = radius(v, w);
    }),
];

impl Border {
    /// A uniform border on all four sides.
    #[must_use]
    pub const fn uniform(width: f32, style: BorderStyle, color: ColorValue) -> Self {
        let side = BorderSide {
            width,
            style,
            color,
        };
        Self {
            top: side,
            right: side,
            bottom: side,
            left: side,
            top_left_radius: 0.0,
            top_right_radius: 0.0,
            bottom_right_radius: 0.0,
            bottom_left_radius: 0.0,
        }
    }

    /// Resolve the border group of `sheet`. Percentage radii are taken
    /// against `own_width`.
    #[must_use]
    pub fn from_sheet(sheet: &StyleSheet, own_width: f32) -> Self {
        let mut border = Self::default();
        for (key, apply) in BORDER_SETTERS {
            if let Some(value) = sheet.get(key) {
                apply(&mut border, value, own_width);
            }
        }
        border
    }

    /// Write this border into `sheet` as individual keys.
    pub fn write_to(&self, sheet: &mut StyleSheet) {
        let sides = [
            (
                self.top,
                StyleKey::BorderTopWidth,
                StyleKey::BorderTopStyle,
                StyleKey::BorderTopColor,
            ),
            (
                self.right,
                StyleKey::BorderRightWidth,
                StyleKey::BorderRightStyle,
                StyleKey::BorderRightColor,
            ),
            (
                self.bottom,
                StyleKey::BorderBottomWidth,
                StyleKey::BorderBottomStyle,
                StyleKey::BorderBottomColor,
            ),
            (
                self.left,
                StyleKey::BorderLeftWidth,
                StyleKey::BorderLeftStyle,
                StyleKey::BorderLeftColor,
            ),
        ];
        for (side, width_key, style_key, color_key) in sides {
            sheet.set(width_key, StyleValue::Px(side.width));
            sheet.set(style_key, style_keyword(side.style));
            sheet.set(color_key, StyleValue::Color(side.color));
        }
        let radii = [
            (StyleKey::BorderTopLeftRadius, self.top_left_radius),
            (StyleKey::BorderTopRightRadius, self.top_right_radius),
            (StyleKey::BorderBottomRightRadius, self.bottom_right_radius),
            (StyleKey::BorderBottomLeftRadius, self.bottom_left_radius),
        ];
        for (key, radius) in radii {
            sheet.set(key, StyleValue::Px(radius));
        }
    }

    /// The four widths as edge sizes.
    #[must_use]
    pub const fn widths(&self) -> EdgeSizes {
        EdgeSizes {
            top: self.top.width,
            right: self.right.width,
            bottom: self.bottom.width,
            left: self.left.width,
        }
    }

    /// True when any corner is rounded.
    #[must_use]
    pub fn has_radius(&self) -> bool {
        self.top_left_radius > 0.0
            || self.top_right_radius > 0.0
            || self.bottom_right_radius > 0.0
            || self.bottom_left_radius > 0.0
    }

    /// The regions painted by each side of a `width` × `height` border box,
    /// in border-box-local coordinates, ordered top, right, bottom, left.
    /// A strip is as thick as its side or as the larger adjoining radius,
    /// so rounded corners are covered.
    #[must_use]
    pub fn strips(&self, width: f32, height: f32) -> [Rect; 4] {
        let top = self
            .top
            .width
            .max(self.top_left_radius.max(self.top_right_radius));
        let right = self
            .right
            .width
            .max(self.top_right_radius.max(self.bottom_right_radius));
        let bottom = self
            .bottom
            .width
            .max(self.bottom_left_radius.max(self.bottom_right_radius));
        let left = self
            .left
            .width
            .max(self.top_left_radius.max(self.bottom_left_radius));
        [
            Rect::new(0.0, 0.0, width, top),
            Rect::new(width - right, 0.0, right, height),
            Rect::new(0.0, height - bottom, width, bottom),
            Rect::new(0.0, 0.0, left, height),
        ]
    }
}

const fn style_keyword(style: BorderStyle) -> StyleValue {
    StyleValue::Keyword(match style {
        BorderStyle::None => Keyword::None,
        BorderStyle::Solid => Keyword::Solid,
        BorderStyle::Dashed => Keyword::Dashed,
        BorderStyle::Dotted => Keyword::Dotted,
    })
}

/// [§ 6.1 'box-shadow'](https://www.w3.org/TR/css-backgrounds-3/#box-shadow)
///
/// "The 'box-shadow' property attaches one or more drop-shadows to the box."
///
/// Only a single outer shadow is supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoxShadow {
    /// Horizontal offset. Positive = right.
    pub x: f32,
    /// Vertical offset. Positive = down.
    pub y: f32,
    /// Blur radius. Must be >= 0. Default 0.
    pub blur: f32,
    /// Spread radius. Default 0.
    pub spread: f32,
    /// Shadow color.
    pub color: ColorValue,
}

fn signed_px(value: &StyleValue) -> f32 {
    match value {
        StyleValue::Px(v) => *v,
        _ => 0.0,
    }
}

const BOX_SHADOW_SETTERS: [(StyleKey, ShadowSetter); 5] = [
    (StyleKey::BoxShadowX, |s, v| s.x = signed_px(v)),
    (StyleKey::BoxShadowY, |s, v| s.y = signed_px(v)),
    (StyleKey::BoxShadowBlur, |s, v| s.blur = px(v)),
    (StyleKey::BoxShadowSpread, |s, v| s.spread = signed_px(v)),
    (StyleKey::BoxShadowColor, |s, v| s.color = color(v)),
];

impl BoxShadow {
    /// Resolve the shadow group of `sheet`.
    #[must_use]
    pub fn from_sheet(sheet: &StyleSheet) -> Self {
        let mut shadow = Self::default();
        for (key, apply) in BOX_SHADOW_SETTERS {
            if let Some(value) = sheet.get(key) {
                apply(&mut shadow, value);
            }
        }
        shadow
    }

    /// Write this shadow into `sheet` as individual keys.
    pub fn write_to(&self, sheet: &mut StyleSheet) {
        sheet.set(StyleKey::BoxShadowX, StyleValue::Px(self.x));
        sheet.set(StyleKey::BoxShadowY, StyleValue::Px(self.y));
        sheet.set(StyleKey::BoxShadowBlur, StyleValue::Px(self.blur));
        sheet.set(StyleKey::BoxShadowSpread, StyleValue::Px(self.spread));
        sheet.set(StyleKey::BoxShadowColor, StyleValue::Color(self.color));
    }

    /// How far the shadow reaches past an unshifted border box.
    #[must_use]
    pub fn extent(&self) -> f32 {
        (self.blur + self.spread).max(0.0)
    }

    /// How far the graph box reaches past the border box on each side once
    /// the offset is applied. A side the shadow is pushed away from needs
    /// no room.
    ///
    /// ```text
    /// left  = max(0, extent - x)    right  = max(0, extent + x)
    /// top   = max(0, extent - y)    bottom = max(0, extent + y)
    /// ```
    #[must_use]
    pub fn edges(&self) -> EdgeSizes {
        let extent = self.extent();
        EdgeSizes {
            top: (extent - self.y).max(0.0),
            right: (extent + self.x).max(0.0),
            bottom: (extent + self.y).max(0.0),
            left: (extent - self.x).max(0.0),
        }
    }

    /// True when offset, blur and spread match, so the graph box size is
    /// unaffected by switching between the two shadows.
    #[must_use]
    pub fn same_geometry(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.blur == other.blur
            && self.spread == other.spread
    }
}
