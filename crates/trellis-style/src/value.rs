//! Typed style values and the keyword enums they resolve to.
//!
//! A [`StyleValue`] is what the cascade hands back for one property: an
//! absolute length, a ratio of the parent, `auto`, a keyword, a color, a
//! boolean or an integer. The enums below turn keyword values into the
//! closed sets the layout code matches on, falling back to the initial value
//! when a slot is empty or carries the wrong kind of value.

use serde::Serialize;
use strum_macros::Display as StrumDisplay;

use crate::color::ColorValue;

/// One resolved property value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum StyleValue {
    /// An absolute length in pixels.
    Px(f32),
    /// A ratio of the parent's size (`0.5` is 50%).
    Scale(f32),
    /// The `auto` keyword.
    Auto,
    /// Any other keyword.
    Keyword(Keyword),
    /// A color.
    Color(ColorValue),
    /// A boolean flag.
    Bool(bool),
    /// An integer, such as a z-index.
    Int(i32),
}

impl StyleValue {
    /// Short name of the value's kind, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Px(_) => "px",
            Self::Scale(_) => "scale",
            Self::Auto => "auto",
            Self::Keyword(_) => "keyword",
            Self::Color(_) => "color",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
        }
    }
}

/// Keywords accepted by the core's properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum Keyword {
    /// `none`
    None,
    /// `block`
    Block,
    /// `inline-block`
    InlineBlock,
    /// `static`
    Static,
    /// `relative`
    Relative,
    /// `absolute`
    Absolute,
    /// `content-box`
    ContentBox,
    /// `border-box`
    BorderBox,
    /// `top`
    Top,
    /// `middle`
    Middle,
    /// `bottom`
    Bottom,
    /// `visible`
    Visible,
    /// `hidden`
    Hidden,
    /// `solid`
    Solid,
    /// `dashed`
    Dashed,
    /// `dotted`
    Dotted,
}

/// A length before percentage resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub enum Length {
    /// Absolute pixels.
    Px(f32),
    /// Ratio of a basis supplied at resolution time.
    Scale(f32),
    /// No explicit value.
    #[default]
    Auto,
}

impl Length {
    /// Read a length slot. Empty slots, `auto` and non-length values all
    /// read as [`Length::Auto`].
    #[must_use]
    pub const fn from_value(value: Option<&StyleValue>) -> Self {
        match value {
            Some(StyleValue::Px(px)) => Self::Px(*px),
            Some(StyleValue::Scale(scale)) => Self::Scale(*scale),
            _ => Self::Auto,
        }
    }

    /// Resolve against `basis`. `Auto` has no pixel value.
    #[must_use]
    pub fn resolve(self, basis: f32) -> Option<f32> {
        match self {
            Self::Px(px) => Some(px),
            Self::Scale(scale) => Some(scale * basis),
            Self::Auto => None,
        }
    }

    /// True for [`Length::Auto`].
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// True for [`Length::Scale`].
    #[must_use]
    pub const fn is_scale(self) -> bool {
        matches!(self, Self::Scale(_))
    }
}

/// [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum Display {
    /// Generates no box.
    None,
    /// Block-level, starts a new line.
    #[default]
    Block,
    /// Flows along a line and wraps.
    InlineBlock,
}

impl Display {
    /// Read the `display` slot; anything unrecognized is `block`.
    #[must_use]
    pub const fn from_value(value: Option<&StyleValue>) -> Self {
        match value {
            Some(StyleValue::Keyword(Keyword::None)) => Self::None,
            Some(StyleValue::Keyword(Keyword::InlineBlock)) => Self::InlineBlock,
            _ => Self::Block,
        }
    }
}

/// [§ 2 Choosing A Positioning Scheme](https://www.w3.org/TR/css-position-3/#position-property)
///
/// Variants are ordered by stacking priority: at equal z-index an absolute
/// box paints over a relative one, which paints over a static one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, StrumDisplay,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Position {
    /// Placed by flow layout.
    #[default]
    Static,
    /// Placed by flow layout, then offset.
    Relative,
    /// Taken out of flow and placed against the parent's padding box.
    Absolute,
}

impl Position {
    /// Read the `position` slot; anything unrecognized is `static`.
    #[must_use]
    pub const fn from_value(value: Option<&StyleValue>) -> Self {
        match value {
            Some(StyleValue::Keyword(Keyword::Relative)) => Self::Relative,
            Some(StyleValue::Keyword(Keyword::Absolute)) => Self::Absolute,
            _ => Self::Static,
        }
    }
}

/// [§ 4.4 box-sizing](https://www.w3.org/TR/css-sizing-3/#box-sizing)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum BoxSizing {
    /// `width`/`height` size the content box.
    #[default]
    ContentBox,
    /// `width`/`height` size the border box.
    BorderBox,
}

impl BoxSizing {
    /// Read the `box-sizing` slot.
    #[must_use]
    pub const fn from_value(value: Option<&StyleValue>) -> Self {
        match value {
            Some(StyleValue::Keyword(Keyword::BorderBox)) => Self::BorderBox,
            _ => Self::ContentBox,
        }
    }
}

/// Vertical placement of a child inside its parent's content box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum VerticalAlign {
    /// No adjustment.
    #[default]
    Top,
    /// Centered in the parent's content height.
    Middle,
    /// Flush with the bottom of the parent's content box.
    Bottom,
}

impl VerticalAlign {
    /// Read the `vertical-align` slot.
    #[must_use]
    pub const fn from_value(value: Option<&StyleValue>) -> Self {
        match value {
            Some(StyleValue::Keyword(Keyword::Middle)) => Self::Middle,
            Some(StyleValue::Keyword(Keyword::Bottom)) => Self::Bottom,
            _ => Self::Top,
        }
    }
}

/// Whether a widget is a target for pointer input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum PointerEvents {
    /// Receives pointer input.
    #[default]
    Auto,
    /// Transparent to pointer input.
    None,
}

impl PointerEvents {
    /// Read the `pointer-events` slot.
    #[must_use]
    pub const fn from_value(value: Option<&StyleValue>) -> Self {
        match value {
            Some(StyleValue::Keyword(Keyword::None)) => Self::None,
            _ => Self::Auto,
        }
    }
}

/// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum BorderStyle {
    /// No border is drawn.
    #[default]
    None,
    /// A single solid line.
    Solid,
    /// A series of dashes.
    Dashed,
    /// A series of dots.
    Dotted,
}

impl BorderStyle {
    /// Read a `border-*-style` slot.
    #[must_use]
    pub const fn from_value(value: Option<&StyleValue>) -> Self {
        match value {
            Some(StyleValue::Keyword(Keyword::Solid)) => Self::Solid,
            Some(StyleValue::Keyword(Keyword::Dashed)) => Self::Dashed,
            Some(StyleValue::Keyword(Keyword::Dotted)) => Self::Dotted,
            _ => Self::None,
        }
    }
}
