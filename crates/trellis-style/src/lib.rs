//! Style values and box geometry for the Trellis widget core.
//!
//! This crate is pure data: the keys a style sheet can hold, the values
//! those keys carry, the sheet itself, and the five-rectangle box model
//! that every widget resolves its sheet into. Nothing here knows about the
//! widget tree; resolution that needs a parent lives in `trellis-widget`.

pub mod border;
pub mod color;
pub mod computed;
pub mod geometry;
pub mod key;
pub mod sheet;
pub mod value;

pub use border::{Border, BorderSide, BoxShadow};
pub use color::ColorValue;
pub use computed::ComputedStyle;
pub use geometry::{BoxKind, BoxModel, Edge, EdgeSizes, Rect};
pub use key::{BORDER_KEYS, BOX_SHADOW_KEYS, MARGIN_KEYS, PADDING_KEYS, StyleKey};
pub use sheet::StyleSheet;
pub use value::{
    BorderStyle, BoxSizing, Display, Keyword, Length, PointerEvents, Position, StyleValue,
    VerticalAlign,
};
