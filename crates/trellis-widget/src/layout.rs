//! Flow layout.
//!
//! [§ 9.4 Normal flow](https://www.w3.org/TR/CSS2/visuren.html#normal-flow)
//!
//! A single forward pass over the structural children assigns each in-flow
//! child a flow origin in its parent's content space. Block children stack
//! vertically and take a whole line; inline-block children run left to right
//! and wrap when the line overflows. Absolutely positioned children are
//! placed by their offsets instead and only advance their lifecycle here.

use trellis_style::{Display, Position};

use crate::host::WidgetEvent;
use crate::id::WidgetId;
use crate::task::TaskKind;
use crate::tree::WidgetTree;

/// Overflow below this is rounding noise, not a reason to wrap.
const WRAP_TOLERANCE: f32 = 0.01;

/// Cursor state of one layout pass.
#[derive(Debug, Default)]
struct FlowCursor {
    x: f32,
    y: f32,
    /// Height of the tallest item on the current line.
    line_height: f32,
    /// Display of the previous placed child.
    prev_display: Option<Display>,
}

impl FlowCursor {
    /// Place a block of `height` and return its origin.
    fn place_block(&mut self, height: f32) -> (f32, f32) {
        self.x = 0.0;
        if self.prev_display == Some(Display::InlineBlock) {
            self.y += self.line_height;
        }
        let origin = (0.0, self.y);
        self.line_height = height;
        self.y += height;
        origin
    }

    /// Place an inline-block of `width` × `height` on a line at most
    /// `max_width` wide and return its origin.
    fn place_inline(&mut self, width: f32, height: f32, max_width: f32) -> (f32, f32) {
        if self.prev_display == Some(Display::Block) {
            self.x = 0.0;
            self.line_height = 0.0;
        }
        let mut origin_x = self.x;
        self.x += width;
        // An item alone on its line stays there even if it overflows.
        if self.x - max_width >= WRAP_TOLERANCE && origin_x > 0.0 {
            origin_x = 0.0;
            self.y += self.line_height;
            self.x = width;
            self.line_height = 0.0;
        }
        self.line_height = self.line_height.max(height);
        (origin_x, self.y)
    }
}

impl WidgetTree {
    pub(crate) fn update_layout(&mut self, id: WidgetId) {
        let Some(widget) = self.get_live(id) else {
            return;
        };
        let auto_size = widget.has_auto_width() || widget.has_auto_height();
        let max_width = self.compute_max_width(id);
        let mut cursor = FlowCursor::default();
        let mut placed = 0_usize;

        #[cfg(feature = "layout-trace")]
        eprintln!("[FLOW] {id}: max width {max_width}");

        for child_id in self.children_of(id) {
            let Some(child) = self.get_live(child_id) else {
                continue;
            };
            let display = child.computed.display;
            if display == Display::None {
                continue;
            }
            if child.computed.position == Position::Absolute {
                self.advance_lifecycle(child_id, true);
                continue;
            }
            let outer = child.boxes.outer;
            let (origin_x, origin_y) = match display {
                Display::Block => cursor.place_block(outer.height),
                Display::InlineBlock => cursor.place_inline(outer.width, outer.height, max_width),
                Display::None => continue,
            };

            #[cfg(feature = "layout-trace")]
            eprintln!("[FLOW]   {child_id} {display} at ({origin_x}, {origin_y})");

            if let Some(child) = self.get_live_mut(child_id) {
                child.origin_x = origin_x;
                child.origin_y = origin_y;
            }
            self.update_position(child_id);
            self.advance_lifecycle(child_id, true);
            cursor.prev_display = Some(display);
            placed += 1;
        }

        if auto_size {
            self.request_task(id, TaskKind::Resize);
        }
        log::debug!(target: "trellis::layout", "{id}: placed {placed} children");
        self.emit(id, WidgetEvent::AfterLayout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_stack() {
        let mut cursor = FlowCursor::default();
        assert_eq!(cursor.place_block(10.0), (0.0, 0.0));
        cursor.prev_display = Some(Display::Block);
        assert_eq!(cursor.place_block(20.0), (0.0, 10.0));
        cursor.prev_display = Some(Display::Block);
        assert_eq!(cursor.place_block(30.0), (0.0, 30.0));
    }

    #[test]
    fn test_inline_wraps_on_overflow() {
        let mut cursor = FlowCursor::default();
        for expected in [(0.0, 0.0), (40.0, 0.0), (0.0, 10.0)] {
            assert_eq!(cursor.place_inline(40.0, 10.0, 100.0), expected);
            cursor.prev_display = Some(Display::InlineBlock);
        }
    }

    #[test]
    fn test_inline_line_height_is_tallest_item() {
        let mut cursor = FlowCursor::default();
        let _ = cursor.place_inline(40.0, 10.0, 100.0);
        cursor.prev_display = Some(Display::InlineBlock);
        let _ = cursor.place_inline(40.0, 25.0, 100.0);
        cursor.prev_display = Some(Display::InlineBlock);
        assert_eq!(cursor.place_inline(40.0, 5.0, 100.0), (0.0, 25.0));
    }

    #[test]
    fn test_wrap_tolerance() {
        let mut cursor = FlowCursor::default();
        let _ = cursor.place_inline(50.0, 10.0, 100.0);
        cursor.prev_display = Some(Display::InlineBlock);
        // Overflow by less than the tolerance stays on the line.
        assert_eq!(cursor.place_inline(50.005, 10.0, 100.0), (50.0, 0.0));
    }

    #[test]
    fn test_inline_after_block_starts_below() {
        let mut cursor = FlowCursor::default();
        let _ = cursor.place_block(12.0);
        cursor.prev_display = Some(Display::Block);
        assert_eq!(cursor.place_inline(40.0, 10.0, 100.0), (0.0, 12.0));
    }
}
