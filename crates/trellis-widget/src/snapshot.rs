//! Tree dumps for debugging and tests.

use std::fmt::Write as _;

use serde::Serialize;
use trellis_style::BoxModel;

use crate::id::WidgetId;
use crate::tree::WidgetTree;
use crate::widget::WidgetState;

/// A serializable copy of one widget and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSnapshot {
    /// Handle of the widget.
    pub id: WidgetId,
    /// Type name.
    pub kind: String,
    /// Unique id, if any.
    pub name: Option<String>,
    /// Lifecycle state.
    pub state: WidgetState,
    /// Position among siblings.
    pub index: usize,
    /// Visible and displayed.
    pub visible: bool,
    /// The five rectangles.
    pub boxes: BoxModel,
    /// Class names, sorted.
    pub classes: Vec<String>,
    /// Status tags, sorted.
    pub status: Vec<String>,
    /// Children in structural order.
    pub children: Vec<WidgetSnapshot>,
}

impl WidgetTree {
    /// Copy the subtree under `id`.
    #[must_use]
    pub fn snapshot(&self, id: WidgetId) -> Option<WidgetSnapshot> {
        let widget = self.get(id)?;
        Some(WidgetSnapshot {
            id,
            kind: widget.kind.type_name().to_string(),
            name: widget.name.clone(),
            state: widget.state,
            index: widget.index,
            visible: widget.computed.visible,
            boxes: widget.boxes,
            classes: widget.classes.iter().cloned().collect(),
            status: widget.status.iter().cloned().collect(),
            children: widget
                .children
                .iter()
                .filter_map(|child| self.snapshot(*child))
                .collect(),
        })
    }

    /// Render the subtree under `id` as an indented outline, one widget per
    /// line.
    #[must_use]
    pub fn dump_tree(&self, id: WidgetId) -> String {
        let mut out = String::new();
        self.dump_node(id, "", true, &mut out);
        out
    }

    fn dump_node(&self, id: WidgetId, prefix: &str, last: bool, out: &mut String) {
        let Some(widget) = self.get(id) else {
            return;
        };
        let is_top = prefix.is_empty() && id == self.root();
        let branch = match (is_top, last) {
            (true, _) => "",
            (false, true) => "└─ ",
            (false, false) => "├─ ",
        };
        let b = widget.boxes.border;
        let _ = writeln!(
            out,
            "{prefix}{branch}{}{} xy:({:.2},{:.2}) size:({:.2},{:.2}) visible:{}",
            widget.kind.type_name(),
            widget.name.as_deref().map(|n| format!("#{n}")).unwrap_or_default(),
            b.x,
            b.y,
            b.width,
            b.height,
            widget.computed.visible,
        );
        let child_prefix = match (is_top, last) {
            (true, _) => String::new(),
            (false, true) => format!("{prefix}   "),
            (false, false) => format!("{prefix}│  "),
        };
        let count = widget.children.len();
        for (i, child) in widget.children.iter().enumerate() {
            self.dump_node(*child, &child_prefix, i + 1 == count, out);
        }
    }

    /// Log the outline of the subtree under `id` at debug level.
    pub fn print_tree(&self, id: WidgetId) {
        for line in self.dump_tree(id).lines() {
            log::debug!(target: "trellis::tree", "{line}");
        }
    }
}
