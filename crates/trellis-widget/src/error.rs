//! Errors returned by tree mutators.

use thiserror::Error;

use crate::id::WidgetId;

/// Failure of a structural or identity operation.
///
/// Every mutator validates before it touches the tree, so an `Err` always
/// means the tree is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The handle is stale, was never issued, or names a widget already
    /// queued for teardown.
    #[error("widget {0} does not exist or is being destroyed")]
    InvalidWidget(WidgetId),

    /// A widget was inserted into itself.
    #[error("cannot insert a widget into itself")]
    SelfInsertion,

    /// A widget was inserted into one of its own descendants.
    #[error("cannot insert a widget into its own descendant")]
    CyclicInsertion,

    /// The operation needs a parent and the widget has none.
    #[error("widget {0} has no parent")]
    Detached(WidgetId),

    /// Another widget already holds this identifier.
    #[error("identifier `{0}` is already registered")]
    DuplicateIdentity(String),

    /// The surface provider could not allocate a backing store.
    #[error("paint surface allocation failed: {0}")]
    AllocationFailure(String),
}

impl WidgetError {
    /// A distinct negative status code per failure kind, for callers that
    /// report results across an FFI or scripting boundary.
    #[must_use]
    pub const fn status(&self) -> i32 {
        match self {
            Self::InvalidWidget(_) => -1,
            Self::SelfInsertion => -2,
            Self::CyclicInsertion => -3,
            Self::Detached(_) => -4,
            Self::DuplicateIdentity(_) => -5,
            Self::AllocationFailure(_) => -6,
        }
    }
}
