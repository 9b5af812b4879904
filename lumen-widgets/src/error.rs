use thiserror::Error;

/// Errors raised while wiring widgets together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// A checkbox was attached as a child of its own group.
    #[error("A checkbox cannot be a child of its own group")]
    SelfAttachment,

    /// The checkbox is already a child of this group.
    #[error("Checkbox is already attached to this group")]
    AlreadyAttached,

    /// The group's parent checkbox has been dropped.
    #[error("The group's parent checkbox no longer exists")]
    ParentGone,

    /// An index was outside the item list.
    #[error("Index {index} is out of range for {len} items")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of items.
        len: usize,
    },
}

/// Result type for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;
