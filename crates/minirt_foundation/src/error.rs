//! Error types for minirt container operations.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for minirt container operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument {
            message: message.into(),
        })
    }

    /// Creates an element index error.
    #[must_use]
    pub fn index_out_of_range(index: usize, length: usize) -> Self {
        Self::new(ErrorKind::IndexOutOfRange { index, length })
    }

    /// Creates a sub-view bounds error.
    #[must_use]
    pub fn bounds_out_of_range(start: usize, end: usize, length: usize) -> Self {
        Self::new(ErrorKind::BoundsOutOfRange { start, end, length })
    }

    /// Returns true for malformed construction parameters.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidArgument { .. })
    }

    /// Returns true for any index or range violation.
    #[must_use]
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::IndexOutOfRange { .. } | ErrorKind::BoundsOutOfRange { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Construction parameters do not describe a valid container.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected parameters.
        message: String,
    },

    /// Element index past the visible length.
    #[error("index out of range: {index} (length {length})")]
    IndexOutOfRange {
        /// The index that was accessed.
        index: usize,
        /// The visible length of the sequence.
        length: usize,
    },

    /// Sub-view bounds outside `0 <= start <= end <= length`.
    ///
    /// Grouped with [`ErrorKind::IndexOutOfRange`] by
    /// [`Error::is_index_out_of_range`].
    #[error("slice bounds out of range: [{start}:{end}] with length {length}")]
    BoundsOutOfRange {
        /// Requested start of the view.
        start: usize,
        /// Requested end of the view.
        end: usize,
        /// The bound the range was checked against.
        length: usize,
    },
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the operation that failed.
    pub operation: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failing operation.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operation {
            Some(operation) => write!(f, "in {operation}"),
            None => Ok(()),
        }
    }
}
