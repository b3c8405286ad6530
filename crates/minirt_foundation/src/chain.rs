//! Chained error values with identity-based sentinel matching.
//!
//! An [`ErrorChain`] is an immutable error that may wrap another error as
//! its cause. Layers of context are added by wrapping, and a caller can ask
//! whether a particular sentinel error appears anywhere in the chain with
//! [`ErrorChain::is`]. Matching compares identity, never message text: two
//! errors built separately from the same text are different errors.
//!
//! ```
//! use std::sync::LazyLock;
//! use minirt_foundation::ErrorChain;
//!
//! static NOT_FOUND: LazyLock<ErrorChain> = LazyLock::new(|| ErrorChain::new("not found"));
//!
//! let repo = ErrorChain::wrap("in repository layer", NOT_FOUND.clone());
//! let service = ErrorChain::wrap("in service layer", repo);
//!
//! assert!(service.is(&NOT_FOUND));
//! assert_eq!(
//!     service.to_string(),
//!     "in service layer: in repository layer: not found"
//! );
//! ```

use std::fmt;
use std::sync::Arc;

/// How a wrapping layer renders its cause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    /// Display the message followed by the cause's text.
    Full,
    /// Display only the message. The cause is still reachable.
    ContextOnly,
}

#[derive(Debug)]
enum Node {
    Leaf {
        message: String,
    },
    Wrapped {
        message: String,
        mode: WrapMode,
        cause: ErrorChain,
    },
}

/// An immutable, cheaply cloneable error with an optional cause.
///
/// Clones are the same error: they compare equal and match each other in
/// [`is`](Self::is). Equality is identity, not message text.
#[derive(Clone)]
pub struct ErrorChain(Arc<Node>);

impl ErrorChain {
    /// Creates a leaf error with no cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self(Arc::new(Node::Leaf {
            message: message.into(),
        }))
    }

    /// Wraps `cause`, displaying as `"{message}: {cause}"`.
    pub fn wrap(message: impl Into<String>, cause: ErrorChain) -> Self {
        Self::wrap_with(WrapMode::Full, message, cause)
    }

    /// Wraps `cause`, displaying only `message`.
    ///
    /// The cause stays reachable through [`unwrap`](Self::unwrap) and
    /// [`is`](Self::is) even though its text is hidden.
    pub fn context(message: impl Into<String>, cause: ErrorChain) -> Self {
        Self::wrap_with(WrapMode::ContextOnly, message, cause)
    }

    /// Wraps `cause` in the given display mode.
    pub fn wrap_with(mode: WrapMode, message: impl Into<String>, cause: ErrorChain) -> Self {
        Self(Arc::new(Node::Wrapped {
            message: message.into(),
            mode,
            cause,
        }))
    }

    /// Creates a leaf whose message embeds the text of `cause`.
    ///
    /// The result reads like [`wrap`](Self::wrap) but does not keep the
    /// cause: it unwraps to nothing and matches no sentinel.
    pub fn opaque(message: impl fmt::Display, cause: &ErrorChain) -> Self {
        Self::new(format!("{message}: {cause}"))
    }

    /// Returns this layer's own message, without any cause text.
    #[must_use]
    pub fn message(&self) -> &str {
        match &*self.0 {
            Node::Leaf { message } | Node::Wrapped { message, .. } => message,
        }
    }

    /// Returns the wrap mode, or `None` for a leaf.
    #[must_use]
    pub fn mode(&self) -> Option<WrapMode> {
        match &*self.0 {
            Node::Leaf { .. } => None,
            Node::Wrapped { mode, .. } => Some(*mode),
        }
    }

    /// Returns the directly wrapped cause.
    #[must_use]
    pub fn unwrap(&self) -> Option<&ErrorChain> {
        match &*self.0 {
            Node::Leaf { .. } => None,
            Node::Wrapped { cause, .. } => Some(cause),
        }
    }

    /// Returns true if `sentinel` is this error or any error in its chain.
    #[must_use]
    pub fn is(&self, sentinel: &ErrorChain) -> bool {
        self.chain().any(|err| err.same_as(sentinel))
    }

    /// Returns true if both values are the same error.
    #[must_use]
    pub fn same_as(&self, other: &ErrorChain) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Iterates over this error and each cause, outermost first.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Returns the innermost error of the chain.
    #[must_use]
    pub fn root_cause(&self) -> &ErrorChain {
        let mut current = self;
        while let Some(cause) = current.unwrap() {
            current = cause;
        }
        current
    }
}

/// Iterator over the layers of an [`ErrorChain`].
pub struct Chain<'a> {
    next: Option<&'a ErrorChain>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a ErrorChain;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.unwrap();
        Some(current)
    }
}

impl fmt::Display for ErrorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in self.chain() {
            match &*err.0 {
                Node::Leaf { message }
                | Node::Wrapped {
                    message,
                    mode: WrapMode::ContextOnly,
                    ..
                } => return f.write_str(message),
                Node::Wrapped {
                    message,
                    mode: WrapMode::Full,
                    ..
                } => write!(f, "{message}: ")?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ErrorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for err in self.chain() {
            list.entry(&err.message());
        }
        list.finish()
    }
}

impl PartialEq for ErrorChain {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for ErrorChain {}

impl Node {
    /// Empties this node, returning the cause it held.
    fn take_cause(&mut self) -> Option<ErrorChain> {
        let empty = Node::Leaf {
            message: String::new(),
        };
        match std::mem::replace(self, empty) {
            Node::Leaf { .. } => None,
            Node::Wrapped { cause, .. } => Some(cause),
        }
    }
}

// Unlinks uniquely held layers one at a time so that dropping a long chain
// uses constant stack.
impl Drop for ErrorChain {
    fn drop(&mut self) {
        let mut next = Arc::get_mut(&mut self.0).and_then(Node::take_cause);
        while let Some(mut layer) = next {
            next = Arc::get_mut(&mut layer.0).and_then(Node::take_cause);
        }
    }
}

impl std::error::Error for ErrorChain {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.unwrap().map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl From<crate::Error> for ErrorChain {
    fn from(err: crate::Error) -> Self {
        Self::new(err.to_string())
    }
}
