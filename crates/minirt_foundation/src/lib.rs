//! Core runtime containers and errors for minirt.
//!
//! This crate provides:
//! - [`Sequence`] - Growable sequences whose views alias a shared store
//! - [`AssocMap`] - Hash map with an explicit uninitialized state
//! - [`ErrorChain`] - Context-wrapping errors with sentinel identity checks
//! - [`GrowthPolicy`] - Reallocation sizing for sequence appends
//! - [`Error`] - Errors for malformed container operations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod assoc;
pub mod chain;
pub mod error;
pub mod growth;
pub mod sequence;

pub use assoc::AssocMap;
pub use chain::{ErrorChain, WrapMode};
pub use error::{Error, ErrorContext, ErrorKind};
pub use growth::GrowthPolicy;
pub use sequence::{Sequence, copy_into};

/// Result type for minirt container operations.
pub type Result<T> = std::result::Result<T, Error>;
