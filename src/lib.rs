//! minirt - a mini runtime library
//!
//! This crate re-exports the layers of the minirt system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 0: minirt_foundation — Sequence, AssocMap, ErrorChain, Error
//! ```

pub use minirt_foundation as foundation;
