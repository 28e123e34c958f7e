//! Input discovery.
//!
//! Locates the files to aggregate; reading them is left to the caller.

pub mod walker;

pub use walker::{walk_input, InputWalker};
