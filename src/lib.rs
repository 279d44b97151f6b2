#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. script::ScriptError)
    clippy::module_name_repetitions
)]

//! # Pencil
//!
//! A model of a pencil writing on, erasing from and editing a sheet of paper.
//!
//! A [`Pencil`](pencil::Pencil) carries three finite budgets:
//! - **Durability**: graphite spent per character written
//! - **Length**: how many more times it can be sharpened back to full point
//! - **Eraser durability**: characters it can still erase
//!
//! The [`Paper`](paper::Paper) knows nothing about pencils; every pencil
//! operation borrows the sheet it acts on.
//!
//! ## Modules
//!
//! - [`paper`]: The character buffer and its position primitives
//! - [`pencil`]: Cost model, sharpening, erasing and editing
//! - [`script`]: Line-based command scripts
//! - [`config`]: Layered rc-file defaults
//! - [`error`]: Library error type

pub mod config;
pub mod error;
pub mod paper;
pub mod pencil;
pub mod script;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::paper::Paper;
    pub use crate::pencil::{Pencil, PencilStatus, CONFLICT_MARKER};
}
