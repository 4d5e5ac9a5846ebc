//! Output generation: dataset files and the run summary.
//!
//! # Submodules
//!
//! - [`json`]: Writes checkpoints and the final per-language and combined
//!   article arrays
//! - [`summary`]: Computes and logs per-language statistics

pub mod json;
pub mod summary;
