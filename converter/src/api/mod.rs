//! Boundary module.
//!
//! Logging for the pipeline and the persistence boundary used by dataset editors.

pub mod logs;
pub mod save;
pub mod types;

pub use logs::*;
pub use save::{handle_save, save_dataset};
pub use types::*;
