//! archgen - Flutter clean-architecture scaffolding
//!
//! Materializes a fixed tree of directories and empty placeholder files
//! under a Flutter project's `lib/` directory.

pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod manifest;
pub mod scaffold;

pub use error::{Result, ScaffoldError};
