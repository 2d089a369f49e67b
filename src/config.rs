//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive runtime
//! behavior and helpers to resolve the config, log and home paths.

mod load;
mod schema;

pub use load::{default_log_path, home_dir};
pub use schema::*;
