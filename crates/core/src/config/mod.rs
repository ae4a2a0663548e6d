//! Configuration loading and schema definitions
//!
//! Project-level settings for flavor rendering, catalog location and logging.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_CANDIDATES};
pub use schema::*;
