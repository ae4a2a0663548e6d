//! CLI utilities for flavorkit
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Aligned key/value listings

#![warn(missing_docs)]

pub mod output;
