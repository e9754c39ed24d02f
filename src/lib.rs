//! jutils - a grab-bag of personal utilities
//!
//! This crate provides:
//! - [`tree`]: an N-ary tree collection with unique sibling values and
//!   box-drawing rendering
//! - [`html`]: tag balance checks and a toy document tree builder
//! - [`commons`]: numeric helpers, a dynamically typed value and background
//!   thread runners

pub mod commons;
pub mod config;
pub mod error;
pub mod html;
pub mod tree;

// Re-export commonly used types
pub use config::Config;
pub use error::{JutilsError, Result};
pub use tree::{NodeId, NodeRef, RenderOptions, Tree};
