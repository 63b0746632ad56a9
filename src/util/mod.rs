//! Utility functions for common operations.
//!
//! - **URL handling**: cleanup and scheme validation before a URL leaves
//!   the process through the system opener
//! - **Text processing**: Unicode-aware width calculation and truncation
//!   for terminal rendering

mod text;
mod url;

pub use text::{display_width, truncate_to_width};
pub use url::{clean_url, validate_url, UrlValidationError};
