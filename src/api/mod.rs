//! Backend API module for the categories endpoint.
//!
//! The backend exposes a single document: a JSON object mapping category
//! names to arrays of posts. This module provides:
//!
//! - [`types`] - The order-preserving [`CategoryMap`] and [`Post`] types
//! - [`client`] - HTTP retrieval with timeout and response size limits

mod client;
mod types;

pub use client::{ApiClient, FetchError};
pub use types::{CategoryMap, Post};
