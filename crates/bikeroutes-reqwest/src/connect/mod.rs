//! Reqwest client module.
//!
//! This module provides the client that talks to the bikeroutes web API.

mod client;
mod config;

pub use client::{ApiClient, TRACING_TARGET};
pub use config::{ApiClientConfig, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT};
