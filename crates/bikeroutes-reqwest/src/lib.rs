#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod connect;
mod error;
mod service;

pub use crate::connect::{
    ApiClient, ApiClientConfig, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT, TRACING_TARGET,
};
pub use crate::error::{Error, Result};
pub use crate::service::{SnapRequest, SnapResponse, SnappedPoint, SnappedLocation, VoteRequest};
