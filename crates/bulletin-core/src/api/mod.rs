//! REST API client module for the bulletin board backend.
//!
//! This module provides the `ApiClient` for posts, comments, tags,
//! reactions and the user's profile.
//!
//! The API uses bearer token authentication. The token comes from the
//! shared `SessionStore` and is attached by a request interceptor; a 401
//! from any endpoint ends the session through a response interceptor.

pub mod client;
mod comments;
pub mod error;
pub mod interceptor;
mod posts;
mod reactions;

pub use client::ApiClient;
pub use error::ApiError;
pub use interceptor::{RequestInterceptor, ResponseInfo, ResponseInterceptor};
