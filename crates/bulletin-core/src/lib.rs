//! Core library for the bulletin board client.
//!
//! - `auth`: the client-held session, its persisted snapshot, and the OAuth login flow
//! - `api`: the authenticated REST client with request/response interceptors
//! - `models`: posts, comments, tags, reactions and user profiles
//! - `navigation`: client routes and the injectable `Navigator`
//! - `config`: configuration file and environment overrides

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod navigation;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{SessionData, SessionStore};
pub use config::{ApiConfig, Config, SessionPersistence};
pub use navigation::{Navigator, Route};
