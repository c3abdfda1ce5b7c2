//! HTTP client and authentication.
//!
//! This module provides the [`HttpClient`] used to call APIs and download
//! remote files, along with the [`Auth`] credentials it sends.

mod auth;
mod http;

pub use auth::Auth;
pub use http::HttpClient;
