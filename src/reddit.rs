//! Reddit API clients and services for communicating with Reddit over HTTP.

pub mod auth;
pub mod listing;
pub mod multi;
pub mod service;
pub mod subscriptions;
pub mod thing;

pub use auth::{Credentials, Role, Session};
pub use service::{RedditService, Service};
