//! # fitcontent API
//!
//! REST surface for the fitcontent catalog service: content CRUD and
//! discovery endpoints under `/content`, the recommendation feature
//! endpoints, a time-boxed response cache, and best-effort clients for the
//! media and comms collaborators.

pub mod cache;
pub mod rest;
pub mod services;

pub use cache::ResponseCache;
pub use rest::{routes, AppState, RestApi};
pub use services::{CommsClient, MediaClient, ServiceConfig};
