//! HTTP surface for the image de-raining service.

pub mod config;
pub mod error;
pub mod handlers;
pub mod processing;
pub mod router;
pub mod routes;
pub mod state;
