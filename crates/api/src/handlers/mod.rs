//! HTTP request handlers.

pub mod images;
