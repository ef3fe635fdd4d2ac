//! Client for the external de-raining inference service.
//!
//! The service is an opaque remote capability: it receives an image and
//! returns references to the original and transformed images. [`Derain`]
//! is the seam the orchestrator depends on; [`DerainClient`] is the HTTP
//! implementation.

pub mod client;

pub use client::{Derain, DerainClient, DerainOutput, InferenceError};
