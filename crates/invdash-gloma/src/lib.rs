//! Client and reshaping layer for the Gloma ERP product/inventory API.
//!
//! [`GlomaClient`] wraps `reqwest` with Gloma-specific error handling and
//! typed response deserialization; [`reshape`] converts the raw record
//! arrays into the reference-keyed mappings the dashboard endpoints serve.

mod client;
mod error;
pub mod reshape;
pub mod types;

pub use client::GlomaClient;
pub use error::GlomaError;
