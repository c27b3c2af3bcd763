//! Network - background model upload to the parse server.

pub mod client;

pub use client::{ModelClient, UploadRequest};
