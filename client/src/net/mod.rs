//! Networking modules for the host server and the analysis endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the auth REST calls, `analysis` the multipart upload to the
//! external analysis endpoint, and `types` defines the shared wire schema.

pub mod analysis;
pub mod api;
pub mod types;
