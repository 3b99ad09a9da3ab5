//! Application constants

/// API version prefix for all routes
pub const API_PREFIX: &str = "/api/v0";

/// Extra room on top of the document ceiling for multipart framing.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
