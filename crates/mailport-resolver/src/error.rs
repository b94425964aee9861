//! Error types for the resolver

use thiserror::Error;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Errors that can occur when setting up the resolver
///
/// Resolution itself never errors: any transport failure degrades to
/// "no resolution".
#[derive(Debug, Error)]
pub enum ResolverError {
    /// HTTP client construction failed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}
