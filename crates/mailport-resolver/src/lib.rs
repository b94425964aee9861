//! Short-link resolution for Mailport
//!
//! Detects hovered URLs that belong to known URL shorteners and resolves
//! them to their final destination by following redirects, memoizing
//! changed results for the lifetime of the process.

mod error;
mod resolver;
mod shortener;

pub use error::{ResolverError, ResolverResult};
pub use resolver::{LinkResolve, LinkResolver};
pub use shortener::is_shortened;
