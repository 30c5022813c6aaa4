//! Configuration modules.
//!
//! Each submodule owns one concern and loads itself from environment
//! variables via a `from_env` constructor.
//!
//! - [`audit`]: Audit-trail consistency policy
//! - [`cors`]: CORS allowed origins
//! - [`drive`]: File-storage provider OAuth credentials
//! - [`jwt`]: JWT verification secret
//! - [`provider`]: Auth/database provider URL and service key

pub mod audit;
pub mod cors;
pub mod drive;
pub mod jwt;
pub mod provider;
