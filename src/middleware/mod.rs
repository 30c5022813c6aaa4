//! Request-processing middleware.
//!
//! - [`auth`]: Bearer-token verification and the `AuthUser` extractor
//! - [`role`]: Closed role enumeration and set-membership gates
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthUser` verifies the JWT and exposes the claims (401 when the
//!    header is missing, 403 when verification fails)
//! 3. Role gates reject identities outside a route's allowed set (403)
//! 4. The handler runs with the verified claims

pub mod auth;
pub mod role;
