//! Bearer token verification.
//!
//! Tokens are issued elsewhere; this service only verifies HS256 signatures
//! against the shared secret and reads the caller's identity.

pub mod claims;
pub mod decoder;

pub use claims::Claims;
pub use decoder::JwtDecoder;
