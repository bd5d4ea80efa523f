//! AWS Signature V4 request signing for the upload service.
//!
//! Produces the `Authorization` header value for a request from the exact
//! bytes that will go on the wire: method, URL, headers, payload, and the
//! timestamp that is also transmitted as `x-amz-date`. Signing is a pure
//! function of those inputs; the remote verifier recomputes the same chain
//! independently, so any hidden clock read or header drift here would show
//! up as an unexplained rejection on the server side.
//!
//! Region and service identifiers are parameters, never constants — the same
//! signer serves every storage region the upload tier runs in.
//!
//! # Modules
//!
//! - [`canonical`] - Canonical request construction per the SigV4 specification
//! - [`credential`] - Validated signing material
//! - [`error`] - Signing error types
//! - [`sigv4`] - Signature derivation

pub use self::credential::Credential;
pub use self::error::{Result, SignError};
pub use self::sigv4::{SignRequest, format_amz_date, sign};

mod canonical;
mod credential;
mod error;
mod sigv4;
