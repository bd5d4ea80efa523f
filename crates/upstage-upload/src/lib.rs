//! Staged upload pipeline for the media storage tier.
//!
//! Moves one in-memory payload through the storage tier's three-phase
//! handshake: a signed *apply* request trades the payload's size and declared
//! media kind for a capability-scoped upload node, a *transfer* posts the raw
//! bytes to that node under its bearer token with a CRC-32 integrity header,
//! and a signed *commit* finalizes the session and yields the storage URI.
//! The split exists on the server side — bytes are only accepted against a
//! size-scoped grant, and nothing becomes visible until the commit confirms
//! the transfer really finished — so a failed transfer leaves no asset behind.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - `data` - Immutable configuration, grants, and wire types
//! - `core` - Pure transformations (action URLs, node selection)
//! - `effects` - I/O behind the [`Transport`] trait
//!
//! Phases run strictly sequentially within one invocation; independent
//! invocations share no state and may run concurrently.

mod core;
mod data;
mod effects;
mod error;

pub use self::core::{apply_url, commit_url, first_available_node, transfer_url};
pub use self::data::{
    AssetMeta, MediaKind, StoredAsset, Timeouts, UploadGrant, UploadOptions, UploadPhase, wire,
};
pub use self::effects::{HttpResponse, Transport, Uploader};

#[cfg(feature = "reqwest")]
pub use self::effects::ReqwestTransport;

pub use self::error::{Result, UploadError};
