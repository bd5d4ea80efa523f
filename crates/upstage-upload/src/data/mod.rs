//! Data layer: grants, options, and per-invocation session state.

pub mod wire;

use std::fmt;
use std::time::Duration;

use upstage_sign::Credential;

use crate::error::{Result, UploadError};

/// Which handshake phase a failure or log line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Apply,
    Transfer,
    Commit,
}

impl UploadPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadPhase::Apply => "apply",
            UploadPhase::Transfer => "transfer",
            UploadPhase::Commit => "commit",
        }
    }
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Declared media kind of the payload, scoped into the apply grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    /// The `FileType` value the apply action expects.
    pub fn file_type(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "image",
        }
    }
}

/// Everything the token-acquisition collaborator hands over for one upload:
/// short-lived signing material plus the storage namespace and endpoint the
/// grant is scoped to. Lives for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct UploadGrant {
    pub credential:  Credential,
    /// Storage namespace (`SpaceName`) the grant is scoped to.
    pub space_name:  String,
    /// Bare hostname of the upload control endpoint, without scheme.
    pub upload_host: String,
}

impl UploadGrant {
    /// A grant with a blank namespace or endpoint cannot produce a usable
    /// request; fail before any traffic rather than after a cryptic 403.
    pub fn validate(&self) -> Result<()> {
        if self.space_name.is_empty() {
            return Err(UploadError::IncompleteGrant("space_name"));
        }
        if self.upload_host.is_empty() {
            return Err(UploadError::IncompleteGrant("upload_host"));
        }
        Ok(())
    }
}

/// Transport-level deadlines, independent of any caller-side budget.
/// A stalled socket must not hold the process hostage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read:    Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            read:    Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Signature scope region.
    pub region:   String,
    /// Signature scope service identifier.
    pub service:  String,
    pub timeouts: Timeouts,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            region:   "cn-north-1".to_string(),
            service:  "vod".to_string(),
            timeouts: Timeouts::default(),
        }
    }
}

/// Transient state assigned by the apply phase and consumed by transfer and
/// commit. Created inside one pipeline run, discarded on return, never shared
/// across invocations.
#[derive(Debug)]
pub(crate) struct UploadSession {
    pub session_key: String,
    pub upload_host: String,
    pub store_uri:   String,
    pub node_auth:   String,
}

/// Best-effort media metadata from the commit response. The storage tier
/// fills these when it has probed the payload; zeros mean "not reported".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AssetMeta {
    pub width:    u32,
    pub height:   u32,
    pub duration: f64,
}

/// Successful pipeline outcome: the opaque storage reference plus whatever
/// metadata the commit response volunteered.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAsset {
    pub uri:  String,
    pub meta: AssetMeta,
}
