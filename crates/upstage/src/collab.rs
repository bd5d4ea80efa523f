//! Collaborator seams: the external services this layer drives but does not
//! implement. Production implementations live with the outer API client;
//! tests supply scripted fakes.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use upstage_upload::UploadGrant;

/// Upload purpose declared when acquiring a token; the storage tier scopes
/// the returned grant to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadScene(pub u32);

impl UploadScene {
    pub const VIDEO: UploadScene = UploadScene(1);
    pub const IMAGE: UploadScene = UploadScene(2);
}

/// Opaque identifier of a submitted job, used as the poll key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Point-in-time view of a job as the service reports it.
#[derive(Debug, Clone, Default)]
pub struct JobSnapshot {
    /// Raw service status code; see [`crate::normalize_status`].
    pub status_code: i32,
    /// Result items visible so far.
    pub item_count:  u32,
    /// Application-level failure code, terminal when present.
    pub fail_code:   Option<String>,
    /// Remote completion timestamp, when reported.
    pub finished_at: Option<i64>,
    /// Raw item list for the caller to mine after completion.
    pub items:       serde_json::Value,
}

/// How a collaborator call went wrong. Decided once at this boundary; the
/// client maps each variant to retry-or-fail policy without re-inspecting
/// message strings.
#[derive(Debug, Clone, Error)]
pub enum CollabError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("remote service refused: {0}")]
    Refused(String),

    #[error("response missing required field: {0}")]
    MissingField(&'static str),
}

/// Acquires short-lived upload grants for a declared scene.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Must fail when any grant field is absent — a partial grant signs
    /// requests the storage tier rejects without explanation.
    async fn acquire_upload_token(&self, scene: UploadScene)
    -> Result<UploadGrant, CollabError>;
}

/// Submits generation jobs and answers status probes.
#[async_trait]
pub trait JobService: Send + Sync {
    async fn submit_job(
        &self,
        asset_uris: &[String],
        params: &serde_json::Value,
    ) -> Result<JobId, CollabError>;

    /// `Ok(None)` means the record is not indexed yet — freshly-created jobs
    /// lag the read path, and that lag is never an error.
    async fn probe_job(&self, job_id: &JobId) -> Result<Option<JobSnapshot>, CollabError>;
}
