//! Client integration layer for a remote media generation service.
//!
//! Ties the member crates together for the common flow: upload binary assets
//! through the staged handshake ([`upstage_upload`]), submit a generation job
//! through a caller-supplied collaborator, and track it to completion with
//! the adaptive poller ([`upstage_poll`]). Payload construction, model
//! mapping, and credit bookkeeping stay behind the [`TokenProvider`] and
//! [`JobService`] seams — this crate only owns the handshake, the signing,
//! and the waiting.

mod client;
mod collab;
mod error;
mod profile;
mod status;

pub use client::{AssetUpload, Client, GenerateRequest};
pub use collab::{CollabError, JobId, JobService, JobSnapshot, TokenProvider, UploadScene};
pub use error::ClientError;
pub use profile::PollProfile;
pub use status::{
    STATUS_DONE, STATUS_FAILED, STATUS_PENDING, STATUS_PROCESSING, STATUS_QUEUED,
    normalize_status, probe_report,
};

pub use upstage_poll::{
    CancelHandle, CancelToken, FailReason, JobPhase, Outcome, PollConfig, PollStats, Poller,
    ProbeReport,
};
pub use upstage_sign::Credential;
pub use upstage_upload::{
    AssetMeta, MediaKind, ReqwestTransport, StoredAsset, Timeouts, Transport, UploadError,
    UploadGrant, UploadOptions, Uploader,
};
