use bytes::Bytes;
use upstage_poll::{CancelToken, Outcome, Poller};
use upstage_upload::{MediaKind, StoredAsset, Transport, UploadGrant, UploadOptions, Uploader};

use crate::collab::{JobId, JobService, JobSnapshot, TokenProvider, UploadScene};
use crate::error::{ClientError, Result};
use crate::profile::PollProfile;
use crate::status::probe_report;

/// One payload to stage before submission.
#[derive(Debug, Clone)]
pub struct AssetUpload {
    pub payload: Bytes,
    pub kind:    MediaKind,
    pub scene:   UploadScene,
}

/// A generation request: assets to stage plus the opaque job parameters the
/// submission collaborator understands. Parameter construction is the outer
/// layer's business; this client passes them through untouched.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub assets: Vec<AssetUpload>,
    pub params: serde_json::Value,
}

/// Facade wiring the staged uploader and the adaptive poller to the
/// caller-supplied collaborators.
///
/// Holds no per-operation state: every call owns its grants, sessions, and
/// counters, so independent operations run concurrently without locking.
pub struct Client<P, J, T: Transport> {
    tokens:   P,
    jobs:     J,
    uploader: Uploader<T>,
}

impl<P, J, T> Client<P, J, T>
where
    P: TokenProvider,
    J: JobService,
    T: Transport,
{
    pub fn new(tokens: P, jobs: J, transport: T, options: UploadOptions) -> Self {
        Self {
            tokens,
            jobs,
            uploader: Uploader::new(transport, options),
        }
    }

    /// Acquire a scene-scoped grant and run the staged upload handshake.
    pub async fn upload_payload(
        &self,
        payload: Bytes,
        kind: MediaKind,
        scene: UploadScene,
    ) -> Result<StoredAsset> {
        let grant: UploadGrant = self
            .tokens
            .acquire_upload_token(scene)
            .await
            .map_err(ClientError::Token)?;
        Ok(self.uploader.upload(payload, kind, &grant).await?)
    }

    /// Drive the poller against the job service until the session ends.
    pub async fn await_job(
        &self,
        job_id: &JobId,
        profile: &PollProfile,
    ) -> Outcome<Option<JobSnapshot>> {
        self.await_job_with_cancel(job_id, profile, CancelToken::never())
            .await
    }

    /// As [`Client::await_job`], honoring an external cancellation token
    /// between probes.
    pub async fn await_job_with_cancel(
        &self,
        job_id: &JobId,
        profile: &PollProfile,
        cancel: CancelToken,
    ) -> Outcome<Option<JobSnapshot>> {
        let poller = Poller::new(profile.clone().into());
        let jobs = &self.jobs;
        poller
            .poll_with_cancel(
                move |attempt| {
                    let job_id = job_id.clone();
                    async move {
                        let result = jobs.probe_job(&job_id).await;
                        if result.is_err() {
                            tracing::debug!(attempt, job_id = %job_id, "probe errored");
                        }
                        probe_report(result)
                    }
                },
                cancel,
            )
            .await
    }

    /// End-to-end flow: stage every asset, submit the job, await completion,
    /// and hand back the final snapshot.
    pub async fn generate(
        &self,
        request: GenerateRequest,
        profile: &PollProfile,
    ) -> Result<JobSnapshot> {
        let mut asset_uris = Vec::with_capacity(request.assets.len());
        for asset in request.assets {
            let stored = self
                .upload_payload(asset.payload, asset.kind, asset.scene)
                .await?;
            tracing::debug!(uri = %stored.uri, "asset staged");
            asset_uris.push(stored.uri);
        }

        let job_id = self
            .jobs
            .submit_job(&asset_uris, &request.params)
            .await
            .map_err(ClientError::Submit)?;
        tracing::debug!(job_id = %job_id, assets = asset_uris.len(), "job submitted");

        match self.await_job(&job_id, profile).await {
            Outcome::Completed { data: Some(snapshot), stats } => {
                tracing::debug!(
                    job_id = %job_id,
                    attempts = stats.attempts,
                    elapsed_ms = stats.elapsed.as_millis() as u64,
                    "generation completed"
                );
                Ok(snapshot)
            }
            Outcome::Completed { data: None, .. } => Err(ClientError::MissingResult),
            Outcome::Failed { reason, stats } => Err(ClientError::JobFailed {
                reason,
                attempts: stats.attempts,
            }),
            Outcome::TimedOut { stats } => Err(ClientError::TimedOut {
                attempts: stats.attempts,
                elapsed:  stats.elapsed,
            }),
            Outcome::MaxAttemptsExceeded { stats } => Err(ClientError::AttemptsExhausted {
                attempts: stats.attempts,
            }),
            Outcome::Cancelled { .. } => Err(ClientError::Cancelled),
        }
    }
}
