use bytes::Bytes;
use chrono::Utc;
use serde::de::DeserializeOwned;
use upstage_sign::{SignRequest, format_amz_date, sign};

use crate::core::{apply_url, commit_url, first_available_node, transfer_url};
use crate::data::wire::{ApplyResponse, CommitRequest, CommitResponse, ResponseMetadata};
use crate::data::{
    AssetMeta, MediaKind, StoredAsset, UploadGrant, UploadOptions, UploadPhase, UploadSession,
};
use crate::effects::http::{HttpResponse, Transport};
use crate::error::{Result, UploadError};

/// Orchestrates the apply → transfer → commit handshake for one payload.
///
/// Progression is strictly linear: a failed phase terminates the run with an
/// error tagged by that phase, and the later phases never execute — in
/// particular, no commit is issued for a failed transfer, so the storage tier
/// never surfaces a half-written asset. Independent `upload` calls share
/// nothing but the transport and may run concurrently.
pub struct Uploader<T: Transport> {
    transport: T,
    options:   UploadOptions,
}

impl<T: Transport> Uploader<T> {
    pub fn new(transport: T, options: UploadOptions) -> Self { Self { transport, options } }

    /// Run the full handshake and return the committed storage reference.
    pub async fn upload(
        &self,
        payload: Bytes,
        kind: MediaKind,
        grant: &UploadGrant,
    ) -> Result<StoredAsset> {
        grant.validate()?;

        let checksum = upstage_verify::crc32_hex(&payload);
        tracing::debug!(
            size = payload.len(),
            checksum = %checksum,
            kind = kind.file_type(),
            space = %grant.space_name,
            "starting staged upload"
        );

        let session = self.apply(grant, kind, payload.len()).await?;
        self.transfer(&session, payload, &checksum).await?;
        let asset = self.commit(grant, &session).await?;

        tracing::debug!(uri = %asset.uri, "staged upload committed");
        Ok(asset)
    }

    /// Apply phase: trade payload size and kind for an upload node.
    async fn apply(
        &self,
        grant: &UploadGrant,
        kind: MediaKind,
        file_size: usize,
    ) -> Result<UploadSession> {
        let phase = UploadPhase::Apply;
        let url = apply_url(
            &grant.upload_host,
            &grant.space_name,
            kind,
            file_size,
            &nonce(),
        );

        let timestamp = Utc::now();
        let signed_headers = vec![
            ("x-amz-date".to_string(), format_amz_date(timestamp)),
            (
                "x-amz-security-token".to_string(),
                grant.credential.session_token().to_string(),
            ),
        ];
        let authorization = sign(
            &SignRequest {
                method: "GET",
                url: &url,
                headers: &signed_headers,
                payload: b"",
                region: &self.options.region,
                service: &self.options.service,
                timestamp,
            },
            &grant.credential,
        )?;

        let mut headers = signed_headers;
        headers.push(("authorization".to_string(), authorization));

        let response = self.send(phase, "GET", &url, &headers, Bytes::new()).await?;
        let parsed: ApplyResponse = decode(phase, &response)?;
        check_service_error(phase, parsed.response_metadata.as_ref())?;

        let nodes = parsed
            .result
            .and_then(|result| result.inner_upload_address)
            .map(|address| address.upload_nodes)
            .unwrap_or_default();
        let (node, store) = first_available_node(&nodes).ok_or_else(|| {
            tracing::error!(space = %grant.space_name, "apply response offered no upload node");
            UploadError::Contract {
                phase,
                field: "Result.InnerUploadAddress.UploadNodes",
            }
        })?;

        tracing::debug!(node = %node.upload_host, store_uri = %store.store_uri, "upload node granted");
        Ok(UploadSession {
            session_key: node.session_key.clone(),
            upload_host: node.upload_host.clone(),
            store_uri:   store.store_uri.clone(),
            node_auth:   store.auth.clone(),
        })
    }

    /// Transfer phase: post the raw bytes to the granted node under its
    /// bearer token, with the CRC-32 integrity header attached.
    async fn transfer(
        &self,
        session: &UploadSession,
        payload: Bytes,
        checksum: &str,
    ) -> Result<()> {
        let phase = UploadPhase::Transfer;
        let url = transfer_url(&session.upload_host, &session.store_uri);
        let headers = vec![
            ("Authorization".to_string(), session.node_auth.clone()),
            ("Content-CRC32".to_string(), checksum.to_string()),
            (
                "Content-Type".to_string(),
                "application/octet-stream".to_string(),
            ),
            ("Content-Disposition".to_string(), "attachment".to_string()),
        ];

        self.send(phase, "POST", &url, &headers, payload).await?;
        tracing::debug!(store_uri = %session.store_uri, "payload transferred");
        Ok(())
    }

    /// Commit phase: finalize the session with an empty transform list and
    /// extract the storage URI the service assigned.
    async fn commit(&self, grant: &UploadGrant, session: &UploadSession) -> Result<StoredAsset> {
        let phase = UploadPhase::Commit;
        let url = commit_url(&grant.upload_host, &grant.space_name);
        let body = serde_json::to_vec(&CommitRequest {
            session_key: &session.session_key,
            functions:   Vec::new(),
        })
        .map_err(|source| UploadError::Decode { phase, source })?;

        let timestamp = Utc::now();
        let signed_headers = vec![
            ("x-amz-date".to_string(), format_amz_date(timestamp)),
            (
                "x-amz-security-token".to_string(),
                grant.credential.session_token().to_string(),
            ),
            (
                "x-amz-content-sha256".to_string(),
                upstage_verify::sha256_hex(&body),
            ),
        ];
        let authorization = sign(
            &SignRequest {
                method: "POST",
                url: &url,
                headers: &signed_headers,
                payload: &body,
                region: &self.options.region,
                service: &self.options.service,
                timestamp,
            },
            &grant.credential,
        )?;

        let mut headers = signed_headers;
        headers.push((
            "content-type".to_string(),
            "text/plain;charset=UTF-8".to_string(),
        ));
        headers.push(("authorization".to_string(), authorization));

        let response = self
            .send(phase, "POST", &url, &headers, Bytes::from(body))
            .await?;
        let parsed: CommitResponse = decode(phase, &response)?;
        check_service_error(phase, parsed.response_metadata.as_ref())?;

        let entry = parsed
            .result
            .map(|result| result.results)
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(UploadError::Contract {
                phase,
                field: "Result.Results",
            })?;

        // The committed asset must carry a URI; a well-formed response
        // without one signals server-side contract drift, not a retryable
        // transport condition.
        let meta = entry
            .video_meta
            .or(entry.image_meta)
            .filter(|meta| !meta.uri.is_empty())
            .ok_or_else(|| {
                tracing::error!(session_key = %session.session_key, "commit result carried no storage URI");
                UploadError::Contract {
                    phase,
                    field: "Result.Results[0].Uri",
                }
            })?;

        Ok(StoredAsset {
            uri:  meta.uri,
            meta: AssetMeta {
                width:    meta.width,
                height:   meta.height,
                duration: meta.duration,
            },
        })
    }

    /// Issue one request, mapping transport failures and rejections to
    /// phase-tagged errors. The rejection body is captured for diagnosis.
    async fn send(
        &self,
        phase: UploadPhase,
        method: &str,
        url: &str,
        headers: &[(String, String)],
        body: Bytes,
    ) -> Result<HttpResponse> {
        let response = self
            .transport
            .send(method, url, headers, body)
            .await
            .map_err(|e| UploadError::Transport {
                phase,
                message: e.to_string(),
            })?;

        if !response.is_success() {
            tracing::warn!(phase = %phase, status = response.status, "upload phase rejected");
            return Err(UploadError::Rejected {
                phase,
                status: response.status,
                body: response.body_text(),
            });
        }
        Ok(response)
    }
}

fn decode<D: DeserializeOwned>(phase: UploadPhase, response: &HttpResponse) -> Result<D> {
    serde_json::from_slice(&response.body).map_err(|source| UploadError::Decode { phase, source })
}

fn check_service_error(phase: UploadPhase, metadata: Option<&ResponseMetadata>) -> Result<()> {
    if let Some(error) = metadata.and_then(|metadata| metadata.error.as_ref()) {
        return Err(UploadError::Remote {
            phase,
            code: error.code.clone(),
            message: error.message.clone(),
        });
    }
    Ok(())
}

/// Short random suffix for the apply URL; the service uses it to tell
/// retried applies apart.
fn nonce() -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut raw = [0u8; 10];
    rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut raw);
    raw.iter()
        .map(|byte| ALPHABET[usize::from(*byte) % ALPHABET.len()] as char)
        .collect()
}
