//! Integration tests for the staged upload pipeline against a scripted
//! in-memory transport.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use upstage_sign::Credential;
use upstage_upload::{
    HttpResponse, MediaKind, Transport, UploadError, UploadGrant, UploadOptions, UploadPhase,
    Uploader,
};

#[derive(Debug)]
struct MockError;

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mock transport failure")
    }
}

impl std::error::Error for MockError {}

struct RecordedCall {
    method:  String,
    url:     String,
    headers: Vec<(String, String)>,
    body:    Bytes,
}

impl RecordedCall {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct Inner {
    calls:     Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<HttpResponse, MockError>>>,
}

#[derive(Clone, Default)]
struct MockTransport {
    inner: Arc<Inner>,
}

impl MockTransport {
    fn scripted(responses: Vec<Result<HttpResponse, MockError>>) -> Self {
        let transport = Self::default();
        *transport.inner.responses.lock().unwrap() = responses.into();
        transport
    }

    fn calls(&self) -> std::sync::MutexGuard<'_, Vec<RecordedCall>> {
        self.inner.calls.lock().unwrap()
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    fn send(
        &self,
        method: &str,
        url: &str,
        headers: &[(String, String)],
        body: Bytes,
    ) -> impl Future<Output = Result<HttpResponse, MockError>> + Send {
        self.inner.calls.lock().unwrap().push(RecordedCall {
            method:  method.to_string(),
            url:     url.to_string(),
            headers: headers.to_vec(),
            body,
        });
        let result = self
            .inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(MockError));
        async move { result }
    }
}

fn ok(status: u16, body: &str) -> Result<HttpResponse, MockError> {
    Ok(HttpResponse {
        status,
        body: Bytes::copy_from_slice(body.as_bytes()),
    })
}

fn grant() -> UploadGrant {
    UploadGrant {
        credential:  Credential::new("AKIDEXAMPLE", "secret", "token").unwrap(),
        space_name:  "media-space".to_string(),
        upload_host: "vod.example.com".to_string(),
    }
}

const APPLY_OK: &str = r#"{
    "Result": {
        "InnerUploadAddress": {
            "UploadNodes": [{
                "UploadHost": "node1.example.com",
                "SessionKey": "sk-123",
                "StoreInfos": [{"StoreUri": "media-space/abc", "Auth": "Bearer node-token"}]
            }]
        }
    }
}"#;

const COMMIT_OK: &str = r#"{
    "Result": {
        "Results": [{"VideoMeta": {"Uri": "v/xyz", "Width": 1280, "Height": 720, "Duration": 5.2}}]
    }
}"#;

#[tokio::test]
async fn happy_path_is_three_calls_in_order() {
    let transport = MockTransport::scripted(vec![ok(200, APPLY_OK), ok(200, ""), ok(200, COMMIT_OK)]);
    let uploader = Uploader::new(transport.clone(), UploadOptions::default());
    let payload = Bytes::from_static(b"hello video");

    let asset = uploader
        .upload(payload.clone(), MediaKind::Video, &grant())
        .await
        .unwrap();

    assert_eq!(asset.uri, "v/xyz");
    assert_eq!(asset.meta.width, 1280);
    assert_eq!(asset.meta.duration, 5.2);

    let calls = transport.calls();
    assert_eq!(calls.len(), 3);

    assert_eq!(calls[0].method, "GET");
    assert!(calls[0].url.starts_with("https://vod.example.com/?Action=ApplyUploadInner"));
    assert!(calls[0].url.contains("&SpaceName=media-space"));
    assert!(calls[0].url.contains("&FileType=video"));
    assert!(calls[0].url.contains(&format!("&FileSize={}", payload.len())));
    assert!(
        calls[0]
            .header("authorization")
            .unwrap()
            .starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/")
    );
    assert_eq!(calls[0].header("x-amz-security-token"), Some("token"));

    assert_eq!(calls[1].method, "POST");
    assert_eq!(calls[1].url, "https://node1.example.com/upload/v1/media-space/abc");
    assert_eq!(calls[1].header("authorization"), Some("Bearer node-token"));
    assert_eq!(
        calls[1].header("content-crc32"),
        Some(upstage_verify::crc32_hex(&payload).as_str())
    );
    assert_eq!(calls[1].body, payload);

    assert_eq!(calls[2].method, "POST");
    assert!(calls[2].url.starts_with("https://vod.example.com/?Action=CommitUploadInner"));
    let commit_body: serde_json::Value = serde_json::from_slice(&calls[2].body).unwrap();
    assert_eq!(commit_body["SessionKey"], "sk-123");
    assert_eq!(commit_body["Functions"], serde_json::json!([]));
    assert_eq!(
        calls[2].header("x-amz-content-sha256"),
        Some(upstage_verify::sha256_hex(&calls[2].body).as_str())
    );
}

#[tokio::test]
async fn transfer_rejection_aborts_before_commit() {
    let transport = MockTransport::scripted(vec![ok(200, APPLY_OK), ok(500, "disk full")]);
    let uploader = Uploader::new(transport.clone(), UploadOptions::default());

    let error = uploader
        .upload(Bytes::from_static(b"payload"), MediaKind::Video, &grant())
        .await
        .unwrap_err();

    match error {
        UploadError::Rejected { phase, status, body } => {
            assert_eq!(phase, UploadPhase::Transfer);
            assert_eq!(status, 500);
            assert!(body.contains("disk full"));
        }
        other => panic!("expected transfer rejection, got {other:?}"),
    }
    // No commit call was issued after the failed transfer
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
async fn apply_transport_error_is_phase_tagged() {
    let transport = MockTransport::scripted(vec![Err(MockError)]);
    let uploader = Uploader::new(transport.clone(), UploadOptions::default());

    let error = uploader
        .upload(Bytes::from_static(b"payload"), MediaKind::Image, &grant())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        UploadError::Transport { phase: UploadPhase::Apply, .. }
    ));
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn apply_without_nodes_is_contract_violation() {
    let empty = r#"{"Result": {"InnerUploadAddress": {"UploadNodes": []}}}"#;
    let transport = MockTransport::scripted(vec![ok(200, empty)]);
    let uploader = Uploader::new(transport.clone(), UploadOptions::default());

    let error = uploader
        .upload(Bytes::from_static(b"payload"), MediaKind::Video, &grant())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        UploadError::Contract { phase: UploadPhase::Apply, .. }
    ));
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn apply_service_error_is_surfaced() {
    let refused = r#"{"ResponseMetadata": {"Error": {"Code": "AccessDenied", "Message": "nope"}}}"#;
    let transport = MockTransport::scripted(vec![ok(200, refused)]);
    let uploader = Uploader::new(transport, UploadOptions::default());

    let error = uploader
        .upload(Bytes::from_static(b"payload"), MediaKind::Video, &grant())
        .await
        .unwrap_err();

    match error {
        UploadError::Remote { phase, code, .. } => {
            assert_eq!(phase, UploadPhase::Apply);
            assert_eq!(code, "AccessDenied");
        }
        other => panic!("expected service refusal, got {other:?}"),
    }
}

#[tokio::test]
async fn commit_without_uri_is_contract_violation() {
    let no_uri = r#"{"Result": {"Results": [{"VideoMeta": {"Uri": ""}}]}}"#;
    let transport =
        MockTransport::scripted(vec![ok(200, APPLY_OK), ok(200, ""), ok(200, no_uri)]);
    let uploader = Uploader::new(transport.clone(), UploadOptions::default());

    let error = uploader
        .upload(Bytes::from_static(b"payload"), MediaKind::Video, &grant())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        UploadError::Contract { phase: UploadPhase::Commit, .. }
    ));
    assert_eq!(transport.calls().len(), 3);
}

#[tokio::test]
async fn incomplete_grant_fails_before_any_traffic() {
    let transport = MockTransport::default();
    let uploader = Uploader::new(transport.clone(), UploadOptions::default());
    let mut bad_grant = grant();
    bad_grant.space_name.clear();

    let error = uploader
        .upload(Bytes::from_static(b"payload"), MediaKind::Video, &bad_grant)
        .await
        .unwrap_err();

    assert!(matches!(error, UploadError::IncompleteGrant("space_name")));
    assert!(transport.calls().is_empty());
}
