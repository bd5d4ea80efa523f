//! Wire format of the upload service's apply and commit actions.
//!
//! Field names follow the service's PascalCase JSON. Everything optional in
//! practice is optional here too; contract checks live in the pipeline, not
//! in deserialization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplyResponse {
    pub response_metadata: Option<ResponseMetadata>,
    pub result:            Option<ApplyResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseMetadata {
    pub error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceError {
    #[serde(default)]
    pub code:    String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplyResult {
    pub inner_upload_address: Option<InnerUploadAddress>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InnerUploadAddress {
    #[serde(default)]
    pub upload_nodes: Vec<UploadNode>,
}

/// One storage node offered by the apply phase: a destination host, a
/// session key for the later commit, and per-store bearer material.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UploadNode {
    #[serde(default)]
    pub upload_host: String,
    #[serde(default)]
    pub session_key: String,
    #[serde(default)]
    pub store_infos: Vec<StoreInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoreInfo {
    #[serde(default)]
    pub store_uri: String,
    /// Node-scoped bearer token for the transfer POST.
    #[serde(default)]
    pub auth:      String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommitRequest<'a> {
    pub session_key: &'a str,
    /// Post-processing transforms; always empty — the caller commits the
    /// bytes as transferred.
    pub functions:   Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommitResponse {
    pub response_metadata: Option<ResponseMetadata>,
    pub result:            Option<CommitResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommitResult {
    #[serde(default)]
    pub results: Vec<CommitEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommitEntry {
    pub video_meta: Option<MediaMeta>,
    pub image_meta: Option<MediaMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaMeta {
    #[serde(default)]
    pub uri:      String,
    #[serde(default)]
    pub width:    u32,
    #[serde(default)]
    pub height:   u32,
    #[serde(default)]
    pub duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_response_roundtrip() {
        let raw = r#"{
            "Result": {
                "InnerUploadAddress": {
                    "UploadNodes": [{
                        "UploadHost": "node1.example.com",
                        "SessionKey": "sk-123",
                        "StoreInfos": [{"StoreUri": "space/abc", "Auth": "Bearer x"}]
                    }]
                }
            }
        }"#;
        let parsed: ApplyResponse = serde_json::from_str(raw).unwrap();
        let nodes = parsed
            .result
            .unwrap()
            .inner_upload_address
            .unwrap()
            .upload_nodes;
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].upload_host, "node1.example.com");
        assert_eq!(nodes[0].store_infos[0].store_uri, "space/abc");
    }

    #[test]
    fn test_service_error_surface() {
        let raw = r#"{"ResponseMetadata": {"Error": {"Code": "AccessDenied", "Message": "no"}}}"#;
        let parsed: ApplyResponse = serde_json::from_str(raw).unwrap();
        let error = parsed.response_metadata.unwrap().error.unwrap();
        assert_eq!(error.code, "AccessDenied");
    }

    #[test]
    fn test_commit_request_shape() {
        let body = serde_json::to_value(CommitRequest {
            session_key: "sk-123",
            functions:   Vec::new(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"SessionKey": "sk-123", "Functions": []}));
    }

    #[test]
    fn test_commit_response_video_meta() {
        let raw = r#"{
            "Result": {
                "Results": [{"VideoMeta": {"Uri": "v/xyz", "Width": 1280, "Height": 720, "Duration": 5.2}}]
            }
        }"#;
        let parsed: CommitResponse = serde_json::from_str(raw).unwrap();
        let result = parsed.result.unwrap();
        let meta = result.results[0].video_meta.as_ref().unwrap();
        assert_eq!(meta.uri, "v/xyz");
        assert_eq!(meta.width, 1280);
        assert_eq!(meta.duration, 5.2);
    }
}
