use crate::data::MediaKind;

/// Protocol version the apply and commit actions are pinned to.
const ACTION_VERSION: &str = "2020-11-19";

/// Build the apply action URL: declares payload size and media kind against
/// the control endpoint so the service can scope the grant before any bytes
/// move. The `nonce` deduplicates retries on the service side.
pub fn apply_url(
    upload_host: &str,
    space_name: &str,
    kind: MediaKind,
    file_size: usize,
    nonce: &str,
) -> String {
    format!(
        "https://{upload_host}/?Action=ApplyUploadInner&Version={ACTION_VERSION}\
         &SpaceName={space_name}&FileType={}&IsInner=1&FileSize={file_size}&s={nonce}",
        kind.file_type(),
    )
}

/// Build the commit action URL for the same namespace the apply ran against.
pub fn commit_url(upload_host: &str, space_name: &str) -> String {
    format!(
        "https://{upload_host}/?Action=CommitUploadInner&Version={ACTION_VERSION}\
         &SpaceName={space_name}"
    )
}

/// Build the node-local transfer URL for a store path handed out by apply.
pub fn transfer_url(node_host: &str, store_uri: &str) -> String {
    format!("https://{node_host}/upload/v1/{store_uri}")
}
