//! Signature derivation: canonical request, string-to-sign, HMAC key chain.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::canonical::{canonical_headers, canonical_query, split_url};
use crate::credential::Credential;
use crate::error::Result;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// One request to be signed.
///
/// `timestamp` must be the same instant the caller transmits as the
/// `x-amz-date` header — the signature scopes to it, and the server bounds
/// the signature's validity window around it, so a second clock read here
/// would skew both.
pub struct SignRequest<'a> {
    pub method:    &'a str,
    pub url:       &'a str,
    pub headers:   &'a [(String, String)],
    pub payload:   &'a [u8],
    pub region:    &'a str,
    pub service:   &'a str,
    pub timestamp: DateTime<Utc>,
}

/// Render a timestamp in the compact `YYYYMMDD'T'HHMMSS'Z'` form the
/// signature scope and the `x-amz-date` header share.
pub fn format_amz_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Derive the `Authorization` header value for `request`.
///
/// Pure function of its inputs: two calls with identical method, URL,
/// headers, payload, credential, region, service, and timestamp produce
/// identical output. An empty payload is hashed as the empty string, never
/// omitted.
pub fn sign(request: &SignRequest<'_>, credential: &Credential) -> Result<String> {
    let url = split_url(request.url)?;
    let amz_date = format_amz_date(request.timestamp);
    let scope_date = &amz_date[..8];

    let payload_hash = hex::encode(Sha256::digest(request.payload));
    let (header_block, signed_headers) = canonical_headers(request.headers, url.host);

    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.method.to_ascii_uppercase(),
        url.path,
        canonical_query(url.query),
        header_block,
        signed_headers,
        payload_hash,
    );

    let scope = format!(
        "{scope_date}/{}/{}/aws4_request",
        request.region, request.service
    );
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        hex::encode(Sha256::digest(canonical_request.as_bytes())),
    );

    let signing_key = derive_key(
        credential.secret_access_key(),
        scope_date,
        request.region,
        request.service,
    );
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

    Ok(format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
        credential.access_key_id(),
    ))
}

/// HMAC chain: secret -> date -> region -> service -> terminator.
fn derive_key(secret: &str, scope_date: &str, region: &str, service: &str) -> Vec<u8> {
    let date_key = hmac_sha256(format!("AWS4{secret}").as_bytes(), scope_date.as_bytes());
    let region_key = hmac_sha256(&date_key, region.as_bytes());
    let service_key = hmac_sha256(&region_key, service.as_bytes());
    hmac_sha256(&service_key, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    // HMAC-SHA256 accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(key).expect("hmac key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
