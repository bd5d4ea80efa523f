//! Canonical request construction per the SigV4 specification.

use crate::error::{Result, SignError};

/// The pieces of a request URL that participate in signing.
pub(crate) struct RequestUrl<'a> {
    pub host:  &'a str,
    pub path:  &'a str,
    pub query: &'a str,
}

/// Split an absolute URL into host, path, and raw query string.
///
/// Query names and values are expected to be URI-encoded already — the
/// callers of this crate build action URLs from encoded components, so the
/// split never re-encodes.
pub(crate) fn split_url(url: &str) -> Result<RequestUrl<'_>> {
    let rest = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .ok_or_else(|| SignError::InvalidUrl(url.to_string()))?;

    let (host, path_query) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };
    if host.is_empty() {
        return Err(SignError::InvalidUrl(url.to_string()));
    }

    let (path, query) = match path_query.split_once('?') {
        Some((path, query)) => (path, query),
        None => (path_query, ""),
    };

    Ok(RequestUrl { host, path, query })
}

/// Sort query pairs by name then value and re-join them.
pub(crate) fn canonical_query(query: &str) -> String {
    let mut pairs: Vec<(&str, &str)> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .collect();
    pairs.sort_unstable();

    let mut out = String::with_capacity(query.len());
    for (idx, (name, value)) in pairs.iter().enumerate() {
        if idx > 0 {
            out.push('&');
        }
        out.push_str(name);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// Build the canonical header block and the signed-headers list.
///
/// Header names are lowercased, values trimmed, entries sorted by name. The
/// `host` header always participates, whether or not the caller supplied it.
pub(crate) fn canonical_headers(headers: &[(String, String)], host: &str) -> (String, String) {
    let mut entries: Vec<(String, String)> = headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().to_string()))
        .collect();
    if !entries.iter().any(|(name, _)| name == "host") {
        entries.push(("host".to_string(), host.to_string()));
    }
    entries.sort_unstable();

    let mut block = String::new();
    let mut signed = String::new();
    for (idx, (name, value)) in entries.iter().enumerate() {
        block.push_str(name);
        block.push(':');
        block.push_str(value);
        block.push('\n');
        if idx > 0 {
            signed.push(';');
        }
        signed.push_str(name);
    }
    (block, signed)
}
