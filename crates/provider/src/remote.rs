//! Shared response handling for remote provider calls.

use reqwest::Response;

use aetheris_common::{AetherisError, AetherisResult};

/// Turn a remote response into JSON, mapping non-success statuses into
/// `Upstream` errors that carry the remote status and body verbatim.
pub(crate) async fn response_json(
    response: Response,
    context: &str,
) -> AetherisResult<serde_json::Value> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let details = serde_json::from_str::<serde_json::Value>(&body).ok();
        return Err(AetherisError::Upstream {
            status: status.as_u16(),
            message: format!("{} failed", context),
            details,
        });
    }

    response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| AetherisError::UpstreamTransport(format!("{}: {}", context, e)))
}

/// Map a transport-level reqwest error (connect, timeout, DNS).
pub(crate) fn transport_error(err: reqwest::Error, context: &str) -> AetherisError {
    AetherisError::UpstreamTransport(format!("{}: {}", context, err))
}
