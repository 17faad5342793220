use log::trace;
use reqwest::StatusCode;

use crate::error::{Error, ImgbbResult};
use crate::models::response::Response;

/// Reads the whole body and classifies it. The response is consumed, so the
/// connection is released on every path.
pub(crate) async fn read_response(response: reqwest::Response) -> ImgbbResult<Response> {
    let status = response.status();
    trace!("upload answered with {status}");

    let body = response
        .bytes()
        .await
        .map_err(|e| Error::internal(format!("read response body: {e}")))?;

    parse_response(status, &body)
}

/// Only the shape matching the status is attempted: a success payload for
/// 200, an error payload for anything else. An error payload without a
/// status takes the HTTP one.
pub(crate) fn parse_response(status: StatusCode, body: &[u8]) -> ImgbbResult<Response> {
    if status != StatusCode::OK {
        let mut err: Error = serde_json::from_slice(body)
            .map_err(|e| Error::internal(format!("json unmarshal: {e}")))?;
        if err.status_code == 0 {
            err.status_code = status.as_u16();
            if err.status_text.is_empty() {
                err.status_text = status.canonical_reason().unwrap_or_default().to_string();
            }
        }
        return Err(err);
    }

    serde_json::from_slice(body).map_err(|e| Error::internal(format!("json unmarshal: {e}")))
}
