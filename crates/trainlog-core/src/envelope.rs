use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Body written when a response cannot be serialized.
const FALLBACK_BODY: &[u8] = b"{\n \"error\": \"internal server error\"\n}\n";

/// Fixed response wrapper: `{"data": ..}`, `{"message": ..}` or `{"error": ..}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope<T> {
    Data(T),
    Message(String),
    Error(String),
}

/// A status code plus an envelope, rendered as pretty JSON with a trailing newline.
#[derive(Debug)]
pub struct JsonEnvelope<T>(pub StatusCode, pub Envelope<T>);

impl<T> JsonEnvelope<T> {
    pub fn data(status: StatusCode, data: T) -> Self {
        Self(status, Envelope::Data(data))
    }
}

impl JsonEnvelope<()> {
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self(status, Envelope::Message(message.into()))
    }

    pub fn error(status: StatusCode, error: impl Into<String>) -> Self {
        Self(status, Envelope::Error(error.into()))
    }
}

/// Serialize `value` the way every response body is written: one-space indent, trailing newline.
pub fn render<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut body = Vec::with_capacity(128);
    let mut ser =
        serde_json::Serializer::with_formatter(&mut body, PrettyFormatter::with_indent(b" "));
    value.serialize(&mut ser)?;
    body.push(b'\n');
    Ok(body)
}

impl<T: Serialize> IntoResponse for JsonEnvelope<T> {
    fn into_response(self) -> Response {
        let JsonEnvelope(status, envelope) = self;
        let (status, body) = match render(&envelope) {
            Ok(body) => (status, body),
            Err(e) => {
                tracing::error!(error = %e, "failed to encode response body");
                (StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_BODY.to_vec())
            }
        };
        (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            body,
        )
            .into_response()
    }
}
