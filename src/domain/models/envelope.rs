//! The upstream response envelope and its decoding rules.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{ApiError, ApiResult};

/// Status marker inside the upstream envelope.
///
/// The upstream emits descriptive sentences on the wire; the symbolic
/// `HANDLED` / `ERROR` forms are accepted as well and used when
/// serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeStatus {
    /// The request was processed and `data` carries the payload.
    #[serde(rename = "HANDLED", alias = "Successfully processed request.")]
    Handled,
    /// The request failed and `error` carries the reason.
    #[serde(rename = "ERROR", alias = "Failed to process request.")]
    Error,
}

/// The non-standard wrapper the upstream puts around every payload.
///
/// Invariant: `status == Handled` implies `data` is the expected shape;
/// `status == Error` implies `error` is non-empty and `data` is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ResponseEnvelope<T> {
    /// Payload, present when the request was handled.
    #[serde(default)]
    pub data: Option<T>,
    /// Outcome marker.
    pub status: EnvelopeStatus,
    /// Failure reason, present when `status == Error`.
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ResponseEnvelope<T> {
    /// Unwrap the envelope into its payload.
    ///
    /// A `Handled` envelope without a payload is a decode failure, never a
    /// silently returned nil; an `Error` envelope surfaces its `error`
    /// string as a Server error.
    pub fn into_data(self) -> ApiResult<T> {
        match self.status {
            EnvelopeStatus::Handled => self.data.ok_or_else(|| {
                ApiError::Server("upstream reported HANDLED without the expected payload".to_string())
            }),
            EnvelopeStatus::Error => {
                let message = self
                    .error
                    .filter(|msg| !msg.is_empty())
                    .unwrap_or_else(|| "upstream reported ERROR without a message".to_string());
                Err(ApiError::Server(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Employee;

    #[test]
    fn test_handled_envelope_unwraps_payload() {
        let json = serde_json::json!({
            "data": [],
            "status": "HANDLED",
            "error": null
        });

        let envelope: ResponseEnvelope<Vec<Employee>> = serde_json::from_value(json).unwrap();
        assert_eq!(envelope.status, EnvelopeStatus::Handled);
        assert!(envelope.into_data().unwrap().is_empty());
    }

    #[test]
    fn test_descriptive_status_alias_accepted() {
        let json = serde_json::json!({
            "data": true,
            "status": "Successfully processed request."
        });

        let envelope: ResponseEnvelope<bool> = serde_json::from_value(json).unwrap();
        assert!(envelope.into_data().unwrap());
    }

    #[test]
    fn test_error_envelope_surfaces_message() {
        let json = serde_json::json!({
            "data": null,
            "status": "ERROR",
            "error": "boom"
        });

        let envelope: ResponseEnvelope<bool> = serde_json::from_value(json).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert!(matches!(err, ApiError::Server(_)));
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_error_envelope_without_message() {
        let json = serde_json::json!({ "status": "Failed to process request." });

        let envelope: ResponseEnvelope<bool> = serde_json::from_value(json).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert!(err.to_string().contains("without a message"));
    }

    #[test]
    fn test_handled_without_payload_is_decode_failure() {
        let json = serde_json::json!({ "status": "HANDLED" });

        let envelope: ResponseEnvelope<bool> = serde_json::from_value(json).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert!(matches!(err, ApiError::Server(_)));
    }

    #[test]
    fn test_missing_status_does_not_parse() {
        let json = serde_json::json!({ "data": [1, 2, 3] });
        let parsed: Result<ResponseEnvelope<Vec<u32>>, _> = serde_json::from_value(json);
        assert!(parsed.is_err());
    }
}
