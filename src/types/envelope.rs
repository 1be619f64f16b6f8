//! Normalized response envelope.
//!
//! Wire format (bit-exact): `{"code": <int>, "message": <string|null>, "data": <any|null>}`.

use serde::{Deserialize, Serialize};

use crate::defaults::envelope as codes;
use crate::error::{FailureKind, PipelineError};

/// The envelope every API response is normalized into.
///
/// `code == 200` is the sole success sentinel; any other code is a business
/// or server error that the caller inspects and branches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ResponseEnvelope {
    pub fn new(code: i64, message: Option<String>, data: Option<serde_json::Value>) -> Self {
        Self { code, message, data }
    }

    /// Envelope synthesized when a 2xx response carries an empty body.
    pub fn server_error() -> Self {
        Self {
            code: codes::SERVER_ERROR,
            message: Some(codes::SERVER_ERROR_MESSAGE.to_string()),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == codes::SUCCESS
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == codes::UNAUTHORIZED
    }

    /// The payload, when the envelope signals success.
    pub fn ok_data(&self) -> Option<&serde_json::Value> {
        if self.is_success() {
            self.data.as_ref()
        } else {
            None
        }
    }

    /// Deserialize the payload into a concrete type.
    ///
    /// Fails with [`FailureKind::Decode`] when the payload is absent or does
    /// not match `T`.
    pub fn data_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, PipelineError> {
        let value = self.data.clone().unwrap_or(serde_json::Value::Null);
        serde_json::from_value(value).map_err(|e| {
            PipelineError::transport(FailureKind::Decode, format!("invalid payload: {e}"))
        })
    }
}
