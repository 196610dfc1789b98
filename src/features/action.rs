//! The `ActionResult` envelope returned by every action. Actions never fail
//! towards the page layer: backend refusals and client errors both end up here
//! with a message that can be shown inline.

use crate::api::{AppError, Envelope};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionResult<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

/// Fixed messages of one action.
#[derive(Clone, Copy, Debug)]
pub struct ActionMessages {
    /// Shown when the backend accepted the request.
    pub success: &'static str,
    /// Used when the backend refused without a message.
    pub failure: &'static str,
    /// Used when the client error carries no usable message.
    pub error: &'static str,
}

impl<T> ActionResult<T> {
    pub fn ok(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Converts the outcome of an API call into the action envelope.
    pub fn settle(result: Result<Envelope<T>, AppError>, messages: ActionMessages) -> Self {
        match result {
            Ok(envelope) => Self::from_envelope(envelope, messages),
            Err(err) => Self::from_error(&err, messages),
        }
    }

    #[must_use]
    pub fn from_envelope(envelope: Envelope<T>, messages: ActionMessages) -> Self {
        if envelope.success {
            Self::ok(messages.success, envelope.data)
        } else {
            Self::failure(non_empty(envelope.message).unwrap_or_else(|| messages.failure.to_string()))
        }
    }

    #[must_use]
    pub fn from_error(err: &AppError, messages: ActionMessages) -> Self {
        warn!("{}: {err}", messages.error);
        let message = err.user_message().trim();
        if message.is_empty() {
            Self::failure(messages.error)
        } else {
            Self::failure(message)
        }
    }

    /// Maps the payload, keeping success flag and message.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionResult<U> {
        ActionResult {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
        }
    }
}

impl ActionResult<Value> {
    /// Reads an opaque payload as `T`. The outcome stays the backend's
    /// `success` flag; a payload of another shape is dropped.
    #[must_use]
    pub fn decode_data<T: DeserializeOwned>(self) -> ActionResult<T> {
        let data = self.data.and_then(|value| match serde_json::from_value(value) {
            Ok(data) => Some(data),
            Err(err) => {
                debug!("Ignoring response data: {err}");
                None
            }
        });
        ActionResult {
            success: self.success,
            message: self.message,
            data,
        }
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|message| !message.trim().is_empty())
}
