//! Uniform result shape returned by every facade call

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Error;

/// Fallback message for errors whose display form is empty
const UNKNOWN_FAILURE: &str = "request failed";

/// Outcome of a facade call: either the operation's data or an error message.
///
/// Serializes as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult<T> {
    Success(T),
    Failure(String),
}

impl<T> OperationResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }

    /// Build a failure from an error, never producing an empty message
    pub fn from_error(err: &Error) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            OperationResult::Failure(UNKNOWN_FAILURE.to_string())
        } else {
            OperationResult::Failure(message)
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            OperationResult::Success(data) => Some(data),
            OperationResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            OperationResult::Success(_) => None,
            OperationResult::Failure(message) => Some(message),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> OperationResult<U> {
        match self {
            OperationResult::Success(data) => OperationResult::Success(f(data)),
            OperationResult::Failure(message) => OperationResult::Failure(message),
        }
    }

    /// Convert into a std `Result` with the failure message as error
    pub fn into_result(self) -> std::result::Result<T, String> {
        match self {
            OperationResult::Success(data) => Ok(data),
            OperationResult::Failure(message) => Err(message),
        }
    }
}

impl<T> From<crate::Result<T>> for OperationResult<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(data) => OperationResult::Success(data),
            Err(err) => OperationResult::from_error(&err),
        }
    }
}

impl<T: Serialize> Serialize for OperationResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            OperationResult::Success(data) => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
            }
            OperationResult::Failure(message) => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", message)?;
            }
        }
        map.end()
    }
}
