//! Typed request payloads and their decode step.
//!
//! # Responsibility
//! - Give every write endpoint its own explicit input schema.
//! - Turn raw request bytes into a typed value or a `ValidationError`.
//!
//! # Invariants
//! - Server-assigned fields (`id`, timestamps) are never read from input.
//! - Unknown input fields are ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Create payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewItem {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub status: i32,
}

/// Update payload. Both fields overwrite the stored values wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemPatch {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

// Explicit `null` reads as the zero value, same as an absent field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Malformed or unparseable client input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ValidationError {}

/// Decodes a JSON request body into a typed payload.
///
/// # Errors
/// - Returns `ValidationError` carrying the parser message when the body is
///   empty, not JSON, or does not match the payload shape.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ValidationError> {
    serde_json::from_slice(body).map_err(|err| ValidationError::new(err.to_string()))
}
