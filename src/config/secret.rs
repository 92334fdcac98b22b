//! API key handling with the secrecy crate
//!
//! The key is zeroized when dropped, redacted in `Debug` output and only
//! readable through `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use curvequery::config::api_key;
//! use secrecy::ExposeSecret;
//!
//! let key = api_key("my-key");
//! assert_eq!(key.expose_secret().as_str(), "my-key");
//! assert!(!format!("{key:?}").contains("my-key"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Raw API key text, only reachable through [`ApiKey`]
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct ApiKeyValue(String);

impl CloneableSecret for ApiKeyValue {}
impl DebugSecret for ApiKeyValue {}
impl SerializableSecret for ApiKeyValue {}

impl ApiKeyValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for ApiKeyValue {
    fn from(value: String) -> Self {
        ApiKeyValue(value)
    }
}

impl Serialize for ApiKeyValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ApiKeyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(ApiKeyValue)
    }
}

/// API key sent with every request to the curve service
pub type ApiKey = Secret<ApiKeyValue>;

/// Wrap a key
#[inline]
pub fn api_key(value: impl Into<String>) -> ApiKey {
    Secret::new(ApiKeyValue::from(value.into()))
}
