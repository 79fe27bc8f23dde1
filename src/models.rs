use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Connection settings from the pipeline's `source:` block.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct Source {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_key_fingerprint: Option<String>,
}

impl Source {
    /// Secret values that must never reach a diagnostic line.
    pub fn secrets(&self) -> Vec<String> {
        [&self.password, &self.passphrase, &self.private_key]
            .into_iter()
            .flatten()
            .filter(|value| !value.trim().is_empty())
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .field("host_key_fingerprint", &self.host_key_fingerprint)
            .finish()
    }
}

/// The `params:` block of a `put` step.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Params {
    #[serde(default)]
    pub interpreter: String,
    #[serde(default)]
    pub script: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Version {
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Metadata {
    pub name: String,
    pub value: String,
}

/// Missing fields decode as empty values; they fail later, at
/// authentication or execution, rather than at parse time.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct OutRequest {
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub params: Params,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutResponse {
    pub version: Version,
    pub metadata: Vec<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub version: Option<Version>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct InRequest {
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub version: Option<Version>,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct InResponse {
    pub version: Version,
    pub metadata: Vec<Metadata>,
}
