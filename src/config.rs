use secstr::{SecStr, SecUtf8};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_secstr")]
    pub webhook_secret: SecStr,
    #[serde(deserialize_with = "deserialize_secutf8")]
    pub discord_webhook: SecUtf8,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum accepted webhook body, in bytes.
    #[serde(default = "default_payload_limit")]
    pub payload_limit: usize,
}

fn default_bind() -> String {
    "127.0.0.1:8080".into()
}

fn default_payload_limit() -> usize {
    1024 * 1024
}

fn deserialize_secstr<'de, D>(de: D) -> Result<SecStr, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(de).map(|s| SecStr::new(s.into_bytes()))
}

fn deserialize_secutf8<'de, D>(de: D) -> Result<SecUtf8, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(de).map(SecUtf8::from)
}
