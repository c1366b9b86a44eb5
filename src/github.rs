use serde_json::Value;

use crate::notifier::Notification;

/// Action GitHub sends with a `watch` event when someone stars a repository.
pub const STARRED: &str = "started";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Repository {
    pub full_name: String,
}

/// Star (`watch`) event payload.
///
/// Every field is optional: anything missing or of the wrong shape is left as `None`, so the
/// only way for a body to be rejected is to not be JSON at all.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(from = "Value")]
pub struct StarEvent {
    pub action: Option<String>,
    pub sender: Option<User>,
    pub repository: Option<Repository>,
}

fn field<T>(value: &mut Value, name: &str) -> Option<T>
where
    T: serde::de::DeserializeOwned,
{
    value
        .get_mut(name)
        .map(Value::take)
        .and_then(|field| serde_json::from_value(field).ok())
}

impl From<Value> for StarEvent {
    fn from(mut value: Value) -> Self {
        Self {
            action: field(&mut value, "action"),
            sender: field(&mut value, "sender"),
            repository: field(&mut value, "repository"),
        }
    }
}

impl StarEvent {
    pub fn into_notification(self) -> Option<Notification> {
        if self.action.as_deref() != Some(STARRED) {
            return None;
        }

        Some(Notification {
            sender: self.sender?.login,
            repository: self.repository?.full_name,
        })
    }
}
