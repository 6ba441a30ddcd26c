use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The authenticated identity returned by register/login and persisted by the session store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(alias = "id")]
    pub user_id: i64,
    pub access_token: String,
    pub client_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nickname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar: String,
}

impl Session {
    /// The profile part of the session, stored as its own JSON record.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            nickname: self.nickname.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Public profile fields of the logged-in user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    pub nickname: String,
    pub avatar: String,
}

/// Register/login input. The backend names these `phone` and `password`.
#[derive(Serialize, Clone)]
pub struct Credentials {
    #[serde(rename = "phone")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Credentials {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// The backend sends `null` for unset nickname/avatar; read those as empty strings.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_accepts_backend_spelling() {
        let session: Session = serde_json::from_value(json!({
            "userId": 7,
            "accessToken": "tok",
            "clientId": "cli",
            "nickname": "neo",
            "avatar": "https://example.com/a.png"
        }))
        .unwrap();
        assert_eq!(session.user_id, 7);
        assert_eq!(session.profile().nickname, "neo");
    }

    #[test]
    fn session_accepts_id_alias_and_null_profile_fields() {
        let session: Session = serde_json::from_value(json!({
            "id": 3,
            "accessToken": "tok",
            "clientId": "cli",
            "nickname": null
        }))
        .unwrap();
        assert_eq!(session.user_id, 3);
        assert_eq!(session.nickname, "");
        assert_eq!(session.avatar, "");
    }

    #[test]
    fn credentials_use_wire_names_and_hide_secret() {
        let creds = Credentials::new("13800000000", "hunter2");
        let body = serde_json::to_value(&creds).unwrap();
        assert_eq!(body, json!({"phone": "13800000000", "password": "hunter2"}));
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
