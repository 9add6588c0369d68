use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A registered account: guest, host, employee or admin.
///
/// See [`impl Record for User`](#impl-Record-for-User) for how the collection keys it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

keyed_record!(User);

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            email: Some(email.into()),
            role: None,
            extra: Map::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Signup payload (`POST /api/users/signup`).
#[derive(Clone, PartialEq, Serialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Partial update; `None` fields are left out of the PATCH body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Login payload (`POST /api/users/login`).
#[derive(Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

const REDACTED: &str = "<redacted>";

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("role", &self.role)
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_keeps_unknown_fields() {
        let user: User = serde_json::from_value(json!({
            "_id": "U1",
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "555-0100"
        }))
        .unwrap();

        assert_eq!(user.id, "U1");
        assert_eq!(user.role, None);
        assert_eq!(user.extra.get("phone"), Some(&json!("555-0100")));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["id"], "U1");
        assert_eq!(back["phone"], "555-0100");
    }

    #[test]
    fn test_debug_never_shows_passwords() {
        let signup = UserCreate {
            name: "Kim".into(),
            email: "kim@example.com".into(),
            password: "s3cr3t-pw".into(),
            role: None,
        };
        let login = Credentials {
            email: "kim@example.com".into(),
            password: "s3cr3t-pw".into(),
        };

        for rendered in [format!("{signup:?}"), format!("{login:?}")] {
            assert!(!rendered.contains("s3cr3t-pw"), "{rendered}");
            assert!(rendered.contains("kim@example.com"));
        }
        // The wire payload is untouched.
        assert_eq!(serde_json::to_value(&login).unwrap()["password"], "s3cr3t-pw");
    }

    #[test]
    fn test_update_omits_unset_fields() {
        let update = UserUpdate {
            role: Some("admin".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({ "role": "admin" }));
    }
}
