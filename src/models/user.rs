use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Account role. Derived from the external id prefix exactly once, at
/// creation time, and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    /// `T`-prefixed external ids belong to teachers; everything else is a
    /// student.
    pub fn from_external_id(external_id: &str) -> Role {
        if external_id.starts_with('T') {
            Role::Teacher
        } else {
            Role::Student
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Teacher => write!(f, "teacher"),
            Role::Student => write!(f, "student"),
        }
    }
}

/// User document (`users` collection). `password` holds the bcrypt hash,
/// never the plaintext. `email` and `id` are each covered by a unique index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub email: String,
    pub password: String,
    /// Human-facing identifier, stored and transmitted as `id`.
    #[serde(rename = "id")]
    pub external_id: String,
    pub role: Role,
}

/// Public projection of a user, returned wherever account data leaves the
/// service. Deliberately omits the password hash.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub email: String,
    pub id: String,
    pub role: Role,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        UserInfo {
            email: user.email,
            id: user.external_id,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_derivation_teacher_prefix() {
        assert_eq!(Role::from_external_id("T001"), Role::Teacher);
        assert_eq!(Role::from_external_id("T"), Role::Teacher);
    }

    #[test]
    fn test_role_derivation_everything_else_is_student() {
        assert_eq!(Role::from_external_id("S100"), Role::Student);
        assert_eq!(Role::from_external_id("t001"), Role::Student);
        assert_eq!(Role::from_external_id("001T"), Role::Student);
        assert_eq!(Role::from_external_id(""), Role::Student);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"teacher\"");
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
    }

    #[test]
    fn test_user_info_drops_password_hash() {
        let user = User {
            _id: None,
            email: "a@x.com".to_string(),
            password: "$2b$12$hash".to_string(),
            external_id: "S100".to_string(),
            role: Role::Student,
        };

        let info = UserInfo::from(user);
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["id"], "S100");
        assert_eq!(json["role"], "student");
    }
}
