// src/types/user.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::response::Envelope;
use super::wire::lenient_id;

pub type UserId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[serde(alias = "JOB_SEEKER", alias = "seeker")]
    Seeker,
    #[serde(alias = "recruiter")]
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seeker => "SEEKER",
            Self::Recruiter => "RECRUITER",
        }
    }

    /// Route namespace owned by this role.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Seeker => "/dashboard/seeker",
            Self::Recruiter => "/dashboard/recruiter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SEEKER" | "JOB_SEEKER" => Ok(Self::Seeker),
            "RECRUITER" => Ok(Self::Recruiter),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Identity of the signed-in user, as persisted under the `user` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "lenient_id::deserialize")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// `data` of a successful login or signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// Auth reply without the envelope: `{token, user, message}`. It counts as
/// a success only when both the token and the user are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BareAuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

impl BareAuthResponse {
    pub fn into_envelope(self) -> Envelope<AuthPayload> {
        let message = self.message.unwrap_or_default();
        match (self.token.filter(|t| !t.trim().is_empty()), self.user) {
            (Some(token), Some(user)) => Envelope {
                success: true,
                message,
                data: Some(AuthPayload { token, user }),
            },
            _ => Envelope::failure(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("seeker".parse::<Role>().unwrap(), Role::Seeker);
        assert_eq!("JOB_SEEKER".parse::<Role>().unwrap(), Role::Seeker);
        assert_eq!(" Recruiter ".parse::<Role>().unwrap(), Role::Recruiter);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_user_with_string_id() {
        let user: User = serde_json::from_str(
            r#"{"id": "12", "name": "Ada", "email": "ada@example.com", "role": "RECRUITER"}"#,
        )
        .unwrap();
        assert_eq!(user.id, 12);
        assert_eq!(user.role.dashboard_path(), "/dashboard/recruiter");
    }

    #[test]
    fn test_bare_auth_response_needs_token_and_user() {
        let complete: BareAuthResponse = serde_json::from_str(
            r#"{"token": "abc", "user": {"id": 1, "name": "Ada", "email": "ada@example.com", "role": "SEEKER"}, "message": "Login successful"}"#,
        )
        .unwrap();
        let envelope = complete.into_envelope();
        assert!(envelope.success);
        assert_eq!(envelope.message, "Login successful");
        assert_eq!(envelope.data.unwrap().token, "abc");

        let partial: BareAuthResponse =
            serde_json::from_str(r#"{"token": "abc", "message": "Invalid credentials"}"#).unwrap();
        let envelope = partial.into_envelope();
        assert!(!envelope.success);
        assert_eq!(envelope.message, "Invalid credentials");
        assert!(envelope.data.is_none());
    }
}
