use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair returned after login or refresh.
#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str, // always "bearer"
}

impl TokenPairResponse {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "bearer",
        }
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_has_no_password_field() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            username: "ak".into(),
            email: "ak@x.com".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("ak@x.com"));
        assert!(json.contains("\"id\""));
        assert!(!json.contains("password"));
    }

    #[test]
    fn token_pair_is_marked_bearer() {
        let pair = TokenPairResponse::new("a.b.c".into(), "d.e.f".into());
        let json = serde_json::to_string(&pair).unwrap();
        assert!(json.contains("\"token_type\":\"bearer\""));
        assert!(json.contains("\"access_token\":\"a.b.c\""));
        assert!(json.contains("\"refresh_token\":\"d.e.f\""));
    }
}
