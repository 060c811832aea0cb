use serde::{Deserialize, Serialize};

/// Body for POST /users/register. Required fields are checked by the handler
/// so that missing or empty values produce a 400 with the documented message.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub userid: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub role: Option<String>,
}

/// Body for POST /users/login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub userid: String,
    #[serde(default)]
    pub password: String,
}

/// Body for PUT /users/updateUser. `userid` selects the row and is never
/// itself changed.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub userid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub role: Option<String>,
}

/// Body for PUT /users/updateRole.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub userid: String,
    #[serde(default)]
    pub role: String,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_defaults_optional_fields() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"userid":"alice","password":"p@ss","email":"a@x.com"}"#)
                .expect("deserialize");
        assert_eq!(req.userid, "alice");
        assert_eq!(req.full_name, "");
        assert_eq!(req.phone, "");
        assert_eq!(req.address, "");
        assert!(req.role.is_none());
    }

    #[test]
    fn register_request_tolerates_missing_required_fields() {
        // Presence is the handler's concern; deserialization must not 422.
        let req: RegisterRequest = serde_json::from_str(r#"{}"#).expect("deserialize");
        assert_eq!(req.userid, "");
        assert_eq!(req.password, "");
        assert_eq!(req.email, "");
    }

    #[test]
    fn token_response_shape() {
        let json = serde_json::to_string(&TokenResponse { token: "abc".into() }).expect("ser");
        assert_eq!(json, r#"{"token":"abc"}"#);
    }
}
