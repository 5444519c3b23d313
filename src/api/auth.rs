//! Login Endpoints
//!
//! `/admin/login` for staff and `/users/login` for the embedded quiz-test player.

use serde::Serialize;
use serde_json::Value;

use super::{check_envelope, ApiClient, HttpMethod};
use crate::error::{ApiError, ApiResult};

pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
pub const PLAYER_LOGIN_PATH: &str = "/users/login";

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

/// Token and user record handed out by a login endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct LoginGrant {
    pub token: String,
    /// Raw user JSON, persisted as-is
    pub user: Option<Value>,
}

/// Pull the token and user out of a login envelope.
///
/// Accepts the token at the top level or under `data`, and the user under
/// `admin` or `user`.
pub fn parse_login(status: u16, body: Value) -> ApiResult<LoginGrant> {
    let body = check_envelope(status, body)?;
    let scopes = [Some(&body), body.get("data")];

    let token = scopes
        .iter()
        .flatten()
        .find_map(|scope| {
            ["token", "accessToken"]
                .iter()
                .find_map(|key| scope.get(key).and_then(Value::as_str))
        })
        .map(str::to_string)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Decode("login response carried no token".to_string()))?;

    let user = scopes
        .iter()
        .flatten()
        .find_map(|scope| ["admin", "user"].iter().find_map(|key| scope.get(key)))
        .filter(|u| u.is_object())
        .cloned();

    Ok(LoginGrant { token, user })
}

async fn login(client: &ApiClient, path: &str, email: &str, password: &str) -> ApiResult<LoginGrant> {
    let args = LoginArgs { email: email.trim(), password };
    let json = serde_json::to_string(&args).map_err(|e| ApiError::Decode(e.to_string()))?;
    let (status, body) = client.send(HttpMethod::Post, path, super::Body::Json(json)).await?;
    parse_login(status, body)
}

pub async fn admin_login(client: &ApiClient, email: &str, password: &str) -> ApiResult<LoginGrant> {
    login(client, ADMIN_LOGIN_PATH, email, password).await
}

pub async fn player_login(client: &ApiClient, email: &str, password: &str) -> ApiResult<LoginGrant> {
    login(client, PLAYER_LOGIN_PATH, email, password).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_token_and_admin() {
        let grant = parse_login(
            200,
            json!({ "success": true, "token": "t-1", "admin": { "name": "Huda", "email": "h@zaitoon.app" } }),
        )
        .unwrap();
        assert_eq!(grant.token, "t-1");
        assert_eq!(grant.user.unwrap()["name"], "Huda");
    }

    #[test]
    fn test_nested_data_token() {
        let grant = parse_login(200, json!({ "data": { "accessToken": "t-2", "user": { "email": "kid@x" } } })).unwrap();
        assert_eq!(grant.token, "t-2");
        assert!(grant.user.is_some());
    }

    #[test]
    fn test_invalid_credentials_message() {
        let err = parse_login(401, json!({ "success": false, "message": "Invalid credentials" })).unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[test]
    fn test_missing_token() {
        assert!(matches!(parse_login(200, json!({ "success": true })), Err(ApiError::Decode(_))));
    }
}
