//! Auth Endpoints

use super::{ApiClient, Method};
use crate::error::ApiResult;
use crate::models::{LoginRequest, TokenResponse, User};

impl ApiClient {
    /// Exchange credentials for a bearer token. Sent without a token.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        let body = serde_json::to_value(LoginRequest { username, password })?;
        let response = self.execute(Method::Post, "/api/auth/login", Some(body), false).await?;
        Self::decode(&response)
    }

    /// Identity behind the stored token
    pub async fn me(&self) -> ApiResult<User> {
        self.get_json("/api/auth/me").await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{client, MockTransport};
    use crate::api::Method;
    use crate::error::ApiError;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_sends_no_bearer() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Post,
            "/api/auth/login",
            200,
            json!({"access_token": "tok", "token_type": "bearer"}),
        );
        let (api, _) = client(&transport, Some("stale"));

        let token = api.login("demo", "demo").await.unwrap();
        assert_eq!(token.access_token, "tok");

        let requests = transport.requests();
        assert_eq!(requests[0].bearer, None);
        assert_eq!(requests[0].body, Some(json!({"username": "demo", "password": "demo"})));
    }

    #[tokio::test]
    async fn test_me_uses_bearer() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Get,
            "/api/auth/me",
            200,
            json!({"id": 1, "username": "demo", "name": "Demo Teacher", "email": "demo@school.test"}),
        );
        let (api, _) = client(&transport, Some("tok"));

        let user = api.me().await.unwrap();
        assert_eq!(user.name, "Demo Teacher");
        assert_eq!(user.school, None);
        assert_eq!(transport.requests()[0].bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_me_unauthorized() {
        let transport = MockTransport::new();
        transport.respond(Method::Get, "/api/auth/me", 401, json!({"detail": "expired"}));
        let (api, _) = client(&transport, Some("tok"));
        assert_eq!(api.me().await, Err(ApiError::Unauthorized));
    }
}
