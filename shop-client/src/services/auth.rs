//! Auth API

use shared::dto::{LoginRequest, LoginResponse, UserInfo};
use shared::validation::{MAX_NAME_LEN, validate_email, validate_required_text};

use crate::{ApiClient, ClientResult};

pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Login and install the returned token on the client
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        validate_email(email, "email")?;
        validate_required_text(password, "password", MAX_NAME_LEN)?;

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.api.post("/api/auth/login", &request).await?;
        self.api.set_token(Some(response.token.clone()));
        tracing::info!(user_id = response.user.id, role = %response.user.role, "logged in");
        Ok(response)
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.api.get("/api/auth/me", Vec::new()).await
    }

    /// Forget the token locally
    pub fn logout(&self) {
        self.api.set_token(None);
    }
}
