//! Login session persisted in the local store

use shared::dto::UserInfo;
use shop_client::ApiClient;
use std::sync::Arc;

use crate::error::AppResult;
use crate::storage::{LocalStore, TOKEN_KEY, USER_KEY};

pub struct Session {
    store: Arc<LocalStore>,
}

impl Session {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// Log in and remember token and user
    pub async fn login(&self, api: &ApiClient, email: &str, password: &str) -> AppResult<UserInfo> {
        let response = api.auth().login(email, password).await?;
        self.store.set(TOKEN_KEY, &response.token)?;
        self.store.set(USER_KEY, &response.user)?;
        Ok(response.user)
    }

    /// Install a remembered token on `api`; returns the stored user
    pub fn restore(&self, api: &ApiClient) -> AppResult<Option<UserInfo>> {
        let Some(token) = self.store.get::<String>(TOKEN_KEY)? else {
            return Ok(None);
        };
        api.set_token(Some(token));
        self.user()
    }

    pub fn user(&self) -> AppResult<Option<UserInfo>> {
        self.store.get(USER_KEY)
    }

    pub fn logout(&self, api: &ApiClient) -> AppResult<()> {
        api.auth().logout();
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        tracing::info!("logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use http::Method;
    use serde_json::json;
    use shop_client::mock::MockTransport;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_login_survives_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let mock = Arc::new(MockTransport::new());
        mock.reply(
            Method::POST,
            "/api/auth/login",
            json!({"token": "t0k", "user": {"id": 1, "name": "Admin", "email": "admin@example.com", "role": "admin"}}),
        );

        let api = ApiClient::new(mock.clone());
        let session = Session::new(Arc::new(LocalStore::open(&path, EventBus::new()).unwrap()));
        let user = session.login(&api, "admin@example.com", "secret").await.unwrap();
        assert_eq!(user.role, "admin");

        // new process: nothing in memory, only the store on disk
        let fresh = ApiClient::new(Arc::new(MockTransport::new()));
        assert!(!fresh.is_logged_in());
        let session = Session::new(Arc::new(LocalStore::open(&path, EventBus::new()).unwrap()));
        let restored = session.restore(&fresh).unwrap();
        assert_eq!(restored.map(|u| u.id), Some(1));
        assert_eq!(fresh.token().as_deref(), Some("t0k"));

        session.logout(&fresh).unwrap();
        assert!(!fresh.is_logged_in());
        assert!(session.user().unwrap().is_none());
    }
}
