use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, LoginRequest, LoginResponse, User, CONNECTION_ERROR_MESSAGE},
};

impl ApiClient {
    /// Exchanges an identification for a token and persists the session.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let builder = self
            .http_client()
            .request(Method::POST, format!("{}/auth/login", base_url))
            .json(&request);
        let response = builder.send().await.map_err(|err| {
            log::warn!("login request failed: {}", err);
            ApiError::network(CONNECTION_ERROR_MESSAGE)
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|_| ApiError::network(CONNECTION_ERROR_MESSAGE))?;
        let login: LoginResponse = super::client::decode_envelope(status, &body)?;
        self.session()
            .persist(&login.token, &login.user)
            .map_err(ApiError::validation)?;
        Ok(login)
    }

    pub async fn get_me(&self) -> Result<User, ApiError> {
        self.get("/me").await
    }
}
