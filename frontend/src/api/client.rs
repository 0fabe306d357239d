use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    api::types::*,
    config,
    utils::storage::SessionStore,
};

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: SessionStore,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session: SessionStore::browser(),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            session: SessionStore::in_memory(),
        }
    }

    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        let base = match &self.base_url {
            Some(base) => base.clone(),
            None => config::await_api_base_url().await,
        };
        base.trim_end_matches('/').to_string()
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    /// Builds an authenticated request. Without a stored token nothing is sent.
    pub(crate) async fn authorized(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, ApiError> {
        let token = self
            .session
            .token()
            .ok_or_else(|| ApiError::unauthorized("No token"))?;
        let base_url = self.resolved_base_url().await;
        Ok(self
            .client
            .request(method, format!("{}{}", base_url, path))
            .bearer_auth(token))
    }

    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|err| {
            log::warn!("request failed: {}", err);
            ApiError::network(CONNECTION_ERROR_MESSAGE)
        })?;
        let status = response.status();
        self.handle_unauthorized_status(status);
        map_envelope_response(response).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorized(Method::GET, path).await?;
        self.execute(request).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorized(method, path).await?.json(body);
        self.execute(request).await
    }

    pub(crate) async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<T, ApiError> {
        let request = self.authorized(method, path).await?;
        self.execute(request).await
    }

    fn handle_unauthorized_status(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            log::info!("session rejected by the server, clearing credentials");
            self.session.clear_identity();
            redirect_to_login_if_needed();
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn redirect_to_login_if_needed() {
    if let Some(window) = web_sys::window() {
        let location = window.location();
        if let Ok(pathname) = location.pathname() {
            if pathname == "/login" {
                return;
            }
        }
        let _ = location.set_href("/login");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn redirect_to_login_if_needed() {}

pub fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

async fn map_envelope_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|_| ApiError::network(CONNECTION_ERROR_MESSAGE))?;
    decode_envelope(status, &body)
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub(crate) fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if (200..300).contains(&status) {
        return serde_json::from_str::<Envelope<T>>(body)
            .map(|envelope| envelope.data)
            .map_err(|err| {
                log::error!("unexpected response body: {}", err);
                ApiError::decode(status, DEFAULT_ERROR_MESSAGE)
            });
    }
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
    Err(ApiError::from_status(status, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_envelope_unwraps_data() {
        let value: Vec<u32> = decode_envelope(200, r#"{"data":[1,2],"message":"ok"}"#).unwrap();
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn decode_envelope_uses_server_message() {
        let err = decode_envelope::<serde_json::Value>(422, r#"{"message":"Nombre requerido"}"#)
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(err.to_string(), "422: Nombre requerido");
    }

    #[test]
    fn decode_envelope_falls_back_to_default_message() {
        let err = decode_envelope::<serde_json::Value>(500, "<html>oops</html>").unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Server);
        assert_eq!(err.message, DEFAULT_ERROR_MESSAGE);

        let err = decode_envelope::<serde_json::Value>(404, r#"{"message":"  "}"#).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(err.message, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn decode_envelope_reports_malformed_success_body() {
        let err = decode_envelope::<Vec<u32>>(200, r#"{"items":[]}"#).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Decode);
        assert_eq!(err.status, Some(200));
    }

    #[test]
    fn encode_segment_escapes_reserved_characters() {
        assert_eq!(encode_segment("a1-b_2"), "a1-b_2");
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
    }
}
