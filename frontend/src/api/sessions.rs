use reqwest::Method;

use super::{
    client::{encode_segment, ApiClient},
    types::{
        ApiError, CreateSessionRequest, CreatedSession, DeactivateSessionResponse, Session,
        SessionQr,
    },
};

impl ApiClient {
    pub async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<CreatedSession, ApiError> {
        self.send_json(Method::POST, "/admin/sessions", request)
            .await
    }

    pub async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.get("/admin/sessions").await
    }

    pub async fn get_session_qr(&self, id: &str) -> Result<SessionQr, ApiError> {
        self.get(&format!("/admin/sessions/{}/qr", encode_segment(id)))
            .await
    }

    /// One-way: the backend offers no reactivation.
    pub async fn deactivate_session(
        &self,
        id: &str,
    ) -> Result<DeactivateSessionResponse, ApiError> {
        self.send_empty(
            Method::PUT,
            &format!("/admin/sessions/{}/deactivate", encode_segment(id)),
        )
        .await
    }
}
