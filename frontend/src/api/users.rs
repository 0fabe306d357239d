use reqwest::{
    multipart::{Form, Part},
    Method,
};

use super::{
    client::{encode_segment, ApiClient},
    types::{
        ApiError, AssignGroupRequest, AssignGroupResponse, BulkUsersRequest, CsvUpload,
        GroupHistory, ImportSummary, User,
    },
};

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/admin/users").await
    }

    pub async fn create_users_bulk(
        &self,
        request: &BulkUsersRequest,
    ) -> Result<ImportSummary, ApiError> {
        self.send_json(Method::POST, "/admin/users/bulk", request)
            .await
    }

    /// The file is forwarded untouched; the backend owns CSV parsing.
    pub async fn upload_users_csv(&self, upload: CsvUpload) -> Result<ImportSummary, ApiError> {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str("text/csv")
            .map_err(|err| ApiError::validation(err.to_string()))?;
        let form = Form::new().part("file", part);
        let request = self
            .authorized(Method::POST, "/admin/users/csv")
            .await?
            .multipart(form);
        self.execute(request).await
    }

    pub async fn assign_user_group(
        &self,
        user_id: &str,
        request: &AssignGroupRequest,
    ) -> Result<AssignGroupResponse, ApiError> {
        self.send_json(
            Method::PUT,
            &format!("/admin/users/{}/group", encode_segment(user_id)),
            request,
        )
        .await
    }

    pub async fn get_user_group_history(&self, user_id: &str) -> Result<GroupHistory, ApiError> {
        self.get(&format!(
            "/admin/users/{}/group-history",
            encode_segment(user_id)
        ))
        .await
    }
}
