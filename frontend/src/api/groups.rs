use reqwest::Method;

use super::{
    client::{encode_segment, ApiClient},
    types::{
        ApiError, CreateGroupRequest, DeleteGroupResponse, Group, GroupMutationResponse,
        JoinGroupRequest, JoinGroupResponse, MyGroup, UpdateGroupRequest,
    },
};

impl ApiClient {
    pub async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        self.get("/groups").await
    }

    pub async fn get_my_group(&self) -> Result<MyGroup, ApiError> {
        self.get("/groups/me").await
    }

    pub async fn join_group(&self, request: &JoinGroupRequest) -> Result<JoinGroupResponse, ApiError> {
        self.send_json(Method::POST, "/groups/join", request).await
    }

    pub async fn list_all_groups(&self) -> Result<Vec<Group>, ApiError> {
        self.get("/admin/groups").await
    }

    pub async fn create_group(
        &self,
        request: &CreateGroupRequest,
    ) -> Result<GroupMutationResponse, ApiError> {
        self.send_json(Method::POST, "/admin/groups", request).await
    }

    pub async fn update_group(
        &self,
        id: &str,
        request: &UpdateGroupRequest,
    ) -> Result<GroupMutationResponse, ApiError> {
        self.send_json(
            Method::PUT,
            &format!("/admin/groups/{}", encode_segment(id)),
            request,
        )
        .await
    }

    pub async fn delete_group(&self, id: &str) -> Result<DeleteGroupResponse, ApiError> {
        self.send_empty(
            Method::DELETE,
            &format!("/admin/groups/{}", encode_segment(id)),
        )
        .await
    }
}
