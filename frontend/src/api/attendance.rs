use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, AttendanceScanResult, Leaderboard, ScanRequest},
};

impl ApiClient {
    pub async fn scan_attendance(
        &self,
        request: &ScanRequest,
    ) -> Result<AttendanceScanResult, ApiError> {
        self.send_json(Method::POST, "/attendance/scan", request)
            .await
    }

    pub async fn get_leaderboard(&self) -> Result<Leaderboard, ApiError> {
        self.get("/leaderboard").await
    }
}
