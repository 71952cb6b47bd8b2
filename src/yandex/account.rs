use crate::types::{PermissionAlerts, Status};
use crate::yandex::{ApiError, YandexClient};

impl YandexClient {
    /// Fetches the account behind the token and remembers its uid for
    /// the user-scoped endpoints. Must be the first call of a run.
    pub async fn account_status(&self) -> Result<Status, ApiError> {
        let status: Status = self.get("/account/status", &[]).await?;
        match &status.account.uid {
            Some(uid) => self.remember_uid(uid.clone()),
            None => {
                return Err(ApiError::Unauthorized(String::from(
                    "token is not attached to an account",
                )));
            }
        }
        Ok(status)
    }

    pub async fn permission_alerts(&self) -> Result<PermissionAlerts, ApiError> {
        self.get("/permission-alerts", &[]).await
    }
}
