use reqwest::Url;
use reqwest::blocking::{Client, Response};
use std::time::Duration;

use super::{HealthReport, UserDraft, UserId, UserRecord, UsersApi};
use crate::error::{ApiError, Context, Result};

/// `UsersApi` over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    /// Create a client for the backend at `base_url`.
    ///
    /// `timeout` of `None` lets a request wait indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_ctx(|| format!("invalid backend address {base_url:?}"))?;
        if base_url.cannot_be_a_base() {
            return Err(format!("backend address {base_url} cannot carry a path").into());
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .with_ctx(|| "build HTTP client".to_string())?;
        tracing::info!(base_url = %base_url, ?timeout, "created backend client");
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/api/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    fn check(response: Response) -> std::result::Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }
}

impl UsersApi for HttpApi {
    fn health(&self) -> std::result::Result<HealthReport, ApiError> {
        let response = self.client.get(self.endpoint(&["health"])).send()?;
        Ok(Self::check(response)?.json::<HealthReport>()?)
    }

    fn list_users(&self) -> std::result::Result<Vec<UserRecord>, ApiError> {
        let response = self.client.get(self.endpoint(&["users"])).send()?;
        Ok(Self::check(response)?.json::<Vec<UserRecord>>()?)
    }

    fn create_user(&self, draft: &UserDraft) -> std::result::Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint(&["users"]))
            .json(draft)
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    fn update_user(&self, id: &UserId, draft: &UserDraft) -> std::result::Result<(), ApiError> {
        let response = self
            .client
            .put(self.endpoint(&["users", id.as_str()]))
            .json(draft)
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    fn delete_user(&self, id: &UserId) -> std::result::Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&["users", id.as_str()]))
            .send()?;
        Self::check(response)?;
        Ok(())
    }
}
