//! Backend seam: wire types and the `UsersApi` trait.
//!
//! The controller only talks to the backend through [`UsersApi`], so tests can
//! swap the HTTP client for an in-memory double.
//!
pub mod http;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

use crate::error::ApiError;

pub use http::HttpApi;

/// Backend-assigned identifier of a user record.
///
/// Opaque to the client: it is only ever displayed and echoed back in request
/// paths. Numbers and strings are both accepted on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => UserId(s),
            RawId::Number(n) => UserId(n.to_string()),
        })
    }
}

/// A user as stored by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireUserRecord")]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Record as received: document stores send `_id`, some send `id` as well.
#[derive(Deserialize)]
struct WireUserRecord {
    id: Option<UserId>,
    #[serde(rename = "_id")]
    underscore_id: Option<UserId>,
    name: String,
    email: String,
}

impl TryFrom<WireUserRecord> for UserRecord {
    type Error = String;

    fn try_from(wire: WireUserRecord) -> Result<Self, Self::Error> {
        let id = wire
            .id
            .or(wire.underscore_id)
            .ok_or_else(|| "missing field `id` or `_id`".to_string())?;
        Ok(Self {
            id,
            name: wire.name,
            email: wire.email,
        })
    }
}

/// Request body for create and update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
}

impl UserDraft {
    /// Build a draft from raw form input, trimming both fields.
    ///
    /// Returns `None` when either field is empty after trimming.
    pub fn from_input(name: &str, email: &str) -> Option<Self> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

/// Body of `GET /api/health`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub status: String,
}

/// Operations the client needs from the user collection backend.
pub trait UsersApi {
    fn health(&self) -> Result<HealthReport, ApiError>;
    fn list_users(&self) -> Result<Vec<UserRecord>, ApiError>;
    fn create_user(&self, draft: &UserDraft) -> Result<(), ApiError>;
    fn update_user(&self, id: &UserId, draft: &UserDraft) -> Result<(), ApiError>;
    fn delete_user(&self, id: &UserId) -> Result<(), ApiError>;
}

impl<T: UsersApi + ?Sized> UsersApi for Box<T> {
    fn health(&self) -> Result<HealthReport, ApiError> {
        (**self).health()
    }

    fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        (**self).list_users()
    }

    fn create_user(&self, draft: &UserDraft) -> Result<(), ApiError> {
        (**self).create_user(draft)
    }

    fn update_user(&self, id: &UserId, draft: &UserDraft) -> Result<(), ApiError> {
        (**self).update_user(id, draft)
    }

    fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        (**self).delete_user(id)
    }
}
