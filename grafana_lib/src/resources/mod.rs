//! Resource operations: typed wrappers over [`Client::dispatch`](crate::Client::dispatch).
//!
//! Each submodule adds `impl Client` methods for one area of the API. They
//! only build a [`Request`](crate::Request) and pick a dispatch flavor; all
//! transport, auth, and error behavior lives in the client.

pub mod access_control;
pub mod alerting;
pub mod annotations;
pub mod api_keys;
pub mod cloud;
pub mod dashboards;
pub mod datasource_permissions;
pub mod folders;
pub mod health;
pub mod orgs;
pub mod playlists;
pub mod reports;
pub mod teams;
pub mod users;

use serde::Deserialize;
use std::num::NonZeroUsize;

/// Page size for list endpoints that accept one (the server maximum).
pub(crate) const PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Free-form JSON object (dashboard models, notifier settings, query models).
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// `{"message": "..."}` returned by many write endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
pub(crate) struct Created {
    pub id: i64,
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn is_zero(value: &i64) -> bool {
    *value == 0
}
