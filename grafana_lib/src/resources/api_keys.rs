//! Instance API keys and Grafana Cloud org API keys.

use super::MessageResponse;
use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::helpers::segment;
use crate::http::Request;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest {
    pub name: String,
    pub role: String,
    /// Lifetime in seconds; 0 never expires.
    #[serde(skip_serializing_if = "super::is_zero")]
    pub seconds_to_live: i64,
}

/// The created key. `key` is only ever returned here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateApiKeyResponse {
    pub id: i64,
    pub name: String,
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiKey {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub expiration: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateCloudApiKeyInput {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CloudApiKey {
    #[serde(alias = "ID")]
    pub id: i64,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Role")]
    pub role: String,
    /// Only set in the response to creation.
    #[serde(alias = "Token")]
    pub token: String,
    #[serde(alias = "Expiration")]
    pub expiration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CloudApiKeyList {
    #[serde(alias = "Items")]
    pub items: Vec<CloudApiKey>,
}

impl Client {
    pub async fn create_api_key(
        &self,
        ctx: &Context,
        request: &CreateApiKeyRequest,
    ) -> Result<CreateApiKeyResponse, Error> {
        let req = Request::post("/api/auth/keys").json(request)?;
        self.dispatch(ctx, req).await
    }

    pub async fn api_keys(&self, ctx: &Context, include_expired: bool) -> Result<Vec<ApiKey>, Error> {
        let req = Request::get("/api/auth/keys").query("includeExpired", include_expired);
        self.dispatch(ctx, req).await
    }

    pub async fn delete_api_key(&self, ctx: &Context, id: i64) -> Result<MessageResponse, Error> {
        self.dispatch(ctx, Request::delete(format!("/api/auth/keys/{}", id)))
            .await
    }

    /// Create an API key for Grafana Cloud org `org` (its slug).
    pub async fn create_cloud_api_key(
        &self,
        ctx: &Context,
        org: &str,
        input: &CreateCloudApiKeyInput,
    ) -> Result<CloudApiKey, Error> {
        let req = Request::post(format!("/api/orgs/{}/api-keys", segment(org))).json(input)?;
        self.dispatch(ctx, req).await
    }

    pub async fn list_cloud_api_keys(&self, ctx: &Context, org: &str) -> Result<CloudApiKeyList, Error> {
        let path = format!("/api/orgs/{}/api-keys", segment(org));
        self.dispatch(ctx, Request::get(path)).await
    }

    pub async fn delete_cloud_api_key(
        &self,
        ctx: &Context,
        org: &str,
        key_name: &str,
    ) -> Result<(), Error> {
        let path = format!("/api/orgs/{}/api-keys/{}", segment(org), segment(key_name));
        self.dispatch_empty(ctx, Request::delete(path)).await
    }
}
