//! Dashboards, dashboard/folder search, and snapshots.

use super::{JsonObject, PAGE_SIZE};
use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::helpers::segment;
use crate::http::Request;
use crate::pagination::Paginator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardMeta {
    pub is_starred: bool,
    pub slug: String,
    #[serde(rename = "folderId")]
    pub folder: i64,
    pub url: String,
}

/// A dashboard as saved and fetched. `model` is the dashboard JSON itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dashboard {
    pub meta: DashboardMeta,
    #[serde(rename = "dashboard")]
    pub model: JsonObject,
    pub folder_id: i64,
    pub folder_uid: String,
    pub overwrite: bool,
    /// Commit message stored with the new version.
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardSaveResponse {
    pub slug: String,
    pub id: i64,
    pub uid: String,
    pub status: String,
    pub version: i64,
}

/// One hit from `/api/search`: a dashboard or a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchHit {
    pub id: u64,
    pub uid: String,
    pub title: String,
    pub uri: String,
    pub url: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: Vec<String>,
    pub is_starred: bool,
    pub folder_id: u64,
    pub folder_uid: String,
    pub folder_title: String,
    pub folder_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(rename = "dashboard")]
    pub model: JsonObject,
    /// Seconds until the snapshot expires; 0 never expires.
    pub expires: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotCreateResponse {
    pub delete_key: String,
    pub delete_url: String,
    pub key: String,
    pub url: String,
    pub id: i64,
}

impl Client {
    /// Create or update a dashboard.
    pub async fn new_dashboard(
        &self,
        ctx: &Context,
        dashboard: &Dashboard,
    ) -> Result<DashboardSaveResponse, Error> {
        let req = Request::post("/api/dashboards/db").json(dashboard)?;
        self.dispatch(ctx, req).await
    }

    /// Every dashboard visible to the caller, fetched page by page.
    pub async fn dashboards(&self, ctx: &Context) -> Result<Vec<SearchHit>, Error> {
        let paginator = Paginator::pages("page", "limit", PAGE_SIZE);
        let req = Request::get("/api/search").query("type", "dash-db");
        self.paginate(ctx, req, &paginator).await
    }

    pub async fn dashboard_by_uid(&self, ctx: &Context, uid: &str) -> Result<Dashboard, Error> {
        let path = format!("/api/dashboards/uid/{}", segment(uid));
        let mut dashboard: Dashboard = self.dispatch(ctx, Request::get(path)).await?;
        dashboard.folder_id = dashboard.meta.folder;
        Ok(dashboard)
    }

    pub async fn dashboards_by_ids(
        &self,
        ctx: &Context,
        ids: &[i64],
    ) -> Result<Vec<SearchHit>, Error> {
        let ids = serde_json::to_string(ids).map_err(|source| Error::Encode {
            path: "/api/search".to_string(),
            source,
        })?;
        self.folder_dashboard_search(ctx, [("type", "dash-db"), ("dashboardIds", ids.as_str())])
            .await
    }

    pub async fn delete_dashboard_by_uid(&self, ctx: &Context, uid: &str) -> Result<(), Error> {
        let path = format!("/api/dashboards/uid/{}", segment(uid));
        self.dispatch_empty(ctx, Request::delete(path)).await
    }

    /// Search dashboards and folders. `params` are passed through as query
    /// parameters (`query`, `tag`, `type`, `folderIds`, `limit`, ...).
    pub async fn folder_dashboard_search<K, V>(
        &self,
        ctx: &Context,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Vec<SearchHit>, Error>
    where
        K: Into<String>,
        V: ToString,
    {
        let req = Request::get("/api/search").query_pairs(params);
        self.dispatch(ctx, req).await
    }

    pub async fn new_snapshot(
        &self,
        ctx: &Context,
        snapshot: &Snapshot,
    ) -> Result<SnapshotCreateResponse, Error> {
        let req = Request::post("/api/snapshots").json(snapshot)?;
        self.dispatch(ctx, req).await
    }
}
