//! Per-datasource query/edit permissions (Grafana Enterprise).

use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::http::Request;
use serde::{Deserialize, Serialize};

/// Permission level; sent and received as its number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DatasourcePermissionType {
    #[default]
    Query,
    Edit,
}

impl From<DatasourcePermissionType> for u8 {
    fn from(value: DatasourcePermissionType) -> Self {
        match value {
            DatasourcePermissionType::Query => 1,
            DatasourcePermissionType::Edit => 2,
        }
    }
}

impl TryFrom<u8> for DatasourcePermissionType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Query),
            2 => Ok(Self::Edit),
            other => Err(format!("unknown datasource permission {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasourcePermission {
    pub id: i64,
    pub datasource_id: i64,
    pub user_id: i64,
    pub user_email: String,
    pub team_id: i64,
    pub built_in_role: String,
    pub permission: DatasourcePermissionType,
    pub permission_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasourcePermissions {
    pub datasource_id: i64,
    pub enabled: bool,
    pub permissions: Vec<DatasourcePermission>,
}

/// Grant `permission` to exactly one of a user, a team, or a built-in role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourcePermissionAdd {
    pub user_id: i64,
    pub team_id: i64,
    #[serde(rename = "builtinRole")]
    pub builtin_role: String,
    pub permission: DatasourcePermissionType,
}

impl Client {
    pub async fn enable_datasource_permissions(&self, ctx: &Context, id: i64) -> Result<(), Error> {
        let path = format!("/api/datasources/{}/enable-permissions", id);
        self.dispatch_empty(ctx, Request::post(path)).await
    }

    pub async fn disable_datasource_permissions(&self, ctx: &Context, id: i64) -> Result<(), Error> {
        let path = format!("/api/datasources/{}/disable-permissions", id);
        self.dispatch_empty(ctx, Request::post(path)).await
    }

    pub async fn datasource_permissions(
        &self,
        ctx: &Context,
        id: i64,
    ) -> Result<DatasourcePermissions, Error> {
        let path = format!("/api/datasources/{}/permissions", id);
        self.dispatch(ctx, Request::get(path)).await
    }

    pub async fn add_datasource_permission(
        &self,
        ctx: &Context,
        id: i64,
        item: &DatasourcePermissionAdd,
    ) -> Result<(), Error> {
        let req = Request::post(format!("/api/datasources/{}/permissions", id)).json(item)?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn remove_datasource_permission(
        &self,
        ctx: &Context,
        id: i64,
        permission_id: i64,
    ) -> Result<(), Error> {
        let path = format!("/api/datasources/{}/permissions/{}", id, permission_id);
        self.dispatch_empty(ctx, Request::delete(path)).await
    }
}
