//! Organizations, their members, and org-wide preferences.

use super::MessageResponse;
use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::helpers::segment;
use crate::http::Request;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Org {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrgUser {
    pub org_id: i64,
    pub user_id: i64,
    pub email: String,
    pub login: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub theme: String,
    #[serde(skip_serializing_if = "super::is_zero")]
    pub home_dashboard_id: i64,
    #[serde(rename = "homeDashboardUID", skip_serializing_if = "String::is_empty")]
    pub home_dashboard_uid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timezone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub week_start: String,
}

#[derive(Deserialize)]
struct CreatedOrg {
    #[serde(rename = "orgId")]
    org_id: i64,
}

impl Client {
    pub async fn orgs(&self, ctx: &Context) -> Result<Vec<Org>, Error> {
        self.dispatch(ctx, Request::get("/api/orgs/")).await
    }

    pub async fn org(&self, ctx: &Context, id: i64) -> Result<Org, Error> {
        self.dispatch(ctx, Request::get(format!("/api/orgs/{}", id)))
            .await
    }

    pub async fn org_by_name(&self, ctx: &Context, name: &str) -> Result<Org, Error> {
        let path = format!("/api/orgs/name/{}", segment(name));
        self.dispatch(ctx, Request::get(path)).await
    }

    /// Create an org and return its id.
    pub async fn new_org(&self, ctx: &Context, name: &str) -> Result<i64, Error> {
        let req = Request::post("/api/orgs").json(&json!({ "name": name }))?;
        let created: CreatedOrg = self.dispatch(ctx, req).await?;
        Ok(created.org_id)
    }

    pub async fn update_org(&self, ctx: &Context, id: i64, name: &str) -> Result<(), Error> {
        let req = Request::put(format!("/api/orgs/{}", id)).json(&json!({ "name": name }))?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn delete_org(&self, ctx: &Context, id: i64) -> Result<(), Error> {
        self.dispatch_empty(ctx, Request::delete(format!("/api/orgs/{}", id)))
            .await
    }

    /// Members of the org the credentials belong to.
    pub async fn org_users_current(&self, ctx: &Context) -> Result<Vec<OrgUser>, Error> {
        self.dispatch(ctx, Request::get("/api/org/users")).await
    }

    pub async fn org_users(&self, ctx: &Context, org_id: i64) -> Result<Vec<OrgUser>, Error> {
        self.dispatch(ctx, Request::get(format!("/api/orgs/{}/users", org_id)))
            .await
    }

    pub async fn add_org_user(
        &self,
        ctx: &Context,
        org_id: i64,
        login_or_email: &str,
        role: &str,
    ) -> Result<(), Error> {
        let req = Request::post(format!("/api/orgs/{}/users", org_id))
            .json(&json!({ "loginOrEmail": login_or_email, "role": role }))?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn update_org_user(
        &self,
        ctx: &Context,
        org_id: i64,
        user_id: i64,
        role: &str,
    ) -> Result<(), Error> {
        let req = Request::patch(format!("/api/orgs/{}/users/{}", org_id, user_id))
            .json(&json!({ "role": role }))?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn remove_org_user(
        &self,
        ctx: &Context,
        org_id: i64,
        user_id: i64,
    ) -> Result<(), Error> {
        let path = format!("/api/orgs/{}/users/{}", org_id, user_id);
        self.dispatch_empty(ctx, Request::delete(path)).await
    }

    pub async fn org_preferences(&self, ctx: &Context) -> Result<Preferences, Error> {
        self.dispatch(ctx, Request::get("/api/org/preferences"))
            .await
    }

    /// Change only the preferences that are set in `prefs`.
    pub async fn update_org_preferences(
        &self,
        ctx: &Context,
        prefs: &Preferences,
    ) -> Result<MessageResponse, Error> {
        let req = Request::patch("/api/org/preferences").json(prefs)?;
        self.dispatch(ctx, req).await
    }

    /// Replace all org preferences with `prefs`.
    pub async fn update_all_org_preferences(
        &self,
        ctx: &Context,
        prefs: &Preferences,
    ) -> Result<MessageResponse, Error> {
        let req = Request::put("/api/org/preferences").json(prefs)?;
        self.dispatch(ctx, req).await
    }
}
