//! External (IdP) groups synced into teams.

use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::helpers::segment;
use crate::http::Request;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamGroup {
    pub org_id: i64,
    pub team_id: i64,
    #[serde(rename = "groupId", alias = "groupID")]
    pub group_id: String,
}

impl Client {
    pub async fn team_groups(&self, ctx: &Context, team_id: i64) -> Result<Vec<TeamGroup>, Error> {
        self.dispatch(ctx, Request::get(format!("/api/teams/{}/groups", team_id)))
            .await
    }

    pub async fn new_team_group(&self, ctx: &Context, team_id: i64, group_id: &str) -> Result<(), Error> {
        let req = Request::post(format!("/api/teams/{}/groups", team_id))
            .json(&json!({ "groupId": group_id }))?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn delete_team_group(
        &self,
        ctx: &Context,
        team_id: i64,
        group_id: &str,
    ) -> Result<(), Error> {
        let path = format!("/api/teams/{}/groups/{}", team_id, segment(group_id));
        self.dispatch_empty(ctx, Request::delete(path)).await
    }
}
