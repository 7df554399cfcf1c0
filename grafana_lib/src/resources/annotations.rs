use super::{is_false, is_zero, Created, MessageResponse};
use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::http::Request;
use serde::{Deserialize, Serialize};

/// An annotation. Times are epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Annotation {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub alert_id: i64,
    pub dashboard_id: i64,
    pub panel_id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub user_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub new_state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prev_state: String,
    pub time: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub time_end: i64,
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub metric: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub region_id: i64,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_region: bool,
}

/// Graphite-format annotation. `when` is epoch seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphiteAnnotation {
    pub what: String,
    pub when: i64,
    pub data: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Client {
    /// Find annotations. `params` are passed through as query parameters
    /// (`from`, `to`, `limit`, `dashboardUID`, `tags`, `type`, ...).
    pub async fn annotations<K, V>(
        &self,
        ctx: &Context,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Vec<Annotation>, Error>
    where
        K: Into<String>,
        V: ToString,
    {
        let req = Request::get("/api/annotations").query_pairs(params);
        self.dispatch(ctx, req).await
    }

    /// Create an annotation and return its id.
    pub async fn new_annotation(&self, ctx: &Context, annotation: &Annotation) -> Result<i64, Error> {
        let req = Request::post("/api/annotations").json(annotation)?;
        let created: Created = self.dispatch(ctx, req).await?;
        Ok(created.id)
    }

    pub async fn new_graphite_annotation(
        &self,
        ctx: &Context,
        annotation: &GraphiteAnnotation,
    ) -> Result<i64, Error> {
        let req = Request::post("/api/annotations/graphite").json(annotation)?;
        let created: Created = self.dispatch(ctx, req).await?;
        Ok(created.id)
    }

    /// Replace annotation `id`; returns the server's message.
    pub async fn update_annotation(
        &self,
        ctx: &Context,
        id: i64,
        annotation: &Annotation,
    ) -> Result<String, Error> {
        let req = Request::put(format!("/api/annotations/{}", id)).json(annotation)?;
        let res: MessageResponse = self.dispatch(ctx, req).await?;
        Ok(res.message)
    }

    /// Change only the fields set in `annotation`.
    pub async fn patch_annotation(
        &self,
        ctx: &Context,
        id: i64,
        annotation: &Annotation,
    ) -> Result<String, Error> {
        let req = Request::patch(format!("/api/annotations/{}", id)).json(annotation)?;
        let res: MessageResponse = self.dispatch(ctx, req).await?;
        Ok(res.message)
    }

    pub async fn delete_annotation(&self, ctx: &Context, id: i64) -> Result<String, Error> {
        let req = Request::delete(format!("/api/annotations/{}", id));
        let res: MessageResponse = self.dispatch(ctx, req).await?;
        Ok(res.message)
    }

    pub async fn delete_annotation_by_region_id(
        &self,
        ctx: &Context,
        region_id: i64,
    ) -> Result<String, Error> {
        let req = Request::delete(format!("/api/annotations/region/{}", region_id));
        let res: MessageResponse = self.dispatch(ctx, req).await?;
        Ok(res.message)
    }
}
