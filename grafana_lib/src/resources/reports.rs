use super::{is_zero, Created};
use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::http::Request;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// `once`, `hourly`, `daily`, `weekly`, `monthly`, `last`, or `custom`.
    pub frequency: String,
    pub interval_frequency: String,
    pub interval_amount: i64,
    pub workdays_only: bool,
    pub time_zone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub day_of_month: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportTimeRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportOptions {
    pub orientation: String,
    pub layout: String,
    pub time_range: ReportTimeRange,
}

/// A scheduled PDF report (Grafana Enterprise).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub user_id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub org_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    pub dashboard_id: i64,
    pub dashboard_uid: String,
    pub name: String,
    pub recipients: String,
    pub reply_to: String,
    pub message: String,
    pub schedule: ReportSchedule,
    pub options: ReportOptions,
    #[serde(rename = "enableDashboardUrl")]
    pub enable_dashboard_url: bool,
    pub enable_csv: bool,
}

impl Client {
    pub async fn report(&self, ctx: &Context, id: i64) -> Result<Report, Error> {
        self.dispatch(ctx, Request::get(format!("/api/reports/{}", id)))
            .await
    }

    /// Create a report and return its id.
    pub async fn new_report(&self, ctx: &Context, report: &Report) -> Result<i64, Error> {
        let req = Request::post("/api/reports").json(report)?;
        let created: Created = self.dispatch(ctx, req).await?;
        Ok(created.id)
    }

    pub async fn update_report(&self, ctx: &Context, report: &Report) -> Result<(), Error> {
        let req = Request::put(format!("/api/reports/{}", report.id)).json(report)?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn delete_report(&self, ctx: &Context, id: i64) -> Result<(), Error> {
        self.dispatch_empty(ctx, Request::delete(format!("/api/reports/{}", id)))
            .await
    }
}
