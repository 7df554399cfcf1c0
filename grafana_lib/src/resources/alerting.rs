//! Alerting: legacy notification channels and the provisioning API (alert
//! rules, rule groups, message templates, mute timings).

use super::{is_zero, Created};
use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::helpers::{format_rule_duration, segment};
use crate::http::Request;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;

const ALERT_RULES: &str = "/api/v1/provisioning/alert-rules";
const TEMPLATES: &str = "/api/v1/provisioning/templates";
const MUTE_TIMINGS: &str = "/api/v1/provisioning/mute-timings";

/// Legacy alert notification channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertNotification {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    pub uid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_default: bool,
    pub disable_resolve_message: bool,
    pub send_reminder: bool,
    pub frequency: String,
    /// Notifier-specific settings; shape depends on `kind`.
    pub settings: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_fields: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_settings: Option<Value>,
}

/// A provisioned alert rule.
///
/// `for_duration` is a convenience: when `for_` is empty it is rendered into
/// the `for` field (`5m`, `1h30m`) before the rule is sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertRule {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    pub condition: String,
    pub data: Vec<AlertQuery>,
    /// `OK`, `Error`, or `Alerting`.
    pub exec_err_state: String,
    pub folder_uid: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// `OK`, `NoData`, or `Alerting`.
    pub no_data_state: String,
    pub org_id: i64,
    pub rule_group: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(rename = "for")]
    pub for_: String,
    #[serde(skip)]
    pub for_duration: Duration,
    pub provenance: String,
}

impl AlertRule {
    fn sync_for(&mut self) {
        if self.for_.is_empty() {
            self.for_ = format_rule_duration(self.for_duration);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertQuery {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub datasource_uid: String,
    pub model: Value,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub query_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ref_id: String,
    pub relative_time_range: RelativeTimeRange,
}

/// Seconds before evaluation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelativeTimeRange {
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleGroup {
    pub title: String,
    pub folder_uid: String,
    /// Evaluation interval in seconds.
    pub interval: i64,
    pub rules: Vec<AlertRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplate {
    pub name: String,
    pub template: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuteTiming {
    pub name: String,
    pub time_intervals: Vec<TimeInterval>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provenance: String,
}

/// Ranges are the strings the alertmanager accepts, e.g. `monday:friday`,
/// `1:7`, `january:march`, `2024`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeInterval {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub times: Vec<TimeRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weekdays: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub days_of_month: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub months: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub years: Vec<String>,
}

/// Time of day as `HH:MM`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeRange {
    #[serde(rename = "start_time")]
    pub start: String,
    #[serde(rename = "end_time")]
    pub end: String,
}

fn rule_group_path(folder_uid: &str, group: &str) -> String {
    format!(
        "/api/v1/provisioning/folder/{}/rule-groups/{}",
        segment(folder_uid),
        segment(group)
    )
}

impl Client {
    pub async fn alert_notifications(&self, ctx: &Context) -> Result<Vec<AlertNotification>, Error> {
        self.dispatch(ctx, Request::get("/api/alert-notifications/"))
            .await
    }

    pub async fn alert_notification(&self, ctx: &Context, id: i64) -> Result<AlertNotification, Error> {
        self.dispatch(ctx, Request::get(format!("/api/alert-notifications/{}", id)))
            .await
    }

    /// Create a notification channel and return its id.
    pub async fn new_alert_notification(
        &self,
        ctx: &Context,
        notification: &AlertNotification,
    ) -> Result<i64, Error> {
        let req = Request::post("/api/alert-notifications").json(notification)?;
        let created: Created = self.dispatch(ctx, req).await?;
        Ok(created.id)
    }

    pub async fn update_alert_notification(
        &self,
        ctx: &Context,
        notification: &AlertNotification,
    ) -> Result<(), Error> {
        let req = Request::put(format!("/api/alert-notifications/{}", notification.id))
            .json(notification)?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn delete_alert_notification(&self, ctx: &Context, id: i64) -> Result<(), Error> {
        let path = format!("/api/alert-notifications/{}", id);
        self.dispatch_empty(ctx, Request::delete(path)).await
    }

    pub async fn alert_rule(&self, ctx: &Context, uid: &str) -> Result<AlertRule, Error> {
        let path = format!("{}/{}", ALERT_RULES, segment(uid));
        self.dispatch(ctx, Request::get(path)).await
    }

    pub async fn alert_rule_group(
        &self,
        ctx: &Context,
        folder_uid: &str,
        name: &str,
    ) -> Result<RuleGroup, Error> {
        self.dispatch(ctx, Request::get(rule_group_path(folder_uid, name)))
            .await
    }

    /// Create or replace the rule group `group.title` in `group.folder_uid`.
    pub async fn set_alert_rule_group(&self, ctx: &Context, group: &RuleGroup) -> Result<(), Error> {
        let mut group = group.clone();
        group.rules.iter_mut().for_each(AlertRule::sync_for);
        let req = Request::put(rule_group_path(&group.folder_uid, &group.title)).json(&group)?;
        self.dispatch_empty(ctx, req).await
    }

    /// Create an alert rule and return the UID the server assigned.
    pub async fn new_alert_rule(&self, ctx: &Context, rule: &AlertRule) -> Result<String, Error> {
        let mut rule = rule.clone();
        rule.sync_for();
        let req = Request::post(ALERT_RULES).json(&rule)?;
        let created: AlertRule = self.dispatch(ctx, req).await?;
        Ok(created.uid)
    }

    pub async fn update_alert_rule(&self, ctx: &Context, rule: &AlertRule) -> Result<(), Error> {
        let mut rule = rule.clone();
        rule.sync_for();
        let req = Request::put(format!("{}/{}", ALERT_RULES, segment(&rule.uid))).json(&rule)?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn delete_alert_rule(&self, ctx: &Context, uid: &str) -> Result<(), Error> {
        let path = format!("{}/{}", ALERT_RULES, segment(uid));
        self.dispatch_empty(ctx, Request::delete(path)).await
    }

    pub async fn message_templates(&self, ctx: &Context) -> Result<Vec<MessageTemplate>, Error> {
        self.dispatch(ctx, Request::get(TEMPLATES)).await
    }

    pub async fn message_template(&self, ctx: &Context, name: &str) -> Result<MessageTemplate, Error> {
        let path = format!("{}/{}", TEMPLATES, segment(name));
        self.dispatch(ctx, Request::get(path)).await
    }

    /// Create or replace template `name`.
    pub async fn set_message_template(
        &self,
        ctx: &Context,
        name: &str,
        content: &str,
    ) -> Result<(), Error> {
        let req = Request::put(format!("{}/{}", TEMPLATES, segment(name)))
            .json(&json!({ "template": content }))?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn delete_message_template(&self, ctx: &Context, name: &str) -> Result<(), Error> {
        let path = format!("{}/{}", TEMPLATES, segment(name));
        self.dispatch_empty(ctx, Request::delete(path)).await
    }

    pub async fn mute_timings(&self, ctx: &Context) -> Result<Vec<MuteTiming>, Error> {
        self.dispatch(ctx, Request::get(MUTE_TIMINGS)).await
    }

    pub async fn mute_timing(&self, ctx: &Context, name: &str) -> Result<MuteTiming, Error> {
        let path = format!("{}/{}", MUTE_TIMINGS, segment(name));
        self.dispatch(ctx, Request::get(path)).await
    }

    pub async fn new_mute_timing(&self, ctx: &Context, timing: &MuteTiming) -> Result<(), Error> {
        let req = Request::post(MUTE_TIMINGS).json(timing)?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn update_mute_timing(&self, ctx: &Context, timing: &MuteTiming) -> Result<(), Error> {
        let req = Request::put(format!("{}/{}", MUTE_TIMINGS, segment(&timing.name))).json(timing)?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn delete_mute_timing(&self, ctx: &Context, name: &str) -> Result<(), Error> {
        let path = format!("{}/{}", MUTE_TIMINGS, segment(name));
        self.dispatch_empty(ctx, Request::delete(path)).await
    }
}
