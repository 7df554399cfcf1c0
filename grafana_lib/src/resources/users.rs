//! Users and server-admin user management.

use super::{is_false, is_zero, Created, PAGE_SIZE};
use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::http::Request;
use crate::pagination::Paginator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A user account. Also the payload for creating and updating users; empty
/// fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub login: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub theme: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub org_id: i64,
    #[serde(rename = "isGrafanaAdmin", skip_serializing_if = "is_false")]
    pub is_admin: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_disabled: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_external: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub auth_labels: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub avatar_url: String,
    /// Only sent when creating a user; never returned.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
}

/// A row of the user list and user search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSearch {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub login: String,
    pub is_admin: bool,
    pub is_disabled: bool,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub last_seen_at_age: String,
    pub auth_labels: Vec<String>,
    pub avatar_url: String,
}

#[derive(Deserialize)]
struct UserSearchPage {
    #[serde(default)]
    users: Vec<UserSearch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PauseAllAlertsResponse {
    pub alerts_affected: i64,
    pub state: String,
    pub message: String,
}

impl Client {
    /// Every user on the server, fetched page by page.
    pub async fn users(&self, ctx: &Context) -> Result<Vec<UserSearch>, Error> {
        let paginator = Paginator::pages("page", "perpage", PAGE_SIZE);
        self.paginate(ctx, Request::get("/api/users"), &paginator)
            .await
    }

    /// Every user matching `query` (login, email, or name), fetched page by
    /// page.
    pub async fn search_users(&self, ctx: &Context, query: &str) -> Result<Vec<UserSearch>, Error> {
        let paginator = Paginator::pages("page", "perpage", PAGE_SIZE);
        let req = Request::get("/api/users/search").query("query", query);
        self.paginate_by(ctx, req, &paginator, |page: UserSearchPage| page.users)
            .await
    }

    pub async fn user(&self, ctx: &Context, id: i64) -> Result<User, Error> {
        self.dispatch(ctx, Request::get(format!("/api/users/{}", id)))
            .await
    }

    /// Look a user up by login or email.
    pub async fn user_by_email(&self, ctx: &Context, email: &str) -> Result<User, Error> {
        let req = Request::get("/api/users/lookup").query("loginOrEmail", email);
        self.dispatch(ctx, req).await
    }

    pub async fn update_user(&self, ctx: &Context, user: &User) -> Result<(), Error> {
        let req = Request::put(format!("/api/users/{}", user.id)).json(user)?;
        self.dispatch_empty(ctx, req).await
    }

    /// Create a user (server admin only) and return its id.
    pub async fn create_user(&self, ctx: &Context, user: &User) -> Result<i64, Error> {
        let req = Request::post("/api/admin/users").json(user)?;
        let created: Created = self.dispatch(ctx, req).await?;
        Ok(created.id)
    }

    pub async fn delete_user(&self, ctx: &Context, id: i64) -> Result<(), Error> {
        self.dispatch_empty(ctx, Request::delete(format!("/api/admin/users/{}", id)))
            .await
    }

    pub async fn update_user_password(
        &self,
        ctx: &Context,
        id: i64,
        password: &str,
    ) -> Result<(), Error> {
        let req = Request::put(format!("/api/admin/users/{}/password", id))
            .json(&json!({ "password": password }))?;
        self.dispatch_empty(ctx, req).await
    }

    /// Grant or revoke server admin.
    pub async fn update_user_permissions(
        &self,
        ctx: &Context,
        id: i64,
        is_admin: bool,
    ) -> Result<(), Error> {
        let req = Request::put(format!("/api/admin/users/{}/permissions", id))
            .json(&json!({ "isGrafanaAdmin": is_admin }))?;
        self.dispatch_empty(ctx, req).await
    }

    /// Pause every legacy alert on the server.
    pub async fn pause_all_alerts(&self, ctx: &Context) -> Result<PauseAllAlertsResponse, Error> {
        let req = Request::post("/api/admin/pause-all-alerts").json(&json!({ "paused": true }))?;
        self.dispatch(ctx, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{scripted_client, sent_json};

    #[tokio::test]
    async fn users_pages_with_page_and_perpage() {
        let (client, transport) = scripted_client();
        transport.push_json(200, r#"[{"id":1,"login":"admin"},{"id":2,"login":"viewer"}]"#);
        let users = client.users(&Context::background()).await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].login, "viewer");
        assert_eq!(transport.query_value(0, "page").as_deref(), Some("1"));
        assert_eq!(transport.query_value(0, "perpage").as_deref(), Some("1000"));
    }

    #[tokio::test]
    async fn search_users_unwraps_envelope() {
        let (client, transport) = scripted_client();
        transport.push_json(
            200,
            r#"{"totalCount":1,"users":[{"id":4,"email":"a@example.com","lastSeenAt":"2024-05-01T10:00:00Z"}],"page":1,"perPage":1000}"#,
        );
        let users = client
            .search_users(&Context::background(), "a@")
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
        assert!(users[0].last_seen_at.is_some());
        assert_eq!(transport.query_value(0, "query").as_deref(), Some("a@"));
    }

    #[tokio::test]
    async fn user_by_email_uses_lookup_query() {
        let (client, transport) = scripted_client();
        transport.push_json(200, r#"{"id":5,"email":"ops@example.com","isGrafanaAdmin":true}"#);
        let user = client
            .user_by_email(&Context::background(), "ops@example.com")
            .await
            .unwrap();
        assert!(user.is_admin);
        assert_eq!(transport.requests()[0].url.path(), "/api/users/lookup");
        assert_eq!(
            transport.query_value(0, "loginOrEmail").as_deref(),
            Some("ops@example.com")
        );
    }

    #[tokio::test]
    async fn create_user_omits_empty_fields() {
        let (client, transport) = scripted_client();
        transport.push_json(200, r#"{"id":12,"message":"User created"}"#);
        let user = User {
            login: "bot".to_string(),
            email: "bot@example.com".to_string(),
            password: "s3cret".to_string(),
            ..Default::default()
        };
        let id = client.create_user(&Context::background(), &user).await.unwrap();
        assert_eq!(id, 12);
        assert_eq!(
            sent_json(&transport, 0),
            json!({"email": "bot@example.com", "login": "bot", "password": "s3cret"})
        );
    }

    #[tokio::test]
    async fn pause_all_alerts_posts_paused_flag() {
        let (client, transport) = scripted_client();
        transport.push_json(200, r#"{"alertsAffected":3,"state":"Paused","message":"alerts paused"}"#);
        let res = client.pause_all_alerts(&Context::background()).await.unwrap();
        assert_eq!(res.alerts_affected, 3);
        assert_eq!(sent_json(&transport, 0), json!({"paused": true}));
    }
}
