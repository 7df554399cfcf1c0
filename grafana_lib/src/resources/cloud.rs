//! Grafana Cloud plugin installations and the plugin catalog.

use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::helpers::segment;
use crate::http::Request;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Plugin {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub version: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudPluginInstallation {
    pub id: i64,
    pub instance_id: i64,
    pub instance_url: String,
    pub instance_slug: String,
    pub plugin_id: i64,
    pub plugin_slug: String,
    pub plugin_name: String,
    pub version: String,
}

fn installation_path(stack: &str, plugin: &str) -> String {
    format!("/api/instances/{}/plugins/{}", segment(stack), segment(plugin))
}

impl Client {
    pub async fn install_cloud_plugin(
        &self,
        ctx: &Context,
        stack: &str,
        plugin: &str,
        version: &str,
    ) -> Result<CloudPluginInstallation, Error> {
        let req = Request::post(format!("/api/instances/{}/plugins", segment(stack)))
            .json(&json!({ "plugin": plugin, "version": version }))?;
        self.dispatch(ctx, req).await
    }

    pub async fn uninstall_cloud_plugin(
        &self,
        ctx: &Context,
        stack: &str,
        plugin: &str,
    ) -> Result<(), Error> {
        self.dispatch_empty(ctx, Request::delete(installation_path(stack, plugin)))
            .await
    }

    /// Whether `plugin` is installed on `stack`. A 404 means "not installed";
    /// any other failure is returned.
    pub async fn is_cloud_plugin_installed(
        &self,
        ctx: &Context,
        stack: &str,
        plugin: &str,
    ) -> Result<bool, Error> {
        match self
            .execute(ctx, Request::get(installation_path(stack, plugin)))
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn cloud_plugin_installation(
        &self,
        ctx: &Context,
        stack: &str,
        plugin: &str,
    ) -> Result<CloudPluginInstallation, Error> {
        self.dispatch(ctx, Request::get(installation_path(stack, plugin)))
            .await
    }

    pub async fn plugin_by_slug(&self, ctx: &Context, slug: &str) -> Result<Plugin, Error> {
        self.dispatch(ctx, Request::get(format!("/api/plugins/{}", segment(slug))))
            .await
    }

    pub async fn plugin_by_id(&self, ctx: &Context, id: i64) -> Result<Plugin, Error> {
        self.dispatch(ctx, Request::get(format!("/api/plugins/{}", id)))
            .await
    }
}
