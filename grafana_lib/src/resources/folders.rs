use super::is_false;
use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::helpers::segment;
use crate::http::Request;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Folder {
    pub id: i64,
    pub uid: String,
    pub title: String,
    pub url: String,
}

/// Options for [`Client::new_folder`]. Without a `uid` the server picks one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFolder {
    pub title: String,
    pub uid: Option<String>,
}

/// Options for [`Client::update_folder`]. `new_uid` renames the folder's UID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderUpdate {
    pub title: String,
    pub new_uid: Option<String>,
}

#[derive(Serialize)]
struct FolderPayload<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    uid: Option<&'a str>,
    #[serde(skip_serializing_if = "is_false")]
    overwrite: bool,
}

impl Client {
    pub async fn folders(&self, ctx: &Context) -> Result<Vec<Folder>, Error> {
        self.dispatch(ctx, Request::get("/api/folders/")).await
    }

    pub async fn folder(&self, ctx: &Context, id: i64) -> Result<Folder, Error> {
        self.dispatch(ctx, Request::get(format!("/api/folders/id/{}", id)))
            .await
    }

    pub async fn folder_by_uid(&self, ctx: &Context, uid: &str) -> Result<Folder, Error> {
        self.dispatch(ctx, Request::get(format!("/api/folders/{}", segment(uid))))
            .await
    }

    pub async fn new_folder(&self, ctx: &Context, folder: &NewFolder) -> Result<Folder, Error> {
        let payload = FolderPayload {
            title: &folder.title,
            uid: folder.uid.as_deref(),
            overwrite: false,
        };
        let req = Request::post("/api/folders").json(&payload)?;
        self.dispatch(ctx, req).await
    }

    /// Update the folder's title (and optionally its UID), overwriting any
    /// concurrent change.
    pub async fn update_folder(
        &self,
        ctx: &Context,
        uid: &str,
        update: &FolderUpdate,
    ) -> Result<(), Error> {
        let payload = FolderPayload {
            title: &update.title,
            uid: update.new_uid.as_deref(),
            overwrite: true,
        };
        let req = Request::put(format!("/api/folders/{}", segment(uid))).json(&payload)?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn delete_folder(&self, ctx: &Context, uid: &str) -> Result<(), Error> {
        let path = format!("/api/folders/{}", segment(uid));
        self.dispatch_empty(ctx, Request::delete(path)).await
    }
}
