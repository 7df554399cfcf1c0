use super::is_zero;
use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::helpers::segment;
use crate::http::Request;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub order: i64,
    pub title: String,
}

/// Servers before 9.0 address playlists by numeric `id`, later ones by `uid`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playlist {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,
    pub name: String,
    pub interval: String,
    pub items: Vec<PlaylistItem>,
}

impl Playlist {
    /// The identifier used in playlist URLs: the UID, or the numeric id when
    /// the server did not assign one.
    pub fn query_id(&self) -> String {
        if self.uid.is_empty() {
            self.id.to_string()
        } else {
            self.uid.clone()
        }
    }
}

impl Client {
    pub async fn playlist(&self, ctx: &Context, id_or_uid: &str) -> Result<Playlist, Error> {
        let path = format!("/api/playlists/{}", segment(id_or_uid));
        self.dispatch(ctx, Request::get(path)).await
    }

    /// Create a playlist and return its [`query_id`](Playlist::query_id).
    pub async fn new_playlist(&self, ctx: &Context, playlist: &Playlist) -> Result<String, Error> {
        let req = Request::post("/api/playlists").json(playlist)?;
        let created: Playlist = self.dispatch(ctx, req).await?;
        Ok(created.query_id())
    }

    pub async fn update_playlist(&self, ctx: &Context, playlist: &Playlist) -> Result<(), Error> {
        let path = format!("/api/playlists/{}", segment(&playlist.query_id()));
        let req = Request::put(path).json(playlist)?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn delete_playlist(&self, ctx: &Context, id_or_uid: &str) -> Result<(), Error> {
        let path = format!("/api/playlists/{}", segment(id_or_uid));
        self.dispatch_empty(ctx, Request::delete(path)).await
    }
}
