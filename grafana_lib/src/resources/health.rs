use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::http::Request;
use serde::Deserialize;

/// Server build and database status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Health {
    pub commit: String,
    pub database: String,
    pub version: String,
}

impl Client {
    pub async fn health(&self, ctx: &Context) -> Result<Health, Error> {
        self.dispatch(ctx, Request::get("/api/health")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::scripted_client;

    #[tokio::test]
    async fn health_tolerates_missing_fields() {
        let (client, transport) = scripted_client();
        transport.push_json(200, r#"{"database":"ok","version":"10.4.1"}"#);
        let health = client.health(&Context::background()).await.unwrap();
        assert_eq!(health.database, "ok");
        assert_eq!(health.version, "10.4.1");
        assert!(health.commit.is_empty());
    }
}
