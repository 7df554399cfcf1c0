//! HTTP client for the Grafana REST API.
//!
//! Every resource operation funnels through [`Client::dispatch`] (or its
//! siblings): build a [`Request`], resolve it against the base URL, attach
//! authentication and standard headers, send it through the configured
//! [`Transport`], and map the status code to a decoded value or an error.
//! One attempt per call; nothing is retried or cached here.

use crate::config::ClientConfig;
use crate::context::{Context, Interrupt};
use crate::error::{ApiError, Error};
use crate::http::{HttpRequest, HttpResponse, ReqwestTransport, Request, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

const ORG_ID_HEADER: &str = "X-Grafana-Org-Id";

/// Grafana API client. Cheap to clone; clones share configuration and
/// transport (and therefore the connection pool).
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client using the default reqwest transport. Fails with
    /// [`Error::Config`] if a configured header cannot be sent.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        config.check_headers()?;
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client that sends through `transport`.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Create a client from `GRAFANA_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        let (config, _source) = ClientConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `request` and decode a 2xx JSON body into `T`.
    pub async fn dispatch<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        request: Request,
    ) -> Result<T, Error> {
        let method = request.method;
        let path = request.path.clone();
        let res = self.execute(ctx, request).await?;
        serde_json::from_slice(&res.body).map_err(|source| Error::Decode {
            method,
            path,
            body: res.text(),
            source,
        })
    }

    /// Send `request`; any 2xx body is ignored.
    pub async fn dispatch_empty(&self, ctx: &Context, request: Request) -> Result<(), Error> {
        self.execute(ctx, request).await.map(|_| ())
    }

    /// Send `request` and return the raw 2xx response.
    pub async fn execute(&self, ctx: &Context, request: Request) -> Result<HttpResponse, Error> {
        let method = request.method;
        let path = request.path.clone();
        let http_request = self.prepare(request)?;

        let started = Instant::now();
        let res = match ctx.run(self.transport.send(http_request)).await {
            Ok(Ok(res)) => res,
            Ok(Err(source)) => {
                tracing::debug!(%method, %path, error = %source, "grafana request failed");
                return Err(Error::Transport {
                    method,
                    path,
                    source,
                });
            }
            Err(interrupt) => {
                tracing::debug!(%method, %path, ?interrupt, "grafana request interrupted");
                return Err(match interrupt {
                    Interrupt::Cancelled => Error::Cancelled { method, path },
                    Interrupt::DeadlineExceeded => Error::DeadlineExceeded { method, path },
                });
            }
        };
        tracing::debug!(
            %method,
            %path,
            status = res.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "grafana request completed"
        );

        if !res.is_success() {
            return Err(Error::Api(ApiError::new(
                res.status,
                method,
                path,
                res.text(),
            )));
        }
        Ok(res)
    }

    /// Resolve URL and attach headers.
    fn prepare(&self, request: Request) -> Result<HttpRequest, Error> {
        let url = self.resolve(&request)?;
        self.config.check_headers()?;

        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            (
                "User-Agent".to_string(),
                self.config.user_agent().to_string(),
            ),
        ];
        if let Some(value) = self.config.auth().header_value() {
            headers.push(("Authorization".to_string(), value));
        }
        if let Some(org_id) = self.config.org_id() {
            headers.push((ORG_ID_HEADER.to_string(), org_id.to_string()));
        }
        headers.extend(self.config.headers().iter().cloned());
        if request.body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        Ok(HttpRequest {
            method: request.method,
            url,
            headers,
            body: request.body,
        })
    }

    /// Join the base URL's path with the request path and append the query.
    fn resolve(&self, request: &Request) -> Result<Url, Error> {
        let path = request.path.as_str();
        if !path.starts_with('/')
            || path.starts_with("//")
            || path.contains(['?', '#'])
            || path.split('/').any(is_dot_segment)
        {
            return Err(Error::InvalidPath(path.to_string()));
        }

        let mut url = self.config.base_url().clone();
        let joined = format!("{}{}", url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url.set_query(None);
        url.set_fragment(None);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        Ok(url)
    }
}

/// `.` and `..`, literal or percent-encoded. URL parsing resolves these, so a
/// request path holding one would reach a different resource.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Auth;
    use crate::context::CancellationToken;
    use crate::http::HttpMethod;
    use crate::testing::{HangingTransport, ScriptedTransport};
    use serde::Deserialize;
    use std::time::Duration;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Health {
        version: String,
    }

    fn client(base: &str, auth: Auth) -> (Client, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new());
        let config = ClientConfig::new(base).unwrap().with_auth(auth);
        (Client::with_transport(config, transport.clone()), transport)
    }

    #[tokio::test]
    async fn dispatch_decodes_success_body() {
        let (client, transport) = client("http://localhost:3000", Auth::None);
        transport.push_json(200, r#"{"version":"10.0.0"}"#);

        let health: Health = client
            .dispatch(&Context::background(), Request::get("/api/health"))
            .await
            .unwrap();
        assert_eq!(health.version, "10.0.0");

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].url.as_str(), "http://localhost:3000/api/health");
        assert_eq!(sent[0].header("Accept"), Some("application/json"));
        assert!(sent[0].header("Content-Type").is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_api_error_with_body() {
        let (client, transport) = client("http://localhost:3000", Auth::None);
        transport.push_json(404, r#"{"message":"not found"}"#);

        let err = client
            .dispatch_empty(&Context::background(), Request::delete("/api/orgs/42"))
            .await
            .unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.status, 404);
                assert_eq!(api.method, HttpMethod::Delete);
                assert_eq!(api.path, "/api/orgs/42");
                assert!(api.body.contains("not found"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_success_status_skips_decoding() {
        let (client, transport) = client("http://localhost:3000", Auth::None);
        // Body would decode fine; the status alone decides.
        transport.push_json(500, r#"{"version":"10.0.0"}"#);
        let err = client
            .dispatch::<Health>(&Context::background(), Request::get("/api/health"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn every_2xx_is_success() {
        let (client, transport) = client("http://localhost:3000", Auth::None);
        transport.push_json(201, r#"{"version":"1"}"#);
        transport.push_json(204, "");
        let ctx = Context::background();

        let created: Health = client.dispatch(&ctx, Request::post("/api/x")).await.unwrap();
        assert_eq!(created.version, "1");
        client
            .dispatch_empty(&ctx, Request::delete("/api/x/1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn undecodable_success_body_is_decode_error() {
        let (client, transport) = client("http://localhost:3000", Auth::None);
        transport.push_json(200, "not json");
        let err = client
            .dispatch::<Health>(&Context::background(), Request::get("/api/health"))
            .await
            .unwrap_err();
        match err {
            Error::Decode { path, body, .. } => {
                assert_eq!(path, "/api/health");
                assert_eq!(body, "not json");
            }
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn dispatch_empty_ignores_body() {
        let (client, transport) = client("http://localhost:3000", Auth::None);
        transport.push_json(200, "definitely not json");
        client
            .dispatch_empty(&Context::background(), Request::put("/api/orgs/1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn transport_failure_is_transport_error() {
        let (client, transport) = client("http://localhost:3000", Auth::None);
        transport.push_failure("connection refused");
        let err = client
            .dispatch_empty(&Context::background(), Request::get("/api/health"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn body_sets_content_type() {
        let (client, transport) = client("http://localhost:3000", Auth::None);
        transport.push_json(200, r#"{"orgId":3}"#);
        let req = Request::post("/api/orgs")
            .json(&serde_json::json!({"name": "ops"}))
            .unwrap();
        let _: serde_json::Value = client.dispatch(&Context::background(), req).await.unwrap();

        let sent = transport.requests().remove(0);
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(sent.body.as_deref(), Some(br#"{"name":"ops"}"#.as_slice()));
    }

    #[tokio::test]
    async fn base_path_prefix_and_query_are_applied() {
        let (client, transport) = client("https://example.com/grafana/?x=1", Auth::None);
        transport.push_json(200, "[]");
        let req = Request::get("/api/search")
            .query("type", "dash-db")
            .query("query", "cpu & mem");
        let _: Vec<serde_json::Value> = client.dispatch(&Context::background(), req).await.unwrap();
        assert_eq!(
            transport.requests()[0].url.as_str(),
            "https://example.com/grafana/api/search?type=dash-db&query=cpu+%26+mem"
        );
    }

    #[tokio::test]
    async fn absolute_or_malformed_paths_are_rejected_before_sending() {
        let (client, transport) = client("http://localhost:3000", Auth::None);
        let ctx = Context::background();
        for path in [
            "https://evil.example.com/api",
            "//evil.example.com/api",
            "api/health",
            "/api/search?query=x",
            "/api/folders/..",
            "/api/folders/.",
            "/api/folders/%2E%2E",
            "/api/./health",
            "/api/folders/.%2e/permissions",
        ] {
            let err = client.dispatch_empty(&ctx, Request::get(path)).await.unwrap_err();
            assert!(matches!(err, Error::InvalidPath(_)), "{}", path);
        }
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn dotted_identifiers_inside_a_segment_are_kept() {
        let (client, transport) = client("http://localhost:3000", Auth::None);
        transport.push_json(200, "{}");
        client
            .dispatch_empty(&Context::background(), Request::get("/api/folders/v1..2"))
            .await
            .unwrap();
        assert_eq!(transport.requests()[0].url.path(), "/api/folders/v1..2");
    }

    #[tokio::test]
    async fn malformed_headers_are_config_errors() {
        let (client, transport) = client("http://localhost:3000", Auth::token("abc\ndef"));
        let err = client
            .dispatch_empty(&Context::background(), Request::get("/api/health"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{:?}", err);
        assert!(transport.requests().is_empty());

        let config = ClientConfig::new("http://localhost:3000")
            .unwrap()
            .with_header("bad header", "x");
        assert!(matches!(Client::new(config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn no_auth_sends_no_authorization_header() {
        let (client, transport) = client("http://localhost:3000", Auth::None);
        transport.push_json(200, "{}");
        client
            .dispatch_empty(&Context::background(), Request::get("/api/health"))
            .await
            .unwrap();
        assert!(transport.requests()[0].header("Authorization").is_none());
    }

    #[tokio::test]
    async fn token_is_sent_on_every_request() {
        let (client, transport) = client("http://localhost:3000", Auth::token("glsa_abc"));
        let ctx = Context::background();
        for _ in 0..3 {
            transport.push_json(200, "{}");
            client
                .dispatch_empty(&ctx, Request::get("/api/health"))
                .await
                .unwrap();
        }
        let sent = transport.requests();
        assert_eq!(sent.len(), 3);
        for req in sent {
            assert_eq!(req.header("Authorization"), Some("Bearer glsa_abc"));
        }
    }

    #[tokio::test]
    async fn basic_auth_org_id_and_static_headers() {
        let transport = Arc::new(ScriptedTransport::new());
        let config = ClientConfig::new("http://localhost:3000")
            .unwrap()
            .with_auth(Auth::basic("admin", "admin"))
            .with_org_id(2)
            .with_header("X-Disable-Provenance", "true");
        let client = Client::with_transport(config, transport.clone());
        transport.push_json(200, "{}");
        client
            .dispatch_empty(&Context::background(), Request::get("/api/org"))
            .await
            .unwrap();

        let sent = transport.requests().remove(0);
        assert_eq!(sent.header("Authorization"), Some("Basic YWRtaW46YWRtaW4="));
        assert_eq!(sent.header("X-Grafana-Org-Id"), Some("2"));
        assert_eq!(sent.header("X-Disable-Provenance"), Some("true"));
    }

    #[tokio::test]
    async fn cancelled_context_fails_before_sending() {
        let (client, transport) = client("http://localhost:3000", Auth::None);
        let (token, rx) = CancellationToken::pair();
        token.cancel();
        let ctx = Context::background().with_cancellation(rx);

        let err = client
            .dispatch::<Health>(&ctx, Request::get("/api/health"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled { .. }));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn cancel_in_flight_returns_cancelled() {
        let transport = Arc::new(HangingTransport::default());
        let config = ClientConfig::new("http://localhost:3000").unwrap();
        let client = Client::with_transport(config, transport.clone());
        let (token, rx) = CancellationToken::pair();
        let ctx = Context::background().with_cancellation(rx);

        let call = tokio::spawn(async move {
            client
                .dispatch::<Health>(&ctx, Request::get("/api/health"))
                .await
        });
        transport.started().await;
        token.cancel();

        let err = call.await.unwrap().unwrap_err();
        assert!(matches!(err, Error::Cancelled { .. }));
        assert!(err.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_in_flight_returns_deadline_exceeded() {
        let transport = Arc::new(HangingTransport::default());
        let config = ClientConfig::new("http://localhost:3000").unwrap();
        let client = Client::with_transport(config, transport);
        let ctx = Context::background().with_timeout(Duration::from_secs(5));

        let err = client
            .dispatch::<Health>(&ctx, Request::get("/api/health"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DeadlineExceeded { .. }));
        assert!(err.is_cancelled());
    }
}
