//! Request descriptors, wire-level HTTP types, and the pluggable transport.
//!
//! A [`Request`] describes one API call relative to the client's base URL.
//! The client resolves it into an [`HttpRequest`] (absolute URL plus headers)
//! and hands that to a [`Transport`], which returns an [`HttpResponse`].
//! Status interpretation and decoding stay in the client; transports only
//! move bytes.

use crate::error::Error;
use reqwest::Client as HttpClient;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use url::Url;

/// Boxed error returned by transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Future returned by [`Transport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, BoxError>> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API call: verb, base-URL-relative path, ordered query pairs, optional
/// pre-serialized JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Append a query pair. Repeated keys are kept in insertion order.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append every pair from `pairs`, in order.
    pub fn query_pairs<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    /// Replace all values of `key` with a single value, keeping its position
    /// if it was already present.
    pub fn set_query(&mut self, key: &str, value: impl ToString) {
        let value = value.to_string();
        match self.query.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.query[first].1 = value;
                let mut index = 0;
                self.query.retain(|(k, _)| {
                    let keep = k != key || index == first;
                    index += 1;
                    keep
                });
            }
            None => self.query.push((key.to_string(), value)),
        }
    }

    /// Serialize `payload` as the JSON body. Fails before anything is sent.
    pub fn json<B: Serialize + ?Sized>(mut self, payload: &B) -> Result<Self, Error> {
        let body = serde_json::to_vec(payload).map_err(|source| Error::Encode {
            path: self.path.clone(),
            source,
        })?;
        self.body = Some(body);
        Ok(self)
    }

    /// Use already-serialized bytes as the body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A fully resolved request as handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status code and the complete body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Body as trimmed UTF-8 text; invalid sequences are replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).trim().to_string()
    }
}

/// Sends one resolved request and reads the full response body.
///
/// Implementations own their connection pooling. They must not interpret
/// status codes: any response that arrived is `Ok`.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Default transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
}

impl ReqwestTransport {
    /// Build a reqwest client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }

    /// Wrap an existing reqwest client (shares its connection pool).
    pub fn with_client(http: HttpClient) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let mut req = self.http.request(request.method.to_reqwest(), request.url);
            for (name, value) in &request.headers {
                req = req.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                req = req.body(body);
            }
            let res = req.send().await?;
            let status = res.status().as_u16();
            let body = res.bytes().await?;
            Ok(HttpResponse::new(status, body.to_vec()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_keeps_repeated_keys_in_order() {
        let req = Request::get("/api/search")
            .query("tag", "a")
            .query("tag", "b")
            .query("type", "dash-db");
        assert_eq!(
            req.query,
            vec![
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
                ("type".to_string(), "dash-db".to_string()),
            ]
        );
    }

    #[test]
    fn set_query_replaces_in_place() {
        let mut req = Request::get("/api/search")
            .query("page", 1)
            .query("limit", 10)
            .query("page", 7);
        req.set_query("page", 2);
        assert_eq!(
            req.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
        req.set_query("type", "dash-db");
        assert_eq!(req.query.last().unwrap().0, "type");
    }

    #[test]
    fn json_body_omits_absent_optionals() {
        #[derive(Serialize)]
        struct Payload {
            title: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            uid: Option<String>,
        }
        let req = Request::post("/api/folders")
            .json(&Payload {
                title: "Ops".to_string(),
                uid: None,
            })
            .unwrap();
        assert_eq!(req.body.as_deref(), Some(br#"{"title":"Ops"}"#.as_slice()));
    }

    #[test]
    fn json_encode_failure_is_reported_with_path() {
        use std::collections::HashMap;
        // Non-string map keys cannot be encoded as JSON object keys.
        let mut bad: HashMap<(i32, i32), i32> = HashMap::new();
        bad.insert((1, 2), 3);
        let err = Request::post("/api/orgs").json(&bad).unwrap_err();
        assert!(matches!(err, Error::Encode { ref path, .. } if path == "/api/orgs"));
    }

    #[test]
    fn response_success_range_and_text() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(299, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(300, "").is_success());
        assert_eq!(HttpResponse::new(404, "  not found\n").text(), "not found");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: Url::parse("http://localhost:3000/api/health").unwrap(),
            headers: vec![("Authorization".to_string(), "Bearer t".to_string())],
            body: None,
        };
        assert_eq!(req.header("authorization"), Some("Bearer t"));
        assert_eq!(req.header("x-grafana-org-id"), None);
    }
}
