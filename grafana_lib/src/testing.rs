//! In-memory transports for unit tests.

use crate::client::Client;
use crate::config::ClientConfig;
use crate::http::{HttpRequest, HttpResponse, Transport, TransportFuture};
use std::collections::VecDeque;
use std::future::pending;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_json(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body.as_bytes())));
    }

    pub(crate) fn push_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Value of the first `key` query parameter of request `index`.
    pub(crate) fn query_value(&self, index: usize, key: &str) -> Option<String> {
        self.requests()
            .get(index)?
            .url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
        self.requests.lock().unwrap().push(request);
        let next = self.responses.lock().unwrap().pop_front();
        Box::pin(async move {
            match next {
                Some(Ok(res)) => Ok(res),
                Some(Err(message)) => Err(message.into()),
                None => Err("no scripted response left".into()),
            }
        })
    }
}

/// Never answers; signals once a request has been handed to it.
#[derive(Default)]
pub(crate) struct HangingTransport {
    sent: Notify,
}

impl HangingTransport {
    pub(crate) async fn started(&self) {
        self.sent.notified().await;
    }
}

impl Transport for HangingTransport {
    fn send(&self, _request: HttpRequest) -> TransportFuture<'_> {
        self.sent.notify_one();
        Box::pin(pending())
    }
}

/// Client against `http://localhost:3000` backed by a fresh scripted transport.
pub(crate) fn scripted_client() -> (Client, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::new());
    let config = ClientConfig::new("http://localhost:3000").expect("static URL");
    (Client::with_transport(config, transport.clone()), transport)
}

/// Request body of request `index`, parsed as JSON.
pub(crate) fn sent_json(transport: &ScriptedTransport, index: usize) -> serde_json::Value {
    let body = transport.requests()[index]
        .body
        .clone()
        .expect("request has a body");
    serde_json::from_slice(&body).expect("body is JSON")
}
