//! Grafana HTTP API client library.
//!
//! Provides a typed, async client for the Grafana REST API: orgs, users,
//! folders, dashboards, annotations, access control, alerting provisioning,
//! and Grafana Cloud plugin management. Every operation goes through one
//! dispatcher that handles auth, status mapping, and JSON decoding; list
//! operations page through results with [`Paginator`].
//!
//! ```no_run
//! # async fn run() -> Result<(), grafana_lib::Error> {
//! use grafana_lib::{Auth, Client, ClientConfig, Context};
//!
//! let config = ClientConfig::new("http://localhost:3000")?.with_auth(Auth::basic("admin", "admin"));
//! let client = Client::new(config)?;
//! let health = client.health(&Context::background()).await?;
//! println!("grafana {}", health.version);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod helpers;
pub mod http;
pub mod pagination;
pub mod resources;
pub mod secret;

#[cfg(test)]
mod testing;

pub use auth::Auth;
pub use client::Client;
pub use config::ClientConfig;
pub use context::{CancellationReceiver, CancellationToken, Context, Interrupt};
pub use error::{ApiError, Error};
pub use helpers::{format_rule_duration, resolve_auth, AuthSource};
pub use http::{
    BoxError, HttpMethod, HttpRequest, HttpResponse, Request, ReqwestTransport, Transport,
    TransportFuture,
};
pub use pagination::Paginator;
pub use secret::SecretBackend;

/// Library version for User-Agent and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
