//! Helpers for credential resolution, path building, and duration formatting.

use crate::auth::Auth;
use crate::secret::SecretBackend;
use std::borrow::Cow;
use std::time::Duration;

/// Where the client's credentials came from (for diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// `GRAFANA_AUTH`.
    Environment,
    Secret(SecretBackend),
    /// Nothing configured; requests are sent unauthenticated.
    Unauthenticated,
}

/// Resolve credentials: `GRAFANA_AUTH` first, then the secret backends in
/// order (1Password, Bitwarden, KeePassXC). Falls back to [`Auth::None`].
pub fn resolve_auth(lookup: &dyn Fn(&str) -> Option<String>) -> (Auth, AuthSource) {
    if let Some(raw) = lookup("GRAFANA_AUTH") {
        let auth = Auth::parse(&raw);
        if !auth.is_none() {
            return (auth, AuthSource::Environment);
        }
    }
    for backend in SecretBackend::ALL {
        if let Some(secret) = backend.read(lookup) {
            let auth = Auth::parse(&secret);
            if !auth.is_none() {
                return (auth, AuthSource::Secret(backend));
            }
        }
    }
    (Auth::None, AuthSource::Unauthenticated)
}

/// Percent-encode a caller-supplied identifier for use as one path segment.
/// An identifier of `.` or `..` is left as is and the client refuses the
/// resulting path with [`Error::InvalidPath`](crate::Error::InvalidPath).
pub fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Format a duration the way alert rules expect (`1h30m`, `90d`, `0s`).
///
/// Years and weeks are only used when they divide the remainder exactly;
/// sub-millisecond precision is dropped.
pub fn format_rule_duration(d: Duration) -> String {
    const MS_PER_SECOND: u128 = 1000;
    const MS_PER_MINUTE: u128 = 60 * MS_PER_SECOND;
    const MS_PER_HOUR: u128 = 60 * MS_PER_MINUTE;
    const MS_PER_DAY: u128 = 24 * MS_PER_HOUR;
    const UNITS: [(&str, u128, bool); 7] = [
        ("y", 365 * MS_PER_DAY, true),
        ("w", 7 * MS_PER_DAY, true),
        ("d", MS_PER_DAY, false),
        ("h", MS_PER_HOUR, false),
        ("m", MS_PER_MINUTE, false),
        ("s", MS_PER_SECOND, false),
        ("ms", 1, false),
    ];

    let mut ms = d.as_millis();
    if ms == 0 {
        return "0s".to_string();
    }
    let mut out = String::new();
    for (unit, mult, exact) in UNITS {
        if exact && ms % mult != 0 {
            continue;
        }
        let v = ms / mult;
        if v > 0 {
            out.push_str(&format!("{}{}", v, unit));
            ms -= v * mult;
        }
    }
    out
}
