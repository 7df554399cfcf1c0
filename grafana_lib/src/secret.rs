//! Secret backends for reading Grafana credentials.
//!
//! Each backend shells out to its vendor CLI and is configured through
//! `GRAFANA_*` variables. The secret read is a credential string in the
//! form accepted by [`Auth::parse`](crate::Auth::parse).

use std::process::{Command, Stdio};

/// A password-manager CLI that can hold the Grafana credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretBackend {
    /// `op read <GRAFANA_OP_REF>`
    OnePassword,
    /// `bw get password <GRAFANA_BW_ITEM_ID>`, optional `GRAFANA_BW_SESSION`.
    Bitwarden,
    /// `keepassxc-cli show -a <attr> <GRAFANA_KPXC_DB> <GRAFANA_KPXC_ENTRY>`.
    KeePassXc,
}

impl SecretBackend {
    /// Backends in resolution order.
    pub const ALL: [SecretBackend; 3] = [
        SecretBackend::OnePassword,
        SecretBackend::Bitwarden,
        SecretBackend::KeePassXc,
    ];

    /// Read the secret, or `None` when the backend is not configured or the
    /// CLI fails. Variables are read through `lookup`.
    pub fn read(&self, lookup: &dyn Fn(&str) -> Option<String>) -> Option<String> {
        let command = self.command(lookup)?;
        run(&command).filter(|s| !s.is_empty())
    }

    /// Command line (and extra env) for this backend, if configured.
    fn command(&self, lookup: &dyn Fn(&str) -> Option<String>) -> Option<BackendCommand> {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        match self {
            SecretBackend::OnePassword => {
                let reference = var("GRAFANA_OP_REF")?;
                Some(BackendCommand::new(["op", "read", reference.as_str()]))
            }
            SecretBackend::Bitwarden => {
                let item = var("GRAFANA_BW_ITEM_ID")?;
                let mut cmd = BackendCommand::new(["bw", "get", "password", item.as_str()]);
                if let Some(session) = var("GRAFANA_BW_SESSION") {
                    cmd.env.push(("BW_SESSION".to_string(), session));
                }
                Some(cmd)
            }
            SecretBackend::KeePassXc => {
                let db = var("GRAFANA_KPXC_DB")?;
                let entry = var("GRAFANA_KPXC_ENTRY")?;
                let attr = var("GRAFANA_KPXC_ATTRIBUTE").unwrap_or_else(|| "Password".to_string());
                Some(BackendCommand::new([
                    "keepassxc-cli",
                    "show",
                    "-a",
                    attr.as_str(),
                    db.as_str(),
                    entry.as_str(),
                ]))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BackendCommand {
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl BackendCommand {
    fn new<const N: usize>(args: [&str; N]) -> Self {
        Self {
            args: args.iter().map(|s| s.to_string()).collect(),
            env: Vec::new(),
        }
    }
}

/// Stderr is discarded so CLI diagnostics never leak secrets into output.
fn run(command: &BackendCommand) -> Option<String> {
    let (bin, rest) = command.args.split_first()?;
    let out = Command::new(bin)
        .args(rest)
        .envs(command.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}
