//! The four operations on a selected network service: apply, reset,
//! backup, and restore.
//!
//! Mutations are best-effort and never transactional. A step that the OS
//! rejects is logged with the command's own diagnostic and the next step
//! still runs; nothing is rolled back. Queries, by contrast, are fatal:
//! a backup that cannot read the current state has nothing to write.

use crate::config::NetworkConfig;
use crate::error::Result;
use crate::ops::{AUTOMATIC_SENTINEL, NetworkOps};
use std::path::Path;

/// Sentence prefix `networksetup -getdnsservers` prints when no servers
/// are configured.
const NO_DNS_PREFIX: &str = "There aren't any DNS Servers set on";

/// Sentence prefix `networksetup -getsearchdomains` prints when no domains
/// are configured.
const NO_DOMAINS_PREFIX: &str = "There aren't any Search Domains set on";

const NO_DNS_COMMENT: &str = "# No DNS servers were set on this service.";
const NO_DOMAINS_COMMENT: &str = "# No search domains were set on this service.";
const ROUTES_COMMENT: &str = "# Manual routes are not backed up.";
const GATEWAY_COMMENT: &str = "# Manual gateway is not backed up.";

/// Applies every non-empty attribute of `config` to `service`.
///
/// Empty attributes are skipped with an informational message instead of
/// being sent to the OS, since an empty list would itself clear the
/// setting. Routes each pair with the single configured gateway and are
/// added one at a time, in file order.
pub fn apply(ops: &dyn NetworkOps, service: &str, config: &NetworkConfig) {
    if config.dns_servers.is_empty() {
        tracing::info!("no DNS servers configured, skipping");
    } else {
        match ops.set_dns_servers(service, &config.dns_servers) {
            Ok(()) => {
                tracing::info!(servers = %config.dns_servers.join(", "), "DNS servers set");
            }
            Err(e) => tracing::warn!(error = %e, "setting DNS servers failed"),
        }
    }

    if config.search_domains.is_empty() {
        tracing::info!("no search domains configured, skipping");
    } else {
        match ops.set_search_domains(service, &config.search_domains) {
            Ok(()) => {
                tracing::info!(domains = %config.search_domains.join(", "), "search domains set");
            }
            Err(e) => tracing::warn!(error = %e, "setting search domains failed"),
        }
    }

    match config.gateway.as_deref() {
        Some(gateway) if !config.routes.is_empty() => {
            for route in &config.routes {
                match ops.add_route(route, gateway) {
                    Ok(()) => tracing::info!(route = %route, gateway = %gateway, "route added"),
                    Err(e) => tracing::warn!(error = %e, "adding route failed"),
                }
            }
        }
        _ => tracing::info!("no routes or no gateway configured, skipping routes"),
    }
}

/// Returns `service` to automatic DNS and search domains, then removes
/// each destination in `routes`.
///
/// An empty `routes` list skips removal with an informational message.
pub fn reset(ops: &dyn NetworkOps, service: &str, routes: &[String]) {
    let clear = [AUTOMATIC_SENTINEL.to_string()];

    match ops.set_dns_servers(service, &clear) {
        Ok(()) => tracing::info!(service = %service, "DNS servers reset to automatic"),
        Err(e) => tracing::warn!(error = %e, "resetting DNS servers failed"),
    }
    match ops.set_search_domains(service, &clear) {
        Ok(()) => tracing::info!(service = %service, "search domains reset to automatic"),
        Err(e) => tracing::warn!(error = %e, "resetting search domains failed"),
    }

    if routes.is_empty() {
        tracing::info!("no routes listed for removal, skipping");
        return;
    }
    for route in routes {
        match ops.delete_route(route) {
            Ok(()) => tracing::info!(route = %route, "route removed"),
            Err(e) => tracing::warn!(error = %e, "removing route failed"),
        }
    }
}

/// Queries the current DNS servers and search domains of `service` and
/// writes them to `path` in the configuration format.
///
/// An existing file at `path` is overwritten; backups are meant to be
/// refreshed. `ROUTES` and `GATEWAY` carry fixed comments, as neither can
/// be queried per service.
///
/// # Errors
///
/// Propagates query failures as [`crate::NetsetupError::CommandFailed`]
/// and write failures as [`crate::NetsetupError::Io`].
pub fn backup(ops: &dyn NetworkOps, service: &str, path: &Path) -> Result<()> {
    let dns = ops.dns_servers(service)?;
    let domains = ops.search_domains(service)?;
    std::fs::write(path, render_backup(&dns, &domains))?;
    tracing::info!(path = %path.display(), service = %service, "backup saved");
    Ok(())
}

/// Loads the backup file at `path` and applies it, exactly as `set` would.
///
/// # Errors
///
/// Returns [`crate::NetsetupError::ConfigNotFound`] when no backup exists
/// at `path`.
pub fn restore(ops: &dyn NetworkOps, service: &str, path: &Path) -> Result<()> {
    let config = NetworkConfig::load(path)?;
    apply(ops, service, &config);
    Ok(())
}

fn render_backup(dns_raw: &str, domains_raw: &str) -> String {
    format!(
        "DNS\n{}\n\nDOMAIN\n{}\n\nROUTES\n{ROUTES_COMMENT}\n\nGATEWAY\n{GATEWAY_COMMENT}\n",
        backup_section(dns_raw, NO_DNS_PREFIX, NO_DNS_COMMENT),
        backup_section(domains_raw, NO_DOMAINS_PREFIX, NO_DOMAINS_COMMENT),
    )
}

/// Query output becomes section content verbatim, except the "There aren't
/// any ..." sentinel sentence, which becomes a comment rather than data a
/// later `restore` would feed back to the OS.
fn backup_section(raw: &str, sentinel_prefix: &str, comment: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with(sentinel_prefix) {
        comment.to_string()
    } else {
        trimmed.to_string()
    }
}
