//! Bulk reverse-DNS sweeps against a chosen nameserver.
//!
//! Targets come from a subnet prefix, a CIDR block, or a file of addresses,
//! and are resolved with `nslookup` on a small pool of worker threads.
//! Results keep the input order regardless of thread count.

use crate::error::{NetsetupError, Result};
use cidr::{Ipv4Cidr, Ipv4Inet};
use std::fmt;
use std::net::Ipv4Addr;
use std::path::Path;

/// Header row of the tab-separated report file.
pub const REPORT_HEADER: &str = "IP Address\tReverse DNS Name";

/// Outcome of one reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// PTR record found.
    Name(String),
    /// The server answered, but no PTR record exists.
    NoRecord,
    /// The server did not answer within the lookup timeout.
    TimedOut,
    /// `nslookup` could not be run at all.
    Failed(String),
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::NoRecord => f.write_str("No PTR Record Found"),
            Self::TimedOut => f.write_str("Timeout"),
            Self::Failed(detail) => write!(f, "Error: {detail}"),
        }
    }
}

/// Expands a three-octet subnet prefix (e.g. `10.10.10`) into the host
/// addresses of `<prefix>.0/24`.
///
/// # Errors
///
/// Returns [`NetsetupError::InvalidTarget`] if appending `.0/24` does not
/// produce a valid IPv4 CIDR block.
pub fn expand_subnet(subnet: &str) -> Result<Vec<String>> {
    let spec = format!("{subnet}.0/24");
    let inet: Ipv4Inet = spec.parse().map_err(|_| {
        NetsetupError::InvalidTarget(format!("not a three-octet subnet prefix: {subnet}"))
    })?;
    Ok(host_addresses(&inet.network()))
}

/// Expands a CIDR block into its host addresses. Host bits are tolerated
/// and masked off, so `10.0.0.5/24` expands the whole `/24`.
///
/// # Errors
///
/// Returns [`NetsetupError::InvalidTarget`] for anything that is not an
/// IPv4 CIDR block.
pub fn expand_cidr(spec: &str) -> Result<Vec<String>> {
    let inet: Ipv4Inet = spec
        .parse()
        .map_err(|_| NetsetupError::InvalidTarget(format!("not an IPv4 CIDR block: {spec}")))?;
    Ok(host_addresses(&inet.network()))
}

/// Reads lookup targets from `path`, one address per line, skipping blank
/// lines.
///
/// # Errors
///
/// Returns [`NetsetupError::Io`] if the file cannot be read.
pub fn read_targets(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}

/// Host addresses of `network`: everything between the network and
/// broadcast addresses, or every address for `/31` and `/32`.
fn host_addresses(network: &Ipv4Cidr) -> Vec<String> {
    let first = u32::from(network.first_address());
    let last = u32::from(network.last_address());
    let (lo, hi) = if network.network_length() >= 31 {
        (first, last)
    } else {
        (first + 1, last - 1)
    };
    (lo..=hi).map(|n| Ipv4Addr::from(n).to_string()).collect()
}

/// Resolves the PTR record for `ip` by asking `server` directly.
///
/// The exit status of `nslookup` is deliberately ignored: it is non-zero
/// for NXDOMAIN too, so the output, not the status, carries the answer.
#[must_use]
pub fn resolve_ptr(ip: &str, server: &str) -> Resolution {
    let output = std::process::Command::new("nslookup")
        .args(["-timeout=5", "-retry=1", ip, server])
        .output();
    match output {
        Ok(out) => classify_output(&String::from_utf8_lossy(&out.stdout)),
        Err(e) => Resolution::Failed(e.to_string()),
    }
}

fn classify_output(output: &str) -> Resolution {
    for line in output.lines() {
        if let Some((_, after)) = line.rsplit_once("name =") {
            return Resolution::Name(after.trim().to_string());
        }
    }
    if output.contains("timed out") {
        return Resolution::TimedOut;
    }
    Resolution::NoRecord
}

/// Resolves every address in `ips` with `resolve`, spread over at most
/// `threads` worker threads.
///
/// The input is split into contiguous chunks, one per worker, and results
/// are reassembled in input order.
#[must_use]
pub fn run_lookups<F>(ips: &[String], threads: usize, resolve: F) -> Vec<(String, Resolution)>
where
    F: Fn(&str) -> Resolution + Sync,
{
    if ips.is_empty() {
        return Vec::new();
    }
    let threads = threads.clamp(1, ips.len());
    let chunk_len = ips.len().div_ceil(threads);

    let mut results = Vec::with_capacity(ips.len());
    let resolve = &resolve;
    std::thread::scope(|scope| {
        let handles: Vec<_> = ips
            .chunks(chunk_len)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|ip| (ip.clone(), resolve(ip)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            match handle.join() {
                Ok(part) => results.extend(part),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });
    results
}

/// Renders results as a tab-separated report, one `ip<TAB>outcome` row per
/// lookup under [`REPORT_HEADER`].
#[must_use]
pub fn render_report(results: &[(String, Resolution)]) -> String {
    let mut out = String::from(REPORT_HEADER);
    out.push('\n');
    for (ip, resolution) in results {
        out.push_str(ip);
        out.push('\t');
        out.push_str(&resolution.to_string());
        out.push('\n');
    }
    out
}

/// Writes the report for `results` to `path`, overwriting.
///
/// # Errors
///
/// Returns [`NetsetupError::Io`] if the write fails.
pub fn write_report(path: &Path, results: &[(String, Resolution)]) -> Result<()> {
    std::fs::write(path, render_report(results))?;
    tracing::info!(path = %path.display(), rows = results.len(), "lookup report saved");
    Ok(())
}
