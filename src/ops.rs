//! Platform command execution.
//!
//! [`NetworkOps`] is the seam between the tool's logic and the two macOS
//! binaries it drives, `networksetup` and `route`. Query methods return the
//! command's raw stdout; interpreting it (banner lines, "There aren't any"
//! sentinels) is the caller's job. Mutating methods run under `sudo`.

use crate::error::{NetsetupError, Result};

/// Value `networksetup` accepts in place of a server or domain list to
/// clear it and return the service to automatic settings.
pub const AUTOMATIC_SENTINEL: &str = "Empty";

/// Narrow interface over the platform's network configuration commands.
///
/// # Errors
///
/// Every method returns [`crate::NetsetupError::CommandFailed`] when the
/// underlying command cannot be spawned or exits non-zero.
#[allow(clippy::missing_errors_doc)]
pub trait NetworkOps {
    /// Raw output of `networksetup -listallnetworkservices`, banner line
    /// included.
    fn list_services(&self) -> Result<String>;

    /// Raw output of `networksetup -getdnsservers <service>`.
    fn dns_servers(&self, service: &str) -> Result<String>;

    /// Raw output of `networksetup -getsearchdomains <service>`.
    fn search_domains(&self, service: &str) -> Result<String>;

    /// `sudo networksetup -setdnsservers <service> <values..>`.
    fn set_dns_servers(&self, service: &str, values: &[String]) -> Result<()>;

    /// `sudo networksetup -setsearchdomains <service> <values..>`.
    fn set_search_domains(&self, service: &str, values: &[String]) -> Result<()>;

    /// `sudo route add <destination> <gateway>`.
    fn add_route(&self, destination: &str, gateway: &str) -> Result<()>;

    /// `sudo route delete <destination>`.
    fn delete_route(&self, destination: &str) -> Result<()>;
}

/// [`NetworkOps`] backed by the real `networksetup` and `route` binaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOps;

impl NetworkOps for SystemOps {
    fn list_services(&self) -> Result<String> {
        run_capture("networksetup", &["-listallnetworkservices"])
    }

    fn dns_servers(&self, service: &str) -> Result<String> {
        run_capture("networksetup", &["-getdnsservers", service])
    }

    fn search_domains(&self, service: &str) -> Result<String> {
        run_capture("networksetup", &["-getsearchdomains", service])
    }

    fn set_dns_servers(&self, service: &str, values: &[String]) -> Result<()> {
        let mut args = vec!["networksetup", "-setdnsservers", service];
        args.extend(values.iter().map(String::as_str));
        run_capture("sudo", &args).map(drop)
    }

    fn set_search_domains(&self, service: &str, values: &[String]) -> Result<()> {
        let mut args = vec!["networksetup", "-setsearchdomains", service];
        args.extend(values.iter().map(String::as_str));
        run_capture("sudo", &args).map(drop)
    }

    fn add_route(&self, destination: &str, gateway: &str) -> Result<()> {
        run_capture("sudo", &["route", "add", destination, gateway]).map(drop)
    }

    fn delete_route(&self, destination: &str) -> Result<()> {
        run_capture("sudo", &["route", "delete", destination]).map(drop)
    }
}

/// Runs `program` with `args`, capturing output.
///
/// A spawn failure or a non-zero exit becomes
/// [`NetsetupError::CommandFailed`] carrying the rendered command line and
/// whatever diagnostic the command produced (stderr, falling back to stdout,
/// falling back to the exit status).
fn run_capture(program: &str, args: &[&str]) -> Result<String> {
    let rendered = render_command(program, args);
    let output = std::process::Command::new(program)
        .args(args)
        .output()
        .map_err(|e| NetsetupError::CommandFailed {
            command: rendered.clone(),
            detail: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if !stderr.trim().is_empty() {
            stderr.trim().to_string()
        } else if !stdout.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            output.status.to_string()
        };
        return Err(NetsetupError::CommandFailed {
            command: rendered,
            detail,
        });
    }

    tracing::debug!(command = %rendered, "command completed");
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn render_command(program: &str, args: &[&str]) -> String {
    let mut rendered = String::from(program);
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}
