//! Command-line surface and dispatch.
//!
//! Each operation is a subcommand. The service-bound ones (`set`, `reset`,
//! `backup`, `restore`) accept `-p <name>` to name the network service
//! directly and fall back to the interactive selector without it. Flags are
//! short-only.

use crate::config::{self, NetworkConfig};
use crate::error::{NetsetupError, Result};
use crate::ops::{NetworkOps, SystemOps};
use crate::{configurator, lookup, service};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Configure macOS per-service DNS, search domains, and static routes.
#[derive(Parser, Debug)]
#[command(name = "netsetup", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a template configuration file.
    Init(InitArgs),
    /// Apply a configuration file to a network service.
    Set(SetArgs),
    /// Return a network service to automatic DNS and search domains.
    Reset(ResetArgs),
    /// Back up a network service's current DNS and search domains.
    Backup(BackupArgs),
    /// Re-apply the settings saved by `backup`.
    Restore(RestoreArgs),
    /// Reverse-resolve an address range against a chosen DNS server.
    Lookup(LookupArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination path for the template.
    #[arg(short = 'o', default_value = config::DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration file to apply.
    #[arg(short = 'f', default_value = config::DEFAULT_CONFIG_FILE)]
    pub file: PathBuf,
    /// Network service name; skips interactive selection.
    #[arg(short = 'p')]
    pub service: Option<String>,
}

#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Configuration file naming the routes to remove.
    #[arg(short = 'f')]
    pub file: Option<PathBuf>,
    /// Network service name; skips interactive selection.
    #[arg(short = 'p')]
    pub service: Option<String>,
}

#[derive(Args, Debug)]
pub struct BackupArgs {
    /// Destination path for the backup.
    #[arg(short = 'o', default_value = config::DEFAULT_BACKUP_FILE)]
    pub output: PathBuf,
    /// Network service name; skips interactive selection.
    #[arg(short = 'p')]
    pub service: Option<String>,
}

#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Network service name; skips interactive selection.
    #[arg(short = 'p')]
    pub service: Option<String>,
}

#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("target").required(true).args(["subnet", "cidr", "file"])))]
pub struct LookupArgs {
    /// Three-octet subnet prefix swept as a /24 (e.g. 10.10.10).
    #[arg(short = 's')]
    pub subnet: Option<String>,
    /// CIDR block to sweep (e.g. 10.10.10.0/24).
    #[arg(short = 'r')]
    pub cidr: Option<String>,
    /// File of addresses to sweep, one per line.
    #[arg(short = 'f')]
    pub file: Option<PathBuf>,
    /// DNS server to query.
    #[arg(short = 'd')]
    pub server: String,
    /// Also save the results to this file, tab-separated.
    #[arg(short = 'o')]
    pub output: Option<PathBuf>,
    /// Number of worker threads.
    #[arg(short = 't', default_value_t = 10)]
    pub threads: usize,
}

/// Runs the parsed command against the real OS.
///
/// # Errors
///
/// Propagates the first fatal error of the dispatched operation; see
/// [`run_with`].
pub fn run(cli: Cli) -> Result<()> {
    run_with(&SystemOps, cli)
}

/// Runs the parsed command against `ops`.
///
/// # Errors
///
/// Whatever the dispatched operation returns: missing files, invalid
/// interactive selections, failed queries. Best-effort mutation steps do
/// not error here; they are logged by the operation itself.
pub fn run_with(ops: &dyn NetworkOps, cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init(args) => config::write_template(&args.output),
        Command::Set(args) => {
            let service = resolve_service(ops, args.service)?;
            let config = NetworkConfig::load(&args.file)?;
            configurator::apply(ops, &service, &config);
            Ok(())
        }
        Command::Reset(args) => {
            let service = resolve_service(ops, args.service)?;
            let routes = match args.file {
                Some(path) => NetworkConfig::load(&path)?.routes,
                None => Vec::new(),
            };
            configurator::reset(ops, &service, &routes);
            Ok(())
        }
        Command::Backup(args) => {
            let service = resolve_service(ops, args.service)?;
            configurator::backup(ops, &service, &args.output)
        }
        Command::Restore(args) => {
            let service = resolve_service(ops, args.service)?;
            configurator::restore(ops, &service, Path::new(config::DEFAULT_BACKUP_FILE))
        }
        Command::Lookup(args) => run_lookup(&args),
    }
}

fn resolve_service(ops: &dyn NetworkOps, explicit: Option<String>) -> Result<String> {
    match explicit {
        Some(name) => Ok(name),
        None => service::select_service(
            ops,
            &mut std::io::stdin().lock(),
            &mut std::io::stdout().lock(),
        ),
    }
}

fn run_lookup(args: &LookupArgs) -> Result<()> {
    let targets = match (&args.subnet, &args.cidr, &args.file) {
        (Some(subnet), _, _) => {
            tracing::info!(subnet = %subnet, "expanding sequential range");
            lookup::expand_subnet(subnet)?
        }
        (None, Some(cidr), _) => {
            tracing::info!(cidr = %cidr, "expanding CIDR block");
            lookup::expand_cidr(cidr)?
        }
        (None, None, Some(path)) => lookup::read_targets(path)?,
        (None, None, None) => {
            return Err(NetsetupError::InvalidTarget(
                "no subnet, CIDR block, or file given".to_string(),
            ));
        }
    };

    let results = lookup::run_lookups(&targets, args.threads, |ip| {
        lookup::resolve_ptr(ip, &args.server)
    });

    let mut stdout = std::io::stdout().lock();
    for (ip, resolution) in &results {
        writeln!(stdout, "{ip}\t{resolution}")?;
    }

    if let Some(path) = &args.output {
        lookup::write_report(path, &results)?;
    }
    Ok(())
}
