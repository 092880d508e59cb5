//! # macos-netsetup
//!
//! Configure macOS per-service DNS, search domains, and static routes by
//! driving the system's `networksetup` and `route` commands.
//!
//! A plain-text configuration file with `DNS`, `DOMAIN`, `ROUTES`, and
//! `GATEWAY` sections describes the desired state. The `netsetup` binary
//! applies it to a network service chosen interactively or by name, resets
//! a service back to automatic settings, and backs up or restores the
//! current DNS state. A reverse-lookup mode sweeps whole address ranges
//! against a chosen nameserver.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use macos_netsetup::{NetworkConfig, SystemOps, configurator};
//! use std::path::Path;
//!
//! let config = NetworkConfig::load(Path::new("config.ini"))?;
//! configurator::apply(&SystemOps, "Wi-Fi", &config);
//! ```
//!
//! ## Verification
//!
//! ```bash
//! networksetup -getdnsservers Wi-Fi      # current DNS servers
//! networksetup -getsearchdomains Wi-Fi   # current search domains
//! netstat -rn                            # routing table
//! ```
//!
//! ## Permissions
//!
//! Mutations run through `sudo`: setting DNS servers or search domains and
//! adding or removing routes prompt for credentials unless the caller
//! already holds them. Queries and backups need no elevation.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod configurator;
pub mod error;
pub mod lookup;
pub mod ops;
pub mod service;

pub use config::NetworkConfig;
pub use error::{NetsetupError, Result};
pub use ops::{NetworkOps, SystemOps};
