//! The sectioned configuration-file format: model, parser, and writers.
//!
//! A configuration file is plain UTF-8 text, read line by line. The four
//! case-sensitive headers `DNS`, `DOMAIN`, `ROUTES`, and `GATEWAY` open a
//! section; the non-comment lines that follow are that section's values. A
//! blank line closes the current section early, `#`-prefixed lines are
//! comments anywhere, and only the last `GATEWAY` value is kept.

use crate::error::{NetsetupError, Result};
use std::path::Path;

/// Default configuration file name, used by `init` and `set`.
pub const DEFAULT_CONFIG_FILE: &str = "config.ini";

/// Fixed backup file name, written by `backup` and read by `restore`.
pub const DEFAULT_BACKUP_FILE: &str = "config_backup.ini";

/// Template written by `init`: the four headers with commented example
/// values. Parsing it yields an empty [`NetworkConfig`].
pub const TEMPLATE: &str = "\
# Default configuration file with example values
# Replace the example values with your own configuration

DNS
# 172.20.11.2
# 172.20.12.2

DOMAIN
# example.com
# test.com

ROUTES
# 172.20.11.0/24
# 172.20.12.0/24

GATEWAY
# 172.20.10.1
";

/// One of the four named blocks of the configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// `DNS` — nameserver addresses.
    Dns,
    /// `DOMAIN` — search domains.
    Domain,
    /// `ROUTES` — static route destinations.
    Routes,
    /// `GATEWAY` — the single route gateway.
    Gateway,
}

impl Section {
    /// Recognizes an exact, case-sensitive section header.
    #[must_use]
    pub fn from_header(line: &str) -> Option<Self> {
        match line {
            "DNS" => Some(Self::Dns),
            "DOMAIN" => Some(Self::Domain),
            "ROUTES" => Some(Self::Routes),
            "GATEWAY" => Some(Self::Gateway),
            _ => None,
        }
    }
}

/// Parsed contents of a configuration file.
///
/// Values are kept in file order and are not validated as IP addresses or
/// CIDR blocks — `networksetup` and `route` are the actual validators.
///
/// # Example
///
/// ```
/// use macos_netsetup::NetworkConfig;
///
/// let config = NetworkConfig::parse("DNS\n1.1.1.1\n1.0.0.1\n\nGATEWAY\n10.0.0.1\n");
/// assert_eq!(config.dns_servers, vec!["1.1.1.1", "1.0.0.1"]);
/// assert!(config.search_domains.is_empty());
/// assert_eq!(config.gateway.as_deref(), Some("10.0.0.1"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Nameserver addresses, in file order.
    pub dns_servers: Vec<String>,
    /// Search domains, in file order.
    pub search_domains: Vec<String>,
    /// Static route destinations (CIDR-like specs), in file order.
    pub routes: Vec<String>,
    /// Route gateway; later `GATEWAY` lines overwrite earlier ones.
    pub gateway: Option<String>,
}

impl NetworkConfig {
    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NetsetupError::ConfigNotFound`] if the file does not exist,
    /// or [`NetsetupError::Io`] if it cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NetsetupError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Parses configuration text, single pass, line by line.
    ///
    /// Every invocation returns a fresh value. Lines carrying a value while
    /// no section is open are logged as a warning and dropped; parsing
    /// always continues.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();
        let mut section: Option<Section> = None;

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                // A blank line closes the current section.
                section = None;
                continue;
            }
            if line.starts_with('#') {
                continue;
            }
            if let Some(header) = Section::from_header(line) {
                section = Some(header);
                continue;
            }
            match section {
                Some(Section::Dns) => config.dns_servers.push(line.to_string()),
                Some(Section::Domain) => config.search_domains.push(line.to_string()),
                Some(Section::Routes) => config.routes.push(line.to_string()),
                Some(Section::Gateway) => config.gateway = Some(line.to_string()),
                None => {
                    tracing::warn!(value = %line, "configuration line outside any section, ignored");
                }
            }
        }
        config
    }

    /// Serializes back to the sectioned text format accepted by
    /// [`parse`](Self::parse). Empty sections are omitted; re-parsing the
    /// output yields an equal value.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        push_section(&mut out, "DNS", &self.dns_servers);
        push_section(&mut out, "DOMAIN", &self.search_domains);
        push_section(&mut out, "ROUTES", &self.routes);
        if let Some(gateway) = &self.gateway {
            push_section(&mut out, "GATEWAY", std::slice::from_ref(gateway));
        }
        out
    }
}

fn push_section(out: &mut String, header: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(header);
    out.push('\n');
    for value in values {
        out.push_str(value);
        out.push('\n');
    }
}

/// Writes the fixed [`TEMPLATE`] to `path`.
///
/// # Errors
///
/// Returns [`NetsetupError::ConfigExists`] if `path` already exists — the
/// template never overwrites — or [`NetsetupError::Io`] if the write fails.
pub fn write_template(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(NetsetupError::ConfigExists {
            path: path.display().to_string(),
        });
    }
    std::fs::write(path, TEMPLATE)?;
    tracing::info!(path = %path.display(), "template configuration written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sectioned_file() {
        let config =
            NetworkConfig::parse("DNS\n1.1.1.1\n1.0.0.1\n\nROUTES\n10.0.0.0/24\n\nGATEWAY\n10.0.0.1\n");
        assert_eq!(config.dns_servers, vec!["1.1.1.1", "1.0.0.1"]);
        assert!(config.search_domains.is_empty());
        assert_eq!(config.routes, vec!["10.0.0.0/24"]);
        assert_eq!(config.gateway.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn last_gateway_wins() {
        let config = NetworkConfig::parse("GATEWAY\n10.0.0.1\n10.0.0.2\n10.0.0.3\n");
        assert_eq!(config.gateway.as_deref(), Some("10.0.0.3"));
    }

    #[test]
    fn blank_line_closes_section() {
        // "9.9.9.9" follows a blank line with no new header: dropped.
        let config = NetworkConfig::parse("DNS\n1.1.1.1\n\n9.9.9.9\n");
        assert_eq!(config.dns_servers, vec!["1.1.1.1"]);
    }

    #[test]
    fn comment_does_not_close_section() {
        let config = NetworkConfig::parse("DNS\n1.1.1.1\n# interior note\n8.8.8.8\n");
        assert_eq!(config.dns_servers, vec!["1.1.1.1", "8.8.8.8"]);
    }

    #[test]
    fn headers_are_case_sensitive() {
        // Lowercase "dns" is not a header; with no section open both lines drop.
        let config = NetworkConfig::parse("dns\n1.1.1.1\n");
        assert_eq!(config, NetworkConfig::default());
    }

    #[test]
    fn values_before_any_header_are_dropped() {
        let config = NetworkConfig::parse("1.1.1.1\nDNS\n8.8.8.8\n");
        assert_eq!(config.dns_servers, vec!["8.8.8.8"]);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let config = NetworkConfig::parse("  DNS  \n  1.1.1.1\t\n");
        assert_eq!(config.dns_servers, vec!["1.1.1.1"]);
    }

    #[test]
    fn round_trips_through_to_text() {
        let config = NetworkConfig::parse(
            "DNS\n1.1.1.1\n1.0.0.1\n\nDOMAIN\ncorp.example\n\nROUTES\n10.1.0.0/24\n10.2.0.0/24\n\nGATEWAY\n10.0.0.1\n",
        );
        assert_eq!(NetworkConfig::parse(&config.to_text()), config);

        let sparse = NetworkConfig::parse("DOMAIN\nlab.example\n");
        assert_eq!(NetworkConfig::parse(&sparse.to_text()), sparse);
    }

    #[test]
    fn template_parses_to_empty_config() {
        assert_eq!(NetworkConfig::parse(TEMPLATE), NetworkConfig::default());
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = NetworkConfig::load(&dir.path().join("absent.ini")).unwrap_err();
        assert!(matches!(err, NetsetupError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "DNS\n1.1.1.1\n").unwrap();
        let config = NetworkConfig::load(&path).unwrap();
        assert_eq!(config.dns_servers, vec!["1.1.1.1"]);
    }

    #[test]
    fn template_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        write_template(&path).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();

        let err = write_template(&path).unwrap_err();
        assert!(matches!(err, NetsetupError::ConfigExists { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }
}
