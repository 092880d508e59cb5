//! Network service discovery and interactive selection.

use crate::error::{NetsetupError, Result};
use crate::ops::NetworkOps;
use std::io::{BufRead, Write};

/// Extracts service names from raw `networksetup -listallnetworkservices`
/// output.
///
/// The first line is a header produced by the command itself and is
/// discarded. Every following non-blank line is one service name, in the
/// order reported; a leading `*` (the command's disabled-service marker) is
/// part of the name and kept as-is.
#[must_use]
pub fn parse_services(raw: &str) -> Vec<String> {
    raw.lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Lists the services on `output` as a 1-based numbered menu and reads one
/// selection from `input`.
///
/// The selection gets a single attempt: anything that is not an integer in
/// `1..=count` is returned as an error for the caller to act on.
///
/// # Errors
///
/// [`NetsetupError::NoServices`] when the OS reports none,
/// [`NetsetupError::InvalidSelection`] for a rejected selection, and
/// [`NetsetupError::Io`] if the terminal read or write fails. Failures of
/// the listing command itself propagate unchanged.
pub fn select_service(
    ops: &dyn NetworkOps,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<String> {
    let raw = ops.list_services()?;
    let services = parse_services(&raw);
    if services.is_empty() {
        return Err(NetsetupError::NoServices);
    }

    for (i, name) in services.iter().enumerate() {
        writeln!(output, "{}. {name}", i + 1)?;
    }
    write!(output, "Enter the number of the network service: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let choice = line.trim();

    match choice.parse::<usize>() {
        Ok(n) if (1..=services.len()).contains(&n) => Ok(services[n - 1].clone()),
        _ => Err(NetsetupError::InvalidSelection {
            input: choice.to_string(),
            count: services.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LISTING: &str = "An asterisk (*) denotes that a network service is disabled.\n\
                           USB 10/100/1000 LAN\n\
                           Wi-Fi\n\
                           *Thunderbolt Bridge\n";

    struct StubOps;

    impl NetworkOps for StubOps {
        fn list_services(&self) -> Result<String> {
            Ok(LISTING.to_string())
        }
        fn dns_servers(&self, _service: &str) -> Result<String> {
            unreachable!()
        }
        fn search_domains(&self, _service: &str) -> Result<String> {
            unreachable!()
        }
        fn set_dns_servers(&self, _service: &str, _values: &[String]) -> Result<()> {
            unreachable!()
        }
        fn set_search_domains(&self, _service: &str, _values: &[String]) -> Result<()> {
            unreachable!()
        }
        fn add_route(&self, _destination: &str, _gateway: &str) -> Result<()> {
            unreachable!()
        }
        fn delete_route(&self, _destination: &str) -> Result<()> {
            unreachable!()
        }
    }

    fn select(line: &str) -> Result<String> {
        let mut input = Cursor::new(line.as_bytes().to_vec());
        let mut output = Vec::new();
        select_service(&StubOps, &mut input, &mut output)
    }

    #[test]
    fn parse_drops_header_and_keeps_order() {
        let services = parse_services(LISTING);
        assert_eq!(
            services,
            vec!["USB 10/100/1000 LAN", "Wi-Fi", "*Thunderbolt Bridge"]
        );
    }

    #[test]
    fn parse_of_header_only_output_is_empty() {
        assert!(parse_services("An asterisk (*) denotes that a network service is disabled.\n").is_empty());
        assert!(parse_services("").is_empty());
    }

    #[test]
    fn selection_resolves_positionally() {
        assert_eq!(select("2\n").unwrap(), "Wi-Fi");
    }

    #[test]
    fn selection_accepts_the_last_index() {
        assert_eq!(select("3\n").unwrap(), "*Thunderbolt Bridge");
    }

    #[test]
    fn selection_rejects_zero() {
        let err = select("0\n").unwrap_err();
        assert!(matches!(err, NetsetupError::InvalidSelection { .. }));
    }

    #[test]
    fn selection_rejects_out_of_range() {
        match select("7\n").unwrap_err() {
            NetsetupError::InvalidSelection { input, count } => {
                assert_eq!(input, "7");
                assert_eq!(count, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn selection_rejects_non_numeric_input() {
        let err = select("abc\n").unwrap_err();
        assert!(matches!(err, NetsetupError::InvalidSelection { .. }));
    }

    #[test]
    fn menu_and_prompt_are_written_before_reading() {
        let mut input = Cursor::new(b"1\n".to_vec());
        let mut output = Vec::new();
        select_service(&StubOps, &mut input, &mut output).unwrap();

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(
            shown,
            "1. USB 10/100/1000 LAN\n2. Wi-Fi\n3. *Thunderbolt Bridge\n\
             Enter the number of the network service: "
        );
    }

    #[test]
    fn empty_listing_is_an_error() {
        struct EmptyOps;
        impl NetworkOps for EmptyOps {
            fn list_services(&self) -> Result<String> {
                Ok("An asterisk (*) denotes that a network service is disabled.\n".to_string())
            }
            fn dns_servers(&self, _: &str) -> Result<String> {
                unreachable!()
            }
            fn search_domains(&self, _: &str) -> Result<String> {
                unreachable!()
            }
            fn set_dns_servers(&self, _: &str, _: &[String]) -> Result<()> {
                unreachable!()
            }
            fn set_search_domains(&self, _: &str, _: &[String]) -> Result<()> {
                unreachable!()
            }
            fn add_route(&self, _: &str, _: &str) -> Result<()> {
                unreachable!()
            }
            fn delete_route(&self, _: &str) -> Result<()> {
                unreachable!()
            }
        }

        let mut input = Cursor::new(b"1\n".to_vec());
        let mut output = Vec::new();
        let err = select_service(&EmptyOps, &mut input, &mut output).unwrap_err();
        assert!(matches!(err, NetsetupError::NoServices));
    }
}
