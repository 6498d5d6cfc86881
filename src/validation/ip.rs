//! IPv4/IPv6 address checks for the allow/block list fields.
//!
//! The patterns are the ones the settings backend's web forms accept, so an
//! address rejected here is rejected for the same reason there (IPv6 zone ids
//! are only recognised on `fe80:` link-local addresses, for instance).

use regex::Regex;
use std::sync::LazyLock;

static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .expect("IPv4 regex must compile")
});

static IPV6_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(",
        r"([0-9a-fA-F]{1,4}:){7,7}[0-9a-fA-F]{1,4}",
        r"|([0-9a-fA-F]{1,4}:){1,7}:",
        r"|([0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}",
        r"|([0-9a-fA-F]{1,4}:){1,5}(:[0-9a-fA-F]{1,4}){1,2}",
        r"|([0-9a-fA-F]{1,4}:){1,4}(:[0-9a-fA-F]{1,4}){1,3}",
        r"|([0-9a-fA-F]{1,4}:){1,3}(:[0-9a-fA-F]{1,4}){1,4}",
        r"|([0-9a-fA-F]{1,4}:){1,2}(:[0-9a-fA-F]{1,4}){1,5}",
        r"|[0-9a-fA-F]{1,4}:((:[0-9a-fA-F]{1,4}){1,6})",
        r"|:((:[0-9a-fA-F]{1,4}){1,7}|:)",
        r"|fe80:(:[0-9a-fA-F]{0,4}){0,4}%[0-9a-zA-Z]{1,}",
        r"|::(ffff(:0{1,4}){0,1}:){0,1}((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])\.){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])",
        r"|([0-9a-fA-F]{1,4}:){1,4}:((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])\.){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])",
        r")$",
    ))
    .expect("IPv6 regex must compile")
});

pub fn is_valid_ipv4(ip: &str) -> bool {
    IPV4_RE.is_match(ip)
}

pub fn is_valid_ipv6(ip: &str) -> bool {
    IPV6_RE.is_match(ip)
}

pub fn is_valid_ip(ip: &str) -> bool {
    is_valid_ipv4(ip) || is_valid_ipv6(ip)
}

/// Non-blank lines of an address list that fail [`is_valid_ip`], trimmed.
pub fn invalid_addresses(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !is_valid_ip(line))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4() {
        assert!(is_valid_ipv4("192.168.1.1"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(is_valid_ipv4("255.255.255.255"));
        assert!(!is_valid_ipv4("256.1.1.1"));
        assert!(!is_valid_ipv4("abc.def.gh.i"));
        assert!(!is_valid_ipv4("10.0.0"));
        assert!(!is_valid_ipv4(" 10.0.0.1"));
    }

    #[test]
    fn test_ipv6() {
        assert!(is_valid_ipv6("::1"));
        assert!(is_valid_ipv6("fe80::1"));
        assert!(is_valid_ipv6("2001:0db8:85a3:0000:0000:8a2e:0370:7334"));
        assert!(is_valid_ipv6("fe80::7:8%eth0"));
        assert!(is_valid_ipv6("::ffff:192.0.2.128"));
        assert!(!is_valid_ipv6("not:an:ip"));
        assert!(!is_valid_ipv6("192.168.1.1"));
    }

    #[test]
    fn test_either_family() {
        assert!(is_valid_ip("192.168.1.1"));
        assert!(is_valid_ip("::1"));
        assert!(!is_valid_ip("localhost"));
    }

    #[test]
    fn test_invalid_addresses_skips_blank_lines() {
        let text = "10.0.0.1\n\n  not-an-ip  \n::1\n300.1.1.1\n   ";
        assert_eq!(
            invalid_addresses(text),
            vec!["not-an-ip".to_string(), "300.1.1.1".to_string()]
        );
        assert!(invalid_addresses("").is_empty());
    }
}
