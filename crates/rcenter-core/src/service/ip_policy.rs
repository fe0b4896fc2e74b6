//! IP allow/deny checking for the Request Pipeline's IP Policy filter (C9).
//!
//! Configuration knobs per spec §6: `ipWhitelist`/`ipBlacklist`, comma
//! separated CIDR or bare IPs. Reloads live (no restart), unlike the listen
//! endpoint or TLS settings.

use std::net::IpAddr;
use std::sync::RwLock;

/// A single allow/deny entry: either an exact address or a `prefix/bits` CIDR.
#[derive(Debug, Clone)]
enum Entry {
    Exact(IpAddr),
    Cidr(IpAddr, u8),
}

fn parse_entry(raw: &str) -> Option<Entry> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some((addr, bits)) = raw.split_once('/') {
        let addr: IpAddr = addr.parse().ok()?;
        let bits: u8 = bits.parse().ok()?;
        return Some(Entry::Cidr(addr, bits));
    }
    raw.parse().ok().map(Entry::Exact)
}

fn matches(entry: &Entry, ip: &IpAddr) -> bool {
    match entry {
        Entry::Exact(e) => e == ip,
        Entry::Cidr(base, bits) => match (base, ip) {
            (IpAddr::V4(b), IpAddr::V4(i)) => {
                let bits = (*bits).min(32);
                let mask: u32 = if bits == 0 { 0 } else { u32::MAX << (32 - bits) };
                (u32::from(*b) & mask) == (u32::from(*i) & mask)
            }
            (IpAddr::V6(b), IpAddr::V6(i)) => {
                let bits = (*bits).min(128);
                let mask: u128 = if bits == 0 { 0 } else { u128::MAX << (128 - bits) };
                (u128::from(*b) & mask) == (u128::from(*i) & mask)
            }
            _ => false,
        },
    }
}

/// Live-reloadable IP allow/deny list. Empty whitelist means "allow all
/// unless blacklisted"; a non-empty whitelist means "deny unless listed".
pub struct IpPolicy {
    inner: RwLock<Lists>,
}

struct Lists {
    whitelist: Vec<Entry>,
    blacklist: Vec<Entry>,
}

impl IpPolicy {
    pub fn new(whitelist_csv: &str, blacklist_csv: &str) -> Self {
        Self {
            inner: RwLock::new(Lists {
                whitelist: whitelist_csv.split(',').filter_map(parse_entry).collect(),
                blacklist: blacklist_csv.split(',').filter_map(parse_entry).collect(),
            }),
        }
    }

    pub fn allow_all() -> Self {
        Self::new("", "")
    }

    pub fn reload(&self, whitelist_csv: &str, blacklist_csv: &str) {
        let mut lists = self.inner.write().unwrap();
        lists.whitelist = whitelist_csv.split(',').filter_map(parse_entry).collect();
        lists.blacklist = blacklist_csv.split(',').filter_map(parse_entry).collect();
    }

    pub fn is_allowed(&self, ip: &IpAddr) -> bool {
        let lists = self.inner.read().unwrap();

        if lists.blacklist.iter().any(|e| matches(e, ip)) {
            return false;
        }

        if lists.whitelist.is_empty() {
            return true;
        }

        lists.whitelist.iter().any(|e| matches(e, ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_all_when_unconfigured() {
        let policy = IpPolicy::allow_all();
        assert!(policy.is_allowed(&"10.0.0.1".parse().unwrap()));
    }

    #[test]
    fn blacklist_denies_exact_match() {
        let policy = IpPolicy::new("", "10.0.0.1");
        assert!(!policy.is_allowed(&"10.0.0.1".parse().unwrap()));
        assert!(policy.is_allowed(&"10.0.0.2".parse().unwrap()));
    }

    #[test]
    fn whitelist_restricts_to_cidr() {
        let policy = IpPolicy::new("10.0.0.0/24", "");
        assert!(policy.is_allowed(&"10.0.0.42".parse().unwrap()));
        assert!(!policy.is_allowed(&"10.0.1.1".parse().unwrap()));
    }

    #[test]
    fn blacklist_overrides_whitelist() {
        let policy = IpPolicy::new("10.0.0.0/24", "10.0.0.42");
        assert!(!policy.is_allowed(&"10.0.0.42".parse().unwrap()));
    }

    #[test]
    fn reload_replaces_lists_live() {
        let policy = IpPolicy::new("10.0.0.0/24", "");
        assert!(!policy.is_allowed(&"192.168.1.1".parse().unwrap()));
        policy.reload("", "");
        assert!(policy.is_allowed(&"192.168.1.1".parse().unwrap()));
    }
}
