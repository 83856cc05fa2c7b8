//! IP prefix value type and IPv4 range reduction.
//!
//! Provides [`Prefix`] for representing IPv4/IPv6 networks in CIDR form,
//! along with [`reduce_ipv4_range`] for collapsing the inclusive
//! start/end address ranges used by registry `inetnum` records into a
//! single covering prefix.

use crate::error::FeedError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Maximum prefix length for IPv4 (32 bits).
pub const MAX_LENGTH_V4: u8 = 32;
/// Maximum prefix length for IPv6 (128 bits).
pub const MAX_LENGTH_V6: u8 = 128;

/// An IP network in CIDR form: base address plus prefix length.
///
/// Two prefixes are equal iff they have the same address family, the same
/// base address after masking, and the same length. The stored address is
/// kept as supplied (not re-aligned); registry ranges are reported
/// mask-aligned already.
#[derive(Debug, Copy, Clone)]
pub struct Prefix {
    /// The base address, IPv4 or IPv6.
    pub addr: IpAddr,
    /// The prefix length (0-32 for IPv4, 0-128 for IPv6).
    pub len: u8,
}

impl Prefix {
    /// Create a new [`Prefix`], checking the length against the address family.
    pub fn new(addr: IpAddr, len: u8) -> Result<Prefix, FeedError> {
        let max = match addr {
            IpAddr::V4(_) => MAX_LENGTH_V4,
            IpAddr::V6(_) => MAX_LENGTH_V6,
        };
        if len > max {
            return Err(FeedError::MalformedRecord(format!(
                "prefix length {len} is too long for {addr}"
            )));
        }
        Ok(Prefix { addr, len })
    }

    /// True if this prefix is an IPv4 network.
    pub fn is_ipv4(&self) -> bool {
        self.addr.is_ipv4()
    }

    /// Base address with the host bits masked off.
    pub fn network(&self) -> IpAddr {
        match self.addr {
            IpAddr::V4(addr) => {
                let right_len = MAX_LENGTH_V4 - self.len;
                let bits = u32::from(addr) as u64;
                let masked = (bits >> right_len) << right_len;
                IpAddr::V4(Ipv4Addr::from(masked as u32))
            }
            IpAddr::V6(addr) => {
                if self.len == 0 {
                    return IpAddr::V6(Ipv6Addr::from(0u128));
                }
                let right_len = u32::from(MAX_LENGTH_V6 - self.len);
                let bits = u128::from(addr);
                let masked = (bits >> right_len) << right_len;
                IpAddr::V6(Ipv6Addr::from(masked))
            }
        }
    }

    /// Check whether `other` is a subnet of (or equal to) this prefix.
    pub fn contains(&self, other: &Prefix) -> bool {
        if self.addr.is_ipv4() != other.addr.is_ipv4() || other.len < self.len {
            return false;
        }
        let truncated = Prefix {
            addr: other.addr,
            len: self.len,
        };
        truncated.network() == self.network()
    }
}

/// Stand-in for an absent prefix: the all-zero IPv4 network.
impl Default for Prefix {
    fn default() -> Prefix {
        Prefix {
            addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            len: 0,
        }
    }
}

impl PartialEq for Prefix {
    fn eq(&self, other: &Prefix) -> bool {
        self.len == other.len && self.network() == other.network()
    }
}

impl Eq for Prefix {}

impl Hash for Prefix {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.network().hash(state);
    }
}

impl FromStr for Prefix {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Prefix, FeedError> {
        let s = s.trim();
        let (addr, len) = s
            .split_once('/')
            .ok_or_else(|| FeedError::MalformedRecord(format!("not in CIDR form: {s}")))?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|_| FeedError::MalformedRecord(format!("invalid address: {addr}")))?;
        let len: u8 = len
            .parse()
            .map_err(|_| FeedError::MalformedRecord(format!("invalid prefix length: {len}")))?;
        Prefix::new(addr, len)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}

/// Reduce an inclusive IPv4 address range to its minimal covering prefix.
///
/// The registry convention is one range per record, so a single prefix is
/// returned rather than a list. The base address is `start`; alignment of
/// `start` to the computed mask is the caller's responsibility (registry
/// data reports aligned ranges).
///
/// # Arguments
/// * `start` - First address of the range
/// * `end` - Last address of the range, must not be before `start`
///
/// # Returns
/// * `Ok(Prefix)` - The covering prefix
/// * `Err` - [`FeedError::MalformedRecord`] if `end` is before `start`
pub fn reduce_ipv4_range(start: Ipv4Addr, end: Ipv4Addr) -> Result<Prefix, FeedError> {
    let diff = u32::from(end).checked_sub(u32::from(start)).ok_or_else(|| {
        FeedError::MalformedRecord(format!("range end {end} is before start {start}"))
    })?;

    let len = match diff {
        0 => MAX_LENGTH_V4,
        1 => MAX_LENGTH_V4 - 1,
        _ => {
            // ceil(log2(diff)) without going through floats
            let bits = (u32::BITS - diff.leading_zeros()) as u8;
            let ceil_log2 = if diff.is_power_of_two() {
                bits - 1
            } else {
                bits
            };
            MAX_LENGTH_V4 - ceil_log2
        }
    };

    Prefix::new(IpAddr::V4(start), len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(start: &str, end: &str) -> Prefix {
        reduce_ipv4_range(start.parse().unwrap(), end.parse().unwrap())
            .expect("Error reducing range")
    }

    #[test]
    fn test_reduce_ipv4_range() {
        assert_eq!(reduce("192.0.2.0", "192.0.2.255").len, 24);
        assert_eq!(reduce("192.0.2.0", "192.0.2.127").len, 25);
        assert_eq!(reduce("192.0.2.0", "192.0.2.3").len, 30);
        assert_eq!(reduce("192.0.2.0", "192.0.2.1").len, 31);
        assert_eq!(reduce("192.0.2.0", "192.0.2.0").len, 32);
    }

    #[test]
    fn test_reduce_keeps_start_address() {
        let prefix = reduce("10.20.0.0", "10.20.255.255");
        assert_eq!(prefix, "10.20.0.0/16".parse().unwrap());
        assert_eq!(prefix.addr, "10.20.0.0".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_reduce_power_of_two_ranges() {
        // end - start == 2^k - 1 must give prefix length 32 - k
        for k in 0..=24u32 {
            let start = Ipv4Addr::from(10u32 << 24);
            let end = Ipv4Addr::from((10u32 << 24) + (1u32 << k) - 1);
            let prefix = reduce_ipv4_range(start, end).expect("Error reducing range");
            assert_eq!(
                u32::from(prefix.len),
                32 - k,
                "Wrong length for k={k} ({start} - {end})"
            );
        }
    }

    #[test]
    fn test_reduce_reversed_range() {
        let result = reduce_ipv4_range("192.0.2.1".parse().unwrap(), "192.0.2.0".parse().unwrap());
        assert!(result.is_err(), "Reversed range should be rejected");
    }

    #[test]
    fn test_parse_and_display() {
        let prefix: Prefix = "192.0.2.0/24".parse().unwrap();
        assert_eq!(prefix.addr, "192.0.2.0".parse::<IpAddr>().unwrap());
        assert_eq!(prefix.len, 24);
        assert_eq!(prefix.to_string(), "192.0.2.0/24");

        let prefix: Prefix = "2001:db8::/32".parse().unwrap();
        assert!(!prefix.is_ipv4());
        assert_eq!(prefix.to_string(), "2001:db8::/32");

        assert!("192.0.2.0".parse::<Prefix>().is_err());
        assert!("192.0.2.0/33".parse::<Prefix>().is_err());
        assert!("2001:db8::/129".parse::<Prefix>().is_err());
        assert!("not-an-address/24".parse::<Prefix>().is_err());
        assert!("192.0.2.0/abc".parse::<Prefix>().is_err());
    }

    #[test]
    fn test_eq_after_masking() {
        let a: Prefix = "192.0.2.0/24".parse().unwrap();
        let b: Prefix = "192.0.2.128/24".parse().unwrap();
        let c: Prefix = "192.0.2.0/25".parse().unwrap();
        assert_eq!(a, b, "Prefixes should compare equal after masking");
        assert_ne!(a, c, "Different lengths should not compare equal");

        let v4: Prefix = "0.0.0.0/0".parse().unwrap();
        let v6: Prefix = "::/0".parse().unwrap();
        assert_ne!(v4, v6, "Address families should not mix");
    }

    #[test]
    fn test_contains() {
        let supernet: Prefix = "192.0.2.0/24".parse().unwrap();
        let inside: Prefix = "192.0.2.128/25".parse().unwrap();
        let outside: Prefix = "192.0.3.0/25".parse().unwrap();
        let wider: Prefix = "192.0.0.0/16".parse().unwrap();
        let v6: Prefix = "2001:db8::/32".parse().unwrap();

        assert!(supernet.contains(&inside));
        assert!(supernet.contains(&supernet));
        assert!(!supernet.contains(&outside));
        assert!(!supernet.contains(&wider));
        assert!(!supernet.contains(&v6));

        let v6_supernet: Prefix = "2001:db8::/32".parse().unwrap();
        let v6_inside: Prefix = "2001:db8:1::/48".parse().unwrap();
        assert!(v6_supernet.contains(&v6_inside));
    }

    #[test]
    fn test_default_prefix() {
        let prefix = Prefix::default();
        assert_eq!(prefix, "0.0.0.0/0".parse().unwrap());
    }
}
