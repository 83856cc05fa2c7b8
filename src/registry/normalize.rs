//! Normalization of raw registry objects into feed records.

use super::RawObject;
use crate::error::FeedError;
use crate::models::{reduce_ipv4_range, Prefix, Record};
use std::net::Ipv4Addr;

/// Attribute carrying an IPv4 start/end range.
const ATTR_INETNUM: &str = "inetnum";
/// Attribute carrying an IPv6 network in CIDR form.
const ATTR_INET6NUM: &str = "inet6num";
/// Attribute carrying the registered country code.
const ATTR_COUNTRY: &str = "country";

/// Normalize raw registry objects into one [`Record`] per object.
///
/// `inetnum` values are inclusive "start - end" IPv4 ranges and go through
/// the range reducer; `inet6num` values are already in CIDR form and are
/// parsed directly; `country` sets the record's country. Unrecognized
/// attributes are ignored. Output order matches input order. An object
/// without any prefix attribute still emits a record, carrying the default
/// all-zero prefix.
///
/// # Returns
/// * `Ok(Vec<Record>)` - One record per input object
/// * `Err` - [`FeedError::MalformedRecord`] if a range or CIDR value fails to parse
pub fn normalize(objects: &[RawObject]) -> Result<Vec<Record>, FeedError> {
    let mut records = Vec::with_capacity(objects.len());

    for object in objects {
        let mut prefix = Prefix::default();
        let mut country = String::new();

        for attribute in &object.attributes {
            match attribute.name.as_str() {
                ATTR_INETNUM => prefix = parse_inetnum(&attribute.value)?,
                ATTR_INET6NUM => prefix = attribute.value.parse()?,
                ATTR_COUNTRY => country = attribute.value.clone(),
                _ => {}
            }
        }

        records.push(Record { prefix, country });
    }

    Ok(records)
}

/// Parse an inetnum value of the form "192.0.2.0 - 192.0.2.255" into its
/// covering prefix.
fn parse_inetnum(value: &str) -> Result<Prefix, FeedError> {
    let (start, end) = value.split_once(" - ").ok_or_else(|| {
        FeedError::MalformedRecord(format!("inetnum is not a 'start - end' range: {value}"))
    })?;

    let start: Ipv4Addr = start.trim().parse().map_err(|_| {
        FeedError::MalformedRecord(format!("invalid range start address: {start}"))
    })?;
    let end: Ipv4Addr = end
        .trim()
        .parse()
        .map_err(|_| FeedError::MalformedRecord(format!("invalid range end address: {end}")))?;

    reduce_ipv4_range(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Attribute;

    fn object(attributes: &[(&str, &str)]) -> RawObject {
        RawObject {
            attributes: attributes
                .iter()
                .map(|(name, value)| Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_normalize_inetnum() {
        let objects = vec![object(&[
            ("inetnum", "192.0.2.0 - 192.0.2.255"),
            ("netname", "EXAMPLE-NET"),
            ("country", "US"),
        ])];
        let records = normalize(&objects).expect("Error normalizing objects");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prefix, "192.0.2.0/24".parse().unwrap());
        assert_eq!(records[0].country, "US");
    }

    #[test]
    fn test_normalize_inet6num() {
        let objects = vec![object(&[
            ("inet6num", "2001:db8::/32"),
            ("country", "NL"),
        ])];
        let records = normalize(&objects).expect("Error normalizing objects");
        assert_eq!(records[0].prefix, "2001:db8::/32".parse().unwrap());
        assert_eq!(records[0].country, "NL");
    }

    #[test]
    fn test_normalize_preserves_order() {
        let objects = vec![
            object(&[("inetnum", "192.0.2.0 - 192.0.2.255"), ("country", "US")]),
            object(&[("inetnum", "192.0.2.128 - 192.0.2.255"), ("country", "CA")]),
            object(&[("inetnum", "192.0.2.0 - 192.0.2.127"), ("country", "US")]),
        ];
        let records = normalize(&objects).expect("Error normalizing objects");
        let countries: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["US", "CA", "US"]);
        assert_eq!(records[1].prefix, "192.0.2.128/25".parse().unwrap());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let objects = vec![
            object(&[("inetnum", "10.0.0.0 - 10.0.255.255"), ("country", "DE")]),
            object(&[("inet6num", "2001:db8::/32"), ("country", "NL")]),
        ];
        let first = normalize(&objects).expect("Error normalizing objects");
        let second = normalize(&objects).expect("Error normalizing objects");
        assert_eq!(first, second, "Normalization should have no hidden state");
    }

    #[test]
    fn test_normalize_object_without_prefix() {
        // Known edge case: one record per object, even without a prefix
        let objects = vec![object(&[("country", "FR")])];
        let records = normalize(&objects).expect("Error normalizing objects");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prefix, Prefix::default());
        assert_eq!(records[0].country, "FR");
    }

    #[test]
    fn test_normalize_malformed_inetnum() {
        let no_separator = vec![object(&[("inetnum", "192.0.2.0 192.0.2.255")])];
        assert!(normalize(&no_separator).is_err());

        let bad_start = vec![object(&[("inetnum", "not-an-ip - 192.0.2.255")])];
        assert!(normalize(&bad_start).is_err());

        let bad_end = vec![object(&[("inetnum", "192.0.2.0 - not-an-ip")])];
        assert!(normalize(&bad_end).is_err());
    }

    #[test]
    fn test_normalize_malformed_inet6num() {
        let objects = vec![object(&[("inet6num", "2001:db8::")])];
        let result = normalize(&objects);
        assert!(result.is_err(), "inet6num without a length should fail");
    }
}
