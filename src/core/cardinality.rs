use crate::core::notation::{match_shape, DottedQuad, Notation, Shape};

/*-------------------------------------------------------------------------------------------------
  Address Counting
-------------------------------------------------------------------------------------------------*/

/// Difference between two dotted quads read as base-256 numbers (`end - start`).
///
/// Octets are folded left to right as `sum = (sum << 8) + end - start`. The result is negative
/// when `end` sorts before `start`, and octets above 255 are carried as written.
pub fn ips_between(start: &DottedQuad, end: &DottedQuad) -> i64 {
    start
        .octets()
        .iter()
        .zip(end.octets().iter())
        .fold(0i64, |sum, (start, end)| {
            (sum << 8) + i64::from(*end) - i64::from(*start)
        })
}

/// Number of addresses in a CIDR block with the given prefix length; zero when the prefix is
/// longer than 32 bits.
pub fn cidr_size(prefix: u8) -> i64 {
    match 32u32.checked_sub(u32::from(prefix)) {
        Some(host_bits) => 1i64 << host_bits,
        None => 0,
    }
}

/// Count the addresses a token denotes: the inclusive size of a range, `2^(32 - prefix)` for a
/// CIDR block, and `1` for anything else.
///
/// The token's shape decides the count; its values are not validated.
///
/// ```
/// assert_eq!(targetspec::count_ip_addresses("10.0.0.0-10.0.0.3"), 4);
/// assert_eq!(targetspec::count_ip_addresses("10.0.0.0/30"), 4);
/// assert_eq!(targetspec::count_ip_addresses("10.0.0.0/0"), 1i64 << 32);
/// assert_eq!(targetspec::count_ip_addresses("10.0.0.5"), 1);
/// ```
pub fn count_ip_addresses(token: &str) -> i64 {
    match match_shape(token) {
        Some(Shape::Range(start, end)) => ips_between(&start, &end) + 1,
        Some(Shape::Cidr(_, prefix)) => cidr_size(prefix),
        None => 1,
    }
}

impl Notation {
    /// Number of addresses this notation denotes; see [count_ip_addresses].
    pub fn count(&self) -> i64 {
        match self {
            Notation::Single(_) => 1,
            Notation::Range { start, end } => ips_between(start, end) + 1,
            Notation::Cidr { prefix, .. } => cidr_size(*prefix),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
