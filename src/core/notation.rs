use ipnetwork::Ipv4Network;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use thiserror::Error;

/*-------------------------------------------------------------------------------------------------
  Notation Shapes
-------------------------------------------------------------------------------------------------*/

lazy_static! {
    static ref RANGE_REGEX: Regex = Regex::new(
        r"^([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})-([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})$"
    )
    .unwrap();
    static ref CIDR_REGEX: Regex =
        Regex::new(r"^([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})/([0-9]{1,2})$").unwrap();
}

/// Range or CIDR shape recognized by pattern alone; octets and prefix are not bounds-checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shape {
    Range(DottedQuad, DottedQuad),
    Cidr(DottedQuad, u8),
}

pub(crate) fn match_shape(token: &str) -> Option<Shape> {
    if let Some(captures) = RANGE_REGEX.captures(token) {
        let start = captures[1].parse().ok()?;
        let end = captures[2].parse().ok()?;
        return Some(Shape::Range(start, end));
    }

    if let Some(captures) = CIDR_REGEX.captures(token) {
        let base = captures[1].parse().ok()?;
        let prefix = captures[2].parse().ok()?;
        return Some(Shape::Cidr(base, prefix));
    }

    None
}

/*-------------------------------------------------------------------------------------------------
  Dotted Quad
-------------------------------------------------------------------------------------------------*/

/// Four decimal octets exactly as written. Lenient parses may carry octets above 255.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DottedQuad([u16; 4]);

impl DottedQuad {
    pub fn octets(&self) -> [u16; 4] {
        self.0
    }

    /// Convert to an [Ipv4Addr]; `None` when any octet is greater than 255.
    pub fn to_ipv4(&self) -> Option<Ipv4Addr> {
        let [a, b, c, d] = self.0;
        Some(Ipv4Addr::new(
            u8::try_from(a).ok()?,
            u8::try_from(b).ok()?,
            u8::try_from(c).ok()?,
            u8::try_from(d).ok()?,
        ))
    }
}

impl From<Ipv4Addr> for DottedQuad {
    fn from(address: Ipv4Addr) -> Self {
        let [a, b, c, d] = address.octets();
        DottedQuad([a.into(), b.into(), c.into(), d.into()])
    }
}

impl FromStr for DottedQuad {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NotationError::InvalidAddress(s.to_string());

        let mut octets = [0u16; 4];
        let mut parts = s.split('.');
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *octet = part.parse().map_err(|_| invalid())?;
        }

        match parts.next() {
            None => Ok(DottedQuad(octets)),
            Some(_) => Err(invalid()),
        }
    }
}

impl fmt::Display for DottedQuad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl Serialize for DottedQuad {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/*-------------------------------------------------------------------------------------------------
  Parse Mode
-------------------------------------------------------------------------------------------------*/

/// How much semantic checking a parse performs beyond recognizing the notation's shape.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ParseMode {
    /// Ranges and CIDR blocks are accepted on shape alone.
    #[default]
    Lenient,

    /// Octets must be 0-255, range starts must not exceed range ends, and CIDR prefixes must be
    /// 0-32.
    Strict,
}

impl ParseMode {
    pub fn is_strict(&self) -> bool {
        matches!(self, ParseMode::Strict)
    }
}

/*-------------------------------------------------------------------------------------------------
  Notation Errors
-------------------------------------------------------------------------------------------------*/

/// Reason a token was not accepted as a target notation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum NotationError {
    #[error("Empty target")]
    Empty,

    #[error("Incomplete dotted-quad notation: {0}")]
    Incomplete(String),

    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("Not an IPv4 or IPv4-mapped address: {0}")]
    NotIpv4(String),

    #[error("Octet out of range: {0}")]
    OctetOutOfRange(DottedQuad),

    #[error("Prefix length /{0} is out of range for IPv4")]
    PrefixOutOfRange(u8),

    #[error("Range start {start} is greater than range end {end}")]
    ReversedRange { start: Ipv4Addr, end: Ipv4Addr },
}

/*-------------------------------------------------------------------------------------------------
  Notation
-------------------------------------------------------------------------------------------------*/

/// A single IPv4 address, an inclusive `start-end` range, or a `base/prefix` CIDR block.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Notation {
    Single(Ipv4Addr),
    Range { start: DottedQuad, end: DottedQuad },
    Cidr { base: DottedQuad, prefix: u8 },
}

impl Notation {
    /// Parse a trimmed target token.
    ///
    /// Only full dotted-quad notation is accepted. Range and CIDR tokens are recognized by shape
    /// first; anything else must parse as an IPv4 address or an IPv4-mapped IPv6 address.
    ///
    /// ```
    /// use targetspec::{Notation, ParseMode};
    ///
    /// assert!(Notation::parse("10.0.0.0/24", ParseMode::Lenient).is_ok());
    /// assert!(Notation::parse("10.0.0.0/40", ParseMode::Lenient).is_ok());
    /// assert!(Notation::parse("10.0.0.0/40", ParseMode::Strict).is_err());
    /// assert!(Notation::parse("192.168.1", ParseMode::Lenient).is_err());
    /// ```
    pub fn parse(token: &str, mode: ParseMode) -> Result<Notation, NotationError> {
        if token.is_empty() {
            return Err(NotationError::Empty);
        }
        if token.split('.').count() < 4 {
            return Err(NotationError::Incomplete(token.to_string()));
        }

        if let Some(shape) = match_shape(token) {
            let notation = match shape {
                Shape::Range(start, end) => Notation::Range { start, end },
                Shape::Cidr(base, prefix) => Notation::Cidr { base, prefix },
            };
            if mode.is_strict() {
                notation.verify()?;
            }
            trace!("Parsed {:?} as {} notation", token, notation.kind());
            return Ok(notation);
        }

        parse_single(token).map(Notation::Single)
    }

    /// Short name of the notation variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Notation::Single(_) => "single",
            Notation::Range { .. } => "range",
            Notation::Cidr { .. } => "cidr",
        }
    }

    fn verify(&self) -> Result<(), NotationError> {
        match *self {
            Notation::Single(_) => Ok(()),
            Notation::Range { start, end } => {
                let start = start
                    .to_ipv4()
                    .ok_or(NotationError::OctetOutOfRange(start))?;
                let end = end.to_ipv4().ok_or(NotationError::OctetOutOfRange(end))?;
                if u32::from(start) > u32::from(end) {
                    return Err(NotationError::ReversedRange { start, end });
                }
                Ok(())
            }
            Notation::Cidr { base, prefix } => {
                let address = base.to_ipv4().ok_or(NotationError::OctetOutOfRange(base))?;
                Ipv4Network::new(address, prefix)
                    .map(|_| ())
                    .map_err(|_| NotationError::PrefixOutOfRange(prefix))
            }
        }
    }
}

fn parse_single(token: &str) -> Result<Ipv4Addr, NotationError> {
    match token.parse::<IpAddr>() {
        Ok(IpAddr::V4(address)) => Ok(address),
        Ok(IpAddr::V6(address)) => address
            .to_ipv4_mapped()
            .ok_or_else(|| NotationError::NotIpv4(token.to_string())),
        Err(_) => Err(NotationError::InvalidAddress(token.to_string())),
    }
}

impl FromStr for Notation {
    type Err = NotationError;

    /// Parse with [ParseMode::Lenient].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Notation::parse(s, ParseMode::Lenient)
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Single(address) => write!(f, "{address}"),
            Notation::Range { start, end } => write!(f, "{start}-{end}"),
            Notation::Cidr { base, prefix } => write!(f, "{base}/{prefix}"),
        }
    }
}

impl Serialize for Notation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/*--------------------------------------------------------------------------------------
  Validity Check
--------------------------------------------------------------------------------------*/

/// Check whether a trimmed token is an accepted target notation. Range and CIDR tokens are
/// accepted on shape alone; see [ParseMode::Lenient].
///
/// ```
/// assert!(targetspec::is_valid_ip_address("192.168.1.1"));
/// assert!(targetspec::is_valid_ip_address("10.0.0.5-10.0.0.10"));
/// assert!(!targetspec::is_valid_ip_address("192.168.1"));
/// ```
pub fn is_valid_ip_address(token: &str) -> bool {
    Notation::parse(token, ParseMode::Lenient).is_ok()
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
