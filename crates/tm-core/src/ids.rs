//! Airport identifiers.
//!
//! Two kinds of identity coexist:
//!
//! - [`AirportId`] is a dense `u32` index into the network's SoA arrays.  It
//!   is only meaningful for the network that issued it.
//! - [`IataCode`] is the three-letter public code from the dataset, stored
//!   inline as `[u8; 3]` so it is `Copy` and hashes cheaply.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Dense index of an airport in an `AirportNetwork`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AirportId(pub u32);

impl AirportId {
    /// Sentinel meaning "no valid airport".
    pub const INVALID: AirportId = AirportId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for AirportId {
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for AirportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportId({})", self.0)
    }
}

impl TryFrom<usize> for AirportId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<AirportId, Self::Error> {
        u32::try_from(n).map(AirportId)
    }
}

// ── IataCode ──────────────────────────────────────────────────────────────────

/// A three-character IATA airport code, e.g. `JFK`.
///
/// Parsing trims surrounding whitespace and accepts exactly three ASCII
/// graphic characters.  Case is preserved.  The OpenFlights null marker
/// `\N` is rejected by the length rule.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IataCode([u8; 3]);

impl IataCode {
    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for IataCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t.as_bytes() {
            &[a, b, c] if [a, b, c].iter().all(u8::is_ascii_graphic) => Ok(IataCode([a, b, c])),
            _ => Err(CoreError::InvalidIata(t.to_owned())),
        }
    }
}

impl TryFrom<&str> for IataCode {
    type Error = CoreError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IataCode({})", self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for IataCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for IataCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
