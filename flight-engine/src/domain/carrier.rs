//! Airline carrier code type.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid carrier code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid carrier code: {reason}")]
pub struct InvalidCarrierCode {
    reason: &'static str,
}

/// A valid airline carrier code (e.g. "AA", "B6", "9E").
///
/// IATA designators are two characters; three-character ICAO designators are
/// also accepted. Letters must be uppercase.
///
/// # Examples
///
/// ```
/// use flight_engine::domain::CarrierCode;
///
/// let b6 = CarrierCode::parse("B6").unwrap();
/// assert_eq!(b6.as_str(), "B6");
///
/// assert!(CarrierCode::parse("b6").is_err());
/// assert!(CarrierCode::parse("B").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarrierCode {
    bytes: [u8; 3],
    len: u8,
}

impl CarrierCode {
    /// Parse a carrier code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidCarrierCode> {
        let raw = s.as_bytes();

        if !(2..=3).contains(&raw.len()) {
            return Err(InvalidCarrierCode {
                reason: "must be 2 or 3 characters",
            });
        }

        let mut bytes = [0u8; 3];
        for (slot, &b) in bytes.iter_mut().zip(raw) {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidCarrierCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
            *slot = b;
        }

        Ok(CarrierCode {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Returns the carrier code as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }
}

impl FromStr for CarrierCode {
    type Err = InvalidCarrierCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CarrierCode({})", self.as_str())
    }
}

impl fmt::Display for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for CarrierCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
