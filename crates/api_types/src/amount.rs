use std::{fmt, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};
use thiserror::Error;

/// Decimal amount with two fractional digits, stored as **integer cents**.
///
/// The backend exchanges decimals as strings (`"12.50"`); numbers are also
/// accepted on input. Serialization always produces the string form.
///
/// ```rust
/// use api_types::Amount;
///
/// let price: Amount = "12,5".parse().unwrap();
/// assert_eq!(price.cents(), 1250);
/// assert_eq!(price.to_string(), "12.50");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount")]
    Invalid,
    #[error("too many decimals")]
    TooManyDecimals,
    #[error("amount too large")]
    Overflow,
}

impl Amount {
    pub const ZERO: Amount = Amount(0);

    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional sign; rejects
    /// more than two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim().replace(',', ".");
        if rest.is_empty() {
            return Err(AmountError::Empty);
        }

        let mut parts = rest.split('.');
        let units = parts.next().ok_or(AmountError::Invalid)?;
        let fraction = parts.next();
        if parts.next().is_some() {
            return Err(AmountError::Invalid);
        }
        if units.is_empty() || !units.chars().all(|c| c.is_ascii_digit()) {
            return Err(AmountError::Invalid);
        }

        let units: i64 = units.parse().map_err(|_| AmountError::Overflow)?;
        let cents: i64 = match fraction {
            None | Some("") => 0,
            Some(frac) if !frac.chars().all(|c| c.is_ascii_digit()) => {
                return Err(AmountError::Invalid);
            }
            Some(frac) if frac.len() == 1 => {
                frac.parse::<i64>().map_err(|_| AmountError::Invalid)? * 10
            }
            Some(frac) if frac.len() == 2 => frac.parse().map_err(|_| AmountError::Invalid)?,
            Some(_) => return Err(AmountError::TooManyDecimals),
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or(AmountError::Overflow)?;

        Ok(Amount(if negative { -total } else { total }))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        v.checked_mul(100)
            .map(Amount)
            .ok_or_else(|| E::custom(AmountError::Overflow))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(AmountError::Overflow))?;
        self.visit_i64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        format!("{v:.2}").parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_cents() {
        assert_eq!(Amount::new(0).to_string(), "0.00");
        assert_eq!(Amount::new(5).to_string(), "0.05");
        assert_eq!(Amount::new(1250).to_string(), "12.50");
        assert_eq!(Amount::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Amount>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Amount>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<Amount>().unwrap().cents(), 1050);
        assert_eq!(" 2.30 ".parse::<Amount>().unwrap().cents(), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<Amount>(), Err(AmountError::Empty));
        assert_eq!("12.345".parse::<Amount>(), Err(AmountError::TooManyDecimals));
        assert_eq!("abc".parse::<Amount>(), Err(AmountError::Invalid));
        assert_eq!("1.2.3".parse::<Amount>(), Err(AmountError::Invalid));
    }

    #[test]
    fn deserializes_backend_strings_and_numbers() {
        let from_str: Amount = serde_json::from_str("\"199.99\"").unwrap();
        assert_eq!(from_str.cents(), 19999);
        let from_int: Amount = serde_json::from_str("7").unwrap();
        assert_eq!(from_int.cents(), 700);
        let from_float: Amount = serde_json::from_str("3.5").unwrap();
        assert_eq!(from_float.cents(), 350);
        assert_eq!(serde_json::to_string(&from_str).unwrap(), "\"199.99\"");
    }
}
